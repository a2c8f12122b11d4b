pub mod detection_types;
