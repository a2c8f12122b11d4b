pub mod detector;
pub mod preview;
pub mod session;
pub mod upload;
