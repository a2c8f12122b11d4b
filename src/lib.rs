mod commands;
mod error;
mod models;
mod services;

use services::detector::{DetectorClient, DetectorConfig};
use services::session::SessionStore;
use tauri::Manager;

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .plugin(tauri_plugin_dialog::init())
        .plugin(tauri_plugin_window_state::Builder::default().build())
        .setup(|app| {
            app.manage(SessionStore::new());
            app.manage(DetectorClient::new(DetectorConfig::from_env()));
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            commands::upload::pick_image,
            commands::analysis::analyze_image,
            commands::analysis::get_session,
            commands::analysis::reset_session,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
