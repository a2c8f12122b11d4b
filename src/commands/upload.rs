use crate::error::AppError;
use crate::services::upload::ACCEPTED_EXTENSIONS;
use tauri::AppHandle;
use tauri_plugin_dialog::DialogExt;

/// Open the native file picker filtered to the accepted image types.
/// Cancelling the dialog returns None and leaves the session untouched.
#[tauri::command]
pub async fn pick_image(app: AppHandle) -> Result<Option<String>, AppError> {
    let picked = tauri::async_runtime::spawn_blocking(move || {
        app.dialog()
            .file()
            .add_filter("Images", ACCEPTED_EXTENSIONS)
            .blocking_pick_file()
    })
    .await
    .map_err(|e| AppError {
        message: format!("File dialog task failed: {}", e),
    })?;

    Ok(picked.map(|file| file.to_string()))
}
