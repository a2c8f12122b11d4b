use crate::error::AppError;
use crate::models::detection_types::SessionState;
use crate::services::detector::DetectorClient;
use crate::services::session::SessionStore;
use crate::services::{preview, upload};
use tauri::{AppHandle, Emitter, State};

/// Run one upload-and-classify interaction. `paths` comes from a drop or
/// from `pick_image`; only the first supported entry is used.
///
/// The preview encoding and the prediction request run side by side. They
/// write disjoint fields of the session, so completion order does not
/// matter; stale completions are discarded by the store's generation check.
#[tauri::command]
pub async fn analyze_image(
    app: AppHandle,
    store: State<'_, SessionStore>,
    detector: State<'_, DetectorClient>,
    paths: Vec<String>,
) -> Result<SessionState, AppError> {
    let path = upload::select_upload(&paths).ok_or("No supported image in selection")?;

    let generation = store.begin();
    emit_status(&app, &store);

    let bytes = match tokio::fs::read(&path).await {
        Ok(bytes) => bytes,
        Err(e) => {
            eprintln!("Failed to read {}: {}", path.display(), e);
            store.fail(generation);
            emit_status(&app, &store);
            return Ok(store.snapshot());
        }
    };

    let preview_store = store.inner().clone();
    let preview_app = app.clone();
    let preview_path = path.clone();
    let preview_bytes = bytes.clone();
    tauri::async_runtime::spawn_blocking(move || {
        match preview::data_url(&preview_path, &preview_bytes) {
            Ok(url) => {
                if preview_store.set_preview(generation, url) {
                    emit_status(&preview_app, &preview_store);
                }
            }
            Err(e) => {
                eprintln!("Failed to build preview for {}: {}", preview_path.display(), e);
            }
        }
    });

    let file_name = path
        .file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string();

    store.set_processing(generation);
    emit_status(&app, &store);

    match detector.classify(&file_name, bytes).await {
        Ok(result) => {
            if store.complete(generation, result) {
                emit_status(&app, &store);
            }
        }
        Err(e) => {
            eprintln!("Prediction failed for {}: {}", file_name, e);
            if store.fail(generation) {
                emit_status(&app, &store);
            }
        }
    }

    Ok(store.snapshot())
}

#[tauri::command]
pub fn get_session(store: State<'_, SessionStore>) -> SessionState {
    store.snapshot()
}

/// "Analyze another image": back to the initial record. An in-flight request
/// is not aborted; its completion is orphaned by the generation bump.
#[tauri::command]
pub fn reset_session(app: AppHandle, store: State<'_, SessionStore>) -> SessionState {
    store.reset();
    emit_status(&app, &store);
    store.snapshot()
}

fn emit_status(app: &AppHandle, store: &SessionStore) {
    let _ = app.emit("analysis-status", store.snapshot());
}
