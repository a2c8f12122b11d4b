use crate::error::AppError;
use base64::Engine;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use std::io::Cursor;
use std::path::Path;

/// Files up to this size are embedded as-is; larger ones get decoded and
/// downscaled so the data URL shipped to the webview stays cheap.
const RAW_EMBED_LIMIT: usize = 2 * 1024 * 1024;
const PREVIEW_MAX_DIM: u32 = 1600;
const PREVIEW_QUALITY: u8 = 80;

/// Turn the selected file into an embeddable base64 data URL.
pub fn data_url(path: &Path, bytes: &[u8]) -> Result<String, AppError> {
    if bytes.len() <= RAW_EMBED_LIMIT {
        return Ok(encode_data_url(mime_for_path(path), bytes));
    }

    let jpeg = shrink_to_jpeg(bytes)?;
    Ok(encode_data_url("image/jpeg", &jpeg))
}

fn shrink_to_jpeg(bytes: &[u8]) -> Result<Vec<u8>, AppError> {
    let img = image::load_from_memory(bytes)?;

    let img = if img.width() > PREVIEW_MAX_DIM || img.height() > PREVIEW_MAX_DIM {
        img.resize(PREVIEW_MAX_DIM, PREVIEW_MAX_DIM, FilterType::Triangle)
    } else {
        img
    };

    // JPEG has no alpha channel.
    let img = image::DynamicImage::ImageRgb8(img.to_rgb8());

    let mut buffer = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut buffer, PREVIEW_QUALITY);
    img.write_with_encoder(encoder).map_err(|e| AppError {
        message: format!("Failed to encode preview: {}", e),
    })?;
    Ok(buffer.into_inner())
}

fn encode_data_url(mime: &str, bytes: &[u8]) -> String {
    let b64 = base64::engine::general_purpose::STANDARD.encode(bytes);
    format!("data:{};base64,{}", mime, b64)
}

fn mime_for_path(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .as_deref()
    {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}
