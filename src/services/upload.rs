use std::path::{Path, PathBuf};

/// Advisory client-side filter, not a security boundary. The service behind
/// the predict endpoint does its own validation.
pub const ACCEPTED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ACCEPTED_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// One file per submission: a multi-file drop forwards only the first
/// supported entry, the rest are ignored. Nothing supported means no
/// selection at all.
pub fn select_upload(paths: &[String]) -> Option<PathBuf> {
    paths
        .iter()
        .map(PathBuf::from)
        .find(|path| is_supported_image(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_the_advertised_extensions() {
        for name in ["a.jpg", "b.jpeg", "c.png", "d.webp", "e.JPG", "f.WebP"] {
            assert!(is_supported_image(Path::new(name)), "{} should pass", name);
        }
    }

    #[test]
    fn rejects_everything_else() {
        for name in ["a.gif", "b.tiff", "c.txt", "d.mp4", "noext", "e.png.exe"] {
            assert!(!is_supported_image(Path::new(name)), "{} should fail", name);
        }
    }

    #[test]
    fn multi_file_drop_forwards_only_the_first_supported() {
        let paths = vec![
            "notes.txt".to_string(),
            "first.png".to_string(),
            "second.jpg".to_string(),
        ];
        assert_eq!(select_upload(&paths), Some(PathBuf::from("first.png")));
    }

    #[test]
    fn unsupported_selection_yields_nothing() {
        let paths = vec!["clip.mp4".to_string(), "doc.pdf".to_string()];
        assert_eq!(select_upload(&paths), None);
        assert_eq!(select_upload(&[]), None);
    }
}
