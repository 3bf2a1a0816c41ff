use std::path::Path;
use std::sync::Arc;

use super::error::RegistryError;
use super::format::mime_for_extension;

/// An uploaded font: a file name, its MIME type and the raw bytes.
#[derive(Debug, Clone)]
pub struct FontFile {
    pub name: String,
    pub mime_type: String,
    pub data: Arc<[u8]>,
}

impl FontFile {
    pub fn new(
        name: impl Into<String>,
        mime_type: impl Into<String>,
        data: impl Into<Arc<[u8]>>,
    ) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }

    /// Reads a font from disk, guessing the MIME type from the extension.
    pub async fn read(path: &Path) -> Result<Self, RegistryError> {
        let data = tokio::fs::read(path)
            .await
            .map_err(|source| RegistryError::Io {
                path: path.to_path_buf(),
                source,
            })?;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let mime_type = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(mime_for_extension)
            .unwrap_or_default();

        Ok(Self::new(name, mime_type, data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_font_file() {
        let file = FontFile::new("Ink.otf", "font/otf", vec![1u8, 2, 3]);
        assert_eq!(file.name, "Ink.otf");
        assert_eq!(file.mime_type, "font/otf");
        assert_eq!(&*file.data, &[1, 2, 3]);
    }

    #[tokio::test]
    async fn test_read_guesses_mime() {
        let path =
            std::env::temp_dir().join(format!("font-registry-read-{}.woff2", std::process::id()));
        std::fs::write(&path, b"wOF2").unwrap();

        let file = FontFile::read(&path).await;
        let _ = std::fs::remove_file(&path);
        let file = file.unwrap();

        assert!(file.name.ends_with(".woff2"));
        assert_eq!(file.mime_type, "font/woff2");
        assert_eq!(&*file.data, b"wOF2");
    }

    #[tokio::test]
    async fn test_read_missing_file() {
        let path = std::env::temp_dir().join("font-registry-does-not-exist.ttf");
        let err = FontFile::read(&path).await.unwrap_err();
        assert!(matches!(err, RegistryError::Io { .. }));
    }
}
