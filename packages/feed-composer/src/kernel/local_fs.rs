//! Native implementations of the file and navigation seams

use std::path::Path;

use async_trait::async_trait;

use super::{BaseFileReader, BaseNavigator};
use crate::error::ComposerError;
use crate::types::{FileSource, SelectedFile};

/// Reads files from the local filesystem
#[derive(Debug, Clone, Default)]
pub struct LocalFileReader;

impl LocalFileReader {
    pub fn new() -> Self {
        Self
    }

    /// Describe a file on disk the way a file picker would, guessing its media type from the name
    pub async fn select(path: impl AsRef<Path>) -> Result<SelectedFile, ComposerError> {
        let path = path.as_ref();
        let metadata = tokio::fs::metadata(path)
            .await
            .map_err(|e| ComposerError::FileRead(format!("{}: {}", path.display(), e)))?;

        let media_type = mime_guess::from_path(path)
            .first()
            .map(|mime| mime.essence_str().to_string())
            .unwrap_or_default();
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(SelectedFile {
            name,
            media_type,
            size: metadata.len(),
            source: FileSource::Path(path.to_path_buf()),
        })
    }
}

#[async_trait(?Send)]
impl BaseFileReader for LocalFileReader {
    async fn read_bytes(&self, file: &SelectedFile) -> Result<Vec<u8>, ComposerError> {
        match &file.source {
            FileSource::Path(path) => tokio::fs::read(path)
                .await
                .map_err(|e| ComposerError::FileRead(format!("{}: {}", path.display(), e))),
            FileSource::Memory(bytes) => Ok(bytes.clone()),
            #[cfg(feature = "web")]
            FileSource::Browser(_) => Err(ComposerError::FileRead(format!(
                "{} is a browser file",
                file.name
            ))),
        }
    }
}

/// Navigator for headless runs: there is no page, so navigation is only logged
#[derive(Debug, Clone)]
pub struct LoggingNavigator {
    page_url: String,
}

impl LoggingNavigator {
    pub fn new(page_url: impl Into<String>) -> Self {
        Self {
            page_url: page_url.into(),
        }
    }
}

impl BaseNavigator for LoggingNavigator {
    fn current_url(&self) -> String {
        self.page_url.clone()
    }

    fn navigate(&self, url: &str) {
        tracing::info!(target_url = %url, "Navigating");
    }

    fn reload(&self) {
        tracing::info!(page_url = %self.page_url, "Reloading page");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn select_guesses_media_type_and_reads_bytes() {
        let dir = std::env::temp_dir().join(format!("feed-composer-{}", std::process::id()));
        tokio::fs::create_dir_all(&dir).await.unwrap();
        let path = dir.join("cat.png");
        tokio::fs::write(&path, [1u8, 2, 3, 4]).await.unwrap();

        let file = LocalFileReader::select(&path).await.unwrap();
        assert_eq!(file.name, "cat.png");
        assert_eq!(file.media_type, "image/png");
        assert_eq!(file.size, 4);

        let bytes = LocalFileReader::new().read_bytes(&file).await.unwrap();
        assert_eq!(bytes, vec![1, 2, 3, 4]);

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }

    #[tokio::test]
    async fn missing_file_is_a_read_error() {
        let err = LocalFileReader::select("/definitely/not/here.png")
            .await
            .unwrap_err();
        assert!(matches!(err, ComposerError::FileRead(_)));
    }
}
