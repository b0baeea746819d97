use crate::domain::ports::Storage;
use crate::utils::error::Result;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn resolve(&self, path: &str) -> PathBuf {
        self.base_path.join(path)
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let data = tokio::fs::read(self.resolve(path)).await?;
        Ok(data)
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = self.resolve(path);

        if let Some(parent) = full_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::write(&full_path, data).await?;
        tracing::debug!("Wrote {} bytes to {}", data.len(), full_path.display());
        Ok(())
    }

    async fn exists(&self, path: &str) -> bool {
        tokio::fs::try_exists(self.resolve(path)).await.unwrap_or(false)
    }
}

/// Joins a directory and file name the way the sitemap writer expects.
pub fn join_path(dir: &str, file: &str) -> String {
    if dir.is_empty() || dir == "." {
        return file.to_string();
    }
    Path::new(dir).join(file).to_string_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_write_creates_parent_dirs_and_reads_back() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path());

        storage.write_file("nested/dir/out.txt", b"hello").await.unwrap();
        assert!(storage.exists("nested/dir/out.txt").await);
        assert_eq!(storage.read_file("nested/dir/out.txt").await.unwrap(), b"hello");
        assert!(!storage.exists("missing.txt").await);
    }

    #[tokio::test]
    async fn test_read_missing_file_is_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path());
        let err = storage.read_file("nope.xml").await.unwrap_err();
        assert_eq!(err.user_friendly_message(), "File not found");
    }

    #[test]
    fn test_join_path() {
        assert_eq!(join_path(".", "sitemap.xml"), "sitemap.xml");
        assert_eq!(join_path("", "sitemap.xml"), "sitemap.xml");
        assert!(join_path("client/public", "sitemap.xml").ends_with("sitemap.xml"));
    }
}
