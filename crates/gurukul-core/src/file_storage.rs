//! File storage behind a trait so the backend can be swapped without
//! touching the notes module.
//!
//! The only files this system stores are class-note documents; the local
//! implementation writes them under a configured directory and serves them
//! through the router's static file mount.

use std::fmt;
use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;

use tokio::fs;

/// Storage backend contract: save bytes under a key, delete by key, and
/// resolve a key to a public URL.
pub trait FileStorage: Send + Sync {
    fn save<'a>(
        &'a self,
        key: &'a str,
        content: &'a [u8],
    ) -> Pin<Box<dyn Future<Output = Result<String, StorageError>> + Send + 'a>>;

    fn delete<'a>(
        &'a self,
        key: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<(), StorageError>> + Send + 'a>>;

    fn public_url(&self, key: &str) -> Result<String, StorageError>;
}

#[derive(Debug)]
pub enum StorageError {
    TooLarge { max_bytes: usize },
    UnsupportedType { received: String },
    InvalidKey(String),
    Io(std::io::Error),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooLarge { max_bytes } => {
                write!(f, "file exceeds the maximum size of {} bytes", max_bytes)
            }
            Self::UnsupportedType { received } => {
                write!(f, "unsupported content type '{}'", received)
            }
            Self::InvalidKey(msg) => write!(f, "invalid storage key: {}", msg),
            Self::Io(e) => write!(f, "storage I/O error: {}", e),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

/// Content types accepted for note uploads.
pub const NOTE_CONTENT_TYPES: &[&str] = &["application/pdf"];

/// Reject anything the note bucket does not accept.
pub fn validate_content_type(content_type: &str) -> Result<(), StorageError> {
    if NOTE_CONTENT_TYPES.contains(&content_type) {
        Ok(())
    } else {
        Err(StorageError::UnsupportedType {
            received: content_type.to_string(),
        })
    }
}

/// Local-disk storage rooted at `base_dir`, served at `base_url`.
#[derive(Debug, Clone)]
pub struct LocalFileStorage {
    base_dir: PathBuf,
    base_url: String,
    max_file_size: usize,
}

impl LocalFileStorage {
    pub fn new(base_dir: PathBuf, base_url: String, max_file_size: usize) -> Self {
        Self {
            base_dir,
            base_url,
            max_file_size,
        }
    }

    /// Keys are relative paths; reject traversal and oddball characters.
    fn validate_key(key: &str) -> Result<(), StorageError> {
        if key.is_empty() || key.contains("..") || key.starts_with('/') {
            return Err(StorageError::InvalidKey(
                "key must be a relative path without '..'".to_string(),
            ));
        }
        if !key
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '-' | '_' | '/' | '.'))
        {
            return Err(StorageError::InvalidKey(
                "key contains invalid characters".to_string(),
            ));
        }
        Ok(())
    }
}

impl FileStorage for LocalFileStorage {
    fn save<'a>(
        &'a self,
        key: &'a str,
        content: &'a [u8],
    ) -> Pin<Box<dyn Future<Output = Result<String, StorageError>> + Send + 'a>> {
        Box::pin(async move {
            Self::validate_key(key)?;
            if content.len() > self.max_file_size {
                return Err(StorageError::TooLarge {
                    max_bytes: self.max_file_size,
                });
            }

            let path = self.base_dir.join(key);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).await?;
            }
            fs::write(&path, content).await?;

            Ok(key.to_string())
        })
    }

    fn delete<'a>(
        &'a self,
        key: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<(), StorageError>> + Send + 'a>> {
        Box::pin(async move {
            Self::validate_key(key)?;
            match fs::remove_file(self.base_dir.join(key)).await {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
                Err(e) => Err(e.into()),
            }
        })
    }

    fn public_url(&self, key: &str) -> Result<String, StorageError> {
        Self::validate_key(key)?;
        Ok(format!("{}/{}", self.base_url.trim_end_matches('/'), key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_keys_pass() {
        assert!(LocalFileStorage::validate_key("notes/abc-123.pdf").is_ok());
        assert!(LocalFileStorage::validate_key("notes/class_1/notes.pdf").is_ok());
    }

    #[test]
    fn traversal_and_absolute_keys_fail() {
        assert!(LocalFileStorage::validate_key("../etc/passwd").is_err());
        assert!(LocalFileStorage::validate_key("/etc/passwd").is_err());
        assert!(LocalFileStorage::validate_key("").is_err());
    }

    #[test]
    fn public_url_joins_cleanly() {
        let storage = LocalFileStorage::new(
            PathBuf::from("./uploads"),
            "http://localhost:3000/files/".to_string(),
            1024,
        );
        assert_eq!(
            storage.public_url("notes/a.pdf").unwrap(),
            "http://localhost:3000/files/notes/a.pdf"
        );
    }

    #[test]
    fn only_pdf_is_accepted_for_notes() {
        assert!(validate_content_type("application/pdf").is_ok());
        assert!(validate_content_type("image/png").is_err());
    }

    #[tokio::test]
    async fn save_rejects_oversized_content() {
        let dir = std::env::temp_dir().join("gurukul-storage-test");
        let storage = LocalFileStorage::new(dir, "http://localhost/files".to_string(), 4);
        let result = storage.save("notes/big.pdf", b"too large").await;
        assert!(matches!(result, Err(StorageError::TooLarge { .. })));
    }
}
