use std::env;
use std::path::PathBuf;

use gurukul_core::file_storage::LocalFileStorage;

/// Where uploaded class notes live and how they are addressed publicly.
#[derive(Clone, Debug)]
pub struct StorageConfig {
    pub upload_dir: PathBuf,
    pub public_base_url: String,
    pub max_upload_bytes: usize,
}

impl StorageConfig {
    pub fn from_env() -> Self {
        Self {
            upload_dir: env::var("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("storage/uploads")),
            public_base_url: env::var("FILES_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:3000/files".to_string()),
            max_upload_bytes: env::var("MAX_UPLOAD_BYTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(10 * 1024 * 1024), // 10MB
        }
    }

    pub fn storage(&self) -> LocalFileStorage {
        LocalFileStorage::new(
            self.upload_dir.clone(),
            self.public_base_url.clone(),
            self.max_upload_bytes,
        )
    }
}
