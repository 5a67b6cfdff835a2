use crate::error::GddError;
use log::info;
use std::io;
use std::path::Path;

pub async fn ensure_dir_exists(path: &Path) -> Result<(), GddError> {
    match tokio::fs::metadata(path).await {
        Ok(metadata) => {
            if !metadata.is_dir() {
                return Err(GddError::NotADirectory(path.to_path_buf()));
            }
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            info!("Creating directory: {}", path.display());
            tokio::fs::create_dir_all(path)
                .await
                .map_err(|e| GddError::DirCreation(path.to_path_buf(), e))
        }
        Err(e) => Err(GddError::DirCreation(path.to_path_buf(), e)),
    }
}
