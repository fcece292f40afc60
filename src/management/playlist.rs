use std::path::PathBuf;

use crate::error::ExportError;

pub const XSPF_EXTENSION: &str = "xspf";

/// Writes exported documents into the output directory.
pub struct PlaylistFileManager {
    output_dir: PathBuf,
}

impl PlaylistFileManager {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn path_for(&self, base_name: &str) -> PathBuf {
        self.output_dir
            .join(format!("{base_name}.{ext}", ext = XSPF_EXTENSION))
    }

    /// Writes `document` to `<output_dir>/<base_name>.xspf` in one go,
    /// creating the directory if needed. An existing file is replaced.
    pub async fn persist(&self, base_name: &str, document: &str) -> Result<PathBuf, ExportError> {
        async_fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|e| ExportError::Io {
                path: self.output_dir.clone(),
                source: e,
            })?;

        let path = self.path_for(base_name);
        async_fs::write(&path, document)
            .await
            .map_err(|e| ExportError::Io {
                path: path.clone(),
                source: e,
            })?;

        Ok(path)
    }
}
