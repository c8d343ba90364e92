use super::file_names::{upload_suffix, UPLOAD_PREFIX};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tokio::io::{AsyncRead, AsyncWriteExt};

const RANDOM_CHARS: usize = 16;

/// An uploaded document staged on disk for the duration of one request.
///
/// The file is created empty and owned by the guard before any byte is
/// written, so it is removed on every exit path, including a failed write.
/// Removal failures are logged and otherwise ignored.
#[derive(Debug)]
pub struct TempUpload {
    path: PathBuf,
    file: Option<NamedTempFile>,
}

impl TempUpload {
    /// Write `bytes` under `dir` as `upload_<random>_<stem>.<ext>`
    pub async fn persist(dir: &Path, original_name: &str, bytes: &[u8]) -> std::io::Result<Self> {
        Self::persist_from(dir, original_name, bytes).await
    }

    /// Stream `reader` into a new staged upload under `dir`
    pub async fn persist_from<R>(
        dir: &Path,
        original_name: &str,
        mut reader: R,
    ) -> std::io::Result<Self>
    where
        R: AsyncRead + Unpin,
    {
        let named = tempfile::Builder::new()
            .prefix(UPLOAD_PREFIX)
            .suffix(&upload_suffix(original_name))
            .rand_bytes(RANDOM_CHARS)
            .tempfile_in(dir)?;
        let upload = Self {
            path: named.path().to_path_buf(),
            file: Some(named),
        };

        let mut file = tokio::fs::File::from_std(upload.reopen()?);
        let size_bytes = tokio::io::copy(&mut reader, &mut file).await?;
        file.flush().await?;

        tracing::info!(path = %upload.path.display(), size_bytes = size_bytes, "Upload staged");

        Ok(upload)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn reopen(&self) -> std::io::Result<std::fs::File> {
        match &self.file {
            Some(named) => named.reopen(),
            None => Err(std::io::Error::from(std::io::ErrorKind::NotFound)),
        }
    }
}

impl Drop for TempUpload {
    fn drop(&mut self) {
        let Some(named) = self.file.take() else {
            return;
        };
        match named.close() {
            Ok(()) => tracing::info!(path = %self.path.display(), "Removed temporary upload"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(
                path = %self.path.display(),
                error = %e,
                "Could not remove temporary upload"
            ),
        }
    }
}
