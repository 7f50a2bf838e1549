use crate::error::FetchError;
use futures_util::io::{AsyncRead, AsyncReadExt};
use std::io;
use std::path::Path;
use tokio::io::AsyncWriteExt;

pub trait DownloadClient {
    /// Streams `url` into `output_path` and returns the number of bytes written.
    /// Fails unless the server declared a content length and exactly that many bytes arrived.
    fn download(
        &self,
        url: &str,
        output_path: &Path,
        chunk_size: usize,
    ) -> impl Future<Output = Result<u64, FetchError>> + Send;

    /// HTTP status of a HEAD request to `url`.
    fn head_status(&self, url: &str) -> impl Future<Output = Result<u16, FetchError>> + Send;
}

/// Bytes received so far against the size the server announced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressState {
    pub transferred: u64,
    pub total: u64,
}

impl ProgressState {
    pub fn new(total: u64) -> Self {
        Self {
            transferred: 0,
            total,
        }
    }

    pub fn advance(&mut self, bytes: usize) {
        self.transferred += bytes as u64;
    }

    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            return 100.0;
        }
        self.transferred as f64 / self.total as f64 * 100.0
    }

    pub fn is_complete(&self) -> bool {
        self.transferred == self.total
    }
}

pub trait Progress {
    fn update(&mut self, state: &ProgressState);
}

/// Discards progress updates.
pub struct NoProgress;

impl Progress for NoProgress {
    fn update(&mut self, _state: &ProgressState) {}
}

/// Copies `reader` into a freshly truncated file at `output_path`, `chunk_size` bytes at a time,
/// and checks the total against `declared_size`.
///
/// A read failing with [io::ErrorKind::UnexpectedEof] ends the stream like a clean EOF, so a
/// truncated body is reported as [FetchError::ShortRead]. On a size mismatch the partially
/// written file is left in place.
pub async fn copy_to_file<R, P>(
    mut reader: R,
    output_path: &Path,
    declared_size: u64,
    chunk_size: usize,
    progress: &mut P,
) -> Result<u64, FetchError>
where
    R: AsyncRead + Unpin,
    P: Progress,
{
    let mut state = ProgressState::new(declared_size);
    let mut buffer = vec![0u8; chunk_size.max(1)];

    {
        let mut file = tokio::fs::File::create(output_path).await?;
        loop {
            let read = match reader.read(&mut buffer).await {
                Ok(0) => break,
                Ok(read) => read,
                Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                    tracing::debug!("Stream ended early: {}", e);
                    break;
                }
                Err(e) => return Err(e.into()),
            };
            file.write_all(&buffer[..read]).await?;
            state.advance(read);
            progress.update(&state);
        }
        file.flush().await?;
    }

    if !state.is_complete() {
        return Err(FetchError::ShortRead {
            expected: state.total,
            actual: state.transferred,
        });
    }

    Ok(state.transferred)
}
