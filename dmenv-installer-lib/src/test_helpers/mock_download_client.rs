use crate::download_client::{DownloadClient, NoProgress, copy_to_file};
use crate::error::FetchError;
use futures_util::TryStreamExt;
use futures_util::stream;
use std::collections::HashMap;
use std::io;
use std::path::Path;
use std::sync::Mutex;

/// Serves a fixed sequence of body chunks for every download and canned HEAD statuses.
pub struct MockDownloadClient {
    chunk_sizes: Vec<usize>,
    content_length: Option<u64>,
    head_statuses: HashMap<String, u16>,
    requested: Mutex<Vec<String>>,
}

impl MockDownloadClient {
    /// Declares the sum of `chunk_sizes` as the content length.
    pub fn with_chunks(chunk_sizes: Vec<usize>) -> Self {
        let content_length = chunk_sizes.iter().sum::<usize>() as u64;
        Self {
            chunk_sizes,
            content_length: Some(content_length),
            head_statuses: HashMap::new(),
            requested: Mutex::new(Vec::new()),
        }
    }

    pub fn declaring(self, content_length: u64) -> Self {
        Self {
            content_length: Some(content_length),
            ..self
        }
    }

    /// HEAD requests to `url` answer `status`; unknown URLs answer 200.
    pub fn with_head_status(mut self, url: &str, status: u16) -> Self {
        self.head_statuses.insert(url.to_string(), status);
        self
    }

    /// URLs passed to `download` or `head_status`, in call order.
    pub fn requested_urls(&self) -> Vec<String> {
        self.requested.lock().map(|r| r.clone()).unwrap_or_default()
    }

    fn record(&self, url: &str) {
        if let Ok(mut requested) = self.requested.lock() {
            requested.push(url.to_string());
        }
    }
}

impl DownloadClient for MockDownloadClient {
    async fn download(
        &self,
        url: &str,
        output_path: &Path,
        chunk_size: usize,
    ) -> Result<u64, FetchError> {
        self.record(url);
        let declared_size = self
            .content_length
            .ok_or_else(|| FetchError::MissingContentLength {
                url: url.to_string(),
            })?;

        let chunks: Vec<io::Result<Vec<u8>>> = self
            .chunk_sizes
            .iter()
            .map(|size| Ok(vec![0xAB; *size]))
            .collect();
        let reader = stream::iter(chunks).into_async_read();

        copy_to_file(reader, output_path, declared_size, chunk_size, &mut NoProgress).await
    }

    async fn head_status(&self, url: &str) -> Result<u16, FetchError> {
        self.record(url);
        Ok(self.head_statuses.get(url).copied().unwrap_or(200))
    }
}
