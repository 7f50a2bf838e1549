use crate::download_client::{DownloadClient, Progress, ProgressState, copy_to_file};
use crate::error::FetchError;
use crate::logging::progress_bar_style;
use futures_util::{StreamExt, TryStreamExt};
use reqwest::Client;
use std::error::Error as _;
use std::io;
use std::path::Path;
use tracing::instrument;
use tracing_indicatif::span_ext::IndicatifSpanExt;

/// Downloads release artifacts over HTTPS.
pub struct GitHubClient {
    client: Client,
}

impl DownloadClient for GitHubClient {
    #[instrument(skip_all)]
    async fn download(
        &self,
        url: &str,
        output_path: &Path,
        chunk_size: usize,
    ) -> Result<u64, FetchError> {
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        let declared_size =
            response
                .content_length()
                .ok_or_else(|| FetchError::MissingContentLength {
                    url: url.to_string(),
                })?;

        let mut progress = SpanProgress::current(declared_size);
        let reader = response
            .bytes_stream()
            .map_err(body_error)
            .boxed()
            .into_async_read();

        copy_to_file(reader, output_path, declared_size, chunk_size, &mut progress).await
    }

    async fn head_status(&self, url: &str) -> Result<u16, FetchError> {
        let response = self.client.head(url).send().await?;
        Ok(response.status().as_u16())
    }
}

impl GitHubClient {
    pub fn new() -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(concat!("dmenv-installer/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

/// Converts a body error for the copy loop. A connection closed before the declared length
/// keeps its [io::ErrorKind::UnexpectedEof] kind so the copy ends with a size check.
fn body_error(err: reqwest::Error) -> io::Error {
    let truncated = std::iter::successors(err.source(), |&e| e.source()).any(|e| {
        e.downcast_ref::<io::Error>()
            .is_some_and(|io_err| io_err.kind() == io::ErrorKind::UnexpectedEof)
    });
    if truncated {
        io::Error::new(io::ErrorKind::UnexpectedEof, err)
    } else {
        io::Error::other(err)
    }
}

/// Renders download progress as a progress bar attached to the current span.
struct SpanProgress {
    span: tracing::Span,
}

impl SpanProgress {
    fn current(total: u64) -> Self {
        let span = tracing::Span::current();
        match progress_bar_style() {
            Ok(style) => span.pb_set_style(&style),
            Err(e) => tracing::debug!("Invalid progress bar template: {}", e),
        }
        span.pb_set_length(total);
        span.pb_set_message("Downloading:");
        span.pb_set_finish_message("Downloading: done");
        Self { span }
    }
}

impl Progress for SpanProgress {
    fn update(&mut self, state: &ProgressState) {
        self.span.pb_set_position(state.transferred);
    }
}
