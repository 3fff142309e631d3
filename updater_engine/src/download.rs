use futures_util::StreamExt;
use reqwest::{Client, header};
use std::{
    path::{Path, PathBuf},
    time::Duration,
};
use tokio::{fs::File, io::AsyncWriteExt};
use tracing::{debug, trace};

use crate::{
    chunker::FixedChunker,
    errors::UpdaterError,
    open_file_writer::open_file_writer,
    types::{DownloadProgress, DownloadRequest},
    utils::join_url,
};

/// Streams one remote file to disk.
///
/// A failed download leaves whatever was already written at the destination;
/// callers must treat that file as unreliable.
#[derive(Debug, Clone)]
pub struct DownloadClient {
    client: Client,
    chunk_size: usize,
}

impl DownloadClient {
    /// `timeout` bounds connecting and every single read of the body.
    pub fn new(timeout: Duration, chunk_size: usize) -> Result<Self, UpdaterError> {
        let client = Client::builder()
            .connect_timeout(timeout)
            .read_timeout(timeout)
            .build()
            .map_err(|err| UpdaterError::download(format!("failed to build HTTP client: {}", err)))?;
        Ok(Self { client, chunk_size })
    }

    pub async fn download_request<F>(
        &self,
        request: &DownloadRequest,
        on_progress: F,
    ) -> Result<PathBuf, UpdaterError>
    where
        F: FnMut(DownloadProgress),
    {
        self.download(
            &request.base_url,
            &request.file_name,
            &request.destination,
            on_progress,
        )
        .await
    }

    /// Downloads `<base_url>/<file_name>` into `destination`, calling
    /// `on_progress` after every chunk is written.
    pub async fn download<F>(
        &self,
        base_url: &str,
        file_name: &str,
        destination: &Path,
        mut on_progress: F,
    ) -> Result<PathBuf, UpdaterError>
    where
        F: FnMut(DownloadProgress),
    {
        let url = join_url(base_url, file_name)?;
        debug!("downloading {} to {}", url, destination.display());

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| UpdaterError::download(err.to_string()))?;

        if !response.status().is_success() {
            return Err(UpdaterError::download(format!(
                "failed while downloading, HTTP status code: {}",
                response.status()
            )));
        }

        let total = content_length(&response);
        let mut writer = open_file_writer(destination)
            .await
            .map_err(UpdaterError::from_write_error)?;

        let mut progress = DownloadProgress {
            downloaded: 0,
            total,
        };
        let mut chunker = FixedChunker::new(self.chunk_size);
        let mut stream = response.bytes_stream();

        while let Some(frame) = stream.next().await {
            let frame = frame.map_err(|err| UpdaterError::download(err.to_string()))?;
            chunker.push(&frame);
            while let Some(chunk) = chunker.next_chunk() {
                write_chunk(&mut writer, &chunk, &mut progress, &mut on_progress).await?;
            }
        }
        if let Some(tail) = chunker.finish() {
            write_chunk(&mut writer, &tail, &mut progress, &mut on_progress).await?;
        }

        writer.flush().await.map_err(UpdaterError::from_write_error)?;
        debug!(
            "finished {}: {} bytes written",
            destination.display(),
            progress.downloaded
        );

        Ok(destination.to_path_buf())
    }
}

async fn write_chunk<F>(
    writer: &mut File,
    chunk: &[u8],
    progress: &mut DownloadProgress,
    on_progress: &mut F,
) -> Result<(), UpdaterError>
where
    F: FnMut(DownloadProgress),
{
    if chunk.is_empty() {
        return Ok(());
    }
    writer
        .write_all(chunk)
        .await
        .map_err(UpdaterError::from_write_error)?;
    progress.downloaded += chunk.len() as u64;
    trace!("{}/{} bytes", progress.downloaded, progress.total);
    on_progress(*progress);
    Ok(())
}

/// `Content-Length` as sent by the server, 0 when absent. A malformed value
/// never reaches this point: the HTTP client fails the request instead.
fn content_length(response: &reqwest::Response) -> u64 {
    response
        .headers()
        .get(header::CONTENT_LENGTH)
        .and_then(|val| val.to_str().ok())
        .and_then(|val| val.trim().parse::<u64>().ok())
        .unwrap_or(0)
}
