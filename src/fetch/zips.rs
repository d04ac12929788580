// src/fetch/zips.rs
use crate::error::FetchError;
use anyhow::{anyhow, Context};
use futures_util::StreamExt;
use reqwest::Client;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;
use url::Url;

/// Download the given ZIP URL and save it under `dest_dir` using the original
/// filename. Returns the full path of the saved file.
///
/// The body is streamed to disk chunk by chunk, so archives larger than
/// memory are fine. If the transfer fails partway through, the partial file
/// is removed; a truncated zip must not survive to be mistaken for a valid
/// archive on a later run.
pub async fn download_zip(
    client: &Client,
    url_str: &str,
    dest_dir: impl AsRef<Path>,
) -> Result<PathBuf, FetchError> {
    let dest_dir = dest_dir.as_ref();
    let fail = |source: anyhow::Error| FetchError::Download {
        url: url_str.to_string(),
        source,
    };

    let url = Url::parse(url_str).map_err(|e| fail(e.into()))?;
    let filename = url
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .filter(|name| !name.is_empty())
        .map(|name| name.to_string())
        .ok_or_else(|| fail(anyhow!("URL has no filename in its path")))?;

    fs::create_dir_all(dest_dir).await.map_err(|e| fail(e.into()))?;
    let dest_path = dest_dir.join(&filename);

    match stream_to_file(client, &url, &dest_path).await {
        Ok(bytes) => {
            debug!(path = %dest_path.display(), bytes, "saved archive");
            Ok(dest_path)
        }
        Err(e) => Err(fail(e)),
    }
}

async fn stream_to_file(client: &Client, url: &Url, dest: &Path) -> anyhow::Result<u64> {
    let resp = client
        .get(url.as_str())
        .send()
        .await
        .with_context(|| format!("request to {} failed", url))?
        .error_for_status()?;

    // Only clean up a file this call created. An archive retained by an
    // earlier run (say after a failed extraction) must survive a failed
    // re-download.
    let mut file = fs::File::create(dest).await?;
    match write_body(resp, &mut file).await {
        Ok(total) => Ok(total),
        Err(e) => {
            drop(file);
            let _ = fs::remove_file(dest).await;
            Err(e)
        }
    }
}

async fn write_body(resp: reqwest::Response, file: &mut fs::File) -> anyhow::Result<u64> {
    let mut stream = resp.bytes_stream();
    let mut total = 0u64;
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.context("reading response body")?;
        file.write_all(&chunk).await?;
        total += chunk.len() as u64;
    }
    file.flush().await?;
    Ok(total)
}
