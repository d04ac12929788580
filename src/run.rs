use crate::config::Config;
use crate::error::FetchError;
use crate::fetch;
use reqwest::Client;
use tracing::{error, info};

/// Outcome of one invocation across all requested periods.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub succeeded: usize,
    pub failed: usize,
    /// Exit code of the first failure encountered, if any.
    pub first_failure_code: Option<i32>,
}

/// Run the download/extract pipeline for each URL in order.
///
/// Strictly sequential, one attempt per period, no retries. A failed period
/// is logged and the run moves on to the next one.
pub async fn process_all(client: &Client, cfg: &Config, urls: &[String]) -> RunSummary {
    let mut summary = RunSummary::default();
    for url in urls {
        match process_one(client, cfg, url).await {
            Ok(()) => {
                info!(url, "period complete");
                summary.succeeded += 1;
            }
            Err(e) => {
                error!(url, error = %e, "period failed");
                summary.failed += 1;
                summary.first_failure_code.get_or_insert(e.exit_code());
            }
        }
    }
    summary
}

/// Download one archive and unpack it into the data directory.
pub async fn process_one(client: &Client, cfg: &Config, url: &str) -> Result<(), FetchError> {
    info!(url, "downloading");
    let zip_path = fetch::zips::download_zip(client, url, &cfg.data_dir).await?;
    info!(path = %zip_path.display(), "downloaded, extracting");

    // zip decompression is blocking work
    let out_dir = cfg.data_dir.clone();
    let zip = zip_path.clone();
    tokio::task::spawn_blocking(move || fetch::extract::extract_and_remove(&zip, &out_dir))
        .await
        .map_err(|e| FetchError::Extraction {
            path: zip_path,
            source: e.into(),
        })?
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use zip::write::SimpleFileOptions;
    use zip::CompressionMethod;

    fn sample_zip_bytes() -> Vec<u8> {
        let mut buf = Vec::new();
        {
            let mut zip = zip::ZipWriter::new(std::io::Cursor::new(&mut buf));
            let options =
                SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
            zip.start_file("202502-citibike-tripdata_1.csv", options).unwrap();
            zip.write_all(b"ride_id,started_at\nA,B\n").unwrap();
            zip.finish().unwrap();
        }
        buf
    }

    async fn serve_once(body: Vec<u8>) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            let header = format!(
                "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                body.len()
            );
            socket.write_all(header.as_bytes()).await.unwrap();
            socket.write_all(&body).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_failed_period_does_not_stop_the_run() {
        let scratch = tempdir().unwrap();
        let cfg = Config {
            data_dir: scratch.path().join("raw_data"),
            base_url: String::new(),
        };
        let client = Client::new();

        let base = serve_once(sample_zip_bytes()).await;
        let urls = vec![
            // nothing listens here, the first period fails
            "http://127.0.0.1:1/202501-citibike-tripdata.zip".to_string(),
            format!("{}/202502-citibike-tripdata.zip", base),
        ];

        let summary = process_all(&client, &cfg, &urls).await;

        assert_eq!(summary.failed, 1);
        assert_eq!(summary.succeeded, 1);
        assert_eq!(summary.first_failure_code, Some(2));
        assert!(cfg
            .data_dir
            .join("202502-citibike-tripdata_1.csv")
            .exists());
        assert!(!cfg.data_dir.join("202502-citibike-tripdata.zip").exists());
        assert!(!cfg.data_dir.join("202501-citibike-tripdata.zip").exists());
    }

    #[tokio::test]
    async fn test_single_url_success() {
        let scratch = tempdir().unwrap();
        let cfg = Config {
            data_dir: scratch.path().join("raw_data"),
            base_url: String::new(),
        };
        let client = Client::new();

        let base = serve_once(sample_zip_bytes()).await;
        let url = format!("{}/202502-citibike-tripdata.zip", base);
        process_one(&client, &cfg, &url).await.unwrap();

        assert!(cfg
            .data_dir
            .join("202502-citibike-tripdata_1.csv")
            .exists());
    }
}
