// Report record transports.
// Fetches raw record bytes over HTTP or from the local filesystem.

use std::io;
use std::time::Duration;

use reqwest::{
    Client, Response, StatusCode,
    header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT},
};

use crate::error::{Result, ViewError};

/// Retrieves the raw bytes stored at a report location.
///
/// One request per call; implementations do not retry.
#[allow(async_fn_in_trait)]
pub trait RecordSource {
    async fn fetch(&self, location: &str) -> Result<Vec<u8>>;
}

/// Reads report records from a web server.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
}

impl HttpSource {
    pub fn new(timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static("commit-view"));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(ViewError::Http)?;

        Ok(Self { client })
    }

    /// Check response status and convert errors.
    async fn check_response(response: Response) -> Result<Response> {
        match response.status() {
            StatusCode::OK => Ok(response),
            StatusCode::NOT_FOUND => Err(ViewError::NotFound(response.url().to_string())),
            status => Err(ViewError::Other(format!(
                "HTTP {}: {}",
                status,
                response.text().await.unwrap_or_default()
            ))),
        }
    }
}

impl RecordSource for HttpSource {
    async fn fetch(&self, location: &str) -> Result<Vec<u8>> {
        let response = self.client.get(location).send().await?;
        let response = Self::check_response(response).await?;
        Ok(response.bytes().await?.to_vec())
    }
}

/// Reads report records from a directory on disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsSource;

impl RecordSource for FsSource {
    async fn fetch(&self, location: &str) -> Result<Vec<u8>> {
        match tokio::fs::read(location).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(ViewError::NotFound(location.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// Transport picked from the shape of the report root.
#[derive(Debug, Clone)]
pub enum ReportSource {
    Http(HttpSource),
    Fs(FsSource),
}

impl ReportSource {
    /// `http://` and `https://` roots are fetched over the network, anything else from disk.
    pub fn for_root(root: &str, timeout: Duration) -> Result<Self> {
        if is_remote(root) {
            Ok(ReportSource::Http(HttpSource::new(timeout)?))
        } else {
            Ok(ReportSource::Fs(FsSource))
        }
    }
}

impl RecordSource for ReportSource {
    async fn fetch(&self, location: &str) -> Result<Vec<u8>> {
        match self {
            ReportSource::Http(source) => source.fetch(location).await,
            ReportSource::Fs(source) => source.fetch(location).await,
        }
    }
}

fn is_remote(root: &str) -> bool {
    root.starts_with("http://") || root.starts_with("https://")
}

#[cfg(test)]
pub(crate) mod memory {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use super::*;

    /// In-memory source that records every requested location.
    #[derive(Debug, Default)]
    pub struct MemorySource {
        records: HashMap<String, Vec<u8>>,
        requests: Mutex<Vec<String>>,
    }

    impl MemorySource {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with(mut self, location: &str, body: &str) -> Self {
            self.records
                .insert(location.to_string(), body.as_bytes().to_vec());
            self
        }

        pub fn requests(&self) -> Vec<String> {
            self.requests.lock().unwrap().clone()
        }
    }

    impl RecordSource for MemorySource {
        async fn fetch(&self, location: &str) -> Result<Vec<u8>> {
            self.requests.lock().unwrap().push(location.to_string());
            self.records
                .get(location)
                .cloned()
                .ok_or_else(|| ViewError::NotFound(location.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_fs_source_reads_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("abc123");
        std::fs::write(&path, b"{\"hash\":\"abc123\"}").unwrap();

        let bytes = FsSource.fetch(path.to_str().unwrap()).await.unwrap();
        assert_eq!(bytes, b"{\"hash\":\"abc123\"}");
    }

    #[tokio::test]
    async fn test_fs_source_missing_file_is_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing");

        let err = FsSource.fetch(path.to_str().unwrap()).await.unwrap_err();
        assert!(matches!(err, ViewError::NotFound(_)));
    }

    #[test]
    fn test_source_for_root() {
        let timeout = Duration::from_secs(5);

        assert!(matches!(
            ReportSource::for_root("https://example.com/report", timeout).unwrap(),
            ReportSource::Http(_)
        ));
        assert!(matches!(
            ReportSource::for_root("reposense-report", timeout).unwrap(),
            ReportSource::Fs(_)
        ));
    }
}
