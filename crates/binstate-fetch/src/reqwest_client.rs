use std::path::Path;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use tokio::io::AsyncWriteExt;

use crate::error::{Error, Result};
use crate::http::{Header, HttpClient};
use crate::options::ClientOptions;

/// Production HTTP client implementation using reqwest.
///
/// Requests run on a private current-thread runtime, so callers stay
/// synchronous.
pub struct ReqwestClient {
    client:  reqwest::Client,
    runtime: tokio::runtime::Runtime,
}

impl ReqwestClient {
    pub fn new(options: &ClientOptions) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .user_agent(options.user_agent.as_str())
            .default_headers(header_map(&options.headers)?);
        if let Some(timeout) = options.timeouts.connect {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(timeout) = options.timeouts.request {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| Error::ClientBuild(error_chain(&e)))?;

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(Error::Runtime)?;

        Ok(Self { client, runtime })
    }

    async fn send(&self, url: &str, headers: &[Header]) -> Result<reqwest::Response> {
        let mut request = self.client.get(url);
        for (name, value) in headers {
            request = request.header(name.as_str(), value.as_str());
        }

        let response = request.send().await.map_err(|e| network(url, &e))?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status {
                url:    url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response)
    }
}

impl HttpClient for ReqwestClient {
    fn get(&self, url: &str, headers: &[Header]) -> Result<Vec<u8>> {
        tracing::debug!(url, "GET");
        self.runtime.block_on(async {
            let response = self.send(url, headers).await?;
            let body = response.bytes().await.map_err(|e| network(url, &e))?;
            Ok(body.to_vec())
        })
    }

    fn download(&self, url: &str, destination: &Path) -> Result<u64> {
        tracing::debug!(url, destination = %destination.display(), "downloading");
        let write_error = |source| Error::Write {
            path: destination.to_path_buf(),
            source,
        };

        self.runtime.block_on(async {
            let mut response = self.send(url, &[]).await?;
            let mut file = tokio::fs::File::create(destination).await.map_err(write_error)?;

            let mut written = 0u64;
            while let Some(chunk) = response.chunk().await.map_err(|e| network(url, &e))? {
                file.write_all(&chunk).await.map_err(write_error)?;
                written += chunk.len() as u64;
            }
            file.flush().await.map_err(write_error)?;

            Ok(written)
        })
    }
}

fn header_map(headers: &[Header]) -> Result<HeaderMap> {
    let mut map = HeaderMap::new();
    for (name, value) in headers {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| Error::ClientBuild(format!("invalid header name '{name}': {e}")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| Error::ClientBuild(format!("invalid value for header '{name}': {e}")))?;
        map.insert(name, value);
    }
    Ok(map)
}

fn network(url: &str, error: &reqwest::Error) -> Error {
    Error::Network {
        url:     url.to_string(),
        message: error_chain(error),
    }
}

/// Render an error with its sources, `outer: inner: root`.
fn error_chain(error: &dyn std::error::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn builds_with_defaults() {
        assert!(ReqwestClient::new(&ClientOptions::default()).is_ok());
    }

    #[test]
    fn builds_with_timeouts_and_headers() {
        let options = ClientOptions::default()
            .connect_timeout(Some(Duration::from_secs(1)))
            .request_timeout(Some(Duration::from_secs(2)))
            .header("Accept", "application/json");
        assert!(ReqwestClient::new(&options).is_ok());
    }

    #[test]
    fn invalid_header_is_rejected() {
        let options = ClientOptions::default().header("bad header", "x");
        assert!(matches!(ReqwestClient::new(&options), Err(Error::ClientBuild(_))));
    }

    #[test]
    fn refused_connection_is_network_error() {
        let options = ClientOptions::default().connect_timeout(Some(Duration::from_secs(2)));
        let client = ReqwestClient::new(&options).unwrap();
        let result = client.get("http://127.0.0.1:9/latest", &[]);
        assert!(matches!(result, Err(Error::Network { .. })));
    }

    #[test]
    fn error_chain_joins_sources() {
        #[derive(Debug, thiserror::Error)]
        #[error("connection failed")]
        struct Connect(#[source] std::io::Error);

        let error = Connect(std::io::Error::other("tls handshake eof"));
        assert_eq!(error_chain(&error), "connection failed: tls handshake eof");
    }

    #[test]
    fn error_chain_without_source_is_plain() {
        let error = Error::Status {
            url:    "https://x".to_string(),
            status: 500,
        };
        assert_eq!(error_chain(&error), "https://x returned HTTP 500");
    }
}
