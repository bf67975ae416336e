///! Catalog text retrieval
///!
///! Best-effort: a single blocking GET, no retries. Anything other than
///! HTTP 200 with a UTF-8 body is reported as `None`.

use reqwest::StatusCode;
use reqwest::blocking::Client;
use std::time::Duration;

use crate::error::Result;

const USER_AGENT: &str = concat!("tsat/", env!("CARGO_PKG_VERSION"));

/// Anything that can hand back the text behind a URL
pub trait TextSource {
    fn fetch_text(&self, url: &str) -> Option<String>;
}

/// Blocking HTTP source backed by reqwest
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
}

impl HttpSource {
    pub fn new(timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self::with_client(client))
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl TextSource for HttpSource {
    fn fetch_text(&self, url: &str) -> Option<String> {
        let response = match self.client.get(url).send() {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("Request to {} failed: {}", url, e);
                return None;
            }
        };

        if response.status() != StatusCode::OK {
            tracing::warn!("HTTP error {} for {}", response.status(), url);
            return None;
        }

        match response.text() {
            Ok(body) => {
                tracing::debug!("Fetched {} bytes from {}", body.len(), url);
                Some(body)
            }
            Err(e) => {
                tracing::warn!("Failed to read response body from {}: {}", url, e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;

    /// Serve one canned response on a random local port and return its URL
    fn serve_once(status_line: &'static str, body: &'static str) -> (String, thread::JoinHandle<()>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/elements/weather.txt", listener.local_addr().unwrap());

        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: text/plain; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).unwrap();
        });

        (url, handle)
    }

    fn local_source() -> HttpSource {
        let client = Client::builder()
            .no_proxy()
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();
        HttpSource::with_client(client)
    }

    #[test]
    fn test_status_ok_returns_body() {
        let (url, server) = serve_once("200 OK", "NOAA\n1\n2\n");
        let source = local_source();

        assert_eq!(source.fetch_text(&url).as_deref(), Some("NOAA\n1\n2\n"));
        server.join().unwrap();
    }

    #[test]
    fn test_not_found_is_none() {
        let (url, server) = serve_once("404 Not Found", "missing");
        let source = local_source();

        assert!(source.fetch_text(&url).is_none());
        server.join().unwrap();
    }

    #[test]
    fn test_other_success_codes_are_none() {
        let (url, server) = serve_once("203 Non-Authoritative Information", "NOAA\n1\n2\n");
        let source = local_source();

        assert!(source.fetch_text(&url).is_none());
        server.join().unwrap();
    }

    #[test]
    fn test_http_source_builds() {
        assert!(HttpSource::new(5).is_ok());
    }

    #[test]
    fn test_unreachable_host_is_none() {
        let source = HttpSource::new(2).unwrap();
        assert!(source.fetch_text("http://127.0.0.1:9/elements/weather.txt").is_none());
    }

    #[test]
    #[ignore] // Requires network connection
    fn test_fetch_weather_catalog() {
        let source = HttpSource::new(30).unwrap();
        let text = source.fetch_text("http://celestrak.com/NORAD/elements/weather.txt");
        assert!(text.is_some());
    }
}
