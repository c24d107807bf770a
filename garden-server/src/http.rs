//! Shared outbound HTTP plumbing for the provider clients.

use std::time::Duration;

use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::error::LookupError;

/// Build an HTTP client, with a request timeout only if one is configured.
pub fn build_client(timeout_secs: Option<u64>) -> Result<reqwest::Client, LookupError> {
    let mut builder = reqwest::Client::builder();
    if let Some(secs) = timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    Ok(builder.build()?)
}

/// Send a request and decode a successful JSON response body.
pub async fn get_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, LookupError> {
    let response = request.send().await?;
    let status = response.status();

    if !status.is_success() {
        let message = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                warn!(error = %e, %status, "failed to read error response body");
                format!("<unreadable body: {e}>")
            }
        };
        return Err(LookupError::Api {
            status: status.as_u16(),
            message,
        });
    }

    let body = response.text().await?;

    serde_json::from_str(&body).map_err(|e| LookupError::Json {
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;

    /// Answer one request with an error status and a body shorter than
    /// its declared length.
    fn truncated_error_server() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut buf = [0u8; 1024];
            let _ = stream.read(&mut buf);
            let _ = stream.write_all(
                b"HTTP/1.1 502 Bad Gateway\r\nContent-Length: 100\r\n\r\npartial",
            );
        });
        format!("http://{addr}/")
    }

    #[tokio::test]
    async fn unreadable_error_body_is_reported() {
        let url = truncated_error_server();
        let client = build_client(Some(5)).unwrap();

        let err = get_json::<serde_json::Value>(client.get(url))
            .await
            .unwrap_err();

        match err {
            LookupError::Api { status, message } => {
                assert_eq!(status, 502);
                assert!(message.starts_with("<unreadable body"), "{message}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
