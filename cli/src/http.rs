//! Blocking JSON client for the catalog backend.

use std::io::Read;
use std::time::Duration;

use serde_json::Value;
use thiserror::Error;
use tracing::info;

/// Errors from a single backend request.
#[derive(Debug, Error)]
pub enum HttpError {
    /// The server answered with a non-2xx status.
    #[error("HTTP error {code}: {body}")]
    Status { code: u16, body: String },

    /// Connection, DNS or timeout failure.
    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },

    /// Body could not be read.
    #[error("failed to read response: {0}")]
    Io(#[from] std::io::Error),

    /// Body is not JSON.
    #[error("response is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

/// HTTP methods the request actions use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

pub struct ApiClient {
    agent: ureq::Agent,
}

impl ApiClient {
    pub fn new(timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        Self { agent }
    }

    /// Sends `body` as JSON and returns the parsed response.
    ///
    /// The body is read in full with no size cap. An empty body reads as
    /// `null`.
    pub fn send(&self, method: Method, url: &str, body: Option<&Value>) -> Result<Value, HttpError> {
        info!(method = method.as_str(), url, "Sending request");
        let request = self
            .agent
            .request(method.as_str(), url)
            .set("Content-Type", "application/json");

        let result = match body {
            Some(body) => request.send_string(&body.to_string()),
            None => request.call(),
        };

        let response = result.map_err(|e| match e {
            ureq::Error::Status(code, response) => HttpError::Status {
                code,
                body: String::from_utf8_lossy(&read_body(response).unwrap_or_default())
                    .into_owned(),
            },
            ureq::Error::Transport(t) => HttpError::Transport {
                url: url.to_string(),
                message: t.to_string(),
            },
        })?;

        let bytes = read_body(response)?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_slice(&bytes)?)
    }
}

/// Reads the whole body. `Response::into_string` stops at 10 MB.
fn read_body(response: ureq::Response) -> std::io::Result<Vec<u8>> {
    let mut bytes = Vec::new();
    response.into_reader().read_to_end(&mut bytes)?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use std::io::{BufRead, BufReader, Write};
    use std::net::TcpListener;
    use std::thread;

    use super::*;

    /// Answers one request with `body` and returns the collection URL.
    fn serve_once(body: Vec<u8>) -> (String, thread::JoinHandle<()>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/acts", listener.local_addr().unwrap());
        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());
            loop {
                let mut line = String::new();
                reader.read_line(&mut line).unwrap();
                if line == "\r\n" || line.is_empty() {
                    break;
                }
            }
            write!(
                stream,
                "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                body.len()
            )
            .unwrap();
            stream.write_all(&body).unwrap();
        });
        (url, handle)
    }

    #[test]
    fn test_large_response_is_read_in_full() {
        let item = format!("{{\"lyrics\":\"{}\"}}", "la ".repeat(1_000));
        let count = 11 * 1024 * 1024 / item.len() + 1;
        let body = format!("[{}]", vec![item; count].join(","));
        assert!(body.len() > 10 * 1024 * 1024);
        let (url, server) = serve_once(body.into_bytes());

        let value = ApiClient::new(Duration::from_secs(30))
            .send(Method::Get, &url, None)
            .unwrap();

        server.join().unwrap();
        assert_eq!(value.as_array().unwrap().len(), count);
    }

    #[test]
    fn test_empty_response_reads_as_null() {
        let (url, server) = serve_once(Vec::new());
        let value = ApiClient::new(Duration::from_secs(5))
            .send(Method::Delete, &url, None)
            .unwrap();
        server.join().unwrap();
        assert!(value.is_null());
    }

    #[test]
    fn test_status_error_names_code_and_body() {
        let err = HttpError::Status {
            code: 404,
            body: "act not found".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP error 404: act not found");
    }

    #[test]
    fn test_unreachable_server_is_transport_error() {
        let client = ApiClient::new(Duration::from_secs(2));
        let err = client
            .send(Method::Get, "http://127.0.0.1:1/acts", None)
            .unwrap_err();
        assert!(matches!(err, HttpError::Transport { .. }));
    }
}
