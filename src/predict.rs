use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

/// Default SpliceAI lookup endpoint.
pub const SPLICEAI_URL: &str = "https://spliceailookup-api.broadinstitute.org/spliceai";

/// One prediction request: a candidate sequence with its synthetic
/// substitution. Serializes to the wire payload the lookup API expects.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MutationQuery {
    pub sequence: String,
    pub position: usize,
    #[serde(rename = "ref")]
    pub reference: char,
    #[serde(rename = "alt")]
    pub alternate: char,
}

/// Something that can score a candidate mutation.
///
/// The single method keeps the network dependency substitutable, so the
/// pipeline is tested against canned implementations rather than a live
/// endpoint.
pub trait Predictor {
    fn predict(&self, query: &MutationQuery) -> Result<serde_json::Value, PredictError>;
}

/// A failed prediction request. Failures are values: the caller reports
/// them next to the successful candidates instead of aborting the run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PredictError {
    /// The service answered with a status other than 200.
    #[error("SpliceAI request failed: {0}")]
    Status(u16),

    /// The request never completed: connection failure, timeout, or an
    /// unreadable response body.
    #[error("{0}")]
    Transport(String),
}

/// Blocking client for the SpliceAI lookup API.
pub struct SpliceAi {
    agent: ureq::Agent,
    url: String,
}

impl SpliceAi {
    /// Creates a client for `url` with a fixed per-request timeout.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        SpliceAi {
            agent,
            url: url.into(),
        }
    }
}

impl Predictor for SpliceAi {
    /// Issues one synchronous request and maps the result onto the error
    /// taxonomy: 200 passes the parsed body through unchanged, any other
    /// status becomes [`PredictError::Status`], and everything else
    /// becomes [`PredictError::Transport`]. Nothing is retried.
    fn predict(&self, query: &MutationQuery) -> Result<serde_json::Value, PredictError> {
        match self.agent.post(&self.url).send_json(query) {
            Ok(response) if response.status() == 200 => response
                .into_json()
                .map_err(|e| PredictError::Transport(e.to_string())),
            Ok(response) => Err(PredictError::Status(response.status())),
            Err(ureq::Error::Status(code, _)) => Err(PredictError::Status(code)),
            Err(e) => Err(PredictError::Transport(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::{Read, Write};
    use std::net::{TcpListener, TcpStream};
    use std::thread;

    fn query() -> MutationQuery {
        MutationQuery {
            sequence: "ACGTACGTACGTACGTACGT".to_string(),
            position: 10,
            reference: 'G',
            alternate: 'A',
        }
    }

    /// Serves one canned HTTP response on a loopback port. Returns the URL
    /// to reach it and a handle yielding the raw request that arrived.
    fn serve_once(
        status_line: &'static str,
        body: &'static str,
    ) -> (String, thread::JoinHandle<Vec<u8>>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/spliceai", listener.local_addr().unwrap());

        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let request = read_request(&mut stream);
            let response = format!(
                "HTTP/1.1 {status_line}\r\ncontent-type: application/json\r\ncontent-length: {}\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).unwrap();
            request
        });

        (url, handle)
    }

    /// Reads a full HTTP request (headers plus content-length body).
    fn read_request(stream: &mut TcpStream) -> Vec<u8> {
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        loop {
            let n = stream.read(&mut buf).unwrap();
            request.extend_from_slice(&buf[..n]);
            if n == 0 || request_complete(&request) {
                break;
            }
        }
        request
    }

    fn request_complete(request: &[u8]) -> bool {
        let Some(headers_end) = request.windows(4).position(|w| w == b"\r\n\r\n") else {
            return false;
        };
        let headers = String::from_utf8_lossy(&request[..headers_end]).to_lowercase();
        let content_length = headers
            .lines()
            .find_map(|l| l.strip_prefix("content-length:"))
            .and_then(|v| v.trim().parse::<usize>().ok())
            .unwrap_or(0);
        request.len() >= headers_end + 4 + content_length
    }

    #[test]
    fn payload_matches_the_wire_contract() {
        let value = serde_json::to_value(query()).unwrap();
        assert_eq!(
            value,
            json!({
                "sequence": "ACGTACGTACGTACGTACGT",
                "position": 10,
                "ref": "G",
                "alt": "A",
            })
        );
    }

    #[test]
    fn success_body_passes_through_unchanged() {
        let (url, server) = serve_once("200 OK", r#"{"score": 0.9}"#);
        let client = SpliceAi::new(url, Duration::from_secs(5));

        let value = client.predict(&query()).unwrap();
        assert_eq!(value, json!({"score": 0.9}));

        let request = server.join().unwrap();
        let request = String::from_utf8_lossy(&request);
        assert!(request.starts_with("POST /spliceai"));
        assert!(request.contains(r#""ref":"G""#));
        assert!(request.contains(r#""alt":"A""#));
    }

    #[test]
    fn non_200_status_becomes_a_status_error() {
        let (url, server) = serve_once("404 Not Found", r#"{"detail": "missing"}"#);
        let client = SpliceAi::new(url, Duration::from_secs(5));

        let err = client.predict(&query()).unwrap_err();
        assert_eq!(err, PredictError::Status(404));
        assert_eq!(err.to_string(), "SpliceAI request failed: 404");
        server.join().unwrap();
    }

    #[test]
    fn refused_connection_becomes_a_transport_error() {
        // bind, take the address, then drop the listener so nothing answers
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/spliceai", listener.local_addr().unwrap());
        drop(listener);

        let client = SpliceAi::new(url, Duration::from_secs(5));
        match client.predict(&query()) {
            Err(PredictError::Transport(msg)) => assert!(!msg.is_empty()),
            other => panic!("expected a transport error, got {other:?}"),
        }
    }

    #[test]
    fn unparseable_success_body_becomes_a_transport_error() {
        let (url, server) = serve_once("200 OK", "definitely not json");
        let client = SpliceAi::new(url, Duration::from_secs(5));

        assert!(matches!(
            client.predict(&query()),
            Err(PredictError::Transport(_))
        ));
        server.join().unwrap();
    }
}
