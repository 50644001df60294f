use crate::config::ReportConfig;
use crate::delivery::{DeliveryError, Messenger};
use serde_json::{json, Value};
use std::cell::RefCell;
use std::fs;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::path::Path;
use std::thread::JoinHandle;
use std::time::Duration;

/// Records every message and answers like Telegram would.
#[derive(Default)]
pub struct RecordingMessenger {
    pub sent: RefCell<Vec<String>>,
    /// 1-based call number that fails with a 429, if any.
    pub fail_on_call: Option<usize>,
}

impl RecordingMessenger {
    pub fn failing_on(call: usize) -> Self {
        Self {
            fail_on_call: Some(call),
            ..Self::default()
        }
    }

    pub fn messages(&self) -> Vec<String> {
        self.sent.borrow().clone()
    }
}

impl Messenger for RecordingMessenger {
    fn send_message(&self, text: &str) -> Result<Value, DeliveryError> {
        let mut sent = self.sent.borrow_mut();
        sent.push(text.to_string());

        if self.fail_on_call == Some(sent.len()) {
            return Err(DeliveryError::Api {
                status: 429,
                body: r#"{"ok":false,"description":"Too Many Requests"}"#.to_string(),
            });
        }
        Ok(json!({ "ok": true, "result": { "message_id": sent.len() } }))
    }
}

/// Report settings pointing at `vault`, with no pacing delay.
pub fn test_report_config(vault: &Path) -> ReportConfig {
    ReportConfig {
        vault_path: vault.to_path_buf(),
        folder: "Real Estate Mission Control".to_string(),
        pacing: Duration::ZERO,
        ..ReportConfig::default()
    }
}

/// Creates `<vault>/<folder>/<profile>/latest.md` (or just the profile
/// directory when `latest` is `None`).
pub fn write_profile(config: &ReportConfig, profile: &str, latest: Option<&str>) {
    let dir = config.profiles_root().join(profile);
    fs::create_dir_all(&dir).expect("create profile dir");
    if let Some(content) = latest {
        fs::write(dir.join("latest.md"), content).expect("write latest.md");
    }
}

/// One request as seen by the fake endpoint.
#[derive(Debug)]
pub struct CapturedRequest {
    pub request_line: String,
    pub body: String,
}

/// A one-shot HTTP endpoint answering each incoming request with the next
/// canned `(status, body)` pair.
pub struct FakeEndpoint {
    pub base_url: String,
    handle: JoinHandle<Vec<CapturedRequest>>,
}

impl FakeEndpoint {
    pub fn start(responses: Vec<(u16, &'static str)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind fake endpoint");
        let base_url = format!("http://{}", listener.local_addr().unwrap());

        let handle = std::thread::spawn(move || {
            let mut captured = Vec::new();
            for (status, body) in responses {
                let (mut stream, _) = listener.accept().expect("accept");
                let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));

                let mut request_line = String::new();
                reader.read_line(&mut request_line).unwrap();

                let mut content_length = 0usize;
                loop {
                    let mut line = String::new();
                    reader.read_line(&mut line).unwrap();
                    if line == "\r\n" || line.is_empty() {
                        break;
                    }
                    if let Some((name, value)) = line.split_once(':') {
                        if name.trim().eq_ignore_ascii_case("content-length") {
                            content_length = value.trim().parse().unwrap();
                        }
                    }
                }

                let mut request_body = vec![0u8; content_length];
                reader.read_exact(&mut request_body).unwrap();

                let response = format!(
                    "HTTP/1.1 {status} Canned\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                stream.write_all(response.as_bytes()).unwrap();
                stream.flush().unwrap();

                captured.push(CapturedRequest {
                    request_line: request_line.trim_end().to_string(),
                    body: String::from_utf8(request_body).unwrap(),
                });
            }
            captured
        });

        Self { base_url, handle }
    }

    /// Waits for every canned response to be served.
    pub fn requests(self) -> Vec<CapturedRequest> {
        self.handle.join().expect("fake endpoint thread panicked")
    }
}
