//! Test doubles: a one-shot local HTTP fixture for client tests, plus
//! scripted in-memory implementations of the chat and profile seams.

use std::collections::{HashMap, VecDeque};
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Mutex, mpsc};
use std::thread;
use std::time::Duration;

use crate::llm::{ChatApi, ChatCall, ContentBlock, MessagesResponse, Usage};
use crate::profile::{Experience, Profile, ProfileApi, ProfileError};
use crate::step::StepError;

// ---------------------------------------------------------------------------
// Scripted chat: canned responses in order, requests recorded
// ---------------------------------------------------------------------------

pub(crate) struct ScriptedChat {
    responses: Mutex<VecDeque<MessagesResponse>>,
    pub calls: Mutex<Vec<ChatCall>>,
}

impl ScriptedChat {
    pub fn new(responses: Vec<MessagesResponse>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl ChatApi for ScriptedChat {
    fn send(&self, call: &ChatCall) -> Result<MessagesResponse, StepError> {
        self.calls.lock().unwrap().push(call.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| StepError::failed("scripted chat ran out of responses"))
    }
}

/// A final text reply (`end_turn`).
pub(crate) fn text_turn(text: &str, input_tokens: u64, output_tokens: u64) -> MessagesResponse {
    MessagesResponse {
        id: "msg_test".into(),
        content: vec![ContentBlock::Text { text: text.into() }],
        stop_reason: Some("end_turn".into()),
        usage: Usage {
            input_tokens,
            output_tokens,
        },
    }
}

/// A reply that requests one tool call (`tool_use`).
pub(crate) fn tool_turn(id: &str, name: &str, input: serde_json::Value) -> MessagesResponse {
    MessagesResponse {
        id: "msg_test".into(),
        content: vec![ContentBlock::ToolUse {
            id: id.into(),
            name: name.into(),
            input,
        }],
        stop_reason: Some("tool_use".into()),
        usage: Usage {
            input_tokens: 100,
            output_tokens: 30,
        },
    }
}

// ---------------------------------------------------------------------------
// Scripted profiles: results per URL, lookups recorded
// ---------------------------------------------------------------------------

pub(crate) struct ScriptedProfiles {
    responses: Mutex<HashMap<String, Result<Profile, ProfileError>>>,
    pub calls: Mutex<Vec<String>>,
}

impl ScriptedProfiles {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_profile(self, url: &str, profile: Profile) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert(url.to_string(), Ok(profile));
        self
    }

    pub fn with_error(self, url: &str, error: ProfileError) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert(url.to_string(), Err(error));
        self
    }
}

impl ProfileApi for ScriptedProfiles {
    fn fetch(&self, linkedin_url: &str) -> Result<Profile, ProfileError> {
        self.calls.lock().unwrap().push(linkedin_url.to_string());
        match self.responses.lock().unwrap().get(linkedin_url) {
            Some(result) => result.clone(),
            // Unscripted URLs behave like the real API: not found.
            None => Err(ProfileError::NotFound {
                url: linkedin_url.to_string(),
            }),
        }
    }
}

/// A complete profile in the shape tests lean on.
pub(crate) fn sample_profile() -> Profile {
    Profile {
        first_name: Some("Jensen".into()),
        last_name: Some("Huang".into()),
        full_name: Some("Jensen Huang".into()),
        headline: Some("Founder and CEO at NVIDIA".into()),
        occupation: Some("Founder and CEO at NVIDIA".into()),
        industry: Some("Computer Hardware".into()),
        city: Some("Santa Clara".into()),
        country_full_name: Some("United States".into()),
        experiences: vec![Experience {
            company: Some("NVIDIA".into()),
            title: Some("Founder and CEO".into()),
            description: Some("Accelerated computing and AI.".into()),
        }],
        education: Vec::new(),
    }
}

// ---------------------------------------------------------------------------
// One-shot HTTP fixture
// ---------------------------------------------------------------------------

pub(crate) fn spawn_one_shot(
    status: u16,
    body: &str,
) -> (String, mpsc::Receiver<String>, thread::JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = mpsc::channel();
    let body = body.to_string();
    let handle = thread::spawn(move || {
        if let Ok((stream, _)) = listener.accept() {
            handle_client(stream, status, &body, &tx);
        }
    });
    (format!("http://{addr}"), rx, handle)
}

fn handle_client(mut stream: TcpStream, status: u16, body: &str, tx: &mpsc::Sender<String>) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(1)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(1)));
    let raw = read_request(&mut stream);
    let _ = tx.send(raw);
    let reason = match status {
        200 => "OK",
        401 => "Unauthorized",
        404 => "Not Found",
        429 => "Too Many Requests",
        _ => "Error",
    };
    let resp = format!(
        "HTTP/1.1 {status} {reason}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len(),
    );
    let _ = stream.write_all(resp.as_bytes());
}

fn read_request(stream: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        match stream.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => {
                buf.extend_from_slice(&chunk[..n]);
                if request_complete(&buf) {
                    break;
                }
            }
            Err(_) => break,
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}

fn request_complete(buf: &[u8]) -> bool {
    let text = String::from_utf8_lossy(buf);
    let Some(split) = text.find("\r\n\r\n") else {
        return false;
    };
    let headers = &text[..split];
    let body_len = headers
        .lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            if name.eq_ignore_ascii_case("content-length") {
                value.trim().parse::<usize>().ok()
            } else {
                None
            }
        })
        .unwrap_or(0);
    text.len() >= split + 4 + body_len
}
