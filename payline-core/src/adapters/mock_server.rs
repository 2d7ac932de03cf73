//! Mock payments server for testing
//!
//! A small threaded HTTP server that answers like the payments service:
//! - POST /user/signup -> 200 { message } or 411 when the email is taken
//! - POST /user/signin -> 200 { token } or 411 on bad credentials
//! - GET /account/balance -> { status, balance, firstname, lastname }
//! - GET /user/search?filter= -> { user: [{ _id, firstname, lastname, email }] }
//! - POST /account/transfer -> { status, balance } or { status: false, message }
//!
//! The server is stateless: every request sees the configured users as-is.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde_json::{json, Value as JsonValue};

/// Mock payments server for testing
pub struct MockPaymentsServer {
    port: u16,
    running: Arc<AtomicBool>,
    thread_handle: Option<thread::JoinHandle<()>>,
}

/// A registered user known to the mock
#[derive(Debug, Clone)]
pub struct MockUser {
    pub id: String,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub password: String,
    pub balance: Decimal,
}

impl MockUser {
    pub fn new(
        id: &str,
        firstname: &str,
        lastname: &str,
        email: &str,
        password: &str,
        balance: Decimal,
    ) -> Self {
        Self {
            id: id.to_string(),
            firstname: firstname.to_string(),
            lastname: lastname.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            balance,
        }
    }

    fn token(&self) -> String {
        format!("token-{}", self.id)
    }
}

/// Configuration for the mock server
#[derive(Debug, Clone)]
pub struct MockConfig {
    pub users: Vec<MockUser>,
    /// Answer every request with this HTTP status
    pub fail_status: Option<u16>,
    /// Answer every transfer with `status: false`
    pub reject_transfers: bool,
    /// Delay in milliseconds before responding
    pub delay_ms: u64,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            users: vec![
                MockUser::new(
                    "u1",
                    "Ada",
                    "Lovelace",
                    "ada@example.com",
                    "analytical1",
                    Decimal::new(250075, 2),
                ),
                MockUser::new(
                    "u2",
                    "Grace",
                    "Hopper",
                    "grace@example.com",
                    "cobol12345",
                    Decimal::new(1000, 0),
                ),
            ],
            fail_status: None,
            reject_transfers: false,
            delay_ms: 0,
        }
    }
}

struct Request {
    method: String,
    path: String,
    query: String,
    token: Option<String>,
    body: JsonValue,
}

impl MockPaymentsServer {
    /// Start a new mock server on a random available port
    pub fn start(config: MockConfig) -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0")?;
        let port = listener.local_addr()?.port();
        let running = Arc::new(AtomicBool::new(true));
        let running_clone = running.clone();

        // Non-blocking accept so stop() can end the loop
        listener.set_nonblocking(true)?;

        let thread_handle = thread::spawn(move || {
            while running_clone.load(Ordering::SeqCst) {
                match listener.accept() {
                    Ok((stream, _)) => {
                        let cfg = config.clone();
                        thread::spawn(move || {
                            handle_connection(stream, &cfg);
                        });
                    }
                    Err(ref e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                        thread::sleep(std::time::Duration::from_millis(10));
                    }
                    Err(_) => break,
                }
            }
        });

        Ok(Self {
            port,
            running,
            thread_handle: Some(thread_handle),
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn base_url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.thread_handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for MockPaymentsServer {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Read one request: headers, then as much body as Content-Length says
fn read_request(stream: &mut TcpStream) -> Option<Request> {
    stream.set_nonblocking(false).ok()?;

    let mut raw = Vec::new();
    let mut buffer = [0u8; 4096];
    let header_end = loop {
        let n = stream.read(&mut buffer).ok()?;
        if n == 0 {
            return None;
        }
        raw.extend_from_slice(&buffer[..n]);
        if let Some(pos) = raw.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&raw[..header_end]).to_string();
    let mut lines = head.lines();
    let mut request_line = lines.next()?.split_whitespace();
    let method = request_line.next()?.to_string();
    let target = request_line.next()?.to_string();

    let mut content_length = 0usize;
    let mut token = None;
    for line in lines {
        if let Some((name, value)) = line.split_once(':') {
            match name.trim().to_lowercase().as_str() {
                "content-length" => content_length = value.trim().parse().unwrap_or(0),
                "token" => token = Some(value.trim().to_string()),
                _ => {}
            }
        }
    }

    while raw.len() < header_end + content_length {
        let n = stream.read(&mut buffer).ok()?;
        if n == 0 {
            break;
        }
        raw.extend_from_slice(&buffer[..n]);
    }

    let body_end = raw.len().min(header_end + content_length);
    let body = serde_json::from_slice(&raw[header_end..body_end]).unwrap_or(JsonValue::Null);
    let (path, query) = match target.split_once('?') {
        Some((p, q)) => (p.to_string(), q.to_string()),
        None => (target, String::new()),
    };

    Some(Request {
        method,
        path,
        query,
        token,
        body,
    })
}

fn handle_connection(mut stream: TcpStream, config: &MockConfig) {
    let Some(request) = read_request(&mut stream) else {
        return;
    };

    if config.delay_ms > 0 {
        thread::sleep(std::time::Duration::from_millis(config.delay_ms));
    }

    if let Some(status) = config.fail_status {
        send_response(&mut stream, status, &json!({"message": "Mock failure"}));
        return;
    }

    let (status, body) = route(&request, config);
    send_response(&mut stream, status, &body);
}

fn route(request: &Request, config: &MockConfig) -> (u16, JsonValue) {
    match (request.method.as_str(), request.path.as_str()) {
        ("POST", "/user/signup") => {
            let email = body_str(&request.body, "email");
            if config.users.iter().any(|u| u.email == email) {
                (411, json!({"message": "Email already taken / Incorrect inputs"}))
            } else {
                (200, json!({"message": "User created successfully"}))
            }
        }
        ("POST", "/user/signin") => {
            let email = body_str(&request.body, "email");
            let password = body_str(&request.body, "password");
            match config
                .users
                .iter()
                .find(|u| u.email == email && u.password == password)
            {
                Some(user) => (200, json!({"token": user.token()})),
                None => (411, json!({"message": "Error while logging in"})),
            }
        }
        ("GET", "/account/balance") => match authenticated(request, config) {
            Some(user) => (
                200,
                json!({
                    "status": true,
                    "balance": user.balance.to_f64(),
                    "firstname": user.firstname,
                    "lastname": user.lastname,
                }),
            ),
            None => (200, json!({"status": false})),
        },
        ("GET", "/user/search") => {
            let filter = url::form_urlencoded::parse(request.query.as_bytes())
                .find(|(k, _)| k == "filter")
                .map(|(_, v)| v.to_lowercase())
                .unwrap_or_default();
            let users: Vec<JsonValue> = config
                .users
                .iter()
                .filter(|u| {
                    u.firstname.to_lowercase().contains(&filter)
                        || u.lastname.to_lowercase().contains(&filter)
                })
                .map(|u| {
                    json!({
                        "_id": u.id,
                        "firstname": u.firstname,
                        "lastname": u.lastname,
                        "email": u.email,
                    })
                })
                .collect();
            (200, json!({"user": users}))
        }
        ("POST", "/account/transfer") => {
            let Some(sender) = authenticated(request, config) else {
                return (403, json!({"status": false, "message": "Invalid token"}));
            };
            let amount = request
                .body
                .get("amount")
                .map(|v| v.to_string())
                .and_then(|s| s.trim_matches('"').parse::<Decimal>().ok());
            let receiver_id = body_str(&request.body, "receiverId");
            let receiver_known = config.users.iter().any(|u| u.id == receiver_id);

            match amount {
                _ if config.reject_transfers => {
                    (200, json!({"status": false, "message": "Transfer rejected"}))
                }
                Some(amount) if receiver_known && amount <= sender.balance => {
                    let remaining = sender.balance - amount;
                    (200, json!({"status": true, "balance": remaining.to_string()}))
                }
                Some(_) if !receiver_known => {
                    (200, json!({"status": false, "message": "Invalid account"}))
                }
                _ => (200, json!({"status": false, "message": "Insufficient balance"})),
            }
        }
        _ => (404, json!({"message": "Endpoint not found"})),
    }
}

fn authenticated<'a>(request: &Request, config: &'a MockConfig) -> Option<&'a MockUser> {
    let token = request.token.as_deref()?;
    config.users.iter().find(|u| u.token() == token)
}

fn body_str(body: &JsonValue, key: &str) -> String {
    body.get(key)
        .and_then(|v| v.as_str())
        .unwrap_or("")
        .to_string()
}

fn send_response(stream: &mut TcpStream, status: u16, body: &JsonValue) {
    let status_text = match status {
        200 => "OK",
        403 => "Forbidden",
        404 => "Not Found",
        411 => "Length Required",
        500 => "Internal Server Error",
        _ => "Error",
    };
    let body = body.to_string();
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        status_text,
        body.len(),
        body
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_server_starts() {
        let server = MockPaymentsServer::start(MockConfig::default()).unwrap();
        assert!(server.port() > 0);
        assert!(server.base_url().starts_with("http://127.0.0.1:"));
    }

    #[test]
    fn test_route_unknown_endpoint() {
        let request = Request {
            method: "GET".to_string(),
            path: "/nope".to_string(),
            query: String::new(),
            token: None,
            body: JsonValue::Null,
        };
        let (status, _) = route(&request, &MockConfig::default());
        assert_eq!(status, 404);
    }
}
