//! Shared helpers for integration tests

#![allow(dead_code)]

use saved_homes::listings::ListingsClient;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

#[derive(Clone)]
pub struct MockResponse {
    pub status: u16,
    pub body: String,
}

impl MockResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            status,
            body: String::from("{\"error\":\"upstream\"}"),
        }
    }
}

fn reason_phrase(status: u16) -> &'static str {
    match status {
        200 => "OK",
        404 => "Not Found",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        _ => "OK",
    }
}

fn read_request(stream: &mut TcpStream) -> String {
    let mut buffer = [0_u8; 8192];
    let bytes = stream.read(&mut buffer).expect("failed to read request");
    String::from_utf8_lossy(&buffer[..bytes]).to_string()
}

/// Serve `responses` in order, one per connection, and record each request
/// line ("GET /path?query HTTP/1.1").
pub fn spawn_mock_server(
    responses: Vec<MockResponse>,
) -> (String, Arc<Mutex<Vec<String>>>, thread::JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("failed to bind test server");
    let addr = listener.local_addr().expect("failed to read local addr");
    let seen = Arc::new(Mutex::new(Vec::new()));
    let log = seen.clone();

    let handle = thread::spawn(move || {
        for response in responses {
            let (mut stream, _) = listener.accept().expect("failed to accept connection");
            let request = read_request(&mut stream);
            log.lock()
                .unwrap()
                .push(request.lines().next().unwrap_or_default().to_string());

            let payload = format!(
                "HTTP/1.1 {} {}\r\n\
                 Content-Type: application/json\r\n\
                 Content-Length: {}\r\n\
                 Connection: close\r\n\r\n{}",
                response.status,
                reason_phrase(response.status),
                response.body.len(),
                response.body
            );
            stream
                .write_all(payload.as_bytes())
                .expect("failed to write response");
        }
    });

    (format!("http://{}", addr), seen, handle)
}

pub fn listing_json(address: &str, price: i64) -> String {
    serde_json::json!({
        "ListPrice": price,
        "BedroomsTotal": 2,
        "BathroomsTotalInteger": 1,
        "LivingArea": 950,
        "UnparsedAddress": address,
        "Media": [{"MediaURL": "https://img.test/1.jpg"}],
        "StandardStatus": "Active",
        "YearBuilt": 2004,
        "ListOfficeName": "Test Realty"
    })
    .to_string()
}

/// Listings client that talks to the mock server directly, bypassing any
/// proxy configured in the environment
pub fn direct_client(base_url: impl Into<String>) -> ListingsClient {
    let http = reqwest::Client::builder()
        .no_proxy()
        .timeout(Duration::from_secs(5))
        .build()
        .expect("failed to build test client");
    ListingsClient::with_http_client(http, base_url, "t")
}
