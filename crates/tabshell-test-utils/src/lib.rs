//! Testing utilities for the TabShell workspace.
//!
//! [`MockServer`] is a scripted HTTP/1.1 endpoint on an ephemeral local
//! port. It answers one connection per scripted response, in order, and
//! hands back every raw request it read.

use std::io;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;

/// A `(status line, body)` pair, e.g. `("401 Unauthorized", "bad credentials")`.
pub type ScriptedResponse = (&'static str, &'static str);

pub struct MockServer {
    base_url: String,
    requests: mpsc::UnboundedReceiver<String>,
}

impl MockServer {
    /// Binds `127.0.0.1:0` and serves `responses`, one connection each.
    pub async fn start(responses: Vec<ScriptedResponse>) -> io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let base_url = format!("http://{}", listener.local_addr()?);
        let (tx, requests) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            for (status, body) in responses {
                let Ok((mut socket, _)) = listener.accept().await else {
                    return;
                };
                let Ok(raw) = read_request(&mut socket).await else {
                    return;
                };
                if respond(&mut socket, status, body).await.is_err() {
                    return;
                }
                let _ = tx.send(raw);
            }
        });

        Ok(Self { base_url, requests })
    }

    /// Serves a single response.
    pub async fn once(status: &'static str, body: &'static str) -> io::Result<Self> {
        Self::start(vec![(status, body)]).await
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The next request that was answered, as raw text (head and body).
    pub async fn next_request(&mut self) -> Option<String> {
        self.requests.recv().await
    }
}

/// Value of the first header called `name` (case-insensitive) in a raw request.
pub fn header(raw: &str, name: &str) -> Option<String> {
    let head = raw.split("\r\n\r\n").next().unwrap_or_default();
    head.lines().skip(1).find_map(|line| {
        let (key, value) = line.split_once(':')?;
        key.trim()
            .eq_ignore_ascii_case(name)
            .then(|| value.trim().to_string())
    })
}

/// A base URL nobody listens on.
pub async fn unreachable_base_url() -> io::Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let base_url = format!("http://{}", listener.local_addr()?);
    drop(listener);
    Ok(base_url)
}

/// Reads the head, then as much body as `Content-Length` announces.
async fn read_request(socket: &mut TcpStream) -> io::Result<String> {
    let mut raw = Vec::new();
    let mut buf = [0u8; 4096];

    loop {
        let n = socket.read(&mut buf).await?;
        if n == 0 {
            break;
        }
        raw.extend_from_slice(&buf[..n]);

        let text = String::from_utf8_lossy(&raw);
        if let Some(head_end) = text.find("\r\n\r\n") {
            let length = header(&text, "content-length")
                .and_then(|value| value.parse::<usize>().ok())
                .unwrap_or(0);
            if raw.len() >= head_end + 4 + length {
                break;
            }
        }
    }

    Ok(String::from_utf8_lossy(&raw).into_owned())
}

async fn respond(socket: &mut TcpStream, status: &str, body: &str) -> io::Result<()> {
    let response = format!(
        "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    socket.write_all(response.as_bytes()).await?;
    socket.shutdown().await
}
