use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

const HEAD_TERMINATOR: &[u8] = b"\r\n\r\n";

/// How a test server answers each request.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Reply {
    /// Full response with the given status and body.
    Fixed { status: u16, body: &'static [u8] },
    /// Announces `declared` body bytes, sends `body`, then closes.
    Truncated { declared: usize, body: &'static [u8] },
    /// Reads the request and never answers.
    Silent,
}

/// Local HTTP/1.1 server; aborted on drop.
pub(crate) struct TestServer {
    pub(crate) url: String,
    handle: JoinHandle<()>,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

pub(crate) async fn spawn_server(reply: Reply) -> Result<TestServer, String> {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .map_err(|err| format!("bind test server failed: {}", err))?;
    let addr = listener
        .local_addr()
        .map_err(|err| format!("server addr failed: {}", err))?;
    let handle = tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            tokio::spawn(serve_connection(stream, reply));
        }
    });
    Ok(TestServer {
        url: format!("http://{}/", addr),
        handle,
    })
}

/// URL of a local port nothing listens on.
pub(crate) fn unreachable_url() -> Result<String, String> {
    let listener = std::net::TcpListener::bind("127.0.0.1:0")
        .map_err(|err| format!("bind failed: {}", err))?;
    let addr = listener
        .local_addr()
        .map_err(|err| format!("addr failed: {}", err))?;
    drop(listener);
    Ok(format!("http://{}/", addr))
}

async fn serve_connection(mut stream: TcpStream, reply: Reply) {
    let mut pending: Vec<u8> = Vec::new();
    loop {
        let Some(close_requested) = read_request(&mut stream, &mut pending).await else {
            return;
        };
        let keep_open = match reply {
            Reply::Fixed { status, body } => {
                let connection = if close_requested { "close" } else { "keep-alive" };
                let head = format!(
                    "HTTP/1.1 {} {}\r\nContent-Length: {}\r\nConnection: {}\r\n\r\n",
                    status,
                    reason(status),
                    body.len(),
                    connection
                );
                if write_parts(&mut stream, head.as_bytes(), body).await.is_err() {
                    return;
                }
                !close_requested
            }
            Reply::Truncated { declared, body } => {
                let head = format!("HTTP/1.1 200 OK\r\nContent-Length: {}\r\n\r\n", declared);
                drop(write_parts(&mut stream, head.as_bytes(), body).await);
                false
            }
            Reply::Silent => {
                std::future::pending::<()>().await;
                false
            }
        };
        if !keep_open {
            drop(stream.shutdown().await);
            return;
        }
    }
}

/// Consumes one request (head and body); returns whether it asked to close.
async fn read_request(stream: &mut TcpStream, pending: &mut Vec<u8>) -> Option<bool> {
    let head_end = loop {
        if let Some(pos) = find(pending, HEAD_TERMINATOR) {
            break pos;
        }
        read_more(stream, pending).await?;
    };
    let head = String::from_utf8_lossy(pending.get(..head_end)?).to_ascii_lowercase();
    let content_length = head
        .lines()
        .find_map(|line| line.strip_prefix("content-length:"))
        .and_then(|value| value.trim().parse::<usize>().ok())
        .unwrap_or(0);
    let close_requested = head.contains("connection: close");

    let total = head_end
        .saturating_add(HEAD_TERMINATOR.len())
        .saturating_add(content_length);
    while pending.len() < total {
        read_more(stream, pending).await?;
    }
    pending.drain(..total);
    Some(close_requested)
}

async fn read_more(stream: &mut TcpStream, pending: &mut Vec<u8>) -> Option<()> {
    let mut chunk = [0u8; 4096];
    match stream.read(&mut chunk).await {
        Ok(0) | Err(_) => None,
        Ok(read) => {
            pending.extend_from_slice(chunk.get(..read)?);
            Some(())
        }
    }
}

async fn write_parts(stream: &mut TcpStream, head: &[u8], body: &[u8]) -> std::io::Result<()> {
    stream.write_all(head).await?;
    stream.write_all(body).await?;
    stream.flush().await
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

const fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Status",
    }
}
