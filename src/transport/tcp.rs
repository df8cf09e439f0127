use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::{TcpStream, ToSocketAddrs};
use tokio::time::{timeout, Duration};

use crate::config::DEFAULT_READ_TIMEOUT;
use crate::transport::Transport;

/// Maximum accepted line length in bytes, terminator included.
const MAX_LINE_LEN: usize = 256;

/// Newline-framed text transport over a TCP stream.
///
/// Dropping the transport closes the socket.
pub struct TcpTransport {
    reader: BufReader<OwnedReadHalf>,
    writer: OwnedWriteHalf,
    timeout_duration: Duration,
    max_line_len: usize,
    /// Bytes of a line whose terminator has not arrived yet.
    pending: Vec<u8>,
}

impl TcpTransport {
    pub fn new(stream: TcpStream) -> Self {
        Self::with_timeout(stream, DEFAULT_READ_TIMEOUT)
    }

    pub fn with_timeout(stream: TcpStream, timeout_duration: Duration) -> Self {
        let (read, write) = stream.into_split();
        Self {
            reader: BufReader::new(read),
            writer: write,
            timeout_duration,
            max_line_len: MAX_LINE_LEN,
            pending: Vec::new(),
        }
    }

    pub async fn connect<A: ToSocketAddrs>(addr: A) -> anyhow::Result<Self> {
        let stream = TcpStream::connect(addr).await?;
        Ok(Self::new(stream))
    }
}

fn write_error(e: std::io::Error) -> anyhow::Error {
    if e.kind() == std::io::ErrorKind::BrokenPipe || e.kind() == std::io::ErrorKind::ConnectionReset {
        anyhow::anyhow!("Connection closed by peer")
    } else {
        anyhow::anyhow!("Write error: {}", e)
    }
}

fn read_error(e: std::io::Error) -> anyhow::Error {
    if e.kind() == std::io::ErrorKind::UnexpectedEof {
        anyhow::anyhow!("Connection closed by peer")
    } else if e.kind() == std::io::ErrorKind::ConnectionReset {
        anyhow::anyhow!("Connection reset by peer")
    } else {
        anyhow::anyhow!("Read error: {}", e)
    }
}

#[async_trait::async_trait]
impl Transport for TcpTransport {
    async fn send(&mut self, line: &str) -> anyhow::Result<()> {
        if line.contains('\n') {
            return Err(anyhow::anyhow!("Line must not contain a newline"));
        }
        let limit = self.timeout_duration;
        let send_op = async {
            let mut data = Vec::with_capacity(line.len() + 1);
            data.extend_from_slice(line.as_bytes());
            data.push(b'\n');
            self.writer.write_all(&data).await.map_err(write_error)?;
            self.writer.flush().await.map_err(write_error)?;
            anyhow::Ok(())
        };

        timeout(limit, send_op)
            .await
            .map_err(|_| anyhow::anyhow!("Send timeout after {:?}", limit))?
    }

    async fn recv(&mut self) -> anyhow::Result<String> {
        let max = self.max_line_len;
        let limit = self.timeout_duration;
        let recv_op = async {
            // Partial data stays in `pending` if this future is cancelled.
            let budget = max.saturating_sub(self.pending.len()) as u64;
            (&mut self.reader)
                .take(budget)
                .read_until(b'\n', &mut self.pending)
                .await
                .map_err(read_error)?;

            if self.pending.last() != Some(&b'\n') {
                let too_long = self.pending.len() >= max;
                self.pending.clear();
                if too_long {
                    return Err(anyhow::anyhow!("Line too long (max: {} bytes)", max));
                }
                return Err(anyhow::anyhow!("Connection closed by peer"));
            }

            let mut raw = std::mem::take(&mut self.pending);
            raw.pop();
            if raw.last() == Some(&b'\r') {
                raw.pop();
            }
            String::from_utf8(raw).map_err(|_| anyhow::anyhow!("Line is not valid UTF-8"))
        };

        timeout(limit, recv_op)
            .await
            .map_err(|_| anyhow::anyhow!("Receive timeout after {:?}", limit))?
    }

    async fn close(&mut self) -> anyhow::Result<()> {
        self.writer.shutdown().await.map_err(write_error)
    }
}
