//! Transport seam between the connector and the daemon.
//!
//! The connector only needs "open a session" and "send one command, get one
//! reply". [`UnixSocketTransport`] opens a fresh socket per session, so no
//! handle is ever shared between concurrent calls.

use crate::error::Result;
use async_trait::async_trait;

/// Opens sessions against the daemon.
#[async_trait]
pub trait GmpTransport: Send + Sync {
    /// Establish a new session. Dropping the session ends it.
    async fn connect(&self) -> Result<Box<dyn GmpSession>>;
}

/// One open connection to the daemon.
#[async_trait]
pub trait GmpSession: Send {
    /// Send one serialized command and return the complete reply document.
    async fn exchange(&mut self, command: &str) -> Result<String>;
}

#[cfg(unix)]
pub use unix::UnixSocketTransport;

#[cfg(unix)]
mod unix {
    use super::{GmpSession, GmpTransport};
    use crate::error::{ConnectorError, Result};
    use async_trait::async_trait;
    use gmp_normalize::xml::document_complete;
    use gmp_normalize::NormalizeError;
    use std::path::{Path, PathBuf};
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::UnixStream;
    use tokio::time::timeout;
    use tracing::{debug, trace};

    const READ_CHUNK: usize = 64 * 1024;

    /// Connects to the daemon's Unix domain socket.
    #[derive(Debug, Clone)]
    pub struct UnixSocketTransport {
        path: PathBuf,
        read_timeout: Duration,
        max_response_bytes: usize,
    }

    impl UnixSocketTransport {
        pub fn new(path: impl Into<PathBuf>, read_timeout: Duration, max_response_bytes: usize) -> Self {
            Self {
                path: path.into(),
                read_timeout,
                max_response_bytes,
            }
        }

        pub fn path(&self) -> &Path {
            &self.path
        }
    }

    #[async_trait]
    impl GmpTransport for UnixSocketTransport {
        async fn connect(&self) -> Result<Box<dyn GmpSession>> {
            let stream = timeout(self.read_timeout, UnixStream::connect(&self.path))
                .await
                .map_err(|_| ConnectorError::Timeout(self.read_timeout))?
                .map_err(|e| {
                    ConnectorError::Transport(format!("cannot connect to {}: {}", self.path.display(), e))
                })?;
            debug!(socket = %self.path.display(), "session opened");

            Ok(Box::new(UnixSocketSession {
                stream,
                read_timeout: self.read_timeout,
                max_response_bytes: self.max_response_bytes,
            }))
        }
    }

    struct UnixSocketSession {
        stream: UnixStream,
        read_timeout: Duration,
        max_response_bytes: usize,
    }

    #[async_trait]
    impl GmpSession for UnixSocketSession {
        async fn exchange(&mut self, command: &str) -> Result<String> {
            self.stream.write_all(command.as_bytes()).await?;
            self.stream.flush().await?;

            let mut response = Vec::new();
            let mut chunk = vec![0u8; READ_CHUNK];
            loop {
                let read = timeout(self.read_timeout, self.stream.read(&mut chunk))
                    .await
                    .map_err(|_| ConnectorError::Timeout(self.read_timeout))??;

                if read == 0 {
                    if response.is_empty() {
                        return Err(ConnectorError::Transport(
                            "daemon closed the connection without replying".into(),
                        ));
                    }
                    break;
                }

                response.extend_from_slice(&chunk[..read]);
                trace!("read {} bytes, {} total", read, response.len());

                if response.len() > self.max_response_bytes {
                    return Err(ConnectorError::ResponseTooLarge {
                        limit: self.max_response_bytes,
                    });
                }
                if ends_with_tag(&response) && document_complete(&response) {
                    break;
                }
            }

            String::from_utf8(response)
                .map_err(|e| ConnectorError::Malformed(NormalizeError::Xml(e.to_string())))
        }
    }

    /// Cheap pre-check before re-scanning the buffer: a complete document
    /// ends with `>` once trailing whitespace is ignored.
    fn ends_with_tag(buf: &[u8]) -> bool {
        buf.iter()
            .rev()
            .find(|b| !b.is_ascii_whitespace())
            .is_some_and(|b| *b == b'>')
    }
}
