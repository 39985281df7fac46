//! The half-duplex transport seam: a send-only leg and a receive-only leg
//! sharing one call-id namespace. Wiring these to an actual HTTP/TLS
//! transport is the caller's responsibility; this crate only drives bytes
//! through them.

use core::fmt;

/// Error surfaced by an [`InChannel`]/[`OutChannel`] implementation.
#[derive(Debug)]
pub struct ChannelError {
    description: String,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl ChannelError {
    #[must_use]
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            source: None,
        }
    }

    #[must_use]
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }
}

impl fmt::Display for ChannelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description)
    }
}

impl std::error::Error for ChannelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source.as_deref().map(|e| e as &(dyn std::error::Error + 'static))
    }
}

/// The outbound leg of the half-duplex transport.
pub trait InChannel: Send {
    /// Sends `buf` as a single fragment. Implementations own any transport
    /// framing (chunked HTTP body, WebSocket frame, etc.) below this point.
    fn send(&mut self, buf: &[u8]) -> Result<(), ChannelError>;
}

/// The inbound leg of the half-duplex transport.
pub trait OutChannel: Send {
    /// Reads up to `buf.len()` bytes, returning the number of bytes read.
    /// A return value of `0` indicates the peer closed the channel.
    fn recv(&mut self, buf: &mut [u8]) -> Result<usize, ChannelError>;

    /// Reads exactly `buf.len()` bytes, looping over short reads.
    fn recv_exact(&mut self, buf: &mut [u8]) -> Result<(), ChannelError> {
        let mut filled = 0;

        while filled < buf.len() {
            let n = self.recv(&mut buf[filled..])?;

            if n == 0 {
                return Err(ChannelError::new("channel closed before expected bytes were received"));
            }

            filled += n;
        }

        Ok(())
    }
}
