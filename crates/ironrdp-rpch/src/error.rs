use core::fmt;

use crate::channel::ChannelError;

/// Result alias used throughout this crate.
pub type BindResult<T> = Result<T, BindError>;

/// Error type for the bind handshake, wrapping a [`BindErrorKind`].
pub type BindError = ironrdp_error::Error<BindErrorKind>;

#[non_exhaustive]
#[derive(Debug)]
pub enum BindErrorKind {
    Encode(ironrdp_core::EncodeError),
    Decode(ironrdp_core::DecodeError),
    Channel(ChannelError),
    /// A scoped buffer needed by the handshake could not be allocated.
    AllocFailure,
    /// The auth oracle failed to produce an initial token.
    AuthOracleInitFailed,
    /// A call id was registered while already present in the registry.
    DuplicateCall { call_id: u32 },
    /// A call id was looked up but is not present in the registry.
    UnknownCall { call_id: u32 },
    /// The caller cancelled the handshake before it reached a terminal state.
    Cancelled,
    /// The caller's deadline elapsed before the handshake reached a terminal state.
    Timeout,
    Reason(String),
    Custom,
    General,
}

impl fmt::Display for BindErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Encode(_) => write!(f, "encode error"),
            Self::Decode(_) => write!(f, "decode error"),
            Self::Channel(_) => write!(f, "channel I/O error"),
            Self::AllocFailure => write!(f, "allocation failure"),
            Self::AuthOracleInitFailed => write!(f, "auth oracle initialization failed"),
            Self::DuplicateCall { call_id } => write!(f, "call id {call_id} already registered"),
            Self::UnknownCall { call_id } => write!(f, "call id {call_id} not registered"),
            Self::Cancelled => write!(f, "bind handshake cancelled"),
            Self::Timeout => write!(f, "bind handshake timed out"),
            Self::Reason(description) => write!(f, "reason: {description}"),
            Self::Custom => write!(f, "custom error"),
            Self::General => write!(f, "general error"),
        }
    }
}

impl std::error::Error for BindErrorKind {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Encode(e) => Some(e),
            Self::Decode(e) => Some(e),
            Self::Channel(e) => Some(e),
            _ => None,
        }
    }
}

pub trait BindErrorExt {
    fn encode(error: ironrdp_core::EncodeError) -> Self;
    fn decode(error: ironrdp_core::DecodeError) -> Self;
    fn channel(error: ChannelError) -> Self;
    fn duplicate_call(call_id: u32) -> Self;
    fn unknown_call(call_id: u32) -> Self;
    fn cancelled() -> Self;
    fn general(context: &'static str) -> Self;
    fn reason(context: &'static str, reason: impl Into<String>) -> Self;
    fn custom<E>(context: &'static str, e: E) -> Self
    where
        E: std::error::Error + Sync + Send + 'static;
}

impl BindErrorExt for BindError {
    fn encode(error: ironrdp_core::EncodeError) -> Self {
        Self::new("encode error", BindErrorKind::Encode(error))
    }

    fn decode(error: ironrdp_core::DecodeError) -> Self {
        Self::new("decode error", BindErrorKind::Decode(error))
    }

    fn channel(error: ChannelError) -> Self {
        Self::new("channel error", BindErrorKind::Channel(error))
    }

    fn duplicate_call(call_id: u32) -> Self {
        Self::new("call registry", BindErrorKind::DuplicateCall { call_id })
    }

    fn unknown_call(call_id: u32) -> Self {
        Self::new("call registry", BindErrorKind::UnknownCall { call_id })
    }

    fn cancelled() -> Self {
        Self::new("credential prompt", BindErrorKind::Cancelled)
    }

    fn general(context: &'static str) -> Self {
        Self::new(context, BindErrorKind::General)
    }

    fn reason(context: &'static str, reason: impl Into<String>) -> Self {
        Self::new(context, BindErrorKind::Reason(reason.into()))
    }

    fn custom<E>(context: &'static str, e: E) -> Self
    where
        E: std::error::Error + Sync + Send + 'static,
    {
        Self::new(context, BindErrorKind::Custom).with_source(e)
    }
}

pub trait BindResultExt {
    #[must_use]
    fn with_context(self, context: &'static str) -> Self;
}

impl<T> BindResultExt for BindResult<T> {
    fn with_context(self, context: &'static str) -> Self {
        self.map_err(|mut e| {
            e.context = context;
            e
        })
    }
}
