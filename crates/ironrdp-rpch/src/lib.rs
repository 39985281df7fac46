//! Client-side bind handshake for RPC-over-HTTP v2 (the CO-RPC
//! `BIND`/`BIND_ACK`/`RPC_AUTH_3` exchange used by `TSGU`). The transport
//! (HTTP/TLS framing) and the GSS/NTLM token machinery are external
//! collaborators; this crate owns the wire format, the call-id bookkeeping,
//! and the handshake state machine that sequences them.

#[macro_use]
extern crate tracing;

#[macro_use]
mod macros;

mod channel;
mod engine;
mod error;
mod oracle;
mod pdu;
mod registry;
mod uuid;

pub use channel::{ChannelError, InChannel, OutChannel};
pub use engine::{run, state_downcast, BindEngine, BindEngineState, NegotiatedParameters, Sequence, State, Written};
pub use error::{BindError, BindErrorExt, BindErrorKind, BindResult, BindResultExt};
pub use oracle::{AuthOracle, AuthOracleError, AuthStatus, Credential, CredentialPrompt, PromptOutcome, Settings};
pub use pdu::{
    AuthVerifier, BindAckPdu, BindPdu, PduHeader, PfcFlags, PresentationContext, RpcAuth3Pdu, PACKED_DREP,
    PTYPE_BIND, PTYPE_BIND_ACK, PTYPE_RPC_AUTH_3,
};
pub use registry::{CallRegistry, RpcCall};
pub use uuid::{InterfaceUuid, AUTHN_LEVEL_PKT_INTEGRITY, AUTHN_WINNT};
