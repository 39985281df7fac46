//! Collaborator seams: authentication token generation and credential
//! sourcing are external to this crate (Non-goal: no GSS/NTLM/Kerberos
//! logic lives here). `BindEngine` only calls through these traits.

use core::fmt;

use crate::error::{BindError, BindErrorExt as _, BindResult};

/// Outcome reported by the auth oracle after consuming a token: whether
/// another leg of the exchange is required.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthStatus {
    /// Another leg is required before the handshake can proceed.
    Continue,
    /// The exchange is complete; no further tokens are produced.
    Complete,
}

/// An external authentication mechanism driven through a sequence of opaque
/// tokens (e.g. NTLM, as negotiated via `AUTHN_WINNT`). This crate never
/// inspects token contents; it only sequences the three calls against the
/// wire PDUs.
pub trait AuthOracle: Send {
    /// Produces the first token, embedded in the `BIND` PDU's auth verifier.
    fn initial_token(&mut self, credential: &Credential) -> Result<(Vec<u8>, AuthStatus), AuthOracleError>;

    /// Consumes the server's challenge token carried by `BIND_ACK`. A
    /// [`AuthStatus::Continue`] result means [`next_token`](Self::next_token)
    /// must be called to produce the `RPC_AUTH_3` token; [`AuthStatus::Complete`]
    /// means the handshake is already established and `RPC_AUTH_3` is not sent.
    fn accept_token(&mut self, server_token: &[u8]) -> Result<AuthStatus, AuthOracleError>;

    /// Produces the token sent in `RPC_AUTH_3`. Only called after
    /// [`accept_token`](Self::accept_token) reports [`AuthStatus::Continue`].
    fn next_token(&mut self) -> Result<Vec<u8>, AuthOracleError>;
}

/// Error produced by an [`AuthOracle`] implementation.
#[derive(Debug)]
pub struct AuthOracleError(String);

impl AuthOracleError {
    #[must_use]
    pub fn new(description: impl Into<String>) -> Self {
        Self(description.into())
    }
}

impl fmt::Display for AuthOracleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for AuthOracleError {}

/// Username/password/domain credential, requested from the caller only when
/// `Settings` does not already carry one.
#[derive(Debug, Clone)]
pub struct Credential {
    pub username: String,
    pub password: String,
    pub domain: Option<String>,
}

/// What the caller decided when asked for a credential.
#[derive(Debug, Clone)]
pub enum PromptOutcome {
    /// The caller supplied a credential; the handshake proceeds with it.
    Proceed(Credential),
    /// The caller (interactively or otherwise) aborted the handshake.
    Cancel,
}

/// Asks the caller (interactively or otherwise) to supply a credential when
/// none is configured in [`Settings`].
pub trait CredentialPrompt: Send {
    fn prompt(&mut self) -> Result<PromptOutcome, AuthOracleError>;
}

/// Configuration consumed by [`BindEngine`](crate::engine::BindEngine).
///
/// Mirrors the two credential slots of the source (`GatewayUsername`/
/// `GatewayDomain`/`GatewayPassword` versus `Username`/`Domain`/`Password`):
/// the gateway credential is what [`AuthOracle`] authenticates the bind
/// handshake with, while the session credential is consumed by the outer RDP
/// connector this crate never drives.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Credential used to authenticate the bind handshake itself. Prompted
    /// for via [`CredentialPrompt`] when username or password is empty.
    pub gateway_credential: Credential,
    /// Credential handed to the outer RDP session once the gateway handshake
    /// completes. Populated by [`Self::resolve_session_credential`] when
    /// [`Self::use_same_credentials_for_session`] is set; otherwise left as
    /// configured by the caller.
    pub session_credential: Option<Credential>,
    /// When set, the gateway credential is duplicated into the session
    /// credential slot as an atomic group (username, domain and password
    /// together) rather than left for the caller to fill in separately.
    pub use_same_credentials_for_session: bool,
    /// `TSGU` interface version, as `(major, minor)`.
    pub interface_version: (u16, u16),
    /// Ceiling on the fragment size this session is willing to send.
    pub max_xmit_frag: u16,
    /// Ceiling on the fragment size this session is willing to receive.
    pub max_recv_frag: u16,
}

impl Settings {
    /// Checks the gateway credential's username and password symmetrically;
    /// a credential is usable only when both are non-empty. The domain is
    /// optional here and does not gate usability.
    #[must_use]
    pub fn has_usable_gateway_credential(&self) -> bool {
        !self.gateway_credential.username.is_empty() && !self.gateway_credential.password.is_empty()
    }

    /// Returns the credential bundle to install in [`Self::session_credential`]
    /// when [`Self::use_same_credentials_for_session`] is set, duplicating
    /// the gateway credential as an atomic group of all three fields. Returns
    /// `Ok(None)` without touching `self` when the flag is not set — the
    /// caller decides whether and how to apply the result, rather than this
    /// method mutating shared config in place.
    ///
    /// The source's corresponding check reads `settings.Password` where it
    /// should read `!settings.Password`, so a null password is incorrectly
    /// accepted. This checks username, domain and password symmetrically and
    /// fails if any of the three is missing, rather than replicating that
    /// asymmetry.
    pub fn resolve_session_credential(&self) -> BindResult<Option<Credential>> {
        if !self.use_same_credentials_for_session {
            return Ok(None);
        }

        let Credential { username, password, domain } = &self.gateway_credential;
        let domain_present = domain.as_deref().is_some_and(|d| !d.is_empty());

        if username.is_empty() || password.is_empty() || !domain_present {
            return Err(BindError::reason(
                "UseSameCredentialsForSession",
                "gateway credential is missing username, domain or password",
            ));
        }

        Ok(Some(self.gateway_credential.clone()))
    }
}
