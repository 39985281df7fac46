//! The bind handshake state machine: `Init -> BindSent -> AwaitingBindAck ->
//! Auth3Send -> Established`, with `Failed` reachable from any non-terminal
//! state.

use core::any::Any;
use core::fmt;
use core::mem;
use core::num::NonZeroUsize;

use ironrdp_core::{Decode as _, Encode as _, WriteBuf};

use crate::channel::{InChannel, OutChannel};
use crate::error::{BindError, BindErrorExt as _, BindResult};
use crate::oracle::{AuthOracle, AuthStatus, CredentialPrompt, PromptOutcome, Settings};
use crate::pdu::{AuthVerifier, BindAckPdu, BindPdu, PfcFlags, PresentationContext, RpcAuth3Pdu};
use crate::registry::CallRegistry;
use crate::uuid::{InterfaceUuid, AUTHN_LEVEL_PKT_INTEGRITY, AUTHN_WINNT};

/// The fixed call id shared by `BIND` and `RPC_AUTH_3`. The registry's
/// `new_call` treats a second insertion of this id as idempotent (see
/// `CallRegistry::new_call`), since the handshake legitimately reuses it
/// across both client-sent PDUs.
const BIND_CALL_ID: u32 = 2;
const AUTH3_CALL_ID: u32 = 2;

/// Handshake PDUs don't invoke a remote operation the way data-phase
/// requests do; they're registered with opnum `0` as a placeholder.
const HANDSHAKE_OPNUM: u16 = 0;

/// The outcome of a successful handshake: what the data phase needs to know.
#[derive(Debug, Clone)]
pub struct NegotiatedParameters {
    pub max_xmit_frag: u16,
    pub max_recv_frag: u16,
    pub accepted_context_id: u16,
}

/// Mirrors [`ironrdp_connector`]'s `Written`: either nothing was produced, or
/// a non-zero number of bytes were.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Written {
    Nothing,
    Size(NonZeroUsize),
}

impl Written {
    pub fn from_size(value: usize) -> BindResult<Self> {
        NonZeroUsize::new(value)
            .map(Self::Size)
            .ok_or_else(|| BindError::general("invalid written length (can't be zero)"))
    }

    #[must_use]
    pub fn is_nothing(self) -> bool {
        matches!(self, Self::Nothing)
    }
}

/// A step of the bind handshake's state machine.
pub trait State: Send + fmt::Debug + 'static {
    fn name(&self) -> &'static str;
    fn is_terminal(&self) -> bool;
    fn as_any(&self) -> &dyn Any;
}

ironrdp_core::assert_obj_safe!(State);

#[must_use]
pub fn state_downcast<T: State>(state: &dyn State) -> Option<&T> {
    state.as_any().downcast_ref()
}

/// Something that can be driven forward one PDU at a time.
pub trait Sequence: Send {
    fn state(&self) -> &dyn State;

    fn step(&mut self, input: &[u8], output: &mut WriteBuf) -> BindResult<Written>;
}

ironrdp_core::assert_obj_safe!(Sequence);

#[derive(Default, Debug)]
#[non_exhaustive]
pub enum BindEngineState {
    #[default]
    Consumed,
    Init,
    BindSent,
    AwaitingBindAck,
    Auth3Send {
        accepted_context_id: u16,
        negotiated_xmit_frag: u16,
        negotiated_recv_frag: u16,
    },
    Established(NegotiatedParameters),
    Failed,
}

impl State for BindEngineState {
    fn name(&self) -> &'static str {
        match self {
            Self::Consumed => "Consumed",
            Self::Init => "Init",
            Self::BindSent => "BindSent",
            Self::AwaitingBindAck => "AwaitingBindAck",
            Self::Auth3Send { .. } => "Auth3Send",
            Self::Established(_) => "Established",
            Self::Failed => "Failed",
        }
    }

    fn is_terminal(&self) -> bool {
        matches!(self, Self::Established(_) | Self::Failed)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Drives one bind session end to end. Owns its [`CallRegistry`] and the
/// presentation-context/auth-verifier scratch state used along the way;
/// nothing here is borrowed past a single [`Sequence::step`] call.
pub struct BindEngine<A> {
    state: BindEngineState,
    settings: Settings,
    auth_oracle: A,
    registry: CallRegistry,
}

impl<A> BindEngine<A>
where
    A: AuthOracle,
{
    pub fn new(settings: Settings, auth_oracle: A) -> Self {
        Self {
            state: BindEngineState::Init,
            settings,
            auth_oracle,
            registry: CallRegistry::new(),
        }
    }

    /// Whether the caller must supply a gateway credential (via
    /// [`CredentialPrompt`]) before the handshake can send its first PDU.
    #[must_use]
    pub fn needs_credentials(&self) -> bool {
        matches!(self.state, BindEngineState::Init) && !self.settings.has_usable_gateway_credential()
    }

    /// Consults the [`CredentialPrompt`] collaborator. On [`PromptOutcome::Cancel`],
    /// the engine moves to `Failed` and a `Cancelled` error is returned: terminal,
    /// but the caller is expected to treat it as a user-initiated abort rather than
    /// a failure to report.
    pub fn supply_credentials(&mut self, prompt: &mut dyn CredentialPrompt) -> BindResult<()> {
        match prompt.prompt().map_err(|e| BindError::custom("credential prompt", e))? {
            PromptOutcome::Proceed(credential) => {
                self.settings.gateway_credential = credential;
                Ok(())
            }
            PromptOutcome::Cancel => {
                self.state = BindEngineState::Failed;
                Err(BindError::cancelled())
            }
        }
    }

    /// The two presentation contexts a `BIND` always carries: context 0
    /// proposes NDR as the transfer syntax for the `TSGU` interface, context
    /// 1 proposes the bind-time feature negotiation pseudo-syntax for the
    /// same interface. Neither is configurable per session.
    fn bind_contexts(&self) -> Vec<PresentationContext> {
        let abstract_syntax_version =
            u32::from(self.settings.interface_version.0) | (u32::from(self.settings.interface_version.1) << 16);

        vec![
            PresentationContext {
                context_id: 0,
                abstract_syntax: InterfaceUuid::TSGU,
                abstract_syntax_version,
                transfer_syntax: InterfaceUuid::NDR,
                transfer_syntax_version: InterfaceUuid::NDR_VERSION,
            },
            PresentationContext {
                context_id: 1,
                abstract_syntax: InterfaceUuid::TSGU,
                abstract_syntax_version,
                transfer_syntax: InterfaceUuid::BTFN,
                transfer_syntax_version: InterfaceUuid::BTFN_VERSION,
            },
        ]
    }
}

impl<A> Sequence for BindEngine<A>
where
    A: AuthOracle,
{
    fn state(&self) -> &dyn State {
        &self.state
    }

    fn step(&mut self, input: &[u8], output: &mut WriteBuf) -> BindResult<Written> {
        let (written, next_state) = match mem::take(&mut self.state) {
            BindEngineState::Consumed => {
                return Err(crate::general_err!("bind engine state is consumed (this is a bug)"))
            }

            BindEngineState::Failed => return Err(crate::general_err!("bind engine has already failed")),

            BindEngineState::Established(_) => {
                return Err(crate::general_err!("bind handshake is already established"))
            }

            BindEngineState::Init => {
                if !self.settings.has_usable_gateway_credential() {
                    return Err(BindError::general("no gateway credential available; call supply_credentials first"));
                }

                self.settings.session_credential = self.settings.resolve_session_credential()?;

                let (initial_token, _status) = self
                    .auth_oracle
                    .initial_token(&self.settings.gateway_credential)
                    .map_err(|e| BindError::custom("auth oracle initial_token", e))?;

                self.registry.new_call(BIND_CALL_ID, HANDSHAKE_OPNUM)?;

                let pdu = BindPdu {
                    call_id: BIND_CALL_ID,
                    max_xmit_frag: self.settings.max_xmit_frag,
                    max_recv_frag: self.settings.max_recv_frag,
                    assoc_group_id: 0,
                    contexts: self.bind_contexts(),
                    auth: AuthVerifier {
                        auth_type: AUTHN_WINNT,
                        auth_level: AUTHN_LEVEL_PKT_INTEGRITY,
                        auth_pad_length: 0,
                        auth_context_id: 0,
                        auth_value: initial_token,
                    },
                };

                debug!(message = ?pdu, "Send");

                let written = ironrdp_core::encode_buf(&pdu, output).map_err(BindError::encode)?;

                (Written::from_size(written)?, BindEngineState::BindSent)
            }

            BindEngineState::BindSent => {
                // Nothing to send; the caller must now read a BIND_ACK from the out-channel.
                (Written::Nothing, BindEngineState::AwaitingBindAck)
            }

            BindEngineState::AwaitingBindAck => {
                let bind_ack = BindAckPdu::decode(&mut ironrdp_core::ReadCursor::new(input)).map_err(BindError::decode)?;

                debug!(message = ?bind_ack, "Received");

                if bind_ack.call_id != BIND_CALL_ID {
                    return Err(crate::reason_err!(
                        "BindAck",
                        "unexpected call id in BIND_ACK: got {}, expected {}",
                        bind_ack.call_id,
                        BIND_CALL_ID,
                    ));
                }

                // The server's max_xmit_frag becomes this session's effective
                // send limit and vice versa; the peer's report is taken as-is,
                // never clamped back to the locally configured ceiling.
                let negotiated_xmit_frag = bind_ack.max_recv_frag;
                let negotiated_recv_frag = bind_ack.max_xmit_frag;

                if negotiated_xmit_frag < self.settings.max_xmit_frag || negotiated_recv_frag < self.settings.max_recv_frag {
                    warn!(
                        negotiated_xmit_frag,
                        negotiated_recv_frag, "Server renegotiated fragment sizes downward"
                    );
                }

                if bind_ack.auth.is_empty() {
                    return Err(crate::general_err!("BIND_ACK is missing the expected auth verifier"));
                }

                let status = self
                    .auth_oracle
                    .accept_token(&bind_ack.auth.auth_value)
                    .map_err(|e| BindError::custom("auth oracle accept_token", e))?;

                let accepted_context_id = 0;

                match status {
                    AuthStatus::Continue => (
                        Written::Nothing,
                        BindEngineState::Auth3Send {
                            accepted_context_id,
                            negotiated_xmit_frag,
                            negotiated_recv_frag,
                        },
                    ),
                    AuthStatus::Complete => {
                        info!("Bind handshake established (no RPC_AUTH_3 required)");

                        (
                            Written::Nothing,
                            BindEngineState::Established(NegotiatedParameters {
                                max_xmit_frag: negotiated_xmit_frag,
                                max_recv_frag: negotiated_recv_frag,
                                accepted_context_id,
                            }),
                        )
                    }
                }
            }

            BindEngineState::Auth3Send {
                accepted_context_id,
                negotiated_xmit_frag,
                negotiated_recv_frag,
            } => {
                let final_token = self
                    .auth_oracle
                    .next_token()
                    .map_err(|e| BindError::custom("auth oracle next_token", e))?;

                self.registry.new_call(AUTH3_CALL_ID, HANDSHAKE_OPNUM)?;

                let pdu = RpcAuth3Pdu {
                    call_id: AUTH3_CALL_ID,
                    max_xmit_frag: negotiated_xmit_frag,
                    max_recv_frag: negotiated_recv_frag,
                    auth: AuthVerifier {
                        auth_type: AUTHN_WINNT,
                        auth_level: AUTHN_LEVEL_PKT_INTEGRITY,
                        auth_pad_length: 0,
                        auth_context_id: 0,
                        auth_value: final_token,
                    },
                };

                debug!(message = ?pdu, "Send");

                let written = ironrdp_core::encode_buf(&pdu, output).map_err(BindError::encode)?;

                info!("Bind handshake established");

                (
                    Written::from_size(written)?,
                    BindEngineState::Established(NegotiatedParameters {
                        max_xmit_frag: negotiated_xmit_frag,
                        max_recv_frag: negotiated_recv_frag,
                        accepted_context_id,
                    }),
                )
            }
        };

        self.state = next_state;

        Ok(written)
    }
}

/// Drives a [`BindEngine`] end to end over a pair of blocking channels.
pub fn run<A>(
    engine: &mut BindEngine<A>,
    prompt: &mut dyn CredentialPrompt,
    in_channel: &mut dyn InChannel,
    out_channel: &mut dyn OutChannel,
) -> BindResult<NegotiatedParameters>
where
    A: AuthOracle,
{
    if engine.needs_credentials() {
        engine.supply_credentials(prompt)?;
    }

    let mut output = WriteBuf::new();
    let mut input = vec![0u8; 8192];

    loop {
        output.clear();

        let written = engine.step(&input, &mut output)?;

        if !written.is_nothing() {
            in_channel.send(output.filled()).map_err(BindError::channel)?;
        }

        if let BindEngineState::Established(params) = &engine.state {
            return Ok(params.clone());
        }

        if matches!(engine.state, BindEngineState::AwaitingBindAck) {
            let n = out_channel.recv(&mut input).map_err(BindError::channel)?;
            if n == 0 {
                return Err(crate::general_err!("out-channel closed while awaiting BIND_ACK"));
            }
            input.truncate(n);
            input.resize(8192, 0);
        }
    }
}
