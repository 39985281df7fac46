//! Wire layouts for the three PDUs exchanged during the bind handshake:
//! `BIND`, `BIND_ACK` and `RPC_AUTH_3`.
//!
//! Encoding always goes through a single forward-only [`WriteCursor`]; no
//! offset is computed by hand. [`ironrdp_core::write_padding`] advances past
//! alignment gaps instead of the caller tracking byte offsets itself.

use bitflags::bitflags;
use ironrdp_core::{
    read_padding, write_padding, Decode, DecodeError, DecodeErrorKind, DecodeResult, Encode, EncodeError,
    EncodeErrorKind, EncodeResult, ReadCursor, WriteCursor,
};

use crate::uuid::InterfaceUuid;

/// `BIND` request.
pub const PTYPE_BIND: u8 = 0x0B;
/// `BIND_ACK` response.
pub const PTYPE_BIND_ACK: u8 = 0x0C;
/// `RPC_AUTH_3`, the third leg of the authentication handshake.
pub const PTYPE_RPC_AUTH_3: u8 = 0x10;

bitflags! {
    /// PFC flags carried in the common PDU header.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct PfcFlags: u8 {
        const FIRST_FRAG = 0x01;
        const LAST_FRAG = 0x02;
        const SUPPORT_HEADER_SIGN = 0x04;
        const CONC_MPX = 0x10;
    }
}

/// Little-endian/ASCII byte order and encoding flags; this crate only ever
/// negotiates the common little-endian/ASCII/IEEE representation.
pub const PACKED_DREP: [u8; 4] = [0x10, 0x00, 0x00, 0x00];

const fn not_enough(context: &'static str, received: usize, expected: usize) -> DecodeError {
    DecodeError::new(context, DecodeErrorKind::NotEnoughBytes { received, expected })
}

fn invalid(context: &'static str, field: &'static str, reason: &'static str) -> DecodeError {
    DecodeError::new(context, DecodeErrorKind::InvalidField { field, reason })
}

fn not_enough_to_write(context: &'static str, received: usize, expected: usize) -> EncodeError {
    EncodeError::new(context, EncodeErrorKind::NotEnoughBytes { received, expected })
}

/// Narrows a `usize` length into a smaller integer type, reporting an
/// `InvalidField` error rather than silently truncating.
fn cast_length<T>(n: usize) -> EncodeResult<T>
where
    T: TryFrom<usize>,
{
    T::try_from(n).map_err(|_| {
        EncodeError::new(
            "cast_length",
            EncodeErrorKind::InvalidField {
                field: "length",
                reason: "value does not fit in the target integer type",
            },
        )
    })
}

/// The 16-byte header common to every CO-RPC PDU.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PduHeader {
    pub rpc_vers: u8,
    pub rpc_vers_minor: u8,
    pub ptype: u8,
    pub pfc_flags: PfcFlags,
    pub frag_length: u16,
    pub auth_length: u16,
    pub call_id: u32,
}

impl PduHeader {
    pub const SIZE: usize = 16;

    #[must_use]
    pub fn new(ptype: u8, pfc_flags: PfcFlags, call_id: u32) -> Self {
        Self {
            rpc_vers: 5,
            rpc_vers_minor: 0,
            ptype,
            pfc_flags,
            frag_length: 0,
            auth_length: 0,
            call_id,
        }
    }
}

impl Decode<'_> for PduHeader {
    fn decode(src: &mut ReadCursor<'_>) -> DecodeResult<Self> {
        if src.len() < Self::SIZE {
            return Err(not_enough("PduHeader", src.len(), Self::SIZE));
        }

        let rpc_vers = src.read_u8();
        let rpc_vers_minor = src.read_u8();
        let ptype = src.read_u8();
        let pfc_flags = PfcFlags::from_bits_truncate(src.read_u8());
        read_padding(src, 4); // packed_drep
        let frag_length = src.read_u16();
        let auth_length = src.read_u16();
        let call_id = src.read_u32();

        Ok(Self {
            rpc_vers,
            rpc_vers_minor,
            ptype,
            pfc_flags,
            frag_length,
            auth_length,
            call_id,
        })
    }
}

impl Encode for PduHeader {
    fn encode(&self, dst: &mut WriteCursor<'_>) -> EncodeResult<()> {
        if dst.len() < Self::SIZE {
            return Err(not_enough_to_write("PduHeader", dst.len(), Self::SIZE));
        }

        dst.write_u8(self.rpc_vers);
        dst.write_u8(self.rpc_vers_minor);
        dst.write_u8(self.ptype);
        dst.write_u8(self.pfc_flags.bits());
        dst.write_slice(&PACKED_DREP);
        dst.write_u16(self.frag_length);
        dst.write_u16(self.auth_length);
        dst.write_u32(self.call_id);

        Ok(())
    }

    fn name(&self) -> &'static str {
        "PduHeader"
    }

    fn size(&self) -> usize {
        Self::SIZE
    }
}

/// One presentation context offered in a `BIND` request: a single transfer
/// syntax proposed for the context's abstract syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresentationContext {
    pub context_id: u16,
    pub abstract_syntax: InterfaceUuid,
    pub abstract_syntax_version: u32,
    pub transfer_syntax: InterfaceUuid,
    pub transfer_syntax_version: u32,
}

impl PresentationContext {
    pub const SIZE: usize = 44; // 4 (header) + 20 (abstract syntax) + 20 (transfer syntax)
}

impl Decode<'_> for PresentationContext {
    fn decode(src: &mut ReadCursor<'_>) -> DecodeResult<Self> {
        if src.len() < Self::SIZE {
            return Err(not_enough("PresentationContext", src.len(), Self::SIZE));
        }

        let context_id = src.read_u16();
        let n_transfer_syn = src.read_u8();
        read_padding(src, 1); // reserved

        if n_transfer_syn != 1 {
            return Err(invalid(
                "PresentationContext",
                "n_transfer_syn",
                "only a single transfer syntax per context is supported",
            ));
        }

        let abstract_syntax = InterfaceUuid::decode(src)?;
        let abstract_syntax_version = src.read_u32();
        let transfer_syntax = InterfaceUuid::decode(src)?;
        let transfer_syntax_version = src.read_u32();

        Ok(Self {
            context_id,
            abstract_syntax,
            abstract_syntax_version,
            transfer_syntax,
            transfer_syntax_version,
        })
    }
}

impl Encode for PresentationContext {
    fn encode(&self, dst: &mut WriteCursor<'_>) -> EncodeResult<()> {
        if dst.len() < Self::SIZE {
            return Err(not_enough_to_write("PresentationContext", dst.len(), Self::SIZE));
        }

        dst.write_u16(self.context_id);
        dst.write_u8(1); // n_transfer_syn
        write_padding(dst, 1);
        self.abstract_syntax.encode(dst)?;
        dst.write_u32(self.abstract_syntax_version);
        self.transfer_syntax.encode(dst)?;
        dst.write_u32(self.transfer_syntax_version);

        Ok(())
    }

    fn name(&self) -> &'static str {
        "PresentationContext"
    }

    fn size(&self) -> usize {
        Self::SIZE
    }
}

/// Authentication verifier trailer, always the last `8 + auth_value.len()`
/// bytes of a fragment when `auth_length != 0`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthVerifier {
    pub auth_type: u8,
    pub auth_level: u8,
    pub auth_pad_length: u8,
    pub auth_context_id: u32,
    pub auth_value: Vec<u8>,
}

impl AuthVerifier {
    pub const HEADER_SIZE: usize = 8;

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.auth_value.is_empty()
    }

    #[must_use]
    pub fn size(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            Self::HEADER_SIZE + self.auth_value.len()
        }
    }

    fn decode(src: &mut ReadCursor<'_>) -> DecodeResult<Self> {
        if src.len() < Self::HEADER_SIZE {
            return Err(not_enough("AuthVerifier", src.len(), Self::HEADER_SIZE));
        }

        let auth_type = src.read_u8();
        let auth_level = src.read_u8();
        let auth_pad_length = src.read_u8();
        read_padding(src, 1); // auth_reserved
        let auth_context_id = src.read_u32();
        let auth_value = src.read_remaining().to_vec();

        Ok(Self {
            auth_type,
            auth_level,
            auth_pad_length,
            auth_context_id,
            auth_value,
        })
    }

    fn encode(&self, dst: &mut WriteCursor<'_>) -> EncodeResult<()> {
        if self.is_empty() {
            return Ok(());
        }

        if dst.len() < self.size() {
            return Err(not_enough_to_write("AuthVerifier", dst.len(), self.size()));
        }

        dst.write_u8(self.auth_type);
        dst.write_u8(self.auth_level);
        dst.write_u8(self.auth_pad_length);
        write_padding(dst, 1);
        dst.write_u32(self.auth_context_id);
        dst.write_slice(&self.auth_value);

        Ok(())
    }
}

/// `BIND` request: proposes up to two presentation contexts and carries the
/// first leg of the authentication exchange.
#[derive(Debug, Clone)]
pub struct BindPdu {
    pub call_id: u32,
    pub max_xmit_frag: u16,
    pub max_recv_frag: u16,
    pub assoc_group_id: u32,
    pub contexts: Vec<PresentationContext>,
    pub auth: AuthVerifier,
}

impl Decode<'_> for BindPdu {
    fn decode(src: &mut ReadCursor<'_>) -> DecodeResult<Self> {
        let header = PduHeader::decode(src)?;

        if header.ptype != PTYPE_BIND {
            return Err(DecodeError::new(
                "BindPdu",
                DecodeErrorKind::UnexpectedMessageType { got: header.ptype },
            ));
        }

        if src.len() < 8 {
            return Err(not_enough("BindPdu", src.len(), 8));
        }

        let max_xmit_frag = src.read_u16();
        let max_recv_frag = src.read_u16();
        let assoc_group_id = src.read_u32();

        if src.len() < 4 {
            return Err(not_enough("BindPdu", src.len(), 4));
        }

        let n_context_elem = src.read_u8();
        read_padding(src, 3); // reserved

        let mut contexts = Vec::with_capacity(usize::from(n_context_elem));
        for _ in 0..n_context_elem {
            contexts.push(PresentationContext::decode(src)?);
        }

        let auth = if header.auth_length == 0 {
            AuthVerifier::default()
        } else {
            AuthVerifier::decode(src)?
        };

        Ok(Self {
            call_id: header.call_id,
            max_xmit_frag,
            max_recv_frag,
            assoc_group_id,
            contexts,
            auth,
        })
    }
}

impl Encode for BindPdu {
    fn encode(&self, dst: &mut WriteCursor<'_>) -> EncodeResult<()> {
        if self.contexts.len() > u8::MAX.into() {
            return Err(EncodeError::new(
                "BindPdu",
                EncodeErrorKind::InvalidField {
                    field: "contexts",
                    reason: "too many presentation contexts",
                },
            ));
        }

        let header = PduHeader {
            frag_length: cast_length(self.size())?,
            auth_length: cast_length(self.auth.auth_value.len())?,
            ..PduHeader::new(
                PTYPE_BIND,
                PfcFlags::FIRST_FRAG | PfcFlags::LAST_FRAG | PfcFlags::SUPPORT_HEADER_SIGN | PfcFlags::CONC_MPX,
                self.call_id,
            )
        };

        header.encode(dst)?;

        if dst.len() < 8 {
            return Err(not_enough_to_write("BindPdu", dst.len(), 8));
        }

        dst.write_u16(self.max_xmit_frag);
        dst.write_u16(self.max_recv_frag);
        dst.write_u32(self.assoc_group_id);

        if dst.len() < 4 {
            return Err(not_enough_to_write("BindPdu", dst.len(), 4));
        }

        dst.write_u8(cast_length(self.contexts.len())?);
        write_padding(dst, 3);

        for context in &self.contexts {
            context.encode(dst)?;
        }

        self.auth.encode(dst)?;

        Ok(())
    }

    fn name(&self) -> &'static str {
        "BindPdu"
    }

    fn size(&self) -> usize {
        PduHeader::SIZE
            + 8
            + 4
            + self.contexts.iter().map(PresentationContext::size).sum::<usize>()
            + self.auth.size()
    }
}

/// `BIND_ACK` response: only `max_xmit_frag`, `max_recv_frag` and the
/// trailing auth verifier are inspected; the secondary address string and
/// result list are skipped over rather than modeled, since this crate
/// never needs them.
#[derive(Debug, Clone)]
pub struct BindAckPdu {
    pub call_id: u32,
    pub max_xmit_frag: u16,
    pub max_recv_frag: u16,
    pub auth: AuthVerifier,
}

impl Decode<'_> for BindAckPdu {
    fn decode(src: &mut ReadCursor<'_>) -> DecodeResult<Self> {
        let header = PduHeader::decode(src)?;

        if header.ptype != PTYPE_BIND_ACK {
            return Err(DecodeError::new(
                "BindAckPdu",
                DecodeErrorKind::UnexpectedMessageType { got: header.ptype },
            ));
        }

        if src.len() < 4 {
            return Err(not_enough("BindAckPdu", src.len(), 4));
        }

        let max_xmit_frag = src.read_u16();
        let max_recv_frag = src.read_u16();

        // The body in between (secondary address, alignment, result list) is
        // opaque to this crate. The auth trailer, when present, is always
        // the last `8 + auth_length` bytes of the fragment, so we can skip
        // straight to it using lengths already read from the header.
        let body_remaining = usize::from(header.frag_length)
            .checked_sub(PduHeader::SIZE + 4)
            .ok_or_else(|| invalid("BindAckPdu", "frag_length", "shorter than the fixed prefix"))?;

        let auth_span = if header.auth_length == 0 {
            0
        } else {
            usize::from(header.auth_length) + AuthVerifier::HEADER_SIZE
        };

        let skip_len = body_remaining
            .checked_sub(auth_span)
            .ok_or_else(|| invalid("BindAckPdu", "auth_length", "larger than the remaining fragment"))?;

        if src.len() < skip_len {
            return Err(not_enough("BindAckPdu", src.len(), skip_len));
        }
        src.advance(skip_len);

        let auth = if header.auth_length == 0 {
            AuthVerifier::default()
        } else {
            AuthVerifier::decode(src)?
        };

        Ok(Self {
            call_id: header.call_id,
            max_xmit_frag,
            max_recv_frag,
            auth,
        })
    }
}

/// `RPC_AUTH_3`: completes the authentication exchange. Carries no
/// association group id and no presentation context list, but still
/// carries the negotiated fragment sizes in its 20-byte fixed prefix.
#[derive(Debug, Clone)]
pub struct RpcAuth3Pdu {
    pub call_id: u32,
    pub max_xmit_frag: u16,
    pub max_recv_frag: u16,
    pub auth: AuthVerifier,
}

impl Decode<'_> for RpcAuth3Pdu {
    fn decode(src: &mut ReadCursor<'_>) -> DecodeResult<Self> {
        let header = PduHeader::decode(src)?;

        if header.ptype != PTYPE_RPC_AUTH_3 {
            return Err(DecodeError::new(
                "RpcAuth3Pdu",
                DecodeErrorKind::UnexpectedMessageType { got: header.ptype },
            ));
        }

        if src.len() < 4 {
            return Err(not_enough("RpcAuth3Pdu", src.len(), 4));
        }

        let max_xmit_frag = src.read_u16();
        let max_recv_frag = src.read_u16();

        let auth = if header.auth_length == 0 {
            AuthVerifier::default()
        } else {
            AuthVerifier::decode(src)?
        };

        Ok(Self {
            call_id: header.call_id,
            max_xmit_frag,
            max_recv_frag,
            auth,
        })
    }
}

impl Encode for RpcAuth3Pdu {
    fn encode(&self, dst: &mut WriteCursor<'_>) -> EncodeResult<()> {
        let header = PduHeader {
            frag_length: cast_length(self.size())?,
            auth_length: cast_length(self.auth.auth_value.len())?,
            ..PduHeader::new(
                PTYPE_RPC_AUTH_3,
                PfcFlags::FIRST_FRAG | PfcFlags::LAST_FRAG | PfcFlags::CONC_MPX,
                self.call_id,
            )
        };

        header.encode(dst)?;

        if dst.len() < 4 {
            return Err(not_enough_to_write("RpcAuth3Pdu", dst.len(), 4));
        }

        dst.write_u16(self.max_xmit_frag);
        dst.write_u16(self.max_recv_frag);

        self.auth.encode(dst)?;

        Ok(())
    }

    fn name(&self) -> &'static str {
        "RpcAuth3Pdu"
    }

    fn size(&self) -> usize {
        PduHeader::SIZE + 4 + self.auth.size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_context(context_id: u16) -> PresentationContext {
        PresentationContext {
            context_id,
            abstract_syntax: InterfaceUuid::TSGU,
            abstract_syntax_version: 1,
            transfer_syntax: InterfaceUuid::NDR,
            transfer_syntax_version: 2,
        }
    }

    #[test]
    fn bind_pdu_sets_all_four_pfc_flags() {
        let pdu = BindPdu {
            call_id: 1,
            max_xmit_frag: 4280,
            max_recv_frag: 4280,
            assoc_group_id: 0,
            contexts: vec![sample_context(0), sample_context(1)],
            auth: AuthVerifier::default(),
        };

        let mut buf = vec![0u8; pdu.size()];
        let mut writer = WriteCursor::new(&mut buf);
        pdu.encode(&mut writer).unwrap();

        let header = PduHeader::decode(&mut ReadCursor::new(&buf)).unwrap();
        assert_eq!(
            header.pfc_flags,
            PfcFlags::FIRST_FRAG | PfcFlags::LAST_FRAG | PfcFlags::SUPPORT_HEADER_SIGN | PfcFlags::CONC_MPX
        );
    }

    #[test]
    fn rpc_auth3_sets_first_last_and_conc_mpx_flags() {
        let pdu = RpcAuth3Pdu {
            call_id: 2,
            max_xmit_frag: 4280,
            max_recv_frag: 4280,
            auth: AuthVerifier::default(),
        };

        let mut buf = vec![0u8; pdu.size()];
        let mut writer = WriteCursor::new(&mut buf);
        pdu.encode(&mut writer).unwrap();

        let header = PduHeader::decode(&mut ReadCursor::new(&buf)).unwrap();
        assert_eq!(
            header.pfc_flags,
            PfcFlags::FIRST_FRAG | PfcFlags::LAST_FRAG | PfcFlags::CONC_MPX
        );
    }

    #[test]
    fn bind_pdu_round_trips_without_auth() {
        let pdu = BindPdu {
            call_id: 1,
            max_xmit_frag: 4280,
            max_recv_frag: 4280,
            assoc_group_id: 0,
            contexts: vec![sample_context(0), sample_context(1)],
            auth: AuthVerifier::default(),
        };

        let mut buf = vec![0u8; pdu.size()];
        let mut writer = WriteCursor::new(&mut buf);
        pdu.encode(&mut writer).unwrap();
        assert_eq!(writer.pos(), pdu.size());

        // 16 (header) + 8 (frag sizes + assoc group) + 4 (context count) + 2 * 44 = 116
        assert_eq!(pdu.size(), 116);

        let mut reader = ReadCursor::new(&buf);
        let decoded = BindPdu::decode(&mut reader).unwrap();
        assert_eq!(decoded.call_id, 1);
        assert_eq!(decoded.contexts.len(), 2);
        assert_eq!(decoded.contexts[0].abstract_syntax, InterfaceUuid::TSGU);
        assert!(decoded.auth.is_empty());
    }

    #[test]
    fn bind_pdu_round_trips_with_auth() {
        let pdu = BindPdu {
            call_id: 7,
            max_xmit_frag: 4280,
            max_recv_frag: 4280,
            assoc_group_id: 0,
            contexts: vec![sample_context(0)],
            auth: AuthVerifier {
                auth_type: crate::uuid::AUTHN_WINNT,
                auth_level: crate::uuid::AUTHN_LEVEL_PKT_INTEGRITY,
                auth_pad_length: 0,
                auth_context_id: 0,
                auth_value: vec![1, 2, 3, 4, 5],
            },
        };

        let mut buf = vec![0u8; pdu.size()];
        let mut writer = WriteCursor::new(&mut buf);
        pdu.encode(&mut writer).unwrap();

        let mut reader = ReadCursor::new(&buf);
        let decoded = BindPdu::decode(&mut reader).unwrap();
        assert_eq!(decoded.auth.auth_value, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn bind_ack_skips_opaque_body_to_reach_auth_trailer() {
        // Hand-build a BIND_ACK with a non-empty secondary address string
        // (opaque to this crate) followed by an auth trailer.
        let auth_value = vec![9, 9, 9];
        let sec_addr = b"\\PIPE\\tsgu";

        let mut body = Vec::new();
        body.extend_from_slice(&4280u16.to_le_bytes()); // max_xmit_frag
        body.extend_from_slice(&4280u16.to_le_bytes()); // max_recv_frag
        body.extend_from_slice(&(sec_addr.len() as u16 + 1).to_le_bytes()); // sec_addr_len (incl. NUL)
        body.extend_from_slice(sec_addr);
        body.push(0); // NUL terminator
        while body.len() % 4 != 0 {
            body.push(0);
        }
        body.push(0); // n_results
        body.extend_from_slice(&[0, 0, 0]); // reserved

        let auth_header_and_value_len = AuthVerifier::HEADER_SIZE + auth_value.len();
        let frag_length = PduHeader::SIZE + body.len() + auth_header_and_value_len;

        let mut raw = Vec::new();
        raw.push(5); // rpc_vers
        raw.push(0); // rpc_vers_minor
        raw.push(PTYPE_BIND_ACK);
        raw.push((PfcFlags::FIRST_FRAG | PfcFlags::LAST_FRAG).bits());
        raw.extend_from_slice(&PACKED_DREP);
        raw.extend_from_slice(&(frag_length as u16).to_le_bytes());
        raw.extend_from_slice(&(auth_value.len() as u16).to_le_bytes());
        raw.extend_from_slice(&42u32.to_le_bytes()); // call_id
        raw.extend_from_slice(&body);
        raw.push(crate::uuid::AUTHN_WINNT);
        raw.push(crate::uuid::AUTHN_LEVEL_PKT_INTEGRITY);
        raw.push(0);
        raw.push(0);
        raw.extend_from_slice(&0u32.to_le_bytes());
        raw.extend_from_slice(&auth_value);

        let mut reader = ReadCursor::new(&raw);
        let decoded = BindAckPdu::decode(&mut reader).unwrap();

        assert_eq!(decoded.call_id, 42);
        assert_eq!(decoded.max_xmit_frag, 4280);
        assert_eq!(decoded.max_recv_frag, 4280);
        assert_eq!(decoded.auth.auth_value, auth_value);
    }

    #[test]
    fn rpc_auth3_round_trips() {
        let pdu = RpcAuth3Pdu {
            call_id: 2,
            max_xmit_frag: 4280,
            max_recv_frag: 1024,
            auth: AuthVerifier {
                auth_type: crate::uuid::AUTHN_WINNT,
                auth_level: crate::uuid::AUTHN_LEVEL_PKT_INTEGRITY,
                auth_pad_length: 0,
                auth_context_id: 0,
                auth_value: vec![0xAA; 16],
            },
        };

        let mut buf = vec![0u8; pdu.size()];
        let mut writer = WriteCursor::new(&mut buf);
        pdu.encode(&mut writer).unwrap();

        let mut reader = ReadCursor::new(&buf);
        let decoded = RpcAuth3Pdu::decode(&mut reader).unwrap();
        assert_eq!(decoded.call_id, 2);
        assert_eq!(decoded.max_xmit_frag, 4280);
        assert_eq!(decoded.max_recv_frag, 1024);
        assert_eq!(decoded.auth.auth_value, vec![0xAA; 16]);
    }

    #[test]
    fn frame_beyond_u16_frag_length_is_rejected_at_encode() {
        let pdu = BindPdu {
            call_id: 1,
            max_xmit_frag: 4280,
            max_recv_frag: 4280,
            assoc_group_id: 0,
            contexts: vec![sample_context(0), sample_context(1)],
            auth: AuthVerifier {
                auth_type: crate::uuid::AUTHN_WINNT,
                auth_level: crate::uuid::AUTHN_LEVEL_PKT_INTEGRITY,
                auth_pad_length: 0,
                auth_context_id: 0,
                auth_value: vec![0u8; 0xFFFF],
            },
        };

        // 116 + 8 + 0xFFFF overflows u16::MAX, so frag_length can't be cast.
        let mut buf = vec![0u8; pdu.size()];
        let mut writer = WriteCursor::new(&mut buf);
        assert!(pdu.encode(&mut writer).is_err());
    }

    #[test]
    fn auth_length_boundary_zero_means_no_trailer() {
        let pdu = BindPdu {
            call_id: 1,
            max_xmit_frag: 4280,
            max_recv_frag: 4280,
            assoc_group_id: 0,
            contexts: vec![sample_context(0)],
            auth: AuthVerifier::default(),
        };

        assert_eq!(pdu.auth.size(), 0);
        assert_eq!(pdu.size(), 116 - 44); // one context instead of two
    }
}
