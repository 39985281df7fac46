//! Interface and syntax identifiers used by the bind handshake.

use ironrdp_core::{Decode, DecodeResult, Encode, EncodeResult, ReadCursor, WriteCursor};
use uuid::Uuid;

/// A 128-bit DCE/RPC interface or transfer syntax identifier, encoded on the wire
/// as `Data1` (u32 LE), `Data2` (u16 LE), `Data3` (u16 LE), `Data4` (8 bytes, as-is).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InterfaceUuid(Uuid);

impl InterfaceUuid {
    pub const SIZE: usize = 16;

    /// Terminal Services Gateway interface.
    pub const TSGU: Self = Self::from_fields(0x44E265DD, 0x7DAF, 0x42CD, [0x85, 0x60, 0x3C, 0xDB, 0x6E, 0x7A, 0x27, 0x29]);

    /// NDR transfer syntax.
    pub const NDR: Self = Self::from_fields(0x8A885D04, 0x1CEB, 0x11C9, [0x9F, 0xE8, 0x08, 0x00, 0x2B, 0x10, 0x48, 0x60]);

    /// Bind time feature negotiation transfer syntax.
    pub const BTFN: Self = Self::from_fields(0x6CB71C2C, 0x9812, 0x4540, [0x03, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]);

    /// Version associated with [`Self::NDR`] in a presentation context's transfer syntax.
    pub const NDR_VERSION: u32 = 2;

    /// Version associated with [`Self::BTFN`] in a presentation context's transfer syntax.
    pub const BTFN_VERSION: u32 = 1;

    #[must_use]
    pub const fn from_fields(d1: u32, d2: u16, d3: u16, d4: [u8; 8]) -> Self {
        Self(Uuid::from_fields(d1, d2, d3, &d4))
    }

    #[must_use]
    pub const fn as_uuid(self) -> Uuid {
        self.0
    }
}

impl From<Uuid> for InterfaceUuid {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl Decode<'_> for InterfaceUuid {
    fn decode(src: &mut ReadCursor<'_>) -> DecodeResult<Self> {
        let d1 = src.try_read_u32().map_err(|_| {
            ironrdp_core::DecodeError::new(
                "InterfaceUuid",
                ironrdp_core::DecodeErrorKind::NotEnoughBytes {
                    received: src.len(),
                    expected: Self::SIZE,
                },
            )
        })?;
        let d2 = src.try_read_u16().map_err(|_| not_enough(src.len()))?;
        let d3 = src.try_read_u16().map_err(|_| not_enough(src.len()))?;

        if src.len() < 8 {
            return Err(not_enough(src.len()));
        }
        let d4 = src.read_array::<8>();

        Ok(Self::from_fields(d1, d2, d3, d4))
    }
}

impl Encode for InterfaceUuid {
    fn encode(&self, dst: &mut WriteCursor<'_>) -> EncodeResult<()> {
        if dst.len() < Self::SIZE {
            return Err(ironrdp_core::EncodeError::new(
                "InterfaceUuid",
                ironrdp_core::EncodeErrorKind::NotEnoughBytes {
                    received: dst.len(),
                    expected: Self::SIZE,
                },
            ));
        }

        let (d1, d2, d3, d4) = self.0.as_fields();
        dst.write_u32(d1);
        dst.write_u16(d2);
        dst.write_u16(d3);
        dst.write_slice(d4);

        Ok(())
    }

    fn name(&self) -> &'static str {
        "InterfaceUuid"
    }

    fn size(&self) -> usize {
        Self::SIZE
    }
}

fn not_enough(received: usize) -> ironrdp_core::DecodeError {
    ironrdp_core::DecodeError::new(
        "InterfaceUuid",
        ironrdp_core::DecodeErrorKind::NotEnoughBytes {
            received,
            expected: InterfaceUuid::SIZE,
        },
    )
}

/// RPC authentication service: NTLM (`RPC_C_AUTHN_WINNT`).
pub const AUTHN_WINNT: u8 = 0x0A;

/// RPC authentication level: packet integrity (`RPC_C_AUTHN_LEVEL_PKT_INTEGRITY`).
pub const AUTHN_LEVEL_PKT_INTEGRITY: u8 = 0x05;
