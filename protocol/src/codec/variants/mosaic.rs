//! Mosaic definition and supply change bodies.

use bytes::{BufMut, BytesMut};

use super::read_enum;
use crate::codec::identifiers::{put_unresolved_mosaic_id, read_mosaic_id, read_unresolved_mosaic_id};
use crate::codec::{CodecError, Reader};
use crate::identity::{MosaicNonce, NetworkType};
use crate::transaction::{
    MosaicDefinitionBody, MosaicFlags, MosaicSupplyChangeAction, MosaicSupplyChangeBody,
};

body_codec!(
    /// Mosaic definition, version 1: id, duration, nonce, flags, divisibility.
    MOSAIC_DEFINITION: MosaicDefinition => encode_definition, decode_definition
);

body_codec!(
    /// Mosaic supply change, version 1: mosaic, delta, action.
    MOSAIC_SUPPLY_CHANGE: MosaicSupplyChange => encode_supply_change, decode_supply_change
);

fn encode_definition(
    body: &MosaicDefinitionBody,
    _network: NetworkType,
    out: &mut BytesMut,
) -> Result<(), CodecError> {
    out.put_u64_le(body.mosaic_id.id());
    out.put_u64_le(body.duration);
    out.put_u32_le(body.nonce.value());
    out.put_u8(body.flags.bits());
    out.put_u8(body.divisibility);
    Ok(())
}

fn decode_definition(
    reader: &mut Reader<'_>,
    _network: NetworkType,
) -> Result<MosaicDefinitionBody, CodecError> {
    let mosaic_id = read_mosaic_id(reader, "mosaic id")?;
    let duration = reader.u64("duration")?;
    let nonce = MosaicNonce::new(reader.u32("nonce")?);
    let raw_flags = reader.u8("mosaic flags")?;
    let flags = MosaicFlags::from_bits(raw_flags)
        .ok_or_else(|| CodecError::Malformed(format!("unknown mosaic flag bits 0x{raw_flags:02X}")))?;
    let divisibility = reader.u8("divisibility")?;
    Ok(MosaicDefinitionBody {
        mosaic_id,
        duration,
        nonce,
        flags,
        divisibility,
    })
}

fn encode_supply_change(
    body: &MosaicSupplyChangeBody,
    _network: NetworkType,
    out: &mut BytesMut,
) -> Result<(), CodecError> {
    put_unresolved_mosaic_id(out, body.mosaic_id);
    out.put_u64_le(body.delta);
    out.put_u8(body.action.value());
    Ok(())
}

fn decode_supply_change(
    reader: &mut Reader<'_>,
    _network: NetworkType,
) -> Result<MosaicSupplyChangeBody, CodecError> {
    Ok(MosaicSupplyChangeBody {
        mosaic_id: read_unresolved_mosaic_id(reader, "mosaic id")?,
        delta: reader.u64("delta")?,
        action: read_enum(reader, "supply change action", MosaicSupplyChangeAction::from_value)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::{MosaicId, NamespaceId};

    #[test]
    fn definition_layout() {
        let body = MosaicDefinitionBody {
            mosaic_id: MosaicId::new(0x1122_3344_5566_7788).unwrap(),
            duration: 1000,
            nonce: MosaicNonce::new(0xAABB_CCDD),
            flags: MosaicFlags::SUPPLY_MUTABLE | MosaicFlags::TRANSFERABLE,
            divisibility: 6,
        };
        let mut out = BytesMut::new();
        encode_definition(&body, NetworkType::TestNet, &mut out).unwrap();
        assert_eq!(out.len(), 22);
        assert_eq!(&out[16..20], &[0xDD, 0xCC, 0xBB, 0xAA]);
        assert_eq!(out[20], 0x03);
        assert_eq!(out[21], 6);

        let decoded = decode_definition(&mut Reader::new(&out), NetworkType::TestNet).unwrap();
        assert_eq!(decoded, body);
    }

    #[test]
    fn unknown_flag_bits_are_malformed() {
        let mut bytes = vec![1, 0, 0, 0, 0, 0, 0, 0];
        bytes.extend_from_slice(&[0; 12]);
        bytes.extend_from_slice(&[0x80, 0]);
        let err = decode_definition(&mut Reader::new(&bytes), NetworkType::TestNet).unwrap_err();
        assert!(matches!(err, CodecError::Malformed(_)));
    }

    #[test]
    fn definition_id_must_not_be_an_alias() {
        let mut bytes = NamespaceId::from_name("cat").unwrap().id().to_le_bytes().to_vec();
        bytes.extend_from_slice(&[0; 14]);
        let err = decode_definition(&mut Reader::new(&bytes), NetworkType::TestNet).unwrap_err();
        assert_eq!(err.kind(), crate::codec::ErrorKind::Validation);
    }

    #[test]
    fn supply_change_accepts_alias_and_rejects_bad_action() {
        let body = MosaicSupplyChangeBody {
            mosaic_id: NamespaceId::from_name("cat.currency").unwrap().into(),
            delta: 500,
            action: MosaicSupplyChangeAction::Increase,
        };
        let mut out = BytesMut::new();
        encode_supply_change(&body, NetworkType::TestNet, &mut out).unwrap();
        assert_eq!(out.len(), 17);
        let decoded = decode_supply_change(&mut Reader::new(&out), NetworkType::TestNet).unwrap();
        assert_eq!(decoded, body);

        out[16] = 2;
        let err = decode_supply_change(&mut Reader::new(&out), NetworkType::TestNet).unwrap_err();
        assert!(matches!(err, CodecError::Malformed(_)));
    }
}
