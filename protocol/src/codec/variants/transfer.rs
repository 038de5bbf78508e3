//! Transfer body.
//!
//! ```text
//! recipient (24) | message size u16 | mosaic count u8 | reserved u32 | reserved u8
//! mosaics (16 each, ascending id) | message
//! ```

use bytes::{BufMut, BytesMut};

use super::read_list;
use crate::codec::identifiers::{put_mosaic, put_unresolved_address, read_mosaic, read_unresolved_address};
use crate::codec::primitives::{count_u8, len_u16};
use crate::codec::{CodecError, Reader};
use crate::identity::NetworkType;
use crate::transaction::{Message, TransferBody};

body_codec!(
    /// Transfer, version 1.
    TRANSFER: Transfer => encode_transfer, decode_transfer
);

fn encode_transfer(
    body: &TransferBody,
    network: NetworkType,
    out: &mut BytesMut,
) -> Result<(), CodecError> {
    let mosaics_count = count_u8("mosaics", body.mosaics.len())?;
    let message_size = match &body.message {
        Some(message) if !message.is_canonical() => {
            return Err(CodecError::Precondition(
                "raw message is empty or starts with a reserved type byte".into(),
            ));
        }
        Some(message) => len_u16("message", message.encoded_len())?,
        None => 0,
    };

    let mut mosaics = body.mosaics.clone();
    mosaics.sort_by_key(|mosaic| mosaic.id.raw());

    put_unresolved_address(out, &body.recipient, network);
    out.put_u16_le(message_size);
    out.put_u8(mosaics_count);
    out.put_u32_le(0);
    out.put_u8(0);
    for mosaic in &mosaics {
        put_mosaic(out, mosaic);
    }
    if let Some(message) = &body.message {
        if let Some(type_byte) = message.type_byte() {
            out.put_u8(type_byte);
        }
        out.put_slice(message.payload());
    }
    Ok(())
}

fn decode_transfer(reader: &mut Reader<'_>, network: NetworkType) -> Result<TransferBody, CodecError> {
    let recipient = read_unresolved_address(reader, "recipient", network)?;
    let message_size = reader.u16("message size")?;
    let mosaics_count = reader.u8("mosaics count")?;
    reader.reserved_u32("transfer reserved")?;
    reader.reserved_u8("transfer reserved")?;
    let mosaics = read_list(mosaics_count, || read_mosaic(reader))?;
    let message = Message::from_bytes(reader.bytes("message", usize::from(message_size))?);
    Ok(TransferBody {
        recipient,
        mosaics,
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::PublicKey;
    use crate::identity::{Address, MosaicId, NamespaceId};
    use crate::transaction::Mosaic;

    fn recipient() -> Address {
        Address::from_public_key(&PublicKey::from_bytes([3; 32]), NetworkType::TestNet)
    }

    fn encode(body: &TransferBody) -> Result<BytesMut, CodecError> {
        let mut out = BytesMut::new();
        encode_transfer(body, NetworkType::TestNet, &mut out)?;
        Ok(out)
    }

    #[test]
    fn mosaics_are_written_in_ascending_id_order() {
        let body = TransferBody {
            recipient: recipient().into(),
            mosaics: vec![
                Mosaic::new(MosaicId::new(0x30).unwrap(), 3),
                Mosaic::new(NamespaceId::from_name("cat").unwrap(), 1),
                Mosaic::new(MosaicId::new(0x10).unwrap(), 1),
            ],
            message: None,
        };
        let bytes = encode(&body).unwrap();
        assert_eq!(bytes.len(), 32 + 3 * 16);

        let decoded = decode_transfer(&mut Reader::new(&bytes), NetworkType::TestNet).unwrap();
        let ids: Vec<u64> = decoded.mosaics.iter().map(|m| m.id.raw()).collect();
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        assert_eq!(ids, sorted);
        // The namespace alias has bit 63 set, so it sorts last.
        assert_eq!(ids[0], 0x10);
    }

    #[test]
    fn message_size_counts_the_type_byte() {
        let body = TransferBody {
            recipient: recipient().into(),
            mosaics: vec![],
            message: Some(Message::plain("hi")),
        };
        let bytes = encode(&body).unwrap();
        assert_eq!(&bytes[24..26], &[3, 0]);
        assert_eq!(&bytes[32..], b"\x00hi");

        let decoded = decode_transfer(&mut Reader::new(&bytes), NetworkType::TestNet).unwrap();
        assert_eq!(decoded, body);
    }

    #[test]
    fn raw_message_is_kept_whole() {
        let body = TransferBody {
            recipient: recipient().into(),
            mosaics: vec![],
            message: Some(Message::Raw(vec![0x42, 0x43])),
        };
        let bytes = encode(&body).unwrap();
        assert_eq!(&bytes[32..], &[0x42, 0x43]);
        let decoded = decode_transfer(&mut Reader::new(&bytes), NetworkType::TestNet).unwrap();
        assert_eq!(decoded, body);
    }

    #[test]
    fn ambiguous_raw_message_is_refused() {
        let body = TransferBody {
            recipient: recipient().into(),
            mosaics: vec![],
            message: Some(Message::Raw(vec![0x00, 0x01])),
        };
        assert!(matches!(encode(&body), Err(CodecError::Precondition(_))));
    }

    #[test]
    fn too_many_mosaics_is_a_precondition_failure() {
        let body = TransferBody {
            recipient: recipient().into(),
            mosaics: vec![Mosaic::new(MosaicId::new(1).unwrap(), 1); 256],
            message: None,
        };
        assert!(matches!(encode(&body), Err(CodecError::Precondition(_))));
    }

    #[test]
    fn nonzero_reserved_byte_is_malformed() {
        let body = TransferBody {
            recipient: recipient().into(),
            mosaics: vec![],
            message: None,
        };
        let mut bytes = encode(&body).unwrap();
        bytes[31] = 1;
        let err = decode_transfer(&mut Reader::new(&bytes), NetworkType::TestNet).unwrap_err();
        assert!(matches!(err, CodecError::Malformed(_)));
    }

    #[test]
    fn short_message_is_truncated() {
        let body = TransferBody {
            recipient: recipient().into(),
            mosaics: vec![],
            message: Some(Message::plain("hello")),
        };
        let bytes = encode(&body).unwrap();
        let err = decode_transfer(&mut Reader::new(&bytes[..bytes.len() - 1]), NetworkType::TestNet)
            .unwrap_err();
        assert!(matches!(err, CodecError::Truncated { field: "message", .. }));
    }
}
