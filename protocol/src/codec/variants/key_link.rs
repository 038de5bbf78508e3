//! Key link bodies.
//!
//! Account, node and VRF links share one layout (linked key, action) and
//! one pair of functions; only the type code differs. Voting links add an
//! epoch range.

use bytes::{BufMut, BytesMut};

use super::read_enum;
use crate::codec::{CodecError, Reader};
use crate::crypto::PublicKey;
use crate::identity::NetworkType;
use crate::transaction::{KeyLinkBody, LinkAction, VotingKeyLinkBody};

body_codec!(
    /// Account (remote harvesting) key link, version 1.
    ACCOUNT_KEY_LINK: AccountKeyLink => encode_key_link, decode_key_link
);

body_codec!(
    /// Node key link, version 1.
    NODE_KEY_LINK: NodeKeyLink => encode_key_link, decode_key_link
);

body_codec!(
    /// VRF key link, version 1.
    VRF_KEY_LINK: VrfKeyLink => encode_key_link, decode_key_link
);

body_codec!(
    /// Voting key link, version 1.
    VOTING_KEY_LINK: VotingKeyLink => encode_voting_key_link, decode_voting_key_link
);

fn encode_key_link(
    body: &KeyLinkBody,
    _network: NetworkType,
    out: &mut BytesMut,
) -> Result<(), CodecError> {
    out.put_slice(body.linked_public_key.as_bytes());
    out.put_u8(body.action.value());
    Ok(())
}

fn decode_key_link(reader: &mut Reader<'_>, _network: NetworkType) -> Result<KeyLinkBody, CodecError> {
    Ok(KeyLinkBody {
        linked_public_key: PublicKey::from_bytes(reader.array("linked public key")?),
        action: read_enum(reader, "link action", LinkAction::from_value)?,
    })
}

fn encode_voting_key_link(
    body: &VotingKeyLinkBody,
    _network: NetworkType,
    out: &mut BytesMut,
) -> Result<(), CodecError> {
    out.put_slice(body.linked_public_key.as_bytes());
    out.put_u32_le(body.start_epoch);
    out.put_u32_le(body.end_epoch);
    out.put_u8(body.action.value());
    Ok(())
}

fn decode_voting_key_link(
    reader: &mut Reader<'_>,
    _network: NetworkType,
) -> Result<VotingKeyLinkBody, CodecError> {
    Ok(VotingKeyLinkBody {
        linked_public_key: PublicKey::from_bytes(reader.array("voting public key")?),
        start_epoch: reader.u32("start epoch")?,
        end_epoch: reader.u32("end epoch")?,
        action: read_enum(reader, "link action", LinkAction::from_value)?,
    })
}
