//! Multisig account modification body.
//!
//! ```text
//! min removal delta i8 | min approval delta i8 | additions u8 | deletions u8
//! reserved u32 | additions (24 each) | deletions (24 each)
//! ```

use bytes::{BufMut, BytesMut};

use super::read_list;
use crate::codec::identifiers::{put_unresolved_address, read_unresolved_address};
use crate::codec::primitives::count_u8;
use crate::codec::{CodecError, Reader};
use crate::identity::NetworkType;
use crate::transaction::MultisigAccountModificationBody;

body_codec!(
    /// Multisig account modification, version 1.
    MULTISIG_ACCOUNT_MODIFICATION: MultisigAccountModification => encode_modification, decode_modification
);

fn encode_modification(
    body: &MultisigAccountModificationBody,
    network: NetworkType,
    out: &mut BytesMut,
) -> Result<(), CodecError> {
    let additions = count_u8("cosignatory additions", body.address_additions.len())?;
    let deletions = count_u8("cosignatory deletions", body.address_deletions.len())?;
    out.put_i8(body.min_removal_delta);
    out.put_i8(body.min_approval_delta);
    out.put_u8(additions);
    out.put_u8(deletions);
    out.put_u32_le(0);
    for address in body.address_additions.iter().chain(&body.address_deletions) {
        put_unresolved_address(out, address, network);
    }
    Ok(())
}

fn decode_modification(
    reader: &mut Reader<'_>,
    network: NetworkType,
) -> Result<MultisigAccountModificationBody, CodecError> {
    let min_removal_delta = reader.i8("min removal delta")?;
    let min_approval_delta = reader.i8("min approval delta")?;
    let additions = reader.u8("additions count")?;
    let deletions = reader.u8("deletions count")?;
    reader.reserved_u32("multisig reserved")?;
    let address_additions = read_list(additions, || read_unresolved_address(reader, "cosignatory", network))?;
    let address_deletions = read_list(deletions, || read_unresolved_address(reader, "cosignatory", network))?;
    Ok(MultisigAccountModificationBody {
        min_removal_delta,
        min_approval_delta,
        address_additions,
        address_deletions,
    })
}
