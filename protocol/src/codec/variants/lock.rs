//! Hash lock, secret lock and secret proof bodies.

use bytes::{BufMut, BytesMut};

use super::read_enum;
use crate::codec::identifiers::{put_mosaic, put_unresolved_address, read_mosaic, read_unresolved_address};
use crate::codec::primitives::len_u16;
use crate::codec::{CodecError, Reader};
use crate::crypto::Hash256;
use crate::identity::NetworkType;
use crate::transaction::{HashLockBody, LockHashAlgorithm, SecretLockBody, SecretProofBody};

body_codec!(
    /// Hash lock, version 1: mosaic, duration, aggregate hash.
    HASH_LOCK: HashLock => encode_hash_lock, decode_hash_lock
);

body_codec!(
    /// Secret lock, version 1.
    SECRET_LOCK: SecretLock => encode_secret_lock, decode_secret_lock
);

body_codec!(
    /// Secret proof, version 1.
    SECRET_PROOF: SecretProof => encode_secret_proof, decode_secret_proof
);

fn encode_hash_lock(
    body: &HashLockBody,
    _network: NetworkType,
    out: &mut BytesMut,
) -> Result<(), CodecError> {
    put_mosaic(out, &body.mosaic);
    out.put_u64_le(body.duration);
    out.put_slice(body.hash.as_bytes());
    Ok(())
}

fn decode_hash_lock(reader: &mut Reader<'_>, _network: NetworkType) -> Result<HashLockBody, CodecError> {
    Ok(HashLockBody {
        mosaic: read_mosaic(reader)?,
        duration: reader.u64("lock duration")?,
        hash: Hash256::from_bytes(reader.array("locked hash")?),
    })
}

// recipient (24) | secret (32) | mosaic (16) | duration u64 | algorithm u8
fn encode_secret_lock(
    body: &SecretLockBody,
    network: NetworkType,
    out: &mut BytesMut,
) -> Result<(), CodecError> {
    put_unresolved_address(out, &body.recipient, network);
    out.put_slice(body.secret.as_bytes());
    put_mosaic(out, &body.mosaic);
    out.put_u64_le(body.duration);
    out.put_u8(body.hash_algorithm.value());
    Ok(())
}

fn decode_secret_lock(reader: &mut Reader<'_>, network: NetworkType) -> Result<SecretLockBody, CodecError> {
    Ok(SecretLockBody {
        recipient: read_unresolved_address(reader, "lock recipient", network)?,
        secret: Hash256::from_bytes(reader.array("secret")?),
        mosaic: read_mosaic(reader)?,
        duration: reader.u64("lock duration")?,
        hash_algorithm: read_enum(reader, "lock hash algorithm", LockHashAlgorithm::from_value)?,
    })
}

// recipient (24) | secret (32) | proof size u16 | algorithm u8 | proof
fn encode_secret_proof(
    body: &SecretProofBody,
    network: NetworkType,
    out: &mut BytesMut,
) -> Result<(), CodecError> {
    let proof_size = len_u16("proof", body.proof.len())?;
    put_unresolved_address(out, &body.recipient, network);
    out.put_slice(body.secret.as_bytes());
    out.put_u16_le(proof_size);
    out.put_u8(body.hash_algorithm.value());
    out.put_slice(&body.proof);
    Ok(())
}

fn decode_secret_proof(reader: &mut Reader<'_>, network: NetworkType) -> Result<SecretProofBody, CodecError> {
    let recipient = read_unresolved_address(reader, "proof recipient", network)?;
    let secret = Hash256::from_bytes(reader.array("secret")?);
    let proof_size = reader.u16("proof size")?;
    let hash_algorithm = read_enum(reader, "lock hash algorithm", LockHashAlgorithm::from_value)?;
    let proof = reader.bytes("proof", usize::from(proof_size))?.to_vec();
    Ok(SecretProofBody {
        recipient,
        secret,
        hash_algorithm,
        proof,
    })
}
