//! Fixed-width little-endian primitives.
//!
//! Writing goes straight through [`bytes::BufMut`] (`put_u32_le` and
//! friends). Reading goes through [`Reader`], which checks the remaining
//! length before every access: `Buf` itself panics on short input, and a
//! short payload must surface as [`CodecError::Truncated`] naming the field.

use bytes::Buf;

use super::error::CodecError;

/// A bounds-checked cursor over an encoded payload.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    buf: &'a [u8],
}

impl<'a> Reader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf }
    }

    /// Bytes left to read.
    pub fn remaining(&self) -> usize {
        self.buf.remaining()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    fn need(&self, field: &'static str, needed: usize) -> Result<(), CodecError> {
        if self.buf.remaining() < needed {
            return Err(CodecError::Truncated {
                field,
                needed,
                available: self.buf.remaining(),
            });
        }
        Ok(())
    }

    pub fn u8(&mut self, field: &'static str) -> Result<u8, CodecError> {
        self.need(field, 1)?;
        Ok(self.buf.get_u8())
    }

    pub fn i8(&mut self, field: &'static str) -> Result<i8, CodecError> {
        self.need(field, 1)?;
        Ok(self.buf.get_i8())
    }

    pub fn u16(&mut self, field: &'static str) -> Result<u16, CodecError> {
        self.need(field, 2)?;
        Ok(self.buf.get_u16_le())
    }

    pub fn i16(&mut self, field: &'static str) -> Result<i16, CodecError> {
        self.need(field, 2)?;
        Ok(self.buf.get_i16_le())
    }

    pub fn u32(&mut self, field: &'static str) -> Result<u32, CodecError> {
        self.need(field, 4)?;
        Ok(self.buf.get_u32_le())
    }

    pub fn u64(&mut self, field: &'static str) -> Result<u64, CodecError> {
        self.need(field, 8)?;
        Ok(self.buf.get_u64_le())
    }

    /// A fixed-size array such as a key, hash or signature.
    pub fn array<const N: usize>(&mut self, field: &'static str) -> Result<[u8; N], CodecError> {
        self.need(field, N)?;
        let mut out = [0u8; N];
        self.buf.copy_to_slice(&mut out);
        Ok(out)
    }

    /// Borrow the next `len` bytes.
    pub fn bytes(&mut self, field: &'static str, len: usize) -> Result<&'a [u8], CodecError> {
        self.need(field, len)?;
        let (head, tail) = self.buf.split_at(len);
        self.buf = tail;
        Ok(head)
    }

    /// Split off the next `len` bytes as an independent reader.
    pub fn sub_reader(&mut self, field: &'static str, len: usize) -> Result<Reader<'a>, CodecError> {
        self.bytes(field, len).map(Reader::new)
    }

    /// Take everything that is left.
    pub fn rest(&mut self) -> &'a [u8] {
        let rest = self.buf;
        self.buf = &[];
        rest
    }

    /// A reserved u32 that must be zero, so re-encoding reproduces the input.
    pub fn reserved_u32(&mut self, field: &'static str) -> Result<(), CodecError> {
        match self.u32(field)? {
            0 => Ok(()),
            other => Err(CodecError::Malformed(format!("{field} must be zero, found {other}"))),
        }
    }

    /// A reserved u8 that must be zero.
    pub fn reserved_u8(&mut self, field: &'static str) -> Result<(), CodecError> {
        match self.u8(field)? {
            0 => Ok(()),
            other => Err(CodecError::Malformed(format!("{field} must be zero, found {other}"))),
        }
    }

    /// Fail unless every byte was consumed.
    pub fn finish(self, context: &'static str) -> Result<(), CodecError> {
        if self.buf.is_empty() {
            Ok(())
        } else {
            Err(CodecError::Malformed(format!(
                "{context}: {} unexpected trailing bytes",
                self.buf.len()
            )))
        }
    }
}

/// A list length that must fit the u8 count field in front of it.
pub(crate) fn count_u8(field: &'static str, len: usize) -> Result<u8, CodecError> {
    u8::try_from(len)
        .map_err(|_| CodecError::Precondition(format!("{field}: {len} entries exceed 255")))
}

/// A byte length that must fit a u16 size field.
pub(crate) fn len_u16(field: &'static str, len: usize) -> Result<u16, CodecError> {
    u16::try_from(len)
        .map_err(|_| CodecError::Precondition(format!("{field}: {len} bytes exceed 65535")))
}

/// A byte length that must fit a u32 size field.
pub(crate) fn len_u32(field: &'static str, len: usize) -> Result<u32, CodecError> {
    u32::try_from(len)
        .map_err(|_| CodecError::Precondition(format!("{field}: {len} bytes exceed u32")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_little_endian() {
        let data = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0A, 0x0B, 0xFF];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.u16("a").unwrap(), 0x0201);
        assert_eq!(reader.u32("b").unwrap(), 0x0605_0403);
        assert_eq!(reader.array::<2>("c").unwrap(), [0x07, 0x08]);
        assert_eq!(reader.bytes("d", 3).unwrap(), &[0x09, 0x0A, 0x0B]);
        assert_eq!(reader.i8("e").unwrap(), -1);
        assert!(reader.finish("test").is_ok());
    }

    #[test]
    fn short_read_names_the_field() {
        let mut reader = Reader::new(&[0x01, 0x02]);
        assert_eq!(
            reader.u64("max fee").unwrap_err(),
            CodecError::Truncated { field: "max fee", needed: 8, available: 2 }
        );
        // A failed read consumes nothing.
        assert_eq!(reader.remaining(), 2);
    }

    #[test]
    fn reserved_fields_must_be_zero() {
        let mut reader = Reader::new(&[0, 0, 0, 0, 1]);
        assert!(reader.reserved_u32("reserved").is_ok());
        assert!(matches!(reader.reserved_u8("reserved"), Err(CodecError::Malformed(_))));
    }

    #[test]
    fn finish_rejects_leftovers() {
        let mut reader = Reader::new(&[1, 2, 3]);
        reader.u8("x").unwrap();
        assert!(matches!(reader.finish("body"), Err(CodecError::Malformed(_))));
    }

    #[test]
    fn sub_reader_is_bounded() {
        let mut reader = Reader::new(&[1, 2, 3, 4]);
        let mut sub = reader.sub_reader("inner", 2).unwrap();
        assert_eq!(sub.u16("x").unwrap(), 0x0201);
        assert!(sub.u8("y").is_err());
        assert_eq!(reader.remaining(), 2);
    }

    #[test]
    fn length_guards() {
        assert_eq!(count_u8("mosaics", 255).unwrap(), 255);
        assert!(matches!(count_u8("mosaics", 256), Err(CodecError::Precondition(_))));
        assert!(len_u16("message", 70_000).is_err());
    }
}
