// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Bounds-checked forward-only reader over a byte slice.
//!
//! Exact reads either consume the full field or leave the offset untouched,
//! best-effort reads consume whatever is available.

use byteorder::{BigEndian, ByteOrder, LittleEndian};

use crate::apdu::address::{Address, ADDRESS_LEN};

/// Byte order for integer reads
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Endianness {
    Big,
    Little,
}

/// Insufficient bytes remaining for an exact read
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct ShortRead;

/// Saved cursor offset, see [`Cursor::checkpoint`] and [`Cursor::rewind`]
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Checkpoint(usize);

/// Forward-only reader, never reads beyond the end of the underlying buffer
#[derive(Clone, Debug)]
pub struct Cursor<'a> {
    buff: &'a [u8],
    offset: usize,
}

impl<'a> Cursor<'a> {
    /// Create a new cursor at the start of the provided buffer
    pub const fn new(buff: &'a [u8]) -> Self {
        Self { buff, offset: 0 }
    }

    /// Current read offset
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Number of bytes remaining
    pub fn remaining(&self) -> usize {
        self.buff.len() - self.offset
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Save the current offset
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint(self.offset)
    }

    /// Restore a previously saved offset
    pub fn rewind(&mut self, c: Checkpoint) {
        debug_assert!(c.0 <= self.buff.len());
        self.offset = c.0;
    }

    /// Number of bytes consumed since the provided checkpoint
    pub fn consumed_since(&self, c: Checkpoint) -> usize {
        self.offset - c.0
    }

    /// Read exactly `n` bytes, advancing only on success
    pub fn read_exact(&mut self, n: usize) -> Result<&'a [u8], ShortRead> {
        if n > self.remaining() {
            return Err(ShortRead);
        }

        let d = &self.buff[self.offset..][..n];
        self.offset += n;

        Ok(d)
    }

    /// Read a fixed-size array
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], ShortRead> {
        let d = self.read_exact(N)?;

        let mut a = [0u8; N];
        a.copy_from_slice(d);

        Ok(a)
    }

    pub fn read_u8(&mut self) -> Result<u8, ShortRead> {
        self.read_exact(1).map(|d| d[0])
    }

    pub fn read_u32(&mut self, e: Endianness) -> Result<u32, ShortRead> {
        let d = self.read_exact(4)?;

        Ok(match e {
            Endianness::Big => BigEndian::read_u32(d),
            Endianness::Little => LittleEndian::read_u32(d),
        })
    }

    pub fn read_u64(&mut self, e: Endianness) -> Result<u64, ShortRead> {
        let d = self.read_exact(8)?;

        Ok(match e {
            Endianness::Big => BigEndian::read_u64(d),
            Endianness::Little => LittleEndian::read_u64(d),
        })
    }

    /// Read a 21-byte [`Address`]
    pub fn read_address(&mut self) -> Result<Address, ShortRead> {
        self.read_array::<ADDRESS_LEN>().map(Address::new)
    }

    /// Copy up to `out.len()` bytes, returning the number of bytes read.
    ///
    /// Not suitable for authoritative field decoding.
    pub fn read_best_effort(&mut self, out: &mut [u8]) -> usize {
        let n = out.len().min(self.remaining());

        out[..n].copy_from_slice(&self.buff[self.offset..][..n]);
        self.offset += n;

        n
    }

    /// Advance by up to `n` bytes, returning the number of bytes skipped
    pub fn skip_up_to(&mut self, n: usize) -> usize {
        let n = n.min(self.remaining());
        self.offset += n;
        n
    }
}
