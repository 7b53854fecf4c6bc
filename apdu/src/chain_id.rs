// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Chain identifiers, bound into every transaction hash

use byteorder::{BigEndian, ByteOrder};
use encdec::{DecodeOwned, Encode};
use heapless::Vec;

use crate::ApduError;

/// Maximum chain id length
pub const CHAIN_ID_MAX_LEN: usize = 27;

/// Chain identifier (eg. `Partisia Blockchain`), carried in the first
/// sign transaction chunk and appended to the signed hash.
///
/// ## Encoding:
/// ```text
///  0                   1                   2                   3
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                   CHAIN_ID_LEN (u32, big-endian)              |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// /                  CHAIN_ID (CHAIN_ID_LEN bytes)                /
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct ChainId(Vec<u8, CHAIN_ID_MAX_LEN>);

impl ChainId {
    /// Create a chain id, failing where the value exceeds [`CHAIN_ID_MAX_LEN`].
    ///
    /// Chain id failures are reported as [`ApduError::InvalidEncoding`] to
    /// distinguish them from other length errors in the same request.
    pub fn new(id: &[u8]) -> Result<Self, ApduError> {
        Vec::from_slice(id)
            .map(Self)
            .map_err(|_| ApduError::InvalidEncoding)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Big-endian length prefix, as hashed between the transaction and chain id
    pub fn len_prefix(&self) -> [u8; 4] {
        (self.0.len() as u32).to_be_bytes()
    }
}

impl AsRef<[u8]> for ChainId {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Encode for ChainId {
    type Error = ApduError;

    fn encode_len(&self) -> Result<usize, ApduError> {
        Ok(4 + self.0.len())
    }

    fn encode(&self, buff: &mut [u8]) -> Result<usize, ApduError> {
        let n = self.encode_len()?;
        if buff.len() < n {
            return Err(ApduError::InvalidLength);
        }

        BigEndian::write_u32(&mut buff[..4], self.0.len() as u32);
        buff[4..n].copy_from_slice(&self.0);

        Ok(n)
    }
}

impl DecodeOwned for ChainId {
    type Output = Self;
    type Error = ApduError;

    fn decode_owned(buff: &[u8]) -> Result<(Self::Output, usize), ApduError> {
        if buff.len() < 4 {
            return Err(ApduError::InvalidEncoding);
        }

        let l = BigEndian::read_u32(&buff[..4]) as usize;
        if l > CHAIN_ID_MAX_LEN || buff.len() < 4 + l {
            return Err(ApduError::InvalidEncoding);
        }

        let id = Self::new(&buff[4..][..l])?;

        Ok((id, 4 + l))
    }
}
