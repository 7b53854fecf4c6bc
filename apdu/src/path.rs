// Copyright (c) 2022-2023 The MobileCoin Foundation

//! BIP-0032 derivation path encoding

use byteorder::{BigEndian, ByteOrder};
use encdec::{DecodeOwned, Encode};
use heapless::Vec;

use crate::ApduError;

/// Maximum number of BIP-0032 path components
pub const MAX_BIP32_PATH: usize = 10;

/// Number of components in an account path
pub const ACCOUNT_PATH_LEN: usize = 5;

const _: () = assert!(ACCOUNT_PATH_LEN <= MAX_BIP32_PATH);

/// Hardened derivation flag
pub const HARDENED: u32 = 0x8000_0000;

/// BIP-0032 derivation path.
///
/// ## Encoding:
/// ```text
///  0                   1                   2                   3
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |   PATH_LEN    |            PATH[0] (u32, big-endian)          /
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// /               |              ...  PATH[N-1]                   |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Bip32Path(Vec<u32, MAX_BIP32_PATH>);

impl Bip32Path {
    /// Create a path from the provided components,
    /// failing if more than [`MAX_BIP32_PATH`] components are provided
    pub fn new(components: &[u32]) -> Result<Self, ApduError> {
        Vec::from_slice(components)
            .map(Self)
            .map_err(|_| ApduError::InvalidLength)
    }

    /// Default account path for Partisia Blockchain (`m/44'/3757'/0'/0/0`)
    pub fn account(index: u32) -> Self {
        let c: [u32; ACCOUNT_PATH_LEN] = [44 | HARDENED, 3757 | HARDENED, HARDENED, 0, index];
        Self(Vec::from_slice(&c).unwrap_or_default())
    }

    /// Fetch path components
    pub fn components(&self) -> &[u32] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u32]> for Bip32Path {
    fn as_ref(&self) -> &[u32] {
        &self.0
    }
}

impl Encode for Bip32Path {
    type Error = ApduError;

    fn encode_len(&self) -> Result<usize, ApduError> {
        Ok(1 + self.0.len() * 4)
    }

    fn encode(&self, buff: &mut [u8]) -> Result<usize, ApduError> {
        let n = self.encode_len()?;
        if buff.len() < n {
            return Err(ApduError::InvalidLength);
        }

        buff[0] = self.0.len() as u8;
        for (i, c) in self.0.iter().enumerate() {
            BigEndian::write_u32(&mut buff[1 + i * 4..], *c);
        }

        Ok(n)
    }
}

impl DecodeOwned for Bip32Path {
    type Output = Self;
    type Error = ApduError;

    fn decode_owned(buff: &[u8]) -> Result<(Self::Output, usize), ApduError> {
        let l = *buff.first().ok_or(ApduError::InvalidLength)? as usize;
        if l > MAX_BIP32_PATH || buff.len() < 1 + l * 4 {
            return Err(ApduError::InvalidLength);
        }

        let mut v = Vec::new();
        for c in buff[1..][..l * 4].chunks_exact(4) {
            v.push(BigEndian::read_u32(c))
                .map_err(|_| ApduError::InvalidLength)?;
        }

        Ok((Self(v), 1 + l * 4))
    }
}
