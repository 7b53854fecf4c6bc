// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Blockchain addresses and address APDUs

use encdec::{DecodeOwned, Encode};
use num_enum::TryFromPrimitive;
use sha2::{Digest, Sha256};
use strum::{Display, EnumIter, EnumString, EnumVariantNames};

use crate::{path::Bip32Path, ApduError, ApduStatic, Instruction, PBC_APDU_CLA};

/// Length of the address identifier (excluding type tag)
pub const IDENTIFIER_LEN: usize = 20;

/// Length of an encoded address
pub const ADDRESS_LEN: usize = IDENTIFIER_LEN + 1;

/// Length of an uncompressed secp256k1 public key
pub const PUBLIC_KEY_LEN: usize = 65;

/// Address kinds, encoded in the first byte of an [`Address`]
#[derive(
    Copy, Clone, PartialEq, Eq, Debug, EnumString, Display, EnumVariantNames, EnumIter, TryFromPrimitive,
)]
#[repr(u8)]
pub enum AddressType {
    Account = 0x00,
    ContractSystem = 0x01,
    ContractPublic = 0x02,
    ContractZk = 0x03,
    ContractGovernance = 0x04,
}

/// An address on the blockchain, a type tag followed by a 20-byte identifier.
///
/// Equality compares all 21 bytes, including the tag.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct Address([u8; ADDRESS_LEN]);

impl Address {
    /// All-zero account address
    pub const ZERO: Address = Address([0u8; ADDRESS_LEN]);

    /// Create an address from raw bytes
    pub const fn new(raw: [u8; ADDRESS_LEN]) -> Self {
        Self(raw)
    }

    /// Derive an account address from an uncompressed public key,
    /// `0x00 || SHA-256(public_key)[12..32]`
    pub fn from_public_key(public_key: &[u8; PUBLIC_KEY_LEN]) -> Self {
        let h = Sha256::digest(public_key);

        let mut raw = [0u8; ADDRESS_LEN];
        raw[0] = AddressType::Account as u8;
        raw[1..].copy_from_slice(&h[12..32]);

        Self(raw)
    }

    /// Address type, `None` for unrecognised tags
    pub fn kind(&self) -> Option<AddressType> {
        AddressType::try_from(self.0[0]).ok()
    }

    /// Identifier portion of the address
    pub fn identifier(&self) -> &[u8] {
        &self.0[1..]
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }
}

impl Default for Address {
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<[u8; ADDRESS_LEN]> for Address {
    fn from(raw: [u8; ADDRESS_LEN]) -> Self {
        Self(raw)
    }
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Debug format [Address] as hex
impl core::fmt::Debug for Address {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        for b in &self.0[..] {
            write!(f, "{b:02x}")?;
        }
        Ok(())
    }
}

/// Display [Address] as hex
impl core::fmt::Display for Address {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        for b in &self.0[..] {
            write!(f, "{b:02x}")?;
        }
        Ok(())
    }
}

impl Encode for Address {
    type Error = ApduError;

    fn encode_len(&self) -> Result<usize, ApduError> {
        Ok(ADDRESS_LEN)
    }

    fn encode(&self, buff: &mut [u8]) -> Result<usize, ApduError> {
        if buff.len() < ADDRESS_LEN {
            return Err(ApduError::InvalidLength);
        }

        buff[..ADDRESS_LEN].copy_from_slice(&self.0);

        Ok(ADDRESS_LEN)
    }
}

impl DecodeOwned for Address {
    type Output = Self;
    type Error = ApduError;

    fn decode_owned(buff: &[u8]) -> Result<(Self::Output, usize), ApduError> {
        if buff.len() < ADDRESS_LEN {
            return Err(ApduError::InvalidLength);
        }

        let mut raw = [0u8; ADDRESS_LEN];
        raw.copy_from_slice(&buff[..ADDRESS_LEN]);

        Ok((Self(raw), ADDRESS_LEN))
    }
}

/// Address request APDU, fetches the account address for a derivation path.
///
/// Set P1 to [`P1_CONFIRM`][crate::P1_CONFIRM] to require on-device confirmation.
///
/// ## Encoding:
/// ```text
///  0                   1                   2                   3
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |   PATH_LEN    |          PATH (4 * PATH_LEN bytes)            /
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
#[derive(Clone, PartialEq, Debug)]
pub struct AddressReq {
    /// BIP-0032 derivation path
    pub path: Bip32Path,
}

impl AddressReq {
    /// Create a new [`AddressReq`] APDU
    pub fn new(path: Bip32Path) -> Self {
        Self { path }
    }
}

impl ApduStatic for AddressReq {
    const CLA: u8 = PBC_APDU_CLA;
    const INS: u8 = Instruction::GetAddress as u8;
}

impl Encode for AddressReq {
    type Error = ApduError;

    fn encode_len(&self) -> Result<usize, ApduError> {
        self.path.encode_len()
    }

    fn encode(&self, buff: &mut [u8]) -> Result<usize, ApduError> {
        self.path.encode(buff)
    }
}

impl DecodeOwned for AddressReq {
    type Output = Self;
    type Error = ApduError;

    fn decode_owned(buff: &[u8]) -> Result<(Self::Output, usize), ApduError> {
        let (path, n) = Bip32Path::decode_owned(buff)?;
        Ok((Self { path }, n))
    }
}

/// Address response APDU, contains the 21-byte account address
#[derive(Clone, PartialEq, Debug)]
pub struct AddressResp {
    pub address: Address,
}

impl AddressResp {
    /// Create a new [`AddressResp`] APDU
    pub fn new(address: Address) -> Self {
        Self { address }
    }
}

impl Encode for AddressResp {
    type Error = ApduError;

    fn encode_len(&self) -> Result<usize, ApduError> {
        Ok(ADDRESS_LEN)
    }

    fn encode(&self, buff: &mut [u8]) -> Result<usize, ApduError> {
        self.address.encode(buff)
    }
}

impl DecodeOwned for AddressResp {
    type Output = Self;
    type Error = ApduError;

    fn decode_owned(buff: &[u8]) -> Result<(Self::Output, usize), ApduError> {
        let (address, n) = Address::decode_owned(buff)?;
        Ok((Self { address }, n))
    }
}
