// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Transaction signing APDUs.
//!
//! A signing request is a sequence of [`Instruction::SignTx`] APDUs, the first
//! ([`P1_FIRST_CHUNK`][crate::P1_FIRST_CHUNK]) carrying a [`SignTxInit`] and each
//! following APDU carrying a [`SignTxChunk`] of the serialized transaction.
//! The final chunk is flagged with [`P2_LAST_CHUNK`][crate::P2_LAST_CHUNK] and
//! answered (following user approval) with a [`SignatureResp`].

use encdec::{Decode, DecodeOwned, Encode};

use crate::{
    chain_id::ChainId, path::Bip32Path, ApduError, ApduStatic, Instruction, MAX_APDU_LEN,
    P1_FIRST_CHUNK, P1_NOT_FIRST_CHUNK, P2_LAST_CHUNK, P2_NOT_LAST_CHUNK, PBC_APDU_CLA,
};

/// Length of an encoded signature
pub const SIGNATURE_LEN: usize = 65;

/// First sign transaction APDU, sets the derivation path and chain id.
///
/// ## Encoding:
/// ```text
///  0                   1                   2                   3
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |   PATH_LEN    |          PATH (4 * PATH_LEN bytes)            /
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// /               |        CHAIN_ID_LEN (u32, big-endian)         /
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// /               |      CHAIN_ID (CHAIN_ID_LEN bytes)            /
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
#[derive(Clone, PartialEq, Debug)]
pub struct SignTxInit {
    /// BIP-0032 derivation path for the signing key
    pub path: Bip32Path,
    /// Chain the transaction is bound to
    pub chain_id: ChainId,
}

impl SignTxInit {
    /// Create a new [`SignTxInit`] APDU
    pub fn new(path: Bip32Path, chain_id: ChainId) -> Self {
        Self { path, chain_id }
    }

    /// P1 for the initial chunk
    pub const fn p1(&self) -> u8 {
        P1_FIRST_CHUNK
    }

    /// P2 for the initial chunk, transaction data always follows
    pub const fn p2(&self) -> u8 {
        P2_NOT_LAST_CHUNK
    }
}

impl ApduStatic for SignTxInit {
    const CLA: u8 = PBC_APDU_CLA;
    const INS: u8 = Instruction::SignTx as u8;
}

impl Encode for SignTxInit {
    type Error = ApduError;

    fn encode_len(&self) -> Result<usize, ApduError> {
        Ok(self.path.encode_len()? + self.chain_id.encode_len()?)
    }

    fn encode(&self, buff: &mut [u8]) -> Result<usize, ApduError> {
        let mut index = 0;

        index += self.path.encode(&mut buff[index..])?;
        index += self.chain_id.encode(&mut buff[index..])?;

        Ok(index)
    }
}

impl DecodeOwned for SignTxInit {
    type Output = Self;
    type Error = ApduError;

    fn decode_owned(buff: &[u8]) -> Result<(Self::Output, usize), ApduError> {
        let mut index = 0;

        let (path, n) = Bip32Path::decode_owned(&buff[index..])?;
        index += n;

        let (chain_id, n) = ChainId::decode_owned(&buff[index..])?;
        index += n;

        Ok((Self { path, chain_id }, index))
    }
}

/// Sign transaction data APDU, carrying up to [`MAX_APDU_LEN`] bytes of the
/// serialized transaction.
///
/// Chunk boundaries are arbitrary and need not align with transaction fields.
#[derive(Clone, PartialEq, Debug)]
pub struct SignTxChunk<'a> {
    /// Transaction bytes
    pub data: &'a [u8],
    /// Indicates further chunks follow
    pub more: bool,
}

impl<'a> SignTxChunk<'a> {
    /// Create a new [`SignTxChunk`] APDU
    pub fn new(data: &'a [u8], more: bool) -> Self {
        Self { data, more }
    }

    /// P1 for data chunks
    pub const fn p1(&self) -> u8 {
        P1_NOT_FIRST_CHUNK
    }

    /// P2 signalling whether more chunks follow
    pub const fn p2(&self) -> u8 {
        match self.more {
            true => P2_NOT_LAST_CHUNK,
            false => P2_LAST_CHUNK,
        }
    }
}

impl<'a> ApduStatic for SignTxChunk<'a> {
    const CLA: u8 = PBC_APDU_CLA;
    const INS: u8 = Instruction::SignTx as u8;
}

impl<'a> Encode for SignTxChunk<'a> {
    type Error = ApduError;

    fn encode_len(&self) -> Result<usize, ApduError> {
        Ok(self.data.len())
    }

    fn encode(&self, buff: &mut [u8]) -> Result<usize, ApduError> {
        let n = self.data.len();
        if n > MAX_APDU_LEN || buff.len() < n {
            return Err(ApduError::InvalidLength);
        }

        buff[..n].copy_from_slice(self.data);

        Ok(n)
    }
}

/// Data chunks are decoded as the final chunk, `more` is conveyed by P2
/// and must be set by the caller.
impl<'a> Decode<'a> for SignTxChunk<'a> {
    type Output = Self;
    type Error = ApduError;

    fn decode(buff: &'a [u8]) -> Result<(Self::Output, usize), ApduError> {
        if buff.is_empty() || buff.len() > MAX_APDU_LEN {
            return Err(ApduError::InvalidLength);
        }

        Ok((
            Self {
                data: buff,
                more: false,
            },
            buff.len(),
        ))
    }
}

/// Transaction signature response APDU
///
/// ## Encoding:
/// ```text
///  0                   1                   2                   3
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |  RECOVERY_ID  |               R (32 bytes)                    /
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// /               |               S (32 bytes)                    /
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// /               |
/// +-+-+-+-+-+-+-+-+
/// ```
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct SignatureResp {
    pub recovery_id: u8,
    pub r: [u8; 32],
    pub s: [u8; 32],
}

impl SignatureResp {
    /// Create a new [`SignatureResp`] APDU
    pub fn new(recovery_id: u8, r: [u8; 32], s: [u8; 32]) -> Self {
        Self { recovery_id, r, s }
    }
}

impl Encode for SignatureResp {
    type Error = ApduError;

    fn encode_len(&self) -> Result<usize, ApduError> {
        Ok(SIGNATURE_LEN)
    }

    fn encode(&self, buff: &mut [u8]) -> Result<usize, ApduError> {
        if buff.len() < SIGNATURE_LEN {
            return Err(ApduError::InvalidLength);
        }

        buff[0] = self.recovery_id;
        buff[1..33].copy_from_slice(&self.r);
        buff[33..65].copy_from_slice(&self.s);

        Ok(SIGNATURE_LEN)
    }
}

impl DecodeOwned for SignatureResp {
    type Output = Self;
    type Error = ApduError;

    fn decode_owned(buff: &[u8]) -> Result<(Self::Output, usize), ApduError> {
        if buff.len() < SIGNATURE_LEN {
            return Err(ApduError::InvalidLength);
        }

        let mut r = [0u8; 32];
        r.copy_from_slice(&buff[1..33]);

        let mut s = [0u8; 32];
        s.copy_from_slice(&buff[33..65]);

        Ok((
            Self {
                recovery_id: buff[0],
                r,
                s,
            },
            SIGNATURE_LEN,
        ))
    }
}

#[cfg(test)]
mod test {
    use rand::random;

    use super::*;
    use crate::test::encode_decode_apdu;

    #[test]
    fn encode_decode_sign_tx_init() {
        let apdu = SignTxInit::new(
            Bip32Path::account(random()),
            ChainId::new(b"Partisia Blockchain Testnet").unwrap(),
        );

        let mut buff = [0u8; 128];
        let n = encode_decode_apdu(&mut buff, &apdu);

        assert_eq!(n, 21 + 4 + 27);
        assert_eq!(apdu.p1(), 0x00);
        assert_eq!(apdu.p2(), 0x80);
    }

    #[test]
    fn encode_decode_sign_tx_chunk() {
        let data: [u8; 200] = core::array::from_fn(|_| random());
        let apdu = SignTxChunk::new(&data, false);

        let mut buff = [0u8; 256];
        let n = encode_decode_apdu(&mut buff, &apdu);
        assert_eq!(n, data.len());

        assert_eq!(SignTxChunk::new(&data, true).p2(), P2_NOT_LAST_CHUNK);
        assert_eq!(apdu.p2(), P2_LAST_CHUNK);
    }

    #[test]
    fn reject_oversized_chunk() {
        let data = [0u8; MAX_APDU_LEN + 1];

        let mut buff = [0u8; 512];
        assert!(matches!(
            SignTxChunk::new(&data, false).encode(&mut buff),
            Err(ApduError::InvalidLength)
        ));
        assert!(matches!(
            SignTxChunk::decode(&data),
            Err(ApduError::InvalidLength)
        ));
    }

    #[test]
    fn encode_decode_signature() {
        let apdu = SignatureResp::new(random(), random(), random());

        let mut buff = [0u8; 128];
        let n = encode_decode_apdu(&mut buff, &apdu);

        assert_eq!(n, SIGNATURE_LEN);
        assert_eq!(buff[0], apdu.recovery_id);
        assert_eq!(&buff[33..65], &apdu.s);
    }
}
