// Copyright (c) 2022-2023 The MobileCoin Foundation

//! RPC decoding for well-known contracts.
//!
//! MPC token transfers are encoded as:
//!
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |   SHORTNAME   |           RECIPIENT (21 bytes)                /
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! /               |          AMOUNT (u64, BE)                     /
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! /               |   MEMO (none / u64 BE / u32 BE len + bytes)   /
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```

use heapless::Vec;
use num_enum::TryFromPrimitive;

use super::{Memo, MpcTransfer, MEMO_MAX_LEN};
use crate::{
    cursor::{Cursor, Endianness},
    well_known::*,
    Address,
};

/// RPC decoding failures, recorded against generic transactions
#[derive(Copy, Clone, PartialEq, Eq, Debug, TryFromPrimitive)]
#[cfg_attr(feature = "thiserror", derive(thiserror::Error))]
#[repr(u8)]
pub enum RpcError {
    /// Contract has no known RPC format
    #[cfg_attr(feature = "thiserror", error("unknown contract address"))]
    AddressUnknown = 0x01,

    #[cfg_attr(feature = "thiserror", error("missing shortname"))]
    Shortname = 0x02,

    #[cfg_attr(feature = "thiserror", error("unknown shortname"))]
    ShortnameUnknown = 0x03,

    #[cfg_attr(feature = "thiserror", error("invalid transfer recipient"))]
    MpcRecipient = 0x04,

    #[cfg_attr(feature = "thiserror", error("invalid transfer amount"))]
    MpcTokenAmount = 0x05,

    /// Memo truncated or exceeding [`MEMO_MAX_LEN`]
    #[cfg_attr(feature = "thiserror", error("invalid memo"))]
    Memo = 0x06,

    /// Decoded RPC length does not match the declared length
    #[cfg_attr(feature = "thiserror", error("RPC length mismatch"))]
    Length = 0x07,
}

/// Decode an RPC addressed to `contract_address`.
///
/// Reads are not undone on failure, callers rewind the cursor
/// where required.
#[cfg_attr(feature = "noinline", inline(never))]
pub fn decode_rpc(c: &mut Cursor, contract_address: &Address) -> Result<MpcTransfer, RpcError> {
    if contract_address != &MPC_TOKEN_ADDRESS {
        return Err(RpcError::AddressUnknown);
    }

    let shortname = c.read_u8().map_err(|_| RpcError::Shortname)?;

    match shortname {
        MPC_TOKEN_SHORTNAME_TRANSFER
        | MPC_TOKEN_SHORTNAME_TRANSFER_MEMO_SMALL
        | MPC_TOKEN_SHORTNAME_TRANSFER_MEMO_LARGE => (),
        _ => return Err(RpcError::ShortnameUnknown),
    }

    let recipient = c.read_address().map_err(|_| RpcError::MpcRecipient)?;
    let token_amount_scaled = c
        .read_u64(Endianness::Big)
        .map_err(|_| RpcError::MpcTokenAmount)?;

    let memo = match shortname {
        MPC_TOKEN_SHORTNAME_TRANSFER_MEMO_SMALL => {
            Memo::U64(c.read_u64(Endianness::Big).map_err(|_| RpcError::Memo)?)
        }
        MPC_TOKEN_SHORTNAME_TRANSFER_MEMO_LARGE => decode_text_memo(c)?,
        _ => Memo::None,
    };

    Ok(MpcTransfer {
        recipient,
        token_amount_scaled,
        memo,
    })
}

/// Decode a length-prefixed text memo
fn decode_text_memo(c: &mut Cursor) -> Result<Memo, RpcError> {
    let l = c.read_u32(Endianness::Big).map_err(|_| RpcError::Memo)? as usize;
    if l > MEMO_MAX_LEN {
        return Err(RpcError::Memo);
    }

    // Empty text memos are treated as no memo
    if l == 0 {
        return Ok(Memo::None);
    }

    let d = c.read_exact(l).map_err(|_| RpcError::Memo)?;

    Vec::from_slice(d)
        .map(Memo::Text)
        .map_err(|_| RpcError::Memo)
}

#[cfg(test)]
mod test {
    use super::*;

    const RECIPIENT: [u8; 21] = [
        0x00, 0xc3, 0x39, 0x97, 0x54, 0x4e, 0x31, 0x75, 0xd2, 0x66, 0xbd, 0x02, 0x24, 0x39, 0xb2,
        0x2c, 0xdb, 0x16, 0x50, 0x8c, 0x7a,
    ];

    fn transfer(shortname: u8, memo: &[u8]) -> std::vec::Vec<u8> {
        let mut v = std::vec![shortname];
        v.extend_from_slice(&RECIPIENT);
        v.extend_from_slice(&0x333u64.to_be_bytes());
        v.extend_from_slice(memo);
        v
    }

    #[test]
    fn decode_plain_transfer() {
        let rpc = transfer(MPC_TOKEN_SHORTNAME_TRANSFER, &[]);
        let mut c = Cursor::new(&rpc);

        let t = decode_rpc(&mut c, &MPC_TOKEN_ADDRESS).unwrap();

        assert_eq!(t.recipient, Address::new(RECIPIENT));
        assert_eq!(t.token_amount_scaled, 0x333);
        assert_eq!(t.memo, Memo::None);
        assert_eq!(c.offset(), 30);
    }

    #[test]
    fn decode_small_memo() {
        let rpc = transfer(
            MPC_TOKEN_SHORTNAME_TRANSFER_MEMO_SMALL,
            &0x9999u64.to_be_bytes(),
        );
        let mut c = Cursor::new(&rpc);

        let t = decode_rpc(&mut c, &MPC_TOKEN_ADDRESS).unwrap();

        assert_eq!(t.memo, Memo::U64(0x9999));
        assert_eq!(t.memo_length(), 8);
        assert_eq!(c.offset(), 38);
    }

    #[test]
    fn decode_large_memo() {
        let rpc = transfer(
            MPC_TOKEN_SHORTNAME_TRANSFER_MEMO_LARGE,
            &[0, 0, 0, 11, b'H', b'e', b'l', b'l', b'o', b' ', b'W', b'o', b'r', b'l', b'd'],
        );
        let mut c = Cursor::new(&rpc);

        let t = decode_rpc(&mut c, &MPC_TOKEN_ADDRESS).unwrap();

        assert_eq!(t.memo, Memo::Text(Vec::from_slice(b"Hello World").unwrap()));
        assert_eq!(t.memo_length(), 11);
        assert_eq!(c.offset(), 34 + 11);
    }

    #[test]
    fn decode_empty_large_memo() {
        let rpc = transfer(MPC_TOKEN_SHORTNAME_TRANSFER_MEMO_LARGE, &[0, 0, 0, 0]);
        let mut c = Cursor::new(&rpc);

        let t = decode_rpc(&mut c, &MPC_TOKEN_ADDRESS).unwrap();

        assert_eq!(t.memo, Memo::None);
        assert_eq!(t.memo_length(), 0);
        assert_eq!(c.offset(), 34);
    }

    #[test]
    fn decode_max_length_memo() {
        let mut memo = std::vec![0, 0, 0, MEMO_MAX_LEN as u8];
        memo.extend_from_slice(&[b'a'; MEMO_MAX_LEN]);

        let rpc = transfer(MPC_TOKEN_SHORTNAME_TRANSFER_MEMO_LARGE, &memo);
        let t = decode_rpc(&mut Cursor::new(&rpc), &MPC_TOKEN_ADDRESS).unwrap();

        assert_eq!(t.memo_length() as usize, MEMO_MAX_LEN);
    }

    #[test]
    fn reject_unknown_contract() {
        let rpc = transfer(MPC_TOKEN_SHORTNAME_TRANSFER, &[]);
        let mut c = Cursor::new(&rpc);

        let mut a = *MPC_TOKEN_ADDRESS.as_bytes();
        a[0] = 0x02;

        assert_eq!(
            decode_rpc(&mut c, &Address::new(a)),
            Err(RpcError::AddressUnknown)
        );
        assert_eq!(c.offset(), 0);
    }

    #[test]
    fn reject_unknown_shortname() {
        let rpc = transfer(0x42, &[]);
        let mut c = Cursor::new(&rpc);

        assert_eq!(
            decode_rpc(&mut c, &MPC_TOKEN_ADDRESS),
            Err(RpcError::ShortnameUnknown)
        );
        assert_eq!(c.offset(), 1);
    }

    #[test]
    fn reject_truncated_fields() {
        let rpc = transfer(MPC_TOKEN_SHORTNAME_TRANSFER_MEMO_SMALL, &[0x99; 8]);

        let tests = &[
            (0, RpcError::Shortname),
            (1, RpcError::MpcRecipient),
            (21, RpcError::MpcRecipient),
            (22, RpcError::MpcTokenAmount),
            (29, RpcError::MpcTokenAmount),
            (30, RpcError::Memo),
            (37, RpcError::Memo),
        ];

        for (n, e) in tests {
            let mut c = Cursor::new(&rpc[..*n]);
            assert_eq!(
                decode_rpc(&mut c, &MPC_TOKEN_ADDRESS),
                Err(*e),
                "truncated at {n}"
            );
        }
    }

    #[test]
    fn reject_oversized_memo() {
        let mut memo = std::vec![0, 0, 0, MEMO_MAX_LEN as u8 + 1];
        memo.extend_from_slice(&[b'a'; MEMO_MAX_LEN + 1]);

        let rpc = transfer(MPC_TOKEN_SHORTNAME_TRANSFER_MEMO_LARGE, &memo);
        assert_eq!(
            decode_rpc(&mut Cursor::new(&rpc), &MPC_TOKEN_ADDRESS),
            Err(RpcError::Memo)
        );
    }

    #[test]
    fn reject_short_memo_body() {
        let rpc = transfer(
            MPC_TOKEN_SHORTNAME_TRANSFER_MEMO_LARGE,
            &[0, 0, 0, 11, b'H', b'e', b'l', b'l', b'o'],
        );
        assert_eq!(
            decode_rpc(&mut Cursor::new(&rpc), &MPC_TOKEN_ADDRESS),
            Err(RpcError::Memo)
        );
    }

    #[test]
    fn error_codes() {
        assert_eq!(RpcError::try_from(0x03).ok(), Some(RpcError::ShortnameUnknown));
        assert!(RpcError::try_from(0x00).is_err());
    }
}
