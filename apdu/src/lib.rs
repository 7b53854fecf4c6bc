// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Protocol / APDU definitions for Partisia Blockchain app communication
//!
//! This module provides a protocol specification and reference implementation for communication
//! with Partisia Blockchain hardware wallets.
//!
//! All multi-byte fields are big-endian to match the transaction binary format used on chain,
//! so the host can forward transaction bytes without re-encoding.
//!
//! Transactions are signed via a sequence of [`Instruction::SignTx`] APDUs, the first carrying a
//! [`SignTxInit`][sign_tx::SignTxInit] (derivation path and chain id) and each subsequent APDU
//! carrying up to [`MAX_APDU_LEN`] bytes of the serialized transaction.

#![no_std]

use num_enum::TryFromPrimitive;
use strum::{Display, EnumIter, EnumString, EnumVariantNames};

pub use ledger_proto::{ApduError, ApduStatic};

pub mod address;
pub mod app_info;
pub mod chain_id;
pub mod path;
pub mod prelude;
pub mod sign_tx;
pub mod status;

/// Partisia Blockchain APDU Class
pub const PBC_APDU_CLA: u8 = 0xe0;

/// Maximum APDU payload length
pub const MAX_APDU_LEN: usize = 255;

/// P1 for the first chunk of a chunked request
pub const P1_FIRST_CHUNK: u8 = 0x00;
/// P1 for subsequent chunks of a chunked request
pub const P1_NOT_FIRST_CHUNK: u8 = 0x01;
/// P1 for requests returning data without confirmation
pub const P1_SILENT: u8 = 0x00;
/// P1 for requests requiring on-device confirmation
pub const P1_CONFIRM: u8 = 0x01;

/// P2 for the last chunk of a chunked request
pub const P2_LAST_CHUNK: u8 = 0x00;
/// P2 where more chunks are to follow
pub const P2_NOT_LAST_CHUNK: u8 = 0x80;

/// Partisia Blockchain APDU instruction codes
#[derive(
    Copy, Clone, Debug, PartialEq, EnumString, Display, EnumVariantNames, EnumIter, TryFromPrimitive,
)]
#[repr(u8)]
pub enum Instruction {
    /// Fetch application version
    GetVersion = 0x03,

    /// Fetch application name
    GetAppName = 0x04,

    /// Sign a (chunked) transaction
    SignTx = 0x06,

    /// Fetch (and optionally confirm) the address for a derivation path
    GetAddress = 0x07,
}

/// Instruction with P1 / P2 flags decoded
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Command {
    GetVersion,
    GetAppName,
    GetAddress { display: bool },
    SignTx { first: bool, more: bool },
}

impl Command {
    /// Parse and validate INS, P1 and P2 bytes of an incoming APDU header.
    ///
    /// The first chunk of a signing request must always be followed by
    /// transaction data, so `(P1_FIRST_CHUNK, P2_LAST_CHUNK)` is rejected.
    pub fn parse(cla: u8, ins: u8, p1: u8, p2: u8) -> Result<Self, status::StatusWord> {
        use status::StatusWord;

        if cla != PBC_APDU_CLA {
            return Err(StatusWord::ClaNotSupported);
        }

        let ins = Instruction::try_from(ins).map_err(|_| StatusWord::InsNotSupported)?;

        match (ins, p1, p2) {
            (Instruction::GetVersion, 0, 0) => Ok(Command::GetVersion),
            (Instruction::GetAppName, 0, 0) => Ok(Command::GetAppName),
            (Instruction::GetAddress, P1_SILENT | P1_CONFIRM, 0) => Ok(Command::GetAddress {
                display: p1 == P1_CONFIRM,
            }),
            (Instruction::SignTx, P1_FIRST_CHUNK, P2_NOT_LAST_CHUNK)
            | (Instruction::SignTx, P1_NOT_FIRST_CHUNK, P2_LAST_CHUNK | P2_NOT_LAST_CHUNK) => {
                Ok(Command::SignTx {
                    first: p1 == P1_FIRST_CHUNK,
                    more: p2 == P2_NOT_LAST_CHUNK,
                })
            }
            _ => Err(StatusWord::WrongP1P2),
        }
    }
}

#[cfg(test)]
pub(crate) mod test {
    use core::fmt::Debug;

    use encdec::{Decode, Encode};

    use super::*;

    /// Helper for APDU encode / decode tests
    pub fn encode_decode_apdu<'a, A>(buff: &'a mut [u8], apdu: &A) -> usize
    where
        A: Encode<Error = ApduError> + Decode<'a, Output = A, Error = ApduError> + PartialEq + Debug,
    {
        // Encode APDU
        let n = apdu.encode(buff).expect("encode failed");

        // Ensure encoded data fits maximum APDU payload
        assert!(
            n <= MAX_APDU_LEN,
            "encoded length {n} exceeds maximum APDU payload {MAX_APDU_LEN}"
        );

        // Check encoded length matches expected length
        let expected_n = apdu.encode_len().expect("get length failed");
        assert_eq!(n, expected_n, "encode length mismatch");

        // Decode APDU
        let (decoded, decoded_n) = A::decode(&buff[..n]).expect("decode failed");

        // Check decoded object and length match
        assert_eq!(apdu, &decoded);
        assert_eq!(expected_n, decoded_n);

        n
    }

    #[test]
    fn parse_commands() {
        let tests = &[
            ((0xe0, 0x03, 0x00, 0x00), Ok(Command::GetVersion)),
            ((0xe0, 0x04, 0x00, 0x00), Ok(Command::GetAppName)),
            (
                (0xe0, 0x07, 0x01, 0x00),
                Ok(Command::GetAddress { display: true }),
            ),
            (
                (0xe0, 0x06, 0x00, 0x80),
                Ok(Command::SignTx {
                    first: true,
                    more: true,
                }),
            ),
            (
                (0xe0, 0x06, 0x01, 0x00),
                Ok(Command::SignTx {
                    first: false,
                    more: false,
                }),
            ),
            ((0xe0, 0x06, 0x00, 0x00), Err(status::StatusWord::WrongP1P2)),
            ((0xe0, 0x06, 0x02, 0x80), Err(status::StatusWord::WrongP1P2)),
            ((0xe0, 0x03, 0x01, 0x00), Err(status::StatusWord::WrongP1P2)),
            ((0xe0, 0x42, 0x00, 0x00), Err(status::StatusWord::InsNotSupported)),
            ((0xab, 0x03, 0x00, 0x00), Err(status::StatusWord::ClaNotSupported)),
        ];

        for ((cla, ins, p1, p2), expected) in tests {
            assert_eq!(
                &Command::parse(*cla, *ins, *p1, *p2),
                expected,
                "cla: {cla:02x} ins: {ins:02x} p1: {p1:02x} p2: {p2:02x}"
            );
        }
    }
}
