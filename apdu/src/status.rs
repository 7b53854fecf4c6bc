// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Application status words, returned in the trailer of every response APDU

use num_enum::TryFromPrimitive;
use strum::{Display, EnumIter, EnumString, EnumVariantNames};

use crate::ApduError;

/// Status words returned by the application.
///
/// Per-field transaction parsing failures occupy `0xB101..=0xB105` so the
/// host can report which header field was malformed.
#[derive(
    Copy, Clone, PartialEq, Eq, Debug, EnumString, Display, EnumVariantNames, EnumIter, TryFromPrimitive,
)]
#[repr(u16)]
pub enum StatusWord {
    Ok = 0x9000,
    Deny = 0x6985,
    WrongP1P2 = 0x6A86,
    WrongDataLength = 0x6A87,
    InsNotSupported = 0x6D00,
    ClaNotSupported = 0x6E00,
    WrongResponseLength = 0xB000,
    DisplayAddressFail = 0xB002,
    DisplayAmountFail = 0xB003,
    WrongTxLength = 0xB004,
    TxParsingFail = 0xB005,
    TxHashFail = 0xB006,
    BadState = 0xB007,
    SignatureFail = 0xB008,
    InvalidChainId = 0xB009,
    TxExpectedMoreData = 0xB00A,
    TxExpectedLessData = 0xB00B,
    TxParsingFailNonce = 0xB101,
    TxParsingFailValidToTime = 0xB102,
    TxParsingFailGasCost = 0xB103,
    TxParsingFailContractAddress = 0xB104,
    TxParsingFailRpcLength = 0xB105,
}

impl StatusWord {
    /// Fetch the raw status word value
    pub const fn value(&self) -> u16 {
        *self as u16
    }

    /// Check whether this is a success status
    pub const fn is_ok(&self) -> bool {
        matches!(self, StatusWord::Ok)
    }
}

impl From<StatusWord> for u16 {
    fn from(sw: StatusWord) -> u16 {
        sw as u16
    }
}

/// Map request decoding failures to status words
impl From<ApduError> for StatusWord {
    fn from(e: ApduError) -> StatusWord {
        match e {
            // Only chain ids report encoding failures
            ApduError::InvalidEncoding => StatusWord::InvalidChainId,
            _ => StatusWord::WrongDataLength,
        }
    }
}
