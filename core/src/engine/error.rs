// Copyright (c) 2022-2023 The MobileCoin Foundation

use ledger_pbc_apdu::status::StatusWord;

use crate::tx::ParseError;

/// [Engine][super::Engine] errors
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "thiserror", derive(thiserror::Error))]
#[repr(u8)]
pub enum Error {
    /// Invalid argument length
    #[cfg_attr(feature = "thiserror", error("Invalid argument length"))]
    InvalidLength = 0x00,

    /// Unexpected event
    #[cfg_attr(feature = "thiserror", error("Unexpected event"))]
    UnexpectedEvent = 0x01,

    /// Signing error
    #[cfg_attr(feature = "thiserror", error("Signing error"))]
    SignError = 0x03,

    /// Public key derivation failed
    #[cfg_attr(feature = "thiserror", error("key derivation failed"))]
    KeyDerivation = 0x04,

    /// Transaction rejected by the user
    #[cfg_attr(feature = "thiserror", error("transaction denied"))]
    Denied = 0x0d,

    /// Final chunk received before the transaction was complete
    #[cfg_attr(feature = "thiserror", error("expected more transaction data"))]
    ExpectedMoreData = 0x10,

    /// Transaction data received following a complete transaction
    #[cfg_attr(feature = "thiserror", error("expected less transaction data"))]
    ExpectedLessData = 0x11,

    /// Malformed transaction header
    #[cfg_attr(feature = "thiserror", error("transaction parsing failed: {0}"))]
    Parse(ParseError) = 0x12,
}

impl Error {
    /// Map engine errors to response status words
    pub fn status_word(&self) -> StatusWord {
        match self {
            Error::InvalidLength => StatusWord::WrongDataLength,
            Error::UnexpectedEvent => StatusWord::BadState,
            Error::SignError => StatusWord::SignatureFail,
            Error::KeyDerivation => StatusWord::DisplayAddressFail,
            Error::Denied => StatusWord::Deny,
            Error::ExpectedMoreData => StatusWord::TxExpectedMoreData,
            Error::ExpectedLessData => StatusWord::TxExpectedLessData,
            Error::Parse(e) => match e {
                ParseError::Nonce => StatusWord::TxParsingFailNonce,
                ParseError::ValidToTime => StatusWord::TxParsingFailValidToTime,
                ParseError::GasCost => StatusWord::TxParsingFailGasCost,
                ParseError::ContractAddress => StatusWord::TxParsingFailContractAddress,
                ParseError::RpcLength => StatusWord::TxParsingFailRpcLength,
            },
        }
    }
}

impl From<ParseError> for Error {
    fn from(e: ParseError) -> Self {
        Error::Parse(e)
    }
}
