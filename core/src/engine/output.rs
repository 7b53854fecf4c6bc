// Copyright (c) 2022-2023 The MobileCoin Foundation

use encdec::Encode;

use ledger_proto::ApduError;

use super::Signature;
use crate::{apdu, Address};

/// [`Engine`][super::Engine] outputs (in response to events), typically encoded to response [APDUs][crate::apdu]
#[derive(Clone, PartialEq, Debug)]
pub enum Output {
    /// Engine state, acknowledges intermediate events
    State { state: super::State },

    /// Derived account address
    Address { address: Address, display: bool },

    /// Transaction signature
    Signature(Signature),

    /// Indicate the device is waiting for user input
    Pending,
}

impl Output {
    /// Encode an [`Output`] object to a response [APDU]
    #[cfg_attr(feature = "noinline", inline(never))]
    pub fn encode(&self, buff: &mut [u8]) -> Result<usize, ApduError> {
        match self {
            Output::State { .. } | Output::Pending => Ok(0),
            Output::Address { address, .. } => apdu::address::AddressResp::new(*address).encode(buff),
            Output::Signature(s) => apdu::sign_tx::SignatureResp::from(*s).encode(buff),
        }
    }

    /// Fetch state for outputs containing this
    pub fn state(&self) -> Option<super::State> {
        match &self {
            Output::State { state } => Some(*state),
            _ => None,
        }
    }
}

impl PartialEq<super::State> for Output {
    fn eq(&self, other: &super::State) -> bool {
        match self {
            Output::State { state } => state == other,
            _ => false,
        }
    }
}
