// Copyright (c) 2022-2023 The MobileCoin Foundation

use encdec::Decode;

use ledger_pbc_apdu::{prelude::*, ApduError};

/// [`Engine`][super::Engine] input events, typically decoded from request [APDUs][crate::apdu]
#[derive(Clone, Debug)]
pub enum Event<'a> {
    None,

    /// Fetch (and optionally display) the address for a derivation path
    GetAddress { path: Bip32Path, display: bool },

    /// Start a signing operation
    SignTxInit { path: Bip32Path, chain_id: ChainId },

    /// Transaction data chunk
    SignTxChunk { data: &'a [u8], more: bool },
}

impl<'a> Event<'a> {
    /// Decode an [`Event`] from a validated [`Command`] and APDU payload
    #[cfg_attr(feature = "noinline", inline(never))]
    pub fn parse(cmd: Command, buff: &'a [u8]) -> Result<Self, ApduError> {
        match cmd {
            Command::GetAddress { display } => {
                let (req, _n) = AddressReq::decode(buff)?;
                Ok(Event::GetAddress {
                    path: req.path,
                    display,
                })
            }
            Command::SignTx { first: true, .. } => {
                let (req, _n) = SignTxInit::decode(buff)?;
                Ok(Event::from(req))
            }
            Command::SignTx { first: false, more } => {
                let (req, _n) = SignTxChunk::decode(buff)?;
                Ok(Event::SignTxChunk {
                    data: req.data,
                    more,
                })
            }
            Command::GetVersion | Command::GetAppName => Ok(Event::None),
        }
    }
}

impl<'a> From<SignTxInit> for Event<'a> {
    fn from(a: SignTxInit) -> Self {
        Event::SignTxInit {
            path: a.path,
            chain_id: a.chain_id,
        }
    }
}

impl<'a> From<SignTxChunk<'a>> for Event<'a> {
    fn from(a: SignTxChunk<'a>) -> Self {
        Event::SignTxChunk {
            data: a.data,
            more: a.more,
        }
    }
}
