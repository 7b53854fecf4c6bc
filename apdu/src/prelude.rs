//! Prelude to simplify downstream use of APDU objects
//!

pub use crate::{
    address::{Address, AddressReq, AddressResp, AddressType},
    app_info::{AppNameReq, AppNameResp, VersionReq, VersionResp},
    chain_id::ChainId,
    path::Bip32Path,
    sign_tx::{SignTxChunk, SignTxInit, SignatureResp},
    status::StatusWord,
    Command, Instruction,
};
