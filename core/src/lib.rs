// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Partisia Blockchain hardware wallet core
//!
//! This provides a streaming [transaction parser][tx::ParsingState] and a common
//! [Engine][engine] supporting address derivation and transaction signing for
//! execution on hardware wallets.
//!
//! Interactions with the [Engine][engine] are performed via [Event][engine::Event]s and [Output][engine::Output]s,
//! see [ledger_pbc_apdu] for APDU objects and wire encodings.
//!
//! ## Operations
//!
//! ### Fetching application information
//!
//! [`VersionReq`][ledger_pbc_apdu::app_info::VersionReq] and
//! [`AppNameReq`][ledger_pbc_apdu::app_info::AppNameReq] return the application
//! version and name, these do not interact with the engine.
//!
//! ### Requesting addresses
//!
//! Account addresses can be requested via [`AddressReq`][ledger_pbc_apdu::address::AddressReq]
//! APDU, returning an [`AddressResp`][ledger_pbc_apdu::address::AddressResp] containing the
//! address derived from the public key at the provided BIP-0032 path.
//!
//! ### Signing a transaction
//!
//! Transactions are streamed to the device in chunks of at most
//! [`MAX_APDU_LEN`][ledger_pbc_apdu::MAX_APDU_LEN] bytes. Each chunk is hashed
//! as received and concurrently decoded for display, the signature always
//! covers the raw transaction bytes and the chain id regardless of whether
//! the payload could be decoded.
//!
//! 1. Issue [`SignTxInit`][ledger_pbc_apdu::sign_tx::SignTxInit] with the derivation path
//!    and chain id
//! 2. Issue [`SignTxChunk`][ledger_pbc_apdu::sign_tx::SignTxChunk]s with the serialized
//!    transaction, setting `more` on every chunk but the last
//! 3. Following user approval the device responds with a
//!    [`SignatureResp`][ledger_pbc_apdu::sign_tx::SignatureResp]
//!

#![cfg_attr(not(feature = "std"), no_std)]

pub use ledger_pbc_apdu::{self as apdu};

pub use apdu::{
    address::{Address, AddressType},
    chain_id::ChainId,
    path::Bip32Path,
};

pub mod cursor;

pub mod engine;

pub mod helpers;

pub mod tx;

pub mod well_known;
