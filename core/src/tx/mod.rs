// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Partisia Blockchain transaction model and streaming decoder.
//!
//! ## Encoding:
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                        NONCE (u64, BE)                        |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                    VALID_TO_TIME (u64, BE)                    |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                      GAS_COST (u64, BE)                       |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                  CONTRACT_ADDRESS (21 bytes)                  /
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! /               |                RPC_LEN (u32, BE)              /
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! /               |            RPC (RPC_LEN bytes)                /
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```

use heapless::Vec;
use static_assertions::const_assert;

use crate::Address;

mod parser;
pub use parser::{status_code, ParseError, ParsingState, Progress, Status};

mod rpc;
pub use rpc::{decode_rpc, RpcError};

/// Maximum text memo length
pub const MEMO_MAX_LEN: usize = 20;

/// Length of the fixed transaction header, including the RPC length
pub const HEADER_LEN: usize = 8 + 8 + 8 + 21 + 4;

const_assert!(MEMO_MAX_LEN <= u8::MAX as usize);
const_assert!(HEADER_LEN <= ledger_pbc_apdu::MAX_APDU_LEN);

/// Fixed transaction header fields
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct BasicTransaction {
    pub nonce: u64,
    /// Last block time the transaction is valid for
    pub valid_to_time: u64,
    pub gas_cost: u64,
    /// Contract the RPC is addressed to
    pub contract_address: Address,
}

/// Transaction memo
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub enum Memo {
    #[default]
    None,
    U64(u64),
    Text(Vec<u8, MEMO_MAX_LEN>),
}

impl Memo {
    /// Encoded memo length, `8` for integer memos
    pub fn len(&self) -> u8 {
        match self {
            Memo::None => 0,
            Memo::U64(_) => 8,
            Memo::Text(t) => t.len() as u8,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Decoded MPC token transfer
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct MpcTransfer {
    pub recipient: Address,
    /// Transfer amount in 1/10000ths of an MPC token
    pub token_amount_scaled: u64,
    pub memo: Memo,
}

impl MpcTransfer {
    pub fn memo_length(&self) -> u8 {
        self.memo.len()
    }
}

/// Transaction kinds, determined by the RPC payload
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum TransactionKind {
    /// Opaque RPC, requires blind signing.
    /// `rpc_error` records why decoding was rejected, where attempted.
    Generic { rpc_error: Option<RpcError> },

    /// Recognised MPC token transfer
    MpcTransfer(MpcTransfer),
}

impl Default for TransactionKind {
    fn default() -> Self {
        Self::Generic { rpc_error: None }
    }
}

/// Transaction, incrementally populated by [`ParsingState::update`]
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Transaction {
    pub basic: BasicTransaction,
    pub kind: TransactionKind,
}

impl Transaction {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch MPC transfer payload where decoded
    pub fn mpc_transfer(&self) -> Option<&MpcTransfer> {
        match &self.kind {
            TransactionKind::MpcTransfer(t) => Some(t),
            _ => None,
        }
    }

    /// Fetch the reason RPC decoding was rejected, if any
    pub fn rpc_parsing_error(&self) -> Option<RpcError> {
        match &self.kind {
            TransactionKind::Generic { rpc_error } => *rpc_error,
            _ => None,
        }
    }

    /// Check whether approving this transaction requires blind signing
    pub fn is_blind_sign(&self) -> bool {
        matches!(self.kind, TransactionKind::Generic { .. })
    }
}
