// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Streaming transaction parser.
//!
//! Transactions arrive as a sequence of chunks with arbitrary boundaries.
//! The header must be contained in the first chunk, RPC decoding is attempted
//! once against the remainder of the first chunk and must consume exactly the
//! declared RPC length, otherwise the transaction is treated as generic and
//! the RPC skipped.

use num_enum::TryFromPrimitive;
use strum::{Display, EnumIter, EnumString, EnumVariantNames};

use super::{decode_rpc, RpcError, Transaction, TransactionKind};
use crate::cursor::{Cursor, Endianness};

/// Parser progress following an update
#[derive(
    Copy, Clone, PartialEq, Eq, Debug, EnumString, Display, EnumVariantNames, EnumIter, TryFromPrimitive,
)]
#[repr(u8)]
pub enum Progress {
    /// RPC fully consumed, no further chunks expected
    Done = 1,
    /// Further chunks required
    Continue = 2,
}

/// Fatal header parsing failures
#[derive(Copy, Clone, PartialEq, Eq, Debug, TryFromPrimitive)]
#[cfg_attr(feature = "thiserror", derive(thiserror::Error))]
#[repr(u8)]
pub enum ParseError {
    #[cfg_attr(feature = "thiserror", error("failed to parse nonce"))]
    Nonce = 1,

    #[cfg_attr(feature = "thiserror", error("failed to parse valid-to time"))]
    ValidToTime = 2,

    #[cfg_attr(feature = "thiserror", error("failed to parse gas cost"))]
    GasCost = 3,

    #[cfg_attr(feature = "thiserror", error("failed to parse contract address"))]
    ContractAddress = 4,

    #[cfg_attr(feature = "thiserror", error("failed to parse RPC length"))]
    RpcLength = 5,
}

/// Result of a parser update
pub type Status = Result<Progress, ParseError>;

/// Map a [`Status`] to a signed status code, positive for progress
/// and negative for failures. Zero is never returned.
pub fn status_code(s: &Status) -> i8 {
    match s {
        Ok(p) => *p as i8,
        Err(e) => -(*e as i8),
    }
}

/// Streaming parser state, persisted between chunks of a single transaction
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct ParsingState {
    rpc_bytes_total: u32,
    rpc_bytes_parsed: u32,
    first_block_parsed: bool,
}

impl ParsingState {
    /// Create a new parser, ready for a fresh transaction
    pub const fn new() -> Self {
        Self {
            rpc_bytes_total: 0,
            rpc_bytes_parsed: 0,
            first_block_parsed: false,
        }
    }

    /// Reset parser state for a fresh transaction
    pub fn init(&mut self) {
        *self = Self::new();
    }

    /// Declared RPC length, zero until the header is parsed
    pub fn rpc_bytes_total(&self) -> u32 {
        self.rpc_bytes_total
    }

    /// RPC bytes consumed so far
    pub fn rpc_bytes_parsed(&self) -> u32 {
        self.rpc_bytes_parsed
    }

    pub fn first_block_parsed(&self) -> bool {
        self.first_block_parsed
    }

    /// Check whether the RPC has been fully consumed
    pub fn is_done(&self) -> bool {
        self.first_block_parsed && self.rpc_bytes_parsed == self.rpc_bytes_total
    }

    /// Consume a chunk, updating the provided transaction.
    ///
    /// Header failures are fatal and the transaction must be discarded.
    /// Once [`Progress::Done`] is returned no further chunks are expected,
    /// subsequent calls consume nothing and return [`Progress::Done`].
    pub fn update(&mut self, chunk: &[u8], tx: &mut Transaction) -> Status {
        let mut c = Cursor::new(chunk);
        self.update_cursor(&mut c, tx)
    }

    /// Consume bytes from a cursor, leaving any bytes following the RPC
    /// unread so callers can detect trailing data
    #[cfg_attr(feature = "noinline", inline(never))]
    pub fn update_cursor(&mut self, c: &mut Cursor, tx: &mut Transaction) -> Status {
        if !self.first_block_parsed {
            self.parse_header(c, tx)?;
            self.first_block_parsed = true;
        }

        // Skip remaining (or undecoded) RPC bytes
        let pending = self.rpc_bytes_total - self.rpc_bytes_parsed;
        let skipped = c.skip_up_to(pending as usize);
        self.rpc_bytes_parsed += skipped as u32;

        #[cfg(feature = "log")]
        log::debug!(
            "parsed {}/{} rpc bytes ({} skipped)",
            self.rpc_bytes_parsed,
            self.rpc_bytes_total,
            skipped
        );

        match self.rpc_bytes_parsed == self.rpc_bytes_total {
            true => Ok(Progress::Done),
            false => Ok(Progress::Continue),
        }
    }

    /// Parse the fixed header and attempt RPC decoding
    fn parse_header(&mut self, c: &mut Cursor, tx: &mut Transaction) -> Result<(), ParseError> {
        let b = &mut tx.basic;

        b.nonce = c
            .read_u64(Endianness::Big)
            .map_err(|_| ParseError::Nonce)?;
        b.valid_to_time = c
            .read_u64(Endianness::Big)
            .map_err(|_| ParseError::ValidToTime)?;
        b.gas_cost = c
            .read_u64(Endianness::Big)
            .map_err(|_| ParseError::GasCost)?;
        b.contract_address = c
            .read_address()
            .map_err(|_| ParseError::ContractAddress)?;

        self.rpc_bytes_total = c
            .read_u32(Endianness::Big)
            .map_err(|_| ParseError::RpcLength)?;

        // Speculative decode, must exactly match the declared length
        let cp = c.checkpoint();
        let r = match decode_rpc(c, &b.contract_address) {
            Ok(_) if c.consumed_since(cp) != self.rpc_bytes_total as usize => Err(RpcError::Length),
            r => r,
        };

        tx.kind = match r {
            Ok(t) => {
                self.rpc_bytes_parsed = self.rpc_bytes_total;
                TransactionKind::MpcTransfer(t)
            }
            Err(e) => {
                #[cfg(feature = "log")]
                log::debug!("rpc not decoded ({:?}), generic transaction", e);

                c.rewind(cp);
                TransactionKind::Generic { rpc_error: Some(e) }
            }
        };

        Ok(())
    }
}
