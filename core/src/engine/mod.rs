// Copyright (c) 2022-2023 The MobileCoin Foundation

//! The [Engine] provides functionality required by hardware wallets.
//!
//! This handles [Event] inputs and returns [Output] responses to the caller,
//! see [apdu][crate::apdu] for APDU protocol / encoding specifications.
//!
//! Transaction chunks are hashed as received and concurrently decoded via
//! [`ParsingState`], the decoded [`Transaction`] is advisory and used for
//! display only. The signed hash always covers the raw transaction bytes
//! followed by the length-prefixed chain id.

use sha2::{Digest, Sha256};
use strum::{Display, EnumIter, EnumString, EnumVariantNames};

use crate::{
    apdu::{address::PUBLIC_KEY_LEN, sign_tx::SignatureResp},
    cursor::Cursor,
    tx::{ParsingState, Progress, Transaction},
    Address, Bip32Path, ChainId,
};

mod event;
pub use event::Event;

mod output;
pub use output::Output;

mod error;
pub use error::Error;

/// Transaction hash length
pub const HASH_LEN: usize = 32;

/// Engine internal state enumeration
#[derive(Copy, Clone, PartialEq, Debug, EnumString, Display, EnumVariantNames, EnumIter)]
pub enum State {
    /// Idle state, no transaction running
    Init,
    /// Receiving transaction chunks
    Receiving,
    /// Transaction pending user approval
    Pending,
    /// Transaction denied / aborted
    Deny,
    /// Transaction failed
    Error,
    /// Transaction signed
    Complete,
}

/// Recoverable secp256k1 signature
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Signature {
    /// Parity of the y-coordinate of R
    pub recovery_id: u8,
    pub r: [u8; 32],
    pub s: [u8; 32],
}

impl From<Signature> for SignatureResp {
    fn from(s: Signature) -> Self {
        SignatureResp::new(s.recovery_id, s.r, s.s)
    }
}

/// [Engine] provides hardware-independent support for Partisia Blockchain wallet operations
///
pub struct Engine<DRV: Driver> {
    state: State,

    path: Bip32Path,
    chain_id: ChainId,

    parser: ParsingState,
    tx: Transaction,

    hasher: Sha256,
    hash: [u8; HASH_LEN],

    drv: DRV,
}

/// [`Driver`] trait provides platform support for [`Engine`] instances
pub trait Driver {
    /// Derive the uncompressed secp256k1 public key for a BIP-0032 path
    fn public_key(&self, path: &[u32]) -> Result<[u8; PUBLIC_KEY_LEN], Error>;

    /// Sign a transaction hash with the key for a BIP-0032 path
    fn sign(&self, path: &[u32], hash: &[u8; HASH_LEN]) -> Result<Signature, Error>;
}

impl<T: Driver> Driver for &mut T {
    fn public_key(&self, path: &[u32]) -> Result<[u8; PUBLIC_KEY_LEN], Error> {
        T::public_key(self, path)
    }

    fn sign(&self, path: &[u32], hash: &[u8; HASH_LEN]) -> Result<Signature, Error> {
        T::sign(self, path, hash)
    }
}

impl<DRV: Driver> Engine<DRV> {
    /// Create a new engine instance with the provided driver
    pub fn new(drv: DRV) -> Self {
        Self {
            state: State::Init,
            path: Bip32Path::default(),
            chain_id: ChainId::default(),
            parser: ParsingState::new(),
            tx: Transaction::new(),
            hasher: Sha256::new(),
            hash: [0u8; HASH_LEN],
            drv,
        }
    }

    /// Handle incoming events
    #[cfg_attr(feature = "noinline", inline(never))]
    pub fn update(&mut self, evt: &Event) -> Result<Output, Error> {
        #[cfg(feature = "log")]
        log::debug!("event: {:02x?}", evt);

        match (self.state, evt) {
            // Empty event, do nothing
            (_, Event::None) => (),

            // Fetch address, aborting any transaction in progress
            (_, Event::GetAddress { path, display }) => {
                self.clear();
                self.state = State::Init;

                return self.get_address(path, *display);
            }

            // Start signing operation
            (_, Event::SignTxInit { path, chain_id }) => {
                self.clear();

                self.path = path.clone();
                self.chain_id = chain_id.clone();

                self.state = State::Receiving;
            }

            // Consume transaction data
            (State::Receiving, Event::SignTxChunk { data, more }) => {
                return self.sign_tx_chunk(data, *more);
            }

            // Handle unexpected events
            _e => {
                #[cfg(feature = "log")]
                log::error!("Unexpected event in state {:?}: {:02x?}", self.state, _e);

                return Err(Error::UnexpectedEvent);
            }
        }

        // Default to returning updated state
        Ok(Output::State { state: self.state })
    }

    /// Fetch current engine state
    pub fn state(&self) -> State {
        self.state
    }

    /// Fetch the decoded transaction, available once all chunks are received
    pub fn transaction(&self) -> Option<&Transaction> {
        match self.state {
            State::Pending | State::Complete => Some(&self.tx),
            _ => None,
        }
    }

    /// Fetch the chain id for the current transaction
    pub fn chain_id(&self) -> &ChainId {
        &self.chain_id
    }

    /// Fetch the transaction hash, available once all chunks are received
    pub fn tx_hash(&self) -> Option<&[u8; HASH_LEN]> {
        match self.state {
            State::Pending | State::Complete => Some(&self.hash),
            _ => None,
        }
    }

    /// Approve a pending transaction, returning the signature
    #[cfg_attr(feature = "noinline", inline(never))]
    pub fn approve(&mut self) -> Result<Output, Error> {
        match self.state {
            State::Pending => (),
            State::Deny => return Err(Error::Denied),
            _ => return Err(Error::UnexpectedEvent),
        }

        let signature = match self.drv.sign(self.path.components(), &self.hash) {
            Ok(s) => s,
            Err(e) => {
                #[cfg(feature = "log")]
                log::error!("Signing failed: {:?}", e);

                self.state = State::Error;
                return Err(e);
            }
        };

        self.state = State::Complete;

        Ok(Output::Signature(signature))
    }

    /// Deny a pending transaction
    pub fn deny(&mut self) {
        self.clear();
        self.state = State::Deny;
    }

    /// Reset engine state
    pub fn reset(&mut self) {
        self.clear();
        self.state = State::Init;
    }

    /// Clear transaction context
    fn clear(&mut self) {
        self.parser.init();
        self.tx = Transaction::new();
        self.hasher = Sha256::new();
        self.hash = [0u8; HASH_LEN];
    }

    #[cfg_attr(feature = "noinline", inline(never))]
    fn get_address(&self, path: &Bip32Path, display: bool) -> Result<Output, Error> {
        let public_key = self.drv.public_key(path.components())?;
        let address = Address::from_public_key(&public_key);

        Ok(Output::Address { address, display })
    }

    #[cfg_attr(feature = "noinline", inline(never))]
    fn sign_tx_chunk(&mut self, data: &[u8], more: bool) -> Result<Output, Error> {
        if data.is_empty() {
            return Err(Error::InvalidLength);
        }

        self.hasher.update(data);

        let mut c = Cursor::new(data);
        let p = match self.parser.update_cursor(&mut c, &mut self.tx) {
            Ok(p) => p,
            Err(e) => {
                #[cfg(feature = "log")]
                log::error!("Transaction parsing failed: {:?}", e);

                self.state = State::Error;
                return Err(Error::Parse(e));
            }
        };

        match (p, more) {
            // More data to come
            (Progress::Continue, true) => return Ok(Output::State { state: self.state }),
            // Transaction complete
            (Progress::Done, false) if c.is_empty() => (),
            // Trailing data or further chunks following a complete transaction
            (Progress::Done, _) => {
                self.state = State::Error;
                return Err(Error::ExpectedLessData);
            }
            // Final chunk received without completing the transaction
            (Progress::Continue, false) => {
                self.state = State::Error;
                return Err(Error::ExpectedMoreData);
            }
        }

        // Bind chain id to the signed hash
        self.hasher.update(self.chain_id.len_prefix());
        self.hasher.update(self.chain_id.as_bytes());

        let h = self.hasher.finalize_reset();
        self.hash.copy_from_slice(&h);

        #[cfg(feature = "log")]
        log::debug!("tx: {:?}, hash: {:02x?}", self.tx, self.hash);

        self.state = State::Pending;

        Ok(Output::Pending)
    }
}
