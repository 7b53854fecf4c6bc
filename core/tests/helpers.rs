#![allow(unused)]

use log::debug;
use rand::random;
use sha2::{Digest, Sha256};

use ledger_pbc_core::{
    apdu::{address::PUBLIC_KEY_LEN, ApduError},
    engine::{Driver, Error, Signature, HASH_LEN},
    well_known::*,
    Address,
};

pub const GENERIC_CONTRACT: [u8; 21] = [
    0x02, 0xc3, 0x39, 0x97, 0x54, 0x4e, 0x31, 0x75, 0xd2, 0x66, 0xbd, 0x02, 0x24, 0x39, 0xb2,
    0x2c, 0xdb, 0x16, 0x50, 0x8c, 0x7a,
];

pub const RECIPIENT: [u8; 21] = [
    0x00, 0xc3, 0x39, 0x97, 0x54, 0x4e, 0x31, 0x75, 0xd2, 0x66, 0xbd, 0x02, 0x24, 0x39, 0xb2,
    0x2c, 0xdb, 0x16, 0x50, 0x8c, 0x7a,
];

pub const NONCE: u64 = 0x102;
pub const VALID_TO_TIME: u64 = 0x304;
pub const GAS_COST: u64 = 0x506;
pub const AMOUNT: u64 = 0x333;

pub const CHAIN_ID: &[u8] = b"Partisia Blockchain Testnet";

/// Serialize a transaction header
pub fn header(contract: &[u8; 21], rpc_len: u32) -> Vec<u8> {
    let mut v = Vec::new();
    v.extend_from_slice(&NONCE.to_be_bytes());
    v.extend_from_slice(&VALID_TO_TIME.to_be_bytes());
    v.extend_from_slice(&GAS_COST.to_be_bytes());
    v.extend_from_slice(contract);
    v.extend_from_slice(&rpc_len.to_be_bytes());
    v
}

/// Serialize a transaction with an opaque RPC
pub fn generic_tx(rpc: &[u8]) -> Vec<u8> {
    let mut v = header(&GENERIC_CONTRACT, rpc.len() as u32);
    v.extend_from_slice(rpc);
    v
}

/// Serialize an MPC transfer, `rpc_len` of `None` declares the exact length
pub fn mpc_transfer_tx(shortname: u8, memo: &[u8], surplus: &[u8], rpc_len: Option<u32>) -> Vec<u8> {
    let mut rpc = vec![shortname];
    rpc.extend_from_slice(&RECIPIENT);
    rpc.extend_from_slice(&AMOUNT.to_be_bytes());
    rpc.extend_from_slice(memo);

    let rpc_len = rpc_len.unwrap_or((rpc.len() + surplus.len()) as u32);

    let mut v = header(MPC_TOKEN_ADDRESS.as_bytes(), rpc_len);
    v.extend_from_slice(&rpc);
    v.extend_from_slice(surplus);
    v
}

/// Plain MPC transfer (30 byte RPC)
pub fn transfer_no_memo() -> Vec<u8> {
    mpc_transfer_tx(MPC_TOKEN_SHORTNAME_TRANSFER, &[], &[], None)
}

/// MPC transfer with integer memo (38 byte RPC)
pub fn transfer_small_memo() -> Vec<u8> {
    mpc_transfer_tx(
        MPC_TOKEN_SHORTNAME_TRANSFER_MEMO_SMALL,
        &0x9999u64.to_be_bytes(),
        &[],
        None,
    )
}

/// MPC transfer with text memo
pub fn transfer_large_memo(text: &[u8]) -> Vec<u8> {
    let mut memo = (text.len() as u32).to_be_bytes().to_vec();
    memo.extend_from_slice(text);

    mpc_transfer_tx(MPC_TOKEN_SHORTNAME_TRANSFER_MEMO_LARGE, &memo, &[], None)
}

/// MPC transfer with a 0x120 byte memo, too large to decode
pub fn transfer_very_large_memo() -> Vec<u8> {
    let text: Vec<u8> = b"Hello World\n".iter().cycle().take(0x120).cloned().collect();
    transfer_large_memo(&text)
}

/// Split data into chunks of at most `n` bytes
pub fn chunks(data: &[u8], n: usize) -> Vec<&[u8]> {
    data.chunks(n).collect()
}

/// Split data at random offsets, keeping at least `first` bytes in the first chunk
pub fn random_chunks(data: &[u8], first: usize) -> Vec<&[u8]> {
    let mut v = vec![&data[..first]];
    let mut rest = &data[first..];

    while !rest.is_empty() {
        let n = 1 + random::<usize>() % rest.len().min(64);
        let (a, b) = rest.split_at(n);
        v.push(a);
        rest = b;
    }

    v
}

/// Compute the expected signed hash for a transaction and chain id
pub fn expected_hash(tx: &[u8], chain_id: &[u8]) -> [u8; HASH_LEN] {
    let mut h = Sha256::new();
    h.update(tx);
    h.update([0, 0, 0, chain_id.len() as u8]);
    h.update(chain_id);

    let mut o = [0u8; HASH_LEN];
    o.copy_from_slice(&h.finalize());
    o
}

/// Driver implementation for test use, derives deterministic
/// keys and signatures from the path
#[derive(Default)]
pub struct TestDriver {
    pub fail_signing: bool,
}

impl TestDriver {
    pub fn new() -> Self {
        Self::default()
    }
}

fn path_digest(path: &[u32]) -> [u8; 32] {
    let mut h = Sha256::new();
    for c in path {
        h.update(c.to_be_bytes());
    }

    let mut o = [0u8; 32];
    o.copy_from_slice(&h.finalize());
    o
}

impl Driver for TestDriver {
    fn public_key(&self, path: &[u32]) -> Result<[u8; PUBLIC_KEY_LEN], Error> {
        let d = path_digest(path);

        let mut k = [0u8; PUBLIC_KEY_LEN];
        k[0] = 0x04;
        k[1..33].copy_from_slice(&d);
        k[33..].copy_from_slice(&d);

        debug!("public key for {:?}: {:02x?}", path, k);

        Ok(k)
    }

    fn sign(&self, path: &[u32], hash: &[u8; HASH_LEN]) -> Result<Signature, Error> {
        if self.fail_signing {
            return Err(Error::SignError);
        }

        Ok(Signature {
            recovery_id: 1,
            r: *hash,
            s: path_digest(path),
        })
    }
}

/// Map APDU errors for use with [`anyhow`]
pub fn apdu_err(e: ApduError) -> anyhow::Error {
    anyhow::anyhow!("apdu error: {e:?}")
}

pub fn init_logger() {
    let _ = simplelog::SimpleLogger::init(log::LevelFilter::Debug, Default::default());
}
