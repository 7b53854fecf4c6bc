// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Well-known contracts with structured RPC decoding

use crate::Address;

/// MPC token contract address
pub const MPC_TOKEN_ADDRESS: Address = Address::new([
    0x01, 0xa4, 0x08, 0x2d, 0x9d, 0x56, 0x07, 0x49, 0xec, 0xd0, 0xff, 0xa1, 0xdc, 0xaa, 0xae, 0xe2,
    0xc2, 0xcb, 0x25, 0xd8, 0x81,
]);

/// MPC token transfer
pub const MPC_TOKEN_SHORTNAME_TRANSFER: u8 = 3;

/// MPC token transfer with an 8-byte integer memo
pub const MPC_TOKEN_SHORTNAME_TRANSFER_MEMO_SMALL: u8 = 13;

/// MPC token transfer with a length-prefixed text memo
pub const MPC_TOKEN_SHORTNAME_TRANSFER_MEMO_LARGE: u8 = 23;
