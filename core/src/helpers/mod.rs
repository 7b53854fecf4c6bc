// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Formatting helpers for rendering transactions on-device

use core::str::from_utf8;

use emstr::{helpers::Fractional, EncodeStr};

use crate::{apdu::address::ADDRESS_LEN, tx::Memo, Address};

/// MPC token amounts are encoded in 1/10000ths of a token
pub const SCALAR_MPC: i64 = 10_000;

/// Length of a hex encoded address
pub const ADDRESS_STR_LEN: usize = ADDRESS_LEN * 2;

// Format helper for MPC token amounts
pub fn fmt_token_amount(value: u64, buff: &mut [u8]) -> &str {
    // Amounts beyond i64::MAX are not representable
    let value = match i64::try_from(value) {
        Ok(v) => v,
        Err(_) => return "ENCODE_ERR",
    };

    // Compute and write value using scalar
    let mut n = match emstr::write!(&mut buff[..], Fractional::<i64>::new(value, SCALAR_MPC)) {
        Ok(v) => v,
        Err(_) => return "ENCODE_ERR",
    };

    // NOTE THAT NAMES STRINGS MUST BE HARDCODED TO AVOID PIC issues with the ledger
    match emstr::write!(&mut buff[n..], " MPC") {
        Ok(v) => n += v,
        Err(_) => return "ENCODE_ERR",
    }

    match from_utf8(&buff[..n]) {
        Ok(v) => v,
        Err(_) => "INVALID_UTF8",
    }
}

/// Format an address as lowercase hex
pub fn fmt_address<'a>(address: &Address, buff: &'a mut [u8]) -> &'a str {
    if buff.len() < ADDRESS_STR_LEN {
        return "ENCODE_ERR";
    }

    if hex::encode_to_slice(address.as_bytes(), &mut buff[..ADDRESS_STR_LEN]).is_err() {
        return "ENCODE_ERR";
    }

    match from_utf8(&buff[..ADDRESS_STR_LEN]) {
        Ok(v) => v,
        Err(_) => "INVALID_UTF8",
    }
}

/// Format a memo for display, replacing unreadable characters with `?`
pub fn fmt_memo<'a>(memo: &Memo, buff: &'a mut [u8]) -> &'a str {
    let n = match memo {
        Memo::None => 0,
        Memo::U64(v) => match emstr::write!(&mut buff[..], v) {
            Ok(n) => n,
            Err(_) => return "ENCODE_ERR",
        },
        Memo::Text(t) => {
            if buff.len() < t.len() {
                return "ENCODE_ERR";
            }

            for (o, c) in buff.iter_mut().zip(t.iter()) {
                *o = match c {
                    b' '..=b'~' => *c,
                    _ => b'?',
                };
            }

            t.len()
        }
    };

    match from_utf8(&buff[..n]) {
        Ok(v) => v,
        Err(_) => "INVALID_UTF8",
    }
}

/// Format gas cost
pub fn fmt_gas(gas: u64, buff: &mut [u8]) -> &str {
    let n = match emstr::write!(&mut buff[..], &gas) {
        Ok(n) => n,
        Err(_) => return "ENCODE_ERR",
    };

    match from_utf8(&buff[..n]) {
        Ok(v) => v,
        Err(_) => "INVALID_UTF8",
    }
}
