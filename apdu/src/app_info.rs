// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Application Information APDUs

use encdec::{Decode, DecodeOwned, Encode};

use super::{ApduError, ApduStatic, Instruction, PBC_APDU_CLA};

/// Fetch application version APDU
#[derive(Copy, Clone, PartialEq, Debug, Default)]
pub struct VersionReq {}

impl ApduStatic for VersionReq {
    const CLA: u8 = PBC_APDU_CLA;
    const INS: u8 = Instruction::GetVersion as u8;
}

impl Encode for VersionReq {
    type Error = ApduError;

    fn encode_len(&self) -> Result<usize, Self::Error> {
        Ok(0)
    }

    fn encode(&self, _buff: &mut [u8]) -> Result<usize, Self::Error> {
        Ok(0)
    }
}

impl DecodeOwned for VersionReq {
    type Output = Self;

    type Error = ApduError;

    fn decode_owned(_buff: &[u8]) -> Result<(Self::Output, usize), Self::Error> {
        Ok((Self {}, 0))
    }
}

/// Application version response APDU
///
/// ## Encoding
///
/// ```text
///  0                   1                   2
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |     MAJOR     |     MINOR     |     PATCH     |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct VersionResp {
    pub major: u8,
    pub minor: u8,
    pub patch: u8,
}

impl VersionResp {
    /// Create a new application version APDU
    pub fn new(major: u8, minor: u8, patch: u8) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}

impl Encode for VersionResp {
    type Error = ApduError;

    fn encode_len(&self) -> Result<usize, Self::Error> {
        Ok(3)
    }

    fn encode(&self, buff: &mut [u8]) -> Result<usize, Self::Error> {
        if buff.len() < 3 {
            return Err(ApduError::InvalidLength);
        }

        buff[0] = self.major;
        buff[1] = self.minor;
        buff[2] = self.patch;

        Ok(3)
    }
}

impl DecodeOwned for VersionResp {
    type Output = Self;

    type Error = ApduError;

    fn decode_owned(buff: &[u8]) -> Result<(Self::Output, usize), Self::Error> {
        if buff.len() < 3 {
            return Err(ApduError::InvalidLength);
        }

        Ok((Self::new(buff[0], buff[1], buff[2]), 3))
    }
}

/// Fetch application name APDU
#[derive(Copy, Clone, PartialEq, Debug, Default)]
pub struct AppNameReq {}

impl ApduStatic for AppNameReq {
    const CLA: u8 = PBC_APDU_CLA;
    const INS: u8 = Instruction::GetAppName as u8;
}

impl Encode for AppNameReq {
    type Error = ApduError;

    fn encode_len(&self) -> Result<usize, Self::Error> {
        Ok(0)
    }

    fn encode(&self, _buff: &mut [u8]) -> Result<usize, Self::Error> {
        Ok(0)
    }
}

impl DecodeOwned for AppNameReq {
    type Output = Self;

    type Error = ApduError;

    fn decode_owned(_buff: &[u8]) -> Result<(Self::Output, usize), Self::Error> {
        Ok((Self {}, 0))
    }
}

/// Application name response APDU, the raw UTF-8 name with no length prefix
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct AppNameResp<'a> {
    pub name: &'a str,
}

impl<'a> AppNameResp<'a> {
    /// Create a new application name APDU
    pub fn new(name: &'a str) -> Self {
        Self { name }
    }
}

impl<'a> Encode for AppNameResp<'a> {
    type Error = ApduError;

    fn encode_len(&self) -> Result<usize, ApduError> {
        Ok(self.name.len())
    }

    fn encode(&self, buff: &mut [u8]) -> Result<usize, ApduError> {
        let d = self.name.as_bytes();
        if buff.len() < d.len() {
            return Err(ApduError::InvalidLength);
        }

        buff[..d.len()].copy_from_slice(d);

        Ok(d.len())
    }
}

impl<'a> Decode<'a> for AppNameResp<'a> {
    type Output = Self;
    type Error = ApduError;

    fn decode(buff: &'a [u8]) -> Result<(Self, usize), ApduError> {
        let name = core::str::from_utf8(buff).map_err(|_| ApduError::InvalidUtf8)?;

        Ok((Self { name }, buff.len()))
    }
}

#[cfg(test)]
mod test {

    use super::*;
    use crate::test::encode_decode_apdu;

    #[test]
    fn version_apdus() {
        let mut buff = [0u8; 16];
        encode_decode_apdu(&mut buff, &VersionReq::default());

        let mut buff = [0u8; 16];
        let n = encode_decode_apdu(&mut buff, &VersionResp::new(1, 2, 3));
        assert_eq!(&buff[..n], &[1, 2, 3]);
    }

    #[test]
    fn app_name_apdus() {
        let mut buff = [0u8; 16];
        encode_decode_apdu(&mut buff, &AppNameReq::default());

        let mut buff = [0u8; 64];
        encode_decode_apdu(&mut buff, &AppNameResp::new("Partisia Blockchain"));
    }

    #[test]
    fn app_name_invalid_utf8() {
        assert!(matches!(
            AppNameResp::decode(&[0xff, 0xfe]),
            Err(ApduError::InvalidUtf8)
        ));
    }
}
