//! NDN TLV primitives (packet format v0.3).
//!
//! Types and lengths are VAR-NUMBERs: values below 253 take one byte, larger
//! values are prefixed with 253, 254 or 255 followed by a big-endian u16, u32
//! or u64. Decoding uses nom's streaming parsers so that a partially received
//! packet reports `Incomplete` instead of an error.

use nom::{
    bytes::streaming::take,
    error::{Error as NomError, ErrorKind},
    number::streaming::{be_u16, be_u32, be_u64, be_u8},
    IResult,
};

use super::{NetworkError, NetworkResult};

pub const INTEREST: u64 = 0x05;
pub const DATA: u64 = 0x06;
pub const NAME: u64 = 0x07;
pub const GENERIC_NAME_COMPONENT: u64 = 0x08;
pub const NONCE: u64 = 0x0a;
pub const INTEREST_LIFETIME: u64 = 0x0c;
pub const MUST_BE_FRESH: u64 = 0x12;
pub const META_INFO: u64 = 0x14;
pub const CONTENT: u64 = 0x15;
pub const SIGNATURE_INFO: u64 = 0x16;
pub const SIGNATURE_VALUE: u64 = 0x17;
pub const SIGNATURE_TYPE: u64 = 0x1b;
pub const FRESHNESS_PERIOD: u64 = 0x19;
pub const CAN_BE_PREFIX: u64 = 0x21;

pub const LP_PACKET: u64 = 0x64;
pub const LP_FRAGMENT: u64 = 0x50;
pub const LP_NACK: u64 = 0x0320;
pub const LP_NACK_REASON: u64 = 0x0321;

/// A decoded TLV element borrowing its value from the input buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Element<'a> {
    pub typ: u64,
    pub value: &'a [u8],
}

pub fn var_number(input: &[u8]) -> IResult<&[u8], u64> {
    let (input, first) = be_u8::<_, NomError<&[u8]>>(input)?;
    match first {
        253 => be_u16(input).map(|(rest, n)| (rest, u64::from(n))),
        254 => be_u32(input).map(|(rest, n)| (rest, u64::from(n))),
        255 => be_u64(input),
        n => Ok((input, u64::from(n))),
    }
}

pub fn element(input: &[u8]) -> IResult<&[u8], Element<'_>> {
    let (input, typ) = var_number(input)?;
    let (input, length) = var_number(input)?;
    let length = usize::try_from(length)
        .map_err(|_| nom::Err::Failure(NomError::new(input, ErrorKind::TooLarge)))?;
    let (input, value) = take::<_, _, NomError<&[u8]>>(length)(input)?;
    Ok((input, Element { typ, value }))
}

/// Decodes every element in a fully received buffer. Truncation is an error.
pub fn elements(mut input: &[u8]) -> NetworkResult<Vec<Element<'_>>> {
    let mut result = Vec::new();
    while !input.is_empty() {
        let (rest, el) = element(input).map_err(|e| match e {
            nom::Err::Incomplete(_) => NetworkError::Decode("truncated TLV element".to_string()),
            nom::Err::Error(e) | nom::Err::Failure(e) => {
                NetworkError::Decode(format!("malformed TLV element: {:?}", e.code))
            }
        })?;
        result.push(el);
        input = rest;
    }
    Ok(result)
}

pub fn write_var_number(buf: &mut Vec<u8>, n: u64) {
    if n < 253 {
        buf.push(n as u8);
    } else if n <= u64::from(u16::MAX) {
        buf.push(253);
        buf.extend_from_slice(&(n as u16).to_be_bytes());
    } else if n <= u64::from(u32::MAX) {
        buf.push(254);
        buf.extend_from_slice(&(n as u32).to_be_bytes());
    } else {
        buf.push(255);
        buf.extend_from_slice(&n.to_be_bytes());
    }
}

pub fn write_element(buf: &mut Vec<u8>, typ: u64, value: &[u8]) {
    write_var_number(buf, typ);
    write_var_number(buf, value.len() as u64);
    buf.extend_from_slice(value);
}

/// Shortest big-endian encoding of 1, 2, 4 or 8 bytes.
pub fn non_negative_integer(n: u64) -> Vec<u8> {
    if n <= u64::from(u8::MAX) {
        vec![n as u8]
    } else if n <= u64::from(u16::MAX) {
        (n as u16).to_be_bytes().to_vec()
    } else if n <= u64::from(u32::MAX) {
        (n as u32).to_be_bytes().to_vec()
    } else {
        n.to_be_bytes().to_vec()
    }
}

pub fn read_non_negative_integer(value: &[u8]) -> NetworkResult<u64> {
    match value.len() {
        1 | 2 | 4 | 8 => Ok(value
            .iter()
            .fold(0u64, |acc, byte| (acc << 8) | u64::from(*byte))),
        n => Err(NetworkError::Decode(format!(
            "invalid NonNegativeInteger length {}",
            n
        ))),
    }
}
