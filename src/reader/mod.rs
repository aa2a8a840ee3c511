// Copyright 2015-2024 Swim Inc.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Reading tag bytes, declared sizes and primitive values from a byte
//! source. Malformed and foreign input is expected at this boundary, so
//! every failure is a typed, recoverable error; nothing is guessed at or
//! retried internally.

use std::str::Utf8Error;

use bytes::{Buf, Bytes};
use thiserror::Error;

use crate::format::{self, FormatGroup, SizeClass, Tag, ARRAY, BIN, MAP, STR};


/// Reading MessagePack data can fail if the bytes do not constitute valid
/// MessagePack or the source ends part way through a value.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum MsgPackReadError {
    /// A byte did not match any tag family expected in context.
    #[error("0x{0:02x} is not a recognized MessagePack tag.")]
    UnknownTag(u8),
    /// The source ended part way through a value.
    #[error("The input ended part way through a value.")]
    Incomplete,
    /// A string payload contained invalid UTF-8.
    #[error("A string value contained invalid UTF8.")]
    StringDecode(#[from] Utf8Error),
    /// An unsigned 64 bit payload was too large for the signed value the
    /// caller requested.
    #[error("{0} is too large for a signed 64 bit integer.")]
    IntOutOfRange(u64),
}

fn need(src: &impl Buf, len: usize) -> Result<(), MsgPackReadError> {
    if src.remaining() < len {
        Err(MsgPackReadError::Incomplete)
    } else {
        Ok(())
    }
}

/// Consume one byte from the source and classify it against the catalog.
pub fn read_tag(src: &mut impl Buf) -> Result<Tag, MsgPackReadError> {
    need(src, 1)?;
    Tag::from_byte(src.get_u8())
}

impl SizeClass {
    /// Recover the payload size that `byte` declared. For a fixed class the
    /// size is the offset of `byte` from the base tag; otherwise exactly 1,
    /// 2 or 4 further bytes are read as a big-endian unsigned integer. The
    /// widening conversions bound the result to the field's width, so a
    /// wider host integer can never sign-extend a short length field.
    pub fn read_size(&self, src: &mut impl Buf, byte: u8) -> Result<u64, MsgPackReadError> {
        debug_assert!(self.contains(byte));
        if self.is_fixed() {
            return Ok((byte - self.tag()) as u64);
        }
        match self.max_size() {
            format::SIZE_8 => {
                need(src, 1)?;
                Ok(src.get_u8() as u64)
            }
            format::SIZE_16 => {
                need(src, 2)?;
                Ok(src.get_u16() as u64)
            }
            _ => {
                need(src, 4)?;
                Ok(src.get_u32() as u64)
            }
        }
    }
}

fn read_len_in(
    group: &FormatGroup,
    src: &mut impl Buf,
    byte: u8,
) -> Result<u64, MsgPackReadError> {
    match group.class_for(byte) {
        Some(class) => class.read_size(src, byte),
        None => Err(MsgPackReadError::UnknownTag(byte)),
    }
}

/// Recover a string length from a previously consumed tag byte.
pub fn read_str_len(src: &mut impl Buf, byte: u8) -> Result<u64, MsgPackReadError> {
    read_len_in(&STR, src, byte)
}

/// Recover a binary blob length from a previously consumed tag byte.
pub fn read_bin_len(src: &mut impl Buf, byte: u8) -> Result<u64, MsgPackReadError> {
    read_len_in(&BIN, src, byte)
}

/// Recover an array element count from a previously consumed tag byte.
pub fn read_array_len(src: &mut impl Buf, byte: u8) -> Result<u64, MsgPackReadError> {
    read_len_in(&ARRAY, src, byte)
}

/// Recover a map pair count from a previously consumed tag byte.
pub fn read_map_len(src: &mut impl Buf, byte: u8) -> Result<u64, MsgPackReadError> {
    read_len_in(&MAP, src, byte)
}

fn take(src: &mut impl Buf, len: u64) -> Result<Bytes, MsgPackReadError> {
    let len = usize::try_from(len).expect("u64 did not fit into usize");
    need(src, len)?;
    Ok(src.copy_to_bytes(len))
}

/// Read a string payload of `len` bytes, validating it as UTF-8.
pub fn read_str(src: &mut impl Buf, len: u64) -> Result<String, MsgPackReadError> {
    let bytes = take(src, len)?;
    let string = std::str::from_utf8(bytes.as_ref())?;
    Ok(string.to_owned())
}

/// Read a binary payload of `len` raw bytes.
pub fn read_blob(src: &mut impl Buf, len: u64) -> Result<Vec<u8>, MsgPackReadError> {
    let bytes = take(src, len)?;
    Ok(Vec::from(bytes.as_ref()))
}

/// Read the integer payload declared by `tag`. Inline tags carry their value
/// directly; the widened tags are followed by a big-endian payload of their
/// declared width. An unsigned 64 bit payload above `i64::MAX` is an error
/// rather than a silent wrap.
pub fn read_int(src: &mut impl Buf, tag: Tag) -> Result<i64, MsgPackReadError> {
    match tag {
        Tag::PosFixInt(n) => Ok(n as i64),
        Tag::NegFixInt(n) => Ok(n as i64),
        Tag::Uint8 => {
            need(src, 1)?;
            Ok(src.get_u8() as i64)
        }
        Tag::Uint16 => {
            need(src, 2)?;
            Ok(src.get_u16() as i64)
        }
        Tag::Uint32 => {
            need(src, 4)?;
            Ok(src.get_u32() as i64)
        }
        Tag::Uint64 => {
            need(src, 8)?;
            let n = src.get_u64();
            i64::try_from(n).map_err(|_| MsgPackReadError::IntOutOfRange(n))
        }
        Tag::Int8 => {
            need(src, 1)?;
            Ok(src.get_i8() as i64)
        }
        Tag::Int16 => {
            need(src, 2)?;
            Ok(src.get_i16() as i64)
        }
        Tag::Int32 => {
            need(src, 4)?;
            Ok(src.get_i32() as i64)
        }
        Tag::Int64 => {
            need(src, 8)?;
            Ok(src.get_i64())
        }
        other => Err(MsgPackReadError::UnknownTag(other.byte())),
    }
}

/// Read the float payload declared by `tag`.
pub fn read_f64(src: &mut impl Buf, tag: Tag) -> Result<f64, MsgPackReadError> {
    match tag {
        Tag::Float32 => {
            need(src, 4)?;
            Ok(src.get_f32() as f64)
        }
        Tag::Float64 => {
            need(src, 8)?;
            Ok(src.get_f64())
        }
        other => Err(MsgPackReadError::UnknownTag(other.byte())),
    }
}
