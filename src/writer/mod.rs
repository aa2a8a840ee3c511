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

//! Writing tag bytes and primitive values to a byte sink. Each function
//! appends to a caller supplied [`BufMut`] and touches no other state, so
//! writes to independent sinks can proceed concurrently.

use bytes::BufMut;
use thiserror::Error;

use crate::format::{self, SizeClass, ARRAY, BIN, MAP, STR};


/// Writing a value can only fail when its size exceeds every length field
/// the format provides.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum MsgPackWriteError {
    /// The payload size cannot be represented by any size class in the
    /// relevant family group.
    #[error("{0} is too large for any MessagePack length field.")]
    SizeTooLarge(u64),
}

impl SizeClass {
    /// Write the tag for a payload of `size` bytes (or elements). For a
    /// fixed class the size is folded into the tag byte; otherwise the tag
    /// byte is followed by the size as a big-endian unsigned integer of the
    /// class's declared width.
    ///
    /// The size must already have been validated against the class (by
    /// [`FormatGroup::select`](crate::FormatGroup::select)).
    pub fn write_tag(&self, dst: &mut impl BufMut, size: u64) {
        debug_assert!(size <= self.max_size());
        if self.is_fixed() {
            dst.put_u8(self.tag() + size as u8);
        } else {
            dst.put_u8(self.tag());
            match self.max_size() {
                format::SIZE_8 => dst.put_u8(size as u8),
                format::SIZE_16 => dst.put_u16(size as u16),
                _ => dst.put_u32(size as u32),
            }
        }
    }
}

/// Write a nil value.
pub fn write_nil(dst: &mut impl BufMut) {
    dst.put_u8(format::NIL);
}

/// Write a boolean value.
pub fn write_bool(dst: &mut impl BufMut, value: bool) {
    dst.put_u8(if value { format::TRUE } else { format::FALSE });
}

/// Write an integer in the narrowest representation the catalog assigns to
/// its value. Values in `[-32, 127]` become a single tag byte; larger
/// positive values take an unsigned tag at the catalog's width thresholds
/// and more negative values take a signed tag by range.
pub fn write_int(dst: &mut impl BufMut, value: i64) {
    match value {
        format::FIX_INT_MIN..=format::FIX_INT_MAX => dst.put_i8(value as i8),
        v if v > format::FIX_INT_MAX => {
            if v <= format::UINT_8_MAX {
                dst.put_u8(format::UINT_8);
                dst.put_u8(v as u8);
            } else if v <= format::UINT_16_MAX {
                dst.put_u8(format::UINT_16);
                dst.put_u16(v as u16);
            } else if v <= format::UINT_32_MAX {
                dst.put_u8(format::UINT_32);
                dst.put_u32(v as u32);
            } else {
                dst.put_u8(format::UINT_64);
                dst.put_u64(v as u64);
            }
        }
        v => {
            if v >= i8::MIN as i64 {
                dst.put_u8(format::INT_8);
                dst.put_i8(v as i8);
            } else if v >= i16::MIN as i64 {
                dst.put_u8(format::INT_16);
                dst.put_i16(v as i16);
            } else if v >= i32::MIN as i64 {
                dst.put_u8(format::INT_32);
                dst.put_i32(v as i32);
            } else {
                dst.put_u8(format::INT_64);
                dst.put_i64(v);
            }
        }
    }
}

/// Write a 32 bit float as its big-endian IEEE-754 bytes.
pub fn write_f32(dst: &mut impl BufMut, value: f32) {
    dst.put_u8(format::FLOAT_32);
    dst.put_f32(value);
}

/// Write a 64 bit float as its big-endian IEEE-754 bytes.
pub fn write_f64(dst: &mut impl BufMut, value: f64) {
    dst.put_u8(format::FLOAT_64);
    dst.put_f64(value);
}

/// Write a string as a length tag followed by its UTF-8 bytes.
pub fn write_str(dst: &mut impl BufMut, value: &str) -> Result<(), MsgPackWriteError> {
    let len = value.len() as u64;
    STR.select(len)?.write_tag(dst, len);
    dst.put_slice(value.as_bytes());
    Ok(())
}

/// Write a binary blob as a length tag followed by its raw bytes.
pub fn write_bin(dst: &mut impl BufMut, value: &[u8]) -> Result<(), MsgPackWriteError> {
    let len = value.len() as u64;
    BIN.select(len)?.write_tag(dst, len);
    dst.put_slice(value);
    Ok(())
}

/// Write the header of an array of `len` elements. The elements themselves
/// must follow as `len` encoded values.
pub fn write_array_header(dst: &mut impl BufMut, len: u64) -> Result<(), MsgPackWriteError> {
    ARRAY.select(len)?.write_tag(dst, len);
    Ok(())
}

/// Write the header of a map of `len` key-value pairs. The pairs themselves
/// must follow as `len` encoded key-value sequences.
pub fn write_map_header(dst: &mut impl BufMut, len: u64) -> Result<(), MsgPackWriteError> {
    MAP.select(len)?.write_tag(dst, len);
    Ok(())
}
