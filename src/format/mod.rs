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

//! The MessagePack format catalog: every tag family supported by this codec,
//! the size classes within each family and the logic that selects a size
//! class for a payload or recovers one from a leading tag byte.

use crate::reader::MsgPackReadError;
use crate::writer::MsgPackWriteError;

#[cfg(test)]
mod tests;

/// Largest length representable by an 8 bit length field.
pub const SIZE_8: u64 = 0xff;
/// Largest length representable by a 16 bit length field.
pub const SIZE_16: u64 = 0xffff;
/// Largest length representable by a 32 bit length field.
pub const SIZE_32: u64 = 0xffffffff;

/// Nil value.
pub const NIL: u8 = 0xc0;
/// Boolean false.
pub const FALSE: u8 = 0xc2;
/// Boolean true.
pub const TRUE: u8 = 0xc3;
/// 32 bit IEEE-754 float, big endian.
pub const FLOAT_32: u8 = 0xca;
/// 64 bit IEEE-754 float, big endian.
pub const FLOAT_64: u8 = 0xcb;
/// Unsigned integer, 1 byte payload.
pub const UINT_8: u8 = 0xcc;
/// Unsigned integer, 2 byte payload.
pub const UINT_16: u8 = 0xcd;
/// Unsigned integer, 4 byte payload.
pub const UINT_32: u8 = 0xce;
/// Unsigned integer, 8 byte payload.
pub const UINT_64: u8 = 0xcf;
/// Signed integer, 1 byte payload.
pub const INT_8: u8 = 0xd0;
/// Signed integer, 2 byte payload.
pub const INT_16: u8 = 0xd1;
/// Signed integer, 4 byte payload.
pub const INT_32: u8 = 0xd2;
/// Signed integer, 8 byte payload.
pub const INT_64: u8 = 0xd3;

/// Smallest integer that can be inlined into a single tag byte.
pub const FIX_INT_MIN: i64 = -32;
/// Largest integer that can be inlined into a single tag byte.
pub const FIX_INT_MAX: i64 = 127;

/// Largest positive integer written with the [`UINT_8`] tag.
pub const UINT_8_MAX: i64 = 0xff;
/// Largest positive integer written with the [`UINT_16`] tag.
///
/// This and [`UINT_32_MAX`] are narrower than the full unsigned range of the
/// field that follows the tag. The boundaries are part of the wire catalog
/// and are kept as they are for compatibility with existing encoders; the
/// wider tag still decodes to the same value everywhere.
pub const UINT_16_MAX: i64 = 0x7fff;
/// Largest positive integer written with the [`UINT_32`] tag.
pub const UINT_32_MAX: i64 = i32::MAX as i64;

/// One size class within a tag family: a tag byte, the largest payload size
/// the class can represent and whether that size is inlined into the tag
/// byte itself.
#[derive(Debug, PartialEq, Eq)]
pub struct SizeClass {
    tag: u8,
    max_size: u64,
    fixed: bool,
}

impl SizeClass {
    const fn fixed(tag: u8, max_size: u64) -> Self {
        SizeClass {
            tag,
            max_size,
            fixed: true,
        }
    }

    const fn prefixed(tag: u8, max_size: u64) -> Self {
        SizeClass {
            tag,
            max_size,
            fixed: false,
        }
    }

    /// The base tag byte of the class.
    pub fn tag(&self) -> u8 {
        self.tag
    }

    /// The largest payload size (in bytes or elements) the class can hold.
    pub fn max_size(&self) -> u64 {
        self.max_size
    }

    /// Whether the payload size is encoded as an offset within the tag byte
    /// rather than in a trailing length field.
    pub fn is_fixed(&self) -> bool {
        self.fixed
    }

    /// Whether `byte` denotes this class. A fixed class spans the contiguous
    /// tag byte range `[tag, tag + max_size]`; a prefixed class matches its
    /// tag byte exactly.
    pub fn contains(&self, byte: u8) -> bool {
        if self.fixed {
            (self.tag..=self.tag + self.max_size as u8).contains(&byte)
        } else {
            byte == self.tag
        }
    }
}

/// Strings of up to 31 bytes, length inlined in the tag byte.
pub static FIX_STR: SizeClass = SizeClass::fixed(0xa0, 31);
/// Strings with an 8 bit length prefix.
pub static STR_8: SizeClass = SizeClass::prefixed(0xd9, SIZE_8);
/// Strings with a 16 bit length prefix.
pub static STR_16: SizeClass = SizeClass::prefixed(0xda, SIZE_16);
/// Strings with a 32 bit length prefix.
pub static STR_32: SizeClass = SizeClass::prefixed(0xdb, SIZE_32);

/// Binary blobs with an 8 bit length prefix.
pub static BIN_8: SizeClass = SizeClass::prefixed(0xc4, SIZE_8);
/// Binary blobs with a 16 bit length prefix.
pub static BIN_16: SizeClass = SizeClass::prefixed(0xc5, SIZE_16);
/// Binary blobs with a 32 bit length prefix.
pub static BIN_32: SizeClass = SizeClass::prefixed(0xc6, SIZE_32);

/// Arrays of up to 15 elements, count inlined in the tag byte.
pub static FIX_ARRAY: SizeClass = SizeClass::fixed(0x90, 15);
/// Arrays with a 16 bit element count.
pub static ARRAY_16: SizeClass = SizeClass::prefixed(0xdc, SIZE_16);
/// Arrays with a 32 bit element count.
pub static ARRAY_32: SizeClass = SizeClass::prefixed(0xdd, SIZE_32);

/// Maps of up to 15 key-value pairs, count inlined in the tag byte.
pub static FIX_MAP: SizeClass = SizeClass::fixed(0x80, 15);
/// Maps with a 16 bit pair count.
pub static MAP_16: SizeClass = SizeClass::prefixed(0xde, SIZE_16);
/// Maps with a 32 bit pair count.
pub static MAP_32: SizeClass = SizeClass::prefixed(0xdf, SIZE_32);

/// The size classes covering one logical MessagePack type, ordered from
/// smallest capacity to largest so that selection always yields the
/// narrowest representation that fits.
#[derive(Debug)]
pub struct FormatGroup {
    name: &'static str,
    classes: &'static [&'static SizeClass],
}

/// The string family.
pub static STR: FormatGroup = FormatGroup {
    name: "str",
    classes: &[&FIX_STR, &STR_8, &STR_16, &STR_32],
};

/// The binary blob family.
pub static BIN: FormatGroup = FormatGroup {
    name: "bin",
    classes: &[&BIN_8, &BIN_16, &BIN_32],
};

/// The array family.
pub static ARRAY: FormatGroup = FormatGroup {
    name: "array",
    classes: &[&FIX_ARRAY, &ARRAY_16, &ARRAY_32],
};

/// The map family.
pub static MAP: FormatGroup = FormatGroup {
    name: "map",
    classes: &[&FIX_MAP, &MAP_16, &MAP_32],
};

impl FormatGroup {
    /// The name of the logical type the group covers.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Select the smallest size class in the group that can hold a payload
    /// of `size` bytes (or elements). Fails if the size exceeds the capacity
    /// of every class in the group; an oversized payload is never truncated
    /// to fit.
    pub fn select(&self, size: u64) -> Result<&'static SizeClass, MsgPackWriteError> {
        self.classes
            .iter()
            .find(|class| size <= class.max_size)
            .copied()
            .ok_or(MsgPackWriteError::SizeTooLarge(size))
    }

    /// The size class denoted by `byte`, if the byte belongs to this group.
    pub fn class_for(&self, byte: u8) -> Option<&'static SizeClass> {
        self.classes
            .iter()
            .find(|class| class.contains(byte))
            .copied()
    }

    /// Whether `byte` denotes any size class in this group.
    pub fn contains(&self, byte: u8) -> bool {
        self.class_for(byte).is_some()
    }
}

/// A classified tag byte, covering every entry in the catalog. Fixed inline
/// variants carry the size that was folded into the byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tag {
    Nil,
    False,
    True,
    /// An integer in `0..=127` inlined into the tag byte.
    PosFixInt(u8),
    /// An integer in `-32..=-1` inlined into the tag byte.
    NegFixInt(i8),
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Int8,
    Int16,
    Int32,
    Int64,
    Float32,
    Float64,
    /// A string of the given length, `0..=31`.
    FixStr(u8),
    Str8,
    Str16,
    Str32,
    Bin8,
    Bin16,
    Bin32,
    /// An array of the given element count, `0..=15`.
    FixArray(u8),
    Array16,
    Array32,
    /// A map of the given pair count, `0..=15`.
    FixMap(u8),
    Map16,
    Map32,
}

impl Tag {
    /// Classify a leading tag byte against the catalog. Bytes with no entry
    /// (0xc1 and the extension tags, which this codec does not support) are
    /// rejected rather than guessed at.
    pub fn from_byte(byte: u8) -> Result<Tag, MsgPackReadError> {
        let tag = match byte {
            0x00..=0x7f => Tag::PosFixInt(byte),
            0x80..=0x8f => Tag::FixMap(byte - FIX_MAP.tag),
            0x90..=0x9f => Tag::FixArray(byte - FIX_ARRAY.tag),
            0xa0..=0xbf => Tag::FixStr(byte - FIX_STR.tag),
            NIL => Tag::Nil,
            FALSE => Tag::False,
            TRUE => Tag::True,
            0xc4 => Tag::Bin8,
            0xc5 => Tag::Bin16,
            0xc6 => Tag::Bin32,
            FLOAT_32 => Tag::Float32,
            FLOAT_64 => Tag::Float64,
            UINT_8 => Tag::Uint8,
            UINT_16 => Tag::Uint16,
            UINT_32 => Tag::Uint32,
            UINT_64 => Tag::Uint64,
            INT_8 => Tag::Int8,
            INT_16 => Tag::Int16,
            INT_32 => Tag::Int32,
            INT_64 => Tag::Int64,
            0xd9 => Tag::Str8,
            0xda => Tag::Str16,
            0xdb => Tag::Str32,
            0xdc => Tag::Array16,
            0xdd => Tag::Array32,
            0xde => Tag::Map16,
            0xdf => Tag::Map32,
            0xe0..=0xff => Tag::NegFixInt(byte as i8),
            _ => return Err(MsgPackReadError::UnknownTag(byte)),
        };
        Ok(tag)
    }

    /// The byte this tag was classified from.
    pub fn byte(&self) -> u8 {
        match self {
            Tag::Nil => NIL,
            Tag::False => FALSE,
            Tag::True => TRUE,
            Tag::PosFixInt(n) => *n,
            Tag::NegFixInt(n) => *n as u8,
            Tag::Uint8 => UINT_8,
            Tag::Uint16 => UINT_16,
            Tag::Uint32 => UINT_32,
            Tag::Uint64 => UINT_64,
            Tag::Int8 => INT_8,
            Tag::Int16 => INT_16,
            Tag::Int32 => INT_32,
            Tag::Int64 => INT_64,
            Tag::Float32 => FLOAT_32,
            Tag::Float64 => FLOAT_64,
            Tag::FixStr(len) => FIX_STR.tag + len,
            Tag::Str8 => STR_8.tag,
            Tag::Str16 => STR_16.tag,
            Tag::Str32 => STR_32.tag,
            Tag::Bin8 => BIN_8.tag,
            Tag::Bin16 => BIN_16.tag,
            Tag::Bin32 => BIN_32.tag,
            Tag::FixArray(len) => FIX_ARRAY.tag + len,
            Tag::Array16 => ARRAY_16.tag,
            Tag::Array32 => ARRAY_32.tag,
            Tag::FixMap(len) => FIX_MAP.tag + len,
            Tag::Map16 => MAP_16.tag,
            Tag::Map32 => MAP_32.tag,
        }
    }
}
