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

//! A codec for the MessagePack wire format: a compact, self-describing,
//! length-prefixed binary encoding of scalars, strings, binary blobs, arrays
//! and maps.
//!
//! The crate is built around a static catalog of tag families. Each logical
//! type that carries a length owns an ordered [`FormatGroup`] of
//! [`SizeClass`]es, from which the narrowest representation that fits a
//! payload is selected on write and against which a leading tag byte is
//! classified on read. Scalar values (nil, booleans, integers and floats)
//! are single tag constants, with small integers inlined directly into the
//! tag byte.
//!
//! The codec is stateless beyond the immutable catalog. Every operation
//! works on a caller supplied [`bytes::BufMut`] sink or [`bytes::Buf`]
//! source and may run concurrently with any other, provided each call owns
//! its sink or source for the duration. Higher level concerns, in particular
//! walking an object graph down to sequences of codec calls, belong to the
//! caller; extension types and schema validation are not supported.

mod format;
mod reader;
mod writer;


pub use format::{
    FormatGroup, SizeClass, Tag, ARRAY, ARRAY_16, ARRAY_32, BIN, BIN_16, BIN_32, BIN_8, FALSE,
    FIX_ARRAY, FIX_INT_MAX, FIX_INT_MIN, FIX_MAP, FIX_STR, FLOAT_32, FLOAT_64, INT_16, INT_32,
    INT_64, INT_8, MAP, MAP_16, MAP_32, NIL, SIZE_16, SIZE_32, SIZE_8, STR, STR_16, STR_32, STR_8,
    TRUE, UINT_16, UINT_16_MAX, UINT_32, UINT_32_MAX, UINT_64, UINT_8, UINT_8_MAX,
};
pub use reader::{
    read_array_len, read_bin_len, read_blob, read_f64, read_int, read_map_len, read_str,
    read_str_len, read_tag, MsgPackReadError,
};
pub use writer::{
    write_array_header, write_bin, write_bool, write_f32, write_f64, write_int, write_map_header,
    write_nil, write_str, MsgPackWriteError,
};

/// Prefix reserved to mark a string payload as carrying raw binary data.
///
/// Some producers cannot distinguish text from byte sequences in their value
/// model and encode binary payloads as strings behind this prefix. The
/// prefix is part of the wire contract: it is a non-data value, and any
/// string beginning with it must have originated from such an encoder. The
/// scanning that applies the convention lives with the object-graph layer;
/// this crate only reserves the markers so interoperating codecs agree on
/// them.
pub const BIN_MARKER: &str = "$MoshiBinaryData:";

/// Prefix reserved to escape a genuine string that would otherwise collide
/// with [`BIN_MARKER`]. See [`BIN_MARKER`] for the contract.
pub const STR_MARKER: &str = "$MoshiStringData:";

/// Whether a string collides with one of the reserved marker prefixes and so
/// cannot be written as plain data.
pub fn is_reserved_prefix(value: &str) -> bool {
    value.starts_with(BIN_MARKER) || value.starts_with(STR_MARKER)
}
