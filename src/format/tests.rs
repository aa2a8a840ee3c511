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

use crate::format::*;
use crate::reader::MsgPackReadError;
use crate::writer::MsgPackWriteError;

#[test]
fn str_selection_boundaries() {
    assert_eq!(STR.select(0).unwrap(), &FIX_STR);
    assert_eq!(STR.select(31).unwrap(), &FIX_STR);
    assert_eq!(STR.select(32).unwrap(), &STR_8);
    assert_eq!(STR.select(255).unwrap(), &STR_8);
    assert_eq!(STR.select(256).unwrap(), &STR_16);
    assert_eq!(STR.select(65535).unwrap(), &STR_16);
    assert_eq!(STR.select(65536).unwrap(), &STR_32);
    assert_eq!(STR.select(4294967295).unwrap(), &STR_32);
}

#[test]
fn bin_selection_boundaries() {
    assert_eq!(BIN.select(0).unwrap(), &BIN_8);
    assert_eq!(BIN.select(255).unwrap(), &BIN_8);
    assert_eq!(BIN.select(256).unwrap(), &BIN_16);
    assert_eq!(BIN.select(65535).unwrap(), &BIN_16);
    assert_eq!(BIN.select(65536).unwrap(), &BIN_32);
    assert_eq!(BIN.select(4294967295).unwrap(), &BIN_32);
}

#[test]
fn collection_selection_boundaries() {
    assert_eq!(ARRAY.select(15).unwrap(), &FIX_ARRAY);
    assert_eq!(ARRAY.select(16).unwrap(), &ARRAY_16);
    assert_eq!(ARRAY.select(65536).unwrap(), &ARRAY_32);
    assert_eq!(MAP.select(15).unwrap(), &FIX_MAP);
    assert_eq!(MAP.select(16).unwrap(), &MAP_16);
    assert_eq!(MAP.select(65536).unwrap(), &MAP_32);
}

#[test]
fn selection_overflow() {
    for group in [&STR, &BIN, &ARRAY, &MAP] {
        assert_eq!(
            group.select(4294967296),
            Err(MsgPackWriteError::SizeTooLarge(4294967296))
        );
    }
}

#[test]
fn fixed_class_membership() {
    assert!(FIX_STR.contains(0xa0));
    assert!(FIX_STR.contains(0xbf));
    assert!(!FIX_STR.contains(0x9f));
    assert!(!FIX_STR.contains(0xc0));

    assert!(FIX_ARRAY.contains(0x90));
    assert!(FIX_ARRAY.contains(0x9f));
    assert!(FIX_MAP.contains(0x80));
    assert!(FIX_MAP.contains(0x8f));
}

#[test]
fn prefixed_class_membership() {
    assert!(STR_8.contains(0xd9));
    assert!(!STR_8.contains(0xda));
    assert!(BIN_32.contains(0xc6));
    assert!(!BIN_32.contains(0xc5));
}

#[test]
fn group_membership_is_disjoint() {
    assert!(STR.contains(0xa5));
    assert!(!BIN.contains(0xa5));
    assert!(!ARRAY.contains(0xa5));
    assert!(!MAP.contains(0xa5));

    assert_eq!(ARRAY.class_for(0x95), Some(&FIX_ARRAY));
    assert_eq!(STR.class_for(0x95), None);
    assert_eq!(MAP.class_for(0x95), None);
}

#[test]
fn nil_matches_no_group() {
    assert_eq!(Tag::from_byte(0xc0), Ok(Tag::Nil));
    for group in [&STR, &BIN, &ARRAY, &MAP] {
        assert!(!group.contains(0xc0), "nil matched {}", group.name());
    }
}

#[test]
fn classify_scalars() {
    assert_eq!(Tag::from_byte(0xc2), Ok(Tag::False));
    assert_eq!(Tag::from_byte(0xc3), Ok(Tag::True));
    assert_eq!(Tag::from_byte(0x00), Ok(Tag::PosFixInt(0)));
    assert_eq!(Tag::from_byte(0x7f), Ok(Tag::PosFixInt(127)));
    assert_eq!(Tag::from_byte(0xe0), Ok(Tag::NegFixInt(-32)));
    assert_eq!(Tag::from_byte(0xff), Ok(Tag::NegFixInt(-1)));
    assert_eq!(Tag::from_byte(0xca), Ok(Tag::Float32));
    assert_eq!(Tag::from_byte(0xcb), Ok(Tag::Float64));
    assert_eq!(Tag::from_byte(0xcc), Ok(Tag::Uint8));
    assert_eq!(Tag::from_byte(0xcf), Ok(Tag::Uint64));
    assert_eq!(Tag::from_byte(0xd0), Ok(Tag::Int8));
    assert_eq!(Tag::from_byte(0xd3), Ok(Tag::Int64));
}

#[test]
fn classify_sized_families() {
    assert_eq!(Tag::from_byte(0x95), Ok(Tag::FixArray(5)));
    assert_eq!(Tag::from_byte(0x82), Ok(Tag::FixMap(2)));
    assert_eq!(Tag::from_byte(0xa3), Ok(Tag::FixStr(3)));
    assert_eq!(Tag::from_byte(0xc4), Ok(Tag::Bin8));
    assert_eq!(Tag::from_byte(0xdb), Ok(Tag::Str32));
    assert_eq!(Tag::from_byte(0xdd), Ok(Tag::Array32));
    assert_eq!(Tag::from_byte(0xdf), Ok(Tag::Map32));
}

#[test]
fn classify_unknown_bytes() {
    assert_eq!(Tag::from_byte(0xc1), Err(MsgPackReadError::UnknownTag(0xc1)));
    // Extension tags are outside this catalog.
    for byte in (0xc7..=0xc9).chain(0xd4..=0xd8) {
        assert_eq!(Tag::from_byte(byte), Err(MsgPackReadError::UnknownTag(byte)));
    }
}

#[test]
fn classification_round_trips() {
    for byte in 0..=0xffu8 {
        if let Ok(tag) = Tag::from_byte(byte) {
            assert_eq!(tag.byte(), byte);
        }
    }
}

#[test]
fn int_thresholds() {
    assert_eq!(FIX_INT_MIN, -32);
    assert_eq!(FIX_INT_MAX, 127);
    assert_eq!(UINT_8_MAX, 255);
    assert_eq!(UINT_16_MAX, 32767);
    assert_eq!(UINT_32_MAX, 2147483647);
}
