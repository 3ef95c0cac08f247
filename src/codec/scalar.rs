//! Fixed-width scalar encodings, plus the variable-width byte-string form.
//!
//! Every encoding here writes a leading null tag so both the ordered (key)
//! and unordered (value) forms can represent `Value::Null` without losing
//! the entry's fixed width: a null fixed-width column still occupies the
//! full width, padded with zero data bytes, so neighboring fixed-width
//! columns stay at constant offsets.

use crate::buf::ByteBuffer;
use crate::error::{CodecError, CodecResult};

const NULL_TAG: u8 = 0;
const NOT_NULL_TAG: u8 = 1;

fn read_tag(buf: &mut ByteBuffer) -> CodecResult<bool> {
    Ok(buf.read_u8()? != NULL_TAG)
}

// --- bool: 1 tag byte + 1 data byte, identical in both forms ---

pub fn encode_bool(buf: &mut ByteBuffer, v: Option<bool>) {
    match v {
        None => {
            buf.write_u8(NULL_TAG);
            buf.write_u8(0);
        }
        Some(b) => {
            buf.write_u8(NOT_NULL_TAG);
            buf.write_u8(b as u8);
        }
    }
}

pub fn decode_bool(buf: &mut ByteBuffer) -> CodecResult<Option<bool>> {
    let not_null = read_tag(buf)?;
    let b = buf.read_u8()?;
    Ok(not_null.then_some(b != 0))
}

pub fn skip_bool(buf: &mut ByteBuffer) -> CodecResult<()> {
    buf.skip(2)
}

// --- i32: 1 tag byte + 4 data bytes ---

pub fn encode_i32_ordered(buf: &mut ByteBuffer, v: Option<i32>) {
    match v {
        None => {
            buf.write_u8(NULL_TAG);
            buf.write_u32_be(0);
        }
        Some(x) => {
            buf.write_u8(NOT_NULL_TAG);
            let mut b = (x as u32).to_be_bytes();
            b[0] ^= 0x80;
            buf.write_bytes(&b);
        }
    }
}

pub fn decode_i32_ordered(buf: &mut ByteBuffer) -> CodecResult<Option<i32>> {
    let not_null = read_tag(buf)?;
    let raw = buf.read_u32_be()?;
    let flipped = raw ^ (0x80 << 24);
    Ok(not_null.then_some(flipped as i32))
}

pub fn encode_i32_unordered(buf: &mut ByteBuffer, v: Option<i32>) {
    match v {
        None => {
            buf.write_u8(NULL_TAG);
            buf.write_u32_be(0);
        }
        Some(x) => {
            buf.write_u8(NOT_NULL_TAG);
            buf.write_u32_be(x as u32);
        }
    }
}

pub fn decode_i32_unordered(buf: &mut ByteBuffer) -> CodecResult<Option<i32>> {
    let not_null = read_tag(buf)?;
    let raw = buf.read_u32_be()?;
    Ok(not_null.then_some(raw as i32))
}

pub fn skip_i32(buf: &mut ByteBuffer) -> CodecResult<()> {
    buf.skip(5)
}

// --- i64: 1 tag byte + 8 data bytes ---

pub fn encode_i64_ordered(buf: &mut ByteBuffer, v: Option<i64>) {
    match v {
        None => {
            buf.write_u8(NULL_TAG);
            buf.write_u64_be(0);
        }
        Some(x) => {
            buf.write_u8(NOT_NULL_TAG);
            buf.write_u64_be_sign_flipped(x as u64);
        }
    }
}

pub fn decode_i64_ordered(buf: &mut ByteBuffer) -> CodecResult<Option<i64>> {
    let not_null = read_tag(buf)?;
    let flipped = buf.read_u64_be_sign_flipped()?;
    Ok(not_null.then_some(flipped as i64))
}

pub fn encode_i64_unordered(buf: &mut ByteBuffer, v: Option<i64>) {
    match v {
        None => {
            buf.write_u8(NULL_TAG);
            buf.write_u64_be(0);
        }
        Some(x) => {
            buf.write_u8(NOT_NULL_TAG);
            buf.write_u64_be(x as u64);
        }
    }
}

pub fn decode_i64_unordered(buf: &mut ByteBuffer) -> CodecResult<Option<i64>> {
    let not_null = read_tag(buf)?;
    let raw = buf.read_u64_be()?;
    Ok(not_null.then_some(raw as i64))
}

pub fn skip_i64(buf: &mut ByteBuffer) -> CodecResult<()> {
    buf.skip(9)
}

// --- f32: 1 tag byte + 4 data bytes, sign-magnitude transform for order ---

fn f32_comparable_bits(x: f32) -> u32 {
    let bits = x.to_bits();
    if x.is_sign_negative() || bits & 0x8000_0000 != 0 {
        !bits
    } else {
        bits ^ 0x8000_0000
    }
}

fn f32_from_comparable_bits(bits: u32) -> f32 {
    if bits & 0x8000_0000 != 0 {
        f32::from_bits(bits ^ 0x8000_0000)
    } else {
        f32::from_bits(!bits)
    }
}

pub fn encode_f32_ordered(buf: &mut ByteBuffer, v: Option<f32>) {
    match v {
        None => {
            buf.write_u8(NULL_TAG);
            buf.write_u32_be(0);
        }
        Some(x) => {
            buf.write_u8(NOT_NULL_TAG);
            buf.write_u32_be(f32_comparable_bits(x));
        }
    }
}

pub fn decode_f32_ordered(buf: &mut ByteBuffer) -> CodecResult<Option<f32>> {
    let not_null = read_tag(buf)?;
    let bits = buf.read_u32_be()?;
    Ok(not_null.then_some(f32_from_comparable_bits(bits)))
}

pub fn encode_f32_unordered(buf: &mut ByteBuffer, v: Option<f32>) {
    match v {
        None => {
            buf.write_u8(NULL_TAG);
            buf.write_u32_be(0);
        }
        Some(x) => {
            buf.write_u8(NOT_NULL_TAG);
            buf.write_u32_be(x.to_bits());
        }
    }
}

pub fn decode_f32_unordered(buf: &mut ByteBuffer) -> CodecResult<Option<f32>> {
    let not_null = read_tag(buf)?;
    let bits = buf.read_u32_be()?;
    Ok(not_null.then_some(f32::from_bits(bits)))
}

pub fn skip_f32(buf: &mut ByteBuffer) -> CodecResult<()> {
    buf.skip(5)
}

// --- f64: 1 tag byte + 8 data bytes, sign-magnitude transform for order ---

fn f64_comparable_bits(x: f64) -> u64 {
    let bits = x.to_bits();
    if x.is_sign_negative() || bits & 0x8000_0000_0000_0000 != 0 {
        !bits
    } else {
        bits ^ 0x8000_0000_0000_0000
    }
}

fn f64_from_comparable_bits(bits: u64) -> f64 {
    if bits & 0x8000_0000_0000_0000 != 0 {
        f64::from_bits(bits ^ 0x8000_0000_0000_0000)
    } else {
        f64::from_bits(!bits)
    }
}

pub fn encode_f64_ordered(buf: &mut ByteBuffer, v: Option<f64>) {
    match v {
        None => {
            buf.write_u8(NULL_TAG);
            buf.write_u64_be(0);
        }
        Some(x) => {
            buf.write_u8(NOT_NULL_TAG);
            buf.write_u64_be(f64_comparable_bits(x));
        }
    }
}

pub fn decode_f64_ordered(buf: &mut ByteBuffer) -> CodecResult<Option<f64>> {
    let not_null = read_tag(buf)?;
    let bits = buf.read_u64_be()?;
    Ok(not_null.then_some(f64_from_comparable_bits(bits)))
}

pub fn encode_f64_unordered(buf: &mut ByteBuffer, v: Option<f64>) {
    match v {
        None => {
            buf.write_u8(NULL_TAG);
            buf.write_u64_be(0);
        }
        Some(x) => {
            buf.write_u8(NOT_NULL_TAG);
            buf.write_u64_be(x.to_bits());
        }
    }
}

pub fn decode_f64_unordered(buf: &mut ByteBuffer) -> CodecResult<Option<f64>> {
    let not_null = read_tag(buf)?;
    let bits = buf.read_u64_be()?;
    Ok(not_null.then_some(f64::from_bits(bits)))
}

pub fn skip_f64(buf: &mut ByteBuffer) -> CodecResult<()> {
    buf.skip(9)
}

// --- bytes, unordered form: 1 tag byte + 4-byte length + raw bytes ---

pub fn encode_bytes_unordered(buf: &mut ByteBuffer, v: Option<&[u8]>) -> CodecResult<()> {
    match v {
        None => {
            buf.write_u8(NULL_TAG);
            buf.write_u32_be(0);
        }
        Some(data) => {
            buf.write_u8(NOT_NULL_TAG);
            let len: u32 = data
                .len()
                .try_into()
                .map_err(|_| CodecError::OutOfRange {
                    context: "encode_bytes_unordered.length",
                })?;
            buf.write_u32_be(len);
            buf.write_bytes(data);
        }
    }
    Ok(())
}

pub fn decode_bytes_unordered(buf: &mut ByteBuffer) -> CodecResult<Option<Vec<u8>>> {
    let not_null = read_tag(buf)?;
    let len = buf.read_u32_be()? as usize;
    let data = buf.read_exact(len)?.to_vec();
    Ok(not_null.then_some(data))
}

pub fn skip_bytes_unordered(buf: &mut ByteBuffer) -> CodecResult<()> {
    buf.read_u8()?;
    let len = buf.read_u32_be()? as usize;
    buf.skip(len)
}

// --- bytes, ordered form: 1 tag byte + 8-byte groups with marker bytes ---
//
// Each group is 9 bytes: 8 data bytes (zero-padded in the final group) and
// one marker byte. A full group's marker is 0xFF ("more groups follow"); a
// terminal group's marker is `0xFF - pad_count`, where `pad_count` is the
// number of zero padding bytes in that group (1..=8). An input whose length
// is an exact multiple of 8 still gets one extra all-zero terminal group
// with pad_count == 8, so group boundaries alone are enough to recover the
// exact original length — and, crucially, so a shorter string's lexical
// encoding always sorts before a longer string sharing its prefix.

const GROUP_SIZE: usize = 8;
const MARKER_FULL: u8 = 0xFF;

pub fn encode_bytes_ordered(buf: &mut ByteBuffer, v: Option<&[u8]>) {
    match v {
        None => {
            buf.write_u8(NULL_TAG);
        }
        Some(data) => {
            buf.write_u8(NOT_NULL_TAG);
            let mut chunks = data.chunks(GROUP_SIZE).peekable();
            if chunks.peek().is_none() {
                write_terminal_group(buf, &[]);
                return;
            }
            while let Some(chunk) = chunks.next() {
                if chunk.len() == GROUP_SIZE && chunks.peek().is_some() {
                    buf.write_bytes(chunk);
                    buf.write_u8(MARKER_FULL);
                } else if chunk.len() == GROUP_SIZE {
                    // last chunk happens to be full: still needs a
                    // terminal (pad_count == 8) marker group to close it.
                    buf.write_bytes(chunk);
                    buf.write_u8(MARKER_FULL);
                    write_terminal_group(buf, &[]);
                } else {
                    write_terminal_group(buf, chunk);
                }
            }
        }
    }
}

fn write_terminal_group(buf: &mut ByteBuffer, data: &[u8]) {
    debug_assert!(data.len() < GROUP_SIZE);
    let pad_count = GROUP_SIZE - data.len();
    buf.write_bytes(data);
    for _ in 0..pad_count {
        buf.write_u8(0);
    }
    buf.write_u8(MARKER_FULL - pad_count as u8);
}

pub fn decode_bytes_ordered(buf: &mut ByteBuffer) -> CodecResult<Option<Vec<u8>>> {
    let not_null = read_tag(buf)?;
    if !not_null {
        return Ok(None);
    }
    let mut out = Vec::new();
    loop {
        let chunk = buf.read_exact(GROUP_SIZE)?.to_vec();
        let marker = buf.read_u8()?;
        if marker == MARKER_FULL {
            out.extend_from_slice(&chunk);
            continue;
        }
        let pad_count = (MARKER_FULL - marker) as usize;
        if pad_count == 0 || pad_count > GROUP_SIZE {
            return Err(CodecError::MalformedPadding {
                context: "decode_bytes_ordered.marker",
            });
        }
        let data_len = GROUP_SIZE - pad_count;
        if chunk[data_len..].iter().any(|&b| b != 0) {
            return Err(CodecError::MalformedPadding {
                context: "decode_bytes_ordered.padding",
            });
        }
        out.extend_from_slice(&chunk[..data_len]);
        break;
    }
    Ok(Some(out))
}

pub fn skip_bytes_ordered(buf: &mut ByteBuffer) -> CodecResult<()> {
    if !read_tag(buf)? {
        return Ok(());
    }
    loop {
        buf.skip(GROUP_SIZE)?;
        let marker = buf.read_u8()?;
        if marker == MARKER_FULL {
            continue;
        }
        if marker == 0 || (MARKER_FULL - marker) as usize > GROUP_SIZE {
            return Err(CodecError::MalformedPadding {
                context: "skip_bytes_ordered.marker",
            });
        }
        break;
    }
    Ok(())
}
