//! List column encodings.
//!
//! Lists only have an unordered (value) form — [`crate::schema::ColumnSchema::validate`]
//! rejects any attempt to mark a list column as a key. Layout: 1 null tag
//! byte, then (if not null) a 4-byte element count, then each element in its
//! scalar unordered form with no per-element null tag — list elements are
//! never individually nullable.

use crate::buf::ByteBuffer;
use crate::error::{CodecError, CodecResult};

const NULL_TAG: u8 = 0;
const NOT_NULL_TAG: u8 = 1;

fn write_count(buf: &mut ByteBuffer, len: usize, context: &'static str) -> CodecResult<()> {
    let count: u32 = len
        .try_into()
        .map_err(|_| CodecError::OutOfRange { context })?;
    buf.write_u32_be(count);
    Ok(())
}

// --- bool list: each element is 1 raw byte ---

pub fn encode_bool_list(buf: &mut ByteBuffer, v: Option<&[bool]>) -> CodecResult<()> {
    match v {
        None => buf.write_u8(NULL_TAG),
        Some(items) => {
            buf.write_u8(NOT_NULL_TAG);
            write_count(buf, items.len(), "encode_bool_list.count")?;
            for &b in items {
                buf.write_u8(b as u8);
            }
        }
    }
    Ok(())
}

pub fn decode_bool_list(buf: &mut ByteBuffer) -> CodecResult<Option<Vec<bool>>> {
    if buf.read_u8()? == NULL_TAG {
        return Ok(None);
    }
    let count = buf.read_u32_be()? as usize;
    let mut out = Vec::with_capacity(count);
    for _ in 0..count {
        out.push(buf.read_u8()? != 0);
    }
    Ok(Some(out))
}

pub fn skip_bool_list(buf: &mut ByteBuffer) -> CodecResult<()> {
    if buf.read_u8()? == NULL_TAG {
        return Ok(());
    }
    let count = buf.read_u32_be()? as usize;
    buf.skip(count)
}

// --- i32 list: each element is 4 raw bytes ---

pub fn encode_i32_list(buf: &mut ByteBuffer, v: Option<&[i32]>) -> CodecResult<()> {
    match v {
        None => buf.write_u8(NULL_TAG),
        Some(items) => {
            buf.write_u8(NOT_NULL_TAG);
            write_count(buf, items.len(), "encode_i32_list.count")?;
            for &x in items {
                buf.write_u32_be(x as u32);
            }
        }
    }
    Ok(())
}

pub fn decode_i32_list(buf: &mut ByteBuffer) -> CodecResult<Option<Vec<i32>>> {
    if buf.read_u8()? == NULL_TAG {
        return Ok(None);
    }
    let count = buf.read_u32_be()? as usize;
    let mut out = Vec::with_capacity(count);
    for _ in 0..count {
        out.push(buf.read_u32_be()? as i32);
    }
    Ok(Some(out))
}

pub fn skip_i32_list(buf: &mut ByteBuffer) -> CodecResult<()> {
    if buf.read_u8()? == NULL_TAG {
        return Ok(());
    }
    let count = buf.read_u32_be()? as usize;
    buf.skip(count * 4)
}

// --- i64 list: each element is 8 raw bytes ---

pub fn encode_i64_list(buf: &mut ByteBuffer, v: Option<&[i64]>) -> CodecResult<()> {
    match v {
        None => buf.write_u8(NULL_TAG),
        Some(items) => {
            buf.write_u8(NOT_NULL_TAG);
            write_count(buf, items.len(), "encode_i64_list.count")?;
            for &x in items {
                buf.write_u64_be(x as u64);
            }
        }
    }
    Ok(())
}

pub fn decode_i64_list(buf: &mut ByteBuffer) -> CodecResult<Option<Vec<i64>>> {
    if buf.read_u8()? == NULL_TAG {
        return Ok(None);
    }
    let count = buf.read_u32_be()? as usize;
    let mut out = Vec::with_capacity(count);
    for _ in 0..count {
        out.push(buf.read_u64_be()? as i64);
    }
    Ok(Some(out))
}

pub fn skip_i64_list(buf: &mut ByteBuffer) -> CodecResult<()> {
    if buf.read_u8()? == NULL_TAG {
        return Ok(());
    }
    let count = buf.read_u32_be()? as usize;
    buf.skip(count * 8)
}

// --- f32 list: each element is 4 raw bytes (IEEE-754 bit pattern) ---

pub fn encode_f32_list(buf: &mut ByteBuffer, v: Option<&[f32]>) -> CodecResult<()> {
    match v {
        None => buf.write_u8(NULL_TAG),
        Some(items) => {
            buf.write_u8(NOT_NULL_TAG);
            write_count(buf, items.len(), "encode_f32_list.count")?;
            for &x in items {
                buf.write_u32_be(x.to_bits());
            }
        }
    }
    Ok(())
}

pub fn decode_f32_list(buf: &mut ByteBuffer) -> CodecResult<Option<Vec<f32>>> {
    if buf.read_u8()? == NULL_TAG {
        return Ok(None);
    }
    let count = buf.read_u32_be()? as usize;
    let mut out = Vec::with_capacity(count);
    for _ in 0..count {
        out.push(f32::from_bits(buf.read_u32_be()?));
    }
    Ok(Some(out))
}

pub fn skip_f32_list(buf: &mut ByteBuffer) -> CodecResult<()> {
    if buf.read_u8()? == NULL_TAG {
        return Ok(());
    }
    let count = buf.read_u32_be()? as usize;
    buf.skip(count * 4)
}

// --- f64 list: each element is 8 raw bytes (IEEE-754 bit pattern) ---

pub fn encode_f64_list(buf: &mut ByteBuffer, v: Option<&[f64]>) -> CodecResult<()> {
    match v {
        None => buf.write_u8(NULL_TAG),
        Some(items) => {
            buf.write_u8(NOT_NULL_TAG);
            write_count(buf, items.len(), "encode_f64_list.count")?;
            for &x in items {
                buf.write_u64_be(x.to_bits());
            }
        }
    }
    Ok(())
}

pub fn decode_f64_list(buf: &mut ByteBuffer) -> CodecResult<Option<Vec<f64>>> {
    if buf.read_u8()? == NULL_TAG {
        return Ok(None);
    }
    let count = buf.read_u32_be()? as usize;
    let mut out = Vec::with_capacity(count);
    for _ in 0..count {
        out.push(f64::from_bits(buf.read_u64_be()?));
    }
    Ok(Some(out))
}

pub fn skip_f64_list(buf: &mut ByteBuffer) -> CodecResult<()> {
    if buf.read_u8()? == NULL_TAG {
        return Ok(());
    }
    let count = buf.read_u32_be()? as usize;
    buf.skip(count * 8)
}

// --- bytes list: each element is its own {len:4}{bytes} unordered form ---

pub fn encode_bytes_list(buf: &mut ByteBuffer, v: Option<&[Vec<u8>]>) -> CodecResult<()> {
    match v {
        None => buf.write_u8(NULL_TAG),
        Some(items) => {
            buf.write_u8(NOT_NULL_TAG);
            write_count(buf, items.len(), "encode_bytes_list.count")?;
            for item in items {
                let len: u32 = item
                    .len()
                    .try_into()
                    .map_err(|_| CodecError::OutOfRange {
                        context: "encode_bytes_list.element_length",
                    })?;
                buf.write_u32_be(len);
                buf.write_bytes(item);
            }
        }
    }
    Ok(())
}

pub fn decode_bytes_list(buf: &mut ByteBuffer) -> CodecResult<Option<Vec<Vec<u8>>>> {
    if buf.read_u8()? == NULL_TAG {
        return Ok(None);
    }
    let count = buf.read_u32_be()? as usize;
    let mut out = Vec::with_capacity(count);
    for _ in 0..count {
        let len = buf.read_u32_be()? as usize;
        out.push(buf.read_exact(len)?.to_vec());
    }
    Ok(Some(out))
}

pub fn skip_bytes_list(buf: &mut ByteBuffer) -> CodecResult<()> {
    if buf.read_u8()? == NULL_TAG {
        return Ok(());
    }
    let count = buf.read_u32_be()? as usize;
    for _ in 0..count {
        let len = buf.read_u32_be()? as usize;
        buf.skip(len)?;
    }
    Ok(())
}
