//! Per-column encode/decode/skip dispatch.
//!
//! [`ColumnKind`] is a closed enum, so dispatch here is a plain `match` —
//! there is no vtable, no function-pointer table, and no dynamic cast. Each
//! arm defers to a scalar or list implementation in [`scalar`] or [`list`].

mod list;
mod scalar;

use crate::buf::ByteBuffer;
use crate::error::{CodecError, CodecResult};
use crate::schema::{ColumnKind, ColumnSchema};
use crate::value::Value;

fn check_null(schema: &ColumnSchema, value: &Value) -> CodecResult<()> {
    if value.is_null() && !schema.allow_null {
        return Err(CodecError::NullNotAllowed {
            column: schema.index,
        });
    }
    Ok(())
}

/// Encode one column's value in ordered (key-safe) form.
///
/// Returns [`CodecError::UnsupportedKeyType`] for any list-kind schema
/// entry: lists have no defined total order and cannot appear in a key.
pub fn encode_key(buf: &mut ByteBuffer, schema: &ColumnSchema, value: &Value) -> CodecResult<()> {
    check_null(schema, value)?;
    if schema.kind.is_list() {
        return Err(CodecError::UnsupportedKeyType {
            kind: schema.kind.name(),
        });
    }
    match (schema.kind, value) {
        (ColumnKind::Bool, Value::Null) => scalar::encode_bool(buf, None),
        (ColumnKind::Bool, Value::Bool(b)) => scalar::encode_bool(buf, Some(*b)),
        (ColumnKind::I32, Value::Null) => scalar::encode_i32_ordered(buf, None),
        (ColumnKind::I32, Value::I32(x)) => scalar::encode_i32_ordered(buf, Some(*x)),
        (ColumnKind::I64, Value::Null) => scalar::encode_i64_ordered(buf, None),
        (ColumnKind::I64, Value::I64(x)) => scalar::encode_i64_ordered(buf, Some(*x)),
        (ColumnKind::F32, Value::Null) => scalar::encode_f32_ordered(buf, None),
        (ColumnKind::F32, Value::F32(x)) => scalar::encode_f32_ordered(buf, Some(*x)),
        (ColumnKind::F64, Value::Null) => scalar::encode_f64_ordered(buf, None),
        (ColumnKind::F64, Value::F64(x)) => scalar::encode_f64_ordered(buf, Some(*x)),
        (ColumnKind::Bytes, Value::Null) => scalar::encode_bytes_ordered(buf, None),
        (ColumnKind::Bytes, Value::Bytes(b)) => scalar::encode_bytes_ordered(buf, Some(b)),
        _ => {
            return Err(CodecError::TypeMismatch {
                column: schema.index,
                expected: schema.kind.name(),
            })
        }
    }
    Ok(())
}

/// Encode one column's value in unordered (value) form.
pub fn encode_value(
    buf: &mut ByteBuffer,
    schema: &ColumnSchema,
    value: &Value,
) -> CodecResult<()> {
    check_null(schema, value)?;
    match (schema.kind, value) {
        (ColumnKind::Bool, Value::Null) => scalar::encode_bool(buf, None),
        (ColumnKind::Bool, Value::Bool(b)) => scalar::encode_bool(buf, Some(*b)),
        (ColumnKind::I32, Value::Null) => scalar::encode_i32_unordered(buf, None),
        (ColumnKind::I32, Value::I32(x)) => scalar::encode_i32_unordered(buf, Some(*x)),
        (ColumnKind::I64, Value::Null) => scalar::encode_i64_unordered(buf, None),
        (ColumnKind::I64, Value::I64(x)) => scalar::encode_i64_unordered(buf, Some(*x)),
        (ColumnKind::F32, Value::Null) => scalar::encode_f32_unordered(buf, None),
        (ColumnKind::F32, Value::F32(x)) => scalar::encode_f32_unordered(buf, Some(*x)),
        (ColumnKind::F64, Value::Null) => scalar::encode_f64_unordered(buf, None),
        (ColumnKind::F64, Value::F64(x)) => scalar::encode_f64_unordered(buf, Some(*x)),
        (ColumnKind::Bytes, Value::Null) => scalar::encode_bytes_unordered(buf, None)?,
        (ColumnKind::Bytes, Value::Bytes(b)) => scalar::encode_bytes_unordered(buf, Some(b))?,
        (ColumnKind::BoolList, Value::Null) => list::encode_bool_list(buf, None)?,
        (ColumnKind::BoolList, Value::BoolList(items)) => {
            list::encode_bool_list(buf, Some(items))?
        }
        (ColumnKind::I32List, Value::Null) => list::encode_i32_list(buf, None)?,
        (ColumnKind::I32List, Value::I32List(items)) => list::encode_i32_list(buf, Some(items))?,
        (ColumnKind::I64List, Value::Null) => list::encode_i64_list(buf, None)?,
        (ColumnKind::I64List, Value::I64List(items)) => list::encode_i64_list(buf, Some(items))?,
        (ColumnKind::F32List, Value::Null) => list::encode_f32_list(buf, None)?,
        (ColumnKind::F32List, Value::F32List(items)) => list::encode_f32_list(buf, Some(items))?,
        (ColumnKind::F64List, Value::Null) => list::encode_f64_list(buf, None)?,
        (ColumnKind::F64List, Value::F64List(items)) => list::encode_f64_list(buf, Some(items))?,
        (ColumnKind::BytesList, Value::Null) => list::encode_bytes_list(buf, None)?,
        (ColumnKind::BytesList, Value::BytesList(items)) => {
            list::encode_bytes_list(buf, Some(items))?
        }
        _ => {
            return Err(CodecError::TypeMismatch {
                column: schema.index,
                expected: schema.kind.name(),
            })
        }
    }
    Ok(())
}

/// Decode one column's ordered (key) form into a [`Value`].
pub fn decode_key(buf: &mut ByteBuffer, schema: &ColumnSchema) -> CodecResult<Value> {
    if schema.kind.is_list() {
        return Err(CodecError::UnsupportedKeyType {
            kind: schema.kind.name(),
        });
    }
    Ok(match schema.kind {
        ColumnKind::Bool => scalar::decode_bool(buf)?.map(Value::Bool).unwrap_or(Value::Null),
        ColumnKind::I32 => scalar::decode_i32_ordered(buf)?
            .map(Value::I32)
            .unwrap_or(Value::Null),
        ColumnKind::I64 => scalar::decode_i64_ordered(buf)?
            .map(Value::I64)
            .unwrap_or(Value::Null),
        ColumnKind::F32 => scalar::decode_f32_ordered(buf)?
            .map(Value::F32)
            .unwrap_or(Value::Null),
        ColumnKind::F64 => scalar::decode_f64_ordered(buf)?
            .map(Value::F64)
            .unwrap_or(Value::Null),
        ColumnKind::Bytes => scalar::decode_bytes_ordered(buf)?
            .map(Value::Bytes)
            .unwrap_or(Value::Null),
        _ => unreachable!("list kinds rejected above"),
    })
}

/// Decode one column's unordered (value) form into a [`Value`].
pub fn decode_value(buf: &mut ByteBuffer, schema: &ColumnSchema) -> CodecResult<Value> {
    Ok(match schema.kind {
        ColumnKind::Bool => scalar::decode_bool(buf)?.map(Value::Bool).unwrap_or(Value::Null),
        ColumnKind::I32 => scalar::decode_i32_unordered(buf)?
            .map(Value::I32)
            .unwrap_or(Value::Null),
        ColumnKind::I64 => scalar::decode_i64_unordered(buf)?
            .map(Value::I64)
            .unwrap_or(Value::Null),
        ColumnKind::F32 => scalar::decode_f32_unordered(buf)?
            .map(Value::F32)
            .unwrap_or(Value::Null),
        ColumnKind::F64 => scalar::decode_f64_unordered(buf)?
            .map(Value::F64)
            .unwrap_or(Value::Null),
        ColumnKind::Bytes => scalar::decode_bytes_unordered(buf)?
            .map(Value::Bytes)
            .unwrap_or(Value::Null),
        ColumnKind::BoolList => list::decode_bool_list(buf)?
            .map(Value::BoolList)
            .unwrap_or(Value::Null),
        ColumnKind::I32List => list::decode_i32_list(buf)?
            .map(Value::I32List)
            .unwrap_or(Value::Null),
        ColumnKind::I64List => list::decode_i64_list(buf)?
            .map(Value::I64List)
            .unwrap_or(Value::Null),
        ColumnKind::F32List => list::decode_f32_list(buf)?
            .map(Value::F32List)
            .unwrap_or(Value::Null),
        ColumnKind::F64List => list::decode_f64_list(buf)?
            .map(Value::F64List)
            .unwrap_or(Value::Null),
        ColumnKind::BytesList => list::decode_bytes_list(buf)?
            .map(Value::BytesList)
            .unwrap_or(Value::Null),
    })
}

/// Skip one column's ordered (key) form without materializing a [`Value`].
pub fn skip_key(buf: &mut ByteBuffer, schema: &ColumnSchema) -> CodecResult<()> {
    if schema.kind.is_list() {
        return Err(CodecError::UnsupportedKeyType {
            kind: schema.kind.name(),
        });
    }
    match schema.kind {
        ColumnKind::Bool => scalar::skip_bool(buf),
        ColumnKind::I32 => scalar::skip_i32(buf),
        ColumnKind::I64 => scalar::skip_i64(buf),
        ColumnKind::F32 => scalar::skip_f32(buf),
        ColumnKind::F64 => scalar::skip_f64(buf),
        ColumnKind::Bytes => scalar::skip_bytes_ordered(buf),
        _ => unreachable!("list kinds rejected above"),
    }
}

/// Skip one column's unordered (value) form without materializing a
/// [`Value`]. Used during projection decode to pass over columns the
/// caller did not request.
pub fn skip_value(buf: &mut ByteBuffer, schema: &ColumnSchema) -> CodecResult<()> {
    match schema.kind {
        ColumnKind::Bool => scalar::skip_bool(buf),
        ColumnKind::I32 => scalar::skip_i32(buf),
        ColumnKind::I64 => scalar::skip_i64(buf),
        ColumnKind::F32 => scalar::skip_f32(buf),
        ColumnKind::F64 => scalar::skip_f64(buf),
        ColumnKind::Bytes => scalar::skip_bytes_unordered(buf),
        ColumnKind::BoolList => list::skip_bool_list(buf),
        ColumnKind::I32List => list::skip_i32_list(buf),
        ColumnKind::I64List => list::skip_i64_list(buf),
        ColumnKind::F32List => list::skip_f32_list(buf),
        ColumnKind::F64List => list::skip_f64_list(buf),
        ColumnKind::BytesList => list::skip_bytes_list(buf),
    }
}
