//! Record-level framing on top of the per-column codecs in [`crate::codec`].
//!
//! A record's key is `{namespace:1}{common_id:8 BE}{key columns...}` and its
//! value is `{schema_version:4 BE}{non-key columns...}`. [`RecordCodec`]
//! owns a schema vector (reordered so non-key fixed-width columns precede
//! non-key variable-width ones, via [`crate::schema::reorder_for_value_layout`])
//! and exposes full, key-only, and projected decode paths over it.

use crate::buf::ByteBuffer;
use crate::codec;
use crate::error::{CodecError, CodecResult};
use crate::schema::{reorder_for_value_layout, ColumnSchema};
use crate::value::Value;

/// Encodes and decodes records against one fixed schema.
///
/// Construction validates every column (rejecting list-typed keys) and
/// reorders the non-key columns for value layout. `namespace` and
/// `common_id` are embedded in every encoded key and checked on decode, so a
/// decoder configured for the wrong table or id rejects the read instead of
/// silently misinterpreting it.
#[derive(Clone, Debug)]
pub struct RecordCodec {
    namespace: u8,
    common_id: i64,
    schema_version: u32,
    schema: Vec<ColumnSchema>,
}

impl RecordCodec {
    /// Build a codec from a schema vector in declaration order.
    ///
    /// The vector is reordered internally for value layout; `columns` itself
    /// does not need to be pre-sorted.
    pub fn new(
        namespace: u8,
        common_id: i64,
        schema_version: u32,
        columns: Vec<ColumnSchema>,
    ) -> CodecResult<Self> {
        for col in &columns {
            col.validate()?;
        }
        Ok(Self {
            namespace,
            common_id,
            schema_version,
            schema: reorder_for_value_layout(&columns),
        })
    }

    fn key_columns(&self) -> impl Iterator<Item = &ColumnSchema> {
        self.schema.iter().filter(|c| c.is_key)
    }

    fn value_columns(&self) -> impl Iterator<Item = &ColumnSchema> {
        self.schema.iter().filter(|c| !c.is_key)
    }

    fn column_count(&self) -> usize {
        self.schema.iter().map(|c| c.index + 1).max().unwrap_or(0)
    }

    fn value_at<'a>(&self, record: &'a [Value], schema: &ColumnSchema) -> CodecResult<&'a Value> {
        record.get(schema.index).ok_or(CodecError::TypeMismatch {
            column: schema.index,
            expected: schema.kind.name(),
        })
    }

    /// Encode the key-column prefix.
    pub fn encode_key(&self, record: &[Value]) -> CodecResult<Vec<u8>> {
        let mut buf = ByteBuffer::new(9);
        buf.write_u8(self.namespace);
        buf.write_u64_be(self.common_id as u64);
        for schema in self.key_columns() {
            let value = self.value_at(record, schema)?;
            codec::encode_key(&mut buf, schema, value)?;
        }
        Ok(buf.into_bytes())
    }

    /// Encode the non-key columns plus the schema version header.
    pub fn encode_value(&self, record: &[Value]) -> CodecResult<Vec<u8>> {
        let mut buf = ByteBuffer::new(16);
        buf.write_u32_be(self.schema_version);
        for schema in self.value_columns() {
            let value = self.value_at(record, schema)?;
            codec::encode_value(&mut buf, schema, value)?;
        }
        Ok(buf.into_bytes())
    }

    /// Encode both the key and value halves of a record.
    pub fn encode(&self, record: &[Value]) -> CodecResult<(Vec<u8>, Vec<u8>)> {
        Ok((self.encode_key(record)?, self.encode_value(record)?))
    }

    /// Encode the smallest key prefix (namespace + `common_id`) that could
    /// belong to this table — the inclusive lower bound of a range scan.
    pub fn encode_min_key_prefix(&self) -> Vec<u8> {
        let mut buf = ByteBuffer::new(9);
        buf.write_u8(self.namespace);
        buf.write_u64_be(self.common_id as u64);
        buf.into_bytes()
    }

    /// Encode the smallest key prefix strictly greater than every key this
    /// table could produce — the exclusive upper bound of a range scan.
    pub fn encode_max_key_prefix(&self) -> CodecResult<Vec<u8>> {
        if self.common_id == i64::MAX {
            return Err(CodecError::KeyOverflow);
        }
        let mut buf = ByteBuffer::new(9);
        buf.write_u8(self.namespace);
        buf.write_u64_be((self.common_id + 1) as u64);
        Ok(buf.into_bytes())
    }

    fn check_key_prefix(&self, buf: &mut ByteBuffer) -> CodecResult<()> {
        let namespace = buf.read_u8()?;
        let common_id = buf.read_u64_be()? as i64;
        if namespace != self.namespace || common_id != self.common_id {
            return Err(CodecError::PrefixMismatch);
        }
        Ok(())
    }

    fn check_schema_version(&self, buf: &mut ByteBuffer) -> CodecResult<()> {
        let found = buf.read_u32_be()?;
        if found > self.schema_version {
            return Err(CodecError::SchemaTooNew {
                found,
                max: self.schema_version,
            });
        }
        Ok(())
    }

    /// Decode only the key-column prefix of a record, leaving non-key slots
    /// as [`Value::Null`].
    pub fn decode_key(&self, key_bytes: &[u8]) -> CodecResult<Vec<Value>> {
        let mut buf = ByteBuffer::from_bytes(key_bytes.to_vec());
        self.check_key_prefix(&mut buf)?;
        let mut record = vec![Value::Null; self.column_count()];
        for schema in self.key_columns() {
            record[schema.index] = codec::decode_key(&mut buf, schema)?;
        }
        Ok(record)
    }

    /// Decode only the non-key columns of a record, leaving key slots as
    /// [`Value::Null`].
    pub fn decode_value(&self, value_bytes: &[u8]) -> CodecResult<Vec<Value>> {
        let mut buf = ByteBuffer::from_bytes(value_bytes.to_vec());
        self.check_schema_version(&mut buf)?;
        let mut record = vec![Value::Null; self.column_count()];
        for schema in self.value_columns() {
            if buf.is_end() {
                break;
            }
            record[schema.index] = codec::decode_value(&mut buf, schema)?;
        }
        Ok(record)
    }

    /// Decode a full record from its key and value halves.
    ///
    /// A value buffer truncated before its last columns is forward-compatible:
    /// once the cursor reaches the end, every remaining non-key column
    /// decodes as [`Value::Null`] rather than failing.
    pub fn decode(&self, key_bytes: &[u8], value_bytes: &[u8]) -> CodecResult<Vec<Value>> {
        let mut buf = ByteBuffer::from_bytes(key_bytes.to_vec());
        self.check_key_prefix(&mut buf)?;
        let mut record = vec![Value::Null; self.column_count()];
        for schema in self.key_columns() {
            record[schema.index] = codec::decode_key(&mut buf, schema)?;
        }

        let mut vbuf = ByteBuffer::from_bytes(value_bytes.to_vec());
        self.check_schema_version(&mut vbuf)?;
        for schema in self.value_columns() {
            if vbuf.is_end() {
                break;
            }
            record[schema.index] = codec::decode_value(&mut vbuf, schema)?;
        }
        Ok(record)
    }

    /// Decode only the requested logical column indices.
    ///
    /// The output vector has exactly `requested.len()` entries, in the
    /// caller's requested order — not schema order. A requested index that
    /// appears more than once fills every matching output slot; a requested
    /// index absent from the schema is left as [`Value::Null`] rather than
    /// rejected, the same way a caller reading a record with no value for
    /// that column would see a null.
    pub fn decode_projected(
        &self,
        key_bytes: &[u8],
        value_bytes: &[u8],
        requested: &[usize],
    ) -> CodecResult<Vec<Value>> {
        let mut slots_for: std::collections::HashMap<usize, Vec<usize>> =
            std::collections::HashMap::new();
        for (slot, &idx) in requested.iter().enumerate() {
            slots_for.entry(idx).or_default().push(slot);
        }
        let mut out = vec![Value::Null; requested.len()];

        let mut kbuf = ByteBuffer::from_bytes(key_bytes.to_vec());
        self.check_key_prefix(&mut kbuf)?;
        for schema in self.key_columns() {
            match slots_for.get(&schema.index) {
                Some(slots) => {
                    let value = codec::decode_key(&mut kbuf, schema)?;
                    for &slot in slots {
                        out[slot] = value.clone();
                    }
                }
                None => codec::skip_key(&mut kbuf, schema)?,
            }
        }

        let mut vbuf = ByteBuffer::from_bytes(value_bytes.to_vec());
        self.check_schema_version(&mut vbuf)?;
        for schema in self.value_columns() {
            if vbuf.is_end() {
                break;
            }
            match slots_for.get(&schema.index) {
                Some(slots) => {
                    let value = codec::decode_value(&mut vbuf, schema)?;
                    for &slot in slots {
                        out[slot] = value.clone();
                    }
                }
                None => codec::skip_value(&mut vbuf, schema)?,
            }
        }

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ColumnKind;

    fn sample_codec() -> RecordCodec {
        RecordCodec::new(
            1,
            42,
            1,
            vec![
                ColumnSchema::new(ColumnKind::I64, 0, true, false),
                ColumnSchema::new(ColumnKind::Bytes, 1, false, false),
                ColumnSchema::new(ColumnKind::I32, 2, false, true),
                ColumnSchema::new(ColumnKind::I32List, 3, false, true),
            ],
        )
        .unwrap()
    }

    #[test]
    fn full_roundtrip() {
        let codec = sample_codec();
        let record = vec![
            Value::I64(-10),
            Value::Bytes(b"hello".to_vec()),
            Value::I32(7),
            Value::I32List(vec![1, 2, 3]),
        ];
        let (key, value) = codec.encode(&record).unwrap();
        let decoded = codec.decode(&key, &value).unwrap();
        assert_eq!(decoded, record);
    }

    #[test]
    fn truncated_value_buffer_decodes_trailing_columns_as_null() {
        let codec = sample_codec();
        let record = vec![
            Value::I64(5),
            Value::Bytes(b"x".to_vec()),
            Value::I32(1),
            Value::Null,
        ];
        let (key, value) = codec.encode(&record).unwrap();
        // Truncate the value buffer to just the schema-version header: every
        // non-key column should decode as null instead of erroring.
        let truncated = &value[..4];
        let decoded = codec.decode(&key, truncated).unwrap();
        assert_eq!(decoded[0], Value::I64(5));
        assert_eq!(decoded[1], Value::Null);
        assert_eq!(decoded[2], Value::Null);
        assert_eq!(decoded[3], Value::Null);
    }

    #[test]
    fn scenario_i32_key_ordering_negative_before_positive() {
        // Mirrors spec scenario 2: bytes(key(-1)) < bytes(key(1)).
        let codec = RecordCodec::new(
            b'r',
            100,
            1,
            vec![ColumnSchema::new(ColumnKind::I32, 0, true, false)],
        )
        .unwrap();
        let neg = codec.encode_key(&[Value::I32(-1)]).unwrap();
        let pos = codec.encode_key(&[Value::I32(1)]).unwrap();
        assert!(neg < pos);
    }

    #[test]
    fn scenario_empty_bytes_ordered_form_is_nine_bytes_marker_f7() {
        // Mirrors spec scenario 5: "" -> 01 00 00 00 00 00 00 00 00 F7.
        let s = ColumnSchema::new(ColumnKind::Bytes, 0, true, false);
        let mut buf = ByteBuffer::new(16);
        crate::codec::encode_key(&mut buf, &s, &Value::Bytes(vec![])).unwrap();
        let expected: Vec<u8> = vec![0x01, 0, 0, 0, 0, 0, 0, 0, 0, 0xF7];
        assert_eq!(buf.into_bytes(), expected);
    }

    #[test]
    fn scenario_f64_ordered_encoding_matches_spec_vectors() {
        // Mirrors spec scenarios 3 and 4.
        let s = ColumnSchema::new(ColumnKind::F64, 0, true, false);

        let mut pos_one = ByteBuffer::new(9);
        crate::codec::encode_key(&mut pos_one, &s, &Value::F64(1.0)).unwrap();
        let mut expected_pos = vec![0x01u8];
        expected_pos.extend_from_slice(&[0xBF, 0xF0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(pos_one.into_bytes(), expected_pos);

        let mut neg_one = ByteBuffer::new(9);
        crate::codec::encode_key(&mut neg_one, &s, &Value::F64(-1.0)).unwrap();
        let mut expected_neg = vec![0x01u8];
        expected_neg.extend_from_slice(&[0x40, 0x0F, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF]);
        assert_eq!(neg_one.into_bytes(), expected_neg);
    }

    #[test]
    fn scenario_i32_list_value_encoding_matches_spec_vector() {
        // Mirrors spec scenario 6: list<i32> [1, 2, 3].
        let s = ColumnSchema::new(ColumnKind::I32List, 0, false, true);
        let mut buf = ByteBuffer::new(32);
        crate::codec::encode_value(&mut buf, &s, &Value::I32List(vec![1, 2, 3])).unwrap();
        let expected: Vec<u8> = vec![
            0x01, 0, 0, 0, 3, 0, 0, 0, 1, 0, 0, 0, 2, 0, 0, 0, 3,
        ];
        assert_eq!(buf.into_bytes(), expected);
    }

    #[test]
    fn decode_key_only_leaves_value_columns_null() {
        let codec = sample_codec();
        let record = vec![
            Value::I64(5),
            Value::Bytes(b"x".to_vec()),
            Value::I32(1),
            Value::Null,
        ];
        let key = codec.encode_key(&record).unwrap();
        let decoded = codec.decode_key(&key).unwrap();
        assert_eq!(decoded[0], Value::I64(5));
        assert_eq!(decoded[1], Value::Null);
        assert_eq!(decoded[2], Value::Null);
    }

    #[test]
    fn prefix_mismatch_detected() {
        let codec = sample_codec();
        let other = RecordCodec::new(1, 99, 1, vec![ColumnSchema::new(ColumnKind::I64, 0, true, false)])
            .unwrap();
        let record = vec![Value::I64(5)];
        let key = other.encode_key(&record).unwrap();
        assert!(matches!(
            codec.decode_key(&key),
            Err(CodecError::PrefixMismatch)
        ));
    }

    #[test]
    fn schema_too_new_detected() {
        let codec = sample_codec();
        let newer = RecordCodec::new(
            1,
            42,
            2,
            vec![
                ColumnSchema::new(ColumnKind::I64, 0, true, false),
                ColumnSchema::new(ColumnKind::Bytes, 1, false, false),
                ColumnSchema::new(ColumnKind::I32, 2, false, true),
                ColumnSchema::new(ColumnKind::I32List, 3, false, true),
            ],
        )
        .unwrap();
        let record = vec![
            Value::I64(5),
            Value::Bytes(b"x".to_vec()),
            Value::I32(1),
            Value::Null,
        ];
        let value = newer.encode_value(&record).unwrap();
        let key = codec.encode_key(&record).unwrap();
        assert!(matches!(
            codec.decode(&key, &value),
            Err(CodecError::SchemaTooNew { found: 2, max: 1 })
        ));
    }

    #[test]
    fn projected_decode_only_materializes_requested_columns() {
        let codec = sample_codec();
        let record = vec![
            Value::I64(5),
            Value::Bytes(b"skip-me".to_vec()),
            Value::I32(77),
            Value::I32List(vec![9]),
        ];
        let (key, value) = codec.encode(&record).unwrap();
        let projected = codec.decode_projected(&key, &value, &[0, 2]).unwrap();
        assert_eq!(projected.len(), 2);
        assert_eq!(projected[0], Value::I64(5));
        assert_eq!(projected[1], Value::I32(77));
    }

    #[test]
    fn projected_decode_preserves_caller_requested_order() {
        let codec = sample_codec();
        let record = vec![
            Value::I64(5),
            Value::Bytes(b"x".to_vec()),
            Value::I32(77),
            Value::Null,
        ];
        let (key, value) = codec.encode(&record).unwrap();
        // Requested out of ascending order: output must follow caller order,
        // not schema order.
        let projected = codec.decode_projected(&key, &value, &[2, 0]).unwrap();
        assert_eq!(projected.len(), 2);
        assert_eq!(projected[0], Value::I32(77));
        assert_eq!(projected[1], Value::I64(5));
    }

    #[test]
    fn projected_decode_duplicate_index_fills_every_slot() {
        let codec = sample_codec();
        let record = vec![
            Value::I64(5),
            Value::Bytes(b"x".to_vec()),
            Value::I32(77),
            Value::Null,
        ];
        let (key, value) = codec.encode(&record).unwrap();
        let projected = codec.decode_projected(&key, &value, &[0, 0]).unwrap();
        assert_eq!(projected, vec![Value::I64(5), Value::I64(5)]);
    }

    #[test]
    fn projected_decode_absent_index_is_null() {
        let codec = sample_codec();
        let record = vec![
            Value::I64(5),
            Value::Bytes(b"x".to_vec()),
            Value::I32(1),
            Value::Null,
        ];
        let (key, value) = codec.encode(&record).unwrap();
        let projected = codec.decode_projected(&key, &value, &[0, 99]).unwrap();
        assert_eq!(projected.len(), 2);
        assert_eq!(projected[0], Value::I64(5));
        assert_eq!(projected[1], Value::Null);
    }

    #[test]
    fn max_key_prefix_overflow_detected() {
        let codec = RecordCodec::new(
            1,
            i64::MAX,
            1,
            vec![ColumnSchema::new(ColumnKind::I64, 0, true, false)],
        )
        .unwrap();
        assert!(matches!(
            codec.encode_max_key_prefix(),
            Err(CodecError::KeyOverflow)
        ));
    }

    #[test]
    fn min_and_max_key_prefix_bracket_actual_keys() {
        let codec = sample_codec();
        let record = vec![
            Value::I64(5),
            Value::Bytes(b"x".to_vec()),
            Value::I32(1),
            Value::Null,
        ];
        let key = codec.encode_key(&record).unwrap();
        let min = codec.encode_min_key_prefix();
        let max = codec.encode_max_key_prefix().unwrap();
        assert!(min <= key);
        assert!(key < max);
    }

    #[test]
    fn list_column_cannot_be_a_key() {
        let err = RecordCodec::new(
            1,
            1,
            1,
            vec![ColumnSchema::new(ColumnKind::I32List, 0, true, false)],
        )
        .unwrap_err();
        assert!(matches!(err, CodecError::UnsupportedKeyType { .. }));
    }
}
