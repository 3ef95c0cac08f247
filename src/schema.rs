//! Column kinds and the schema vector that describes a record's shape.

use crate::error::{CodecError, CodecResult};

/// The closed set of column kinds this codec understands.
///
/// Dispatch on `ColumnKind` is done with `match`, not a vtable or function
/// pointer table: the set is fixed and known at compile time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColumnKind {
    Bool,
    I32,
    I64,
    F32,
    F64,
    Bytes,
    BoolList,
    I32List,
    I64List,
    F32List,
    F64List,
    BytesList,
}

impl ColumnKind {
    /// True for kinds whose unordered (value) encoding has a fixed byte
    /// width regardless of the value. Scalars are fixed-width; `Bytes` and
    /// every list kind are variable-width.
    pub fn is_fixed_width(self) -> bool {
        matches!(
            self,
            ColumnKind::Bool
                | ColumnKind::I32
                | ColumnKind::I64
                | ColumnKind::F32
                | ColumnKind::F64
        )
    }

    /// True for the list kinds, which cannot participate in a key.
    pub fn is_list(self) -> bool {
        matches!(
            self,
            ColumnKind::BoolList
                | ColumnKind::I32List
                | ColumnKind::I64List
                | ColumnKind::F32List
                | ColumnKind::F64List
                | ColumnKind::BytesList
        )
    }

    /// Name used in [`CodecError::UnsupportedKeyType`] messages.
    pub fn name(self) -> &'static str {
        match self {
            ColumnKind::Bool => "bool",
            ColumnKind::I32 => "i32",
            ColumnKind::I64 => "i64",
            ColumnKind::F32 => "f32",
            ColumnKind::F64 => "f64",
            ColumnKind::Bytes => "bytes",
            ColumnKind::BoolList => "bool_list",
            ColumnKind::I32List => "i32_list",
            ColumnKind::I64List => "i64_list",
            ColumnKind::F32List => "f32_list",
            ColumnKind::F64List => "f64_list",
            ColumnKind::BytesList => "bytes_list",
        }
    }
}

/// One entry in a record's schema vector.
///
/// `index` is the column's logical position in the `Vec<Value>` a caller
/// hands to or receives from a [`crate::record::RecordCodec`]. It is
/// declarative: encode and decode always address a column by this field,
/// never by position within the (possibly reordered) schema vector.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColumnSchema {
    pub kind: ColumnKind,
    pub index: usize,
    pub is_key: bool,
    pub allow_null: bool,
}

impl ColumnSchema {
    pub fn new(kind: ColumnKind, index: usize, is_key: bool, allow_null: bool) -> Self {
        Self {
            kind,
            index,
            is_key,
            allow_null,
        }
    }

    /// Key columns may not be list-typed.
    pub fn validate(&self) -> CodecResult<()> {
        if self.is_key && self.kind.is_list() {
            return Err(CodecError::UnsupportedKeyType {
                kind: self.kind.name(),
            });
        }
        Ok(())
    }
}

/// Reorder the non-key columns of a schema vector so that fixed-width
/// entries precede variable-width entries, each group keeping its original
/// relative order. Key columns are untouched and stay in their original
/// positions at the front.
///
/// This lets a projecting decoder compute, for every non-key column after
/// the last requested one, whether it can stop entirely once it has read
/// past the fixed-width block: every remaining fixed-width column has a
/// known width, so only the variable-width tail ever requires decoding a
/// length to skip past it.
pub fn reorder_for_value_layout(schema: &[ColumnSchema]) -> Vec<ColumnSchema> {
    let mut keys: Vec<ColumnSchema> = schema.iter().copied().filter(|c| c.is_key).collect();
    let mut fixed: Vec<ColumnSchema> = schema
        .iter()
        .copied()
        .filter(|c| !c.is_key && c.kind.is_fixed_width())
        .collect();
    let variable: Vec<ColumnSchema> = schema
        .iter()
        .copied()
        .filter(|c| !c.is_key && !c.kind.is_fixed_width())
        .collect();
    keys.append(&mut fixed);
    keys.extend(variable);
    keys
}

#[cfg(test)]
mod tests {
    use super::*;

    fn col(kind: ColumnKind, index: usize, is_key: bool) -> ColumnSchema {
        ColumnSchema::new(kind, index, is_key, false)
    }

    #[test]
    fn reorder_moves_variable_width_after_fixed() {
        let schema = vec![
            col(ColumnKind::Bytes, 0, false),
            col(ColumnKind::I32, 1, false),
            col(ColumnKind::BytesList, 2, false),
            col(ColumnKind::Bool, 3, false),
        ];
        let reordered = reorder_for_value_layout(&schema);
        let kinds: Vec<_> = reordered.iter().map(|c| c.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ColumnKind::I32,
                ColumnKind::Bool,
                ColumnKind::Bytes,
                ColumnKind::BytesList,
            ]
        );
    }

    #[test]
    fn reorder_keeps_keys_first_and_untouched() {
        let schema = vec![
            col(ColumnKind::Bytes, 0, false),
            col(ColumnKind::I64, 1, true),
            col(ColumnKind::I32, 2, false),
        ];
        let reordered = reorder_for_value_layout(&schema);
        assert_eq!(reordered[0].index, 1);
        assert!(reordered[0].is_key);
    }

    #[test]
    fn list_key_column_fails_validation() {
        let c = col(ColumnKind::I32List, 0, true);
        assert!(matches!(
            c.validate(),
            Err(CodecError::UnsupportedKeyType { .. })
        ));
    }

    #[test]
    fn scalar_key_column_validates() {
        let c = col(ColumnKind::I64, 0, true);
        assert!(c.validate().is_ok());
    }
}
