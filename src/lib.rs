//! Memory-comparable key/value codec for tabular rows.
//!
//! A [`record::RecordCodec`] turns a `Vec<`[`value::Value`]`>` into two byte
//! strings: a key whose lexicographic order matches the natural order of
//! its key columns, and a value holding the remaining columns in a compact
//! form. See `SPEC_FULL.md` for the on-wire layout.

pub mod buf;
pub mod codec;
pub mod error;
pub mod record;
pub mod schema;
pub mod value;

pub use buf::ByteBuffer;
pub use error::{CodecError, CodecResult};
pub use record::RecordCodec;
pub use schema::{reorder_for_value_layout, ColumnKind, ColumnSchema};
pub use value::Value;
