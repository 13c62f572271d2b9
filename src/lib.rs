//! # canonical_huffman
//!
//! Canonical Huffman codes over text, with the encoded form kept as a plain
//! string of `'0'`/`'1'` characters.
//!
//! ## Quick Start
//!
//! ```rust
//! use canonical_huffman::{build_code_table, decode, encode};
//!
//! let table = build_code_table("abracadabra")?;
//! assert_eq!(table.get('a'), Some("0"));
//! assert_eq!(table.get('r'), Some("10"));
//!
//! let bits = encode("abracadabra", &table)?;
//! assert_eq!(decode(&bits, &table)?, "abracadabra");
//! # Ok::<(), canonical_huffman::HuffmanError>(())
//! ```
//!
//! The code table is not embedded in the encoded output. Keep it next to the
//! bits, see [`metadata`] for a compact stored form.

pub mod code_lengths;
pub mod code_table;
pub mod error;
pub mod frequency;
pub mod huffman_codec;
pub mod hufftree;
pub mod metadata;

// Internal modules - not part of public API
mod min_heap;

// Re-export main types for convenience
pub use code_table::CodeTable;
pub use error::HuffmanError;
pub use huffman_codec::{CodecConfig, EncodeStrategy, HuffmanCodec};
pub use hufftree::HuffmanTree;
pub use min_heap::HeapErr;

/// Builds the canonical code table for the symbol distribution of `text`.
pub fn build_code_table(text: &str) -> error::Result<CodeTable> {
    CodeTable::build(text)
}

/// Encodes `text` with `table`, symbol by symbol.
pub fn encode(text: &str, table: &CodeTable) -> error::Result<String> {
    huffman_codec::encode_text(table, text, EncodeStrategy::default())
}

/// Decodes a `'0'`/`'1'` string produced with `table`.
pub fn decode(bits: &str, table: &CodeTable) -> error::Result<String> {
    huffman_codec::decode_bits(table, bits)
}
