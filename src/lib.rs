//! # byte_huffman
//!
//! Huffman coding over the 256 byte values: build a prefix code from symbol
//! frequencies, pack a payload into bits with it, and unpack those bits
//! again from nothing but the code table.
//!
//! ## Quick Start
//!
//! ```rust
//! use byte_huffman::{build_code_table, count_frequencies, decode, encode, rebuild_tree};
//!
//! let data = b"abracadabra";
//! let table = build_code_table(&count_frequencies(data));
//! let encoded = encode(data, &table)?;
//!
//! // the receiving side only needs the table and the padding
//! let tree = rebuild_tree(&table)?;
//! let decoded = decode(&encoded.packed, &tree, encoded.padding)?;
//! assert_eq!(decoded, data);
//! # Ok::<(), byte_huffman::HuffmanError>(())
//! ```
//!
//! [`HuffmanCodec`] bundles a table with its tree for repeated use.

pub mod bit_vec;
pub mod code_table;
pub mod compressed_data;
pub mod config;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod frequency;
pub mod huffman_codec;
pub mod hufftree;
pub mod progress;

// Internal modules - not part of public API
mod min_heap;

// Re-export main types for convenience
pub use bit_vec::BitVec;
pub use code_table::CodeTable;
pub use compressed_data::EncodedOutput;
pub use config::CodecConfig;
pub use decoder::Decoder;
pub use encoder::Encoder;
pub use error::{HuffmanError, Result};
pub use frequency::{count_frequencies, FrequencyMap};
pub use huffman_codec::HuffmanCodec;
pub use hufftree::{CodeTree, Node, NodeId};
pub use progress::{NoProgress, ProgressObserver};

/// Build the prefix code for `frequencies`.
///
/// An empty map gives an empty table; a single symbol gets the code `0`.
pub fn build_code_table(frequencies: &FrequencyMap) -> CodeTable {
    CodeTree::build(frequencies).code_table()
}

/// Encode `data` with `table`, returning the packed bytes and padding.
pub fn encode(data: &[u8], table: &CodeTable) -> Result<EncodedOutput> {
    Encoder::new(table).encode(data)
}

/// Rebuild a decodable tree from a code table alone.
pub fn rebuild_tree(table: &CodeTable) -> Result<CodeTree> {
    CodeTree::rebuild(table)
}

/// Decode `packed` by walking `tree`, ignoring the final `padding` bits.
pub fn decode(packed: &[u8], tree: &CodeTree, padding: u8) -> Result<Vec<u8>> {
    Decoder::new(tree).decode(packed, padding)
}
