//! Tree-walking decoder.

use tracing::trace;

use crate::bit_vec::msb_bits;
use crate::config::CodecConfig;
use crate::error::{HuffmanError, Result};
use crate::hufftree::{CodeTree, Node};
use crate::progress::{NoProgress, ProgressObserver, Ticker};

/// Walks a [`CodeTree`] bit by bit to recover the original bytes.
///
/// The tree should come from [`CodeTree::rebuild`] over the table the
/// payload was encoded with.
#[derive(Debug, Clone)]
pub struct Decoder<'t> {
    tree: &'t CodeTree,
    config: CodecConfig,
}

impl<'t> Decoder<'t> {
    pub fn new(tree: &'t CodeTree) -> Self {
        Self::with_config(tree, CodecConfig::default())
    }

    pub fn with_config(tree: &'t CodeTree, config: CodecConfig) -> Self {
        Decoder { tree, config }
    }

    pub fn decode(&self, packed: &[u8], padding: u8) -> Result<Vec<u8>> {
        self.decode_with_progress(packed, padding, NoProgress)
    }

    pub fn decode_with_progress<P: ProgressObserver>(
        &self,
        packed: &[u8],
        padding: u8,
        observer: P,
    ) -> Result<Vec<u8>> {
        self.check_padding(packed, padding)?;

        let Some(root) = self.tree.root() else {
            if packed.is_empty() {
                return Ok(Vec::new());
            }
            return Err(HuffmanError::EmptyAlphabetMismatch {
                payload_len: packed.len(),
            });
        };

        let content_bits = packed.len() * 8 - padding as usize;
        let nodes = self.tree.nodes();
        let mut ticker = Ticker::start(observer, packed.len(), self.config.progress_step);
        let mut output = Vec::with_capacity(content_bits / 2);
        let mut current = root;

        for (offset, bit) in msb_bits(packed).take(content_bits).enumerate() {
            current = match nodes[current] {
                Node::Internal { left, right, .. } => {
                    if bit {
                        right
                    } else {
                        left
                    }
                }
                Node::Leaf { .. } | Node::Placeholder => {
                    return Err(HuffmanError::malformed("code tree root is not internal"));
                }
            };
            match nodes[current] {
                Node::Leaf { symbol, .. } => {
                    output.push(symbol);
                    current = root;
                }
                Node::Placeholder => {
                    return Err(HuffmanError::InvalidCodeword { bit_offset: offset });
                }
                Node::Internal { .. } => {}
            }
            if offset % 8 == 7 {
                ticker.tick();
            }
        }
        // the byte holding the padding
        for _ in content_bits / 8..packed.len() {
            ticker.tick();
        }
        ticker.finish();

        if current != root {
            return Err(HuffmanError::TruncatedStream {
                bit_offset: content_bits,
                decoded: output.len(),
            });
        }

        trace!(
            packed_len = packed.len(),
            padding,
            output_len = output.len(),
            "decoded payload"
        );
        Ok(output)
    }

    /// Padding must fit in one byte and cannot exceed the payload; in strict
    /// mode the padding bits must also be zero.
    fn check_padding(&self, packed: &[u8], padding: u8) -> Result<()> {
        let in_range = padding <= 7 && (padding == 0 || !packed.is_empty());
        if !in_range {
            return Err(HuffmanError::PaddingRange {
                padding,
                packed_len: packed.len(),
            });
        }
        if self.config.strict_padding && padding > 0 {
            let mask = (1u8 << padding) - 1;
            if packed.last().is_some_and(|&tail| tail & mask != 0) {
                return Err(HuffmanError::NonZeroPadding { padding });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code_table::CodeTable;
    use crate::progress::tests::Recorder;

    fn tree(pairs: &[(u8, &str)]) -> CodeTree {
        CodeTree::rebuild(&CodeTable::from_strs(pairs).unwrap()).unwrap()
    }

    #[test]
    fn test_decode_three_symbols() {
        let tree = tree(&[(0x4F, "0"), (0x56, "1")]);
        let out = Decoder::new(&tree).decode(&[0x40], 5).unwrap();
        assert_eq!(out, vec![0x4F, 0x56, 0x4F]);
    }

    #[test]
    fn test_decode_single_symbol() {
        let tree = tree(&[(0x41, "0")]);
        let out = Decoder::new(&tree).decode(&[0x00], 3).unwrap();
        assert_eq!(out, vec![0x41; 5]);
    }

    #[test]
    fn test_decode_codes_across_bytes() {
        let tree = tree(&[(b'x', "111"), (b'y', "0"), (b'z', "10"), (b'w', "110")]);
        let out = Decoder::new(&tree).decode(&[0xFF, 0b1000_0000], 6).unwrap();
        assert_eq!(out, b"xxxy");
    }

    #[test]
    fn test_decode_empty() {
        let empty = CodeTree::default();
        assert!(Decoder::new(&empty).decode(&[], 0).unwrap().is_empty());

        let tree = tree(&[(1, "0"), (2, "1")]);
        assert!(Decoder::new(&tree).decode(&[], 0).unwrap().is_empty());
    }

    #[test]
    fn test_empty_tree_with_payload() {
        let err = Decoder::new(&CodeTree::default())
            .decode(&[0x12], 0)
            .unwrap_err();
        assert_eq!(err, HuffmanError::EmptyAlphabetMismatch { payload_len: 1 });
    }

    #[test]
    fn test_padding_range() {
        let tree = tree(&[(1, "0"), (2, "1")]);
        let decoder = Decoder::new(&tree);
        assert_eq!(
            decoder.decode(&[0x00], 8).unwrap_err(),
            HuffmanError::PaddingRange {
                padding: 8,
                packed_len: 1
            }
        );
        assert_eq!(
            decoder.decode(&[], 2).unwrap_err(),
            HuffmanError::PaddingRange {
                padding: 2,
                packed_len: 0
            }
        );
    }

    #[test]
    fn test_truncated_stream() {
        let tree = tree(&[(b'a', "0"), (b'b', "10"), (b'c', "11")]);
        // "0 1" then padding: the walk stops inside b/c
        let err = Decoder::new(&tree).decode(&[0b0100_0000], 6).unwrap_err();
        assert_eq!(
            err,
            HuffmanError::TruncatedStream {
                bit_offset: 2,
                decoded: 1
            }
        );
    }

    #[test]
    fn test_placeholder_branch_is_rejected() {
        let tree = tree(&[(b'q', "0")]);
        let err = Decoder::new(&tree).decode(&[0b0010_0000], 4).unwrap_err();
        assert_eq!(err, HuffmanError::InvalidCodeword { bit_offset: 2 });
    }

    #[test]
    fn test_strict_padding() {
        let tree = tree(&[(0x4F, "0"), (0x56, "1")]);
        let strict = CodecConfig::default().with_strict_padding(true);

        let err = Decoder::with_config(&tree, strict.clone())
            .decode(&[0x41], 5)
            .unwrap_err();
        assert_eq!(err, HuffmanError::NonZeroPadding { padding: 5 });

        // lenient mode ignores the set filler bit
        let out = Decoder::new(&tree).decode(&[0x41], 5).unwrap();
        assert_eq!(out, vec![0x4F, 0x56, 0x4F]);

        let out = Decoder::with_config(&tree, strict).decode(&[0x40], 5).unwrap();
        assert_eq!(out, vec![0x4F, 0x56, 0x4F]);
    }

    #[test]
    fn test_progress_counts_packed_bytes() {
        let tree = tree(&[(1, "0"), (2, "1")]);
        let mut recorder = Recorder::default();
        Decoder::with_config(&tree, CodecConfig::default().with_progress_step(1))
            .decode_with_progress(&[0xAA, 0x55, 0xF0], 4, &mut recorder)
            .unwrap();
        assert_eq!(recorder.total, Some(3));
        assert_eq!(recorder.deltas, vec![1, 1, 1]);
        assert!(recorder.finished);
    }
}
