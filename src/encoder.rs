//! Bit-packing encoder.

use tracing::trace;

use crate::bit_vec::BitVec;
use crate::code_table::CodeTable;
use crate::compressed_data::EncodedOutput;
use crate::config::CodecConfig;
use crate::error::{HuffmanError, Result};
use crate::progress::{NoProgress, ProgressObserver, Ticker};

/// Packs bytes into codewords from a fixed [`CodeTable`].
#[derive(Debug, Clone)]
pub struct Encoder<'t> {
    table: &'t CodeTable,
    lookup: [Option<&'t BitVec>; 256],
    config: CodecConfig,
}

impl<'t> Encoder<'t> {
    pub fn new(table: &'t CodeTable) -> Self {
        Self::with_config(table, CodecConfig::default())
    }

    pub fn with_config(table: &'t CodeTable, config: CodecConfig) -> Self {
        let mut lookup = [None; 256];
        for (symbol, code) in table.iter() {
            lookup[symbol as usize] = Some(code);
        }
        Encoder {
            table,
            lookup,
            config,
        }
    }

    pub fn encode(&self, data: &[u8]) -> Result<EncodedOutput> {
        self.encode_with_progress(data, NoProgress)
    }

    /// Concatenate the codeword of every byte, first bit into the most
    /// significant bit of the first output byte, and zero-fill the last byte.
    ///
    /// Fails on the first byte without a codeword; nothing is returned for
    /// the bytes before it.
    pub fn encode_with_progress<P: ProgressObserver>(
        &self,
        data: &[u8],
        observer: P,
    ) -> Result<EncodedOutput> {
        if self.table.is_empty() && !data.is_empty() {
            return Err(HuffmanError::EmptyAlphabetMismatch {
                payload_len: data.len(),
            });
        }

        let mut ticker = Ticker::start(observer, data.len(), self.config.progress_step);
        let mut stream = BitVec::with_capacity(data.len() * 2);
        for (position, &symbol) in data.iter().enumerate() {
            let code = self.lookup[symbol as usize]
                .ok_or(HuffmanError::UnknownSymbol { symbol, position })?;
            stream.extend_from(code);
            ticker.tick();
        }
        ticker.finish();

        let padding = stream.padding();
        trace!(
            input_len = data.len(),
            bits = stream.len(),
            padding,
            "encoded payload"
        );
        Ok(EncodedOutput::new(stream.into_bytes(), padding))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::tests::Recorder;

    #[test]
    fn test_encode_three_symbols() {
        let table = CodeTable::from_strs(&[(0x4F, "0"), (0x56, "1")]).unwrap();
        let out = Encoder::new(&table).encode(&[0x4F, 0x56, 0x4F]).unwrap();
        assert_eq!(out.packed, vec![0x40]);
        assert_eq!(out.padding, 5);
    }

    #[test]
    fn test_encode_exact_byte_boundary() {
        let table = CodeTable::from_strs(&[(b'a', "10"), (b'b', "01")]).unwrap();
        let out = Encoder::new(&table).encode(b"abba").unwrap();
        assert_eq!(out.packed, vec![0b1001_0110]);
        assert_eq!(out.padding, 0);
    }

    #[test]
    fn test_encode_spans_bytes() {
        let table = CodeTable::from_strs(&[(b'x', "111"), (b'y', "0")]).unwrap();
        let out = Encoder::new(&table).encode(b"xxxy").unwrap();
        // 111 111 111 0 -> 11111111 10 + 6 padding
        assert_eq!(out.packed, vec![0xFF, 0b1000_0000]);
        assert_eq!(out.padding, 6);
        assert_eq!(out.bit_len(), 10);
    }

    #[test]
    fn test_encode_empty() {
        let out = Encoder::new(&CodeTable::new()).encode(b"").unwrap();
        assert_eq!(out, EncodedOutput::default());
    }

    #[test]
    fn test_unknown_symbol_aborts() {
        let table = CodeTable::from_strs(&[(b'a', "0"), (b'b', "1")]).unwrap();
        let err = Encoder::new(&table).encode(b"abca").unwrap_err();
        assert_eq!(
            err,
            HuffmanError::UnknownSymbol {
                symbol: b'c',
                position: 2
            }
        );
    }

    #[test]
    fn test_empty_table_with_payload() {
        let err = Encoder::new(&CodeTable::new()).encode(b"x").unwrap_err();
        assert_eq!(err, HuffmanError::EmptyAlphabetMismatch { payload_len: 1 });
    }

    #[test]
    fn test_progress_counts_input_bytes() {
        let table = CodeTable::from_strs(&[(b'a', "0"), (b'b', "1")]).unwrap();
        let config = CodecConfig::default().with_progress_step(3);
        let mut recorder = Recorder::default();
        let out = Encoder::with_config(&table, config)
            .encode_with_progress(b"abababa", &mut recorder)
            .unwrap();

        assert_eq!(out, Encoder::new(&table).encode(b"abababa").unwrap());
        assert_eq!(recorder.total, Some(7));
        assert_eq!(recorder.deltas, vec![3, 3, 1]);
        assert!(recorder.finished);
    }
}
