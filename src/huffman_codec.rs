use tracing::debug;

use crate::code_table::CodeTable;
use crate::compressed_data::EncodedOutput;
use crate::config::CodecConfig;
use crate::decoder::Decoder;
use crate::encoder::Encoder;
use crate::error::Result;
use crate::frequency::FrequencyMap;
use crate::hufftree::CodeTree;
use crate::progress::ProgressObserver;

/// A code table together with the tree rebuilt from it, ready to encode
/// and decode any payload over the table's alphabet.
#[derive(Debug, Clone)]
pub struct HuffmanCodec {
    table: CodeTable,
    tree: CodeTree,
    config: CodecConfig,
}

impl HuffmanCodec {
    /// Count `data` and build its code.
    pub fn train(data: &[u8]) -> Self {
        Self::from_frequencies(&FrequencyMap::from_bytes(data))
    }

    pub fn from_frequencies(frequencies: &FrequencyMap) -> Self {
        let built = CodeTree::build(frequencies);
        let table = built.code_table();
        debug!(
            symbols = table.len(),
            max_code_len = table.max_code_len(),
            "trained codec"
        );
        // a built tree already walks like a rebuilt one
        HuffmanCodec {
            table,
            tree: built,
            config: CodecConfig::default(),
        }
    }

    /// Use a table obtained elsewhere, e.g. read back from storage.
    pub fn from_table(table: CodeTable) -> Result<Self> {
        let tree = CodeTree::rebuild(&table)?;
        Ok(HuffmanCodec {
            table,
            tree,
            config: CodecConfig::default(),
        })
    }

    pub fn with_config(mut self, config: CodecConfig) -> Result<Self> {
        config.validate()?;
        self.config = config;
        Ok(self)
    }

    pub fn table(&self) -> &CodeTable {
        &self.table
    }

    pub fn tree(&self) -> &CodeTree {
        &self.tree
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    pub fn encode(&self, data: &[u8]) -> Result<EncodedOutput> {
        Encoder::with_config(&self.table, self.config.clone()).encode(data)
    }

    pub fn encode_with_progress<P: ProgressObserver>(
        &self,
        data: &[u8],
        observer: P,
    ) -> Result<EncodedOutput> {
        Encoder::with_config(&self.table, self.config.clone()).encode_with_progress(data, observer)
    }

    pub fn decode(&self, encoded: &EncodedOutput) -> Result<Vec<u8>> {
        Decoder::with_config(&self.tree, self.config.clone())
            .decode(&encoded.packed, encoded.padding)
    }

    pub fn decode_with_progress<P: ProgressObserver>(
        &self,
        encoded: &EncodedOutput,
        observer: P,
    ) -> Result<Vec<u8>> {
        Decoder::with_config(&self.tree, self.config.clone()).decode_with_progress(
            &encoded.packed,
            encoded.padding,
            observer,
        )
    }
}
