/// Packed codewords plus the number of zero bits appended to fill the last
/// byte.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncodedOutput {
    pub packed: Vec<u8>,
    /// Filler bits in the final byte, always in `0..=7`.
    pub padding: u8,
}

impl EncodedOutput {
    pub fn new(packed: Vec<u8>, padding: u8) -> Self {
        EncodedOutput { packed, padding }
    }

    /// Number of content bits, excluding padding.
    pub fn bit_len(&self) -> usize {
        (self.packed.len() * 8).saturating_sub(self.padding as usize)
    }

    pub fn is_empty(&self) -> bool {
        self.packed.is_empty()
    }

    pub fn into_parts(self) -> (Vec<u8>, u8) {
        (self.packed, self.padding)
    }
}
