//! Byte cursor over raw RTF input.

/// Forward-only cursor over a byte slice.
///
/// Every accessor is bounds-checked: peeking past the end yields `None` and
/// advancing past the end clamps to the end of input.
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    #[must_use]
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    /// Byte under the cursor.
    #[inline]
    #[must_use]
    pub fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    /// Consume and return the byte under the cursor.
    #[inline]
    pub fn advance(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.pos += 1;
        Some(byte)
    }

    #[inline]
    pub fn advance_by(&mut self, n: usize) {
        self.pos = self.pos.saturating_add(n).min(self.bytes.len());
    }

    /// Up to `n` bytes starting at the cursor, without consuming them.
    #[must_use]
    pub fn lookahead(&self, n: usize) -> &'a [u8] {
        let end = self.pos.saturating_add(n).min(self.bytes.len());
        &self.bytes[self.pos..end]
    }

    #[inline]
    #[must_use]
    pub fn position(&self) -> usize {
        self.pos
    }
}
