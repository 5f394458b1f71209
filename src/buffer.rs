//! Growable append-only byte buffer used by the serializer.

use crate::error::{Error, Result};

/// Like a byte `Vec`, but `reserve` always grows capacity to the next power
/// of two and failed growth is a recoverable [`Error`] instead of an abort.
#[derive(Debug, Default)]
pub struct Buffer {
    inner: Vec<u8>,
}

impl Buffer {
    pub fn new() -> Self {
        Buffer { inner: Vec::new() }
    }

    pub fn with_capacity(cap: usize) -> Result<Self> {
        let mut buffer = Buffer::new();
        buffer.reserve(cap)?;
        Ok(buffer)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.inner
    }

    /// Grows capacity, if needed, to the next power of two that fits
    /// `additional` more bytes past the current length.
    pub fn reserve(&mut self, additional: usize) -> Result<()> {
        let needed = self.inner.len().saturating_add(additional);
        if needed > self.inner.capacity() {
            let cap = needed.next_power_of_two().max(4);
            self.inner
                .try_reserve(cap - self.inner.len())
                .map_err(|_| Error::allocation_failure())?;
        }
        Ok(())
    }

    pub fn push(&mut self, byte: u8) -> Result<()> {
        self.reserve(1)?;
        self.inner.push(byte);
        Ok(())
    }

    pub fn extend_from_slice(&mut self, slice: &[u8]) -> Result<()> {
        self.reserve(slice.len())?;
        self.inner.extend_from_slice(slice);
        Ok(())
    }

    pub fn push_str(&mut self, s: &str) -> Result<()> {
        self.extend_from_slice(s.as_bytes())
    }

    /// Appends `byte` repeated `times`, used for pretty-print indentation.
    pub fn extend_repeating(&mut self, byte: u8, times: usize) -> Result<()> {
        self.reserve(times)?;
        self.inner.resize(self.inner.len() + times, byte);
        Ok(())
    }

    /// Removes a single trailing comma, if present.
    ///
    /// # Safety
    /// Caller must guarantee the buffer is non-empty.
    pub(crate) unsafe fn undo_comma(&mut self) {
        let i = self.inner.len() - 1;
        if *self.inner.get_unchecked(i) == b',' {
            self.inner.set_len(i);
        }
    }

    /// Drops the trailing byte if it equals `byte`.
    ///
    /// # Safety
    /// Caller must guarantee the buffer is non-empty.
    pub(crate) unsafe fn undo_byte(&mut self, byte: u8) {
        let i = self.inner.len() - 1;
        if *self.inner.get_unchecked(i) == byte {
            self.inner.set_len(i);
        }
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.inner
    }

    /// Takes ownership of the written bytes as a `String`.
    ///
    /// # Safety
    /// Caller must guarantee everything written so far is valid UTF-8,
    /// which holds for every append method on this type.
    pub(crate) unsafe fn into_string_unchecked(self) -> String {
        String::from_utf8_unchecked(self.inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grows_to_power_of_two() {
        let mut buf = Buffer::new();
        buf.extend_from_slice(b"hello").unwrap();
        assert_eq!(buf.len(), 5);
        assert!(buf.inner.capacity() >= 5);
        assert_eq!(buf.inner.capacity().count_ones(), 1);
    }

    #[test]
    fn undo_comma_removes_trailing_comma() {
        let mut buf = Buffer::new();
        buf.extend_from_slice(b"[1,2,").unwrap();
        unsafe { buf.undo_comma() };
        assert_eq!(buf.as_slice(), b"[1,2");
    }

    #[test]
    fn undo_comma_is_noop_without_comma() {
        let mut buf = Buffer::new();
        buf.extend_from_slice(b"[1,2]").unwrap();
        unsafe { buf.undo_comma() };
        assert_eq!(buf.as_slice(), b"[1,2]");
    }
}
