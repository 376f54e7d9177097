//! Big-endian primitive reads over a forward-only byte source.

use std::io;

use crate::error::{DecodeError, Result};

/// Wraps an [`io::Read`] and keeps track of how many bytes were consumed.
///
/// Every read is all-or-nothing from the caller's point of view: if the
/// source ends before the requested width is available the read fails with
/// [`DecodeError::TruncatedInput`].
#[derive(Debug)]
pub struct ByteReader<R> {
    inner: R,
    position: u64,
}

impl<R: io::Read> ByteReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner, position: 0 }
    }

    /// Number of bytes consumed so far.
    pub fn position(&self) -> u64 {
        self.position
    }

    pub fn into_inner(self) -> R {
        self.inner
    }

    /// Reads exactly `LEN` bytes.
    pub fn read_array<const LEN: usize>(&mut self, what: &'static str) -> Result<[u8; LEN]> {
        self.try_read_array(what)?.ok_or(DecodeError::TruncatedInput {
            what,
            offset: self.position,
        })
    }

    /// Reads exactly `LEN` bytes, or returns `Ok(None)` if the source is
    /// already exhausted. Running out after the first byte is still an error.
    pub fn try_read_array<const LEN: usize>(
        &mut self,
        what: &'static str,
    ) -> Result<Option<[u8; LEN]>> {
        let mut bytes = [0_u8; LEN];
        let filled = self.fill(&mut bytes)?;
        if filled == 0 && LEN > 0 {
            return Ok(None);
        }
        if filled < LEN {
            return Err(DecodeError::TruncatedInput {
                what,
                offset: self.position - filled as u64,
            });
        }
        Ok(Some(bytes))
    }

    pub fn read_u8(&mut self, what: &'static str) -> Result<u8> {
        let [b] = self.read_array(what)?;
        Ok(b)
    }

    pub fn read_u16(&mut self, what: &'static str) -> Result<u16> {
        Ok(u16::from_be_bytes(self.read_array(what)?))
    }

    pub fn read_i16(&mut self, what: &'static str) -> Result<i16> {
        Ok(i16::from_be_bytes(self.read_array(what)?))
    }

    /// Reads a 24-bit value; the top byte of the result is always zero.
    pub fn read_u24(&mut self, what: &'static str) -> Result<u32> {
        let [a, b, c] = self.read_array(what)?;
        Ok(u32::from_be_bytes([0, a, b, c]))
    }

    pub fn read_u32(&mut self, what: &'static str) -> Result<u32> {
        Ok(u32::from_be_bytes(self.read_array(what)?))
    }

    pub fn read_u64(&mut self, what: &'static str) -> Result<u64> {
        Ok(u64::from_be_bytes(self.read_array(what)?))
    }

    /// Like `read_exact`, but reports how far it got instead of failing on
    /// EOF.
    fn fill(&mut self, buf: &mut [u8]) -> Result<usize> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.inner.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => {
                    filled += n;
                    self.position += n as u64;
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
        Ok(filled)
    }
}
