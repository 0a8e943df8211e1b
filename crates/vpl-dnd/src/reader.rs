//! Payload reader.
//!
//! Counterpart of [`crate::writer`]. Every read is bounds-checked and reports
//! the field it was decoding.

use crate::error::{PayloadError, Result};
use crate::types::{ButtonPayload, SlotPayload};

const I32_LEN: usize = 4;

/// Cursor over an encoded payload.
#[derive(Debug)]
pub struct PayloadReader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> PayloadReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.offset
    }

    /// Read a big-endian i32.
    pub fn read_i32(&mut self, field: &'static str) -> Result<i32> {
        let bytes = self.take(field, I32_LEN)?;
        Ok(i32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Read a non-negative i32 count.
    pub fn read_count(&mut self, field: &'static str) -> Result<usize> {
        let value = self.read_i32(field)?;
        usize::try_from(value)
            .map_err(|_| PayloadError::malformed(format!("negative {field}: {value}")))
    }

    /// Read a length-prefixed UTF-8 string.
    pub fn read_string(&mut self, field: &'static str) -> Result<String> {
        let len = self.read_count(field)?;
        let bytes = self.take(field, len)?;
        String::from_utf8(bytes.to_vec())
            .map_err(|_| PayloadError::malformed(format!("{field} is not valid UTF-8")))
    }

    /// Ensure the whole buffer was consumed.
    pub fn finish(self) -> Result<()> {
        match self.remaining() {
            0 => Ok(()),
            extra => Err(PayloadError::malformed(format!(
                "{extra} trailing bytes after offset {}",
                self.offset
            ))),
        }
    }

    fn take(&mut self, field: &'static str, len: usize) -> Result<&'a [u8]> {
        let available = self.remaining();
        if len > available {
            return Err(PayloadError::truncated(field, self.offset, len, available));
        }
        let slice = &self.data[self.offset..self.offset + len];
        self.offset += len;
        Ok(slice)
    }
}

/// Decode a button payload.
///
/// # Errors
///
/// - [`PayloadError::Truncated`] if the buffer is shorter than the declared
///   string length or sub-button count implies.
/// - [`PayloadError::Malformed`] on negative counts, invalid UTF-8 or
///   trailing bytes.
pub fn decode_button(data: &[u8]) -> Result<ButtonPayload> {
    let mut reader = PayloadReader::new(data);
    let source_slot = reader.read_i32("source slot")?;
    let kind_name = reader.read_string("kind name")?;
    let composite_state = reader.read_i32("composite state")?;
    let count = reader.read_count("sub-button count")?;

    // Check the whole state block up front so a bogus count fails fast.
    let needed = count.saturating_mul(I32_LEN);
    if needed > reader.remaining() {
        return Err(PayloadError::truncated(
            "sub-button states",
            reader.offset(),
            needed,
            reader.remaining(),
        ));
    }
    let sub_button_states = (0..count)
        .map(|_| reader.read_i32("sub-button state"))
        .collect::<Result<Vec<_>>>()?;
    reader.finish()?;

    tracing::trace!(
        kind = %kind_name,
        source_slot,
        composite_state,
        count,
        "decoded button payload"
    );
    Ok(ButtonPayload {
        source_slot,
        kind_name,
        composite_state,
        sub_button_states,
    })
}

/// Decode a slot reorder payload.
pub fn decode_slot(data: &[u8]) -> Result<SlotPayload> {
    let mut reader = PayloadReader::new(data);
    let source_row = reader.read_i32("source row")?;
    reader.finish()?;
    Ok(SlotPayload { source_row })
}
