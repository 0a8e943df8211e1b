//! Payload writer.
//!
//! All integers are written big-endian. Strings are an i32 byte length
//! followed by UTF-8 bytes.

use crate::types::{ButtonPayload, SlotPayload};

/// Append-only buffer for payload fields.
#[derive(Debug, Default)]
pub struct PayloadWriter {
    buf: Vec<u8>,
}

impl PayloadWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write a big-endian i32.
    pub fn write_i32(&mut self, value: i32) -> &mut Self {
        self.buf.extend_from_slice(&value.to_be_bytes());
        self
    }

    /// Write a length-prefixed UTF-8 string.
    pub fn write_string(&mut self, value: &str) -> &mut Self {
        self.write_i32(len_i32(value.len()));
        self.buf.extend_from_slice(value.as_bytes());
        self
    }

    /// Write raw bytes without a length prefix.
    pub fn write_raw(&mut self, bytes: &[u8]) -> &mut Self {
        self.buf.extend_from_slice(bytes);
        self
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}

/// Encode a button payload in wire order.
#[must_use]
pub fn encode_button(payload: &ButtonPayload) -> Vec<u8> {
    let mut writer = PayloadWriter::new();
    writer
        .write_i32(payload.source_slot)
        .write_string(&payload.kind_name)
        .write_i32(payload.composite_state)
        .write_i32(len_i32(payload.sub_button_states.len()));
    for &state in &payload.sub_button_states {
        writer.write_i32(state);
    }
    tracing::trace!(
        kind = %payload.kind_name,
        source_slot = payload.source_slot,
        bytes = writer.len(),
        "encoded button payload"
    );
    writer.into_bytes()
}

/// Encode a slot reorder payload.
#[must_use]
pub fn encode_slot(payload: SlotPayload) -> Vec<u8> {
    let mut writer = PayloadWriter::new();
    writer.write_i32(payload.source_row);
    writer.into_bytes()
}

// Lengths beyond i32::MAX cannot be represented on the wire.
fn len_i32(len: usize) -> i32 {
    i32::try_from(len).unwrap_or(i32::MAX)
}
