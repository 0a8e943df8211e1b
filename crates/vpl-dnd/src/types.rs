//! Wire-level payload types and the transport envelope.

use std::fmt;
use std::str::FromStr;

use crate::error::{PayloadError, Result};
use crate::reader::{decode_button, decode_slot};
use crate::writer::{encode_button, encode_slot};

/// Source slot id carried by buttons that have no owning slot (palette, detached).
pub const DETACHED_SLOT: i32 = -1;

/// Role a button plays inside a slot, carried as the drag type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonRole {
    Event,
    Action,
}

impl ButtonRole {
    /// Type tag string used on the wire.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Event => "event",
            Self::Action => "action",
        }
    }

    /// Parse a drag type tag.
    pub fn from_tag(tag: &str) -> Result<Self> {
        match tag {
            "event" => Ok(Self::Event),
            "action" => Ok(Self::Action),
            other => Err(PayloadError::malformed(format!("unknown type tag: {other:?}"))),
        }
    }
}

impl fmt::Display for ButtonRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ButtonRole {
    type Err = PayloadError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_tag(s)
    }
}

/// Snapshot of a dragged button.
///
/// | Field               | Type                   |
/// |---------------------|------------------------|
/// | `source_slot`       | i32                    |
/// | `kind_name`         | i32 length + UTF-8     |
/// | `composite_state`   | i32                    |
/// | sub-button count    | i32                    |
/// | `sub_button_states` | i32 × count            |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonPayload {
    /// Row of the slot the button was dragged from, or [`DETACHED_SLOT`].
    pub source_slot: i32,
    /// Kind identifier ("prox", "move", ...).
    pub kind_name: String,
    /// Packed memory selector state, -1 when advanced mode is off.
    pub composite_state: i32,
    /// Value of each sub-button, in order.
    pub sub_button_states: Vec<i32>,
}

impl ButtonPayload {
    pub fn new(source_slot: i32, kind_name: impl Into<String>) -> Self {
        Self {
            source_slot,
            kind_name: kind_name.into(),
            composite_state: -1,
            sub_button_states: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_composite_state(mut self, state: i32) -> Self {
        self.composite_state = state;
        self
    }

    #[must_use]
    pub fn with_sub_button_states(mut self, states: Vec<i32>) -> Self {
        self.sub_button_states = states;
        self
    }

    pub fn sub_button_count(&self) -> usize {
        self.sub_button_states.len()
    }

    /// True when the drag did not originate from a slot.
    pub fn is_detached_source(&self) -> bool {
        self.source_slot == DETACHED_SLOT
    }
}

/// Snapshot of a dragged slot (row reordering).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotPayload {
    pub source_row: i32,
}

/// What the drag transport delivers to a drop target.
///
/// The transport carries opaque bytes plus, for buttons, a type tag string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragData {
    Button { bytes: Vec<u8>, type_tag: String },
    Slot { bytes: Vec<u8> },
}

impl DragData {
    /// Encode a button payload under the given role.
    pub fn button(payload: &ButtonPayload, role: ButtonRole) -> Self {
        Self::Button {
            bytes: encode_button(payload),
            type_tag: role.as_str().to_string(),
        }
    }

    /// Encode a slot reorder payload.
    pub fn slot(payload: SlotPayload) -> Self {
        Self::Slot {
            bytes: encode_slot(payload),
        }
    }

    /// Type tag of a button drag, `None` for slot drags.
    pub fn type_tag(&self) -> Option<&str> {
        match self {
            Self::Button { type_tag, .. } => Some(type_tag),
            Self::Slot { .. } => None,
        }
    }

    /// Role named by the type tag, `None` for slot drags or unknown tags.
    pub fn role(&self) -> Option<ButtonRole> {
        self.type_tag().and_then(|tag| ButtonRole::from_tag(tag).ok())
    }

    pub fn is_button(&self) -> bool {
        matches!(self, Self::Button { .. })
    }

    /// Decode the button payload. Fails on slot drags.
    pub fn decode_button(&self) -> Result<ButtonPayload> {
        match self {
            Self::Button { bytes, .. } => decode_button(bytes),
            Self::Slot { .. } => Err(PayloadError::malformed("slot drag has no button payload")),
        }
    }

    /// Decode the slot payload. Fails on button drags.
    pub fn decode_slot(&self) -> Result<SlotPayload> {
        match self {
            Self::Slot { bytes } => decode_slot(bytes),
            Self::Button { .. } => Err(PayloadError::malformed("button drag has no slot payload")),
        }
    }
}
