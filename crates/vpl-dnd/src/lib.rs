//! Drag-and-drop payloads for the visual programming editor.
//!
//! A dragged button travels as an opaque byte buffer plus a type tag
//! (`"event"` or `"action"`); a dragged slot travels as its row. This crate
//! defines those payloads and their binary encoding. It knows nothing about
//! buttons themselves: the model crate builds [`ButtonPayload`] snapshots and
//! replays them on drop.
//!
//! # Wire format
//!
//! Big-endian throughout:
//!
//! ```text
//! i32 source_slot | i32 len, u8[len] kind_name | i32 composite_state
//!     | i32 count | i32[count] sub_button_states
//! ```
//!
//! # Example
//!
//! ```
//! use vpl_dnd::{ButtonPayload, ButtonRole, DragData};
//!
//! let payload = ButtonPayload::new(2, "tap").with_sub_button_states(vec![1]);
//! let drag = DragData::button(&payload, ButtonRole::Event);
//!
//! assert_eq!(drag.type_tag(), Some("event"));
//! assert_eq!(drag.decode_button().unwrap(), payload);
//! ```

mod error;
mod reader;
mod types;
mod writer;

pub use error::{PayloadError, Result};

pub use types::{ButtonPayload, ButtonRole, DETACHED_SLOT, DragData, SlotPayload};

pub use reader::{PayloadReader, decode_button, decode_slot};

pub use writer::{PayloadWriter, encode_button, encode_slot};
