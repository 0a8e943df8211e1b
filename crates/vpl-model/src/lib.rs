//! Button state model for the visual programming editor.
//!
//! A program is a column of [`Slot`]s, each pairing an event button with an
//! action button. Buttons keep their sub-button click states, switch into an
//! advanced mode that adds memory selectors, and mirror themselves into a
//! [`ButtonIR`] for the program compiler. Buttons move between slots as
//! encoded drag payloads (see [`vpl_dnd`]).
//!
//! ```
//! use vpl_model::{Button, ButtonKind, ButtonRole, Slot};
//!
//! let mut source = Slot::new(2, false);
//! let mut tap = Button::new(ButtonKind::Tap);
//! tap.click(0).unwrap();
//! source.add_event_button(tap);
//!
//! let drag = source.begin_button_drag(ButtonRole::Event).unwrap();
//! let mut target = Slot::new(5, false);
//! let outcome = target.drop(&drag).unwrap();
//! source.finish_button_drag(ButtonRole::Event, outcome.action());
//! source.reconcile();
//!
//! assert!(source.is_empty());
//! assert_eq!(target.event_button().unwrap().sub_values(), vec![1]);
//! ```

mod button;
mod click;
mod error;
mod ir;
mod kind;
mod palette;
mod slot;

pub use button::{Button, ButtonNotice, MEMORY_SELECTOR_STATES, MEMORY_SELECTORS};
pub use click::{ClickGroup, ClickMode, ClickOutcome, ClickState};
pub use error::{Result, VplError};
pub use ir::{ButtonIR, IrAdapter, SlotIR, synthesize};
pub use kind::{ButtonKind, IrKind, KIND_TABLE, KindSpec, kinds_for};
pub use palette::{Palette, PaletteButton};
pub use slot::{DropAction, DropOutcome, Slot, SlotNotice};

pub use vpl_dnd::{ButtonPayload, ButtonRole, DETACHED_SLOT, DragData, SlotPayload};
