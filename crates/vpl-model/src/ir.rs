//! Intermediate representation handed to the program compiler.
//!
//! A [`ButtonIR`] is derived state: it is rebuilt from the owning
//! [`Button`] after the button invalidates it and is never edited directly.

use serde::Serialize;

use crate::button::Button;
use crate::error::Result;
use crate::kind::{ButtonKind, IrKind, KindSpec};

/// Compiler view of one button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ButtonIR {
    pub kind: IrKind,
    pub basename: String,
    /// Value of each sub-button.
    pub clicked: Vec<u8>,
    /// Packed memory selector state, -1 when advanced mode is off.
    pub memory_state: i32,
    pub arity: u8,
}

impl ButtonIR {
    pub fn num_buttons(&self) -> usize {
        self.clicked.len()
    }

    pub fn is_clicked(&self, index: usize) -> bool {
        self.clicked.get(index).is_some_and(|&v| v != 0)
    }

    pub fn uses_memory(&self) -> bool {
        self.memory_state >= 0
    }
}

/// Compiler view of one slot: the event/action pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SlotIR {
    pub row: i32,
    pub event: Option<ButtonIR>,
    pub action: Option<ButtonIR>,
}

impl SlotIR {
    /// Both halves present.
    pub fn is_complete(&self) -> bool {
        self.event.is_some() && self.action.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.event.is_none() && self.action.is_none()
    }
}

/// Maps button state onto [`ButtonIR`] for one kind.
#[derive(Debug, Clone, Copy)]
pub struct IrAdapter {
    spec: &'static KindSpec,
}

impl IrAdapter {
    pub fn for_kind(kind: ButtonKind) -> Self {
        Self { spec: kind.spec() }
    }

    /// Resolve the adapter for a kind name.
    ///
    /// # Errors
    ///
    /// [`crate::VplError::UnknownButtonKind`] when the name is not registered.
    pub fn resolve(name: &str) -> Result<Self> {
        ButtonKind::from_name(name).map(Self::for_kind)
    }

    pub fn kind(&self) -> ButtonKind {
        self.spec.kind
    }

    /// Build the IR from raw state.
    pub fn synthesize(&self, clicked: &[u8], memory_state: i32) -> ButtonIR {
        ButtonIR {
            kind: self.spec.ir_kind,
            basename: self.spec.name.to_string(),
            clicked: clicked.to_vec(),
            memory_state,
            arity: self.spec.ir_arity,
        }
    }
}

/// Build the IR for a button from its current state.
///
/// Callers normally go through [`Button::ir`], which caches the result.
pub fn synthesize(button: &Button) -> ButtonIR {
    IrAdapter::for_kind(button.kind()).synthesize(&button.sub_values(), button.composite_state())
}
