//! Buttons: a kind, its sub-button click states and optional memory selectors.

use std::cell::OnceCell;

use crossbeam_channel::Sender;
use vpl_dnd::{ButtonPayload, ButtonRole, DETACHED_SLOT};

use crate::click::{ClickGroup, ClickMode, ClickState};
use crate::error::{Result, VplError};
use crate::ir::{ButtonIR, synthesize};
use crate::kind::ButtonKind;

/// Number of auxiliary memory selectors present in advanced mode.
pub const MEMORY_SELECTORS: usize = 4;

/// States per memory selector; each occupies two bits of the composite.
pub const MEMORY_SELECTOR_STATES: u8 = 4;

const SELECTOR_BITS: usize = 2;
const SELECTOR_MASK: i32 = 0b11;
const COMPOSITE_MASK: i32 = 0xFF;

/// Posted by a button to its owner whenever its state changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonNotice {
    StateChanged { kind: ButtonKind },
}

/// A placed or floating button.
///
/// The kind is fixed at construction. The owning slot is recorded only as a
/// row number (`parent_slot_id`), with -1 meaning detached.
#[derive(Debug)]
pub struct Button {
    kind: ButtonKind,
    buttons: ClickGroup,
    memory: Option<ClickGroup>,
    /// Composite saved when leaving advanced mode, restored on re-entry.
    stashed_memory: Option<i32>,
    parent_slot: i32,
    ir: OnceCell<ButtonIR>,
    listener: Option<Sender<ButtonNotice>>,
}

impl Button {
    /// Create a detached button in basic mode with all sub-buttons at 0.
    pub fn new(kind: ButtonKind) -> Self {
        Self {
            kind,
            buttons: kind.click_group(),
            memory: None,
            stashed_memory: None,
            parent_slot: DETACHED_SLOT,
            ir: OnceCell::new(),
            listener: None,
        }
    }

    /// Factory over the registered kind names.
    ///
    /// # Errors
    ///
    /// [`VplError::UnknownButtonKind`] for unregistered names.
    pub fn from_name(name: &str) -> Result<Self> {
        ButtonKind::from_name(name).map(Self::new)
    }

    /// Create a button, entering advanced mode if requested.
    pub fn with_advanced(kind: ButtonKind, advanced: bool) -> Self {
        let mut button = Self::new(kind);
        button.set_advanced(advanced);
        button
    }

    pub fn kind(&self) -> ButtonKind {
        self.kind
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// The button's type, "event" or "action".
    pub fn role(&self) -> ButtonRole {
        self.kind.role()
    }

    pub fn num_buttons(&self) -> usize {
        self.buttons.len()
    }

    /// Value of sub-button `index`, if it exists.
    pub fn sub_value(&self, index: usize) -> Option<u8> {
        self.buttons.get(index).map(ClickState::value)
    }

    pub fn sub_values(&self) -> Vec<u8> {
        self.buttons.values()
    }

    /// Click sub-button `index`.
    ///
    /// # Errors
    ///
    /// [`VplError::IndexOutOfRange`] if `index >= num_buttons()`.
    pub fn click(&mut self, index: usize) -> Result<()> {
        if let Err(err) = self.buttons.click(index) {
            tracing::warn!(kind = %self.kind, index, "click outside sub-buttons: {err}");
            return Err(err);
        }
        self.state_changed();
        Ok(())
    }

    /// Set sub-button `index` to `value` without click semantics.
    pub fn set_clicked(&mut self, index: usize, value: u32) -> Result<()> {
        self.buttons.set_value(index, value)?;
        self.state_changed();
        Ok(())
    }

    pub fn is_advanced(&self) -> bool {
        self.memory.is_some()
    }

    /// Switch between basic and advanced mode.
    ///
    /// Entering advanced mode allocates [`MEMORY_SELECTORS`] selectors,
    /// restoring the values held when advanced mode was last left. Returns
    /// false when already in the requested mode.
    pub fn set_advanced(&mut self, enabled: bool) -> bool {
        if enabled == self.is_advanced() {
            return false;
        }
        if enabled {
            let mut memory =
                ClickGroup::uniform(MEMORY_SELECTORS, MEMORY_SELECTOR_STATES, ClickMode::Toggle);
            if let Some(stashed) = self.stashed_memory.take() {
                unpack_into(&mut memory, stashed);
            }
            self.memory = Some(memory);
        } else {
            self.stashed_memory = self.memory.take().map(|memory| pack(&memory));
        }
        tracing::debug!(kind = %self.kind, advanced = enabled, "button mode changed");
        self.state_changed();
        true
    }

    /// Cycle memory selector `index`.
    ///
    /// # Errors
    ///
    /// [`VplError::IndexOutOfRange`] in basic mode or past the last selector.
    pub fn click_memory(&mut self, index: usize) -> Result<()> {
        let memory = self
            .memory
            .as_mut()
            .ok_or(VplError::IndexOutOfRange { index, len: 0 })?;
        memory.click(index)?;
        self.state_changed();
        Ok(())
    }

    /// Packed memory selectors, or -1 in basic mode.
    ///
    /// Selector `i` occupies bits `2i..2i+2`.
    pub fn composite_state(&self) -> i32 {
        self.memory.as_ref().map_or(-1, pack)
    }

    /// Inverse of [`Button::composite_state`].
    ///
    /// Negative values switch to basic mode. Other values switch to advanced
    /// mode; anything above 255 keeps only its low 8 bits.
    pub fn apply_composite_state(&mut self, value: i32) {
        if value < 0 {
            self.set_advanced(false);
            return;
        }
        if value > COMPOSITE_MASK {
            tracing::debug!(kind = %self.kind, value, "composite state truncated to 8 bits");
        }
        self.set_advanced(true);
        if let Some(memory) = self.memory.as_mut() {
            unpack_into(memory, value & COMPOSITE_MASK);
        }
        self.state_changed();
    }

    /// A button is complete when it has no sub-buttons or at least one is set.
    pub fn is_valid(&self) -> bool {
        self.buttons.is_empty() || self.buttons.any_set()
    }

    /// Compiler view of this button, rebuilt only after a state change.
    pub fn ir(&self) -> &ButtonIR {
        self.ir.get_or_init(|| synthesize(self))
    }

    /// Snapshot for a drag leaving this button's slot.
    pub fn drag_payload(&self) -> ButtonPayload {
        ButtonPayload::new(self.parent_slot, self.name())
            .with_composite_state(self.composite_state())
            .with_sub_button_states(self.sub_values().into_iter().map(i32::from).collect())
    }

    /// Row of the owning slot, or -1 when detached.
    pub fn parent_slot_id(&self) -> i32 {
        self.parent_slot
    }

    pub fn is_detached(&self) -> bool {
        self.parent_slot == DETACHED_SLOT
    }

    /// Mark the button as taken away from its slot (e.g. by a completed move
    /// drag). The slot notices on its next reconcile.
    pub fn detach(&mut self) {
        self.parent_slot = DETACHED_SLOT;
    }

    pub(crate) fn set_parent_slot_id(&mut self, row: i32) {
        self.parent_slot = row;
    }

    pub(crate) fn connect(&mut self, listener: Sender<ButtonNotice>) {
        self.listener = Some(listener);
    }

    pub(crate) fn disconnect(&mut self) {
        self.listener = None;
    }

    fn state_changed(&mut self) {
        self.ir.take();
        if let Some(listener) = &self.listener {
            // A dropped receiver means the owner is gone; nothing to notify.
            let _ = listener.send(ButtonNotice::StateChanged { kind: self.kind });
        }
    }
}

fn pack(memory: &ClickGroup) -> i32 {
    memory
        .iter()
        .enumerate()
        .fold(0, |acc, (i, state)| {
            acc | (i32::from(state.value()) << (i * SELECTOR_BITS))
        })
}

fn unpack_into(memory: &mut ClickGroup, value: i32) {
    for i in 0..memory.len() {
        let selector = (value >> (i * SELECTOR_BITS)) & SELECTOR_MASK;
        // Selectors have four states, so every two-bit value fits.
        let _ = memory.set_value(i, selector as u32);
    }
}
