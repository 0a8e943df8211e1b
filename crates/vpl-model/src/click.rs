//! Click states: the per-region counters behind every clickable sub-button.

use crate::error::{Result, VplError};

/// How a click changes a [`ClickState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickMode {
    /// Advance cyclically through all states.
    Toggle,
    /// Radio behaviour: the clicked state becomes 1, its siblings 0.
    Exclusive,
}

/// What a click did, so the owning group can finish exclusive clicks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    Advanced,
    Claimed,
}

/// A small counter in `[0, num_states)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickState {
    value: u8,
    num_states: u8,
    mode: ClickMode,
}

impl ClickState {
    /// Create a state at 0. `num_states` is raised to at least 1.
    pub fn new(num_states: u8, mode: ClickMode) -> Self {
        Self {
            value: 0,
            num_states: num_states.max(1),
            mode,
        }
    }

    pub fn toggle(num_states: u8) -> Self {
        Self::new(num_states, ClickMode::Toggle)
    }

    pub fn exclusive(num_states: u8) -> Self {
        Self::new(num_states, ClickMode::Exclusive)
    }

    pub fn value(&self) -> u8 {
        self.value
    }

    pub fn num_states(&self) -> u8 {
        self.num_states
    }

    pub fn mode(&self) -> ClickMode {
        self.mode
    }

    pub fn is_set(&self) -> bool {
        self.value != 0
    }

    /// Apply one click to this state alone.
    ///
    /// Exclusive clicks only set this state; resetting siblings is the job of
    /// the [`ClickGroup`] that owns them.
    pub fn click(&mut self) -> ClickOutcome {
        match self.mode {
            ClickMode::Toggle => {
                self.value = (self.value + 1) % self.num_states;
                ClickOutcome::Advanced
            }
            ClickMode::Exclusive => {
                self.value = 1.min(self.num_states - 1);
                ClickOutcome::Claimed
            }
        }
    }

    /// Set the value directly. Siblings are not touched.
    ///
    /// # Errors
    ///
    /// [`VplError::InvalidState`] if `value >= num_states`; the state is unchanged.
    pub fn set_value(&mut self, value: u32) -> Result<()> {
        if value >= u32::from(self.num_states) {
            return Err(VplError::InvalidState {
                value,
                num_states: self.num_states,
            });
        }
        self.value = value as u8;
        Ok(())
    }

    pub fn reset(&mut self) {
        self.value = 0;
    }
}

/// Ordered click states forming one exclusivity group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClickGroup {
    states: Vec<ClickState>,
}

impl ClickGroup {
    /// `count` identical states.
    pub fn uniform(count: usize, num_states: u8, mode: ClickMode) -> Self {
        Self {
            states: vec![ClickState::new(num_states, mode); count],
        }
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ClickState> {
        self.states.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ClickState> {
        self.states.iter()
    }

    /// Current value of every state, in order.
    pub fn values(&self) -> Vec<u8> {
        self.states.iter().map(ClickState::value).collect()
    }

    pub fn any_set(&self) -> bool {
        self.states.iter().any(ClickState::is_set)
    }

    /// Click the state at `index`; an exclusive click resets all siblings.
    pub fn click(&mut self, index: usize) -> Result<()> {
        let len = self.states.len();
        let state = self
            .states
            .get_mut(index)
            .ok_or(VplError::IndexOutOfRange { index, len })?;
        if state.click() == ClickOutcome::Claimed {
            for (i, sibling) in self.states.iter_mut().enumerate() {
                if i != index {
                    sibling.reset();
                }
            }
        }
        Ok(())
    }

    /// Set the state at `index` directly.
    pub fn set_value(&mut self, index: usize, value: u32) -> Result<()> {
        let len = self.states.len();
        self.states
            .get_mut(index)
            .ok_or(VplError::IndexOutOfRange { index, len })?
            .set_value(value)
    }
}
