//! Palette buttons: floating templates that new buttons are dragged from.

use vpl_dnd::{ButtonPayload, ButtonRole, DETACHED_SLOT, DragData};

use crate::button::Button;
use crate::error::Result;
use crate::kind::{ButtonKind, kinds_for};

/// A template button in the palette.
#[derive(Debug)]
pub struct PaletteButton {
    template: Button,
}

impl PaletteButton {
    /// Palette entry for a kind name.
    ///
    /// # Errors
    ///
    /// [`crate::VplError::UnknownButtonKind`] for unregistered names.
    pub fn new(name: &str) -> Result<Self> {
        ButtonKind::from_name(name).map(Self::for_kind)
    }

    pub fn for_kind(kind: ButtonKind) -> Self {
        Self {
            template: Button::new(kind),
        }
    }

    pub fn kind(&self) -> ButtonKind {
        self.template.kind()
    }

    pub fn role(&self) -> ButtonRole {
        self.template.role()
    }

    /// The template itself, always detached and in basic mode.
    pub fn button(&self) -> &Button {
        &self.template
    }

    /// Start a drag that creates a new button on drop.
    pub fn drag(&self) -> DragData {
        let payload = ButtonPayload::new(DETACHED_SLOT, self.template.name())
            .with_composite_state(0)
            .with_sub_button_states(
                self.template
                    .sub_values()
                    .into_iter()
                    .map(i32::from)
                    .collect(),
            );
        DragData::button(&payload, self.role())
    }

    /// Whether a drag may be dropped here.
    ///
    /// Dropping a placed button back on a palette button of the same role
    /// deletes it: the source slot finishes its drag with a move.
    pub fn accepts(&self, data: &DragData) -> bool {
        data.type_tag() == Some(self.role().as_str())
    }

    pub fn tooltip(&self) -> String {
        format!("{} {}", self.template.name(), self.role())
    }
}

/// The full palette, split by role in registry order.
#[derive(Debug)]
pub struct Palette {
    events: Vec<PaletteButton>,
    actions: Vec<PaletteButton>,
}

impl Palette {
    pub fn new() -> Self {
        Self {
            events: kinds_for(ButtonRole::Event)
                .map(PaletteButton::for_kind)
                .collect(),
            actions: kinds_for(ButtonRole::Action)
                .map(PaletteButton::for_kind)
                .collect(),
        }
    }

    pub fn events(&self) -> &[PaletteButton] {
        &self.events
    }

    pub fn actions(&self) -> &[PaletteButton] {
        &self.actions
    }

    /// Palette entry by kind name.
    pub fn get(&self, name: &str) -> Option<&PaletteButton> {
        self.events
            .iter()
            .chain(&self.actions)
            .find(|entry| entry.template.name() == name)
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new()
    }
}
