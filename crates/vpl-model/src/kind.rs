//! The closed set of button kinds and their registration table.
//!
//! Every kind is described once in [`KIND_TABLE`]: its wire name, the slot
//! role it plays, the shape of its sub-buttons and the IR tag the compiler
//! receives. Construction, drop decoding and IR synthesis all look kinds up
//! here instead of branching on strings.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use vpl_dnd::ButtonRole;

use crate::click::{ClickGroup, ClickMode};
use crate::error::{Result, VplError};

/// Kind of a button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonKind {
    Buttons,
    Prox,
    ProxGround,
    Tap,
    Clap,
    Move,
    Color,
    Circle,
    Sound,
    Memory,
}

/// Tag identifying a button kind to the program compiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IrKind {
    Buttons,
    Prox,
    ProxGround,
    Tap,
    Clap,
    Move,
    Color,
    Circle,
    Sound,
    Memory,
}

/// One row of the registration table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindSpec {
    pub kind: ButtonKind,
    /// Stable identifier used on the wire and in the palette.
    pub name: &'static str,
    pub role: ButtonRole,
    pub sub_buttons: usize,
    /// States per sub-button.
    pub states: u8,
    pub mode: ClickMode,
    pub ir_kind: IrKind,
    /// Number of values per sub-button the compiler expects (0 = none).
    pub ir_arity: u8,
}

#[allow(clippy::too_many_arguments)]
const fn spec(
    kind: ButtonKind,
    name: &'static str,
    role: ButtonRole,
    sub_buttons: usize,
    states: u8,
    mode: ClickMode,
    ir_kind: IrKind,
    ir_arity: u8,
) -> KindSpec {
    KindSpec {
        kind,
        name,
        role,
        sub_buttons,
        states,
        mode,
        ir_kind,
        ir_arity,
    }
}

use ButtonRole::{Action, Event};
use ClickMode::{Exclusive, Toggle};

/// Registration table, indexed by `ButtonKind as usize`.
pub static KIND_TABLE: [KindSpec; 10] = [
    spec(ButtonKind::Buttons, "button", Event, 5, 2, Toggle, IrKind::Buttons, 2),
    spec(ButtonKind::Prox, "prox", Event, 7, 3, Toggle, IrKind::Prox, 3),
    spec(ButtonKind::ProxGround, "proxground", Event, 2, 3, Toggle, IrKind::ProxGround, 3),
    spec(ButtonKind::Tap, "tap", Event, 1, 2, Toggle, IrKind::Tap, 0),
    spec(ButtonKind::Clap, "clap", Event, 1, 2, Toggle, IrKind::Clap, 0),
    spec(ButtonKind::Move, "move", Action, 0, 1, Toggle, IrKind::Move, 0),
    spec(ButtonKind::Color, "color", Action, 0, 1, Toggle, IrKind::Color, 0),
    spec(ButtonKind::Circle, "circle", Action, 8, 3, Toggle, IrKind::Circle, 3),
    spec(ButtonKind::Sound, "sound", Action, 3, 2, Exclusive, IrKind::Sound, 2),
    spec(ButtonKind::Memory, "memory", Action, 4, 2, Toggle, IrKind::Memory, 2),
];

impl ButtonKind {
    pub const ALL: [ButtonKind; 10] = [
        Self::Buttons,
        Self::Prox,
        Self::ProxGround,
        Self::Tap,
        Self::Clap,
        Self::Move,
        Self::Color,
        Self::Circle,
        Self::Sound,
        Self::Memory,
    ];

    /// Look a kind up by its wire name.
    ///
    /// # Errors
    ///
    /// [`VplError::UnknownButtonKind`] for names outside the table.
    pub fn from_name(name: &str) -> Result<Self> {
        KIND_TABLE
            .iter()
            .find(|spec| spec.name == name)
            .map(|spec| spec.kind)
            .ok_or_else(|| VplError::unknown_kind(name))
    }

    pub fn spec(self) -> &'static KindSpec {
        &KIND_TABLE[self as usize]
    }

    pub fn name(self) -> &'static str {
        self.spec().name
    }

    pub fn role(self) -> ButtonRole {
        self.spec().role
    }

    pub fn is_event(self) -> bool {
        self.role() == ButtonRole::Event
    }

    pub fn sub_button_count(self) -> usize {
        self.spec().sub_buttons
    }

    pub fn ir_kind(self) -> IrKind {
        self.spec().ir_kind
    }

    /// Fresh, all-zero sub-buttons for this kind.
    pub(crate) fn click_group(self) -> ClickGroup {
        let spec = self.spec();
        ClickGroup::uniform(spec.sub_buttons, spec.states, spec.mode)
    }
}

impl fmt::Display for ButtonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ButtonKind {
    type Err = VplError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s)
    }
}

/// Kinds that play the given role, in table order.
pub fn kinds_for(role: ButtonRole) -> impl Iterator<Item = ButtonKind> {
    ButtonKind::ALL
        .into_iter()
        .filter(move |kind| kind.role() == role)
}
