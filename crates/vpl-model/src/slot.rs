//! Slots: one event/action pair on a row of the program canvas.
//!
//! A slot exclusively owns up to one button per role. Buttons report state
//! changes through a channel the slot drains in [`Slot::reconcile`]; a button
//! that has been dragged away is recognised there by its parent id no longer
//! matching the slot's row, and evicted.

use crossbeam_channel::{Receiver, Sender, unbounded};
use vpl_dnd::{ButtonPayload, ButtonRole, DragData, SlotPayload};

use crate::button::{Button, ButtonNotice};
use crate::error::{Result, VplError};
use crate::ir::SlotIR;
use crate::kind::ButtonKind;

/// Published to subscribers whenever the slot's content changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotNotice {
    Updated { row: i32 },
}

/// Result of delivering a drag to a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// A new button now occupies `role`.
    Placed { role: ButtonRole, kind: ButtonKind },
    /// The button came from this very slot; nothing changed.
    SelfDrop,
    /// Not a button drag (slot reordering is handled by the container).
    NotAccepted,
}

impl DropOutcome {
    /// The drop action the drag source should see.
    pub fn action(self) -> DropAction {
        match self {
            Self::Placed { .. } => DropAction::Move,
            Self::SelfDrop | Self::NotAccepted => DropAction::Ignore,
        }
    }
}

/// How a drag ended, as reported back to its source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropAction {
    Move,
    Copy,
    Ignore,
}

/// One row of the program: an optional event and an optional action button.
#[derive(Debug)]
pub struct Slot {
    row: i32,
    event: Option<Button>,
    action: Option<Button>,
    advanced: bool,
    highlight_event: bool,
    highlight_action: bool,
    error: bool,
    notice_tx: Sender<ButtonNotice>,
    notice_rx: Receiver<ButtonNotice>,
    subscribers: Vec<Sender<SlotNotice>>,
}

impl Slot {
    /// Create an empty slot. Negative rows are clamped to 0.
    pub fn new(row: i32, advanced: bool) -> Self {
        let (notice_tx, notice_rx) = unbounded();
        Self {
            row: row.max(0),
            event: None,
            action: None,
            advanced,
            highlight_event: false,
            highlight_action: false,
            error: false,
            notice_tx,
            notice_rx,
            subscribers: Vec::new(),
        }
    }

    pub fn row(&self) -> i32 {
        self.row
    }

    /// Move the slot to another row, re-parenting its buttons.
    pub fn set_row(&mut self, row: i32) {
        self.row = row.max(0);
        for button in [self.event.as_mut(), self.action.as_mut()].into_iter().flatten() {
            button.set_parent_slot_id(self.row);
        }
    }

    /// Receive a [`SlotNotice`] for every content change from now on.
    pub fn subscribe(&mut self) -> Receiver<SlotNotice> {
        let (tx, rx) = unbounded();
        self.subscribers.push(tx);
        rx
    }

    pub fn button(&self, role: ButtonRole) -> Option<&Button> {
        match role {
            ButtonRole::Event => self.event.as_ref(),
            ButtonRole::Action => self.action.as_ref(),
        }
    }

    pub fn button_mut(&mut self, role: ButtonRole) -> Option<&mut Button> {
        self.occupant_mut(role).as_mut()
    }

    pub fn event_button(&self) -> Option<&Button> {
        self.event.as_ref()
    }

    pub fn action_button(&self) -> Option<&Button> {
        self.action.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.event.is_none() && self.action.is_none()
    }

    /// Place `button` in `role`, dropping any previous occupant.
    pub fn add_button(&mut self, role: ButtonRole, mut button: Button) {
        if let Some(mut previous) = self.occupant_mut(role).take() {
            self.flush_notices(&[previous.kind()]);
            previous.disconnect();
            tracing::debug!(row = self.row, %role, kind = %previous.kind(), "replaced button");
        }
        button.set_parent_slot_id(self.row);
        button.connect(self.notice_tx.clone());
        tracing::debug!(row = self.row, %role, kind = %button.kind(), "added button");
        *self.occupant_mut(role) = Some(button);
        self.emit_updated();
    }

    pub fn add_event_button(&mut self, button: Button) {
        self.add_button(ButtonRole::Event, button);
    }

    pub fn add_action_button(&mut self, button: Button) {
        self.add_button(ButtonRole::Action, button);
    }

    /// Click a sub-button of the occupant of `role`.
    ///
    /// # Errors
    ///
    /// [`VplError::IndexOutOfRange`] when the role is empty or the index is
    /// past the button's sub-buttons.
    pub fn click(&mut self, role: ButtonRole, index: usize) -> Result<()> {
        self.button_mut(role)
            .ok_or(VplError::IndexOutOfRange { index, len: 0 })?
            .click(index)?;
        self.flush_notices(&[]);
        Ok(())
    }

    /// Bring the slot up to date with its buttons.
    ///
    /// Republishes one update per pending button notice, then evicts every
    /// occupant whose parent id no longer matches this row. Returns the number
    /// of updates published.
    pub fn reconcile(&mut self) -> usize {
        let stale: Vec<ButtonRole> = [ButtonRole::Event, ButtonRole::Action]
            .into_iter()
            .filter(|&role| self.button(role).is_some_and(|button| !self.is_attached(button)))
            .collect();
        let stale_kinds: Vec<ButtonKind> = stale
            .iter()
            .filter_map(|&role| self.button(role).map(Button::kind))
            .collect();

        // Notices from buttons about to be evicted are superseded by the eviction.
        let mut published = self.flush_notices(&stale_kinds);
        for role in stale {
            if let Some(mut button) = self.occupant_mut(role).take() {
                button.disconnect();
                tracing::debug!(row = self.row, %role, kind = %button.kind(), "evicted detached button");
            }
            self.emit_updated();
            published += 1;
        }
        published
    }

    pub fn is_advanced(&self) -> bool {
        self.advanced
    }

    /// Switch advanced mode; the event button follows.
    pub fn set_advanced(&mut self, enabled: bool) {
        self.advanced = enabled;
        if let Some(event) = self.event.as_mut() {
            event.set_advanced(enabled);
        }
        self.flush_notices(&[]);
    }

    pub fn is_highlighted(&self, role: ButtonRole) -> bool {
        match role {
            ButtonRole::Event => self.highlight_event,
            ButtonRole::Action => self.highlight_action,
        }
    }

    /// Hover feedback for a drag entering the slot. Returns whether the drag
    /// is of a kind a slot area reacts to.
    pub fn drag_enter(&mut self, data: &DragData) -> bool {
        match data.role() {
            Some(ButtonRole::Event) => self.highlight_event = true,
            Some(ButtonRole::Action) => self.highlight_action = true,
            None => {}
        }
        true
    }

    pub fn drag_leave(&mut self) {
        self.highlight_event = false;
        self.highlight_action = false;
    }

    pub fn has_error(&self) -> bool {
        self.error
    }

    /// Flag set by the program compiler when this pair fails to compile.
    pub fn set_error(&mut self, error: bool) {
        self.error = error;
    }

    /// Start dragging the occupant of `role`.
    pub fn begin_button_drag(&self, role: ButtonRole) -> Option<DragData> {
        let button = self.button(role)?;
        Some(DragData::button(&button.drag_payload(), button.role()))
    }

    /// Report how a drag started by [`Slot::begin_button_drag`] ended.
    ///
    /// A move detaches the dragged button; the next reconcile evicts it.
    pub fn finish_button_drag(&mut self, role: ButtonRole, action: DropAction) {
        if action == DropAction::Move
            && let Some(button) = self.button_mut(role)
        {
            button.detach();
        }
    }

    /// Start dragging the whole slot to reorder rows.
    pub fn begin_slot_drag(&self) -> DragData {
        DragData::slot(SlotPayload {
            source_row: self.row,
        })
    }

    /// Deliver a drag to this slot.
    ///
    /// A button drag from another slot or from the palette replaces the
    /// occupant of the role named by the drag's type tag with a rebuilt
    /// button. Decoding and validation happen before any change, including
    /// the reconcile that precedes placement, so a failed drop leaves the slot
    /// and its subscribers untouched.
    ///
    /// # Errors
    ///
    /// - [`VplError::TruncatedPayload`] when the buffer is short.
    /// - [`VplError::MalformedDragPayload`] for unknown kinds or type tags,
    ///   negative or mismatched counts, and out-of-range states.
    pub fn drop(&mut self, data: &DragData) -> Result<DropOutcome> {
        let DragData::Button { type_tag, .. } = data else {
            return Ok(DropOutcome::NotAccepted);
        };

        let payload = data.decode_button().inspect_err(|err| {
            tracing::debug!(row = self.row, "rejected drop: {err}");
        })?;
        if payload.source_slot == self.row {
            tracing::debug!(row = self.row, kind = %payload.kind_name, "ignored drop onto source slot");
            self.drag_leave();
            return Ok(DropOutcome::SelfDrop);
        }

        let role = ButtonRole::from_tag(type_tag)?;
        let button = self.rebuild(&payload, role).inspect_err(|err| {
            tracing::debug!(row = self.row, "rejected drop: {err}");
        })?;
        let kind = button.kind();
        self.reconcile();
        self.add_button(role, button);
        match role {
            ButtonRole::Event => self.highlight_event = false,
            ButtonRole::Action => self.highlight_action = false,
        }
        Ok(DropOutcome::Placed { role, kind })
    }

    /// Compiler view of the slot.
    pub fn ir(&mut self) -> SlotIR {
        self.reconcile();
        SlotIR {
            row: self.row,
            event: self.event.as_ref().map(|button| button.ir().clone()),
            action: self.action.as_ref().map(|button| button.ir().clone()),
        }
    }

    /// Both buttons present and configured.
    pub fn is_complete(&self) -> bool {
        self.event.as_ref().is_some_and(Button::is_valid)
            && self.action.as_ref().is_some_and(Button::is_valid)
    }

    fn rebuild(&self, payload: &ButtonPayload, role: ButtonRole) -> Result<Button> {
        let kind = ButtonKind::from_name(&payload.kind_name).map_err(|_| {
            VplError::malformed(format!("unknown button kind {:?}", payload.kind_name))
        })?;
        let expected = kind.sub_button_count();
        if payload.sub_button_count() != expected {
            return Err(VplError::malformed(format!(
                "{kind} has {expected} sub-buttons, payload carries {}",
                payload.sub_button_count()
            )));
        }

        let mut button = Button::new(kind);
        if role == ButtonRole::Event && self.advanced {
            let seed = match &self.event {
                Some(current) if payload.is_detached_source() && self.is_attached(current) => {
                    current.composite_state()
                }
                _ => payload.composite_state,
            };
            // A basic-mode source carries -1 and the new button stays basic.
            button.apply_composite_state(seed);
        }
        for (index, &state) in payload.sub_button_states.iter().enumerate() {
            let value = u32::try_from(state).map_err(|_| {
                VplError::malformed(format!("negative state {state} for sub-button {index}"))
            })?;
            button
                .set_clicked(index, value)
                .map_err(|err| VplError::malformed(format!("sub-button {index}: {err}")))?;
        }
        Ok(button)
    }

    fn is_attached(&self, button: &Button) -> bool {
        button.parent_slot_id() == self.row
    }

    /// Republish pending button notices, dropping those from `discard` kinds.
    fn flush_notices(&mut self, discard: &[ButtonKind]) -> usize {
        let mut published = 0;
        while let Ok(notice) = self.notice_rx.try_recv() {
            let ButtonNotice::StateChanged { kind } = notice;
            if discard.contains(&kind) {
                tracing::trace!(row = self.row, %kind, "dropped notice from departing button");
                continue;
            }
            tracing::trace!(row = self.row, %kind, "button state changed");
            self.emit_updated();
            published += 1;
        }
        published
    }

    fn occupant_mut(&mut self, role: ButtonRole) -> &mut Option<Button> {
        match role {
            ButtonRole::Event => &mut self.event,
            ButtonRole::Action => &mut self.action,
        }
    }

    fn emit_updated(&mut self) {
        let notice = SlotNotice::Updated { row: self.row };
        self.subscribers.retain(|tx| tx.send(notice).is_ok());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tap_clicked() -> Button {
        let mut button = Button::new(ButtonKind::Tap);
        button.click(0).unwrap();
        button
    }

    #[test]
    fn add_sets_parent_and_notifies() {
        let mut slot = Slot::new(3, false);
        let updates = slot.subscribe();
        slot.add_event_button(tap_clicked());
        assert_eq!(slot.event_button().unwrap().parent_slot_id(), 3);
        assert_eq!(updates.try_iter().count(), 1);
    }

    #[test]
    fn add_replaces_previous_occupant() {
        let mut slot = Slot::new(0, false);
        slot.add_action_button(Button::new(ButtonKind::Move));
        slot.add_action_button(Button::new(ButtonKind::Color));
        assert_eq!(slot.action_button().unwrap().kind(), ButtonKind::Color);
        assert!(slot.event_button().is_none());
    }

    #[test]
    fn slot_clicks_publish_immediately() {
        let mut slot = Slot::new(1, false);
        slot.add_event_button(Button::new(ButtonKind::Prox));
        let updates = slot.subscribe();
        slot.click(ButtonRole::Event, 0).unwrap();
        slot.click(ButtonRole::Event, 1).unwrap();
        assert_eq!(updates.try_iter().count(), 2);
        assert_eq!(slot.reconcile(), 0);
    }

    #[test]
    fn direct_button_changes_are_republished_on_reconcile() {
        let mut slot = Slot::new(1, false);
        slot.add_event_button(Button::new(ButtonKind::Prox));
        let updates = slot.subscribe();
        slot.button_mut(ButtonRole::Event).unwrap().click(0).unwrap();
        assert_eq!(updates.try_iter().count(), 0);
        assert_eq!(slot.reconcile(), 1);
        assert_eq!(updates.try_iter().count(), 1);
    }

    #[test]
    fn replaced_button_notices_are_not_republished() {
        let mut slot = Slot::new(0, false);
        slot.add_event_button(Button::new(ButtonKind::Prox));
        slot.add_action_button(Button::new(ButtonKind::Circle));
        slot.button_mut(ButtonRole::Event).unwrap().click(2).unwrap();
        slot.button_mut(ButtonRole::Action).unwrap().click(0).unwrap();
        let updates = slot.subscribe();

        slot.add_event_button(Button::new(ButtonKind::Tap));

        // The circle's click and the add itself.
        assert_eq!(updates.try_iter().count(), 2);
        assert_eq!(slot.reconcile(), 0);
    }

    #[test]
    fn evicted_button_notices_are_not_republished() {
        let mut slot = Slot::new(2, false);
        slot.add_event_button(Button::new(ButtonKind::Clap));
        let clap = slot.button_mut(ButtonRole::Event).unwrap();
        clap.click(0).unwrap();
        clap.detach();
        assert_eq!(slot.reconcile(), 1);
        assert!(slot.event_button().is_none());
    }

    #[test]
    fn click_on_empty_role_fails() {
        let mut slot = Slot::new(1, false);
        assert!(matches!(
            slot.click(ButtonRole::Action, 0),
            Err(VplError::IndexOutOfRange { .. })
        ));
    }

    #[test]
    fn set_row_reparents_buttons() {
        let mut slot = Slot::new(1, false);
        slot.add_event_button(tap_clicked());
        slot.add_action_button(Button::new(ButtonKind::Move));
        slot.set_row(4);
        assert_eq!(slot.event_button().unwrap().parent_slot_id(), 4);
        assert_eq!(slot.action_button().unwrap().parent_slot_id(), 4);
        assert_eq!(slot.reconcile(), 0);
        assert!(!slot.is_empty());
    }

    #[test]
    fn advanced_mode_reaches_event_button_only() {
        let mut slot = Slot::new(0, false);
        slot.add_event_button(tap_clicked());
        slot.add_action_button(Button::new(ButtonKind::Memory));
        slot.set_advanced(true);
        assert!(slot.is_advanced());
        assert!(slot.event_button().unwrap().is_advanced());
        assert!(!slot.action_button().unwrap().is_advanced());
    }

    #[test]
    fn highlight_follows_drag_role() {
        let mut slot = Slot::new(0, false);
        let drag = DragData::button(&ButtonPayload::new(-1, "move"), ButtonRole::Action);
        assert!(slot.drag_enter(&drag));
        assert!(slot.is_highlighted(ButtonRole::Action));
        assert!(!slot.is_highlighted(ButtonRole::Event));
        slot.drag_leave();
        assert!(!slot.is_highlighted(ButtonRole::Action));
    }

    #[test]
    fn slot_drags_are_not_accepted() {
        let mut slot = Slot::new(2, false);
        let drag = Slot::new(0, false).begin_slot_drag();
        assert_eq!(drag.decode_slot().unwrap().source_row, 0);
        assert_eq!(slot.drop(&drag), Ok(DropOutcome::NotAccepted));
        assert!(slot.is_empty());
    }

    #[test]
    fn error_flag() {
        let mut slot = Slot::new(0, false);
        assert!(!slot.has_error());
        slot.set_error(true);
        assert!(slot.has_error());
    }

    #[test]
    fn completeness_needs_both_valid_buttons() {
        let mut slot = Slot::new(0, false);
        slot.add_event_button(Button::new(ButtonKind::Prox));
        slot.add_action_button(Button::new(ButtonKind::Move));
        assert!(!slot.is_complete());
        slot.click(ButtonRole::Event, 2).unwrap();
        assert!(slot.is_complete());
        let ir = slot.ir();
        assert!(ir.is_complete());
        assert_eq!(ir.row, 0);
    }

    #[test]
    fn drop_outcome_maps_to_source_action() {
        let placed = DropOutcome::Placed {
            role: ButtonRole::Event,
            kind: ButtonKind::Tap,
        };
        assert_eq!(placed.action(), DropAction::Move);
        assert_eq!(DropOutcome::SelfDrop.action(), DropAction::Ignore);
    }
}
