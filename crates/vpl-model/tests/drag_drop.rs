//! Integration tests for moving buttons between slots.
//!
//! These tests drive the full drag cycle: snapshot in the source slot,
//! encode, drop on the target, finish the drag in the source and reconcile.

use vpl_dnd::PayloadWriter;
use vpl_model::{
    Button, ButtonKind, ButtonRole, DragData, DropAction, DropOutcome, Palette, Slot, SlotNotice,
    VplError,
};

/// Move the occupant of `role` from `source` to `target` the way the editor does.
fn move_button(source: &mut Slot, target: &mut Slot, role: ButtonRole) -> DropOutcome {
    let drag = source
        .begin_button_drag(role)
        .expect("source slot has no button in that role");
    target.drag_enter(&drag);
    let outcome = target.drop(&drag).expect("drop failed");
    source.finish_button_drag(role, outcome.action());
    source.reconcile();
    outcome
}

fn raw_drag(tag: &str, build: impl FnOnce(&mut PayloadWriter)) -> DragData {
    let mut writer = PayloadWriter::new();
    build(&mut writer);
    DragData::Button {
        bytes: writer.into_bytes(),
        type_tag: tag.to_string(),
    }
}

#[test]
fn test_tap_moves_from_row_two_to_row_five() {
    let mut row2 = Slot::new(2, false);
    let mut tap = Button::new(ButtonKind::Tap);
    tap.click(0).unwrap();
    row2.add_event_button(tap);
    let mut row5 = Slot::new(5, false);

    let outcome = move_button(&mut row2, &mut row5, ButtonRole::Event);

    assert_eq!(
        outcome,
        DropOutcome::Placed {
            role: ButtonRole::Event,
            kind: ButtonKind::Tap
        }
    );
    let moved = row5.event_button().unwrap();
    assert_eq!(moved.kind(), ButtonKind::Tap);
    assert_eq!(moved.sub_values(), vec![1]);
    assert_eq!(moved.parent_slot_id(), 5);
    assert!(!row5.is_highlighted(ButtonRole::Event));
    assert!(row2.event_button().is_none());
}

#[test]
fn test_move_replays_every_sub_button() {
    let mut source = Slot::new(0, false);
    let mut circle = Button::new(ButtonKind::Circle);
    circle.click(1).unwrap();
    circle.click(6).unwrap();
    circle.click(6).unwrap();
    source.add_action_button(circle);
    let mut target = Slot::new(1, false);
    target.add_action_button(Button::new(ButtonKind::Move));

    move_button(&mut source, &mut target, ButtonRole::Action);

    let placed = target.action_button().unwrap();
    assert_eq!(placed.kind(), ButtonKind::Circle);
    assert_eq!(placed.sub_values(), vec![0, 1, 0, 0, 0, 0, 2, 0]);
    assert!(source.is_empty());
}

#[test]
fn test_drop_on_source_slot_is_ignored() {
    let mut slot = Slot::new(3, false);
    slot.add_event_button(Button::new(ButtonKind::Clap));
    let drag = slot.begin_button_drag(ButtonRole::Event).unwrap();

    assert_eq!(slot.drop(&drag), Ok(DropOutcome::SelfDrop));
    slot.finish_button_drag(ButtonRole::Event, DropAction::Ignore);
    slot.reconcile();
    assert_eq!(slot.event_button().unwrap().kind(), ButtonKind::Clap);
}

#[test]
fn test_negative_count_is_rejected_and_occupant_kept() {
    let mut slot = Slot::new(1, false);
    let mut prox = Button::new(ButtonKind::Prox);
    prox.click(4).unwrap();
    slot.add_event_button(prox);
    let updates = slot.subscribe();

    let drag = raw_drag("event", |w| {
        w.write_i32(0).write_string("tap").write_i32(-1).write_i32(-1);
    });
    let err = slot.drop(&drag).unwrap_err();

    assert!(matches!(err, VplError::MalformedDragPayload { .. }), "{err}");
    let occupant = slot.event_button().unwrap();
    assert_eq!(occupant.kind(), ButtonKind::Prox);
    assert_eq!(occupant.sub_value(4), Some(1));
    assert_eq!(updates.try_iter().count(), 0);
}

#[test]
fn test_rejected_drop_keeps_detached_occupant_and_stays_silent() {
    let mut slot = Slot::new(1, false);
    slot.add_event_button(Button::new(ButtonKind::Prox));
    slot.button_mut(ButtonRole::Event).unwrap().detach();
    let updates = slot.subscribe();

    let drag = raw_drag("event", |w| {
        w.write_i32(0).write_string("tap").write_i32(-1).write_i32(-1);
    });
    let err = slot.drop(&drag).unwrap_err();

    assert!(matches!(err, VplError::MalformedDragPayload { .. }), "{err}");
    assert_eq!(slot.event_button().unwrap().kind(), ButtonKind::Prox);
    assert_eq!(updates.try_iter().count(), 0);

    assert_eq!(slot.reconcile(), 1);
    assert!(slot.event_button().is_none());
}

#[test]
fn test_click_through_slot_notifies_subscribers() {
    let mut slot = Slot::new(0, false);
    slot.add_event_button(Button::new(ButtonKind::Prox));
    let updates = slot.subscribe();

    slot.click(ButtonRole::Event, 0).unwrap();

    assert_eq!(
        updates.try_iter().collect::<Vec<_>>(),
        vec![SlotNotice::Updated { row: 0 }]
    );
}

#[test]
fn test_invalid_drops_leave_slot_unchanged() {
    let cases = [
        raw_drag("event", |w| {
            w.write_i32(0).write_string("laser").write_i32(-1).write_i32(0);
        }),
        raw_drag("event", |w| {
            w.write_i32(0).write_string("tap").write_i32(-1).write_i32(2);
            w.write_i32(1).write_i32(0);
        }),
        raw_drag("event", |w| {
            w.write_i32(0).write_string("prox").write_i32(-1).write_i32(7);
            for state in [0, 0, 3, 0, 0, 0, 0] {
                w.write_i32(state);
            }
        }),
        raw_drag("event", |w| {
            w.write_i32(0).write_string("tap").write_i32(-1).write_i32(1);
            w.write_i32(-2);
        }),
        raw_drag("sensor", |w| {
            w.write_i32(0).write_string("tap").write_i32(-1).write_i32(1);
            w.write_i32(1);
        }),
    ];

    for drag in &cases {
        let mut slot = Slot::new(4, false);
        slot.add_event_button(Button::new(ButtonKind::Buttons));
        let err = slot.drop(drag).unwrap_err();
        assert!(matches!(err, VplError::MalformedDragPayload { .. }), "{err}");
        assert_eq!(slot.event_button().unwrap().kind(), ButtonKind::Buttons);
    }
}

#[test]
fn test_short_buffer_is_truncated() {
    let mut slot = Slot::new(0, false);
    let drag = raw_drag("action", |w| {
        w.write_i32(2).write_string("sound").write_i32(-1).write_i32(3);
        w.write_i32(0);
    });
    let err = slot.drop(&drag).unwrap_err();
    assert!(matches!(err, VplError::TruncatedPayload { .. }), "{err}");
    assert!(slot.is_empty());
}

#[test]
fn test_detached_button_evicted_with_one_notice() {
    let mut slot = Slot::new(6, false);
    slot.add_action_button(Button::new(ButtonKind::Color));
    let updates = slot.subscribe();

    slot.button_mut(ButtonRole::Action).unwrap().detach();
    assert_eq!(updates.try_iter().count(), 0);

    assert_eq!(slot.reconcile(), 1);
    assert_eq!(
        updates.try_iter().collect::<Vec<_>>(),
        vec![SlotNotice::Updated { row: 6 }]
    );
    assert!(slot.action_button().is_none());
    assert_eq!(slot.reconcile(), 0);
}

#[test]
fn test_palette_drop_creates_fresh_button() {
    let palette = Palette::new();
    let mut slot = Slot::new(0, false);
    slot.add_action_button(Button::new(ButtonKind::Move));

    let drag = palette.get("sound").unwrap().drag();
    let outcome = slot.drop(&drag).unwrap();

    assert_eq!(outcome.action(), DropAction::Move);
    let sound = slot.action_button().unwrap();
    assert_eq!(sound.kind(), ButtonKind::Sound);
    assert_eq!(sound.sub_values(), vec![0, 0, 0]);
    assert!(!sound.is_valid());
}

#[test]
fn test_placed_button_dropped_on_palette_is_deleted() {
    let palette = Palette::new();
    let mut slot = Slot::new(2, false);
    slot.add_event_button(Button::new(ButtonKind::Tap));

    let drag = slot.begin_button_drag(ButtonRole::Event).unwrap();
    let target = palette.get("clap").unwrap();
    assert!(target.accepts(&drag));
    slot.finish_button_drag(ButtonRole::Event, DropAction::Move);

    assert_eq!(slot.reconcile(), 1);
    assert!(slot.is_empty());
}

#[test]
fn test_slot_reorder_updates_source_ids() {
    let mut slot = Slot::new(1, false);
    slot.add_event_button(Button::new(ButtonKind::Tap));
    slot.set_row(7);

    let drag = slot.begin_button_drag(ButtonRole::Event).unwrap();
    assert_eq!(drag.decode_button().unwrap().source_slot, 7);
    assert_eq!(slot.begin_slot_drag().decode_slot().unwrap().source_row, 7);
}
