//! Integration tests for scripted session replay.

use vpl_cli::script::Script;
use vpl_cli::session::replay;
use vpl_dnd::{ButtonPayload, encode_button};

fn script(json: &str) -> Script {
    Script::from_json(json).expect("valid script")
}

#[test]
fn test_replay_moves_tap_between_rows() {
    let script = script(
        r#"{
            "slots": 6,
            "steps": [
                { "op": "add", "row": 2, "kind": "tap" },
                { "op": "click", "row": 2, "role": "event", "index": 0 },
                { "op": "drag", "from": 2, "to": 5, "role": "event" }
            ]
        }"#,
    );
    let report = replay(&script, false).unwrap();

    assert!(!report.has_failures());
    assert_eq!(report.program.len(), 6);
    assert!(report.program[2].is_empty());
    let moved = report.program[5].event.as_ref().unwrap();
    assert_eq!(moved.basename, "tap");
    assert_eq!(moved.clicked, vec![1]);
    // add and click on row 2, the drop on row 5, the eviction on row 2
    assert_eq!(report.notices, 4);
}

#[test]
fn test_replay_memory_selectors() {
    let script = script(
        r#"{
            "slots": 1,
            "advanced": true,
            "steps": [
                { "op": "add", "row": 0, "kind": "clap" },
                { "op": "click-memory", "row": 0, "index": 1 },
                { "op": "click-memory", "row": 0, "index": 1 },
                { "op": "advanced", "enabled": false },
                { "op": "advanced", "enabled": true }
            ]
        }"#,
    );
    let report = replay(&script, true).unwrap();
    let event = report.program[0].event.as_ref().unwrap();
    assert_eq!(event.memory_state, 0b10_00);
}

#[test]
fn test_replay_raw_payload() {
    let payload = ButtonPayload::new(-1, "circle")
        .with_composite_state(-1)
        .with_sub_button_states(vec![0, 0, 2, 0, 0, 0, 0, 1]);
    let json = format!(
        r#"{{
            "slots": 2,
            "steps": [
                {{ "op": "drop-raw", "row": 1, "tag": "action", "hex": "{}" }}
            ]
        }}"#,
        hex::encode(encode_button(&payload))
    );
    let report = replay(&script(&json), true).unwrap();

    let program = serde_json::to_value(&report.program).unwrap();
    assert_eq!(program[1]["action"]["kind"], "circle");
    assert_eq!(program[1]["action"]["clicked"][2], 2);
    assert_eq!(program[1]["action"]["arity"], 3);
    assert!(program[0]["action"].is_null());
}

#[test]
fn test_failed_steps_are_collected() {
    let script = script(
        r#"{
            "slots": 2,
            "steps": [
                { "op": "add", "row": 0, "kind": "laser" },
                { "op": "add", "row": 0, "kind": "move" },
                { "op": "click", "row": 0, "role": "action", "index": 0 },
                { "op": "palette-drop", "kind": "sound", "row": 9 },
                { "op": "drop-raw", "row": 1, "tag": "event", "hex": "ffffffff" }
            ]
        }"#,
    );
    let report = replay(&script, false).unwrap();

    let failed: Vec<_> = report.failed_steps.iter().map(|f| f.index).collect();
    assert_eq!(failed, [0, 2, 3, 4]);
    insta::assert_snapshot!(report.failed_steps[0].error, @r#"unknown button kind: "laser""#);
    assert_eq!(report.program[0].action.as_ref().unwrap().basename, "move");
    assert!(report.program[1].is_empty());
}

#[test]
fn test_strict_replay_stops_at_first_failure() {
    let script = script(
        r#"{
            "slots": 1,
            "steps": [
                { "op": "add", "row": 0, "kind": "tap" },
                { "op": "detach", "row": 0, "role": "action" }
            ]
        }"#,
    );
    let err = replay(&script, true).unwrap_err();
    let message = format!("{err:#}");
    assert!(message.starts_with("step 1 (detach)"), "{message}");
    assert!(message.contains("no action button"), "{message}");
}
