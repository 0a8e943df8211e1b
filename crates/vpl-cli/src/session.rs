//! Replays a [`Script`] against a column of slots.

use anyhow::{Context, Result, anyhow};
use crossbeam_channel::Receiver;
use serde::Serialize;
use tracing::{debug, info, info_span, warn};
use vpl_model::{
    Button, ButtonKind, ButtonRole, DragData, DropOutcome, Palette, Slot, SlotIR, SlotNotice,
};

use crate::script::{Script, Step};

/// A step that failed without stopping the replay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedStep {
    pub index: usize,
    pub op: &'static str,
    pub error: String,
}

/// Everything a finished replay produced.
#[derive(Debug, Clone, Serialize)]
pub struct ReplayReport {
    pub program: Vec<SlotIR>,
    /// "Slot updated" notices published during the session.
    pub notices: usize,
    pub failed_steps: Vec<FailedStep>,
}

impl ReplayReport {
    pub fn has_failures(&self) -> bool {
        !self.failed_steps.is_empty()
    }
}

/// Editor state driven by script steps.
pub struct Session {
    slots: Vec<Slot>,
    palette: Palette,
    updates: Vec<Receiver<SlotNotice>>,
}

impl Session {
    pub fn new(slot_count: usize, advanced: bool) -> Result<Self> {
        let mut slots = (0..slot_count)
            .map(|row| Ok(Slot::new(row_id(row)?, advanced)))
            .collect::<Result<Vec<_>>>()?;
        let updates = slots.iter_mut().map(Slot::subscribe).collect();
        Ok(Self {
            slots,
            palette: Palette::new(),
            updates,
        })
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Apply one step.
    ///
    /// # Errors
    ///
    /// Returns an error when the step names a missing slot or button, or when
    /// the model rejects it. The session is left as it was.
    pub fn apply(&mut self, step: &Step) -> Result<()> {
        match step {
            Step::Add { row, kind } => {
                let kind: ButtonKind = kind.parse()?;
                let advanced = self.slot(*row)?.is_advanced() && kind.is_event();
                let button = Button::with_advanced(kind, advanced);
                self.slot_mut(*row)?.add_button(kind.role(), button);
            }
            Step::Click { row, role, index } => {
                self.slot_mut(*row)?
                    .click((*role).into(), *index)
                    .with_context(|| format!("click sub-button {index} on row {row}"))?;
            }
            Step::ClickMemory { row, index } => {
                self.slot_mut(*row)?
                    .button_mut(ButtonRole::Event)
                    .ok_or_else(|| anyhow!("row {row} has no event button"))?
                    .click_memory(*index)
                    .with_context(|| format!("click memory selector {index} on row {row}"))?;
            }
            Step::Advanced { enabled } => {
                for slot in &mut self.slots {
                    slot.set_advanced(*enabled);
                }
            }
            Step::Drag { from, to, role } => {
                let role = ButtonRole::from(*role);
                let drag = self
                    .slot(*from)?
                    .begin_button_drag(role)
                    .ok_or_else(|| anyhow!("row {from} has no {role} button"))?;
                let target = self.slot_mut(*to)?;
                target.drag_enter(&drag);
                let outcome = target.drop(&drag);
                target.drag_leave();
                let outcome = outcome.with_context(|| format!("drop on row {to}"))?;
                self.slot_mut(*from)?.finish_button_drag(role, outcome.action());
                log_outcome(*to, outcome);
            }
            Step::PaletteDrop { kind, row } => {
                let drag = self
                    .palette
                    .get(kind)
                    .ok_or_else(|| anyhow!("no palette entry for {kind:?}"))?
                    .drag();
                self.drop_on(*row, &drag)?;
            }
            Step::DropRaw { row, tag, hex: text } => {
                let bytes = hex::decode(text).context("drop-raw bytes are not valid hex")?;
                let drag = DragData::Button {
                    bytes,
                    type_tag: tag.clone(),
                };
                self.drop_on(*row, &drag)?;
            }
            Step::Detach { row, role } => {
                let role = ButtonRole::from(*role);
                self.slot_mut(*row)?
                    .button_mut(role)
                    .ok_or_else(|| anyhow!("row {row} has no {role} button"))?
                    .detach();
            }
            Step::Reconcile => {
                for slot in &mut self.slots {
                    slot.reconcile();
                }
            }
        }
        Ok(())
    }

    /// Reconcile every slot and collect the program IR.
    pub fn finish(mut self, failed_steps: Vec<FailedStep>) -> ReplayReport {
        let program = self.slots.iter_mut().map(Slot::ir).collect();
        let notices = self.updates.iter().map(|rx| rx.try_iter().count()).sum();
        ReplayReport {
            program,
            notices,
            failed_steps,
        }
    }

    fn drop_on(&mut self, row: usize, drag: &DragData) -> Result<()> {
        let outcome = self
            .slot_mut(row)?
            .drop(drag)
            .with_context(|| format!("drop on row {row}"))?;
        log_outcome(row, outcome);
        Ok(())
    }

    fn slot(&self, row: usize) -> Result<&Slot> {
        let len = self.slots.len();
        self.slots
            .get(row)
            .ok_or_else(|| anyhow!("no slot at row {row} ({len} slots)"))
    }

    fn slot_mut(&mut self, row: usize) -> Result<&mut Slot> {
        let len = self.slots.len();
        self.slots
            .get_mut(row)
            .ok_or_else(|| anyhow!("no slot at row {row} ({len} slots)"))
    }
}

/// Run a whole script.
///
/// Failed steps are logged and collected; with `strict` the first failure
/// aborts the replay instead.
///
/// # Errors
///
/// Returns an error for an unusable slot count, or for the first failed step
/// when `strict` is set.
pub fn replay(script: &Script, strict: bool) -> Result<ReplayReport> {
    let span = info_span!("replay", slots = script.slots, steps = script.steps.len());
    let _guard = span.enter();

    let mut session = Session::new(script.slots, script.advanced)?;
    let mut failed_steps = Vec::new();
    for (index, step) in script.steps.iter().enumerate() {
        debug!(index, op = step.op(), "applying step");
        if let Err(error) = session.apply(step) {
            if strict {
                return Err(error.context(format!("step {index} ({})", step.op())));
            }
            warn!(index, op = step.op(), "step failed: {error:#}");
            failed_steps.push(FailedStep {
                index,
                op: step.op(),
                error: format!("{error:#}"),
            });
        }
    }
    let report = session.finish(failed_steps);
    info!(
        notices = report.notices,
        failed = report.failed_steps.len(),
        "replay finished"
    );
    Ok(report)
}

fn row_id(row: usize) -> Result<i32> {
    i32::try_from(row).map_err(|_| anyhow!("row {row} does not fit a slot id"))
}

fn log_outcome(row: usize, outcome: DropOutcome) {
    match outcome {
        DropOutcome::Placed { role, kind } => debug!(row, %role, %kind, "placed button"),
        DropOutcome::SelfDrop => debug!(row, "dropped on source slot"),
        DropOutcome::NotAccepted => debug!(row, "drop not accepted"),
    }
}
