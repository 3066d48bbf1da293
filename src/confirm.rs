//! Delete confirmation gate.
//!
//! Two states: `Idle` (`visible == false`) and `ConfirmPending`
//! (`visible == true` with a target row). Refetches are only scheduled while
//! Idle; leaving `ConfirmPending` through [`ConfirmationWorkflow::close`]
//! schedules exactly one.

use tracing::debug;

use crate::model::AssignmentViewModel;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfirmationState {
    pub visible: bool,
    pub target: Option<AssignmentViewModel>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    ConfirmPending,
}

/// Why a refetch was scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefetchReason {
    Mount,
    Closed,
    DependencyChanged,
}

#[derive(Debug, Default)]
pub struct ConfirmationWorkflow {
    state: ConfirmationState,
    scheduled: Option<RefetchReason>,
}

impl ConfirmationWorkflow {
    /// Fresh workflow in `Idle` with the initial fetch scheduled.
    pub fn mount() -> Self {
        Self {
            state: ConfirmationState::default(),
            scheduled: Some(RefetchReason::Mount),
        }
    }

    pub fn state(&self) -> &ConfirmationState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        if self.state.visible {
            Phase::ConfirmPending
        } else {
            Phase::Idle
        }
    }

    pub fn target(&self) -> Option<&AssignmentViewModel> {
        self.state.target.as_ref()
    }

    /// Whether dependency changes may currently trigger a refetch.
    pub fn refetch_armed(&self) -> bool {
        !self.state.visible
    }

    /// Idle -> ConfirmPending. Ignored while a confirmation is already open.
    pub fn request_delete(&mut self, row: AssignmentViewModel) -> bool {
        if self.state.visible {
            debug!(id = row.id, "delete intent ignored; confirmation already open");
            return false;
        }
        debug!(id = row.id, "delete confirmation opened");
        self.state = ConfirmationState {
            visible: true,
            target: Some(row),
        };
        // Nothing may refetch underneath the dialog.
        self.scheduled = None;
        true
    }

    /// ConfirmPending -> Idle, scheduling the refetch. No-op while Idle.
    pub fn close(&mut self) -> bool {
        if !self.state.visible {
            return false;
        }
        debug!("delete confirmation closed");
        self.state = ConfirmationState::default();
        self.scheduled = Some(RefetchReason::Closed);
        true
    }

    /// A watched dependency changed (e.g. the signed-in user).
    pub fn dependencies_changed(&mut self) {
        if self.refetch_armed() {
            self.scheduled = Some(RefetchReason::DependencyChanged);
        }
    }

    pub fn refetch_scheduled(&self) -> bool {
        self.scheduled.is_some()
    }

    /// Consume the scheduled refetch, if any.
    pub fn take_refetch(&mut self) -> Option<RefetchReason> {
        if !self.refetch_armed() {
            return None;
        }
        self.scheduled.take()
    }
}
