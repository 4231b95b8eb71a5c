// Per (guest, event) check-in state machine:
// Requested -> Validated -> Committed, or Requested -> Rejected(reason).

use serde::Serialize;
use thiserror::Error;

use crate::entities::RejectReason;
use crate::value_objects::{EventId, GuestId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "reason", rename_all = "snake_case")]
pub enum CheckinState {
    Requested,
    Validated,
    Committed,
    Rejected(RejectReason),
}

#[derive(Debug, Error)]
#[error("invalid check-in transition for guest {guest_id} at event {event_id}: {from:?} -> {to}")]
pub struct InvalidTransition {
    pub guest_id: GuestId,
    pub event_id: EventId,
    pub from: CheckinState,
    pub to: &'static str,
}

#[derive(Debug, Clone)]
pub struct CheckinFlow {
    guest_id: GuestId,
    event_id: EventId,
    state: CheckinState,
}

impl CheckinFlow {
    pub fn new(guest_id: GuestId, event_id: EventId) -> Self {
        Self {
            guest_id,
            event_id,
            state: CheckinState::Requested,
        }
    }

    pub fn state(&self) -> CheckinState {
        self.state
    }

    pub fn validate(&mut self) -> Result<(), InvalidTransition> {
        self.transition(CheckinState::Requested, CheckinState::Validated, "validated")
    }

    pub fn commit(&mut self) -> Result<(), InvalidTransition> {
        self.transition(CheckinState::Validated, CheckinState::Committed, "committed")
    }

    pub fn reject(&mut self, reason: RejectReason) -> Result<(), InvalidTransition> {
        self.transition(CheckinState::Requested, CheckinState::Rejected(reason), "rejected")
    }

    fn transition(
        &mut self,
        from: CheckinState,
        to: CheckinState,
        label: &'static str,
    ) -> Result<(), InvalidTransition> {
        if self.state != from {
            return Err(InvalidTransition {
                guest_id: self.guest_id.clone(),
                event_id: self.event_id.clone(),
                from: self.state,
                to: label,
            });
        }
        self.state = to;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flow() -> CheckinFlow {
        CheckinFlow::new(GuestId::from("g"), EventId::from("e"))
    }

    #[test]
    fn happy_path_reaches_committed() {
        let mut flow = flow();
        flow.validate().expect("validate");
        flow.commit().expect("commit");
        assert_eq!(flow.state(), CheckinState::Committed);
    }

    #[test]
    fn rejection_is_terminal() {
        let mut flow = flow();
        flow.reject(RejectReason::AlreadyCheckedIn).expect("reject");
        assert_eq!(flow.state(), CheckinState::Rejected(RejectReason::AlreadyCheckedIn));
        assert!(flow.validate().is_err());
        assert!(flow.commit().is_err());
    }

    #[test]
    fn commit_requires_validation() {
        let mut flow = flow();
        let err = flow.commit().expect_err("must validate first");
        assert_eq!(err.from, CheckinState::Requested);
    }

    #[test]
    fn validated_flow_cannot_be_rejected() {
        let mut flow = flow();
        flow.validate().expect("validate");
        assert!(flow.reject(RejectReason::AlreadyCheckedIn).is_err());
    }
}
