use serde::{Deserialize, Serialize};

use crate::ports::PortError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InteractionStatus {
    Waiting,
    Approving,
    Approved,
    Rejecting,
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionAction {
    Approve,
    Reject,
    Resolve,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateTransition {
    pub from: InteractionStatus,
    pub to: InteractionStatus,
    pub reason: &'static str,
}

impl InteractionStatus {
    pub fn is_final(self) -> bool {
        matches!(self, InteractionStatus::Approved | InteractionStatus::Rejected)
    }
}

pub fn interaction_transition(
    status: InteractionStatus,
    action: InteractionAction,
) -> Result<(InteractionStatus, StateTransition), PortError> {
    use InteractionAction as A;
    use InteractionStatus as S;

    let (to, reason) = match (status, action) {
        (S::Waiting, A::Approve) => (S::Approving, "approve_dispatched"),
        (S::Waiting, A::Reject) => (S::Rejecting, "reject_dispatched"),
        (S::Approving, A::Resolve) => (S::Approved, "approved"),
        (S::Rejecting, A::Resolve) => (S::Rejected, "rejected"),
        _ => {
            return Err(PortError::Validation(format!(
                "illegal interaction transition: {status:?} + {action:?}"
            )))
        }
    };
    Ok((
        to,
        StateTransition {
            from: status,
            to,
            reason,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn approve_path_reaches_approved() {
        let (s1, t1) =
            interaction_transition(InteractionStatus::Waiting, InteractionAction::Approve)
                .expect("waiting -> approving");
        assert_eq!(s1, InteractionStatus::Approving);
        assert_eq!(t1.reason, "approve_dispatched");
        let (s2, _) = interaction_transition(s1, InteractionAction::Resolve)
            .expect("approving -> approved");
        assert_eq!(s2, InteractionStatus::Approved);
        assert!(s2.is_final());
    }

    #[test]
    fn resolved_interaction_cannot_be_approved_again() {
        let err = interaction_transition(InteractionStatus::Approved, InteractionAction::Approve)
            .expect_err("must fail");
        assert!(err.to_string().contains("illegal interaction transition"));

        let err = interaction_transition(InteractionStatus::Approving, InteractionAction::Reject)
            .expect_err("must fail");
        assert!(err.to_string().contains("illegal interaction transition"));
    }
}
