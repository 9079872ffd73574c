//! Identity selection state machine
//!
//! ```text
//!            select(X)                 select(Y), Y != X
//!   Idle ───────────────► Showing(X) ───────────────────► Showing(Y)
//!    ▲                      │   │
//!    └──── select(X) ───────┘   │
//!    └──── dismiss ─────────────┘
//! ```
//!
//! At most one identity is active. Re-selecting the active identity clears it;
//! selecting another replaces it directly with no intermediate `Idle`.

use bio_types::Identity;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(tag = "state", content = "identity", rename_all = "snake_case")]
pub enum SelectionState {
    #[default]
    Idle,
    Showing(Identity),
}

/// Inputs the state machine reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionEvent {
    /// Trigger tapped in the headline
    Select(Identity),
    /// Back control, backdrop tap, drag past threshold, escape key
    Dismiss,
}

/// What changed as a result of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionChange {
    pub previous: Option<Identity>,
    pub current: Option<Identity>,
}

impl SelectionChange {
    pub fn is_noop(&self) -> bool {
        self.previous == self.current
    }
}

impl SelectionState {
    pub fn active(&self) -> Option<Identity> {
        match self {
            SelectionState::Idle => None,
            SelectionState::Showing(identity) => Some(*identity),
        }
    }

    pub fn is_showing(&self, identity: Identity) -> bool {
        self.active() == Some(identity)
    }

    /// Pure transition function.
    pub fn next(self, event: SelectionEvent) -> SelectionState {
        match (self, event) {
            (SelectionState::Showing(active), SelectionEvent::Select(identity)) if active == identity => {
                SelectionState::Idle
            }
            (_, SelectionEvent::Select(identity)) => SelectionState::Showing(identity),
            (_, SelectionEvent::Dismiss) => SelectionState::Idle,
        }
    }

    /// Apply an event in place and report the change.
    pub fn apply(&mut self, event: SelectionEvent) -> SelectionChange {
        let previous = self.active();
        *self = self.next(event);
        let change = SelectionChange {
            previous,
            current: self.active(),
        };
        if !change.is_noop() {
            tracing::debug!(?event, from = ?change.previous, to = ?change.current, "selection changed");
        }
        change
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn starts_idle() {
        assert_eq!(SelectionState::default(), SelectionState::Idle);
        assert_eq!(SelectionState::default().active(), None);
    }

    #[test]
    fn toggle_on_and_off() {
        let mut state = SelectionState::Idle;
        state.apply(SelectionEvent::Select(Identity::Journalist));
        assert_eq!(state, SelectionState::Showing(Identity::Journalist));
        state.apply(SelectionEvent::Select(Identity::Journalist));
        assert_eq!(state, SelectionState::Idle);
    }

    #[test]
    fn switching_is_direct() {
        let mut state = SelectionState::Showing(Identity::Advocate);
        let change = state.apply(SelectionEvent::Select(Identity::Student));
        assert_eq!(change.previous, Some(Identity::Advocate));
        assert_eq!(change.current, Some(Identity::Student));
    }

    #[test]
    fn dismiss_from_anywhere_goes_idle() {
        for identity in Identity::ALL {
            assert_eq!(
                SelectionState::Showing(identity).next(SelectionEvent::Dismiss),
                SelectionState::Idle
            );
        }
        let mut idle = SelectionState::Idle;
        assert!(idle.apply(SelectionEvent::Dismiss).is_noop());
    }

    fn identity() -> impl Strategy<Value = Identity> {
        prop::sample::select(Identity::ALL.to_vec())
    }

    fn event() -> impl Strategy<Value = SelectionEvent> {
        prop_oneof![
            4 => identity().prop_map(SelectionEvent::Select),
            1 => Just(SelectionEvent::Dismiss),
        ]
    }

    proptest! {
        #[test]
        fn reselecting_active_always_goes_idle(events in prop::collection::vec(event(), 0..64)) {
            let mut state = SelectionState::Idle;
            for event in events {
                state.apply(event);
                if let Some(active) = state.active() {
                    prop_assert_eq!(state.next(SelectionEvent::Select(active)), SelectionState::Idle);
                }
            }
        }

        #[test]
        fn selection_result_depends_only_on_previous_active(events in prop::collection::vec(event(), 1..64)) {
            let mut state = SelectionState::Idle;
            for event in events {
                let before = state.active();
                state.apply(event);
                let expected = match event {
                    SelectionEvent::Select(id) if before == Some(id) => None,
                    SelectionEvent::Select(id) => Some(id),
                    SelectionEvent::Dismiss => None,
                };
                prop_assert_eq!(state.active(), expected);
            }
        }
    }
}
