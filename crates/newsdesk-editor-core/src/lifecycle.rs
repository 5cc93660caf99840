//! Selection/edit lifecycle.
//!
//! `Idle → Editing` on any keystroke, paste or command; `Editing → Refreshing`
//! once the mutation is serialized; `Refreshing → Idle` once the snapshot is
//! published. Every transition happens within one host event turn.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorPhase {
    #[default]
    Idle,
    Editing,
    Refreshing,
}

/// Inputs that drive [`EditorPhase`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseEvent {
    /// Keystroke, paste or toolbar command reached the surface.
    Input,
    /// Mutation done and change notification sent; requery starts.
    Mutated,
    /// Selection moved without a mutation; requery starts.
    SelectionChanged,
    /// Snapshot published.
    Published,
}

impl EditorPhase {
    pub fn next(self, event: PhaseEvent) -> Self {
        use EditorPhase::*;
        use PhaseEvent::*;

        match (self, event) {
            (_, Input) => Editing,
            (Editing, Mutated) => Refreshing,
            (Idle, SelectionChanged) => Refreshing,
            (Refreshing, Published) => Idle,
            (phase, event) => {
                tracing::trace!(
                    target: "newsdesk::lifecycle",
                    ?phase,
                    ?event,
                    "ignoring out-of-order phase event"
                );
                phase
            }
        }
    }
}

impl fmt::Display for EditorPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Idle => "idle",
            Self::Editing => "editing",
            Self::Refreshing => "refreshing",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_edit_cycle() {
        let phase = EditorPhase::Idle
            .next(PhaseEvent::Input)
            .next(PhaseEvent::Mutated);
        assert_eq!(phase, EditorPhase::Refreshing);
        assert_eq!(phase.next(PhaseEvent::Published), EditorPhase::Idle);
    }

    #[test]
    fn test_selection_only_cycle() {
        let phase = EditorPhase::Idle.next(PhaseEvent::SelectionChanged);
        assert_eq!(phase, EditorPhase::Refreshing);
        assert_eq!(phase.next(PhaseEvent::Published), EditorPhase::Idle);
    }

    #[test]
    fn test_out_of_order_events_hold_phase() {
        assert_eq!(EditorPhase::Idle.next(PhaseEvent::Published), EditorPhase::Idle);
        assert_eq!(EditorPhase::Idle.next(PhaseEvent::Mutated), EditorPhase::Idle);
        assert_eq!(
            EditorPhase::Editing.next(PhaseEvent::SelectionChanged),
            EditorPhase::Editing
        );
    }
}
