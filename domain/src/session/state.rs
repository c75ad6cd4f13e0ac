//! Turn state machine.
//!
//! ```text
//! Idle --Send--> Requesting --Chunk--> Streaming --Chunk--> Streaming
//!                    |                     |
//!                    +---End | Error-------+--> Idle
//! ```

use super::stream::StreamEvent;

/// State of the single conversation turn that may be in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// No turn in flight. Initial and terminal state.
    #[default]
    Idle,
    /// Request issued, no chunk received yet.
    Requesting,
    /// At least one chunk received.
    Streaming,
}

/// Inputs that drive [`SessionState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Send,
    Chunk,
    End,
    Error,
}

impl From<&StreamEvent> for Transition {
    fn from(event: &StreamEvent) -> Self {
        match event {
            StreamEvent::Chunk(_) => Transition::Chunk,
            StreamEvent::End(_) => Transition::End,
            StreamEvent::Error { .. } => Transition::Error,
        }
    }
}

impl SessionState {
    /// Apply a transition. Returns `None` when it is not allowed from this state.
    pub fn next(self, transition: Transition) -> Option<SessionState> {
        use SessionState::*;
        match (self, transition) {
            (Idle, Transition::Send) => Some(Requesting),
            (Requesting | Streaming, Transition::Chunk) => Some(Streaming),
            (Requesting | Streaming, Transition::End | Transition::Error) => Some(Idle),
            _ => None,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, SessionState::Idle)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SessionState::Idle => "idle",
            SessionState::Requesting => "requesting",
            SessionState::Streaming => "streaming",
        }
    }
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_STATES: [SessionState; 3] = [
        SessionState::Idle,
        SessionState::Requesting,
        SessionState::Streaming,
    ];
    const ALL_TRANSITIONS: [Transition; 4] = [
        Transition::Send,
        Transition::Chunk,
        Transition::End,
        Transition::Error,
    ];

    #[test]
    fn send_only_from_idle() {
        assert_eq!(
            SessionState::Idle.next(Transition::Send),
            Some(SessionState::Requesting)
        );
        assert_eq!(SessionState::Requesting.next(Transition::Send), None);
        assert_eq!(SessionState::Streaming.next(Transition::Send), None);
    }

    #[test]
    fn idle_ignores_stream_events() {
        assert_eq!(SessionState::Idle.next(Transition::Chunk), None);
        assert_eq!(SessionState::Idle.next(Transition::End), None);
        assert_eq!(SessionState::Idle.next(Transition::Error), None);
    }

    #[test]
    fn terminal_events_return_to_idle() {
        for state in [SessionState::Requesting, SessionState::Streaming] {
            assert_eq!(state.next(Transition::End), Some(SessionState::Idle));
            assert_eq!(state.next(Transition::Error), Some(SessionState::Idle));
            assert_eq!(state.next(Transition::Chunk), Some(SessionState::Streaming));
        }
    }

    #[test]
    fn only_documented_paths_are_reachable() {
        let mut allowed = Vec::new();
        for state in ALL_STATES {
            for transition in ALL_TRANSITIONS {
                if let Some(next) = state.next(transition) {
                    allowed.push((state, transition, next));
                }
            }
        }
        assert_eq!(allowed.len(), 7);
        assert!(
            allowed
                .iter()
                .all(|(from, _, to)| *to != SessionState::Requesting || from.is_idle())
        );
    }

    #[test]
    fn transition_from_event() {
        assert_eq!(
            Transition::from(&StreamEvent::Chunk("x".into())),
            Transition::Chunk
        );
        assert_eq!(
            Transition::from(&StreamEvent::End("x".into())),
            Transition::End
        );
    }

    #[test]
    fn default_is_idle() {
        assert!(SessionState::default().is_idle());
    }
}
