//! Password gate in front of the wardrobe session.

/// Result of one password attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateOutcome {
    /// Nothing was entered; no error is shown.
    Empty,
    /// Password matched (or the session was already unlocked).
    Granted,
    /// Password did not match.
    Denied,
}

/// Plain equality check against a single configured secret.
#[derive(Clone)]
pub struct AccessGate {
    secret: String,
}

impl AccessGate {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    pub fn check(&self, candidate: &str) -> GateOutcome {
        if candidate.is_empty() {
            GateOutcome::Empty
        } else if candidate == self.secret {
            GateOutcome::Granted
        } else {
            GateOutcome::Denied
        }
    }
}

impl std::fmt::Debug for AccessGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessGate").finish_non_exhaustive()
    }
}
