//! Shared-secret gating for moderation actions.
//!
//! A single code, distributed out of band, unlocks the add-event and
//! remove-event forms. This is gating, not authentication: anyone who
//! learns the code can moderate any event, and the code never leaves the
//! client. A known limitation of the product, kept as-is.

/// Validates an entered code against the configured moderation secret.
///
/// The secret is injected at construction so it can be swapped per
/// deployment without touching control flow.
#[derive(Debug, Clone)]
pub struct AccessGate {
    secret: String,
}

impl AccessGate {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Exact, case-sensitive comparison. No trimming; never errors.
    pub fn verify(&self, entered: &str) -> bool {
        entered == self.secret
    }
}

/// Where a gated dialog currently stands.
///
/// Each moderation action owns an independent dialog, and both run the same
/// machine: `Closed → CodeEntry → ActionForm`. A wrong code stays in
/// `CodeEntry` with an inline error; any dismissal returns to `Closed` and
/// discards the attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateState {
    /// The dialog is not shown.
    Closed,
    /// Waiting for the secret code. `error` holds the inline message after
    /// a mismatch.
    CodeEntry { error: Option<String> },
    /// The code was accepted and the action form is open. `error` holds a
    /// server-side rejection from the last submission attempt.
    ActionForm { error: Option<String> },
}

/// One gated dialog instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateDialog {
    state: GateState,
}

impl GateDialog {
    pub fn new() -> Self {
        Self {
            state: GateState::Closed,
        }
    }

    pub fn state(&self) -> &GateState {
        &self.state
    }

    /// Opening the gated action: `Closed → CodeEntry` with a clean slate.
    pub fn open(&mut self) {
        self.state = GateState::CodeEntry { error: None };
    }

    /// Submit an entered code. A match moves to `ActionForm`; a mismatch
    /// stays in `CodeEntry` with an inline error. Ignored unless the
    /// dialog is in `CodeEntry`.
    pub fn submit_code(&mut self, gate: &AccessGate, entered: &str) -> bool {
        if !matches!(self.state, GateState::CodeEntry { .. }) {
            return false;
        }
        if gate.verify(entered) {
            self.state = GateState::ActionForm { error: None };
            true
        } else {
            self.state = GateState::CodeEntry {
                error: Some("Wrong code! Please try again.".to_string()),
            };
            false
        }
    }

    /// Cancel or backdrop dismissal, from any state. The entered code is
    /// discarded with the dialog.
    pub fn dismiss(&mut self) {
        self.state = GateState::Closed;
    }

    /// Whether the action form is unlocked.
    pub fn action_unlocked(&self) -> bool {
        matches!(self.state, GateState::ActionForm { .. })
    }

    /// Record a server-side rejection, keeping the form open.
    pub(crate) fn reject(&mut self, message: impl Into<String>) {
        if let GateState::ActionForm { error } = &mut self.state {
            *error = Some(message.into());
        }
    }

    /// Close the dialog after a successful action.
    pub(crate) fn complete(&mut self) {
        self.state = GateState::Closed;
    }
}

impl Default for GateDialog {
    fn default() -> Self {
        Self::new()
    }
}
