//! Reset confirmation for one configurator.

use guildconf_core::{GuildConfigurator, Translator};
use tracing::{debug, warn};

use crate::error::{WizardError, WizardResult};
use crate::markdown::bold;

/// Operator answers to the confirmation prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetEvent {
    /// Go ahead.
    Confirm,
    /// Keep the stored values.
    Deny,
    /// Abort; treated like [`ResetEvent::Deny`].
    Cancel,
    /// The surface timed out.
    TimedOut,
}

/// Where a [`ResetSession`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetState {
    /// Waiting for an answer.
    AwaitingConfirmation,
    /// Stored values were removed.
    Completed,
    /// Nothing was changed.
    Declined,
    /// The surface gave up waiting.
    TimedOut,
}

/// Result of a handled [`ResetEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetTransition {
    /// The configurator was reset.
    Reset,
    /// The operator declined.
    Declined,
    /// Timed out, silently.
    TimedOut,
}

/// Asks once, then resets or leaves the configurator alone.
#[derive(Debug)]
pub struct ResetSession {
    configurator: GuildConfigurator,
    state: ResetState,
}

impl ResetSession {
    /// Wait for confirmation to reset `configurator`.
    #[must_use]
    pub fn new(configurator: GuildConfigurator) -> Self {
        Self {
            configurator,
            state: ResetState::AwaitingConfirmation,
        }
    }

    /// Confirmation prompt naming the configurator.
    #[must_use]
    pub fn prompt(&self, tr: &dyn Translator) -> String {
        bold(&tr.translate("reset_confirm", &[self.configurator.name()]))
    }

    /// The prompt again, annotated with why the last answer was not taken.
    #[must_use]
    pub fn retry_prompt(&self, tr: &dyn Translator, error: &str) -> String {
        format!("{}\n\n⚠️ {error}", self.prompt(tr))
    }

    /// Apply the operator's answer.
    ///
    /// # Errors
    ///
    /// [`WizardError::SessionClosed`] once answered, or the storage error if
    /// the reset failed (the session is then `Declined`).
    pub async fn handle(&mut self, event: ResetEvent) -> WizardResult<ResetTransition> {
        if self.state != ResetState::AwaitingConfirmation {
            return Err(WizardError::SessionClosed);
        }
        match event {
            ResetEvent::Confirm => {
                if let Err(e) = self.configurator.reset().await {
                    warn!(
                        guild_id = %self.configurator.guild_id(),
                        table = %self.configurator.table(),
                        error = %e,
                        "Reset failed"
                    );
                    self.state = ResetState::Declined;
                    return Err(e.into());
                }
                self.state = ResetState::Completed;
                Ok(ResetTransition::Reset)
            },
            ResetEvent::Deny | ResetEvent::Cancel => {
                debug!(table = %self.configurator.table(), "Reset declined");
                self.state = ResetState::Declined;
                Ok(ResetTransition::Declined)
            },
            ResetEvent::TimedOut => {
                self.state = ResetState::TimedOut;
                Ok(ResetTransition::TimedOut)
            },
        }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> ResetState {
        self.state
    }

    /// The configurator, with staged values cleared if it was reset.
    #[must_use]
    pub fn configurator(&self) -> &GuildConfigurator {
        &self.configurator
    }
}
