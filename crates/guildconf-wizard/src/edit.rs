//! The edit session: a queue-driven state machine editing one entry at a
//! time.
//!
//! ```text
//!            begin                    reply ok / clear / skip
//! Prompting ───────▶ AwaitingInput ─────────────────────────▶ Advancing
//!     ▲                  │  │                                   │     │
//!     │    reply invalid │  │ finish                      next  │     │ queue empty
//!     └──────────────────┘  └───────────────▶ Finished ◀────────┼─────┘
//!     ▲                                                         │
//!     └─────────────────────────────────────────────────────────┘
//! ```
//!
//! `cancel` and `TimedOut` end the session from any waiting state. Events
//! after a terminal state are rejected.

use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

use guildconf_core::{Directory, GuildConfigurator, Translator};
use tracing::{debug, warn};

use crate::error::{InputError, WizardError, WizardResult};
use crate::parse::{ParseFailure, apply_input};
use crate::prompt::render_prompt;
use crate::summary::{DisplayCache, cached_display};

/// Where an [`EditSession`] is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// The prompt for this entry is about to be shown.
    Prompting(String),
    /// Waiting for the operator to act on this entry.
    AwaitingInput(String),
    /// Checking a reply (`Some`) or a clear request (`None`) for this entry.
    Validating {
        /// Entry key.
        key: String,
        /// Raw reply.
        input: Option<String>,
    },
    /// Moving to the next queued entry.
    Advancing,
    /// Values were saved.
    Finished,
    /// Aborted without saving.
    Cancelled,
    /// The surface gave up waiting.
    TimedOut,
}

impl SessionState {
    /// Whether the session has ended.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Finished | Self::Cancelled | Self::TimedOut)
    }
}

/// Operator actions fed to [`EditSession::handle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// Leave the current entry as it is.
    Skip,
    /// Unset the current entry.
    Clear,
    /// Save now.
    Finish,
    /// Abort without saving.
    Cancel,
    /// Free-text value for the current entry.
    Reply(String),
    /// The surface timed out.
    TimedOut,
}

/// What the caller should do after an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Show this prompt for the next entry.
    Prompt(String),
    /// The reply was rejected; show this prompt again.
    Retry {
        /// Re-rendered prompt, annotated with `error`.
        prompt: String,
        /// Localized reason.
        error: String,
    },
    /// Values were saved.
    Finished,
    /// The session was aborted.
    Cancelled,
    /// The session timed out.
    TimedOut,
}

/// Edits the writable entries of one configurator.
pub struct EditSession {
    configurator: GuildConfigurator,
    queue: VecDeque<String>,
    cache: DisplayCache,
    state: SessionState,
    last_error: Option<String>,
    directory: Arc<dyn Directory>,
    tr: Arc<dyn Translator>,
}

impl EditSession {
    /// Queue every writable entry of `configurator`, in declared order.
    ///
    /// `cache` holds display strings already computed by the summary.
    ///
    /// # Errors
    ///
    /// [`WizardError::NothingToConfigure`] when no entry is writable.
    pub fn start(
        configurator: GuildConfigurator,
        cache: DisplayCache,
        directory: Arc<dyn Directory>,
        tr: Arc<dyn Translator>,
    ) -> WizardResult<Self> {
        let queue: VecDeque<String> = configurator.editable_keys().into();
        let Some(head) = queue.front().cloned() else {
            return Err(WizardError::NothingToConfigure);
        };
        debug!(
            guild_id = %configurator.guild_id(),
            table = %configurator.table(),
            queued = queue.len(),
            "Edit session started"
        );
        Ok(Self {
            configurator,
            queue,
            cache,
            state: SessionState::Prompting(head),
            last_error: None,
            directory,
            tr,
        })
    }

    /// Render the first prompt and start waiting for input.
    ///
    /// # Errors
    ///
    /// [`WizardError::SessionClosed`] after a terminal state,
    /// [`WizardError::NotAwaitingInput`] if already begun, and directory
    /// failures while rendering (which cancel the session).
    pub async fn begin(&mut self) -> WizardResult<String> {
        let key = match &self.state {
            SessionState::Prompting(key) => key.clone(),
            state if state.is_terminal() => return Err(WizardError::SessionClosed),
            _ => return Err(WizardError::NotAwaitingInput),
        };
        match self.show(key).await {
            Ok(prompt) => Ok(prompt),
            Err(e) => Err(self.abort(e)),
        }
    }

    /// Apply one operator event.
    ///
    /// Input errors are recovered here and surface as
    /// [`Transition::Retry`]. Any returned `Err` other than
    /// [`WizardError::SessionClosed`] or [`WizardError::NotAwaitingInput`]
    /// leaves the session `Cancelled` with nothing saved.
    ///
    /// # Errors
    ///
    /// See above.
    pub async fn handle(&mut self, event: SessionEvent) -> WizardResult<Transition> {
        if self.state.is_terminal() {
            return Err(WizardError::SessionClosed);
        }
        if event == SessionEvent::TimedOut {
            debug!(table = %self.configurator.table(), "Edit session timed out");
            self.state = SessionState::TimedOut;
            return Ok(Transition::TimedOut);
        }
        let SessionState::AwaitingInput(key) = &self.state else {
            return Err(WizardError::NotAwaitingInput);
        };
        let key = key.clone();

        let result = match event {
            SessionEvent::Skip => {
                debug!(key = %key, "Entry skipped");
                self.advance().await
            },
            SessionEvent::Clear => self.validate(key, None).await,
            SessionEvent::Reply(text) => self.validate(key, Some(text)).await,
            SessionEvent::Finish => self.finish().await,
            SessionEvent::Cancel => {
                debug!(table = %self.configurator.table(), "Edit session cancelled");
                self.state = SessionState::Cancelled;
                Ok(Transition::Cancelled)
            },
            SessionEvent::TimedOut => Ok(Transition::TimedOut),
        };
        result.map_err(|e| self.abort(e))
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Key of the entry being edited, while the session is live.
    #[must_use]
    pub fn current_key(&self) -> Option<&str> {
        if self.state.is_terminal() {
            return None;
        }
        self.queue.front().map(String::as_str)
    }

    /// Keys still to be visited, current entry first.
    #[must_use]
    pub fn pending_keys(&self) -> Vec<&str> {
        self.queue.iter().map(String::as_str).collect()
    }

    /// Localized annotation of the last rejected reply.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// The configurator being edited.
    #[must_use]
    pub fn configurator(&self) -> &GuildConfigurator {
        &self.configurator
    }

    /// Give back the configurator with its staged values.
    #[must_use]
    pub fn into_configurator(self) -> GuildConfigurator {
        self.configurator
    }

    async fn validate(&mut self, key: String, input: Option<String>) -> WizardResult<Transition> {
        self.state = SessionState::Validating {
            key: key.clone(),
            input: input.clone(),
        };
        let guild = self.configurator.guild_id();
        let entry = self
            .configurator
            .entry_mut(&key)
            .ok_or_else(|| WizardError::UnknownEntry(key.clone()))?;
        let outcome = match input {
            Some(text) => {
                apply_input(entry, &text, guild, self.directory.as_ref(), self.tr.as_ref()).await
            },
            None => entry
                .set(None)
                .map_err(|e| ParseFailure::Input(InputError::Constraint(e.to_string()))),
        };

        match outcome {
            Ok(()) => {
                debug!(key = %key, "Entry staged");
                self.cache.remove(self.configurator.table(), &key);
                self.advance().await
            },
            Err(ParseFailure::Input(e)) => {
                debug!(key = %key, error = %e, "Reply rejected");
                let error = e.localized(self.tr.as_ref());
                self.last_error = Some(error.clone());
                self.state = SessionState::Prompting(key.clone());
                let prompt = self.show(key).await?;
                Ok(Transition::Retry { prompt, error })
            },
            Err(ParseFailure::Operational(e)) => Err(WizardError::Directory(e)),
        }
    }

    async fn advance(&mut self) -> WizardResult<Transition> {
        self.state = SessionState::Advancing;
        self.last_error = None;
        self.queue.pop_front();
        match self.queue.front().cloned() {
            Some(next) => {
                self.state = SessionState::Prompting(next.clone());
                self.show(next).await.map(Transition::Prompt)
            },
            None => self.finish().await,
        }
    }

    async fn finish(&mut self) -> WizardResult<Transition> {
        self.configurator.save().await?;
        self.state = SessionState::Finished;
        Ok(Transition::Finished)
    }

    /// Render the prompt for `key` and wait for input on it.
    async fn show(&mut self, key: String) -> WizardResult<String> {
        let display = cached_display(
            &mut self.cache,
            &self.configurator,
            &key,
            self.directory.as_ref(),
            self.tr.as_ref(),
        )
        .await
        .map_err(WizardError::Directory)?;
        let entry = self
            .configurator
            .entry(&key)
            .ok_or_else(|| WizardError::UnknownEntry(key.clone()))?;
        let prompt = render_prompt(
            entry,
            self.configurator.name(),
            &display,
            self.last_error.as_deref(),
            self.tr.as_ref(),
        );
        self.state = SessionState::AwaitingInput(key);
        Ok(prompt)
    }

    fn abort(&mut self, error: WizardError) -> WizardError {
        warn!(
            guild_id = %self.configurator.guild_id(),
            table = %self.configurator.table(),
            error = %error,
            "Edit session aborted"
        );
        self.state = SessionState::Cancelled;
        error
    }
}

impl fmt::Debug for EditSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditSession")
            .field("table", &self.configurator.table())
            .field("state", &self.state)
            .field("queue", &self.queue)
            .finish_non_exhaustive()
    }
}
