//! The wizard entry point: summary, selection, then one edit or reset
//! session.

use std::sync::Arc;

use guildconf_core::{
    ConfigurationCatalog, Directory, GuildConfigurator, GuildId, Translator, UserId,
};
use tracing::{Instrument, debug, info, info_span, warn};

use crate::edit::{EditSession, SessionEvent, Transition};
use crate::error::{InputError, WizardError, WizardResult};
use crate::picker::{PickerPurpose, parse_selection, render_picker};
use crate::reset::{ResetEvent, ResetSession, ResetTransition};
use crate::sessions::ActiveSessions;
use crate::summary::{DisplayCache, Summary, render_summary};
use crate::surface::{CloseReason, Control, InteractionSurface, MenuEvent, MenuId, MenuSpec};

/// How Edit and Reset pick their configurator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
    /// Open a numbered picker.
    #[default]
    Menu,
    /// Use the configurator of the current summary page.
    Page,
}

/// Wizard tuning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardOptions {
    /// Summary page size in characters; `0` disables splitting.
    pub page_char_limit: usize,
    /// How configurators are selected.
    pub selection: SelectionMode,
    /// Ask the surface to delete menus once they are closed or time out.
    pub delete_on_close: bool,
}

impl Default for WizardOptions {
    fn default() -> Self {
        Self {
            page_char_limit: 1000,
            selection: SelectionMode::Menu,
            delete_on_close: true,
        }
    }
}

/// Who is configuring which guild.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WizardRequest {
    /// Guild being configured.
    pub guild_id: GuildId,
    /// Operator driving the wizard.
    pub operator_id: UserId,
}

/// How a wizard ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardOutcome {
    /// The summary was closed without action.
    Closed,
    /// An edit session saved this table.
    Configured {
        /// Storage table of the configurator.
        table: String,
    },
    /// This table was reset.
    Reset {
        /// Storage table of the configurator.
        table: String,
    },
    /// A reset of this table was declined.
    ResetDeclined {
        /// Storage table of the configurator.
        table: String,
    },
    /// The operator aborted an edit session or the picker.
    Cancelled,
    /// A menu timed out.
    TimedOut,
}

enum Pick {
    Index(usize),
    Cancelled,
    TimedOut,
}

/// Drives one interactive configuration per call to [`ConfigWizard::open`].
#[derive(Clone)]
pub struct ConfigWizard {
    catalog: Arc<dyn ConfigurationCatalog>,
    directory: Arc<dyn Directory>,
    options: WizardOptions,
    sessions: ActiveSessions,
}

impl ConfigWizard {
    /// Wizard over `catalog`, resolving references through `directory`.
    pub fn new(
        catalog: Arc<dyn ConfigurationCatalog>,
        directory: Arc<dyn Directory>,
        options: WizardOptions,
    ) -> Self {
        Self {
            catalog,
            directory,
            options,
            sessions: ActiveSessions::new(),
        }
    }

    /// Share the per-guild claim registry with other wizards.
    #[must_use]
    pub fn with_sessions(mut self, sessions: ActiveSessions) -> Self {
        self.sessions = sessions;
        self
    }

    /// The per-guild claim registry.
    #[must_use]
    pub fn sessions(&self) -> &ActiveSessions {
        &self.sessions
    }

    /// Run the wizard for `request` on `surface` until it ends.
    ///
    /// Failures are reported to the operator through `surface` before being
    /// returned.
    ///
    /// # Errors
    ///
    /// [`WizardError::AlreadyConfiguring`] if the guild has an open wizard,
    /// [`WizardError::NothingToConfigure`] when there is nothing editable,
    /// and operational errors from the catalog, store, directory or surface.
    pub async fn open(
        &self,
        request: WizardRequest,
        tr: Arc<dyn Translator>,
        surface: &dyn InteractionSurface,
    ) -> WizardResult<WizardOutcome> {
        let span = info_span!(
            "config_wizard",
            guild_id = %request.guild_id,
            operator_id = %request.operator_id,
            locale = %tr.locale(),
        );

        let Some(_claim) = self.sessions.try_claim(request.guild_id) else {
            let err = WizardError::AlreadyConfiguring(request.guild_id);
            warn!(parent: &span, "Wizard already open for guild");
            surface.reply(&err.localized(tr.as_ref())).await?;
            return Err(err);
        };

        let result = self
            .run(request.guild_id, Arc::clone(&tr), surface)
            .instrument(span.clone())
            .await;
        match result {
            Ok(outcome) => {
                info!(parent: &span, ?outcome, "Wizard ended");
                Ok(outcome)
            },
            Err(e) => {
                warn!(parent: &span, error = %e, "Wizard failed");
                if let Err(reply_err) = surface.reply(&e.localized(tr.as_ref())).await {
                    warn!(parent: &span, error = %reply_err, "Could not report failure");
                }
                Err(e)
            },
        }
    }

    async fn run(
        &self,
        guild: GuildId,
        tr: Arc<dyn Translator>,
        surface: &dyn InteractionSurface,
    ) -> WizardResult<WizardOutcome> {
        let configurators = self.catalog.configurators(guild, tr.as_ref()).await?;
        if configurators.is_empty() {
            return Err(WizardError::NothingToConfigure);
        }

        let mut cache = DisplayCache::new();
        let summary = render_summary(
            &configurators,
            self.directory.as_ref(),
            tr.as_ref(),
            self.options.page_char_limit,
            &mut cache,
        )
        .await
        .map_err(WizardError::Directory)?;
        let first = summary.page(0).map(|p| p.content.clone()).unwrap_or_default();
        let menu = surface
            .open_menu(self.menu_spec(
                first,
                vec![
                    Control::Previous,
                    Control::Next,
                    Control::Edit,
                    Control::Reset,
                    Control::Close,
                ],
                false,
            ))
            .await?;

        let mut page = 0usize;
        let (purpose, page) = loop {
            match surface.next_event(menu).await? {
                MenuEvent::Signal(Control::Next) => {
                    let next = page.saturating_add(1);
                    if let Some(p) = summary.page(next) {
                        page = next;
                        surface.update_menu(menu, &p.content).await?;
                    }
                },
                MenuEvent::Signal(Control::Previous) => {
                    if let Some(prev) = page.checked_sub(1)
                        && let Some(p) = summary.page(prev)
                    {
                        page = prev;
                        surface.update_menu(menu, &p.content).await?;
                    }
                },
                MenuEvent::Signal(Control::Edit) => break (PickerPurpose::Edit, page),
                MenuEvent::Signal(Control::Reset) => break (PickerPurpose::Reset, page),
                MenuEvent::Signal(Control::Close) => {
                    surface.close_menu(menu, CloseReason::Completed).await?;
                    return Ok(WizardOutcome::Closed);
                },
                MenuEvent::Signal(other) => debug!(?other, "Ignoring control on summary"),
                MenuEvent::Reply(_) => {},
                MenuEvent::TimedOut => return Ok(WizardOutcome::TimedOut),
            }
        };
        surface.close_menu(menu, CloseReason::Completed).await?;
        debug!(?purpose, page, "Summary left");

        let index = match self.options.selection {
            SelectionMode::Page => page_owner(&summary, page)?,
            SelectionMode::Menu => {
                match self.pick(&configurators, purpose, tr.as_ref(), surface).await? {
                    Pick::Index(i) => i,
                    Pick::Cancelled => return Ok(WizardOutcome::Cancelled),
                    Pick::TimedOut => return Ok(WizardOutcome::TimedOut),
                }
            },
        };
        let configurator = configurators
            .into_iter()
            .nth(index)
            .ok_or(WizardError::NothingToConfigure)?;

        match purpose {
            PickerPurpose::Edit => self.edit(configurator, cache, tr, surface).await,
            PickerPurpose::Reset => self.reset(configurator, tr.as_ref(), surface).await,
        }
    }

    async fn pick(
        &self,
        configurators: &[GuildConfigurator],
        purpose: PickerPurpose,
        tr: &dyn Translator,
        surface: &dyn InteractionSurface,
    ) -> WizardResult<Pick> {
        let count = configurators.len();
        let mut controls: Vec<Control> = (1..=count).map(Control::SelectIndex).collect();
        controls.push(Control::Close);
        let menu = surface
            .open_menu(self.menu_spec(
                render_picker(configurators, purpose, tr, None),
                controls,
                true,
            ))
            .await?;

        loop {
            let choice = match surface.next_event(menu).await? {
                MenuEvent::Signal(Control::SelectIndex(n)) => parse_selection(&n.to_string(), count),
                MenuEvent::Reply(text) => parse_selection(&text, count),
                MenuEvent::Signal(Control::Close | Control::Cancel) => {
                    surface.close_menu(menu, CloseReason::Cancelled).await?;
                    return Ok(Pick::Cancelled);
                },
                MenuEvent::Signal(other) => {
                    debug!(?other, "Ignoring control on picker");
                    continue;
                },
                MenuEvent::TimedOut => return Ok(Pick::TimedOut),
            };
            match choice {
                Ok(index) => {
                    surface.close_menu(menu, CloseReason::Completed).await?;
                    return Ok(Pick::Index(index));
                },
                Err(e) => {
                    debug!(error = %e, "Invalid selection");
                    let error = e.localized(tr);
                    let content = render_picker(configurators, purpose, tr, Some(&error));
                    surface.update_menu(menu, &content).await?;
                },
            }
        }
    }

    async fn edit(
        &self,
        configurator: GuildConfigurator,
        cache: DisplayCache,
        tr: Arc<dyn Translator>,
        surface: &dyn InteractionSurface,
    ) -> WizardResult<WizardOutcome> {
        let table = configurator.table().to_string();
        let mut session =
            EditSession::start(configurator, cache, Arc::clone(&self.directory), Arc::clone(&tr))?;
        let prompt = session.begin().await?;
        let menu = surface
            .open_menu(self.menu_spec(
                prompt,
                vec![Control::Skip, Control::Clear, Control::Finish, Control::Cancel],
                true,
            ))
            .await?;

        loop {
            let event = match surface.next_event(menu).await? {
                MenuEvent::Signal(Control::Skip) => SessionEvent::Skip,
                MenuEvent::Signal(Control::Clear) => SessionEvent::Clear,
                MenuEvent::Signal(Control::Finish) => SessionEvent::Finish,
                MenuEvent::Signal(Control::Cancel | Control::Close) => SessionEvent::Cancel,
                MenuEvent::Signal(other) => {
                    debug!(?other, "Ignoring control on edit prompt");
                    continue;
                },
                MenuEvent::Reply(text) => SessionEvent::Reply(text),
                MenuEvent::TimedOut => SessionEvent::TimedOut,
            };
            match session.handle(event).await {
                Ok(Transition::Prompt(prompt) | Transition::Retry { prompt, .. }) => {
                    surface.update_menu(menu, &prompt).await?;
                },
                Ok(Transition::Finished) => {
                    surface.close_menu(menu, CloseReason::Completed).await?;
                    let done = tr.translate("configuration_done", &[]);
                    surface.reply(&format!("✅ {done}")).await?;
                    return Ok(WizardOutcome::Configured { table });
                },
                Ok(Transition::Cancelled) => {
                    surface.close_menu(menu, CloseReason::Cancelled).await?;
                    surface
                        .reply(&tr.translate("error_configuration_cancelled", &[]))
                        .await?;
                    return Ok(WizardOutcome::Cancelled);
                },
                Ok(Transition::TimedOut) => return Ok(WizardOutcome::TimedOut),
                Err(e) => {
                    Self::close_quietly(surface, menu).await;
                    return Err(e);
                },
            }
        }
    }

    async fn reset(
        &self,
        configurator: GuildConfigurator,
        tr: &dyn Translator,
        surface: &dyn InteractionSurface,
    ) -> WizardResult<WizardOutcome> {
        let table = configurator.table().to_string();
        let mut session = ResetSession::new(configurator);
        let menu = surface
            .open_menu(self.menu_spec(
                session.prompt(tr),
                vec![Control::Confirm, Control::Deny],
                true,
            ))
            .await?;

        loop {
            let event = match surface.next_event(menu).await? {
                MenuEvent::Signal(Control::Confirm) => ResetEvent::Confirm,
                MenuEvent::Signal(Control::Deny) => ResetEvent::Deny,
                MenuEvent::Signal(Control::Cancel | Control::Close) => ResetEvent::Cancel,
                MenuEvent::Signal(other) => {
                    debug!(?other, "Ignoring control on reset prompt");
                    continue;
                },
                MenuEvent::Reply(text) if tr.matches_token(&text, "yes") => ResetEvent::Confirm,
                MenuEvent::Reply(text) if tr.matches_token(&text, "no") => ResetEvent::Deny,
                MenuEvent::Reply(text) => {
                    debug!(reply = %text, "Reset answer not recognized");
                    let error = InputError::ExpectedBoolean.localized(tr);
                    surface.update_menu(menu, &session.retry_prompt(tr, &error)).await?;
                    continue;
                },
                MenuEvent::TimedOut => ResetEvent::TimedOut,
            };
            match session.handle(event).await {
                Ok(ResetTransition::Reset) => {
                    surface.close_menu(menu, CloseReason::Completed).await?;
                    let done = tr.translate("reset_success", &[]);
                    surface.reply(&format!("✅ {done}")).await?;
                    return Ok(WizardOutcome::Reset { table });
                },
                Ok(ResetTransition::Declined) => {
                    surface.close_menu(menu, CloseReason::Cancelled).await?;
                    return Ok(WizardOutcome::ResetDeclined { table });
                },
                Ok(ResetTransition::TimedOut) => return Ok(WizardOutcome::TimedOut),
                Err(e) => {
                    Self::close_quietly(surface, menu).await;
                    return Err(e);
                },
            }
        }
    }

    fn menu_spec(&self, content: String, controls: Vec<Control>, accepts_replies: bool) -> MenuSpec {
        MenuSpec {
            content,
            controls,
            accepts_replies,
            delete_on_close: self.options.delete_on_close,
            delete_on_timeout: self.options.delete_on_close,
        }
    }

    async fn close_quietly(surface: &dyn InteractionSurface, menu: MenuId) {
        if let Err(e) = surface.close_menu(menu, CloseReason::Cancelled).await {
            debug!(error = %e, %menu, "Menu already gone");
        }
    }
}

/// Index of the configurator shown on summary page `page`.
fn page_owner(summary: &Summary, page: usize) -> WizardResult<usize> {
    summary
        .configurator_for_page(page)
        .ok_or(WizardError::NoSuchPage(page))
}

impl std::fmt::Debug for ConfigWizard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigWizard")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
