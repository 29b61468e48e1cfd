//! Shared harness for wizard integration tests.

use std::sync::Arc;

use guildconf_core::{
    CoreConfigBlueprint, Directory, GuildPrefixes, RegistryCatalog, Translator,
};
use guildconf_storage::ConfigRow;
use guildconf_test::{
    ModerationBlueprint, RecordingStore, ScriptedSurface, english, init_test_tracing,
    moderation_row, test_directory, test_guild, test_operator, MODERATION_TABLE,
};
use guildconf_wizard::{
    ConfigWizard, SelectionMode, WizardOptions, WizardOutcome, WizardRequest, WizardResult,
};

/// A wizard over the core and moderation configurators, backed by a
/// [`RecordingStore`].
#[allow(dead_code)]
pub struct WizardHarness {
    /// Shared with the catalog; inspect it after a run.
    pub store: RecordingStore,
    /// The wizard under test.
    pub wizard: ConfigWizard,
    /// Prefix registry fed by the core configurator.
    pub prefixes: GuildPrefixes,
}

#[allow(dead_code)]
impl WizardHarness {
    /// Menu selection, empty store, seeded static directory.
    pub async fn new() -> Self {
        Self::build(SelectionMode::Menu, Arc::new(test_directory().await))
    }

    /// Same as [`WizardHarness::new`] with the moderation row already stored.
    pub async fn seeded() -> Self {
        let harness = Self::new().await;
        harness.seed(moderation_row()).await;
        harness
    }

    /// Harness with an explicit selection mode and directory.
    pub fn build(selection: SelectionMode, directory: Arc<dyn Directory>) -> Self {
        Self::with_store(RecordingStore::new(), selection, directory)
    }

    /// Harness over an existing store.
    pub fn with_store(
        store: RecordingStore,
        selection: SelectionMode,
        directory: Arc<dyn Directory>,
    ) -> Self {
        init_test_tracing();
        let prefixes = GuildPrefixes::new();
        let catalog = RegistryCatalog::new(Arc::new(store.clone()))
            .with_blueprint(Arc::new(CoreConfigBlueprint::new(prefixes.clone())))
            .with_blueprint(Arc::new(ModerationBlueprint));
        let options = WizardOptions {
            selection,
            ..WizardOptions::default()
        };
        let wizard = ConfigWizard::new(Arc::new(catalog), directory, options);
        Self {
            store,
            wizard,
            prefixes,
        }
    }

    /// Store a moderation row without counting it as a save.
    pub async fn seed(&self, row: ConfigRow) {
        self.store
            .seed(test_guild(), MODERATION_TABLE, row)
            .await
            .unwrap();
    }

    /// Run the wizard in English.
    pub async fn run(&self, surface: &ScriptedSurface) -> WizardResult<WizardOutcome> {
        self.run_in(english(), surface).await
    }

    /// Run the wizard with `tr`.
    pub async fn run_in(
        &self,
        tr: Arc<dyn Translator>,
        surface: &ScriptedSurface,
    ) -> WizardResult<WizardOutcome> {
        let request = WizardRequest {
            guild_id: test_guild(),
            operator_id: test_operator(),
        };
        self.wizard.open(request, tr, surface).await
    }

    /// The last row written for the moderation table.
    pub fn last_moderation_row(&self) -> ConfigRow {
        self.store
            .saved_rows()
            .into_iter()
            .rev()
            .find(|(_, table, _)| table == MODERATION_TABLE)
            .map(|(_, _, row)| row)
            .unwrap()
    }
}

/// Outcome of a saved moderation edit.
#[allow(dead_code)]
pub fn configured_moderation() -> WizardOutcome {
    WizardOutcome::Configured {
        table: MODERATION_TABLE.to_string(),
    }
}
