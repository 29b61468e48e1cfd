//! Enumerating the configurators available to a guild.

use std::sync::Arc;

use async_trait::async_trait;
use guildconf_storage::ConfigStore;

use crate::configurator::{ConfiguratorTemplate, GuildConfigurator};
use crate::error::CoreResult;
use crate::i18n::Translator;
use crate::ids::GuildId;

/// Describes one feature area's configurator.
///
/// `build` receives the translator so names, descriptions and validator
/// messages come out in the operator's language.
pub trait ConfiguratorBlueprint: Send + Sync {
    /// Storage table, unique across blueprints.
    fn table(&self) -> &str;

    /// Produce the entry layout.
    fn build(&self, tr: &dyn Translator) -> ConfiguratorTemplate;
}

/// Source of hydrated configurators for a guild.
#[async_trait]
pub trait ConfigurationCatalog: Send + Sync {
    /// Every configurator for `guild`, in display order, with stored values
    /// loaded.
    async fn configurators(
        &self,
        guild: GuildId,
        tr: &dyn Translator,
    ) -> CoreResult<Vec<GuildConfigurator>>;
}

/// Catalog over a fixed list of blueprints sharing one store.
#[derive(Clone)]
pub struct RegistryCatalog {
    blueprints: Vec<Arc<dyn ConfiguratorBlueprint>>,
    store: Arc<dyn ConfigStore>,
}

impl RegistryCatalog {
    /// Create an empty catalog over `store`.
    #[must_use]
    pub fn new(store: Arc<dyn ConfigStore>) -> Self {
        Self {
            blueprints: Vec::new(),
            store,
        }
    }

    /// Register a blueprint. Registration order is display order.
    #[must_use]
    pub fn with_blueprint(mut self, blueprint: Arc<dyn ConfiguratorBlueprint>) -> Self {
        self.blueprints.push(blueprint);
        self
    }

    /// Number of registered blueprints.
    #[must_use]
    pub fn len(&self) -> usize {
        self.blueprints.len()
    }

    /// Whether no blueprints are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blueprints.is_empty()
    }
}

#[async_trait]
impl ConfigurationCatalog for RegistryCatalog {
    async fn configurators(
        &self,
        guild: GuildId,
        tr: &dyn Translator,
    ) -> CoreResult<Vec<GuildConfigurator>> {
        let mut out = Vec::with_capacity(self.blueprints.len());
        for blueprint in &self.blueprints {
            let template = blueprint.build(tr);
            out.push(template.hydrate(guild, Arc::clone(&self.store)).await?);
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::ConfigEntry;
    use crate::i18n::MessageBundle;
    use crate::value::EntryKind;
    use guildconf_storage::MemoryConfigStore;

    struct Named(&'static str);

    impl ConfiguratorBlueprint for Named {
        fn table(&self) -> &str {
            self.0
        }

        fn build(&self, _tr: &dyn Translator) -> ConfiguratorTemplate {
            ConfiguratorTemplate::new(self.0, self.0, "")
                .entry(ConfigEntry::new("enabled", EntryKind::Boolean))
        }
    }

    #[tokio::test]
    async fn configurators_follow_registration_order() {
        let catalog = RegistryCatalog::new(Arc::new(MemoryConfigStore::new()))
            .with_blueprint(Arc::new(Named("music")))
            .with_blueprint(Arc::new(Named("moderation")));
        assert_eq!(catalog.len(), 2);

        let tr = MessageBundle::english().unwrap();
        let cfgs = catalog.configurators(GuildId(5), &tr).await.unwrap();
        let tables: Vec<&str> = cfgs.iter().map(GuildConfigurator::table).collect();
        assert_eq!(tables, vec!["music", "moderation"]);
        assert!(cfgs.iter().all(|c| c.guild_id() == GuildId(5)));
    }
}
