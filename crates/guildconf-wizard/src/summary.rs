//! The paginated "current values" view.

use std::collections::HashMap;

use guildconf_core::{Directory, DirectoryError, GuildConfigurator, Translator};

use crate::display::display_value;
use crate::format::chunk_text;
use crate::markdown::{bold, quote, underline};

/// Display strings keyed by `(table, entry key)`.
///
/// Filled by the summary so that every directory lookup happens at most once
/// per wizard invocation, then handed to the edit session for its prompts.
#[derive(Debug, Clone, Default)]
pub struct DisplayCache {
    values: HashMap<(String, String), String>,
}

impl DisplayCache {
    /// Empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached display for `key` of `table`.
    #[must_use]
    pub fn get(&self, table: &str, key: &str) -> Option<&str> {
        self.values
            .get(&(table.to_string(), key.to_string()))
            .map(String::as_str)
    }

    /// Remember `display` for `key` of `table`.
    pub fn insert(&mut self, table: &str, key: &str, display: String) {
        self.values
            .insert((table.to_string(), key.to_string()), display);
    }

    /// Forget the display of `key` of `table`, e.g. after it was edited.
    pub fn remove(&mut self, table: &str, key: &str) -> Option<String> {
        self.values.remove(&(table.to_string(), key.to_string()))
    }

    /// Number of cached displays.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Cached display of `key`, computing and caching it on a miss.
pub(crate) async fn cached_display(
    cache: &mut DisplayCache,
    configurator: &GuildConfigurator,
    key: &str,
    directory: &dyn Directory,
    tr: &dyn Translator,
) -> Result<String, DirectoryError> {
    if let Some(hit) = cache.get(configurator.table(), key) {
        return Ok(hit.to_string());
    }
    let value = configurator.entry(key).and_then(|e| e.get());
    let text = display_value(value, configurator.guild_id(), directory, tr).await?;
    cache.insert(configurator.table(), key, text.clone());
    Ok(text)
}

/// One rendered page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryPage {
    /// Index of the configurator this page belongs to.
    pub configurator: usize,
    /// Page text, footer included.
    pub content: String,
}

/// Every summary page, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pages: Vec<SummaryPage>,
}

impl Summary {
    /// All pages.
    #[must_use]
    pub fn pages(&self) -> &[SummaryPage] {
        &self.pages
    }

    /// Number of pages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Whether there are no pages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Page `index`, if it exists.
    #[must_use]
    pub fn page(&self, index: usize) -> Option<&SummaryPage> {
        self.pages.get(index)
    }

    /// Configurator owning page `index`.
    #[must_use]
    pub fn configurator_for_page(&self, index: usize) -> Option<usize> {
        self.page(index).map(|p| p.configurator)
    }
}

/// Render one page per configurator, split at `page_char_limit` characters
/// (`0` disables splitting).
///
/// Every page ends with `Page i/n`; the last page also carries the controls
/// legend.
///
/// # Errors
///
/// Directory transport failures while resolving references.
pub async fn render_summary(
    configurators: &[GuildConfigurator],
    directory: &dyn Directory,
    tr: &dyn Translator,
    page_char_limit: usize,
    cache: &mut DisplayCache,
) -> Result<Summary, DirectoryError> {
    let mut bodies: Vec<(usize, String)> = Vec::new();
    for (index, configurator) in configurators.iter().enumerate() {
        let mut body = underline(&bold(configurator.name()));
        body.push('\n');
        if !configurator.description().is_empty() {
            body.push_str(configurator.description());
            body.push('\n');
        }
        body.push('\n');
        for entry in configurator.entries() {
            let shown = cached_display(cache, configurator, entry.key(), directory, tr).await?;
            let label = bold(&format!("{}:", entry.display_name()));
            body.push_str(&quote(&format!("{label} {shown}")));
            body.push('\n');
        }
        for chunk in chunk_text(body.trim_end(), page_char_limit) {
            bodies.push((index, chunk));
        }
    }

    let total = bodies.len().to_string();
    let last = bodies.len().saturating_sub(1);
    let pages = bodies
        .into_iter()
        .enumerate()
        .map(|(i, (configurator, mut content))| {
            let number = i.saturating_add(1).to_string();
            content.push_str("\n\n");
            content.push_str(&tr.translate("page_indicator", &[&number, &total]));
            if i == last {
                content.push('\n');
                content.push_str(&tr.translate("react", &[]));
            }
            SummaryPage {
                configurator,
                content,
            }
        })
        .collect();
    Ok(Summary { pages })
}
