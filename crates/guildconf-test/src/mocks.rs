//! Mock collaborators for wizard tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use guildconf_core::{
    Channel, ChannelId, Directory, DirectoryError, DirectoryResult, GuildId, Member, Role, RoleId,
    StaticDirectory, UserId,
};
use guildconf_storage::{
    ConfigRow, ConfigStore, MemoryConfigStore, StorageError, StorageResult,
};
use guildconf_wizard::{
    CloseReason, Control, InteractionSurface, MenuEvent, MenuId, MenuSpec, SurfaceError,
    SurfaceResult,
};

// ---------------------------------------------------------------------------
// Surface
// ---------------------------------------------------------------------------

/// Surface that replays queued events and records everything shown.
///
/// Events are consumed across menus in queue order. Once the queue is empty
/// every `next_event` reports [`MenuEvent::TimedOut`].
#[derive(Debug, Clone, Default)]
pub struct ScriptedSurface {
    events: Arc<Mutex<VecDeque<MenuEvent>>>,
    opened: Arc<Mutex<Vec<(MenuId, MenuSpec)>>>,
    updates: Arc<Mutex<Vec<(MenuId, String)>>>,
    closed: Arc<Mutex<Vec<(MenuId, CloseReason)>>>,
    replies: Arc<Mutex<Vec<String>>>,
    next_id: Arc<AtomicU64>,
    broken: Arc<AtomicBool>,
}

impl ScriptedSurface {
    /// Surface with no scripted events.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an event.
    #[must_use]
    pub fn with_event(self, event: MenuEvent) -> Self {
        self.push(event);
        self
    }

    /// Queue a control press.
    #[must_use]
    pub fn with_signal(self, control: Control) -> Self {
        self.with_event(MenuEvent::Signal(control))
    }

    /// Queue a free-text reply.
    #[must_use]
    pub fn with_reply(self, text: impl Into<String>) -> Self {
        self.with_event(MenuEvent::Reply(text.into()))
    }

    /// Make every menu operation fail with a transport error.
    #[must_use]
    pub fn broken(self) -> Self {
        self.broken.store(true, Ordering::SeqCst);
        self
    }

    /// Queue an event on a shared surface.
    pub fn push(&self, event: MenuEvent) {
        if let Ok(mut guard) = self.events.lock() {
            guard.push_back(event);
        }
    }

    /// Events not consumed yet.
    #[must_use]
    pub fn pending_events(&self) -> usize {
        self.events.lock().map(|g| g.len()).unwrap_or_default()
    }

    /// Every opened menu, in order.
    #[must_use]
    pub fn opened(&self) -> Vec<(MenuId, MenuSpec)> {
        self.opened.lock().map(|g| g.clone()).unwrap_or_default()
    }

    /// Every content update, in order.
    #[must_use]
    pub fn updates(&self) -> Vec<(MenuId, String)> {
        self.updates.lock().map(|g| g.clone()).unwrap_or_default()
    }

    /// Every closed menu, in order.
    #[must_use]
    pub fn closed(&self) -> Vec<(MenuId, CloseReason)> {
        self.closed.lock().map(|g| g.clone()).unwrap_or_default()
    }

    /// Every standalone reply, in order.
    #[must_use]
    pub fn replies(&self) -> Vec<String> {
        self.replies.lock().map(|g| g.clone()).unwrap_or_default()
    }

    /// Latest text of menu `id`: its last update, or its initial content.
    #[must_use]
    pub fn content_of(&self, id: MenuId) -> Option<String> {
        let updated = self
            .updates()
            .into_iter()
            .rev()
            .find(|(menu, _)| *menu == id)
            .map(|(_, text)| text);
        updated.or_else(|| {
            self.opened()
                .into_iter()
                .find(|(menu, _)| *menu == id)
                .map(|(_, spec)| spec.content)
        })
    }

    fn check(&self) -> SurfaceResult<()> {
        if self.broken.load(Ordering::SeqCst) {
            return Err(SurfaceError::Transport("scripted surface is broken".into()));
        }
        Ok(())
    }

    fn is_open(&self, id: MenuId) -> bool {
        let opened = self.opened().iter().any(|(menu, _)| *menu == id);
        let closed = self.closed().iter().any(|(menu, _)| *menu == id);
        opened && !closed
    }
}

#[async_trait]
impl InteractionSurface for ScriptedSurface {
    async fn open_menu(&self, spec: MenuSpec) -> SurfaceResult<MenuId> {
        self.check()?;
        let id = MenuId(self.next_id.fetch_add(1, Ordering::SeqCst));
        if let Ok(mut guard) = self.opened.lock() {
            guard.push((id, spec));
        }
        Ok(id)
    }

    async fn update_menu(&self, id: MenuId, content: &str) -> SurfaceResult<()> {
        self.check()?;
        if !self.is_open(id) {
            return Err(SurfaceError::UnknownMenu(id));
        }
        if let Ok(mut guard) = self.updates.lock() {
            guard.push((id, content.to_string()));
        }
        Ok(())
    }

    async fn next_event(&self, id: MenuId) -> SurfaceResult<MenuEvent> {
        self.check()?;
        if !self.is_open(id) {
            return Err(SurfaceError::UnknownMenu(id));
        }
        let event = self.events.lock().ok().and_then(|mut g| g.pop_front());
        Ok(event.unwrap_or(MenuEvent::TimedOut))
    }

    async fn close_menu(&self, id: MenuId, reason: CloseReason) -> SurfaceResult<()> {
        self.check()?;
        if !self.is_open(id) {
            return Err(SurfaceError::UnknownMenu(id));
        }
        if let Ok(mut guard) = self.closed.lock() {
            guard.push((id, reason));
        }
        Ok(())
    }

    async fn reply(&self, content: &str) -> SurfaceResult<()> {
        if let Ok(mut guard) = self.replies.lock() {
            guard.push(content.to_string());
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

/// In-memory store that counts writes and can be told to fail.
#[derive(Debug, Clone, Default)]
pub struct RecordingStore {
    inner: Arc<MemoryConfigStore>,
    saves: Arc<Mutex<Vec<(u64, String, ConfigRow)>>>,
    resets: Arc<AtomicUsize>,
    failing: Arc<AtomicBool>,
}

impl RecordingStore {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store whose writes fail with a connection error.
    #[must_use]
    pub fn failing() -> Self {
        let store = Self::new();
        store.set_failing(true);
        store
    }

    /// Toggle write failures.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Write a row without counting it.
    ///
    /// # Errors
    ///
    /// Propagates the inner store's error.
    pub async fn seed(&self, guild_id: GuildId, table: &str, row: ConfigRow) -> StorageResult<()> {
        self.inner.save(guild_id.get(), table, row).await
    }

    /// Number of successful saves.
    #[must_use]
    pub fn save_count(&self) -> usize {
        self.saves.lock().map(|g| g.len()).unwrap_or_default()
    }

    /// Rows accepted by `save`, in order.
    #[must_use]
    pub fn saved_rows(&self) -> Vec<(u64, String, ConfigRow)> {
        self.saves.lock().map(|g| g.clone()).unwrap_or_default()
    }

    /// Number of successful resets.
    #[must_use]
    pub fn reset_count(&self) -> usize {
        self.resets.load(Ordering::SeqCst)
    }

    fn check(&self) -> StorageResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StorageError::Connection("recording store set to fail".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl ConfigStore for RecordingStore {
    async fn load(&self, guild_id: u64, table: &str) -> StorageResult<Option<ConfigRow>> {
        self.inner.load(guild_id, table).await
    }

    async fn save(&self, guild_id: u64, table: &str, row: ConfigRow) -> StorageResult<()> {
        self.check()?;
        self.inner.save(guild_id, table, row.clone()).await?;
        if let Ok(mut guard) = self.saves.lock() {
            guard.push((guild_id, table.to_string(), row));
        }
        Ok(())
    }

    async fn reset(&self, guild_id: u64, table: &str) -> StorageResult<bool> {
        self.check()?;
        let existed = self.inner.reset(guild_id, table).await?;
        self.resets.fetch_add(1, Ordering::SeqCst);
        Ok(existed)
    }
}

// ---------------------------------------------------------------------------
// Directories
// ---------------------------------------------------------------------------

/// Directory that is always unreachable.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingDirectory;

impl FailingDirectory {
    fn down<T>() -> DirectoryResult<T> {
        Err(DirectoryError::Transport("connection refused".into()))
    }
}

#[async_trait]
impl Directory for FailingDirectory {
    async fn resolve_channel(&self, _guild: GuildId, _text: &str) -> DirectoryResult<Channel> {
        Self::down()
    }

    async fn resolve_role(&self, _guild: GuildId, _text: &str) -> DirectoryResult<Role> {
        Self::down()
    }

    async fn resolve_member(&self, _guild: GuildId, _text: &str) -> DirectoryResult<Member> {
        Self::down()
    }

    async fn channel(&self, _guild: GuildId, _id: ChannelId) -> DirectoryResult<Channel> {
        Self::down()
    }

    async fn role(&self, _guild: GuildId, _id: RoleId) -> DirectoryResult<Role> {
        Self::down()
    }

    async fn member(&self, _guild: GuildId, _id: UserId) -> DirectoryResult<Member> {
        Self::down()
    }
}

/// [`StaticDirectory`] wrapper counting id lookups.
#[derive(Debug, Clone)]
pub struct CountingDirectory {
    inner: Arc<StaticDirectory>,
    lookups: Arc<AtomicUsize>,
}

impl CountingDirectory {
    /// Wrap `inner`.
    #[must_use]
    pub fn new(inner: StaticDirectory) -> Self {
        Self {
            inner: Arc::new(inner),
            lookups: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of `channel`/`role`/`member` calls so far.
    #[must_use]
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    fn count(&self) {
        self.lookups.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl Directory for CountingDirectory {
    async fn resolve_channel(&self, guild: GuildId, text: &str) -> DirectoryResult<Channel> {
        self.inner.resolve_channel(guild, text).await
    }

    async fn resolve_role(&self, guild: GuildId, text: &str) -> DirectoryResult<Role> {
        self.inner.resolve_role(guild, text).await
    }

    async fn resolve_member(&self, guild: GuildId, text: &str) -> DirectoryResult<Member> {
        self.inner.resolve_member(guild, text).await
    }

    async fn channel(&self, guild: GuildId, id: ChannelId) -> DirectoryResult<Channel> {
        self.count();
        self.inner.channel(guild, id).await
    }

    async fn role(&self, guild: GuildId, id: RoleId) -> DirectoryResult<Role> {
        self.count();
        self.inner.role(guild, id).await
    }

    async fn member(&self, guild: GuildId, id: UserId) -> DirectoryResult<Member> {
        self.count();
        self.inner.member(guild, id).await
    }
}
