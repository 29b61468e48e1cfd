//! The interaction surface: where menus are shown and events come from.
//!
//! A surface renders text menus with a set of controls (reaction buttons on
//! chat platforms, typed commands in a terminal), optionally accepts
//! free-text replies, and enforces its own per-menu timeout. The wizard only
//! pulls events from it one at a time, so a surface never has to serialize
//! events for a session itself.

use std::fmt;

use async_trait::async_trait;

/// Opaque handle of an open menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MenuId(pub u64);

impl fmt::Display for MenuId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "menu-{}", self.0)
    }
}

/// A control signal offered on a menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    /// Next summary page.
    Next,
    /// Previous summary page.
    Previous,
    /// Enter edit mode.
    Edit,
    /// Enter reset mode.
    Reset,
    /// Close the menu without doing anything.
    Close,
    /// Leave the current entry unchanged.
    Skip,
    /// Unset the current entry.
    Clear,
    /// Save now, leaving remaining entries as they are.
    Finish,
    /// Abort without saving.
    Cancel,
    /// Pick the listed item with this 1-based index.
    SelectIndex(usize),
    /// Confirm a pending action.
    Confirm,
    /// Decline a pending action.
    Deny,
}

impl Control {
    /// Button label used by chat surfaces.
    #[must_use]
    pub fn emoji(self) -> String {
        match self {
            Self::Next => "▶️".into(),
            Self::Previous => "◀️".into(),
            Self::Edit => "📝".into(),
            Self::Reset | Self::Clear => "🔄".into(),
            Self::Close | Self::Deny => "❌".into(),
            Self::Skip => "⏭️".into(),
            Self::Finish | Self::Confirm => "✅".into(),
            Self::Cancel => "🚫".into(),
            Self::SelectIndex(n) => format!("{n}️⃣"),
        }
    }
}

/// Everything needed to open a menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuSpec {
    /// Initial text.
    pub content: String,
    /// Controls, in display order.
    pub controls: Vec<Control>,
    /// Whether free-text replies are delivered as [`MenuEvent::Reply`].
    pub accepts_replies: bool,
    /// Remove the menu when it is closed.
    pub delete_on_close: bool,
    /// Remove the menu when it times out.
    pub delete_on_timeout: bool,
}

/// An event delivered by a surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuEvent {
    /// The operator pressed a control.
    Signal(Control),
    /// The operator sent text.
    Reply(String),
    /// The menu's timeout elapsed.
    TimedOut,
}

/// Why a menu is being closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    /// The menu did its job.
    Completed,
    /// The operator aborted.
    Cancelled,
}

/// Errors from a surface.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SurfaceError {
    /// The menu does not exist or was already closed.
    #[error("unknown menu: {0}")]
    UnknownMenu(MenuId),

    /// The surface has no more events to deliver.
    #[error("surface closed")]
    Closed,

    /// Delivery to the platform failed.
    #[error("surface transport error: {0}")]
    Transport(String),
}

/// Result type for surface operations.
pub type SurfaceResult<T> = Result<T, SurfaceError>;

/// Event source and sink for the wizard.
#[async_trait]
pub trait InteractionSurface: Send + Sync {
    /// Show a new menu.
    async fn open_menu(&self, spec: MenuSpec) -> SurfaceResult<MenuId>;

    /// Replace a menu's text.
    async fn update_menu(&self, id: MenuId, content: &str) -> SurfaceResult<()>;

    /// Wait for the next event on a menu.
    async fn next_event(&self, id: MenuId) -> SurfaceResult<MenuEvent>;

    /// Close a menu.
    async fn close_menu(&self, id: MenuId, reason: CloseReason) -> SurfaceResult<()>;

    /// Send a standalone message to the operator.
    async fn reply(&self, content: &str) -> SurfaceResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shared_labels() {
        assert_eq!(Control::Reset.emoji(), Control::Clear.emoji());
        assert_eq!(Control::Finish.emoji(), "✅");
        assert_eq!(Control::SelectIndex(3).emoji(), "3️⃣");
    }

    #[test]
    fn menu_id_display() {
        assert_eq!(MenuId(4).to_string(), "menu-4");
    }
}
