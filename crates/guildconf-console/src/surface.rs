//! Line-oriented terminal surface.
//!
//! Menus are printed as text blocks followed by the commands they accept.
//! Lines starting with `!` are controls (`!next`, `!edit`, `!2`, ...);
//! anything else is a free-text reply.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use guildconf_wizard::{
    CloseReason, Control, InteractionSurface, MenuEvent, MenuId, MenuSpec, SurfaceError,
    SurfaceResult,
};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, Lines};
use tokio::sync::Mutex;
use tracing::debug;

/// Console command for `control`.
pub(crate) fn command_for(control: Control) -> String {
    match control {
        Control::Next => "!next".into(),
        Control::Previous => "!prev".into(),
        Control::Edit => "!edit".into(),
        Control::Reset => "!reset".into(),
        Control::Close => "!close".into(),
        Control::Skip => "!skip".into(),
        Control::Clear => "!clear".into(),
        Control::Finish => "!finish".into(),
        Control::Cancel => "!cancel".into(),
        Control::SelectIndex(n) => format!("!{n}"),
        Control::Confirm => "!yes".into(),
        Control::Deny => "!no".into(),
    }
}

/// Map an input line to an event. Blank lines map to nothing.
pub(crate) fn parse_line(line: &str) -> Option<MenuEvent> {
    if line.trim().is_empty() {
        return None;
    }
    let Some(command) = line.trim().strip_prefix('!') else {
        return Some(MenuEvent::Reply(line.to_string()));
    };
    let control = match command.to_ascii_lowercase().as_str() {
        "next" => Control::Next,
        "prev" => Control::Previous,
        "edit" => Control::Edit,
        "reset" => Control::Reset,
        "close" => Control::Close,
        "skip" => Control::Skip,
        "clear" => Control::Clear,
        "finish" => Control::Finish,
        "cancel" => Control::Cancel,
        "yes" => Control::Confirm,
        "no" => Control::Deny,
        other => match other.parse::<usize>() {
            Ok(n) if n > 0 => Control::SelectIndex(n),
            // `!` and `!?` are plausible values, e.g. for a command prefix.
            _ => return Some(MenuEvent::Reply(line.to_string())),
        },
    };
    Some(MenuEvent::Signal(control))
}

#[derive(Debug, Clone)]
struct OpenMenu {
    controls: Vec<Control>,
    accepts_replies: bool,
}

/// Surface reading commands from `R` and printing menus to `W`.
///
/// Each read waits at most `timeout`; an elapsed wait is a
/// [`MenuEvent::TimedOut`]. End of input is [`SurfaceError::Closed`].
pub(crate) struct ConsoleSurface<R, W> {
    lines: Mutex<Lines<R>>,
    out: Mutex<W>,
    timeout: Duration,
    menus: Mutex<HashMap<MenuId, OpenMenu>>,
    next_id: AtomicU64,
}

impl<R, W> ConsoleSurface<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    pub(crate) fn new(input: R, output: W, timeout: Duration) -> Self {
        Self {
            lines: Mutex::new(input.lines()),
            out: Mutex::new(output),
            timeout,
            menus: Mutex::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    async fn write(&self, text: &str) -> SurfaceResult<()> {
        let mut out = self.out.lock().await;
        out.write_all(text.as_bytes())
            .await
            .map_err(|e| SurfaceError::Transport(e.to_string()))?;
        out.write_all(b"\n")
            .await
            .map_err(|e| SurfaceError::Transport(e.to_string()))?;
        out.flush()
            .await
            .map_err(|e| SurfaceError::Transport(e.to_string()))
    }

    async fn menu(&self, id: MenuId) -> SurfaceResult<OpenMenu> {
        self.menus
            .lock()
            .await
            .get(&id)
            .cloned()
            .ok_or(SurfaceError::UnknownMenu(id))
    }

    async fn render(&self, id: MenuId, content: &str, menu: &OpenMenu) -> SurfaceResult<()> {
        let legend: Vec<String> = menu.controls.iter().copied().map(command_for).collect();
        let mut block = format!("──── {id} ────\n{content}\n");
        if !legend.is_empty() {
            block.push_str(&format!("[{}]", legend.join(" ")));
        }
        if menu.accepts_replies {
            block.push_str(" or type a reply");
        }
        self.write(&block).await
    }
}

#[async_trait]
impl<R, W> InteractionSurface for ConsoleSurface<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    async fn open_menu(&self, spec: MenuSpec) -> SurfaceResult<MenuId> {
        let id = MenuId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let menu = OpenMenu {
            controls: spec.controls,
            accepts_replies: spec.accepts_replies,
        };
        self.render(id, &spec.content, &menu).await?;
        self.menus.lock().await.insert(id, menu);
        Ok(id)
    }

    async fn update_menu(&self, id: MenuId, content: &str) -> SurfaceResult<()> {
        let menu = self.menu(id).await?;
        self.render(id, content, &menu).await
    }

    async fn next_event(&self, id: MenuId) -> SurfaceResult<MenuEvent> {
        let menu = self.menu(id).await?;
        let mut lines = self.lines.lock().await;
        loop {
            let line = match tokio::time::timeout(self.timeout, lines.next_line()).await {
                Err(_) => {
                    self.write("(timed out)").await?;
                    return Ok(MenuEvent::TimedOut);
                },
                Ok(Err(e)) => return Err(SurfaceError::Transport(e.to_string())),
                Ok(Ok(None)) => return Err(SurfaceError::Closed),
                Ok(Ok(Some(line))) => line,
            };
            match parse_line(&line) {
                Some(MenuEvent::Reply(_)) if !menu.accepts_replies => {
                    debug!(%id, "Reply ignored by menu");
                },
                Some(MenuEvent::Signal(control)) if !menu.controls.contains(&control) => {
                    debug!(%id, ?control, "Control not offered by menu");
                },
                Some(event) => return Ok(event),
                None => {},
            }
        }
    }

    async fn close_menu(&self, id: MenuId, reason: CloseReason) -> SurfaceResult<()> {
        self.menus
            .lock()
            .await
            .remove(&id)
            .ok_or(SurfaceError::UnknownMenu(id))?;
        debug!(%id, ?reason, "Menu closed");
        Ok(())
    }

    async fn reply(&self, content: &str) -> SurfaceResult<()> {
        self.write(content).await
    }
}
