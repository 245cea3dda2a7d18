use crate::domain::ports::{Navigator, NavigatorRef};
use crate::domain::target::RedirectTarget;
use crate::error::{HandoffError, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::process::Command;

/// Keeps every target it is asked to navigate to, optionally passing each one
/// on to another navigator.
///
/// Clones share the same log, so a test can keep one clone and hand another to
/// the flow under test.
#[derive(Default, Clone)]
pub struct RecordingNavigator {
    targets: Arc<Mutex<Vec<RedirectTarget>>>,
    inner: Option<NavigatorRef>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records targets, then navigates with `inner`.
    pub fn forwarding(inner: NavigatorRef) -> Self {
        Self {
            targets: Arc::default(),
            inner: Some(inner),
        }
    }

    /// Targets navigated to so far, oldest first.
    pub fn targets(&self) -> Vec<RedirectTarget> {
        self.targets
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn urls(&self) -> Vec<String> {
        self.targets().into_iter().map(String::from).collect()
    }
}

#[async_trait]
impl Navigator for RecordingNavigator {
    async fn navigate(&self, target: &RedirectTarget) -> Result<()> {
        self.targets
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(target.clone());
        match &self.inner {
            Some(inner) => inner.navigate(target).await,
            None => Ok(()),
        }
    }
}

/// Prints `redirect: <url>` lines instead of navigating.
pub struct WriterNavigator<W> {
    out: tokio::sync::Mutex<W>,
}

impl<W: AsyncWrite + Unpin + Send> WriterNavigator<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: tokio::sync::Mutex::new(out),
        }
    }
}

impl WriterNavigator<tokio::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(tokio::io::stdout())
    }
}

#[async_trait]
impl<W: AsyncWrite + Unpin + Send> Navigator for WriterNavigator<W> {
    async fn navigate(&self, target: &RedirectTarget) -> Result<()> {
        let mut out = self.out.lock().await;
        out.write_all(format!("redirect: {target}\n").as_bytes())
            .await?;
        out.flush().await?;
        Ok(())
    }
}

/// Hands the deep link to the operating system's URL opener.
///
/// Only the spawn is checked; whether an app claims the scheme is unknowable.
#[derive(Default, Clone, Copy)]
pub struct SystemNavigator;

impl SystemNavigator {
    fn command(url: &str) -> Command {
        let mut command = if cfg!(target_os = "macos") {
            Command::new("open")
        } else if cfg!(target_os = "windows") {
            let mut command = Command::new("cmd");
            command.args(["/C", "start", ""]);
            command
        } else {
            Command::new("xdg-open")
        };
        command.arg(url);
        command
    }
}

#[async_trait]
impl Navigator for SystemNavigator {
    async fn navigate(&self, target: &RedirectTarget) -> Result<()> {
        Self::command(target.as_str()).spawn().map_err(|e| {
            HandoffError::Navigation(format!("failed to launch URL opener: {e}"))
        })?;
        Ok(())
    }
}
