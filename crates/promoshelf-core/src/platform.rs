//! Host capabilities the page needs but cannot provide itself.
//!
//! A browser would supply these through globals (clipboard, alert/prompt,
//! the deferred install event). Here the host injects them, which keeps the
//! dispatcher testable without a real browser.

use std::future::Future;

use thiserror::Error;
use tracing::info;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlatformError {
    #[error("Clipboard is not available on this host")]
    ClipboardUnavailable,

    #[error("Clipboard write rejected: {0}")]
    ClipboardRejected(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallOutcome {
    Accepted,
    Dismissed,
}

/// An install prompt the platform offered and the page deferred.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeferredInstall {
    /// Platforms the prompt can install to, as reported by the host.
    pub platforms: Vec<String>,
}

pub trait Platform {
    /// Put `text` on the system clipboard.
    fn write_clipboard(&mut self, text: &str) -> impl Future<Output = Result<(), PlatformError>>;

    /// Show a short informational message.
    fn notify(&mut self, message: &str);

    /// Ask the user to copy `text` by hand.
    fn prompt_manual_copy(&mut self, message: &str, text: &str);

    /// Replay a deferred install prompt and wait for the user's choice.
    fn show_install_prompt(&mut self, prompt: &DeferredInstall) -> impl Future<Output = InstallOutcome>;
}

/// A host with no clipboard and no install support; messages go to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeadlessPlatform;

impl Platform for HeadlessPlatform {
    async fn write_clipboard(&mut self, _text: &str) -> Result<(), PlatformError> {
        Err(PlatformError::ClipboardUnavailable)
    }

    fn notify(&mut self, message: &str) {
        info!(message, "Notice");
    }

    fn prompt_manual_copy(&mut self, message: &str, text: &str) {
        info!(message, text, "Manual copy requested");
    }

    async fn show_install_prompt(&mut self, _prompt: &DeferredInstall) -> InstallOutcome {
        InstallOutcome::Dismissed
    }
}
