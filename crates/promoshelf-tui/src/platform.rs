//! Host capabilities inside a terminal.
//!
//! There is no portable clipboard in a terminal, so copying always falls
//! back to showing the link. Accepting the install prompt means caching the
//! app for offline use, which the app does after the event.

use promoshelf_core::platform::{DeferredInstall, InstallOutcome, Platform, PlatformError};
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManualCopy {
    pub message: String,
    pub text: String,
}

#[derive(Debug, Default)]
pub struct TerminalPlatform {
    notice: Option<String>,
    manual_copy: Option<ManualCopy>,
    install_requested: bool,
}

impl TerminalPlatform {
    pub fn take_notice(&mut self) -> Option<String> {
        self.notice.take()
    }

    pub fn take_manual_copy(&mut self) -> Option<ManualCopy> {
        self.manual_copy.take()
    }

    pub fn take_install_request(&mut self) -> bool {
        std::mem::take(&mut self.install_requested)
    }
}

impl Platform for TerminalPlatform {
    async fn write_clipboard(&mut self, _text: &str) -> Result<(), PlatformError> {
        Err(PlatformError::ClipboardUnavailable)
    }

    fn notify(&mut self, message: &str) {
        self.notice = Some(message.to_string());
    }

    fn prompt_manual_copy(&mut self, message: &str, text: &str) {
        self.manual_copy = Some(ManualCopy {
            message: message.to_string(),
            text: text.to_string(),
        });
    }

    async fn show_install_prompt(&mut self, prompt: &DeferredInstall) -> InstallOutcome {
        info!(platforms = ?prompt.platforms, "Install accepted");
        self.install_requested = true;
        InstallOutcome::Accepted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_copy_falls_back_to_manual() {
        let mut platform = TerminalPlatform::default();
        assert!(platform.write_clipboard("x").await.is_err());

        platform.prompt_manual_copy("Copy:", "https://go.example/p1");
        let copy = platform.take_manual_copy().unwrap();
        assert_eq!(copy.text, "https://go.example/p1");
        assert!(platform.take_manual_copy().is_none());
    }

    #[tokio::test]
    async fn test_install_request_taken_once() {
        let mut platform = TerminalPlatform::default();
        let outcome = platform.show_install_prompt(&DeferredInstall::default()).await;
        assert_eq!(outcome, InstallOutcome::Accepted);
        assert!(platform.take_install_request());
        assert!(!platform.take_install_request());
    }
}
