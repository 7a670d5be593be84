//! Terminal rendition of the storefront host.
//!
//! Everything the user would see becomes a `key: value` line on stdout;
//! haptics and screen changes only reach the log.

use mshop_checkout::{
    CalculatorView, FormView, Haptic, HostBridge, PendingSummary, PlatformUser, Presenter,
    ProfileView, Screen,
};
use tracing::debug;

#[derive(Debug, Default)]
pub struct TerminalHost {
    user: Option<PlatformUser>,
}

impl TerminalHost {
    pub fn new(user: Option<PlatformUser>) -> Self {
        Self { user }
    }
}

impl HostBridge for TerminalHost {
    fn user(&self) -> Option<PlatformUser> {
        self.user.clone()
    }

    fn haptic(&mut self, kind: Haptic) {
        debug!(?kind, "haptic");
    }

    fn alert(&mut self, message: &str) {
        println!("alert: {message}");
    }

    fn open_deep_link(&mut self, url: &str) {
        println!("open: {url}");
    }

    fn close_app(&mut self) {
        println!("closed");
    }

    fn navigate(&mut self, url: &str) {
        println!("redirect: {url}");
    }

    // No scrollable page behind a terminal.
    fn scroll_offset(&self) -> f64 {
        0.0
    }

    fn freeze_scroll(&mut self, _offset: f64) {}

    fn restore_scroll(&mut self, _offset: f64) {}
}

#[derive(Debug, Default)]
pub struct TerminalPresenter;

impl Presenter for TerminalPresenter {
    fn render_profile(&mut self, view: &ProfileView) {
        println!("profile: {} {}", view.display_name, view.handle);
    }

    fn show_screen(&mut self, screen: Screen) {
        debug!(?screen, "screen");
    }

    fn render_calculator(&mut self, view: &CalculatorView) {
        debug!(amount = view.amount, price = %view.price, "calculator");
    }

    fn render_form(&mut self, view: &FormView) {
        println!("order: {} {}", view.order_label, view.price);
    }

    fn render_summary(&mut self, summary: &PendingSummary) {
        match serde_json::to_string(summary) {
            Ok(json) => println!("summary: {json}"),
            Err(e) => println!("summary: <unprintable: {e}>"),
        }
    }
}
