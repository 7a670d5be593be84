//! Seams to the outside world.
//!
//! [`HostBridge`] is the messaging-platform bridge (identity, haptics,
//! dialogs, navigation, scroll). [`Presenter`] is the rendering adapter.
//!
//! Every `Presenter` method has an empty default: a screen that lacks an
//! element simply does not override the method, and the update is skipped.

use mshop_pricing::Plan;

use crate::flow::{Haptic, Screen, Tab};
use crate::profile::{PlatformUser, ProfileView};
use crate::view::{CalculatorView, FormView, PendingSummary};

pub trait HostBridge {
    /// Current platform user, `None` outside the messaging client.
    fn user(&self) -> Option<PlatformUser>;

    fn haptic(&mut self, kind: Haptic);

    fn alert(&mut self, message: &str);

    fn open_deep_link(&mut self, url: &str);

    fn close_app(&mut self);

    /// Browser navigation to an external URL.
    fn navigate(&mut self, url: &str);

    fn scroll_offset(&self) -> f64;

    fn freeze_scroll(&mut self, offset: f64);

    fn restore_scroll(&mut self, offset: f64);
}

#[allow(unused_variables)]
pub trait Presenter {
    fn render_profile(&mut self, view: &ProfileView) {}

    fn show_screen(&mut self, screen: Screen) {}

    fn render_tab(&mut self, tab: Tab) {}

    fn render_active_plan(&mut self, plan: Plan) {}

    fn render_calculator(&mut self, view: &CalculatorView) {}

    fn render_form(&mut self, view: &FormView) {}

    fn render_summary(&mut self, summary: &PendingSummary) {}

    fn set_pay_enabled(&mut self, enabled: bool) {}
}
