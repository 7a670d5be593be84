use mshop_checkout::{
    CalculatorView, FormView, Haptic, HostBridge, PendingSummary, PlatformUser, Presenter,
    ProfileView, Screen, Tab,
};
use mshop_pricing::Plan;

/// One observable side effect on the host platform, in call order.
#[derive(Debug, Clone, PartialEq)]
pub enum HostCall {
    Haptic(Haptic),
    Alert(String),
    OpenDeepLink(String),
    CloseApp,
    Navigate(String),
    FreezeScroll(f64),
    RestoreScroll(f64),
}

/// Host bridge that records instead of acting.
///
/// `scroll_offset` is whatever the test last set; freezing does not change it,
/// mirroring a page whose offset is pinned while the overlay is open.
#[derive(Debug, Default)]
pub struct RecordingHost {
    pub user: Option<PlatformUser>,
    pub offset: f64,
    pub calls: Vec<HostCall>,
}

impl RecordingHost {
    pub fn new(user: Option<PlatformUser>) -> Self {
        Self {
            user,
            ..Default::default()
        }
    }

    pub fn alerts(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                HostCall::Alert(m) => Some(m.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn navigations(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                HostCall::Navigate(u) => Some(u.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn deep_links(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                HostCall::OpenDeepLink(u) => Some(u.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn haptics(&self) -> Vec<Haptic> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                HostCall::Haptic(h) => Some(*h),
                _ => None,
            })
            .collect()
    }

    /// Freeze/restore calls only.
    pub fn scroll_calls(&self) -> Vec<HostCall> {
        self.calls
            .iter()
            .filter(|c| matches!(c, HostCall::FreezeScroll(_) | HostCall::RestoreScroll(_)))
            .cloned()
            .collect()
    }

    pub fn closed(&self) -> bool {
        self.calls.contains(&HostCall::CloseApp)
    }
}

impl HostBridge for RecordingHost {
    fn user(&self) -> Option<PlatformUser> {
        self.user.clone()
    }

    fn haptic(&mut self, kind: Haptic) {
        self.calls.push(HostCall::Haptic(kind));
    }

    fn alert(&mut self, message: &str) {
        self.calls.push(HostCall::Alert(message.to_string()));
    }

    fn open_deep_link(&mut self, url: &str) {
        self.calls.push(HostCall::OpenDeepLink(url.to_string()));
    }

    fn close_app(&mut self) {
        self.calls.push(HostCall::CloseApp);
    }

    fn navigate(&mut self, url: &str) {
        self.calls.push(HostCall::Navigate(url.to_string()));
    }

    fn scroll_offset(&self) -> f64 {
        self.offset
    }

    fn freeze_scroll(&mut self, offset: f64) {
        self.calls.push(HostCall::FreezeScroll(offset));
    }

    fn restore_scroll(&mut self, offset: f64) {
        self.calls.push(HostCall::RestoreScroll(offset));
    }
}

/// Presenter that keeps the latest state of every element.
#[derive(Debug, Default)]
pub struct RecordingPresenter {
    pub profile: Option<ProfileView>,
    pub screens: Vec<Screen>,
    pub tab: Option<Tab>,
    pub active_plan: Option<Plan>,
    pub calculator: Option<CalculatorView>,
    pub form: Option<FormView>,
    pub summary: Option<PendingSummary>,
    pub pay_enabled: Option<bool>,
}

impl RecordingPresenter {
    pub fn current_screen(&self) -> Option<Screen> {
        self.screens.last().copied()
    }
}

impl Presenter for RecordingPresenter {
    fn render_profile(&mut self, view: &ProfileView) {
        self.profile = Some(view.clone());
    }

    fn show_screen(&mut self, screen: Screen) {
        self.screens.push(screen);
    }

    fn render_tab(&mut self, tab: Tab) {
        self.tab = Some(tab);
    }

    fn render_active_plan(&mut self, plan: Plan) {
        self.active_plan = Some(plan);
    }

    fn render_calculator(&mut self, view: &CalculatorView) {
        self.calculator = Some(view.clone());
    }

    fn render_form(&mut self, view: &FormView) {
        self.form = Some(view.clone());
    }

    fn render_summary(&mut self, summary: &PendingSummary) {
        self.summary = Some(summary.clone());
    }

    fn set_pay_enabled(&mut self, enabled: bool) {
        self.pay_enabled = Some(enabled);
    }
}
