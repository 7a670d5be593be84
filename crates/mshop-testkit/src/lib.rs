//! Test doubles for storefront scenarios.
//!
//! Nothing here touches a real UI. [`RecordingHost`] and [`RecordingPresenter`]
//! write every call into plain vectors so scenario tests can assert on what the
//! user would have seen; [`FakeGateway`] replays scripted outcomes.

mod fake_gateway;
mod recording;

pub use fake_gateway::FakeGateway;
pub use recording::{HostCall, RecordingHost, RecordingPresenter};

use mshop_checkout::{CheckoutForm, FlowConfig, PlatformUser, Storefront};

/// Platform user with every profile field filled.
pub fn sample_user(id: i64) -> PlatformUser {
    PlatformUser {
        id,
        first_name: Some("Ivan".to_string()),
        last_name: Some("Petrov".to_string()),
        username: Some("ivanp".to_string()),
        photo_url: None,
    }
}

/// `a@b.com` / Card / RUB.
pub fn sample_form() -> CheckoutForm {
    CheckoutForm {
        email: "a@b.com".to_string(),
        method: "Card".to_string(),
        currency: "RUB".to_string(),
    }
}

pub type TestStorefront = Storefront<RecordingHost, RecordingPresenter>;

/// Booted storefront over recording doubles, no gateway attached.
pub fn storefront(config: FlowConfig, user: Option<PlatformUser>) -> TestStorefront {
    let mut sf = Storefront::new(config, RecordingHost::new(user), RecordingPresenter::default());
    sf.boot();
    sf
}
