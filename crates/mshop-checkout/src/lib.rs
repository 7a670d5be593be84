//! mshop-checkout
//!
//! Order state and checkout flow for the storefront mini app.
//!
//! - [`order`]: the single-slot order holder
//! - [`flow`]: pure screen state machine emitting [`Effect`]s
//! - [`Storefront`]: async driver applying effects to a [`HostBridge`] and
//!   [`Presenter`], calling the payment gateway for remote checkout
//!
//! Confirmation strategy (deep link vs. remote checkout) and optional screens
//! are chosen through [`FlowConfig`]; there is one flow for every variant.

pub mod deeplink;
pub mod flow;
pub mod host;
pub mod order;
pub mod profile;
pub mod scroll;
pub mod view;

mod storefront;

pub use flow::{
    CheckoutFlow, ConfirmStrategy, Effect, FlowConfig, FlowError, FlowEvent, Haptic, Screen, Tab,
    TransitionError, PLACEHOLDER_ALERT,
};
pub use host::{HostBridge, Presenter};
pub use order::{CheckoutDetails, CheckoutForm, Order, OrderItem, OrderKind, OrderSlot};
pub use profile::{PlatformUser, ProfileView};
pub use scroll::ScrollLock;
pub use storefront::Storefront;
pub use view::{CalculatorView, FormView, PendingSummary};
