//! Transactional Email
//!
//! Acknowledges submissions by email:
//!
//! - [`templates`]: branded German HTML for each message, with all
//!   visitor-supplied text escaped
//! - [`ics`]: the callback invite attached to booking confirmations
//! - [`notifier`]: which emails each form triggers, sent best-effort
//! - [`resend`]: the Resend HTTP adapter implementing [`EmailPort`]
//!
//! Nothing here is on the critical path of a submission; every failure is
//! logged and reported, never propagated to the visitor.

pub mod error;
pub mod message;
pub mod ports;
pub mod brand;
pub mod labels;
pub mod templates;
pub mod ics;
pub mod notifier;
pub mod resend;

pub use error::EmailError;
pub use message::{Attachment, EmailReceipt, OutboundEmail};
pub use ports::EmailPort;
pub use brand::{Brand, Palette};
pub use labels::{calculator_type_name, trade_label, trades_formatted};
pub use notifier::{DeliveryReport, Notifier};
pub use resend::{ResendConfig, ResendMailer, FALLBACK_SENDER, RESEND_API_URL};
#[cfg(any(test, feature = "mock"))]
pub use ports::mock::MockMailer;
