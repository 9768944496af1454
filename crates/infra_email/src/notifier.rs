//! Submission notifications
//!
//! Decides which emails each accepted submission triggers:
//!
//! | Form       | Emails                                                        |
//! |------------|---------------------------------------------------------------|
//! | booking    | confirmation with callback invite to the visitor, notification to admin (reply-to visitor) |
//! | calculator | results to the visitor                                        |
//! | partner    | notification to admin (reply-to applicant)                    |
//!
//! Each email is sent independently; a failure is logged and recorded in
//! the [`DeliveryReport`] without stopping the others.

use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};

use domain_leads::{BookingExtras, BookingRequest, CalculatorSubmission, PartnerRegistration};

use crate::brand::Brand;
use crate::error::EmailError;
use crate::ics::{CallbackInvite, ICS_CONTENT_TYPE};
use crate::message::{Attachment, EmailReceipt, OutboundEmail};
use crate::ports::EmailPort;
use crate::templates::{self, BookingDetails, Rendered};

/// Admin inbox used when none is configured
pub const DEFAULT_ADMIN_EMAIL: &str = "service@palvar.de";

/// Outcome of one notification flow
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeliveryReport {
    pub delivered: Vec<EmailReceipt>,
    /// `kind: error` for each email that could not be sent
    pub failed: Vec<String>,
}

impl DeliveryReport {
    pub fn all_delivered(&self) -> bool {
        self.failed.is_empty()
    }

    fn record(&mut self, kind: &str, result: Result<EmailReceipt, EmailError>) {
        match result {
            Ok(receipt) => {
                info!(kind, email_id = %receipt.id, "Email sent");
                self.delivered.push(receipt);
            }
            Err(err) => {
                warn!(kind, error = %err, "Email failed");
                self.failed.push(format!("{}: {}", kind, err));
            }
        }
    }
}

/// Sends the emails for accepted submissions
#[derive(Clone)]
pub struct Notifier {
    mailer: Arc<dyn EmailPort>,
    brand: Brand,
    admin_email: String,
}

impl Notifier {
    pub fn new(mailer: Arc<dyn EmailPort>, admin_email: impl Into<String>) -> Self {
        Self {
            mailer,
            brand: Brand::default(),
            admin_email: admin_email.into(),
        }
    }

    pub fn with_brand(mut self, brand: Brand) -> Self {
        self.brand = brand;
        self
    }

    pub fn admin_email(&self) -> &str {
        &self.admin_email
    }

    /// The underlying mail port, for health checks
    pub fn mailer(&self) -> &Arc<dyn EmailPort> {
        &self.mailer
    }

    fn compose(&self, sender_name: String, to: &str, rendered: Rendered) -> OutboundEmail {
        OutboundEmail::new(sender_name, to, rendered.subject, rendered.html)
    }

    /// Confirmation (with callback invite) to the visitor and notification
    /// to the admin inbox
    pub async fn booking_received(&self, booking: &BookingRequest, extras: &BookingExtras) -> DeliveryReport {
        let mut report = DeliveryReport::default();
        let details = BookingDetails {
            name: booking.name.clone(),
            email: booking.email.clone(),
            phone: booking.phone.clone(),
            service: booking.service.clone(),
            package: extras.package_type.clone(),
            building_type: extras.building_type.clone(),
            message: booking.message.clone(),
            submitted_at: booking.created_at,
        };

        let invite = CallbackInvite {
            name: booking.name.clone(),
            email: booking.email.clone(),
            service: booking.service.clone(),
            package: extras.package_type.clone(),
        };
        let ics = invite.render(&self.brand, Utc::now());
        let confirmation = self
            .compose(
                self.brand.name.to_string(),
                &booking.email,
                templates::booking_confirmation(&self.brand, &details),
            )
            .attach(Attachment::from_bytes(
                CallbackInvite::filename(&self.brand),
                ICS_CONTENT_TYPE,
                ics.as_bytes(),
            ));
        report.record("booking_confirmation", self.mailer.send(&confirmation).await);

        let notification = self
            .compose(
                self.brand.booking_sender(),
                &self.admin_email,
                templates::admin_booking_notification(&self.brand, &details),
            )
            .reply_to(booking.email.as_str());
        report.record("booking_admin_notification", self.mailer.send(&notification).await);

        report
    }

    /// Results email to the visitor
    pub async fn calculator_results(&self, submission: &CalculatorSubmission) -> DeliveryReport {
        let mut report = DeliveryReport::default();

        let inputs = submission.parsed_inputs().unwrap_or_else(|err| {
            warn!(error = %err, "Stored calculator inputs are not a label/value list");
            Vec::new()
        });
        let results = submission.parsed_results().unwrap_or_else(|err| {
            warn!(error = %err, "Stored calculator results are not a label/value list");
            Vec::new()
        });

        let rendered = templates::calculator_results(
            &self.brand,
            submission.name.as_deref(),
            &submission.calculator_type,
            &inputs,
            &results,
        );
        let email = self.compose(self.brand.name.to_string(), &submission.email, rendered);
        report.record("calculator_results", self.mailer.send(&email).await);

        report
    }

    /// Notification about a partner registration to the admin inbox
    pub async fn partner_registered(&self, registration: &PartnerRegistration) -> DeliveryReport {
        let mut report = DeliveryReport::default();

        let email = self
            .compose(
                self.brand.booking_sender(),
                &self.admin_email,
                templates::partner_notification(&self.brand, registration),
            )
            .reply_to(registration.email.as_str());
        report.record("partner_admin_notification", self.mailer.send(&email).await);

        report
    }
}

impl std::fmt::Debug for Notifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notifier")
            .field("brand", &self.brand.name)
            .field("admin_email", &self.admin_email)
            .finish_non_exhaustive()
    }
}
