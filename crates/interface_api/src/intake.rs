//! Lead intake orchestration
//!
//! Every form goes through the same steps:
//!
//! 1. trim and validate the form (field errors are returned to the client)
//! 2. persist it (a storage failure fails the request)
//! 3. mirror it into the CRM, when configured
//! 4. send notification emails, when configured
//!
//! Steps 3 and 4 are awaited inline but their failures are only logged:
//! once a submission is stored the request succeeds.

use std::sync::Arc;
use tracing::{error, info, instrument};

use domain_crm::{
    BookingSync, CalculatorSync, CareerSync, CrmError, CrmSync, PartnerSync, UpsertOutcome,
};
use domain_leads::{
    accept_form, BookingForm, BookingRequest, CalculatorForm, CalculatorSubmission, CareerForm,
    CareerApplication, FormType, LeadError, PartnerForm, PartnerRegistration, SubmissionStore,
};
use infra_email::Notifier;

/// Accepts submissions and fans them out to the CRM and email
#[derive(Clone)]
pub struct LeadIntake {
    store: Arc<dyn SubmissionStore>,
    crm: Option<CrmSync>,
    notifier: Option<Notifier>,
}

fn log_sync(form_type: FormType, result: Result<UpsertOutcome, CrmError>) {
    match result {
        Ok(outcome) => info!(
            form_type = %form_type,
            contact_id = %outcome.contact_id,
            created = outcome.created,
            "CRM contact synced"
        ),
        Err(err) => error!(form_type = %form_type, error = %err, "CRM sync failed"),
    }
}

fn log_storage_failure(form_type: FormType, err: &LeadError) {
    error!(form_type = %form_type, error = %err, "Failed to store submission");
}

impl LeadIntake {
    pub fn new(store: Arc<dyn SubmissionStore>) -> Self {
        Self {
            store,
            crm: None,
            notifier: None,
        }
    }

    pub fn with_crm(mut self, crm: CrmSync) -> Self {
        self.crm = Some(crm);
        self
    }

    pub fn with_notifier(mut self, notifier: Notifier) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn store(&self) -> &Arc<dyn SubmissionStore> {
        &self.store
    }

    pub fn crm(&self) -> Option<&CrmSync> {
        self.crm.as_ref()
    }

    pub fn notifier(&self) -> Option<&Notifier> {
        self.notifier.as_ref()
    }

    #[instrument(skip_all, fields(form_type = "booking"))]
    pub async fn submit_booking(&self, form: BookingForm) -> Result<BookingRequest, LeadError> {
        let form = accept_form(form)?;
        let extras = form.extras();

        let booking = self
            .store
            .create_booking(form.to_new_booking())
            .await
            .map_err(LeadError::from)
            .inspect_err(|e| log_storage_failure(FormType::Booking, e))?;
        info!(id = %booking.id, service = %booking.service, "Booking request saved");

        if let Some(crm) = &self.crm {
            let result = crm.sync_booking(&BookingSync::from_record(&booking, &extras)).await;
            log_sync(FormType::Booking, result);
        }
        if let Some(notifier) = &self.notifier {
            notifier.booking_received(&booking, &extras).await;
        }

        Ok(booking)
    }

    #[instrument(skip_all, fields(form_type = "calculator"))]
    pub async fn submit_calculator(&self, form: CalculatorForm) -> Result<CalculatorSubmission, LeadError> {
        let form = accept_form(form)?;

        let submission = self
            .store
            .create_calculator_submission(form.to_new_submission()?)
            .await
            .map_err(LeadError::from)
            .inspect_err(|e| log_storage_failure(FormType::Calculator, e))?;
        info!(
            id = %submission.id,
            calculator_type = %submission.calculator_type,
            "Calculator submission saved"
        );

        if let Some(crm) = &self.crm {
            let result = crm.sync_calculator(&CalculatorSync::from_record(&submission)).await;
            log_sync(FormType::Calculator, result);
        }
        if let Some(notifier) = &self.notifier {
            notifier.calculator_results(&submission).await;
        }

        Ok(submission)
    }

    #[instrument(skip_all, fields(form_type = "partner"))]
    pub async fn submit_partner(&self, form: PartnerForm) -> Result<PartnerRegistration, LeadError> {
        let form = accept_form(form)?;

        let registration = self
            .store
            .create_partner_registration(form.to_new_registration())
            .await
            .map_err(LeadError::from)
            .inspect_err(|e| log_storage_failure(FormType::Partner, e))?;
        info!(
            id = %registration.id,
            company_name = %registration.company_name,
            "Partner registration saved"
        );

        if let Some(crm) = &self.crm {
            let result = crm.sync_partner(&PartnerSync::from_record(&registration)).await;
            log_sync(FormType::Partner, result);
        }
        if let Some(notifier) = &self.notifier {
            notifier.partner_registered(&registration).await;
        }

        Ok(registration)
    }

    /// Career applications have no email flow
    #[instrument(skip_all, fields(form_type = "career"))]
    pub async fn submit_career(&self, form: CareerForm) -> Result<CareerApplication, LeadError> {
        let form = accept_form(form)?;

        let application = self
            .store
            .create_career_application(form.to_new_application())
            .await
            .map_err(LeadError::from)
            .inspect_err(|e| log_storage_failure(FormType::Career, e))?;
        info!(id = %application.id, position = %application.position, "Career application saved");

        if let Some(crm) = &self.crm {
            let result = crm.sync_career(&CareerSync::from_record(&application)).await;
            log_sync(FormType::Career, result);
        }

        Ok(application)
    }
}

impl std::fmt::Debug for LeadIntake {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LeadIntake")
            .field("crm", &self.crm)
            .field("notifications", &self.notifier.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_crm::{CrmOperation, MockCrm, RetryPolicy};
    use domain_leads::InMemorySubmissionStore;
    use infra_email::MockMailer;
    use std::time::Duration;
    use test_utils::builders::{BookingFormBuilder, PartnerFormBuilder};
    use test_utils::fixtures::{CalculatorFixtures, CareerFixtures};

    struct Harness {
        store: InMemorySubmissionStore,
        crm: MockCrm,
        mailer: MockMailer,
        intake: LeadIntake,
    }

    fn harness() -> Harness {
        let store = InMemorySubmissionStore::new();
        let crm = MockCrm::new();
        let mailer = MockMailer::new();
        let intake = LeadIntake::new(Arc::new(store.clone()))
            .with_crm(CrmSync::new(
                Arc::new(crm.clone()),
                RetryPolicy::new(3, Duration::from_millis(1000)),
            ))
            .with_notifier(Notifier::new(Arc::new(mailer.clone()), "admin@palvar.de"));

        Harness {
            store,
            crm,
            mailer,
            intake,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_booking_is_stored_synced_and_confirmed() {
        let h = harness();
        let form = BookingFormBuilder::new()
            .with_email("anna@example.com")
            .with_extras(Some("premium"), Some("EFH"))
            .build();

        let booking = h.intake.submit_booking(form).await.unwrap();

        assert_eq!(h.store.list_bookings().await.unwrap()[0].id, booking.id);
        let contacts = h.crm.contacts().await;
        assert_eq!(contacts.len(), 1);
        assert_eq!(h.crm.notes().await.len(), 1);
        assert_eq!(h.mailer.sent_to("anna@example.com").await.len(), 1);
        assert_eq!(h.mailer.sent_to("admin@palvar.de").await.len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_form_persists_nothing() {
        let h = harness();
        let form = BookingFormBuilder::new().with_email("not-an-email").build();

        let err = h.intake.submit_booking(form).await.unwrap_err();

        assert!(err.is_validation());
        assert_eq!(err.field_errors()[0].field, "email");
        assert_eq!(h.store.total_records().await, 0);
        assert_eq!(h.crm.total_calls(), 0);
        assert!(h.mailer.sent().await.is_empty());
    }

    #[tokio::test]
    async fn test_storage_failure_skips_sync_and_email() {
        let h = harness();
        h.store.fail_writes(true);

        let err = h.intake.submit_career(CareerFixtures::form()).await.unwrap_err();

        assert!(matches!(err, LeadError::Storage(_)));
        assert_eq!(h.crm.total_calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_crm_outage_does_not_fail_submission() {
        let h = harness();
        h.crm
            .fail_always(
                CrmOperation::CreateContact,
                CrmError::Server {
                    status: 503,
                    message: "unavailable".into(),
                },
            )
            .await;

        let registration = h
            .intake
            .submit_partner(PartnerFormBuilder::new().build())
            .await
            .unwrap();

        assert_eq!(registration.status, "pending");
        assert_eq!(h.crm.calls(CrmOperation::CreateContact).await, 3);
        assert_eq!(h.mailer.sent_to("admin@palvar.de").await.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_mail_failure_does_not_fail_submission() {
        let h = harness();
        h.mailer.fail_all(true);

        let submission = h.intake.submit_calculator(CalculatorFixtures::form()).await.unwrap();

        assert_eq!(submission.calculator_type, CalculatorFixtures::form().calculator_type);
        assert_eq!(h.crm.contacts().await.len(), 1);
    }

    #[tokio::test]
    async fn test_without_integrations_only_stores() {
        let store = InMemorySubmissionStore::new();
        let intake = LeadIntake::new(Arc::new(store.clone()));

        intake.submit_career(CareerFixtures::form()).await.unwrap();

        assert_eq!(store.list_career_applications().await.unwrap().len(), 1);
        assert!(intake.crm().is_none());
        assert!(intake.notifier().is_none());
    }
}
