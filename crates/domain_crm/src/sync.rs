//! Per-form CRM synchronization
//!
//! Each `sync_*` call maps the payload, upserts the contact and attaches a
//! note, all inside the retry wrapper. Note and company creation are
//! optional side effects: their failures are logged and never fail the sync.

use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{error, info};

use domain_leads::{
    BookingExtras, BookingRequest, CalculatorSubmission, CareerApplication, FormType,
    PartnerRegistration,
};

use crate::error::CrmError;
use crate::ports::{CrmPort, NewNote};
use crate::property_map::{map_properties, PropertySet, PropertyTable};
use crate::retry::{with_retry, RetryPolicy};
use crate::upsert::{best_effort, upsert_contact, UpsertOutcome};

// ============================================================================
// Sync payloads
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingSync {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub service: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub building_type: Option<String>,
}

impl BookingSync {
    pub fn from_record(record: &BookingRequest, extras: &BookingExtras) -> Self {
        Self {
            name: record.name.clone(),
            email: record.email.clone(),
            phone: record.phone.clone(),
            service: record.service.clone(),
            message: record.message.clone(),
            package_type: extras.package_type.clone(),
            building_type: extras.building_type.clone(),
        }
    }

    /// Non-empty detail lines, newline-joined
    pub fn note_body(&self) -> String {
        let optional = |label: &str, value: &Option<String>| {
            value
                .as_deref()
                .filter(|v| !v.is_empty())
                .map(|v| format!("{}: {}", label, v))
        };

        [
            Some(format!("Anfrage: {}", self.service)),
            optional("Paket", &self.package_type),
            optional("Gebäudetyp", &self.building_type),
            optional("Nachricht", &self.message),
        ]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join("\n")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatorSync {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub calculator_type: String,
}

impl CalculatorSync {
    pub fn from_record(record: &CalculatorSubmission) -> Self {
        Self {
            email: record.email.clone(),
            name: record.name.clone(),
            calculator_type: record.calculator_type.clone(),
        }
    }

    pub fn note_body(&self) -> String {
        format!("Rechner-Anfrage: {}", self.calculator_type)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerSync {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub position: String,
}

impl CareerSync {
    pub fn from_record(record: &CareerApplication) -> Self {
        Self {
            name: record.name.clone(),
            email: record.email.clone(),
            phone: record.phone.clone(),
            position: record.position.clone(),
        }
    }

    pub fn note_body(&self) -> String {
        format!("Karriere-Bewerbung: {}", self.position)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PartnerSync {
    pub company_name: String,
    pub contact_person: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    pub trades: Vec<String>,
}

impl PartnerSync {
    pub fn from_record(record: &PartnerRegistration) -> Self {
        Self {
            company_name: record.company_name.clone(),
            contact_person: record.contact_person.clone(),
            email: record.email.clone(),
            phone: record.phone.clone(),
            address: record.address.clone(),
            website: record.website.clone(),
            trades: record.trades.clone(),
        }
    }

    fn trades_joined(&self) -> String {
        self.trades.join(", ")
    }

    /// Company record created alongside the contact
    pub fn company_properties(&self) -> PropertySet {
        PropertySet::from([
            ("name".to_string(), self.company_name.clone()),
            ("phone".to_string(), self.phone.clone()),
            ("website".to_string(), self.website.clone().unwrap_or_default()),
            ("address".to_string(), self.address.clone()),
            (
                "description".to_string(),
                format!("Handwerkspartner - Gewerke: {}", self.trades_joined()),
            ),
        ])
    }

    pub fn note_body(&self) -> String {
        format!(
            "Partner-Registrierung: {}\nGewerke: {}",
            self.company_name,
            self.trades_joined()
        )
    }
}

/// Result of the error-absorbing generic sync
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncReport {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SyncReport {
    fn succeeded(contact_id: String) -> Self {
        Self {
            success: true,
            contact_id: Some(contact_id),
            error: None,
        }
    }

    fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            contact_id: None,
            error: Some(error.into()),
        }
    }
}

fn payload_fields<T: Serialize>(payload: &T) -> Result<Map<String, Value>, CrmError> {
    match serde_json::to_value(payload)? {
        Value::Object(map) => Ok(map),
        other => Err(CrmError::Payload(format!("expected an object, got {}", other))),
    }
}

// ============================================================================
// CrmSync
// ============================================================================

/// Form-specific sync operations over a CRM port
#[derive(Clone)]
pub struct CrmSync {
    crm: Arc<dyn CrmPort>,
    retry: RetryPolicy,
}

impl CrmSync {
    pub fn new(crm: Arc<dyn CrmPort>, retry: RetryPolicy) -> Self {
        Self { crm, retry }
    }

    pub fn port(&self) -> &Arc<dyn CrmPort> {
        &self.crm
    }

    /// Maps fields and logs anything the table does not cover
    fn mapped(&self, fields: &Map<String, Value>, form_type: FormType) -> PropertySet {
        let mapped = map_properties(fields, PropertyTable::for_form(form_type));
        if !mapped.unmapped.is_empty() {
            info!(form_type = %form_type, unmapped = ?mapped.unmapped, "Unmapped fields not sent to CRM");
        }
        mapped.properties
    }

    async fn attach_note(&self, contact_id: &str, body: String) {
        best_effort("note", self.crm.create_note(&NewNote::now(contact_id, body)).await);
    }

    /// Mapping, upsert and note in one attempt
    async fn upsert_with_note(
        &self,
        fields: &Map<String, Value>,
        email: &str,
        form_type: FormType,
        note: &str,
    ) -> Result<UpsertOutcome, CrmError> {
        let properties = self.mapped(fields, form_type);
        let outcome = upsert_contact(self.crm.as_ref(), email, properties, form_type).await?;
        self.attach_note(&outcome.contact_id, note.to_string()).await;
        Ok(outcome)
    }

    /// Upserts the booking contact and attaches the `Anfrage:` note
    ///
    /// The whole sequence is retried under the configured [`RetryPolicy`];
    /// a failed note never fails the sync.
    ///
    /// # Errors
    ///
    /// Returns the last [`CrmError`] when the contact cannot be created or
    /// updated within the attempt budget, immediately for `BadRequest` and
    /// `Conflict`. [`CrmError::Payload`] if the sync data cannot be
    /// serialized.
    pub async fn sync_booking(&self, data: &BookingSync) -> Result<UpsertOutcome, CrmError> {
        let fields = payload_fields(data)?;
        let note = data.note_body();
        let (fields, note, email) = (&fields, note.as_str(), data.email.as_str());

        with_retry(&self.retry, "booking sync", move || {
            self.upsert_with_note(fields, email, FormType::Booking, note)
        })
        .await
    }

    /// Upserts the calculator contact with a results summary note
    ///
    /// # Errors
    ///
    /// Same as [`CrmSync::sync_booking`].
    pub async fn sync_calculator(&self, data: &CalculatorSync) -> Result<UpsertOutcome, CrmError> {
        let fields = payload_fields(data)?;
        let note = data.note_body();
        let (fields, note, email) = (&fields, note.as_str(), data.email.as_str());

        with_retry(&self.retry, "calculator sync", move || {
            self.upsert_with_note(fields, email, FormType::Calculator, note)
        })
        .await
    }

    /// Upserts the applicant contact with an application note
    ///
    /// # Errors
    ///
    /// Same as [`CrmSync::sync_booking`].
    pub async fn sync_career(&self, data: &CareerSync) -> Result<UpsertOutcome, CrmError> {
        let fields = payload_fields(data)?;
        let note = data.note_body();
        let (fields, note, email) = (&fields, note.as_str(), data.email.as_str());

        with_retry(&self.retry, "career sync", move || {
            self.upsert_with_note(fields, email, FormType::Career, note)
        })
        .await
    }

    /// Upserts the contact, then creates a company record and a note
    ///
    /// Company and note are best effort: a rejected company property is
    /// logged and the contact outcome is still returned.
    ///
    /// # Errors
    ///
    /// Same as [`CrmSync::sync_booking`]; only the contact upsert counts.
    pub async fn sync_partner(&self, data: &PartnerSync) -> Result<UpsertOutcome, CrmError> {
        let fields = payload_fields(data)?;
        let (fields, email) = (&fields, data.email.as_str());

        with_retry(&self.retry, "partner sync", move || async move {
            let properties = self.mapped(fields, FormType::Partner);
            let outcome = upsert_contact(self.crm.as_ref(), email, properties, FormType::Partner).await?;

            if let Some(company_id) =
                best_effort("company", self.crm.create_company(&data.company_properties()).await)
            {
                info!(company_id = %company_id, "CRM company created");
            }
            self.attach_note(&outcome.contact_id, data.note_body()).await;
            Ok(outcome)
        })
        .await
    }

    /// Maps any payload with an explicit table and upserts it once
    ///
    /// Never fails: errors are reported in the returned [`SyncReport`].
    pub async fn sync_form(
        &self,
        form_type: FormType,
        data: &Map<String, Value>,
        table: &PropertyTable,
    ) -> SyncReport {
        let mapped = map_properties(data, table);
        if !mapped.unmapped.is_empty() {
            info!(form_type = %form_type, unmapped = ?mapped.unmapped, "Unmapped fields not sent to CRM");
        }

        let email = match data.get("email") {
            Some(Value::String(email)) if !email.is_empty() => email.clone(),
            _ => {
                error!(form_type = %form_type, "Email is required for CRM sync");
                return SyncReport::failed(CrmError::MissingEmail.to_string());
            }
        };

        match upsert_contact(self.crm.as_ref(), &email, mapped.properties, form_type).await {
            Ok(outcome) => SyncReport::succeeded(outcome.contact_id),
            Err(err) => {
                error!(form_type = %form_type, error = %err, "CRM sync failed");
                SyncReport::failed(err.to_string())
            }
        }
    }
}

impl std::fmt::Debug for CrmSync {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CrmSync").field("retry", &self.retry).finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::mock::{CrmOperation, MockCrm};
    use crate::property_map::CALCULATOR_TABLE;
    use std::time::Duration;

    fn sync_over(crm: &MockCrm) -> CrmSync {
        CrmSync::new(Arc::new(crm.clone()), RetryPolicy::new(3, Duration::from_millis(1000)))
    }

    fn partner() -> PartnerSync {
        PartnerSync {
            company_name: "Muster Bau GmbH".into(),
            contact_person: "Max Mustermann".into(),
            email: "max@musterbau.de".into(),
            phone: "030 1234567".into(),
            address: "Hauptstraße 1, Berlin".into(),
            website: None,
            trades: vec!["dach".into(), "fenster".into()],
        }
    }

    #[test]
    fn test_booking_note_skips_empty_lines() {
        let data = BookingSync {
            service: "Energieberatung".into(),
            package_type: Some("premium".into()),
            message: Some("Bitte anrufen".into()),
            building_type: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(
            data.note_body(),
            "Anfrage: Energieberatung\nPaket: premium\nNachricht: Bitte anrufen"
        );
    }

    #[test]
    fn test_partner_company_properties() {
        let company = partner().company_properties();
        assert_eq!(company["website"], "");
        assert_eq!(company["description"], "Handwerkspartner - Gewerke: dach, fenster");
        assert_eq!(
            partner().note_body(),
            "Partner-Registrierung: Muster Bau GmbH\nGewerke: dach, fenster"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_booking_sync_creates_contact_and_note() {
        let crm = MockCrm::new();
        let data = BookingSync {
            name: "Anna Maria Muster".into(),
            email: "anna@example.com".into(),
            service: "Energieberatung".into(),
            building_type: Some("EFH".into()),
            ..Default::default()
        };

        let outcome = sync_over(&crm).sync_booking(&data).await.unwrap();

        assert!(outcome.created);
        let contact = crm.contact(&outcome.contact_id).await.unwrap();
        assert_eq!(contact["firstname"], "Anna");
        assert_eq!(contact["lastname"], "Maria Muster");
        assert_eq!(contact["booking_type"], "Energieberatung");
        assert!(!contact.contains_key("buildingType"));

        let notes = crm.notes().await;
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].contact_id, outcome.contact_id);
        assert_eq!(notes[0].body, "Anfrage: Energieberatung\nGebäudetyp: EFH");
    }

    #[tokio::test(start_paused = true)]
    async fn test_transient_create_failures_are_retried() {
        let crm = MockCrm::new();
        crm.fail_times(CrmOperation::CreateContact, 2, CrmError::from_status(502, "bad gateway"))
            .await;

        let data = CareerSync {
            name: "Jonas".into(),
            email: "jonas@example.com".into(),
            position: "Energieberater".into(),
            phone: None,
        };
        let outcome = sync_over(&crm).sync_career(&data).await.unwrap();

        assert!(outcome.created);
        assert_eq!(crm.calls(CrmOperation::CreateContact).await, 3);
        assert_eq!(crm.contacts().await.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_conflict_is_surfaced_without_retry() {
        let crm = MockCrm::new();
        crm.fail_always(CrmOperation::CreateContact, CrmError::from_status(409, "exists"))
            .await;

        let data = CalculatorSync {
            email: "a@example.com".into(),
            name: None,
            calculator_type: "pv".into(),
        };
        let err = sync_over(&crm).sync_calculator(&data).await.unwrap_err();

        assert!(matches!(err, CrmError::Conflict { .. }));
        assert_eq!(crm.calls(CrmOperation::CreateContact).await, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_company_failure_does_not_fail_partner_sync() {
        let crm = MockCrm::new();
        crm.fail_always(CrmOperation::CreateCompany, CrmError::from_status(400, "duplicate domain"))
            .await;
        crm.fail_always(CrmOperation::CreateNote, CrmError::from_status(500, "notes down"))
            .await;

        let outcome = sync_over(&crm).sync_partner(&partner()).await.unwrap();

        assert!(outcome.created);
        assert!(crm.companies().await.is_empty());
        assert_eq!(crm.calls(CrmOperation::CreateCompany).await, 1);
        let contact = crm.contact(&outcome.contact_id).await.unwrap();
        assert_eq!(contact["company"], "Muster Bau GmbH");
        assert_eq!(contact["firstname"], "Max");
        assert_eq!(contact["partner_confirmed"], "true");
    }

    #[tokio::test]
    async fn test_sync_form_requires_email() {
        let crm = MockCrm::new();
        let data = serde_json::json!({ "name": "Anna" });
        let Value::Object(fields) = data else { unreachable!() };

        let report = sync_over(&crm)
            .sync_form(FormType::Calculator, &fields, &CALCULATOR_TABLE)
            .await;

        assert!(!report.success);
        assert_eq!(report.error.as_deref(), Some("Email is required"));
        assert_eq!(crm.total_calls(), 0);
    }

    #[tokio::test]
    async fn test_sync_form_reports_errors_as_values() {
        let crm = MockCrm::new();
        crm.fail_always(CrmOperation::CreateContact, CrmError::from_status(503, "maintenance"))
            .await;
        let Value::Object(fields) = serde_json::json!({ "email": "a@example.com", "name": "Anna" }) else {
            unreachable!()
        };

        let sync = sync_over(&crm);
        let report = sync.sync_form(FormType::Calculator, &fields, &CALCULATOR_TABLE).await;
        assert!(!report.success);
        assert_eq!(crm.calls(CrmOperation::CreateContact).await, 1);
        assert!(report.error.unwrap().contains("maintenance"));

        crm.heal().await;
        let report = sync.sync_form(FormType::Calculator, &fields, &CALCULATOR_TABLE).await;
        assert!(report.success);
        assert!(report.contact_id.is_some());
    }
}
