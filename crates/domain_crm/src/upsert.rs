//! Contact upsert keyed by email
//!
//! ```text
//! find_contact_by_email ──► Some(id) ──► update(props + flag) ──► created = false
//!          │
//!          └─────────────► None ──► create(props + lead defaults)
//!                                       │
//!                                       └─► update(flag)  [best effort] ──► created = true
//! ```
//!
//! A failed lookup is logged and treated as "not found". During a CRM search
//! outage this can create a duplicate contact for an existing email.

use serde::Serialize;
use tracing::{info, warn};

use domain_leads::FormType;

use crate::error::CrmError;
use crate::ports::CrmPort;
use crate::property_map::{confirmation_property, PropertySet, CONFIRMATION_VALUE};

/// Lead status given to newly created contacts
pub const NEW_LEAD_STATUS: &str = "NEW";

/// Lifecycle stage given to newly created contacts
pub const LEAD_LIFECYCLE_STAGE: &str = "lead";

/// Outcome of an upsert
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertOutcome {
    pub contact_id: String,
    pub created: bool,
}

/// Logs and discards the error of an optional CRM side effect
pub fn best_effort<T>(action: &str, result: Result<T, CrmError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            warn!(action, error = %err, "Optional CRM side effect skipped");
            None
        }
    }
}

/// Finds a contact by email and updates it, or creates it
///
/// The form's confirmation flag is set on update and on create. New
/// contacts also get the default lead status and lifecycle stage. A failed
/// search is logged and treated as "no contact", so a search outage can
/// produce a duplicate contact.
///
/// # Errors
///
/// Returns the [`CrmError`] of the update or create call. Search errors are
/// never returned.
///
/// # Example
///
/// ```rust,ignore
/// let outcome = upsert_contact(&crm, "anna@example.com", properties, FormType::Booking).await?;
/// if outcome.created {
///     info!(contact_id = %outcome.contact_id, "new lead");
/// }
/// ```
pub async fn upsert_contact(
    crm: &dyn CrmPort,
    email: &str,
    properties: PropertySet,
    form_type: FormType,
) -> Result<UpsertOutcome, CrmError> {
    let flag = confirmation_property(form_type);

    let existing = match crm.find_contact_by_email(email).await {
        Ok(found) => found,
        Err(err) => {
            warn!(form_type = %form_type, error = %err, "Contact search failed, will try to create");
            None
        }
    };

    if let Some(contact_id) = existing {
        let mut update = properties;
        update.insert(flag.to_string(), CONFIRMATION_VALUE.to_string());
        crm.update_contact(&contact_id, &update).await?;

        info!(form_type = %form_type, contact_id = %contact_id, "CRM contact updated");
        return Ok(UpsertOutcome {
            contact_id,
            created: false,
        });
    }

    let mut create = properties;
    create.insert("hs_lead_status".to_string(), NEW_LEAD_STATUS.to_string());
    create.insert("lifecyclestage".to_string(), LEAD_LIFECYCLE_STAGE.to_string());
    let contact_id = crm.create_contact(&create).await?;
    info!(form_type = %form_type, contact_id = %contact_id, "CRM contact created");

    let flag_update = PropertySet::from([(flag.to_string(), CONFIRMATION_VALUE.to_string())]);
    if best_effort(flag, crm.update_contact(&contact_id, &flag_update).await).is_some() {
        info!(form_type = %form_type, property = flag, "Confirmation flag set");
    }

    Ok(UpsertOutcome {
        contact_id,
        created: true,
    })
}
