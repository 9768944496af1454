//! CRM maintenance handlers

use axum::{Extension, Json};

use domain_crm::{required_custom_properties, CustomProperty};

use crate::auth::{permissions, require_role, Claims};
use crate::error::ApiError;

/// Custom properties that must exist in the CRM account before syncing
pub async fn crm_properties(
    Extension(claims): Extension<Claims>,
) -> Result<Json<Vec<CustomProperty>>, ApiError> {
    require_role(&claims, permissions::CRM_ADMIN)?;
    Ok(Json(required_custom_properties()))
}
