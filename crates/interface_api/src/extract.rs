//! Request extractors

use axum::extract::FromRequest;

use crate::error::ApiError;

/// JSON body whose rejection is reported as a `400` with field `body`
///
/// Field validation is left to the intake service so that it applies no
/// matter how a form arrives.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct FormJson<T>(pub T);
