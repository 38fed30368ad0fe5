//! Contact submission handler.

use crate::error::AppError;
use crate::state::AppState;
use crate::validate::validate_contact;
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

pub const SUCCESS_MESSAGE: &str = "Message sent successfully! We'll get back to you soon.";

#[derive(Deserialize)]
pub struct ContactRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Serialize)]
pub struct ContactResponse {
    pub message: &'static str,
    #[serde(rename = "contactId")]
    pub contact_id: i64,
}

/// Validate, persist, then upsert into the marketing list, in that order.
/// A list-sync failure does not roll back the insert; the row stays and the
/// caller gets a generic 500.
pub async fn submit_contact(
    State(state): State<AppState>,
    Json(body): Json<ContactRequest>,
) -> Result<Json<ContactResponse>, AppError> {
    let contact = validate_contact(&body.name, &body.email, &body.message)?;

    let contact_id = state.store.insert_contact(&contact).await?;
    tracing::debug!(contact_id, "contact stored");

    let list = state.list.as_ref().ok_or(AppError::MissingApiKey)?;
    list.upsert_contact(&contact.email, &contact.name).await?;

    Ok(Json(ContactResponse {
        message: SUCCESS_MESSAGE,
        contact_id,
    }))
}
