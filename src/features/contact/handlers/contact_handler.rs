use std::sync::Arc;

use axum::{
    extract::{rejection::FormRejection, State},
    response::Response,
    Form,
};

use crate::core::extractor::ClientIp;
use crate::core::flash::{FlashMessage, FlashSigner};
use crate::features::contact::dtos::ContactForm;
use crate::features::contact::services::ContactService;
use crate::shared::constants::{CONTACT_REDIRECT, FLASH_CONTACT_SUCCESS, FLASH_GENERIC_ERROR};

#[derive(Clone)]
pub struct ContactState {
    pub service: Arc<ContactService>,
    pub flash: Arc<FlashSigner>,
}

/// Contact form submission. Every outcome is a redirect back to the form with
/// a flash message; nothing is reported as an error status.
pub async fn submit_contact(
    State(state): State<ContactState>,
    ClientIp(ip): ClientIp,
    form: Result<Form<ContactForm>, FormRejection>,
) -> Response {
    let form = match form {
        Ok(Form(form)) => form.trimmed(),
        Err(e) => {
            tracing::warn!("Unreadable contact form from {}: {}", ip, e);
            return state
                .flash
                .redirect(CONTACT_REDIRECT, FlashMessage::error(FLASH_GENERIC_ERROR));
        }
    };

    if let Err(rejection) = form.check() {
        tracing::debug!("Contact form from {} rejected: {:?}", ip, rejection);
        return state
            .flash
            .redirect(CONTACT_REDIRECT, FlashMessage::error(rejection.message()));
    }

    match state.service.submit(form, &ip).await {
        Ok(_) => state
            .flash
            .redirect(CONTACT_REDIRECT, FlashMessage::success(FLASH_CONTACT_SUCCESS)),
        Err(e) => {
            tracing::error!("Failed to store contact submission from {}: {}", ip, e);
            state
                .flash
                .redirect(CONTACT_REDIRECT, FlashMessage::error(FLASH_GENERIC_ERROR))
        }
    }
}
