use std::sync::Arc;

use crate::core::error::Result;
use crate::features::contact::dtos::ContactForm;
use crate::features::contact::models::NewContact;
use crate::features::contact::repositories::ContactRepository;
use crate::features::geolocation::GeolocationService;

/// Service for storing contact form submissions
pub struct ContactService {
    repository: Arc<dyn ContactRepository>,
    geolocation: Arc<GeolocationService>,
}

impl ContactService {
    pub fn new(repository: Arc<dyn ContactRepository>, geolocation: Arc<GeolocationService>) -> Self {
        Self {
            repository,
            geolocation,
        }
    }

    /// Persist an already validated form sent from `ip`
    pub async fn submit(&self, form: ContactForm, ip: &str) -> Result<i64> {
        let location = self.geolocation.lookup(ip).await;
        let contact = NewContact::from_form(form, ip).with_location(location);

        let id = self.repository.insert(&contact).await?;

        tracing::info!(
            "Contact submission stored: id={}, email={}, country={:?}",
            id,
            contact.email,
            contact.country
        );

        Ok(id)
    }
}
