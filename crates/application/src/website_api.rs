use tahfeez_core::AppResult;
use tahfeez_domain::{Feature, Lesson, Package, RegistrationForm, RequestBody, Testimonial};

use crate::api_ports::{ApiGateway, ApiMethod, decode_collection};

/// Public website endpoints; no token required.
#[derive(Debug, Clone)]
pub struct WebsiteApi {
    gateway: ApiGateway,
}

impl WebsiteApi {
    /// Creates the API bound to a gateway.
    #[must_use]
    pub fn new(gateway: ApiGateway) -> Self {
        Self { gateway }
    }

    /// Lists the packages open for subscription.
    pub async fn packages(&self) -> AppResult<Vec<Package>> {
        let value = self.gateway.get("packages", Vec::new()).await?;
        decode_collection(value, "packages")
    }

    /// Lists the selling points.
    pub async fn features(&self) -> AppResult<Vec<Feature>> {
        let value = self.gateway.get("features", Vec::new()).await?;
        decode_collection(value, "features")
    }

    /// Lists the published sample lessons.
    pub async fn lessons(&self) -> AppResult<Vec<Lesson>> {
        let value = self.gateway.get("lessons", Vec::new()).await?;
        decode_collection(value, "lessons")
    }

    /// Lists the published testimonials.
    pub async fn testimonials(&self) -> AppResult<Vec<Testimonial>> {
        let value = self.gateway.get("testimonials", Vec::new()).await?;
        decode_collection(value, "testimonials")
    }

    /// Submits a public sign-up.
    pub async fn register(&self, form: &RegistrationForm) -> AppResult<()> {
        let body = RequestBody::from_draft(form, Vec::new())?;
        self.gateway
            .send_body(ApiMethod::Post, "register", Some(body))
            .await
            .map(|_| ())
    }
}
