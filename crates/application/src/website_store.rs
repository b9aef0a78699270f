use std::sync::Arc;

use tahfeez_core::{AppResult, Locale};
use tahfeez_domain::{Feature, Lesson, Package, RegistrationForm, Testimonial};
use tracing::{info, warn};

use crate::api_ports::ApiGateway;
use crate::error_messages::user_facing_message;
use crate::list_controller::CommandOutcome;
use crate::slice::Slice;
use crate::ui_ports::{LOCALE_STORAGE_KEY, SessionStorage};
use crate::website_api::WebsiteApi;

/// Sections of the public home page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HomeContent {
    /// Subscription packages.
    pub packages: Slice<Vec<Package>>,
    /// Selling points.
    pub features: Slice<Vec<Feature>>,
    /// Sample lessons.
    pub lessons: Slice<Vec<Lesson>>,
    /// Parent and student reviews.
    pub testimonials: Slice<Vec<Testimonial>>,
}

/// Progress of the public sign-up form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationState {
    /// Whether the form is being sent.
    pub submitting: bool,
    /// Whether the last submission succeeded.
    pub submitted: bool,
    /// Message of the last failed submission.
    pub error: Option<String>,
}

/// State of the public website: language, home content and sign-up form.
pub struct WebsiteStore {
    gateway: ApiGateway,
    storage: Arc<dyn SessionStorage>,
    home: HomeContent,
    registration: RegistrationState,
}

impl WebsiteStore {
    /// Creates the store; the gateway's locale is the initial language.
    #[must_use]
    pub fn new(gateway: ApiGateway, storage: Arc<dyn SessionStorage>) -> Self {
        Self {
            gateway,
            storage,
            home: HomeContent::default(),
            registration: RegistrationState::default(),
        }
    }

    /// Returns the current interface language.
    #[must_use]
    pub fn locale(&self) -> Locale {
        self.gateway.locale()
    }

    /// Returns the gateway bound to the current language.
    #[must_use]
    pub fn gateway(&self) -> &ApiGateway {
        &self.gateway
    }

    /// Returns the home page sections.
    #[must_use]
    pub fn home(&self) -> &HomeContent {
        &self.home
    }

    /// Returns the sign-up form state.
    #[must_use]
    pub fn registration(&self) -> &RegistrationState {
        &self.registration
    }

    /// Applies the persisted language preference, if any, and returns the
    /// resulting language.
    ///
    /// An unrecognised stored value or unreadable storage is ignored.
    pub async fn restore_locale(&mut self) -> Locale {
        match self.storage.load(LOCALE_STORAGE_KEY).await {
            Ok(Some(stored)) => match stored.parse::<Locale>() {
                Ok(locale) => self.gateway = self.gateway.with_locale(locale),
                Err(error) => warn!(value = %stored, error = %error, "ignoring stored locale"),
            },
            Ok(None) => {}
            Err(error) => {
                warn!(error = %error, "locale storage unreadable; keeping current language");
                if let Err(error) = self.storage.remove(LOCALE_STORAGE_KEY).await {
                    warn!(error = %error, "failed to discard stored locale");
                }
            }
        }

        self.locale()
    }

    /// Switches and persists the interface language.
    pub async fn set_locale(&mut self, locale: Locale) -> AppResult<()> {
        self.storage
            .save(LOCALE_STORAGE_KEY, locale.as_str())
            .await?;
        self.gateway = self.gateway.with_locale(locale);
        info!(locale = %locale, "interface language changed");
        Ok(())
    }

    /// Loads every home page section concurrently; each section settles as
    /// soon as its own request resolves.
    pub async fn fetch_home(&mut self) {
        let locale = self.locale();
        let api = WebsiteApi::new(self.gateway.clone());
        let home = &mut self.home;
        let (packages, features, lessons, testimonials) = tokio::join!(
            home.packages.load(api.packages(), locale),
            home.features.load(api.features(), locale),
            home.lessons.load(api.lessons(), locale),
            home.testimonials.load(api.testimonials(), locale),
        );

        let failures = [
            ("packages", packages),
            ("features", features),
            ("lessons", lessons),
            ("testimonials", testimonials),
        ];
        for (section, failure) in failures {
            if let Some(error) = failure {
                warn!(section, error = %error, "home section failed to load");
            }
        }
    }

    /// Validates and sends the sign-up form.
    ///
    /// Failures are recorded on [`WebsiteStore::registration`] and returned.
    /// A submit while another is in flight is ignored.
    pub async fn submit_registration(
        &mut self,
        form: &RegistrationForm,
    ) -> AppResult<CommandOutcome> {
        if self.registration.submitting {
            return Ok(CommandOutcome::Ignored);
        }

        self.registration.submitted = false;
        if let Err(error) = form.validate() {
            self.registration.error = Some(user_facing_message(&error, self.locale()));
            return Err(error);
        }

        self.registration.submitting = true;
        self.registration.error = None;
        let result = WebsiteApi::new(self.gateway.clone()).register(form).await;
        self.registration.submitting = false;

        match result {
            Ok(()) => {
                info!("registration submitted");
                self.registration.submitted = true;
                Ok(CommandOutcome::Completed)
            }
            Err(error) => {
                warn!(error = %error, "registration failed");
                self.registration.error = Some(user_facing_message(&error, self.locale()));
                Err(error)
            }
        }
    }

    /// Clears the sign-up outcome so the form can be filled again.
    pub fn reset_registration(&mut self) {
        self.registration = RegistrationState::default();
    }
}

#[cfg(test)]
mod tests;
