//! Profile page: pre-fill from the stored profile, edit, validate, submit.

use super::{Notice, Outcome, failure_text};
use crate::{
    client::{ApiClient, SubmitKind},
    config::AppConfig,
    validation::{FieldErrors, ProfileForm},
};
use tracing::{error, instrument, warn};

/// State of the profile form.
#[derive(Debug)]
pub struct ProfileEditor {
    client: ApiClient,
    form: ProfileForm,
    errors: FieldErrors,
    notices: Vec<Notice>,
    loading: bool,
}

impl ProfileEditor {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            form: ProfileForm::default(),
            errors: FieldErrors::new(),
            notices: Vec::new(),
            loading: false,
        }
    }

    /// An editor talking to the configured API.
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(ApiClient::from_config(&config.client))
    }

    #[must_use]
    pub const fn form(&self) -> &ProfileForm {
        &self.form
    }

    /// Per-field errors of the last submit.
    #[must_use]
    pub const fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    #[must_use]
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Changes one field by its form name. Returns `false` for unknown names.
    ///
    /// The id is not editable here: it belongs to the signed-in user.
    pub fn set_field(&mut self, name: &str, value: impl Into<String>) -> bool {
        let slot = match name {
            "first_name" => &mut self.form.first_name,
            "last_name" => &mut self.form.last_name,
            "ci" => &mut self.form.ci,
            "email" => &mut self.form.email,
            "phone" => &mut self.form.phone,
            _ => {
                warn!("Ignoring change to unknown profile field {name:?}");
                return false;
            }
        };
        *slot = value.into();
        true
    }

    /// Pre-fills the form with the stored profile of user `profile_id`.
    ///
    /// When no profile is stored yet, the form starts empty with only the id set.
    #[instrument(skip(self))]
    pub async fn load(&mut self, profile_id: i64) -> Outcome<bool> {
        self.loading = true;
        let outcome = match self.client.get_profile(profile_id).await {
            Ok(Some(profile)) => {
                self.form = ProfileForm {
                    id: profile.id.to_string(),
                    first_name: profile.first_name,
                    last_name: profile.last_name,
                    ci: profile.ci,
                    email: profile.email,
                    phone: profile.phone,
                };
                Outcome::Done(true)
            }
            Ok(None) => {
                self.form = ProfileForm {
                    id: profile_id.to_string(),
                    ..ProfileForm::default()
                };
                Outcome::Done(false)
            }
            Err(err) => {
                error!("Failed to load profile {profile_id}: {err}");
                self.notices.push(Notice::error(failure_text(&err)));
                Outcome::Failed(err)
            }
        };
        self.loading = false;
        outcome
    }

    /// Validates the form and, when it passes, sends it.
    #[instrument(skip(self))]
    pub async fn submit(&mut self) -> Outcome<SubmitKind> {
        self.errors = FieldErrors::new();
        let profile = match self.form.validate() {
            Ok(profile) => profile,
            Err(errors) => {
                self.errors = errors.clone();
                self.notices
                    .push(Notice::error("Check the fields with errors"));
                return Outcome::Invalid(errors);
            }
        };

        self.loading = true;
        let outcome = match self.client.submit_profile(&profile).await {
            Ok(submitted) => {
                self.notices.push(Notice::success("Profile updated"));
                Outcome::Done(submitted.kind)
            }
            Err(err) => {
                error!("Failed to update profile: {err}");
                self.notices.push(Notice::error(failure_text(&err)));
                Outcome::Failed(err)
            }
        };
        self.loading = false;
        outcome
    }
}
