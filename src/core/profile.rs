//! Profile business logic.
//!
//! A profile is saved as a whole: the stored row is replaced by the submitted,
//! already validated values, or created when the id is new.

use crate::{
    entities::{Profile, profile},
    errors::Result,
    validation::ValidatedProfile,
};
use sea_orm::{Set, prelude::*};
use tracing::{debug, instrument};

/// Result of [`save_profile`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedProfile {
    pub profile: profile::Model,
    /// `true` when no profile existed with this id
    pub created: bool,
}

pub async fn get_profile_by_id(
    db: &DatabaseConnection,
    profile_id: i64,
) -> Result<Option<profile::Model>> {
    Profile::find_by_id(profile_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Stores a validated profile, updating the existing row or inserting a new one.
///
/// # Errors
/// Returns an error if the database operation fails.
#[instrument(skip(db, input), fields(id = input.id))]
pub async fn save_profile(db: &DatabaseConnection, input: &ValidatedProfile) -> Result<SavedProfile> {
    let now = chrono::Utc::now().naive_utc();

    if let Some(existing) = Profile::find_by_id(input.id).one(db).await? {
        let mut profile: profile::ActiveModel = existing.into();
        profile.first_name = Set(input.first_name.clone());
        profile.last_name = Set(input.last_name.clone());
        profile.ci = Set(input.national_id.clone());
        profile.email = Set(input.email.clone());
        profile.phone = Set(input.phone.clone());
        profile.updated_at = Set(now);

        let profile = profile.update(db).await?;
        debug!("Profile updated");
        return Ok(SavedProfile {
            profile,
            created: false,
        });
    }

    let profile = profile::ActiveModel {
        id: Set(input.id),
        first_name: Set(input.first_name.clone()),
        last_name: Set(input.last_name.clone()),
        ci: Set(input.national_id.clone()),
        email: Set(input.email.clone()),
        phone: Set(input.phone.clone()),
        created_at: Set(now),
        updated_at: Set(now),
    };
    let profile = profile.insert(db).await?;
    debug!("Profile created");
    Ok(SavedProfile {
        profile,
        created: true,
    })
}
