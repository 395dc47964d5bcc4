//! Request extractors.

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::SocialApiError;

/// JSON body that has passed its `validator` rules.
///
/// Rejections are reported as [`SocialApiError`] so every 4xx shares the
/// API's error body.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = SocialApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| SocialApiError::InvalidBody(rejection.body_text()))?;

        value.validate()?;

        Ok(Self(value))
    }
}
