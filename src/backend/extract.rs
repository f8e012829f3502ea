/**
 * Request Extractors
 *
 * `ValidatedJson` deserializes a JSON body and runs its field validation
 * before the handler sees it. Malformed bodies become invalid-argument
 * failures; constraint violations become validation failures.
 */

use axum::extract::{FromRequest, Json, Request};
use serde::de::DeserializeOwned;

use crate::backend::error::FailureEvent;
use crate::shared::error::Validate;

/// JSON body that has passed [`Validate::validate`]
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = FailureEvent;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        value.validate()?;
        Ok(Self(value))
    }
}
