use anyhow::anyhow;
use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use reportcard_core::AppError;
use reportcard_models::RequiredFields;
use serde::de::DeserializeOwned;
use validator::Validate;

/// JSON body whose required fields are present and non-empty.
///
/// Any missing, empty or mistyped required field is rejected with `400` and
/// the request type's `Missing required fields: ...` message.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate + RequiredFields,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| match rejection {
                JsonRejection::MissingJsonContentType(_) => AppError::bad_request(anyhow!(
                    "Missing 'Content-Type: application/json' header"
                )),
                JsonRejection::JsonDataError(_) => {
                    AppError::bad_request(anyhow!(T::missing_fields_message()))
                }
                _ => AppError::bad_request(anyhow!("Invalid request body")),
            })?;

        value
            .validate()
            .map_err(|_| AppError::bad_request(anyhow!(T::missing_fields_message())))?;

        Ok(ValidatedJson(value))
    }
}
