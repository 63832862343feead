//! Request extractors
//!
//! [`ValidJson`] behaves like `axum::Json` but reports rejections through the
//! unified [`AppError`] body instead of axum's plain-text responses.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use shared::error::{AppError, ErrorCode};

/// JSON body extractor with `AppError` rejections (400)
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidJson<T>
where
    axum::Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match axum::Json::<T>::from_request(req, state).await {
            Ok(axum::Json(value)) => Ok(ValidJson(value)),
            Err(rejection) => {
                let code = match rejection {
                    JsonRejection::JsonDataError(_) => ErrorCode::InvalidFormat,
                    _ => ErrorCode::InvalidRequest,
                };
                Err(AppError::with_message(code, rejection.body_text()))
            }
        }
    }
}
