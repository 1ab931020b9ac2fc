use axum::{
    body::Body,
    extract::{rejection::JsonRejection, FromRequest, Request},
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;

use crate::core::error::AppError;

/// JSON request body whose rejections are rendered as `AppError::BadRequest`
pub struct AppJson<T>(pub T);

impl<T, S> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppJsonRejection;

    async fn from_request(req: Request<Body>, state: &S) -> Result<Self, Self::Rejection> {
        Json::<T>::from_request(req, state)
            .await
            .map(|Json(body)| Self(body))
            .map_err(|rejection| AppJsonRejection {
                body: body_name::<T>(),
                rejection,
            })
    }
}

/// Last path segment of the body type, e.g. `ReportInput`
fn body_name<T>() -> &'static str {
    let full = std::any::type_name::<T>();
    full.rsplit("::").next().unwrap_or(full)
}

pub struct AppJsonRejection {
    body: &'static str,
    rejection: JsonRejection,
}

impl AppJsonRejection {
    fn message(&self) -> String {
        match &self.rejection {
            JsonRejection::JsonDataError(err) => {
                format!("{} body has unexpected data: {}", self.body, err.body_text())
            }
            JsonRejection::JsonSyntaxError(err) => {
                format!("{} body is not valid JSON: {}", self.body, err.body_text())
            }
            JsonRejection::MissingJsonContentType(_) => {
                format!("{} body must be sent as application/json", self.body)
            }
            _ => format!("{} body could not be read", self.body),
        }
    }
}

impl IntoResponse for AppJsonRejection {
    fn into_response(self) -> Response {
        AppError::BadRequest(self.message()).into_response()
    }
}
