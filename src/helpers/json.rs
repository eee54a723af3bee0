use actix_web::error::{Error, InternalError};
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

/// Envelope every endpoint answers with.
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonResponse<T> {
    pub success: bool,
    pub message: String,
    pub data: Option<T>,
}

pub struct JsonResponseBuilder<T> {
    message: String,
    data: Option<T>,
}

impl<T> Default for JsonResponseBuilder<T> {
    fn default() -> Self {
        Self {
            message: String::new(),
            data: None,
        }
    }
}

impl<T> JsonResponse<T>
where
    T: Serialize,
{
    pub fn build() -> JsonResponseBuilder<T> {
        JsonResponseBuilder::default()
    }
}

fn message_or(message: &str, default: &str) -> String {
    if message.trim().is_empty() {
        default.to_string()
    } else {
        message.to_string()
    }
}

impl<T> JsonResponseBuilder<T>
where
    T: Serialize,
{
    pub fn set_item(mut self, item: T) -> Self {
        self.data = Some(item);
        self
    }

    pub fn set_msg<I: Into<String>>(mut self, message: I) -> Self {
        self.message = message.into();
        self
    }

    fn into_response(self, message: &str, default: &str) -> JsonResponse<T> {
        let message = if self.message.is_empty() {
            message_or(message, default)
        } else {
            self.message
        };

        JsonResponse {
            success: true,
            message,
            data: self.data,
        }
    }

    pub fn ok<I: Into<String>>(self, message: I) -> web::Json<JsonResponse<T>> {
        web::Json(self.into_response(&message.into(), "OK"))
    }

    pub fn created<I: Into<String>>(self, message: I) -> HttpResponse {
        HttpResponse::Created().json(self.into_response(&message.into(), "Created"))
    }

    fn error<I: Into<String>>(self, status: StatusCode, message: I, default: &str) -> Error {
        let body = JsonResponse::<T> {
            success: false,
            message: message_or(&message.into(), default),
            data: self.data,
        };
        InternalError::from_response("", HttpResponse::build(status).json(body)).into()
    }

    pub fn bad_request<I: Into<String>>(self, message: I) -> Error {
        self.error(StatusCode::BAD_REQUEST, message, "Bad request")
    }

    pub fn form_error<I: Into<String>>(self, message: I) -> Error {
        self.error(StatusCode::BAD_REQUEST, message, "Validation error")
    }

    pub fn unauthorized<I: Into<String>>(self, message: I) -> Error {
        self.error(StatusCode::UNAUTHORIZED, message, "Authentication required")
    }

    pub fn forbidden<I: Into<String>>(self, message: I) -> Error {
        self.error(StatusCode::FORBIDDEN, message, "Forbidden")
    }

    pub fn not_found<I: Into<String>>(self, message: I) -> Error {
        self.error(StatusCode::NOT_FOUND, message, "Object not found")
    }

    pub fn internal_server_error<I: Into<String>>(self, message: I) -> Error {
        self.error(StatusCode::INTERNAL_SERVER_ERROR, message, "Internal error")
    }
}
