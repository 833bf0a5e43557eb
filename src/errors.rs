use actix_web::{http::StatusCode, HttpResponse};
use derive_more::Display;

#[derive(Debug, Display, PartialEq, Eq)]
pub enum ServerError {
    InvalidCsrf,
    PayloadTooLarge,
    #[display(fmt = "Invalid Request: {}", _0)]
    UserError(Fields),
    DieselError,
    EnvironmentError,
    R2D2Error,
    BlockingError,
    TemplateError,
    JWTError,
}

#[derive(Debug, Display, PartialEq, Eq)]
pub enum Fields {
    #[display(fmt = "id: {}", _0)]
    Id(CommonError),
    #[display(fmt = "title: {}", _0)]
    Title(CommonError),
    #[display(fmt = "body: {}", _0)]
    Body(CommonError),
    #[display(fmt = "x: {}", _0)]
    X(CommonError),
    #[display(fmt = "y: {}", _0)]
    Y(CommonError),
}

#[derive(Debug, Display, PartialEq, Eq)]
pub enum CommonError {
    #[display(fmt = "required")]
    Missing,
    #[display(fmt = "not an integer")]
    NotAnInteger,
}

impl From<r2d2::Error> for ServerError {
    fn from(e: r2d2::Error) -> ServerError {
        log::error!("{e}");
        ServerError::R2D2Error
    }
}

impl From<diesel::result::Error> for ServerError {
    fn from(e: diesel::result::Error) -> ServerError {
        log::error!("{e}");
        ServerError::DieselError
    }
}

impl From<actix_web::error::BlockingError> for ServerError {
    fn from(e: actix_web::error::BlockingError) -> ServerError {
        log::error!("{e}");
        ServerError::BlockingError
    }
}

impl From<tera::Error> for ServerError {
    fn from(e: tera::Error) -> ServerError {
        log::error!("{e:?}");
        ServerError::TemplateError
    }
}

impl From<jsonwebtoken::errors::Error> for ServerError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        log::error!("{e}");
        ServerError::JWTError
    }
}

impl actix_web::error::ResponseError for ServerError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServerError::InvalidCsrf => StatusCode::FORBIDDEN,
            ServerError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ServerError::UserError(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            ServerError::InvalidCsrf => HttpResponse::Forbidden().body("Invalid CSRF"),
            ServerError::PayloadTooLarge => {
                HttpResponse::PayloadTooLarge().body("Invalid Request: form body is too large")
            }
            ServerError::UserError(_) => HttpResponse::BadRequest().body(self.to_string()),
            ServerError::DieselError => {
                HttpResponse::InternalServerError().body("Library Error: Diesel Error.")
            }
            ServerError::EnvironmentError => HttpResponse::InternalServerError()
                .body("Server Error: Use of an uninitialized environment variable."),
            ServerError::R2D2Error => {
                HttpResponse::InternalServerError().body("Server Error: Pooling Error.")
            }
            ServerError::BlockingError => {
                HttpResponse::InternalServerError().body("Server Error: Worker Pool Error.")
            }
            ServerError::TemplateError => {
                HttpResponse::InternalServerError().body("Library Error: Template Error.")
            }
            ServerError::JWTError => {
                HttpResponse::InternalServerError().body("Library Error: JWT Library Malfunctioned")
            }
        }
    }
}
