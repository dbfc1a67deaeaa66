use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use tracing::error;

use crate::domain::DomainError;

/// `{"message": "..."}`, the body of every error and of bare acknowledgements.
#[derive(Debug, Serialize)]
pub struct MessageBody<'a> {
    pub message: &'a str,
}

impl ResponseError for DomainError {
    fn status_code(&self) -> StatusCode {
        match self {
            DomainError::Validation(_)
            | DomainError::Conflict(_)
            | DomainError::InvalidCredentials(_) => StatusCode::BAD_REQUEST,
            DomainError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            DomainError::NotFound(_) => StatusCode::NOT_FOUND,
            DomainError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            // Store errors stay in the log; clients only learn that something broke.
            DomainError::Store(e) => {
                error!(error = %format!("{:#}", e), "request failed in the store");
                "Server error".to_string()
            }
            other => other.to_string(),
        };

        HttpResponse::build(self.status_code()).json(MessageBody { message: &message })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use rstest::rstest;

    #[rstest]
    #[case(DomainError::validation("x"), StatusCode::BAD_REQUEST)]
    #[case(DomainError::conflict("x"), StatusCode::BAD_REQUEST)]
    #[case(DomainError::InvalidCredentials("x".into()), StatusCode::BAD_REQUEST)]
    #[case(DomainError::unauthorized("x"), StatusCode::UNAUTHORIZED)]
    #[case(DomainError::not_found("x"), StatusCode::NOT_FOUND)]
    #[case(DomainError::Store(anyhow::anyhow!("x")), StatusCode::INTERNAL_SERVER_ERROR)]
    fn status_mapping(#[case] err: DomainError, #[case] expected: StatusCode) {
        assert_eq!(err.status_code(), expected);
    }

    #[actix_web::test]
    async fn store_errors_do_not_leak_details() {
        let err = DomainError::Store(anyhow::anyhow!("connection refused: 10.0.0.7:27017"));

        let body = to_bytes(err.error_response().into_body()).await.unwrap();

        assert_eq!(body, r#"{"message":"Server error"}"#);
    }

    #[actix_web::test]
    async fn client_errors_carry_their_message() {
        let err = DomainError::not_found("Room not found");

        let body = to_bytes(err.error_response().into_body()).await.unwrap();

        assert_eq!(body, r#"{"message":"Room not found"}"#);
    }
}
