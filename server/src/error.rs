use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use system::serde_json::json;
use system::RoomId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdminError {
    #[error("Server loop is not running")]
    ServerUnavailable,

    #[error("Server loop dropped the reply")]
    ReplyDropped,

    #[error("Room not found: {0}")]
    RoomNotFound(RoomId),
}

impl ResponseError for AdminError {
    fn status_code(&self) -> StatusCode {
        match self {
            AdminError::ServerUnavailable | AdminError::ReplyDropped => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            AdminError::RoomNotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .json(json!({ "error": self.to_string() }))
    }
}
