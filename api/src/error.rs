use std::convert::Infallible;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    BoxError, Json,
};
use kakubi_merkle_tree::error::MerkleTreeError;
use kakubi_merkle_verify::AddressParseError;
use kakubi_token::{config::ConfigError, ErrorCode};
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    TokenError(#[from] ErrorCode),

    #[error("Merkle Tree Error: {0}")]
    MerkleTreeError(#[from] MerkleTreeError),

    #[error("Config Error: {0}")]
    ConfigError(#[from] ConfigError),

    #[error("Parse Address Error: {0}")]
    ParseAddressError(#[from] AddressParseError),

    #[error("User {0} not found")]
    UserNotFound(String),

    #[error("Proof not found for user {0}")]
    ProofNotFound(String),

    #[error("io Error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serde Error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Error {
    pub error: String,
}

/// Status for a rejected instruction. The token's own message is passed through.
fn token_error_status(e: &ErrorCode) -> StatusCode {
    match e {
        ErrorCode::InvalidSignature => StatusCode::UNAUTHORIZED,
        ErrorCode::Unauthorized => StatusCode::FORBIDDEN,
        ErrorCode::AlreadyClaimed | ErrorCode::InvalidNonce { .. } => StatusCode::CONFLICT,
        ErrorCode::InvalidProof | ErrorCode::InvalidFee | ErrorCode::ArithmeticError => {
            StatusCode::BAD_REQUEST
        }
        ErrorCode::InsufficientBalance
        | ErrorCode::InsufficientAllowance
        | ErrorCode::InsufficientDistributorFunds => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorCode::SwapAddressNotSet | ErrorCode::NothingToSwap => StatusCode::CONFLICT,
        ErrorCode::SwapFailed(_) => StatusCode::BAD_GATEWAY,
        ErrorCode::SupplyMismatch => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            ApiError::TokenError(e) => {
                warn!("instruction rejected: {e}");
                (token_error_status(e), e.to_string())
            }
            ApiError::ParseAddressError(e) => {
                warn!("Parse address error: {e}");
                (StatusCode::BAD_REQUEST, "Address parse error".to_string())
            }
            ApiError::UserNotFound(u) => {
                warn!("User {u} not found");
                (StatusCode::NOT_FOUND, "User not found".to_string())
            }
            ApiError::ProofNotFound(u) => {
                error!("Proof not found for user {u}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Proof not found".to_string(),
                )
            }
            ApiError::MerkleTreeError(_)
            | ApiError::ConfigError(_)
            | ApiError::IoError(_)
            | ApiError::SerdeError(_) => {
                error!("{self}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
        };
        (
            status,
            Json(Error {
                error: error_message,
            }),
        )
            .into_response()
    }
}

pub async fn handle_error(error: BoxError) -> Result<impl IntoResponse, Infallible> {
    if error.is::<tower::timeout::error::Elapsed>() {
        return Ok((
            StatusCode::REQUEST_TIMEOUT,
            Json(json!({
                "code" : 408,
                "error" : "Request Timeout",
            })),
        ));
    };
    if error.is::<tower::load_shed::error::Overloaded>() {
        return Ok((
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "code" : 503,
                "error" : "Service Unavailable",
            })),
        ));
    }

    Ok((
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "code" : 500,
            "error" : "Internal Server Error",
        })),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_error_statuses() {
        assert_eq!(
            ApiError::from(ErrorCode::Unauthorized)
                .into_response()
                .status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError::from(ErrorCode::AlreadyClaimed)
                .into_response()
                .status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::from(ErrorCode::InvalidProof)
                .into_response()
                .status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(ErrorCode::InsufficientDistributorFunds)
                .into_response()
                .status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ApiError::from(ErrorCode::InvalidSignature)
                .into_response()
                .status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::from(ErrorCode::InvalidNonce {
                expected: 1,
                received: 0
            })
            .into_response()
            .status(),
            StatusCode::CONFLICT
        );
    }
}
