// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for the back office API client.

use hares_common_http::RetryableError;
use hares_common_storage::StorageError;
use thiserror::Error;

/// Message used when an error response carries none.
pub const DEFAULT_ERROR_MESSAGE: &str = "Request failed";

#[derive(Debug, Error)]
pub enum ApiError {
	/// Base URL is missing or cannot be joined with an endpoint.
	#[error("invalid API URL: {0}")]
	InvalidUrl(#[from] url::ParseError),

	/// HTTP request failed before a response arrived.
	#[error("HTTP request failed: {0}")]
	RequestFailed(#[from] reqwest::Error),

	/// The server rejected the stored token; auth data has been cleared.
	#[error("unauthorized")]
	Unauthorized,

	/// No token is stored.
	#[error("not authenticated")]
	NotAuthenticated,

	/// Server returned a non-success status.
	#[error("server error ({status}): {message}")]
	Server { status: u16, message: String },

	/// Response body did not match the expected shape.
	#[error("failed to decode response: {0}")]
	Decode(#[from] serde_json::Error),

	#[error("session storage error: {0}")]
	Storage(#[from] StorageError),
}

impl ApiError {
	pub fn status(&self) -> Option<u16> {
		match self {
			ApiError::Unauthorized => Some(401),
			ApiError::Server { status, .. } => Some(*status),
			ApiError::RequestFailed(e) => e.status().map(|s| s.as_u16()),
			_ => None,
		}
	}
}

impl RetryableError for ApiError {
	fn is_retryable(&self) -> bool {
		match self {
			ApiError::RequestFailed(e) => e.is_retryable(),
			ApiError::Server { status, .. } => {
				matches!(*status, 429 | 408 | 500 | 502 | 503 | 504)
			}
			_ => false,
		}
	}
}

pub type Result<T> = std::result::Result<T, ApiError>;
