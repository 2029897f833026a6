// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Auth token and current user, persisted in the shared key-value store.

use hares_common_storage::SharedStore;
use tracing::{debug, info, warn};

use crate::error::{ApiError, Result};
use crate::models::User;

pub const TOKEN_KEY: &str = "token";
pub const USER_KEY: &str = "user";

/// Where unauthenticated visitors are sent, relative to a page under `pages/`.
pub const LOGIN_PAGE: &str = "../index.html";

#[derive(Clone)]
pub struct Session {
	store: SharedStore,
}

impl Session {
	pub fn new(store: SharedStore) -> Self {
		Self { store }
	}

	pub fn save_auth_data(&self, token: &str, user: &User) -> Result<()> {
		let user_json = serde_json::to_string(user)?;
		self.store.set(TOKEN_KEY, token)?;
		self.store.set(USER_KEY, &user_json)?;
		info!(user_id = %user.id, role = %user.role_name, "saved auth data");
		Ok(())
	}

	/// Removes the token and user. Storage failures are logged only.
	pub fn clear_auth_data(&self) {
		for key in [TOKEN_KEY, USER_KEY] {
			if let Err(e) = self.store.remove(key) {
				warn!(key, error = %e, "failed to clear auth data");
			}
		}
		debug!("cleared auth data");
	}

	pub fn token(&self) -> Option<String> {
		match self.store.get(TOKEN_KEY) {
			Ok(token) => token.filter(|t| !t.is_empty()),
			Err(e) => {
				warn!(error = %e, "failed to read auth token");
				None
			}
		}
	}

	/// The stored user; unreadable or malformed entries count as absent.
	pub fn current_user(&self) -> Option<User> {
		let raw = match self.store.get(USER_KEY) {
			Ok(raw) => raw?,
			Err(e) => {
				warn!(error = %e, "failed to read stored user");
				return None;
			}
		};

		match serde_json::from_str(&raw) {
			Ok(user) => Some(user),
			Err(e) => {
				warn!(error = %e, "stored user is malformed");
				None
			}
		}
	}

	pub fn is_authenticated(&self) -> bool {
		self.token().is_some()
	}

	/// Fails with [`ApiError::NotAuthenticated`] when no token is stored; the
	/// caller should then navigate to [`LOGIN_PAGE`].
	pub fn require_auth(&self) -> Result<()> {
		if self.is_authenticated() {
			Ok(())
		} else {
			Err(ApiError::NotAuthenticated)
		}
	}
}

impl std::fmt::Debug for Session {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Session")
			.field("authenticated", &self.is_authenticated())
			.finish()
	}
}
