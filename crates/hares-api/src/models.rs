// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Wire types for the back office API.
//!
//! Only the fields the front end reads are typed; everything else the server
//! sends is kept in `extra` so nothing is lost on a round trip.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// Role name with access to every page.
pub const ROLE_SUPER_ADMIN: &str = "Super Admin";
/// Role name for institution-level users.
pub const ROLE_INSTITUTION: &str = "Institution";

/// Entity identifier. The API sends numbers or strings; both are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id(String);

impl Id {
	pub fn new(id: impl Into<String>) -> Self {
		Self(id.into())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for Id {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<&str> for Id {
	fn from(s: &str) -> Self {
		Self::new(s)
	}
}

impl From<String> for Id {
	fn from(s: String) -> Self {
		Self(s)
	}
}

impl From<u64> for Id {
	fn from(n: u64) -> Self {
		Self(n.to_string())
	}
}

impl Serialize for Id {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		match self.0.parse::<u64>() {
			Ok(n) if n.to_string() == self.0 => serializer.serialize_u64(n),
			_ => serializer.serialize_str(&self.0),
		}
	}
}

impl<'de> Deserialize<'de> for Id {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		#[derive(Deserialize)]
		#[serde(untagged)]
		enum Raw {
			Number(serde_json::Number),
			Text(String),
		}

		Ok(match Raw::deserialize(deserializer)? {
			Raw::Number(n) => Id(n.to_string()),
			Raw::Text(s) => Id(s),
		})
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
	pub id: Id,
	pub name: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub email: Option<String>,
	#[serde(default)]
	pub role_name: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub institution_id: Option<Id>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub branch_id: Option<Id>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub can_create_branches: Option<bool>,
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

impl User {
	pub fn is_super_admin(&self) -> bool {
		self.role_name == ROLE_SUPER_ADMIN
	}

	pub fn is_institution(&self) -> bool {
		self.role_name == ROLE_INSTITUTION
	}

	/// Institution users may create branches unless explicitly denied.
	pub fn may_manage_branches(&self) -> bool {
		self.is_super_admin() || (self.is_institution() && self.can_create_branches != Some(false))
	}

	pub fn may_manage_users(&self) -> bool {
		self.is_super_admin() || self.is_institution()
	}

	/// Upper-cased first character of the name, for avatars.
	pub fn initial(&self) -> String {
		self.name
			.chars()
			.next()
			.map(|c| c.to_uppercase().collect())
			.unwrap_or_default()
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Institution {
	pub id: Id,
	pub name: String,
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

/// Institution summary embedded in branch responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstitutionRef {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub id: Option<Id>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Branch {
	pub id: Id,
	pub name: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub institution_id: Option<Id>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub institution: Option<InstitutionRef>,
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

impl Branch {
	pub fn institution_name(&self) -> Option<&str> {
		self.institution.as_ref()?.name.as_deref()
	}
}

#[derive(Clone, Serialize)]
pub struct Credentials {
	pub email: String,
	pub password: String,
}

impl std::fmt::Debug for Credentials {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Credentials")
			.field("email", &self.email)
			.field("password", &"[REDACTED]")
			.finish()
	}
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoginResponse {
	#[serde(alias = "access_token", alias = "accessToken")]
	pub token: String,
	pub user: User,
}

/// `page`/`limit` query for list endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
	pub page: u32,
	pub limit: u32,
}

impl PageRequest {
	pub fn new(page: u32, limit: u32) -> Self {
		Self { page, limit }
	}

	pub(crate) fn query(&self) -> [(&'static str, String); 2] {
		[("page", self.page.to_string()), ("limit", self.limit.to_string())]
	}
}

impl Default for PageRequest {
	fn default() -> Self {
		Self { page: 1, limit: 10 }
	}
}

/// Loan lifecycle status used in path segments and status updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoanStatus {
	Pending,
	Approved,
	Active,
	Completed,
	Defaulted,
	Rejected,
}

impl LoanStatus {
	pub fn as_str(&self) -> &'static str {
		match self {
			LoanStatus::Pending => "pending",
			LoanStatus::Approved => "approved",
			LoanStatus::Active => "active",
			LoanStatus::Completed => "completed",
			LoanStatus::Defaulted => "defaulted",
			LoanStatus::Rejected => "rejected",
		}
	}
}

impl fmt::Display for LoanStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}
