// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! REST client for the Hares back office API.
//!
//! Every request carries `Content-Type: application/json` and, once signed in,
//! `Authorization: Bearer <token>`. GET requests get a `_t` cache-busting
//! parameter and are retried on transient failures. A `401` from anything but
//! the login endpoint clears the stored session.

mod client;
mod endpoints;
mod error;
mod models;
mod session;

pub use client::{ApiClient, ApiClientBuilder, ClientConfig, DEFAULT_BASE_URL};
pub use endpoints::{
	Auth, Branches, CustomerNotes, Customers, Installments, Institutions, Loans, Products,
	SearchLogs, Users,
};
pub use error::{ApiError, Result, DEFAULT_ERROR_MESSAGE};
pub use models::{
	Branch, Credentials, Id, Institution, InstitutionRef, LoanStatus, LoginResponse, PageRequest,
	User, ROLE_INSTITUTION, ROLE_SUPER_ADMIN,
};
pub use session::{Session, LOGIN_PAGE, TOKEN_KEY, USER_KEY};
