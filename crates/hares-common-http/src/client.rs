// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! `reqwest` clients preconfigured for talking to the back office.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Client, ClientBuilder};

/// Connect timeout applied to every client; request timeouts are set by callers.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Client builder carrying the Hares User-Agent, a JSON `Accept` header and
/// the connect timeout. Callers add a request timeout before building.
pub fn builder() -> ClientBuilder {
	let mut headers = HeaderMap::new();
	headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

	Client::builder()
		.user_agent(user_agent())
		.default_headers(headers)
		.connect_timeout(CONNECT_TIMEOUT)
}

pub fn new_client() -> reqwest::Result<Client> {
	builder().build()
}

pub fn new_client_with_timeout(timeout: Duration) -> reqwest::Result<Client> {
	builder().timeout(timeout).build()
}

/// `hares/<version> (<os>; <arch>)`
pub fn user_agent() -> String {
	format!(
		"hares/{} ({}; {})",
		env!("CARGO_PKG_VERSION"),
		std::env::consts::OS,
		std::env::consts::ARCH
	)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_user_agent_names_product_and_platform() {
		let ua = user_agent();
		let (product, platform) = ua.split_once(' ').unwrap();
		assert_eq!(product, format!("hares/{}", env!("CARGO_PKG_VERSION")));
		assert!(platform.starts_with('(') && platform.ends_with(')'));
		assert!(platform.contains(std::env::consts::OS));
	}

	#[test]
	fn test_clients_build() {
		assert!(new_client().is_ok());
		assert!(new_client_with_timeout(Duration::from_secs(5)).is_ok());
	}
}
