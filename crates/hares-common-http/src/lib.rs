// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Shared HTTP utilities for Hares.
//!
//! This crate provides:
//! - Preconfigured `reqwest` clients (User-Agent, JSON accept, connect timeout)
//! - Retry logic with exponential backoff for transient failures

mod client;
mod retry;

pub use client::{builder, new_client, new_client_with_timeout, user_agent, CONNECT_TIMEOUT};
pub use retry::{is_retryable_status, retry, RetryConfig, RetryableError};
