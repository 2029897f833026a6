// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Durable client-side key-value storage.
//!
//! The front end keeps a handful of small string values across sessions: the
//! chosen locale, the auth token and the serialized current user. This crate
//! provides the [`KeyValueStore`] seam plus two implementations:
//!
//! - [`MemoryStore`]: process-local, used in tests and ephemeral sessions
//! - [`FileStore`]: a single JSON object on disk, written atomically

mod error;
mod store;

pub use error::StorageError;
pub use store::{FileStore, KeyValueStore, MemoryStore, SharedStore};
