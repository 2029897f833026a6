// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

mod api;
mod i18n;
mod logging;
mod storage;

pub use api::{ApiConfig, ApiConfigLayer, DEFAULT_BASE_URL, DEFAULT_MAX_RETRIES, DEFAULT_TIMEOUT_SECS};
pub use i18n::{BundleLocation, I18nConfig, I18nConfigLayer};
pub use logging::{LoggingConfig, LoggingConfigLayer, DEFAULT_LOG_LEVEL};
pub use storage::{StorageConfig, StorageConfigLayer};
