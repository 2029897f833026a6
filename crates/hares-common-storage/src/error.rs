// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),

	#[error("corrupt store file {path}: {source}")]
	Corrupt {
		path: PathBuf,
		#[source]
		source: serde_json::Error,
	},

	#[error("serialization error: {0}")]
	Serialization(#[from] serde_json::Error),

	#[error("could not determine data directory")]
	NoDataDir,
}
