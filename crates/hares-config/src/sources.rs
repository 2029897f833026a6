// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sources: built-in defaults, TOML files and environment variables.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::error::ConfigError;
use crate::layer::HaresConfigLayer;
use crate::sections::{ApiConfigLayer, I18nConfigLayer, LoggingConfigLayer, StorageConfigLayer};

/// Source precedence levels (higher = overrides lower).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
	Defaults = 10,
	ConfigFile = 20,
	Environment = 50,
}

pub trait ConfigSource: Send + Sync {
	fn name(&self) -> &'static str;
	fn precedence(&self) -> Precedence;
	fn load(&self) -> Result<HaresConfigLayer, ConfigError>;
}

pub struct DefaultsSource;

impl ConfigSource for DefaultsSource {
	fn name(&self) -> &'static str {
		"defaults"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Defaults
	}

	fn load(&self) -> Result<HaresConfigLayer, ConfigError> {
		debug!("loading defaults");
		Ok(HaresConfigLayer::default())
	}
}

/// TOML file configuration source. A missing file is an empty layer.
pub struct TomlSource {
	path: PathBuf,
}

impl TomlSource {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	/// `$XDG_CONFIG_HOME/hares/config.toml`
	pub fn user() -> Result<Self, ConfigError> {
		let dir = dirs::config_dir().ok_or(ConfigError::ConfigDirNotFound)?;
		Ok(Self::new(dir.join("hares").join("config.toml")))
	}

	pub fn path(&self) -> &Path {
		&self.path
	}
}

impl ConfigSource for TomlSource {
	fn name(&self) -> &'static str {
		"toml-config"
	}

	fn precedence(&self) -> Precedence {
		Precedence::ConfigFile
	}

	fn load(&self) -> Result<HaresConfigLayer, ConfigError> {
		if !self.path.exists() {
			debug!(path = %self.path.display(), "config file not found, skipping");
			return Ok(HaresConfigLayer::default());
		}

		debug!(path = %self.path.display(), "loading config file");
		let content = std::fs::read_to_string(&self.path).map_err(|e| ConfigError::FileRead {
			path: self.path.clone(),
			source: e,
		})?;

		let layer: HaresConfigLayer =
			toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
				path: self.path.clone(),
				source: e,
			})?;

		trace!("parsed config layer from TOML");
		Ok(layer)
	}
}

/// Environment variable source.
///
/// Convention: `HARES_<SECTION>_<FIELD>`. Empty values count as unset.
#[derive(Default)]
pub struct EnvSource {
	vars: Option<HashMap<String, String>>,
}

impl EnvSource {
	/// Reads the process environment.
	pub fn new() -> Self {
		Self::default()
	}

	/// Reads from a fixed set of variables instead of the process environment.
	pub fn from_vars<I, K, V>(vars: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<String>,
	{
		Self {
			vars: Some(vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect()),
		}
	}

	fn var(&self, name: &str) -> Option<String> {
		let value = match &self.vars {
			Some(vars) => vars.get(name).cloned(),
			None => std::env::var(name).ok(),
		};
		value.filter(|s| !s.is_empty())
	}

	fn bool(&self, name: &str) -> Result<Option<bool>, ConfigError> {
		match self.var(name) {
			Some(v) => match v.to_ascii_lowercase().as_str() {
				"1" | "true" | "yes" => Ok(Some(true)),
				"0" | "false" | "no" => Ok(Some(false)),
				_ => Err(ConfigError::invalid_value(name, format!("invalid bool value '{v}'"))),
			},
			None => Ok(None),
		}
	}

	fn parse<T: std::str::FromStr>(&self, name: &str, kind: &str) -> Result<Option<T>, ConfigError> {
		match self.var(name) {
			Some(v) => v
				.parse()
				.map(Some)
				.map_err(|_| ConfigError::invalid_value(name, format!("invalid {kind} value '{v}'"))),
			None => Ok(None),
		}
	}

	fn api(&self) -> Result<ApiConfigLayer, ConfigError> {
		Ok(ApiConfigLayer {
			base_url: self.var("HARES_API_BASE_URL"),
			timeout_secs: self.parse("HARES_API_TIMEOUT_SECS", "u64")?,
			max_retries: self.parse("HARES_API_MAX_RETRIES", "u32")?,
		})
	}

	fn i18n(&self) -> I18nConfigLayer {
		I18nConfigLayer {
			bundle_dir: self.var("HARES_I18N_BUNDLE_DIR").map(PathBuf::from),
			page_url: self.var("HARES_I18N_PAGE_URL"),
			language: self.var("HARES_LANGUAGE"),
		}
	}

	fn storage(&self) -> StorageConfigLayer {
		StorageConfigLayer {
			path: self.var("HARES_STORAGE_PATH").map(PathBuf::from),
		}
	}

	fn logging(&self) -> Result<LoggingConfigLayer, ConfigError> {
		Ok(LoggingConfigLayer {
			level: self.var("HARES_LOG_LEVEL"),
			json: self.bool("HARES_LOG_JSON")?,
		})
	}
}

impl ConfigSource for EnvSource {
	fn name(&self) -> &'static str {
		"environment"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Environment
	}

	fn load(&self) -> Result<HaresConfigLayer, ConfigError> {
		debug!("loading environment variables");
		Ok(HaresConfigLayer {
			api: Some(self.api()?),
			i18n: Some(self.i18n()),
			storage: Some(self.storage()),
			logging: Some(self.logging()?),
		})
	}
}
