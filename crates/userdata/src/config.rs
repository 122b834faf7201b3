//! Interop configuration loaded from TOML.
//!
//! ```toml
//! default_access_mode = "eager"
//!
//! [declared]
//! "my_app::Matrix" = "background"
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::access_mode::AccessMode;
use crate::error::{InteropError, Result};

/// Embedder configuration for a [`Registry`](crate::Registry).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InteropConfig {
	/// Replaces the registry default when set.
	pub default_access_mode: Option<AccessMode>,
	/// Declared modes keyed by host type name.
	pub declared: BTreeMap<String, AccessMode>,
}

impl InteropConfig {
	pub fn from_toml_str(text: &str) -> Result<Self> {
		Ok(toml::from_str(text)?)
	}

	pub fn load(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		let text = std::fs::read_to_string(path).map_err(|error| InteropError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		Self::from_toml_str(&text)
	}
}

#[cfg(test)]
mod tests {
	use std::io::Write;

	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn parses_modes_and_declarations() {
		let config = InteropConfig::from_toml_str(
			r#"
default_access_mode = "eager"

[declared]
"app::Matrix" = "background"
"app::Handle" = "hide-members"
"app::Slow" = "background-precomputed"
"#,
		)
		.unwrap();

		assert_eq!(config.default_access_mode, Some(AccessMode::Eager));
		assert_eq!(
			config.declared,
			BTreeMap::from([
				("app::Handle".to_owned(), AccessMode::HideMembers),
				("app::Matrix".to_owned(), AccessMode::BackgroundPrecomputed),
				("app::Slow".to_owned(), AccessMode::BackgroundPrecomputed),
			])
		);
	}

	#[test]
	fn empty_config_is_default() {
		assert_eq!(InteropConfig::from_toml_str("").unwrap(), InteropConfig::default());
	}

	#[test]
	fn rejects_unknown_modes_and_keys() {
		assert!(matches!(
			InteropConfig::from_toml_str(r#"default_access_mode = "sometimes""#),
			Err(InteropError::Config(_))
		));
		assert!(matches!(InteropConfig::from_toml_str("verbose = true"), Err(InteropError::Config(_))));
	}

	#[test]
	fn loads_from_file() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(file, r#"default_access_mode = "lazy""#).unwrap();

		let config = InteropConfig::load(file.path()).unwrap();
		assert_eq!(config.default_access_mode, Some(AccessMode::Lazy));

		let missing = file.path().with_extension("missing");
		assert!(matches!(InteropConfig::load(&missing), Err(InteropError::Io { .. })));
	}
}
