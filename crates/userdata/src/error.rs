//! Error types for registration, configuration and optimization.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised synchronously by registry and configuration calls.
///
/// A failed lookup is not an error; resolution reports it as `None`.
#[derive(Debug, Error)]
pub enum InteropError {
	/// The process-wide default cannot itself be [`AccessMode::Default`](crate::AccessMode::Default).
	#[error("the default access mode cannot be set to 'default'")]
	InvalidDefaultMode,

	/// More than one default access mode was declared for one type.
	#[error("type '{type_name}' has {count} declared access modes, at most one is allowed")]
	ConflictingDeclarations {
		/// Name of the offending host type.
		type_name: &'static str,
		/// Number of declarations found.
		count: usize,
	},

	/// Configuration text could not be parsed.
	#[error("invalid interop configuration: {0}")]
	Config(#[from] toml::de::Error),

	/// Configuration file could not be read.
	#[error("I/O error reading {path}: {error}")]
	Io {
		/// Path to the file that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},
}

/// Failure of one descriptor optimization pass.
///
/// Contained to the pass: the descriptor stays registered and usable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptimizeError {
	/// The member surface reported an error while precomputing.
	#[error("optimizing '{type_name}' failed: {reason}")]
	Failed {
		type_name: &'static str,
		reason: String,
	},

	/// The member surface panicked while precomputing.
	#[error("optimizing '{type_name}' panicked: {message}")]
	Panicked {
		type_name: &'static str,
		message: String,
	},
}

/// Result type for registry operations.
pub type Result<T> = std::result::Result<T, InteropError>;
