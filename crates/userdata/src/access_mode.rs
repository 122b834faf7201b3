//! How a descriptor builds its member metadata.

use std::sync::atomic::{AtomicU8, Ordering};

use serde::{Deserialize, Serialize};

use crate::error::{InteropError, Result};

/// Strategy a descriptor uses to build its member metadata.
///
/// Fixed when the descriptor is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AccessMode {
	/// Member metadata is built and cached per member on first access.
	Lazy,
	/// The full member table is built on first member access.
	LazyOptimized,
	/// The full member table is built synchronously at registration.
	Eager,
	/// The full member table is built on a worker; lazy access serves
	/// lookups until it finishes.
	#[serde(alias = "background")]
	BackgroundPrecomputed,
	/// The type is known to scripts but exposes no members.
	HideMembers,
	/// Defer to the type's declared mode, then to the process-wide default.
	#[default]
	Default,
}

impl AccessMode {
	/// Returns the kebab-case name used in configuration and logs.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Lazy => "lazy",
			Self::LazyOptimized => "lazy-optimized",
			Self::Eager => "eager",
			Self::BackgroundPrecomputed => "background-precomputed",
			Self::HideMembers => "hide-members",
			Self::Default => "default",
		}
	}

	/// Returns `true` for every mode except [`AccessMode::Default`].
	pub const fn is_concrete(self) -> bool {
		!matches!(self, Self::Default)
	}

	const fn to_bits(self) -> u8 {
		match self {
			Self::Lazy => 0,
			Self::LazyOptimized => 1,
			Self::Eager => 2,
			Self::BackgroundPrecomputed => 3,
			Self::HideMembers => 4,
			Self::Default => 5,
		}
	}

	const fn from_bits(bits: u8) -> Self {
		match bits {
			0 => Self::Lazy,
			1 => Self::LazyOptimized,
			2 => Self::Eager,
			3 => Self::BackgroundPrecomputed,
			4 => Self::HideMembers,
			_ => Self::Default,
		}
	}
}

impl std::fmt::Display for AccessMode {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Mutable process-wide default, only ever holding a concrete mode.
#[derive(Debug)]
pub(crate) struct DefaultModeCell(AtomicU8);

impl DefaultModeCell {
	pub(crate) const fn new() -> Self {
		Self(AtomicU8::new(AccessMode::LazyOptimized.to_bits()))
	}

	pub(crate) fn get(&self) -> AccessMode {
		AccessMode::from_bits(self.0.load(Ordering::Acquire))
	}

	pub(crate) fn set(&self, mode: AccessMode) -> Result<()> {
		if !mode.is_concrete() {
			return Err(InteropError::InvalidDefaultMode);
		}
		self.0.store(mode.to_bits(), Ordering::Release);
		Ok(())
	}
}
