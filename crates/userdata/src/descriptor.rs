//! Per-type descriptors and the member surface they wrap.
//!
//! A descriptor is the registry's unit of storage: identity, access mode, and
//! optimization state for one host type. Member binding itself lives behind
//! [`MemberSurface`], supplied by the embedder through a [`SurfaceFactory`].
//!
//! # Optimization state
//!
//! ```text
//! Pending --optimize--> Running --ok--> Optimized
//!    ^                     |
//!    +------ Failed <--err-+
//! ```
//!
//! Only the caller that wins the transition into `Running` calls
//! [`MemberSurface::precompute`]. Every other concurrent or later call
//! returns the observed status without doing any work.

use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU8, Ordering};

use hostbind_worker::panic_payload_message;

use crate::access_mode::AccessMode;
use crate::error::OptimizeError;
use crate::host_type::HostType;

/// Error reported by a member surface while precomputing.
pub type SurfaceError = Box<dyn std::error::Error + Send + Sync>;

/// Member-access surface of one host type.
///
/// Implemented outside this crate. The registry only builds surfaces and asks
/// them to precompute.
pub trait MemberSurface: Send + Sync {
	/// Builds the full member table ahead of first use.
	///
	/// Called at most once at a time per descriptor.
	fn precompute(&self) -> Result<(), SurfaceError>;
}

/// Builds the member surface for a newly registered type.
pub trait SurfaceFactory: Send + Sync {
	fn build(&self, host_type: HostType, mode: AccessMode) -> Box<dyn MemberSurface>;
}

impl<F> SurfaceFactory for F
where
	F: Fn(HostType, AccessMode) -> Box<dyn MemberSurface> + Send + Sync,
{
	fn build(&self, host_type: HostType, mode: AccessMode) -> Box<dyn MemberSurface> {
		self(host_type, mode)
	}
}

/// Surface with nothing to precompute.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptySurface;

impl MemberSurface for EmptySurface {
	fn precompute(&self) -> Result<(), SurfaceError> {
		Ok(())
	}
}

pub(crate) fn empty_surface(_: HostType, _: AccessMode) -> Box<dyn MemberSurface> {
	Box::new(EmptySurface)
}

/// Progress of a descriptor's full member build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum OptimizationStatus {
	Pending = 0,
	Running = 1,
	Optimized = 2,
	Failed = 3,
}

impl OptimizationStatus {
	const fn from_bits(bits: u8) -> Self {
		match bits {
			0 => Self::Pending,
			1 => Self::Running,
			2 => Self::Optimized,
			_ => Self::Failed,
		}
	}
}

/// Interop metadata for one registered host type.
///
/// Shared by every value bound to the type and kept for the registry's lifetime.
pub struct Descriptor {
	host_type: HostType,
	mode: AccessMode,
	state: AtomicU8,
	surface: Box<dyn MemberSurface>,
}

impl Descriptor {
	pub(crate) fn new(host_type: HostType, mode: AccessMode, surface: Box<dyn MemberSurface>) -> Self {
		debug_assert!(mode.is_concrete(), "descriptor mode must be resolved before construction");
		let state = if mode == AccessMode::HideMembers {
			OptimizationStatus::Optimized
		} else {
			OptimizationStatus::Pending
		};
		Self {
			host_type,
			mode,
			state: AtomicU8::new(state as u8),
			surface,
		}
	}

	pub fn host_type(&self) -> HostType {
		self.host_type
	}

	pub fn access_mode(&self) -> AccessMode {
		self.mode
	}

	pub fn status(&self) -> OptimizationStatus {
		OptimizationStatus::from_bits(self.state.load(Ordering::Acquire))
	}

	pub fn is_optimized(&self) -> bool {
		self.status() == OptimizationStatus::Optimized
	}

	/// Precomputes the full member table if no other pass has or is doing so.
	///
	/// Returns the status observed after the call. A panic in the surface is
	/// caught and reported as [`OptimizeError::Panicked`].
	pub fn optimize(&self) -> Result<OptimizationStatus, OptimizeError> {
		let current = self.status();
		if !matches!(current, OptimizationStatus::Pending | OptimizationStatus::Failed) {
			return Ok(current);
		}
		if self
			.state
			.compare_exchange(current as u8, OptimizationStatus::Running as u8, Ordering::AcqRel, Ordering::Acquire)
			.is_err()
		{
			return Ok(self.status());
		}

		let type_name = self.host_type.name();
		tracing::trace!(host_type = type_name, "userdata.optimize.start");
		let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.surface.precompute()));
		let (status, result) = match outcome {
			Ok(Ok(())) => (OptimizationStatus::Optimized, Ok(OptimizationStatus::Optimized)),
			Ok(Err(err)) => (
				OptimizationStatus::Failed,
				Err(OptimizeError::Failed {
					type_name,
					reason: err.to_string(),
				}),
			),
			Err(payload) => (
				OptimizationStatus::Failed,
				Err(OptimizeError::Panicked {
					type_name,
					message: panic_payload_message(payload.as_ref()),
				}),
			),
		};
		self.state.store(status as u8, Ordering::Release);
		tracing::debug!(host_type = type_name, status = ?status, "userdata.optimize.finish");
		result
	}

	/// Returns the member surface, or `None` when members are hidden.
	///
	/// Under [`AccessMode::LazyOptimized`] the first call runs the full build.
	pub fn members(&self) -> Option<&dyn MemberSurface> {
		match self.mode {
			AccessMode::HideMembers => None,
			AccessMode::LazyOptimized => {
				if self.status() == OptimizationStatus::Pending {
					if let Err(err) = self.optimize() {
						tracing::warn!(host_type = self.host_type.name(), error = %err, "userdata.optimize.lazy_failed");
					}
				}
				Some(self.surface.as_ref())
			}
			_ => Some(self.surface.as_ref()),
		}
	}
}

impl std::fmt::Debug for Descriptor {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Descriptor")
			.field("host_type", &self.host_type)
			.field("mode", &self.mode)
			.field("status", &self.status())
			.finish_non_exhaustive()
	}
}
