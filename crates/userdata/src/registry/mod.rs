//! Concurrent type-to-descriptor registry.
//!
//! # Concurrency
//!
//! - **Reads:** shared lock; readers never block each other.
//! - **Writes:** exclusive lock held only for the membership check and insert.
//!   Descriptors are built, and eagerly optimized, before the lock is taken.
//! - **Optimization:** never runs under the lock and never blocks a caller
//!   for background mode; it is handed to the [`OptimizeScheduler`].
//!
//! # Invariants
//!
//! - At most one descriptor per host type. The first registration wins and
//!   later calls return it unchanged, ignoring their mode.
//! - Append-only: descriptors are never replaced or removed.
//! - Resolution never creates descriptors.

mod resolve;

use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap as HashMap;
use rustc_hash::FxHashSet as HashSet;

pub use self::resolve::SearchDepth;
use crate::access_mode::{AccessMode, DefaultModeCell};
use crate::builtins::SeededType;
use crate::config::InteropConfig;
use crate::declared::compiled_declarations;
use crate::descriptor::{Descriptor, SurfaceFactory, empty_surface};
use crate::error::{InteropError, Result};
use crate::host_type::{HostObject, HostType};
use crate::scheduler::{OptimizeScheduler, WorkerScheduler};
use crate::value::UserData;

/// Registry mapping host types to their descriptors.
///
/// Thread-safe; share it by reference or through `Arc<Registry>`.
pub struct Registry {
	types: RwLock<HashMap<HostType, Arc<Descriptor>>>,
	declarations: RwLock<HashMap<String, AccessMode>>,
	default_mode: DefaultModeCell,
	surfaces: Arc<dyn SurfaceFactory>,
	scheduler: Arc<dyn OptimizeScheduler>,
}

impl Default for Registry {
	fn default() -> Self {
		Self::new()
	}
}

impl Registry {
	/// Creates an empty registry with empty member surfaces and worker scheduling.
	pub fn new() -> Self {
		Self {
			types: RwLock::new(HashMap::default()),
			declarations: RwLock::new(HashMap::default()),
			default_mode: DefaultModeCell::new(),
			surfaces: Arc::new(empty_surface),
			scheduler: Arc::new(WorkerScheduler),
		}
	}

	/// Creates a registry seeded with every `inventory`-submitted type.
	pub fn with_builtins() -> Self {
		let registry = Self::new();
		registry.seed();
		registry
	}

	/// Replaces the factory that builds member surfaces for new descriptors.
	pub fn with_surfaces(mut self, surfaces: impl SurfaceFactory + 'static) -> Self {
		self.surfaces = Arc::new(surfaces);
		self
	}

	/// Replaces the scheduler used for background optimization.
	pub fn with_scheduler(mut self, scheduler: impl OptimizeScheduler + 'static) -> Self {
		self.scheduler = Arc::new(scheduler);
		self
	}

	/// Registers every type submitted through [`seed_type!`](crate::seed_type).
	pub fn seed(&self) {
		for seed in inventory::iter::<SeededType> {
			if let Err(err) = self.register(seed.host_type, seed.mode) {
				tracing::warn!(host_type = seed.host_type.name(), error = %err, "userdata.seed_failed");
			}
		}
	}

	/// Registers `host_type`, returning its descriptor.
	///
	/// A type that is already present keeps its descriptor and original mode;
	/// `mode` is then ignored. With [`AccessMode::Default`] the effective mode
	/// is the type's declared mode, else the registry default.
	///
	/// # Errors
	///
	/// [`InteropError::ConflictingDeclarations`] when `mode` is
	/// [`AccessMode::Default`] and the type has more than one declared mode.
	pub fn register(&self, host_type: HostType, mode: AccessMode) -> Result<Arc<Descriptor>> {
		if let Some(existing) = self.lookup_exact(host_type) {
			tracing::trace!(host_type = host_type.name(), "userdata.register.existing");
			return Ok(existing);
		}

		let mode = self.effective_mode(host_type, mode)?;
		let descriptor = Arc::new(Descriptor::new(host_type, mode, self.surfaces.build(host_type, mode)));
		if mode == AccessMode::Eager {
			if let Err(err) = descriptor.optimize() {
				tracing::warn!(host_type = host_type.name(), error = %err, "userdata.optimize.eager_failed");
			}
		}

		{
			let mut types = self.types.write();
			if let Some(existing) = types.get(&host_type) {
				return Ok(Arc::clone(existing));
			}
			types.insert(host_type, Arc::clone(&descriptor));
		}

		tracing::debug!(host_type = host_type.name(), mode = mode.as_str(), "userdata.register");
		if mode == AccessMode::BackgroundPrecomputed {
			self.scheduler.schedule(Arc::clone(&descriptor));
		}
		Ok(descriptor)
	}

	fn effective_mode(&self, host_type: HostType, mode: AccessMode) -> Result<AccessMode> {
		if mode.is_concrete() {
			return Ok(mode);
		}

		let mut declared: Vec<AccessMode> = compiled_declarations(host_type).collect();
		declared.extend(self.declarations.read().get(host_type.name()).copied());
		match declared.as_slice() {
			[mode] if mode.is_concrete() => Ok(*mode),
			[] | [_] => Ok(self.default_mode.get()),
			_ => Err(InteropError::ConflictingDeclarations {
				type_name: host_type.name(),
				count: declared.len(),
			}),
		}
	}

	/// Records a declared default mode for `host_type`, replacing an earlier
	/// runtime declaration. Affects only later registrations.
	pub fn declare_access_mode(&self, host_type: HostType, mode: AccessMode) {
		self.declare_by_name(host_type.name(), mode);
	}

	fn declare_by_name(&self, type_name: &str, mode: AccessMode) {
		self.declarations.write().insert(type_name.to_owned(), mode);
	}

	/// Returns the mode used for registrations without an explicit or declared mode.
	pub fn default_access_mode(&self) -> AccessMode {
		self.default_mode.get()
	}

	/// Sets the registry default. Existing descriptors are unaffected.
	///
	/// # Errors
	///
	/// [`InteropError::InvalidDefaultMode`] for [`AccessMode::Default`].
	pub fn set_default_access_mode(&self, mode: AccessMode) -> Result<()> {
		self.default_mode.set(mode)
	}

	/// Applies a default mode and name-keyed declarations from configuration.
	pub fn apply_config(&self, config: &InteropConfig) -> Result<()> {
		if let Some(mode) = config.default_access_mode {
			self.set_default_access_mode(mode)?;
		}
		for (type_name, &mode) in &config.declared {
			self.declare_by_name(type_name, mode);
		}
		tracing::info!(
			default_mode = %self.default_access_mode(),
			declared = config.declared.len(),
			"userdata.config_applied"
		);
		Ok(())
	}

	/// Direct lookup without any fallback.
	pub fn lookup_exact(&self, host_type: HostType) -> Option<Arc<Descriptor>> {
		self.types.read().get(&host_type).cloned()
	}

	pub fn contains(&self, host_type: HostType) -> bool {
		self.types.read().contains_key(&host_type)
	}

	/// Finds the most specific descriptor for `host_type`.
	pub fn resolve(&self, host_type: HostType, depth: SearchDepth) -> Option<Arc<Descriptor>> {
		let found = resolve::resolve(&self.types.read(), host_type, depth);
		tracing::trace!(host_type = host_type.name(), ?depth, hit = found.is_some(), "userdata.resolve");
		found
	}

	/// Wraps `object` for scripts, resolving through its ancestors and interfaces.
	///
	/// Returns `None` when nothing applicable is registered.
	pub fn create_instance_value(&self, object: Arc<dyn HostObject>) -> Option<UserData> {
		let descriptor = self.resolve(object.host_type(), SearchDepth::Deep)?;
		Some(UserData::instance(descriptor, object))
	}

	/// Binds the type itself for static member access. Exact registration only.
	pub fn create_static_value(&self, host_type: HostType) -> Option<UserData> {
		let descriptor = self.resolve(host_type, SearchDepth::Shallow)?;
		Some(UserData::static_type(descriptor))
	}

	pub fn len(&self) -> usize {
		self.types.read().len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Returns the registered types, unordered.
	pub fn registered_types(&self) -> HashSet<HostType> {
		self.types.read().keys().copied().collect()
	}
}

impl std::fmt::Debug for Registry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Registry")
			.field("len", &self.len())
			.field("default_mode", &self.default_access_mode())
			.finish_non_exhaustive()
	}
}
