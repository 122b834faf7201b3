//! Process-wide registry.
//!
//! Built on first use, seeded with every `inventory`-submitted type
//! (including [`EnumerableAdapter`](crate::EnumerableAdapter)) before any
//! caller sees it.

use std::sync::{Arc, LazyLock};

use crate::access_mode::AccessMode;
use crate::descriptor::Descriptor;
use crate::error::Result;
use crate::host_type::{HostClass, HostObject, HostType};
use crate::registry::Registry;
use crate::value::UserData;

static GLOBAL: LazyLock<Registry> = LazyLock::new(Registry::with_builtins);

/// Returns the process-wide registry.
pub fn global() -> &'static Registry {
	&GLOBAL
}

/// Registers `T` in the process-wide registry.
pub fn register_type<T: HostClass>(mode: AccessMode) -> Result<Arc<Descriptor>> {
	GLOBAL.register(T::HOST_TYPE, mode)
}

/// Registers a host type given by handle in the process-wide registry.
pub fn register_host_type(host_type: HostType, mode: AccessMode) -> Result<Arc<Descriptor>> {
	GLOBAL.register(host_type, mode)
}

/// See [`Registry::create_instance_value`].
pub fn create_instance_value(object: Arc<dyn HostObject>) -> Option<UserData> {
	GLOBAL.create_instance_value(object)
}

/// See [`Registry::create_static_value`].
pub fn create_static_value<T: HostClass>() -> Option<UserData> {
	GLOBAL.create_static_value(T::HOST_TYPE)
}

/// See [`Registry::create_static_value`].
pub fn create_static_value_for(host_type: HostType) -> Option<UserData> {
	GLOBAL.create_static_value(host_type)
}

pub fn default_access_mode() -> AccessMode {
	GLOBAL.default_access_mode()
}

/// See [`Registry::set_default_access_mode`].
pub fn set_default_access_mode(mode: AccessMode) -> Result<()> {
	GLOBAL.set_default_access_mode(mode)
}
