//! Host type descriptor registry for script interop.
//!
//! Lets a script runtime treat host objects and host types as script values.
//! The first registration of a type creates its [`Descriptor`]; later
//! accesses resolve it from the [`Registry`] in O(1) for exact matches, or by
//! walking the type's bases and interfaces.
//!
//! # Key Types
//!
//! | Type | Role |
//! |------|------|
//! | [`HostType`] | Identity and hierarchy metadata of a host type. |
//! | [`Registry`] | Concurrent, append-only map from host type to descriptor. |
//! | [`Descriptor`] | Per-type metadata plus optimization state. |
//! | [`AccessMode`] | When and how a descriptor builds member metadata. |
//! | [`UserData`] | Descriptor bound to an object, or to the type itself. |
//!
//! Member binding is out of scope: descriptors reach it only through
//! [`MemberSurface`].

mod access_mode;
mod builtins;
mod config;
mod declared;
mod descriptor;
mod error;
mod global;
mod host_type;
mod registry;
mod scheduler;
mod value;

pub use access_mode::AccessMode;
pub use builtins::{EnumerableAdapter, SeededType};
pub use config::InteropConfig;
pub use declared::DeclaredAccessMode;
pub use descriptor::{Descriptor, EmptySurface, MemberSurface, OptimizationStatus, SurfaceError, SurfaceFactory};
pub use error::{InteropError, OptimizeError, Result};
pub use global::{
	create_instance_value, create_static_value, create_static_value_for, default_access_mode, global, register_host_type,
	register_type, set_default_access_mode,
};
pub use host_type::{Ancestors, HostClass, HostObject, HostType, Object, TypeInfo, TypeKind};
#[doc(hidden)]
pub use inventory;
pub use registry::{Registry, SearchDepth};
pub use scheduler::{OptimizeScheduler, WorkerScheduler};
pub use value::UserData;
