//! Per-type declared default access modes.
//!
//! A type may declare the mode it wants when registered without an explicit
//! one. Declarations come from [`declare_access_mode!`](crate::declare_access_mode)
//! at compile time, collected through `inventory`, and from the registry's
//! runtime side table (see [`Registry::declare_access_mode`](crate::Registry::declare_access_mode)).

use crate::access_mode::AccessMode;
use crate::host_type::HostType;

/// Compile-time declaration collected via `inventory`.
#[derive(Debug)]
pub struct DeclaredAccessMode {
	pub host_type: HostType,
	pub mode: AccessMode,
}

inventory::collect!(DeclaredAccessMode);

/// Declarations submitted at compile time for `host_type`.
pub(crate) fn compiled_declarations(host_type: HostType) -> impl Iterator<Item = AccessMode> {
	inventory::iter::<DeclaredAccessMode>
		.into_iter()
		.filter(move |decl| decl.host_type == host_type)
		.map(|decl| decl.mode)
}

/// Declares the access mode a type registers with when none is given.
///
/// ```ignore
/// declare_access_mode!(Matrix, AccessMode::Eager);
/// ```
#[macro_export]
macro_rules! declare_access_mode {
	($ty:ty, $mode:expr $(,)?) => {
		$crate::inventory::submit! {
			$crate::DeclaredAccessMode {
				host_type: <$ty as $crate::HostClass>::HOST_TYPE,
				mode: $mode,
			}
		}
	};
}
