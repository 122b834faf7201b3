//! Types seeded into every registry built with [`Registry::with_builtins`](crate::Registry::with_builtins).
//!
//! Embedders seed their own types the same way:
//!
//! ```ignore
//! seed_type!(MyHandle, AccessMode::Lazy);
//! ```

use std::sync::Arc;

use parking_lot::Mutex;

use crate::access_mode::AccessMode;
use crate::host_type::{HostObject, HostType};

/// Seed entry collected via `inventory`.
#[derive(Debug)]
pub struct SeededType {
	pub host_type: HostType,
	pub mode: AccessMode,
}

inventory::collect!(SeededType);

/// Submits a type for registration whenever a registry is seeded.
#[macro_export]
macro_rules! seed_type {
	($ty:ty, $mode:expr $(,)?) => {
		$crate::inventory::submit! {
			$crate::SeededType {
				host_type: <$ty as $crate::HostClass>::HOST_TYPE,
				mode: $mode,
			}
		}
	};
}

type ValueIter = Box<dyn Iterator<Item = Arc<dyn HostObject>> + Send>;

/// Adapter handing a host sequence to scripts one value at a time.
///
/// Registered with [`AccessMode::HideMembers`]: scripts iterate it but see no
/// members on it.
pub struct EnumerableAdapter {
	items: Mutex<ValueIter>,
}

impl EnumerableAdapter {
	pub fn new<I>(items: I) -> Self
	where
		I: IntoIterator<Item = Arc<dyn HostObject>>,
		I::IntoIter: Send + 'static,
	{
		Self {
			items: Mutex::new(Box::new(items.into_iter())),
		}
	}

	/// Advances the sequence.
	pub fn next_value(&self) -> Option<Arc<dyn HostObject>> {
		self.items.lock().next()
	}
}

impl std::fmt::Debug for EnumerableAdapter {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("EnumerableAdapter").finish_non_exhaustive()
	}
}

crate::host_class!(EnumerableAdapter);
crate::seed_type!(EnumerableAdapter, AccessMode::HideMembers);
