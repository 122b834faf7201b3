//! Opaque values exchanged with the script runtime.

use std::sync::Arc;

use crate::descriptor::Descriptor;
use crate::host_type::{HostObject, HostType};

/// A host object, or a host type itself, bound to its descriptor.
///
/// Immutable once built. Clones share the descriptor and the object.
#[derive(Clone)]
pub struct UserData {
	descriptor: Arc<Descriptor>,
	object: Option<Arc<dyn HostObject>>,
}

impl UserData {
	pub(crate) fn instance(descriptor: Arc<Descriptor>, object: Arc<dyn HostObject>) -> Self {
		Self {
			descriptor,
			object: Some(object),
		}
	}

	pub(crate) fn static_type(descriptor: Arc<Descriptor>) -> Self {
		Self { descriptor, object: None }
	}

	pub fn descriptor(&self) -> &Arc<Descriptor> {
		&self.descriptor
	}

	/// The bound object; `None` for a static binding.
	pub fn object(&self) -> Option<&Arc<dyn HostObject>> {
		self.object.as_ref()
	}

	pub fn is_static(&self) -> bool {
		self.object.is_none()
	}

	/// Type the value is bound through, which may be a base or interface of
	/// the object's runtime type.
	pub fn host_type(&self) -> HostType {
		self.descriptor.host_type()
	}

	/// Downcasts the bound object.
	pub fn downcast_ref<T: HostObject>(&self) -> Option<&T> {
		self.object.as_deref()?.as_any().downcast_ref::<T>()
	}
}

impl std::fmt::Debug for UserData {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("UserData")
			.field("host_type", &self.descriptor.host_type())
			.field("object", &self.object.as_ref().map(|obj| obj.host_type()))
			.finish()
	}
}
