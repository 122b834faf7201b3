//! Host type identity and hierarchy metadata.
//!
//! Rust types carry no runtime class hierarchy, so every type exposed to
//! scripts declares one through [`host_class!`](crate::host_class) or
//! [`host_interface!`](crate::host_interface). Classes form a single-base
//! chain ending at [`HostType::OBJECT`]; interfaces form a DAG of
//! super-interfaces.

use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Category of a host type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
	/// The universal root every class derives from.
	Root,
	/// A concrete or abstract type with at most one base.
	Class,
	/// A contract implemented by classes and extended by other interfaces.
	Interface,
}

/// Static metadata for one host type.
#[derive(Debug)]
pub struct TypeInfo {
	name: &'static str,
	kind: TypeKind,
	type_id: fn() -> TypeId,
	base: Option<HostType>,
	interfaces: &'static [HostType],
}

impl TypeInfo {
	/// Describes a class. Without an explicit `base` it derives from the root.
	pub const fn class<T: 'static>(name: &'static str, base: Option<HostType>, interfaces: &'static [HostType]) -> Self {
		let base = match base {
			Some(base) => base,
			None => HostType::OBJECT,
		};
		Self {
			name,
			kind: TypeKind::Class,
			type_id: TypeId::of::<T>,
			base: Some(base),
			interfaces,
		}
	}

	/// Describes an interface extending `supers`.
	pub const fn interface<T: 'static>(name: &'static str, supers: &'static [HostType]) -> Self {
		Self {
			name,
			kind: TypeKind::Interface,
			type_id: TypeId::of::<T>,
			base: None,
			interfaces: supers,
		}
	}
}

/// Marker standing for the universal root type.
#[derive(Debug, Clone, Copy, Default)]
pub struct Object;

const OBJECT_INFO: TypeInfo = TypeInfo {
	name: "object",
	kind: TypeKind::Root,
	type_id: TypeId::of::<Object>,
	base: None,
	interfaces: &[],
};

/// Copyable handle naming a host type.
///
/// Equality and hashing follow the underlying [`TypeId`].
#[derive(Clone, Copy)]
pub struct HostType(&'static TypeInfo);

impl HostType {
	/// The universal root type.
	pub const OBJECT: HostType = HostType(&OBJECT_INFO);

	/// Wraps static metadata.
	pub const fn new(info: &'static TypeInfo) -> Self {
		Self(info)
	}

	/// Returns the host type declared for `T`.
	pub const fn of<T: HostClass>() -> Self {
		T::HOST_TYPE
	}

	pub fn name(self) -> &'static str {
		self.0.name
	}

	pub fn kind(self) -> TypeKind {
		self.0.kind
	}

	pub fn type_id(self) -> TypeId {
		(self.0.type_id)()
	}

	pub fn is_root(self) -> bool {
		self.0.kind == TypeKind::Root
	}

	/// Returns the direct base class. `None` for the root and for interfaces.
	pub fn base(self) -> Option<HostType> {
		self.0.base
	}

	/// Interfaces declared directly on this type (super-interfaces for an interface).
	pub fn interfaces(self) -> &'static [HostType] {
		self.0.interfaces
	}

	/// Iterates this type and its bases, most derived first, stopping before the root.
	pub fn ancestors(self) -> Ancestors {
		Ancestors { next: Some(self) }
	}

	/// Every interface this type implements, including inherited ones.
	///
	/// Order is deterministic: this type then each base in turn, and for each
	/// declared interface a depth-first walk over its super-interfaces.
	/// Duplicates keep their first position.
	pub fn all_interfaces(self) -> Vec<HostType> {
		let mut out = Vec::new();
		for ty in self.ancestors() {
			for &iface in ty.interfaces() {
				push_interface(iface, &mut out);
			}
		}
		out
	}
}

fn push_interface(iface: HostType, out: &mut Vec<HostType>) {
	if out.contains(&iface) {
		return;
	}
	out.push(iface);
	for &sup in iface.interfaces() {
		push_interface(sup, out);
	}
}

impl PartialEq for HostType {
	fn eq(&self, other: &Self) -> bool {
		(self.0.type_id)() == (other.0.type_id)()
	}
}

impl Eq for HostType {}

impl Hash for HostType {
	fn hash<H: Hasher>(&self, state: &mut H) {
		(self.0.type_id)().hash(state);
	}
}

impl fmt::Debug for HostType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "HostType({})", self.0.name)
	}
}

impl fmt::Display for HostType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.0.name)
	}
}

/// Ancestor chain iterator returned by [`HostType::ancestors`].
#[derive(Debug, Clone)]
pub struct Ancestors {
	next: Option<HostType>,
}

impl Iterator for Ancestors {
	type Item = HostType;

	fn next(&mut self) -> Option<HostType> {
		let current = self.next.filter(|ty| !ty.is_root())?;
		self.next = current.base();
		Some(current)
	}
}

/// Associates a Rust type with its host type metadata.
pub trait HostClass: Any + Send + Sync {
	const HOST_TYPE: HostType;
}

impl HostClass for Object {
	const HOST_TYPE: HostType = HostType::OBJECT;
}

/// Object-safe view of a host object, answering its runtime type.
pub trait HostObject: Any + Send + Sync {
	fn host_type(&self) -> HostType;

	fn as_any(&self) -> &dyn Any;
}

impl<T: HostClass> HostObject for T {
	fn host_type(&self) -> HostType {
		T::HOST_TYPE
	}

	fn as_any(&self) -> &dyn Any {
		self
	}
}

/// Declares a host class, optionally with a base class and interfaces.
///
/// ```ignore
/// host_class!(Animal);
/// host_class!(Dog: Animal, implements [Named]);
/// ```
#[macro_export]
macro_rules! host_class {
	($ty:ty $(: $base:ty)? $(, implements [$($iface:ty),* $(,)?])? $(,)?) => {
		impl $crate::HostClass for $ty {
			const HOST_TYPE: $crate::HostType = {
				const INTERFACES: &[$crate::HostType] = &[$($(<$iface as $crate::HostClass>::HOST_TYPE),*)?];
				const INFO: &$crate::TypeInfo = &$crate::TypeInfo::class::<$ty>(
					concat!(module_path!(), "::", stringify!($ty)),
					$crate::__host_base!($($base)?),
					INTERFACES,
				);
				$crate::HostType::new(INFO)
			};
		}
	};
}

/// Declares a host interface, optionally extending other interfaces.
///
/// ```ignore
/// host_interface!(Named);
/// host_interface!(Titled: [Named]);
/// ```
#[macro_export]
macro_rules! host_interface {
	($ty:ty $(: [$($sup:ty),* $(,)?])? $(,)?) => {
		impl $crate::HostClass for $ty {
			const HOST_TYPE: $crate::HostType = {
				const SUPERS: &[$crate::HostType] = &[$($(<$sup as $crate::HostClass>::HOST_TYPE),*)?];
				const INFO: &$crate::TypeInfo =
					&$crate::TypeInfo::interface::<$ty>(concat!(module_path!(), "::", stringify!($ty)), SUPERS);
				$crate::HostType::new(INFO)
			};
		}
	};
}

#[macro_export]
#[doc(hidden)]
macro_rules! __host_base {
	() => {
		::core::option::Option::None
	};
	($base:ty) => {
		::core::option::Option::Some(<$base as $crate::HostClass>::HOST_TYPE)
	};
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	struct Named;
	struct Titled;
	struct Measured;
	struct Shape;
	struct Square;

	crate::host_interface!(Named);
	crate::host_interface!(Titled: [Named]);
	crate::host_interface!(Measured);
	crate::host_class!(Shape, implements [Measured]);
	crate::host_class!(Square: Shape, implements [Titled, Named]);

	#[test]
	fn ancestors_stop_before_root() {
		let chain: Vec<_> = Square::HOST_TYPE.ancestors().collect();
		assert_eq!(chain, vec![Square::HOST_TYPE, Shape::HOST_TYPE]);
		assert_eq!(Shape::HOST_TYPE.base(), Some(HostType::OBJECT));
		assert_eq!(HostType::OBJECT.ancestors().count(), 0);
	}

	#[test]
	fn interfaces_are_transitive_and_deduplicated() {
		assert_eq!(
			Square::HOST_TYPE.all_interfaces(),
			vec![Titled::HOST_TYPE, Named::HOST_TYPE, Measured::HOST_TYPE]
		);
		assert_eq!(Titled::HOST_TYPE.all_interfaces(), vec![Named::HOST_TYPE]);
	}

	#[test]
	fn identity_follows_type_id() {
		assert_eq!(HostType::of::<Square>(), Square::HOST_TYPE);
		assert_ne!(Square::HOST_TYPE, Shape::HOST_TYPE);
		assert_eq!(Square::HOST_TYPE.type_id(), TypeId::of::<Square>());
		assert!(Square::HOST_TYPE.name().ends_with("::Square"));
		assert_eq!(Named::HOST_TYPE.kind(), TypeKind::Interface);
		assert!(HostType::OBJECT.is_root());
	}

	#[test]
	fn distinct_types_are_distinct_keys() {
		let all = [
			Named::HOST_TYPE,
			Titled::HOST_TYPE,
			Measured::HOST_TYPE,
			Shape::HOST_TYPE,
			Square::HOST_TYPE,
			HostType::OBJECT,
		];
		let keys: rustc_hash::FxHashSet<HostType> = all.iter().copied().collect();
		assert_eq!(keys.len(), all.len());
		for (i, a) in all.iter().enumerate() {
			for (j, b) in all.iter().enumerate() {
				assert_eq!(a == b, i == j, "{a} vs {b}");
			}
		}
	}

	#[test]
	fn host_object_reports_runtime_type() {
		let obj: Box<dyn HostObject> = Box::new(Square);
		assert_eq!(obj.host_type(), Square::HOST_TYPE);
		assert!(obj.as_any().downcast_ref::<Square>().is_some());
	}
}
