//! Polymorphic descriptor lookup.
//!
//! Deep search, most specific first:
//!
//! 1. the exact type, then each base class (the root excluded);
//! 2. every implemented interface, in [`HostType::all_interfaces`] order;
//! 3. a descriptor registered for [`HostType::OBJECT`], as a catch-all.
//!
//! Shallow search checks the exact type only. Static members are not
//! inherited, so a static binding never falls back to a base.

use std::sync::Arc;

use rustc_hash::FxHashMap as HashMap;

use crate::descriptor::Descriptor;
use crate::host_type::HostType;

/// How far resolution may look beyond the exact type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchDepth {
	/// Exact registration only.
	Shallow,
	/// Exact type, ancestors, interfaces, then the root catch-all.
	Deep,
}

pub(super) fn resolve(
	types: &HashMap<HostType, Arc<Descriptor>>,
	host_type: HostType,
	depth: SearchDepth,
) -> Option<Arc<Descriptor>> {
	if depth == SearchDepth::Shallow {
		return types.get(&host_type).cloned();
	}

	host_type
		.ancestors()
		.find_map(|ty| types.get(&ty))
		.or_else(|| host_type.all_interfaces().into_iter().find_map(|iface| types.get(&iface)))
		.or_else(|| types.get(&HostType::OBJECT))
		.cloned()
}
