//! Offloading of background descriptor optimization.

use std::sync::Arc;

use hostbind_worker::spawn_detached;

use crate::descriptor::Descriptor;

/// Runs [`Descriptor::optimize`] off the registering thread.
///
/// `schedule` must return without waiting for the pass. Implementations give
/// no ordering across descriptors and no cancellation.
pub trait OptimizeScheduler: Send + Sync {
	fn schedule(&self, descriptor: Arc<Descriptor>);
}

/// Schedules passes as detached jobs on the worker's blocking pool.
///
/// Failures and panics are logged by the worker and never reach the registry.
#[derive(Debug, Clone, Copy, Default)]
pub struct WorkerScheduler;

impl OptimizeScheduler for WorkerScheduler {
	fn schedule(&self, descriptor: Arc<Descriptor>) {
		let job = descriptor.host_type().name();
		spawn_detached(job, move || descriptor.optimize().map(drop));
	}
}
