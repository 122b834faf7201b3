use std::fmt::Display;
use std::sync::OnceLock;

use tokio::runtime::{Builder, Handle, Runtime};

use crate::join_error_panic_message;

/// Handle of the entered runtime, or of a lazily built two-thread fallback
/// for callers on plain threads.
fn runtime_handle() -> Handle {
	if let Ok(handle) = Handle::try_current() {
		return handle;
	}

	static FALLBACK: OnceLock<Runtime> = OnceLock::new();
	FALLBACK
		.get_or_init(|| {
			Builder::new_multi_thread()
				.worker_threads(2)
				.thread_name("hostbind-worker")
				.build()
				.expect("failed to build hostbind-worker fallback runtime")
		})
		.handle()
		.clone()
}

/// Runs fallible blocking work on the blocking pool without handing back a
/// join handle.
///
/// The caller never waits. An `Err` or a panic from `f` is logged against
/// `job` and goes no further.
pub fn spawn_detached<F, E>(job: &'static str, f: F)
where
	F: FnOnce() -> Result<(), E> + Send + 'static,
	E: Display + Send + 'static,
{
	let handle = runtime_handle();
	tracing::trace!(job, "worker.spawn_detached");
	let task = handle.spawn_blocking(f);
	handle.spawn(async move {
		match task.await {
			Ok(Ok(())) => tracing::trace!(job, "worker.job_done"),
			Ok(Err(err)) => tracing::warn!(job, error = %err, "worker.job_failed"),
			Err(err) => match join_error_panic_message(err) {
				Some(msg) => tracing::warn!(job, panic = %msg, "worker.job_panicked"),
				None => tracing::debug!(job, "worker.job_cancelled"),
			},
		}
	});
}

#[cfg(test)]
mod tests {
	use std::sync::mpsc;
	use std::time::Duration;

	use super::*;

	#[test]
	fn detached_job_runs_without_ambient_runtime() {
		let (tx, rx) = mpsc::channel();
		spawn_detached("send", move || tx.send(7).map_err(|e| e.to_string()));
		assert_eq!(rx.recv_timeout(Duration::from_secs(5)), Ok(7));
	}

	#[test]
	fn failed_and_panicked_jobs_stay_contained() {
		spawn_detached("fails", || Err::<(), _>("nope"));
		spawn_detached("panics", || -> Result<(), String> { panic!("job blew up") });

		let (tx, rx) = mpsc::channel();
		spawn_detached("after", move || tx.send(()).map_err(|e| e.to_string()));
		assert!(rx.recv_timeout(Duration::from_secs(5)).is_ok());
	}

	#[tokio::test]
	async fn detached_job_runs_on_entered_runtime() {
		let (tx, rx) = tokio::sync::oneshot::channel();
		spawn_detached("entered", move || {
			let name = std::thread::current().name().map(str::to_owned);
			tx.send(name).map_err(|_| "receiver dropped")
		});
		let name = rx.await.unwrap();
		assert_ne!(name.as_deref(), Some("hostbind-worker"));
	}
}
