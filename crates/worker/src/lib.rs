//! Background job execution shared by the interop registry.
//!
//! Jobs run on the ambient tokio runtime when one is entered, otherwise on a
//! small lazily built global runtime. Detached jobs have no ordering,
//! cancellation or timeout; their failures and panics stay inside the job and
//! are reported through `tracing`.

use std::any::Any;

use tokio::task::JoinError;

mod detached;

pub use detached::spawn_detached;

/// Extracts the panic message from a join error, if the task panicked.
///
/// Returns `None` for cancelled tasks.
pub fn join_error_panic_message(err: JoinError) -> Option<String> {
	let payload = err.try_into_panic().ok()?;
	Some(panic_payload_message(payload.as_ref()))
}

/// Renders a panic payload captured by `catch_unwind` or a join error.
pub fn panic_payload_message(payload: &(dyn Any + Send)) -> String {
	if let Some(msg) = payload.downcast_ref::<&'static str>() {
		(*msg).to_owned()
	} else if let Some(msg) = payload.downcast_ref::<String>() {
		msg.clone()
	} else {
		"non-string panic payload".to_owned()
	}
}

#[cfg(test)]
mod panic_tests;
