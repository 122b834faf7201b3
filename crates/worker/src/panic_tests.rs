use std::time::Duration;

use super::{join_error_panic_message, panic_payload_message};

#[tokio::test]
async fn blocking_panic_message_survives_join() {
	let handle = tokio::task::spawn_blocking(|| -> Result<(), String> { panic!("precompute failed for {}", "Widget") });
	let err = handle.await.unwrap_err();
	let msg = join_error_panic_message(err).expect("blocking task panicked");
	assert_eq!(msg, "precompute failed for Widget");
}

#[tokio::test]
async fn aborted_task_has_no_panic_message() {
	let handle = tokio::spawn(tokio::time::sleep(Duration::from_secs(60)));
	handle.abort();
	assert!(join_error_panic_message(handle.await.unwrap_err()).is_none());
}

#[test]
fn caught_unwind_payloads_render() {
	let literal = std::panic::catch_unwind(|| -> u8 { panic!("literal") }).unwrap_err();
	assert_eq!(panic_payload_message(literal.as_ref()), "literal");

	let opaque: Box<dyn std::any::Any + Send> = Box::new(42u32);
	assert_eq!(panic_payload_message(opaque.as_ref()), "non-string panic payload");
}
