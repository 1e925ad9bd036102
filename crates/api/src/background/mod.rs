//! Long-running tasks spawned from `main`, each stopped through a
//! [`CancellationToken`](tokio_util::sync::CancellationToken).

pub mod session_cleanup;
