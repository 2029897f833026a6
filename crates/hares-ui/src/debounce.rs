// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::future::Future;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::trace;

/// Trailing-edge debounce for search-as-you-type inputs.
///
/// Each call cancels the previously scheduled callback and schedules the new
/// one to run once `wait` has elapsed without another call. Must be used from
/// within a tokio runtime.
#[derive(Debug)]
pub struct Debouncer {
	wait: Duration,
	pending: Mutex<Option<JoinHandle<()>>>,
}

impl Debouncer {
	pub fn new(wait: Duration) -> Self {
		Self {
			wait,
			pending: Mutex::new(None),
		}
	}

	pub fn wait(&self) -> Duration {
		self.wait
	}

	pub fn call<F, Fut>(&self, callback: F)
	where
		F: FnOnce() -> Fut + Send + 'static,
		Fut: Future<Output = ()> + Send + 'static,
	{
		let wait = self.wait;
		let handle = tokio::spawn(async move {
			tokio::time::sleep(wait).await;
			callback().await;
		});

		let previous = self
			.pending
			.lock()
			.unwrap_or_else(PoisonError::into_inner)
			.replace(handle);
		if let Some(previous) = previous {
			if !previous.is_finished() {
				trace!("superseded pending call");
			}
			previous.abort();
		}
	}

	/// Cancels the scheduled callback. Returns whether one was still waiting.
	pub fn cancel(&self) -> bool {
		match self.pending.lock().unwrap_or_else(PoisonError::into_inner).take() {
			Some(handle) => {
				let waiting = !handle.is_finished();
				handle.abort();
				waiting
			}
			None => false,
		}
	}

	pub fn is_pending(&self) -> bool {
		self.pending
			.lock()
			.unwrap_or_else(PoisonError::into_inner)
			.as_ref()
			.is_some_and(|handle| !handle.is_finished())
	}
}

impl Drop for Debouncer {
	fn drop(&mut self) {
		if let Some(handle) = self.pending.get_mut().unwrap_or_else(PoisonError::into_inner).take() {
			handle.abort();
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::sync::Arc;
	use tokio::sync::Mutex as AsyncMutex;

	fn recorder() -> Arc<AsyncMutex<Vec<&'static str>>> {
		Arc::new(AsyncMutex::new(Vec::new()))
	}

	#[tokio::test(start_paused = true)]
	async fn test_only_last_call_runs() {
		let seen = recorder();
		let debouncer = Debouncer::new(Duration::from_millis(300));

		for query in ["a", "ab", "abc"] {
			let seen = Arc::clone(&seen);
			debouncer.call(move || async move { seen.lock().await.push(query) });
			tokio::time::sleep(Duration::from_millis(100)).await;
		}
		assert!(debouncer.is_pending());
		assert!(seen.lock().await.is_empty());

		tokio::time::sleep(Duration::from_millis(250)).await;
		assert_eq!(*seen.lock().await, vec!["abc"]);
		assert!(!debouncer.is_pending());
	}

	#[tokio::test(start_paused = true)]
	async fn test_spaced_calls_all_run() {
		let seen = recorder();
		let debouncer = Debouncer::new(Duration::from_millis(50));

		for query in ["x", "y"] {
			let seen = Arc::clone(&seen);
			debouncer.call(move || async move { seen.lock().await.push(query) });
			tokio::time::sleep(Duration::from_millis(80)).await;
		}

		assert_eq!(*seen.lock().await, vec!["x", "y"]);
	}

	#[tokio::test(start_paused = true)]
	async fn test_cancel() {
		let seen = recorder();
		let debouncer = Debouncer::new(Duration::from_millis(50));
		let inner = Arc::clone(&seen);
		debouncer.call(move || async move { inner.lock().await.push("never") });

		assert!(debouncer.cancel());
		assert!(!debouncer.cancel());
		tokio::time::sleep(Duration::from_millis(100)).await;
		assert!(seen.lock().await.is_empty());
	}
}
