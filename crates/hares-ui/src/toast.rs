// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Transient notifications appended to the document body.

use std::fmt;
use std::time::Duration;

use hares_common_dom::{Document, Element, NodeId};
use tokio::time::Instant;
use tracing::{debug, trace};

/// How long a toast stays on the page.
pub const TOAST_LIFETIME: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToastKind {
	#[default]
	Info,
	Success,
	Warning,
	Error,
}

impl ToastKind {
	pub fn as_str(&self) -> &'static str {
		match self {
			ToastKind::Info => "info",
			ToastKind::Success => "success",
			ToastKind::Warning => "warning",
			ToastKind::Error => "error",
		}
	}
}

impl fmt::Display for ToastKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Appends a `toast toast-<kind>` element to the body.
///
/// Returns `None` only if the document has no body.
pub fn show_toast(document: &mut Document, message: &str, kind: ToastKind) -> Option<NodeId> {
	let body = document.body();
	let toast = Element::new("div")
		.class("toast")
		.class(&format!("toast-{kind}"))
		.attr("role", if kind == ToastKind::Error { "alert" } else { "status" })
		.text(message);
	let id = document.append(body, toast);
	debug!(%kind, "showing toast");
	id
}

/// Tracks visible toasts and removes them once they expire.
#[derive(Debug, Default)]
pub struct ToastQueue {
	visible: Vec<(NodeId, Instant)>,
	lifetime: Option<Duration>,
}

impl ToastQueue {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_lifetime(lifetime: Duration) -> Self {
		Self {
			visible: Vec::new(),
			lifetime: Some(lifetime),
		}
	}

	fn lifetime(&self) -> Duration {
		self.lifetime.unwrap_or(TOAST_LIFETIME)
	}

	pub fn show(&mut self, document: &mut Document, message: &str, kind: ToastKind) -> Option<NodeId> {
		self.show_at(document, message, kind, Instant::now())
	}

	pub fn show_at(
		&mut self,
		document: &mut Document,
		message: &str,
		kind: ToastKind,
		now: Instant,
	) -> Option<NodeId> {
		let id = show_toast(document, message, kind)?;
		self.visible.push((id, now));
		Some(id)
	}

	/// Removes toasts shown at least one lifetime before `now`. Returns how
	/// many were removed.
	pub fn prune_at(&mut self, document: &mut Document, now: Instant) -> usize {
		let lifetime = self.lifetime();
		let before = self.visible.len();
		self.visible.retain(|(id, shown)| {
			let expired = now.saturating_duration_since(*shown) >= lifetime;
			if expired {
				document.remove(*id);
			}
			!expired
		});
		let removed = before - self.visible.len();
		if removed > 0 {
			trace!(removed, "expired toasts removed");
		}
		removed
	}

	pub fn prune(&mut self, document: &mut Document) -> usize {
		self.prune_at(document, Instant::now())
	}

	pub fn len(&self) -> usize {
		self.visible.len()
	}

	pub fn is_empty(&self) -> bool {
		self.visible.is_empty()
	}
}
