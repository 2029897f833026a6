// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! In-memory document model for Hares.
//!
//! Pages are assembled from [`Element`] trees (built with a small builder API)
//! and mounted into a [`Document`], which owns every node in an arena and
//! hands out [`NodeId`] handles. The document supports the handful of
//! operations the front end needs:
//!
//! - lookups by `id`, attribute and tag name
//! - attribute, class and text-content mutation
//! - replacing the children of a container (the `innerHTML` pattern)
//! - HTML serialization
//!
//! # Example
//!
//! ```
//! use hares_common_dom::{Document, Element};
//!
//! let mut doc = Document::new();
//! let body = doc.body();
//! doc.append(
//! 	body,
//! 	Element::new("span")
//! 		.attr("data-i18n-key", "navigation.dashboard")
//! 		.text("Dashboard"),
//! );
//!
//! let marked = doc.query_by_attribute("data-i18n-key");
//! assert_eq!(marked.len(), 1);
//! assert_eq!(doc.text_content(marked[0]), "Dashboard");
//! ```

mod document;
mod element;
mod html;

pub use document::{Document, NodeId};
pub use element::{Element, Node};
pub use html::{escape_attribute, escape_text};
