// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Arena-backed live document.

use tracing::trace;

use crate::element::{Element, Node};
use crate::html::{escape_text, write_close_tag, write_open_tag};

/// Handle to a node owned by a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
enum NodeKind {
	Element {
		tag: String,
		attributes: Vec<(String, String)>,
		children: Vec<NodeId>,
	},
	Text(String),
}

#[derive(Debug, Clone)]
struct NodeData {
	parent: Option<NodeId>,
	kind: NodeKind,
}

/// A live `<html>` document with `<head>` and `<body>`.
///
/// Removed nodes stay in the arena but are unreachable from the root, so
/// queries never return them and existing [`NodeId`]s never alias a newer
/// node. Replacing the text of an element whose only child is text reuses
/// that node, so repeated translation passes do not grow the arena; subtrees
/// swapped out by [`Document::replace_children`] are freed with the document.
#[derive(Debug, Clone)]
pub struct Document {
	nodes: Vec<NodeData>,
	root: NodeId,
	head: NodeId,
	body: NodeId,
}

impl Default for Document {
	fn default() -> Self {
		Self::new()
	}
}

impl Document {
	pub fn new() -> Self {
		let mut doc = Self {
			nodes: Vec::new(),
			root: NodeId(0),
			head: NodeId(0),
			body: NodeId(0),
		};
		let root = doc.alloc_element("html", Vec::new(), None);
		let head = doc.alloc_element("head", Vec::new(), Some(root));
		let body = doc.alloc_element("body", Vec::new(), Some(root));
		doc.push_child(root, head);
		doc.push_child(root, body);
		doc.root = root;
		doc.head = head;
		doc.body = body;
		doc
	}

	/// The `<html>` element.
	pub fn root(&self) -> NodeId {
		self.root
	}

	pub fn head(&self) -> NodeId {
		self.head
	}

	pub fn body(&self) -> NodeId {
		self.body
	}

	/// Mounts `element` as the last child of `parent`.
	///
	/// Returns the id of the mounted element, or `None` if `parent` is not an
	/// element of this document.
	pub fn append(&mut self, parent: NodeId, element: Element) -> Option<NodeId> {
		if !self.is_element(parent) {
			return None;
		}
		let id = self.mount(element, parent);
		self.push_child(parent, id);
		Some(id)
	}

	/// Replaces all children of `parent` with `elements`.
	pub fn replace_children(&mut self, parent: NodeId, elements: Vec<Element>) -> Vec<NodeId> {
		if !self.is_element(parent) {
			return Vec::new();
		}
		self.detach_children(parent);
		elements
			.into_iter()
			.map(|element| {
				let id = self.mount(element, parent);
				self.push_child(parent, id);
				id
			})
			.collect()
	}

	/// Detaches `id` from its parent. The root cannot be removed.
	pub fn remove(&mut self, id: NodeId) {
		if id == self.root {
			return;
		}
		let Some(parent) = self.nodes.get(id.0).and_then(|n| n.parent) else {
			return;
		};
		if let Some(NodeKind::Element { children, .. }) = self.kind_mut(parent) {
			children.retain(|c| *c != id);
		}
		if let Some(node) = self.nodes.get_mut(id.0) {
			node.parent = None;
		}
		trace!(node = id.0, "removed node");
	}

	pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
		self
			.descendants(self.root)
			.into_iter()
			.find(|n| self.attribute(*n, "id") == Some(id))
	}

	/// All attached elements carrying attribute `name`, in document order.
	pub fn query_by_attribute(&self, name: &str) -> Vec<NodeId> {
		self
			.descendants(self.root)
			.into_iter()
			.filter(|n| self.attribute(*n, name).is_some())
			.collect()
	}

	/// All attached elements with tag `tag`, in document order.
	pub fn query_by_tag(&self, tag: &str) -> Vec<NodeId> {
		let tag = tag.to_ascii_lowercase();
		self
			.descendants(self.root)
			.into_iter()
			.filter(|n| self.tag_name(*n) == Some(tag.as_str()))
			.collect()
	}

	pub fn tag_name(&self, id: NodeId) -> Option<&str> {
		match self.kind(id)? {
			NodeKind::Element { tag, .. } => Some(tag),
			NodeKind::Text(_) => None,
		}
	}

	pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
		match self.kind(id)? {
			NodeKind::Element { attributes, .. } => attributes
				.iter()
				.find(|(n, _)| n == name)
				.map(|(_, v)| v.as_str()),
			NodeKind::Text(_) => None,
		}
	}

	pub fn set_attribute(&mut self, id: NodeId, name: &str, value: impl Into<String>) {
		let value = value.into();
		if let Some(NodeKind::Element { attributes, .. }) = self.kind_mut(id) {
			match attributes.iter_mut().find(|(n, _)| n == name) {
				Some(slot) => slot.1 = value,
				None => attributes.push((name.to_string(), value)),
			}
		}
	}

	pub fn remove_attribute(&mut self, id: NodeId, name: &str) {
		if let Some(NodeKind::Element { attributes, .. }) = self.kind_mut(id) {
			attributes.retain(|(n, _)| n != name);
		}
	}

	pub fn has_class(&self, id: NodeId, class: &str) -> bool {
		self
			.attribute(id, "class")
			.is_some_and(|v| v.split_whitespace().any(|c| c == class))
	}

	pub fn add_class(&mut self, id: NodeId, class: &str) {
		if self.has_class(id, class) || !self.is_element(id) {
			return;
		}
		let value = match self.attribute(id, "class") {
			Some(existing) if !existing.trim().is_empty() => format!("{} {class}", existing.trim()),
			_ => class.to_string(),
		};
		self.set_attribute(id, "class", value);
	}

	pub fn remove_class(&mut self, id: NodeId, class: &str) {
		let Some(existing) = self.attribute(id, "class") else {
			return;
		};
		let remaining: Vec<&str> = existing.split_whitespace().filter(|c| *c != class).collect();
		if remaining.is_empty() {
			self.remove_attribute(id, "class");
		} else {
			let value = remaining.join(" ");
			self.set_attribute(id, "class", value);
		}
	}

	/// Concatenated text of `id` and its descendants.
	pub fn text_content(&self, id: NodeId) -> String {
		let mut out = String::new();
		self.collect_text(id, &mut out);
		out
	}

	/// Replaces all children of `id` with a single text node.
	pub fn set_text_content(&mut self, id: NodeId, text: impl Into<String>) {
		if !self.is_element(id) {
			return;
		}
		let text = text.into();
		if let Some(slot) = self.sole_text_child(id) {
			if let Some(NodeKind::Text(existing)) = self.kind_mut(slot) {
				*existing = text;
			}
			return;
		}
		self.detach_children(id);
		let text_id = NodeId(self.nodes.len());
		self.nodes.push(NodeData {
			parent: Some(id),
			kind: NodeKind::Text(text),
		});
		self.push_child(id, text_id);
	}

	fn sole_text_child(&self, id: NodeId) -> Option<NodeId> {
		match self.kind(id)? {
			NodeKind::Element { children, .. } if children.len() == 1 => {
				let child = children[0];
				matches!(self.kind(child), Some(NodeKind::Text(_))).then_some(child)
			}
			_ => None,
		}
	}

	/// Serializes the whole document, doctype included.
	pub fn to_html(&self) -> String {
		let mut out = String::from("<!DOCTYPE html>");
		self.write_node(self.root, &mut out);
		out
	}

	/// Serializes a single node and its descendants.
	pub fn outer_html(&self, id: NodeId) -> String {
		let mut out = String::new();
		self.write_node(id, &mut out);
		out
	}

	fn kind(&self, id: NodeId) -> Option<&NodeKind> {
		self.nodes.get(id.0).map(|n| &n.kind)
	}

	fn kind_mut(&mut self, id: NodeId) -> Option<&mut NodeKind> {
		self.nodes.get_mut(id.0).map(|n| &mut n.kind)
	}

	fn is_element(&self, id: NodeId) -> bool {
		matches!(self.kind(id), Some(NodeKind::Element { .. }))
	}

	fn alloc_element(
		&mut self,
		tag: &str,
		attributes: Vec<(String, String)>,
		parent: Option<NodeId>,
	) -> NodeId {
		let id = NodeId(self.nodes.len());
		self.nodes.push(NodeData {
			parent,
			kind: NodeKind::Element {
				tag: tag.to_string(),
				attributes,
				children: Vec::new(),
			},
		});
		id
	}

	fn push_child(&mut self, parent: NodeId, child: NodeId) {
		if let Some(NodeKind::Element { children, .. }) = self.kind_mut(parent) {
			children.push(child);
		}
	}

	fn detach_children(&mut self, id: NodeId) {
		let children = match self.kind_mut(id) {
			Some(NodeKind::Element { children, .. }) => std::mem::take(children),
			_ => return,
		};
		for child in children {
			if let Some(node) = self.nodes.get_mut(child.0) {
				node.parent = None;
			}
		}
	}

	fn mount(&mut self, element: Element, parent: NodeId) -> NodeId {
		let Element {
			tag,
			attributes,
			children,
		} = element;
		let id = self.alloc_element(&tag, attributes, Some(parent));
		for child in children {
			let child_id = match child {
				Node::Element(child) => self.mount(child, id),
				Node::Text(text) => {
					let text_id = NodeId(self.nodes.len());
					self.nodes.push(NodeData {
						parent: Some(id),
						kind: NodeKind::Text(text),
					});
					text_id
				}
			};
			self.push_child(id, child_id);
		}
		id
	}

	/// Elements under `start` (inclusive), depth-first in document order.
	fn descendants(&self, start: NodeId) -> Vec<NodeId> {
		let mut out = Vec::new();
		let mut stack = vec![start];
		while let Some(id) = stack.pop() {
			if let Some(NodeKind::Element { children, .. }) = self.kind(id) {
				out.push(id);
				stack.extend(children.iter().rev().copied());
			}
		}
		out
	}

	fn collect_text(&self, id: NodeId, out: &mut String) {
		match self.kind(id) {
			Some(NodeKind::Text(text)) => out.push_str(text),
			Some(NodeKind::Element { children, .. }) => {
				for child in children {
					self.collect_text(*child, out);
				}
			}
			None => {}
		}
	}

	fn write_node(&self, id: NodeId, out: &mut String) {
		match self.kind(id) {
			Some(NodeKind::Text(text)) => out.push_str(&escape_text(text)),
			Some(NodeKind::Element {
				tag,
				attributes,
				children,
			}) => {
				write_open_tag(out, tag, attributes);
				for child in children {
					self.write_node(*child, out);
				}
				write_close_tag(out, tag);
			}
			None => {}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn sample() -> (Document, NodeId) {
		let mut doc = Document::new();
		let body = doc.body();
		let nav = doc
			.append(
				body,
				Element::new("nav")
					.id("sidebar")
					.child(
						Element::new("a")
							.id("nav-loans")
							.class("sidebar-nav-link")
							.child(Element::new("span").attr("data-i18n-key", "navigation.loans").text("Loans")),
					)
					.child(Element::new("input").attr("data-i18n-placeholder", "common.search")),
			)
			.unwrap();
		(doc, nav)
	}

	#[test]
	fn test_new_document_has_head_and_body() {
		let doc = Document::new();
		assert_eq!(doc.tag_name(doc.root()), Some("html"));
		assert_eq!(doc.tag_name(doc.head()), Some("head"));
		assert_eq!(doc.tag_name(doc.body()), Some("body"));
		assert_eq!(
			doc.to_html(),
			"<!DOCTYPE html><html><head></head><body></body></html>"
		);
	}

	#[test]
	fn test_get_element_by_id_finds_nested_elements() {
		let (doc, _) = sample();
		let link = doc.get_element_by_id("nav-loans").unwrap();
		assert_eq!(doc.tag_name(link), Some("a"));
		assert!(doc.get_element_by_id("nav-missing").is_none());
	}

	#[test]
	fn test_query_by_attribute_returns_document_order() {
		let (mut doc, _) = sample();
		let body = doc.body();
		doc.append(
			body,
			Element::new("p").attr("data-i18n-key", "common.footer").text("Footer"),
		);

		let keys: Vec<_> = doc
			.query_by_attribute("data-i18n-key")
			.into_iter()
			.map(|id| doc.attribute(id, "data-i18n-key").unwrap().to_string())
			.collect();
		assert_eq!(keys, vec!["navigation.loans", "common.footer"]);
	}

	#[test]
	fn test_set_text_content_replaces_children() {
		let (mut doc, nav) = sample();
		doc.set_text_content(nav, "gone");
		assert_eq!(doc.text_content(nav), "gone");
		assert!(doc.get_element_by_id("nav-loans").is_none());
	}

	#[test]
	fn test_class_mutation() {
		let (mut doc, _) = sample();
		let link = doc.get_element_by_id("nav-loans").unwrap();

		doc.add_class(link, "active");
		doc.add_class(link, "active");
		assert_eq!(doc.attribute(link, "class"), Some("sidebar-nav-link active"));

		doc.remove_class(link, "sidebar-nav-link");
		assert_eq!(doc.attribute(link, "class"), Some("active"));

		doc.remove_class(link, "active");
		assert_eq!(doc.attribute(link, "class"), None);
		assert!(!doc.has_class(link, "active"));
	}

	#[test]
	fn test_removed_nodes_are_not_queryable() {
		let (mut doc, nav) = sample();
		doc.remove(nav);
		assert!(doc.get_element_by_id("sidebar").is_none());
		assert!(doc.query_by_attribute("data-i18n-key").is_empty());
	}

	#[test]
	fn test_root_cannot_be_removed() {
		let mut doc = Document::new();
		let root = doc.root();
		doc.remove(root);
		assert_eq!(doc.query_by_tag("body").len(), 1);
	}

	#[test]
	fn test_replace_children_swaps_content() {
		let (mut doc, nav) = sample();
		let ids = doc.replace_children(
			nav,
			vec![Element::new("b").text("one"), Element::new("i").text("two")],
		);
		assert_eq!(ids.len(), 2);
		assert_eq!(doc.text_content(nav), "onetwo");
		assert!(doc.get_element_by_id("nav-loans").is_none());
	}

	#[test]
	fn test_attributes_round_trip_through_setters() {
		let (mut doc, _) = sample();
		let input = doc.query_by_tag("input")[0];
		doc.set_attribute(input, "placeholder", "Search");
		assert_eq!(doc.attribute(input, "placeholder"), Some("Search"));
		doc.remove_attribute(input, "placeholder");
		assert_eq!(doc.attribute(input, "placeholder"), None);
	}

	#[test]
	fn test_outer_html_escapes_text() {
		let mut doc = Document::new();
		let body = doc.body();
		let p = doc.append(body, Element::new("p").text("a < b")).unwrap();
		assert_eq!(doc.outer_html(p), "<p>a &lt; b</p>");
	}

	#[test]
	fn test_append_to_text_node_is_rejected() {
		let mut doc = Document::new();
		let body = doc.body();
		let p = doc.append(body, Element::new("p").text("x")).unwrap();
		doc.set_text_content(p, "y");
		let text_node = NodeId(doc.nodes.len() - 1);
		assert!(matches!(doc.kind(text_node), Some(NodeKind::Text(_))));
		assert!(doc.append(text_node, Element::new("b")).is_none());
	}

	#[test]
	fn test_repeated_text_updates_reuse_the_text_node() {
		let (mut doc, _) = sample();
		let label = doc.query_by_attribute("data-i18n-key")[0];
		let before = doc.nodes.len();

		for text in ["القروض", "Loans", "القروض"] {
			doc.set_text_content(label, text);
		}

		assert_eq!(doc.nodes.len(), before);
		assert_eq!(doc.text_content(label), "القروض");
	}

	#[test]
	fn test_text_update_replaces_mixed_children() {
		let mut doc = Document::new();
		let body = doc.body();
		let p = doc
			.append(body, Element::new("p").text("a ").child(Element::new("b").text("b")))
			.unwrap();
		doc.set_text_content(p, "plain");
		assert_eq!(doc.outer_html(p), "<p>plain</p>");
		assert!(doc.query_by_tag("b").is_empty());
	}
}
