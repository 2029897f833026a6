// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Detached element trees built before being mounted into a document.

use crate::html::{escape_text, write_close_tag, write_open_tag};

/// A detached node: either an element or a run of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
	Element(Element),
	Text(String),
}

impl From<Element> for Node {
	fn from(element: Element) -> Self {
		Node::Element(element)
	}
}

impl From<&str> for Node {
	fn from(text: &str) -> Self {
		Node::Text(text.to_string())
	}
}

impl From<String> for Node {
	fn from(text: String) -> Self {
		Node::Text(text)
	}
}

/// A detached element with ordered attributes and children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
	pub(crate) tag: String,
	pub(crate) attributes: Vec<(String, String)>,
	pub(crate) children: Vec<Node>,
}

impl Element {
	pub fn new(tag: impl Into<String>) -> Self {
		Self {
			tag: tag.into().to_ascii_lowercase(),
			attributes: Vec::new(),
			children: Vec::new(),
		}
	}

	/// Sets an attribute, replacing any previous value.
	pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		let name = name.into();
		let value = value.into();
		match self.attributes.iter_mut().find(|(n, _)| *n == name) {
			Some(slot) => slot.1 = value,
			None => self.attributes.push((name, value)),
		}
		self
	}

	/// Sets an attribute only when `condition` holds.
	pub fn attr_if(self, condition: bool, name: impl Into<String>, value: impl Into<String>) -> Self {
		if condition {
			self.attr(name, value)
		} else {
			self
		}
	}

	pub fn id(self, id: impl Into<String>) -> Self {
		self.attr("id", id)
	}

	/// Appends one or more space-separated class names.
	pub fn class(mut self, class: &str) -> Self {
		let mut classes: Vec<String> = self
			.attributes
			.iter()
			.find(|(n, _)| n == "class")
			.map(|(_, v)| v.split_whitespace().map(str::to_string).collect())
			.unwrap_or_default();
		for name in class.split_whitespace() {
			if !classes.iter().any(|c| c == name) {
				classes.push(name.to_string());
			}
		}
		self.attr("class", classes.join(" "))
	}

	pub fn style(self, style: impl Into<String>) -> Self {
		self.attr("style", style)
	}

	pub fn text(mut self, text: impl Into<String>) -> Self {
		self.children.push(Node::Text(text.into()));
		self
	}

	pub fn child(mut self, child: impl Into<Node>) -> Self {
		self.children.push(child.into());
		self
	}

	pub fn child_if(self, condition: bool, child: impl FnOnce() -> Element) -> Self {
		if condition {
			self.child(child())
		} else {
			self
		}
	}

	pub fn children<I, N>(mut self, children: I) -> Self
	where
		I: IntoIterator<Item = N>,
		N: Into<Node>,
	{
		self.children.extend(children.into_iter().map(Into::into));
		self
	}

	pub fn tag_name(&self) -> &str {
		&self.tag
	}

	pub fn attribute(&self, name: &str) -> Option<&str> {
		self
			.attributes
			.iter()
			.find(|(n, _)| n == name)
			.map(|(_, v)| v.as_str())
	}

	/// Concatenated text of this element and its descendants.
	pub fn text_content(&self) -> String {
		let mut out = String::new();
		collect_text(&self.children, &mut out);
		out
	}

	/// Serializes the element to HTML.
	pub fn to_html(&self) -> String {
		let mut out = String::new();
		write_element(self, &mut out);
		out
	}
}

fn collect_text(children: &[Node], out: &mut String) {
	for child in children {
		match child {
			Node::Text(text) => out.push_str(text),
			Node::Element(element) => collect_text(&element.children, out),
		}
	}
}

fn write_element(element: &Element, out: &mut String) {
	write_open_tag(out, &element.tag, &element.attributes);
	for child in &element.children {
		match child {
			Node::Text(text) => out.push_str(&escape_text(text)),
			Node::Element(child) => write_element(child, out),
		}
	}
	write_close_tag(out, &element.tag);
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_builder_renders_nested_markup() {
		let el = Element::new("div")
			.class("header")
			.child(Element::new("h1").text("Loans"))
			.child(Element::new("p").class("text-sm").text("All loans"));

		assert_eq!(
			el.to_html(),
			r#"<div class="header"><h1>Loans</h1><p class="text-sm">All loans</p></div>"#
		);
	}

	#[test]
	fn test_class_merges_without_duplicates() {
		let el = Element::new("a").class("btn btn-primary").class("btn active");
		assert_eq!(el.attribute("class"), Some("btn btn-primary active"));
	}

	#[test]
	fn test_attr_replaces_existing_value() {
		let el = Element::new("input").attr("placeholder", "a").attr("placeholder", "b");
		assert_eq!(el.attribute("placeholder"), Some("b"));
		assert_eq!(el.attributes.len(), 1);
	}

	#[test]
	fn test_conditional_helpers() {
		let el = Element::new("button")
			.attr_if(true, "disabled", "")
			.attr_if(false, "hidden", "")
			.child_if(false, || Element::new("span"));
		assert_eq!(el.to_html(), "<button disabled></button>");
	}

	#[test]
	fn test_text_content_flattens_descendants() {
		let el = Element::new("div")
			.text("Page ")
			.child(Element::new("b").text("2"))
			.text(" of 7");
		assert_eq!(el.text_content(), "Page 2 of 7");
	}
}
