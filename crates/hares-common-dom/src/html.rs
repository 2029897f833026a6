// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! HTML serialization helpers.

/// Elements that never have a closing tag.
const VOID_ELEMENTS: &[&str] = &[
	"area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
	"wbr",
];

pub(crate) fn is_void(tag: &str) -> bool {
	VOID_ELEMENTS.contains(&tag)
}

/// Escape text for use between tags.
pub fn escape_text(text: &str) -> String {
	let mut out = String::with_capacity(text.len());
	for c in text.chars() {
		match c {
			'&' => out.push_str("&amp;"),
			'<' => out.push_str("&lt;"),
			'>' => out.push_str("&gt;"),
			_ => out.push(c),
		}
	}
	out
}

/// Escape text for use inside a double-quoted attribute value.
pub fn escape_attribute(value: &str) -> String {
	let mut out = String::with_capacity(value.len());
	for c in value.chars() {
		match c {
			'&' => out.push_str("&amp;"),
			'"' => out.push_str("&quot;"),
			'<' => out.push_str("&lt;"),
			'>' => out.push_str("&gt;"),
			_ => out.push(c),
		}
	}
	out
}

pub(crate) fn write_open_tag(out: &mut String, tag: &str, attributes: &[(String, String)]) {
	out.push('<');
	out.push_str(tag);
	for (name, value) in attributes {
		out.push(' ');
		out.push_str(name);
		if !value.is_empty() {
			out.push_str("=\"");
			out.push_str(&escape_attribute(value));
			out.push('"');
		}
	}
	out.push('>');
}

pub(crate) fn write_close_tag(out: &mut String, tag: &str) {
	if is_void(tag) {
		return;
	}
	out.push_str("</");
	out.push_str(tag);
	out.push('>');
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_escapes_markup_in_text() {
		assert_eq!(escape_text("a < b & c > d"), "a &lt; b &amp; c &gt; d");
	}

	#[test]
	fn test_escapes_quotes_in_attributes() {
		assert_eq!(escape_attribute(r#"{"x":"1"}"#), "{&quot;x&quot;:&quot;1&quot;}");
	}

	#[test]
	fn test_boolean_attributes_render_bare() {
		let mut out = String::new();
		write_open_tag(
			&mut out,
			"button",
			&[
				("class".to_string(), "btn".to_string()),
				("disabled".to_string(), String::new()),
			],
		);
		assert_eq!(out, r#"<button class="btn" disabled>"#);
	}

	#[test]
	fn test_void_elements_have_no_close_tag() {
		let mut out = String::new();
		write_close_tag(&mut out, "link");
		assert!(out.is_empty());
		write_close_tag(&mut out, "div");
		assert_eq!(out, "</div>");
	}
}
