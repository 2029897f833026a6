// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Page navigation for list views.

use std::ops::RangeInclusive;

use hares_common_dom::Element;
use hares_common_i18n::{I18n, KEY_ATTR, OPTIONS_ATTR};

use crate::sidebar::label;

/// Most page buttons shown at once, excluding the first/last shortcuts.
pub const MAX_VISIBLE: u32 = 5;

/// Attribute carrying the page a button navigates to.
pub const PAGE_ATTR: &str = "data-page";

/// The run of page numbers around the current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
	current: u32,
	total: u32,
	start: u32,
	end: u32,
}

impl PageWindow {
	/// Returns `None` when there is nothing to paginate. `current` is clamped
	/// into `1..=total`.
	pub fn new(current: u32, total: u32) -> Option<Self> {
		if total <= 1 {
			return None;
		}
		let current = current.clamp(1, total);

		let mut start = current.saturating_sub(MAX_VISIBLE / 2).max(1);
		let end = start.saturating_add(MAX_VISIBLE - 1).min(total);
		if end - start < MAX_VISIBLE - 1 {
			start = end.saturating_sub(MAX_VISIBLE - 1).max(1);
		}

		Some(Self {
			current,
			total,
			start,
			end,
		})
	}

	pub fn current(&self) -> u32 {
		self.current
	}

	pub fn total(&self) -> u32 {
		self.total
	}

	pub fn pages(&self) -> RangeInclusive<u32> {
		self.start..=self.end
	}

	pub fn has_previous(&self) -> bool {
		self.current > 1
	}

	pub fn has_next(&self) -> bool {
		self.current < self.total
	}

	pub fn shows_first(&self) -> bool {
		self.start > 1
	}

	pub fn leading_ellipsis(&self) -> bool {
		self.start > 2
	}

	pub fn shows_last(&self) -> bool {
		self.end < self.total
	}

	pub fn trailing_ellipsis(&self) -> bool {
		self.end.saturating_add(1) < self.total
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
	current: u32,
	total: u32,
}

impl Pagination {
	pub fn new(current: u32, total: u32) -> Self {
		Self { current, total }
	}

	pub fn window(&self) -> Option<PageWindow> {
		PageWindow::new(self.current, self.total)
	}

	/// Renders the controls followed by the "Page X of Y" summary, or nothing
	/// for a single page.
	pub fn render(&self, i18n: &I18n) -> Option<Vec<Element>> {
		let window = self.window()?;

		let mut controls = Element::new("div").class("pagination").child(
			step_button(window.current - 1, !window.has_previous())
				.text("‹ ")
				.child(label(i18n, "common.previous")),
		);

		if window.shows_first() {
			controls = controls.child(page_button(1, false));
			if window.leading_ellipsis() {
				controls = controls.child(ellipsis());
			}
		}

		for page in window.pages() {
			controls = controls.child(page_button(page, page == window.current));
		}

		if window.shows_last() {
			if window.trailing_ellipsis() {
				controls = controls.child(ellipsis());
			}
			controls = controls.child(page_button(window.total, false));
		}

		controls = controls.child(
			step_button(window.current.saturating_add(1), !window.has_next())
				.child(label(i18n, "common.next"))
				.text(" ›"),
		);

		let current = window.current.to_string();
		let total = window.total.to_string();
		let summary = Element::new("div")
			.class("pagination-summary")
			.attr(KEY_ATTR, "common.page_of")
			.attr(
				OPTIONS_ATTR,
				format!(r#"{{"current":{current},"total":{total}}}"#),
			)
			.text(i18n.t_fmt(
				"common.page_of",
				&[("current", &current), ("total", &total)],
			));

		Some(vec![controls, summary])
	}
}

fn page_button(page: u32, active: bool) -> Element {
	Element::new("button")
		.class("btn")
		.class(if active { "btn-primary" } else { "btn-secondary" })
		.attr(PAGE_ATTR, page.to_string())
		.attr_if(active, "aria-current", "page")
		.text(page.to_string())
}

fn step_button(target: u32, disabled: bool) -> Element {
	Element::new("button")
		.class("btn btn-secondary")
		.attr(PAGE_ATTR, target.to_string())
		.attr_if(disabled, "disabled", "")
}

fn ellipsis() -> Element {
	Element::new("span").class("pagination-ellipsis").text("...")
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::test_support::english;
	use proptest::prelude::*;

	fn pages(current: u32, total: u32) -> Vec<u32> {
		PageWindow::new(current, total).unwrap().pages().collect()
	}

	#[test]
	fn test_single_page_renders_nothing() {
		assert!(PageWindow::new(1, 1).is_none());
		assert!(PageWindow::new(1, 0).is_none());
	}

	#[test]
	fn test_window_positions() {
		assert_eq!(pages(1, 3), vec![1, 2, 3]);
		assert_eq!(pages(1, 10), vec![1, 2, 3, 4, 5]);
		assert_eq!(pages(6, 10), vec![4, 5, 6, 7, 8]);
		assert_eq!(pages(10, 10), vec![6, 7, 8, 9, 10]);
		assert_eq!(pages(9, 10), vec![6, 7, 8, 9, 10]);
	}

	#[test]
	fn test_shortcuts_and_ellipses() {
		let w = PageWindow::new(6, 10).unwrap();
		assert!(w.shows_first() && w.leading_ellipsis());
		assert!(w.shows_last() && w.trailing_ellipsis());

		let w = PageWindow::new(4, 7).unwrap();
		assert_eq!(w.pages(), 2..=6);
		assert!(w.shows_first() && !w.leading_ellipsis());
		assert!(w.shows_last() && !w.trailing_ellipsis());

		let w = PageWindow::new(1, 5).unwrap();
		assert!(!w.shows_first() && !w.shows_last());
		assert!(!w.has_previous() && w.has_next());
	}

	#[test]
	fn test_current_is_clamped() {
		let w = PageWindow::new(40, 4).unwrap();
		assert_eq!(w.current(), 4);
		assert!(!w.has_next());
		assert_eq!(PageWindow::new(0, 4).unwrap().current(), 1);
	}

	#[test]
	fn test_window_at_u32_limit() {
		let w = PageWindow::new(u32::MAX, u32::MAX).unwrap();
		assert_eq!(w.pages(), u32::MAX - 4..=u32::MAX);
		assert!(!w.has_next() && !w.shows_last() && !w.trailing_ellipsis());
		assert!(w.shows_first() && w.leading_ellipsis());

		let w = PageWindow::new(u32::MAX - 2, u32::MAX).unwrap();
		assert_eq!(w.pages(), u32::MAX - 4..=u32::MAX);
	}

	#[tokio::test]
	async fn test_render_last_page_at_u32_limit() {
		let i18n = english().await;
		let elements = Pagination::new(u32::MAX, u32::MAX).render(&i18n).unwrap();
		let controls = elements[0].to_html();

		let max = u32::MAX;
		assert!(controls.contains(&format!(r#"data-page="{max}" disabled"#)), "{controls}");
		assert_eq!(elements[1].text_content(), format!("Page {max} of {max}"));
	}

	#[tokio::test]
	async fn test_render() {
		let i18n = english().await;
		assert!(Pagination::new(1, 1).render(&i18n).is_none());

		let elements = Pagination::new(1, 8).render(&i18n).unwrap();
		let controls = elements[0].to_html();
		let summary = &elements[1];

		assert!(controls.contains(r#"data-page="0" disabled"#), "{controls}");
		assert!(controls.contains(r#"class="btn btn-primary" data-page="1" aria-current="page">1</button>"#));
		assert!(controls.contains(r#"data-page="8">8</button>"#));
		assert!(controls.contains("..."));
		assert!(controls.contains(">Prev</span>"));
		assert_eq!(summary.text_content(), "Page 1 of 8");
		assert_eq!(summary.attribute(KEY_ATTR), Some("common.page_of"));
	}

	#[tokio::test]
	async fn test_summary_retranslates_with_its_options() {
		let i18n = english().await;
		let mut doc = hares_common_dom::Document::new();
		let body = doc.body();
		for element in Pagination::new(3, 12).render(&i18n).unwrap() {
			doc.append(body, element);
		}

		i18n.set_locale("ar", &mut doc).await;

		let summary = doc.query_by_attribute(OPTIONS_ATTR)[0];
		let text = doc.text_content(summary);
		assert!(text.contains('3') && text.contains("12"), "{text}");
		assert_ne!(text, "Page 3 of 12");
	}

	proptest! {
		#[test]
		fn window_is_bounded_and_contains_current(total in 2u32..=u32::MAX, current in any::<u32>()) {
			let w = PageWindow::new(current, total).unwrap();
			let pages: Vec<u32> = w.pages().collect();

			prop_assert!(pages.contains(&w.current()));
			prop_assert_eq!(pages.len() as u32, total.min(MAX_VISIBLE));
			prop_assert!(pages[0] >= 1);
			prop_assert!(*pages.last().unwrap() <= total);
			prop_assert_eq!(w.shows_first(), pages[0] != 1);
			prop_assert_eq!(w.shows_last(), *pages.last().unwrap() != total);
		}
	}
}
