// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! View components for the Hares back office.
//!
//! Components render detached [`hares_common_dom::Element`] trees with their
//! labels already translated and tagged with `data-i18n-key`, so a later
//! [`hares_common_i18n::translate_page`] pass re-translates them in place.

mod debounce;
mod format;
mod header;
mod pagination;
mod shell;
mod sidebar;
mod switcher;
mod titles;
mod toast;

pub use debounce::Debouncer;
pub use format::{
	format_currency, format_date, format_date_str, format_date_time, format_date_time_str,
	format_relative_time, parse_timestamp, trust_status_badge, DEFAULT_TRUST_STATUS, INVALID_DATE,
};
pub use header::{apply_user_context, load_user_context, Header, HEADER_ID, USER_CONTEXT_ID};
pub use pagination::{PageWindow, Pagination, MAX_VISIBLE, PAGE_ATTR};
pub use shell::{page_id, PageShell, CONTENT_ID};
pub use sidebar::{
	logout, set_active_nav, visible_items, NavItem, Sidebar, LOGOUT_BUTTON_ID, NAV_ITEMS,
	SIDEBAR_CONTEXT_ID, SIDEBAR_ID,
};
pub use switcher::{label_for, toggle_target, LanguageSwitcher, SWITCHER_ID, SWITCHER_LABEL_ID};
pub use titles::{page_title, PageTitle, PAGE_TITLES};
pub use toast::{show_toast, ToastKind, ToastQueue, TOAST_LIFETIME};

#[cfg(test)]
pub(crate) mod test_support {
	use hares_api::{Id, User};
	use hares_common_dom::Document;
	use hares_common_i18n::{FixedLanguage, I18n, StaticBundleSource};
	use serde_json::Map;

	/// A controller with both builtin bundles available, initialised to English.
	pub async fn english() -> I18n {
		let i18n = I18n::builder(StaticBundleSource::builtin())
			.language_source(FixedLanguage::new("en-US"))
			.build();
		i18n.init(&mut Document::new()).await;
		i18n
	}

	pub fn user(role: &str, can_create_branches: Option<bool>) -> User {
		User {
			id: Id::from(1u64),
			name: "Amal".to_string(),
			email: None,
			role_name: role.to_string(),
			institution_id: None,
			branch_id: None,
			can_create_branches,
			extra: Map::new(),
		}
	}
}
