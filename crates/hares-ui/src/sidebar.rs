// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Role-filtered navigation sidebar.

use hares_api::{Session, User, LOGIN_PAGE};
use hares_common_dom::{Document, Element};
use hares_common_i18n::{I18n, KEY_ATTR};
use tracing::{debug, info};

/// Container the sidebar is rendered into.
pub const SIDEBAR_ID: &str = "sidebar";
/// Element showing the user's role and affiliation under their name.
pub const SIDEBAR_CONTEXT_ID: &str = "sidebarUserContext";
pub const LOGOUT_BUTTON_ID: &str = "logoutButton";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Visibility {
	Everyone,
	SuperAdmin,
	BranchManagers,
	UserManagers,
}

impl Visibility {
	fn allows(self, user: &User) -> bool {
		match self {
			Visibility::Everyone => true,
			Visibility::SuperAdmin => user.is_super_admin(),
			Visibility::BranchManagers => user.may_manage_branches(),
			Visibility::UserManagers => user.may_manage_users(),
		}
	}
}

/// One navigation entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
	pub page_id: &'static str,
	pub href: &'static str,
	pub label_key: &'static str,
	visibility: Visibility,
}

impl NavItem {
	pub fn link_id(&self) -> String {
		format!("nav-{}", self.page_id)
	}
}

pub static NAV_ITEMS: [NavItem; 9] = [
	NavItem {
		page_id: "dashboard",
		href: "dashboard.html",
		label_key: "navigation.dashboard",
		visibility: Visibility::Everyone,
	},
	NavItem {
		page_id: "institutions",
		href: "institutions.html",
		label_key: "navigation.institutions",
		visibility: Visibility::SuperAdmin,
	},
	NavItem {
		page_id: "branches",
		href: "branches.html",
		label_key: "navigation.branches",
		visibility: Visibility::BranchManagers,
	},
	NavItem {
		page_id: "customers",
		href: "customers.html",
		label_key: "navigation.customers",
		visibility: Visibility::Everyone,
	},
	NavItem {
		page_id: "loans",
		href: "loans.html",
		label_key: "navigation.loans",
		visibility: Visibility::Everyone,
	},
	NavItem {
		page_id: "installments",
		href: "installments.html",
		label_key: "navigation.installments",
		visibility: Visibility::Everyone,
	},
	NavItem {
		page_id: "products",
		href: "products.html",
		label_key: "navigation.products",
		visibility: Visibility::Everyone,
	},
	NavItem {
		page_id: "users",
		href: "users.html",
		label_key: "navigation.users",
		visibility: Visibility::UserManagers,
	},
	NavItem {
		page_id: "search-logs",
		href: "search-logs.html",
		label_key: "navigation.search_logs",
		visibility: Visibility::SuperAdmin,
	},
];

/// Navigation entries the user may see, in display order.
pub fn visible_items(user: &User) -> impl Iterator<Item = &'static NavItem> + '_ {
	NAV_ITEMS.iter().filter(move |item| item.visibility.allows(user))
}

/// A translated label that re-translates with the page.
pub(crate) fn label(i18n: &I18n, key: &str) -> Element {
	Element::new("span").attr(KEY_ATTR, key).text(i18n.t(key))
}

pub(crate) fn avatar(user: &User) -> Element {
	Element::new("div").class("avatar").text(user.initial())
}

#[derive(Debug, Clone)]
pub struct Sidebar<'a> {
	user: &'a User,
	logo_src: &'a str,
}

impl<'a> Sidebar<'a> {
	pub fn new(user: &'a User) -> Self {
		Self {
			user,
			logo_src: "../logo.png",
		}
	}

	pub fn logo_src(mut self, src: &'a str) -> Self {
		self.logo_src = src;
		self
	}

	pub fn render(&self, i18n: &I18n) -> Element {
		let nav_list = Element::new("ul").class("sidebar-nav").children(
			visible_items(self.user).map(|item| {
				Element::new("li").class("sidebar-nav-item").child(
					Element::new("a")
						.attr("href", item.href)
						.class("sidebar-nav-link")
						.id(item.link_id())
						.child(label(i18n, item.label_key)),
				)
			}),
		);

		let user_card = Element::new("div")
			.class("sidebar-user")
			.child(avatar(self.user))
			.child(
				Element::new("div")
					.class("sidebar-user-info")
					.child(Element::new("div").class("sidebar-user-name").text(&self.user.name))
					.child(
						Element::new("div")
							.id(SIDEBAR_CONTEXT_ID)
							.class("sidebar-user-context")
							.text(&self.user.role_name),
					),
			);

		let logout = Element::new("button")
			.id(LOGOUT_BUTTON_ID)
			.class("btn")
			.class("btn-secondary")
			.class("w-full")
			.attr("data-i18n-title", "common.logout_confirm")
			.child(label(i18n, "navigation.logout"));

		Element::new("div")
			.class("sidebar")
			.child(
				Element::new("div").class("sidebar-header").child(
					Element::new("img")
						.attr("src", self.logo_src)
						.attr("alt", "Logo"),
				),
			)
			.child(Element::new("nav").child(nav_list))
			.child(
				Element::new("div")
					.class("sidebar-footer")
					.child(user_card)
					.child(logout),
			)
	}
}

/// Marks `nav-<page_id>` as the active link. Unknown ids are ignored.
pub fn set_active_nav(document: &mut Document, page_id: &str) {
	match document.get_element_by_id(&format!("nav-{page_id}")) {
		Some(link) => document.add_class(link, "active"),
		None => debug!(page_id, "no navigation link for page"),
	}
}

/// Signs the user out and returns where to navigate next.
///
/// Asking for confirmation (`common.logout_confirm`) is the caller's job.
pub fn logout(session: &Session) -> &'static str {
	session.clear_auth_data();
	info!("user logged out");
	LOGIN_PAGE
}
