// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

/// Translation keys for a page's header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageTitle {
	pub title_key: &'static str,
	pub subtitle_key: &'static str,
}

const fn entry(
	file: &'static str,
	title_key: &'static str,
	subtitle_key: &'static str,
) -> (&'static str, PageTitle) {
	(
		file,
		PageTitle {
			title_key,
			subtitle_key,
		},
	)
}

pub const PAGE_TITLES: &[(&str, PageTitle)] = &[
	entry("customers.html", "customers.title", "customers.customer_details"),
	entry("customers-new.html", "customers.add_customer", "customers.create_new_customer"),
	entry("customers-edit.html", "customers.edit_customer", "customers.update_customer_info"),
	entry("customers-view.html", "customers.customer_details", "customers.view_customer_info"),
	entry("loans.html", "loans.title", "loans.loan_details"),
	entry("loans-new.html", "loans.add_loan", "loans.create_new_loan"),
	entry("loans-edit.html", "loans.edit_loan", "loans.update_loan_info"),
	entry("loans-view.html", "loans.loan_details", "loans.view_loan_info"),
	entry("installments.html", "installments.title", "installments.payment_history"),
	entry(
		"installments-view.html",
		"installments.installment_details",
		"installments.view_installment_info",
	),
	entry("products.html", "products.title", "products.product_details"),
	entry("products-new.html", "products.add_product", "products.create_new_product"),
	entry("products-edit.html", "products.edit_product", "products.update_product_info"),
	entry("institutions.html", "institutions.title", "institutions.institution_details"),
	entry(
		"institutions-new.html",
		"institutions.add_institution",
		"institutions.create_new_institution",
	),
	entry(
		"institutions-edit.html",
		"institutions.edit_institution",
		"institutions.update_institution_info",
	),
	entry(
		"institutions-view.html",
		"institutions.institution_details",
		"institutions.view_institution_info",
	),
	entry("branches-new.html", "branches.add_branch", "branches.create_new_branch"),
	entry("branches-edit.html", "branches.edit_branch", "branches.update_branch_info"),
	entry("branches-view.html", "branches.branch_details", "branches.view_branch_info"),
	entry("users.html", "users.title", "users.user_details"),
	entry("users-new.html", "users.add_user", "users.create_new_user"),
	entry("users-edit.html", "users.edit_user", "users.update_user_info"),
	entry("search-logs.html", "search_logs.title", "search_logs.search_history"),
];

/// Looks up a page by file name. A leading directory is ignored.
pub fn page_title(file: &str) -> Option<PageTitle> {
	let name = file.rsplit('/').next().unwrap_or(file);
	PAGE_TITLES
		.iter()
		.find(|(page, _)| *page == name)
		.map(|(_, title)| *title)
}
