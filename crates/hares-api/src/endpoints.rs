// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Endpoint groups, one per back office resource.
//!
//! List and detail payloads whose shape the front end does not inspect are
//! returned as [`serde_json::Value`].

use chrono::NaiveDate;
use reqwest::Method;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::info;

use crate::client::{ApiClient, LOGIN_ENDPOINT};
use crate::error::Result;
use crate::models::{Branch, Credentials, Id, Institution, LoanStatus, LoginResponse, PageRequest, User};

impl ApiClient {
	pub fn auth(&self) -> Auth<'_> {
		Auth(self)
	}

	pub fn users(&self) -> Users<'_> {
		Users(self)
	}

	pub fn institutions(&self) -> Institutions<'_> {
		Institutions(self)
	}

	pub fn branches(&self) -> Branches<'_> {
		Branches(self)
	}

	pub fn customers(&self) -> Customers<'_> {
		Customers(self)
	}

	pub fn products(&self) -> Products<'_> {
		Products(self)
	}

	pub fn loans(&self) -> Loans<'_> {
		Loans(self)
	}

	pub fn installments(&self) -> Installments<'_> {
		Installments(self)
	}

	pub fn search_logs(&self) -> SearchLogs<'_> {
		SearchLogs(self)
	}

	pub fn customer_notes(&self) -> CustomerNotes<'_> {
		CustomerNotes(self)
	}
}

pub struct Auth<'a>(&'a ApiClient);

impl Auth<'_> {
	/// Signs in and stores the returned token and user.
	pub async fn login(&self, credentials: &Credentials) -> Result<LoginResponse> {
		let response: LoginResponse = self
			.0
			.send(Method::POST, LOGIN_ENDPOINT, Some(credentials))
			.await?;
		self.0.session().save_auth_data(&response.token, &response.user)?;
		info!(user_id = %response.user.id, "signed in");
		Ok(response)
	}

	pub async fn profile(&self) -> Result<User> {
		self.0.get("/users/me", &[]).await
	}
}

pub struct Users<'a>(&'a ApiClient);

impl Users<'_> {
	pub async fn list(&self, page: PageRequest) -> Result<Value> {
		self.0.get("/users", &page.query()).await
	}

	pub async fn get(&self, id: &Id) -> Result<User> {
		self.0.get(&format!("/users/{id}"), &[]).await
	}

	pub async fn create<B: Serialize + ?Sized>(&self, data: &B) -> Result<User> {
		self.0.send(Method::POST, "/users", Some(data)).await
	}

	pub async fn update<B: Serialize + ?Sized>(&self, id: &Id, data: &B) -> Result<User> {
		self.0.send(Method::PATCH, &format!("/users/{id}"), Some(data)).await
	}

	pub async fn toggle_active(&self, id: &Id) -> Result<Value> {
		self.0
			.send(Method::PATCH, &format!("/users/{id}/toggle-active"), None::<&()>)
			.await
	}

	pub async fn delete(&self, id: &Id) -> Result<Value> {
		self.0
			.send(Method::DELETE, &format!("/users/{id}"), None::<&()>)
			.await
	}
}

pub struct Institutions<'a>(&'a ApiClient);

impl Institutions<'_> {
	pub async fn list(&self, page: PageRequest) -> Result<Value> {
		self.0.get("/institutions", &page.query()).await
	}

	pub async fn get(&self, id: &Id) -> Result<Institution> {
		self.0.get(&format!("/institutions/{id}"), &[]).await
	}

	pub async fn statistics(&self, id: &Id) -> Result<Value> {
		self.0.get(&format!("/institutions/{id}/statistics"), &[]).await
	}

	pub async fn create<B: Serialize + ?Sized>(&self, data: &B) -> Result<Institution> {
		self.0.send(Method::POST, "/institutions", Some(data)).await
	}

	pub async fn update<B: Serialize + ?Sized>(&self, id: &Id, data: &B) -> Result<Institution> {
		self.0
			.send(Method::PATCH, &format!("/institutions/{id}"), Some(data))
			.await
	}

	pub async fn toggle_active(&self, id: &Id) -> Result<Value> {
		self.0
			.send(Method::PATCH, &format!("/institutions/{id}/toggle-active"), None::<&()>)
			.await
	}

	pub async fn delete(&self, id: &Id) -> Result<Value> {
		self.0
			.send(Method::DELETE, &format!("/institutions/{id}"), None::<&()>)
			.await
	}
}

pub struct Branches<'a>(&'a ApiClient);

impl Branches<'_> {
	pub async fn list(&self, page: PageRequest, institution_id: Option<&Id>) -> Result<Value> {
		let mut query = page.query().to_vec();
		if let Some(id) = institution_id {
			query.push(("institutionId", id.to_string()));
		}
		self.0.get("/branches", &query).await
	}

	pub async fn get(&self, id: &Id) -> Result<Branch> {
		self.0.get(&format!("/branches/{id}"), &[]).await
	}

	pub async fn statistics(&self, id: &Id) -> Result<Value> {
		self.0.get(&format!("/branches/{id}/statistics"), &[]).await
	}

	pub async fn dashboard(&self, id: &Id) -> Result<Value> {
		self.0.get(&format!("/branches/{id}/dashboard"), &[]).await
	}

	pub async fn customers(&self, id: &Id) -> Result<Value> {
		self.0.get(&format!("/branches/{id}/customers"), &[]).await
	}

	pub async fn loans(&self, id: &Id) -> Result<Value> {
		self.0.get(&format!("/branches/{id}/loans"), &[]).await
	}

	pub async fn team(&self, id: &Id) -> Result<Value> {
		self.0.get(&format!("/branches/{id}/team"), &[]).await
	}

	pub async fn activities(&self, id: &Id) -> Result<Value> {
		self.0.get(&format!("/branches/{id}/activities"), &[]).await
	}

	pub async fn create<B: Serialize + ?Sized>(&self, data: &B) -> Result<Branch> {
		self.0.send(Method::POST, "/branches", Some(data)).await
	}

	pub async fn update<B: Serialize + ?Sized>(&self, id: &Id, data: &B) -> Result<Branch> {
		self.0
			.send(Method::PATCH, &format!("/branches/{id}"), Some(data))
			.await
	}

	pub async fn toggle_active(&self, id: &Id) -> Result<Value> {
		self.0
			.send(Method::PATCH, &format!("/branches/{id}/toggle-active"), None::<&()>)
			.await
	}

	pub async fn delete(&self, id: &Id) -> Result<Value> {
		self.0
			.send(Method::DELETE, &format!("/branches/{id}"), None::<&()>)
			.await
	}
}

pub struct Customers<'a>(&'a ApiClient);

impl Customers<'_> {
	pub async fn list(&self, page: PageRequest) -> Result<Value> {
		self.0.get("/customers", &page.query()).await
	}

	/// Free-form search, e.g. `[("nationalId", "123"), ("phone", "555")]`.
	pub async fn search(&self, params: &[(&str, &str)]) -> Result<Value> {
		let query: Vec<(&str, String)> = params.iter().map(|(k, v)| (*k, v.to_string())).collect();
		self.0.get("/customers/search", &query).await
	}

	pub async fn get(&self, id: &Id) -> Result<Value> {
		self.0.get(&format!("/customers/{id}"), &[]).await
	}

	pub async fn create<B: Serialize + ?Sized>(&self, data: &B) -> Result<Value> {
		self.0.send(Method::POST, "/customers", Some(data)).await
	}

	pub async fn update<B: Serialize + ?Sized>(&self, id: &Id, data: &B) -> Result<Value> {
		self.0
			.send(Method::PATCH, &format!("/customers/{id}"), Some(data))
			.await
	}

	pub async fn update_trust_status(&self, id: &Id, trust_status: &str) -> Result<Value> {
		self.0
			.send(
				Method::PATCH,
				&format!("/customers/{id}/trust-status"),
				Some(&json!({ "trust_status": trust_status })),
			)
			.await
	}

	pub async fn delete(&self, id: &Id) -> Result<Value> {
		self.0
			.send(Method::DELETE, &format!("/customers/{id}"), None::<&()>)
			.await
	}
}

pub struct Products<'a>(&'a ApiClient);

impl Products<'_> {
	pub async fn list(&self, page: PageRequest) -> Result<Value> {
		self.0.get("/products", &page.query()).await
	}

	pub async fn active(&self) -> Result<Value> {
		self.0.get("/products/active", &[]).await
	}

	pub async fn get(&self, id: &Id) -> Result<Value> {
		self.0.get(&format!("/products/{id}"), &[]).await
	}

	pub async fn create<B: Serialize + ?Sized>(&self, data: &B) -> Result<Value> {
		self.0.send(Method::POST, "/products", Some(data)).await
	}

	pub async fn update<B: Serialize + ?Sized>(&self, id: &Id, data: &B) -> Result<Value> {
		self.0
			.send(Method::PATCH, &format!("/products/{id}"), Some(data))
			.await
	}

	pub async fn toggle_active(&self, id: &Id) -> Result<Value> {
		self.0
			.send(Method::PATCH, &format!("/products/{id}/toggle-active"), None::<&()>)
			.await
	}

	pub async fn delete(&self, id: &Id) -> Result<Value> {
		self.0
			.send(Method::DELETE, &format!("/products/{id}"), None::<&()>)
			.await
	}
}

pub struct Loans<'a>(&'a ApiClient);

impl Loans<'_> {
	pub async fn list(&self, page: PageRequest) -> Result<Value> {
		self.0.get("/loans", &page.query()).await
	}

	pub async fn statistics(&self) -> Result<Value> {
		self.0.get("/loans/statistics", &[]).await
	}

	pub async fn by_customer(&self, customer_id: &Id) -> Result<Value> {
		self.0.get(&format!("/loans/customer/{customer_id}"), &[]).await
	}

	pub async fn by_branch(&self, branch_id: &Id) -> Result<Value> {
		self.0.get(&format!("/loans/branch/{branch_id}"), &[]).await
	}

	pub async fn by_status(&self, status: LoanStatus) -> Result<Value> {
		self.0.get(&format!("/loans/status/{status}"), &[]).await
	}

	pub async fn get(&self, id: &Id) -> Result<Value> {
		self.0.get(&format!("/loans/{id}"), &[]).await
	}

	pub async fn create<B: Serialize + ?Sized>(&self, data: &B) -> Result<Value> {
		self.0.send(Method::POST, "/loans", Some(data)).await
	}

	pub async fn update<B: Serialize + ?Sized>(&self, id: &Id, data: &B) -> Result<Value> {
		self.0
			.send(Method::PATCH, &format!("/loans/{id}"), Some(data))
			.await
	}

	pub async fn update_status(&self, id: &Id, status: LoanStatus) -> Result<Value> {
		self.0
			.send(
				Method::PATCH,
				&format!("/loans/{id}/status"),
				Some(&json!({ "status": status })),
			)
			.await
	}

	pub async fn installments(&self, loan_id: &Id) -> Result<Value> {
		self.0.get(&format!("/loans/{loan_id}/installments"), &[]).await
	}
}

pub struct Installments<'a>(&'a ApiClient);

impl Installments<'_> {
	pub async fn get(&self, id: &Id) -> Result<Value> {
		self.0.get(&format!("/installments/{id}"), &[]).await
	}

	pub async fn pay(&self, id: &Id, payment_date: NaiveDate) -> Result<Value> {
		self.0
			.send(
				Method::PATCH,
				&format!("/installments/{id}/pay"),
				Some(&json!({ "paymentDate": payment_date.format("%Y-%m-%d").to_string() })),
			)
			.await
	}

	pub async fn overdue(&self) -> Result<Value> {
		self.0.get("/installments/overdue", &[]).await
	}

	pub async fn update<B: Serialize + ?Sized>(&self, id: &Id, data: &B) -> Result<Value> {
		self.0
			.send(Method::PATCH, &format!("/installments/{id}"), Some(data))
			.await
	}
}

pub struct SearchLogs<'a>(&'a ApiClient);

impl SearchLogs<'_> {
	pub async fn list(&self, page: PageRequest) -> Result<Value> {
		self.0.get("/search-logs", &page.query()).await
	}

	pub async fn by_customer(&self, customer_id: &Id, page: PageRequest) -> Result<Value> {
		self.0
			.get(&format!("/search-logs/customer/{customer_id}"), &page.query())
			.await
	}

	pub async fn by_user(&self, user_id: &Id, page: PageRequest) -> Result<Value> {
		self.0
			.get(&format!("/search-logs/user/{user_id}"), &page.query())
			.await
	}

	pub async fn delete(&self, id: &Id) -> Result<Value> {
		self.0
			.send(Method::DELETE, &format!("/search-logs/{id}"), None::<&()>)
			.await
	}
}

pub struct CustomerNotes<'a>(&'a ApiClient);

impl CustomerNotes<'_> {
	/// Default page size when listing a single customer's notes.
	pub const CUSTOMER_PAGE: PageRequest = PageRequest { page: 1, limit: 100 };

	pub async fn list(&self, page: PageRequest) -> Result<Value> {
		self.0.get("/customer-notes", &page.query()).await
	}

	pub async fn by_customer(&self, customer_id: &Id, page: PageRequest) -> Result<Value> {
		self.0
			.get(&format!("/customer-notes/customer/{customer_id}"), &page.query())
			.await
	}

	pub async fn get(&self, id: &Id) -> Result<Value> {
		self.0.get(&format!("/customer-notes/{id}"), &[]).await
	}

	pub async fn create<B: Serialize + ?Sized>(&self, data: &B) -> Result<Value> {
		self.0.send(Method::POST, "/customer-notes", Some(data)).await
	}

	/// Notes are replaced wholesale with PUT, unlike other resources.
	pub async fn update<B: Serialize + ?Sized>(&self, id: &Id, data: &B) -> Result<Value> {
		self.0
			.send(Method::PUT, &format!("/customer-notes/{id}"), Some(data))
			.await
	}

	pub async fn delete(&self, id: &Id) -> Result<Value> {
		self.0
			.send(Method::DELETE, &format!("/customer-notes/{id}"), None::<&()>)
			.await
	}
}
