//! Stateless request builder and response parser for the Telegraph API.
//!
//! # Design
//! `TelegraphClient` holds only a `base_url` and carries no mutable state
//! between calls. Each API method is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. The call methods (`create_page`, `get_views`, ...) chain
//! the two around a single `Transport::perform` and stop at the first error.
//!
//! Token-authenticated methods are sent as form-encoded `POST`s; the
//! anonymous reads (`getPage`, `getViews`) are `GET`s with a query string.

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::endpoint::{self, Method, DEFAULT_BASE_URL};
use crate::envelope;
use crate::error::TelegraphError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport};
use crate::params::{self, Params};
use crate::short_name::ShortName;
use crate::types::{Account, AccountField, Page, PageList, PageViews, ViewsQuery};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Synchronous, stateless client for the Telegraph API.
#[derive(Debug, Clone)]
pub struct TelegraphClient {
    base_url: String,
}

impl Default for TelegraphClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl TelegraphClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn post(&self, method: Method, path: Option<&str>, params: Params) -> HttpRequest {
        let body = params.encode();
        HttpRequest {
            method: HttpMethod::Post,
            path: endpoint::resolve(&self.base_url, method, path),
            headers: vec![("content-type".to_string(), FORM_CONTENT_TYPE.to_string())],
            params,
            body: Some(body),
        }
    }

    fn get(&self, method: Method, path: Option<&str>, params: Params) -> HttpRequest {
        let mut url = endpoint::resolve(&self.base_url, method, path);
        if !params.is_empty() {
            url.push('?');
            url.push_str(&params.encode());
        }
        HttpRequest {
            method: HttpMethod::Get,
            path: url,
            headers: Vec::new(),
            params,
            body: None,
        }
    }

    // --- pages ---

    pub fn build_create_page(&self, account: &Account, page: &Page, return_content: bool) -> Result<HttpRequest, TelegraphError> {
        let params = params::create_page_params(account, page, return_content)?;
        Ok(self.post(Method::CreatePage, None, params))
    }

    /// `update.path` selects the page being edited.
    pub fn build_edit_page(&self, account: &Account, update: &Page, return_content: bool) -> Result<HttpRequest, TelegraphError> {
        let params = params::edit_page_params(account, update, return_content)?;
        Ok(self.post(Method::EditPage, Some(&update.path), params))
    }

    pub fn build_get_page(&self, path: &str, return_content: bool) -> HttpRequest {
        self.get(Method::GetPage, Some(path), params::get_page_params(return_content))
    }

    pub fn build_get_page_list(&self, account: &Account, offset: u32, limit: u32) -> HttpRequest {
        self.post(Method::GetPageList, None, params::page_list_params(account, offset, limit))
    }

    pub fn build_get_views(&self, path: &str, query: &ViewsQuery) -> HttpRequest {
        self.get(Method::GetViews, Some(path), params::views_params(query))
    }

    pub fn parse_create_page(&self, response: HttpResponse) -> Result<Page, TelegraphError> {
        envelope::unwrap(Method::CreatePage, response)
    }

    pub fn parse_edit_page(&self, response: HttpResponse) -> Result<Page, TelegraphError> {
        envelope::unwrap(Method::EditPage, response)
    }

    pub fn parse_get_page(&self, response: HttpResponse) -> Result<Page, TelegraphError> {
        envelope::unwrap(Method::GetPage, response)
    }

    pub fn parse_get_page_list(&self, response: HttpResponse) -> Result<PageList, TelegraphError> {
        envelope::unwrap(Method::GetPageList, response)
    }

    pub fn parse_get_views(&self, response: HttpResponse) -> Result<PageViews, TelegraphError> {
        envelope::unwrap(Method::GetViews, response)
    }

    // --- accounts ---

    pub fn build_create_account(&self, short_name: &ShortName, author_name: &str, author_url: &str) -> HttpRequest {
        self.post(Method::CreateAccount, None, params::create_account_params(short_name, author_name, author_url))
    }

    pub fn build_edit_account_info(&self, account: &Account, update: &Account) -> HttpRequest {
        self.post(Method::EditAccountInfo, None, params::edit_account_params(account, update))
    }

    pub fn build_get_account_info(&self, account: &Account, fields: &[AccountField]) -> Result<HttpRequest, TelegraphError> {
        let params = params::account_info_params(account, fields)?;
        Ok(self.post(Method::GetAccountInfo, None, params))
    }

    pub fn build_revoke_access_token(&self, account: &Account) -> HttpRequest {
        self.post(Method::RevokeAccessToken, None, params::token_params(account))
    }

    pub fn parse_create_account(&self, response: HttpResponse) -> Result<Account, TelegraphError> {
        envelope::unwrap(Method::CreateAccount, response)
    }

    pub fn parse_edit_account_info(&self, response: HttpResponse) -> Result<Account, TelegraphError> {
        envelope::unwrap(Method::EditAccountInfo, response)
    }

    pub fn parse_get_account_info(&self, response: HttpResponse) -> Result<Account, TelegraphError> {
        envelope::unwrap(Method::GetAccountInfo, response)
    }

    pub fn parse_revoke_access_token(&self, response: HttpResponse) -> Result<Account, TelegraphError> {
        envelope::unwrap(Method::RevokeAccessToken, response)
    }
}

/// Round-trip helpers: build, perform, unwrap.
impl TelegraphClient {
    fn call<T: DeserializeOwned>(&self, transport: &impl Transport, method: Method, request: HttpRequest) -> Result<T, TelegraphError> {
        debug!(
            method = method.name(),
            http_method = request.method.as_str(),
            url = %request.path,
            params = ?request.params.names(),
            "sending request"
        );
        let response = transport.perform(&request).map_err(|e| {
            debug!(method = method.name(), error = %e, "transport failed");
            TelegraphError::Transport(e)
        })?;
        envelope::unwrap(method, response)
    }

    pub fn create_page(&self, transport: &impl Transport, account: &Account, page: &Page, return_content: bool) -> Result<Page, TelegraphError> {
        let request = self.build_create_page(account, page, return_content)?;
        self.call(transport, Method::CreatePage, request)
    }

    pub fn edit_page(&self, transport: &impl Transport, account: &Account, update: &Page, return_content: bool) -> Result<Page, TelegraphError> {
        let request = self.build_edit_page(account, update, return_content)?;
        self.call(transport, Method::EditPage, request)
    }

    pub fn get_page(&self, transport: &impl Transport, path: &str, return_content: bool) -> Result<Page, TelegraphError> {
        self.call(transport, Method::GetPage, self.build_get_page(path, return_content))
    }

    pub fn get_page_list(&self, transport: &impl Transport, account: &Account, offset: u32, limit: u32) -> Result<PageList, TelegraphError> {
        self.call(transport, Method::GetPageList, self.build_get_page_list(account, offset, limit))
    }

    pub fn get_views(&self, transport: &impl Transport, path: &str, query: &ViewsQuery) -> Result<PageViews, TelegraphError> {
        self.call(transport, Method::GetViews, self.build_get_views(path, query))
    }

    pub fn create_account(&self, transport: &impl Transport, short_name: &ShortName, author_name: &str, author_url: &str) -> Result<Account, TelegraphError> {
        self.call(transport, Method::CreateAccount, self.build_create_account(short_name, author_name, author_url))
    }

    pub fn edit_account_info(&self, transport: &impl Transport, account: &Account, update: &Account) -> Result<Account, TelegraphError> {
        self.call(transport, Method::EditAccountInfo, self.build_edit_account_info(account, update))
    }

    pub fn get_account_info(&self, transport: &impl Transport, account: &Account, fields: &[AccountField]) -> Result<Account, TelegraphError> {
        let request = self.build_get_account_info(account, fields)?;
        self.call(transport, Method::GetAccountInfo, request)
    }

    /// Returns the account with its new `access_token` and `auth_url`; the
    /// old token stops working.
    pub fn revoke_access_token(&self, transport: &impl Transport, account: &Account) -> Result<Account, TelegraphError> {
        self.call(transport, Method::RevokeAccessToken, self.build_revoke_access_token(account))
    }
}
