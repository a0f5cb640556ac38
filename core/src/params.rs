//! Request parameter assembly.
//!
//! Each builder maps a typed request onto an ordered list of name/value
//! pairs. Inclusion rules:
//! - `access_token` on every token-authenticated method, never on the
//!   anonymous reads (`getPage`, `getViews`).
//! - required fields always, even when empty; the server reports them.
//! - optional text fields (`author_name`, `author_url`, and `short_name`
//!   when editing) only when non-empty.
//! - the views granularity chain, see [`views_params`].

use url::form_urlencoded;

use crate::error::TelegraphError;
use crate::short_name::ShortName;
use crate::types::{Account, AccountField, Page, ViewsQuery};

/// Ordered request parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(Vec<(&'static str, String)>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: &'static str, value: impl Into<String>) {
        self.0.push((name, value.into()));
    }

    pub fn push_if_nonempty(&mut self, name: &'static str, value: &str) {
        if !value.is_empty() {
            self.push(name, value);
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.iter().find(|(n, _)| *n == name).map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Parameter names in insertion order.
    pub fn names(&self) -> Vec<&'static str> {
        self.0.iter().map(|(n, _)| *n).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(n, v)| (*n, v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `application/x-www-form-urlencoded` rendering.
    pub fn encode(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (name, value) in &self.0 {
            serializer.append_pair(name, value);
        }
        serializer.finish()
    }
}

fn bool_str(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

fn push_page_fields(params: &mut Params, page: &Page, return_content: bool) -> Result<(), TelegraphError> {
    params.push("title", page.title.as_str());
    params.push_if_nonempty("author_name", &page.author_name);
    params.push_if_nonempty("author_url", &page.author_url);
    params.push("return_content", bool_str(return_content));
    let content = serde_json::to_string(&page.content).map_err(TelegraphError::Encode)?;
    params.push("content", content);
    Ok(())
}

pub fn create_page_params(account: &Account, page: &Page, return_content: bool) -> Result<Params, TelegraphError> {
    let mut params = Params::new();
    params.push("access_token", account.access_token.as_str());
    push_page_fields(&mut params, page, return_content)?;
    Ok(params)
}

/// Same fields as `createPage`; the page path goes into the URL instead.
pub fn edit_page_params(account: &Account, update: &Page, return_content: bool) -> Result<Params, TelegraphError> {
    create_page_params(account, update, return_content)
}

pub fn get_page_params(return_content: bool) -> Params {
    let mut params = Params::new();
    params.push("return_content", bool_str(return_content));
    params
}

pub fn page_list_params(account: &Account, offset: u32, limit: u32) -> Params {
    let mut params = Params::new();
    params.push("access_token", account.access_token.as_str());
    params.push("offset", offset.to_string());
    params.push("limit", limit.to_string());
    params
}

/// One link of the views granularity chain: the parameter name, how to read
/// it from the query, and when it counts as given.
struct Granularity {
    name: &'static str,
    value: fn(&ViewsQuery) -> i32,
    valid: fn(i32) -> bool,
}

/// Finest first. A finer value requires every coarser one, so the first
/// invalid link drops itself and everything after it.
const VIEWS_CHAIN: [Granularity; 4] = [
    Granularity { name: "hour", value: |q| q.hour, valid: |v| v > -1 },
    Granularity { name: "day", value: |q| q.day, valid: |v| v > 0 },
    Granularity { name: "month", value: |q| q.month, valid: |v| v > 0 },
    Granularity { name: "year", value: |q| q.year, valid: |v| (2000..=2100).contains(&v) },
];

pub fn views_params(query: &ViewsQuery) -> Params {
    let mut params = Params::new();
    for link in &VIEWS_CHAIN {
        let value = (link.value)(query);
        if !(link.valid)(value) {
            break;
        }
        params.push(link.name, value.to_string());
    }
    params
}

pub fn create_account_params(short_name: &ShortName, author_name: &str, author_url: &str) -> Params {
    let mut params = Params::new();
    params.push("short_name", short_name.as_str());
    params.push_if_nonempty("author_name", author_name);
    params.push_if_nonempty("author_url", author_url);
    params
}

/// Only fields set on `update` are sent; the server leaves the rest as is.
pub fn edit_account_params(account: &Account, update: &Account) -> Params {
    let mut params = Params::new();
    params.push("access_token", account.access_token.as_str());
    if let Some(short_name) = &update.short_name {
        params.push("short_name", short_name.as_str());
    }
    params.push_if_nonempty("author_name", &update.author_name);
    params.push_if_nonempty("author_url", &update.author_url);
    params
}

pub fn account_info_params(account: &Account, fields: &[AccountField]) -> Result<Params, TelegraphError> {
    let mut params = Params::new();
    params.push("access_token", account.access_token.as_str());
    if !fields.is_empty() {
        let fields = serde_json::to_string(fields).map_err(TelegraphError::Encode)?;
        params.push("fields", fields);
    }
    Ok(params)
}

pub fn token_params(account: &Account) -> Params {
    let mut params = Params::new();
    params.push("access_token", account.access_token.as_str());
    params
}
