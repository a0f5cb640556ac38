//! Domain DTOs for the Telegraph API.
//!
//! # Design
//! These mirror the wire objects the API returns inside the envelope's
//! `result`. Optional text fields default to the empty string, which is also
//! how the parameter builder decides whether to send them. The mock-server
//! crate defines its own copies; integration tests catch schema drift.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::short_name::ShortName;

/// A Telegraph account.
///
/// `access_token` is only present on `createAccount` and
/// `revokeAccessToken` responses; `auth_url` and `page_count` only when
/// requested through `getAccountInfo`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Account {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_name: Option<ShortName>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub author_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub author_url: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub access_token: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub auth_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_count: Option<u64>,
}

impl Account {
    /// An account handle that only carries a token, enough for every
    /// token-authenticated call.
    pub fn with_token(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            ..Self::default()
        }
    }
}

/// Account fields that `getAccountInfo` can be asked to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountField {
    ShortName,
    AuthorName,
    AuthorUrl,
    AuthUrl,
    PageCount,
}

impl AccountField {
    /// What the API returns when `fields` is not narrowed.
    pub const DEFAULT: [AccountField; 3] = [AccountField::ShortName, AccountField::AuthorName, AccountField::AuthorUrl];
}

/// A Telegraph page.
///
/// `path` is assigned by the server; for `editPage` it must hold the path
/// of the page being edited.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Page {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub path: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub url: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub author_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub author_url: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub image_url: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub content: Vec<Node>,
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub can_edit: bool,
}

impl Page {
    /// A draft ready for `createPage`.
    pub fn draft(title: impl Into<String>, content: Vec<Node>) -> Self {
        Self {
            title: title.into(),
            content,
            ..Self::default()
        }
    }
}

/// A page of results from `getPageList`, most recently created first.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PageList {
    pub total_count: u64,
    #[serde(default)]
    pub pages: Vec<Page>,
}

/// View count for the granularity that was queried.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PageViews {
    pub views: u64,
}

/// Granularity selector for `getViews`.
///
/// The default asks for total views. Narrowing to a year needs a month, a
/// month needs a day, and a day needs an hour; see `params::views_params`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewsQuery {
    pub year: i32,
    pub month: i32,
    pub day: i32,
    /// 0-24; negative means "not given".
    pub hour: i32,
}

impl Default for ViewsQuery {
    fn default() -> Self {
        Self { year: 0, month: 0, day: 0, hour: -1 }
    }
}

impl ViewsQuery {
    pub fn total() -> Self {
        Self::default()
    }

    pub fn hour(year: i32, month: i32, day: i32, hour: i32) -> Self {
        Self { year, month, day, hour }
    }
}

/// A node of a page's content tree: a text leaf or an element.
///
/// On the wire a text leaf is a bare JSON string and an element is an object.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Node {
    Text(String),
    Element(NodeElement),
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(text.into())
    }
}

impl From<NodeElement> for Node {
    fn from(element: NodeElement) -> Self {
        Node::Element(element)
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Node::Text(text.to_string())
    }
}

/// A DOM element such as `p`, `a` or `figure`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct NodeElement {
    pub tag: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attrs: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

impl NodeElement {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_node_serializes_as_bare_string() {
        let json = serde_json::to_string(&vec![Node::text("hello")]).unwrap();
        assert_eq!(json, r#"["hello"]"#);
    }

    #[test]
    fn element_omits_empty_attrs_and_children() {
        let node: Node = NodeElement::new("br").into();
        assert_eq!(serde_json::to_string(&node).unwrap(), r#"{"tag":"br"}"#);
    }

    #[test]
    fn nested_tree_parses() {
        let raw = r#"[{"tag":"p","children":["Hello, ",{"tag":"a","attrs":{"href":"https://t.me/"},"children":["world"]}]}]"#;
        let content: Vec<Node> = serde_json::from_str(raw).unwrap();
        let expected = vec![Node::from(
            NodeElement::new("p")
                .child("Hello, ")
                .child(NodeElement::new("a").attr("href", "https://t.me/").child("world")),
        )];
        assert_eq!(content, expected);
    }

    #[test]
    fn page_defaults_missing_fields() {
        let page: Page = serde_json::from_str(r#"{"path":"Sample-01-01","url":"https://telegra.ph/Sample-01-01","title":"Sample","views":7}"#).unwrap();
        assert_eq!(page.path, "Sample-01-01");
        assert_eq!(page.views, 7);
        assert!(page.content.is_empty());
        assert!(page.author_name.is_empty());
        assert!(!page.can_edit);
    }

    #[test]
    fn account_rejects_invalid_short_name() {
        let result: Result<Account, _> = serde_json::from_str(r#"{"short_name":""}"#);
        assert!(result.is_err());
    }

    #[test]
    fn account_fields_use_snake_case() {
        let json = serde_json::to_string(&[AccountField::AuthUrl, AccountField::PageCount]).unwrap();
        assert_eq!(json, r#"["auth_url","page_count"]"#);
    }
}
