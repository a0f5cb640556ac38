//! Telegraph API methods and the URL templates they resolve to.
//!
//! Account-scoped methods live at `{base}/{method}`; path-scoped methods
//! act on one page and live at `{base}/{method}/{path}`.

/// Production API root.
pub const DEFAULT_BASE_URL: &str = "https://api.telegra.ph";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    CreateAccount,
    EditAccountInfo,
    GetAccountInfo,
    RevokeAccessToken,
    CreatePage,
    EditPage,
    GetPage,
    GetPageList,
    GetViews,
}

impl Method {
    /// The method name as it appears in the URL.
    pub fn name(&self) -> &'static str {
        match self {
            Method::CreateAccount => "createAccount",
            Method::EditAccountInfo => "editAccountInfo",
            Method::GetAccountInfo => "getAccountInfo",
            Method::RevokeAccessToken => "revokeAccessToken",
            Method::CreatePage => "createPage",
            Method::EditPage => "editPage",
            Method::GetPage => "getPage",
            Method::GetPageList => "getPageList",
            Method::GetViews => "getViews",
        }
    }

    pub fn is_path_scoped(&self) -> bool {
        matches!(self, Method::EditPage | Method::GetPage | Method::GetViews)
    }
}

/// Render the endpoint URL for `method`.
///
/// `path` is only used by path-scoped methods; a leading `/` is dropped so
/// the path component of a page URL can be passed as is.
pub fn resolve(base_url: &str, method: Method, path: Option<&str>) -> String {
    match (method.is_path_scoped(), path) {
        (true, Some(path)) => format!("{base_url}/{}/{}", method.name(), path.trim_start_matches('/')),
        _ => format!("{base_url}/{}", method.name()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_scoped_template() {
        assert_eq!(resolve(DEFAULT_BASE_URL, Method::CreatePage, None), "https://api.telegra.ph/createPage");
        assert_eq!(resolve(DEFAULT_BASE_URL, Method::GetPageList, None), "https://api.telegra.ph/getPageList");
    }

    #[test]
    fn path_scoped_template() {
        assert_eq!(
            resolve(DEFAULT_BASE_URL, Method::GetViews, Some("Sample-Page-12-15")),
            "https://api.telegra.ph/getViews/Sample-Page-12-15"
        );
        assert_eq!(
            resolve(DEFAULT_BASE_URL, Method::EditPage, Some("/Sample-Page-12-15")),
            "https://api.telegra.ph/editPage/Sample-Page-12-15"
        );
    }

    #[test]
    fn account_scoped_ignores_path() {
        assert_eq!(
            resolve("http://localhost:3000", Method::CreatePage, Some("ignored")),
            "http://localhost:3000/createPage"
        );
    }

    #[test]
    fn scope_classification() {
        let path_scoped = [Method::EditPage, Method::GetPage, Method::GetViews];
        let account_scoped = [
            Method::CreateAccount,
            Method::EditAccountInfo,
            Method::GetAccountInfo,
            Method::RevokeAccessToken,
            Method::CreatePage,
            Method::GetPageList,
        ];
        assert!(path_scoped.iter().all(Method::is_path_scoped));
        assert!(!account_scoped.iter().any(Method::is_path_scoped));
    }
}
