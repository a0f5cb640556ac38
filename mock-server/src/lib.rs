use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Form, Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::info;
use uuid::Uuid;

type Args = HashMap<String, String>;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Page {
    pub path: String,
    pub url: String,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub author_name: String,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub author_url: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub content: Option<Value>,
    pub views: u64,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub can_edit: Option<bool>,
}

#[derive(Clone, Debug)]
struct AccountRecord {
    short_name: String,
    author_name: String,
    author_url: String,
    access_token: String,
}

#[derive(Clone, Debug)]
struct PageRecord {
    owner: Uuid,
    seq: u64,
    page: Page,
    content: Value,
}

#[derive(Default)]
pub struct Store {
    accounts: HashMap<Uuid, AccountRecord>,
    tokens: HashMap<String, Uuid>,
    pages: HashMap<String, PageRecord>,
    next_seq: u64,
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/createAccount", post(create_account))
        .route("/editAccountInfo", post(edit_account_info))
        .route("/getAccountInfo", post(get_account_info))
        .route("/revokeAccessToken", post(revoke_access_token))
        .route("/createPage", post(create_page))
        .route("/getPageList", post(get_page_list))
        .route("/editPage/{path}", post(edit_page))
        .route("/getPage/{path}", get(get_page))
        .route("/getViews/{path}", get(get_views))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn ok(result: Value) -> Json<Value> {
    Json(json!({ "ok": true, "result": result }))
}

fn fail(error: &str) -> Json<Value> {
    Json(json!({ "ok": false, "error": error }))
}

fn arg<'a>(args: &'a Args, name: &str) -> &'a str {
    args.get(name).map(String::as_str).unwrap_or("")
}

fn flag(args: &Args, name: &str) -> bool {
    arg(args, name) == "true"
}

fn new_token() -> String {
    Uuid::new_v4().simple().to_string()
}

fn auth_url(token: &str) -> String {
    format!("https://edit.telegra.ph/auth/{token}")
}

fn authenticate(store: &Store, args: &Args) -> Result<Uuid, Json<Value>> {
    store
        .tokens
        .get(arg(args, "access_token"))
        .copied()
        .ok_or_else(|| fail("ACCESS_TOKEN_INVALID"))
}

fn valid_short_name(name: &str) -> bool {
    (1..=32).contains(&name.chars().count())
}

/// `Title of page` + sequence number -> `Title-of-page-3`.
fn slug(title: &str, seq: u64) -> String {
    let words: Vec<String> = title
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect();
    if words.is_empty() {
        format!("Page-{seq}")
    } else {
        format!("{}-{seq}", words.join("-"))
    }
}

fn collect_text(node: &Value, out: &mut String) {
    match node {
        Value::String(s) => out.push_str(s),
        Value::Array(nodes) => nodes.iter().for_each(|n| collect_text(n, out)),
        Value::Object(element) => {
            if let Some(children) = element.get("children") {
                collect_text(children, out);
            }
        }
        _ => {}
    }
}

fn description(content: &Value) -> String {
    let mut text = String::new();
    collect_text(content, &mut text);
    text.chars().take(200).collect()
}

/// Validate title and content shared by createPage and editPage.
fn page_input(args: &Args) -> Result<(String, Value), Json<Value>> {
    let title = arg(args, "title");
    if title.is_empty() {
        return Err(fail("TITLE_REQUIRED"));
    }
    let raw = arg(args, "content");
    if raw.is_empty() {
        return Err(fail("CONTENT_REQUIRED"));
    }
    match serde_json::from_str::<Value>(raw) {
        Ok(content @ Value::Array(_)) => Ok((title.to_string(), content)),
        _ => Err(fail("CONTENT_FORMAT_INVALID")),
    }
}

fn render_page(record: &PageRecord, return_content: bool, can_edit: Option<bool>) -> Value {
    let mut page = record.page.clone();
    page.content = return_content.then(|| record.content.clone());
    page.can_edit = can_edit;
    json!(page)
}

async fn create_account(State(db): State<Db>, Form(args): Form<Args>) -> Json<Value> {
    let short_name = arg(&args, "short_name");
    if short_name.is_empty() {
        return fail("SHORT_NAME_REQUIRED");
    }
    if !valid_short_name(short_name) {
        return fail("SHORT_NAME_INVALID");
    }
    let record = AccountRecord {
        short_name: short_name.to_string(),
        author_name: arg(&args, "author_name").to_string(),
        author_url: arg(&args, "author_url").to_string(),
        access_token: new_token(),
    };
    let mut store = db.write().await;
    let id = Uuid::new_v4();
    store.tokens.insert(record.access_token.clone(), id);
    store.accounts.insert(id, record.clone());
    info!(short_name = %record.short_name, "account created");
    ok(json!({
        "short_name": record.short_name,
        "author_name": record.author_name,
        "author_url": record.author_url,
        "access_token": record.access_token,
        "auth_url": auth_url(&record.access_token),
    }))
}

async fn edit_account_info(State(db): State<Db>, Form(args): Form<Args>) -> Json<Value> {
    let mut store = db.write().await;
    let id = match authenticate(&store, &args) {
        Ok(id) => id,
        Err(e) => return e,
    };
    if let Some(short_name) = args.get("short_name") {
        if !valid_short_name(short_name) {
            return fail("SHORT_NAME_INVALID");
        }
    }
    let Some(account) = store.accounts.get_mut(&id) else {
        return fail("ACCESS_TOKEN_INVALID");
    };
    if let Some(short_name) = args.get("short_name") {
        account.short_name = short_name.clone();
    }
    if let Some(author_name) = args.get("author_name") {
        account.author_name = author_name.clone();
    }
    if let Some(author_url) = args.get("author_url") {
        account.author_url = author_url.clone();
    }
    ok(json!({
        "short_name": account.short_name,
        "author_name": account.author_name,
        "author_url": account.author_url,
    }))
}

async fn get_account_info(State(db): State<Db>, Form(args): Form<Args>) -> Json<Value> {
    let store = db.read().await;
    let id = match authenticate(&store, &args) {
        Ok(id) => id,
        Err(e) => return e,
    };
    let Some(account) = store.accounts.get(&id) else {
        return fail("ACCESS_TOKEN_INVALID");
    };
    let fields: Vec<String> = match args.get("fields") {
        None => vec!["short_name".into(), "author_name".into(), "author_url".into()],
        Some(raw) => match serde_json::from_str(raw) {
            Ok(fields) => fields,
            Err(_) => return fail("FIELDS_FORMAT_INVALID"),
        },
    };
    let mut result = serde_json::Map::new();
    for field in fields {
        let value = match field.as_str() {
            "short_name" => json!(account.short_name),
            "author_name" => json!(account.author_name),
            "author_url" => json!(account.author_url),
            "auth_url" => json!(auth_url(&account.access_token)),
            "page_count" => json!(store.pages.values().filter(|p| p.owner == id).count()),
            _ => return fail("FIELDS_FORMAT_INVALID"),
        };
        result.insert(field, value);
    }
    ok(Value::Object(result))
}

async fn revoke_access_token(State(db): State<Db>, Form(args): Form<Args>) -> Json<Value> {
    let mut store = db.write().await;
    let id = match authenticate(&store, &args) {
        Ok(id) => id,
        Err(e) => return e,
    };
    let token = new_token();
    store.tokens.remove(arg(&args, "access_token"));
    store.tokens.insert(token.clone(), id);
    let Some(account) = store.accounts.get_mut(&id) else {
        return fail("ACCESS_TOKEN_INVALID");
    };
    account.access_token = token.clone();
    info!("access token revoked");
    ok(json!({ "access_token": token, "auth_url": auth_url(&token) }))
}

async fn create_page(State(db): State<Db>, Form(args): Form<Args>) -> Json<Value> {
    let mut store = db.write().await;
    let owner = match authenticate(&store, &args) {
        Ok(id) => id,
        Err(e) => return e,
    };
    let (title, content) = match page_input(&args) {
        Ok(input) => input,
        Err(e) => return e,
    };
    store.next_seq += 1;
    let seq = store.next_seq;
    let path = slug(&title, seq);
    let record = PageRecord {
        owner,
        seq,
        page: Page {
            url: format!("https://telegra.ph/{path}"),
            path: path.clone(),
            title,
            description: description(&content),
            author_name: arg(&args, "author_name").to_string(),
            author_url: arg(&args, "author_url").to_string(),
            content: None,
            views: 0,
            can_edit: None,
        },
        content,
    };
    let result = render_page(&record, flag(&args, "return_content"), Some(true));
    store.pages.insert(path.clone(), record);
    info!(%path, "page created");
    ok(result)
}

async fn edit_page(State(db): State<Db>, Path(path): Path<String>, Form(args): Form<Args>) -> Json<Value> {
    let mut store = db.write().await;
    let owner = match authenticate(&store, &args) {
        Ok(id) => id,
        Err(e) => return e,
    };
    let (title, content) = match page_input(&args) {
        Ok(input) => input,
        Err(e) => return e,
    };
    let Some(record) = store.pages.get_mut(&path) else {
        return fail("PAGE_NOT_FOUND");
    };
    if record.owner != owner {
        return fail("PAGE_ACCESS_DENIED");
    }
    record.page.title = title;
    record.page.description = description(&content);
    if let Some(author_name) = args.get("author_name") {
        record.page.author_name = author_name.clone();
    }
    if let Some(author_url) = args.get("author_url") {
        record.page.author_url = author_url.clone();
    }
    record.content = content;
    info!(%path, "page edited");
    ok(render_page(record, flag(&args, "return_content"), Some(true)))
}

async fn get_page(State(db): State<Db>, Path(path): Path<String>, Query(args): Query<Args>) -> Json<Value> {
    let mut store = db.write().await;
    let Some(record) = store.pages.get_mut(&path) else {
        return fail("PAGE_NOT_FOUND");
    };
    record.page.views += 1;
    ok(render_page(record, flag(&args, "return_content"), None))
}

async fn get_page_list(State(db): State<Db>, Form(args): Form<Args>) -> Json<Value> {
    let store = db.read().await;
    let owner = match authenticate(&store, &args) {
        Ok(id) => id,
        Err(e) => return e,
    };
    let offset: usize = arg(&args, "offset").parse().unwrap_or(0);
    let limit: usize = match arg(&args, "limit") {
        "" => 50,
        raw => match raw.parse() {
            Ok(limit) if limit <= 200 => limit,
            _ => return fail("LIMIT_INVALID"),
        },
    };
    let mut owned: Vec<&PageRecord> = store.pages.values().filter(|p| p.owner == owner).collect();
    owned.sort_by(|a, b| b.seq.cmp(&a.seq));
    let pages: Vec<Value> = owned
        .iter()
        .skip(offset)
        .take(limit)
        .map(|record| render_page(record, false, Some(true)))
        .collect();
    ok(json!({ "total_count": owned.len(), "pages": pages }))
}

async fn get_views(State(db): State<Db>, Path(path): Path<String>, Query(args): Query<Args>) -> Json<Value> {
    let store = db.read().await;
    let Some(record) = store.pages.get(&path) else {
        return fail("PAGE_NOT_FOUND");
    };
    for (name, range) in [("hour", 0..=24), ("day", 1..=31), ("month", 1..=12), ("year", 2000..=2100)] {
        if let Some(raw) = args.get(name) {
            match raw.parse::<i64>() {
                Ok(v) if range.contains(&v) => {}
                _ => return fail(&format!("{}_INVALID", name.to_uppercase())),
            }
        }
    }
    // Every view the fake records happens "now", so any narrower window
    // that includes it sees the same count.
    ok(json!({ "views": record.page.views }))
}
