//! Full account and page lifecycle against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then drives every client call
//! over real HTTP through a ureq-backed `Transport`. Validates that request
//! building and envelope unwrapping work end-to-end with the actual server.

use telegraph_core::{
    Account, AccountField, HttpMethod, HttpRequest, HttpResponse, Node, NodeElement, Page, ShortName,
    TelegraphClient, TelegraphError, Transport, TransportError, ViewsQuery,
};

struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    /// Status codes are returned as data so the core decides what they mean.
    fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Transport for UreqTransport {
    fn perform(&self, req: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut response = match (req.method, &req.body) {
            (HttpMethod::Get, _) => self.agent.get(&req.path).call()?,
            (HttpMethod::Post, Some(body)) => self
                .agent
                .post(&req.path)
                .content_type("application/x-www-form-urlencoded")
                .send(body.as_bytes())?,
            (HttpMethod::Post, None) => self.agent.post(&req.path).send_empty()?,
        };

        let status = response.status().as_u16();
        let body = response.body_mut().read_to_string()?;

        Ok(HttpResponse {
            status,
            headers: Vec::new(),
            body,
        })
    }
}

fn start_server() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

#[test]
fn page_lifecycle() {
    let client = TelegraphClient::new(&start_server());
    let transport = UreqTransport::new();

    // Step 1: create an account.
    let short_name = ShortName::new("Sandbox").unwrap();
    let account = client
        .create_account(&transport, &short_name, "Anonymous", "")
        .unwrap();
    assert_eq!(account.short_name.as_ref(), Some(&short_name));
    assert_eq!(account.author_name, "Anonymous");
    assert!(!account.access_token.is_empty());

    // Step 2: no pages yet.
    let list = client.get_page_list(&transport, &account, 0, 50).unwrap();
    assert_eq!(list.total_count, 0);
    assert!(list.pages.is_empty());

    // Step 3: create a page.
    let content = vec![Node::from(
        NodeElement::new("p")
            .child("Hello, ")
            .child(NodeElement::new("a").attr("href", "https://telegra.ph/").child("world")),
    )];
    let draft = Page::draft("Integration test", content.clone());
    let created = client.create_page(&transport, &account, &draft, true).unwrap();
    assert_eq!(created.title, "Integration test");
    assert_eq!(created.content, content);
    assert!(created.can_edit);
    assert!(!created.path.is_empty());

    // Step 4: fetch it anonymously; content only when asked for.
    let fetched = client.get_page(&transport, &created.path, false).unwrap();
    assert_eq!(fetched.title, "Integration test");
    assert!(fetched.content.is_empty());
    let fetched = client.get_page(&transport, &created.path, true).unwrap();
    assert_eq!(fetched.content, content);

    // Step 5: two reads, two views, at every granularity.
    let views = client.get_views(&transport, &created.path, &ViewsQuery::total()).unwrap();
    assert_eq!(views.views, 2);
    let views = client
        .get_views(&transport, &created.path, &ViewsQuery::hour(2024, 3, 5, 10))
        .unwrap();
    assert_eq!(views.views, 2);

    // Step 6: edit title, content and author.
    let update = Page {
        path: created.path.clone(),
        author_name: "Editor".to_string(),
        ..Page::draft("Edited", vec![Node::text("bye")])
    };
    let edited = client.edit_page(&transport, &account, &update, true).unwrap();
    assert_eq!(edited.title, "Edited");
    assert_eq!(edited.author_name, "Editor");
    assert_eq!(edited.content, vec![Node::text("bye")]);
    assert_eq!(edited.path, created.path);

    // Step 7: list shows the page.
    let list = client.get_page_list(&transport, &account, 0, 50).unwrap();
    assert_eq!(list.total_count, 1);
    assert_eq!(list.pages[0].path, created.path);

    // Step 8: account info reflects the page count.
    let info = client
        .get_account_info(&transport, &account, &[AccountField::ShortName, AccountField::PageCount])
        .unwrap();
    assert_eq!(info.short_name, Some(short_name.clone()));
    assert_eq!(info.page_count, Some(1));

    // Step 9: rename the account.
    let renamed = ShortName::new("Renamed").unwrap();
    let update = Account {
        short_name: Some(renamed.clone()),
        ..Account::default()
    };
    let edited = client.edit_account_info(&transport, &account, &update).unwrap();
    assert_eq!(edited.short_name, Some(renamed));
    assert_eq!(edited.author_name, "Anonymous");

    // Step 10: revoke the token; the old one is refused.
    let revoked = client.revoke_access_token(&transport, &account).unwrap();
    assert_ne!(revoked.access_token, account.access_token);
    let err = client.get_page_list(&transport, &account, 0, 50).unwrap_err();
    assert_eq!(err.api_description(), Some("ACCESS_TOKEN_INVALID"));
    let list = client
        .get_page_list(&transport, &Account::with_token(revoked.access_token), 0, 50)
        .unwrap();
    assert_eq!(list.total_count, 1);
}

#[test]
fn api_errors_surface_verbatim() {
    let client = TelegraphClient::new(&start_server());
    let transport = UreqTransport::new();

    let err = client.get_page(&transport, "Missing-1", true).unwrap_err();
    assert!(matches!(&err, TelegraphError::Api(d) if d == "PAGE_NOT_FOUND"));

    let err = client
        .create_page(&transport, &Account::with_token("bogus"), &Page::draft("Hi", vec![Node::text("x")]), false)
        .unwrap_err();
    assert_eq!(err.api_description(), Some("ACCESS_TOKEN_INVALID"));

    let account = client
        .create_account(&transport, &ShortName::new("Sandbox").unwrap(), "", "")
        .unwrap();
    let err = client
        .create_page(&transport, &account, &Page::draft("", vec![Node::text("x")]), false)
        .unwrap_err();
    assert_eq!(err.api_description(), Some("TITLE_REQUIRED"));
}

#[test]
fn unreachable_server_is_a_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = TelegraphClient::new(&format!("http://{addr}"));
    let err = client
        .get_views(&UreqTransport::new(), "Anything", &ViewsQuery::total())
        .unwrap_err();
    assert!(matches!(err, TelegraphError::Transport(_)));
}
