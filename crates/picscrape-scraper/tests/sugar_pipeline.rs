//! Integration tests for the crawl → extract → CSV pipeline.
//!
//! A `wiremock` server plays the whole site: listing page, category pages
//! and product pages.

use futures::StreamExt;
use picscrape_core::{ProductLink, Site, SiteConfig};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use picscrape_scraper::{collect_products, write_csv, PageClient, SiteCrawl};

const HEADER: &str =
    "product name;category name;product url;reference quantity;sugar title;sugar content";

fn test_client() -> PageClient {
    PageClient::new(Some(5), "picscrape-test/0.1").expect("failed to build test PageClient")
}

fn test_config(server: &MockServer) -> SiteConfig {
    Site::Picard.config().with_origin(&server.uri())
}

fn listing_page(ids: &[&str]) -> String {
    let buttons: String = ids
        .iter()
        .map(|id| {
            format!(r#"<li class="pi-Nav-lvl1Item--treeview"><button id="{id}">{id}</button></li>"#)
        })
        .collect();
    format!("<html><body><nav><ul>{buttons}</ul></nav></body></html>")
}

fn category_page(hrefs: &[String]) -> String {
    let links: String = hrefs
        .iter()
        .map(|href| format!(r#"<li><a class="pi-ProductCard-link" href="{href}">x</a></li>"#))
        .collect();
    format!(r#"<html><body><ul id="search-result-items">{links}</ul></body></html>"#)
}

fn product_page(name: &str, sugar_cell: &str) -> String {
    format!(
        r#"<html><body>
<h1 class="pi-ProductPage-title">{name}</h1>
<table class="pi-ProductTabsNutrition-table">
  <thead><tr><th>Valeurs nutritionnelles</th><th>Pour 100 g</th></tr></thead>
  <tbody>
    <tr><td>Energie</td><td>845 kJ</td></tr>
    <tr><td>Glucides</td><td>24 g</td></tr>
    <tr><td>dont sucres</td><td>{sugar_cell}</td></tr>
  </tbody>
</table>
</body></html>"#
    )
}

async fn mount_html(server: &MockServer, route: &str, status: u16, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .mount(server)
        .await;
}

async fn mount_category(server: &MockServer, name: &str, hrefs: &[String]) {
    Mock::given(method("GET"))
        .and(path(format!("/rayons/{name}")))
        .and(query_param("start", "0"))
        .and(query_param("sz", "400"))
        .respond_with(ResponseTemplate::new(200).set_body_string(category_page(hrefs)))
        .expect(1)
        .mount(server)
        .await;
}

/// Two categories with two products each; `/produits/d` has no nutrition table.
async fn mount_site(server: &MockServer) {
    mount_html(
        server,
        "/",
        200,
        listing_page(&["navLinkglaces", "searchToggle", "navLinkdesserts"]),
    )
    .await;
    mount_category(
        server,
        "glaces",
        &["/produits/a".to_owned(), format!("{}/produits/b", server.uri())],
    )
    .await;
    mount_category(
        server,
        "desserts",
        &["/produits/c".to_owned(), "/produits/d".to_owned()],
    )
    .await;
    mount_html(server, "/produits/a", 200, product_page("Glace vanille", "100g 5,2g")).await;
    mount_html(server, "/produits/b", 200, product_page("Sorbet citron", "100g 1,0g")).await;
    mount_html(server, "/produits/c", 200, product_page("Tarte tatin", "100g 3,3 g")).await;
    mount_html(
        server,
        "/produits/d",
        200,
        "<html><body><h1 class=\"pi-ProductPage-title\">Coffret</h1></body></html>".to_owned(),
    )
    .await;
}

#[tokio::test]
async fn crawl_yields_products_in_category_then_page_order() {
    let server = MockServer::start().await;
    mount_site(&server).await;

    let client = test_client();
    let config = test_config(&server);
    let links: Vec<ProductLink> = SiteCrawl::new(&client, &config)
        .unwrap()
        .into_stream()
        .collect()
        .await;

    let base = server.uri();
    let expected: Vec<ProductLink> = [
        ("glaces", "/produits/a"),
        ("glaces", "/produits/b"),
        ("desserts", "/produits/c"),
        ("desserts", "/produits/d"),
    ]
    .iter()
    .map(|(category, p)| ProductLink {
        category: (*category).to_owned(),
        url: format!("{base}{p}"),
    })
    .collect();
    assert_eq!(links, expected);
}

#[tokio::test]
async fn crawl_fetches_category_pages_lazily() {
    let server = MockServer::start().await;
    mount_site(&server).await;

    let client = test_client();
    let config = test_config(&server);
    let mut crawl = SiteCrawl::new(&client, &config).unwrap();

    assert!(server.received_requests().await.unwrap().is_empty());

    let first = crawl.next_product().await.unwrap();
    assert_eq!(first.category, "glaces");

    let requested: Vec<String> = server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .map(|r| r.url.path().to_owned())
        .collect();
    assert_eq!(requested, vec!["/".to_owned(), "/rayons/glaces".to_owned()]);

    // Drain so the `expect(1)` on each category holds.
    while crawl.next_product().await.is_some() {}
}

#[tokio::test]
async fn crawl_skips_failing_category_page() {
    let server = MockServer::start().await;
    mount_html(
        &server,
        "/",
        200,
        listing_page(&["navLinkbroken", "navLinkdesserts"]),
    )
    .await;
    mount_html(&server, "/rayons/broken", 503, String::new()).await;
    mount_category(&server, "desserts", &["/produits/c".to_owned()]).await;

    let client = test_client();
    let config = test_config(&server);
    let links: Vec<ProductLink> = SiteCrawl::new(&client, &config)
        .unwrap()
        .into_stream()
        .collect()
        .await;

    assert_eq!(links.len(), 1);
    assert_eq!(links[0].category, "desserts");
}

#[tokio::test]
async fn crawl_without_listing_page_yields_nothing() {
    let server = MockServer::start().await;
    mount_html(&server, "/", 500, String::new()).await;

    let client = test_client();
    let config = test_config(&server);
    let mut crawl = SiteCrawl::new(&client, &config).unwrap();
    assert!(crawl.next_product().await.is_none());
}

#[tokio::test]
async fn pipeline_drops_failed_product_and_sorts_by_sugar() {
    let server = MockServer::start().await;
    mount_site(&server).await;

    let client = test_client();
    let config = test_config(&server);
    let products = collect_products(&client, &config)
        .await
        .expect("selectors are valid");
    assert_eq!(products.len(), 3, "4 discovered minus 1 failed");

    let out = std::env::temp_dir().join(format!("picscrape-e2e-{}.csv", std::process::id()));
    write_csv(&products, &out).expect("csv written");
    let content = std::fs::read_to_string(&out).unwrap();
    std::fs::remove_file(&out).ok();

    let base = server.uri();
    let expected = format!(
        "{HEADER}\n\
         Sorbet citron;glaces;{base}/produits/b;Pour 100 g;dont sucres;1.0\n\
         Tarte tatin;desserts;{base}/produits/c;Pour 100 g;dont sucres;3.3\n\
         Glace vanille;glaces;{base}/produits/a;Pour 100 g;dont sucres;5.2\n"
    );
    assert_eq!(content, expected);
}
