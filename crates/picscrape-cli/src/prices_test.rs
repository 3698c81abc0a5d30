use std::path::PathBuf;

use picscrape_scraper::report_header;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::*;

fn test_config() -> AppConfig {
    AppConfig {
        log_level: "info".to_owned(),
        user_agent: "picscrape-test/0.1".to_owned(),
        request_timeout_secs: Some(5),
        output_path: PathBuf::from("unused.csv"),
    }
}

async fn mount_product(server: &MockServer, route: &str, title: &str, price: &str) {
    let body = format!(
        r#"<html><head><title>{title}</title></head><body>
<div class="pi-ProductDetails-salesPrice">{price}</div></body></html>"#
    );
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn tiers_print_in_fixed_order_under_one_header() {
    let server = MockServer::start().await;
    mount_product(&server, "/p/gratin", "Gratin dauphinois", "3,50 €").await;
    mount_product(&server, "/p/glace", "Glace vanille", "1,25 €").await;
    mount_product(&server, "/p/tarte", "Tarte aux pommes", "4,00 €").await;

    // 700 given first on purpose; the report still starts with tier 100.
    let urls700 = vec![format!("{}/p/gratin", server.uri())];
    let urls100 = vec![
        format!("{}/p/glace", server.uri()),
        format!("{}/p/tarte", server.uri()),
    ];

    let mut out = Vec::new();
    run_prices(
        &test_config(),
        Site::Picard,
        [urls100, Vec::new(), urls700],
        &mut out,
    )
    .await
    .expect("price report should succeed");

    let text = String::from_utf8(out).expect("report is utf-8");
    let lines: Vec<&str> = text.lines().collect();
    let header = report_header();

    assert_eq!(lines.len(), 5, "header, rule and three rows, got:\n{text}");
    assert_eq!(lines[0], header);
    assert_eq!(lines.iter().filter(|l| **l == header).count(), 1);
    assert!(lines[1].chars().all(|c| c == '-'));
    assert_eq!(lines[1].chars().count(), header.chars().count());

    assert!(lines[2].starts_with("100 "));
    assert!(lines[2].contains("Glace vanille"));
    assert!(lines[2].contains("0.013"));
    assert!(lines[3].starts_with("100 "));
    assert!(lines[3].contains("Tarte aux pommes"));
    assert!(lines[4].starts_with("700 "));
    assert!(lines[4].contains("Gratin dauphinois"));
    assert!(!text.lines().any(|l| l.starts_with("300 ")));
}

#[tokio::test]
async fn no_urls_prints_only_header_and_rule() {
    let mut out = Vec::new();
    run_prices(
        &test_config(),
        Site::Picard,
        [Vec::new(), Vec::new(), Vec::new()],
        &mut out,
    )
    .await
    .expect("price report should succeed");

    let text = String::from_utf8(out).expect("report is utf-8");
    assert_eq!(text.lines().count(), 2);
}
