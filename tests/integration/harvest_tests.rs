//! Integration tests for the harvester
//!
//! These tests use wiremock to serve a miniature shop and drive discovery,
//! extraction and export end-to-end through the real HTTP fetcher.

use shop_harvest::config::{HttpConfig, OutputConfig, SiteConfig};
use shop_harvest::url::UrlKind;
use shop_harvest::{Extractor, FetchError, HarvestError, HttpFetcher, UrlDiscovery};
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Serves `body` as HTML at `page_path`
async fn mount_page(server: &MockServer, page_path: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html; charset=utf-8"),
        )
        .mount(server)
        .await;
}

fn listing(pages: &[&str], cards: &[(&str, &str, u64)]) -> String {
    let pagination: String = pages
        .iter()
        .enumerate()
        .map(|(i, href)| format!(r#"<a href="{}">{}</a>"#, href, i + 1))
        .collect();
    let items: String = cards
        .iter()
        .map(|(href, name, price)| {
            format!(
                r#"<div class="item">
                    <a class="name_item" href="{href}">{name}</a>
                    <div class="description"><li>Бренд: {name}</li><li>Тип: базовый</li></div>
                    <p class="price">{price} руб</p>
                    <div class="sale_button"><a href="{href}">Подробнее</a></div>
                </div>"#
            )
        })
        .collect();
    format!(r#"<html><body>{items}<div class="pagen">{pagination}</div></body></html>"#)
}

fn card(name: &str, brand: &str, stock: u64, price: u64) -> String {
    format!(
        r#"<html><body>
            <p id="p_header">{name}</p>
            <p class="article">Артикул: 100{stock}</p>
            <ul id="description"><li>Бренд: {brand}</li><li>Материал: сталь</li></ul>
            <span id="in_stock">В наличии: {stock}</span>
            <span id="price">{price} руб</span>
            <span id="old_price">{old} руб</span>
        </body></html>"#,
        old = price * 2
    )
}

/// Start page, watch (two listing pages), mobile (one listing page), four cards
async fn mock_shop() -> MockServer {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/html/index.html",
        r#"<html><body><div class="nav_menu">
            <a href="index1_page_1.html"><div id="watch">Часы</div></a>
            <a href="index2_page_1.html"><div id="mobile">Телефоны</div></a>
        </div></body></html>"#
            .to_string(),
    )
    .await;

    let watch_pages = ["index1_page_1.html", "index1_page_2.html"];
    mount_page(
        &server,
        "/html/index1_page_1.html",
        listing(
            &watch_pages,
            &[
                ("watch/1/1_1.html", "Casio", 3500),
                ("watch/1/1_2.html", "Orient", 4100),
            ],
        ),
    )
    .await;
    mount_page(
        &server,
        "/html/index1_page_2.html",
        listing(&watch_pages, &[("watch/1/1_3.html", "Seiko", 9000)]),
    )
    .await;
    mount_page(
        &server,
        "/html/index2_page_1.html",
        listing(&["index2_page_1.html"], &[("mobile/2/2_1.html", "Nokia", 1200)]),
    )
    .await;

    mount_page(&server, "/html/watch/1/1_1.html", card("Casio", "Casio", 2, 3500)).await;
    mount_page(&server, "/html/watch/1/1_2.html", card("Orient", "Orient", 1, 4100)).await;
    mount_page(&server, "/html/watch/1/1_3.html", card("Seiko", "Seiko", 4, 9000)).await;
    mount_page(&server, "/html/mobile/2/2_1.html", card("Nokia", "Nokia", 10, 1200)).await;

    server
}

fn site(server: &MockServer) -> SiteConfig {
    SiteConfig {
        start_url: format!("{}/html/index.html", server.uri()),
        base_url: format!("{}/html/", server.uri()),
        ..SiteConfig::default()
    }
}

fn fetcher(timeout_secs: u64) -> HttpFetcher {
    let config = HttpConfig {
        timeout_secs,
        ..HttpConfig::default()
    };
    HttpFetcher::new(&config).expect("Failed to build HTTP client")
}

fn shop_url(server: &MockServer, page: &str) -> String {
    format!("{}/html/{}", server.uri(), page)
}

#[tokio::test]
async fn test_all_product_cards_in_listing_order() {
    let server = mock_shop().await;
    let discovery = UrlDiscovery::new(fetcher(4), site(&server));

    let urls = discovery.product_card_urls(None).await.expect("Discovery failed");

    assert_eq!(
        urls,
        vec![
            shop_url(&server, "watch/1/1_1.html"),
            shop_url(&server, "watch/1/1_2.html"),
            shop_url(&server, "watch/1/1_3.html"),
            shop_url(&server, "mobile/2/2_1.html"),
        ]
    );
}

#[tokio::test]
async fn test_product_cards_filtered_by_category() {
    let server = mock_shop().await;
    let discovery = UrlDiscovery::new(fetcher(4), site(&server));

    let watches = discovery.product_card_urls(Some("Watch")).await.unwrap();
    assert_eq!(watches.len(), 3);
    assert!(watches.iter().all(|u| u.contains("watch/1")));

    let phones = discovery.product_card_urls(Some("mobile")).await.unwrap();
    assert_eq!(phones, vec![shop_url(&server, "mobile/2/2_1.html")]);
}

#[tokio::test]
async fn test_invalid_category_is_rejected() {
    let server = mock_shop().await;
    let discovery = UrlDiscovery::new(fetcher(4), site(&server));

    let err = discovery
        .product_card_urls(Some("not-a-category"))
        .await
        .unwrap_err();

    assert!(matches!(err, HarvestError::InvalidCategory { .. }));
    assert!(err.to_string().contains("not-a-category"));
}

#[tokio::test]
async fn test_category_pages_are_stable_across_runs() {
    let server = mock_shop().await;
    let discovery = UrlDiscovery::new(fetcher(4), site(&server));

    let first = discovery.category_page_urls().await.unwrap();
    let second = discovery.category_page_urls().await.unwrap();

    assert_eq!(first, second);
    assert_eq!(
        first,
        vec![
            shop_url(&server, "index1_page_1.html"),
            shop_url(&server, "index1_page_2.html"),
            shop_url(&server, "index2_page_1.html"),
        ]
    );
}

#[tokio::test]
async fn test_export_two_cards_round_trip() {
    let server = mock_shop().await;
    let extractor = Extractor::new(fetcher(4), site(&server), OutputConfig::default());
    let dir = tempfile::tempdir().unwrap();

    let urls = vec![
        shop_url(&server, "watch/1/1_1.html"),
        shop_url(&server, "watch/1/1_2.html"),
    ];
    let report = extractor
        .export_rows(&urls, &dir.path().join("watches"), true)
        .await
        .expect("Export failed");

    assert_eq!(report.kind, UrlKind::ProductCard);
    assert_eq!(report.path, dir.path().join("watches.csv"));

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .from_path(&report.path)
        .unwrap();
    let records: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();

    assert_eq!(records.len(), urls.len() + 1);
    assert_eq!(records[0].get(0).unwrap().trim_start_matches('\u{feff}'), "name");
    assert_eq!(records[0].get(2), Some("Бренд"));
    assert_eq!(records[1].get(0), Some("Casio"));
    assert_eq!(records[1].get(1), Some("1002"));
    assert_eq!(records[2].get(7), Some(urls[1].as_str()));
}

#[tokio::test]
async fn test_export_listing_pages() {
    let server = mock_shop().await;
    let site = site(&server);
    let discovery = UrlDiscovery::new(fetcher(4), site.clone());
    let extractor = Extractor::new(fetcher(4), site, OutputConfig::default());
    let dir = tempfile::tempdir().unwrap();

    let pages = discovery.category_page_urls().await.unwrap();
    let report = extractor
        .export_rows(&pages, &dir.path().join("listing.csv"), true)
        .await
        .unwrap();

    assert_eq!(report.kind, UrlKind::ListingPage);
    assert_eq!(report.rows, 4);

    let content = std::fs::read_to_string(&report.path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines[0].trim_start_matches('\u{feff}'), "name;Бренд;Тип;price");
    assert_eq!(lines[3], "Seiko;Seiko;базовый;9000 руб");
}

#[tokio::test]
async fn test_total_value_of_all_stock() {
    let server = mock_shop().await;
    let site = site(&server);
    let discovery = UrlDiscovery::new(fetcher(4), site.clone());
    let extractor = Extractor::new(fetcher(4), site, OutputConfig::default());

    let urls = discovery.product_card_urls(None).await.unwrap();
    let total = extractor.total_value(&urls).await.unwrap();

    assert_eq!(total, 2 * 3500 + 4100 + 4 * 9000 + 10 * 1200);
}

#[tokio::test]
async fn test_slow_page_times_out_the_batch() {
    let server = mock_shop().await;

    // Outranks the regular page mounted by mock_shop
    Mock::given(method("GET"))
        .and(path("/html/index1_page_2.html"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<html></html>")
                .set_delay(Duration::from_secs(3)),
        )
        .with_priority(1)
        .mount(&server)
        .await;

    let discovery = UrlDiscovery::new(fetcher(1), site(&server));
    let err = discovery.product_card_urls(None).await.unwrap_err();

    match err {
        HarvestError::Fetch(FetchError::Timeout { url }) => {
            assert!(url.ends_with("index1_page_2.html"))
        }
        other => panic!("expected timeout, got {other:?}"),
    }
}

#[tokio::test]
async fn test_missing_page_is_status_error() {
    let server = mock_shop().await;
    let extractor = Extractor::new(fetcher(4), site(&server), OutputConfig::default());

    let err = extractor
        .product_records(&[shop_url(&server, "watch/1/1_99.html")])
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        HarvestError::Fetch(FetchError::Status { status: 404, .. })
    ));
}
