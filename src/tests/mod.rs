use serde_json::json;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use crate::country::{CountryRecord, NeighbourScope};
use crate::fetch::{CountryClient, HttpFetcher, StaticFetcher};
use crate::page::{Action, DetailPage, Event, ListingPage, UNABLE_TO_FETCH_COUNTRIES};
use crate::render::detail::{self, INVALID_CODE, UNABLE_TO_FETCH};
use crate::render::listing::CardLine;
use crate::render::Container;

const BASE: &str = "https://countries.test";

fn europe() -> serde_json::Value {
    json!([
        {"name": {"common": "France", "nativeName": {"fra": {"official": "République française", "common": "France"}}},
         "cca3": "FRA", "region": "Europe", "subregion": "Western Europe",
         "timezones": ["UTC-10:00", "UTC+01:00"],
         "currencies": {"EUR": {"name": "Euro", "symbol": "€"}}},
        {"name": {"common": "Germany", "nativeName": {"deu": {"official": "Bundesrepublik Deutschland", "common": "Deutschland"}}},
         "cca3": "DEU", "region": "Europe", "subregion": "Western Europe",
         "timezones": ["UTC+01:00"],
         "currencies": {"EUR": {"name": "Euro", "symbol": "€"}}},
        {"name": {"common": "Poland"}, "cca3": "POL", "region": "Europe", "subregion": "Central Europe"}
    ])
}

fn germany_only() -> serde_json::Value {
    json!([europe()[1].clone()])
}

/// Answers every connection with a bare 500.
async fn failing_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let mut buf = [0u8; 1024];
            let _ = socket.read(&mut buf).await;
            let _ = socket
                .write_all(b"HTTP/1.1 500 Internal Server Error\r\nContent-Length: 0\r\nConnection: close\r\n\r\n")
                .await;
            let _ = socket.shutdown().await;
        }
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn server_error_yields_empty_list() {
    let base = failing_server().await;
    let fetcher = HttpFetcher::new(Some(std::time::Duration::from_secs(5))).unwrap();
    let client = CountryClient::new(fetcher, &base);
    assert!(client.fetch_all_countries().await.is_empty());
    assert!(client.fetch_country_details("DEU").await.is_none());
}

#[tokio::test]
async fn listing_search_renders_single_card() {
    let client = CountryClient::new(
        StaticFetcher::new().with_json(format!("{BASE}/v3.1/all"), europe()),
        BASE,
    );
    let mut page = ListingPage::load(&client, CardLine::Datetime).await;
    assert!(!page.load_failed());
    assert_eq!(page.cards().inner_html().matches(r#"class="card""#).count(), 3);

    page.search("ger");
    let html = page.cards().inner_html();
    assert_eq!(html.matches(r#"class="card""#).count(), 1);
    assert!(html.contains("Germany"));
    assert!(html.contains("Currency: Euro"));
    assert!(html.contains(r#"data-country-code="DEU""#));
}

#[tokio::test]
async fn listing_failure_shows_message() {
    let client = CountryClient::new(
        StaticFetcher::new().with_status(format!("{BASE}/v3.1/all"), 500),
        BASE,
    );
    let page = ListingPage::load(&client, CardLine::Datetime).await;
    assert!(page.load_failed());
    assert_eq!(page.cards().inner_html(), UNABLE_TO_FETCH_COUNTRIES);
    assert!(page.visible().is_empty());
}

#[tokio::test]
async fn search_after_failed_load_keeps_message() {
    let client = CountryClient::new(
        StaticFetcher::new().with_status(format!("{BASE}/v3.1/all"), 500),
        BASE,
    );
    let mut page = ListingPage::load(&client, CardLine::Datetime).await;
    assert_eq!(page.search("ger"), Action::None);
    assert_eq!(page.dispatch(Event::SearchClick), Action::None);
    assert_eq!(page.cards().inner_html(), UNABLE_TO_FETCH_COUNTRIES);
}

#[tokio::test]
async fn malformed_record_still_lists_the_rest() {
    let client = CountryClient::new(
        StaticFetcher::new().with_json(
            format!("{BASE}/v3.1/all"),
            json!([
                {"name": {"common": "France"}, "cca3": "FRA", "region": "Europe"},
                {"name": {"common": "Atlantis"}, "cca3": null, "population": 1.5}
            ]),
        ),
        BASE,
    );
    let page = ListingPage::load(&client, CardLine::Region).await;
    assert!(!page.load_failed());
    let html = page.cards().inner_html();
    assert_eq!(html.matches(r#"class="card""#).count(), 2);
    assert!(html.contains("France"));
    assert!(html.contains("Atlantis"));
}

#[tokio::test]
async fn detail_rejects_non_alphanumeric_code() {
    let client = CountryClient::new(
        StaticFetcher::new().with_json(format!("{BASE}/v3.1/alpha/DE/X"), germany_only()),
        BASE,
    );
    let page = DetailPage::load(&client, "detail.html?country=de%2Fx", NeighbourScope::Subregion).await;
    assert_eq!(page.details().inner_html(), INVALID_CODE);
    assert!(page.record().is_none());
}

#[tokio::test]
async fn detail_without_code_is_invalid() {
    let client = CountryClient::new(StaticFetcher::new(), BASE);
    let page = DetailPage::load(&client, "detail.html", NeighbourScope::Subregion).await;
    assert_eq!(page.details().inner_html(), INVALID_CODE);
    assert!(page.neighbours().is_empty());

    let page = DetailPage::load(&client, "detail.html?country=", NeighbourScope::Subregion).await;
    assert_eq!(page.details().inner_html(), INVALID_CODE);
}

#[tokio::test]
async fn detail_lookup_failure_renders_error() {
    let client = CountryClient::new(StaticFetcher::new(), BASE);
    let page = DetailPage::load(&client, "detail.html?country=XYZ", NeighbourScope::Subregion).await;
    assert_eq!(page.details().inner_html(), UNABLE_TO_FETCH);
    assert!(page.record().is_none());
    assert!(page.neighbours().is_empty());
}

#[tokio::test]
async fn detail_lists_subregion_neighbours() {
    let client = CountryClient::new(
        StaticFetcher::new()
            .with_json(format!("{BASE}/v3.1/alpha/DEU"), germany_only())
            .with_json(format!("{BASE}/v3.1/all"), europe()),
        BASE,
    );
    let page = DetailPage::load(&client, "detail.html?country=deu", NeighbourScope::Subregion).await;
    assert!(page.details().inner_html().contains("Native Name: Deutschland"));
    assert_eq!(page.neighbour_names(), ["France".to_string()]);
    let strip = page.neighbours().inner_html();
    assert!(strip.contains("Flag of France"));
    assert!(!strip.contains("Flag of Germany"));
    assert!(!strip.contains("Flag of Poland"));
}

#[tokio::test]
async fn detail_region_scope_widens_neighbours() {
    let client = CountryClient::new(
        StaticFetcher::new()
            .with_json(format!("{BASE}/v3.1/alpha/DEU"), germany_only())
            .with_json(format!("{BASE}/v3.1/all"), europe()),
        BASE,
    );
    let page = DetailPage::load_code(&client, "DEU", NeighbourScope::Region).await;
    assert_eq!(
        page.neighbour_names(),
        ["France".to_string(), "Poland".to_string()]
    );
}

#[tokio::test]
async fn detail_without_list_reports_no_neighbours() {
    let client = CountryClient::new(
        StaticFetcher::new().with_json(format!("{BASE}/v3.1/alpha/DEU"), germany_only()),
        BASE,
    );
    let page = DetailPage::load_code(&client, "DEU", NeighbourScope::Subregion).await;
    assert!(page.record().is_some());
    assert_eq!(
        page.neighbours().inner_html(),
        "<p>No neighbouring countries found in this subregion.</p>"
    );
}

#[test]
fn detail_without_currencies_shows_placeholder() {
    let record: CountryRecord = serde_json::from_value(json!({
        "name": {"common": "Antarctica"},
        "cca3": "ATA",
        "region": "Antarctic"
    }))
    .unwrap();
    let mut c = Container::new("country-details");
    detail::render_country_details(&mut c, Some(&record));
    assert!(c.inner_html().contains("Currencies: N/A"));
}

#[test]
fn native_name_skips_english_entry() {
    let records: Vec<CountryRecord> = serde_json::from_value(json!([
        {"name": {"common": "Ireland", "nativeName": {
            "eng": {"official": "Ireland", "common": "Ireland"},
            "gle": {"official": "Poblacht na hÉireann", "common": "Éire"}
        }}},
        {"name": {"common": "United Kingdom", "nativeName": {
            "eng": {"official": "United Kingdom", "common": "United Kingdom"}
        }}}
    ]))
    .unwrap();
    assert_eq!(records[0].native_name(), "Éire");
    assert_eq!(records[1].native_name(), "N/A");
}
