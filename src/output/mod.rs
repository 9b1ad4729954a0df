pub mod report;

use serde::Serialize;

use crate::clock;
use crate::country::{CountryRecord, NOT_AVAILABLE};
use crate::page::{DetailPage, ListingPage};
use crate::render::join_or_na;
use crate::render::listing::CardLine;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    #[default]
    Html,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "text" | "txt" => Some(Self::Text),
            "json" => Some(Self::Json),
            "html" | "htm" => Some(Self::Html),
            _ => None,
        }
    }
}

pub fn infer_format_from_path(path: &str) -> Option<OutputFormat> {
    let lower = path.trim().to_lowercase();
    if lower.ends_with(".json") {
        return Some(OutputFormat::Json);
    }
    if lower.ends_with(".html") || lower.ends_with(".htm") {
        return Some(OutputFormat::Html);
    }
    if lower.ends_with(".txt") {
        return Some(OutputFormat::Text);
    }
    None
}

/// Flattened card contents, as shown on the listing view.
#[derive(Clone, Debug, Serialize)]
pub struct CardRecord {
    pub name: String,
    pub code: String,
    pub currencies: String,
    pub region: String,
    pub datetime: String,
    pub flag: Option<String>,
    pub map: Option<String>,
}

pub fn build_cards(records: &[&CountryRecord]) -> Vec<CardRecord> {
    records
        .iter()
        .map(|r| CardRecord {
            name: r.common_name().to_string(),
            code: r.cca3.clone(),
            currencies: join_or_na(r.currency_names()),
            region: r.region().unwrap_or(NOT_AVAILABLE).to_string(),
            datetime: clock::calculate_datetime(r.first_timezone()),
            flag: r.flag_svg().map(str::to_string),
            map: r.google_maps().map(str::to_string),
        })
        .collect()
}

fn card_info<'a>(card: &'a CardRecord, line: CardLine) -> &'a str {
    match line {
        CardLine::Datetime => &card.datetime,
        CardLine::Region => &card.region,
    }
}

pub fn render_listing(page: &ListingPage, format: OutputFormat) -> Vec<u8> {
    let visible = page.visible();
    match format {
        OutputFormat::Text => {
            let mut out = String::new();
            for card in build_cards(&visible) {
                out.push_str(&format!(
                    "{} [{}] | {} | {}\n",
                    card.name,
                    card.code,
                    card.currencies,
                    card_info(&card, page.card_line())
                ));
            }
            out.into_bytes()
        }
        OutputFormat::Json => serde_json::to_vec_pretty(&build_cards(&visible))
            .unwrap_or_else(|_| b"[]\n".to_vec()),
        OutputFormat::Html => report::render_listing_html(page),
    }
}

#[derive(Serialize)]
struct DetailJson<'a> {
    country: Option<&'a CountryRecord>,
    neighbours: &'a [String],
}

pub fn render_detail(page: &DetailPage, format: OutputFormat) -> Vec<u8> {
    let neighbours = page.neighbour_names();
    match format {
        OutputFormat::Text => {
            let Some(record) = page.record() else {
                return b"Unable to fetch country details.\n".to_vec();
            };
            let mut out = String::new();
            out.push_str(&format!("{}\n", record.common_name()));
            out.push_str(&format!("  Native Name: {}\n", record.native_name()));
            out.push_str(&format!(
                "  Capital: {}\n",
                record.capital().unwrap_or(NOT_AVAILABLE)
            ));
            out.push_str(&format!(
                "  Region: {}\n",
                record.region().unwrap_or(NOT_AVAILABLE)
            ));
            out.push_str(&format!(
                "  Subregion: {}\n",
                record.subregion().unwrap_or(NOT_AVAILABLE)
            ));
            out.push_str(&format!(
                "  Currencies: {}\n",
                record
                    .currency_labels()
                    .map(join_or_na)
                    .unwrap_or_else(|| NOT_AVAILABLE.to_string())
            ));
            out.push_str(&format!(
                "  Local time: {}\n",
                clock::calculate_datetime(record.first_timezone())
            ));
            out.push_str(&format!("  Neighbours: {}\n", join_or_na(neighbours)));
            out.into_bytes()
        }
        OutputFormat::Json => serde_json::to_vec_pretty(&DetailJson {
            country: page.record(),
            neighbours,
        })
        .unwrap_or_else(|_| b"{}\n".to_vec()),
        OutputFormat::Html => report::render_detail_html(page),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_and_infers_formats() {
        assert_eq!(OutputFormat::parse("JSON"), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::parse("txt"), Some(OutputFormat::Text));
        assert_eq!(OutputFormat::parse("xml"), None);
        assert_eq!(infer_format_from_path("out/cards.HTML"), Some(OutputFormat::Html));
        assert_eq!(infer_format_from_path("cards.json"), Some(OutputFormat::Json));
        assert_eq!(infer_format_from_path("cards"), None);
    }

    #[test]
    fn text_listing_follows_search() {
        let records: Vec<CountryRecord> = serde_json::from_value(json!([
            {"name": {"common": "France"}, "cca3": "FRA", "region": "Europe"},
            {"name": {"common": "Germany"}, "cca3": "DEU", "region": "Europe",
             "currencies": {"EUR": {"name": "Euro", "symbol": "€"}}}
        ]))
        .unwrap();
        let mut page = ListingPage::from_records(records, CardLine::Region);
        page.search("ger");
        let text = String::from_utf8(render_listing(&page, OutputFormat::Text)).unwrap();
        assert_eq!(text, "Germany [DEU] | Euro | Europe\n");
    }

    #[test]
    fn json_listing_is_an_array_of_cards() {
        let records: Vec<CountryRecord> =
            serde_json::from_value(json!([{"name": {"common": "France"}, "cca3": "FRA"}])).unwrap();
        let page = ListingPage::from_records(records, CardLine::Datetime);
        let value: serde_json::Value =
            serde_json::from_slice(&render_listing(&page, OutputFormat::Json)).unwrap();
        assert_eq!(value[0]["name"], "France");
        assert_eq!(value[0]["currencies"], "N/A");
        assert!(value[0]["flag"].is_null());
    }
}
