use crate::clock;
use crate::country::{CountryRecord, NOT_AVAILABLE};
use crate::render::{escape_html, join_or_na, Container, FLAG_PLACEHOLDER};

/// Sentinel stored on the map button when a record has no map link.
pub const MISSING_MAP_LINK: &str = "#";

/// Which informational line a card shows under its currency.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CardLine {
    #[default]
    Datetime,
    Region,
}

impl CardLine {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "datetime" | "time" => Some(Self::Datetime),
            "region" => Some(Self::Region),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Datetime => "datetime",
            Self::Region => "region",
        }
    }
}

pub fn render_card(record: &CountryRecord, line: CardLine) -> String {
    let name = escape_html(record.common_name());
    let flag = escape_html(record.flag_svg().unwrap_or(FLAG_PLACEHOLDER));
    let currencies = escape_html(&join_or_na(record.currency_names()));
    let info = match line {
        CardLine::Datetime => format!(
            r#"<p class="card-datetime">Current Date and Time: {}</p>"#,
            clock::calculate_datetime(record.first_timezone())
        ),
        CardLine::Region => format!(
            r#"<p class="card-region">Region: {}</p>"#,
            escape_html(record.region().unwrap_or(NOT_AVAILABLE))
        ),
    };
    let maps = escape_html(record.google_maps().unwrap_or(MISSING_MAP_LINK));
    let code = escape_html(&record.cca3);

    format!(
        r#"<div class="card">
  <img src="{flag}" alt="Flag of {name}" class="card-image" />
  <div class="card-content">
    <h2 class="card-heading">{name}</h2>
    <p class="card-currency">Currency: {currencies}</p>
    {info}
    <div class="card-buttons">
      <button class="card-button" data-maps-link="{maps}">Show Map</button>
      <button class="card-button" data-country-code="{code}">Detail</button>
    </div>
  </div>
</div>
"#
    )
}

/// Replaces the container's content with one card per record.
pub fn render_countries<'a, I>(container: &mut Container, records: I, line: CardLine)
where
    I: IntoIterator<Item = &'a CountryRecord>,
{
    container.clear();
    for record in records {
        container.append(&render_card(record, line));
    }
}
