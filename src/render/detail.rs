use crate::country::{self, CountryRecord, NeighbourScope, NOT_AVAILABLE};
use crate::render::{
    escape_html, join_or_na, Container, FLAG_PLACEHOLDER, NEIGHBOUR_FLAG_PLACEHOLDER,
};
use crate::utils;

pub const UNABLE_TO_FETCH: &str =
    "<p>Unable to fetch country details. Please try again later.</p>";
pub const INVALID_CODE: &str = "<p>Invalid country code.</p>";

fn or_na(value: Option<String>) -> String {
    value.unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

pub fn render_country_details(container: &mut Container, record: Option<&CountryRecord>) {
    let Some(record) = record else {
        container.set_inner_html(UNABLE_TO_FETCH);
        return;
    };

    let name = escape_html(record.common_name());
    let flag = escape_html(record.flag_svg().unwrap_or(FLAG_PLACEHOLDER));
    let native_name = escape_html(record.native_name());
    let capital = escape_html(record.capital().unwrap_or(NOT_AVAILABLE));
    let region = escape_html(record.region().unwrap_or(NOT_AVAILABLE));
    let subregion = escape_html(record.subregion().unwrap_or(NOT_AVAILABLE));
    let population = or_na(record.population().map(utils::group_thousands_u64));
    let area = or_na(record.area().map(utils::group_thousands));
    let languages = escape_html(&or_na(record.language_names().map(join_or_na)));
    let currencies = escape_html(&or_na(record.currency_labels().map(join_or_na)));
    let calling_code = escape_html(&or_na(record.calling_code()));
    let timezones = escape_html(&or_na(record.timezones().map(join_or_na)));
    let maps = escape_html(record.google_maps().unwrap_or("#"));

    container.set_inner_html(format!(
        r#"
<div class="country-header">
  <h2>{name}</h2>
  <img src="{flag}" alt="Flag of {name}" class="country-flag" />
</div>
<div class="details-content">
  <p>Native Name: {native_name}</p>
  <p>Capital: {capital}</p>
  <p>Region: {region}</p>
  <p>Subregion: {subregion}</p>
  <p>Area: {area} Km<sup>2</sup></p>
  <p>Population: {population}</p>
  <p>Languages: {languages}</p>
  <p>Country Code: {calling_code}</p>
  <p>Currencies: {currencies}</p>
  <p>Timezones: {timezones}</p>
  <p>Google Maps: <a href="{maps}" target="_blank">View on Map</a></p>
</div>
"#
    ));
}

pub fn no_neighbours_message(scope: NeighbourScope) -> String {
    format!(
        "<p>No neighbouring countries found in this {}.</p>",
        scope.label()
    )
}

/// Flag strip of every record sharing `group` with the current country.
pub fn render_neighbours<'a>(
    container: &mut Container,
    records: &'a [CountryRecord],
    scope: NeighbourScope,
    group: Option<&str>,
    exclude_name: &str,
) -> Vec<&'a CountryRecord> {
    let found = country::neighbours(records, scope, group, exclude_name);
    if found.is_empty() {
        container.set_inner_html(no_neighbours_message(scope));
        return found;
    }

    let mut flags = String::new();
    for record in found.iter() {
        let name = escape_html(record.common_name());
        let flag = escape_html(record.flag_svg().unwrap_or(NEIGHBOUR_FLAG_PLACEHOLDER));
        let href = escape_html(&utils::detail_href(&record.cca3));
        flags.push_str(&format!(
            r#"
    <div class="neighbour-flag">
      <a href="{href}"><img src="{flag}" alt="Flag of {name}" class="flag-image" /></a>
    </div>"#
        ));
    }

    container.set_inner_html(format!(
        r#"
<h3>Neighbour Countries</h3>
<div class="flags-container">{flags}
</div>
"#
    ));
    found
}
