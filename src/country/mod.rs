use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

/// Placeholder rendered in place of any missing attribute.
pub const NOT_AVAILABLE: &str = "N/A";

/// Native-name key skipped when looking for a local name.
pub const ENGLISH_CODE: &str = "eng";

/// Decodes a field, or falls back to its default when the value is null or of
/// the wrong type, so one bad attribute cannot sink the whole record.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_default())
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct NativeName {
    pub official: Option<String>,
    pub common: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct CountryName {
    #[serde(deserialize_with = "lenient")]
    pub common: String,
    #[serde(deserialize_with = "lenient")]
    pub official: String,
    #[serde(
        rename = "nativeName",
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub native_name: Option<IndexMap<String, NativeName>>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Flags {
    pub png: Option<String>,
    pub svg: Option<String>,
    pub alt: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Currency {
    pub name: String,
    pub symbol: Option<String>,
}

/// International direct dialing prefix, e.g. root `+4` and suffixes `["9"]`.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Idd {
    pub root: Option<String>,
    pub suffixes: Vec<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Maps {
    #[serde(rename = "googleMaps")]
    pub google_maps: Option<String>,
    #[serde(rename = "openStreetMaps")]
    pub open_street_maps: Option<String>,
}

/// One country as returned by the REST Countries v3.1 API.
///
/// Every field tolerates absence, null and wrong types so that partially
/// populated records still decode. Map-valued fields keep the order the API
/// sent them in.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct CountryRecord {
    #[serde(deserialize_with = "lenient")]
    pub name: CountryName,
    #[serde(deserialize_with = "lenient")]
    pub cca2: String,
    #[serde(deserialize_with = "lenient")]
    pub cca3: String,
    #[serde(deserialize_with = "lenient")]
    pub capital: Option<Vec<String>>,
    #[serde(deserialize_with = "lenient")]
    pub region: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub subregion: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub population: Option<u64>,
    #[serde(deserialize_with = "lenient")]
    pub area: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    pub flags: Option<Flags>,
    #[serde(deserialize_with = "lenient")]
    pub timezones: Option<Vec<String>>,
    #[serde(deserialize_with = "lenient")]
    pub currencies: Option<IndexMap<String, Currency>>,
    #[serde(deserialize_with = "lenient")]
    pub languages: Option<IndexMap<String, String>>,
    #[serde(deserialize_with = "lenient")]
    pub idd: Option<Idd>,
    #[serde(deserialize_with = "lenient")]
    pub maps: Option<Maps>,
}

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(|s| s.as_str()).filter(|s| !s.is_empty())
}

impl CountryRecord {
    pub fn common_name(&self) -> &str {
        &self.name.common
    }

    pub fn flag_svg(&self) -> Option<&str> {
        non_empty(self.flags.as_ref().and_then(|f| f.svg.as_ref()))
    }

    pub fn capital(&self) -> Option<&str> {
        non_empty(self.capital.as_ref().and_then(|c| c.first()))
    }

    pub fn region(&self) -> Option<&str> {
        non_empty(self.region.as_ref())
    }

    pub fn subregion(&self) -> Option<&str> {
        non_empty(self.subregion.as_ref())
    }

    /// Zero counts as missing, matching how the listing site treated it.
    pub fn population(&self) -> Option<u64> {
        self.population.filter(|p| *p != 0)
    }

    pub fn area(&self) -> Option<f64> {
        self.area.filter(|a| *a != 0.0 && !a.is_nan())
    }

    pub fn first_timezone(&self) -> Option<&str> {
        non_empty(self.timezones.as_ref().and_then(|t| t.first()))
    }

    pub fn timezones(&self) -> Option<&[String]> {
        self.timezones.as_deref()
    }

    pub fn currency_names(&self) -> Vec<&str> {
        self.currencies
            .iter()
            .flat_map(|m| m.values())
            .map(|c| c.name.as_str())
            .collect()
    }

    /// `name (symbol)` for every currency, `None` when the field is absent.
    pub fn currency_labels(&self) -> Option<Vec<String>> {
        let currencies = self.currencies.as_ref()?;
        Some(
            currencies
                .values()
                .map(|c| {
                    let symbol = non_empty(c.symbol.as_ref()).unwrap_or(NOT_AVAILABLE);
                    format!("{} ({})", c.name, symbol)
                })
                .collect(),
        )
    }

    pub fn language_names(&self) -> Option<Vec<&str>> {
        self.languages
            .as_ref()
            .map(|l| l.values().map(|v| v.as_str()).collect())
    }

    /// Root plus first suffix, e.g. `+49`. Both parts must be present.
    pub fn calling_code(&self) -> Option<String> {
        let idd = self.idd.as_ref()?;
        let root = non_empty(idd.root.as_ref())?;
        let suffix = non_empty(idd.suffixes.first())?;
        Some(format!("{root}{suffix}"))
    }

    pub fn google_maps(&self) -> Option<&str> {
        non_empty(self.maps.as_ref().and_then(|m| m.google_maps.as_ref()))
    }

    pub fn native_name(&self) -> &str {
        non_english_native_name(self.name.native_name.as_ref())
    }

    /// Case-insensitive containment on the common name. `query` must already
    /// be lowercase.
    pub fn matches_query(&self, query: &str) -> bool {
        self.name.common.to_lowercase().contains(query)
    }
}

/// First native name whose language is not English and which carries a
/// common form, or [`NOT_AVAILABLE`].
pub fn non_english_native_name(names: Option<&IndexMap<String, NativeName>>) -> &str {
    let Some(names) = names else {
        return NOT_AVAILABLE;
    };
    names
        .iter()
        .filter(|(code, _)| code.as_str() != ENGLISH_CODE)
        .find_map(|(_, n)| non_empty(n.common.as_ref()))
        .unwrap_or(NOT_AVAILABLE)
}

/// Grouping used to pick the "neighbour" strip on the detail view.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NeighbourScope {
    #[default]
    Subregion,
    Region,
}

impl NeighbourScope {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "subregion" | "sub" => Some(Self::Subregion),
            "region" => Some(Self::Region),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Subregion => "subregion",
            Self::Region => "region",
        }
    }

    /// Raw grouping value of `record`, compared verbatim (absent equals absent).
    pub fn key(self, record: &CountryRecord) -> Option<&str> {
        match self {
            Self::Subregion => record.subregion.as_deref(),
            Self::Region => record.region.as_deref(),
        }
    }
}

/// Records sharing `group` under `scope`, minus the one named `exclude_name`.
pub fn neighbours<'a>(
    records: &'a [CountryRecord],
    scope: NeighbourScope,
    group: Option<&str>,
    exclude_name: &str,
) -> Vec<&'a CountryRecord> {
    records
        .iter()
        .filter(|r| scope.key(r) == group && r.common_name() != exclude_name)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: serde_json::Value) -> CountryRecord {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn mistyped_fields_become_absent() {
        let r = record(json!({
            "name": {"common": "Atlantis", "official": null},
            "cca3": null,
            "capital": "Poseidonia",
            "population": 1.5,
            "area": "large",
            "currencies": [],
            "region": "Atlantic"
        }));
        assert_eq!(r.common_name(), "Atlantis");
        assert_eq!(r.cca3, "");
        assert_eq!(r.capital(), None);
        assert_eq!(r.population(), None);
        assert_eq!(r.area(), None);
        assert_eq!(r.currency_labels(), None);
        assert_eq!(r.region(), Some("Atlantic"));
    }

    #[test]
    fn native_name_skips_english() {
        let r = record(json!({
            "name": {
                "common": "Germany",
                "nativeName": {
                    "eng": {"common": "Germany"},
                    "deu": {"common": "Deutschland", "official": "Bundesrepublik Deutschland"}
                }
            }
        }));
        assert_eq!(r.native_name(), "Deutschland");
    }

    #[test]
    fn native_name_only_english_is_not_available() {
        let r = record(json!({
            "name": {"common": "Jersey", "nativeName": {"eng": {"common": "Jersey"}}}
        }));
        assert_eq!(r.native_name(), NOT_AVAILABLE);
        assert_eq!(non_english_native_name(None), NOT_AVAILABLE);
    }

    #[test]
    fn native_name_keeps_api_order() {
        let r = record(json!({
            "name": {
                "common": "Switzerland",
                "nativeName": {
                    "fra": {"common": "Suisse"},
                    "gsw": {"common": "Schweiz"},
                    "ita": {"common": "Svizzera"}
                }
            }
        }));
        assert_eq!(r.native_name(), "Suisse");
    }

    #[test]
    fn native_name_without_common_is_skipped() {
        let r = record(json!({
            "name": {
                "common": "Somewhere",
                "nativeName": {"abc": {"official": "Only official"}, "xyz": {"common": "Local"}}
            }
        }));
        assert_eq!(r.native_name(), "Local");
    }

    #[test]
    fn calling_code_needs_root_and_suffix() {
        let full = record(json!({"idd": {"root": "+4", "suffixes": ["9"]}}));
        assert_eq!(full.calling_code().as_deref(), Some("+49"));
        let no_suffix = record(json!({"idd": {"root": "+4", "suffixes": []}}));
        assert_eq!(no_suffix.calling_code(), None);
        assert_eq!(CountryRecord::default().calling_code(), None);
    }

    #[test]
    fn currency_labels_fall_back_on_missing_symbol() {
        let r = record(json!({
            "currencies": {
                "EUR": {"name": "Euro", "symbol": "€"},
                "XXX": {"name": "Token"}
            }
        }));
        assert_eq!(
            r.currency_labels().unwrap(),
            vec!["Euro (€)".to_string(), "Token (N/A)".to_string()]
        );
        assert_eq!(r.currency_names(), vec!["Euro", "Token"]);
        assert!(CountryRecord::default().currency_labels().is_none());
    }

    #[test]
    fn zero_population_counts_as_missing() {
        let r = record(json!({"population": 0, "area": 14000000.0}));
        assert_eq!(r.population(), None);
        assert_eq!(r.area(), Some(14000000.0));
    }

    #[test]
    fn neighbours_share_group_and_exclude_self() {
        let records = vec![
            record(json!({"name": {"common": "France"}, "region": "Europe", "subregion": "Western Europe"})),
            record(json!({"name": {"common": "Belgium"}, "region": "Europe", "subregion": "Western Europe"})),
            record(json!({"name": {"common": "Poland"}, "region": "Europe", "subregion": "Central Europe"})),
            record(json!({"name": {"common": "Japan"}, "region": "Asia", "subregion": "Eastern Asia"})),
        ];

        let by_sub = neighbours(
            &records,
            NeighbourScope::Subregion,
            Some("Western Europe"),
            "France",
        );
        let names: Vec<_> = by_sub.iter().map(|r| r.common_name()).collect();
        assert_eq!(names, vec!["Belgium"]);

        let by_region = neighbours(&records, NeighbourScope::Region, Some("Europe"), "France");
        let names: Vec<_> = by_region.iter().map(|r| r.common_name()).collect();
        assert_eq!(names, vec!["Belgium", "Poland"]);
    }

    #[test]
    fn neighbour_scope_parses_labels() {
        assert_eq!(NeighbourScope::parse("Region"), Some(NeighbourScope::Region));
        assert_eq!(
            NeighbourScope::parse(" subregion "),
            Some(NeighbourScope::Subregion)
        );
        assert_eq!(NeighbourScope::parse("continent"), None);
    }

    #[test]
    fn search_match_is_case_insensitive() {
        let r = record(json!({"name": {"common": "Germany"}}));
        assert!(r.matches_query("ger"));
        assert!(r.matches_query("many"));
        assert!(!r.matches_query("fra"));
    }
}
