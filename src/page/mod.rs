//! Page controllers: one per view, owning the containers the renderers write
//! into and the handlers wired to the rendered controls.

use crate::country::{CountryRecord, NeighbourScope};
use crate::fetch::{CountryClient, Fetch};
use crate::render::detail::{self, INVALID_CODE, UNABLE_TO_FETCH};
use crate::render::listing::{self, CardLine, MISSING_MAP_LINK};
use crate::render::Container;
use crate::utils;

pub const CARDS_CONTAINER: &str = "cards-container";
pub const DETAILS_CONTAINER: &str = "country-details";
pub const NEIGHBOURS_CONTAINER: &str = "neighbour-countries";

pub const COUNTRY_PARAM: &str = "country";
pub const MAP_UNAVAILABLE: &str = "Google Maps link not available for this country.";
pub const UNABLE_TO_FETCH_COUNTRIES: &str =
    "<p>Unable to fetch countries. Please try again later.</p>";

/// User interaction on the listing view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// The search input now holds this text.
    Input(String),
    SearchClick,
    KeyUp(String),
    MapClick { link: String },
    DetailClick { code: String },
}

/// What the host should do after an event was handled.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    None,
    Rendered { count: usize },
    OpenExternal(String),
    Navigate(String),
    Alert(String),
}

/// Search box state bound to the list fetched at load time.
#[derive(Clone, Debug)]
pub struct SearchController {
    records: Vec<CountryRecord>,
    input: String,
    query: String,
}

impl SearchController {
    pub fn records(&self) -> &[CountryRecord] {
        &self.records
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// The query last applied by a click or Enter, lowercased.
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn filtered(&self) -> Vec<&CountryRecord> {
        self.records
            .iter()
            .filter(|r| r.matches_query(&self.query))
            .collect()
    }

    fn run(&mut self, cards: &mut Container, line: CardLine) -> Action {
        self.query = self.input.to_lowercase();
        let filtered = self.filtered();
        let count = filtered.len();
        listing::render_countries(cards, filtered, line);
        log::debug!("search '{}' matched {count} countries", self.query);
        Action::Rendered { count }
    }

    pub fn handle(&mut self, event: &Event, cards: &mut Container, line: CardLine) -> Action {
        match event {
            Event::Input(text) => {
                self.input = text.clone();
                Action::None
            }
            Event::SearchClick => self.run(cards, line),
            Event::KeyUp(key) if key == "Enter" => self.run(cards, line),
            _ => Action::None,
        }
    }
}

pub fn setup_search(records: Vec<CountryRecord>) -> SearchController {
    SearchController {
        records,
        input: String::new(),
        query: String::new(),
    }
}

fn card_button_action(event: &Event) -> Action {
    match event {
        Event::MapClick { link } if !link.is_empty() && link != MISSING_MAP_LINK => {
            Action::OpenExternal(link.clone())
        }
        Event::MapClick { .. } => Action::Alert(MAP_UNAVAILABLE.to_string()),
        Event::DetailClick { code } if !code.is_empty() => {
            Action::Navigate(utils::detail_href(code))
        }
        _ => Action::None,
    }
}

#[derive(Clone, Debug)]
pub struct ListingPage {
    cards: Container,
    search: SearchController,
    card_line: CardLine,
    load_failed: bool,
}

impl ListingPage {
    /// Renders every record and wires the search box to that same list.
    pub fn from_records(records: Vec<CountryRecord>, card_line: CardLine) -> Self {
        let mut cards = Container::new(CARDS_CONTAINER);
        listing::render_countries(&mut cards, &records, card_line);
        Self {
            cards,
            search: setup_search(records),
            card_line,
            load_failed: false,
        }
    }

    pub async fn load<F: Fetch>(client: &CountryClient<F>, card_line: CardLine) -> Self {
        match client.all_countries().await {
            Ok(records) => Self::from_records(records, card_line),
            Err(e) => {
                log::error!("request failed: {e}");
                let mut page = Self::from_records(Vec::new(), card_line);
                page.cards.set_inner_html(UNABLE_TO_FETCH_COUNTRIES);
                page.load_failed = true;
                page
            }
        }
    }

    /// Search events are ignored after a failed load so the error message stays.
    pub fn dispatch(&mut self, event: Event) -> Action {
        match event {
            Event::MapClick { .. } | Event::DetailClick { .. } => card_button_action(&event),
            _ if self.load_failed => Action::None,
            _ => self.search.handle(&event, &mut self.cards, self.card_line),
        }
    }

    /// Types `query` into the box and presses Enter.
    pub fn search(&mut self, query: &str) -> Action {
        self.dispatch(Event::Input(query.to_string()));
        self.dispatch(Event::KeyUp("Enter".to_string()))
    }

    pub fn cards(&self) -> &Container {
        &self.cards
    }

    pub fn card_line(&self) -> CardLine {
        self.card_line
    }

    pub fn visible(&self) -> Vec<&CountryRecord> {
        self.search.filtered()
    }

    pub fn search_controller(&self) -> &SearchController {
        &self.search
    }

    pub fn load_failed(&self) -> bool {
        self.load_failed
    }
}

#[derive(Clone, Debug)]
pub struct DetailPage {
    details: Container,
    neighbours: Container,
    record: Option<CountryRecord>,
    neighbour_names: Vec<String>,
    scope: NeighbourScope,
}

impl DetailPage {
    fn empty(scope: NeighbourScope) -> Self {
        Self {
            details: Container::new(DETAILS_CONTAINER),
            neighbours: Container::new(NEIGHBOURS_CONTAINER),
            record: None,
            neighbour_names: Vec::new(),
            scope,
        }
    }

    /// Loads the page addressed by `page_url`, e.g. `detail.html?country=deu`.
    pub async fn load<F: Fetch>(
        client: &CountryClient<F>,
        page_url: &str,
        scope: NeighbourScope,
    ) -> Self {
        match utils::query_parameter(page_url, COUNTRY_PARAM).filter(|c| !c.trim().is_empty()) {
            Some(code) => Self::load_code(client, &code, scope).await,
            None => {
                let mut page = Self::empty(scope);
                page.details.set_inner_html(INVALID_CODE);
                page
            }
        }
    }

    pub async fn load_code<F: Fetch>(
        client: &CountryClient<F>,
        code: &str,
        scope: NeighbourScope,
    ) -> Self {
        let mut page = Self::empty(scope);
        let code = code.trim().to_uppercase();
        if !utils::is_country_code(&code) {
            log::warn!("rejecting country code '{code}'");
            page.details.set_inner_html(INVALID_CODE);
            return page;
        }
        match client.country_by_code(&code).await {
            Ok(record) => {
                detail::render_country_details(&mut page.details, Some(&record));
                let all = client.fetch_all_countries().await;
                let found = detail::render_neighbours(
                    &mut page.neighbours,
                    &all,
                    scope,
                    scope.key(&record),
                    record.common_name(),
                );
                page.neighbour_names = found
                    .into_iter()
                    .map(|r| r.common_name().to_string())
                    .collect();
                page.record = Some(record);
            }
            Err(e) => {
                log::error!("fetch error: {e}");
                page.details.set_inner_html(UNABLE_TO_FETCH);
            }
        }
        page
    }

    pub fn details(&self) -> &Container {
        &self.details
    }

    pub fn neighbours(&self) -> &Container {
        &self.neighbours
    }

    pub fn record(&self) -> Option<&CountryRecord> {
        self.record.as_ref()
    }

    pub fn neighbour_names(&self) -> &[String] {
        &self.neighbour_names
    }

    pub fn scope(&self) -> NeighbourScope {
        self.scope
    }
}
