pub mod detail;
pub mod listing;

use crate::country::NOT_AVAILABLE;

pub const FLAG_PLACEHOLDER: &str = "https://via.placeholder.com/150";
pub const NEIGHBOUR_FLAG_PLACEHOLDER: &str = "https://via.placeholder.com/50";

/// Handle to one attachment point of a page. Render functions only ever
/// write through a container they are handed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Container {
    id: String,
    html: String,
}

impl Container {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            html: String::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn inner_html(&self) -> &str {
        &self.html
    }

    pub fn is_empty(&self) -> bool {
        self.html.is_empty()
    }

    pub fn clear(&mut self) {
        self.html.clear();
    }

    pub fn set_inner_html(&mut self, html: impl Into<String>) {
        self.html = html.into();
    }

    pub fn append(&mut self, html: &str) {
        self.html.push_str(html);
    }

    /// The container as a `<div id=...>` element.
    pub fn to_element(&self) -> String {
        format!(
            "<div id=\"{}\">{}</div>",
            escape_html(&self.id),
            self.html
        )
    }
}

pub fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Joins `items` with `, `, or [`NOT_AVAILABLE`] when there is nothing to join.
pub fn join_or_na<I, S>(items: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let joined = itertools::join(items.into_iter().map(|s| s.as_ref().to_string()), ", ");
    if joined.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        joined
    }
}
