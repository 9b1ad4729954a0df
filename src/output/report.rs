use crate::page::{DetailPage, ListingPage, MAP_UNAVAILABLE};
use crate::render::escape_html;

const STYLE: &str = r#"
    body { font-family: 'Inter', sans-serif; margin: 0; background: #f8fafc; color: #0f172a; }
    header { display: flex; gap: 1rem; align-items: center; justify-content: space-between; padding: 1rem 2rem; background: #fff; border-bottom: 1px solid #e2e8f0; }
    header a { color: inherit; text-decoration: none; }
    main { max-width: 1440px; margin: 0 auto; padding: 2rem; }
    .search { display: flex; gap: 0.5rem; }
    .search-input { padding: 0.5rem 0.75rem; border: 1px solid #cbd5e1; border-radius: 0.375rem; min-width: 260px; }
    #cards-container { display: grid; grid-template-columns: repeat(auto-fill, minmax(260px, 1fr)); gap: 1.25rem; }
    .card { background: #fff; border: 1px solid #e2e8f0; border-radius: 0.75rem; overflow: hidden; }
    .card-image { width: 100%; height: 150px; object-fit: cover; }
    .card-content { padding: 1rem; }
    .card-buttons { display: flex; gap: 0.5rem; }
    .card-button, #search-btn { cursor: pointer; padding: 0.5rem 0.75rem; border: 0; border-radius: 0.375rem; background: #135bec; color: #fff; }
    .country-flag { max-width: 320px; }
    .flags-container { display: flex; flex-wrap: wrap; gap: 0.75rem; }
    .flag-image { width: 80px; }
"#;

fn document(title: &str, header_extra: &str, body: &str, script: &str) -> Vec<u8> {
    let title = escape_html(title);
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8"/>
  <meta content="width=device-width, initial-scale=1.0" name="viewport"/>
  <title>{title}</title>
  <style>{style}</style>
</head>
<body>
  <header>
    <h1><a href="index.html">Where in the world?</a></h1>
    {header_extra}
  </header>
  <main>
{body}
  </main>
  <script>
{script}
  </script>
</body>
</html>
"#,
        style = STYLE
    )
    .into_bytes()
}

pub fn render_listing_html(page: &ListingPage) -> Vec<u8> {
    let query = escape_html(page.search_controller().input());
    let search = format!(
        r#"<div class="search">
      <input class="search-input" type="text" placeholder="Search for a country..." value="{query}"/>
      <button id="search-btn" type="button">Search</button>
    </div>"#
    );
    let script = format!(
        r#"    (function() {{
      var input = document.querySelector('.search-input');
      var button = document.getElementById('search-btn');
      var cards = Array.prototype.slice.call(document.querySelectorAll('#cards-container .card'));

      button.addEventListener('click', function() {{
        var query = input.value.toLowerCase();
        cards.forEach(function(card) {{
          var name = card.querySelector('.card-heading').textContent.toLowerCase();
          card.style.display = name.indexOf(query) !== -1 ? '' : 'none';
        }});
      }});
      input.addEventListener('keyup', function(event) {{
        if (event.key === 'Enter') {{ button.click(); }}
      }});

      document.querySelectorAll('[data-maps-link]').forEach(function(el) {{
        el.addEventListener('click', function() {{
          var link = el.getAttribute('data-maps-link');
          if (link && link !== '#') {{ window.open(link, '_blank'); }}
          else {{ alert('{alert}'); }}
        }});
      }});
      document.querySelectorAll('[data-country-code]').forEach(function(el) {{
        el.addEventListener('click', function() {{
          var code = el.getAttribute('data-country-code');
          if (code) {{ window.location.href = 'detail.html?country=' + code; }}
        }});
      }});
    }})();"#,
        alert = MAP_UNAVAILABLE
    );
    document(
        "Countries",
        &search,
        &page.cards().to_element(),
        &script,
    )
}

pub fn render_detail_html(page: &DetailPage) -> Vec<u8> {
    let title = page
        .record()
        .map(|r| r.common_name().to_string())
        .unwrap_or_else(|| "Country details".to_string());
    let body = format!(
        "    {}\n    {}",
        page.details().to_element(),
        page.neighbours().to_element()
    );
    document(
        &title,
        r#"<a class="card-button" href="index.html">Back</a>"#,
        &body,
        "",
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::country::CountryRecord;
    use crate::render::listing::CardLine;
    use serde_json::json;

    #[test]
    fn listing_document_embeds_cards_and_handlers() {
        let records: Vec<CountryRecord> =
            serde_json::from_value(json!([{"name": {"common": "France"}, "cca3": "FRA"}])).unwrap();
        let page = ListingPage::from_records(records, CardLine::Region);
        let html = String::from_utf8(render_listing_html(&page)).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(r#"<div id="cards-container">"#));
        assert!(html.contains("France"));
        assert!(html.contains("detail.html?country="));
        assert!(html.contains(MAP_UNAVAILABLE));
    }
}
