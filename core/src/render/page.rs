use super::card::{render_card_html, CardView};
use super::format::escape_html;
use crate::contracts::model::{CATEGORY_OPTIONS, RED_FLAG_OPTIONS};
use crate::contracts::view::ViewQuery;

pub const EMPTY_STATE_MESSAGE: &str = "No contracts found.";

pub fn sort_button_label(sort_ascending: bool) -> &'static str {
    if sort_ascending {
        "Sort by Amount: Low → High"
    } else {
        "Sort by Amount: High → Low"
    }
}

fn sort_button_aria_label(sort_ascending: bool) -> &'static str {
    if sort_ascending {
        "Sort by amount low to high"
    } else {
        "Sort by amount high to low"
    }
}

/// Full dashboard document. `failure_notice` is set when the initial load failed,
/// and is only shown alongside the empty state.
pub fn render_dashboard_html(
    query: &ViewQuery,
    cards: &[CardView],
    failure_notice: Option<&str>,
) -> String {
    let mut out = Vec::new();
    out.push("<!DOCTYPE html>".to_string());
    out.push(r#"<html lang="en">"#.to_string());
    out.push("<head>".to_string());
    out.push(r#"<meta charset="utf-8" />"#.to_string());
    out.push(r#"<meta name="viewport" content="width=device-width, initial-scale=1.0" />"#.to_string());
    out.push("<title>OPHS Contract Tracker - Allies for Humanity</title>".to_string());
    out.push("</head>".to_string());
    out.push("<body>".to_string());
    out.push(HEADER.to_string());
    out.push(r#"<main class="container">"#.to_string());
    out.push(HERO.to_string());

    out.push(r#"<div class="controls">"#.to_string());
    out.push(format!(
        r#"  <input type="text" id="searchInput" name="search" placeholder="Search contracts..." value="{}" aria-label="Search contracts" />"#,
        escape_html(&query.search_term)
    ));
    out.push(render_select(
        "categoryFilter",
        "category",
        "Filter by Category:",
        "Filter by category",
        &CATEGORY_OPTIONS,
        &query.selected_category,
    ));
    out.push(render_select(
        "flagFilter",
        "redFlag",
        "Filter by Red Flag:",
        "Filter by red flag",
        &RED_FLAG_OPTIONS,
        &query.selected_flag,
    ));
    out.push(format!(
        r#"  <button id="sortToggle" class="sort-button" aria-label="{}">{}</button>"#,
        sort_button_aria_label(query.sort_ascending),
        sort_button_label(query.sort_ascending)
    ));
    out.push("</div>".to_string());

    if cards.is_empty() {
        out.push(format!("<p>{}</p>", EMPTY_STATE_MESSAGE));
        if let Some(notice) = failure_notice {
            out.push(format!(
                r#"<p class="load-error" role="alert">{} <button id="retryLoad">Retry</button></p>"#,
                escape_html(notice)
            ));
        }
    } else {
        for card in cards {
            out.push(render_card_html(card));
        }
    }

    out.push("</main>".to_string());
    out.push(FOOTER.to_string());
    out.push("</body>".to_string());
    out.push("</html>".to_string());
    out.push(String::new());
    out.join("\n")
}

fn render_select(
    id: &str,
    name: &str,
    label: &str,
    aria_label: &str,
    options: &[&str],
    selected: &str,
) -> String {
    let mut out = Vec::new();
    out.push("  <div>".to_string());
    out.push(format!(
        r#"    <label for="{}" class="label">{}</label>"#,
        id, label
    ));
    out.push(format!(
        r#"    <select id="{}" name="{}" class="select" aria-label="{}">"#,
        id, name, aria_label
    ));
    for opt in options {
        let marker = if *opt == selected { " selected" } else { "" };
        out.push(format!(
            r#"      <option value="{}"{}>{}</option>"#,
            escape_html(opt),
            marker,
            escape_html(opt)
        ));
    }
    out.push("    </select>".to_string());
    out.push("  </div>".to_string());
    out.join("\n")
}

const HEADER: &str = r##"<header class="header">
  <div class="logo"><img src="logo.png" alt="Allies for Humanity Logo" width="150" height="50" /></div>
  <nav>
    <ul class="nav-list">
      <li><a href="https://www.alliesforhumanity.org/">Home</a></li>
      <li><a href="https://www.alliesforhumanity.org/about">About</a></li>
      <li><a href="https://www.alliesforhumanity.org/contact">Contact</a></li>
      <li><a href="#" class="active">Contract Tracker</a></li>
    </ul>
  </nav>
</header>"##;

const HERO: &str = r#"<section class="hero">
  <h1>🧾 OPHS Contract Explorer</h1>
  <p>Track and manage contracts efficiently, in partnership with Allies for Humanity’s mission to foster collaboration.</p>
</section>"#;

const FOOTER: &str = r##"<footer class="footer">
  <p>© 2025 Allies for Humanity. <a href="#">Privacy</a> | <a href="#">Terms</a> | <a href="https://www.alliesforhumanity.org/contact">Contact Us</a></p>
</footer>"##;
