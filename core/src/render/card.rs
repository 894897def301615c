use super::format::{escape_html, format_amount, or_placeholder};
use crate::contracts::model::Contract;
use serde::Serialize;

/// Display model for one contract card.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CardView {
    pub contract_number: String,
    pub vendor: String,
    pub term_line: String,
    pub amount: String,
    pub category: String,
    pub red_flags: String,
    pub expanded: bool,
    pub toggle_label: String,
    pub toggle_aria_label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<DetailsView>,
}

/// Fields that only appear on an expanded card.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DetailsView {
    pub purpose: String,
    pub accountability_questions: String,
    pub amendments_summary: String,
    pub trauma_equity_notes: String,
    pub funding_source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub testimony_link: Option<String>,
}

impl CardView {
    pub fn from_contract(contract: &Contract, expanded: bool) -> Self {
        let red_flags = if contract.flags().is_empty() {
            "None".to_string()
        } else {
            contract.joined_flags()
        };
        let (toggle_label, toggle_aria_label) = if expanded {
            (
                "Hide Details".to_string(),
                format!("Hide details for {}", contract.contract_number),
            )
        } else {
            (
                "Show More".to_string(),
                format!("Show details for {}", contract.contract_number),
            )
        };

        Self {
            contract_number: contract.contract_number.clone(),
            vendor: contract.vendor.clone(),
            term_line: format!(
                "{} ({}–{})",
                contract.term,
                year_or_blank(contract.start_year),
                year_or_blank(contract.end_year)
            ),
            amount: format_amount(contract.total_value_clean),
            category: contract.contract_category.clone(),
            red_flags,
            expanded,
            toggle_label,
            toggle_aria_label,
            details: expanded.then(|| DetailsView::from_contract(contract)),
        }
    }
}

impl DetailsView {
    pub fn from_contract(contract: &Contract) -> Self {
        Self {
            purpose: or_placeholder(contract.purpose.as_deref()),
            accountability_questions: or_placeholder(contract.accountability_questions.as_deref()),
            amendments_summary: or_placeholder(contract.amendments_summary.as_deref()),
            trauma_equity_notes: or_placeholder(contract.trauma_equity_notes.as_deref()),
            funding_source: or_placeholder(contract.funding_source.as_deref()),
            testimony_link: contract
                .testimony_link
                .as_ref()
                .filter(|l| !l.is_empty())
                .cloned(),
        }
    }
}

fn year_or_blank(year: Option<i32>) -> String {
    year.map(|y| y.to_string()).unwrap_or_default()
}

pub fn render_card_html(card: &CardView) -> String {
    let mut out = Vec::new();
    out.push(format!(
        r#"<div class="contract-card" data-contract-number="{}">"#,
        escape_html(&card.contract_number)
    ));
    out.push(format!("  <h2>{}</h2>", escape_html(&card.vendor)));
    out.push(field_line("Contract #:", &card.contract_number));
    out.push(field_line("Term:", &card.term_line));
    out.push(field_line("Amount:", &card.amount));
    out.push(field_line("Category:", &card.category));
    out.push(field_line("Red Flags:", &card.red_flags));
    out.push(format!(
        r#"  <button class="toggle-button" data-toggle="{}" aria-label="{}">{}</button>"#,
        escape_html(&card.contract_number),
        escape_html(&card.toggle_aria_label),
        escape_html(&card.toggle_label)
    ));

    if let Some(d) = &card.details {
        out.push(r#"  <div class="details">"#.to_string());
        for (label, value) in [
            ("Purpose:", &d.purpose),
            ("Accountability Questions:", &d.accountability_questions),
            ("Amendments Summary:", &d.amendments_summary),
            ("Equity / Trauma Notes:", &d.trauma_equity_notes),
            ("Funding Source:", &d.funding_source),
        ] {
            out.push(format!(
                "    <p><strong>{}</strong><br /><span>{}</span></p>",
                label,
                escape_html(value)
            ));
        }
        if let Some(link) = &d.testimony_link {
            out.push(format!(
                r#"    <p><a href="{}" target="_blank" rel="noopener noreferrer" class="link">🔗 View Related Testimony</a></p>"#,
                escape_html(link)
            ));
        }
        out.push("  </div>".to_string());
    }

    out.push("</div>".to_string());
    out.join("\n")
}

fn field_line(label: &str, value: &str) -> String {
    format!("  <p><strong>{}</strong> {}</p>", label, escape_html(value))
}
