use serde::{Deserialize, Deserializer, Serialize};

/// Selector value that disables a category or red-flag filter.
pub const ALL: &str = "All";

pub const CATEGORY_OPTIONS: [&str; 7] = [
    ALL,
    "Housing",
    "Legal Aid",
    "Mental Health",
    "Violence Prevention",
    "Training",
    "Other",
];

pub const RED_FLAG_OPTIONS: [&str; 5] = [
    ALL,
    "Conditional Care",
    "Trauma-Indifferent",
    "No Oversight",
    "No Community Input",
];

/// One row of the `contracts` table.
///
/// Rows come from PostgREST as JSON objects. Text columns may be `null` in the
/// table; the required-looking ones (`vendor`, `term`, `contract_category`)
/// deserialize `null` or a missing key as an empty string, everything else
/// stays optional. Unknown columns are ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Contract {
    pub contract_number: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub vendor: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub term: String,
    #[serde(default)]
    pub start_year: Option<i32>,
    #[serde(default)]
    pub end_year: Option<i32>,
    #[serde(default)]
    pub total_value_clean: Option<f64>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub contract_category: String,
    #[serde(default)]
    pub red_flags: Option<Vec<String>>,
    #[serde(default)]
    pub purpose: Option<String>,
    #[serde(default)]
    pub accountability_questions: Option<String>,
    #[serde(default)]
    pub amendments_summary: Option<String>,
    #[serde(default)]
    pub trauma_equity_notes: Option<String>,
    #[serde(default)]
    pub funding_source: Option<String>,
    #[serde(default)]
    pub testimony_link: Option<String>,
}

impl Contract {
    /// Minimal record; the remaining columns start absent.
    pub fn new(contract_number: impl Into<String>, vendor: impl Into<String>) -> Self {
        Self {
            contract_number: contract_number.into(),
            vendor: vendor.into(),
            term: String::new(),
            start_year: None,
            end_year: None,
            total_value_clean: None,
            contract_category: String::new(),
            red_flags: None,
            purpose: None,
            accountability_questions: None,
            amendments_summary: None,
            trauma_equity_notes: None,
            funding_source: None,
            testimony_link: None,
        }
    }

    /// Sort key; a missing amount counts as zero.
    pub fn amount_or_zero(&self) -> f64 {
        self.total_value_clean.unwrap_or(0.0)
    }

    pub fn flags(&self) -> &[String] {
        self.red_flags.as_deref().unwrap_or(&[])
    }

    pub fn joined_flags(&self) -> String {
        self.flags().join(", ")
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
