use super::model::{Contract, ALL};
use serde::{Deserialize, Serialize};

/// The three independent filter inputs of the dashboard controls.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FilterInputs {
    #[serde(default)]
    pub search_term: String,
    #[serde(default = "all_selection")]
    pub category: String,
    #[serde(default = "all_selection")]
    pub flag: String,
}

impl Default for FilterInputs {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            category: ALL.to_string(),
            flag: ALL.to_string(),
        }
    }
}

pub(crate) fn all_selection() -> String {
    ALL.to_string()
}

impl FilterInputs {
    pub fn matches(&self, contract: &Contract) -> bool {
        matches_search(contract, &self.search_term)
            && matches_category(contract, &self.category)
            && matches_flag(contract, &self.flag)
    }
}

/// Case-insensitive substring match over the searchable text columns and the
/// `", "`-joined red flags. Absent columns never match.
pub fn matches_search(contract: &Contract, search_term: &str) -> bool {
    let term = search_term.to_lowercase();
    let contains = |field: &str| field.to_lowercase().contains(&term);
    let contains_opt = |field: &Option<String>| field.as_deref().is_some_and(contains);

    contains(&contract.vendor)
        || contains_opt(&contract.purpose)
        || contains(&contract.contract_category)
        || contains_opt(&contract.accountability_questions)
        || contains_opt(&contract.amendments_summary)
        || contains_opt(&contract.trauma_equity_notes)
        || contains_opt(&contract.funding_source)
        || contains(&contract.joined_flags())
}

pub fn matches_category(contract: &Contract, selected: &str) -> bool {
    selected == ALL || contract.contract_category == selected
}

pub fn matches_flag(contract: &Contract, selected: &str) -> bool {
    selected == ALL || contract.flags().iter().any(|f| f == selected)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn housing() -> Contract {
        let mut c = Contract::new("H-1", "Shelter Partners");
        c.contract_category = "Housing".to_string();
        c.purpose = Some("Emergency beds for families".to_string());
        c.red_flags = Some(vec!["No Oversight".to_string(), "Conditional Care".to_string()]);
        c
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let c = housing();
        assert!(matches_search(&c, "SHELTER"));
        assert!(matches_search(&c, "emergency BEDS"));
        assert!(!matches_search(&c, "legal"));
    }

    #[test]
    fn test_search_spans_joined_flags() {
        let c = housing();
        assert!(matches_search(&c, "oversight, conditional"));
    }

    #[test]
    fn test_search_ignores_absent_fields() {
        let c = Contract::new("X-1", "");
        assert!(!matches_search(&c, "anything"));
        assert!(matches_search(&c, ""));
    }

    #[test]
    fn test_category_is_exact_and_case_sensitive() {
        let c = housing();
        assert!(matches_category(&c, "All"));
        assert!(matches_category(&c, "Housing"));
        assert!(!matches_category(&c, "housing"));
        assert!(!matches_category(&c, "Hous"));
    }

    #[test]
    fn test_flag_requires_whole_element() {
        let c = housing();
        assert!(matches_flag(&c, "All"));
        assert!(matches_flag(&c, "No Oversight"));
        assert!(!matches_flag(&c, "Oversight"));
        assert!(!matches_flag(&Contract::new("X-2", "Vendor"), "No Oversight"));
    }

    #[test]
    fn test_all_three_must_pass() {
        let c = housing();
        let inputs = FilterInputs {
            search_term: "shelter".to_string(),
            category: "Housing".to_string(),
            flag: "Trauma-Indifferent".to_string(),
        };
        assert!(!inputs.matches(&c));
        assert!(FilterInputs::default().matches(&c));
    }
}
