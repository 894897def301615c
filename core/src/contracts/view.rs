use super::dataset::Dataset;
use super::filter::{all_selection, FilterInputs};
use super::model::Contract;
use super::sort::{sort_by_amount, SortDirection};
use serde::{Deserialize, Serialize};

/// Everything the dashboard controls contribute to the derived view.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ViewQuery {
    #[serde(default)]
    pub search_term: String,
    #[serde(default = "all_selection")]
    pub selected_category: String,
    #[serde(default = "all_selection")]
    pub selected_flag: String,
    #[serde(default)]
    pub sort_ascending: bool,
}

impl Default for ViewQuery {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            selected_category: all_selection(),
            selected_flag: all_selection(),
            sort_ascending: false,
        }
    }
}

impl ViewQuery {
    pub fn filters(&self) -> FilterInputs {
        FilterInputs {
            search_term: self.search_term.clone(),
            category: self.selected_category.clone(),
            flag: self.selected_flag.clone(),
        }
    }

    pub fn direction(&self) -> SortDirection {
        SortDirection::from_ascending(self.sort_ascending)
    }
}

/// Filter then sort. Pure: same dataset and query always give the same sequence.
pub fn derive_view<'a>(dataset: &'a Dataset, query: &ViewQuery) -> Vec<&'a Contract> {
    let filters = query.filters();
    let mut out: Vec<&Contract> = dataset
        .records()
        .iter()
        .filter(|c| filters.matches(c))
        .collect();
    sort_by_amount(&mut out, query.direction());
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_query() {
        let q = ViewQuery::default();
        assert_eq!(q.search_term, "");
        assert_eq!(q.selected_category, "All");
        assert_eq!(q.selected_flag, "All");
        assert_eq!(q.direction(), SortDirection::Descending);
    }

    #[test]
    fn test_partial_query_json_fills_defaults() {
        let q: ViewQuery = serde_json::from_str(r#"{"search_term":"beta"}"#).unwrap();
        assert_eq!(q.search_term, "beta");
        assert_eq!(q.selected_category, "All");
        assert!(!q.sort_ascending);
    }

    #[test]
    fn test_empty_dataset_gives_empty_view() {
        assert!(derive_view(&Dataset::empty(), &ViewQuery::default()).is_empty());
    }
}
