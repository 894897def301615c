use super::model::Contract;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Descending,
    Ascending,
}

impl SortDirection {
    pub fn from_ascending(ascending: bool) -> Self {
        if ascending {
            SortDirection::Ascending
        } else {
            SortDirection::Descending
        }
    }
}

/// Orders two contracts by amount (missing counts as zero) in `direction`.
pub fn compare_amounts(a: &Contract, b: &Contract, direction: SortDirection) -> Ordering {
    let ord = a.amount_or_zero().total_cmp(&b.amount_or_zero());
    match direction {
        SortDirection::Ascending => ord,
        SortDirection::Descending => ord.reverse(),
    }
}

/// Stable: equal amounts keep their incoming order in either direction.
pub fn sort_by_amount(contracts: &mut [&Contract], direction: SortDirection) {
    contracts.sort_by(|a, b| compare_amounts(a, b, direction));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_amount(n: &str, amount: Option<f64>) -> Contract {
        let mut c = Contract::new(n, n);
        c.total_value_clean = amount;
        c
    }

    #[test]
    fn test_descending_is_default() {
        assert_eq!(SortDirection::default(), SortDirection::Descending);
        assert_eq!(SortDirection::from_ascending(false), SortDirection::Descending);
        assert_eq!(SortDirection::from_ascending(true), SortDirection::Ascending);
    }

    #[test]
    fn test_missing_amount_sorts_as_zero() {
        let neg = with_amount("neg", Some(-5.0));
        let none = with_amount("none", None);
        let pos = with_amount("pos", Some(5.0));

        let mut asc = vec![&pos, &none, &neg];
        sort_by_amount(&mut asc, SortDirection::Ascending);
        let got: Vec<_> = asc.iter().map(|c| c.contract_number.as_str()).collect();
        assert_eq!(got, vec!["neg", "none", "pos"]);

        let mut desc = vec![&neg, &none, &pos];
        sort_by_amount(&mut desc, SortDirection::Descending);
        let got: Vec<_> = desc.iter().map(|c| c.contract_number.as_str()).collect();
        assert_eq!(got, vec!["pos", "none", "neg"]);
    }

    #[test]
    fn test_equal_amounts_keep_incoming_order() {
        let a = with_amount("a", Some(10.0));
        let b = with_amount("b", None);
        let c = with_amount("c", Some(0.0));
        let d = with_amount("d", Some(10.0));

        for direction in [SortDirection::Ascending, SortDirection::Descending] {
            let mut v = vec![&a, &b, &c, &d];
            sort_by_amount(&mut v, direction);
            let pos = |n: &str| v.iter().position(|x| x.contract_number == n).unwrap();
            assert!(pos("a") < pos("d"));
            assert!(pos("b") < pos("c"));
        }
    }
}
