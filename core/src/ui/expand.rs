use std::collections::BTreeMap;

/// Per-card expand flags keyed by `contract_number`.
///
/// A key that was never toggled reads as collapsed. Only [`ExpandState::reset`]
/// collapses everything, and the session calls it on dataset (re)load only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpandState {
    flags: BTreeMap<String, bool>,
}

impl ExpandState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_expanded(&self, contract_number: &str) -> bool {
        self.flags.get(contract_number).copied().unwrap_or(false)
    }

    /// Flips one card and returns its new state.
    pub fn toggle(&mut self, contract_number: &str) -> bool {
        let flag = self.flags.entry(contract_number.to_string()).or_insert(false);
        *flag = !*flag;
        *flag
    }

    pub fn reset(&mut self) {
        self.flags.clear();
    }
}
