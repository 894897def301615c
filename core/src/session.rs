use crate::contracts::dataset::Dataset;
use crate::contracts::model::Contract;
use crate::contracts::view::{derive_view, ViewQuery};
use crate::error::{CoreError, CoreResult};
use crate::render::card::CardView;
use crate::render::export::render_view_csv;
use crate::render::page::{render_dashboard_html, EMPTY_STATE_MESSAGE};
use crate::source::ContractSource;
use crate::ui::expand::ExpandState;
use serde::Serialize;

pub const LOAD_FAILURE_NOTICE: &str = "Contracts could not be loaded.";

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "state", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LoadStatus {
    NotLoaded,
    Loading,
    Loaded {
        count: usize,
        fingerprint: String,
        loaded_at_utc: String,
    },
    Failed {
        message: String,
    },
}

impl LoadStatus {
    pub fn is_attempted(&self) -> bool {
        !matches!(self, LoadStatus::NotLoaded)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, LoadStatus::Failed { .. })
    }
}

/// Issued by [`DashboardSession::begin_load`]; only the newest ticket's result
/// is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// What the front end needs to draw the list after any input change.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    pub query: ViewQuery,
    pub load_status: LoadStatus,
    pub cards: Vec<CardView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_notice: Option<String>,
}

/// State for one page lifetime: the loaded dataset, the four control inputs,
/// per-card expand flags and the outcome of the single load.
#[derive(Debug, Clone)]
pub struct DashboardSession {
    dataset: Dataset,
    query: ViewQuery,
    expanded: ExpandState,
    load_status: LoadStatus,
    generation: u64,
}

impl Default for DashboardSession {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardSession {
    pub fn new() -> Self {
        Self {
            dataset: Dataset::empty(),
            query: ViewQuery::default(),
            expanded: ExpandState::new(),
            load_status: LoadStatus::NotLoaded,
            generation: 0,
        }
    }

    /// Fetches from `source` the first time it is called; afterwards it only
    /// reports the earlier outcome. A failure is logged and leaves the dataset
    /// untouched.
    pub fn load_once(&mut self, source: &dyn ContractSource) -> &LoadStatus {
        match self.begin_load() {
            Some(ticket) => {
                let result = source.fetch_all();
                self.apply_load(ticket, &source.describe(), result)
            }
            None => &self.load_status,
        }
    }

    /// Equivalent to reloading the page: everything is discarded and loaded afresh.
    pub fn reload(&mut self, source: &dyn ContractSource) -> &LoadStatus {
        let ticket = self.begin_reload();
        let result = source.fetch_all();
        self.apply_load(ticket, &source.describe(), result)
    }

    /// Claims the single load of this session. `None` once a load is running
    /// or finished. The caller fetches without holding the session and hands
    /// the result to [`DashboardSession::apply_load`].
    pub fn begin_load(&mut self) -> Option<LoadTicket> {
        if self.load_status.is_attempted() {
            tracing::debug!("contracts already loaded for this session; skipping fetch");
            return None;
        }
        self.generation += 1;
        self.load_status = LoadStatus::Loading;
        Some(LoadTicket(self.generation))
    }

    /// Resets the session and claims a fresh load. Tickets issued earlier go stale.
    pub fn begin_reload(&mut self) -> LoadTicket {
        let generation = self.generation + 1;
        *self = Self::new();
        self.generation = generation;
        self.load_status = LoadStatus::Loading;
        LoadTicket(generation)
    }

    pub fn apply_load(
        &mut self,
        ticket: LoadTicket,
        source: &str,
        result: CoreResult<Vec<Contract>>,
    ) -> &LoadStatus {
        if ticket.0 != self.generation || self.load_status != LoadStatus::Loading {
            tracing::debug!(source = %source, "discarding superseded load result");
            return &self.load_status;
        }

        match result.and_then(Dataset::from_records) {
            Ok(dataset) => {
                tracing::info!(
                    source = %source,
                    count = dataset.len(),
                    fingerprint = %dataset.fingerprint(),
                    "contracts loaded"
                );
                self.load_status = LoadStatus::Loaded {
                    count: dataset.len(),
                    fingerprint: dataset.fingerprint().to_string(),
                    loaded_at_utc: now_rfc3339_utc(),
                };
                self.dataset = dataset;
                self.expanded.reset();
            }
            Err(err) => {
                tracing::error!(source = %source, error = %err, "error fetching contracts");
                self.load_status = LoadStatus::Failed {
                    message: err.to_string(),
                };
            }
        }
        &self.load_status
    }

    pub fn load_status(&self) -> &LoadStatus {
        &self.load_status
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn query(&self) -> &ViewQuery {
        &self.query
    }

    pub fn set_query(&mut self, query: ViewQuery) {
        self.query = query;
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.query.search_term = term.into();
    }

    pub fn set_category(&mut self, category: impl Into<String>) {
        self.query.selected_category = category.into();
    }

    pub fn set_flag(&mut self, flag: impl Into<String>) {
        self.query.selected_flag = flag.into();
    }

    pub fn set_sort_ascending(&mut self, ascending: bool) {
        self.query.sort_ascending = ascending;
    }

    pub fn toggle_sort(&mut self) -> bool {
        self.query.sort_ascending = !self.query.sort_ascending;
        self.query.sort_ascending
    }

    pub fn is_expanded(&self, contract_number: &str) -> bool {
        self.expanded.is_expanded(contract_number)
    }

    /// Flips one card's detail panel and returns the new state.
    pub fn toggle_expanded(&mut self, contract_number: &str) -> CoreResult<bool> {
        if !self.dataset.contains(contract_number) {
            return Err(CoreError::InvalidInput(format!(
                "unknown contract_number: {}",
                contract_number
            )));
        }
        Ok(self.expanded.toggle(contract_number))
    }

    pub fn view(&self) -> Vec<&Contract> {
        derive_view(&self.dataset, &self.query)
    }

    pub fn cards(&self) -> Vec<CardView> {
        self.view()
            .into_iter()
            .map(|c| CardView::from_contract(c, self.expanded.is_expanded(&c.contract_number)))
            .collect()
    }

    pub fn snapshot(&self) -> DashboardSnapshot {
        let cards = self.cards();
        let empty = cards.is_empty();
        DashboardSnapshot {
            query: self.query.clone(),
            load_status: self.load_status.clone(),
            cards,
            empty_message: empty.then(|| EMPTY_STATE_MESSAGE.to_string()),
            failure_notice: (empty && self.load_status.is_failed())
                .then(|| LOAD_FAILURE_NOTICE.to_string()),
        }
    }

    pub fn render_html(&self) -> String {
        let notice = self.load_status.is_failed().then_some(LOAD_FAILURE_NOTICE);
        render_dashboard_html(&self.query, &self.cards(), notice)
    }

    pub fn export_csv(&self) -> CoreResult<String> {
        render_view_csv(&self.view())
    }
}

fn now_rfc3339_utc() -> String {
    time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_default()
}
