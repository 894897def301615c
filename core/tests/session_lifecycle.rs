use ophs_core::contracts::model::Contract;
use ophs_core::error::{CoreError, CoreResult};
use ophs_core::session::{DashboardSession, LoadStatus, LOAD_FAILURE_NOTICE};
use ophs_core::source::ContractSource;
use std::cell::{Cell, RefCell};

struct FakeSource {
    results: RefCell<Vec<CoreResult<Vec<Contract>>>>,
    calls: Cell<usize>,
}

impl FakeSource {
    fn new(results: Vec<CoreResult<Vec<Contract>>>) -> Self {
        Self {
            results: RefCell::new(results),
            calls: Cell::new(0),
        }
    }
}

impl ContractSource for FakeSource {
    fn describe(&self) -> String {
        "fake".to_string()
    }

    fn fetch_all(&self) -> CoreResult<Vec<Contract>> {
        self.calls.set(self.calls.get() + 1);
        let mut results = self.results.borrow_mut();
        if results.is_empty() {
            return Err(CoreError::Source("no more canned results".to_string()));
        }
        results.remove(0)
    }
}

fn rows() -> Vec<Contract> {
    let mut acme = Contract::new("C-1", "Acme");
    acme.total_value_clean = Some(500000.0);
    acme.contract_category = "Housing".to_string();
    acme.red_flags = Some(vec!["No Oversight".to_string()]);

    let mut beta = Contract::new("C-2", "Beta");
    beta.total_value_clean = Some(200000.0);
    beta.contract_category = "Legal Aid".to_string();
    beta.red_flags = Some(vec![]);

    vec![acme, beta]
}

fn order(session: &DashboardSession) -> Vec<String> {
    session.view().iter().map(|c| c.contract_number.clone()).collect()
}

#[test]
fn session_starts_empty_and_unloaded() {
    let s = DashboardSession::new();
    assert_eq!(s.load_status(), &LoadStatus::NotLoaded);
    assert!(s.view().is_empty());
    let snap = s.snapshot();
    assert_eq!(snap.empty_message.as_deref(), Some("No contracts found."));
    assert!(snap.failure_notice.is_none());
}

#[test]
fn load_once_fetches_exactly_once() {
    let src = FakeSource::new(vec![Ok(rows()), Ok(vec![])]);
    let mut s = DashboardSession::new();

    let status = s.load_once(&src).clone();
    assert!(matches!(status, LoadStatus::Loaded { count: 2, .. }));

    s.set_search_term("beta");
    s.load_once(&src);
    assert_eq!(src.calls.get(), 1);
    assert_eq!(s.dataset().len(), 2);
    assert_eq!(order(&s), vec!["C-2"]);
}

#[test]
fn failed_load_keeps_empty_dataset_and_exposes_notice() {
    let src = FakeSource::new(vec![Err(CoreError::Source("status 503".to_string()))]);
    let mut s = DashboardSession::new();

    let status = s.load_once(&src).clone();
    match status {
        LoadStatus::Failed { message } => assert!(message.contains("status 503")),
        other => panic!("unexpected status {:?}", other),
    }
    assert!(s.dataset().is_empty());

    let snap = s.snapshot();
    assert_eq!(snap.empty_message.as_deref(), Some("No contracts found."));
    assert_eq!(snap.failure_notice.as_deref(), Some(LOAD_FAILURE_NOTICE));
    assert!(s.render_html().contains("retryLoad"));
}

#[test]
fn duplicate_contract_numbers_fail_the_load() {
    let mut dupes = rows();
    dupes.push(Contract::new("C-1", "Acme Again"));
    let src = FakeSource::new(vec![Ok(dupes)]);
    let mut s = DashboardSession::new();

    let status = s.load_once(&src).clone();
    assert!(status.is_failed());
    assert!(s.dataset().is_empty());
}

#[test]
fn reload_retries_after_failure_and_resets_inputs() {
    let src = FakeSource::new(vec![Err(CoreError::Source("down".to_string())), Ok(rows())]);
    let mut s = DashboardSession::new();
    s.load_once(&src);
    s.set_category("Housing");

    let status = s.reload(&src).clone();
    assert!(matches!(status, LoadStatus::Loaded { count: 2, .. }));
    assert_eq!(src.calls.get(), 2);
    assert_eq!(s.query().selected_category, "All");
    assert_eq!(order(&s), vec!["C-1", "C-2"]);
}

#[test]
fn toggling_one_card_leaves_order_and_other_cards_alone() {
    let src = FakeSource::new(vec![Ok(rows())]);
    let mut s = DashboardSession::new();
    s.load_once(&src);

    let before = order(&s);
    assert!(s.toggle_expanded("C-2").unwrap());
    assert_eq!(order(&s), before);
    assert!(s.is_expanded("C-2"));
    assert!(!s.is_expanded("C-1"));

    let cards = s.cards();
    assert!(cards[0].details.is_none());
    assert_eq!(cards[1].toggle_label, "Hide Details");
    assert!(cards[1].details.is_some());

    assert!(!s.toggle_expanded("C-2").unwrap());
    assert!(!s.is_expanded("C-2"));
}

#[test]
fn filter_and_sort_changes_keep_expand_state() {
    let src = FakeSource::new(vec![Ok(rows())]);
    let mut s = DashboardSession::new();
    s.load_once(&src);
    s.toggle_expanded("C-1").unwrap();

    s.set_flag("Conditional Care");
    assert!(s.view().is_empty());
    s.set_flag("All");
    assert!(s.toggle_sort());
    assert_eq!(order(&s), vec!["C-2", "C-1"]);
    assert!(s.is_expanded("C-1"));
}

#[test]
fn reload_collapses_every_card() {
    let src = FakeSource::new(vec![Ok(rows()), Ok(rows())]);
    let mut s = DashboardSession::new();
    s.load_once(&src);
    s.toggle_expanded("C-1").unwrap();

    s.reload(&src);
    assert!(!s.is_expanded("C-1"));
}

#[test]
fn unknown_contract_number_cannot_be_toggled() {
    let mut s = DashboardSession::new();
    let err = s.toggle_expanded("C-404").unwrap_err();
    assert!(err.to_string().contains("unknown contract_number"));
}

#[test]
fn session_stays_usable_while_a_load_is_in_flight() {
    let mut s = DashboardSession::new();
    let ticket = s.begin_load().unwrap();
    assert_eq!(s.load_status(), &LoadStatus::Loading);
    assert!(s.begin_load().is_none());

    s.set_search_term("acme");
    assert!(s.render_html().contains("No contracts found."));
    assert!(s.snapshot().failure_notice.is_none());

    let status = s.apply_load(ticket, "fake", Ok(rows())).clone();
    assert!(matches!(status, LoadStatus::Loaded { count: 2, .. }));
    assert_eq!(s.query().search_term, "acme");
    assert_eq!(order(&s), vec!["C-1"]);
}

#[test]
fn superseded_load_result_is_discarded() {
    let mut s = DashboardSession::new();
    let first = s.begin_load().unwrap();
    let second = s.begin_reload();

    s.apply_load(first, "fake", Err(CoreError::Source("late failure".to_string())));
    assert_eq!(s.load_status(), &LoadStatus::Loading);

    s.apply_load(second, "fake", Ok(rows()));
    assert!(matches!(s.load_status(), LoadStatus::Loaded { count: 2, .. }));

    s.apply_load(second, "fake", Ok(vec![]));
    assert_eq!(s.dataset().len(), 2);
}

#[test]
fn csv_export_follows_current_view() {
    let src = FakeSource::new(vec![Ok(rows())]);
    let mut s = DashboardSession::new();
    s.load_once(&src);
    s.set_sort_ascending(true);

    let csv = s.export_csv().unwrap();
    let numbers: Vec<&str> = csv
        .lines()
        .skip(1)
        .map(|l| l.split(',').next().unwrap())
        .collect();
    assert_eq!(numbers, vec!["C-2", "C-1"]);
}
