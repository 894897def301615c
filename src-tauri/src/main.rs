#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use ophs_core::config::{build_source, TrackerConfig};
use ophs_core::contracts::view::ViewQuery;
use ophs_core::session::{DashboardSession, DashboardSnapshot, LoadStatus};
use ophs_core::source::ContractSource;
use ophs_core::telemetry::init_logging;
use serde::Serialize;
use std::sync::{Arc, Mutex};

struct AppState {
    session: Arc<Mutex<DashboardSession>>,
    source: Option<Arc<dyn ContractSource + Send + Sync>>,
    startup_error: Option<String>,
}

#[derive(Debug, Serialize)]
struct LoadSummary {
    load_status: LoadStatus,
    snapshot: DashboardSnapshot,
}

#[tauri::command]
async fn load_contracts(state: tauri::State<'_, AppState>) -> Result<LoadSummary, String> {
    run_load(&state, false).await
}

#[tauri::command]
async fn reload_contracts(state: tauri::State<'_, AppState>) -> Result<LoadSummary, String> {
    run_load(&state, true).await
}

#[tauri::command]
fn update_query(state: tauri::State<'_, AppState>, query: ViewQuery) -> Result<DashboardSnapshot, String> {
    let mut session = lock(&state.session)?;
    session.set_query(query);
    Ok(session.snapshot())
}

#[tauri::command]
fn toggle_card(
    state: tauri::State<'_, AppState>,
    contract_number: String,
) -> Result<DashboardSnapshot, String> {
    let mut session = lock(&state.session)?;
    session
        .toggle_expanded(&contract_number)
        .map_err(|e| e.to_string())?;
    Ok(session.snapshot())
}

#[tauri::command]
fn render_dashboard(state: tauri::State<'_, AppState>) -> Result<String, String> {
    Ok(lock(&state.session)?.render_html())
}

#[tauri::command]
fn export_view_csv(state: tauri::State<'_, AppState>) -> Result<String, String> {
    lock(&state.session)?.export_csv().map_err(|e| e.to_string())
}

// The session is locked only to claim the load and to apply its result. The
// blocking fetch runs on the blocking pool with no guard held, so the sync
// commands keep answering while it is in flight.
async fn run_load(state: &AppState, fresh: bool) -> Result<LoadSummary, String> {
    let source = match &state.source {
        Some(s) => Arc::clone(s),
        None => {
            return Err(state
                .startup_error
                .clone()
                .unwrap_or_else(|| "contract source is not configured".to_string()))
        }
    };
    let ticket = {
        let mut session = lock(&state.session)?;
        if fresh {
            Some(session.begin_reload())
        } else {
            session.begin_load()
        }
    };
    let session = Arc::clone(&state.session);

    tauri::async_runtime::spawn_blocking(move || -> Result<LoadSummary, String> {
        let fetched = ticket.map(|t| (t, source.fetch_all()));
        let mut session = lock(&session)?;
        if let Some((ticket, result)) = fetched {
            session.apply_load(ticket, &source.describe(), result);
        }
        Ok(LoadSummary {
            load_status: session.load_status().clone(),
            snapshot: session.snapshot(),
        })
    })
    .await
    .map_err(|e| format!("load task failed: {}", e))?
}

fn lock(session: &Mutex<DashboardSession>) -> Result<std::sync::MutexGuard<'_, DashboardSession>, String> {
    session
        .lock()
        .map_err(|_| "dashboard session lock poisoned".to_string())
}

fn make_state() -> AppState {
    let configured = TrackerConfig::load().and_then(|cfg| build_source(&cfg));
    let (source, startup_error): (Option<Arc<dyn ContractSource + Send + Sync>>, Option<String>) =
        match configured {
            Ok(source) => (Some(Arc::from(source)), None),
            Err(e) => {
                tracing::error!(error = %e, "contract source configuration failed");
                (None, Some(e.to_string()))
            }
        };
    AppState {
        session: Arc::new(Mutex::new(DashboardSession::new())),
        source,
        startup_error,
    }
}

fn main() {
    init_logging();

    tauri::Builder::default()
        .manage(make_state())
        .invoke_handler(tauri::generate_handler![
            load_contracts,
            reload_contracts,
            update_query,
            toggle_card,
            render_dashboard,
            export_view_csv
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
