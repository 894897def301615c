use clap::{Parser, ValueEnum};
use ophs_core::config::{build_source, TrackerConfig};
use ophs_core::error::{CoreError, CoreResult};
use ophs_core::render::card::CardView;
use ophs_core::session::{DashboardSession, LoadStatus};
use ophs_core::source::file::JsonFileSource;
use ophs_core::source::ContractSource;
use ophs_core::telemetry::init_logging;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Csv,
    Html,
    Json,
}

/// Load the contract list once and print a filtered, sorted view of it.
#[derive(Debug, Parser)]
#[command(name = "contracts_report", version)]
struct Args {
    /// Read rows from a JSON snapshot instead of the configured source.
    #[arg(long)]
    file: Option<PathBuf>,
    #[arg(long, default_value = "")]
    search: String,
    #[arg(long, default_value = "All")]
    category: String,
    #[arg(long, default_value = "All")]
    flag: String,
    /// Lowest amount first.
    #[arg(long)]
    ascending: bool,
    /// Include the detail fields of every card.
    #[arg(long)]
    expand_all: bool,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

fn main() {
    init_logging();
    let args = Args::parse();

    let source: Box<dyn ContractSource + Send + Sync> = match &args.file {
        Some(path) => Box::new(JsonFileSource::new(path)),
        None => match TrackerConfig::load().and_then(|cfg| build_source(&cfg)) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("error: {}", e);
                std::process::exit(2);
            }
        },
    };

    match run(&args, source.as_ref()) {
        Ok(out) => print!("{}", out),
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    }
}

fn run(args: &Args, source: &dyn ContractSource) -> CoreResult<String> {
    let mut session = DashboardSession::new();
    if let LoadStatus::Failed { message } = session.load_once(source) {
        return Err(CoreError::Source(message.clone()));
    }

    session.set_search_term(args.search.as_str());
    session.set_category(args.category.as_str());
    session.set_flag(args.flag.as_str());
    session.set_sort_ascending(args.ascending);

    if args.expand_all {
        let numbers: Vec<String> = session
            .view()
            .iter()
            .map(|c| c.contract_number.clone())
            .collect();
        for n in numbers {
            session.toggle_expanded(&n)?;
        }
    }

    match args.format {
        OutputFormat::Csv => session.export_csv(),
        OutputFormat::Html => Ok(session.render_html()),
        OutputFormat::Json => Ok(format!("{}\n", serde_json::to_string_pretty(&session.snapshot())?)),
        OutputFormat::Text => Ok(render_text(&session.cards())),
    }
}

fn render_text(cards: &[CardView]) -> String {
    if cards.is_empty() {
        return "No contracts found.\n".to_string();
    }
    let mut out = Vec::new();
    for card in cards {
        out.push(card.vendor.clone());
        out.push(format!("  Contract #: {}", card.contract_number));
        out.push(format!("  Term: {}", card.term_line));
        out.push(format!("  Amount: {}", card.amount));
        out.push(format!("  Category: {}", card.category));
        out.push(format!("  Red Flags: {}", card.red_flags));
        if let Some(d) = &card.details {
            out.push(format!("  Purpose: {}", d.purpose));
            out.push(format!("  Accountability Questions: {}", d.accountability_questions));
            out.push(format!("  Amendments Summary: {}", d.amendments_summary));
            out.push(format!("  Equity / Trauma Notes: {}", d.trauma_equity_notes));
            out.push(format!("  Funding Source: {}", d.funding_source));
            if let Some(link) = &d.testimony_link {
                out.push(format!("  Testimony: {}", link));
            }
        }
        out.push(String::new());
    }
    out.join("\n")
}
