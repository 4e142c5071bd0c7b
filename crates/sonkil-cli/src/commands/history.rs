use chrono::{Datelike, NaiveDate, Utc};
use clap::Subcommand;
use sonkil_core::{share_message, Config, Database, HistoryStore};

#[derive(Subcommand)]
pub enum HistoryAction {
    /// List recorded sessions, newest first
    List {
        /// Only the N most recent (defaults to history.recent_limit)
        #[arg(long)]
        recent: Option<usize>,
        /// List every record
        #[arg(long, conflicts_with = "recent")]
        all: bool,
    },
    /// Total sessions, current streak and last session date
    Stats,
    /// Month view with recorded days marked
    Calendar {
        /// Month as YYYY-MM (defaults to the current month)
        #[arg(long)]
        month: Option<String>,
    },
    /// Share message for today's session
    Share,
}

fn parse_month(s: &str) -> Result<(i32, u32), Box<dyn std::error::Error>> {
    let first = NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d")
        .map_err(|_| format!("invalid month: {s} (expected YYYY-MM)"))?;
    Ok((first.year(), first.month()))
}

pub fn run(action: HistoryAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let store = HistoryStore::new(Database::open()?);
    let today = Utc::now().date_naive();

    match action {
        HistoryAction::List { recent, all } => {
            let limit = if all {
                usize::MAX
            } else {
                recent.unwrap_or(config.history.recent_limit)
            };
            let records = store.recent(limit);
            println!("{}", serde_json::to_string_pretty(&records)?);
        }
        HistoryAction::Stats => {
            let stats = store.stats(today);
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        HistoryAction::Calendar { month } => {
            let (year, month) = match month {
                Some(m) => parse_month(&m)?,
                None => (today.year(), today.month()),
            };
            let calendar = store.month_calendar(year, month, today)?;
            println!("{}", serde_json::to_string_pretty(&calendar)?);
        }
        HistoryAction::Share => match store.record_on(today) {
            Some(record) => println!("{}", share_message(record.points_used.len())),
            None => return Err("no session recorded today".into()),
        },
    }
    Ok(())
}
