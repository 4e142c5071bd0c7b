use std::time::Duration;

use clap::Subcommand;
use sonkil_core::{
    Catalog, Config, Database, Event, GuideApp, GuideSettings, HistoryBackend, HistoryStore,
    IntervalTicks, MemoryBackend, Screen, MAX_SELECTED_SYMPTOMS,
};

type CliResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

#[derive(Subcommand)]
pub enum GuideAction {
    /// Run a full guided session, printing one JSON event per line
    Run {
        /// Symptom ids (e.g. "headache stress")
        #[arg(required = true, num_args = 1..=MAX_SELECTED_SYMPTOMS)]
        symptoms: Vec<String>,
        /// Milliseconds per countdown second (overrides guide.tick_interval_ms)
        #[arg(long)]
        tick_ms: Option<u64>,
        /// Resolve the recommendation without the analysis progress bar
        #[arg(long)]
        skip_analysis: bool,
        /// Do not write the session to history
        #[arg(long)]
        no_record: bool,
    },
}

pub fn run(action: GuideAction) -> CliResult {
    match action {
        GuideAction::Run {
            symptoms,
            tick_ms,
            skip_analysis,
            no_record,
        } => {
            let config = Config::load()?;
            let mut settings = GuideSettings::from(&config);
            if let Some(ms) = tick_ms {
                settings.tick_interval = Duration::from_millis(ms.max(1));
            }

            let runtime = tokio::runtime::Runtime::new()?;
            if no_record {
                let history = HistoryStore::new(MemoryBackend::new());
                runtime.block_on(session(history, settings, &symptoms, skip_analysis))
            } else {
                let history = HistoryStore::new(Database::open()?);
                runtime.block_on(session(history, settings, &symptoms, skip_analysis))
            }
        }
    }
}

async fn session<B: HistoryBackend>(
    history: HistoryStore<B>,
    settings: GuideSettings,
    symptoms: &[String],
    skip_analysis: bool,
) -> CliResult {
    let (ticks, mut rx) = IntervalTicks::new();
    let mut app = GuideApp::new(Catalog::builtin(), history, ticks, settings);

    for id in symptoms {
        emit(&app.toggle_symptom(id)?)?;
    }
    emit_all(app.analyze()?)?;

    if skip_analysis {
        emit_all(app.finish_analysis())?;
    } else {
        let mut loading = tokio::time::interval(Duration::from_millis(settings.analysis.step_ms.max(1)));
        loading.tick().await;
        while app.screen() == Screen::Loading {
            loading.tick().await;
            emit_all(app.loading_tick())?;
        }
    }

    let first = app
        .tracker()
        .recommended()
        .first()
        .cloned()
        .ok_or("no points recommended")?;
    emit_all(app.select_point(&first)?)?;

    while app.screen() == Screen::Guide {
        emit_all(app.start_timer())?;
        while app.timer().timer().is_running() {
            let tick = rx.recv().await.ok_or("tick source closed")?;
            emit_all(app.on_tick(tick))?;
        }
        emit_all(app.complete_point())?;
        emit_all(app.next_point()?)?;
    }

    tracing::info!(share = %app.share_message(), "session finished");
    emit(&app.snapshot_event())
}

fn emit(event: &Event) -> CliResult {
    println!("{}", serde_json::to_string(event)?);
    Ok(())
}

fn emit_all(events: impl IntoIterator<Item = Event>) -> CliResult {
    for event in events {
        emit(&event)?;
    }
    Ok(())
}
