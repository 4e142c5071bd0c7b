use clap::{Subcommand, ValueEnum};
use serde_json::{json, Value};
use sonkil_core::{AnalysisProgress, Config, HISTORY_KEY, MAX_SELECTED_SYMPTOMS};

#[derive(Clone, Copy, ValueEnum)]
pub enum Section {
    Guide,
    Loading,
    History,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show effective settings, including the fixed limits
    Show {
        /// Only one section
        #[arg(long)]
        section: Option<Section>,
    },
    /// Change one setting (e.g. "guide.tick_interval_ms 500")
    Set { key: String, value: String },
    /// Restore every setting to its default
    Reset,
}

fn section_view(config: &Config, section: Section) -> Value {
    match section {
        Section::Guide => json!({
            "tick_interval_ms": config.guide.tick_interval_ms,
            "max_symptoms": MAX_SELECTED_SYMPTOMS,
        }),
        Section::Loading => {
            let settings = config.analysis_settings();
            let mut progress = AnalysisProgress::new(settings);
            let mut steps = 1;
            while !progress.step() {
                steps += 1;
            }
            json!({
                "step_ms": settings.step_ms,
                "step_percent": settings.step_percent,
                "tip_interval_ms": settings.tip_interval_ms,
                "analysis_ms": steps * settings.step_ms,
            })
        }
        Section::History => json!({
            "recent_limit": config.history.recent_limit,
            "storage_key": HISTORY_KEY,
        }),
    }
}

fn view(config: &Config, only: Option<Section>) -> Value {
    match only {
        Some(section) => section_view(config, section),
        None => json!({
            "guide": section_view(config, Section::Guide),
            "loading": section_view(config, Section::Loading),
            "history": section_view(config, Section::History),
        }),
    }
}

fn section_of(key: &str) -> Option<Section> {
    match key.split('.').next()? {
        "guide" => Some(Section::Guide),
        "loading" => Some(Section::Loading),
        "history" => Some(Section::History),
        _ => None,
    }
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    let output = match action {
        ConfigAction::Show { section } => view(&Config::load()?, section),
        ConfigAction::Set { key, value } => {
            let mut config = Config::load()?;
            config.set(&key, &value)?;
            tracing::debug!(%key, %value, "config updated");
            view(&config, section_of(&key))
        }
        ConfigAction::Reset => {
            let config = Config::default();
            config.save()?;
            view(&config, None)
        }
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loading_view_reports_total_analysis_time() {
        let loading = section_view(&Config::default(), Section::Loading);
        assert_eq!(loading["analysis_ms"], 2500);
    }

    #[test]
    fn fixed_limits_are_reported_but_not_stored() {
        let all = view(&Config::default(), None);
        assert_eq!(all["guide"]["max_symptoms"], 5);
        assert_eq!(all["history"]["storage_key"], "sonkil-history");
        assert!(Config::default().get("guide.max_symptoms").is_none());
    }
}
