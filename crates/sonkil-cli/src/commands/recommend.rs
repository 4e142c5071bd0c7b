use clap::Args;
use sonkil_core::{resolve, Catalog, Side, MAX_SELECTED_SYMPTOMS};

#[derive(Args)]
pub struct RecommendArgs {
    /// Symptom ids (e.g. "headache stress")
    #[arg(required = true, num_args = 1..=MAX_SELECTED_SYMPTOMS)]
    symptoms: Vec<String>,
}

pub fn run(args: RecommendArgs) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = Catalog::builtin();
    for id in &args.symptoms {
        catalog.symptom(id)?;
    }

    let recommended = resolve(catalog, &args.symptoms);
    let points: Vec<_> = recommended
        .iter()
        .filter_map(|id| catalog.point(id).ok())
        .collect();

    let output = serde_json::json!({
        "symptoms": args.symptoms,
        "recommended": recommended,
        "palm": ids(catalog.recommended_on(Side::Palm, &recommended)),
        "back": ids(catalog.recommended_on(Side::Back, &recommended)),
        "points": points,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn ids(points: Vec<&sonkil_core::AcupressurePoint>) -> Vec<&str> {
    points.into_iter().map(|p| p.id.as_str()).collect()
}
