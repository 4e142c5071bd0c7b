use clap::Subcommand;
use sonkil_core::{Catalog, Category, Side};

#[derive(Subcommand)]
pub enum CatalogAction {
    /// List symptoms, grouped by category
    Symptoms {
        /// Only this category (head-face, neck-shoulder, chest-abdomen, general)
        #[arg(long)]
        category: Option<Category>,
    },
    /// List acupressure points
    Points {
        /// Only points on this side of the hand (palm, back)
        #[arg(long)]
        side: Option<Side>,
    },
    /// Show one acupressure point
    Point {
        /// Point id (e.g. "hegu")
        id: String,
    },
}

pub fn run(action: CatalogAction) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = Catalog::builtin();

    match action {
        CatalogAction::Symptoms { category } => {
            let categories = match category {
                Some(c) => vec![c],
                None => Category::ALL.to_vec(),
            };
            let groups: Vec<serde_json::Value> = categories
                .into_iter()
                .map(|c| {
                    serde_json::json!({
                        "category": c,
                        "label": c.label(),
                        "symptoms": catalog.symptoms_in(c),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&groups)?);
        }
        CatalogAction::Points { side } => {
            let points: Vec<_> = catalog
                .points()
                .iter()
                .filter(|p| side.map_or(true, |s| p.side == s))
                .collect();
            println!("{}", serde_json::to_string_pretty(&points)?);
        }
        CatalogAction::Point { id } => {
            let point = catalog.point(&id)?;
            println!("{}", serde_json::to_string_pretty(point)?);
        }
    }
    Ok(())
}
