//! Static symptom and acupressure point catalog.
//!
//! The catalog is loaded once per process and never mutated. Lookups return
//! `Result` with a `NotFound` error so callers decide explicitly whether a
//! missing id is skipped or surfaced.

mod data;

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    HeadFace,
    NeckShoulder,
    ChestAbdomen,
    General,
}

impl Category {
    /// Display order used by the symptom selector.
    pub const ALL: [Category; 4] = [
        Category::HeadFace,
        Category::NeckShoulder,
        Category::ChestAbdomen,
        Category::General,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::HeadFace => "Head / Face",
            Category::NeckShoulder => "Neck / Shoulder",
            Category::ChestAbdomen => "Chest / Abdomen",
            Category::General => "General",
        }
    }
}

impl std::str::FromStr for Category {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "head-face" => Ok(Category::HeadFace),
            "neck-shoulder" => Ok(Category::NeckShoulder),
            "chest-abdomen" => Ok(Category::ChestAbdomen),
            "general" => Ok(Category::General),
            other => Err(CoreError::Custom(format!("unknown category: {other}"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Hand {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Palm,
    Back,
}

impl std::str::FromStr for Side {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "palm" => Ok(Side::Palm),
            "back" => Ok(Side::Back),
            other => Err(CoreError::Custom(format!("unknown hand side: {other}"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pressure {
    Light,
    Medium,
    Firm,
}

/// Position on the hand illustration, in percent of width/height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Symptom {
    pub id: String,
    pub name: String,
    pub category: Category,
    pub icon: String,
    /// Point ids in the order they should be recommended.
    pub related_points: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcupressurePoint {
    pub id: String,
    pub name: String,
    pub localized_name: String,
    pub position: Position,
    pub hand: Hand,
    pub side: Side,
    pub symptoms: Vec<String>,
    pub description: String,
    pub method: String,
    /// Pressure duration in seconds. Always > 0.
    pub duration_secs: u32,
    pub pressure: Pressure,
}

/// Read-only symptom and point tables.
#[derive(Debug, Clone)]
pub struct Catalog {
    symptoms: Vec<Symptom>,
    points: Vec<AcupressurePoint>,
}

impl Catalog {
    pub fn new(symptoms: Vec<Symptom>, points: Vec<AcupressurePoint>) -> Self {
        Self { symptoms, points }
    }

    /// The process-wide built-in catalog.
    pub fn builtin() -> &'static Catalog {
        static BUILTIN: OnceLock<Catalog> = OnceLock::new();
        BUILTIN.get_or_init(|| Catalog::new(data::symptoms(), data::points()))
    }

    pub fn symptoms(&self) -> &[Symptom] {
        &self.symptoms
    }

    pub fn points(&self) -> &[AcupressurePoint] {
        &self.points
    }

    pub fn symptom(&self, id: &str) -> Result<&Symptom> {
        self.symptoms
            .iter()
            .find(|s| s.id == id)
            .ok_or_else(|| CoreError::symptom_not_found(id))
    }

    pub fn point(&self, id: &str) -> Result<&AcupressurePoint> {
        self.points
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| CoreError::point_not_found(id))
    }

    pub fn symptoms_in(&self, category: Category) -> Vec<&Symptom> {
        self.symptoms
            .iter()
            .filter(|s| s.category == category)
            .collect()
    }

    /// Points on one side of the hand that appear in `recommended`.
    ///
    /// Ordered by the recommendation, not by the catalog, so the hand map
    /// numbers points in the order the guide visits them. Ids missing from
    /// the catalog are skipped.
    pub fn recommended_on(&self, side: Side, recommended: &[String]) -> Vec<&AcupressurePoint> {
        recommended
            .iter()
            .filter_map(|id| self.point(id).ok())
            .filter(|p| p.side == side)
            .collect()
    }
}
