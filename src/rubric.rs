use crate::normalize::normalize;
use log::debug;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// One evaluated dimension of a rubric, as embedded in an assignment payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Criterion {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub points: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ratings: Vec<Rating>,
}

/// A named point tier within a criterion.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Rating {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default)]
    pub long_description: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub points: f64,
}

/// Display title and maximum score, sibling of `rubric` on the assignment.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RubricSettings {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub points_possible: Option<f64>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// The four achievement levels the rating scale is checked against.
///
/// Declaration order is the matching precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Destacado,
    Habilitado,
    EnDesarrollo,
    NoLogrado,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Destacado,
        Category::Habilitado,
        Category::EnDesarrollo,
        Category::NoLogrado,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::Destacado => "Destacado",
            Category::Habilitado => "Habilitado",
            Category::EnDesarrollo => "En desarrollo",
            Category::NoLogrado => "No logrado",
        }
    }

    /// Points a well-formed rubric assigns to this level, summed over criteria.
    pub fn expected_points(self) -> i64 {
        match self {
            Category::Destacado => 100,
            Category::Habilitado => 60,
            Category::EnDesarrollo => 30,
            Category::NoLogrado => 0,
        }
    }

    /// Classifies a rating description, or `None` when it names no level.
    pub fn classify(description: &str) -> Option<Category> {
        classify_with(&NORMALIZED_LABELS, &normalize(description))
    }
}

static NORMALIZED_LABELS: Lazy<Vec<(Category, String)>> = Lazy::new(|| {
    Category::ALL
        .iter()
        .map(|&category| (category, normalize(category.label())))
        .collect()
});

/// First label (in slice order) that equals or prefixes `normalized`.
fn classify_with(labels: &[(Category, String)], normalized: &str) -> Option<Category> {
    labels
        .iter()
        .find(|(_, label)| normalized.starts_with(label.as_str()))
        .map(|(category, _)| *category)
}

/// Per-level point sums of one rubric.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RubricTotals {
    pub destacado: i64,
    pub habilitado: i64,
    pub en_desarrollo: i64,
    pub no_logrado: i64,
}

impl RubricTotals {
    pub fn get(&self, category: Category) -> i64 {
        match category {
            Category::Destacado => self.destacado,
            Category::Habilitado => self.habilitado,
            Category::EnDesarrollo => self.en_desarrollo,
            Category::NoLogrado => self.no_logrado,
        }
    }

    fn add(&mut self, category: Category, points: i64) {
        let slot = match category {
            Category::Destacado => &mut self.destacado,
            Category::Habilitado => &mut self.habilitado,
            Category::EnDesarrollo => &mut self.en_desarrollo,
            Category::NoLogrado => &mut self.no_logrado,
        };
        *slot = slot.saturating_add(points);
    }
}

/// Sums rating points per achievement level over every criterion.
///
/// Points are truncated toward zero before summing and sums saturate at
/// the `i64` bounds. Ratings whose description matches no level are left
/// out of every sum.
pub fn aggregate(rubric: &[Criterion]) -> RubricTotals {
    let mut totals = RubricTotals::default();
    for criterion in rubric {
        for rating in &criterion.ratings {
            let points = rating.points.trunc() as i64;
            match Category::classify(&rating.description) {
                Some(category) => totals.add(category, points),
                None => debug!(
                    "Rating {:?} ({} pts) matches no category",
                    rating.description, points
                ),
            }
        }
    }
    totals
}
