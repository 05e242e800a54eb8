//! Pure view-model computation.
//!
//! Everything here turns wire data into display strings without touching a
//! terminal, so the formatting rules (stars, truncation, time labels,
//! pagination captions) are testable in isolation from the presentation.

use serde_json::Value;

use crate::model::Recipe;

/// Placeholder shown in the drawer when a recipe has no description.
pub const NO_DESCRIPTION: &str = "No description available.";

/// Maximum title length shown in a table row before truncation.
pub const TITLE_MAX_CHARS: usize = 20;

/// Format an optional rating as a five-position star string, e.g. `★★★★½`.
///
/// Absent ratings count as zero and out-of-range values are clamped to
/// [0, 5], so the output always holds exactly five glyph positions (a half
/// star occupies one).
pub fn render_stars(rating: Option<f64>) -> String {
    let rating = rating.unwrap_or(0.0);
    let rating = if rating.is_finite() {
        rating.clamp(0.0, 5.0)
    } else {
        0.0
    };

    let full = rating.floor() as usize;
    let half = usize::from(rating.fract() >= 0.5);
    let empty = 5 - full - half;

    let mut out = String::with_capacity(5 * '★'.len_utf8());
    for _ in 0..full {
        out.push('★');
    }
    if half == 1 {
        out.push('½');
    }
    for _ in 0..empty {
        out.push('☆');
    }
    out
}

/// Truncate to `max_chars` characters, appending `...` when anything was cut.
/// Counts characters rather than bytes so multi-byte titles never split a
/// codepoint.
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_chars).collect();
    out.push_str("...");
    out
}

/// "N/A" fallback matching the source data's looseness: both absent and
/// empty values render as unavailable.
fn text_or_na(value: Option<&str>) -> String {
    match value {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => "N/A".to_string(),
    }
}

fn nutrient_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// One rendered table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeRow {
    pub title: String,
    pub cuisine: String,
    pub stars: String,
    pub time: String,
    pub serves: String,
}

impl RecipeRow {
    pub fn from_recipe(recipe: &Recipe) -> Self {
        Self {
            title: truncate_text(&recipe.title, TITLE_MAX_CHARS),
            cuisine: text_or_na(recipe.cuisine.as_deref()),
            stars: render_stars(recipe.rating),
            time: crate::format_minutes(recipe.total_time),
            serves: text_or_na(recipe.serves.as_deref()),
        }
    }
}

/// Pagination caption and control disablement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    pub current: u32,
    pub total_pages: u32,
    /// Total matching records, as reported by the server.
    pub total: u64,
    pub can_prev: bool,
    pub can_next: bool,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::compute(1, 0, crate::state::DEFAULT_PAGE_SIZE)
    }
}

impl Pagination {
    /// `total_pages = ceil(total / per_page)`, floored at 1 so an empty
    /// result set still reads "Page 1 of 1" with both directions disabled.
    pub fn compute(current: u32, total: u64, per_page: u32) -> Self {
        let per_page = per_page.max(1) as u64;
        let total_pages = u32::try_from(total.div_ceil(per_page).max(1)).unwrap_or(u32::MAX);
        Self {
            current,
            total_pages,
            total,
            can_prev: current > 1,
            can_next: current < total_pages,
        }
    }

    pub fn label(&self) -> String {
        format!("Page {} of {}", self.current, self.total_pages)
    }
}

/// Detail drawer contents for a selected recipe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawerView {
    pub heading: String,
    pub description: String,
    pub total_time: String,
    pub prep_time: String,
    pub cook_time: String,
    pub serves: String,
    /// One (name, value) row per nutrient, in the mapping's iteration order.
    pub nutrients: Vec<(String, String)>,
}

impl DrawerView {
    pub fn from_recipe(recipe: &Recipe) -> Self {
        let description = match recipe.description.as_deref() {
            Some(d) if !d.is_empty() => d.to_string(),
            _ => NO_DESCRIPTION.to_string(),
        };

        Self {
            heading: format!(
                "{} ({})",
                recipe.title,
                text_or_na(recipe.cuisine.as_deref())
            ),
            description,
            total_time: crate::format_minutes(recipe.total_time),
            prep_time: crate::format_minutes(recipe.prep_time),
            cook_time: crate::format_minutes(recipe.cook_time),
            serves: text_or_na(recipe.serves.as_deref()),
            nutrients: recipe
                .nutrients
                .iter()
                .map(|(name, value)| (name.clone(), nutrient_text(value)))
                .collect(),
        }
    }

    /// Flatten into display lines for a popup body.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![
            self.description.clone(),
            String::new(),
            format!("Total time: {}", self.total_time),
            format!("Prep time:  {}", self.prep_time),
            format!("Cook time:  {}", self.cook_time),
            format!("Serves:     {}", self.serves),
        ];
        if !self.nutrients.is_empty() {
            lines.push(String::new());
            lines.push("Nutrition".to_string());
            for (name, value) in &self.nutrients {
                lines.push(format!("  {}: {}", name, value));
            }
        }
        lines
    }
}
