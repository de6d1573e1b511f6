//! Turning free-text model output into the shapes the wizard needs.

use std::sync::LazyLock;

use regex::Regex;
use tracing::warn;
use vibespec_core::{ProjectType, TechOptionCatalog, VibespecError};

pub const MAX_SUGGESTIONS: usize = 10;

static LIST_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\d+\s*[.)]\s*|[-*•]\s*)").expect("valid regex")
});

/// Split a line-per-item reply into at most ten clean entries.
///
/// Leading `1.` / `1)` numbering and `-`, `*`, `•` bullets are stripped;
/// lines left empty are dropped.
pub fn parse_line_list(raw: &str) -> Vec<String> {
    raw.lines()
        .map(|line| LIST_MARKER.replace(line.trim(), "").trim().to_string())
        .filter(|line| !line.is_empty())
        .take(MAX_SUGGESTIONS)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    Generated,
    Fallback(String),
}

/// A catalog and whether it came from the model or the static table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogOutcome {
    pub catalog: TechOptionCatalog,
    pub source: CatalogSource,
}

impl CatalogOutcome {
    pub fn fallback(project_type: Option<ProjectType>, reason: impl Into<String>) -> Self {
        Self {
            catalog: TechOptionCatalog::fallback(project_type),
            source: CatalogSource::Fallback(reason.into()),
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self.source, CatalogSource::Fallback(_))
    }
}

/// Parse a generated catalog, substituting the static one for the project
/// type when the text is not a usable catalog. Never fails.
pub fn parse_catalog(raw: &str, project_type: Option<ProjectType>) -> CatalogOutcome {
    match try_parse_catalog(raw) {
        Ok(catalog) => CatalogOutcome {
            catalog,
            source: CatalogSource::Generated,
        },
        Err(e) => {
            warn!("generated tech options unusable, using built-in catalog: {e}");
            CatalogOutcome::fallback(project_type, e.to_string())
        }
    }
}

fn try_parse_catalog(raw: &str) -> Result<TechOptionCatalog, VibespecError> {
    let catalog: TechOptionCatalog = serde_json::from_str(strip_code_fence(raw))?;
    catalog.validate()?;
    Ok(catalog)
}

/// Remove a surrounding Markdown code fence such as ```` ```json ````.
fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let body = match rest.find('\n') {
        Some(i) => &rest[i + 1..],
        None => rest,
    };
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}
