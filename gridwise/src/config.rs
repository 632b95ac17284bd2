//! Engine configuration.
//!
//! Built in code through the builder methods, or deserialized from a host
//! configuration file where durations are given in milliseconds and the
//! sortable columns as either a list or the attribute string form (`"1,3"`).

use std::collections::BTreeSet;
use std::str::FromStr;
use std::time::Duration;

use celldom::{ColorError, Rgb};
use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_RESIZE_DEBOUNCE: Duration = Duration::from_millis(250);
pub const DEFAULT_HOVER_POLL_INTERVAL: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid sortable column {0:?}")]
    InvalidColumn(String),

    #[error("sortable columns are 1-indexed, got 0")]
    ZeroColumn,

    #[error("invalid {field} highlight color")]
    InvalidColor {
        field: &'static str,
        #[source]
        source: ColorError,
    },
}

/// 1-indexed columns whose header activates sorting. Empty disables sorting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortableColumns(BTreeSet<usize>);

impl SortableColumns {
    pub fn none() -> Self {
        Self::default()
    }

    /// Parse the attribute form: comma separated, whitespace tolerant.
    /// Empty tokens are skipped; an empty string disables sorting.
    pub fn from_attribute(value: &str) -> Result<Self, ConfigError> {
        let mut columns = BTreeSet::new();
        for token in value.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            let column: usize = token
                .parse()
                .map_err(|_| ConfigError::InvalidColumn(token.to_string()))?;
            if column == 0 {
                return Err(ConfigError::ZeroColumn);
            }
            columns.insert(column);
        }
        Ok(Self(columns))
    }

    /// Reflect back to the attribute form. None when sorting is disabled.
    pub fn to_attribute(&self) -> Option<String> {
        if self.0.is_empty() {
            return None;
        }
        let parts: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        Some(parts.join(","))
    }

    pub fn is_enabled(&self) -> bool {
        !self.0.is_empty()
    }

    pub fn contains(&self, column: usize) -> bool {
        self.0.contains(&column)
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.iter().copied()
    }
}

impl FromStr for SortableColumns {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_attribute(s)
    }
}

impl FromIterator<usize> for SortableColumns {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        Self(iter.into_iter().filter(|c| *c > 0).collect())
    }
}

/// Fallback colors for the three hover custom properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightColors {
    pub column: Rgb,
    pub row: Rgb,
    pub intersection: Rgb,
}

impl Default for HighlightColors {
    fn default() -> Self {
        Self {
            column: Rgb::hex(0xEFF7FC),
            row: Rgb::hex(0xF3F3F3),
            intersection: Rgb::hex(0xE0EDF4),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawTableConfig")]
pub struct TableConfig {
    /// Offer the fullscreen affordance when the table overflows.
    pub fullscreen: bool,
    pub sortable: SortableColumns,
    /// Quiet period before the overflow gate re-runs after a resize.
    pub resize_debounce: Duration,
    /// How often a highlighted cell is checked for loss of hover.
    pub hover_poll_interval: Duration,
    pub highlight: HighlightColors,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            fullscreen: true,
            sortable: SortableColumns::none(),
            resize_debounce: DEFAULT_RESIZE_DEBOUNCE,
            hover_poll_interval: DEFAULT_HOVER_POLL_INTERVAL,
            highlight: HighlightColors::default(),
        }
    }
}

impl TableConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fullscreen(mut self, enabled: bool) -> Self {
        self.fullscreen = enabled;
        self
    }

    pub fn sortable(mut self, columns: SortableColumns) -> Self {
        self.sortable = columns;
        self
    }

    /// Set sortable columns from the attribute string form.
    pub fn sortable_attribute(mut self, value: &str) -> Result<Self, ConfigError> {
        self.sortable = SortableColumns::from_attribute(value)?;
        Ok(self)
    }

    pub fn resize_debounce(mut self, delay: Duration) -> Self {
        self.resize_debounce = delay;
        self
    }

    pub fn hover_poll_interval(mut self, interval: Duration) -> Self {
        self.hover_poll_interval = interval;
        self
    }

    pub fn highlight(mut self, colors: HighlightColors) -> Self {
        self.highlight = colors;
        self
    }
}

// -----------------------------------------------------------------------------
// Deserialization
// -----------------------------------------------------------------------------

#[derive(Deserialize)]
#[serde(untagged)]
enum RawSortable {
    Attribute(String),
    Columns(Vec<usize>),
}

#[derive(Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
struct RawHighlight {
    column: Option<String>,
    row: Option<String>,
    intersection: Option<String>,
}

#[derive(Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawTableConfig {
    fullscreen: bool,
    sortable: Option<RawSortable>,
    resize_debounce_ms: u64,
    hover_poll_ms: u64,
    highlight: RawHighlight,
}

impl Default for RawTableConfig {
    fn default() -> Self {
        Self {
            fullscreen: true,
            sortable: None,
            resize_debounce_ms: DEFAULT_RESIZE_DEBOUNCE.as_millis() as u64,
            hover_poll_ms: DEFAULT_HOVER_POLL_INTERVAL.as_millis() as u64,
            highlight: RawHighlight::default(),
        }
    }
}

fn parse_color(field: &'static str, value: Option<String>, default: Rgb) -> Result<Rgb, ConfigError> {
    match value {
        Some(hex) => hex
            .parse()
            .map_err(|source| ConfigError::InvalidColor { field, source }),
        None => Ok(default),
    }
}

impl TryFrom<RawTableConfig> for TableConfig {
    type Error = ConfigError;

    fn try_from(raw: RawTableConfig) -> Result<Self, Self::Error> {
        let sortable = match raw.sortable {
            None => SortableColumns::none(),
            Some(RawSortable::Attribute(value)) => SortableColumns::from_attribute(&value)?,
            Some(RawSortable::Columns(columns)) => {
                if columns.contains(&0) {
                    return Err(ConfigError::ZeroColumn);
                }
                columns.into_iter().collect()
            }
        };

        let defaults = HighlightColors::default();
        let highlight = HighlightColors {
            column: parse_color("column", raw.highlight.column, defaults.column)?,
            row: parse_color("row", raw.highlight.row, defaults.row)?,
            intersection: parse_color(
                "intersection",
                raw.highlight.intersection,
                defaults.intersection,
            )?,
        };

        Ok(Self {
            fullscreen: raw.fullscreen,
            sortable,
            resize_debounce: Duration::from_millis(raw.resize_debounce_ms),
            hover_poll_interval: Duration::from_millis(raw.hover_poll_ms),
            highlight,
        })
    }
}
