//! Sort-builder call chains.
//!
//! `by("a").and("b", Descending).ascending()` arrives as a list of calls.
//! A column's direction is its own explicit direction if given, else the
//! first chain-wide `ascending()` / `descending()` after it, else ascending.

use std::fmt;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Ascending,
    Descending,
}

impl Direction {
    pub fn keyword(self) -> &'static str {
        match self {
            Direction::Ascending => "ASC",
            Direction::Descending => "DESC",
        }
    }
}

/// One call of a sort-builder chain.
#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortCall {
    By {
        column: String,
        #[serde(default)]
        direction: Option<Direction>,
    },
    And {
        column: String,
        #[serde(default)]
        direction: Option<Direction>,
    },
    Ascending,
    Descending,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SortColumn {
    pub name: String,
    pub direction: Direction,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(transparent)]
pub struct SortChain {
    calls: Vec<SortCall>,
}

impl SortChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_calls(calls: Vec<SortCall>) -> Self {
        Self { calls }
    }

    /// Start a chain with `by(column)`.
    pub fn by(column: impl Into<String>) -> Self {
        Self::new().push_column(column, None)
    }

    pub fn by_direction(column: impl Into<String>, direction: Direction) -> Self {
        Self::new().push_column(column, Some(direction))
    }

    pub fn and(self, column: impl Into<String>) -> Self {
        self.push_column(column, None)
    }

    pub fn and_direction(self, column: impl Into<String>, direction: Direction) -> Self {
        self.push_column(column, Some(direction))
    }

    pub fn ascending(mut self) -> Self {
        self.calls.push(SortCall::Ascending);
        self
    }

    pub fn descending(mut self) -> Self {
        self.calls.push(SortCall::Descending);
        self
    }

    fn push_column(mut self, column: impl Into<String>, direction: Option<Direction>) -> Self {
        let column = column.into();
        let call = if self.calls.is_empty() {
            SortCall::By { column, direction }
        } else {
            SortCall::And { column, direction }
        };
        self.calls.push(call);
        self
    }

    pub fn calls(&self) -> &[SortCall] {
        &self.calls
    }

    pub fn is_empty(&self) -> bool {
        self.columns().is_empty()
    }

    /// Columns in chain order with resolved directions.
    pub fn columns(&self) -> Vec<SortColumn> {
        let mut columns: Vec<(String, Option<Direction>)> = Vec::new();
        let mut pending: Vec<usize> = Vec::new();

        for call in &self.calls {
            match call {
                SortCall::By { column, direction } | SortCall::And { column, direction } => {
                    if direction.is_none() {
                        pending.push(columns.len());
                    }
                    columns.push((column.clone(), *direction));
                }
                SortCall::Ascending | SortCall::Descending => {
                    let chain_wide = match call {
                        SortCall::Descending => Direction::Descending,
                        _ => Direction::Ascending,
                    };
                    for idx in pending.drain(..) {
                        columns[idx].1 = Some(chain_wide);
                    }
                }
            }
        }

        columns
            .into_iter()
            .map(|(name, direction)| SortColumn {
                name,
                direction: direction.unwrap_or_default(),
            })
            .collect()
    }

    /// `ORDER BY a ASC, b DESC`, or `None` for a chain without columns.
    pub fn order_by_clause(&self) -> Option<String> {
        let columns = self.columns();
        if columns.is_empty() {
            return None;
        }
        let rendered: Vec<String> = columns.iter().map(ToString::to_string).collect();
        Some(format!("ORDER BY {}", rendered.join(", ")))
    }
}

impl fmt::Display for SortColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.direction.keyword())
    }
}
