use thiserror::Error;

/// Structural failures. Cosmetic paths (hover, overflow gating) never
/// produce these; they no-op instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("no table to manage")]
    NoTable,

    #[error("table has not been annotated for sorting")]
    NotAnnotated,

    #[error("column {column} is not sortable")]
    ColumnNotSortable { column: usize },

    #[error("cell lookup has no entry for original row {row}")]
    MissingLookupEntry { row: usize },

    #[error("cell {id} is referenced by the lookup but is not in the table")]
    MissingCell { id: String },

    #[error("cell {id} is not covered by the sort index; re-annotate before sorting")]
    UnindexedCell { id: String },
}
