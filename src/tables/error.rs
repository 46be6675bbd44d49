use std::fmt;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    #[error("unknown symbol \"{0}\"")]
    UnknownSymbol(String),

    #[error("malformed row: expected {expected} cells, found {found}")]
    MalformedRow { expected: usize, found: usize },

    #[error("missing {0}")]
    MissingHeader(&'static str),

    #[error("no table region with class \"{0}\" and no table element")]
    MissingRegion(String),

    #[error("line {line}: {message}")]
    Document { line: usize, message: String },

    #[error("json: {0}")]
    Json(String),
}

/// Where in the table an error was found. Rows are counted from 1 and exclude the header row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Context {
    pub row: Option<usize>,
    pub column: Option<usize>,
    pub nonterminal: Option<String>,
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(row) = self.row {
            parts.push(format!("row {}", row));
        }
        if let Some(nt) = &self.nonterminal {
            parts.push(format!("nonterminal {}", nt));
        }
        if let Some(column) = self.column {
            parts.push(format!("column {}", column));
        }
        if parts.is_empty() {
            Ok(())
        } else {
            write!(f, " ({})", parts.join(", "))
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind}{context}")]
pub struct TranscribeError {
    kind: ErrorKind,
    context: Context,
}

impl TranscribeError {
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: Context::default(),
        }
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn at_row(mut self, row: usize) -> Self {
        self.context.row.get_or_insert(row);
        self
    }

    pub fn at_column(mut self, column: usize) -> Self {
        self.context.column.get_or_insert(column);
        self
    }

    pub fn in_nonterminal(mut self, nonterminal: &str) -> Self {
        self.context
            .nonterminal
            .get_or_insert_with(|| nonterminal.to_string());
        self
    }
}

impl From<ErrorKind> for TranscribeError {
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind)
    }
}
