use serde::{Deserialize, Serialize};

use super::{
    config::{Config, MarkupKind, SymbolTags},
    document::Document,
    error::{ErrorKind, TranscribeError},
    ordered_table::OrderedTable,
    reader::{Markup, ProductionRow, TableReader},
    symbol::{SymbolRef, Terminal},
    Result,
};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParseKey {
    pub nonterminal: String,
    pub terminal: Terminal,
}

/// (nonterminal, lookahead) -> production body. Error cells have no entry.
pub type ParseTable = OrderedTable<ParseKey, Vec<SymbolRef>>;

impl SymbolRef {
    pub fn from_markup(markup: &Markup, tags: &SymbolTags) -> Result<Self> {
        Ok(match tags.kind_of(&markup.tag) {
            Some(MarkupKind::Terminal) => SymbolRef::Terminal(Terminal::resolve(&markup.text)?),
            Some(MarkupKind::NonTerminal) => SymbolRef::NonTerminal(markup.text.clone()),
            _ => SymbolRef::Action {
                kind: markup.tag.clone(),
                name: markup.text.clone(),
            },
        })
    }
}

/// Builds the parse table from the header terminals and the production rows.
/// The first symbol of every non-empty cell is the rule's left-hand side marker and is dropped.
/// Every row must carry exactly one cell per header terminal.
pub fn build_parse_table<I>(terminals: &[String], rows: I, tags: &SymbolTags) -> Result<ParseTable>
where
    I: IntoIterator<Item = Result<ProductionRow>>,
{
    let columns = terminals
        .iter()
        .enumerate()
        .map(|(j, t)| Terminal::resolve(t).map_err(|e| e.at_column(j + 1)))
        .collect::<Result<Vec<_>>>()?;

    let mut table = ParseTable::new();
    for (i, row) in rows.into_iter().enumerate() {
        let row = row?;
        if row.cells.len() != columns.len() {
            return Err(TranscribeError::from(ErrorKind::MalformedRow {
                expected: columns.len(),
                found: row.cells.len(),
            })
            .at_row(i + 1)
            .in_nonterminal(&row.nonterminal));
        }
        for (j, (cell, terminal)) in row.cells.iter().zip(columns.iter()).enumerate() {
            let cell = match cell {
                Some(cell) => cell,
                None => continue,
            };
            let body = cell
                .iter()
                .skip(1)
                .map(|m| SymbolRef::from_markup(m, tags))
                .collect::<Result<Vec<_>>>()
                .map_err(|e| {
                    e.at_row(i + 1)
                        .in_nonterminal(&row.nonterminal)
                        .at_column(j + 1)
                })?;
            table.insert(
                ParseKey {
                    nonterminal: row.nonterminal.clone(),
                    terminal: *terminal,
                },
                body,
            );
        }
    }
    Ok(table)
}

pub fn transcribe_parse_table(html: &str, config: &Config) -> Result<ParseTable> {
    let document = Document::parse(html)?;
    let reader = TableReader::select(&document, &config.ll1_class, &config.symbol_tags)?;
    let (terminals, rows) = reader.ll1_rows()?;
    build_parse_table(&terminals, rows, &config.symbol_tags)
}
