use serde::{Deserialize, Serialize};

use super::{
    config::Config,
    document::Document,
    ordered_table::OrderedTable,
    reader::{FirstFollowRow, Markup, TableReader},
    symbol::Terminal,
    Result,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FirstFollowSets {
    pub first: Vec<Terminal>,
    pub follow: Vec<Terminal>,
}

/// Nonterminal name -> its First and Follow sets, in document order.
pub type FirstFollowTable = OrderedTable<String, FirstFollowSets>;

fn resolve_all(markup: &[Markup]) -> Result<Vec<Terminal>> {
    markup.iter().map(|m| Terminal::resolve(&m.text)).collect()
}

impl FirstFollowSets {
    pub fn from_row(row: &FirstFollowRow) -> Result<Self> {
        Ok(Self {
            first: resolve_all(&row.first)?,
            follow: resolve_all(&row.follow)?,
        })
    }
}

/// Builds the table from reader rows. A nonterminal seen twice keeps its first position and
/// takes the later row's sets.
pub fn build_first_follow_table<I>(rows: I) -> Result<FirstFollowTable>
where
    I: IntoIterator<Item = Result<FirstFollowRow>>,
{
    let mut table = FirstFollowTable::new();
    for (i, row) in rows.into_iter().enumerate() {
        let row = row?;
        let sets = FirstFollowSets::from_row(&row)
            .map_err(|e| e.at_row(i + 1).in_nonterminal(&row.nonterminal))?;
        table.insert(row.nonterminal, sets);
    }
    Ok(table)
}

pub fn transcribe_first_follow(html: &str, config: &Config) -> Result<FirstFollowTable> {
    let document = Document::parse(html)?;
    let reader = TableReader::select(&document, &config.first_follow_class, &config.symbol_tags)?;
    let rows = reader.first_follow_rows()?;
    build_first_follow_table(rows)
}
