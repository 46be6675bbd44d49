use super::{
    config::{MarkupKind, SymbolTags},
    document::{Document, Element},
    error::{ErrorKind, TranscribeError},
    Result,
};

/// A symbol element found in a table cell: its markup tag and its text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Markup {
    pub tag: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirstFollowRow {
    pub nonterminal: String,
    pub first: Vec<Markup>,
    pub follow: Vec<Markup>,
}

/// One nonterminal row of an LL(1) table. `cells[i]` lines up with the i-th header terminal;
/// `None` is an empty (error) cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductionRow {
    pub nonterminal: String,
    pub cells: Vec<Option<Vec<Markup>>>,
}

#[derive(Clone, Copy)]
pub struct TableReader<'a> {
    region: &'a Element,
    tags: &'a SymbolTags,
}

impl<'a> TableReader<'a> {
    /// Picks the first element with class `class`, or failing that the first `table`.
    /// A class on a wrapper element selects the first `table` inside it.
    pub fn select(document: &'a Document, class: &str, tags: &'a SymbolTags) -> Result<Self> {
        let region = document
            .root
            .find(|e| e.has_class(class))
            .map(|e| match e.tag.as_str() {
                "table" => e,
                _ => e.find(|c| c.tag == "table").unwrap_or(e),
            })
            .or_else(|| document.root.find(|e| e.tag == "table"))
            .ok_or_else(|| ErrorKind::MissingRegion(class.to_string()))?;
        Ok(Self { region, tags })
    }

    /// Rows of the region in document order, leaving out rows of nested tables.
    pub fn rows(&self) -> Vec<&'a Element> {
        fn collect<'e>(e: &'e Element, rows: &mut Vec<&'e Element>) {
            for child in e.child_elements() {
                match child.tag.as_str() {
                    "tr" => rows.push(child),
                    "table" => {}
                    _ => collect(child, rows),
                }
            }
        }
        let mut rows = Vec::new();
        collect(self.region, &mut rows);
        rows
    }

    /// Symbol elements below `e`, outermost only, in document order.
    pub fn markup(&self, e: &Element) -> Vec<Markup> {
        let mut out = Vec::new();
        self.collect_markup(e, &mut out);
        out
    }

    fn collect_markup(&self, e: &Element, out: &mut Vec<Markup>) {
        for child in e.child_elements() {
            if self.tags.is_symbol(&child.tag) {
                out.push(Markup {
                    tag: child.tag.clone(),
                    text: child.text(),
                });
            } else {
                self.collect_markup(child, out);
            }
        }
    }

    fn cells(row: &'a Element) -> Vec<&'a Element> {
        row.child_elements()
            .filter(|c| c.tag == "td" || c.tag == "th")
            .collect()
    }

    /// Data rows of a First/Follow table. The first row holds the column titles and is skipped.
    pub fn first_follow_rows(self) -> Result<impl Iterator<Item = Result<FirstFollowRow>> + 'a> {
        let rows = self.rows();
        if rows.is_empty() {
            return Err(ErrorKind::MissingHeader("first/follow column header row").into());
        }

        Ok(rows
            .into_iter()
            .skip(1)
            .enumerate()
            .map(move |(i, tr)| self.first_follow_row(tr).map_err(|e| e.at_row(i + 1))))
    }

    fn first_follow_row(&self, tr: &'a Element) -> Result<FirstFollowRow> {
        let cells = Self::cells(tr);
        if cells.len() != 3 {
            return Err(ErrorKind::MalformedRow {
                expected: 3,
                found: cells.len(),
            }
            .into());
        }

        let nonterminal = self
            .markup(cells[0])
            .into_iter()
            .next()
            .ok_or(ErrorKind::MissingHeader("nonterminal name"))?
            .text;

        Ok(FirstFollowRow {
            first: self.markup(cells[1]),
            follow: self.markup(cells[2]),
            nonterminal,
        })
    }

    /// Terminal names of an LL(1) table header, in column order, and the production rows
    /// below it.
    pub fn ll1_rows(
        self,
    ) -> Result<(
        Vec<String>,
        impl Iterator<Item = Result<ProductionRow>> + 'a,
    )> {
        let mut rows = self.rows().into_iter();
        let terminals: Vec<String> = rows
            .next()
            .map(|header| {
                self.markup(header)
                    .into_iter()
                    .filter(|m| self.tags.kind_of(&m.tag) == Some(MarkupKind::Terminal))
                    .map(|m| m.text)
                    .collect()
            })
            .unwrap_or_default();
        if terminals.is_empty() {
            return Err(ErrorKind::MissingHeader("terminal header row").into());
        }

        let columns = terminals.len();
        let iter = rows
            .enumerate()
            .map(move |(i, tr)| self.production_row(tr, columns).map_err(|e| e.at_row(i + 1)));
        Ok((terminals, iter))
    }

    fn production_row(&self, tr: &'a Element, columns: usize) -> Result<ProductionRow> {
        let header = tr
            .child_elements()
            .find(|c| c.tag == "th")
            .ok_or(ErrorKind::MissingHeader("production row header cell"))?;
        let nonterminal = self
            .markup(header)
            .into_iter()
            .next()
            .ok_or(ErrorKind::MissingHeader("nonterminal in production row header cell"))?
            .text;

        let tds: Vec<&Element> = tr.child_elements().filter(|c| c.tag == "td").collect();
        if tds.len() != columns {
            return Err(TranscribeError::from(ErrorKind::MalformedRow {
                expected: columns,
                found: tds.len(),
            })
            .in_nonterminal(&nonterminal));
        }

        let cells = tds
            .into_iter()
            .map(|td| {
                let markup = self.markup(td);
                if markup.is_empty() {
                    None
                } else {
                    Some(markup)
                }
            })
            .collect();

        Ok(ProductionRow { nonterminal, cells })
    }
}
