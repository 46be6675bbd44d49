//! Renders the transcribed tables as Rust source literals for a table-driven parser.
//!
//! Entries come out in table order, so the same document always produces the same text.

use super::{
    config::EmitOptions,
    first_follow::{FirstFollowSets, FirstFollowTable},
    ll1_table::ParseTable,
    symbol::{SymbolRef, Terminal},
};

pub struct Emitter<'a> {
    options: &'a EmitOptions,
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl<'a> Emitter<'a> {
    pub fn new(options: &'a EmitOptions) -> Self {
        Self { options }
    }

    /// `Type::Semi`, or `Type::Id("".to_owned())` for kinds that carry data.
    pub fn terminal(&self, t: Terminal) -> String {
        match t.placeholder() {
            Some(payload) => format!(
                "{}::{}({})",
                self.options.terminal_type,
                t.variant_name(),
                payload
            ),
            None => format!("{}::{}", self.options.terminal_type, t.variant_name()),
        }
    }

    pub fn symbol_ref(&self, s: &SymbolRef) -> String {
        let production = &self.options.production_type;
        match s {
            SymbolRef::Terminal(t) => format!("{}::Term({})", production, self.terminal(*t)),
            SymbolRef::NonTerminal(nt) => format!("{}::NonTerm({:?})", production, nt),
            // the action text is already an expression of the parser crate
            SymbolRef::Action { kind, name } => {
                format!("{}::{}({})", production, capitalize(kind), name)
            }
        }
    }

    fn terminal_vec(&self, terminals: &[Terminal]) -> String {
        format!(
            "vec![{}]",
            terminals
                .iter()
                .map(|t| self.terminal(*t))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }

    fn set_table<F>(&self, table: &FirstFollowTable, select: F) -> String
    where
        F: Fn(&FirstFollowSets) -> &Vec<Terminal>,
    {
        let indent = " ".repeat(self.options.indent);
        std::iter::once(format!("{}([", self.options.table_constructor))
            .chain(table.iter().map(|(nt, sets)| {
                format!("{}({:?}, {}),", indent, nt, self.terminal_vec(select(sets)))
            }))
            .chain(std::iter::once("])".to_string()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn first_set(&self, table: &FirstFollowTable) -> String {
        self.set_table(table, |sets| &sets.first)
    }

    pub fn follow_set(&self, table: &FirstFollowTable) -> String {
        self.set_table(table, |sets| &sets.follow)
    }

    pub fn first_follow(&self, table: &FirstFollowTable) -> String {
        format!(
            "First set:\n{}\nFollow set:\n{}",
            self.first_set(table),
            self.follow_set(table)
        )
    }

    /// One `((nonterminal, terminal), vec![...]),` line per entry.
    pub fn parse_table(&self, table: &ParseTable) -> String {
        table
            .iter()
            .map(|(key, body)| {
                format!(
                    "(({:?}, {}), vec![{}]),",
                    key.nonterminal,
                    self.terminal(key.terminal),
                    body.iter()
                        .map(|s| self.symbol_ref(s))
                        .collect::<Vec<_>>()
                        .join(", ")
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
