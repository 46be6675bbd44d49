use std::{collections::HashMap, str::FromStr};

use crowbook_text_processing::escape;

use super::{
    config::Config,
    emit::Emitter,
    error::ErrorKind,
    first_follow::FirstFollowTable,
    ll1_table::ParseTable,
    symbol::{SymbolRef, Terminal},
    Result,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Rust,
    Plain,
    LaTeX,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "rust" => Ok(OutputFormat::Rust),
            "plain" => Ok(OutputFormat::Plain),
            "latex" => Ok(OutputFormat::LaTeX),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("unknown output format \"{}\"", s)),
        }
    }
}

fn align(output: &[Vec<String>]) -> String {
    let columns = output.iter().map(|line| line.len()).max().unwrap_or(0);
    let width: Vec<usize> = (0..columns)
        .map(|j| {
            output
                .iter()
                .filter_map(|line| line.get(j))
                .map(|s| s.chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();
    output
        .iter()
        .map(|line| {
            line.iter()
                .enumerate()
                .map(|(i, s)| format!("{:>width$}", s, width = width[i]))
                .collect::<Vec<_>>()
                .join(" | ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn join_terminals(terminals: &[Terminal], sep: &str) -> String {
    terminals
        .iter()
        .map(|t| t.to_string())
        .collect::<Vec<_>>()
        .join(sep)
}

impl FirstFollowTable {
    pub fn to_plaintext(&self) -> String {
        let mut output: Vec<Vec<String>> = vec![vec![
            "Symbol".to_string(),
            "First".to_string(),
            "Follow".to_string(),
        ]];
        for (nt, sets) in self.iter() {
            output.push(vec![
                nt.clone(),
                join_terminals(&sets.first, ", "),
                join_terminals(&sets.follow, ", "),
            ]);
        }
        align(&output)
    }

    pub fn to_latex(&self) -> String {
        fn f(a: &[Terminal]) -> String {
            a.iter()
                .map(|t| escape::tex(t.to_string()).to_string())
                .collect::<Vec<_>>()
                .join(r"\ ")
        }

        let content = self
            .iter()
            .map(|(nt, sets)| {
                format!(
                    "{} & {} & {}",
                    escape::tex(nt),
                    f(&sets.first),
                    f(&sets.follow)
                )
            })
            .collect::<Vec<_>>()
            .join("\\\\\n ");

        "\\begin{tabular}{c|c|c}\n".to_string()
            + "Symbol & First & Follow\\\\\\hline\n"
            + &content
            + "\\\\\n\\end{tabular}"
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| ErrorKind::Json(e.to_string()).into())
    }
}

/// Nonterminal rows and terminal columns in order of first appearance, with the cell bodies.
struct Grid<'a> {
    nonterminals: Vec<&'a str>,
    terminals: Vec<Terminal>,
    cells: HashMap<(&'a str, Terminal), &'a Vec<SymbolRef>>,
}

impl ParseTable {
    fn grid(&self) -> Grid<'_> {
        let mut grid = Grid {
            nonterminals: Vec::new(),
            terminals: Vec::new(),
            cells: HashMap::new(),
        };
        for (key, body) in self.iter() {
            let nt = key.nonterminal.as_str();
            if !grid.nonterminals.contains(&nt) {
                grid.nonterminals.push(nt);
            }
            if !grid.terminals.contains(&key.terminal) {
                grid.terminals.push(key.terminal);
            }
            grid.cells.insert((nt, key.terminal), body);
        }
        grid
    }

    pub fn to_plaintext(&self) -> String {
        let grid = self.grid();
        let mut header: Vec<String> = vec![String::new()];
        header.extend(grid.terminals.iter().map(|t| t.to_string()));
        let mut output: Vec<Vec<String>> = vec![header];

        for &left in &grid.nonterminals {
            let mut line: Vec<String> = vec![left.to_string()];
            line.extend(grid.terminals.iter().map(|t| {
                grid.cells.get(&(left, *t)).map_or(String::new(), |body| {
                    let right = if body.is_empty() {
                        "ε".to_string()
                    } else {
                        body.iter()
                            .map(|s| s.to_string())
                            .collect::<Vec<_>>()
                            .join(" ")
                    };
                    format!("{} -> {}", left, right)
                })
            }));
            output.push(line);
        }
        align(&output)
    }

    pub fn to_latex(&self) -> String {
        let grid = self.grid();
        let mut header: Vec<String> = vec![format!(
            "\\[\\begin{{array}}{{c{}}}\n",
            "|l".repeat(grid.terminals.len()),
        )];
        header.extend(
            grid.terminals
                .iter()
                .map(|t| format!("\\text{{{}}}", escape::tex(t.to_string()))),
        );
        let header = header.join(" & ");

        let mut output: Vec<String> = Vec::new();
        for &left in &grid.nonterminals {
            let mut line: Vec<String> = vec![escape::tex(left).to_string()];
            line.extend(grid.terminals.iter().map(|t| {
                grid.cells.get(&(left, *t)).map_or(String::new(), |body| {
                    let right = if body.is_empty() {
                        "\\epsilon".to_string()
                    } else {
                        body.iter()
                            .filter_map(|s| match s {
                                SymbolRef::Terminal(t) => {
                                    Some(format!("\\text{{{}}}", escape::tex(t.to_string())))
                                }
                                SymbolRef::NonTerminal(nt) => Some(escape::tex(nt).to_string()),
                                SymbolRef::Action { .. } => None,
                            })
                            .collect::<Vec<_>>()
                            .join(" \\ ")
                    };
                    format!("{} \\rightarrow {}", escape::tex(left), right)
                })
            }));
            output.push(line.join(" & "));
        }

        let output = output.join("\\\\\n");

        header + "\\\\\\hline\n" + &output + "\n\\end{array}\\]"
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| ErrorKind::Json(e.to_string()).into())
    }
}

pub fn render_first_follow(
    table: &FirstFollowTable,
    format: OutputFormat,
    config: &Config,
) -> Result<String> {
    Ok(match format {
        OutputFormat::Rust => Emitter::new(&config.emit).first_follow(table),
        OutputFormat::Plain => table.to_plaintext(),
        OutputFormat::LaTeX => table.to_latex(),
        OutputFormat::Json => table.to_json()?,
    })
}

pub fn render_parse_table(
    table: &ParseTable,
    format: OutputFormat,
    config: &Config,
) -> Result<String> {
    Ok(match format {
        OutputFormat::Rust => Emitter::new(&config.emit).parse_table(table),
        OutputFormat::Plain => table.to_plaintext(),
        OutputFormat::LaTeX => table.to_latex(),
        OutputFormat::Json => table.to_json()?,
    })
}
