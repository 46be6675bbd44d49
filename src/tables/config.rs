use serde::Deserialize;

/// Knobs for locating the tables and for naming things in the emitted literals.
/// Every field has a default, so a JSON config only needs the fields it changes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Class of the First/Follow table region.
    pub first_follow_class: String,
    /// Class of the LL(1) parse table region.
    pub ll1_class: String,
    /// Tags that mark grammar symbols; everything else is presentation.
    pub symbol_tags: SymbolTags,
    pub emit: EmitOptions,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SymbolTags {
    pub terminal: Vec<String>,
    pub non_terminal: Vec<String>,
    pub action: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EmitOptions {
    pub table_constructor: String,
    pub terminal_type: String,
    pub production_type: String,
    pub indent: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            first_follow_class: "stats".to_string(),
            ll1_class: "parse_table".to_string(),
            symbol_tags: SymbolTags::default(),
            emit: EmitOptions::default(),
        }
    }
}

impl Default for SymbolTags {
    fn default() -> Self {
        Self {
            terminal: vec!["term".to_string(), "terminal".to_string()],
            non_terminal: vec!["nonterm".to_string()],
            action: vec!["action".to_string()],
        }
    }
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            table_constructor: "HashMap::from".to_string(),
            terminal_type: "Type".to_string(),
            production_type: "Production".to_string(),
            indent: 4,
        }
    }
}

impl Config {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl SymbolTags {
    pub fn is_symbol(&self, tag: &str) -> bool {
        self.kind_of(tag).is_some()
    }

    /// Classifies a markup tag, `None` for presentation-only tags.
    pub fn kind_of(&self, tag: &str) -> Option<MarkupKind> {
        let has = |tags: &Vec<String>| tags.iter().any(|t| t.eq_ignore_ascii_case(tag));
        if has(&self.terminal) {
            Some(MarkupKind::Terminal)
        } else if has(&self.non_terminal) {
            Some(MarkupKind::NonTerminal)
        } else if has(&self.action) {
            Some(MarkupKind::Action)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkupKind {
    Terminal,
    NonTerminal,
    Action,
}
