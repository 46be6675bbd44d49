use std::fmt::Display;

use serde::{Deserialize, Serialize};

use super::{error::ErrorKind, Result};

/// Lexical token kinds of the target parser. `Id`, `IntNum` and `FloatNum` carry data in the
/// parser's token type; here they are bare tags and get a placeholder payload when emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Terminal {
    EndOfFile,
    Id,
    IntNum,
    FloatNum,
    Eq,
    NotEq,
    Lt,
    Gt,
    LEq,
    GEq,
    Plus,
    Minus,
    Mult,
    Div,
    Assign,
    OpenPar,
    ClosePar,
    OpenCubr,
    CloseCubr,
    OpenSqbr,
    CloseSqbr,
    Semi,
    Comma,
    Dot,
    Colon,
    ReturnType,
    ScopeOp,
    Or,
    And,
    Not,
    Integer,
    Float,
    Void,
    Class,
    SelfT,
    IsA,
    While,
    If,
    Then,
    Else,
    Read,
    Write,
    Return,
    LocalVar,
    Constructor,
    Attribute,
    Function,
    Public,
    Private,
    InlineCmt,
    BlockCmt,
}

/// Every raw terminal name the table documents may use, synonyms included.
pub const REGISTRY: &[(&str, Terminal)] = &[
    ("$", Terminal::EndOfFile),
    ("eof", Terminal::EndOfFile),
    ("id", Terminal::Id),
    ("intlit", Terminal::IntNum),
    ("intnum", Terminal::IntNum),
    ("floatlit", Terminal::FloatNum),
    ("floatnum", Terminal::FloatNum),
    ("equal", Terminal::Assign),
    ("eq", Terminal::Eq),
    ("neq", Terminal::NotEq),
    ("noteq", Terminal::NotEq),
    ("lt", Terminal::Lt),
    ("gt", Terminal::Gt),
    ("leq", Terminal::LEq),
    ("geq", Terminal::GEq),
    ("plus", Terminal::Plus),
    ("minus", Terminal::Minus),
    ("mult", Terminal::Mult),
    ("div", Terminal::Div),
    ("assign", Terminal::Assign),
    ("lpar", Terminal::OpenPar),
    ("openpar", Terminal::OpenPar),
    ("rpar", Terminal::ClosePar),
    ("closepar", Terminal::ClosePar),
    ("lcurbr", Terminal::OpenCubr),
    ("opencubr", Terminal::OpenCubr),
    ("rcurbr", Terminal::CloseCubr),
    ("closecubr", Terminal::CloseCubr),
    ("lsqbr", Terminal::OpenSqbr),
    ("opensqbr", Terminal::OpenSqbr),
    ("rsqbr", Terminal::CloseSqbr),
    ("closesqbr", Terminal::CloseSqbr),
    ("semi", Terminal::Semi),
    ("comma", Terminal::Comma),
    ("dot", Terminal::Dot),
    ("colon", Terminal::Colon),
    ("arrow", Terminal::ReturnType),
    ("returntype", Terminal::ReturnType),
    ("sr", Terminal::ScopeOp),
    ("scopeop", Terminal::ScopeOp),
    ("or", Terminal::Or),
    ("and", Terminal::And),
    ("not", Terminal::Not),
    ("integer", Terminal::Integer),
    ("float", Terminal::Float),
    ("void", Terminal::Void),
    ("class", Terminal::Class),
    ("self", Terminal::SelfT),
    ("isa", Terminal::IsA),
    ("while", Terminal::While),
    ("if", Terminal::If),
    ("then", Terminal::Then),
    ("else", Terminal::Else),
    ("read", Terminal::Read),
    ("write", Terminal::Write),
    ("return", Terminal::Return),
    ("localvar", Terminal::LocalVar),
    ("constructor", Terminal::Constructor),
    ("constructorkeyword", Terminal::Constructor),
    ("attribute", Terminal::Attribute),
    ("function", Terminal::Function),
    ("public", Terminal::Public),
    ("private", Terminal::Private),
    ("inlinecmt", Terminal::InlineCmt),
    ("blockcmt", Terminal::BlockCmt),
];

impl Terminal {
    /// Resolves a raw terminal name (case-sensitive) to its canonical terminal.
    pub fn resolve(name: &str) -> Result<Terminal> {
        REGISTRY
            .iter()
            .find(|(raw, _)| *raw == name)
            .map(|(_, t)| *t)
            .ok_or_else(|| ErrorKind::UnknownSymbol(name.to_string()).into())
    }

    pub fn variant_name(&self) -> &'static str {
        match self {
            Terminal::EndOfFile => "EndOfFile",
            Terminal::Id => "Id",
            Terminal::IntNum => "IntNum",
            Terminal::FloatNum => "FloatNum",
            Terminal::Eq => "Eq",
            Terminal::NotEq => "NotEq",
            Terminal::Lt => "Lt",
            Terminal::Gt => "Gt",
            Terminal::LEq => "LEq",
            Terminal::GEq => "GEq",
            Terminal::Plus => "Plus",
            Terminal::Minus => "Minus",
            Terminal::Mult => "Mult",
            Terminal::Div => "Div",
            Terminal::Assign => "Assign",
            Terminal::OpenPar => "OpenPar",
            Terminal::ClosePar => "ClosePar",
            Terminal::OpenCubr => "OpenCubr",
            Terminal::CloseCubr => "CloseCubr",
            Terminal::OpenSqbr => "OpenSqbr",
            Terminal::CloseSqbr => "CloseSqbr",
            Terminal::Semi => "Semi",
            Terminal::Comma => "Comma",
            Terminal::Dot => "Dot",
            Terminal::Colon => "Colon",
            Terminal::ReturnType => "ReturnType",
            Terminal::ScopeOp => "ScopeOp",
            Terminal::Or => "Or",
            Terminal::And => "And",
            Terminal::Not => "Not",
            Terminal::Integer => "Integer",
            Terminal::Float => "Float",
            Terminal::Void => "Void",
            Terminal::Class => "Class",
            Terminal::SelfT => "SelfT",
            Terminal::IsA => "IsA",
            Terminal::While => "While",
            Terminal::If => "If",
            Terminal::Then => "Then",
            Terminal::Else => "Else",
            Terminal::Read => "Read",
            Terminal::Write => "Write",
            Terminal::Return => "Return",
            Terminal::LocalVar => "LocalVar",
            Terminal::Constructor => "Constructor",
            Terminal::Attribute => "Attribute",
            Terminal::Function => "Function",
            Terminal::Public => "Public",
            Terminal::Private => "Private",
            Terminal::InlineCmt => "InlineCmt",
            Terminal::BlockCmt => "BlockCmt",
        }
    }

    /// Payload the parser's token type expects for data-bearing kinds, as a Rust expression.
    pub fn placeholder(&self) -> Option<&'static str> {
        match self {
            Terminal::Id => Some("\"\".to_owned()"),
            Terminal::IntNum => Some("0"),
            Terminal::FloatNum => Some("0f64"),
            _ => None,
        }
    }
}

impl Display for Terminal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Terminal::EndOfFile => "$",
                Terminal::Id => "id",
                Terminal::IntNum => "intnum",
                Terminal::FloatNum => "floatnum",
                Terminal::Eq => "eq",
                Terminal::NotEq => "noteq",
                Terminal::Lt => "lt",
                Terminal::Gt => "gt",
                Terminal::LEq => "leq",
                Terminal::GEq => "geq",
                Terminal::Plus => "plus",
                Terminal::Minus => "minus",
                Terminal::Mult => "mult",
                Terminal::Div => "div",
                Terminal::Assign => "assign",
                Terminal::OpenPar => "openpar",
                Terminal::ClosePar => "closepar",
                Terminal::OpenCubr => "opencubr",
                Terminal::CloseCubr => "closecubr",
                Terminal::OpenSqbr => "opensqbr",
                Terminal::CloseSqbr => "closesqbr",
                Terminal::Semi => "semi",
                Terminal::Comma => "comma",
                Terminal::Dot => "dot",
                Terminal::Colon => "colon",
                Terminal::ReturnType => "returntype",
                Terminal::ScopeOp => "scopeop",
                Terminal::Or => "or",
                Terminal::And => "and",
                Terminal::Not => "not",
                Terminal::Integer => "integer",
                Terminal::Float => "float",
                Terminal::Void => "void",
                Terminal::Class => "class",
                Terminal::SelfT => "self",
                Terminal::IsA => "isa",
                Terminal::While => "while",
                Terminal::If => "if",
                Terminal::Then => "then",
                Terminal::Else => "else",
                Terminal::Read => "read",
                Terminal::Write => "write",
                Terminal::Return => "return",
                Terminal::LocalVar => "localvar",
                Terminal::Constructor => "constructor",
                Terminal::Attribute => "attribute",
                Terminal::Function => "function",
                Terminal::Public => "public",
                Terminal::Private => "private",
                Terminal::InlineCmt => "inlinecmt",
                Terminal::BlockCmt => "blockcmt",
            }
        )
    }
}

/// One symbol of a production body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SymbolRef {
    Terminal(Terminal),
    NonTerminal(String),
    /// A non-grammar marker, e.g. a semantic action, kept with the markup kind it came from.
    Action { kind: String, name: String },
}

impl Display for SymbolRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SymbolRef::Terminal(t) => write!(f, "'{}'", t),
            SymbolRef::NonTerminal(nt) => write!(f, "<{}>", nt),
            SymbolRef::Action { name, .. } => write!(f, "{{{}}}", name),
        }
    }
}
