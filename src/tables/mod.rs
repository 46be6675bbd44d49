pub mod config;
pub mod document;
pub mod emit;
pub mod error;
pub mod first_follow;
pub mod ll1_table;
pub mod ordered_table;
pub mod pretty_print;
pub mod reader;
pub mod symbol;

pub use config::Config;
pub use error::{ErrorKind, TranscribeError};
pub use first_follow::{FirstFollowSets, FirstFollowTable};
pub use ll1_table::{ParseKey, ParseTable};
pub use ordered_table::OrderedTable;
pub use symbol::{SymbolRef, Terminal};

pub type Result<T> = std::result::Result<T, TranscribeError>;
