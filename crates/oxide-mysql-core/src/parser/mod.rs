//! MySQL Parser
//!
//! A hand-written recursive descent parser with Pratt expression parsing.
//! Statement parsers are split by family: queries, data manipulation,
//! data definition, and the account/transaction/session utilities.

mod admin;
mod data_type;
mod ddl;
mod dml;
mod error;
mod expr;
mod parser;
mod pratt;
mod query;
mod sniff;

pub use error::ParseError;
pub use parser::{ParseOutput, Parser, MAX_NESTING_DEPTH};
pub use sniff::determine_statement_kind;
