//! MySQL Lexer/Tokenizer
//!
//! This module provides a hand-written lexer for MySQL that produces a stream
//! of tokens. Lexing honours the `sql_mode` flags that change how text is
//! split into tokens (`ANSI_QUOTES`, `NO_BACKSLASH_ESCAPES`) and evaluates
//! `/*!NNNNN ... */` version comments against the configured server version.

mod span;
mod token;
mod tokenizer;

pub use span::{Location, Span};
pub use token::{Keyword, Token, TokenKind};
pub use tokenizer::Lexer;
