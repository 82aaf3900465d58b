//! # oxide-mysql-core
//!
//! A hand-written parser for the MySQL dialect of SQL.
//!
//! This crate provides:
//! - A lexer that honours `sql_mode` and `/*!NNNNN ... */` version comments
//! - A recursive descent parser with Pratt expression parsing and MySQL
//!   operator precedence
//! - A typed AST whose `Display` renders canonical MySQL text
//! - Script parsing that recovers from syntax errors
//!
//! ## Parsing a statement
//!
//! ```rust
//! use oxide_mysql_core::{Parser, Statement};
//!
//! let statement = Parser::new("select id, name from users where id = ?")
//!     .parse_statement()
//!     .unwrap();
//!
//! assert!(matches!(statement, Statement::Query(_)));
//! assert_eq!(
//!     statement.to_string(),
//!     "SELECT id, name FROM users WHERE id = ?"
//! );
//! ```
//!
//! ## Recovering from errors
//!
//! ```rust
//! use oxide_mysql_core::Parser;
//!
//! let output = Parser::new("SELECT 1; SELECT FROM; SELECT 2").parse_script();
//!
//! assert_eq!(output.statements.len(), 2);
//! assert_eq!(output.errors.len(), 1);
//! ```
//!
//! ## SQL modes
//!
//! ```rust
//! use oxide_mysql_core::{Parser, ParserOptions, SqlMode};
//!
//! let options = ParserOptions::new().with_sql_mode("ANSI".parse().unwrap());
//! let statement = Parser::with_options(r#"SELECT "a" || "b" FROM t"#, options)
//!     .parse_statement()
//!     .unwrap();
//!
//! assert!(options.sql_mode.contains(SqlMode::PIPES_AS_CONCAT));
//! assert_eq!(statement.to_string(), "SELECT a || b FROM t");
//! ```
//!
//! ## Sniffing statement kinds
//!
//! ```rust
//! use oxide_mysql_core::{determine_statement_kind, ParserOptions, StatementKind};
//!
//! let kind = determine_statement_kind("SHOW TABLES", &ParserOptions::default());
//! assert_eq!(kind, StatementKind::Show);
//! assert!(kind.is_query());
//! ```

pub mod ast;
pub mod dialect;
pub mod lexer;
pub mod parser;

pub use ast::{DataType, Expr, Statement, StatementKind};
pub use dialect::{ParserOptions, SqlMode};
pub use lexer::{Keyword, Lexer, Location, Span, Token, TokenKind};
pub use parser::{determine_statement_kind, ParseError, ParseOutput, Parser, MAX_NESTING_DEPTH};
