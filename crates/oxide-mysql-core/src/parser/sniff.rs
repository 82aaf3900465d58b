//! Statement-type sniffing from leading tokens.

use tracing::trace;

use crate::ast::StatementKind;
use crate::dialect::ParserOptions;
use crate::lexer::{Keyword, Lexer, TokenKind};

/// Number of leading tokens the sniffer looks at.
///
/// Enough for `CREATE ALGORITHM = x DEFINER = 'u'@'h' SQL SECURITY y VIEW`.
const LOOKAHEAD: usize = 16;

/// Classifies a statement from its leading tokens without parsing it.
///
/// Leading parentheses are skipped, so `(SELECT 1) UNION (SELECT 2)` is a
/// `Select`. A `WITH` clause is skipped up to the statement it prefixes,
/// so `WITH c AS (...) DELETE ...` is a `Delete`. Returns
/// [`StatementKind::Unknown`] for anything that does not start like a
/// supported statement; the text is not validated.
#[must_use]
pub fn determine_statement_kind(sql: &str, options: &ParserOptions) -> StatementKind {
    let mut lexer = Lexer::with_options(sql, options);
    let words = leading_words(&mut lexer);
    let kind = if words.first().is_some_and(|w| w.is(Keyword::With)) {
        classify_with(&mut lexer)
    } else {
        classify(&words)
    };
    trace!(?kind, "sniffed statement kind");
    kind
}

/// A leading token, reduced to what classification needs.
#[derive(Debug, Clone, PartialEq)]
enum Word {
    Keyword(Keyword),
    Other(String),
}

impl Word {
    fn is(&self, keyword: Keyword) -> bool {
        matches!(self, Self::Keyword(kw) if *kw == keyword)
    }

    fn is_word(&self, text: &str) -> bool {
        matches!(self, Self::Other(word) if word.eq_ignore_ascii_case(text))
    }
}

/// Collects up to [`LOOKAHEAD`] words; stops right after a leading `WITH`.
fn leading_words(lexer: &mut Lexer<'_>) -> Vec<Word> {
    let mut words = Vec::with_capacity(LOOKAHEAD);
    while words.len() < LOOKAHEAD {
        let token = lexer.next_token();
        match token.kind {
            TokenKind::Eof | TokenKind::Error(_) | TokenKind::Semicolon => break,
            TokenKind::LeftParen if words.is_empty() => {}
            TokenKind::Keyword(Keyword::With) if words.is_empty() => {
                words.push(Word::Keyword(Keyword::With));
                break;
            }
            TokenKind::Keyword(kw) => words.push(Word::Keyword(kw)),
            TokenKind::Identifier(word) => words.push(Word::Other(word)),
            _ => words.push(Word::Other(String::new())),
        }
    }
    words
}

/// Skips the common table expressions and classifies the statement after
/// them by the first keyword outside any parentheses.
fn classify_with(lexer: &mut Lexer<'_>) -> StatementKind {
    let mut depth = 0usize;
    loop {
        match lexer.next_token().kind {
            TokenKind::Eof | TokenKind::Error(_) | TokenKind::Semicolon => {
                return StatementKind::Unknown;
            }
            TokenKind::LeftParen => depth += 1,
            TokenKind::RightParen => depth = depth.saturating_sub(1),
            TokenKind::Keyword(kw) if depth == 0 => match kw {
                Keyword::Select | Keyword::Table | Keyword::Values => {
                    return StatementKind::Select;
                }
                Keyword::Update => return StatementKind::Update,
                Keyword::Delete => return StatementKind::Delete,
                _ => {}
            },
            _ => {}
        }
    }
}

fn classify(words: &[Word]) -> StatementKind {
    let Some(Word::Keyword(first)) = words.first() else {
        return StatementKind::Unknown;
    };
    let rest = &words[1..];

    match first {
        Keyword::Select | Keyword::Table | Keyword::Values => StatementKind::Select,
        Keyword::Insert => StatementKind::Insert,
        Keyword::Replace => StatementKind::Replace,
        Keyword::Update => StatementKind::Update,
        Keyword::Delete => StatementKind::Delete,
        Keyword::Create => classify_create(rest),
        Keyword::Alter => classify_alter(rest),
        Keyword::Drop => classify_drop(rest),
        Keyword::Truncate => StatementKind::Truncate,
        Keyword::Rename => StatementKind::RenameTable,
        Keyword::Grant => StatementKind::Grant,
        Keyword::Revoke => StatementKind::Revoke,
        Keyword::Start | Keyword::Begin => StatementKind::StartTransaction,
        Keyword::Commit => StatementKind::Commit,
        Keyword::Rollback => StatementKind::Rollback,
        Keyword::Savepoint => StatementKind::Savepoint,
        Keyword::Release => StatementKind::ReleaseSavepoint,
        Keyword::Use => StatementKind::Use,
        Keyword::Show => StatementKind::Show,
        Keyword::Explain | Keyword::Describe | Keyword::Desc => classify_explain(rest),
        Keyword::Set => classify_set(rest),
        Keyword::Lock => StatementKind::LockTables,
        Keyword::Unlock => StatementKind::UnlockTables,
        Keyword::Call => StatementKind::Call,
        Keyword::Prepare => StatementKind::Prepare,
        Keyword::Execute => StatementKind::Execute,
        Keyword::Deallocate => StatementKind::Deallocate,
        _ => StatementKind::Unknown,
    }
}

fn classify_create(rest: &[Word]) -> StatementKind {
    let mut after_definer = false;
    for word in rest {
        match word {
            Word::Keyword(Keyword::Table) => return StatementKind::CreateTable,
            Word::Keyword(Keyword::Database | Keyword::Schema) => {
                return StatementKind::CreateDatabase;
            }
            Word::Keyword(Keyword::Index) => return StatementKind::CreateIndex,
            Word::Keyword(Keyword::View) => return StatementKind::CreateView,
            Word::Keyword(Keyword::User) => return StatementKind::CreateUser,
            // CREATE [OR REPLACE] [ALGORITHM = x] VIEW, CREATE TEMPORARY TABLE,
            // CREATE UNIQUE INDEX
            Word::Keyword(
                Keyword::Or
                | Keyword::Replace
                | Keyword::Algorithm
                | Keyword::Temporary
                | Keyword::Unique
                | Keyword::Fulltext
                | Keyword::Spatial
                | Keyword::Undefined
                | Keyword::Merge
                | Keyword::Temptable,
            ) => {}
            Word::Other(text) if text.is_empty() => {}
            // DEFINER = user SQL SECURITY {DEFINER | INVOKER}
            Word::Other(text) if text.eq_ignore_ascii_case("DEFINER") => after_definer = true,
            Word::Other(_) | Word::Keyword(Keyword::CurrentUser) if after_definer => {}
            _ => return StatementKind::Unknown,
        }
    }
    StatementKind::Unknown
}

fn classify_alter(rest: &[Word]) -> StatementKind {
    match rest.first() {
        Some(Word::Keyword(Keyword::Table)) => StatementKind::AlterTable,
        Some(Word::Keyword(Keyword::Database | Keyword::Schema)) => StatementKind::AlterDatabase,
        Some(Word::Keyword(Keyword::User)) => StatementKind::AlterUser,
        Some(first)
            if first.is(Keyword::Algorithm)
                || first.is(Keyword::View)
                || first.is_word("DEFINER")
                || first.is_word("SQL") =>
        {
            if classify_create(rest) == StatementKind::CreateView {
                StatementKind::AlterView
            } else {
                StatementKind::Unknown
            }
        }
        _ => StatementKind::Unknown,
    }
}

fn classify_drop(rest: &[Word]) -> StatementKind {
    let Some(Word::Keyword(kw)) = rest.iter().find(|w| !w.is(Keyword::Temporary)) else {
        return StatementKind::Unknown;
    };
    match kw {
        Keyword::Table => StatementKind::DropTable,
        Keyword::Database | Keyword::Schema => StatementKind::DropDatabase,
        Keyword::Index => StatementKind::DropIndex,
        Keyword::View => StatementKind::DropView,
        Keyword::User => StatementKind::DropUser,
        Keyword::Procedure | Keyword::Function => StatementKind::DropRoutine,
        Keyword::Prepare => StatementKind::Deallocate,
        _ => StatementKind::Unknown,
    }
}

/// `EXPLAIN SELECT ...` is an explain; `EXPLAIN tbl` is a describe.
fn classify_explain(rest: &[Word]) -> StatementKind {
    match rest.first() {
        Some(Word::Keyword(
            Keyword::Select
            | Keyword::With
            | Keyword::Insert
            | Keyword::Replace
            | Keyword::Update
            | Keyword::Delete
            | Keyword::Format,
        )) => StatementKind::Explain,
        Some(word) if word.is_word("ANALYZE") => StatementKind::Explain,
        Some(_) => StatementKind::Describe,
        None => StatementKind::Unknown,
    }
}

fn classify_set(rest: &[Word]) -> StatementKind {
    match rest {
        [first, ..] if first.is(Keyword::Names) || first.is(Keyword::Charset) => {
            StatementKind::SetNames
        }
        [first, second, ..] if first.is(Keyword::Character) && second.is(Keyword::Set) => {
            StatementKind::SetNames
        }
        [first, ..] if first.is(Keyword::Transaction) => StatementKind::SetTransaction,
        [first, ..] if first.is(Keyword::Password) => StatementKind::SetPassword,
        [first, second, ..]
            if (first.is(Keyword::Global) || first.is(Keyword::Session))
                && second.is(Keyword::Transaction) =>
        {
            StatementKind::SetTransaction
        }
        _ => StatementKind::Set,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::SqlMode;

    fn kind(sql: &str) -> StatementKind {
        determine_statement_kind(sql, &ParserOptions::default())
    }

    #[test]
    fn test_queries() {
        assert_eq!(kind("SELECT 1"), StatementKind::Select);
        assert_eq!(kind("  with cte AS (SELECT 1) SELECT * FROM cte"), StatementKind::Select);
        assert_eq!(kind("((SELECT 1)) UNION (SELECT 2)"), StatementKind::Select);
        assert_eq!(kind("/* hint */ -- c\nSELECT 1"), StatementKind::Select);
    }

    #[test]
    fn test_dml() {
        assert_eq!(kind("insert into t values (1)"), StatementKind::Insert);
        assert_eq!(kind("REPLACE t SET a = 1"), StatementKind::Replace);
        assert_eq!(kind("UPDATE t SET a = 1"), StatementKind::Update);
        assert_eq!(kind("DELETE FROM t"), StatementKind::Delete);
    }

    #[test]
    fn test_create_and_drop() {
        assert_eq!(kind("CREATE TEMPORARY TABLE t (a INT)"), StatementKind::CreateTable);
        assert_eq!(kind("CREATE UNIQUE INDEX i ON t (a)"), StatementKind::CreateIndex);
        assert_eq!(
            kind("CREATE OR REPLACE ALGORITHM = MERGE VIEW v AS SELECT 1"),
            StatementKind::CreateView
        );
        assert_eq!(kind("CREATE SCHEMA s"), StatementKind::CreateDatabase);
        assert_eq!(kind("CREATE USER u"), StatementKind::CreateUser);
        assert_eq!(kind("CREATE TRIGGER trg"), StatementKind::Unknown);
        assert_eq!(kind("DROP TEMPORARY TABLE t"), StatementKind::DropTable);
        assert_eq!(kind("DROP FUNCTION f"), StatementKind::DropRoutine);
        assert_eq!(kind("DROP PREPARE stmt"), StatementKind::Deallocate);
        assert_eq!(kind("ALTER TABLE t ADD c INT"), StatementKind::AlterTable);
        assert_eq!(kind("ALTER USER u"), StatementKind::AlterUser);
        assert_eq!(kind("ALTER SCHEMA s CHARSET latin1"), StatementKind::AlterDatabase);
        assert_eq!(kind("ALTER EVENT e DISABLE"), StatementKind::Unknown);
    }

    #[test]
    fn test_view_headers() {
        assert_eq!(
            kind("CREATE ALGORITHM=UNDEFINED DEFINER=`root`@`localhost` SQL SECURITY DEFINER VIEW v AS SELECT 1"),
            StatementKind::CreateView
        );
        assert_eq!(
            kind("CREATE DEFINER = CURRENT_USER() VIEW v AS SELECT 1"),
            StatementKind::CreateView
        );
        assert_eq!(kind("CREATE DEFINER = app TRIGGER t"), StatementKind::Unknown);
        assert_eq!(
            kind("ALTER SQL SECURITY INVOKER VIEW v AS SELECT 1"),
            StatementKind::AlterView
        );
    }

    #[test]
    fn test_with_prefixed_statements() {
        assert_eq!(
            kind("WITH c AS (SELECT id FROM t) DELETE FROM t WHERE id IN (SELECT id FROM c)"),
            StatementKind::Delete
        );
        assert_eq!(
            kind("WITH RECURSIVE c (n) AS (SELECT 1 UNION ALL SELECT n + 1 FROM c) UPDATE t SET a = 1"),
            StatementKind::Update
        );
        assert!(!kind("WITH c AS (SELECT 1) DELETE FROM t").is_query());
        assert_eq!(kind("(WITH c AS (SELECT 1) SELECT * FROM c)"), StatementKind::Select);
        assert_eq!(kind("WITH c AS (SELECT 1)"), StatementKind::Unknown);
        assert_eq!(kind("TABLE t"), StatementKind::Select);
        assert_eq!(kind("VALUES ROW(1, 2)"), StatementKind::Select);
    }

    #[test]
    fn test_explain_versus_describe() {
        assert_eq!(kind("EXPLAIN SELECT 1"), StatementKind::Explain);
        assert_eq!(kind("EXPLAIN FORMAT=JSON SELECT 1"), StatementKind::Explain);
        assert_eq!(kind("DESC t"), StatementKind::Describe);
        assert!(kind("DESCRIBE t").is_query());
    }

    #[test]
    fn test_set_variants() {
        assert_eq!(kind("SET NAMES utf8mb4"), StatementKind::SetNames);
        assert_eq!(kind("SET CHARACTER SET utf8mb4"), StatementKind::SetNames);
        assert_eq!(
            kind("SET SESSION TRANSACTION READ ONLY"),
            StatementKind::SetTransaction
        );
        assert_eq!(kind("SET @a = 1"), StatementKind::Set);
        assert_eq!(kind("SET PASSWORD = 'x'"), StatementKind::SetPassword);
        assert_eq!(
            kind("SET PASSWORD FOR 'app'@'%' = 'x'"),
            StatementKind::SetPassword
        );
    }

    #[test]
    fn test_unknown() {
        assert_eq!(kind(""), StatementKind::Unknown);
        assert_eq!(kind("   ;"), StatementKind::Unknown);
        assert_eq!(kind("FROB t"), StatementKind::Unknown);
        assert_eq!(kind("'SELECT'"), StatementKind::Unknown);
    }

    #[test]
    fn test_version_comment_is_honoured() {
        let options = ParserOptions::default().with_server_version(50_700);
        assert_eq!(
            determine_statement_kind("/*!80000 SELECT 1 */", &options),
            StatementKind::Unknown
        );
        assert_eq!(
            determine_statement_kind("/*!50100 SELECT 1 */", &options),
            StatementKind::Select
        );
        let ansi = ParserOptions::default().with_sql_mode(SqlMode::ANSI_QUOTES);
        assert_eq!(
            determine_statement_kind("SELECT \"a\"", &ansi),
            StatementKind::Select
        );
    }
}
