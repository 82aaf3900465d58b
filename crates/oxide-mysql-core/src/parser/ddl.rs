//! Data definition parsing: CREATE, ALTER, DROP, TRUNCATE and RENAME.

use super::error::ParseError;
use super::parser::Parser;
use super::pratt::COLLATE_BP;
use crate::ast::{
    AlterDatabaseStatement, AlterTableOperation, AlterTableStatement, AlterViewStatement,
    ColumnDef, ColumnOption, ColumnPosition, CreateDatabaseStatement, CreateIndexStatement,
    CreateTableStatement, CreateViewStatement, DropBehavior, DropDatabaseStatement,
    DropIndexStatement, DropRoutineStatement, DropTableStatement, DropViewStatement, Expr,
    ForeignKeyReference, IndexKind, IndexType, KeyPart, ObjectName, OptionValue, OrderDirection,
    Query, ReferentialAction, RenameTableStatement, RoutineKind, Statement, TableConstraint,
    TableOption, TruncateStatement, ViewAlgorithm, ViewCheckOption, ViewDefiner, ViewSecurity,
};
use crate::lexer::{Keyword, TokenKind};

/// Binding power for DEFAULT and ON UPDATE values: literals, signed
/// numbers, function calls and parenthesized expressions, but no binary
/// operators (so `DEFAULT 'a' COLLATE x` leaves COLLATE to the column).
const COLUMN_VALUE_BP: u8 = COLLATE_BP + 1;

/// Clauses between CREATE/ALTER and the view name.
struct ViewHead {
    algorithm: Option<ViewAlgorithm>,
    definer: Option<ViewDefiner>,
    security: Option<ViewSecurity>,
}

/// Everything from the view name on.
struct ViewBody {
    name: ObjectName,
    columns: Vec<String>,
    query: Box<Query>,
    check_option: Option<ViewCheckOption>,
}

impl Parser<'_> {
    /// Parses a CREATE statement.
    pub(super) fn parse_create(&mut self) -> Result<Statement, ParseError> {
        self.expect_keyword(Keyword::Create)?;

        let or_replace = if self.consume_keyword(Keyword::Or) {
            self.expect_keyword(Keyword::Replace)?;
            true
        } else {
            false
        };
        if or_replace && !self.is_view_head_start() {
            return Err(self.error_expected("VIEW"));
        }
        if self.is_view_head_start() {
            return self.parse_create_view(or_replace);
        }

        match self.current.as_keyword() {
            Some(Keyword::Temporary) => {
                self.advance();
                self.expect_keyword(Keyword::Table)?;
                self.parse_create_table(true)
            }
            Some(Keyword::Table) => {
                self.advance();
                self.parse_create_table(false)
            }
            Some(Keyword::Database | Keyword::Schema) => {
                self.advance();
                self.parse_create_database()
            }
            Some(Keyword::Unique | Keyword::Fulltext | Keyword::Spatial | Keyword::Index) => {
                self.parse_create_index()
            }
            Some(Keyword::User) => {
                self.advance();
                self.parse_create_user()
            }
            _ => Err(self.error_expected("TABLE, DATABASE, INDEX, VIEW or USER")),
        }
    }

    /// Parses `[IF NOT EXISTS]`.
    fn parse_if_not_exists(&mut self) -> Result<bool, ParseError> {
        if !self.consume_keyword(Keyword::If) {
            return Ok(false);
        }
        self.expect_keyword(Keyword::Not)?;
        self.expect_keyword(Keyword::Exists)?;
        Ok(true)
    }

    /// Parses `[IF EXISTS]`.
    pub(super) fn parse_if_exists(&mut self) -> Result<bool, ParseError> {
        if !self.consume_keyword(Keyword::If) {
            return Ok(false);
        }
        self.expect_keyword(Keyword::Exists)?;
        Ok(true)
    }

    fn parse_create_database(&mut self) -> Result<Statement, ParseError> {
        let if_not_exists = self.parse_if_not_exists()?;
        let name = self.expect_identifier()?;
        let options = self.parse_table_options()?;
        Ok(Statement::CreateDatabase(CreateDatabaseStatement {
            if_not_exists,
            name,
            options,
        }))
    }

    /// Parses the rest of `CREATE [TEMPORARY] TABLE`.
    fn parse_create_table(&mut self, temporary: bool) -> Result<Statement, ParseError> {
        let if_not_exists = self.parse_if_not_exists()?;
        let name = self.parse_object_name()?;

        let mut create = CreateTableStatement {
            temporary,
            if_not_exists,
            name,
            columns: vec![],
            constraints: vec![],
            options: vec![],
            like: None,
            query: None,
        };

        // CREATE TABLE t LIKE u / CREATE TABLE t (LIKE u)
        if self.consume_keyword(Keyword::Like) {
            create.like = Some(self.parse_object_name()?);
            return Ok(Statement::CreateTable(Box::new(create)));
        }
        if self.check(&TokenKind::LeftParen) && self.peek_keyword(Keyword::Like) {
            self.advance();
            self.advance();
            create.like = Some(self.parse_object_name()?);
            self.expect(&TokenKind::RightParen)?;
            return Ok(Statement::CreateTable(Box::new(create)));
        }

        let query_follows = matches!(
            self.peek(),
            TokenKind::Keyword(Keyword::Select | Keyword::With)
        );
        if self.check(&TokenKind::LeftParen) && !query_follows {
            self.advance();
            loop {
                if self.is_table_constraint_start() {
                    create.constraints.push(self.parse_table_constraint()?);
                } else {
                    create.columns.push(self.parse_column_def()?);
                }
                if !self.consume(&TokenKind::Comma) {
                    break;
                }
            }
            self.expect(&TokenKind::RightParen)?;
        }

        create.options = self.parse_table_options()?;

        // IGNORE / REPLACE only govern duplicate handling of the copied rows.
        if !self.consume_keyword(Keyword::Ignore) {
            self.consume_keyword(Keyword::Replace);
        }
        let as_keyword = self.consume_keyword(Keyword::As);
        if as_keyword
            || matches!(
                self.current.kind,
                TokenKind::Keyword(Keyword::Select | Keyword::With) | TokenKind::LeftParen
            )
        {
            create.query = Some(Box::new(self.parse_query()?));
        }

        if create.columns.is_empty() && create.constraints.is_empty() && create.query.is_none() {
            return Err(self.error_expected("column definitions"));
        }
        Ok(Statement::CreateTable(Box::new(create)))
    }

    /// Returns true if the current token starts a table constraint rather
    /// than a column definition.
    fn is_table_constraint_start(&self) -> bool {
        matches!(
            self.current.as_keyword(),
            Some(
                Keyword::Constraint
                    | Keyword::Primary
                    | Keyword::Unique
                    | Keyword::Index
                    | Keyword::Key
                    | Keyword::Fulltext
                    | Keyword::Spatial
                    | Keyword::Foreign
                    | Keyword::Check
            )
        )
    }

    /// Parses `name data_type [attributes]`.
    fn parse_column_def(&mut self) -> Result<ColumnDef, ParseError> {
        let name = self.expect_identifier()?;
        let data_type = self.parse_data_type()?;
        let mut column = ColumnDef::new(name, data_type);
        while let Some(option) = self.parse_column_option()? {
            column.options.push(option);
        }
        Ok(column)
    }

    /// Parses one column attribute, or returns `None` at the end of the
    /// attribute list.
    fn parse_column_option(&mut self) -> Result<Option<ColumnOption>, ParseError> {
        let Some(kw) = self.current.as_keyword() else {
            return Ok(None);
        };
        let option = match kw {
            Keyword::Not => {
                self.advance();
                self.expect_keyword(Keyword::Null)?;
                ColumnOption::NotNull
            }
            Keyword::Null => {
                self.advance();
                ColumnOption::Null
            }
            Keyword::Default => {
                self.advance();
                ColumnOption::Default(self.parse_expression(COLUMN_VALUE_BP)?)
            }
            Keyword::On => {
                self.advance();
                self.expect_keyword(Keyword::Update)?;
                ColumnOption::OnUpdate(self.parse_expression(COLUMN_VALUE_BP)?)
            }
            Keyword::AutoIncrement => {
                self.advance();
                ColumnOption::AutoIncrement
            }
            Keyword::Primary => {
                self.advance();
                self.expect_keyword(Keyword::Key)?;
                ColumnOption::PrimaryKey
            }
            Keyword::Key => {
                self.advance();
                ColumnOption::PrimaryKey
            }
            Keyword::Unique => {
                self.advance();
                self.consume_keyword(Keyword::Key);
                ColumnOption::Unique
            }
            Keyword::Comment => {
                self.advance();
                ColumnOption::Comment(self.expect_string()?)
            }
            Keyword::Character => {
                self.advance();
                self.expect_keyword(Keyword::Set)?;
                ColumnOption::CharacterSet(self.expect_name_or_string()?)
            }
            Keyword::Charset => {
                self.advance();
                ColumnOption::CharacterSet(self.expect_name_or_string()?)
            }
            Keyword::Collate => {
                self.advance();
                ColumnOption::Collate(self.expect_name_or_string()?)
            }
            Keyword::Generated => {
                self.advance();
                self.expect_word("ALWAYS")?;
                self.expect_keyword(Keyword::As)?;
                self.parse_generated_column()?
            }
            Keyword::As => {
                self.advance();
                self.parse_generated_column()?
            }
            Keyword::Constraint => {
                self.advance();
                let name = self.current_identifier();
                if name.is_some() {
                    self.advance();
                }
                self.expect_keyword(Keyword::Check)?;
                self.parse_check_body(name)?
            }
            Keyword::Check => {
                self.advance();
                self.parse_check_body(None)?
            }
            Keyword::References => ColumnOption::References(self.parse_references()?),
            Keyword::Visible => {
                self.advance();
                ColumnOption::Visible
            }
            Keyword::Invisible => {
                self.advance();
                ColumnOption::Invisible
            }
            _ => return Ok(None),
        };
        Ok(Some(option))
    }

    /// Parses `(expr) [VIRTUAL | STORED]` after `AS`.
    fn parse_generated_column(&mut self) -> Result<ColumnOption, ParseError> {
        self.expect(&TokenKind::LeftParen)?;
        let expr = self.parse_expr()?;
        self.expect(&TokenKind::RightParen)?;
        let stored = if self.consume_keyword(Keyword::Stored) {
            true
        } else {
            self.consume_keyword(Keyword::Virtual);
            false
        };
        Ok(ColumnOption::Generated { expr, stored })
    }

    /// Parses `(expr) [[NOT] ENFORCED]` after `CHECK`.
    fn parse_check_body(&mut self, name: Option<String>) -> Result<ColumnOption, ParseError> {
        let expr = self.parse_check_expr()?;
        Ok(ColumnOption::Check { name, expr })
    }

    fn parse_check_expr(&mut self) -> Result<Expr, ParseError> {
        self.expect(&TokenKind::LeftParen)?;
        let expr = self.parse_expr()?;
        self.expect(&TokenKind::RightParen)?;
        if !self.consume_word("ENFORCED")
            && self.check_keyword(Keyword::Not)
            && self.peek_word("ENFORCED")
        {
            self.advance();
            self.advance();
        }
        Ok(expr)
    }

    /// Returns true if the token after the current one is the given word.
    fn peek_word(&mut self, word: &str) -> bool {
        matches!(self.peek(), TokenKind::Identifier(name) if name.eq_ignore_ascii_case(word))
    }

    /// Parses `REFERENCES tbl [(cols)] [MATCH ...] [ON DELETE ...] [ON UPDATE ...]`.
    fn parse_references(&mut self) -> Result<ForeignKeyReference, ParseError> {
        self.expect_keyword(Keyword::References)?;
        let table = self.parse_object_name()?;
        let columns = if self.check(&TokenKind::LeftParen) {
            self.parse_parenthesized_identifiers()?
        } else {
            vec![]
        };
        if self.consume_keyword(Keyword::Match)
            && !self.consume_keyword(Keyword::Full)
            && !self.consume_word("PARTIAL")
        {
            self.expect_word("SIMPLE")?;
        }

        let mut reference = ForeignKeyReference {
            table,
            columns,
            on_delete: None,
            on_update: None,
        };
        while self.check_keyword(Keyword::On) {
            match self.peek() {
                TokenKind::Keyword(Keyword::Delete) => {
                    self.advance();
                    self.advance();
                    reference.on_delete = Some(self.parse_referential_action()?);
                }
                TokenKind::Keyword(Keyword::Update) => {
                    self.advance();
                    self.advance();
                    reference.on_update = Some(self.parse_referential_action()?);
                }
                _ => break,
            }
        }
        Ok(reference)
    }

    fn parse_referential_action(&mut self) -> Result<ReferentialAction, ParseError> {
        match self.current.as_keyword() {
            Some(Keyword::Restrict) => {
                self.advance();
                Ok(ReferentialAction::Restrict)
            }
            Some(Keyword::Cascade) => {
                self.advance();
                Ok(ReferentialAction::Cascade)
            }
            Some(Keyword::Set) => {
                self.advance();
                if self.consume_keyword(Keyword::Null) {
                    Ok(ReferentialAction::SetNull)
                } else {
                    self.expect_keyword(Keyword::Default)?;
                    Ok(ReferentialAction::SetDefault)
                }
            }
            Some(Keyword::No) => {
                self.advance();
                self.expect_keyword(Keyword::Action)?;
                Ok(ReferentialAction::NoAction)
            }
            _ => Err(self.error_expected("RESTRICT, CASCADE, SET NULL, SET DEFAULT or NO ACTION")),
        }
    }

    /// Parses a table constraint or index definition.
    fn parse_table_constraint(&mut self) -> Result<TableConstraint, ParseError> {
        let constraint_name = if self.consume_keyword(Keyword::Constraint) {
            let name = self.current_identifier();
            if name.is_some() {
                self.advance();
            }
            name
        } else {
            None
        };

        match self.current.as_keyword() {
            Some(Keyword::Primary) => {
                self.advance();
                self.expect_keyword(Keyword::Key)?;
                let (using, columns) = self.parse_index_body()?;
                Ok(TableConstraint::PrimaryKey {
                    name: constraint_name,
                    using,
                    columns,
                })
            }
            Some(Keyword::Unique) => {
                self.advance();
                if !self.consume_keyword(Keyword::Index) {
                    self.consume_keyword(Keyword::Key);
                }
                let name = self.parse_optional_index_name().or(constraint_name);
                let (using, columns) = self.parse_index_body()?;
                Ok(TableConstraint::Index {
                    kind: IndexKind::Unique,
                    name,
                    using,
                    columns,
                })
            }
            Some(kw @ (Keyword::Index | Keyword::Key | Keyword::Fulltext | Keyword::Spatial))
                if constraint_name.is_none() =>
            {
                self.advance();
                let kind = match kw {
                    Keyword::Fulltext => IndexKind::Fulltext,
                    Keyword::Spatial => IndexKind::Spatial,
                    _ => IndexKind::Plain,
                };
                if kind != IndexKind::Plain && !self.consume_keyword(Keyword::Index) {
                    self.consume_keyword(Keyword::Key);
                }
                let name = self.parse_optional_index_name();
                let (using, columns) = self.parse_index_body()?;
                Ok(TableConstraint::Index {
                    kind,
                    name,
                    using,
                    columns,
                })
            }
            Some(Keyword::Foreign) => {
                self.advance();
                self.expect_keyword(Keyword::Key)?;
                let index_name = self.parse_optional_index_name();
                let columns = self.parse_parenthesized_identifiers()?;
                let reference = self.parse_references()?;
                Ok(TableConstraint::ForeignKey {
                    name: constraint_name.or(index_name),
                    columns,
                    reference,
                })
            }
            Some(Keyword::Check) => {
                self.advance();
                let expr = self.parse_check_expr()?;
                Ok(TableConstraint::Check {
                    name: constraint_name,
                    expr,
                })
            }
            _ => Err(self.error_expected("PRIMARY KEY, UNIQUE, FOREIGN KEY or CHECK")),
        }
    }

    fn parse_optional_index_name(&mut self) -> Option<String> {
        let name = self.current_identifier()?;
        self.advance();
        Some(name)
    }

    /// Parses `[USING type] (key_parts) [index_options]`.
    fn parse_index_body(&mut self) -> Result<(Option<IndexType>, Vec<KeyPart>), ParseError> {
        let mut using = self.parse_index_type()?;
        let columns = self.parse_key_parts()?;
        self.parse_index_options(&mut using)?;
        Ok((using, columns))
    }

    /// Parses `[USING {BTREE | HASH}]`.
    fn parse_index_type(&mut self) -> Result<Option<IndexType>, ParseError> {
        if !self.consume_keyword(Keyword::Using) {
            return Ok(None);
        }
        if self.consume_keyword(Keyword::Btree) {
            Ok(Some(IndexType::Btree))
        } else if self.consume_keyword(Keyword::Hash) {
            Ok(Some(IndexType::Hash))
        } else {
            Err(self.error_expected("BTREE or HASH"))
        }
    }

    /// Skips index options after the key parts. A trailing `USING` sets the
    /// index type if none was given before the key parts.
    fn parse_index_options(&mut self, using: &mut Option<IndexType>) -> Result<(), ParseError> {
        loop {
            if self.check_keyword(Keyword::Using) {
                let index_type = self.parse_index_type()?;
                if using.is_none() {
                    *using = index_type;
                }
            } else if self.consume_keyword(Keyword::Comment) {
                self.expect_string()?;
            } else if self.consume_word("KEY_BLOCK_SIZE") {
                self.consume_optional_eq();
                self.expect_u32()?;
            } else if !self.consume_keyword(Keyword::Visible)
                && !self.consume_keyword(Keyword::Invisible)
            {
                return Ok(());
            }
        }
    }

    /// Parses `(key_part, ...)`.
    fn parse_key_parts(&mut self) -> Result<Vec<KeyPart>, ParseError> {
        self.expect(&TokenKind::LeftParen)?;
        let mut parts = vec![];
        loop {
            let part = if self.consume(&TokenKind::LeftParen) {
                let expr = self.parse_expr()?;
                self.expect(&TokenKind::RightParen)?;
                KeyPart::Expr {
                    expr,
                    direction: self.parse_key_direction(),
                }
            } else {
                let name = self.expect_identifier()?;
                let length = if self.consume(&TokenKind::LeftParen) {
                    let length = self.expect_u32()?;
                    self.expect(&TokenKind::RightParen)?;
                    Some(length)
                } else {
                    None
                };
                KeyPart::Column {
                    name,
                    length,
                    direction: self.parse_key_direction(),
                }
            };
            parts.push(part);
            if !self.consume(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(&TokenKind::RightParen)?;
        Ok(parts)
    }

    fn parse_key_direction(&mut self) -> Option<OrderDirection> {
        if self.consume_keyword(Keyword::Asc) {
            Some(OrderDirection::Asc)
        } else if self.consume_keyword(Keyword::Desc) {
            Some(OrderDirection::Desc)
        } else {
            None
        }
    }

    /// Parses table options, optionally separated by commas.
    fn parse_table_options(&mut self) -> Result<Vec<TableOption>, ParseError> {
        let mut options = vec![];
        while let Some(option) = self.parse_table_option()? {
            options.push(option);
            if self.check(&TokenKind::Comma) && self.peek_starts_table_option() {
                self.advance();
            }
        }
        Ok(options)
    }

    fn peek_starts_table_option(&mut self) -> bool {
        match self.peek() {
            TokenKind::Keyword(kw) => matches!(
                kw,
                Keyword::Engine
                    | Keyword::AutoIncrement
                    | Keyword::Default
                    | Keyword::Character
                    | Keyword::Charset
                    | Keyword::Collate
                    | Keyword::Comment
                    | Keyword::RowFormat
            ),
            TokenKind::Identifier(_) => true,
            _ => false,
        }
    }

    /// Parses one table or database option, or returns `None`.
    ///
    /// `CHARSET` and `[DEFAULT] CHARACTER SET` are all stored as
    /// `CHARACTER SET`; the `DEFAULT` prefix is dropped.
    fn parse_table_option(&mut self) -> Result<Option<TableOption>, ParseError> {
        if self.check_keyword(Keyword::Default)
            && matches!(
                self.peek(),
                TokenKind::Keyword(Keyword::Character | Keyword::Charset | Keyword::Collate)
            )
        {
            self.advance();
        }

        let name = match &self.current.kind {
            TokenKind::Keyword(Keyword::Engine) => String::from("ENGINE"),
            TokenKind::Keyword(Keyword::AutoIncrement) => String::from("AUTO_INCREMENT"),
            TokenKind::Keyword(Keyword::Charset) => String::from("CHARACTER SET"),
            TokenKind::Keyword(Keyword::Character) => {
                self.advance();
                if !self.check_keyword(Keyword::Set) {
                    return Err(self.error_expected("SET"));
                }
                String::from("CHARACTER SET")
            }
            TokenKind::Keyword(Keyword::Collate) => String::from("COLLATE"),
            TokenKind::Keyword(Keyword::Comment) => String::from("COMMENT"),
            TokenKind::Keyword(Keyword::RowFormat) => String::from("ROW_FORMAT"),
            // KEY_BLOCK_SIZE=8, STATS_PERSISTENT=1, ENCRYPTION='Y', ...
            TokenKind::Identifier(word)
                if word.contains('_')
                    || matches!(
                        word.to_ascii_uppercase().as_str(),
                        "ENCRYPTION" | "CHECKSUM" | "COMPRESSION" | "PASSWORD" | "CONNECTION"
                    ) =>
            {
                word.to_ascii_uppercase()
            }
            _ => return Ok(None),
        };
        self.advance();
        self.consume_optional_eq();
        let value = self.parse_option_value()?;
        Ok(Some(TableOption::new(name, value)))
    }

    fn parse_option_value(&mut self) -> Result<OptionValue, ParseError> {
        let value = match &self.current.kind {
            TokenKind::Integer(_) | TokenKind::Decimal(_) => OptionValue::Number(self.current_text()),
            TokenKind::String(s) | TokenKind::NationalString(s) => OptionValue::String(s.clone()),
            TokenKind::Identifier(word) | TokenKind::QuotedIdentifier(word) => {
                OptionValue::Ident(word.clone())
            }
            TokenKind::Keyword(kw) => OptionValue::Ident(String::from(kw.as_str())),
            _ => return Err(self.error_expected("option value")),
        };
        self.advance();
        Ok(value)
    }

    /// Parses `CREATE [UNIQUE | FULLTEXT | SPATIAL] INDEX name [USING type]
    /// ON tbl (key_parts)`.
    fn parse_create_index(&mut self) -> Result<Statement, ParseError> {
        let kind = match self.current.as_keyword() {
            Some(Keyword::Unique) => IndexKind::Unique,
            Some(Keyword::Fulltext) => IndexKind::Fulltext,
            Some(Keyword::Spatial) => IndexKind::Spatial,
            _ => IndexKind::Plain,
        };
        if kind != IndexKind::Plain {
            self.advance();
        }
        self.expect_keyword(Keyword::Index)?;
        let name = self.expect_identifier()?;
        let mut using = self.parse_index_type()?;
        self.expect_keyword(Keyword::On)?;
        let table = self.parse_object_name()?;
        let columns = self.parse_key_parts()?;
        self.parse_index_options(&mut using)?;
        self.parse_online_ddl_clauses()?;
        Ok(Statement::CreateIndex(CreateIndexStatement {
            kind,
            name,
            using,
            table,
            columns,
        }))
    }

    /// Skips `ALGORITHM [=] x` and `LOCK [=] x` on index statements.
    fn parse_online_ddl_clauses(&mut self) -> Result<(), ParseError> {
        while self.consume_keyword(Keyword::Algorithm) || self.consume_keyword(Keyword::Lock) {
            self.parse_online_ddl_value()?;
        }
        Ok(())
    }

    /// Parses the `[=] value` of an ALGORITHM or LOCK clause, upper-cased.
    fn parse_online_ddl_value(&mut self) -> Result<String, ParseError> {
        self.consume_optional_eq();
        if self.consume_keyword(Keyword::Default) {
            return Ok(String::from("DEFAULT"));
        }
        Ok(self.expect_identifier()?.to_ascii_uppercase())
    }

    /// Returns true at `ALGORITHM`, `DEFINER`, `SQL SECURITY` or `VIEW`.
    fn is_view_head_start(&self) -> bool {
        matches!(
            self.current.as_keyword(),
            Some(Keyword::Algorithm | Keyword::View)
        ) || self.check_word("DEFINER")
            || self.check_word("SQL")
    }

    /// Parses `[ALGORITHM = x] [DEFINER = user] [SQL SECURITY s] VIEW`.
    fn parse_view_head(&mut self) -> Result<ViewHead, ParseError> {
        let algorithm = if self.consume_keyword(Keyword::Algorithm) {
            self.expect(&TokenKind::Eq)?;
            let algorithm = match self.current.as_keyword() {
                Some(Keyword::Undefined) => ViewAlgorithm::Undefined,
                Some(Keyword::Merge) => ViewAlgorithm::Merge,
                Some(Keyword::Temptable) => ViewAlgorithm::Temptable,
                _ => return Err(self.error_expected("UNDEFINED, MERGE or TEMPTABLE")),
            };
            self.advance();
            Some(algorithm)
        } else {
            None
        };

        let definer = if self.consume_word("DEFINER") {
            self.expect(&TokenKind::Eq)?;
            if self.consume_keyword(Keyword::CurrentUser) {
                if self.consume(&TokenKind::LeftParen) {
                    self.expect(&TokenKind::RightParen)?;
                }
                Some(ViewDefiner::CurrentUser)
            } else {
                Some(ViewDefiner::User(self.parse_user_name()?))
            }
        } else {
            None
        };

        let security = if self.consume_word("SQL") {
            self.expect_word("SECURITY")?;
            let security = if self.consume_word("DEFINER") {
                ViewSecurity::Definer
            } else if self.consume_word("INVOKER") {
                ViewSecurity::Invoker
            } else {
                return Err(self.error_expected("DEFINER or INVOKER"));
            };
            Some(security)
        } else {
            None
        };

        self.expect_keyword(Keyword::View)?;
        Ok(ViewHead {
            algorithm,
            definer,
            security,
        })
    }

    /// Parses `name [(cols)] AS query [WITH [CASCADED | LOCAL] CHECK OPTION]`.
    fn parse_view_body(&mut self) -> Result<ViewBody, ParseError> {
        let name = self.parse_object_name()?;
        let columns = if self.check(&TokenKind::LeftParen) {
            self.parse_parenthesized_identifiers()?
        } else {
            vec![]
        };
        self.expect_keyword(Keyword::As)?;
        let query = Box::new(self.parse_query()?);

        let check_option = if self.consume_keyword(Keyword::With) {
            let check_option = if self.consume_keyword(Keyword::Local) {
                ViewCheckOption::Local
            } else {
                self.consume_keyword(Keyword::Cascaded);
                ViewCheckOption::Cascaded
            };
            self.expect_keyword(Keyword::Check)?;
            self.expect_keyword(Keyword::Option)?;
            Some(check_option)
        } else {
            None
        };
        Ok(ViewBody {
            name,
            columns,
            query,
            check_option,
        })
    }

    /// Parses the rest of `CREATE [OR REPLACE] ... VIEW`.
    fn parse_create_view(&mut self, or_replace: bool) -> Result<Statement, ParseError> {
        let head = self.parse_view_head()?;
        let body = self.parse_view_body()?;
        Ok(Statement::CreateView(Box::new(CreateViewStatement {
            or_replace,
            algorithm: head.algorithm,
            definer: head.definer,
            security: head.security,
            name: body.name,
            columns: body.columns,
            query: body.query,
            check_option: body.check_option,
        })))
    }

    /// Parses the rest of `ALTER ... VIEW`.
    fn parse_alter_view(&mut self) -> Result<Statement, ParseError> {
        let head = self.parse_view_head()?;
        let body = self.parse_view_body()?;
        Ok(Statement::AlterView(Box::new(AlterViewStatement {
            algorithm: head.algorithm,
            definer: head.definer,
            security: head.security,
            name: body.name,
            columns: body.columns,
            query: body.query,
            check_option: body.check_option,
        })))
    }

    /// Parses the rest of `ALTER {DATABASE | SCHEMA} [name] options`.
    fn parse_alter_database(&mut self) -> Result<Statement, ParseError> {
        let named = matches!(
            self.current.kind,
            TokenKind::Identifier(_) | TokenKind::QuotedIdentifier(_)
        );
        let name = if named && !matches!(self.peek(), TokenKind::Eq) {
            Some(self.expect_identifier()?)
        } else {
            None
        };
        let options = self.parse_table_options()?;
        if options.is_empty() {
            return Err(self.error_expected("database option"));
        }
        Ok(Statement::AlterDatabase(AlterDatabaseStatement { name, options }))
    }

    /// Parses an ALTER TABLE, VIEW, DATABASE or USER statement.
    pub(super) fn parse_alter(&mut self) -> Result<Statement, ParseError> {
        self.expect_keyword(Keyword::Alter)?;
        if self.is_view_head_start() {
            return self.parse_alter_view();
        }
        match self.current.as_keyword() {
            Some(Keyword::Table) => self.advance(),
            Some(Keyword::Database | Keyword::Schema) => {
                self.advance();
                return self.parse_alter_database();
            }
            Some(Keyword::User) => {
                self.advance();
                return self.parse_alter_user();
            }
            _ => return Err(self.error_expected("TABLE, VIEW, DATABASE or USER")),
        }
        let name = self.parse_object_name()?;
        let mut operations = vec![self.parse_alter_operation()?];
        while self.consume(&TokenKind::Comma) {
            operations.push(self.parse_alter_operation()?);
        }
        Ok(Statement::AlterTable(AlterTableStatement { name, operations }))
    }

    fn parse_alter_operation(&mut self) -> Result<AlterTableOperation, ParseError> {
        match self.current.as_keyword() {
            Some(Keyword::Add) => {
                self.advance();
                if self.consume_keyword(Keyword::Column) || !self.is_table_constraint_start() {
                    let column = self.parse_column_def()?;
                    let position = self.parse_column_position()?;
                    Ok(AlterTableOperation::AddColumn { column, position })
                } else {
                    Ok(AlterTableOperation::AddConstraint(
                        self.parse_table_constraint()?,
                    ))
                }
            }
            Some(Keyword::Drop) => {
                self.advance();
                self.parse_alter_drop()
            }
            Some(Keyword::Modify) => {
                self.advance();
                self.consume_keyword(Keyword::Column);
                let column = self.parse_column_def()?;
                let position = self.parse_column_position()?;
                Ok(AlterTableOperation::ModifyColumn { column, position })
            }
            Some(Keyword::Change) => {
                self.advance();
                self.consume_keyword(Keyword::Column);
                let old_name = self.expect_identifier()?;
                let column = self.parse_column_def()?;
                let position = self.parse_column_position()?;
                Ok(AlterTableOperation::ChangeColumn {
                    old_name,
                    column,
                    position,
                })
            }
            Some(Keyword::Rename) => {
                self.advance();
                self.parse_alter_rename()
            }
            Some(Keyword::Alter) => {
                self.advance();
                self.consume_keyword(Keyword::Column);
                let column = self.expect_identifier()?;
                if self.consume_keyword(Keyword::Set) {
                    self.expect_keyword(Keyword::Default)?;
                    let value = self.parse_expression(COLUMN_VALUE_BP)?;
                    Ok(AlterTableOperation::SetDefault { column, value })
                } else {
                    self.expect_keyword(Keyword::Drop)?;
                    self.expect_keyword(Keyword::Default)?;
                    Ok(AlterTableOperation::DropDefault(column))
                }
            }
            Some(Keyword::Convert) => {
                self.advance();
                self.expect_keyword(Keyword::To)?;
                if !self.consume_keyword(Keyword::Charset) {
                    self.expect_keyword(Keyword::Character)?;
                    self.expect_keyword(Keyword::Set)?;
                }
                let charset = self.expect_name_or_string()?;
                let collate = if self.consume_keyword(Keyword::Collate) {
                    Some(self.expect_name_or_string()?)
                } else {
                    None
                };
                Ok(AlterTableOperation::ConvertToCharset { charset, collate })
            }
            Some(Keyword::Algorithm) => {
                self.advance();
                Ok(AlterTableOperation::Algorithm(self.parse_online_ddl_value()?))
            }
            Some(Keyword::Lock) => {
                self.advance();
                Ok(AlterTableOperation::Lock(self.parse_online_ddl_value()?))
            }
            _ => match self.parse_table_option()? {
                Some(option) => Ok(AlterTableOperation::Option(option)),
                None => Err(self.error_expected("ALTER TABLE operation")),
            },
        }
    }

    fn parse_alter_drop(&mut self) -> Result<AlterTableOperation, ParseError> {
        match self.current.as_keyword() {
            Some(Keyword::Column) => {
                self.advance();
                Ok(AlterTableOperation::DropColumn(self.expect_identifier()?))
            }
            Some(Keyword::Index | Keyword::Key) => {
                self.advance();
                Ok(AlterTableOperation::DropIndex(self.expect_identifier()?))
            }
            Some(Keyword::Primary) => {
                self.advance();
                self.expect_keyword(Keyword::Key)?;
                Ok(AlterTableOperation::DropPrimaryKey)
            }
            Some(Keyword::Foreign) => {
                self.advance();
                self.expect_keyword(Keyword::Key)?;
                Ok(AlterTableOperation::DropForeignKey(self.expect_identifier()?))
            }
            Some(Keyword::Constraint | Keyword::Check) => {
                self.advance();
                Ok(AlterTableOperation::DropConstraint(self.expect_identifier()?))
            }
            _ => Ok(AlterTableOperation::DropColumn(self.expect_identifier()?)),
        }
    }

    fn parse_alter_rename(&mut self) -> Result<AlterTableOperation, ParseError> {
        match self.current.as_keyword() {
            Some(Keyword::Column) => {
                self.advance();
                let old_name = self.expect_identifier()?;
                self.expect_keyword(Keyword::To)?;
                let new_name = self.expect_identifier()?;
                Ok(AlterTableOperation::RenameColumn { old_name, new_name })
            }
            Some(Keyword::Index | Keyword::Key) => {
                self.advance();
                let old_name = self.expect_identifier()?;
                self.expect_keyword(Keyword::To)?;
                let new_name = self.expect_identifier()?;
                Ok(AlterTableOperation::RenameIndex { old_name, new_name })
            }
            _ => {
                if !self.consume_keyword(Keyword::To) {
                    self.consume_keyword(Keyword::As);
                }
                Ok(AlterTableOperation::RenameTable(self.parse_object_name()?))
            }
        }
    }

    /// Parses `[FIRST | AFTER col]`.
    fn parse_column_position(&mut self) -> Result<Option<ColumnPosition>, ParseError> {
        if self.consume_keyword(Keyword::First) {
            Ok(Some(ColumnPosition::First))
        } else if self.consume_keyword(Keyword::After) {
            Ok(Some(ColumnPosition::After(self.expect_identifier()?)))
        } else {
            Ok(None)
        }
    }

    /// Parses a DROP statement.
    pub(super) fn parse_drop(&mut self) -> Result<Statement, ParseError> {
        self.expect_keyword(Keyword::Drop)?;
        match self.current.as_keyword() {
            Some(Keyword::Temporary) => {
                self.advance();
                self.expect_keyword(Keyword::Table)?;
                self.parse_drop_table(true)
            }
            Some(Keyword::Table) => {
                self.advance();
                self.parse_drop_table(false)
            }
            Some(Keyword::Database | Keyword::Schema) => {
                self.advance();
                let if_exists = self.parse_if_exists()?;
                let name = self.expect_identifier()?;
                Ok(Statement::DropDatabase(DropDatabaseStatement { if_exists, name }))
            }
            Some(Keyword::Index) => {
                self.advance();
                let name = self.expect_identifier()?;
                self.expect_keyword(Keyword::On)?;
                let table = self.parse_object_name()?;
                self.parse_online_ddl_clauses()?;
                Ok(Statement::DropIndex(DropIndexStatement { name, table }))
            }
            Some(Keyword::View) => {
                self.advance();
                let if_exists = self.parse_if_exists()?;
                let names = self.parse_object_name_list()?;
                let behavior = self.parse_drop_behavior();
                Ok(Statement::DropView(DropViewStatement {
                    if_exists,
                    names,
                    behavior,
                }))
            }
            Some(Keyword::User) => {
                self.advance();
                self.parse_drop_user()
            }
            Some(Keyword::Prepare) => {
                self.advance();
                Ok(Statement::Deallocate(self.expect_identifier()?))
            }
            Some(kw @ (Keyword::Procedure | Keyword::Function)) => {
                self.advance();
                let kind = if kw == Keyword::Procedure {
                    RoutineKind::Procedure
                } else {
                    RoutineKind::Function
                };
                let if_exists = self.parse_if_exists()?;
                let name = self.parse_object_name()?;
                Ok(Statement::DropRoutine(DropRoutineStatement {
                    kind,
                    if_exists,
                    name,
                }))
            }
            _ => Err(self.error_expected("TABLE, DATABASE, INDEX, VIEW, USER, PROCEDURE or FUNCTION")),
        }
    }

    fn parse_drop_table(&mut self, temporary: bool) -> Result<Statement, ParseError> {
        let if_exists = self.parse_if_exists()?;
        let names = self.parse_object_name_list()?;
        let behavior = self.parse_drop_behavior();
        Ok(Statement::DropTable(DropTableStatement {
            temporary,
            if_exists,
            names,
            behavior,
        }))
    }

    fn parse_drop_behavior(&mut self) -> Option<DropBehavior> {
        if self.consume_keyword(Keyword::Restrict) {
            Some(DropBehavior::Restrict)
        } else if self.consume_keyword(Keyword::Cascade) {
            Some(DropBehavior::Cascade)
        } else {
            None
        }
    }

    /// Parses `TRUNCATE [TABLE] tbl`.
    pub(super) fn parse_truncate(&mut self) -> Result<Statement, ParseError> {
        self.expect_keyword(Keyword::Truncate)?;
        self.consume_keyword(Keyword::Table);
        let table = self.parse_object_name()?;
        Ok(Statement::Truncate(TruncateStatement { table }))
    }

    /// Parses `RENAME {TABLE | TABLES} a TO b [, c TO d] ...`.
    pub(super) fn parse_rename(&mut self) -> Result<Statement, ParseError> {
        self.expect_keyword(Keyword::Rename)?;
        if !self.consume_keyword(Keyword::Table) {
            self.expect_keyword(Keyword::Tables)?;
        }
        let mut renames = vec![];
        loop {
            let from = self.parse_object_name()?;
            self.expect_keyword(Keyword::To)?;
            let to = self.parse_object_name()?;
            renames.push((from, to));
            if !self.consume(&TokenKind::Comma) {
                break;
            }
        }
        Ok(Statement::RenameTable(RenameTableStatement { renames }))
    }
}
