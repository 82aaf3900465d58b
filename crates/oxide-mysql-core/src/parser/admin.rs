//! Account management, transaction control and session utility statements.

use super::error::ParseError;
use super::expr::split_system_variable;
use super::parser::Parser;
use crate::ast::{
    AlterUserStatement, CallStatement, CreateUserStatement, DescribeStatement, DropUserStatement,
    ExplainFormat, GrantObjectType, GrantStatement, GrantTarget, IsolationLevel,
    LockTablesStatement, ObjectName, PrepareSource, Privilege, PrivilegeLevel, RevokeStatement,
    SetAssignment, SetNamesStatement, SetPasswordStatement, SetTarget, SetTransactionStatement,
    SetValue, ShowFilter, ShowStatement, Statement, TableLock, TableLockType, TransactionMode,
    UserName, UserSpec, VariableScope,
};
use crate::lexer::{Keyword, TokenKind};

impl Parser<'_> {
    // --- Accounts ---

    /// Parses the rest of `CREATE USER`.
    pub(super) fn parse_create_user(&mut self) -> Result<Statement, ParseError> {
        let if_not_exists = if self.consume_keyword(Keyword::If) {
            self.expect_keyword(Keyword::Not)?;
            self.expect_keyword(Keyword::Exists)?;
            true
        } else {
            false
        };
        let users = self.parse_user_specs()?;
        Ok(Statement::CreateUser(CreateUserStatement {
            if_not_exists,
            users,
        }))
    }

    /// Parses the rest of `ALTER USER`.
    pub(super) fn parse_alter_user(&mut self) -> Result<Statement, ParseError> {
        let if_exists = self.parse_if_exists()?;
        let users = self.parse_user_specs()?;
        Ok(Statement::AlterUser(AlterUserStatement { if_exists, users }))
    }

    /// Parses `user [IDENTIFIED [WITH plugin] [BY 'password']], ...`.
    fn parse_user_specs(&mut self) -> Result<Vec<UserSpec>, ParseError> {
        let mut users = vec![];
        loop {
            let user = self.parse_user_name()?;
            let mut spec = UserSpec {
                user,
                plugin: None,
                password: None,
            };
            if self.consume_keyword(Keyword::Identified) {
                if self.consume_keyword(Keyword::With) {
                    spec.plugin = Some(self.expect_name_or_string()?);
                }
                if self.consume_keyword(Keyword::By) {
                    spec.password = Some(self.expect_string()?);
                } else if spec.plugin.is_none() {
                    return Err(self.error_expected("BY or WITH"));
                }
            }
            users.push(spec);
            if !self.consume(&TokenKind::Comma) {
                break;
            }
        }
        Ok(users)
    }

    /// Parses the rest of `DROP USER`.
    pub(super) fn parse_drop_user(&mut self) -> Result<Statement, ParseError> {
        let if_exists = self.parse_if_exists()?;
        let users = self.parse_user_list()?;
        Ok(Statement::DropUser(DropUserStatement { if_exists, users }))
    }

    /// Parses an account name: `'name'[@'host']`.
    ///
    /// The host part arrives from the lexer as a user variable token.
    pub(super) fn parse_user_name(&mut self) -> Result<UserName, ParseError> {
        let name = self.expect_name_or_string()?;
        let host = match &self.current.kind {
            TokenKind::UserVariable(host) => {
                let host = host.clone();
                self.advance();
                Some(host)
            }
            _ => None,
        };
        Ok(UserName { name, host })
    }

    fn parse_user_list(&mut self) -> Result<Vec<UserName>, ParseError> {
        let mut users = vec![self.parse_user_name()?];
        while self.consume(&TokenKind::Comma) {
            users.push(self.parse_user_name()?);
        }
        Ok(users)
    }

    /// Parses `GRANT privileges ON target TO users [WITH GRANT OPTION]`.
    pub(super) fn parse_grant(&mut self) -> Result<Statement, ParseError> {
        self.expect_keyword(Keyword::Grant)?;
        let privileges = self.parse_privileges()?;
        self.expect_keyword(Keyword::On)?;
        let target = self.parse_grant_target()?;
        self.expect_keyword(Keyword::To)?;
        let users = self.parse_user_list()?;
        let with_grant_option = if self.consume_keyword(Keyword::With) {
            self.expect_keyword(Keyword::Grant)?;
            self.expect_keyword(Keyword::Option)?;
            true
        } else {
            false
        };
        Ok(Statement::Grant(GrantStatement {
            privileges,
            target,
            users,
            with_grant_option,
        }))
    }

    /// Parses `REVOKE privileges ON target FROM users`.
    pub(super) fn parse_revoke(&mut self) -> Result<Statement, ParseError> {
        self.expect_keyword(Keyword::Revoke)?;
        let privileges = self.parse_privileges()?;
        self.expect_keyword(Keyword::On)?;
        let target = self.parse_grant_target()?;
        self.expect_keyword(Keyword::From)?;
        let users = self.parse_user_list()?;
        Ok(Statement::Revoke(RevokeStatement {
            privileges,
            target,
            users,
        }))
    }

    /// Parses the privilege list of GRANT and REVOKE.
    ///
    /// Privilege names may span several words (`CREATE TEMPORARY TABLES`,
    /// `REPLICATION SLAVE`); they are stored upper case, joined by spaces.
    /// `ALL` is stored as `ALL PRIVILEGES`.
    fn parse_privileges(&mut self) -> Result<Vec<Privilege>, ParseError> {
        if self.consume_keyword(Keyword::All) {
            self.consume_keyword(Keyword::Privileges);
            return Ok(vec![Privilege {
                name: String::from("ALL PRIVILEGES"),
                columns: vec![],
            }]);
        }

        let mut privileges = vec![];
        loop {
            let mut words = vec![];
            while !self.check_keyword(Keyword::On)
                && matches!(
                    self.current.kind,
                    TokenKind::Keyword(_) | TokenKind::Identifier(_)
                )
            {
                words.push(self.current_text().to_ascii_uppercase());
                self.advance();
            }
            if words.is_empty() {
                return Err(self.error_expected("privilege"));
            }
            let columns = if self.check(&TokenKind::LeftParen) {
                self.parse_parenthesized_identifiers()?
            } else {
                vec![]
            };
            privileges.push(Privilege {
                name: words.join(" "),
                columns,
            });
            if !self.consume(&TokenKind::Comma) {
                break;
            }
        }
        Ok(privileges)
    }

    /// Parses `[TABLE | FUNCTION | PROCEDURE] {* | *.* | db.* | db.tbl | tbl}`.
    fn parse_grant_target(&mut self) -> Result<GrantTarget, ParseError> {
        let object_type = match self.current.as_keyword() {
            Some(Keyword::Table) => Some(GrantObjectType::Table),
            Some(Keyword::Function) => Some(GrantObjectType::Function),
            Some(Keyword::Procedure) => Some(GrantObjectType::Procedure),
            _ => None,
        };
        if object_type.is_some() {
            self.advance();
        }

        let level = if self.consume(&TokenKind::Star) {
            if self.consume(&TokenKind::Dot) {
                self.expect(&TokenKind::Star)?;
                PrivilegeLevel::Global
            } else {
                PrivilegeLevel::CurrentDatabase
            }
        } else {
            let first = self.expect_identifier()?;
            if self.consume(&TokenKind::Dot) {
                if self.consume(&TokenKind::Star) {
                    PrivilegeLevel::Database(first)
                } else {
                    let name = self.expect_qualified_part()?;
                    PrivilegeLevel::Object(ObjectName::qualified(first, name))
                }
            } else {
                PrivilegeLevel::Object(ObjectName::new(first))
            }
        };
        Ok(GrantTarget { object_type, level })
    }

    // --- Transactions ---

    /// Parses `START TRANSACTION [modes]` or `BEGIN [WORK]`.
    pub(super) fn parse_start_transaction(&mut self) -> Result<Statement, ParseError> {
        if self.consume_keyword(Keyword::Begin) {
            self.consume_keyword(Keyword::Work);
            return Ok(Statement::StartTransaction { modes: vec![] });
        }
        self.expect_keyword(Keyword::Start)?;
        self.expect_keyword(Keyword::Transaction)?;

        let mut modes = vec![];
        if self.check_keyword(Keyword::With) || self.check_keyword(Keyword::Read) {
            loop {
                let mode = if self.consume_keyword(Keyword::With) {
                    self.expect_keyword(Keyword::Consistent)?;
                    self.expect_keyword(Keyword::Snapshot)?;
                    TransactionMode::WithConsistentSnapshot
                } else {
                    self.parse_access_mode()?
                };
                modes.push(mode);
                if !self.consume(&TokenKind::Comma) {
                    break;
                }
            }
        }
        if modes.contains(&TransactionMode::ReadOnly) && modes.contains(&TransactionMode::ReadWrite)
        {
            return Err(ParseError::new(
                "READ ONLY and READ WRITE are mutually exclusive",
                self.previous.span,
            ));
        }
        Ok(Statement::StartTransaction { modes })
    }

    /// Parses `READ {ONLY | WRITE}`.
    fn parse_access_mode(&mut self) -> Result<TransactionMode, ParseError> {
        self.expect_keyword(Keyword::Read)?;
        if self.consume_keyword(Keyword::Only) {
            Ok(TransactionMode::ReadOnly)
        } else {
            self.expect_keyword(Keyword::Write)?;
            Ok(TransactionMode::ReadWrite)
        }
    }

    /// Parses `COMMIT [WORK] [AND [NO] CHAIN] [[NO] RELEASE]`.
    pub(super) fn parse_commit(&mut self) -> Result<Statement, ParseError> {
        self.expect_keyword(Keyword::Commit)?;
        self.consume_keyword(Keyword::Work);
        self.parse_completion_options()?;
        Ok(Statement::Commit)
    }

    /// Parses `ROLLBACK [WORK] [TO [SAVEPOINT] name]`.
    pub(super) fn parse_rollback(&mut self) -> Result<Statement, ParseError> {
        self.expect_keyword(Keyword::Rollback)?;
        self.consume_keyword(Keyword::Work);
        if self.consume_keyword(Keyword::To) {
            self.consume_keyword(Keyword::Savepoint);
            let savepoint = self.expect_identifier()?;
            return Ok(Statement::Rollback {
                savepoint: Some(savepoint),
            });
        }
        self.parse_completion_options()?;
        Ok(Statement::Rollback { savepoint: None })
    }

    /// Skips `[AND [NO] CHAIN] [[NO] RELEASE]`.
    fn parse_completion_options(&mut self) -> Result<(), ParseError> {
        if self.consume_keyword(Keyword::And) {
            self.consume_keyword(Keyword::No);
            self.expect_word("CHAIN")?;
        }
        if self.consume_keyword(Keyword::No) {
            self.expect_keyword(Keyword::Release)?;
        } else {
            self.consume_keyword(Keyword::Release);
        }
        Ok(())
    }

    /// Parses `SAVEPOINT name`.
    pub(super) fn parse_savepoint(&mut self) -> Result<Statement, ParseError> {
        self.expect_keyword(Keyword::Savepoint)?;
        Ok(Statement::Savepoint(self.expect_identifier()?))
    }

    /// Parses `RELEASE SAVEPOINT name`.
    pub(super) fn parse_release_savepoint(&mut self) -> Result<Statement, ParseError> {
        self.expect_keyword(Keyword::Release)?;
        self.expect_keyword(Keyword::Savepoint)?;
        Ok(Statement::ReleaseSavepoint(self.expect_identifier()?))
    }

    /// Parses `[GLOBAL | SESSION] TRANSACTION characteristic [, ...]`.
    fn parse_set_transaction(
        &mut self,
        scope: Option<VariableScope>,
    ) -> Result<Statement, ParseError> {
        self.expect_keyword(Keyword::Transaction)?;
        let mut statement = SetTransactionStatement {
            scope,
            isolation_level: None,
            access_mode: None,
        };
        loop {
            if self.consume_keyword(Keyword::Isolation) {
                self.expect_keyword(Keyword::Level)?;
                let level = self.parse_isolation_level()?;
                if statement.isolation_level.replace(level).is_some() {
                    return Err(ParseError::new(
                        "ISOLATION LEVEL specified more than once",
                        self.previous.span,
                    ));
                }
            } else {
                let mode = self.parse_access_mode()?;
                if statement.access_mode.replace(mode).is_some() {
                    return Err(ParseError::new(
                        "Access mode specified more than once",
                        self.previous.span,
                    ));
                }
            }
            if !self.consume(&TokenKind::Comma) {
                break;
            }
        }
        Ok(Statement::SetTransaction(statement))
    }

    fn parse_isolation_level(&mut self) -> Result<IsolationLevel, ParseError> {
        if self.consume_keyword(Keyword::Serializable) {
            return Ok(IsolationLevel::Serializable);
        }
        if self.consume_keyword(Keyword::Repeatable) {
            self.expect_keyword(Keyword::Read)?;
            return Ok(IsolationLevel::RepeatableRead);
        }
        self.expect_keyword(Keyword::Read)?;
        if self.consume_keyword(Keyword::Committed) {
            Ok(IsolationLevel::ReadCommitted)
        } else if self.consume_keyword(Keyword::Uncommitted) {
            Ok(IsolationLevel::ReadUncommitted)
        } else {
            Err(self.error_expected("COMMITTED or UNCOMMITTED"))
        }
    }

    // --- Session utilities ---

    /// Parses `USE db`.
    pub(super) fn parse_use(&mut self) -> Result<Statement, ParseError> {
        self.expect_keyword(Keyword::Use)?;
        Ok(Statement::Use(self.expect_identifier()?))
    }

    /// Parses a SHOW statement.
    pub(super) fn parse_show(&mut self) -> Result<Statement, ParseError> {
        self.expect_keyword(Keyword::Show)?;
        let full = self.consume_keyword(Keyword::Full);
        let kw = self.current.as_keyword();

        if full
            && !matches!(
                kw,
                Some(Keyword::Tables | Keyword::Columns | Keyword::Fields | Keyword::Processlist)
            )
        {
            return Err(self.error_expected("TABLES, COLUMNS or PROCESSLIST"));
        }

        let show = match kw {
            Some(Keyword::Databases | Keyword::Schemas) => {
                self.advance();
                ShowStatement::Databases {
                    filter: self.parse_show_filter()?,
                }
            }
            Some(Keyword::Tables) => {
                self.advance();
                let database = if self.consume_keyword(Keyword::From)
                    || self.consume_keyword(Keyword::In)
                {
                    Some(self.expect_identifier()?)
                } else {
                    None
                };
                ShowStatement::Tables {
                    full,
                    database,
                    filter: self.parse_show_filter()?,
                }
            }
            Some(Keyword::Columns | Keyword::Fields) => {
                self.advance();
                let table = self.parse_show_table()?;
                ShowStatement::Columns {
                    full,
                    table,
                    filter: self.parse_show_filter()?,
                }
            }
            Some(Keyword::Index | Keyword::Indexes | Keyword::Keys) => {
                self.advance();
                ShowStatement::Index {
                    table: self.parse_show_table()?,
                }
            }
            Some(Keyword::Create) => {
                self.advance();
                match self.current.as_keyword() {
                    Some(Keyword::Table) => {
                        self.advance();
                        ShowStatement::CreateTable(self.parse_object_name()?)
                    }
                    Some(Keyword::View) => {
                        self.advance();
                        ShowStatement::CreateView(self.parse_object_name()?)
                    }
                    Some(Keyword::Database | Keyword::Schema) => {
                        self.advance();
                        ShowStatement::CreateDatabase(self.expect_identifier()?)
                    }
                    _ => return Err(self.error_expected("TABLE, VIEW or DATABASE")),
                }
            }
            Some(Keyword::Global | Keyword::Session | Keyword::Local) => {
                let scope = match kw {
                    Some(Keyword::Global) => VariableScope::Global,
                    Some(Keyword::Local) => VariableScope::Local,
                    _ => VariableScope::Session,
                };
                self.advance();
                self.parse_show_variables(Some(scope))?
            }
            Some(Keyword::Variables | Keyword::Status) => self.parse_show_variables(None)?,
            Some(Keyword::Processlist) => {
                self.advance();
                ShowStatement::Processlist { full }
            }
            Some(Keyword::Warnings) => {
                self.advance();
                ShowStatement::Warnings
            }
            Some(Keyword::Errors) => {
                self.advance();
                ShowStatement::Errors
            }
            Some(Keyword::Grants) => {
                self.advance();
                let user = if self.consume_keyword(Keyword::For) {
                    Some(self.parse_user_name()?)
                } else {
                    None
                };
                ShowStatement::Grants { user }
            }
            Some(Keyword::Collation) => {
                self.advance();
                ShowStatement::Collation {
                    filter: self.parse_show_filter()?,
                }
            }
            Some(Keyword::Character) => {
                self.advance();
                self.expect_keyword(Keyword::Set)?;
                ShowStatement::CharacterSet {
                    filter: self.parse_show_filter()?,
                }
            }
            Some(Keyword::Charset) => {
                self.advance();
                ShowStatement::CharacterSet {
                    filter: self.parse_show_filter()?,
                }
            }
            _ => return Err(self.error_expected("SHOW target")),
        };
        Ok(Statement::Show(show))
    }

    /// Parses `{VARIABLES | STATUS} [filter]` after an optional scope.
    fn parse_show_variables(
        &mut self,
        scope: Option<VariableScope>,
    ) -> Result<ShowStatement, ParseError> {
        if self.consume_keyword(Keyword::Variables) {
            Ok(ShowStatement::Variables {
                scope,
                filter: self.parse_show_filter()?,
            })
        } else {
            self.expect_keyword(Keyword::Status)?;
            Ok(ShowStatement::Status {
                scope,
                filter: self.parse_show_filter()?,
            })
        }
    }

    /// Parses `{FROM | IN} tbl [{FROM | IN} db]`.
    fn parse_show_table(&mut self) -> Result<ObjectName, ParseError> {
        if !self.consume_keyword(Keyword::From) {
            self.expect_keyword(Keyword::In)?;
        }
        let table = self.parse_object_name()?;
        if self.consume_keyword(Keyword::From) || self.consume_keyword(Keyword::In) {
            let database = self.expect_identifier()?;
            return Ok(ObjectName::qualified(database, table.name));
        }
        Ok(table)
    }

    /// Parses `[LIKE 'pattern' | WHERE expr]`.
    fn parse_show_filter(&mut self) -> Result<Option<ShowFilter>, ParseError> {
        if self.consume_keyword(Keyword::Like) {
            Ok(Some(ShowFilter::Like(self.expect_string()?)))
        } else if self.consume_keyword(Keyword::Where) {
            Ok(Some(ShowFilter::Where(self.parse_expr()?)))
        } else {
            Ok(None)
        }
    }

    /// Parses `{EXPLAIN | DESCRIBE | DESC}` followed by either a statement
    /// or a table name.
    pub(super) fn parse_explain(&mut self) -> Result<Statement, ParseError> {
        self.advance();

        let format = if self.check_keyword(Keyword::Format) && matches!(self.peek(), TokenKind::Eq)
        {
            self.advance();
            self.advance();
            let format = if self.consume_keyword(Keyword::Json) {
                ExplainFormat::Json
            } else if self.consume_word("TREE") {
                ExplainFormat::Tree
            } else if self.consume_word("TRADITIONAL") {
                ExplainFormat::Traditional
            } else {
                return Err(self.error_expected("TRADITIONAL, JSON or TREE"));
            };
            Some(format)
        } else {
            None
        };

        let statement = match &self.current.kind {
            TokenKind::Keyword(Keyword::Select | Keyword::With) | TokenKind::LeftParen => {
                Statement::Query(Box::new(self.parse_query()?))
            }
            TokenKind::Keyword(Keyword::Insert | Keyword::Replace) => {
                Statement::Insert(Box::new(self.parse_insert()?))
            }
            TokenKind::Keyword(Keyword::Update) => Statement::Update(Box::new(self.parse_update()?)),
            TokenKind::Keyword(Keyword::Delete) => Statement::Delete(Box::new(self.parse_delete()?)),
            _ if format.is_some() => {
                return Err(self.error_expected("SELECT, INSERT, REPLACE, UPDATE or DELETE"));
            }
            _ => {
                let table = self.parse_object_name()?;
                let column = match &self.current.kind {
                    TokenKind::String(pattern) => {
                        let pattern = pattern.clone();
                        self.advance();
                        Some(pattern)
                    }
                    _ => {
                        let column = self.current_identifier();
                        if column.is_some() {
                            self.advance();
                        }
                        column
                    }
                };
                return Ok(Statement::Describe(DescribeStatement { table, column }));
            }
        };
        Ok(Statement::Explain {
            format,
            statement: Box::new(statement),
        })
    }

    /// Parses a SET statement: variable assignments, `SET NAMES`,
    /// `SET CHARACTER SET` or `SET TRANSACTION`.
    pub(super) fn parse_set(&mut self) -> Result<Statement, ParseError> {
        self.expect_keyword(Keyword::Set)?;

        match self.current.as_keyword() {
            Some(Keyword::Names) => {
                self.advance();
                return self.parse_set_names(false);
            }
            Some(Keyword::Character) if self.peek_keyword(Keyword::Set) => {
                self.advance();
                self.advance();
                return self.parse_set_names(true);
            }
            Some(Keyword::Charset) => {
                self.advance();
                return self.parse_set_names(true);
            }
            Some(Keyword::Password)
                if matches!(self.peek(), TokenKind::Eq | TokenKind::Keyword(Keyword::For)) =>
            {
                self.advance();
                return self.parse_set_password();
            }
            Some(Keyword::Transaction) => return self.parse_set_transaction(None),
            Some(kw @ (Keyword::Global | Keyword::Session))
                if self.peek_keyword(Keyword::Transaction) =>
            {
                self.advance();
                let scope = if kw == Keyword::Global {
                    VariableScope::Global
                } else {
                    VariableScope::Session
                };
                return self.parse_set_transaction(Some(scope));
            }
            _ => {}
        }

        let mut assignments = vec![self.parse_set_assignment()?];
        while self.consume(&TokenKind::Comma) {
            assignments.push(self.parse_set_assignment()?);
        }
        Ok(Statement::Set(assignments))
    }

    /// Parses `{charset | DEFAULT} [COLLATE collation]`.
    fn parse_set_names(&mut self, character_set_form: bool) -> Result<Statement, ParseError> {
        let charset = if self.consume_keyword(Keyword::Default) {
            None
        } else {
            Some(self.expect_name_or_string()?)
        };
        let collate = if !character_set_form && self.consume_keyword(Keyword::Collate) {
            Some(self.expect_name_or_string()?)
        } else {
            None
        };
        Ok(Statement::SetNames(SetNamesStatement {
            character_set_form,
            charset,
            collate,
        }))
    }

    /// Parses one `target {= | :=} expr` assignment.
    fn parse_set_assignment(&mut self) -> Result<SetAssignment, ParseError> {
        let scope = self.current.as_keyword().and_then(scope_keyword);
        let scoped = scope.is_some() && !self.peek_is_assignment();
        let target = match &self.current.kind {
            TokenKind::Keyword(_) if scoped => {
                self.advance();
                let name = self.parse_variable_name()?;
                SetTarget::SystemVariable { scope, name }
            }
            TokenKind::UserVariable(name) => {
                let target = SetTarget::UserVariable(name.clone());
                self.advance();
                target
            }
            TokenKind::SystemVariable(raw) => {
                let (scope, name) = split_system_variable(raw);
                self.advance();
                SetTarget::SystemVariable { scope, name }
            }
            _ => SetTarget::SystemVariable {
                scope: None,
                name: self.parse_variable_name()?,
            },
        };

        if !self.consume(&TokenKind::Eq) && !self.consume(&TokenKind::Assign) {
            return Err(self.error_expected("'=' or ':='"));
        }
        let value = match self.current.as_keyword() {
            Some(kw @ (Keyword::On | Keyword::All | Keyword::Binary))
                if matches!(
                    self.peek(),
                    TokenKind::Comma | TokenKind::Semicolon | TokenKind::Eof
                ) =>
            {
                self.advance();
                SetValue::Keyword(String::from(kw.as_str()))
            }
            _ => SetValue::Expr(self.parse_expr()?),
        };
        Ok(SetAssignment { target, value })
    }

    /// Parses the rest of `SET PASSWORD [FOR user] = 'auth'`.
    fn parse_set_password(&mut self) -> Result<Statement, ParseError> {
        let user = if self.consume_keyword(Keyword::For) {
            Some(self.parse_user_name()?)
        } else {
            None
        };
        self.expect(&TokenKind::Eq)?;
        let password = self.parse_expr()?;
        let replace = if self.consume_keyword(Keyword::Replace) {
            Some(self.expect_string()?)
        } else {
            None
        };
        let retain_current = self.consume_word("RETAIN");
        if retain_current {
            self.expect_keyword(Keyword::Current)?;
            self.expect_keyword(Keyword::Password)?;
        }
        Ok(Statement::SetPassword(SetPasswordStatement {
            user,
            password,
            replace,
            retain_current,
        }))
    }

    /// Parses a system variable name, which may be dotted
    /// (`keycache.key_buffer_size`).
    fn parse_variable_name(&mut self) -> Result<String, ParseError> {
        let mut name = self.expect_identifier()?;
        while self.consume(&TokenKind::Dot) {
            name.push('.');
            name.push_str(&self.expect_qualified_part()?);
        }
        Ok(name)
    }

    fn peek_is_assignment(&mut self) -> bool {
        matches!(self.peek(), TokenKind::Eq | TokenKind::Assign)
    }

    /// Parses `LOCK {TABLES | TABLE} tbl [[AS] alias] lock_type [, ...]`.
    pub(super) fn parse_lock_tables(&mut self) -> Result<Statement, ParseError> {
        self.expect_keyword(Keyword::Lock)?;
        if !self.consume_keyword(Keyword::Tables) {
            self.expect_keyword(Keyword::Table)?;
        }
        let mut locks = vec![];
        loop {
            let table = self.parse_object_name()?;
            let alias = self.parse_optional_alias()?;
            let lock_type = if self.consume_keyword(Keyword::Read) {
                if self.consume_keyword(Keyword::Local) {
                    TableLockType::ReadLocal
                } else {
                    TableLockType::Read
                }
            } else if self.consume_keyword(Keyword::LowPriority) {
                self.expect_keyword(Keyword::Write)?;
                TableLockType::LowPriorityWrite
            } else if self.consume_keyword(Keyword::Write) {
                TableLockType::Write
            } else {
                return Err(self.error_expected("READ or WRITE"));
            };
            locks.push(TableLock {
                table,
                alias,
                lock_type,
            });
            if !self.consume(&TokenKind::Comma) {
                break;
            }
        }
        Ok(Statement::LockTables(LockTablesStatement { locks }))
    }

    /// Parses `UNLOCK {TABLES | TABLE}`.
    pub(super) fn parse_unlock_tables(&mut self) -> Result<Statement, ParseError> {
        self.expect_keyword(Keyword::Unlock)?;
        if !self.consume_keyword(Keyword::Tables) {
            self.expect_keyword(Keyword::Table)?;
        }
        Ok(Statement::UnlockTables)
    }

    /// Parses `CALL proc[(args)]`.
    pub(super) fn parse_call(&mut self) -> Result<Statement, ParseError> {
        self.expect_keyword(Keyword::Call)?;
        let name = self.parse_object_name()?;
        let mut args = vec![];
        if self.consume(&TokenKind::LeftParen) {
            if !self.check(&TokenKind::RightParen) {
                args = self.parse_expression_list()?;
            }
            self.expect(&TokenKind::RightParen)?;
        }
        Ok(Statement::Call(CallStatement { name, args }))
    }

    /// Parses `PREPARE name FROM {'text' | @var}`.
    pub(super) fn parse_prepare(&mut self) -> Result<Statement, ParseError> {
        self.expect_keyword(Keyword::Prepare)?;
        let name = self.expect_identifier()?;
        self.expect_keyword(Keyword::From)?;
        let source = match &self.current.kind {
            TokenKind::String(text) => PrepareSource::String(text.clone()),
            TokenKind::UserVariable(var) => PrepareSource::Variable(var.clone()),
            _ => return Err(self.error_expected("string literal or user variable")),
        };
        self.advance();
        Ok(Statement::Prepare { name, source })
    }

    /// Parses `EXECUTE name [USING @a, ...]`.
    pub(super) fn parse_execute(&mut self) -> Result<Statement, ParseError> {
        self.expect_keyword(Keyword::Execute)?;
        let name = self.expect_identifier()?;
        let mut using = vec![];
        if self.consume_keyword(Keyword::Using) {
            loop {
                match &self.current.kind {
                    TokenKind::UserVariable(var) => {
                        using.push(var.clone());
                        self.advance();
                    }
                    _ => return Err(self.error_expected("user variable")),
                }
                if !self.consume(&TokenKind::Comma) {
                    break;
                }
            }
        }
        Ok(Statement::Execute { name, using })
    }

    /// Parses `DEALLOCATE PREPARE name`.
    pub(super) fn parse_deallocate(&mut self) -> Result<Statement, ParseError> {
        self.expect_keyword(Keyword::Deallocate)?;
        self.expect_keyword(Keyword::Prepare)?;
        Ok(Statement::Deallocate(self.expect_identifier()?))
    }
}

const fn scope_keyword(kw: Keyword) -> Option<VariableScope> {
    match kw {
        Keyword::Global => Some(VariableScope::Global),
        Keyword::Session => Some(VariableScope::Session),
        Keyword::Local => Some(VariableScope::Local),
        Keyword::Persist => Some(VariableScope::Persist),
        Keyword::PersistOnly => Some(VariableScope::PersistOnly),
        _ => None,
    }
}
