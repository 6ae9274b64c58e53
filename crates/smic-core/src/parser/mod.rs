//! SMI grammar parser.
//!
//! Recursive-descent parser producing an AST from the token stream of a
//! single module. The parser is fail-fast: the first token that does not fit
//! the grammar stops parsing with a [`SyntaxError`] naming the expected
//! construct, the offending token and its position.
//!
//! # Usage
//!
//! ```ignore
//! let module = Parser::new(source)?.parse_module()?;
//! ```

use core::fmt;

use thiserror::Error;

use crate::ast::{
    AccessClause, AccessKeyword, AccessValue, AgentCapabilitiesDef, AugmentsClause, Constraint,
    DefValClause, Definition, Ident, ImportClause, IndexClause, IndexItem, MacroDefinitionDef,
    Module, ModuleComplianceDef, ModuleIdentityDef, NamedNumber, NotificationGroupDef,
    NotificationTypeDef, ObjectGroupDef, ObjectIdentityDef, ObjectTypeDef, OidAssignment,
    OidComponent, QuotedString, Range, RangeValue, RevisionClause, SequenceField, StatusClause,
    StatusValue, SyntaxClause, TextualConventionDef, TrapTypeDef, TypeAssignmentDef, TypeSyntax,
    ValueAssignmentDef,
};
use crate::lexer::{LexError, Lexer, Position, Span, Token, TokenKind};

/// Token sequence that does not match the grammar.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("expected {expected}, found {found} at {position}")]
pub struct SyntaxError {
    /// What the parser was looking for.
    pub expected: String,
    /// Text of the offending token, or `<end of input>`.
    pub found: String,
    /// Kind of the offending token.
    pub kind: TokenKind,
    /// Position of the offending token.
    pub position: Position,
}

/// Parse failure: either the tokenizer or the grammar rejected the input.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Malformed token.
    #[error(transparent)]
    Lex(#[from] LexError),
    /// Unexpected token.
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
}

/// Parse a single module from source text.
///
/// # Errors
///
/// Returns [`ParseError`] on the first malformed token or grammar mismatch.
pub fn parse(source: &str) -> Result<Module, ParseError> {
    Ok(Parser::new(source)?.parse_module()?)
}

type PResult<T> = Result<T, SyntaxError>;

/// SMI parser.
pub struct Parser<'src> {
    source: &'src str,
    tokens: Vec<Token<'src>>,
    pos: usize,
    eof: Token<'src>,
}

impl fmt::Debug for Parser<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parser")
            .field("tokens", &self.tokens.len())
            .field("pos", &self.pos)
            .finish()
    }
}

impl<'src> Parser<'src> {
    /// Tokenize `source` and create a parser over the tokens.
    ///
    /// # Errors
    ///
    /// Returns the first [`LexError`] found in the source.
    #[allow(clippy::cast_possible_truncation)]
    pub fn new(source: &'src str) -> Result<Self, LexError> {
        let tokens = Lexer::new(source).tokenize()?;
        let eof = tokens.last().copied().unwrap_or_else(|| {
            let end = source.len() as u32;
            Token::new(
                TokenKind::Eof,
                "",
                Span::new(end, end),
                Position {
                    offset: end,
                    line: 1,
                    column: 1,
                },
            )
        });
        Ok(Self {
            source,
            tokens,
            pos: 0,
            eof,
        })
    }

    // === Token helpers ===

    fn peek(&self) -> Token<'src> {
        self.peek_nth(0)
    }

    fn peek_nth(&self, n: usize) -> Token<'src> {
        self.tokens.get(self.pos + n).copied().unwrap_or(self.eof)
    }

    fn is_eof(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }

    fn advance(&mut self) -> Token<'src> {
        let token = self.peek();
        if token.kind != TokenKind::Eof {
            self.pos += 1;
        }
        token
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind) -> PResult<Token<'src>> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.error(describe(kind)))
        }
    }

    fn current_start(&self) -> u32 {
        self.peek().span.start
    }

    fn previous_end(&self) -> u32 {
        self.pos
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .map_or(0, |t| t.span.end)
    }

    fn error(&self, expected: impl Into<String>) -> SyntaxError {
        self.error_at(self.peek(), expected)
    }

    #[allow(clippy::unused_self)]
    fn error_at(&self, token: Token<'src>, expected: impl Into<String>) -> SyntaxError {
        let found = if token.kind == TokenKind::Eof {
            "<end of input>".to_owned()
        } else {
            token.text.to_owned()
        };
        SyntaxError {
            expected: expected.into(),
            found,
            kind: token.kind,
            position: token.position,
        }
    }

    fn ident(token: Token<'src>) -> Ident {
        Ident::new(token.text, token.span)
    }

    fn expect_identifier(&mut self) -> PResult<Ident> {
        match self.peek().kind {
            TokenKind::UppercaseIdent | TokenKind::LowercaseIdent => Ok(Self::ident(self.advance())),
            _ => Err(self.error("identifier")),
        }
    }

    fn expect_lowercase(&mut self, what: &str) -> PResult<Ident> {
        if self.check(TokenKind::LowercaseIdent) {
            Ok(Self::ident(self.advance()))
        } else {
            Err(self.error(what))
        }
    }

    /// Enumeration labels may collide with status/access keywords
    /// (`current(1)`, `optional(2)`).
    fn expect_enum_label(&mut self) -> PResult<Ident> {
        let kind = self.peek().kind;
        if matches!(kind, TokenKind::LowercaseIdent | TokenKind::UppercaseIdent)
            || kind.is_value_keyword()
        {
            Ok(Self::ident(self.advance()))
        } else {
            Err(self.error("enumeration label"))
        }
    }

    fn parse_u32(&mut self, what: &str) -> PResult<(u32, Span)> {
        let token = self.peek();
        if token.kind != TokenKind::Number {
            return Err(self.error(what));
        }
        let value = token
            .text
            .parse::<u32>()
            .map_err(|_| self.error(format!("{what} in 0..=4294967295")))?;
        self.advance();
        Ok((value, token.span))
    }

    fn parse_i64(&mut self, what: &str) -> PResult<i64> {
        let token = self.peek();
        if !matches!(token.kind, TokenKind::Number | TokenKind::NegativeNumber) {
            return Err(self.error(what));
        }
        let value = token
            .text
            .parse::<i64>()
            .map_err(|_| self.error(format!("{what} in signed 64-bit range")))?;
        self.advance();
        Ok(value)
    }

    fn parse_quoted_string(&mut self) -> PResult<QuotedString> {
        let token = self.expect(TokenKind::QuotedString)?;
        let inner = token
            .text
            .strip_prefix('"')
            .and_then(|s| s.strip_suffix('"'))
            .unwrap_or(token.text);
        Ok(QuotedString::new(inner, token.span))
    }

    fn parse_clause_string(&mut self, keyword: TokenKind) -> PResult<QuotedString> {
        self.expect(keyword)?;
        self.parse_quoted_string()
    }

    fn parse_optional_clause_string(&mut self, keyword: TokenKind) -> PResult<Option<QuotedString>> {
        if self.eat(keyword) {
            Ok(Some(self.parse_quoted_string()?))
        } else {
            Ok(None)
        }
    }

    // === Module structure ===

    /// Parse a complete module: header, imports, body and `END`.
    ///
    /// # Errors
    ///
    /// Returns a [`SyntaxError`] at the first token that does not fit.
    pub fn parse_module(&mut self) -> PResult<Module> {
        let start = self.current_start();
        let name = self.parse_module_header()?;
        let mut module = Module::new(name, Span::new(start, start));

        if self.eat(TokenKind::KwImports) {
            module.imports = self.parse_imports()?;
        }

        while !self.check(TokenKind::KwEnd) {
            if self.is_eof() {
                return Err(self.error("END"));
            }
            if self.eat(TokenKind::KwExports) {
                self.expect(TokenKind::Semicolon)?;
                continue;
            }
            let definition = self.parse_definition()?;
            module.body.push(definition);
        }

        let end = self.expect(TokenKind::KwEnd)?;
        if !self.is_eof() {
            return Err(self.error("end of input after END"));
        }
        module.span = Span::new(start, end.span.end);
        Ok(module)
    }

    /// `ModuleName DEFINITIONS ::= BEGIN`
    fn parse_module_header(&mut self) -> PResult<Ident> {
        if !self.check(TokenKind::UppercaseIdent) {
            return Err(self.error("module name"));
        }
        let name = Self::ident(self.advance());
        self.expect(TokenKind::KwDefinitions)?;
        self.expect(TokenKind::ColonColonEqual)?;
        self.expect(TokenKind::KwBegin)?;
        Ok(name)
    }

    /// `IMPORTS sym, sym FROM Module sym FROM Module ;`
    fn parse_imports(&mut self) -> PResult<Vec<ImportClause>> {
        let mut imports = Vec::new();

        while !self.eat(TokenKind::Semicolon) {
            let start = self.current_start();
            let mut symbols = Vec::new();

            loop {
                let kind = self.peek().kind;
                if kind == TokenKind::KwFrom {
                    break;
                }
                // Macro and type names are importable even though they lex
                // as keywords.
                if matches!(kind, TokenKind::UppercaseIdent | TokenKind::LowercaseIdent)
                    || kind.is_macro_keyword()
                    || kind.is_type_keyword()
                {
                    symbols.push(Self::ident(self.advance()));
                    self.eat(TokenKind::Comma);
                } else {
                    return Err(self.error("imported symbol or FROM"));
                }
            }

            if symbols.is_empty() {
                return Err(self.error("imported symbol"));
            }
            self.expect(TokenKind::KwFrom)?;
            if !self.check(TokenKind::UppercaseIdent) {
                return Err(self.error("module name after FROM"));
            }
            let from = self.advance();
            imports.push(ImportClause::new(
                symbols,
                Self::ident(from),
                Span::new(start, from.span.end),
            ));
        }

        Ok(imports)
    }

    fn parse_definition(&mut self) -> PResult<Definition> {
        let first = self.peek().kind;
        let second = self.peek_nth(1).kind;

        match (first, second) {
            (TokenKind::LowercaseIdent, TokenKind::KwObject)
                if self.peek_nth(2).kind == TokenKind::KwIdentifier =>
            {
                self.parse_value_assignment()
            }
            (TokenKind::LowercaseIdent, TokenKind::KwObjectType) => self.parse_object_type(),
            (TokenKind::LowercaseIdent, TokenKind::KwModuleIdentity) => {
                self.parse_module_identity()
            }
            (TokenKind::LowercaseIdent, TokenKind::KwObjectIdentity) => {
                self.parse_object_identity()
            }
            (TokenKind::LowercaseIdent, TokenKind::KwNotificationType) => {
                self.parse_notification_type()
            }
            (TokenKind::LowercaseIdent, TokenKind::KwTrapType) => self.parse_trap_type(),
            (TokenKind::LowercaseIdent, TokenKind::KwObjectGroup) => self.parse_object_group(),
            (TokenKind::LowercaseIdent, TokenKind::KwNotificationGroup) => {
                self.parse_notification_group()
            }
            (TokenKind::LowercaseIdent, TokenKind::KwModuleCompliance) => {
                self.parse_module_compliance()
            }
            (TokenKind::LowercaseIdent, TokenKind::KwAgentCapabilities) => {
                self.parse_agent_capabilities()
            }
            (TokenKind::UppercaseIdent, TokenKind::KwTextualConvention) => {
                self.parse_textual_convention(false)
            }
            (TokenKind::UppercaseIdent, TokenKind::ColonColonEqual) => {
                if self.peek_nth(2).kind == TokenKind::KwTextualConvention {
                    self.parse_textual_convention(true)
                } else {
                    self.parse_type_assignment()
                }
            }
            // Base modules assign the application types themselves.
            (kind, TokenKind::ColonColonEqual) if kind.is_type_keyword() => {
                self.parse_type_assignment()
            }
            (_, TokenKind::KwMacro)
                if first == TokenKind::UppercaseIdent || first.is_macro_keyword() =>
            {
                self.parse_macro_definition()
            }
            _ => Err(self.error("definition")),
        }
    }

    // === Definitions ===

    /// `name OBJECT IDENTIFIER ::= { ... }`
    fn parse_value_assignment(&mut self) -> PResult<Definition> {
        let start = self.current_start();
        let name = Self::ident(self.advance());
        self.expect(TokenKind::KwObject)?;
        self.expect(TokenKind::KwIdentifier)?;
        self.expect(TokenKind::ColonColonEqual)?;
        let oid_assignment = self.parse_oid_assignment()?;
        let span = Span::new(start, oid_assignment.span.end);
        Ok(Definition::ValueAssignment(ValueAssignmentDef {
            name,
            oid_assignment,
            span,
        }))
    }

    /// `{ iso org(3) SNMPv2-SMI.mib-2 31 }`
    fn parse_oid_assignment(&mut self) -> PResult<OidAssignment> {
        let open = self.expect(TokenKind::LBrace)?;
        let mut components = Vec::new();

        while !self.check(TokenKind::RBrace) {
            let token = self.peek();
            match token.kind {
                TokenKind::Number => {
                    let (value, span) = self.parse_u32("OID component")?;
                    components.push(OidComponent::Number { value, span });
                }
                TokenKind::LowercaseIdent | TokenKind::UppercaseIdent => {
                    let first = Self::ident(self.advance());
                    if token.kind == TokenKind::UppercaseIdent && self.eat(TokenKind::Dot) {
                        let name = self.expect_lowercase("symbol name after module qualifier")?;
                        let span = Span::new(token.span.start, name.span.end);
                        components.push(OidComponent::QualifiedName {
                            module: first,
                            name,
                            span,
                        });
                    } else if self.eat(TokenKind::LParen) {
                        let (number, _) = self.parse_u32("OID component number")?;
                        let close = self.expect(TokenKind::RParen)?;
                        components.push(OidComponent::NamedNumber {
                            name: first,
                            number,
                            span: Span::new(token.span.start, close.span.end),
                        });
                    } else {
                        components.push(OidComponent::Name(first));
                    }
                }
                _ => return Err(self.error("OID component or '}'")),
            }
        }

        let close = self.expect(TokenKind::RBrace)?;
        if components.is_empty() {
            return Err(self.error_at(close, "OID component"));
        }
        Ok(OidAssignment::new(
            components,
            Span::new(open.span.start, close.span.end),
        ))
    }

    fn parse_object_type(&mut self) -> PResult<Definition> {
        let start = self.current_start();
        let name = Self::ident(self.advance());
        self.expect(TokenKind::KwObjectType)?;

        self.expect(TokenKind::KwSyntax)?;
        let syntax = self.parse_syntax_clause()?;
        let units = self.parse_optional_clause_string(TokenKind::KwUnits)?;

        let access = match self.peek().kind {
            TokenKind::KwMaxAccess | TokenKind::KwAccess => Some(self.parse_access_clause()?),
            _ => None,
        };
        let status = if self.check(TokenKind::KwStatus) {
            Some(self.parse_status_clause()?)
        } else {
            None
        };
        let description = self.parse_optional_clause_string(TokenKind::KwDescription)?;
        let reference = self.parse_optional_clause_string(TokenKind::KwReference)?;

        let mut index = None;
        let mut augments = None;
        match self.peek().kind {
            TokenKind::KwIndex => index = Some(self.parse_index_clause()?),
            TokenKind::KwAugments => augments = Some(self.parse_augments_clause()?),
            _ => {}
        }

        let defval = if self.check(TokenKind::KwDefval) {
            Some(self.parse_defval_clause()?)
        } else {
            None
        };

        self.expect(TokenKind::ColonColonEqual)?;
        let oid_assignment = self.parse_oid_assignment()?;
        let span = Span::new(start, oid_assignment.span.end);

        Ok(Definition::ObjectType(ObjectTypeDef {
            name,
            syntax,
            units,
            access,
            status,
            description,
            reference,
            index,
            augments,
            defval,
            oid_assignment,
            span,
        }))
    }

    fn parse_module_identity(&mut self) -> PResult<Definition> {
        let start = self.current_start();
        let name = Self::ident(self.advance());
        self.expect(TokenKind::KwModuleIdentity)?;

        let last_updated = self.parse_clause_string(TokenKind::KwLastUpdated)?;
        let organization = self.parse_clause_string(TokenKind::KwOrganization)?;
        let contact_info = self.parse_clause_string(TokenKind::KwContactInfo)?;
        let description = self.parse_clause_string(TokenKind::KwDescription)?;

        let mut revisions = Vec::new();
        while self.check(TokenKind::KwRevision) {
            let rev_start = self.current_start();
            let date = self.parse_clause_string(TokenKind::KwRevision)?;
            let description = self.parse_clause_string(TokenKind::KwDescription)?;
            let span = Span::new(rev_start, description.span.end);
            revisions.push(RevisionClause {
                date,
                description,
                span,
            });
        }

        self.expect(TokenKind::ColonColonEqual)?;
        let oid_assignment = self.parse_oid_assignment()?;
        let span = Span::new(start, oid_assignment.span.end);

        Ok(Definition::ModuleIdentity(ModuleIdentityDef {
            name,
            last_updated,
            organization,
            contact_info,
            description,
            revisions,
            oid_assignment,
            span,
        }))
    }

    fn parse_object_identity(&mut self) -> PResult<Definition> {
        let start = self.current_start();
        let name = Self::ident(self.advance());
        self.expect(TokenKind::KwObjectIdentity)?;

        let status = self.parse_status_clause()?;
        let description = self.parse_clause_string(TokenKind::KwDescription)?;
        let reference = self.parse_optional_clause_string(TokenKind::KwReference)?;

        self.expect(TokenKind::ColonColonEqual)?;
        let oid_assignment = self.parse_oid_assignment()?;
        let span = Span::new(start, oid_assignment.span.end);

        Ok(Definition::ObjectIdentity(ObjectIdentityDef {
            name,
            status,
            description,
            reference,
            oid_assignment,
            span,
        }))
    }

    fn parse_notification_type(&mut self) -> PResult<Definition> {
        let start = self.current_start();
        let name = Self::ident(self.advance());
        self.expect(TokenKind::KwNotificationType)?;

        let objects = if self.eat(TokenKind::KwObjects) {
            self.parse_symbol_list()?
        } else {
            Vec::new()
        };
        let status = self.parse_status_clause()?;
        let description = self.parse_clause_string(TokenKind::KwDescription)?;
        let reference = self.parse_optional_clause_string(TokenKind::KwReference)?;

        self.expect(TokenKind::ColonColonEqual)?;
        let oid_assignment = self.parse_oid_assignment()?;
        let span = Span::new(start, oid_assignment.span.end);

        Ok(Definition::NotificationType(NotificationTypeDef {
            name,
            objects,
            status,
            description,
            reference,
            oid_assignment,
            span,
        }))
    }

    /// SMIv1 `TRAP-TYPE ENTERPRISE e VARIABLES { ... } ... ::= n`
    fn parse_trap_type(&mut self) -> PResult<Definition> {
        let start = self.current_start();
        let name = Self::ident(self.advance());
        self.expect(TokenKind::KwTrapType)?;

        self.expect(TokenKind::KwEnterprise)?;
        let enterprise = self.expect_identifier()?;
        let variables = if self.eat(TokenKind::KwVariables) {
            self.parse_symbol_list()?
        } else {
            Vec::new()
        };
        let description = self.parse_optional_clause_string(TokenKind::KwDescription)?;
        let reference = self.parse_optional_clause_string(TokenKind::KwReference)?;

        self.expect(TokenKind::ColonColonEqual)?;
        let (trap_number, number_span) = self.parse_u32("trap number")?;

        Ok(Definition::TrapType(TrapTypeDef {
            name,
            enterprise,
            variables,
            description,
            reference,
            trap_number,
            span: Span::new(start, number_span.end),
        }))
    }

    fn parse_object_group(&mut self) -> PResult<Definition> {
        let start = self.current_start();
        let name = Self::ident(self.advance());
        self.expect(TokenKind::KwObjectGroup)?;

        self.expect(TokenKind::KwObjects)?;
        let objects = self.parse_symbol_list()?;
        let status = self.parse_status_clause()?;
        let description = self.parse_clause_string(TokenKind::KwDescription)?;
        let reference = self.parse_optional_clause_string(TokenKind::KwReference)?;

        self.expect(TokenKind::ColonColonEqual)?;
        let oid_assignment = self.parse_oid_assignment()?;
        let span = Span::new(start, oid_assignment.span.end);

        Ok(Definition::ObjectGroup(ObjectGroupDef {
            name,
            objects,
            status,
            description,
            reference,
            oid_assignment,
            span,
        }))
    }

    fn parse_notification_group(&mut self) -> PResult<Definition> {
        let start = self.current_start();
        let name = Self::ident(self.advance());
        self.expect(TokenKind::KwNotificationGroup)?;

        self.expect(TokenKind::KwNotifications)?;
        let notifications = self.parse_symbol_list()?;
        let status = self.parse_status_clause()?;
        let description = self.parse_clause_string(TokenKind::KwDescription)?;
        let reference = self.parse_optional_clause_string(TokenKind::KwReference)?;

        self.expect(TokenKind::ColonColonEqual)?;
        let oid_assignment = self.parse_oid_assignment()?;
        let span = Span::new(start, oid_assignment.span.end);

        Ok(Definition::NotificationGroup(NotificationGroupDef {
            name,
            notifications,
            status,
            description,
            reference,
            oid_assignment,
            span,
        }))
    }

    fn parse_module_compliance(&mut self) -> PResult<Definition> {
        let start = self.current_start();
        let name = Self::ident(self.advance());
        self.expect(TokenKind::KwModuleCompliance)?;

        let status = self.parse_status_clause()?;
        let description = self.parse_clause_string(TokenKind::KwDescription)?;
        let reference = self.parse_optional_clause_string(TokenKind::KwReference)?;
        self.skip_to_assignment()?;

        let oid_assignment = self.parse_oid_assignment()?;
        let span = Span::new(start, oid_assignment.span.end);

        Ok(Definition::ModuleCompliance(ModuleComplianceDef {
            name,
            status,
            description,
            reference,
            oid_assignment,
            span,
        }))
    }

    fn parse_agent_capabilities(&mut self) -> PResult<Definition> {
        let start = self.current_start();
        let name = Self::ident(self.advance());
        self.expect(TokenKind::KwAgentCapabilities)?;

        let product_release = self.parse_clause_string(TokenKind::KwProductRelease)?;
        let status = self.parse_status_clause()?;
        let description = self.parse_clause_string(TokenKind::KwDescription)?;
        let reference = self.parse_optional_clause_string(TokenKind::KwReference)?;
        self.skip_to_assignment()?;

        let oid_assignment = self.parse_oid_assignment()?;
        let span = Span::new(start, oid_assignment.span.end);

        Ok(Definition::AgentCapabilities(AgentCapabilitiesDef {
            name,
            product_release,
            status,
            description,
            reference,
            oid_assignment,
            span,
        }))
    }

    /// Skip MODULE / SUPPORTS sections up to and including `::=`.
    fn skip_to_assignment(&mut self) -> PResult<()> {
        while !self.eat(TokenKind::ColonColonEqual) {
            if self.is_eof() {
                return Err(self.error("'::='"));
            }
            self.advance();
        }
        Ok(())
    }

    /// `Name [::=] TEXTUAL-CONVENTION [DISPLAY-HINT] STATUS DESCRIPTION [REFERENCE] SYNTAX`
    fn parse_textual_convention(&mut self, with_assignment: bool) -> PResult<Definition> {
        let start = self.current_start();
        let name = Self::ident(self.advance());
        if with_assignment {
            self.expect(TokenKind::ColonColonEqual)?;
        }
        self.expect(TokenKind::KwTextualConvention)?;

        let display_hint = self.parse_optional_clause_string(TokenKind::KwDisplayHint)?;
        let status = self.parse_status_clause()?;
        let description = self.parse_clause_string(TokenKind::KwDescription)?;
        let reference = self.parse_optional_clause_string(TokenKind::KwReference)?;

        self.expect(TokenKind::KwSyntax)?;
        let syntax = self.parse_syntax_clause()?;
        let span = Span::new(start, syntax.span.end);

        Ok(Definition::TextualConvention(TextualConventionDef {
            name,
            display_hint,
            status,
            description,
            reference,
            syntax,
            span,
        }))
    }

    /// `Name ::= Syntax`
    fn parse_type_assignment(&mut self) -> PResult<Definition> {
        let start = self.current_start();
        let name = Self::ident(self.advance());
        self.expect(TokenKind::ColonColonEqual)?;
        let syntax = self.parse_type_syntax()?;
        let span = Span::new(start, syntax.span().end);
        Ok(Definition::TypeAssignment(TypeAssignmentDef { name, syntax, span }))
    }

    /// `NAME MACRO ::= BEGIN ... END`; the lexer drops the body.
    fn parse_macro_definition(&mut self) -> PResult<Definition> {
        let start = self.current_start();
        let name = Self::ident(self.advance());
        self.expect(TokenKind::KwMacro)?;
        let end = self.expect(TokenKind::KwEnd)?;
        Ok(Definition::MacroDefinition(MacroDefinitionDef {
            name,
            span: Span::new(start, end.span.end),
        }))
    }

    // === Clauses ===

    fn parse_symbol_list(&mut self) -> PResult<Vec<Ident>> {
        self.expect(TokenKind::LBrace)?;
        let mut symbols = Vec::new();
        loop {
            symbols.push(self.expect_identifier()?);
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::RBrace)?;
        Ok(symbols)
    }

    fn parse_status_clause(&mut self) -> PResult<StatusClause> {
        let start = self.expect(TokenKind::KwStatus)?.span.start;
        let value = match self.peek().kind {
            TokenKind::KwCurrent => StatusValue::Current,
            TokenKind::KwDeprecated => StatusValue::Deprecated,
            TokenKind::KwObsolete => StatusValue::Obsolete,
            TokenKind::KwMandatory => StatusValue::Mandatory,
            TokenKind::KwOptional => StatusValue::Optional,
            _ => return Err(self.error("status value")),
        };
        let token = self.advance();
        Ok(StatusClause {
            value,
            span: Span::new(start, token.span.end),
        })
    }

    fn parse_access_clause(&mut self) -> PResult<AccessClause> {
        let keyword_token = self.advance();
        let keyword = if keyword_token.kind == TokenKind::KwAccess {
            AccessKeyword::Access
        } else {
            AccessKeyword::MaxAccess
        };
        let value = match self.peek().kind {
            TokenKind::KwReadOnly => AccessValue::ReadOnly,
            TokenKind::KwReadWrite => AccessValue::ReadWrite,
            TokenKind::KwReadCreate => AccessValue::ReadCreate,
            TokenKind::KwWriteOnly => AccessValue::WriteOnly,
            TokenKind::KwNotAccessible => AccessValue::NotAccessible,
            TokenKind::KwAccessibleForNotify => AccessValue::AccessibleForNotify,
            _ => return Err(self.error("access value")),
        };
        let token = self.advance();
        Ok(AccessClause {
            keyword,
            value,
            span: Span::new(keyword_token.span.start, token.span.end),
        })
    }

    /// `INDEX { ifIndex, IMPLIED name }`
    fn parse_index_clause(&mut self) -> PResult<IndexClause> {
        let start = self.expect(TokenKind::KwIndex)?.span.start;
        self.expect(TokenKind::LBrace)?;
        let mut items = Vec::new();
        loop {
            let item_start = self.current_start();
            let implied = self.eat(TokenKind::KwImplied);
            let object = self.expect_identifier()?;
            let span = Span::new(item_start, object.span.end);
            items.push(IndexItem {
                implied,
                object,
                span,
            });
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        let close = self.expect(TokenKind::RBrace)?;
        Ok(IndexClause {
            items,
            span: Span::new(start, close.span.end),
        })
    }

    fn parse_augments_clause(&mut self) -> PResult<AugmentsClause> {
        let start = self.expect(TokenKind::KwAugments)?.span.start;
        self.expect(TokenKind::LBrace)?;
        let target = self.expect_identifier()?;
        let close = self.expect(TokenKind::RBrace)?;
        Ok(AugmentsClause {
            target,
            span: Span::new(start, close.span.end),
        })
    }

    /// `DEFVAL { ... }` with the braced content kept as source text.
    fn parse_defval_clause(&mut self) -> PResult<DefValClause> {
        let start = self.expect(TokenKind::KwDefval)?.span.start;
        let open = self.expect(TokenKind::LBrace)?;
        let mut depth = 1usize;
        let close = loop {
            let token = self.peek();
            match token.kind {
                TokenKind::Eof => return Err(self.error("'}' closing DEFVAL")),
                TokenKind::LBrace => depth += 1,
                TokenKind::RBrace => {
                    depth -= 1;
                    if depth == 0 {
                        self.advance();
                        break token;
                    }
                }
                _ => {}
            }
            self.advance();
        };
        let text = self
            .source
            .get(open.span.end as usize..close.span.start as usize)
            .unwrap_or_default()
            .trim()
            .to_owned();
        Ok(DefValClause {
            text,
            span: Span::new(start, close.span.end),
        })
    }

    // === Type syntax ===

    fn parse_syntax_clause(&mut self) -> PResult<SyntaxClause> {
        let syntax = self.parse_type_syntax()?;
        let span = syntax.span();
        Ok(SyntaxClause::new(syntax, span))
    }

    fn parse_type_syntax(&mut self) -> PResult<TypeSyntax> {
        if self.check(TokenKind::LBracket) {
            self.skip_tag()?;
        }

        let start = self.current_start();
        let token = self.peek();
        let base = match token.kind {
            TokenKind::KwInteger | TokenKind::KwInteger32 => {
                self.advance();
                if self.check(TokenKind::LBrace) {
                    let named_numbers = self.parse_named_numbers()?;
                    return Ok(TypeSyntax::IntegerEnum {
                        base: None,
                        named_numbers,
                        span: Span::new(start, self.previous_end()),
                    });
                }
                TypeSyntax::Builtin(Self::ident(token))
            }
            TokenKind::KwBits => {
                self.advance();
                if self.check(TokenKind::LBrace) {
                    let named_bits = self.parse_named_numbers()?;
                    return Ok(TypeSyntax::Bits {
                        named_bits,
                        span: Span::new(start, self.previous_end()),
                    });
                }
                TypeSyntax::Builtin(Self::ident(token))
            }
            TokenKind::KwOctet => {
                self.advance();
                let end = self.expect(TokenKind::KwString)?.span.end;
                TypeSyntax::OctetString {
                    span: Span::new(start, end),
                }
            }
            TokenKind::KwObject => {
                self.advance();
                let end = self.expect(TokenKind::KwIdentifier)?.span.end;
                return Ok(TypeSyntax::ObjectIdentifier {
                    span: Span::new(start, end),
                });
            }
            TokenKind::KwSequence => {
                self.advance();
                if self.eat(TokenKind::KwOf) {
                    let entry_type = self.expect_identifier()?;
                    let span = Span::new(start, entry_type.span.end);
                    return Ok(TypeSyntax::SequenceOf { entry_type, span });
                }
                self.expect(TokenKind::LBrace)?;
                let fields = self.parse_sequence_fields()?;
                let close = self.expect(TokenKind::RBrace)?;
                return Ok(TypeSyntax::Sequence {
                    fields,
                    span: Span::new(start, close.span.end),
                });
            }
            TokenKind::UppercaseIdent => {
                self.advance();
                let ident = Self::ident(token);
                if self.check(TokenKind::LBrace) {
                    let named_numbers = self.parse_named_numbers()?;
                    return Ok(TypeSyntax::IntegerEnum {
                        base: Some(ident),
                        named_numbers,
                        span: Span::new(start, self.previous_end()),
                    });
                }
                TypeSyntax::TypeRef(ident)
            }
            kind if kind.is_type_keyword() && kind != TokenKind::KwString => {
                self.advance();
                TypeSyntax::Builtin(Self::ident(token))
            }
            _ => return Err(self.error("type")),
        };

        if self.check(TokenKind::LParen) {
            let constraint = self.parse_constraint()?;
            let span = Span::new(start, constraint.span().end);
            Ok(TypeSyntax::Constrained {
                base: Box::new(base),
                constraint,
                span,
            })
        } else {
            Ok(base)
        }
    }

    /// `[APPLICATION n] IMPLICIT`
    fn skip_tag(&mut self) -> PResult<()> {
        self.expect(TokenKind::LBracket)?;
        if !self.eat(TokenKind::KwApplication) {
            self.eat(TokenKind::KwUniversal);
        }
        self.parse_u32("tag number")?;
        self.expect(TokenKind::RBracket)?;
        self.eat(TokenKind::KwImplicit);
        Ok(())
    }

    /// `{ up(1), down(2) }`
    fn parse_named_numbers(&mut self) -> PResult<Vec<NamedNumber>> {
        self.expect(TokenKind::LBrace)?;
        let mut named = Vec::new();
        loop {
            let name = self.expect_enum_label()?;
            self.expect(TokenKind::LParen)?;
            let value = self.parse_i64("number")?;
            let close = self.expect(TokenKind::RParen)?;
            let span = Span::new(name.span.start, close.span.end);
            named.push(NamedNumber::new(name, value, span));
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::RBrace)?;
        Ok(named)
    }

    fn parse_sequence_fields(&mut self) -> PResult<Vec<SequenceField>> {
        let mut fields = Vec::new();
        loop {
            let name = self.expect_identifier()?;
            let syntax = self.parse_type_syntax()?;
            let span = Span::new(name.span.start, syntax.span().end);
            fields.push(SequenceField { name, syntax, span });
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        Ok(fields)
    }

    /// `(SIZE (0..255 | 300))` or `(0..10 | 20)`
    fn parse_constraint(&mut self) -> PResult<Constraint> {
        let open = self.expect(TokenKind::LParen)?;
        let constraint = if self.eat(TokenKind::KwSize) {
            self.expect(TokenKind::LParen)?;
            let ranges = self.parse_ranges()?;
            self.expect(TokenKind::RParen)?;
            let close = self.expect(TokenKind::RParen)?;
            Constraint::Size {
                ranges,
                span: Span::new(open.span.start, close.span.end),
            }
        } else {
            let ranges = self.parse_ranges()?;
            let close = self.expect(TokenKind::RParen)?;
            Constraint::Range {
                ranges,
                span: Span::new(open.span.start, close.span.end),
            }
        };
        Ok(constraint)
    }

    fn parse_ranges(&mut self) -> PResult<Vec<Range>> {
        let mut ranges = Vec::new();
        loop {
            let start = self.current_start();
            let min = self.parse_range_value()?;
            let max = if self.eat(TokenKind::DotDot) {
                Some(self.parse_range_value()?)
            } else {
                None
            };
            ranges.push(Range {
                min,
                max,
                span: Span::new(start, self.previous_end()),
            });
            if !self.eat(TokenKind::Pipe) {
                break;
            }
        }
        Ok(ranges)
    }

    fn parse_range_value(&mut self) -> PResult<RangeValue> {
        let token = self.peek();
        let value = match token.kind {
            TokenKind::Number => match token.text.parse::<i64>() {
                Ok(v) => RangeValue::Signed(v),
                Err(_) => RangeValue::Unsigned(
                    token
                        .text
                        .parse::<u64>()
                        .map_err(|_| self.error("bound in unsigned 64-bit range"))?,
                ),
            },
            TokenKind::NegativeNumber => RangeValue::Signed(
                token
                    .text
                    .parse::<i64>()
                    .map_err(|_| self.error("bound in signed 64-bit range"))?,
            ),
            TokenKind::HexString | TokenKind::BinString => {
                let radix = if token.kind == TokenKind::HexString { 16 } else { 2 };
                let digits = token
                    .text
                    .get(1..token.text.len().saturating_sub(2))
                    .unwrap_or_default();
                let parsed = if digits.is_empty() {
                    Ok(0)
                } else {
                    u64::from_str_radix(digits, radix)
                };
                match parsed {
                    Ok(v) => i64::try_from(v).map_or(RangeValue::Unsigned(v), RangeValue::Signed),
                    Err(_) => return Err(self.error("bound in unsigned 64-bit range")),
                }
            }
            TokenKind::UppercaseIdent | TokenKind::LowercaseIdent => {
                RangeValue::Ident(Self::ident(token))
            }
            _ => return Err(self.error("range bound")),
        };
        self.advance();
        Ok(value)
    }
}

/// Human-readable name for an expected token kind.
fn describe(kind: TokenKind) -> &'static str {
    match kind {
        TokenKind::Eof => "end of input",
        TokenKind::UppercaseIdent => "uppercase identifier",
        TokenKind::LowercaseIdent => "lowercase identifier",
        TokenKind::Number => "number",
        TokenKind::QuotedString => "quoted string",
        TokenKind::LBracket => "'['",
        TokenKind::RBracket => "']'",
        TokenKind::LBrace => "'{'",
        TokenKind::RBrace => "'}'",
        TokenKind::LParen => "'('",
        TokenKind::RParen => "')'",
        TokenKind::Semicolon => "';'",
        TokenKind::ColonColonEqual => "'::='",
        TokenKind::KwDefinitions => "DEFINITIONS",
        TokenKind::KwBegin => "BEGIN",
        TokenKind::KwEnd => "END",
        TokenKind::KwFrom => "FROM",
        TokenKind::KwObject => "OBJECT",
        TokenKind::KwIdentifier => "IDENTIFIER",
        TokenKind::KwString => "STRING",
        TokenKind::KwSyntax => "SYNTAX",
        TokenKind::KwStatus => "STATUS",
        TokenKind::KwDescription => "DESCRIPTION",
        TokenKind::KwObjects => "OBJECTS",
        TokenKind::KwNotifications => "NOTIFICATIONS",
        TokenKind::KwEnterprise => "ENTERPRISE",
        TokenKind::KwLastUpdated => "LAST-UPDATED",
        TokenKind::KwOrganization => "ORGANIZATION",
        TokenKind::KwContactInfo => "CONTACT-INFO",
        TokenKind::KwProductRelease => "PRODUCT-RELEASE",
        TokenKind::KwRevision => "REVISION",
        TokenKind::KwTextualConvention => "TEXTUAL-CONVENTION",
        TokenKind::KwMacro => "MACRO",
        _ => "token",
    }
}
