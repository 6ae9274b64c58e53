//! SMI lexer module.
//!
//! Tokenizes SMIv1/SMIv2 module text into a lazy token stream.
//!
//! The lexer is strict: an unterminated quoted string or a character that
//! cannot start any token stops tokenization with a [`LexError`]. Quoted
//! strings are opaque. Backslashes, doubled quotes and raw newlines are kept
//! exactly as written, and the token's text includes the surrounding quotes.

// Allow truncation casts - source size is limited to u32::MAX bytes
#![allow(clippy::cast_possible_truncation)]

mod keyword;
mod token;

pub use keyword::lookup_keyword;
pub use token::{Position, Span, Token, TokenKind};

use thiserror::Error;

/// Byte offset into source text.
pub type ByteOffset = u32;

/// A malformed token.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{message} at {position}")]
pub struct LexError {
    /// Human-readable description.
    pub message: String,
    /// Where the offending token starts.
    pub position: Position,
}

/// Lexer state for skip modes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LexerState {
    /// Normal tokenization.
    Normal,
    /// Inside a MACRO definition; skip until END.
    InMacro,
    /// Inside an EXPORTS clause; skip until semicolon.
    InExports,
}

/// SMI lexer.
///
/// Produces tokens on demand through [`Iterator`]. Iteration ends at end of
/// input or after the first error. Call [`Lexer::restart`] to tokenize the
/// same source again from the beginning.
#[derive(Clone, Debug)]
pub struct Lexer<'src> {
    /// Source text being tokenized.
    source: &'src str,
    /// Current byte position.
    pos: usize,
    /// Current line (1-based).
    line: u32,
    /// Byte offset where the current line starts.
    line_start: usize,
    /// Current lexer state.
    state: LexerState,
    /// Set once end of input or an error has been returned.
    finished: bool,
}

impl<'src> Lexer<'src> {
    /// Create a new lexer for the given source text.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            pos: 0,
            line: 1,
            line_start: 0,
            state: LexerState::Normal,
            finished: false,
        }
    }

    /// Rewind to the start of the source.
    pub fn restart(&mut self) {
        *self = Self::new(self.source);
    }

    /// Tokenize the entire source.
    ///
    /// The returned vector always ends with a single [`TokenKind::Eof`] token.
    ///
    /// # Errors
    ///
    /// Returns the first [`LexError`] encountered.
    pub fn tokenize(mut self) -> Result<Vec<Token<'src>>, LexError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let is_eof = token.kind == TokenKind::Eof;
            tokens.push(token);
            if is_eof {
                return Ok(tokens);
            }
        }
    }

    /// Get the next token.
    ///
    /// Returns an [`TokenKind::Eof`] token once input is exhausted.
    ///
    /// # Errors
    ///
    /// Returns a [`LexError`] for an unterminated literal or an unexpected
    /// character.
    pub fn next_token(&mut self) -> Result<Token<'src>, LexError> {
        match self.state {
            LexerState::Normal => self.next_normal_token(),
            LexerState::InMacro => Ok(self.skip_macro_body()),
            LexerState::InExports => Ok(self.skip_exports_body()),
        }
    }

    fn bytes(&self) -> &'src [u8] {
        self.source.as_bytes()
    }

    /// Peek at the current byte without advancing.
    fn peek(&self) -> Option<u8> {
        self.bytes().get(self.pos).copied()
    }

    /// Peek at the byte at offset from current position.
    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.bytes().get(self.pos + offset).copied()
    }

    /// Advance by one byte and return it, tracking line starts.
    fn advance(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.pos += 1;
        if b == b'\n' {
            self.line += 1;
            self.line_start = self.pos;
        }
        Some(b)
    }

    /// Skip whitespace (space, tab, CR, LF).
    fn skip_whitespace(&mut self) {
        while let Some(b' ' | b'\t' | b'\r' | b'\n') = self.peek() {
            self.advance();
        }
    }

    /// Skip `--` comments and whitespace until the next significant byte.
    ///
    /// A comment ends at end of line or at the next `--`. A run of dashes
    /// closes on its last two, so separator lines of any length are trivia.
    fn skip_trivia(&mut self) {
        loop {
            self.skip_whitespace();
            if self.peek() == Some(b'-') && self.peek_at(1) == Some(b'-') {
                self.skip_comment();
            } else {
                return;
            }
        }
    }

    fn skip_comment(&mut self) {
        self.advance();
        self.advance();
        loop {
            match self.peek() {
                None | Some(b'\n' | b'\r') => return,
                Some(b'-') if self.peek_at(1) == Some(b'-') && self.peek_at(2) != Some(b'-') => {
                    self.advance();
                    self.advance();
                    return;
                }
                _ => {
                    self.advance();
                }
            }
        }
    }

    fn here(&self) -> Position {
        Position {
            offset: self.pos as ByteOffset,
            line: self.line,
            column: (self.pos - self.line_start) as u32 + 1,
        }
    }

    /// Make a token from a start position to the current position.
    fn token(&self, kind: TokenKind, start: Position) -> Token<'src> {
        let begin = start.offset as usize;
        Token {
            kind,
            text: &self.source[begin..self.pos],
            span: Span::new(start.offset, self.pos as ByteOffset),
            position: start,
        }
    }

    fn error(&mut self, message: impl Into<String>, position: Position) -> LexError {
        self.finished = true;
        LexError {
            message: message.into(),
            position,
        }
    }

    /// Get the next token in normal state.
    fn next_normal_token(&mut self) -> Result<Token<'src>, LexError> {
        self.skip_trivia();

        let start = self.here();

        let Some(b) = self.peek() else {
            return Ok(self.token(TokenKind::Eof, start));
        };

        let single = match b {
            b'[' => Some(TokenKind::LBracket),
            b']' => Some(TokenKind::RBracket),
            b'{' => Some(TokenKind::LBrace),
            b'}' => Some(TokenKind::RBrace),
            b'(' => Some(TokenKind::LParen),
            b')' => Some(TokenKind::RParen),
            b';' => Some(TokenKind::Semicolon),
            b',' => Some(TokenKind::Comma),
            b'|' => Some(TokenKind::Pipe),
            _ => None,
        };
        if let Some(kind) = single {
            self.advance();
            return Ok(self.token(kind, start));
        }

        match b {
            b'.' => {
                self.advance();
                if self.peek() == Some(b'.') {
                    self.advance();
                    return Ok(self.token(TokenKind::DotDot, start));
                }
                Ok(self.token(TokenKind::Dot, start))
            }
            b':' => {
                self.advance();
                if self.peek() == Some(b':') && self.peek_at(1) == Some(b'=') {
                    self.advance();
                    self.advance();
                    return Ok(self.token(TokenKind::ColonColonEqual, start));
                }
                Ok(self.token(TokenKind::Colon, start))
            }
            b'-' => {
                if self.peek_at(1).is_some_and(|next| next.is_ascii_digit()) {
                    self.advance();
                    self.consume_digits();
                    return Ok(self.token(TokenKind::NegativeNumber, start));
                }
                self.advance();
                Ok(self.token(TokenKind::Minus, start))
            }
            b'0'..=b'9' => {
                self.consume_digits();
                Ok(self.token(TokenKind::Number, start))
            }
            b'"' => self.scan_quoted_string(start),
            b'\'' => self.scan_hex_or_bin_string(start),
            b if b.is_ascii_alphabetic() => Ok(self.scan_identifier_or_keyword(start)),
            _ => {
                let ch = self.source[self.pos..].chars().next().unwrap_or('?');
                Err(self.error(format!("unexpected character {ch:?}"), start))
            }
        }
    }

    /// Skip MACRO body until the END keyword.
    fn skip_macro_body(&mut self) -> Token<'src> {
        loop {
            self.skip_trivia();
            let start = self.here();

            if self.peek().is_none() {
                self.state = LexerState::Normal;
                return self.token(TokenKind::Eof, start);
            }

            if self.bytes()[self.pos..].starts_with(b"END") {
                let after = self.peek_at(3);
                let delimited = after.map_or(true, |b| !(b.is_ascii_alphanumeric() || b == b'-'));
                let fresh = self.pos == 0 || !self.bytes()[self.pos - 1].is_ascii_alphanumeric();
                if delimited && fresh {
                    self.pos += 3;
                    self.state = LexerState::Normal;
                    return self.token(TokenKind::KwEnd, start);
                }
            }

            if self.peek() == Some(b'"') {
                // Quoted text inside a macro body may contain END.
                self.advance();
                while let Some(b) = self.advance() {
                    if b == b'"' {
                        break;
                    }
                }
                continue;
            }

            self.advance();
        }
    }

    /// Skip EXPORTS body until semicolon.
    fn skip_exports_body(&mut self) -> Token<'src> {
        loop {
            self.skip_trivia();
            let start = self.here();
            match self.peek() {
                None => {
                    self.state = LexerState::Normal;
                    return self.token(TokenKind::Eof, start);
                }
                Some(b';') => {
                    self.advance();
                    self.state = LexerState::Normal;
                    return self.token(TokenKind::Semicolon, start);
                }
                _ => {
                    self.advance();
                }
            }
        }
    }

    fn consume_digits(&mut self) {
        while self.peek().is_some_and(|b| b.is_ascii_digit()) {
            self.advance();
        }
    }

    /// Scan an identifier or keyword.
    ///
    /// Hyphens are part of identifiers, except where two hyphens start a
    /// trailing comment.
    fn scan_identifier_or_keyword(&mut self, start: Position) -> Token<'src> {
        let is_uppercase = self.peek().is_some_and(|b| b.is_ascii_uppercase());
        self.advance();

        while let Some(b) = self.peek() {
            if b == b'-' && self.peek_at(1) == Some(b'-') {
                break;
            }
            if b.is_ascii_alphanumeric() || b == b'_' || b == b'-' {
                self.advance();
            } else {
                break;
            }
        }

        let text = &self.source[start.offset as usize..self.pos];

        if let Some(kind) = lookup_keyword(text) {
            match kind {
                TokenKind::KwMacro => self.state = LexerState::InMacro,
                TokenKind::KwExports => self.state = LexerState::InExports,
                _ => {}
            }
            return self.token(kind, start);
        }

        let kind = if is_uppercase {
            TokenKind::UppercaseIdent
        } else {
            TokenKind::LowercaseIdent
        };
        self.token(kind, start)
    }

    /// Scan a quoted string literal.
    ///
    /// A doubled quote inside the literal stands for one quote character and
    /// does not terminate it; both quotes stay in the token text.
    fn scan_quoted_string(&mut self, start: Position) -> Result<Token<'src>, LexError> {
        self.advance();

        loop {
            match self.advance() {
                None => return Err(self.error("unterminated quoted string", start)),
                Some(b'"') => {
                    if self.peek() == Some(b'"') {
                        self.advance();
                        continue;
                    }
                    return Ok(self.token(TokenKind::QuotedString, start));
                }
                Some(_) => {}
            }
        }
    }

    /// Scan a hex or binary string literal.
    fn scan_hex_or_bin_string(&mut self, start: Position) -> Result<Token<'src>, LexError> {
        self.advance();

        loop {
            match self.advance() {
                None => return Err(self.error("unterminated hex/binary string", start)),
                Some(b'\'') => break,
                Some(_) => {}
            }
        }

        let kind = match self.peek() {
            Some(b'H' | b'h') => TokenKind::HexString,
            Some(b'B' | b'b') => TokenKind::BinString,
            _ => {
                return Err(self.error("expected 'H' or 'B' suffix after quoted bit string", start));
            }
        };
        self.advance();
        Ok(self.token(kind, start))
    }
}

impl<'src> Iterator for Lexer<'src> {
    type Item = Result<Token<'src>, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.next_token() {
            Ok(token) if token.kind == TokenKind::Eof => {
                self.finished = true;
                None
            }
            other => Some(other),
        }
    }
}

impl core::iter::FusedIterator for Lexer<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    /// Helper to tokenize and get kinds only.
    fn token_kinds(source: &str) -> Vec<TokenKind> {
        Lexer::new(source)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    /// Helper to tokenize and get text slices.
    fn token_texts(source: &str) -> Vec<&str> {
        Lexer::new(source)
            .map(|t| t.unwrap().text)
            .collect()
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(token_kinds(""), vec![TokenKind::Eof]);
        assert_eq!(Lexer::new("").next(), None);
    }

    #[test]
    fn test_whitespace_only() {
        assert_eq!(token_kinds("   \t\n\r\n  "), vec![TokenKind::Eof]);
    }

    #[test]
    fn test_punctuation() {
        let kinds = token_kinds("[ ] { } ( ) ; , . |");
        assert_eq!(
            kinds,
            vec![
                TokenKind::LBracket,
                TokenKind::RBracket,
                TokenKind::LBrace,
                TokenKind::RBrace,
                TokenKind::LParen,
                TokenKind::RParen,
                TokenKind::Semicolon,
                TokenKind::Comma,
                TokenKind::Dot,
                TokenKind::Pipe,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_operators() {
        let kinds = token_kinds(".. ::= : -");
        assert_eq!(
            kinds,
            vec![
                TokenKind::DotDot,
                TokenKind::ColonColonEqual,
                TokenKind::Colon,
                TokenKind::Minus,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_numbers() {
        assert_eq!(token_texts("0 1 42 -1 -2147483648"), vec!["0", "1", "42", "-1", "-2147483648"]);
        assert_eq!(
            token_kinds("7 -7"),
            vec![TokenKind::Number, TokenKind::NegativeNumber, TokenKind::Eof]
        );
    }

    #[test]
    fn test_identifiers_keep_hyphens() {
        let tokens: Vec<_> = Lexer::new("Test-Textual-Convention test-notification-type")
            .map(Result::unwrap)
            .collect();
        assert_eq!(tokens[0].kind, TokenKind::UppercaseIdent);
        assert_eq!(tokens[0].text, "Test-Textual-Convention");
        assert_eq!(tokens[1].kind, TokenKind::LowercaseIdent);
        assert_eq!(tokens[1].text, "test-notification-type");
    }

    #[test]
    fn test_identifier_stops_at_comment() {
        assert_eq!(token_texts("ifIndex-- trailing comment\nfoo"), vec!["ifIndex", "foo"]);
    }

    #[test]
    fn test_keywords() {
        let kinds = token_kinds("DEFINITIONS BEGIN END OBJECT-TYPE read-only current");
        assert_eq!(
            kinds,
            vec![
                TokenKind::KwDefinitions,
                TokenKind::KwBegin,
                TokenKind::KwEnd,
                TokenKind::KwObjectType,
                TokenKind::KwReadOnly,
                TokenKind::KwCurrent,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_quoted_string_kept_verbatim() {
        let texts = token_texts(r#""Test\n TC\""#);
        assert_eq!(texts, vec![r#""Test\n TC\""#]);
    }

    #[test]
    fn test_multiline_string() {
        let source = "DISPLAY-HINT \"semantically\ninvalid\" STATUS";
        let tokens: Vec<_> = Lexer::new(source).map(Result::unwrap).collect();
        assert_eq!(tokens[1].kind, TokenKind::QuotedString);
        assert_eq!(tokens[1].text, "\"semantically\ninvalid\"");
        assert_eq!(tokens[2].position.line, 2);
        assert_eq!(tokens[2].position.column, 10);
    }

    #[test]
    fn test_doubled_quote_preserved() {
        let texts = token_texts(r#""say ""hi"" now" x"#);
        assert_eq!(texts, vec![r#""say ""hi"" now""#, "x"]);
    }

    #[test]
    fn test_empty_string() {
        assert_eq!(token_texts(r#""" x"#), vec![r#""""#, "x"]);
    }

    #[test]
    fn test_unterminated_string() {
        let err = Lexer::new("DESCRIPTION \"never closed").tokenize().unwrap_err();
        assert_eq!(err.position.line, 1);
        assert_eq!(err.position.column, 13);
        assert!(err.message.contains("unterminated"));
    }

    #[test]
    fn test_unexpected_character() {
        let mut lexer = Lexer::new("foo\n  @bar");
        assert_eq!(lexer.next().unwrap().unwrap().text, "foo");
        let err = lexer.next().unwrap().unwrap_err();
        assert_eq!(err.position.line, 2);
        assert_eq!(err.position.column, 3);
        assert!(lexer.next().is_none());
    }

    #[test]
    fn test_hex_and_bin_strings() {
        assert_eq!(
            token_kinds("'0A'H '0101'B"),
            vec![TokenKind::HexString, TokenKind::BinString, TokenKind::Eof]
        );
        assert!(Lexer::new("'0A'").tokenize().is_err());
    }

    #[test]
    fn test_comments() {
        let kinds = token_kinds("-- a comment\nfoo -- inline -- bar");
        assert_eq!(
            kinds,
            vec![TokenKind::LowercaseIdent, TokenKind::LowercaseIdent, TokenKind::Eof]
        );
    }

    #[test]
    fn test_dash_separator_lines() {
        for dashes in [4, 5, 6, 7, 9, 78] {
            let source = format!("foo\n{}\nbar", "-".repeat(dashes));
            assert_eq!(
                token_kinds(&source),
                vec![TokenKind::LowercaseIdent, TokenKind::LowercaseIdent, TokenKind::Eof],
                "{dashes} dashes"
            );
        }
    }

    #[test]
    fn test_comment_closed_by_dash_run() {
        assert_eq!(token_texts("a -- x ---- b"), vec!["a", "b"]);
        assert_eq!(token_texts("a ----- b\nc"), vec!["a", "b", "c"]);
        assert_eq!(token_texts("a -- x ----- -1"), vec!["a", "-1"]);
    }

    #[test]
    fn test_token_positions() {
        let positions: Vec<String> = Lexer::new("foo\n  bar ::=\n-----\nBaz")
            .map(|t| t.unwrap().position.to_string())
            .collect();
        assert_eq!(positions, vec!["1:1", "2:3", "2:7", "4:1"]);
    }

    #[test]
    fn test_macro_skip() {
        let source = "OBJECT-TYPE MACRO ::= BEGIN TYPE NOTATION ::= \"END\" VALUE NOTATION ::= x END foo";
        let kinds = token_kinds(source);
        assert_eq!(
            kinds,
            vec![
                TokenKind::KwObjectType,
                TokenKind::KwMacro,
                TokenKind::KwEnd,
                TokenKind::LowercaseIdent,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_exports_skip() {
        let kinds = token_kinds("EXPORTS foo, Bar; END");
        assert_eq!(
            kinds,
            vec![
                TokenKind::KwExports,
                TokenKind::Semicolon,
                TokenKind::KwEnd,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_restart() {
        let mut lexer = Lexer::new("a b c");
        assert_eq!(lexer.by_ref().count(), 3);
        assert!(lexer.next().is_none());
        lexer.restart();
        assert_eq!(lexer.map(|t| t.unwrap().text).collect::<Vec<_>>(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_size_constraint() {
        let kinds = token_kinds("OCTET STRING (SIZE (8 | 11))");
        assert_eq!(
            kinds,
            vec![
                TokenKind::KwOctet,
                TokenKind::KwString,
                TokenKind::LParen,
                TokenKind::KwSize,
                TokenKind::LParen,
                TokenKind::Number,
                TokenKind::Pipe,
                TokenKind::Number,
                TokenKind::RParen,
                TokenKind::RParen,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_span_tracking() {
        let tokens = Lexer::new("  foo  bar").tokenize().unwrap();
        assert_eq!(tokens[0].span, Span::new(2, 5));
        assert_eq!(tokens[1].span, Span::new(7, 10));
        assert_eq!(tokens[2].kind, TokenKind::Eof);
    }
}
