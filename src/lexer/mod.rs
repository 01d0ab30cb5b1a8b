//! Lexical analysis for EasyLang.
//!
//! The lexer is a byte cursor over the source text with a line counter. It
//! hands out one token per [`Lexer::next_token`] call, so the parser can pull
//! tokens lazily. It never fails: bytes it cannot place become
//! [`TokenKind::Unknown`] tokens and surface as parse errors downstream.

mod token;

pub use token::*;

use std::collections::HashMap;

use once_cell::sync::Lazy;

macro_rules! keyword {
    ($map:ident, $name:ident, $value:expr) => {
        $map.insert($value, TokenKind::$name);
    };
}

static KEYWORDS: Lazy<HashMap<&'static str, TokenKind>> = Lazy::new(|| {
    let mut m = HashMap::new();

    keyword!(m, Set, "set");
    keyword!(m, Print, "print");
    keyword!(m, Read, "read");
    keyword!(m, If, "if");
    keyword!(m, Then, "then");
    keyword!(m, End, "end");
    keyword!(m, While, "while");
    keyword!(m, Do, "do");
    keyword!(m, To, "to");
    keyword!(m, And, "and");
    keyword!(m, Function, "function");
    keyword!(m, Return, "return");

    m
});

fn is_word_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_'
}

#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    input: &'a str,
    position: usize,
    line: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            position: 0,
            line: 1,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.position).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.input.as_bytes().get(self.position + offset).copied()
    }

    fn bump(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.position += 1;
        Some(byte)
    }

    /// Skip spaces, tabs, and comments. A comment runs from `#` to the end of
    /// the line and swallows its terminating newline, so no `Newline` token is
    /// emitted for it.
    fn eat_blanks(&mut self) {
        loop {
            match self.peek() {
                Some(b' ') | Some(b'\t') => {
                    self.position += 1;
                }
                Some(b'#') => {
                    while let Some(byte) = self.bump() {
                        if byte == b'\n' {
                            self.line += 1;
                            break;
                        }
                    }
                }
                _ => return,
            }
        }
    }

    /// Produce the next token. Once the input is exhausted, every further call
    /// yields `Eof`.
    pub fn next_token(&mut self) -> Token {
        self.eat_blanks();

        let line = self.line;

        let Some(byte) = self.peek() else {
            return Token::new(TokenKind::Eof, line);
        };

        match byte {
            b'\n' => {
                self.position += 1;
                self.line += 1;
                Token::new(TokenKind::Newline, line)
            }
            b'\r' => {
                self.position += 1;
                if self.peek() == Some(b'\n') {
                    self.position += 1;
                }
                self.line += 1;
                Token::new(TokenKind::Newline, line)
            }
            b'"' => self.lex_string(line),
            b'A'..=b'Z' | b'a'..=b'z' | b'_' | b'0'..=b'9' => self.lex_word(line),
            b'.' if matches!(self.peek_at(1), Some(next) if next.is_ascii_digit()) => {
                self.lex_word(line)
            }
            b'.' => self.single(TokenKind::Dot, line),
            b'(' => self.single(TokenKind::LParen, line),
            b')' => self.single(TokenKind::RParen, line),
            b'{' => self.single(TokenKind::LBrace, line),
            b'}' => self.single(TokenKind::RBrace, line),
            b',' => self.single(TokenKind::Comma, line),
            b'+' => self.single(TokenKind::Plus, line),
            b'-' => self.single(TokenKind::Minus, line),
            b'*' => self.single(TokenKind::Times, line),
            b'/' => self.single(TokenKind::Divide, line),
            b'%' => self.single(TokenKind::Modulo, line),
            b'<' => self.comparison(TokenKind::LessOrEqual, TokenKind::LessThan, line),
            b'>' => self.comparison(TokenKind::GreaterOrEqual, TokenKind::GreaterThan, line),
            b'=' => self.comparison(TokenKind::Equal, TokenKind::Unknown, line),
            b'!' => self.comparison(TokenKind::NotEqual, TokenKind::Unknown, line),
            _ => self.single(TokenKind::Unknown, line),
        }
    }

    fn single(&mut self, kind: TokenKind, line: usize) -> Token {
        self.position += 1;
        Token::new(kind, line)
    }

    /// Lex a possibly two-character operator: `with_eq` if a `=` follows,
    /// otherwise `alone` (a bare `=` or `!` is `Unknown`).
    fn comparison(&mut self, with_eq: TokenKind, alone: TokenKind, line: usize) -> Token {
        self.position += 1;
        if self.peek() == Some(b'=') {
            self.position += 1;
            return Token::new(with_eq, line);
        }
        Token::new(alone, line)
    }

    /// Lex a run of letters, digits, underscores, and dots, then decide
    /// whether it is a number literal or an identifier/keyword. A dot joins
    /// the run only when the character after it continues the run, so a
    /// trailing dot is left behind as the statement terminator.
    fn lex_word(&mut self, line: usize) -> Token {
        let start = self.position;

        loop {
            match self.peek() {
                Some(byte) if is_word_byte(byte) => self.position += 1,
                Some(b'.') if matches!(self.peek_at(1), Some(next) if is_word_byte(next)) => {
                    self.position += 1
                }
                _ => break,
            }
        }

        let text = &self.input[start..self.position];

        let mut dots = 0;
        let numeric = text.bytes().all(|byte| {
            if byte == b'.' {
                dots += 1;
                true
            } else {
                byte.is_ascii_digit()
            }
        }) && dots <= 1;

        if numeric {
            // f64 parsing rejects a leading dot, which the run permits
            let text = if text.starts_with('.') {
                format!("0{text}")
            } else {
                text.to_owned()
            };
            return Token::with_text(TokenKind::Number, text, line);
        }

        // keywords and identifiers are case-insensitive
        let lowered = text.to_ascii_lowercase();
        match KEYWORDS.get(lowered.as_str()) {
            Some(kind) => Token::new(*kind, line),
            None => Token::with_text(TokenKind::Identifier, lowered, line),
        }
    }

    /// Lex a string literal. The lexeme spans to the next unescaped `"`; a
    /// backslash escapes the following character, which is kept verbatim. An
    /// unterminated string runs to the end of the input.
    fn lex_string(&mut self, line: usize) -> Token {
        self.position += 1;
        let start = self.position;

        loop {
            match self.peek() {
                None | Some(b'"') => break,
                Some(b'\\') => {
                    self.position += 1;
                    if let Some(escaped) = self.bump() {
                        if escaped == b'\n' {
                            self.line += 1;
                        }
                    }
                }
                Some(byte) => {
                    self.position += 1;
                    if byte == b'\n' {
                        self.line += 1;
                    }
                }
            }
        }

        let text = self.input[start..self.position].to_owned();
        if self.peek() == Some(b'"') {
            self.position += 1;
        }

        Token::with_text(TokenKind::String, text, line)
    }

    /// Tokenize the entire input. The stream always ends in exactly one `Eof`
    /// token.
    pub fn lex(mut self) -> Vec<Token> {
        let mut tokens = vec![];

        loop {
            let token = self.next_token();
            let done = token.kind == TokenKind::Eof;
            tokens.push(token);
            if done {
                return tokens;
            }
        }
    }
}
