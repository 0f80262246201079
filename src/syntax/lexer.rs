// src/syntax/lexer.rs

use crate::errors::{CompileError, Result};

/// One lexical token. Keywords are not distinguished here; the parser decides
/// which identifiers act as keywords, so `task1` stays a plain task reference
/// while a bare `task` opens a class declaration.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// `[A-Za-z0-9_]+` with at least one non-digit character.
    Ident(String),
    /// Digits and dots, e.g. `3`, `2.5`. Kept raw; the parser decides whether
    /// an integer or a float is expected.
    Number(String),
    /// `"..."`-delimited text, no escape processing.
    Str(String),
    LBrace,
    RBrace,
    Semi,
    Colon,
    Dash,
    /// Synthetic end-of-input marker so the parser always has a position to
    /// report against.
    Eof,
}

impl TokenKind {
    /// Short description used in "expected X, found Y" messages.
    pub fn describe(&self) -> String {
        match self {
            TokenKind::Ident(name) => format!("'{name}'"),
            TokenKind::Number(raw) => format!("number '{raw}'"),
            TokenKind::Str(_) => "quoted string".to_string(),
            TokenKind::LBrace => "'{'".to_string(),
            TokenKind::RBrace => "'}'".to_string(),
            TokenKind::Semi => "';'".to_string(),
            TokenKind::Colon => "':'".to_string(),
            TokenKind::Dash => "'-'".to_string(),
            TokenKind::Eof => "end of input".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub line: usize,
    pub column: usize,
}

struct Lexer<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            chars: source.chars().peekable(),
            line: 1,
            column: 1,
        }
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn error(&self, line: usize, column: usize, message: impl Into<String>) -> CompileError {
        CompileError::Syntax {
            line,
            column,
            message: message.into(),
        }
    }

    fn run(mut self) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();
        while let Some(&c) = self.chars.peek() {
            let (line, column) = (self.line, self.column);
            match c {
                ' ' | '\t' | '\n' | '\r' => {
                    self.bump();
                }
                '/' => {
                    self.bump();
                    if self.chars.peek() == Some(&'/') {
                        // Line comment: discard to end of line.
                        while let Some(&c) = self.chars.peek() {
                            if c == '\n' {
                                break;
                            }
                            self.bump();
                        }
                    } else {
                        return Err(self.error(line, column, "unexpected character '/'"));
                    }
                }
                '"' => {
                    self.bump();
                    let mut text = String::new();
                    loop {
                        match self.bump() {
                            Some('"') => break,
                            Some(c) => text.push(c),
                            None => {
                                return Err(self.error(line, column, "unterminated string"));
                            }
                        }
                    }
                    tokens.push(Token {
                        kind: TokenKind::Str(text),
                        line,
                        column,
                    });
                }
                c if c.is_ascii_alphabetic() || c == '_' => {
                    let mut name = String::new();
                    while let Some(&c) = self.chars.peek() {
                        if c.is_ascii_alphanumeric() || c == '_' {
                            name.push(c);
                            self.bump();
                        } else {
                            break;
                        }
                    }
                    tokens.push(Token {
                        kind: TokenKind::Ident(name),
                        line,
                        column,
                    });
                }
                c if c.is_ascii_digit() => {
                    let mut raw = String::new();
                    while let Some(&c) = self.chars.peek() {
                        if c.is_ascii_digit() || c == '.' {
                            raw.push(c);
                            self.bump();
                        } else {
                            break;
                        }
                    }
                    tokens.push(Token {
                        kind: TokenKind::Number(raw),
                        line,
                        column,
                    });
                }
                '{' | '}' | ';' | ':' | '-' => {
                    self.bump();
                    let kind = match c {
                        '{' => TokenKind::LBrace,
                        '}' => TokenKind::RBrace,
                        ';' => TokenKind::Semi,
                        ':' => TokenKind::Colon,
                        _ => TokenKind::Dash,
                    };
                    tokens.push(Token { kind, line, column });
                }
                other => {
                    return Err(self.error(line, column, format!("unexpected character '{other}'")));
                }
            }
        }
        tokens.push(Token {
            kind: TokenKind::Eof,
            line: self.line,
            column: self.column,
        });
        Ok(tokens)
    }
}

/// Tokenize a whole document, appending a trailing [`TokenKind::Eof`].
pub fn lex(source: &str) -> Result<Vec<Token>> {
    Lexer::new(source).run()
}
