// src/syntax/parser.rs

use tracing::debug;

use crate::errors::{CompileError, Result};
use crate::model::{Anchor, Pipeline, PipelineBuilder};
use crate::syntax::lexer::{lex, Token, TokenKind};

/// Parse a whole document and return the finished semantic model.
///
/// Statements are applied to the builder as soon as they are recognized, so
/// each statement may only reference entities declared earlier in the
/// document. A document must contain at least one statement.
pub fn parse_document(source: &str) -> Result<Pipeline> {
    let tokens = lex(source)?;
    let mut parser = Parser::new(tokens);
    let mut builder = PipelineBuilder::new();

    parser.statement(&mut builder)?;
    while !parser.at_eof() {
        parser.statement(&mut builder)?;
    }
    debug!("document parsed");
    Ok(builder.finish())
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    fn peek(&self) -> &Token {
        // The lexer always appends an Eof token; never step past it.
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn bump(&mut self) -> Token {
        let token = self.peek().clone();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        token
    }

    fn at_eof(&self) -> bool {
        matches!(self.peek().kind, TokenKind::Eof)
    }

    fn error_at(&self, token: &Token, message: impl Into<String>) -> CompileError {
        CompileError::Syntax {
            line: token.line,
            column: token.column,
            message: message.into(),
        }
    }

    fn expect_punct(&mut self, kind: TokenKind, what: &str) -> Result<()> {
        let token = self.bump();
        if token.kind == kind {
            Ok(())
        } else {
            Err(self.error_at(
                &token,
                format!("expected {what}, found {}", token.kind.describe()),
            ))
        }
    }

    fn expect_ident(&mut self, what: &str) -> Result<(String, Token)> {
        let token = self.bump();
        match &token.kind {
            TokenKind::Ident(name) => Ok((name.clone(), token.clone())),
            other => Err(self.error_at(
                &token,
                format!("expected {what}, found {}", other.describe()),
            )),
        }
    }

    /// Identifier restricted to `[A-Za-z_]+`: class names and instance base
    /// names must not contain digits, so the digits appended by range
    /// expansion are always the first digit run in an instance name.
    fn expect_base_name(&mut self, what: &str) -> Result<String> {
        let (name, token) = self.expect_ident(what)?;
        if name.chars().any(|c| c.is_ascii_digit()) {
            return Err(self.error_at(
                &token,
                format!("expected {what} without digits, found '{name}'"),
            ));
        }
        Ok(name)
    }

    fn expect_keyword(&mut self, keyword: &str) -> Result<()> {
        let token = self.bump();
        match &token.kind {
            TokenKind::Ident(name) if name == keyword => Ok(()),
            other => Err(self.error_at(
                &token,
                format!("expected '{keyword}', found {}", other.describe()),
            )),
        }
    }

    fn expect_float(&mut self, what: &str) -> Result<f64> {
        let token = self.bump();
        match &token.kind {
            TokenKind::Number(raw) => raw
                .parse()
                .map_err(|_| self.error_at(&token, format!("invalid {what} '{raw}'"))),
            other => Err(self.error_at(
                &token,
                format!("expected {what}, found {}", other.describe()),
            )),
        }
    }

    fn expect_integer(&mut self, what: &str) -> Result<u32> {
        let token = self.bump();
        match &token.kind {
            TokenKind::Number(raw) => raw
                .parse()
                .map_err(|_| self.error_at(&token, format!("invalid {what} '{raw}'"))),
            other => Err(self.error_at(
                &token,
                format!("expected {what}, found {}", other.describe()),
            )),
        }
    }

    fn expect_string(&mut self, what: &str) -> Result<String> {
        let token = self.bump();
        match &token.kind {
            TokenKind::Str(text) => Ok(text.clone()),
            other => Err(self.error_at(
                &token,
                format!("expected {what}, found {}", other.describe()),
            )),
        }
    }

    /// `[label "<text>"]` — shared trailer of statements 2, 4 and 5.
    fn optional_label(&mut self) -> Result<String> {
        if matches!(&self.peek().kind, TokenKind::Ident(name) if name == "label") {
            self.bump();
            self.expect_string("label text")
        } else {
            Ok(String::new())
        }
    }

    /// Dispatch on the first identifier of a statement. `task`, `event` and
    /// `period` open the keyword-led forms; any other identifier starts
    /// either a dependency (`<ref> after ...`) or a range instantiation.
    fn statement(&mut self, builder: &mut PipelineBuilder) -> Result<()> {
        let (first, token) = self.expect_ident("statement")?;
        match first.as_str() {
            "task" => self.class_declaration(builder),
            "event" => self.event_statement(builder),
            "period" => self.period_statement(builder),
            _ => {
                if matches!(&self.peek().kind, TokenKind::Ident(next) if next == "after") {
                    self.dependency_statement(builder, first)
                } else {
                    self.instantiation(builder, first, token)
                }
            }
        }
    }

    /// `task <ClassName> { (duration: <float>; | group: "<str>";)* };`
    fn class_declaration(&mut self, builder: &mut PipelineBuilder) -> Result<()> {
        let name = self.expect_base_name("class name")?;
        self.expect_punct(TokenKind::LBrace, "'{'")?;

        let mut duration = 0.0;
        let mut group = String::new();
        loop {
            if matches!(self.peek().kind, TokenKind::RBrace) {
                self.bump();
                break;
            }
            let (key, token) = self.expect_ident("attribute name")?;
            self.expect_punct(TokenKind::Colon, "':'")?;
            match key.as_str() {
                "duration" => duration = self.expect_float("duration")?,
                "group" => group = self.expect_string("group name")?,
                other => {
                    return Err(self.error_at(
                        &token,
                        format!("unknown attribute '{other}' (expected 'duration' or 'group')"),
                    ));
                }
            }
            self.expect_punct(TokenKind::Semi, "';'")?;
        }
        self.expect_punct(TokenKind::Semi, "';'")?;

        builder.declare_class(name, duration, group);
        Ok(())
    }

    /// `<ClassName> <objName> range <start>-<end> [label "<text>"];`
    fn instantiation(
        &mut self,
        builder: &mut PipelineBuilder,
        class: String,
        class_token: Token,
    ) -> Result<()> {
        if class.chars().any(|c| c.is_ascii_digit()) {
            return Err(self.error_at(
                &class_token,
                format!("expected class name without digits, found '{class}'"),
            ));
        }
        let obj = self.expect_base_name("instance base name")?;
        self.expect_keyword("range")?;
        let start = self.expect_integer("range start")?;
        self.expect_punct(TokenKind::Dash, "'-'")?;
        let end = self.expect_integer("range end")?;
        let label = self.optional_label()?;
        self.expect_punct(TokenKind::Semi, "';'")?;

        builder.instantiate(&class, &obj, start, end, &label)
    }

    /// `<taskRef> after (null | <taskRef>+);`
    fn dependency_statement(&mut self, builder: &mut PipelineBuilder, task: String) -> Result<()> {
        self.expect_keyword("after")?;

        let mut prereqs = Vec::new();
        loop {
            match &self.peek().kind {
                TokenKind::Ident(_) => {
                    let (name, _) = self.expect_ident("task name")?;
                    prereqs.push(name);
                }
                TokenKind::Semi if !prereqs.is_empty() => break,
                _ => {
                    let token = self.bump();
                    return Err(self.error_at(
                        &token,
                        format!(
                            "expected 'null' or a task name, found {}",
                            token.kind.describe()
                        ),
                    ));
                }
            }
        }
        self.expect_punct(TokenKind::Semi, "';'")?;

        // `null` marks an empty prerequisite list.
        prereqs.retain(|name| name != "null");
        builder.declare_dependency(&task, &prereqs)
    }

    /// `event <name> at <taskRef> (start|finish) [label "<text>"];`
    fn event_statement(&mut self, builder: &mut PipelineBuilder) -> Result<()> {
        let (name, _) = self.expect_ident("event name")?;
        self.expect_keyword("at")?;
        let (task, _) = self.expect_ident("task name")?;
        let (anchor, token) = self.expect_ident("'start' or 'finish'")?;
        let anchor = match anchor.as_str() {
            "start" => Anchor::Start,
            "finish" => Anchor::Finish,
            other => {
                return Err(self.error_at(
                    &token,
                    format!("expected 'start' or 'finish', found '{other}'"),
                ));
            }
        };
        let label = self.optional_label()?;
        self.expect_punct(TokenKind::Semi, "';'")?;

        builder.declare_event(&name, &task, anchor, &label)
    }

    /// `period <eventName> to <eventName> [label "<text>"];`
    fn period_statement(&mut self, builder: &mut PipelineBuilder) -> Result<()> {
        let (start, _) = self.expect_ident("event name")?;
        self.expect_keyword("to")?;
        let (finish, _) = self.expect_ident("event name")?;
        let label = self.optional_label()?;
        self.expect_punct(TokenKind::Semi, "';'")?;

        builder.declare_period(&start, &finish, &label)
    }
}
