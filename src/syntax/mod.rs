// src/syntax/mod.rs

//! Lexing and parsing of pipeline documents.
//!
//! - [`lexer`] turns the raw text into positioned tokens.
//! - [`parser`] recognizes the five statement shapes with recursive descent
//!   and applies each statement to a [`crate::model::PipelineBuilder`] as it
//!   is recognized, so the whole document is handled in a single pass.

pub mod lexer;
pub mod parser;

pub use lexer::{lex, Token, TokenKind};
pub use parser::parse_document;
