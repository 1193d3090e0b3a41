//! # sharc
//!
//! The compiler for the Shard Programming Language.
//!
//! This crate holds the front-end: the command-line surface ([`Args`]),
//! the tokenizer ([`Lexer`]), and the [`Driver`] that wires them to the
//! diagnostics engine in `sharc-report`. Stages never print directly;
//! everything a user sees goes through a report sink and is rendered once
//! at the end of the run.
//!
//! Documentation for the language itself lives at <https://shardlang.org/doc/>.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod args;
pub mod driver;
pub mod lexer;

// Re-export main types
pub use args::Args;
pub use driver::{Driver, Verb};
pub use lexer::{Lexer, Token, TokenKind};

/// sharc version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
