//! Sharp IR - shared source position types.
//!
//! This crate holds the small, dependency-free types every later phase uses
//! to talk about where a declaration came from:
//! - `Span` for byte ranges inside one file
//! - `SourceId` for the file itself
//! - `Location` for "a span in a file, or nowhere"
//! - `SyntaxReference` for the declaring syntax of a symbol
//!
//! Synthesized declarations have no source text behind them, so most of
//! them report `Location::None` and no syntax references at all.

mod location;
mod span;

pub use location::{Location, SourceId, SyntaxReference};
pub use span::Span;
