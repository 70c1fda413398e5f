//! Built-in dictionary-driven analysis engine.
//!
//! [`LexiconBuilder`] owns a mutable [`Lexicon`](store::Lexicon): the
//! built-in closed-class morphemes plus dictionary and user words. Building
//! it snapshots the lexicon into a [`LexiconEngine`], which segments text
//! with a k-best lattice search and analyses asynchronously on a rayon pool.

pub mod builder;
pub mod builtin;
pub mod dictionary;
pub mod engine;
pub mod extract;
pub mod lattice;
pub mod pattern;
pub mod store;

pub use builder::LexiconBuilder;
pub use engine::LexiconEngine;
pub use store::{Lexicon, LexiconEntry};
