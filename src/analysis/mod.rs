//! Analysis data types for Morphkit.
//!
//! This module holds the vocabulary shared by engines and callers: the fixed
//! part-of-speech tag set, the token types at both sides of the offset repair
//! step, and the pattern-matching switches.

pub mod match_options;
pub mod offset;
pub mod tag;
pub mod token;

// Re-export commonly used types
pub use match_options::*;
pub use tag::*;
pub use token::*;
