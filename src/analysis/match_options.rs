//! Pattern-matching switches passed to every analysis call.

use serde::{Deserialize, Serialize};

bitflags::bitflags! {
    /// Which web-entity patterns the engine should recognise as single tokens.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct MatchOptions: u32 {
        const URL     = 1 << 0;
        const EMAIL   = 1 << 1;
        const HASHTAG = 1 << 2;
        const MENTION = 1 << 3;
        const ALL     = Self::URL.bits() | Self::EMAIL.bits() | Self::HASHTAG.bits() | Self::MENTION.bits();
    }
}

impl Default for MatchOptions {
    fn default() -> Self {
        MatchOptions::ALL
    }
}
