//! Feed configuration and ordering.

use serde::{Deserialize, Serialize};

/// Upvotes at which a rant is turned into a petition.
pub const PETITION_THRESHOLD: u32 = 25;

// ---------------------------------------------------------------------------
// FeedConfig
// ---------------------------------------------------------------------------

/// Limits applied when posting and voting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Longest rant text accepted, in characters.
    pub max_rant_chars: usize,

    /// Upvote count that triggers a petition.
    pub petition_threshold: u32,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            max_rant_chars: 280,
            petition_threshold: PETITION_THRESHOLD,
        }
    }
}

// ---------------------------------------------------------------------------
// SortBy
// ---------------------------------------------------------------------------

/// How the home screen orders rants.
///
/// - **Recent**: newest first by `created_at`.
/// - **Trending**: most upvotes first.
///
/// Both are stable: rants that tie keep the order they arrived in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    #[default]
    Recent,
    Trending,
}

impl std::fmt::Display for SortBy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Recent => write!(f, "recent"),
            Self::Trending => write!(f, "trending"),
        }
    }
}

impl std::str::FromStr for SortBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "recent" => Ok(Self::Recent),
            "trending" => Ok(Self::Trending),
            other => Err(format!("unknown sort order '{other}' (expected recent or trending)")),
        }
    }
}
