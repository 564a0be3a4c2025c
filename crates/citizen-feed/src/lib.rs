//! The rant feed for the Citizen client.
//!
//! Holds the rants currently loaded on the device and answers the
//! questions the home and search screens ask: what order, which match,
//! and what happens when someone taps upvote.
//!
//! # Key types
//!
//! - [`Feed`]: the list of rants plus upvote/post/search
//! - [`SortBy`]: Recent or Trending ordering
//! - [`FeedConfig`]: limits (rant length, petition threshold)
//! - [`Upvote`]: the result of an upvote, including whether it tipped the
//!   rant over the petition threshold

mod config;
mod error;
mod feed;

pub use config::{FeedConfig, PETITION_THRESHOLD, SortBy};
pub use error::FeedError;
pub use feed::{Feed, Upvote};
