//! The feed itself: an ordered list of rants with voting and search.
//!
//! Rants are kept in arrival order. Sorting never reorders the stored
//! list; it returns a view, so switching between Recent and Trending and
//! back is lossless.

use citizen_protocol::{Rant, RantId};

use crate::{FeedConfig, FeedError, SortBy};

/// What an upvote did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Upvote {
    /// The rant's count after this vote.
    pub upvotes: u32,

    /// `true` only for the vote that reached the petition threshold.
    /// Votes after that return `false`.
    pub petition_triggered: bool,
}

/// The rants currently loaded on the device.
#[derive(Debug, Clone, Default)]
pub struct Feed {
    rants: Vec<Rant>,
    config: FeedConfig,
}

impl Feed {
    /// Creates an empty feed.
    pub fn new(config: FeedConfig) -> Self {
        Self {
            rants: Vec::new(),
            config,
        }
    }

    /// Replaces the contents with a freshly fetched list.
    ///
    /// If the list repeats an id, the first occurrence is kept.
    pub fn load(&mut self, rants: Vec<Rant>) {
        self.rants.clear();
        for rant in rants {
            if self.contains(&rant.id) {
                tracing::warn!(rant_id = %rant.id, "duplicate rant in fetched list, skipping");
                continue;
            }
            self.rants.push(rant);
        }
        tracing::debug!(count = self.rants.len(), "feed loaded");
    }

    /// Adds one rant at the end.
    ///
    /// # Errors
    /// [`FeedError::Duplicate`] if a rant with the same id is loaded.
    pub fn insert(&mut self, rant: Rant) -> Result<(), FeedError> {
        if self.contains(&rant.id) {
            return Err(FeedError::Duplicate(rant.id));
        }
        self.rants.push(rant);
        Ok(())
    }

    /// Creates a new rant with zero upvotes and adds it.
    ///
    /// `text` and `city` are trimmed before they are stored.
    ///
    /// # Errors
    /// - [`FeedError::InvalidRant`]: empty text, text over
    ///   `max_rant_chars`, or empty city
    /// - [`FeedError::Duplicate`]: the id is taken
    pub fn post(
        &mut self,
        id: RantId,
        text: &str,
        city: &str,
        created_at: u64,
    ) -> Result<&Rant, FeedError> {
        let text = text.trim();
        let city = city.trim();
        if text.is_empty() {
            return Err(FeedError::InvalidRant("text must not be empty".into()));
        }
        let chars = text.chars().count();
        if chars > self.config.max_rant_chars {
            return Err(FeedError::InvalidRant(format!(
                "text is {chars} characters, limit is {}",
                self.config.max_rant_chars
            )));
        }
        if city.is_empty() {
            return Err(FeedError::InvalidRant("city must not be empty".into()));
        }

        self.insert(Rant {
            id,
            text: text.to_owned(),
            city: city.to_owned(),
            upvotes: 0,
            created_at,
            image_url: None,
        })?;
        tracing::info!(city, "rant posted");
        Ok(self.rants.last().expect("just inserted"))
    }

    /// Adds one upvote.
    ///
    /// # Errors
    /// [`FeedError::NotFound`] if no rant has this id.
    pub fn upvote(&mut self, id: &RantId) -> Result<Upvote, FeedError> {
        let threshold = self.config.petition_threshold;
        let rant = self
            .rants
            .iter_mut()
            .find(|r| &r.id == id)
            .ok_or_else(|| FeedError::NotFound(id.clone()))?;

        let before = rant.upvotes;
        rant.upvotes = before.saturating_add(1);
        let petition_triggered = before < threshold && rant.upvotes >= threshold;

        if petition_triggered {
            tracing::info!(rant_id = %rant.id, upvotes = rant.upvotes, "petition threshold reached");
        }
        Ok(Upvote {
            upvotes: rant.upvotes,
            petition_triggered,
        })
    }

    /// Returns the rants in the requested order.
    pub fn sorted(&self, by: SortBy) -> Vec<&Rant> {
        let mut view: Vec<&Rant> = self.rants.iter().collect();
        sort_view(&mut view, by);
        view
    }

    /// Case-insensitive match on text or city. An empty query matches all.
    pub fn search(&self, query: &str) -> Vec<&Rant> {
        let needle = query.trim().to_lowercase();
        self.rants.iter().filter(|r| rant_matches(r, &needle)).collect()
    }

    /// [`search`](Self::search) results in [`sorted`](Self::sorted) order.
    pub fn search_sorted(&self, query: &str, by: SortBy) -> Vec<&Rant> {
        let mut view = self.search(query);
        sort_view(&mut view, by);
        view
    }

    /// Looks up a rant by id.
    pub fn get(&self, id: &RantId) -> Option<&Rant> {
        self.rants.iter().find(|r| &r.id == id)
    }

    /// Returns `true` if a rant with this id is loaded.
    pub fn contains(&self, id: &RantId) -> bool {
        self.get(id).is_some()
    }

    /// Number of loaded rants.
    pub fn len(&self) -> usize {
        self.rants.len()
    }

    /// Returns `true` if nothing is loaded.
    pub fn is_empty(&self) -> bool {
        self.rants.is_empty()
    }

    /// Rants in arrival order.
    pub fn iter(&self) -> impl Iterator<Item = &Rant> {
        self.rants.iter()
    }
}

// =========================================================================
// Tests
// =========================================================================

// `sort_by` is stable, so ties keep arrival order.
fn sort_view(view: &mut [&Rant], by: SortBy) {
    match by {
        SortBy::Recent => view.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortBy::Trending => view.sort_by(|a, b| b.upvotes.cmp(&a.upvotes)),
    }
}

/// `needle` is already trimmed and lowercased.
fn rant_matches(rant: &Rant, needle: &str) -> bool {
    needle.is_empty()
        || rant.text.to_lowercase().contains(needle)
        || rant.city.to_lowercase().contains(needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    // -- Helpers ----------------------------------------------------------

    fn rant(id: &str, text: &str, city: &str, upvotes: u32, created_at: u64) -> Rant {
        Rant {
            id: RantId::from(id),
            text: text.into(),
            city: city.into(),
            upvotes,
            created_at,
            image_url: None,
        }
    }

    fn sample_feed() -> Feed {
        let mut feed = Feed::new(FeedConfig::default());
        feed.load(vec![
            rant("1", "The potholes on Main Street are getting worse", "New York", 15, 100),
            rant("2", "Recycling collection is always late", "Los Angeles", 8, 300),
            rant("3", "Broken streetlight on 5th", "New York", 15, 200),
        ]);
        feed
    }

    fn ids(view: &[&Rant]) -> Vec<String> {
        view.iter().map(|r| r.id.0.clone()).collect()
    }

    // =====================================================================
    // sorted()
    // =====================================================================

    #[test]
    fn test_sorted_trending_orders_by_upvotes_stable() {
        let feed = sample_feed();
        // 1 and 3 tie at 15; 1 arrived first.
        assert_eq!(ids(&feed.sorted(SortBy::Trending)), ["1", "3", "2"]);
    }

    #[test]
    fn test_sorted_recent_orders_by_created_at_desc() {
        let feed = sample_feed();
        assert_eq!(ids(&feed.sorted(SortBy::Recent)), ["2", "3", "1"]);
    }

    #[test]
    fn test_sorted_does_not_reorder_storage() {
        let feed = sample_feed();
        let _ = feed.sorted(SortBy::Trending);
        let arrival: Vec<_> = feed.iter().map(|r| r.id.0.as_str()).collect();
        assert_eq!(arrival, ["1", "2", "3"]);
    }

    #[test]
    fn test_sorted_trending_reflects_new_upvotes() {
        let mut feed = sample_feed();
        for _ in 0..10 {
            feed.upvote(&RantId::from("2")).unwrap();
        }
        assert_eq!(ids(&feed.sorted(SortBy::Trending)), ["2", "1", "3"]);
    }

    // =====================================================================
    // upvote()
    // =====================================================================

    #[test]
    fn test_upvote_increments_by_one() {
        let mut feed = sample_feed();
        let vote = feed.upvote(&RantId::from("2")).unwrap();
        assert_eq!(vote.upvotes, 9);
        assert_eq!(feed.get(&RantId::from("2")).unwrap().upvotes, 9);
    }

    #[test]
    fn test_upvote_unknown_id_is_not_found() {
        let mut feed = sample_feed();
        let result = feed.upvote(&RantId::from("nope"));
        assert!(matches!(result, Err(FeedError::NotFound(_))));
    }

    #[test]
    fn test_upvote_triggers_petition_exactly_once() {
        let mut feed = Feed::new(FeedConfig::default());
        feed.insert(rant("p", "text", "city", 23, 0)).unwrap();
        let id = RantId::from("p");

        assert!(!feed.upvote(&id).unwrap().petition_triggered); // 24
        let crossing = feed.upvote(&id).unwrap(); // 25
        assert!(crossing.petition_triggered);
        assert_eq!(crossing.upvotes, 25);
        assert!(!feed.upvote(&id).unwrap().petition_triggered); // 26
    }

    #[test]
    fn test_upvote_saturates_at_max() {
        let mut feed = Feed::new(FeedConfig::default());
        feed.insert(rant("m", "text", "city", u32::MAX, 0)).unwrap();
        assert_eq!(feed.upvote(&RantId::from("m")).unwrap().upvotes, u32::MAX);
    }

    // =====================================================================
    // post() / insert() / load()
    // =====================================================================

    #[test]
    fn test_post_trims_and_starts_at_zero() {
        let mut feed = Feed::new(FeedConfig::default());
        let posted = feed
            .post(RantId::from("n"), "  Too much noise at night  ", " Austin ", 42)
            .unwrap();
        assert_eq!(posted.text, "Too much noise at night");
        assert_eq!(posted.city, "Austin");
        assert_eq!(posted.upvotes, 0);
        assert_eq!(posted.created_at, 42);
    }

    #[test]
    fn test_post_empty_text_is_invalid() {
        let mut feed = Feed::new(FeedConfig::default());
        let result = feed.post(RantId::from("n"), "   ", "Austin", 0);
        assert!(matches!(result, Err(FeedError::InvalidRant(_))));
        assert!(feed.is_empty());
    }

    #[test]
    fn test_post_over_limit_is_invalid() {
        let mut feed = Feed::new(FeedConfig {
            max_rant_chars: 5,
            ..FeedConfig::default()
        });
        assert!(feed.post(RantId::from("a"), "12345", "c", 0).is_ok());
        assert!(matches!(
            feed.post(RantId::from("b"), "123456", "c", 0),
            Err(FeedError::InvalidRant(_))
        ));
    }

    #[test]
    fn test_post_empty_city_is_invalid() {
        let mut feed = Feed::new(FeedConfig::default());
        assert!(matches!(
            feed.post(RantId::from("n"), "text", "", 0),
            Err(FeedError::InvalidRant(_))
        ));
    }

    #[test]
    fn test_insert_duplicate_id_rejected() {
        let mut feed = sample_feed();
        let result = feed.insert(rant("1", "again", "x", 0, 0));
        assert!(matches!(result, Err(FeedError::Duplicate(_))));
        assert_eq!(feed.len(), 3);
    }

    #[test]
    fn test_load_replaces_and_skips_duplicates() {
        let mut feed = sample_feed();
        feed.load(vec![rant("9", "a", "x", 0, 0), rant("9", "b", "y", 0, 0)]);
        assert_eq!(feed.len(), 1);
        assert_eq!(feed.get(&RantId::from("9")).unwrap().text, "a");
    }

    // =====================================================================
    // search()
    // =====================================================================

    #[test]
    fn test_search_matches_city_case_insensitively() {
        let feed = sample_feed();
        assert_eq!(ids(&feed.search("new york")), ["1", "3"]);
    }

    #[test]
    fn test_search_matches_text() {
        let feed = sample_feed();
        assert_eq!(ids(&feed.search("RECYCLING")), ["2"]);
    }

    #[test]
    fn test_search_empty_query_returns_all() {
        let feed = sample_feed();
        assert_eq!(feed.search("  ").len(), 3);
    }

    #[test]
    fn test_search_no_match_is_empty() {
        let feed = sample_feed();
        assert!(feed.search("volcano").is_empty());
    }

    #[test]
    fn test_search_sorted_filters_then_orders() {
        let feed = sample_feed();
        assert_eq!(ids(&feed.search_sorted("new york", SortBy::Recent)), ["3", "1"]);
        assert_eq!(ids(&feed.search_sorted("", SortBy::Trending)), ["1", "3", "2"]);
    }
}
