// Listing constants (No magic values)

/// Items requested per page
pub const PAGE_SIZE: u32 = 20;

/// Server-side ranking key sent with every query
pub const SORT_BY_SCORE: &str = "score";

/// Minimum match score (inclusive) for showing the match badge
pub const MATCH_BADGE_THRESHOLD: f64 = 70.0;

/// Skill chips shown per card on the full listing
pub const LISTING_SKILL_CHIPS: usize = 6;

/// Skill chips shown per card on the landing page
pub const LANDING_SKILL_CHIPS: usize = 5;

/// Buffered intents between a session handle and its driver
pub const INTENT_CHANNEL_CAPACITY: usize = 64;
