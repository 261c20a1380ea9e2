//! Fixed vocabularies offered by the profile and post editors

pub const CAT_BREEDS: &[&str] = &[
    "Ragdoll",
    "Siamese",
    "British Shorthair",
    "Maine Coon",
    "Persian",
    "Bengal",
    "Sphynx",
    "Munchkin",
    "Other",
];

pub const CAT_PERSONALITIES: &[&str] = &[
    "Cuddly",
    "Shy",
    "Vocal",
    "High Energy",
    "Lazy",
    "Independent",
    "Curious",
    "Talkative",
    "Gentle",
];

pub const HEALTH_TAGS: &[&str] = &[
    "Sensitive Stomach",
    "Anxiety Prone",
    "Indoor Only",
    "Senior Cat",
    "Kitten",
    "Special Diet",
];

/// Breed assigned at sign-up when none is chosen.
pub const DEFAULT_BREED: &str = "Ragdoll";

/// Coins granted to a freshly registered owner.
pub const SIGNUP_COIN_GRANT: u64 = 500;

/// Coins rewarded for publishing a post.
pub const POST_REWARD_COINS: u64 = 10;

/// Tags attached to posts shared from the assistant.
pub const ASSISTANT_SUMMARY_TAGS: &[&str] = &["AIAssistant", "CatCare"];

/// Listed spelling of `term` in `vocabulary`, matched ignoring case
pub fn listed_term(vocabulary: &[&'static str], term: &str) -> Option<&'static str> {
    let term = term.trim();
    vocabulary
        .iter()
        .copied()
        .find(|listed| listed.eq_ignore_ascii_case(term))
}

/// `term` in its listed spelling when known, otherwise trimmed as typed
pub fn canonical_term(vocabulary: &[&'static str], term: &str) -> String {
    listed_term(vocabulary, term)
        .map(str::to_string)
        .unwrap_or_else(|| term.trim().to_string())
}

pub fn is_known_breed(breed: &str) -> bool {
    listed_term(CAT_BREEDS, breed).is_some()
}
