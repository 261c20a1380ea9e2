//! Feed search and dangling-reference resolution

use crate::entities::{CatProfile, OwnerProfile, Post};

/// Owner for a record, falling back to the first known owner when the id
/// dangles. Returns `None` only when `owners` is empty.
pub fn resolve_owner<'a>(owners: &'a [OwnerProfile], owner_id: &str) -> Option<&'a OwnerProfile> {
    owners
        .iter()
        .find(|o| o.id == owner_id)
        .or_else(|| owners.first())
}

/// Cat shown next to a post: the referenced cat or the owner's primary cat
pub fn resolve_cat<'a>(owner: &'a OwnerProfile, cat_id: &str) -> Option<&'a CatProfile> {
    owner.cat_or_primary(cat_id)
}

/// Filter the feed by a search box term.
///
/// `#tag` matches post tags exactly (case-insensitive). Any other term
/// matches the author's account name, a tag substring or the content.
/// A blank term returns every post.
pub fn filter_posts<'a>(posts: &'a [Post], owners: &[OwnerProfile], term: &str) -> Vec<&'a Post> {
    let term = term.trim();
    if term.is_empty() {
        return posts.iter().collect();
    }

    let lower = term.to_lowercase();
    if let Some(tag) = lower.strip_prefix('#') {
        return posts
            .iter()
            .filter(|p| p.tags.iter().any(|t| t.to_lowercase() == tag))
            .collect();
    }

    posts
        .iter()
        .filter(|post| {
            let owner_match = owners
                .iter()
                .find(|o| o.id == post.owner_id)
                .map(|o| o.account_name.to_lowercase().contains(&lower))
                .unwrap_or(false);
            let tag_match = post.tags.iter().any(|t| t.to_lowercase().contains(&lower));
            let content_match = post.content.to_lowercase().contains(&lower);
            owner_match || tag_match || content_match
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn test_hash_query_matches_tags_exactly() {
        let posts = fixtures::posts();
        let owners = fixtures::owners();

        let hits = filter_posts(&posts, &owners, "#sleepingcat");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "p3");

        assert!(filter_posts(&posts, &owners, "#sleeping").is_empty());
    }

    #[test]
    fn test_plain_query_matches_owner_tag_or_content() {
        let posts = fixtures::posts();
        let owners = fixtures::owners();

        let by_owner = filter_posts(&posts, &owners, "kevin");
        assert_eq!(by_owner.len(), 1);
        assert_eq!(by_owner[0].owner_id, "owner_luna");

        let by_content = filter_posts(&posts, &owners, "harness");
        assert_eq!(by_content[0].id, "p2");

        assert_eq!(filter_posts(&posts, &owners, "  ").len(), posts.len());
    }

    #[test]
    fn test_dangling_owner_falls_back_to_first() {
        let owners = fixtures::owners();
        let owner = resolve_owner(&owners, "owner_deleted").unwrap();
        assert_eq!(owner.id, fixtures::OWNER_ME_ID);

        let cat = resolve_cat(owner, "cat_missing").unwrap();
        assert_eq!(cat.id, "cat_mochi");
    }
}
