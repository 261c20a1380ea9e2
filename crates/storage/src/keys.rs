//! Storage key layout

pub const POSTS: &str = "catcircle_posts";
pub const USERS: &str = "catcircle_users";
pub const SESSION: &str = "catcircle_session";
pub const COMMUNITIES: &str = "catcircle_communities";
pub const GROUP_CHATS: &str = "catcircle_group_chats";
pub const TOKEN: &str = "catcircle_token";
pub const PRODUCTS: &str = "catcircle_products";

pub fn purchases(user_id: &str) -> String {
    format!("catcircle_purchases_{}", user_id)
}

pub fn chats(user_id: &str) -> String {
    format!("catcircle_chats_{}", user_id)
}

pub fn following(user_id: &str) -> String {
    format!("catcircle_following_{}", user_id)
}
