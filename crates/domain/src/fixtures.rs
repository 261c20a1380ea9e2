//! Seed data written to an empty store on first run
//!
//! Timestamps of posts and challenges are relative to the moment the
//! fixtures are built, so a fresh install always shows a recent feed.

use crate::entities::{
    CatChallenge, CatProfile, Community, Gender, OwnerProfile, Post, PostType, Product,
    ProductCategory,
};
use crate::ids::now_millis;

const HOUR_MS: i64 = 60 * 60 * 1000;
const DAY_MS: i64 = 24 * HOUR_MS;

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[allow(clippy::too_many_arguments)]
fn cat(
    id: &str,
    owner_id: &str,
    name: &str,
    breed: &str,
    age: u32,
    gender: Gender,
    personality: &[&str],
    health_tags: &[&str],
    avatar: &str,
    bio: &str,
) -> CatProfile {
    CatProfile {
        id: id.to_string(),
        owner_id: owner_id.to_string(),
        name: name.to_string(),
        breed: breed.to_string(),
        age,
        gender,
        neutered: true,
        personality: strings(personality),
        health_tags: strings(health_tags),
        avatar: avatar.to_string(),
        bio: Some(bio.to_string()),
        features: None,
    }
}

pub const OWNER_ME_ID: &str = "owner_me";

pub fn owner_me() -> OwnerProfile {
    OwnerProfile {
        id: OWNER_ME_ID.to_string(),
        account_name: "Ragdoll_Official".to_string(),
        email: None,
        avatar: "https://i.pravatar.cc/150?u=sarah".to_string(),
        bio: "Professional cat lover. Managing a household of fluffy clouds. ☕🐾".to_string(),
        coin_balance: 1250,
        followers_count: 840,
        following_count: 230,
        cats: vec![cat(
            "cat_mochi",
            OWNER_ME_ID,
            "Mochi",
            "Ragdoll",
            2,
            Gender::Male,
            &["Cuddly", "Vocal"],
            &["Sensitive Stomach"],
            "https://images.unsplash.com/photo-1548247416-ec66f4900b2e?q=80&w=400",
            "The namesake of this account. A true gentleman.",
        )],
        interests: strings(&["Ragdoll Care", "Photography", "Organic Food", "Interior Design"]),
    }
}

pub fn owner_luna() -> OwnerProfile {
    OwnerProfile {
        id: "owner_luna".to_string(),
        account_name: "Kevin_BSH".to_string(),
        email: None,
        avatar: "https://i.pravatar.cc/150?u=kevin".to_string(),
        bio: "British Shorthair enthusiast and amateur photographer.".to_string(),
        coin_balance: 300,
        followers_count: 2100,
        following_count: 560,
        cats: vec![cat(
            "cat_luna",
            "owner_luna",
            "Luna",
            "British Shorthair",
            4,
            Gender::Female,
            &["Independent", "Lazy"],
            &[],
            "https://images.unsplash.com/photo-1513245533132-31f507417b26?q=80&w=400",
            "Ruling from the top of the bookshelf.",
        )],
        interests: strings(&["British Shorthair", "Cat Furniture", "Indoor Play", "Photography"]),
    }
}

pub fn owner_bengal() -> OwnerProfile {
    OwnerProfile {
        id: "owner_bengal".to_string(),
        account_name: "WildHeart_Leo".to_string(),
        email: None,
        avatar: "https://i.pravatar.cc/150?u=leo".to_string(),
        bio: "Adventure cat owner. Training Leo to hike with me!".to_string(),
        coin_balance: 800,
        followers_count: 1500,
        following_count: 400,
        cats: vec![cat(
            "cat_leo",
            "owner_bengal",
            "Leo",
            "Bengal",
            3,
            Gender::Male,
            &["High Energy", "Adventurous"],
            &[],
            "https://images.unsplash.com/photo-1511044568932-338cba0ad803?q=80&w=400",
            "Leash trained and ready for the wild.",
        )],
        interests: strings(&["Adventure Cats", "Training", "Active Play", "Photography"]),
    }
}

pub fn owner_sphynx() -> OwnerProfile {
    OwnerProfile {
        id: "owner_sphynx".to_string(),
        account_name: "Velvet_Shadow".to_string(),
        email: None,
        avatar: "https://i.pravatar.cc/150?u=shadow".to_string(),
        bio: "Living life without a single hair! 🧥 Skin care is my passion.".to_string(),
        coin_balance: 2400,
        followers_count: 4500,
        following_count: 120,
        cats: vec![cat(
            "cat_shadow",
            "owner_sphynx",
            "Shadow",
            "Sphynx",
            3,
            Gender::Male,
            &["Gentle", "Vocal"],
            &["Special Diet"],
            "https://images.unsplash.com/photo-1520315342629-6ea920342047?q=80&w=400",
            "Just a warm peach living in a fuzzy world.",
        )],
        interests: strings(&["Sphynx Care", "Cat Fashion", "Skincare"]),
    }
}

pub fn owner_titan() -> OwnerProfile {
    OwnerProfile {
        id: "owner_titan".to_string(),
        account_name: "GentleGiant_Titan".to_string(),
        email: None,
        avatar: "https://i.pravatar.cc/150?u=titan".to_string(),
        bio: "Everything is bigger in this house. Even the purrs. 🦁".to_string(),
        coin_balance: 150,
        followers_count: 12000,
        following_count: 800,
        cats: vec![cat(
            "cat_titan",
            "owner_titan",
            "Titan",
            "Maine Coon",
            5,
            Gender::Male,
            &["Gentle", "Lazy"],
            &[],
            "https://images.unsplash.com/photo-1533738363-b7f9aef128ce?q=80&w=400",
            "Half cat, half lion, all love.",
        )],
        interests: strings(&["Maine Coon", "Grooming", "Giant Cats"]),
    }
}

pub fn owners() -> Vec<OwnerProfile> {
    vec![
        owner_me(),
        owner_luna(),
        owner_bengal(),
        owner_sphynx(),
        owner_titan(),
    ]
}

pub fn communities() -> Vec<Community> {
    vec![
        Community {
            id: "comm_bsh".to_string(),
            name: "British Shorthair Club".to_string(),
            description: "A place for the thick-coated, chunky-cheeked royalty.".to_string(),
            avatar: "https://images.unsplash.com/photo-1513245533132-31f507417b26?q=80&w=200"
                .to_string(),
            member_ids: strings(&["owner_luna", OWNER_ME_ID]),
            creator_id: "owner_luna".to_string(),
            breed_tag: Some("British Shorthair".to_string()),
        },
        Community {
            id: "comm_wild".to_string(),
            name: "Outdoor Adventurers".to_string(),
            description: "Leash training, hiking, and exploring with our wilder felines."
                .to_string(),
            avatar: "https://images.unsplash.com/photo-1533738699159-d0c68059bbd1?q=80&w=200"
                .to_string(),
            member_ids: strings(&["owner_bengal", OWNER_ME_ID]),
            creator_id: "owner_bengal".to_string(),
            breed_tag: None,
        },
    ]
}

#[allow(clippy::too_many_arguments)]
fn post(
    id: &str,
    cat_id: &str,
    owner_id: &str,
    post_type: PostType,
    content: &str,
    media: &str,
    age_ms: i64,
    likes: u64,
    tips: u64,
    tags: &[&str],
) -> Post {
    Post {
        id: id.to_string(),
        cat_id: cat_id.to_string(),
        owner_id: owner_id.to_string(),
        community_id: None,
        post_type,
        content: content.to_string(),
        media_url: Some(media.to_string()),
        timestamp: now_millis() - age_ms,
        likes,
        tips,
        comments: Vec::new(),
        risk_level: None,
        tags: strings(tags),
    }
}

pub fn posts() -> Vec<Post> {
    vec![
        post(
            "p1",
            "cat_luna",
            "owner_luna",
            PostType::Daily,
            "Just staring at a wall for 3 hours. It's an art form, really. You wouldn't understand the depth of this gray texture. #LifeOfLuna #CatArt",
            "https://images.unsplash.com/photo-1514888286974-6c03e2ca1dba?q=80&w=800",
            HOUR_MS,
            124,
            45,
            &["Daily", "LazyCat", "Art"],
        ),
        post(
            "p2",
            "cat_leo",
            "owner_bengal",
            PostType::CareTips,
            "Pro Tip: If you're leash training your Bengal, start with the harness at dinner time. Positive reinforcement is key! Leo now associates the harness with his favorite treats. 🧗‍♂️🐾",
            "https://images.unsplash.com/photo-1513360371669-4adaaee41413?q=80&w=800",
            2 * HOUR_MS,
            89,
            200,
            &["CareTips", "Training", "Bengal"],
        ),
        post(
            "p3",
            "cat_shadow",
            "owner_sphynx",
            PostType::Daily,
            "Found a sunbeam. It's the highest honor a Sphynx can achieve. Who needs fur when you have 100% efficient heat absorption? ☀️🛋️",
            "https://images.unsplash.com/photo-1520315342629-6ea920342047?q=80&w=800",
            3 * HOUR_MS,
            256,
            150,
            &["Daily", "SleepingCat", "Sunlight"],
        ),
        post(
            "p4",
            "cat_mochi",
            OWNER_ME_ID,
            PostType::Problem,
            "Mochi has been refusing his favorite wet food lately. He just looks at it and walks away... anyone else experiencing a 'hunger strike' this week? Could it be the new bowl? 🥣🤔",
            "https://images.unsplash.com/photo-1548247416-ec66f4900b2e?q=80&w=800",
            4 * HOUR_MS,
            32,
            10,
            &["Problem", "Feeding", "AdviceWanted"],
        ),
        post(
            "p5",
            "cat_titan",
            "owner_titan",
            PostType::Daily,
            "Perspective: Titan is 5 years old and still doesn't realize he's longer than the dining table. Big cats = big problems (but also big cuddles). 🦁❤️",
            "https://images.unsplash.com/photo-1533738363-b7f9aef128ce?q=80&w=800",
            DAY_MS,
            540,
            800,
            &["MaineCoon", "GiantCat", "Funny"],
        ),
    ]
}

pub fn products() -> Vec<Product> {
    vec![
        Product {
            id: "pr1".to_string(),
            name: "Organic Salmon Bites".to_string(),
            usd_price: 12.99,
            cat_coin_price: 500,
            category: ProductCategory::Food,
            image_url: "https://images.unsplash.com/photo-1589924691106-07c263544129?q=80&w=400"
                .to_string(),
            description: "Grain-free wild salmon treats for sensitive stomachs. Rich in Omega-3."
                .to_string(),
            reviews: Vec::new(),
        },
        Product {
            id: "pr2".to_string(),
            name: "Velvet Winter Cape".to_string(),
            usd_price: 24.50,
            cat_coin_price: 1200,
            category: ProductCategory::Clothes,
            image_url: "https://images.unsplash.com/photo-1548546738-8509cb246ed3?q=80&w=400"
                .to_string(),
            description:
                "Ultra-soft lining for hairless cats or chilly kittens. Stylish and functional."
                    .to_string(),
            reviews: Vec::new(),
        },
        Product {
            id: "pr3".to_string(),
            name: "Smart Laser Tower".to_string(),
            usd_price: 35.00,
            cat_coin_price: 2000,
            category: ProductCategory::Gear,
            image_url: "https://images.unsplash.com/photo-1608501078713-8e445a709b39?q=80&w=400"
                .to_string(),
            description: "Automated 360-degree laser play. Keep your indoor cat active and happy."
                .to_string(),
            reviews: Vec::new(),
        },
    ]
}

pub fn challenges() -> Vec<CatChallenge> {
    let now = now_millis();
    vec![
        CatChallenge {
            id: "ch1".to_string(),
            title: "Sleeping Beauty 😴".to_string(),
            description: "Post a photo of your cat sleeping to win a big bonus!".to_string(),
            reward: 50,
            tag: "#SleepingCat".to_string(),
            is_active: true,
            end_date: now + 2 * DAY_MS,
        },
        CatChallenge {
            id: "ch2".to_string(),
            title: "Outdoor Explorer 🧭".to_string(),
            description: "Show us your cat on a leash or exploring the garden!".to_string(),
            reward: 100,
            tag: "#AdventureCat".to_string(),
            is_active: true,
            end_date: now + 5 * DAY_MS,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_fixture_ids_are_unique() {
        let owner_ids: HashSet<_> = owners().into_iter().map(|o| o.id).collect();
        assert_eq!(owner_ids.len(), 5);

        let post_ids: HashSet<_> = posts().into_iter().map(|p| p.id).collect();
        assert_eq!(post_ids.len(), 5);
    }

    #[test]
    fn test_every_owner_has_a_cat() {
        assert!(owners().iter().all(|o| o.primary_cat().is_some()));
    }

    #[test]
    fn test_seed_posts_are_in_the_past() {
        let now = now_millis();
        assert!(posts().iter().all(|p| p.timestamp < now));
    }
}
