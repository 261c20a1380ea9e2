//! Subcommand handlers

pub mod account;
pub mod assistant;
pub mod feed;
pub mod mall;
pub mod social;

use anyhow::Result;
use application::CatCircleApp;
use domain::entities::Gender;
use domain::PostType;

use crate::Commands;

pub fn parse_post_type(value: &str) -> Result<PostType, String> {
    PostType::parse(value)
        .ok_or_else(|| format!("Unknown post type '{}', expected daily, care_tips or problem", value))
}

pub async fn dispatch(app: &mut CatCircleApp, command: Commands) -> Result<()> {
    match command {
        Commands::Init => account::init(app),
        Commands::Login { identifier, token } => account::login(app, &identifier, token).await,
        Commands::Signup {
            name,
            email,
            cat,
            breed,
        } => account::signup(app, name, email, cat, breed).await,
        Commands::Logout => account::logout(app),
        Commands::Whoami => account::whoami(app),
        Commands::Profile {
            name,
            bio,
            avatar,
            interests,
        } => account::profile(app, name, bio, avatar, interests).await,
        Commands::CatAdd {
            name,
            breed,
            age,
            male,
            neutered,
            personality,
            health_tags,
        } => {
            let mut cat = application::NewCat::new(name, breed);
            cat.age = age;
            cat.gender = if male { Gender::Male } else { Gender::Female };
            cat.neutered = neutered;
            cat.personality = personality;
            cat.health_tags = health_tags;
            account::cat_add(app, cat).await
        }
        Commands::CatRemove { cat_id } => account::cat_remove(app, &cat_id).await,

        Commands::Feed { search, limit } => feed::show(app, search.as_deref(), limit),
        Commands::Post {
            content,
            post_type,
            tags,
            cat,
            media,
            community,
        } => {
            let draft = application::NewPost {
                post_type,
                content,
                cat_id: cat,
                tags,
                media_url: media,
                community_id: community,
            };
            feed::publish(app, draft).await
        }
        Commands::Like { post_id } => feed::like(app, &post_id),
        Commands::Comment { post_id, text } => feed::comment(app, &post_id, &text),
        Commands::Tip { post_id, amount } => feed::tip(app, &post_id, amount).await,

        Commands::Ask { question } => assistant::ask(app, question).await,
        Commands::Share { question } => assistant::share(app, &question).await,
        Commands::Draft {
            content,
            post_type,
            style,
            publish,
        } => assistant::draft(app, &content, post_type, style, publish).await,
        Commands::Triage { query } => assistant::triage(app, &query).await,

        Commands::Products => mall::products(app),
        Commands::Buy {
            product_id,
            coins,
            card_name,
            card_number,
        } => mall::buy(app, &product_id, coins, card_name, card_number).await,
        Commands::Review {
            product_id,
            rating,
            comment,
        } => mall::review(app, &product_id, rating, &comment),
        Commands::Topup {
            coins,
            card_name,
            card_number,
        } => mall::top_up(app, coins, card_name, card_number).await,
        Commands::Purchases => mall::purchases(app),

        Commands::Follow { owner_id } => social::follow(app, &owner_id).await,
        Commands::Matches => social::matches(app).await,
        Commands::Chat {
            peer_id,
            message,
            image,
        } => social::chat(app, peer_id, message, image).await,
        Commands::Group {
            community_id,
            message,
            image,
        } => social::group(app, &community_id, message, image),
        Commands::Communities { mine } => social::communities(app, mine),
        Commands::CommunityCreate { name, description } => {
            social::create_community(app, &name, &description).await
        }
        Commands::Join {
            community_id,
            leave,
        } => social::join(app, &community_id, leave),

        // Handled before boot
        Commands::CheckKey => Ok(()),
    }
}
