use anyhow::Result;
use application::{CatCircleApp, NewPost};
use console::style;

use crate::progress::{with_spinner, ProgressType};
use crate::render;

pub fn show(app: &CatCircleApp, search: Option<&str>, limit: usize) -> Result<()> {
    let owners = app.known_owners()?;
    let posts = app.search_feed(search.unwrap_or(""))?;

    if search.is_none() {
        let tags: Vec<String> = app.trending_tags().iter().map(|t| format!("#{}", t)).collect();
        println!("{} {}", style("Trending:").bold(), style(tags.join(" ")).blue());
        println!();
    }
    if posts.is_empty() {
        render::warning("No posts found");
        return Ok(());
    }

    for post in posts.into_iter().take(limit) {
        let author = domain::search::resolve_owner(&owners, &post.owner_id);
        render::post(post, author);
    }
    Ok(())
}

pub async fn publish(app: &mut CatCircleApp, draft: NewPost) -> Result<()> {
    let post = with_spinner(ProgressType::Api, "Publishing...", app.create_post(draft)).await?;
    let author = app.current_user().cloned();
    render::post(&post, author.as_ref());
    render::success("Posted! +10 coins");
    Ok(())
}

pub fn like(app: &mut CatCircleApp, post_id: &str) -> Result<()> {
    let likes = app.like_post(post_id)?;
    render::success(&format!("❤ {}", likes));
    Ok(())
}

pub fn comment(app: &mut CatCircleApp, post_id: &str, text: &str) -> Result<()> {
    app.comment_on_post(post_id, text)?;
    render::success("Comment added");
    Ok(())
}

pub async fn tip(app: &mut CatCircleApp, post_id: &str, amount: u64) -> Result<()> {
    let total = app.tip_post(post_id, amount).await?;
    let balance = app.current_user().map(|u| u.coin_balance).unwrap_or(0);
    render::success(&format!(
        "Tipped 🪙 {} (post total {}, your balance {})",
        amount, total, balance
    ));
    Ok(())
}
