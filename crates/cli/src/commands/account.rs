use anyhow::Result;
use application::{CatCircleApp, NewCat, ProfilePatch, SignUpForm};
use domain::constants::{is_known_breed, CAT_BREEDS};

use crate::progress::{with_spinner, ProgressType};
use crate::render;

pub fn init(app: &CatCircleApp) -> Result<()> {
    let state = app.state();
    render::success(&format!(
        "CatCircle ready: {} posts, {} communities, {} products",
        state.posts.len(),
        state.communities.len(),
        state.products.len()
    ));
    if app.api().is_remote() {
        render::warning("Remote backend configured; local data is only a fallback");
    }
    Ok(())
}

pub async fn login(app: &mut CatCircleApp, identifier: &str, token: Option<String>) -> Result<()> {
    if let Some(token) = token.as_deref() {
        app.set_token(Some(token))?;
    }
    let user = with_spinner(ProgressType::Api, "Signing in...", app.sign_in(identifier))
        .await?
        .clone();
    render::success(&format!("Welcome back, {}!", user.account_name));
    Ok(())
}

pub async fn signup(
    app: &mut CatCircleApp,
    account_name: String,
    email: String,
    cat_name: String,
    cat_breed: String,
) -> Result<()> {
    let form = SignUpForm {
        account_name,
        email,
        cat_name,
        cat_breed,
    };
    let user = with_spinner(ProgressType::Api, "Creating account...", app.sign_up(form))
        .await?
        .clone();
    render::success(&format!(
        "Welcome to CatCircle, {}! You received 🪙 {} to get started.",
        user.account_name, user.coin_balance
    ));
    if let Some(cat) = user.cats.first() {
        warn_unlisted_breed(&cat.breed);
    }
    Ok(())
}

pub fn logout(app: &mut CatCircleApp) -> Result<()> {
    app.set_token(None)?;
    app.sign_out()?;
    render::success("Signed out");
    Ok(())
}

pub fn whoami(app: &CatCircleApp) -> Result<()> {
    match app.current_user() {
        Some(user) => render::owner(user),
        None => render::warning("Not signed in. Use `catcircle login <name>` or `catcircle signup`."),
    }
    Ok(())
}

pub async fn profile(
    app: &mut CatCircleApp,
    account_name: Option<String>,
    bio: Option<String>,
    avatar: Option<String>,
    interests: Option<Vec<String>>,
) -> Result<()> {
    let patch = ProfilePatch {
        account_name,
        bio,
        avatar,
        interests,
    };
    if patch.is_empty() {
        return whoami(app);
    }
    let user = app.update_profile(patch).await?;
    render::owner(user);
    Ok(())
}

fn warn_unlisted_breed(breed: &str) {
    if !is_known_breed(breed) {
        render::warning(&format!(
            "'{}' is not a listed breed ({})",
            breed,
            CAT_BREEDS.join(", ")
        ));
    }
}

pub async fn cat_add(app: &mut CatCircleApp, cat: NewCat) -> Result<()> {
    let cat = app.add_cat(cat).await?;
    render::success(&format!("{} joined the family ({})", cat.name, cat.id));
    warn_unlisted_breed(&cat.breed);
    Ok(())
}

pub async fn cat_remove(app: &mut CatCircleApp, cat_id: &str) -> Result<()> {
    let cat = app.remove_cat(cat_id).await?;
    render::success(&format!("Removed {}", cat.name));
    Ok(())
}
