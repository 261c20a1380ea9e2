use anyhow::Result;
use application::CatCircleApp;
use console::style;

use crate::progress::{with_spinner, ProgressType};
use crate::render;

pub async fn follow(app: &mut CatCircleApp, owner_id: &str) -> Result<()> {
    if app.toggle_follow(owner_id).await? {
        render::success(&format!("Following {}", owner_id));
    } else {
        render::success(&format!("Unfollowed {}", owner_id));
    }
    Ok(())
}

pub async fn matches(app: &CatCircleApp) -> Result<()> {
    let matches = with_spinner(
        ProgressType::Api,
        "Finding cat friends...",
        app.api().get_recommended_matches(),
    )
    .await?;

    for m in &matches {
        render::recommended_match(m);
    }
    Ok(())
}

pub async fn chat(
    app: &mut CatCircleApp,
    peer_id: Option<String>,
    message: Option<String>,
    image: Option<String>,
) -> Result<()> {
    let me = match app.current_user() {
        Some(user) => user.id.clone(),
        None => return Err(domain::DomainError::NotSignedIn.into()),
    };

    let Some(peer_id) = peer_id else {
        let chats = app.chat_list();
        if chats.is_empty() {
            render::warning("No conversations yet");
        }
        for (peer, last) in chats {
            print!("{} ", style(peer).bold());
            render::chat_message(last, &me);
        }
        return Ok(());
    };

    if message.is_some() || image.is_some() {
        let sent = app
            .send_direct_message(&peer_id, message.as_deref(), image.as_deref())
            .await?;
        for msg in &sent {
            render::chat_message(msg, &me);
        }
    } else {
        for msg in app.conversation(&peer_id) {
            render::chat_message(msg, &me);
        }
    }
    Ok(())
}

pub fn group(
    app: &mut CatCircleApp,
    community_id: &str,
    message: Option<String>,
    image: Option<String>,
) -> Result<()> {
    let me = app.current_user().map(|u| u.id.clone()).unwrap_or_default();
    if message.is_some() || image.is_some() {
        app.send_group_message(community_id, message.as_deref(), image.as_deref())?;
    }

    let community = app.community(community_id)?;
    println!("{}", style(&community.name).bold());
    for msg in app.group_conversation(community_id) {
        render::chat_message(msg, &me);
    }
    Ok(())
}

pub fn communities(app: &CatCircleApp, mine: bool) -> Result<()> {
    let me = app.current_user().map(|u| u.id.as_str());
    let list = if mine {
        app.my_communities()?
    } else {
        app.communities().iter().collect()
    };
    for community in list {
        render::community(community, me);
    }
    Ok(())
}

pub async fn create_community(app: &mut CatCircleApp, name: &str, description: &str) -> Result<()> {
    let community = app.create_community(name, description).await?;
    render::community(&community, app.current_user().map(|u| u.id.as_str()));
    render::success("Community created");
    Ok(())
}

pub fn join(app: &mut CatCircleApp, community_id: &str, leave: bool) -> Result<()> {
    let changed = if leave {
        app.leave_community(community_id)?
    } else {
        app.join_community(community_id)?
    };
    match (leave, changed) {
        (false, true) => render::success("Joined"),
        (false, false) => render::warning("Already a member"),
        (true, true) => render::success("Left the community"),
        (true, false) => render::warning("Not a member"),
    }
    Ok(())
}
