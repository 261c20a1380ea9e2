//! Terminal output for CatCircle records

use chrono::{Local, TimeZone};
use console::style;
use domain::entities::{
    AssistantMessage, ChatMessage, Community, OwnerProfile, Post, PostType, Product,
    PurchaseRecord, RecommendedMatch,
};
use domain::{PaymentMethod, RiskLevel, Timestamp};

pub fn timestamp(ms: Timestamp) -> String {
    Local
        .timestamp_millis_opt(ms)
        .single()
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| ms.to_string())
}

fn post_type_label(post_type: PostType) -> String {
    match post_type {
        PostType::Daily => style("DAILY").cyan().to_string(),
        PostType::CareTips => style("CARE TIPS").green().to_string(),
        PostType::Problem => style("PROBLEM").red().to_string(),
    }
}

fn risk_label(risk: RiskLevel) -> String {
    match risk {
        RiskLevel::Low => style("Low").green().bold().to_string(),
        RiskLevel::Medium => style("Medium").yellow().bold().to_string(),
        RiskLevel::High => style("High").red().bold().to_string(),
    }
}

pub fn post(post: &Post, author: Option<&OwnerProfile>) {
    let name = author.map(|a| a.account_name.as_str()).unwrap_or("Unknown");
    let cat = author
        .and_then(|a| domain::search::resolve_cat(a, &post.cat_id))
        .map(|c| format!(" & {}", c.name))
        .unwrap_or_default();

    println!(
        "{} {}{} {} {}",
        style(&post.id).dim(),
        style(name).bold(),
        style(cat).bold(),
        post_type_label(post.post_type),
        style(timestamp(post.timestamp)).dim()
    );
    println!("  {}", post.content.replace('\n', "\n  "));
    if let Some(media) = &post.media_url {
        println!("  {} {}", style("🖼").dim(), style(media).underlined());
    }
    if !post.tags.is_empty() {
        let tags: Vec<String> = post.tags.iter().map(|t| format!("#{}", t)).collect();
        println!("  {}", style(tags.join(" ")).blue());
    }
    println!(
        "  ❤ {}  💬 {}  🪙 {}",
        post.likes,
        post.comments.len(),
        post.tips
    );
    println!();
}

pub fn owner(owner: &OwnerProfile) {
    println!(
        "{} {} {}",
        style(&owner.account_name).bold(),
        style(format!("({})", owner.id)).dim(),
        style(format!("🪙 {}", owner.coin_balance)).yellow()
    );
    if !owner.bio.is_empty() {
        println!("  {}", owner.bio);
    }
    println!(
        "  {} followers · {} following",
        owner.followers_count, owner.following_count
    );
    if !owner.interests.is_empty() {
        println!("  Interests: {}", owner.interests.join(", "));
    }
    for cat in &owner.cats {
        println!(
            "  🐈 {} {} · {} · {}y {}",
            style(&cat.name).bold(),
            style(format!("({})", cat.id)).dim(),
            cat.breed,
            cat.age,
            if cat.personality.is_empty() {
                String::new()
            } else {
                format!("· {}", cat.personality.join(", "))
            }
        );
    }
}

pub fn recommended_match(m: &RecommendedMatch) {
    println!(
        "{} {} {}",
        style(format!("{:>3}%", m.match_score.value())).magenta().bold(),
        style(&m.owner.account_name).bold(),
        style(format!("({})", m.owner.id)).dim()
    );
    println!("     {}", style(&m.reason).dim());
}

pub fn product(product: &Product) {
    let rating = product
        .average_rating()
        .map(|r| format!("★ {:.1} ({})", r, product.reviews.len()))
        .unwrap_or_else(|| "no reviews".to_string());
    println!(
        "{} {} {} · {} · {}",
        style(&product.id).dim(),
        style(&product.name).bold(),
        style(format!("${:.2}", product.usd_price)).green(),
        style(format!("🪙 {}", product.cat_coin_price)).yellow(),
        style(rating).dim()
    );
    println!("  {}", product.description);
}

pub fn purchase(record: &PurchaseRecord) {
    let paid = match record.payment_method {
        PaymentMethod::Usd => format!("${:.2}", record.amount_paid),
        PaymentMethod::Coins => format!("🪙 {}", record.amount_paid),
    };
    println!(
        "{} {} {} {}",
        style(timestamp(record.timestamp)).dim(),
        style(&record.product.name).bold(),
        paid,
        style(format!("({})", record.id)).dim()
    );
}

pub fn community(community: &Community, me: Option<&str>) {
    let member = me.map(|id| community.is_member(id)).unwrap_or(false);
    println!(
        "{} {} {} {}",
        style(&community.id).dim(),
        style(&community.name).bold(),
        style(format!("{} members", community.member_ids.len())).dim(),
        if member {
            style("joined").green().to_string()
        } else {
            String::new()
        }
    );
    if !community.description.is_empty() {
        println!("  {}", community.description);
    }
}

pub fn chat_message(message: &ChatMessage, me: &str) {
    let who = if message.sender_id == me {
        style("you".to_string()).green().bold()
    } else {
        style(message.sender_id.clone()).cyan().bold()
    };
    let mut body = message.text.clone().unwrap_or_default();
    if let Some(image) = &message.image_url {
        if !body.is_empty() {
            body.push(' ');
        }
        body.push_str(&format!("[image {}]", image));
    }
    println!("{} {} {}", style(timestamp(message.timestamp)).dim(), who, body);
}

/// Assistant reply with its advice card
pub fn assistant_reply(message: &AssistantMessage, products: &[Product]) {
    println!("{} {}", style("🐾 Assistant:").magenta().bold(), message.content);
    let Some(meta) = &message.metadata else {
        return;
    };

    println!("  Risk: {}", risk_label(meta.risk_level));
    if !meta.actionable_steps.is_empty() {
        println!("  {}", style("Next steps").bold());
        for step in &meta.actionable_steps {
            println!("   • {}", step);
        }
    }
    if !meta.citations.is_empty() {
        println!("  {} {}", style("Sources:").dim(), meta.citations.join(", "));
    }
    for id in &meta.recommended_product_ids {
        if let Some(p) = products.iter().find(|p| &p.id == id) {
            println!("  🛍  {} ({}) ${:.2}", p.name, p.id, p.usd_price);
        }
    }
    for question in &meta.follow_up_questions {
        println!("  ? {}", style(question).italic());
    }
}

pub fn success(message: &str) {
    println!("{} {}", style("[✓]").green().bold(), message);
}

pub fn warning(message: &str) {
    println!("{} {}", style("[!]").yellow().bold(), message);
}

pub fn error(message: &str) {
    eprintln!("{} {}", style("Error:").red().bold(), style(message).red());
}
