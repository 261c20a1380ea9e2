use anyhow::{Context, Result};
use application::config::AppConfig;
use application::drafting::TriageCategory;
use application::{CatCircleApp, DraftOutcome, DraftStyle, NewPost};
use console::style;
use domain::PostType;
use llm::check_api_key;
use std::io::{self, Write};

use crate::progress::{with_spinner, ProgressType};
use crate::render;

async fn ask_once(app: &mut CatCircleApp, question: &str) -> Result<()> {
    let reply = with_spinner(
        ProgressType::Ai,
        "Consulting the feline cloud...",
        app.ask_assistant(question),
    )
    .await?;
    if let Some(reply) = reply {
        render::assistant_reply(&reply, &app.state().products);
    }
    Ok(())
}

pub async fn ask(app: &mut CatCircleApp, question: Option<String>) -> Result<()> {
    if let Some(question) = question {
        return ask_once(app, &question).await;
    }

    if let Some(greeting) = app.assistant().messages().first() {
        println!("{} {}", style("🐾 Assistant:").magenta().bold(), greeting.content);
    }
    println!(
        "{}",
        style("Type a question, 'share' to post the last advice, or 'exit'.").dim()
    );

    loop {
        print!("{} ", style("You:").green().bold());
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        match input.trim() {
            "" => continue,
            "exit" | "quit" => break,
            "share" => share_last(app).await?,
            question => ask_once(app, question).await?,
        }
        println!();
    }
    Ok(())
}

async fn share_last(app: &mut CatCircleApp) -> Result<()> {
    match app.share_last_advice().await? {
        Some(post) => render::success(&format!("Shared to the feed as {} (+10 coins)", post.id)),
        None => render::warning("No advice to share yet"),
    }
    Ok(())
}

pub async fn share(app: &mut CatCircleApp, question: &str) -> Result<()> {
    ask_once(app, question).await?;
    share_last(app).await
}

pub async fn draft(
    app: &mut CatCircleApp,
    content: &str,
    post_type: PostType,
    style_choice: DraftStyle,
    publish: bool,
) -> Result<()> {
    let drafting = app.drafting_service()?;
    let outcome = with_spinner(
        ProgressType::Ai,
        &format!("Polishing ({})...", style_choice),
        drafting.draft_post(content, post_type, style_choice),
    )
    .await?;

    match outcome {
        DraftOutcome::Draft(text) => {
            println!("{}", style("Draft").bold());
            println!("  {}", text.replace('\n', "\n  "));
            if publish {
                let post = app.create_post(NewPost::new(post_type, text)).await?;
                render::success(&format!("Published {} (+10 coins)", post.id));
            }
        }
        DraftOutcome::RedirectToAssistant { triage, warning } => {
            render::warning(warning);
            if let Some(reasoning) = triage.reasoning {
                println!("  {}", style(reasoning).dim());
            }
            println!("  Try: catcircle ask \"{}\"", content);
        }
    }
    Ok(())
}

pub async fn triage(app: &CatCircleApp, query: &str) -> Result<()> {
    let drafting = app.drafting_service()?;
    let result = with_spinner(ProgressType::Ai, "Triaging...", drafting.triage_query(query)).await?;

    let category = match result.category {
        TriageCategory::Health => style("HEALTH").red().bold(),
        TriageCategory::Behavior => style("BEHAVIOR").cyan().bold(),
    };
    println!("Category: {}", category);
    println!("Risk: {}", result.risk_level);
    println!(
        "See a vet: {}",
        if result.should_go_to_vet { "yes" } else { "no" }
    );
    println!("Suggested post type: {}", result.suggested_post_type);
    if let Some(reasoning) = result.reasoning {
        println!("{}", style(reasoning).dim());
    }
    Ok(())
}

pub async fn check_key(config: &AppConfig) -> Result<()> {
    let provider = config
        .assistant
        .gemini_provider(&config.assistant.fast_model)?;

    let spinner = ProgressType::Ai.start("Listing models...");
    match check_api_key(&provider).await {
        Ok(report) => {
            spinner.success(&format!("Key works with {}", report.model));
            println!("  {}", style(report.sample.trim()).dim());
            Ok(())
        }
        Err(e) => {
            spinner.clear();
            Err(e).context("Gemini API key check failed")
        }
    }
}
