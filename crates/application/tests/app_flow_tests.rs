//! End-to-end flows against the local backend

use application::knowledge::{retrieve_context, FALLBACK_CONTEXT};
use application::{
    AiModels, AppConfig, AppError, CardDetails, CatCircleApp, DraftOutcome, DraftStyle,
    FixedRandom, NewCat, NewPost, SignUpForm,
};
use domain::constants::{ASSISTANT_SUMMARY_TAGS, POST_REWARD_COINS};
use domain::{fixtures, DomainError, PaymentMethod, PostType};
use llm::ScriptedModel;
use serde_json::json;
use std::sync::Arc;
use storage::LocalDb;

async fn boot_with(db: LocalDb, ai: Option<AiModels>) -> CatCircleApp {
    CatCircleApp::boot_with_rng(AppConfig::for_tests(), db, ai, Arc::new(FixedRandom(0)))
        .await
        .unwrap()
}

async fn signed_in(ai: Option<AiModels>) -> (CatCircleApp, LocalDb) {
    let db = LocalDb::in_memory();
    let mut app = boot_with(db.clone(), ai).await;
    app.sign_in(&fixtures::owner_me().account_name).await.unwrap();
    (app, db)
}

fn advice_reply() -> String {
    json!({
        "riskLevel": "Medium",
        "analysis": "Sudden scratching can mean fleas.",
        "actionableSteps": ["Check for fleas", "Wash bedding"],
        "citations": ["Skin"],
        "recommendedProductIds": ["pr1", "not-a-product"],
        "communitySummary": "Scratching? Check for fleas first."
    })
    .to_string()
}

#[test]
fn test_unmatched_query_uses_fallback_context() {
    let context = retrieve_context("xyzzy");
    assert_eq!(context, FALLBACK_CONTEXT);
    assert!(!context.is_empty());
}

#[tokio::test]
async fn test_shared_advice_is_fresh_care_tip() {
    let model = Arc::new(ScriptedModel::new("scripted").reply(advice_reply()));
    let (mut app, db) = signed_in(Some(AiModels::shared(model))).await;
    let balance = app.current_user().unwrap().coin_balance;

    let reply = app.ask_assistant("My cat keeps scratching").await.unwrap().unwrap();
    let metadata = reply.metadata.unwrap();
    assert_eq!(metadata.recommended_product_ids, vec!["pr1"]);

    let post = app.share_last_advice().await.unwrap().unwrap();
    assert_eq!(post.post_type, PostType::CareTips);
    assert_eq!(post.tags, ASSISTANT_SUMMARY_TAGS.to_vec());
    assert_eq!((post.likes, post.tips), (0, 0));
    assert!(post.comments.is_empty());
    assert!(post.content.starts_with("💡 AI Assistant Summary:\nScratching? Check for fleas first."));

    assert_eq!(app.posts()[0].id, post.id);
    assert_eq!(db.posts().unwrap()[0].id, post.id);
    assert_eq!(
        app.current_user().unwrap().coin_balance,
        balance + POST_REWARD_COINS
    );
}

#[tokio::test]
async fn test_assistant_failure_is_fallback_reply() {
    let model = Arc::new(ScriptedModel::new("scripted").fail(503, "overloaded"));
    let (mut app, _) = signed_in(Some(AiModels::shared(model))).await;

    let reply = app.ask_assistant("help").await.unwrap().unwrap();
    assert_eq!(reply.content, application::errors::ASSISTANT_FALLBACK_MESSAGE);
    assert!(app.share_last_advice().await.unwrap().is_none());
}

#[tokio::test]
async fn test_coin_purchase_needs_balance() {
    let (mut app, db) = signed_in(None).await;
    let expensive = app
        .products()
        .iter()
        .max_by_key(|p| p.cat_coin_price)
        .unwrap()
        .clone();
    let balance = expensive.cat_coin_price - 1;
    let mut me = app.current_user().unwrap().clone();
    me.coin_balance = balance;
    db.save_user(&me).unwrap();
    app.sign_in(&me.account_name).await.unwrap();

    let err = app
        .purchase(&expensive.id, PaymentMethod::Coins)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::Domain(DomainError::InsufficientCoins { .. })
    ));
    assert_eq!(app.current_user().unwrap().coin_balance, balance);
    assert!(app.purchases().is_empty());
}

#[tokio::test]
async fn test_purchases_are_prepended_and_persisted() {
    let (mut app, db) = signed_in(None).await;
    let balance = app.current_user().unwrap().coin_balance;
    let cheapest = app
        .products()
        .iter()
        .min_by_key(|p| p.cat_coin_price)
        .unwrap()
        .clone();

    app.purchase(&cheapest.id, PaymentMethod::Coins).await.unwrap();
    let card = CardDetails::new("Jane Doe", "4242 4242 4242 4242");
    let usd = app.purchase_with_card(&cheapest.id, &card).await.unwrap();

    assert_eq!(app.purchases()[0].id, usd.id);
    assert_eq!(
        app.current_user().unwrap().coin_balance,
        balance - cheapest.cat_coin_price
    );
    assert_eq!(db.purchases(fixtures::OWNER_ME_ID).unwrap().len(), 2);

    let err = app
        .purchase_with_card(&cheapest.id, &CardDetails::new("", "4242"))
        .await
        .unwrap_err();
    assert!(err.is_validation());
    assert_eq!(app.purchases().len(), 2);
}

#[tokio::test]
async fn test_duplicate_email_sign_up_creates_nothing() {
    let db = LocalDb::in_memory();
    let mut app = boot_with(db.clone(), None).await;
    let form = SignUpForm {
        account_name: "Pixel's Human".into(),
        email: "pixel@example.com".into(),
        cat_name: "Pixel".into(),
        cat_breed: "Sphynx".into(),
    };
    app.sign_up(form.clone()).await.unwrap();
    app.sign_out().unwrap();
    let users = db.users().unwrap().len();

    let err = app
        .sign_up(SignUpForm {
            email: "PIXEL@example.com".into(),
            ..form
        })
        .await
        .unwrap_err();
    assert!(err.user_message().contains("already registered"));
    assert_eq!(db.users().unwrap().len(), users);
    assert!(app.current_user().is_none());
}

#[tokio::test]
async fn test_feed_engagement() {
    let (mut app, db) = signed_in(None).await;
    let post = app
        .create_post(NewPost::new(PostType::Daily, "Sunbeam nap").with_tags(["#Sunny"]))
        .await
        .unwrap();
    assert_eq!(post.tags, vec!["Sunny", "daily"]);

    assert_eq!(app.like_post(&post.id).unwrap(), 1);
    app.comment_on_post(&post.id, "So cute").unwrap();
    assert!(app.comment_on_post(&post.id, "  ").is_err());

    let balance = app.current_user().unwrap().coin_balance;
    assert_eq!(app.tip_post(&post.id, 5).await.unwrap(), 5);
    assert_eq!(app.current_user().unwrap().coin_balance, balance - 5);
    assert!(app.tip_post(&post.id, balance + 1).await.is_err());
    assert!(app.tip_post(&post.id, 0).await.is_err());

    let stored = db.posts().unwrap();
    assert_eq!(stored[0].likes, 1);
    assert_eq!(stored[0].comments.len(), 1);
    assert_eq!(stored[0].tips, 5);

    let hits = app.search_feed("#sunny").unwrap();
    assert_eq!(hits.len(), 1);
    assert!(app.search_feed("#sun").unwrap().is_empty());
}

#[tokio::test]
async fn test_follow_toggle_persists() {
    let (mut app, db) = signed_in(None).await;
    assert!(app.toggle_follow("owner_luna").await.unwrap());
    assert_eq!(db.following(fixtures::OWNER_ME_ID).unwrap(), vec!["owner_luna"]);
    assert!(!app.toggle_follow("owner_luna").await.unwrap());
    assert!(db.following(fixtures::OWNER_ME_ID).unwrap().is_empty());
}

#[tokio::test]
async fn test_direct_message_gets_auto_reply() {
    let (mut app, db) = signed_in(None).await;
    let sent = app
        .send_direct_message("owner_luna", Some("Hi Luna!"), None)
        .await
        .unwrap();

    assert_eq!(sent.len(), 2);
    assert_eq!(sent[1].sender_id, "owner_luna");
    assert_eq!(sent[1].text.as_deref(), Some("Meow! 🐾"));
    assert_eq!(app.conversation("owner_luna").len(), 2);
    assert_eq!(app.chat_list()[0].0, "owner_luna");
    assert_eq!(
        db.direct_messages(fixtures::OWNER_ME_ID).unwrap()["owner_luna"].len(),
        2
    );

    assert!(app.send_direct_message("owner_luna", Some(" "), None).await.is_err());
    assert!(app.send_direct_message("owner_ghost", Some("hi"), None).await.is_err());
}

#[tokio::test]
async fn test_communities_and_group_chat() {
    let (mut app, db) = signed_in(None).await;
    let community = app.create_community("Night Owls", "3am zoomies").await.unwrap();
    assert!(app.my_communities().unwrap().iter().any(|c| c.id == community.id));
    assert!(!app.join_community(&community.id).unwrap());
    assert!(app.leave_community(&community.id).unwrap());

    app.send_group_message(&community.id, Some("Anyone awake?"), None)
        .unwrap();
    assert_eq!(app.group_conversation(&community.id).len(), 1);
    assert_eq!(db.group_messages().unwrap()[&community.id].len(), 1);
    assert!(db.communities().unwrap().iter().any(|c| c.id == community.id));
}

#[tokio::test]
async fn test_profile_changes_are_synced() {
    let (mut app, db) = signed_in(None).await;
    let cat = app.add_cat(NewCat::new("Pixel", "Sphynx")).await.unwrap();
    app.top_up(100).await.unwrap();

    let stored = db.user(fixtures::OWNER_ME_ID).unwrap().unwrap();
    assert!(stored.cats.iter().any(|c| c.id == cat.id));
    assert_eq!(stored.coin_balance, app.current_user().unwrap().coin_balance);

    app.remove_cat(&cat.id).await.unwrap();
    assert!(app.remove_cat(&cat.id).await.is_err());
    assert!(app.top_up(0).await.is_err());
}

#[tokio::test]
async fn test_reviews_survive_restart() {
    let (mut app, db) = signed_in(None).await;
    let product_id = app.products()[0].id.clone();
    app.add_review(&product_id, 5, "Loved it").unwrap();
    assert!(app.add_review(&product_id, 6, "Too good").is_err());

    let app = boot_with(db, None).await;
    assert_eq!(app.product(&product_id).unwrap().reviews[0].comment, "Loved it");
}

#[tokio::test]
async fn test_problem_draft_with_health_risk_is_redirected() {
    let model = Arc::new(ScriptedModel::new("fast").reply(
        json!({
            "category": "HEALTH",
            "riskLevel": "High",
            "shouldGoToVet": true,
            "suggestedPostType": "PROBLEM"
        })
        .to_string(),
    ));
    let (app, _) = signed_in(Some(AiModels::shared(model))).await;

    let outcome = app
        .drafting_service()
        .unwrap()
        .draft_post("Blood in urine", PostType::Problem, DraftStyle::Pro)
        .await
        .unwrap();
    assert!(matches!(outcome, DraftOutcome::RedirectToAssistant { .. }));
}

#[tokio::test]
async fn test_operations_need_sign_in() {
    let mut app = boot_with(LocalDb::in_memory(), None).await;
    let err = app
        .create_post(NewPost::new(PostType::Daily, "hello"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Domain(DomainError::NotSignedIn)));
    assert!(app.top_up(10).await.is_err());
}
