use anyhow::{bail, Result};
use application::payment::coin_pack;
use application::{CardDetails, CatCircleApp};
use domain::PaymentMethod;

use crate::progress::ProgressType;
use crate::render;

pub fn products(app: &CatCircleApp) -> Result<()> {
    for product in app.products() {
        render::product(product);
    }
    if let Some(user) = app.current_user() {
        println!();
        println!("Your balance: 🪙 {}", user.coin_balance);
    }
    Ok(())
}

fn card(name: Option<String>, number: Option<String>) -> CardDetails {
    CardDetails::new(name.unwrap_or_default(), number.unwrap_or_default())
}

pub async fn buy(
    app: &mut CatCircleApp,
    product_id: &str,
    coins: bool,
    card_name: Option<String>,
    card_number: Option<String>,
) -> Result<()> {
    let record = if coins {
        app.purchase(product_id, PaymentMethod::Coins).await?
    } else {
        let spinner = ProgressType::Payment.start("Processing payment...");
        let result = app
            .purchase_with_card(product_id, &card(card_name, card_number))
            .await;
        match result {
            Ok(record) => {
                spinner.success("Payment successful");
                record
            }
            Err(e) => {
                spinner.clear();
                return Err(e.into());
            }
        }
    };
    render::purchase(&record);
    render::success(&format!("{} is on its way!", record.product.name));
    Ok(())
}

pub fn review(app: &mut CatCircleApp, product_id: &str, rating: u8, comment: &str) -> Result<()> {
    app.add_review(product_id, rating, comment)?;
    let product = app.product(product_id)?;
    render::product(product);
    render::success("Thanks for your review!");
    Ok(())
}

pub async fn top_up(
    app: &mut CatCircleApp,
    coins: u64,
    card_name: String,
    card_number: String,
) -> Result<()> {
    let Some(pack) = coin_pack(coins) else {
        bail!("No coin pack of {} coins; choose 500, 1200, 3000 or 7000", coins);
    };

    let spinner = ProgressType::Payment.start(&format!("Paying ${:.2}...", pack.usd_price));
    let card = CardDetails::new(card_name, card_number);
    match app.top_up_with_card(pack.coins, pack.usd_price, &card).await {
        Ok(balance) => {
            spinner.success(&format!("Added 🪙 {}, balance {}", pack.coins, balance));
            Ok(())
        }
        Err(e) => {
            spinner.clear();
            Err(e.into())
        }
    }
}

pub fn purchases(app: &CatCircleApp) -> Result<()> {
    if app.purchases().is_empty() {
        render::warning("No purchases yet");
    }
    for record in app.purchases() {
        render::purchase(record);
    }
    Ok(())
}
