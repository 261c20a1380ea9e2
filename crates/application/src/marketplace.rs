//! Cat Mall: catalogue, purchases, reviews and coin top-ups

use domain::entities::{PaymentMethod, Product, ProductReview, PurchaseRecord};
use domain::{Coins, DomainError};
use tracing::info;

use crate::app::CatCircleApp;
use crate::errors::AppResult;
use crate::payment::{CardDetails, PaymentFlow};

impl CatCircleApp {
    pub fn products(&self) -> &[Product] {
        &self.state.products
    }

    pub fn product(&self, product_id: &str) -> AppResult<&Product> {
        self.state
            .products
            .iter()
            .find(|p| p.id == product_id)
            .ok_or_else(|| DomainError::ProductNotFound(product_id.to_string()).into())
    }

    pub fn purchases(&self) -> &[PurchaseRecord] {
        &self.state.purchases
    }

    /// Record a purchase. Coin payments are debited first and nothing is
    /// recorded when the balance is short; USD leaves the balance alone.
    pub async fn purchase(
        &mut self,
        product_id: &str,
        method: PaymentMethod,
    ) -> AppResult<PurchaseRecord> {
        let product = self.product(product_id)?.clone();
        let user = self.require_user_mut()?;
        if method == PaymentMethod::Coins {
            user.debit(product.cat_coin_price)?;
        }
        let user_id = user.id.clone();

        let record = PurchaseRecord::new(product, method);
        self.state.purchases.insert(0, record.clone());
        self.db.save_purchases(&user_id, &self.state.purchases)?;
        info!(
            product_id,
            method = %method,
            amount = record.amount_paid,
            "Purchase recorded"
        );

        if method == PaymentMethod::Coins {
            self.sync_profile().await;
        }
        Ok(record)
    }

    /// Card checkout followed by a USD purchase
    pub async fn purchase_with_card(
        &mut self,
        product_id: &str,
        card: &CardDetails,
    ) -> AppResult<PurchaseRecord> {
        self.require_user()?;
        let product = self.product(product_id)?;
        let mut flow = PaymentFlow::new(
            product.name.clone(),
            product.usd_price,
            self.config.payment.clone(),
        );
        flow.pay(card).await?;
        self.purchase(product_id, PaymentMethod::Usd).await
    }

    /// Newest review first
    pub fn add_review(
        &mut self,
        product_id: &str,
        rating: u8,
        comment: &str,
    ) -> AppResult<ProductReview> {
        let review = ProductReview::new(&self.require_user()?.id, rating, comment)?;
        let product = self
            .state
            .products
            .iter_mut()
            .find(|p| p.id == product_id)
            .ok_or_else(|| DomainError::ProductNotFound(product_id.to_string()))?;
        product.reviews.insert(0, review.clone());

        self.db.save_products(&self.state.products)?;
        info!(product_id, rating, "Review added");
        Ok(review)
    }

    pub async fn top_up(&mut self, amount: Coins) -> AppResult<Coins> {
        if amount == 0 {
            return Err(DomainError::InvalidAmount.into());
        }
        let user = self.require_user_mut()?;
        user.credit(amount);
        let balance = user.coin_balance;
        info!(amount, balance, "Coins topped up");

        self.sync_profile().await;
        Ok(balance)
    }

    /// Card checkout for a coin pack, then credit the coins
    pub async fn top_up_with_card(
        &mut self,
        coins: Coins,
        usd_price: f64,
        card: &CardDetails,
    ) -> AppResult<Coins> {
        self.require_user()?;
        if coins == 0 {
            return Err(DomainError::InvalidAmount.into());
        }
        let mut flow = PaymentFlow::new(
            format!("{} Cat Coins Pack", coins),
            usd_price,
            self.config.payment.clone(),
        );
        flow.pay(card).await?;
        self.top_up(coins).await
    }
}
