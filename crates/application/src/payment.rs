//! Simulated card checkout: Details → Processing → Success

use domain::Coins;
use std::fmt;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

use crate::config::PaymentConfig;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoinPack {
    pub coins: Coins,
    pub usd_price: f64,
}

/// Top-up packages offered on the profile page
pub const COIN_PACKS: [CoinPack; 4] = [
    CoinPack { coins: 500, usd_price: 4.99 },
    CoinPack { coins: 1200, usd_price: 9.99 },
    CoinPack { coins: 3000, usd_price: 24.99 },
    CoinPack { coins: 7000, usd_price: 49.99 },
];

pub fn coin_pack(coins: Coins) -> Option<CoinPack> {
    COIN_PACKS.iter().copied().find(|p| p.coins == coins)
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PaymentError {
    #[error("{0} is required")]
    MissingCardField(&'static str),

    #[error("Payment cannot move from {from} to {to}")]
    InvalidTransition {
        from: PaymentStep,
        to: PaymentStep,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentStep {
    Details,
    Processing,
    Success,
}

impl fmt::Display for PaymentStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentStep::Details => f.write_str("details"),
            PaymentStep::Processing => f.write_str("processing"),
            PaymentStep::Success => f.write_str("success"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CardDetails {
    pub holder_name: String,
    pub number: String,
}

impl CardDetails {
    pub fn new(holder_name: impl Into<String>, number: impl Into<String>) -> Self {
        Self {
            holder_name: holder_name.into(),
            number: number.into(),
        }
    }

    pub fn validate(&self) -> Result<(), PaymentError> {
        if self.holder_name.trim().is_empty() {
            return Err(PaymentError::MissingCardField("Cardholder name"));
        }
        if self.number.trim().is_empty() {
            return Err(PaymentError::MissingCardField("Card number"));
        }
        Ok(())
    }

    /// Last four digits for receipts
    pub fn masked_number(&self) -> String {
        let digits: Vec<char> = self.number.chars().filter(|c| c.is_ascii_digit()).collect();
        let tail: String = digits[digits.len().saturating_sub(4)..].iter().collect();
        format!("•••• {}", tail)
    }
}

#[derive(Debug, Clone)]
pub struct PaymentFlow {
    item_name: String,
    amount_usd: f64,
    step: PaymentStep,
    delays: PaymentConfig,
}

impl PaymentFlow {
    pub fn new(item_name: impl Into<String>, amount_usd: f64, delays: PaymentConfig) -> Self {
        Self {
            item_name: item_name.into(),
            amount_usd,
            step: PaymentStep::Details,
            delays,
        }
    }

    pub fn step(&self) -> PaymentStep {
        self.step
    }

    pub fn item_name(&self) -> &str {
        &self.item_name
    }

    pub fn amount_usd(&self) -> f64 {
        self.amount_usd
    }

    /// Leave Details once the card form is complete
    pub fn submit(&mut self, card: &CardDetails) -> Result<(), PaymentError> {
        self.transition(PaymentStep::Details, PaymentStep::Processing)?;
        if let Err(e) = card.validate() {
            self.step = PaymentStep::Details;
            return Err(e);
        }
        info!(
            item = %self.item_name,
            amount_usd = self.amount_usd,
            card = %card.masked_number(),
            "Processing payment"
        );
        Ok(())
    }

    /// Wait out the processing delay, then the settle delay
    pub async fn process(&mut self) -> Result<(), PaymentError> {
        if self.step != PaymentStep::Processing {
            return Err(PaymentError::InvalidTransition {
                from: self.step,
                to: PaymentStep::Success,
            });
        }
        pause(self.delays.processing_ms).await;
        self.step = PaymentStep::Success;
        pause(self.delays.settle_ms).await;
        info!(item = %self.item_name, "Payment settled");
        Ok(())
    }

    pub async fn pay(&mut self, card: &CardDetails) -> Result<(), PaymentError> {
        self.submit(card)?;
        self.process().await
    }

    fn transition(&mut self, from: PaymentStep, to: PaymentStep) -> Result<(), PaymentError> {
        if self.step != from {
            return Err(PaymentError::InvalidTransition {
                from: self.step,
                to,
            });
        }
        self.step = to;
        Ok(())
    }
}

async fn pause(ms: u64) {
    if ms > 0 {
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }
}
