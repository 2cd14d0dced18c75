pub mod csv;
pub mod json;

use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Movement {
    /// Negative for withdrawals
    pub amount: f64,
    pub date: DateTime<Utc>,
}

impl Movement {
    pub fn new(amount: f64, date: DateTime<Utc>) -> Self {
        Self { amount, date }
    }

    pub fn is_deposit(&self) -> bool {
        self.amount > 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub income: f64,
    pub outcome: f64,
    pub interest: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    owner: String,
    username: String,
    pin: u32,
    movements: Vec<Movement>,
    interest_rate: f64,
    currency: String,
    locale: String,
}

impl Account {
    pub fn new(
        owner: impl Into<String>,
        pin: u32,
        interest_rate: f64,
        currency: impl Into<String>,
        locale: impl Into<String>,
    ) -> Self {
        let owner = owner.into();
        Self {
            username: derive_username(&owner),
            owner,
            pin,
            movements: Vec::new(),
            interest_rate,
            currency: currency.into(),
            locale: locale.into(),
        }
    }

    pub fn with_movements(mut self, movements: impl IntoIterator<Item = Movement>) -> Self {
        self.movements.extend(movements);
        self
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Replaces the owner and re-derives the username from it.
    pub fn set_owner(&mut self, owner: impl Into<String>) {
        self.owner = owner.into();
        self.username = derive_username(&self.owner);
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn pin(&self) -> u32 {
        self.pin
    }

    pub fn interest_rate(&self) -> f64 {
        self.interest_rate
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn history(&self) -> &[Movement] {
        &self.movements
    }

    pub fn movements(&self) -> impl Iterator<Item = f64> + '_ {
        self.movements.iter().map(|movement| movement.amount)
    }

    pub fn movement_dates(&self) -> impl Iterator<Item = DateTime<Utc>> + '_ {
        self.movements.iter().map(|movement| movement.date)
    }

    pub(crate) fn push(&mut self, amount: f64, date: DateTime<Utc>) {
        self.movements.push(Movement::new(amount, date));
    }

    pub fn balance(&self) -> f64 {
        self.movements().sum()
    }

    pub fn summary(&self) -> Summary {
        let income = self.movements().filter(|amount| *amount > 0.0).sum();
        let outcome = self
            .movements()
            .filter(|amount| *amount < 0.0)
            .sum::<f64>()
            .abs();
        // The threshold applies to every deposit on its own, not to the total.
        let interest = self
            .movements()
            .filter(|amount| *amount > 0.0)
            .map(|deposit| deposit * self.interest_rate / 100.0)
            .filter(|interest| *interest >= 1.0)
            .sum();
        Summary {
            income,
            outcome,
            interest,
        }
    }
}

/// Lowercase initials of every word in `owner`: "Jonas Schmedtmann" is "js".
pub fn derive_username(owner: &str) -> String {
    owner
        .to_lowercase()
        .split(' ')
        .filter_map(|part| part.chars().next())
        .collect()
}
