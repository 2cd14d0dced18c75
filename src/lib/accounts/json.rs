use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::accounts;

const SEED: &str = include_str!("seed.json");

/// One account as it appears in an accounts file.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountRecord {
    owner: String,
    movements: Vec<f64>,
    interest_rate: f64,
    pin: u32,
    movements_dates: Vec<DateTime<Utc>>,
    currency: String,
    locale: String,
}

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to parse accounts: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{owner}: {movements} movements but {dates} movement dates")]
    MisalignedMovements {
        owner: String,
        movements: usize,
        dates: usize,
    },
}

/// The two demo accounts the app starts with.
pub fn seed() -> Result<Vec<accounts::Account>, LoadError> {
    from_str(SEED)
}

pub fn from_str(s: &str) -> Result<Vec<accounts::Account>, LoadError> {
    let records: Vec<AccountRecord> = serde_json::from_str(s)?;
    records.into_iter().map(into_account).collect()
}

pub fn from_reader<R: std::io::Read>(reader: R) -> Result<Vec<accounts::Account>, LoadError> {
    let records: Vec<AccountRecord> = serde_json::from_reader(reader)?;
    records.into_iter().map(into_account).collect()
}

fn into_account(record: AccountRecord) -> Result<accounts::Account, LoadError> {
    if record.movements.len() != record.movements_dates.len() {
        return Err(LoadError::MisalignedMovements {
            owner: record.owner,
            movements: record.movements.len(),
            dates: record.movements_dates.len(),
        });
    }

    let movements = record
        .movements
        .into_iter()
        .zip(record.movements_dates)
        .map(|(amount, date)| accounts::Movement::new(amount, date));

    Ok(accounts::Account::new(
        record.owner,
        record.pin,
        record.interest_rate,
        record.currency,
        record.locale,
    )
    .with_movements(movements))
}
