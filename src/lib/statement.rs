use chrono::{DateTime, Utc};

use crate::{accounts, dates};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovementKind {
    Deposit,
    Withdrawal,
}

impl MovementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MovementKind::Deposit => "deposit",
            MovementKind::Withdrawal => "withdrawal",
        }
    }
}

impl std::fmt::Display for MovementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    /// 1-based position before the list is flipped for display.
    pub number: usize,
    pub kind: MovementKind,
    pub amount: f64,
    pub date: String,
}

/// Movement rows in display order, newest (or, when sorted, largest) first.
pub fn movement_rows(account: &accounts::Account, sorted: bool, now: DateTime<Utc>) -> Vec<Row> {
    let mut movements = account.history().to_vec();
    if sorted {
        movements.sort_by(|a, b| a.amount.total_cmp(&b.amount));
    }

    let mut rows = movements
        .iter()
        .enumerate()
        .map(|(i, movement)| Row {
            number: i + 1,
            kind: if movement.is_deposit() {
                MovementKind::Deposit
            } else {
                MovementKind::Withdrawal
            },
            amount: movement.amount,
            date: dates::format_movement_date(movement.date, account.locale(), now),
        })
        .collect::<Vec<_>>();
    rows.reverse();
    rows
}

pub fn currency_symbol(currency: &str) -> Option<&'static str> {
    match currency {
        "EUR" => Some("€"),
        "USD" => Some("$"),
        "GBP" => Some("£"),
        _ => None,
    }
}

pub fn format_amount(amount: f64, currency: &str) -> String {
    match currency_symbol(currency) {
        Some(symbol) => format!("{amount:.2}{symbol}"),
        None => format!("{amount:.2} {currency}"),
    }
}

pub fn welcome(account: &accounts::Account) -> String {
    let first_name = account.owner().split(' ').next().unwrap_or_default();
    format!("Welcome back, {first_name}")
}

/// Everything the app shows for the logged in account.
pub fn render<W: std::io::Write>(
    writer: &mut W,
    account: &accounts::Account,
    sorted: bool,
    now: DateTime<Utc>,
) -> std::io::Result<()> {
    let currency = account.currency();
    let summary = account.summary();

    writeln!(writer, "{}", welcome(account))?;
    writeln!(writer, "As of {}", dates::format_current_date(now))?;
    writeln!(writer, "Balance: {}", format_amount(account.balance(), currency))?;
    writeln!(
        writer,
        "In: {}  Out: {}  Interest: {}",
        format_amount(summary.income, currency),
        format_amount(summary.outcome, currency),
        format_amount(summary.interest, currency)
    )?;
    for row in movement_rows(account, sorted, now) {
        writeln!(
            writer,
            "  {:>3} {:<10} {:<12} {:>14}",
            row.number,
            row.kind,
            row.date,
            format_amount(row.amount, currency)
        )?;
    }
    Ok(())
}
