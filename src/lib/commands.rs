pub mod csv;

use chrono::{DateTime, Utc};

use crate::ledger;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Login { username: String, pin: u32 },
    Transfer { receiver: String, amount: f64 },
    Loan { amount: f64 },
    Close { username: String, pin: u32 },
    Sort,
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Login { .. } => "login",
            Command::Transfer { .. } => "transfer",
            Command::Loan { .. } => "loan",
            Command::Close { .. } => "close",
            Command::Sort => "sort",
        }
    }
}

/// Runs one command against the bank and returns the session that follows it.
///
/// A rejected command leaves both the bank and the caller's session as they were.
pub fn apply(
    bank: &mut ledger::Bank,
    session: &ledger::Session,
    command: &Command,
    now: DateTime<Utc>,
) -> Result<ledger::Session, ledger::Rejection> {
    match command {
        Command::Login { username, pin } => bank.login(username, *pin),
        Command::Transfer { receiver, amount } => {
            bank.transfer(session, receiver, *amount, now)?;
            Ok(session.clone())
        }
        Command::Loan { amount } => {
            bank.request_loan(session, *amount, now)?;
            Ok(session.clone())
        }
        Command::Close { username, pin } => bank.close_account(session, username, *pin),
        Command::Sort => {
            if bank.current(session).is_none() {
                return Err(ledger::Rejection::NotLoggedIn);
            }
            Ok(session.clone())
        }
    }
}
