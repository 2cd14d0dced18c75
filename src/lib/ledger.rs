use chrono::{DateTime, Utc};

use crate::accounts;

/// Share of a loan that some earlier movement has to cover.
const LOAN_COVERAGE: f64 = 0.1;

/// Who is logged in, if anyone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    username: Option<String>,
}

impl Session {
    pub fn logged_out() -> Self {
        Self { username: None }
    }

    pub fn logged_in(username: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
        }
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.username.is_some()
    }
}

/// Why an operation left the ledger untouched.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Rejection {
    #[error("nobody is logged in")]
    NotLoggedIn,
    #[error("no account named {0}")]
    UnknownAccount(String),
    #[error("wrong pin for {0}")]
    WrongPin(String),
    #[error("amount must be positive, got {0}")]
    NonPositiveAmount(f64),
    #[error("no receiver named {0}")]
    UnknownReceiver(String),
    #[error("cannot transfer to the same account")]
    SelfTransfer,
    #[error("balance {balance:.2} does not cover {amount:.2}")]
    InsufficientBalance { balance: f64, amount: f64 },
    #[error("no movement covers 10% of a {amount:.2} loan")]
    LoanNotApproved { amount: f64 },
    #[error("username or pin does not match the logged in account")]
    CloseMismatch,
}

#[derive(Debug, Clone, Default)]
pub struct Bank {
    accounts: Vec<accounts::Account>,
}

impl Bank {
    pub fn new(accounts: Vec<accounts::Account>) -> Self {
        Self { accounts }
    }

    pub fn accounts(&self) -> &[accounts::Account] {
        &self.accounts
    }

    pub fn into_accounts(self) -> Vec<accounts::Account> {
        self.accounts
    }

    pub fn find(&self, username: &str) -> Option<&accounts::Account> {
        self.accounts
            .iter()
            .find(|account| account.username() == username)
    }

    /// The account the session is logged in as.
    pub fn current(&self, session: &Session) -> Option<&accounts::Account> {
        session.username().and_then(|username| self.find(username))
    }

    fn position(&self, username: &str) -> Option<usize> {
        self.accounts
            .iter()
            .position(|account| account.username() == username)
    }

    fn current_position(&self, session: &Session) -> Result<usize, Rejection> {
        session
            .username()
            .and_then(|username| self.position(username))
            .ok_or(Rejection::NotLoggedIn)
    }

    pub fn login(&self, username: &str, pin: u32) -> Result<Session, Rejection> {
        let Some(account) = self.find(username) else {
            tracing::debug!(username, "login rejected: unknown account");
            return Err(Rejection::UnknownAccount(username.to_string()));
        };

        if account.pin() != pin {
            tracing::debug!(username, "login rejected: wrong pin");
            return Err(Rejection::WrongPin(username.to_string()));
        }

        tracing::info!(username, "logged in");
        Ok(Session::logged_in(account.username()))
    }

    pub fn transfer(
        &mut self,
        session: &Session,
        receiver: &str,
        amount: f64,
        now: DateTime<Utc>,
    ) -> Result<(), Rejection> {
        let sender_index = self.current_position(session)?;

        if amount.is_nan() || amount <= 0.0 {
            return Err(Rejection::NonPositiveAmount(amount));
        }

        let Some(receiver_index) = self.position(receiver) else {
            return Err(Rejection::UnknownReceiver(receiver.to_string()));
        };

        if self.accounts[receiver_index].username() == self.accounts[sender_index].username() {
            return Err(Rejection::SelfTransfer);
        }

        let balance = self.accounts[sender_index].balance();
        if balance < amount {
            return Err(Rejection::InsufficientBalance { balance, amount });
        }

        self.accounts[sender_index].push(-amount, now);
        self.accounts[receiver_index].push(amount, now);

        tracing::info!(
            sender = self.accounts[sender_index].username(),
            receiver,
            amount,
            "transferred"
        );
        Ok(())
    }

    /// Loan amounts are rounded down to whole units before approval.
    pub fn request_loan(
        &mut self,
        session: &Session,
        amount: f64,
        now: DateTime<Utc>,
    ) -> Result<(), Rejection> {
        let index = self.current_position(session)?;
        let amount = amount.floor();

        if amount.is_nan() || amount <= 0.0 {
            return Err(Rejection::NonPositiveAmount(amount));
        }

        let account = &mut self.accounts[index];
        if !account
            .movements()
            .any(|movement| movement >= amount * LOAN_COVERAGE)
        {
            return Err(Rejection::LoanNotApproved { amount });
        }

        account.push(amount, now);

        tracing::info!(username = account.username(), amount, "loan granted");
        Ok(())
    }

    /// Removes the logged in account. Returns a logged out session on success.
    pub fn close_account(
        &mut self,
        session: &Session,
        username: &str,
        pin: u32,
    ) -> Result<Session, Rejection> {
        let index = self.current_position(session)?;

        let current = &self.accounts[index];
        if current.username() != username || current.pin() != pin {
            return Err(Rejection::CloseMismatch);
        }

        let closed = self.accounts.remove(index);

        tracing::info!(username = closed.username(), "account closed");
        Ok(Session::logged_out())
    }
}
