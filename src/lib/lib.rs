pub mod accounts;
pub mod commands;
pub mod dates;
pub mod ledger;
pub mod statement;
