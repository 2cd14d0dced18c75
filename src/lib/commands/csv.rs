use tokio::io::AsyncBufReadExt;

use crate::commands;

pub struct CsvCommandsReader<R: tokio::io::AsyncRead + std::marker::Unpin + Send + 'static> {
    lines: tokio::io::Lines<tokio::io::BufReader<R>>,
}

impl<R: tokio::io::AsyncRead + std::marker::Unpin + Send + 'static> CsvCommandsReader<R> {
    pub fn from_reader(reader: R) -> Self {
        const BUFFER_SIZE: usize = 8 * 1024;
        let reader = tokio::io::BufReader::with_capacity(BUFFER_SIZE, reader);
        Self {
            lines: reader.lines(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum NextError {
    #[error("failed to parse command: {0}")]
    Parse(FromCsvRowError),
    #[error("failed to read command: {0}")]
    IO(std::io::Error),
}

impl<R: tokio::io::AsyncRead + std::marker::Unpin + Send + 'static> CsvCommandsReader<R> {
    /// Next command, skipping blank lines and `#` comments.
    pub async fn next_command(&mut self) -> Option<Result<commands::Command, NextError>> {
        loop {
            match self.lines.next_line().await {
                Ok(Some(line)) => {
                    let line = line.trim();
                    if line.is_empty() || line.starts_with('#') {
                        continue;
                    }
                    return Some(from_csv_row(line).map_err(NextError::Parse));
                }
                Ok(None) => return None,
                Err(error) => return Some(Err(NextError::IO(error))),
            }
        }
    }
}

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum FromCsvRowError {
    #[error("invalid command: {0}")]
    InvalidCommand(String),
    #[error("missing command")]
    MissingCommand,
    #[error("missing username")]
    MissingUsername,
    #[error("invalid pin: {0}")]
    InvalidPin(String),
    #[error("missing pin")]
    MissingPin,
    #[error("invalid amount: {0}")]
    InvalidAmount(String),
    #[error("missing amount")]
    MissingAmount,
}

/// Parses one line of user input, e.g. `transfer,jd,100`.
pub fn from_csv_row(s: &str) -> Result<commands::Command, FromCsvRowError> {
    let mut parts = s.split(',');
    let command = parts.next().ok_or(FromCsvRowError::MissingCommand)?;
    match command.trim() {
        "login" => {
            let username = parts.next().ok_or(FromCsvRowError::MissingUsername)?;
            let pin = parts.next().ok_or(FromCsvRowError::MissingPin)?;
            Ok(commands::Command::Login {
                username: username.trim().to_string(),
                pin: parse_pin(pin)?,
            })
        }
        "transfer" => {
            let receiver = parts.next().ok_or(FromCsvRowError::MissingUsername)?;
            let amount = parts.next().ok_or(FromCsvRowError::MissingAmount)?;
            Ok(commands::Command::Transfer {
                receiver: receiver.trim().to_string(),
                amount: parse_amount(amount)?,
            })
        }
        "loan" => {
            let amount = parts.next().ok_or(FromCsvRowError::MissingAmount)?;
            Ok(commands::Command::Loan {
                amount: parse_amount(amount)?,
            })
        }
        "close" => {
            let username = parts.next().ok_or(FromCsvRowError::MissingUsername)?;
            let pin = parts.next().ok_or(FromCsvRowError::MissingPin)?;
            Ok(commands::Command::Close {
                username: username.trim().to_string(),
                pin: parse_pin(pin)?,
            })
        }
        "sort" => Ok(commands::Command::Sort),
        "" => Err(FromCsvRowError::MissingCommand),
        _ => Err(FromCsvRowError::InvalidCommand(command.to_string())),
    }
}

/// An empty field reads as zero, like an empty number input.
fn parse_amount(s: &str) -> Result<f64, FromCsvRowError> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Ok(0.0);
    }
    match trimmed.parse::<f64>() {
        Ok(amount) if amount.is_finite() => Ok(amount),
        _ => Err(FromCsvRowError::InvalidAmount(s.to_string())),
    }
}

fn parse_pin(s: &str) -> Result<u32, FromCsvRowError> {
    s.trim()
        .parse()
        .map_err(|_| FromCsvRowError::InvalidPin(s.to_string()))
}
