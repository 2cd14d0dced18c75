use std::io::Write;

use bankist::{
    accounts::{self, csv::AccountsCsvWriter},
    commands::{self, csv::CsvCommandsReader},
    ledger, statement,
};

#[tokio::main]
async fn main() {
    init_tracing();

    let mut args = std::env::args();
    let program = args.next().unwrap_or_else(|| "bankist".to_string());
    let Some(input) = args.next() else {
        eprintln!("Usage: {} <commands> [accounts.json]", program);
        std::process::exit(1);
    };
    let accounts_path = args.next();

    match run(input, accounts_path).await {
        Err(error) => {
            eprintln!("{}", error);
            std::process::exit(1);
        }
        Ok(accounts) => {
            let mut writer = AccountsCsvWriter::from_writer(std::io::stdout().lock());
            for account in &accounts {
                if let Err(error) = writer.write_account(account) {
                    eprintln!("{}", error);
                    std::process::exit(1);
                }
            }
        }
    }
}

/// Logs go to stderr, filtered by `RUST_LOG` (default `warn`).
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[derive(Debug, thiserror::Error)]
enum RunError {
    #[error("{0}: {1}")]
    IO(std::path::PathBuf, tokio::io::Error),
    #[error("{0}: {1}")]
    Accounts(std::path::PathBuf, accounts::json::LoadError),
    #[error("seed accounts: {0}")]
    Seed(accounts::json::LoadError),
    #[error("failed to write statement: {0}")]
    Output(std::io::Error),
}

async fn run<P: AsRef<std::path::Path>>(
    input: P,
    accounts_path: Option<P>,
) -> Result<Vec<accounts::Account>, RunError> {
    let accounts = match accounts_path {
        Some(path) => load_accounts(path).await?,
        None => accounts::json::seed().map_err(RunError::Seed)?,
    };

    let input = input.as_ref();
    let mut incoming = read_file(input)
        .await
        .map_err(|error| RunError::IO(input.to_path_buf(), error))?;

    let mut bank = ledger::Bank::new(accounts);
    let mut session = ledger::Session::logged_out();
    let mut sorted = false;

    while let Some(command) = incoming.recv().await {
        let now = chrono::Utc::now();
        let next = match commands::apply(&mut bank, &session, &command, now) {
            Ok(next) => next,
            Err(rejection) => {
                // Rejected commands change nothing on screen
                tracing::debug!(command = command.name(), %rejection, "command ignored");
                continue;
            }
        };
        session = next;

        // Only the sort button shows the sorted list, every other update resets the view
        let show_sorted = match command {
            commands::Command::Sort => {
                sorted = !sorted;
                sorted
            }
            _ => false,
        };

        let mut stdout = std::io::stdout().lock();
        let rendered = match bank.current(&session) {
            Some(account) => statement::render(&mut stdout, account, show_sorted, now),
            None => writeln!(stdout, "Log in to get started"),
        };
        rendered
            .and_then(|()| writeln!(stdout))
            .map_err(RunError::Output)?;
    }

    Ok(bank.into_accounts())
}

async fn load_accounts<P: AsRef<std::path::Path>>(
    path: P,
) -> Result<Vec<accounts::Account>, RunError> {
    let path = path.as_ref();
    let contents = tokio::fs::read_to_string(path)
        .await
        .map_err(|error| RunError::IO(path.to_path_buf(), error))?;
    accounts::json::from_str(&contents)
        .map_err(|error| RunError::Accounts(path.to_path_buf(), error))
}

async fn read_file<P: AsRef<std::path::Path>>(
    input: P,
) -> Result<tokio::sync::mpsc::Receiver<commands::Command>, tokio::io::Error> {
    const BUFFER_SIZE: usize = 1024;
    let file = tokio::fs::File::open(input.as_ref()).await?;
    let mut reader = CsvCommandsReader::from_reader(file);

    let (tx, rx) = tokio::sync::mpsc::channel(BUFFER_SIZE);

    tokio::spawn(async move {
        while let Some(next) = reader.next_command().await {
            match next {
                Ok(command) => {
                    if tx.send(command).await.is_err() {
                        break;
                    }
                }
                Err(commands::csv::NextError::Parse(error)) => {
                    tracing::warn!(%error, "skipping command");
                }
                Err(commands::csv::NextError::IO(error)) => {
                    tracing::error!(%error, "failed to read commands");
                    break;
                }
            }
        }
    });

    Ok(rx)
}
