use crate::accounts;

pub struct AccountsCsvWriter<W: std::io::Write> {
    writer: W,
    header_written: bool,
}

impl<W: std::io::Write> AccountsCsvWriter<W> {
    pub fn from_writer(writer: W) -> Self {
        Self {
            writer,
            header_written: false,
        }
    }

    pub fn write_account(&mut self, account: &accounts::Account) -> std::io::Result<()> {
        if !self.header_written {
            writeln!(self.writer, "username,owner,balance,in,out,interest,currency")?;
            self.header_written = true;
        }
        let summary = account.summary();
        writeln!(
            self.writer,
            "{},{},{:.4},{:.4},{:.4},{:.4},{}",
            account.username(),
            account.owner(),
            account.balance(),
            summary.income,
            summary.outcome,
            summary.interest,
            account.currency()
        )
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}
