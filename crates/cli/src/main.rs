use dues_lib::{replay, write_csv, write_purchases_csv};
use eyre::Result;
use std::{env, fs::File, io::BufReader};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut args = env::args().skip(1);
    let file_name = args
        .next()
        .ok_or(eyre::eyre!("Missing argument\nUsage: file_name.csv [dues|purchases]"))?;
    let report = args.next().unwrap_or_else(|| "dues".to_string());

    let file = File::open(&file_name)?;
    let household = replay(BufReader::new(file))?;
    tracing::info!(
        members = household.members.iter().count(),
        purchases = household.book.list_purchases().len(),
        "replayed {}",
        file_name
    );

    let stdout = std::io::stdout();
    match report.as_str() {
        "dues" => write_csv(&household, stdout.lock())?,
        "purchases" => write_purchases_csv(&household, stdout.lock())?,
        other => eyre::bail!("Unknown report `{other}`, expected `dues` or `purchases`"),
    }

    Ok(())
}
