mod book;
mod error;
mod household;
mod ledger;
mod member;
mod money;
mod parser;
pub mod record;
mod shared;
mod splitter;
mod writer;

use record::RecordExecutor;
use tracing::warn;

pub use rust_decimal::Decimal;

pub use book::*;
pub use error::{DuesError, Error};
pub use household::*;
pub use ledger::*;
pub use member::*;
pub use money::{Money, SCALE};
pub use parser::{parse_csv, parse_from_reader, Header, ParserError};
pub use shared::SharedBook;
pub use splitter::*;
pub use writer::{write_csv, write_purchases_csv};

/// Replays a CSV of members and purchases, skipping rows that fail.
pub fn replay<R: std::io::Read>(reader: R) -> Result<Household, Error> {
    let mut household = Household::default();
    for (row, record) in parse_csv(reader)?.enumerate() {
        let record = match record {
            Ok(record) => record,
            Err(err) => {
                warn!(row, %err, "skipping unreadable row");
                continue;
            }
        };
        let kind = record.kind();
        if let Err(err) = household.execute(record) {
            warn!(row, %kind, %err, "skipping rejected row");
        }
    }
    Ok(household)
}

/// Replays `reader` and writes the resulting dues to `writer`.
pub fn execute<R: std::io::Read, W: std::io::Write>(reader: R, writer: W) -> Result<(), Error> {
    let household = replay(reader)?;
    Ok(write_csv(&household, writer)?)
}
