use csv::WriterBuilder;
use dues_lib::{record::RecordKind, synthetic_name};
use itertools::Itertools;
use rand::prelude::*;
use rand::{distributions::WeightedIndex, seq::SliceRandom};
use std::{
    env,
    io::{Cursor, Write},
};
use strum::VariantNames;

fn arg_or(position: usize, default: usize) -> usize {
    env::args()
        .nth(position)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(default)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let max_members = arg_or(1, 50).max(2);
    let purchases = arg_or(2, 100_000);

    // Mostly purchases, with members joining over time
    const WEIGHTS: [usize; RecordKind::VARIANTS.len()] = [1, 200];
    let dist = WeightedIndex::new(WEIGHTS)?;
    let items = ["groceries", "energy", "rent", "internet", "veg", "soap"];
    let mut rng = thread_rng();

    let mut writer = WriterBuilder::new().from_writer(std::io::stdout());
    writer.write_record(["type", "name", "item", "price", "split"])?;

    let mut members: Vec<String> = (0..2).map(synthetic_name).collect();
    for member in &members {
        writer.write_record([RecordKind::Member.as_ref(), member.as_str(), "", "", ""])?;
    }

    let mut price_buf = [0u8; 24];
    let mut written = 0;
    while written < purchases {
        let kind = RecordKind::from_repr(dist.sample(&mut rng)).unwrap_or(RecordKind::Purchase);
        if kind == RecordKind::Member && members.len() < max_members {
            let member = synthetic_name(members.len());
            writer.write_record([RecordKind::Member.as_ref(), member.as_str(), "", "", ""])?;
            members.push(member);
            continue;
        }

        let payer = members.choose(&mut rng).map(String::as_str).unwrap_or_default();
        let split = if rng.gen_bool(0.5) {
            String::new()
        } else {
            let count = rng.gen_range(1..members.len());
            members
                .choose_multiple(&mut rng, count)
                .filter(|member| member.as_str() != payer)
                .join(";")
        };
        let cents = rng.gen_range(0u32..50_000);
        let mut price_cursor = Cursor::new(&mut price_buf[..]);
        write!(price_cursor, "{}.{:02}", cents / 100, cents % 100)?;

        writer.write_record([
            RecordKind::Purchase.as_ref().as_bytes(),
            payer.as_bytes(),
            items.choose(&mut rng).copied().unwrap_or_default().as_bytes(),
            &price_cursor.get_ref()[..(price_cursor.position() as usize)],
            split.as_bytes(),
        ])?;
        written += 1;
    }

    writer.flush()?;
    Ok(())
}
