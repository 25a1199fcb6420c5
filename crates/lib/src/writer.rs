use crate::{Household, MemberId, Roster};
use csv::WriterBuilder;
use std::io::{Cursor, Write};

/// Writes every outstanding debt as `owner,to,amount`.
pub fn write_csv<W: Write>(household: &Household, writer: W) -> Result<(), std::io::Error> {
    let mut writer = WriterBuilder::new().from_writer(writer);
    writer.write_record(["owner", "to", "amount"])?;

    let mut amount_buf = [0u8; 24];

    for edge in household.book.dues().iter().filter(|edge| !edge.amount.is_zero()) {
        let mut amount_cursor = Cursor::new(&mut amount_buf[..]);
        write!(amount_cursor, "{:.2}", edge.amount)?;

        writer.write_record([
            name(household, edge.owner).as_bytes(),
            name(household, edge.to).as_bytes(),
            &amount_cursor.get_ref()[..(amount_cursor.position() as usize)],
        ])?;
    }

    writer.flush()
}

/// Writes the recorded purchases as `id,item,by,split,price`.
pub fn write_purchases_csv<W: Write>(
    household: &Household,
    writer: W,
) -> Result<(), std::io::Error> {
    let mut writer = WriterBuilder::new().from_writer(writer);
    writer.write_record(["id", "item", "by", "split", "price"])?;

    let mut id_buf = itoa::Buffer::new();
    let mut price_buf = [0u8; 24];

    for purchase in household.book.list_purchases() {
        let mut price_cursor = Cursor::new(&mut price_buf[..]);
        write!(price_cursor, "{:.2}", purchase.price)?;

        writer.write_record([
            id_buf.format(purchase.id).as_bytes(),
            purchase.item.as_bytes(),
            name(household, purchase.payer).as_bytes(),
            purchase.split.as_bytes(),
            &price_cursor.get_ref()[..(price_cursor.position() as usize)],
        ])?;
    }

    writer.flush()
}

fn name(household: &Household, id: MemberId) -> &str {
    household
        .members
        .member(id)
        .map_or("", |member| member.name.as_str())
}
