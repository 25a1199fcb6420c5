use crate::record::*;
use csv::{ReaderBuilder, StringRecord, Trim};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug)]
pub enum Header {
    Type,
    Name,
    Item,
    Price,
    Split,
}

#[derive(Error, Debug)]
pub enum ParserError {
    #[error("Column `{0:?}` missing")]
    MissingHeader(Header),
    #[error("Invalid value in type field: `{0}`")]
    InvalidTypeField(String),
    #[error(transparent)]
    CSVError(#[from] csv::Error),
}

const MISSING_TYPE_HEADER: ParserError = ParserError::MissingHeader(Header::Type);
const MISSING_NAME_HEADER: ParserError = ParserError::MissingHeader(Header::Name);
const MISSING_ITEM_HEADER: ParserError = ParserError::MissingHeader(Header::Item);
const MISSING_PRICE_HEADER: ParserError = ParserError::MissingHeader(Header::Price);

/// Separator between member names in the split column.
pub const SPLIT_SEPARATOR: char = ';';

pub fn parse_csv<R: std::io::Read>(
    reader: R,
) -> Result<impl Iterator<Item = Result<Record, ParserError>>, ParserError> {
    parse_from_reader(
        ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(reader),
    )
}

pub fn parse_from_reader<R: std::io::Read>(
    mut reader: csv::Reader<R>,
) -> Result<impl Iterator<Item = Result<Record, ParserError>>, ParserError> {
    let mut header_to_index = reader
        .headers()?
        .into_iter()
        .zip(0u8..u8::MAX)
        .collect::<HashMap<_, _>>();

    let field_map = FieldToIndexMap {
        ty: header_to_index.remove("type").ok_or(MISSING_TYPE_HEADER)?,
        name: header_to_index.remove("name").ok_or(MISSING_NAME_HEADER)?,
        item: header_to_index.remove("item").ok_or(MISSING_ITEM_HEADER)?,
        price: header_to_index.remove("price").ok_or(MISSING_PRICE_HEADER)?,
        // optional, a file without purchases shared with a subset can leave it out
        split: header_to_index.remove("split"),
    };

    Ok(reader.into_records().map(move |res| {
        res.map_err(ParserError::from)
            .and_then(|rec| parse_record(&rec, field_map))
    }))
}

#[derive(Clone, Copy)]
struct FieldToIndexMap {
    ty: u8,
    name: u8,
    item: u8,
    price: u8,
    split: Option<u8>,
}

fn parse_record(
    record: &StringRecord,
    field_map: FieldToIndexMap,
) -> Result<Record, ParserError> {
    let ty = record.get(field_map.ty.into()).ok_or(MISSING_TYPE_HEADER)?;
    let kind = ty
        .parse::<RecordKind>()
        .map_err(|_| ParserError::InvalidTypeField(ty.to_string()))?;
    let name = record.get(field_map.name.into()).ok_or(MISSING_NAME_HEADER)?;

    Ok(match kind {
        RecordKind::Member => Record::new_member(name),
        RecordKind::Purchase => Record::new_purchase(
            name,
            record
                .get(field_map.item.into())
                .ok_or(MISSING_ITEM_HEADER)?,
            record
                .get(field_map.price.into())
                .ok_or(MISSING_PRICE_HEADER)?,
            field_map
                .split
                .and_then(|index| record.get(index.into()))
                .map(parse_split)
                .unwrap_or_default(),
        ),
    })
}

fn parse_split(field: &str) -> Vec<String> {
    field
        .split(SPLIT_SEPARATOR)
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}
