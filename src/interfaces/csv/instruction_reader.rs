use crate::error::{BookingError, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Read;

#[derive(Debug, Deserialize, PartialEq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum Op {
    Create,
    Details,
    Package,
    Venue,
    Vendor,
    Unvendor,
    Guest,
    Unguest,
    Pay,
    Status,
    Delete,
}

/// One booking instruction: `op,client,event,item,qty,amount,date,arg`.
///
/// Column meaning varies by op: `item` is a catalog or guest id, `qty` a
/// guest count / vendor quantity, `amount` a custom price or payment
/// amount, `arg` a name, payment method, or status, depending on `op`.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Instruction {
    pub op: Op,
    pub client: u32,
    pub event: u32,
    pub item: Option<u32>,
    pub qty: Option<u32>,
    pub amount: Option<Decimal>,
    pub date: Option<NaiveDate>,
    pub arg: Option<String>,
}

/// Reads booking instructions from a CSV source.
///
/// Wraps `csv::Reader` and yields `Result<Instruction>` lazily, so large
/// files stream without loading the whole dataset into memory.
pub struct InstructionReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> InstructionReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    pub fn instructions(self) -> impl Iterator<Item = Result<Instruction>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(BookingError::from))
    }
}
