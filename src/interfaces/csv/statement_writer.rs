use crate::domain::ledger::EventStatement;
use crate::error::Result;
use std::io::Write;

/// Writes per-event reconciliation statements as CSV.
pub struct StatementWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> StatementWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_statements(&mut self, statements: Vec<EventStatement>) -> Result<()> {
        for statement in statements {
            self.writer.serialize(statement)?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::event::EventStatus;
    use crate::domain::money::Balance;
    use rust_decimal_macros::dec;

    #[test]
    fn test_writes_header_and_rows() {
        let statements = vec![EventStatement {
            event: 1,
            status: EventStatus::Pending,
            total_cost: Balance::new(dec!(225000)),
            total_paid: Balance::new(dec!(225000)),
            remaining: Balance::ZERO,
            currency: "INR".into(),
        }];

        let mut buf = Vec::new();
        StatementWriter::new(&mut buf)
            .write_statements(statements)
            .unwrap();
        let out = String::from_utf8(buf).unwrap();

        assert!(out.starts_with("event,status,total_cost,total_paid,remaining,currency"));
        assert!(out.contains("1,PENDING,225000,225000,0,INR"));
    }
}
