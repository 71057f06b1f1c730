use crate::domain::customer::Customer;
use crate::error::Result;
use std::io::Write;

/// Writes customers as CSV with an `Id,FirstName,LastName,Age` header.
pub struct CustomerWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> CustomerWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_customers<'a, I>(&mut self, customers: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a Customer>,
    {
        for customer in customers {
            self.writer.serialize(customer)?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
