use crate::domain::customer::Customer;
use crate::error::{Result, ServiceError};
use std::io::Read;

/// Reads customer candidates from a CSV source with an
/// `Id,FirstName,LastName,Age` header.
///
/// Whitespace around fields is trimmed; malformed rows surface as `Err` items
/// without stopping the stream.
pub struct CustomerReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> CustomerReader<R> {
    /// Creates a new `CustomerReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and deserializes customers.
    pub fn customers(self) -> impl Iterator<Item = Result<Customer>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(ServiceError::from))
    }
}
