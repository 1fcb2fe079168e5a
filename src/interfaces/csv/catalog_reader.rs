use crate::domain::good::Good;
use crate::error::{AwamuError, Result};
use serde::Deserialize;
use std::io::Read;

#[derive(Debug, Deserialize)]
struct GoodRecord {
    label: String,
    key: String,
    price: u64,
    min_period: u32,
    max_period: u32,
}

/// Reads the goods catalog from CSV.
///
/// Expects the header `label,key,price,min_period,max_period`. Whitespace
/// around fields is trimmed.
pub struct CatalogReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> CatalogReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(source);
        Self { reader }
    }

    /// Lazily yields one good per row. A malformed row yields an error
    /// without stopping the iteration.
    pub fn goods(self) -> impl Iterator<Item = Result<Good>> {
        self.reader.into_deserialize().map(|result| {
            let record: GoodRecord = result.map_err(AwamuError::from)?;
            Good::new(
                record.label,
                record.key,
                record.price,
                record.min_period,
                record.max_period,
            )
        })
    }
}
