//! CSV input and output: the goods catalog, installment schedules and the
//! transaction ledger.

pub mod catalog_reader;
pub mod ledger_writer;
pub mod schedule_writer;
