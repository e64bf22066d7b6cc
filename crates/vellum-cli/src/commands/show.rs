//! Show command implementation.

use crate::cli::ShowArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use vellum_domain::RecordKey;
use vellum_store::SqliteRecordStore;

/// Execute the show command.
pub fn execute_show(args: ShowArgs, store: &SqliteRecordStore, formatter: &Formatter) -> Result<()> {
    let key = RecordKey::new(args.id, args.language);
    match store.find(&key)? {
        Some(record) => {
            println!("{}", formatter.format_record(&record)?);
            Ok(())
        }
        None => Err(CliError::NotFound(format!(
            "no record for ({}, {})",
            key.id, key.language
        ))),
    }
}
