pub mod query;
pub mod records;

pub use query::{QueryCommands, handle_query_command};
pub use records::{RecordsCommands, handle_records_command};
