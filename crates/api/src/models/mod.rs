pub mod entry;
pub mod query;
pub mod record;

pub use entry::*;
pub use query::*;
pub use record::*;
