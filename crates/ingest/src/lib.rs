//! Streaming JMdict reader.
//!
//! [`JmdictReader`] yields one [`jdict_api::models::DictEntry`] per
//! `<entry>` element without loading the whole document.

pub mod entities;
pub mod error;
pub mod reader;

pub use error::{IngestError, Result};
pub use reader::JmdictReader;
