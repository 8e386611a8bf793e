//! Entity reference expansion for JMdict text.
//!
//! JMdict declares its tag vocabulary as DTD entities
//! (`<!ENTITY v1 "Ichidan verb">`). References to those are kept as their
//! bare name, which is the short code the dictionary uses everywhere else.
//! Predefined XML entities and character references go through quick-xml.

use quick_xml::escape::{EscapeError, resolve_predefined_entity, unescape_with};
use std::borrow::Cow;
use std::collections::HashSet;

/// General entities declared in a document's internal DTD subset.
#[derive(Debug, Default, Clone)]
pub struct EntityTable {
    names: HashSet<String>,
}

impl EntityTable {
    /// Collect `<!ENTITY name ...>` declarations from DOCTYPE content.
    /// Parameter entities (`<!ENTITY % name ...>`) are not text entities and are skipped.
    pub fn from_doctype(doctype: &str) -> Self {
        let mut table = Self::default();
        for decl in doctype.split("<!ENTITY").skip(1) {
            let decl = decl.trim_start();
            if decl.starts_with('%') {
                continue;
            }
            if let Some(name) = decl.split_whitespace().next() {
                table.names.insert(name.to_string());
            }
        }
        table
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Expand every reference in `raw`. Undeclared entities are an error.
    pub fn unescape<'a>(&self, raw: &'a str) -> Result<Cow<'a, str>, EscapeError> {
        unescape_with(raw, |name| {
            resolve_predefined_entity(name).or_else(|| self.names.get(name).map(String::as_str))
        })
    }
}
