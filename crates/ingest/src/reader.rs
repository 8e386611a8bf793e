use crate::entities::EntityTable;
use crate::error::{IngestError, Result};
use jdict_api::models::{DictEntry, LoanSource, MeaningBlock, PhoneticForm, WrittenForm};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, trace};

/// Owned view of the parser events the reader cares about.
enum Token {
    Open(String, Vec<(String, String)>),
    Close(String),
    Text(String),
    Eof,
}

/// Pull parser turning a JMdict document into [`DictEntry`] values.
pub struct JmdictReader<R: BufRead> {
    reader: Reader<R>,
    buf: Vec<u8>,
    entities: EntityTable,
    /// An empty element is reported as open followed by this close.
    pending_close: Option<String>,
    finished: bool,
}

impl JmdictReader<BufReader<File>> {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Opening JMdict document {}", path.display());
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> JmdictReader<R> {
    pub fn new(inner: R) -> Self {
        let mut reader = Reader::from_reader(inner);
        reader.config_mut().trim_text(true);
        Self {
            reader,
            buf: Vec::new(),
            entities: EntityTable::default(),
            pending_close: None,
            finished: false,
        }
    }

    /// Next complete entry, `None` at the end of the document.
    pub fn next_entry(&mut self) -> Result<Option<DictEntry>> {
        let mut entry: Option<EntryState> = None;
        let mut text = String::new();

        loop {
            match self.next_token()? {
                Token::Open(name, attrs) => {
                    if name == "entry" {
                        entry = Some(EntryState::default());
                    } else if let Some(state) = entry.as_mut() {
                        state.open(&name, &attrs);
                    }
                    text.clear();
                }
                Token::Text(chunk) => text.push_str(&chunk),
                Token::Close(name) => {
                    if name == "entry" && entry.is_some() {
                        return entry.take().map(EntryState::finish).transpose();
                    }
                    if let Some(state) = entry.as_mut() {
                        state.close(&name, std::mem::take(&mut text))?;
                    }
                }
                Token::Eof => {
                    self.finished = true;
                    return match entry {
                        Some(_) => Err(IngestError::Malformed(
                            "document ends inside an entry".to_string(),
                        )),
                        None => Ok(None),
                    };
                }
            }
        }
    }

    fn next_token(&mut self) -> Result<Token> {
        if let Some(name) = self.pending_close.take() {
            return Ok(Token::Close(name));
        }

        loop {
            self.buf.clear();
            let token = match self.reader.read_event_into(&mut self.buf)? {
                Event::Start(start) => {
                    Token::Open(element_name(&start)?, attributes(&start, &self.entities)?)
                }
                Event::Empty(start) => {
                    let name = element_name(&start)?;
                    self.pending_close = Some(name.clone());
                    Token::Open(name, attributes(&start, &self.entities)?)
                }
                Event::End(end) => Token::Close(utf8(end.name().as_ref())?.to_string()),
                Event::Text(raw) => Token::Text(self.entities.unescape(utf8(&raw)?)?.into_owned()),
                Event::CData(raw) => Token::Text(utf8(&raw.into_inner())?.to_string()),
                Event::DocType(raw) => {
                    self.entities = EntityTable::from_doctype(utf8(&raw)?);
                    debug!("DOCTYPE declares {} entities", self.entities.len());
                    continue;
                }
                Event::Eof => Token::Eof,
                _ => continue,
            };
            return Ok(token);
        }
    }
}

impl<R: BufRead> Iterator for JmdictReader<R> {
    type Item = Result<DictEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.next_entry() {
            Ok(Some(entry)) => Some(Ok(entry)),
            Ok(None) => None,
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}

fn utf8(bytes: &[u8]) -> Result<&str> {
    std::str::from_utf8(bytes).map_err(|e| IngestError::Malformed(format!("invalid utf-8: {e}")))
}

fn element_name(start: &BytesStart<'_>) -> Result<String> {
    Ok(utf8(start.name().as_ref())?.to_string())
}

fn attributes(start: &BytesStart<'_>, entities: &EntityTable) -> Result<Vec<(String, String)>> {
    start
        .attributes()
        .map(|attr| {
            let attr = attr?;
            let key = utf8(attr.key.as_ref())?.to_string();
            let value = entities.unescape(utf8(attr.value.as_ref())?)?.into_owned();
            Ok((key, value))
        })
        .collect()
}

/// Entry being assembled between `<entry>` and `</entry>`.
#[derive(Default)]
struct EntryState {
    sequence: Option<u64>,
    written: Vec<WrittenForm>,
    phonetic: Vec<PhoneticForm>,
    meanings: Vec<MeaningBlock>,
}

impl EntryState {
    fn open(&mut self, name: &str, attrs: &[(String, String)]) {
        match name {
            "k_ele" => self.written.push(WrittenForm::default()),
            "r_ele" => self.phonetic.push(PhoneticForm::default()),
            "sense" => self.meanings.push(MeaningBlock::default()),
            "lsource" => {
                if let Some(sense) = self.meanings.last_mut() {
                    sense.loan_sources.push(loan_source(attrs));
                }
            }
            _ => {}
        }
    }

    fn close(&mut self, name: &str, text: String) -> Result<()> {
        match name {
            "ent_seq" => {
                let sequence = text.trim().parse().map_err(|_| {
                    IngestError::Malformed(format!("invalid ent_seq '{text}'"))
                })?;
                self.sequence = Some(sequence);
            }
            "keb" => self.written_form(name)?.text = text,
            "ke_inf" => self.written_form(name)?.info.push(text),
            "ke_pri" => self.written_form(name)?.priority.push(text),
            "reb" => self.phonetic_form(name)?.text = text,
            "re_nokanji" => self.phonetic_form(name)?.no_kanji = true,
            "re_restr" => self.phonetic_form(name)?.restricted_to.push(text),
            "re_inf" => self.phonetic_form(name)?.info.push(text),
            "re_pri" => self.phonetic_form(name)?.priority.push(text),
            "stagk" => self.sense(name)?.restricted_to_written.push(text),
            "stagr" => self.sense(name)?.restricted_to_phonetic.push(text),
            "pos" => self.sense(name)?.parts_of_speech.push(text),
            "xref" => self.sense(name)?.cross_references.push(text),
            "ant" => self.sense(name)?.antonyms.push(text),
            "field" => self.sense(name)?.fields.push(text),
            "misc" => self.sense(name)?.misc.push(text),
            "s_info" => self.sense(name)?.info.push(text),
            "dial" => self.sense(name)?.dialects.push(text),
            "gloss" => self.sense(name)?.glosses.push(text),
            "lsource" => {
                let source = self
                    .sense(name)?
                    .loan_sources
                    .last_mut()
                    .ok_or_else(|| misplaced(name))?;
                source.text = text;
            }
            other => trace!("ignoring element <{other}>"),
        }
        Ok(())
    }

    fn written_form(&mut self, name: &str) -> Result<&mut WrittenForm> {
        self.written.last_mut().ok_or_else(|| misplaced(name))
    }

    fn phonetic_form(&mut self, name: &str) -> Result<&mut PhoneticForm> {
        self.phonetic.last_mut().ok_or_else(|| misplaced(name))
    }

    fn sense(&mut self, name: &str) -> Result<&mut MeaningBlock> {
        self.meanings.last_mut().ok_or_else(|| misplaced(name))
    }

    fn finish(self) -> Result<DictEntry> {
        let sequence = self
            .sequence
            .ok_or_else(|| IngestError::Malformed("entry without ent_seq".to_string()))?;
        Ok(DictEntry {
            sequence,
            written: self.written,
            phonetic: self.phonetic,
            meanings: self.meanings,
        })
    }
}

fn misplaced(name: &str) -> IngestError {
    IngestError::Malformed(format!("<{name}> outside of its parent element"))
}

fn loan_source(attrs: &[(String, String)]) -> LoanSource {
    let mut source = LoanSource {
        lang: LoanSource::DEFAULT_LANG.to_string(),
        ..Default::default()
    };
    for (key, value) in attrs {
        match key.as_str() {
            "xml:lang" => source.lang = value.clone(),
            "ls_type" => source.kind = Some(value.clone()),
            "ls_wasei" => source.wasei = value == "y",
            _ => {}
        }
    }
    source
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_all(xml: &str) -> Result<Vec<DictEntry>> {
        JmdictReader::new(xml.as_bytes()).collect()
    }

    #[test]
    fn test_empty_element_closes() {
        let entries = read_all(
            "<JMdict><entry><ent_seq>1</ent_seq>\
             <r_ele><reb>パン</reb><re_nokanji/></r_ele></entry></JMdict>",
        )
        .unwrap();
        assert!(entries[0].phonetic[0].no_kanji);
        assert_eq!(entries[0].phonetic[0].text, "パン");
    }

    #[test]
    fn test_missing_sequence_is_malformed() {
        let err = read_all("<JMdict><entry><k_ele><keb>日</keb></k_ele></entry></JMdict>")
            .unwrap_err();
        assert!(matches!(err, IngestError::Malformed(_)));
    }

    #[test]
    fn test_truncated_document_is_malformed() {
        let mut reader = JmdictReader::new("<JMdict><entry><ent_seq>1</ent_seq>".as_bytes());
        assert!(reader.next().unwrap().is_err());
        assert!(reader.next().is_none());
    }

    #[test]
    fn test_undeclared_entity_is_an_error() {
        let err = read_all(
            "<JMdict><entry><ent_seq>1</ent_seq>\
             <sense><pos>&v1;</pos></sense></entry></JMdict>",
        )
        .unwrap_err();
        assert!(matches!(err, IngestError::Escape(_)));
    }

    #[test]
    fn test_loan_source_defaults() {
        let source = loan_source(&[]);
        assert_eq!(source.lang, "eng");
        assert_eq!(source.kind, None);
        assert!(!source.wasei);
    }
}
