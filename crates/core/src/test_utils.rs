use jdict_api::models::{MeaningBlock, PhoneticForm, WrittenForm};

pub fn written(text: &str) -> WrittenForm {
    WrittenForm {
        text: text.to_string(),
        ..Default::default()
    }
}

pub fn phonetic(text: &str) -> PhoneticForm {
    PhoneticForm {
        text: text.to_string(),
        ..Default::default()
    }
}

pub fn phonetic_for(text: &str, written: &[&str]) -> PhoneticForm {
    PhoneticForm {
        restricted_to: strings(written),
        ..phonetic(text)
    }
}

pub fn meaning(glosses: &[&str]) -> MeaningBlock {
    MeaningBlock {
        glosses: strings(glosses),
        ..Default::default()
    }
}

pub fn meaning_for_written(glosses: &[&str], written: &[&str]) -> MeaningBlock {
    MeaningBlock {
        restricted_to_written: strings(written),
        ..meaning(glosses)
    }
}

pub fn meaning_for_phonetic(glosses: &[&str], phonetic: &[&str]) -> MeaningBlock {
    MeaningBlock {
        restricted_to_phonetic: strings(phonetic),
        ..meaning(glosses)
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
