//! Merging card list pages into one document per language.

use serde::Serialize;

use crate::api::types::{Metadata, PagePayload, RecordMap};

/// Everything fetched so far for one language.
///
/// Records are merged last-write-wins by id. Metadata is latched from the first
/// merged page and never replaced.
#[derive(Debug, Default)]
pub struct Accumulator {
    metadata: Option<Metadata>,
    cards: RecordMap,
    card_details: RecordMap,
    specific_effect_card_info: RecordMap,
    fetched_details: usize,
    pages: usize,
}

impl Accumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge one page and return how many detail records it carried.
    pub fn merge_page(&mut self, page: PagePayload) -> usize {
        let PagePayload {
            cards,
            card_details,
            specific_effect_card_info,
            metadata,
            ..
        } = page;

        self.metadata.get_or_insert(metadata);

        let fetched = card_details.len();
        self.fetched_details += fetched;
        self.pages += 1;
        self.cards.extend(cards);
        self.card_details.extend(card_details);
        self.specific_effect_card_info
            .extend(specific_effect_card_info);
        fetched
    }

    #[cfg(test)]
    pub fn metadata(&self) -> Option<&Metadata> {
        self.metadata.as_ref()
    }

    #[cfg(test)]
    pub fn cards(&self) -> &RecordMap {
        &self.cards
    }

    pub fn card_details(&self) -> &RecordMap {
        &self.card_details
    }

    #[cfg(test)]
    pub fn specific_effect_card_info(&self) -> &RecordMap {
        &self.specific_effect_card_info
    }

    /// Detail records seen across all pages, duplicates included.
    pub fn fetched_details(&self) -> usize {
        self.fetched_details
    }

    pub fn pages(&self) -> usize {
        self.pages
    }

    pub fn into_document(self) -> CardDocument {
        CardDocument {
            metadata: self.metadata.unwrap_or_default(),
            cards: self.cards,
            card_details: self.card_details,
            specific_effect_card_info: self.specific_effect_card_info,
        }
    }
}

/// The per-language output file.
#[derive(Serialize, Debug)]
pub struct CardDocument {
    pub metadata: Metadata,
    pub cards: RecordMap,
    pub card_details: RecordMap,
    pub specific_effect_card_info: RecordMap,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn page(body: Value) -> PagePayload {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn overlapping_ids_keep_last_merged_value() {
        let mut acc = Accumulator::new();
        acc.merge_page(page(json!({
            "count": 2,
            "card_details": {"1": {"atk": 1}, "2": {"atk": 2}}
        })));
        acc.merge_page(page(json!({
            "count": 2,
            "card_details": {"2": {"atk": 20}, "3": {"atk": 3}}
        })));

        assert_eq!(acc.card_details().len(), 3);
        assert_eq!(acc.card_details()["2"], json!({"atk": 20}));
        assert_eq!(acc.fetched_details(), 4);
        assert_eq!(acc.pages(), 2);
        let ids: Vec<&str> = acc.card_details().keys().map(String::as_str).collect();
        assert_eq!(ids, ["1", "2", "3"]);
    }

    #[test]
    fn metadata_is_latched_from_first_page() {
        let mut acc = Accumulator::new();
        acc.merge_page(page(json!({
            "count": 1,
            "tribe_names": {"1": "Fairy"},
            "skill_names": {"fanfare": "Fanfare"}
        })));
        acc.merge_page(page(json!({
            "count": 1,
            "tribe_names": {"1": "Changed"},
            "card_set_names": {"10001": "Legends Rise"}
        })));

        let metadata = acc.metadata().unwrap();
        assert_eq!(metadata.tribe_names, json!({"1": "Fairy"}));
        assert_eq!(metadata.skill_names, json!({"fanfare": "Fanfare"}));
        assert_eq!(metadata.card_set_names, json!({}));
    }

    #[test]
    fn empty_first_page_still_latches_metadata() {
        let mut acc = Accumulator::new();
        acc.merge_page(page(json!({"count": 0})));
        acc.merge_page(page(json!({"count": 0, "tribe_names": {"1": "Fairy"}})));
        assert_eq!(acc.metadata(), Some(&Metadata::default()));
    }

    #[test]
    fn collections_merge_independently() {
        let mut acc = Accumulator::new();
        let fetched = acc.merge_page(page(json!({
            "count": 1,
            "cards": {"1": {"name": "a"}},
            "specific_effect_card_info": {"9": {"effect": "x"}}
        })));
        assert_eq!(fetched, 0);
        assert_eq!(acc.cards().len(), 1);
        assert!(acc.card_details().is_empty());
        assert_eq!(acc.specific_effect_card_info().len(), 1);
    }

    #[test]
    fn document_without_pages_has_empty_tables() {
        let doc = serde_json::to_value(Accumulator::new().into_document()).unwrap();
        assert_eq!(doc["metadata"]["tribe_names"], json!({}));
        assert_eq!(doc["cards"], json!({}));
    }
}
