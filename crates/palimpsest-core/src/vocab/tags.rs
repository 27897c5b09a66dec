use std::collections::HashMap;

/// Index reported for a tag outside the vocabulary.
pub const UNKNOWN_TAG: i32 = -1;

/// Penn Treebank tags as used by the CLMET `pos` format.
pub const PENN_TREEBANK_TAGS: &[&str] = &[
    "CC", "CD", "DT", "EX", "FW", "IN", "JJ", "JJR", "JJS", "MD", "NN", "NNS", "NP", "NPS",
    "PDT", "POS", "PP", "PP$", "RB", "RBR", "RBS", "RP", "SENT", "SYM", "TO", "UH", "VB",
    "VBD", "VBG", "VBN", "VBZ", "VBP", "WDT", "WP", "WP$", "WRB", "XX0", "CURR", "PUN",
    "LQUO", "RQUO", "BRL", "BRR", "LS",
];

/// Simplified Oxford word classes as used by the CLMET `class` format.
pub const OXFORD_WORD_CLASSES: &[&str] = &[
    "ADJ", "ADV", "ART", "CONJ", "INTJ", "PREP", "PRON", "PUNC", "SUBST", "SYM", "UNC", "VERB",
    "QUOT",
];

/// An ordered tag list with constant-time tag → index lookup.
#[derive(Debug, Clone)]
pub struct TagVocabulary {
    name: &'static str,
    tags: &'static [&'static str],
    lookup: HashMap<&'static str, i32>,
}

impl TagVocabulary {
    #[must_use]
    pub fn new(name: &'static str, tags: &'static [&'static str]) -> Self {
        let lookup = tags
            .iter()
            .enumerate()
            .map(|(idx, tag)| (*tag, idx as i32))
            .collect();
        Self { name, tags, lookup }
    }

    #[must_use]
    pub fn penn_treebank() -> Self {
        Self::new("pos", PENN_TREEBANK_TAGS)
    }

    #[must_use]
    pub fn oxford_word_classes() -> Self {
        Self::new("class", OXFORD_WORD_CLASSES)
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub const fn tags(&self) -> &'static [&'static str] {
        self.tags
    }

    /// Resolve an already-normalized tag to its index, or [`UNKNOWN_TAG`].
    #[must_use]
    pub fn index_of(&self, tag: &str) -> i32 {
        self.lookup.get(tag).copied().unwrap_or(UNKNOWN_TAG)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_penn_treebank_indices_follow_list_order() {
        let vocab = TagVocabulary::penn_treebank();
        assert_eq!(vocab.index_of("CC"), 0);
        assert_eq!(vocab.index_of("DT"), 2);
        assert_eq!(vocab.index_of("LS"), 43);
        assert_eq!(vocab.len(), 44);
    }

    #[test]
    fn test_unknown_tag_resolves_to_sentinel() {
        let vocab = TagVocabulary::oxford_word_classes();
        assert_eq!(vocab.index_of("NN"), UNKNOWN_TAG);
        assert_eq!(vocab.index_of(""), UNKNOWN_TAG);
        assert_eq!(vocab.index_of("QUOT"), 12);
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let vocab = TagVocabulary::penn_treebank();
        assert_eq!(vocab.index_of("nn"), UNKNOWN_TAG);
    }
}
