//! `token_TAG` chunk parsing.

use palimpsest_core::vocab::{TagVocabulary, UNKNOWN_TAG};

use crate::error::Warning;

/// Separator between a token and its tag.
pub const TAG_SEPARATOR: char = '_';

/// Parallel token and tag-index sequences for one source unit.
///
/// The two flags are set at most once per unit, however many chunks
/// triggered them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaggedTokens {
    pub tokens: Vec<String>,
    pub tags: Vec<i32>,
    pub unknown_tag: bool,
    pub malformed_token: bool,
}

impl TaggedTokens {
    /// Split `text` on whitespace and resolve every chunk.
    ///
    /// A chunk that does not split into exactly two parts is dropped.
    pub fn push_text(&mut self, text: &str, vocabulary: &TagVocabulary) {
        for chunk in text.split_whitespace() {
            let mut parts = chunk.split(TAG_SEPARATOR);
            let (Some(token), Some(tag), None) = (parts.next(), parts.next(), parts.next()) else {
                self.malformed_token = true;
                continue;
            };

            let tag = tag.replace('\n', "").trim().to_uppercase();
            let index = vocabulary.index_of(&tag);
            if index == UNKNOWN_TAG {
                self.unknown_tag = true;
            }
            self.tokens.push(token.to_string());
            self.tags.push(index);
        }
    }

    pub fn warnings(&self) -> Vec<Warning> {
        let mut warnings = Vec::new();
        if self.unknown_tag {
            warnings.push(Warning::UnknownTag);
        }
        if self.malformed_token {
            warnings.push(Warning::MalformedToken);
        }
        warnings
    }
}

/// Parse every text fragment of one unit into a single token sequence.
pub fn parse_tagged<'t>(
    fragments: impl IntoIterator<Item = &'t str>,
    vocabulary: &TagVocabulary,
) -> TaggedTokens {
    let mut tagged = TaggedTokens::default();
    for fragment in fragments {
        tagged.push_text(fragment, vocabulary);
    }
    tagged
}
