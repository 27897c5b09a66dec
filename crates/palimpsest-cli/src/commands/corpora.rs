use clap::ValueEnum;

/// Corpora known to the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CorpusName {
    Hansard,
    AtypicalAnimacy,
    Clmet,
    Lampeter,
    Newsbooks,
    OldBailey,
    Contentious,
    Odeuropa,
}

impl CorpusName {
    /// Sub-directory of the data directory holding this corpus.
    pub fn dir_name(self) -> &'static str {
        match self {
            Self::Hansard => "hansard",
            Self::AtypicalAnimacy => "atypical_animacy",
            Self::Clmet => "clmet",
            Self::Lampeter => "lampeter",
            Self::Newsbooks => "newsbooks",
            Self::OldBailey => "old_bailey",
            Self::Contentious => "contentious",
            Self::Odeuropa => "odeuropa",
        }
    }

    fn summary(self) -> &'static str {
        match self {
            Self::Hansard => "UK parliamentary speeches joined with the posts of each speaker",
            Self::AtypicalAnimacy => "19th-century sentences about machines, annotated for animacy",
            Self::Clmet => "Corpus of Late Modern English Texts (plain, pos or class)",
            Self::Lampeter => "Early Modern English tracts, 1640-1740",
            Self::Newsbooks => "Lancaster newsbooks from 1654 and Mercurius Fumigosus",
            Self::OldBailey => "Old Bailey Proceedings and Ordinary's Accounts",
            Self::Contentious => "Dutch newspaper extracts with contentiousness judgements",
            Self::Odeuropa => "Smell-related objects annotated on historical artworks",
        }
    }
}

pub fn list_corpora() {
    println!("Available corpora\n");
    for corpus in CorpusName::value_variants() {
        let name = corpus
            .to_possible_value()
            .map(|value| value.get_name().to_string())
            .unwrap_or_default();
        println!("  {:<18} {}", name, corpus.summary());
        println!("  {:<18} directory: <data_dir>/{}", "", corpus.dir_name());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_parse() {
        assert_eq!(
            CorpusName::from_str("old-bailey", true).unwrap(),
            CorpusName::OldBailey
        );
        assert_eq!(
            CorpusName::from_str("atypical-animacy", true).unwrap(),
            CorpusName::AtypicalAnimacy
        );
    }
}
