use std::collections::HashMap;

/// A closed code → label mapping. Lookups outside the map return `None`;
/// callers decide whether that is fatal for the record.
#[derive(Debug, Clone)]
pub struct CategoryMap {
    name: &'static str,
    labels: HashMap<&'static str, &'static str>,
}

impl CategoryMap {
    #[must_use]
    pub fn new(name: &'static str, entries: &[(&'static str, &'static str)]) -> Self {
        Self {
            name,
            labels: entries.iter().copied().collect(),
        }
    }

    /// Lampeter genre, keyed by the first letter of a tract id.
    #[must_use]
    pub fn lampeter_genres() -> Self {
        Self::new(
            "lampeter genre",
            &[
                ("L", "Law"),
                ("E", "Economy"),
                ("M", "Miscellaneous"),
                ("P", "Politics"),
                ("S", "Science"),
                ("R", "Religion"),
            ],
        )
    }

    /// English renderings of the Dutch annotator responses.
    #[must_use]
    pub fn contentious_responses() -> Self {
        Self::new(
            "annotator response",
            &[
                (
                    "Omstreden naar huidige maatstaven",
                    "Contentious according to current standards",
                ),
                ("Niet omstreden", "Not contentious"),
                ("Weet ik niet", "I don't know"),
                ("Onleesbare OCR", "Illegible OCR"),
            ],
        )
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub fn get(&self, code: &str) -> Option<&'static str> {
        self.labels.get(code).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
