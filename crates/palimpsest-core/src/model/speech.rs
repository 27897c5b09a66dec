use serde::{Deserialize, Serialize};

use crate::model::key::{Keyed, RecordKey};

/// One House of Commons speech, with the posts its speaker held that day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Speech {
    pub id: String,
    pub speech: String,
    pub display_as: String,
    pub party: String,
    pub constituency: String,
    pub mnis_id: String,
    pub date: String,
    pub time: String,
    pub colnum: String,
    pub speech_class: String,
    pub major_heading: String,
    pub minor_heading: String,
    pub oral_heading: String,
    pub year: String,
    pub hansard_membership_id: String,
    pub speakerid: String,
    pub person_id: String,
    pub speakername: String,
    pub url: String,

    /// Parliamentary posts held on the speech date.
    pub parliamentary_posts: Vec<String>,
    /// Government posts held on the speech date.
    pub government_posts: Vec<String>,
    /// Opposition posts held on the speech date.
    pub opposition_posts: Vec<String>,
}

impl Keyed for Speech {
    fn key(&self) -> RecordKey {
        RecordKey::new(self.id.as_str())
    }
}
