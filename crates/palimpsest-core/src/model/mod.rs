pub mod animacy;
pub mod artwork;
pub mod clmet;
pub mod contentious;
pub mod key;
pub mod lampeter;
pub mod newsbook;
pub mod proceeding;
pub mod speech;

pub use animacy::{AnimacySentence, Offsets, OFFSETS_NOT_FOUND};
pub use artwork::{ArtworkImage, ObjectAnnotation};
pub use clmet::{ClmetHeader, ClmetTagged, ClmetText};
pub use contentious::{AnnotatorResponse, AnnotatorSuggestion, ContentiousExtract};
pub use key::{Keyed, RecordKey};
pub use lampeter::LampeterTract;
pub use newsbook::Newsbook;
pub use proceeding::{Proceeding, ProceedingKind};
pub use speech::Speech;
