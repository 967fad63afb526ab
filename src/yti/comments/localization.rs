//! Named message identifiers and the catalog that resolves them per language.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::yti::comments::error::Result;
use crate::yti::comments::model::RoundStatus;

/// Every user-visible string the export and result summaries need.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKey {
    SourceTypeCodelist,
    SourceTypeTerminology,
    SourceTypeDatamodel,
    SourceTypeLibrary,
    SourceTypeProfile,
    SourceTypeCommentRound,
    RoundStatusInProgress,
    RoundStatusEnded,
    RoundStatusIncomplete,
    RoundStatusAwait,
    StatusValid,
    StatusDraft,
    StatusSuperseded,
    StatusInvalid,
    StatusRetired,
    StatusIncomplete,
    StatusSuggested,
    DeletedUser,
    RoundSheet,
    ThreadSheet,
    CommentSheet,
    Label,
    Description,
    Status,
    Uri,
    Author,
    Organizations,
    SourceLabel,
    SourceType,
    SourceUri,
    StartDate,
    EndDate,
    Created,
    Modified,
    LocalName,
    Resource,
    ResourceDescription,
    ResourceUri,
    CommentCount,
    Results,
    CurrentStatus,
    ProposedStatus,
    ProposedText,
    Comment,
    Level,
    ResourceProposedStatus,
    CommentUri,
}

impl MessageKey {
    /// Stable identifier, also used as the last-resort rendering of the key.
    pub fn id(self) -> String {
        serde_json::to_value(self)
            .ok()
            .and_then(|value| value.as_str().map(str::to_string))
            .unwrap_or_else(|| format!("{self:?}"))
    }
}

/// Resolves message keys to text in a requested language.
pub trait Localizer {
    fn message(&self, key: MessageKey, language: &str) -> String;
}

type MessageTable = BTreeMap<MessageKey, String>;

/// Language → messages catalog with built-in English, Finnish and Swedish
/// texts.
#[derive(Debug, Clone)]
pub struct MessageCatalog {
    default_language: String,
    tables: BTreeMap<String, MessageTable>,
}

impl Default for MessageCatalog {
    fn default() -> Self {
        Self::builtin("en")
    }
}

impl MessageCatalog {
    /// Catalog holding only the built-in tables. Languages without a table
    /// resolve through `default_language`.
    pub fn builtin(default_language: impl Into<String>) -> Self {
        let mut tables = BTreeMap::new();
        for (language, entries) in [("en", EN), ("fi", FI), ("sv", SV)] {
            let table: MessageTable = entries
                .iter()
                .map(|(key, text)| (*key, (*text).to_string()))
                .collect();
            tables.insert(language.to_string(), table);
        }
        Self {
            default_language: default_language.into(),
            tables,
        }
    }

    /// Layers overrides of the shape `{"fi": {"deleted_user": "..."}}` on top
    /// of the current tables.
    pub fn with_overrides(mut self, overrides: BTreeMap<String, MessageTable>) -> Self {
        for (language, entries) in overrides {
            self.tables.entry(language).or_default().extend(entries);
        }
        self
    }

    pub fn load_overrides(self, path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        let overrides: BTreeMap<String, MessageTable> = serde_json::from_str(&source)?;
        Ok(self.with_overrides(overrides))
    }

    pub fn default_language(&self) -> &str {
        &self.default_language
    }

    fn lookup(&self, key: MessageKey, language: &str) -> Option<&str> {
        self.tables
            .get(language)
            .and_then(|table| table.get(&key))
            .map(String::as_str)
    }
}

impl Localizer for MessageCatalog {
    fn message(&self, key: MessageKey, language: &str) -> String {
        self.lookup(key, language)
            .or_else(|| self.lookup(key, &self.default_language))
            .map(str::to_string)
            .unwrap_or_else(|| key.id())
    }
}

/// Localizes a resource status code; unknown codes are returned unchanged.
pub fn localize_resource_status(status: &str, language: &str, localizer: &dyn Localizer) -> String {
    let key = match status {
        "VALID" => MessageKey::StatusValid,
        "DRAFT" => MessageKey::StatusDraft,
        "SUPERSEDED" => MessageKey::StatusSuperseded,
        "INVALID" => MessageKey::StatusInvalid,
        "RETIRED" => MessageKey::StatusRetired,
        "INCOMPLETE" => MessageKey::StatusIncomplete,
        "SUGGESTED" => MessageKey::StatusSuggested,
        other => return other.to_string(),
    };
    localizer.message(key, language)
}

pub fn localize_round_status(
    status: RoundStatus,
    language: &str,
    localizer: &dyn Localizer,
) -> String {
    let key = match status {
        RoundStatus::InProgress => MessageKey::RoundStatusInProgress,
        RoundStatus::Ended => MessageKey::RoundStatusEnded,
        RoundStatus::Incomplete => MessageKey::RoundStatusIncomplete,
        RoundStatus::Await => MessageKey::RoundStatusAwait,
    };
    localizer.message(key, language)
}

/// Localizes a source container type; unknown types are returned unchanged.
pub fn localize_source_type(
    container_type: &str,
    language: &str,
    localizer: &dyn Localizer,
) -> String {
    let key = match container_type {
        "codelist" => MessageKey::SourceTypeCodelist,
        "terminology" => MessageKey::SourceTypeTerminology,
        "datamodel" => MessageKey::SourceTypeDatamodel,
        "library" => MessageKey::SourceTypeLibrary,
        "profile" => MessageKey::SourceTypeProfile,
        "commentround" => MessageKey::SourceTypeCommentRound,
        other => return other.to_string(),
    };
    localizer.message(key, language)
}

use MessageKey as K;

const EN: &[(MessageKey, &str)] = &[
    (K::SourceTypeCodelist, "Code list"),
    (K::SourceTypeTerminology, "Terminology"),
    (K::SourceTypeDatamodel, "Data model"),
    (K::SourceTypeLibrary, "Library"),
    (K::SourceTypeProfile, "Profile"),
    (K::SourceTypeCommentRound, "Comment round"),
    (K::RoundStatusInProgress, "In progress"),
    (K::RoundStatusEnded, "Ended"),
    (K::RoundStatusIncomplete, "Incomplete"),
    (K::RoundStatusAwait, "Awaiting"),
    (K::StatusValid, "Valid"),
    (K::StatusDraft, "Draft"),
    (K::StatusSuperseded, "Superseded"),
    (K::StatusInvalid, "Invalid"),
    (K::StatusRetired, "Retired"),
    (K::StatusIncomplete, "Incomplete"),
    (K::StatusSuggested, "Suggested"),
    (K::DeletedUser, "Deleted user"),
    (K::RoundSheet, "Comment round"),
    (K::ThreadSheet, "Resources"),
    (K::CommentSheet, "Comments"),
    (K::Label, "Name"),
    (K::Description, "Description"),
    (K::Status, "Status"),
    (K::Uri, "URI"),
    (K::Author, "Author"),
    (K::Organizations, "Organizations"),
    (K::SourceLabel, "Source"),
    (K::SourceType, "Source type"),
    (K::SourceUri, "Source URI"),
    (K::StartDate, "Start date"),
    (K::EndDate, "End date"),
    (K::Created, "Created"),
    (K::Modified, "Modified"),
    (K::LocalName, "Local name"),
    (K::Resource, "Resource"),
    (K::ResourceDescription, "Resource description"),
    (K::ResourceUri, "Resource URI"),
    (K::CommentCount, "Comments"),
    (K::Results, "Results"),
    (K::CurrentStatus, "Current status"),
    (K::ProposedStatus, "Proposed status"),
    (K::ProposedText, "Proposed text"),
    (K::Comment, "Comment"),
    (K::Level, "Reply level"),
    (K::ResourceProposedStatus, "Proposed status for resource"),
    (K::CommentUri, "Comment URI"),
];

const FI: &[(MessageKey, &str)] = &[
    (K::SourceTypeCodelist, "Koodisto"),
    (K::SourceTypeTerminology, "Sanasto"),
    (K::SourceTypeDatamodel, "Tietomalli"),
    (K::SourceTypeLibrary, "Tietokomponenttikirjasto"),
    (K::SourceTypeProfile, "Soveltamisprofiili"),
    (K::SourceTypeCommentRound, "Kommentointikierros"),
    (K::RoundStatusInProgress, "Käynnissä"),
    (K::RoundStatusEnded, "Päättynyt"),
    (K::RoundStatusIncomplete, "Keskeneräinen"),
    (K::RoundStatusAwait, "Odottaa"),
    (K::StatusValid, "Voimassa oleva"),
    (K::StatusDraft, "Luonnos"),
    (K::StatusSuperseded, "Korvattu"),
    (K::StatusInvalid, "Virheellinen"),
    (K::StatusRetired, "Poistettu käytöstä"),
    (K::StatusIncomplete, "Keskeneräinen"),
    (K::StatusSuggested, "Ehdotus"),
    (K::DeletedUser, "Poistettu käyttäjä"),
    (K::RoundSheet, "Kommentointikierros"),
    (K::ThreadSheet, "Resurssit"),
    (K::CommentSheet, "Kommentit"),
    (K::Label, "Nimi"),
    (K::Description, "Kuvaus"),
    (K::Status, "Tila"),
    (K::Uri, "URI"),
    (K::Author, "Tekijä"),
    (K::Organizations, "Organisaatiot"),
    (K::SourceLabel, "Lähde"),
    (K::SourceType, "Lähteen tyyppi"),
    (K::SourceUri, "Lähteen URI"),
    (K::StartDate, "Alkamispäivä"),
    (K::EndDate, "Päättymispäivä"),
    (K::Created, "Luotu"),
    (K::Modified, "Muokattu"),
    (K::LocalName, "Paikallinen nimi"),
    (K::Resource, "Resurssi"),
    (K::ResourceDescription, "Resurssin kuvaus"),
    (K::ResourceUri, "Resurssin URI"),
    (K::CommentCount, "Kommentteja"),
    (K::Results, "Tulokset"),
    (K::CurrentStatus, "Nykyinen tila"),
    (K::ProposedStatus, "Ehdotettu tila"),
    (K::ProposedText, "Ehdotettu teksti"),
    (K::Comment, "Kommentti"),
    (K::Level, "Vastaustaso"),
    (K::ResourceProposedStatus, "Resurssille ehdotettu tila"),
    (K::CommentUri, "Kommentin URI"),
];

const SV: &[(MessageKey, &str)] = &[
    (K::SourceTypeCodelist, "Kodlista"),
    (K::SourceTypeTerminology, "Terminologi"),
    (K::SourceTypeDatamodel, "Datamodell"),
    (K::SourceTypeLibrary, "Bibliotek"),
    (K::SourceTypeProfile, "Profil"),
    (K::SourceTypeCommentRound, "Kommentarrunda"),
    (K::RoundStatusInProgress, "Pågående"),
    (K::RoundStatusEnded, "Avslutad"),
    (K::RoundStatusIncomplete, "Ofullständig"),
    (K::RoundStatusAwait, "Väntar"),
    (K::StatusValid, "Giltig"),
    (K::StatusDraft, "Utkast"),
    (K::StatusSuperseded, "Ersatt"),
    (K::StatusInvalid, "Ogiltig"),
    (K::StatusRetired, "Tagen ur bruk"),
    (K::StatusIncomplete, "Ofullständig"),
    (K::StatusSuggested, "Förslag"),
    (K::DeletedUser, "Borttagen användare"),
    (K::RoundSheet, "Kommentarrunda"),
    (K::ThreadSheet, "Resurser"),
    (K::CommentSheet, "Kommentarer"),
    (K::Label, "Namn"),
    (K::Description, "Beskrivning"),
    (K::Status, "Status"),
    (K::Uri, "URI"),
    (K::Author, "Författare"),
    (K::Organizations, "Organisationer"),
    (K::SourceLabel, "Källa"),
    (K::SourceType, "Källtyp"),
    (K::SourceUri, "Källans URI"),
    (K::StartDate, "Startdatum"),
    (K::EndDate, "Slutdatum"),
    (K::Created, "Skapad"),
    (K::Modified, "Ändrad"),
    (K::LocalName, "Lokalt namn"),
    (K::Resource, "Resurs"),
    (K::ResourceDescription, "Resursens beskrivning"),
    (K::ResourceUri, "Resursens URI"),
    (K::CommentCount, "Kommentarer"),
    (K::Results, "Resultat"),
    (K::CurrentStatus, "Nuvarande status"),
    (K::ProposedStatus, "Föreslagen status"),
    (K::ProposedText, "Föreslagen text"),
    (K::Comment, "Kommentar"),
    (K::Level, "Svarsnivå"),
    (K::ResourceProposedStatus, "Föreslagen status för resursen"),
    (K::CommentUri, "Kommentarens URI"),
];
