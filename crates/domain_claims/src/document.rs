//! Claim documents
//!
//! Documents are references to externally stored files; the engine keeps
//! only the path returned by the document-storage collaborator. A document
//! is immutable once attached - there is no edit or delete flow.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{ClaimId, DocumentId, UserId};

/// Kind of supporting document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    PoliceReport,
    MechanicQuote,
    DamagePhoto,
    ScenePhoto,
    AudioTranscript,
    Other,
}

impl DocumentKind {
    /// Whether a document of this kind satisfies the submission guard
    ///
    /// A claim needs at least one of the evidentiary kinds before it can
    /// be submitted; scene photos and transcripts alone are not enough.
    pub fn is_required_kind(&self) -> bool {
        matches!(
            self,
            DocumentKind::PoliceReport | DocumentKind::MechanicQuote | DocumentKind::DamagePhoto
        )
    }

    /// Whether this kind participates in duplicate-photo detection
    pub fn is_photo(&self) -> bool {
        matches!(self, DocumentKind::DamagePhoto | DocumentKind::ScenePhoto)
    }

    /// Stable string form used in the database and API payloads
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::PoliceReport => "police_report",
            DocumentKind::MechanicQuote => "mechanic_quote",
            DocumentKind::DamagePhoto => "damage_photo",
            DocumentKind::ScenePhoto => "scene_photo",
            DocumentKind::AudioTranscript => "audio_transcript",
            DocumentKind::Other => "other",
        }
    }

    /// Parses the stable string form back into a kind
    pub fn parse(s: &str) -> Result<Self, crate::error::ClaimError> {
        match s {
            "police_report" => Ok(DocumentKind::PoliceReport),
            "mechanic_quote" => Ok(DocumentKind::MechanicQuote),
            "damage_photo" => Ok(DocumentKind::DamagePhoto),
            "scene_photo" => Ok(DocumentKind::ScenePhoto),
            "audio_transcript" => Ok(DocumentKind::AudioTranscript),
            "other" => Ok(DocumentKind::Other),
            other => Err(crate::error::ClaimError::validation(format!(
                "unknown document kind '{other}'"
            ))),
        }
    }
}

/// A document attached to a claim
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Unique identifier
    pub id: DocumentId,
    /// Owning claim
    pub claim_id: ClaimId,
    /// Document kind
    pub kind: DocumentKind,
    /// Stable path returned by the document-storage collaborator
    pub file_path: String,
    /// Original file name
    pub file_name: String,
    /// Size in bytes
    pub file_size: u64,
    /// Uploading user
    pub uploaded_by: UserId,
    /// Content hash, used for duplicate-photo detection
    pub content_hash: Option<String>,
    /// Upload timestamp
    pub uploaded_at: DateTime<Utc>,
}

/// Data for attaching a new document
#[derive(Debug, Clone)]
pub struct NewDocument {
    pub kind: DocumentKind,
    pub file_path: String,
    pub file_name: String,
    pub file_size: u64,
    pub content_hash: Option<String>,
}

impl Document {
    /// Creates a document record for a claim
    pub fn attach(claim_id: ClaimId, uploaded_by: UserId, new: NewDocument) -> Self {
        Self {
            id: DocumentId::new_v7(),
            claim_id,
            kind: new.kind,
            file_path: new.file_path,
            file_name: new.file_name,
            file_size: new.file_size,
            uploaded_by,
            content_hash: new.content_hash,
            uploaded_at: Utc::now(),
        }
    }
}
