//! Unit tests for the Identifiers module
//!
//! Tests cover identifier creation, parsing, conversion, and display
//! formatting across all domain identifier types.

use core_kernel::{
    ClaimId, DecisionId, DocumentId, InvestigationId, LegalCaseId, NoteId, PolicyId, ReportId,
    UserId,
};
use uuid::Uuid;

mod claim_id_tests {
    use super::*;

    #[test]
    fn test_new_generates_unique_ids() {
        let id1 = ClaimId::new();
        let id2 = ClaimId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_new_v7_generates_time_ordered_ids() {
        let id1 = ClaimId::new_v7();
        std::thread::sleep(std::time::Duration::from_millis(1));
        let id2 = ClaimId::new_v7();
        let uuid1: Uuid = id1.into();
        let uuid2: Uuid = id2.into();
        assert!(uuid1 < uuid2);
    }

    #[test]
    fn test_from_uuid() {
        let uuid = Uuid::new_v4();
        let id = ClaimId::from_uuid(uuid);
        assert_eq!(*id.as_uuid(), uuid);
    }

    #[test]
    fn test_prefix() {
        assert_eq!(ClaimId::prefix(), "CLM");
    }

    #[test]
    fn test_display_format() {
        let id = ClaimId::new();
        let display = id.to_string();
        assert!(display.starts_with("CLM-"));
    }

    #[test]
    fn test_from_str_with_prefix() {
        let original = ClaimId::new();
        let string = original.to_string();
        let parsed: ClaimId = string.parse().unwrap();
        assert_eq!(original, parsed);
    }

    #[test]
    fn test_from_str_without_prefix() {
        let uuid = Uuid::new_v4();
        let parsed: ClaimId = uuid.to_string().parse().unwrap();
        assert_eq!(*parsed.as_uuid(), uuid);
    }

    #[test]
    fn test_from_str_rejects_garbage() {
        let result: Result<ClaimId, _> = "not-a-uuid".parse();
        assert!(result.is_err());
    }

    #[test]
    fn test_serde_transparent() {
        let id = ClaimId::new();
        let json = serde_json::to_string(&id).unwrap();
        // Serializes as a bare UUID string, no prefix
        assert_eq!(json, format!("\"{}\"", id.as_uuid()));

        let back: ClaimId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }
}

mod prefix_tests {
    use super::*;

    #[test]
    fn test_all_prefixes_are_distinct() {
        let prefixes = [
            ClaimId::prefix(),
            DocumentId::prefix(),
            DecisionId::prefix(),
            NoteId::prefix(),
            InvestigationId::prefix(),
            LegalCaseId::prefix(),
            ReportId::prefix(),
            PolicyId::prefix(),
            UserId::prefix(),
        ];

        for (i, a) in prefixes.iter().enumerate() {
            for b in prefixes.iter().skip(i + 1) {
                assert_ne!(a, b, "duplicate identifier prefix {a}");
            }
        }
    }

    #[test]
    fn test_display_uses_expected_prefixes() {
        assert!(DocumentId::new().to_string().starts_with("DOC-"));
        assert!(DecisionId::new().to_string().starts_with("DEC-"));
        assert!(InvestigationId::new().to_string().starts_with("INV-"));
        assert!(LegalCaseId::new().to_string().starts_with("LGL-"));
        assert!(ReportId::new().to_string().starts_with("RPT-"));
        assert!(PolicyId::new().to_string().starts_with("POL-"));
        assert!(UserId::new().to_string().starts_with("USR-"));
        assert!(NoteId::new().to_string().starts_with("NOTE-"));
    }

    #[test]
    fn test_ids_of_different_types_do_not_compare() {
        // Compile-time property: ClaimId and PolicyId are distinct types.
        // Round-tripping through Uuid is the only bridge.
        let uuid = Uuid::new_v4();
        let claim = ClaimId::from_uuid(uuid);
        let policy = PolicyId::from_uuid(uuid);
        assert_eq!(*claim.as_uuid(), *policy.as_uuid());
    }
}

mod default_tests {
    use super::*;

    #[test]
    fn test_default_generates_random_id() {
        let id1 = InvestigationId::default();
        let id2 = InvestigationId::default();
        assert_ne!(id1, id2);
    }
}
