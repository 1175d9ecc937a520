//! Tests for domain_party

use domain_party::{PartyError, User, UserRole};

mod registration_tests {
    use super::*;

    #[test]
    fn test_register_assigns_id_and_timestamp() {
        let user = User::register("claimant@example.com", "Dana Reyes", UserRole::Claimant)
            .unwrap();

        assert_eq!(user.email, "claimant@example.com");
        assert_eq!(user.name, "Dana Reyes");
        assert_eq!(user.role, UserRole::Claimant);
    }

    #[test]
    fn test_register_generates_unique_ids() {
        let a = User::register("a@example.com", "A", UserRole::Claimant).unwrap();
        let b = User::register("b@example.com", "B", UserRole::Claimant).unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_invalid_email_reports_address() {
        let err = User::register("not-an-email", "X", UserRole::Adjuster).unwrap_err();
        match err {
            PartyError::InvalidEmail(addr) => assert_eq!(addr, "not-an-email"),
            other => panic!("unexpected error: {other}"),
        }
    }
}

mod role_tests {
    use super::*;

    #[test]
    fn test_serde_uses_snake_case() {
        let json = serde_json::to_string(&UserRole::LegalOfficer).unwrap();
        assert_eq!(json, "\"legal_officer\"");

        let back: UserRole = serde_json::from_str("\"investigator\"").unwrap();
        assert_eq!(back, UserRole::Investigator);
    }

    #[test]
    fn test_parse_rejects_unknown_role() {
        let err = UserRole::parse("superuser").unwrap_err();
        assert!(matches!(err, PartyError::UnknownRole(_)));
    }

    #[test]
    fn test_only_adjusters_adjudicate() {
        let roles = [
            UserRole::Claimant,
            UserRole::Adjuster,
            UserRole::Insurer,
            UserRole::Investigator,
            UserRole::LegalOfficer,
        ];
        let adjudicators: Vec<_> = roles.iter().filter(|r| r.can_adjudicate()).collect();
        assert_eq!(adjudicators, vec![&UserRole::Adjuster]);
    }
}
