//! Tests for domain_policy

use chrono::NaiveDate;
use serde_json::json;

use core_kernel::{CoveragePeriod, UserId};
use domain_policy::{Policy, PolicyError, PolicyStatus};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn annual_policy() -> Policy {
    Policy::new(
        UserId::new_v7(),
        UserId::new_v7(),
        CoveragePeriod::bounded(date(2025, 1, 1), date(2025, 12, 31)).unwrap(),
        json!({"coverage_limit": 50000, "deductible": 500}),
    )
}

#[test]
fn test_new_policy_is_active() {
    let policy = annual_policy();
    assert_eq!(policy.status, PolicyStatus::Active);
    assert!(policy.policy_number.starts_with("POL-"));
}

#[test]
fn test_in_force_within_period() {
    let policy = annual_policy();
    assert!(policy.in_force_on(date(2025, 6, 15)));
    assert!(policy.in_force_on(date(2025, 1, 1)));
    assert!(policy.in_force_on(date(2025, 12, 31)));
}

#[test]
fn test_not_in_force_outside_period() {
    let policy = annual_policy();
    assert!(!policy.in_force_on(date(2024, 12, 31)));
    assert!(!policy.in_force_on(date(2026, 1, 1)));
}

#[test]
fn test_cancelled_policy_not_in_force() {
    let mut policy = annual_policy();
    policy.cancel(date(2025, 6, 1)).unwrap();

    assert_eq!(policy.status, PolicyStatus::Cancelled);
    // Even dates before the cancellation no longer accept new claims
    assert!(!policy.in_force_on(date(2025, 3, 1)));
}

#[test]
fn test_cancel_twice_fails() {
    let mut policy = annual_policy();
    policy.cancel(date(2025, 6, 1)).unwrap();

    let result = policy.cancel(date(2025, 7, 1));
    assert!(matches!(result, Err(PolicyError::NotActive { .. })));
}

#[test]
fn test_expire_requires_bounded_period() {
    let mut policy = Policy::new(
        UserId::new_v7(),
        UserId::new_v7(),
        CoveragePeriod::from(date(2025, 1, 1)),
        json!({}),
    );
    assert!(matches!(policy.expire(), Err(PolicyError::OpenEnded)));
}

#[test]
fn test_expire_bounded_policy() {
    let mut policy = annual_policy();
    policy.expire().unwrap();
    assert_eq!(policy.status, PolicyStatus::Expired);
}

#[test]
fn test_details_round_trip() {
    let policy = annual_policy();
    let json = serde_json::to_string(&policy).unwrap();
    let back: Policy = serde_json::from_str(&json).unwrap();
    assert_eq!(back.details["coverage_limit"], 50000);
    assert_eq!(back.id, policy.id);
}
