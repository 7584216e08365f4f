use super::*;
use std::str::FromStr;
use uuid::Uuid;

#[test]
fn test_typed_id_round_trips_uuid() {
    let uuid = Uuid::new_v4();
    let id = BudgetId::from_uuid(uuid);
    assert_eq!(id.into_inner(), uuid);
    assert_eq!(BudgetId::from(uuid), id);
}

#[test]
fn test_new_ids_are_distinct() {
    assert_ne!(UserId::new(), UserId::new());
}

#[test]
fn test_typed_id_display_matches_uuid() {
    let uuid = Uuid::new_v4();
    assert_eq!(CategoryId::from_uuid(uuid).to_string(), uuid.to_string());
}

#[test]
fn test_typed_id_from_str() {
    let uuid = Uuid::new_v4();
    let id = TransactionId::from_str(&uuid.to_string()).unwrap();
    assert_eq!(id.into_inner(), uuid);
    assert!(TransactionId::from_str("invalid").is_err());
}

#[test]
fn test_typed_id_serializes_transparently() {
    let uuid = Uuid::new_v4();
    let json = serde_json::to_string(&UserId::from_uuid(uuid)).unwrap();
    assert_eq!(json, format!("\"{uuid}\""));
}
