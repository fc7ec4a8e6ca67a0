//! Unit tests for Role and User entities

use charisma_domain::entities::{GeoPoint, Role, RoleStatus, User, UserStatus};

#[test]
fn test_role_defaults() {
    let role = Role::new("editor");
    assert_eq!(role.name, "editor");
    assert_eq!(role.status, RoleStatus::Active);
    assert!(role.permissions.is_empty());
    assert!(!role.id.is_empty());
    assert_eq!(role.created_at, role.updated_at);
}

#[test]
fn test_role_serializes_camel_case() {
    let mut role = Role::new("editor");
    role.business_id = Some("b1".into());
    let value = serde_json::to_value(&role).unwrap();
    assert_eq!(value["businessId"], "b1");
    assert_eq!(value["status"], "active");
    assert!(value.get("createdAt").is_some());
}

#[test]
fn test_role_status_parse() {
    assert_eq!("disabled".parse::<RoleStatus>().unwrap(), RoleStatus::Disabled);
    assert!("archived".parse::<RoleStatus>().is_err());
}

#[test]
fn test_user_password_never_serialized() {
    let mut user = User::new("Ada", "+15550001", "role-1");
    user.password = Some("secret".into());
    let value = serde_json::to_value(&user).unwrap();
    assert!(value.get("password").is_none());
    assert_eq!(value["status"], "pending");
    assert_eq!(user.status, UserStatus::Pending);
}

#[test]
fn test_user_display_name() {
    let mut user = User::new("Ada", "+15550001", "role-1");
    assert_eq!(user.display_name(), "Ada");
    user.last_name = Some("Lovelace".into());
    assert_eq!(user.display_name(), "Ada Lovelace");
}

#[test]
fn test_geo_point_range_validation() {
    assert!(GeoPoint::new(-122.4, 37.8).is_ok());
    assert!(GeoPoint::new(181.0, 0.0).is_err());
    assert!(GeoPoint::new(0.0, -91.0).is_err());
}

#[test]
fn test_geo_point_distance() {
    let paris = GeoPoint::new(2.3522, 48.8566).unwrap();
    let london = GeoPoint::new(-0.1276, 51.5072).unwrap();
    let d = paris.distance_km(&london);
    assert!((330.0..360.0).contains(&d), "distance was {d}");
    assert!(paris.distance_km(&paris) < 1e-9);
}

#[test]
fn test_geo_point_serializes_as_geojson() {
    let point = GeoPoint::new(1.0, 2.0).unwrap();
    let value = serde_json::to_value(point).unwrap();
    assert_eq!(value, serde_json::json!({"type": "Point", "coordinates": [1.0, 2.0]}));
}
