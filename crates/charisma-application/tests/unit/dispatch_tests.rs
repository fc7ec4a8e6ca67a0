//! Tests for the dispatch contract types

use charisma_application::dispatch::{Reply, RequestContext};
use charisma_domain::error::Error;
use charisma_domain::value_objects::RequestIdentity;
use serde::Deserialize;
use serde_json::json;

#[test]
fn test_param_and_query_access() {
    let ctx = RequestContext::new()
        .with_param("id", "r1")
        .with_query("page", "2")
        .with_query("empty", "");

    assert_eq!(ctx.param("id").unwrap(), "r1");
    assert!(matches!(
        ctx.param("other").unwrap_err(),
        Error::InvalidArgument { .. }
    ));
    assert_eq!(ctx.query_parse::<u64>("page").unwrap(), Some(2));
    assert_eq!(ctx.query_str("empty"), None);
    assert_eq!(ctx.query_parse::<u64>("absent").unwrap(), None);
}

#[test]
fn test_query_parse_failure_is_invalid_argument() {
    let ctx = RequestContext::new().with_query("page", "two");
    let err = ctx.query_parse::<u64>("page").unwrap_err();
    assert!(err.to_string().contains("page"));
}

#[test]
fn test_body_as() {
    #[derive(Debug, Deserialize)]
    struct Body {
        name: String,
    }

    let ctx = RequestContext::new().with_body(json!({"name": "admin"}));
    assert_eq!(ctx.body_as::<Body>().unwrap().name, "admin");

    assert!(RequestContext::new().body_as::<Body>().is_err());
    let wrong = RequestContext::new().with_body(json!({"name": 3}));
    assert!(matches!(
        wrong.body_as::<Body>().unwrap_err(),
        Error::InvalidArgument { .. }
    ));
}

#[test]
fn test_require_identity() {
    assert!(matches!(
        RequestContext::new().require_identity().unwrap_err(),
        Error::Authentication { .. }
    ));

    let mut claims = serde_json::Map::new();
    claims.insert("sub".into(), json!("u1"));
    let ctx = RequestContext::new().with_identity(RequestIdentity::from_claims(claims).unwrap());
    assert_eq!(ctx.require_identity().unwrap().subject, "u1");
}

#[test]
fn test_reply_constructors() {
    assert_eq!(Reply::ok(&json!({"a": 1})).unwrap().status, 200);
    assert_eq!(Reply::created(&json!({})).unwrap().status, 201);
    assert_eq!(Reply::no_content(), Reply::new(204, None));

    let not_found = Reply::not_found("Role not found");
    assert_eq!(not_found.status, 404);
    assert_eq!(not_found.body, Some(json!({"error": "Role not found"})));
}
