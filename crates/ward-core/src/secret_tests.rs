use super::*;

#[test]
fn provided_requires_ok() {
    let secret: Secret<String> = Secret::Provided("hunter2".to_string());
    assert_eq!(secret.require("api_key").unwrap(), "hunter2");
}

#[test]
fn not_provided_requires_err_naming_the_field() {
    let secret: Secret<String> = Secret::NotProvided;
    let err = secret.require("api_key").unwrap_err();
    assert!(err.to_string().contains("api_key"));
}

#[test]
fn deserializes_from_plain_option() {
    let provided: Secret<String> = serde_json::from_str("\"x\"").unwrap();
    assert_eq!(provided, Secret::Provided("x".to_string()));
    let absent: Secret<String> = serde_json::from_str("null").unwrap();
    assert_eq!(absent, Secret::NotProvided);
}
