//! Loading field configuration from disk and validating through it.

use std::fs;

use fieldcheck_validator::prelude::*;
use pretty_assertions::assert_eq;

#[test]
fn json_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("email.json");
    fs::write(
        &path,
        r#"{
            "label": "Work email",
            "type": "email",
            "rules": { "required": true, "maxLength": { "value": 40 } },
            "messages": { "DEFAULT": "Check {field}." }
        }"#,
    )
    .unwrap();

    let config = FieldConfig::from_path(&path).unwrap();
    let result = config.validate("not-an-email", None, None).unwrap();
    assert_eq!(result.failed_rules(), ["email"]);
    assert_eq!(
        result.messages(),
        ["Please enter a valid email address in Work email."]
    );

    let result = config.validate("", None, None).unwrap();
    assert_eq!(result.messages(), ["Work email is required."]);
}

#[cfg(feature = "toml")]
#[test]
fn toml_file_with_native_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("quantity.toml");
    fs::write(
        &path,
        r#"
        label = "Quantity"

        [rules]
        min = { value = 1 }
        step = { value = 2 }

        [messages]
        step = "{field} goes up in steps of {0}."
        "#,
    )
    .unwrap();

    let config = FieldConfig::from_path(&path).unwrap();
    assert!(config.validate("3", None, None).unwrap().valid());

    let result = config.validate("4", None, None).unwrap();
    assert_eq!(result.messages(), ["Quantity goes up in steps of 2."]);

    let snapshot: NativeConstraintSnapshot =
        serde_json::from_str(r#"{ "stepMismatch": true, "validationMessage": "" }"#).unwrap();
    let result = config.validate("4", Some(&snapshot), None).unwrap();
    assert_eq!(result.failed_rules(), ["stepMismatch"]);
    assert_eq!(result.messages(), ["Quantity goes up in steps of 2."]);
}

#[test]
fn bad_rule_in_file_is_a_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, r#"{ "rules": { "postcode": true } }"#).unwrap();

    let config = FieldConfig::from_path(&path).unwrap();
    let err = config.validate("12345", None, None).unwrap_err();
    assert_eq!(err, ConfigError::unknown_rule("postcode"));
}
