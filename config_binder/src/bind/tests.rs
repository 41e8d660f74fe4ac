//! Unit tests for the resolver and the JSON merge rules.

use std::collections::BTreeMap;

use rstest::{fixture, rstest};
use serde_json::json;

use super::{KeyPath, bind_from_source, bind_json, bind_json_value};
use crate::deferred::{Deferred, DeferredState, IntInput, PendingHandle, StringInput};
use crate::error::BindError;
use crate::store::ConfigStore;
use crate::{Bind, CapabilityKind};

#[derive(Clone, Debug, Default, PartialEq, Bind)]
struct Role {
    #[bind(data = "permission")]
    permission: String,
    #[bind(data = "level")]
    level: u8,
}

#[derive(Debug, Default, Bind)]
struct Account {
    #[bind(config = "name", required)]
    name: String,
    #[bind(config = "port")]
    port: u16,
    #[bind(config = "enabled")]
    enabled: bool,
    #[bind(config = "ratio")]
    ratio: f32,
    #[bind(secret = "token")]
    token: StringInput,
    #[bind(config = "retries")]
    retries: IntInput,
    #[bind(data = "roles")]
    roles: Vec<Role>,
    #[bind(data = "primary")]
    primary: Option<Box<Role>>,
    #[bind(data = "labels")]
    labels: BTreeMap<String, String>,
    untagged: String,
}

#[fixture]
fn store() -> ConfigStore {
    ConfigStore::new()
        .with_value("acct:name", "svc")
        .with_value("acct:port", "8080")
        .with_value("acct:enabled", "true")
        .with_value("acct:ratio", "0.5")
        .with_secret("acct:token", "t0ken")
        .with_value("acct:retries", "3")
        .with_structured("acct:roles", json!([{"permission": "ro"}]))
        .with_value("acct:primary", r#"{"permission": "rw", "level": 2}"#)
        .with_structured("acct:labels", json!({"team": "data"}))
        .with_value("acct:untagged", "ignored")
}

#[rstest]
fn binds_every_field_kind(store: ConfigStore) -> anyhow::Result<()> {
    let mut account = Account::default();
    bind_from_source(&store, "acct", &mut account)?;

    assert_eq!(account.name, "svc");
    assert_eq!(account.port, 8080);
    assert!(account.enabled);
    assert!((account.ratio - 0.5).abs() < f32::EPSILON);
    assert_eq!(account.retries, Some(Deferred::literal(3)));
    assert_eq!(account.roles.len(), 1);
    assert_eq!(
        account.primary.as_deref(),
        Some(&Role {
            permission: "rw".into(),
            level: 2
        })
    );
    assert_eq!(account.labels.get("team").map(String::as_str), Some("data"));
    assert!(account.untagged.is_empty());

    let token = account.token.as_ref().expect("token bound");
    assert!(token.is_secret());
    assert!(matches!(token.state(), DeferredState::Pending(handle) if handle.key() == "acct:token"));
    Ok(())
}

#[rstest]
fn rebinding_scalars_is_idempotent(store: ConfigStore) -> anyhow::Result<()> {
    let mut account = Account::default();
    bind_from_source(&store, "acct", &mut account)?;
    bind_from_source(&store, "acct", &mut account)?;
    assert_eq!(account.name, "svc");
    assert_eq!(account.port, 8080);
    assert_eq!(account.retries, Some(Deferred::literal(3)));
    Ok(())
}

#[test]
fn zero_reads_do_not_overwrite() -> anyhow::Result<()> {
    let store = ConfigStore::new()
        .with_value("acct:port", "0")
        .with_value("acct:enabled", "false")
        .with_value("acct:name", "");
    let mut account = Account {
        name: "preset".into(),
        port: 9000,
        enabled: true,
        ..Account::default()
    };
    bind_from_source(&store, "acct", &mut account)?;
    assert_eq!(account.name, "preset");
    assert_eq!(account.port, 9000);
    assert!(account.enabled);
    Ok(())
}

#[test]
fn missing_required_key_is_reported() {
    let mut account = Account::default();
    let err = bind_from_source(&ConfigStore::new(), "acct", &mut account)
        .expect_err("name is required");
    assert!(matches!(err, BindError::MissingConfig { ref key } if key == "acct:name"));
}

#[test]
fn prepopulated_required_field_needs_no_key() -> anyhow::Result<()> {
    let mut account = Account {
        name: "preset".into(),
        ..Account::default()
    };
    bind_from_source(&ConfigStore::new(), "acct", &mut account)?;
    assert_eq!(account.name, "preset");
    Ok(())
}

#[test]
fn out_of_range_scalar_is_invalid() {
    let store = ConfigStore::new()
        .with_value("acct:name", "svc")
        .with_value("acct:port", "70000");
    let err = bind_from_source(&store, "acct", &mut Account::default())
        .expect_err("70000 does not fit u16");
    assert!(matches!(err, BindError::InvalidValue { expected: "u16", .. }));
}

#[test]
fn pending_deferred_is_not_replaced_by_literal() -> anyhow::Result<()> {
    let handle = PendingHandle::issue("elsewhere", CapabilityKind::Int);
    let mut account = Account {
        name: "svc".into(),
        retries: Some(Deferred::pending(handle.clone(), false)),
        ..Account::default()
    };
    let store = ConfigStore::new().with_value("acct:retries", "9");
    bind_from_source(&store, "acct", &mut account)?;
    assert_eq!(
        account.retries.as_ref().and_then(Deferred::handle),
        Some(&handle)
    );
    Ok(())
}

#[test]
fn secure_value_bound_as_literal_stays_secret() -> anyhow::Result<()> {
    let store = ConfigStore::new()
        .with_value("acct:name", "svc")
        .with_secret("acct:retries", "4");
    let mut account = Account::default();
    bind_from_source(&store, "acct", &mut account)?;
    let retries = account.retries.expect("retries bound");
    assert!(retries.is_secret());
    assert_eq!(retries.as_literal(), Some(&4));
    Ok(())
}

#[derive(Default, Bind)]
struct SecretScalar {
    #[bind(secret = "password")]
    password: String,
}

#[test]
fn secret_tag_on_plain_field_is_rejected() {
    let store = ConfigStore::new().with_value("db:password", "x");
    let err = bind_from_source(&store, "db", &mut SecretScalar::default())
        .expect_err("secret on a String");
    assert!(matches!(
        err,
        BindError::SecretOnNonDeferredField { ref field, .. } if field == "db:password"
    ));
}

#[derive(Default, Bind)]
struct SecretHosts {
    #[bind(secret = "hosts")]
    hosts: Vec<String>,
}

#[derive(Default, Bind)]
struct SecretLimits {
    #[bind(secret = "limits")]
    limits: BTreeMap<String, u32>,
}

#[rstest]
#[case::vec(Box::new(SecretHosts::default()) as Box<dyn Bind>, "db:hosts", "sequence")]
#[case::map(Box::new(SecretLimits::default()) as Box<dyn Bind>, "db:limits", "map")]
fn secret_tag_on_collections_is_rejected(
    #[case] mut target: Box<dyn Bind>,
    #[case] expected_field: &str,
    #[case] expected_kind: &str,
) {
    let store = ConfigStore::new()
        .with_value("db:hosts", r#"["a"]"#)
        .with_value("db:limits", r#"{"a": 1}"#);
    let err = bind_from_source(&store, "db", target.as_mut()).expect_err("secret on a collection");
    assert!(
        matches!(
            err,
            BindError::SecretOnNonDeferredField { ref field, ref kind }
                if field == expected_field && kind == expected_kind
        ),
        "unexpected error: {err:?}"
    );
}

#[derive(Default, Bind)]
struct RequiredSecretScalar {
    #[bind(secret = "password", required)]
    password: String,
}

#[test]
fn missing_key_is_reported_before_secret_misuse() {
    let err = bind_from_source(&ConfigStore::new(), "db", &mut RequiredSecretScalar::default())
        .expect_err("required key absent");
    assert!(matches!(err, BindError::MissingConfig { ref key } if key == "db:password"));
}

#[derive(Debug, Default, Bind)]
struct Quotas {
    #[bind(config = "limits")]
    limits: BTreeMap<String, u32>,
}

#[test]
fn map_value_mismatch_does_not_echo_the_value() {
    let store = ConfigStore::new().with_secret("ns:limits", r#"{"a": "hunter2"}"#);
    let err = bind_from_source(&store, "ns", &mut Quotas::default()).expect_err("string into u32");
    assert!(
        matches!(
            err,
            BindError::TypeMismatch { ref path, ref expected, ref actual }
                if path == "ns:limits.a" && expected == "u32" && actual == "string"
        ),
        "unexpected error: {err:?}"
    );
    assert!(!err.to_string().contains("hunter2"));
}

#[test]
fn map_entries_before_a_rejected_one_are_kept() {
    let mut limits: BTreeMap<String, u32> = BTreeMap::new();
    let err = bind_json(r#"{"a": 1, "b": "x"}"#, &mut limits).expect_err("string into u32");
    assert!(matches!(err, BindError::TypeMismatch { ref path, .. } if path == "b"));
    assert_eq!(limits.get("a"), Some(&1));
}

#[derive(Debug, Default, Bind)]
struct Credentials {
    #[bind(data = "user")]
    user: String,
    #[bind(data = "password")]
    password: StringInput,
}

#[derive(Debug, Default, Bind)]
struct Upstream {
    #[bind(config = "provider")]
    provider: Credentials,
}

#[test]
fn secure_blob_yields_secret_nested_literals() -> anyhow::Result<()> {
    let store =
        ConfigStore::new().with_secret("ns:provider", r#"{"user": "app", "password": "hunter2"}"#);
    let mut upstream = Upstream::default();
    bind_from_source(&store, "ns", &mut upstream)?;

    let password = upstream.provider.password.as_ref().expect("password bound");
    assert!(password.is_secret());
    assert_eq!(password.as_literal().map(String::as_str), Some("hunter2"));
    assert_eq!(upstream.provider.user, "app");
    assert!(!format!("{upstream:?}").contains("hunter2"));
    Ok(())
}

#[derive(Default, Bind)]
struct WithTuple {
    #[bind(config = "pair")]
    pair: (u8, u8),
}

#[test]
fn tagged_unsupported_field_fails_when_reached() {
    let err = bind_from_source(&ConfigStore::new(), "t", &mut WithTuple::default())
        .expect_err("tuples are unsupported");
    assert!(matches!(err, BindError::UnsupportedFieldType { ref field, .. } if field == "t:pair"));
}

#[test]
fn malformed_blob_is_invalid_json() {
    let store = ConfigStore::new()
        .with_value("acct:name", "svc")
        .with_value("acct:primary", "{not json");
    let err = bind_from_source(&store, "acct", &mut Account::default())
        .expect_err("blob does not parse");
    assert!(matches!(err, BindError::InvalidJson { ref key, .. } if key == "acct:primary"));
}

#[test]
fn empty_blob_leaves_pointer_unallocated() -> anyhow::Result<()> {
    let store = ConfigStore::new()
        .with_value("acct:name", "svc")
        .with_value("acct:primary", "");
    let mut account = Account::default();
    bind_from_source(&store, "acct", &mut account)?;
    assert!(account.primary.is_none());
    Ok(())
}

#[test]
fn arrays_append_across_calls() -> anyhow::Result<()> {
    let mut roles: Vec<Role> = Vec::new();
    bind_json(r#"[{"permission": "a"}, {"permission": "b"}]"#, &mut roles)?;
    let before = roles.clone();
    bind_json(r#"[{"permission": "c"}]"#, &mut roles)?;
    assert_eq!(roles.len(), 3);
    assert_eq!(roles.get(..2), Some(before.as_slice()));
    Ok(())
}

#[test]
fn fixed_arrays_overwrite_from_the_start() -> anyhow::Result<()> {
    let mut slots = [1_u8, 2, 3];
    bind_json("[7, 8]", &mut slots)?;
    assert_eq!(slots, [7, 8, 3]);
    let err = bind_json("[1, 2, 3, 4]", &mut slots).expect_err("too many elements");
    assert!(matches!(err, BindError::TypeMismatch { .. }));
    Ok(())
}

#[test]
fn maps_merge_entries() -> anyhow::Result<()> {
    let mut labels = BTreeMap::from([(String::from("keep"), 1), (String::from("swap"), 2)]);
    bind_json(r#"{"swap": 20, "new": 3}"#, &mut labels)?;
    assert_eq!(
        labels,
        BTreeMap::from([
            (String::from("keep"), 1),
            (String::from("new"), 3),
            (String::from("swap"), 20),
        ])
    );
    Ok(())
}

#[test]
fn null_and_blank_inputs_are_no_ops() -> anyhow::Result<()> {
    let mut role = Role {
        permission: "ro".into(),
        level: 1,
    };
    bind_json("   ", &mut role)?;
    bind_json(r#"{"permission": null}"#, &mut role)?;
    bind_json_value(serde_json::Value::Null, &mut role)?;
    assert_eq!(role.permission, "ro");
    Ok(())
}

#[rstest]
#[case::array_into_struct(r#"{"primary": []}"#, "primary")]
#[case::object_into_vec(r#"{"roles": {}}"#, "roles")]
#[case::string_into_int(r#"{"roles": [{"level": "high"}]}"#, "roles[0].level")]
#[case::out_of_range(r#"{"roles": [{}, {"level": 300}]}"#, "roles[1].level")]
fn mismatches_carry_the_key_path(#[case] input: &str, #[case] expected_path: &str) {
    let err = bind_json(input, &mut Account::default()).expect_err("shape mismatch");
    assert!(
        matches!(err, BindError::TypeMismatch { ref path, .. } if path == expected_path),
        "unexpected error: {err:?}"
    );
}

#[test]
fn top_level_scalar_into_struct_is_a_mismatch() {
    let err = bind_json("5", &mut Role::default()).expect_err("scalar into struct");
    assert!(matches!(err, BindError::TypeMismatch { ref path, .. } if path == "$"));
}

#[test]
fn json_floats_truncate_into_integers() -> anyhow::Result<()> {
    let mut role = Role::default();
    bind_json(r#"{"level": 3.9}"#, &mut role)?;
    assert_eq!(role.level, 3);
    Ok(())
}

#[test]
fn json_deferred_fields_take_literals() -> anyhow::Result<()> {
    let mut account = Account::default();
    bind_json(r#"{"retries": 2.0}"#, &mut account)?;
    assert_eq!(account.retries, Some(Deferred::literal(2)));
    Ok(())
}

#[test]
fn key_paths_render_namespaces_and_indices() {
    let path = KeyPath::namespaced("pg").key("provider").key("users").index(1);
    assert_eq!(path.to_string(), "pg:provider.users[1]");
    assert_eq!(KeyPath::namespaced("").key("x").to_string(), "x");
}
