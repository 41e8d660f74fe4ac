//! Step definitions for the binding scenarios.

use anyhow::{Result, anyhow, ensure};
use config_binder::{BindError, DeferredState, serialize_for_display};
use rstest_bdd_macros::{given, then, when};
use serde_json::json;

use crate::fixtures::{BindingWorld, PgTarget};

#[given("an empty configuration store")]
fn empty_store(binding_world: &BindingWorld) {
    binding_world.edit_store(|_| config_binder::ConfigStore::new());
}

#[given("the store names database {database}")]
fn store_database(binding_world: &BindingWorld, database: String) {
    binding_world.edit_store(|store| store.with_value("pg:database", database));
}

#[given("the store holds a role blob with permission {permission}")]
fn store_role(binding_world: &BindingWorld, permission: String) {
    let blob = json!({ "permission": permission }).to_string();
    binding_world.edit_store(|store| store.with_value("pg:role", blob));
}

#[given("the store holds users {first} and {second}")]
fn store_users(binding_world: &BindingWorld, first: String, second: String) {
    let users = json!([{ "username": first }, { "username": second }]);
    binding_world.edit_store(|store| store.with_structured("pg:users", users));
}

#[given("the store holds a secure superuser password")]
fn store_password(binding_world: &BindingWorld) {
    binding_world.edit_store(|store| store.with_secret("pg:superuserPassword", "hunter2"));
}

#[given("a target whose database is already {database}")]
fn prepopulated_target(binding_world: &BindingWorld, database: String) {
    binding_world.target.set(PgTarget {
        database,
        ..PgTarget::default()
    });
}

fn bind_into(binding_world: &BindingWorld, mut target: PgTarget) -> Result<()> {
    let store = binding_world
        .store
        .take()
        .ok_or_else(|| anyhow!("configuration store not initialised"))?;
    if let Err(err) = store.source("pg").bind(&mut target) {
        binding_world.error.set(err);
    }
    binding_world.target.set(target);
    binding_world.store.set(store);
    Ok(())
}

#[when("the pg namespace is bound into a fresh target")]
fn bind_fresh(binding_world: &BindingWorld) -> Result<()> {
    bind_into(binding_world, PgTarget::default())
}

#[when("the pg namespace is bound into the target")]
fn bind_existing(binding_world: &BindingWorld) -> Result<()> {
    let target = binding_world.target.take().unwrap_or_default();
    bind_into(binding_world, target)
}

fn bound_target(binding_world: &BindingWorld) -> Result<PgTarget> {
    if let Some(err) = binding_world.error.take() {
        return Err(anyhow!("binding failed: {err}"));
    }
    binding_world
        .target
        .take()
        .ok_or_else(|| anyhow!("no target was bound"))
}

#[then("binding fails with a missing key {key}")]
fn fails_with_missing(binding_world: &BindingWorld, key: String) -> Result<()> {
    let err = binding_world
        .error
        .take()
        .ok_or_else(|| anyhow!("expected binding to fail"))?;
    ensure!(
        matches!(err, BindError::MissingConfig { key: ref missing } if *missing == key),
        "unexpected error: {err}"
    );
    Ok(())
}

#[then("the database is {database}")]
fn database_is(binding_world: &BindingWorld, database: String) -> Result<()> {
    let target = bound_target(binding_world)?;
    ensure!(target.database == database, "database was {}", target.database);
    Ok(())
}

#[then("the role permission is {permission}")]
fn role_permission_is(binding_world: &BindingWorld, permission: String) -> Result<()> {
    let target = bound_target(binding_world)?;
    ensure!(
        target.role.permission == permission,
        "permission was {}",
        target.role.permission
    );
    Ok(())
}

#[then("the usernames are {names}")]
fn usernames_are(binding_world: &BindingWorld, names: String) -> Result<()> {
    let target = bound_target(binding_world)?;
    let actual: Vec<_> = target.users.iter().map(|u| u.username.as_str()).collect();
    let expected: Vec<_> = names.split(',').collect();
    ensure!(actual == expected, "usernames were {actual:?}");
    Ok(())
}

#[then("the superuser password is a pending secret")]
fn password_is_pending(binding_world: &BindingWorld) -> Result<()> {
    let target = bound_target(binding_world)?;
    let password = target
        .superuser_password
        .as_ref()
        .ok_or_else(|| anyhow!("password was not bound"))?;
    ensure!(password.is_secret(), "password is not marked secret");
    ensure!(
        matches!(password.state(), DeferredState::Pending(_)),
        "password holds a literal"
    );
    binding_world.target.set(target);
    Ok(())
}

#[then("the display form shows the string placeholder for the password")]
fn display_shows_placeholder(binding_world: &BindingWorld) -> Result<()> {
    let target = bound_target(binding_world)?;
    let shown = serialize_for_display(&target)?;
    ensure!(!shown.contains("hunter2"), "display leaked the secret: {shown}");
    ensure!(
        shown.contains(r#""superuser_password":"[StringOutput]""#),
        "placeholder missing: {shown}"
    );
    Ok(())
}
