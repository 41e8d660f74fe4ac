//! Shared fixtures for the binding scenarios.

use config_binder::{Bind, BindError, ConfigStore, StringInput};
use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;

/// Role granted to a database user.
#[derive(Debug, Default, Clone, PartialEq, Eq, Bind)]
pub struct Role {
    #[bind(data = "permission")]
    pub permission: String,
}

/// Database user entry.
#[derive(Debug, Default, Clone, PartialEq, Eq, Bind)]
pub struct User {
    #[bind(data = "username")]
    pub username: String,
}

/// Target bound from the `pg` namespace.
#[derive(Debug, Default, Bind)]
pub struct PgTarget {
    #[bind(config = "database", required)]
    pub database: String,
    #[bind(data = "role")]
    pub role: Role,
    #[bind(data = "users")]
    pub users: Vec<User>,
    #[bind(secret = "superuserPassword")]
    pub superuser_password: StringInput,
}

/// Scenario state shared between steps.
#[derive(Debug, Default, ScenarioState)]
pub struct BindingWorld {
    pub store: Slot<ConfigStore>,
    pub target: Slot<PgTarget>,
    pub error: Slot<BindError>,
}

impl BindingWorld {
    /// Applies `edit` to the current store, starting from an empty one.
    pub fn edit_store(&self, edit: impl FnOnce(ConfigStore) -> ConfigStore) {
        let store = self.store.take().unwrap_or_default();
        self.store.set(edit(store));
    }
}

/// Creates clean scenario state.
#[fixture]
pub fn binding_world() -> BindingWorld {
    BindingWorld::default()
}
