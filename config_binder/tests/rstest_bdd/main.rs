//! Behavioural tests for `config_binder` using `rstest-bdd`.
//!
//! Fixtures live in [`fixtures`], step definitions in [`steps`], and
//! [`scenarios`] binds `tests/features/binding.feature` to them.

mod fixtures;
mod scenarios;
mod steps;
