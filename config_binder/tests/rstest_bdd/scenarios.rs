//! Binds the binding feature file to the step registry.

use crate::fixtures::{BindingWorld, binding_world};
use rstest_bdd_macros::scenarios;

scenarios!(
    "tests/features/binding.feature",
    fixtures = [binding_world: BindingWorld]
);
