//! Trybuild fixture verifying `#[bind(crate = "...")]` with a renamed import.

use config_binder as my_binder;
use my_binder::{ConfigStore, StringInput};

#[derive(Default, my_binder::Bind)]
#[bind(crate = "my_binder")]
struct Aliased {
    #[bind(config = "value")]
    value: String,
    #[bind(secret = "token")]
    token: StringInput,
}

fn main() {
    let store = ConfigStore::new().with_value("ns:value", "hello");
    let mut target = Aliased::default();
    let result: my_binder::BindResult<()> = store.source("ns").bind(&mut target);
    assert!(result.is_ok());
    let _ = &target.value;
    let _ = &target.token;
}
