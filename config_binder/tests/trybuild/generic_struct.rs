use config_binder::{Bind, Field, ConfigStore};

#[derive(Default, Bind)]
struct Wrapper<T: Field + Default> {
    #[bind(data = "inner")]
    inner: T,
    #[bind(config = "label")]
    label: String,
}

fn main() {
    let store = ConfigStore::new().with_value("ns:inner", "7");
    let mut target: Wrapper<u32> = Wrapper::default();
    let result = store.source("ns").bind(&mut target);
    assert!(result.is_ok());
    assert_eq!(target.inner, 7);
    let _ = target.label;
}
