use std::collections::{BTreeMap, HashMap};

use config_binder::{
    Bind, BoolInput, FloatInput, IntInput, StringInput, ConfigStore, bind_from_source,
};

#[derive(Default, Bind)]
struct Nested {
    #[bind(data = "flag")]
    flag: bool,
}

/// Every supported kind, plus tagged fields whose types fail at bind time.
#[derive(Default, Bind)]
struct Everything {
    #[bind(config = "b")]
    b: bool,
    #[bind(config = "i8")]
    small: i8,
    #[bind(config = "usize")]
    size: usize,
    #[bind(config = "f32")]
    single: f32,
    #[bind(config = "s")]
    text: String,
    #[bind(data = "hash")]
    hash: HashMap<String, u8>,
    #[bind(data = "tree")]
    tree: BTreeMap<String, Vec<String>>,
    #[bind(data = "nested")]
    nested: Nested,
    #[bind(data = "boxed")]
    boxed: Option<Box<Nested>>,
    #[bind(data = "list")]
    list: Vec<Nested>,
    #[bind(data = "array")]
    array: [u16; 2],
    #[bind(secret = "si")]
    si: StringInput,
    #[bind(config = "bi")]
    bi: BoolInput,
    #[bind(config = "ii")]
    ii: IntInput,
    #[bind(config = "fi")]
    fi: FloatInput,
    #[bind(config = "pair")]
    pair: (u8, u8),
    #[bind(config = "letter")]
    letter: char,
    #[bind(skip)]
    cache: std::rc::Rc<String>,
}

fn main() {
    let mut target = Everything::default();
    let result = bind_from_source(&ConfigStore::new(), "ns", &mut target);
    assert!(result.is_err());
}
