use labelkit_core::{
    register_dataarray_accessor, register_dataset_accessor, register_for, Accessor,
    AccessorFactory, AccessorRegistrationError, DataArray, Dataset, HostKind,
    HOST_KIND_ATTRIBUTES,
};
use std::convert::Infallible;

struct Tagged(&'static str);

struct Summary {
    len: usize,
}

impl Accessor<DataArray> for Summary {
    type Error = Infallible;

    fn new(obj: &DataArray) -> Result<Self, Self::Error> {
        Ok(Self { len: obj.len() })
    }
}

#[test]
fn registration_returns_the_same_factory() {
    let factory = AccessorFactory::<Dataset>::infallible(|_| Tagged("returned"));
    let returned = register_dataset_accessor("reg_returns_same")
        .register(factory.clone())
        .expect("free name should register");

    assert!(returned.ptr_eq(&factory));
    assert!(Dataset::has_attribute("reg_returns_same"));
}

#[test]
fn type_level_lookup_yields_registered_factory() {
    let factory = register_dataset_accessor("reg_type_level")
        .register(AccessorFactory::infallible(|_: &Dataset| Tagged("type")))
        .expect("free name should register");

    let looked_up = Dataset::accessor_factory("reg_type_level").expect("registered factory");
    assert!(looked_up.ptr_eq(&factory));
    assert!(Dataset::accessor_factory("reg_type_level_missing").is_none());
}

#[test]
fn second_registration_conflicts_and_keeps_first() {
    let first = register_dataset_accessor("geo")
        .register(AccessorFactory::infallible(|_: &Dataset| Tagged("first")))
        .expect("first geo registration");
    let second = AccessorFactory::<Dataset>::infallible(|_| Tagged("second"));

    let err = register_dataset_accessor("geo")
        .register(second.clone())
        .expect_err("second geo registration must fail");
    let conflict = err.as_conflict().expect("conflict error");
    assert_eq!(conflict.kind, "Dataset");
    assert_eq!(conflict.name, "geo");
    assert!(conflict.factory.ptr_eq(&second));

    let current = Dataset::accessor_factory("geo").expect("geo still registered");
    assert!(current.ptr_eq(&first));
    assert!(!current.ptr_eq(&second));

    let ds = Dataset::new();
    let tagged = ds.accessor::<Tagged>("geo").expect("first factory still serves");
    assert_eq!(tagged.0, "first");
}

#[test]
fn builtin_attributes_conflict() {
    let err = register_dataarray_accessor("mean")
        .register(AccessorFactory::infallible(|_: &DataArray| Tagged("mean")))
        .expect_err("builtin method must conflict");
    assert!(matches!(err, AccessorRegistrationError::Conflict(_)));

    let err = register_dataset_accessor("variables")
        .register(AccessorFactory::infallible(|_: &Dataset| Tagged("vars")))
        .expect_err("builtin field must conflict");
    assert!(matches!(err, AccessorRegistrationError::Conflict(_)));

    assert!(DataArray::accessor_factory("mean").is_none());
    assert!(Dataset::accessor_factory("variables").is_none());
}

#[test]
fn conflict_message_names_accessor_name_and_kind() {
    let err = register_dataarray_accessor("dims")
        .register_accessor::<Summary>()
        .expect_err("builtin must conflict");
    let message = err.to_string();
    assert!(message.contains("Summary"), "unexpected message: {message}");
    assert!(message.contains("`dims`"), "unexpected message: {message}");
    assert!(message.contains("`DataArray`"), "unexpected message: {message}");
}

#[test]
fn host_kinds_have_independent_tables() {
    register_dataarray_accessor("reg_shared_name")
        .register(AccessorFactory::infallible(|_: &DataArray| Tagged("array")))
        .expect("array registration");
    register_dataset_accessor("reg_shared_name")
        .register(AccessorFactory::infallible(|_: &Dataset| Tagged("dataset")))
        .expect("same name on the other kind is free");

    let array = DataArray::new(["x"], vec![1.0]).expect("array");
    let ds = Dataset::new();
    assert_eq!(
        array.accessor::<Tagged>("reg_shared_name").expect("array accessor").0,
        "array"
    );
    assert_eq!(
        ds.accessor::<Tagged>("reg_shared_name").expect("dataset accessor").0,
        "dataset"
    );
}

#[test]
fn invalid_names_are_rejected() {
    for name in ["", "9lives", "has space", "dash-ed"] {
        let err = register_for::<Dataset>(name)
            .register(AccessorFactory::infallible(|_: &Dataset| Tagged("bad")))
            .expect_err("invalid name must fail");
        assert!(matches!(err, AccessorRegistrationError::InvalidName(_)));
        assert!(!Dataset::has_attribute(name));
    }
}

#[test]
fn accessor_trait_registration_builds_from_instance() {
    register_dataarray_accessor("reg_summary")
        .register_accessor::<Summary>()
        .expect("summary registration");
    assert!(DataArray::registered_accessors().contains(&"reg_summary".to_string()));

    let array = DataArray::new(["time"], vec![1.0, 2.0, 3.0]).expect("array");
    let summary = array.accessor::<Summary>("reg_summary").expect("summary");
    assert_eq!(summary.len, 3);
}

#[test]
fn register_fn_accepts_fallible_closure() {
    let factory = register_dataset_accessor("reg_fallible")
        .register_fn(|ds: &Dataset| {
            if ds.is_empty() {
                Err("dataset has no variables")
            } else {
                Ok(Tagged("ok"))
            }
        })
        .expect("fallible registration");
    assert!(Dataset::accessor_factory("reg_fallible")
        .expect("registered")
        .ptr_eq(&factory));
}

#[test]
fn builtin_names_are_reported_as_attributes() {
    for name in DataArray::BUILTIN_ATTRIBUTES {
        assert!(DataArray::has_attribute(name), "{name} should be an attribute");
    }
    assert!(Dataset::has_attribute("get"));
    assert!(!Dataset::has_attribute("reg_never_registered"));
}

#[test]
fn trait_methods_and_slot_field_conflict_on_both_kinds() {
    for name in ["accessor_slots", "accessor_table", "accessors", "clone", "eq", "fmt"] {
        let err = register_dataarray_accessor(name)
            .register(AccessorFactory::infallible(|_: &DataArray| Tagged("array")))
            .expect_err("array attribute must conflict");
        assert!(matches!(err, AccessorRegistrationError::Conflict(_)), "{name}");
        assert!(DataArray::accessor_factory(name).is_none(), "{name}");

        let err = register_dataset_accessor(name)
            .register(AccessorFactory::infallible(|_: &Dataset| Tagged("dataset")))
            .expect_err("dataset attribute must conflict");
        assert!(matches!(err, AccessorRegistrationError::Conflict(_)), "{name}");
        assert!(Dataset::accessor_factory(name).is_none(), "{name}");
    }

    for name in HOST_KIND_ATTRIBUTES {
        assert!(DataArray::is_builtin_attribute(name), "{name}");
        assert!(Dataset::is_builtin_attribute(name), "{name}");
    }
    assert!(!Dataset::is_builtin_attribute("reg_shared_name"));
}
