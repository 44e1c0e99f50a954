//! Dependency Resolver Tests

use std::sync::{Arc, Mutex};

use hierophant_domain::{Error, Key, instance};
use hierophant_infrastructure::di::{Container, depend, depend_decorator};

use super::support::{Converse, Log, Recorder, resolve_text, text};

#[test]
fn test_depend_passes_values_in_key_order() {
    let container = Container::new();
    let first = Key::new("first");
    let second = Key::new("second");
    let joined = Key::new("joined");

    container.provide_fn(&first, || text("one"));
    container.provide_fn(&second, || text("two"));
    container.provide(
        &joined,
        depend(&[&second, &first], |deps| {
            assert_eq!(deps.len(), 2);
            let a = deps.get::<String>(0)?;
            let b = deps.get::<String>(1)?;
            Ok(instance(format!("{a},{b}")))
        }),
    );

    assert_eq!(resolve_text(&container, &joined), "two,one");
}

#[test]
fn test_depend_resolves_in_listed_order() {
    let container = Container::new();
    let order = Arc::new(Mutex::new(Vec::new()));
    let keys: Vec<Key> = ["k1", "k2", "k3"].into_iter().map(Key::new).collect();

    for key in &keys {
        let order = Arc::clone(&order);
        let name = key.name().to_string();
        container.provide_fn(key, move || {
            order.lock().unwrap().push(name.clone());
            text(&name)
        });
    }

    let target = Key::new("target");
    container.provide(
        &target,
        depend(&[&keys[2], &keys[0], &keys[1]], |deps| {
            Ok(instance(deps.len()))
        }),
    );

    assert_eq!(*container.resolve_as::<usize>(&target).unwrap(), 3);
    assert_eq!(*order.lock().unwrap(), vec!["k3", "k1", "k2"]);
}

#[test]
fn test_depend_without_dependencies() {
    let container = Container::new();
    let key = Key::new("constant");

    container.provide(
        &key,
        depend(&[], |deps| {
            assert!(deps.is_empty());
            text("no deps")
        }),
    );

    assert_eq!(resolve_text(&container, &key), "no deps");
}

#[test]
fn test_depend_dependency_failure_skips_factory() {
    let container = Container::new();
    let missing = Key::new("missing");
    let dependent = Key::new("dependent");

    container.provide(
        &dependent,
        depend(&[&missing], |_| panic!("factory must not run")),
    );

    match container.resolve(&dependent) {
        Err(Error::NoProviders { key }) => assert_eq!(key, missing),
        other => panic!("Expected NoProviders error, got {other:?}"),
    }
}

#[test]
fn test_dependencies_get_out_of_range() {
    let container = Container::new();
    let key = Key::new("greedy");

    container.provide(&key, depend(&[], |deps| deps.get::<String>(0).map(instance)));

    assert!(matches!(
        container.resolve(&key),
        Err(Error::Factory { .. })
    ));
}

#[test]
fn test_dependencies_type_mismatch_names_dependency() {
    let container = Container::new();
    let number = Key::new("number");
    let consumer = Key::new("consumer");

    container.provide_value(&number, 12_u64);
    container.provide(
        &consumer,
        depend(&[&number], |deps| {
            let text = deps.get::<String>(0)?;
            Ok(instance(text.len()))
        }),
    );

    match container.resolve(&consumer) {
        Err(Error::TypeMismatch { key, .. }) => assert_eq!(key, number),
        other => panic!("Expected TypeMismatch error, got {other:?}"),
    }
}

#[test]
fn test_converse_depends_on_log() {
    let container = Container::new();
    let log = Key::new("log");
    let converse = Key::new("converse");
    let recorder = Recorder::default();

    container.provide_value(&log, recorder.log());
    container.provide(
        &converse,
        container.depend(&[&log], |deps| {
            let logger = deps.get::<Log>(0)?;
            let respond: Converse = Arc::new(move |messages: &[&str]| {
                logger(messages);
                format!("there were {} messages", messages.len())
            });
            Ok(instance(respond))
        }),
    );

    let respond = container.resolve_as::<Converse>(&converse).unwrap();
    let result = respond(["Hello", "World"].as_slice());

    assert_eq!(result, "there were 2 messages");
    assert_eq!(recorder.calls(), vec![vec!["Hello", "World"]]);
}

#[test]
fn test_decorator_with_dependency() {
    let container = Container::new();
    let log = Key::new("log");
    let converse = Key::new("converse");
    let recorder = Recorder::default();

    container.provide_value(&log, recorder.log());
    container.provide(
        &converse,
        depend(&[&log], |deps| {
            let logger = deps.get::<Log>(0)?;
            let respond: Converse = Arc::new(move |messages: &[&str]| {
                logger(messages);
                format!("there were {} messages", messages.len())
            });
            Ok(instance(respond))
        }),
    );
    container.decorate(
        &converse,
        depend_decorator(&[&log], |deps, value| {
            let logger = deps.get::<Log>(0)?;
            let inner = value
                .downcast_ref::<Converse>()
                .cloned()
                .ok_or_else(|| Error::factory("converse is not a function"))?;
            let logged: Converse = Arc::new(move |messages: &[&str]| {
                let mut line = vec!["Calling converse"];
                line.extend_from_slice(messages);
                logger(line.as_slice());
                inner(messages)
            });
            Ok(instance(logged))
        }),
    );

    let respond = container.resolve_as::<Converse>(&converse).unwrap();
    let result = respond(["Hello", "World"].as_slice());

    assert_eq!(result, "there were 2 messages");
    assert_eq!(
        recorder.calls(),
        vec![
            vec!["Calling converse", "Hello", "World"],
            vec!["Hello", "World"],
        ]
    );
}

#[test]
fn test_decorator_dependencies_resolved_per_application() {
    let container = Container::new();
    let suffix = Key::new("suffix");
    let word = Key::new("word");
    let resolutions = Arc::new(Mutex::new(0_usize));

    let counter = Arc::clone(&resolutions);
    container.provide_fn(&suffix, move || {
        *counter.lock().unwrap() += 1;
        text("!")
    });
    container.provide_fn(&word, || text("hey"));
    container.decorate(
        &word,
        depend_decorator(&[&suffix], |deps, value| {
            let suffix = deps.get::<String>(0)?;
            let word = value.downcast_ref::<String>().cloned().unwrap_or_default();
            Ok(instance(format!("{word}{suffix}")))
        }),
    );

    assert_eq!(resolve_text(&container, &word), "hey!");
    assert_eq!(resolve_text(&container, &word), "hey!");
    assert_eq!(*resolutions.lock().unwrap(), 2);
}
