//! Cycle Detection and Depth Limit Tests

use hierophant_domain::{Error, Key, instance};
use hierophant_infrastructure::config::ContainerConfig;
use hierophant_infrastructure::di::{
    Container, FanOut, aggregators, depend, depend_decorator, provider,
};

use super::support::{resolve_text, text};

fn wire_cycle(container: &Container, a: &Key, b: &Key) {
    container.provide(a, depend(&[b], |_| text("a")));
    container.provide(b, depend(&[a], |_| text("b")));
}

#[test]
fn test_two_key_cycle_detected() {
    let container = Container::new();
    let a = Key::new("a");
    let b = Key::new("b");
    wire_cycle(&container, &a, &b);

    match container.resolve(&a) {
        Err(Error::DependencyCycle { path }) => {
            assert_eq!(path, vec![a.clone(), b.clone(), a.clone()]);
        }
        other => panic!("Expected DependencyCycle error, got {other:?}"),
    }
}

#[test]
fn test_self_dependency_detected() {
    let container = Container::new();
    let key = Key::new("narcissus");
    container.provide(&key, depend(&[&key], |_| text("never")));

    match container.resolve(&key) {
        Err(Error::DependencyCycle { path }) => assert_eq!(path, vec![key.clone(), key.clone()]),
        other => panic!("Expected DependencyCycle error, got {other:?}"),
    }
}

#[test]
fn test_decorator_depending_on_own_key_detected() {
    let container = Container::new();
    let key = Key::new("self-decorated");
    container.provide_fn(&key, || text("value"));
    container.decorate(&key, depend_decorator(&[&key], |_, value| Ok(value)));

    assert!(matches!(
        container.resolve(&key),
        Err(Error::DependencyCycle { .. })
    ));
}

#[test]
fn test_diamond_is_not_a_cycle() {
    let container = Container::new();
    let base = Key::new("base");
    let left = Key::new("left");
    let right = Key::new("right");
    let top = Key::new("top");

    container.provide_fn(&base, || text("base"));
    container.provide(&left, depend(&[&base], |_| text("left")));
    container.provide(&right, depend(&[&base], |_| text("right")));
    container.provide(
        &top,
        depend(&[&left, &right], |deps| {
            Ok(instance(format!(
                "{}+{}",
                deps.get::<String>(0)?,
                deps.get::<String>(1)?
            )))
        }),
    );

    assert_eq!(resolve_text(&container, &top), "left+right");
}

#[test]
fn test_cycle_without_detection_hits_depth_limit() {
    let container = Container::with_config(ContainerConfig {
        detect_cycles: false,
        max_depth: 16,
        ..ContainerConfig::default()
    });
    let a = Key::new("a");
    let b = Key::new("b");
    wire_cycle(&container, &a, &b);

    match container.resolve(&a) {
        Err(Error::DepthExceeded { depth, .. }) => assert_eq!(depth, 16),
        other => panic!("Expected DepthExceeded error, got {other:?}"),
    }
}

#[test]
fn test_deep_chain_within_limit() {
    let container = Container::with_config(ContainerConfig {
        max_depth: 8,
        ..ContainerConfig::default()
    });
    let keys: Vec<Key> = (0..8).map(|i| Key::new(format!("level-{i}"))).collect();

    container.provide_fn(&keys[7], || text("bottom"));
    for pair in keys.windows(2) {
        container.provide(&pair[0], depend(&[&pair[1]], |deps| {
            Ok(instance(deps.get::<String>(0)?.as_str().to_owned()))
        }));
    }

    assert_eq!(resolve_text(&container, &keys[0]), "bottom");

    let deeper = Key::new("level-top");
    container.provide(&deeper, depend(&[&keys[0]], |_| text("too deep")));
    assert!(matches!(
        container.resolve(&deeper),
        Err(Error::DepthExceeded { .. })
    ));
}

#[test]
fn test_container_usable_after_cycle() {
    let container = Container::new();
    let a = Key::new("a");
    let b = Key::new("b");
    let healthy = Key::new("healthy");
    wire_cycle(&container, &a, &b);
    container.provide_fn(&healthy, || text("fine"));

    assert!(container.resolve(&a).is_err());
    assert_eq!(resolve_text(&container, &healthy), "fine");
    assert!(container.resolve(&b).is_err());
}

/// `plugins` fans out to a member that depends on `a`, while `a` calls the fan-out
fn wire_fan_out_cycle(container: &Container, a: &Key, plugins: &Key) {
    container.aggregate(plugins, aggregators::fan_out());
    container.provide(plugins, depend(&[a], |_| text("plugin")));
    container.provide(
        a,
        depend(&[plugins], |deps| {
            deps.get::<FanOut>(0)?.call_all()?;
            text("a")
        }),
    );
}

#[test]
fn test_cycle_through_fan_out_detected() {
    let container = Container::new();
    let a = Key::new("a");
    let plugins = Key::new("plugins");
    wire_fan_out_cycle(&container, &a, &plugins);

    match container.resolve(&a) {
        Err(Error::DependencyCycle { path }) => assert_eq!(path, vec![a.clone(), a.clone()]),
        other => panic!("Expected DependencyCycle error, got {other:?}"),
    }
}

#[test]
fn test_cycle_through_fan_out_without_detection_hits_depth_limit() {
    let container = Container::with_config(ContainerConfig {
        detect_cycles: false,
        max_depth: 16,
        ..ContainerConfig::default()
    });
    let a = Key::new("a");
    let plugins = Key::new("plugins");
    wire_fan_out_cycle(&container, &a, &plugins);

    assert!(matches!(
        container.resolve(&a),
        Err(Error::DepthExceeded { depth: 16, .. })
    ));
}

#[test]
fn test_cycle_through_container_resolve_detected() {
    let container = Container::new();
    let a = Key::new("a");
    let b = Key::new("b");

    let next = b.clone();
    container.provide(
        &a,
        provider(move |resolution| {
            resolution.container().resolve(&next)?;
            text("a")
        }),
    );
    let back = a.clone();
    container.provide(
        &b,
        provider(move |resolution| {
            resolution.container().resolve(&back)?;
            text("b")
        }),
    );

    match container.resolve(&a) {
        Err(Error::DependencyCycle { path }) => {
            assert_eq!(path, vec![a.clone(), b.clone(), a.clone()]);
        }
        other => panic!("Expected DependencyCycle error, got {other:?}"),
    }
}

#[test]
fn test_fan_out_called_after_resolution_starts_fresh() {
    let container = Container::new();
    let name = Key::new("name");
    let plugins = Key::new("plugins");

    container.provide_fn(&name, || text("bot"));
    container.aggregate(&plugins, aggregators::fan_out());
    container.provide(
        &plugins,
        depend(&[&name, &plugins], |_| text("member")),
    );
    container.provide(
        &plugins,
        depend(&[&name], |deps| {
            Ok(instance(format!("hello {}", deps.get::<String>(0)?)))
        }),
    );

    let fan_out = container.resolve_as::<FanOut>(&plugins).unwrap();
    let members = fan_out.members();

    // resolving `plugins` again outside any running resolution is not a cycle
    let greeting = members[1].call().unwrap();
    assert_eq!(greeting.downcast_ref::<String>().unwrap(), "hello bot");
    assert!(members[0].call().is_ok());
}
