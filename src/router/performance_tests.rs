// Performance-focused tests for router scalability
//
// These check that lookup cost follows the path, not the number of routes,
// and that heavily overlapping placeholders stay usable.

use super::{Method, Router};
use std::time::Instant;

#[test]
fn test_router_performance_with_many_routes() {
    let mut builder = Router::builder();
    for i in 0..500 {
        builder
            .insert(
                &format!("/api/v1/resource{i}/{{id}}"),
                Method::Get,
                format!("handler_{i}"),
            )
            .unwrap();
    }
    let router = builder.build();

    let start = Instant::now();
    for _ in 0..1000 {
        let matched = router.resolve("/api/v1/resource250/123", Method::Get).unwrap();
        assert_eq!(matched.handler, "handler_250");
    }
    let duration = start.elapsed();

    assert!(
        duration.as_millis() < 50,
        "Router performance degraded: {}ms for 1000 lookups with 500 routes",
        duration.as_millis()
    );
}

#[test]
fn test_shared_prefixes_are_compressed() {
    let mut builder = Router::builder();
    for i in 0..100 {
        builder
            .insert(&format!("/api/v1/users/{i}"), Method::Get, i)
            .unwrap();
    }

    // root, "/api/v1/users/", then one node per distinct first digit and the
    // remaining suffixes; far fewer than one chain per route.
    assert!(builder.node_count() < 130, "node count {}", builder.node_count());

    let router = builder.build();
    for i in 0..100 {
        let path = format!("/api/v1/users/{i}");
        assert_eq!(*router.resolve(&path, Method::Get).unwrap().handler, i);
    }
}

#[test]
fn test_backtracking_over_many_placeholder_siblings() {
    let mut builder = Router::builder();
    for i in 0..50 {
        builder
            .insert(&format!("/s/{{p{i}}}/leaf{i}"), Method::Get, i)
            .unwrap();
    }
    let router = builder.build();

    let start = Instant::now();
    for _ in 0..100 {
        let matched = router.resolve("/s/value/leaf49", Method::Get).unwrap();
        assert_eq!(*matched.handler, 49);
        assert_eq!(matched.get_path_param("p49"), Some("value"));
    }
    assert!(
        start.elapsed().as_millis() < 100,
        "backtracking took {}ms",
        start.elapsed().as_millis()
    );
}
