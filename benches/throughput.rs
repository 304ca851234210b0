use criterion::{criterion_group, criterion_main, Criterion};
use cupcake::router::Router;
use cupcake::runtime_config::RouterConfig;
use cupcake::table::{build_router_with_config, RouteTable};
use http::Method;
use std::hint::black_box;
use std::sync::Arc;

fn example_table() -> &'static str {
    r#"
routes:
  - { method: GET, path: "/", handler: root_handler }
  - { method: GET, path: /zoo/animals, handler: get_animals }
  - { method: POST, path: /zoo/animals, handler: create_animal }
  - { method: GET, path: "/zoo/animals/{id:[0-9]+}", handler: get_animal }
  - { method: PUT, path: "/zoo/animals/{id}", handler: update_animal }
  - { method: DELETE, path: "/zoo/animals/{id}", handler: delete_animal }
  - { method: GET, path: "/zoo/animals/{id}/toys/{toy_id}", handler: animal_toy }
  - { method: GET, path: "/zoo/{category}/animals/{id}/habitats/{habitat_id}/sections/{section_id}", handler: habitat_section }
  - { method: POST, path: "/inventory/{warehouse_id}/feeds/{feed_id}/items/{item_id}/batches/{batch_id}", handler: post_item_batch }
  - { method: GET, path: "/complex/{a}/{b}/{c}/{d}/{e}/{f}/{g}/{h}/{i}", handler: complex_many_params }
  - { method: GET, path: "/static/*", handler: static_files }
"#
}

fn build(yaml: &str) -> Router<Arc<str>> {
    let table: RouteTable = serde_yaml::from_str(yaml).expect("failed to parse route table");
    // Timing every lookup would dominate the measurement.
    let config = RouterConfig {
        slow_match_threshold: None,
    };
    build_router_with_config(&table, config).expect("failed to build router")
}

fn bench_route_throughput(c: &mut Criterion) {
    let router = build(example_table());
    c.bench_function("route_match", |b| {
        let test_paths = [
            (Method::GET, "/zoo/animals/123"),
            (Method::GET, "/zoo/animals/123/toys/456"),
            (Method::GET, "/zoo/cats/animals/123/habitats/88/sections/5"),
            (Method::POST, "/inventory/1/feeds/2/items/3/batches/4"),
            (Method::GET, "/complex/1/2/3/4/5/6/7/8/9"),
            (Method::GET, "/static/css/app.css"),
        ];
        b.iter(|| {
            for (method, path) in test_paths.iter() {
                let res = router.route(method, path);
                black_box(&res);
            }
        })
    });
}

fn bench_static_lookup(c: &mut Criterion) {
    let mut builder = Router::builder();
    for i in 0..1000 {
        builder
            .insert(
                &format!("/api/v1/resource{i}/items"),
                cupcake::router::Method::Get,
                i,
            )
            .expect("valid pattern");
    }
    let router = builder.build();
    c.bench_function("static_lookup_1000_routes", |b| {
        b.iter(|| black_box(router.route(&Method::GET, black_box("/api/v1/resource999/items"))))
    });
}

criterion_group!(benches, bench_route_throughput, bench_static_lookup);
criterion_main!(benches);
