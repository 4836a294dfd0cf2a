use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use routemap::{Method, Router, UriTemplate};

fn router_find(c: &mut Criterion) {
    let mut group = c.benchmark_group("router-find");

    group.bench_function("single-template", |b| {
        let mut router: Router<usize> = Router::new();
        router.insert("GET", "/hello/{name}", 1);
        b.iter_with_large_drop(|| router.find("/hello/world"))
    });

    group.bench_function("static-behind-templates", |b| {
        let mut router: Router<usize> = Router::new();
        for i in 0..32 {
            router.insert("GET", &format!("/t{}/{{id}}", i), i);
        }
        router.insert("GET", "/static/path", 100);
        b.iter_with_large_drop(|| router.dispatch(&Method::GET, "/static/path"))
    });

    group.bench_function("explode", |b| {
        let template = UriTemplate::compile("/files{/path*}").unwrap();
        b.iter_with_large_drop(|| template.match_target("/files/a/b/c/d/e"))
    });
}

fn router_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("router-insert");

    group.bench_function("single-template", |b| {
        b.iter_batched_ref(
            Router::new,
            |router: &mut Router<usize>| {
                router.insert("GET", "/hello/{name}", 1);
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, router_find, router_insert);
criterion_main!(benches);
