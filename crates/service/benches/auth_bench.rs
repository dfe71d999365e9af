use criterion::{criterion_group, criterion_main, Criterion};
use std::sync::Arc;

use service::auth::{AuthConfig, AuthService};
use service::auth::repository::mock::MockAuthRepository;
use service::auth::domain::{RegisterInput, LoginInput};

fn bench_login(c: &mut Criterion) {
    let repo = Arc::new(MockAuthRepository::default());
    let svc = AuthService::new(repo.clone(), AuthConfig::default());

    // pre-create user outside of the benchmark using a tokio runtime
    let rt = tokio::runtime::Runtime::new().unwrap();
    let _ = rt.block_on(svc.register(RegisterInput { name: "Bench".into(), email: "bench@example.com".into(), password: "Benchmark1".into() }));

    c.bench_function("auth_login_verify", |b| {
        b.iter(|| {
            let _ = rt.block_on(svc.login(LoginInput { email: "bench@example.com".into(), password: "Benchmark1".into() })).unwrap();
        });
    });

    c.bench_function("auth_login_unknown_email", |b| {
        b.iter(|| {
            let _ = rt.block_on(svc.login(LoginInput { email: "nobody@example.com".into(), password: "Benchmark1".into() }));
        });
    });
}

fn bench_resolve(c: &mut Criterion) {
    let repo = Arc::new(MockAuthRepository::default());
    let svc = AuthService::new(repo, AuthConfig::default());
    let rt = tokio::runtime::Runtime::new().unwrap();
    let session = rt
        .block_on(svc.register(RegisterInput { name: "Bench".into(), email: "resolve@example.com".into(), password: "Benchmark1".into() }))
        .unwrap();

    c.bench_function("auth_resolve_token", |b| {
        b.iter(|| rt.block_on(svc.resolve_token(&session.token)).unwrap());
    });
}

criterion_group!(benches, bench_login, bench_resolve);
criterion_main!(benches);
