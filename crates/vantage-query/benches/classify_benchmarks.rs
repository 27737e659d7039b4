//! Benchmark for data-source classification overhead.
//!
//! Classification runs on every completed turn, between SQL execution and
//! rendering, so it must stay negligible next to the two network calls.
//! This benchmark measures `SourceClassifier::classify` over statements of
//! realistic size and keyword density.

use criterion::{criterion_group, criterion_main, Criterion};
use vantage_query::SourceClassifier;

/// A statement that resolves in the first (system-keyword) pass.
fn system_hit_sql() -> String {
    "SELECT a.name, a.annual_revenue, o.stage_name, SUM(o.amount) AS pipeline \
     FROM salesforce.account a \
     JOIN salesforce.opportunity o ON o.account_id = a.id \
     WHERE o.close_date >= DATEADD(month, -6, CURRENT_DATE) \
     GROUP BY a.name, a.annual_revenue, o.stage_name \
     ORDER BY pipeline DESC LIMIT 50"
        .to_string()
}

/// A statement that falls through to the domain-noun pass.
fn fallback_sql() -> String {
    "SELECT l.source, COUNT(*) AS leads, AVG(l.score) AS avg_score \
     FROM lead l WHERE l.created_at >= '2026-01-01' \
     GROUP BY l.source ORDER BY leads DESC"
        .to_string()
}

/// A statement that matches nothing and takes the default tag.
fn default_sql() -> String {
    "SELECT d, SUM(v) FROM metrics_daily GROUP BY d ORDER BY d".to_string()
}

fn bench_classify(c: &mut Criterion) {
    let classifier = SourceClassifier::default();
    let system = system_hit_sql();
    let fallback = fallback_sql();
    let default = default_sql();

    c.bench_function("classify_system_keyword_hit", |b| {
        b.iter(|| classifier.classify(std::hint::black_box(&system)))
    });

    c.bench_function("classify_domain_fallback", |b| {
        b.iter(|| classifier.classify(std::hint::black_box(&fallback)))
    });

    c.bench_function("classify_default_tag", |b| {
        b.iter(|| classifier.classify(std::hint::black_box(&default)))
    });
}

criterion_group!(benches, bench_classify);
criterion_main!(benches);
