//! Benchmarks for grounding raw classifier values into the taxonomy.
//!
//! Exact matches take the fast path; free-form values walk the alias table,
//! word containment and the stem rule before falling back.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::sync::Arc;
use triage::classifier::RawClassification;
use triage::grounding::GroundingValidator;
use triage::taxonomy::{Severity, TaxonomyRegistry};

fn inputs() -> Vec<(&'static str, RawClassification)> {
    vec![
        (
            "exact",
            RawClassification::new("Finance", "Critical", "IncidentReport", ""),
        ),
        (
            "alias",
            RawClassification::new("Human Resources", "urgent", "question", ""),
        ),
        (
            "corrected",
            RawClassification::new("Finanse", "Crittical", "Incidnt", ""),
        ),
        (
            "defaulted",
            RawClassification::new("Legal", "whenever", "shrug", ""),
        ),
        (
            "free_text",
            RawClassification::new(
                "Probably the IT helpdesk, maybe facilities",
                "I would say this is high priority",
                "Looks like an incident report to me",
                "",
            ),
        ),
    ]
}

fn bench_validate(c: &mut Criterion) {
    let validator = GroundingValidator::new(Arc::new(TaxonomyRegistry::default()));
    let mut group = c.benchmark_group("grounding_validate");

    for (name, raw) in inputs() {
        group.bench_with_input(BenchmarkId::from_parameter(name), &raw, |b, raw| {
            b.iter(|| validator.validate(black_box(raw)))
        });
    }

    group.finish();
}

fn bench_ground_severity(c: &mut Criterion) {
    let validator = GroundingValidator::new(Arc::new(TaxonomyRegistry::default()));

    c.bench_function("ground_field_severity_sev1", |b| {
        b.iter(|| validator.ground_field::<Severity>(black_box("SEV1")))
    });
}

criterion_group!(benches, bench_validate, bench_ground_severity);
criterion_main!(benches);
