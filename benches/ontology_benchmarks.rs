use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use soli::{Document, Ontology, RdfFormat, Snapshot};

/// Synthetic ontology: one branch root, `size` classes in a tree of fan-out 8
fn synthetic(size: usize) -> Document {
    let words = ["Bankruptcy", "Tax", "Contract", "Labor", "Privacy", "Antitrust", "Patent", "Estate"];
    let mut text = String::from(
        "@prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .\n\
         @prefix owl: <http://www.w3.org/2002/07/owl#> .\n\
         @prefix skos: <http://www.w3.org/2004/02/skos/core#> .\n\
         @prefix soli: <https://soli.openlegalstandard.org/> .\n\
         soli:R0 a owl:Class ; rdfs:label \"Area of Law\" .\n",
    );
    for i in 1..size {
        let parent = (i - 1) / 8;
        let word = words[i % words.len()];
        text.push_str(&format!(
            "soli:R{i} a owl:Class ; rdfs:subClassOf soli:R{parent} ; \
             rdfs:label \"{word} Law {i}\" ; skos:altLabel \"{word} {i}\" ; \
             skos:definition \"Law about {word} matters, number {i}.\" .\n"
        ));
    }
    Document::new(text, RdfFormat::Turtle)
}

/// Benchmark parsing and index construction
fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("snapshot_build");
    group.sample_size(10);

    for size in [100, 1000, 10_000].iter() {
        let document = synthetic(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                let snapshot = Snapshot::build(&document).unwrap();
                criterion::black_box(snapshot.len());
            });
        });
    }
    group.finish();
}

/// Benchmark full descendant traversal from the branch root
fn bench_children(c: &mut Criterion) {
    let mut group = c.benchmark_group("children");

    for size in [100, 1000, 10_000].iter() {
        let ontology = Ontology::from_document(synthetic(*size)).unwrap();
        let snapshot = ontology.snapshot();

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                let classes = snapshot.children("R0", None).unwrap();
                criterion::black_box(classes.len());
            });
        });
    }
    group.finish();
}

/// Benchmark fuzzy label search
fn bench_search_by_label(c: &mut Criterion) {
    let mut group = c.benchmark_group("search_by_label");

    for size in [100, 1000, 10_000].iter() {
        let ontology = Ontology::from_document(synthetic(*size)).unwrap();
        let snapshot = ontology.snapshot();

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                let hits = snapshot.search_by_label("bankrupt", 10, true).unwrap();
                criterion::black_box(hits.len());
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_build, bench_children, bench_search_by_label);
criterion_main!(benches);
