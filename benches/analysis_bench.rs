/*!
 * Benchmarks for the analysis pipeline hot paths.
 *
 * Measures performance of:
 * - Sentence segmentation
 * - Term detection against the built-in knowledge base
 * - Full document analysis
 */

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use talkref::analysis::{ReferenceExtractor, SourceDocument, matcher, segmenter};
use talkref::knowledge::KnowledgeBase;

/// Generate a discussion of the given size for benchmarking.
fn generate_discussion(paragraphs: usize) -> String {
    let mut text = String::from("== Sourcing dispute ==\n");
    for i in 0..paragraphs {
        match i % 4 {
            0 => text.push_str(
                "The lead fails WP:NPOV in my view. Dr. Smith and Mr. Jones both \
                 raised the neutral point of view policy on this noticeboard. ",
            ),
            1 => text.push_str(
                "Per WP:RS these citations are weak, e.g. blogs and self-published \
                 pages. Reliable sources are required for contentious claims. ",
            ),
            2 => text.push_str(
                "Several editors mentioned notability and the manual of style. \
                 Nobody disputed verifiability this time. ",
            ),
            _ => text.push_str(
                "Support per nom. Always keep context in mind when weighing \
                 arguments like these. ",
            ),
        }
        text.push('\n');
    }
    text
}

fn bench_segmentation(c: &mut Criterion) {
    let mut group = c.benchmark_group("segmentation");
    for paragraphs in [10, 100, 500] {
        let text = generate_discussion(paragraphs);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(paragraphs),
            &text,
            |b, text| b.iter(|| segmenter::segment(black_box(text))),
        );
    }
    group.finish();
}

fn bench_term_matching(c: &mut Criterion) {
    let kb = KnowledgeBase::builtin();
    let mut group = c.benchmark_group("term_matching");
    for paragraphs in [10, 100, 500] {
        let text = generate_discussion(paragraphs);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(paragraphs),
            &text,
            |b, text| b.iter(|| matcher::find_mentions(black_box(text), kb)),
        );
    }
    group.finish();
}

fn bench_full_analysis(c: &mut Criterion) {
    let kb = KnowledgeBase::builtin();
    let extractor = ReferenceExtractor::new(kb);
    let doc = SourceDocument::from_wikitext(generate_discussion(100));

    c.bench_function("full_analysis", |b| {
        b.iter(|| extractor.analyze(black_box(&doc), Some("Sourcing_dispute")))
    });
}

criterion_group!(
    benches,
    bench_segmentation,
    bench_term_matching,
    bench_full_analysis
);
criterion_main!(benches);
