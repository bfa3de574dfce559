use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tessera_core::parser::{parse_content, parse_title_year_episodes_cascade};

fn bench_grammar(c: &mut Criterion) {
    let inputs = vec![
        "The.Matrix.1999.1080p.BluRay.x264-GRP",
        "Show.Name.S01E02.720p.HDTV.FRENCH",
        "Doctor.Who.2005.S04E01-E03.1080p.WEB-DL.x265-TEAM",
        "Blade Runner 2049 (2017) 2160p UHD BluRay REMUX",
        "Some Documentary Without Markers",
    ];

    c.bench_function("title_cascade_single", |b| {
        b.iter(|| parse_title_year_episodes_cascade(None, black_box(inputs[0])).unwrap());
    });

    c.bench_function("parse_content_batch_5", |b| {
        b.iter(|| {
            for input in &inputs {
                let _ = parse_content(None, black_box(input));
            }
        });
    });
}

criterion_group!(benches, bench_grammar);
criterion_main!(benches);
