use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tubegrab::catalogue::{simplify_codec, StreamCatalogueResult};
use tubegrab::extractor::{RawFormat, RawInfo};

fn raw_format(i: usize) -> RawFormat {
    let (vcodec, acodec) = match i % 4 {
        0 => ("avc1.640028", "mp4a.40.2"),
        1 => ("vp09.00.51.08", "none"),
        2 => ("none", "opus"),
        _ => ("none", "none"),
    };
    RawFormat {
        format_id: i.to_string(),
        ext: Some("mp4".to_string()),
        video_ext: Some(if vcodec == "none" { "none" } else { "mp4" }.to_string()),
        audio_ext: Some(if acodec == "none" { "none" } else { "m4a" }.to_string()),
        vcodec: Some(vcodec.to_string()),
        acodec: Some(acodec.to_string()),
        resolution: Some("1920x1080".to_string()),
        fps: Some(30.0),
        filesize: Some(10_485_760),
    }
}

fn raw_info(formats: usize) -> RawInfo {
    RawInfo {
        title: Some("Benchmark Clip".to_string()),
        extractor_key: Some("Youtube".to_string()),
        formats: (0..formats).map(raw_format).collect(),
        ..Default::default()
    }
}

fn benchmark_catalogue_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("Catalogue Construction");

    // Typical YouTube videos report 20-80 formats
    for count in [10usize, 40, 80, 200] {
        let info = raw_info(count);
        group.bench_with_input(BenchmarkId::new("from_raw", count), &info, |b, info| {
            b.iter(|| StreamCatalogueResult::from_raw(black_box("https://youtu.be/x"), info))
        });
    }

    group.finish();
}

fn benchmark_display_labels(c: &mut Criterion) {
    let catalogue = StreamCatalogueResult::from_raw("https://youtu.be/x", &raw_info(80));

    c.bench_function("display_label x60", |b| {
        b.iter(|| {
            catalogue
                .descriptors
                .iter()
                .map(|d| d.display_label())
                .collect::<Vec<_>>()
        })
    });
}

fn benchmark_simplify_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("Codec Simplification");

    for codec in ["opus", "avc1.640028", "vp09.00.51.08.01.01.01.01.00"] {
        group.bench_function(codec, |b| b.iter(|| simplify_codec(black_box(codec))));
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_catalogue_construction,
    benchmark_display_labels,
    benchmark_simplify_codec
);
criterion_main!(benches);
