//! Hot-path benchmark: one structured record, encoded and written to a file
//! sink.

use criterion::{Criterion, criterion_group, criterion_main};
use svclog::{Logger, fields, with_output_paths};

fn bench_emit(c: &mut Criterion) {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("bench.log").display().to_string();
    let log = Logger::new("bench", vec![with_output_paths([path.as_str()])]).expect("logger");

    c.bench_function("emit_json_record", |b| {
        b.iter(|| {
            log.info(
                "benchmark record",
                &fields!["iteration" => 1, "peer" => "10.0.0.7"],
            );
        });
    });

    let suppressed = Logger::new("bench", vec![with_output_paths([path.as_str()])])
        .expect("logger");
    c.bench_function("below_threshold_record", |b| {
        b.iter(|| {
            suppressed.debug("suppressed record", &[]);
        });
    });
}

criterion_group!(benches, bench_emit);
criterion_main!(benches);
