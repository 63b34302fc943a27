//! Composition benchmarks over a synthetic waterfall

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use waterfall_core::{
    compose, normalize, Build, BuildVariant, Payload, RawVersion, Task, TaskStatusCount,
    ViewOptions,
};

const STATUSES: [&str; 5] = ["success", "failed", "started", "system-failed", "undispatched"];

fn synthetic_payload(variants: usize, versions: usize, tasks: usize) -> Payload {
    let names: Vec<String> = (0..variants).rev().map(|i| format!("variant-{:03}", i)).collect();

    let versions = (0..versions)
        .map(|v| {
            let rolled_up = v % 4 == 3;
            let builds = if rolled_up {
                Vec::new()
            } else {
                names
                    .iter()
                    .map(|name| Build {
                        build_variant: BuildVariant {
                            id: name.clone(),
                            display_name: name.clone(),
                        },
                        tasks: (0..tasks)
                            .map(|t| Task {
                                id: format!("{}-{}-{}", name, v, t),
                                display_name: format!("task-{}", t),
                                status: STATUSES[t % STATUSES.len()].to_string(),
                            })
                            .collect(),
                        status_count: TaskStatusCount {
                            succeeded: (tasks / 5) as u32,
                            started: (tasks / 5) as u32,
                            timed_out: (tasks / 5) as u32,
                            undispatched: (tasks / 5) as u32,
                            inactive: 0,
                        },
                    })
                    .collect()
            };

            RawVersion {
                rolled_up,
                ids: vec![format!("version-{}", v)],
                messages: vec![format!("commit {}", v)],
                authors: vec!["bench".to_string()],
                revisions: vec![format!("{:040x}", v)],
                create_times: vec!["2017-06-20T17:04:59Z".to_string()],
                builds,
            }
        })
        .collect();

    Payload {
        versions,
        build_variants: names,
    }
}

fn bench_normalize(c: &mut Criterion) {
    let payload = synthetic_payload(60, 5, 40);
    c.bench_function("normalize::60x5x40", |b| {
        b.iter(|| normalize(black_box(payload.clone())))
    });
}

fn bench_compose(c: &mut Criterion) {
    let grid = normalize(synthetic_payload(60, 5, 40)).expect("valid synthetic payload");
    let expanded = ViewOptions::new("bench");
    let collapsed = ViewOptions::new("bench").collapsed(true);

    c.bench_function("compose::expanded_60x5x40", |b| {
        b.iter(|| compose(black_box(&grid), &expanded))
    });

    c.bench_function("compose::collapsed_60x5x40", |b| {
        b.iter(|| compose(black_box(&grid), &collapsed))
    });
}

criterion_group!(benches, bench_normalize, bench_compose);
criterion_main!(benches);
