use criterion::{Criterion, criterion_group, criterion_main};
use archflow::render::{SceneOptions, SvgOptions, build_scene, write_svg};
use archflow::{Engine, LoadOptions};
use std::hint::black_box;

/// Synthesizes a dense grid diagram: `n` services in a square grid, each one
/// connected to its right and bottom neighbors.
fn synthetic_definition(side: usize) -> String {
    let mut services = String::new();
    let mut connections = String::new();
    for row in 0..side {
        for col in 0..side {
            let id = row * side + col;
            if !services.is_empty() {
                services.push(',');
            }
            services.push_str(&format!(
                r#"{{"id":"s{id}","type":"lambda","position":{{"x":{x},"y":{y}}}}}"#,
                x = col * 140,
                y = row * 140
            ));
            for (dx, dy) in [(1usize, 0usize), (0, 1)] {
                let (nc, nr) = (col + dx, row + dy);
                if nc < side && nr < side {
                    let nid = nr * side + nc;
                    if !connections.is_empty() {
                        connections.push(',');
                    }
                    connections.push_str(&format!(
                        r#"{{"id":"c{id}-{nid}","from":"s{id}","to":"s{nid}","type":"async"}}"#
                    ));
                }
            }
        }
    }
    format!(
        r#"{{"id":"stress","name":"Stress","category":"other",
            "canvas":{{"width":{dim},"height":{dim}}},
            "services":[{services}],"connections":[{connections}]}}"#,
        dim = side * 140 + 100
    )
}

fn bench_scene_stress(c: &mut Criterion) {
    let engine = Engine::empty();
    let definition = engine
        .load_definition_sync(&synthetic_definition(16), LoadOptions::strict())
        .expect("load");
    let scene_options = SceneOptions::default();
    let svg_options = SvgOptions::default();

    let mut group = c.benchmark_group("scene_stress");
    group.sample_size(50);

    group.bench_function("grid_16x16_compose", |b| {
        b.iter(|| {
            let scene = build_scene(black_box(&definition), None, &scene_options);
            black_box(scene.edges.len());
        });
    });

    // Composition is µs-scale on this size, so serialize in the same loop to
    // get a stable end-to-end signal.
    group.bench_function("grid_16x16_compose_and_write", |b| {
        b.iter(|| {
            let scene = build_scene(black_box(&definition), None, &scene_options);
            let svg = write_svg(&scene, &svg_options).expect("render");
            black_box(svg.len());
        });
    });

    group.finish();
}

criterion_group!(benches, bench_scene_stress);
criterion_main!(benches);
