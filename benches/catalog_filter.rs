//! Catalog filter benchmark: search + category intersection over the
//! reference catalog, the hot path behind the picker's typeahead.

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use crop_predictor_rust::{CategoryFilter, CropCategory, CropPicker, ReferenceData};

fn bench_visible_crops(c: &mut Criterion) {
    let reference = Arc::new(
        ReferenceData::load(concat!(env!("CARGO_MANIFEST_DIR"), "/data"))
            .expect("reference data should load"),
    );

    let mut picker = CropPicker::new(reference.clone());
    picker.set_search("a");
    c.bench_function("visible_crops broad search", |b| {
        b.iter(|| black_box(picker.visible_crops().len()))
    });

    let mut picker = CropPicker::new(reference);
    picker.set_search("rice");
    picker.set_category(CategoryFilter::Only(CropCategory::Grains));
    c.bench_function("visible_crops narrow search", |b| {
        b.iter(|| black_box(picker.visible_crops().len()))
    });
}

criterion_group!(benches, bench_visible_crops);
criterion_main!(benches);
