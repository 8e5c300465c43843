use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use chrono::NaiveDate;
use localshop_core::ProductId;
use localshop_inventory::{
    Product, ProductForm, ProductStatus, SortDirection, SortKey, ViewQuery, compute_view,
};

fn catalog(size: usize) -> Vec<Product> {
    let today = NaiveDate::from_ymd_opt(2024, 12, 20).unwrap();
    (0..size)
        .map(|i| {
            let form = ProductForm {
                name: format!("Product {i:05}"),
                sku: format!("SKU-{i:05}"),
                category: ["Electronics", "Furniture", "Food & Beverage"][i % 3].to_string(),
                brand: format!("Brand {}", i % 17),
                stock_quantity: (i % 50) as u32,
                selling_price: (i % 400) as f64 + 0.99,
                ..ProductForm::default()
            };
            Product::from_form(ProductId::new(), form, today)
        })
        .collect()
}

fn bench_compute_view(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_view");

    let query = ViewQuery::new()
        .with_search("product 0")
        .with_category(Some("Electronics".to_string()))
        .with_status(Some(ProductStatus::InStock))
        .with_price_range(Some(10.0), Some(300.0))
        .with_sort(SortKey::Price, SortDirection::Desc);

    for size in [100usize, 1_000, 10_000] {
        let products = catalog(size);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("unfiltered", size), &products, |b, products| {
            b.iter(|| compute_view(black_box(products), black_box(&ViewQuery::new())));
        });

        group.bench_with_input(BenchmarkId::new("all_filters", size), &products, |b, products| {
            b.iter(|| compute_view(black_box(products), black_box(&query)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_compute_view);
criterion_main!(benches);
