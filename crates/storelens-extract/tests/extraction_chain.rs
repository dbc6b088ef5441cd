use std::fs;
use std::path::Path;

use storelens_core::{SourceKind, TableName};
use storelens_extract::{ExtractError, ExtractOptions, Extractor, RetryPolicy, load_table_set};
use storelens_generate::{GenerateOptions, Generator};

fn small_generate(seed: u64) -> GenerateOptions {
    GenerateOptions {
        seed,
        customers: 40,
        products: 25,
        sellers: 12,
        orders: 60,
        review_cap: 20,
        ..GenerateOptions::default()
    }
}

fn persist(dir: &Path, options: GenerateOptions) {
    let mut options = options;
    options.out_dir = Some(dir.to_path_buf());
    Generator::new(options).run().expect("persist dataset");
}

fn options_for(raw: &Path, sample: &Path, generate: GenerateOptions) -> ExtractOptions {
    ExtractOptions {
        raw_dir: raw.to_path_buf(),
        sample_dir: sample.to_path_buf(),
        retry: RetryPolicy {
            attempts: 3,
            delay_secs: 0,
        },
        generate,
        ..ExtractOptions::default()
    }
}

#[test]
fn loader_is_all_or_nothing() {
    let dir = tempfile::tempdir().expect("temp dir");
    persist(dir.path(), small_generate(5));

    let set = load_table_set(dir.path(), "olist").expect("complete set loads");
    assert!(set.is_complete());

    // One missing file out of six makes the whole source unavailable.
    fs::remove_file(dir.path().join(TableName::Sellers.file_name("olist")))
        .expect("remove sellers");
    assert!(load_table_set(dir.path(), "olist").is_none());
}

#[test]
fn parse_failure_counts_as_missing() {
    let dir = tempfile::tempdir().expect("temp dir");
    persist(dir.path(), small_generate(6));

    let path = dir.path().join(TableName::Orders.file_name("olist"));
    fs::write(&path, "order_id,order_status\nORD_1\n").expect("corrupt orders");

    assert!(load_table_set(dir.path(), "olist").is_none());
}

#[test]
fn raw_source_wins_over_sample() {
    let raw = tempfile::tempdir().expect("raw dir");
    let sample = tempfile::tempdir().expect("sample dir");
    persist(raw.path(), small_generate(7));
    persist(sample.path(), small_generate(8));

    let extractor = Extractor::new(options_for(raw.path(), sample.path(), small_generate(9)));
    let validation = extractor.extract().expect("extraction");
    assert_eq!(validation.source, SourceKind::Raw);
}

#[test]
fn existing_sample_is_loaded_not_regenerated() {
    let raw = tempfile::tempdir().expect("raw dir");
    let sample = tempfile::tempdir().expect("sample dir");

    // Planted sample has 40 customers; the configured generator would
    // produce 90. Getting 40 back proves the cache was used.
    persist(sample.path(), small_generate(21));
    let customers_file = sample.path().join(TableName::Customers.file_name("olist"));
    let planted_bytes = fs::read(&customers_file).expect("planted sample");

    let mut generate = small_generate(22);
    generate.customers = 90;
    let extractor = Extractor::new(options_for(raw.path(), sample.path(), generate));
    let validation = extractor.extract().expect("extraction");

    assert_eq!(validation.source, SourceKind::Sample);
    let customers = validation.get(TableName::Customers).expect("customers kept");
    assert_eq!(customers.table.row_count(), 40);
    assert_eq!(
        fs::read(&customers_file).expect("sample after extraction"),
        planted_bytes,
        "sample files must not be rewritten"
    );
}

#[test]
fn empty_dirs_generate_persist_and_validate_everything() {
    let raw = tempfile::tempdir().expect("raw dir");
    let sample = tempfile::tempdir().expect("sample dir");

    let extractor = Extractor::new(options_for(
        raw.path(),
        sample.path(),
        GenerateOptions::default(),
    ));
    let validation = extractor.extract().expect("extraction");

    assert_eq!(validation.source, SourceKind::Sample);
    assert_eq!(validation.len(), 6);
    assert!(!validation.is_degraded());

    let rows = |name| validation.get(name).expect("table kept").table.row_count();
    assert_eq!(rows(TableName::Customers), 1000);
    assert_eq!(rows(TableName::Products), 500);
    assert_eq!(rows(TableName::Sellers), 200);
    assert_eq!(rows(TableName::Orders), 2000);
    assert!(rows(TableName::OrderItems) >= 2000 && rows(TableName::OrderItems) <= 8000);
    assert!(rows(TableName::Reviews) <= 800);

    // Fully-populated tables report no nulls at all.
    let customers = validation.get(TableName::Customers).expect("customers");
    assert_eq!(customers.meta.null_percentage, 0.0);

    // The generated set was persisted for the next run.
    for name in TableName::ALL {
        assert!(sample.path().join(name.file_name("olist")).exists());
    }
}

#[test]
fn all_sources_exhausted_is_an_explicit_failure() {
    let raw = tempfile::tempdir().expect("raw dir");
    let sample = tempfile::tempdir().expect("sample dir");

    // Orders without customers make generation fail, so the sample stage
    // is unavailable and the chain falls through to the remote stub.
    let mut generate = small_generate(30);
    generate.customers = 0;
    let extractor = Extractor::new(options_for(raw.path(), sample.path(), generate));

    let err = extractor.extract().expect_err("chain exhausted");
    assert!(matches!(err, ExtractError::Exhausted));
}

#[test]
fn rejecting_every_table_fails_the_run() {
    let raw = tempfile::tempdir().expect("raw dir");
    let sample = tempfile::tempdir().expect("sample dir");

    // Every raw table stays below the 10-row gate.
    let tiny = GenerateOptions {
        seed: 31,
        customers: 3,
        products: 3,
        sellers: 2,
        orders: 2,
        review_cap: 2,
        ..GenerateOptions::default()
    };
    persist(raw.path(), tiny);

    let extractor = Extractor::new(options_for(raw.path(), sample.path(), small_generate(32)));
    let err = extractor.extract().expect_err("all tables rejected");
    assert!(matches!(err, ExtractError::NoValidTables(SourceKind::Raw)));
}
