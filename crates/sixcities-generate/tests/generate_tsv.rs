use std::fs;
use std::path::PathBuf;
use std::sync::atomic::Ordering;

use chrono::{DateTime, TimeZone, Utc};
use sixcities_core::{City, HomeType, TSV_COLUMNS, TemplateItem, validate_row};
use sixcities_generate::{
    FileTemplateSource, GenerateOptions, GenerationEngine, GenerationError, RecordGenerator,
    StaticTemplateSource, StreamingWriter, parse_record_count,
};
use sixcities_import::TsvParser;

fn templates() -> Vec<TemplateItem> {
    vec![
        TemplateItem {
            title: "Canal view studio".to_string(),
            description: "Small studio overlooking the canal\twith a desk".to_string(),
            city: City::Amsterdam,
            preview_image: "https://example.com/amsterdam/preview.jpg".to_string(),
            images: Some(
                (1..=7)
                    .map(|idx| format!("https://example.com/amsterdam/{idx}.jpg"))
                    .collect(),
            ),
            amenities: Some(vec!["Laptop friendly workspace".to_string(), "Fridge".to_string()]),
            home_type: HomeType::Room,
            rooms: 1,
            guests: 2,
            price: 950,
            is_premium: Some(true),
        },
        TemplateItem {
            title: "Harbour family house".to_string(),
            description: "Spacious house near the harbour\nwith a garden".to_string(),
            city: City::Hamburg,
            preview_image: "https://example.com/hamburg/preview.jpg".to_string(),
            images: Some(
                (1..=6)
                    .map(|idx| format!("https://example.com/hamburg/{idx}.jpg"))
                    .collect(),
            ),
            amenities: Some(vec!["Towels".to_string(), "Jacuzzi".to_string()]),
            home_type: HomeType::House,
            rooms: 4,
            guests: 8,
            price: 3200,
            is_premium: None,
        },
    ]
}

fn reference_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0)
        .single()
        .expect("valid time")
}

fn write(seed: u64, count: u64, path: &PathBuf) -> Result<u64, GenerationError> {
    let mut writer =
        StreamingWriter::new(RecordGenerator::from_seed(seed)).with_reference_time(reference_time());
    writer
        .write(path, count, &templates())
        .map(|summary| summary.records_written)
}

#[test]
fn writes_header_and_requested_rows() {
    let path = temp_file("rows");
    assert_eq!(write(1, 250, &path).expect("write tsv"), 250);

    let contents = fs::read_to_string(&path).expect("read tsv");
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 251);
    assert_eq!(lines[0], TSV_COLUMNS.join("\t"));
    for line in &lines {
        assert_eq!(line.split('\t').count(), 17);
    }
    assert!(lines[1].split('\t').next().is_some_and(|title| title.ends_with(" #1")));
    assert!(lines[250].split('\t').next().is_some_and(|title| title.ends_with(" #250")));
    assert!(contents.ends_with('\n'));

    fs::remove_file(&path).expect("remove tsv");
}

#[test]
fn same_seed_writes_identical_files() {
    let path_a = temp_file("seed_a");
    let path_b = temp_file("seed_b");
    write(99, 100, &path_a).expect("write A");
    write(99, 100, &path_b).expect("write B");

    assert_eq!(
        fs::read_to_string(&path_a).expect("read A"),
        fs::read_to_string(&path_b).expect("read B")
    );

    fs::remove_file(&path_a).expect("remove A");
    fs::remove_file(&path_b).expect("remove B");
}

#[test]
fn zero_count_fails_before_creating_file() {
    let path = temp_file("zero");
    let result = write(1, 0, &path);
    assert!(matches!(result, Err(GenerationError::InvalidArgument(_))));
    assert!(!path.exists());

    assert!(parse_record_count("-5").is_err());
    assert!(parse_record_count("0").is_err());
    assert!(parse_record_count("ten").is_err());
    assert_eq!(parse_record_count(" 42 ").expect("count"), 42);
}

#[test]
fn missing_directory_is_an_io_error() {
    let path = std::env::temp_dir()
        .join(format!("sixcities_missing_{}", uuid::Uuid::new_v4()))
        .join("offers.tsv");
    assert!(matches!(write(1, 3, &path), Err(GenerationError::Io(_))));
}

#[test]
fn cancelled_write_leaves_header_only() {
    let path = temp_file("cancel");
    let generator = RecordGenerator::from_seed(5);
    let flag = std::sync::Arc::new(std::sync::atomic::AtomicBool::new(true));
    let summary = StreamingWriter::new(generator)
        .with_cancel_flag(flag)
        .write(&path, 1_000, &templates())
        .expect("write tsv");

    assert!(summary.cancelled);
    assert_eq!(summary.records_written, 0);
    let contents = fs::read_to_string(&path).expect("read tsv");
    assert_eq!(contents, format!("{}\n", TSV_COLUMNS.join("\t")));

    fs::remove_file(&path).expect("remove tsv");
}

#[test]
fn written_rows_import_back_into_the_same_offers() {
    let path = temp_file("round_trip");
    write(2024, 40, &path).expect("write tsv");

    let templates = templates();
    let mut generator = RecordGenerator::from_seed(2024);
    let expected: Vec<_> = generator
        .stream(&templates, 40, reference_time())
        .collect::<Result<_, _>>()
        .expect("generate offers");

    let parser = TsvParser::from_path(&path).expect("open tsv");
    let imported: Vec<_> = parser
        .map(|row| {
            let row = row.expect("read row");
            validate_row(&row).offer().cloned().expect("row should validate")
        })
        .collect();

    assert_eq!(imported.len(), expected.len());
    for (imported, mut expected) in imported.into_iter().zip(expected) {
        expected.description = expected.description.replace(['\t', '\n'], " ");
        assert_eq!(imported, expected);
    }

    fs::remove_file(&path).expect("remove tsv");
}

#[tokio::test]
async fn engine_writes_from_file_templates() {
    let templates_path = temp_file("templates").with_extension("json");
    fs::write(
        &templates_path,
        serde_json::to_string(&templates()).expect("serialize templates"),
    )
    .expect("write templates");
    let output = temp_file("engine");

    let engine = GenerationEngine::new(GenerateOptions {
        seed: Some(3),
        ..GenerateOptions::default()
    });
    let report = engine
        .run(&FileTemplateSource::new(&templates_path), 12, &output)
        .await
        .expect("run generation");

    assert_eq!(report.templates_loaded, 2);
    assert_eq!(report.summary.records_written, 12);
    assert!(!report.summary.cancelled);
    let contents = fs::read_to_string(&output).expect("read tsv");
    assert_eq!(contents.lines().count(), 13);
    assert_eq!(report.summary.bytes_written, contents.len() as u64);

    fs::remove_file(&templates_path).expect("remove templates");
    fs::remove_file(&output).expect("remove tsv");
}

#[tokio::test]
async fn empty_template_source_creates_no_file() {
    let output = temp_file("empty");
    let engine = GenerationEngine::new(GenerateOptions::default());
    let result = engine
        .run(&StaticTemplateSource::new(Vec::new()), 5, &output)
        .await;

    assert!(matches!(result, Err(GenerationError::TemplateSource(_))));
    assert!(!output.exists());
}

#[tokio::test]
async fn unreadable_template_file_is_a_source_error() {
    let output = temp_file("unreadable");
    let engine = GenerationEngine::new(GenerateOptions::default());
    let missing = FileTemplateSource::new(temp_file("no_templates"));
    let result = engine.run(&missing, 5, &output).await;

    assert!(matches!(result, Err(GenerationError::TemplateSource(_))));
    assert!(!output.exists());
}

#[tokio::test]
async fn cancel_flag_set_before_run_keeps_header() {
    let output = temp_file("engine_cancel");
    let engine = GenerationEngine::new(GenerateOptions::default());
    engine.cancel_flag().store(true, Ordering::Relaxed);

    let report = engine
        .run(&StaticTemplateSource::new(templates()), 50, &output)
        .await
        .expect("run generation");
    assert!(report.summary.cancelled);
    assert_eq!(
        fs::read_to_string(&output).expect("read tsv").lines().count(),
        1
    );

    fs::remove_file(&output).expect("remove tsv");
}

#[tokio::test]
async fn template_without_images_creates_no_file() {
    let mut templates = templates();
    let mut broken = templates[0].clone();
    broken.title = "Studio without photos".to_string();
    broken.images = None;
    templates.push(broken);

    let output = temp_file("no_images");
    let engine = GenerationEngine::new(GenerateOptions {
        seed: Some(11),
        ..GenerateOptions::default()
    });
    let result = engine
        .run(&StaticTemplateSource::new(templates), 50, &output)
        .await;

    assert!(matches!(result, Err(GenerationError::InvalidTemplate(_))));
    assert!(!output.exists());
}

#[test]
fn writer_rejects_template_without_amenities_before_creating_file() {
    let mut templates = templates();
    templates[1].amenities = None;

    let path = temp_file("no_amenities");
    let result = StreamingWriter::new(RecordGenerator::from_seed(1)).write(&path, 5, &templates);
    assert!(matches!(result, Err(GenerationError::InvalidTemplate(_))));
    assert!(!path.exists());
}

fn temp_file(label: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!(
        "sixcities_generate_{label}_{}.tsv",
        uuid::Uuid::new_v4()
    ));
    path
}
