use gradebook_core::{
    FileRecordRepository, GradeBook, RecordId, RecordRepository, RecordService, StoreError,
    StudentRecord, ValidationError,
};
use std::fs;
use tempfile::TempDir;

fn record(name: &str, reg_no: &str, subjects: &[(&str, &str, f64)]) -> StudentRecord {
    let mut book = GradeBook::new();
    for (subject, grade, credits) in subjects {
        book.add_subject(subject, grade, *credits).unwrap();
    }
    book.finalize(name, reg_no).unwrap()
}

fn service_in(dir: &TempDir) -> RecordService<FileRecordRepository> {
    RecordService::new(FileRecordRepository::new(dir.path().join("gpa_records")))
}

#[test]
fn list_on_missing_directory_is_empty() {
    let dir = TempDir::new().unwrap();
    let service = service_in(&dir);

    assert!(service.list().unwrap().is_empty());
    assert!(!service.repo().dir().exists());
}

#[test]
fn save_then_load_roundtrip() {
    let dir = TempDir::new().unwrap();
    let service = service_in(&dir);
    let saved = record("Ada", "21-CS-001", &[("Math", "A", 3.0), ("Physics", "B+", 4.0)]);

    service.save(&saved).unwrap();

    let id = RecordId::new("21-CS-001").unwrap();
    assert!(service.repo().record_path(&id).is_file());
    assert_eq!(service.list().unwrap(), vec![id.clone()]);
    assert_eq!(service.load(&id).unwrap(), saved);
}

#[test]
fn save_overwrites_same_reg_no() {
    let dir = TempDir::new().unwrap();
    let service = service_in(&dir);

    service
        .save(&record("Ada", "r1", &[("Math", "C", 3.0)]))
        .unwrap();
    let newer = record("Ada L.", "r1", &[("Math", "A", 3.0)]);
    service.save(&newer).unwrap();

    let id = RecordId::new("r1").unwrap();
    assert_eq!(service.list().unwrap().len(), 1);
    let loaded = service.load(&id).unwrap();
    assert_eq!(loaded, newer);
    assert_eq!(loaded.gpa, 4.0);
}

#[test]
fn save_writes_pretty_json_document() {
    let dir = TempDir::new().unwrap();
    let service = service_in(&dir);
    service
        .save(&record("Ada", "r1", &[("Math", "B", 2.0)]))
        .unwrap();

    let body = fs::read_to_string(service.repo().dir().join("r1.json")).unwrap();
    assert!(body.contains("\n    \"reg_no\": \"r1\""), "body: {body}");
    let value: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(value["subjects"][0]["subject"], "Math");
    assert_eq!(value["gpa"], 3.0);
}

#[test]
fn save_rejects_invalid_record_before_writing() {
    let dir = TempDir::new().unwrap();
    let service = service_in(&dir);
    let mut bad = record("Ada", "r1", &[("Math", "A", 3.0)]);
    bad.reg_no = "../escape".to_string();

    let err = service.save(&bad).unwrap_err();
    assert!(matches!(
        err,
        StoreError::Validation(ValidationError::InvalidRegNo(_))
    ));
    assert!(!service.repo().dir().exists());
}

#[test]
fn list_is_sorted_and_ignores_foreign_files() {
    let dir = TempDir::new().unwrap();
    let service = service_in(&dir);
    service.save(&record("B", "b2", &[("X", "A", 1.0)])).unwrap();
    service.save(&record("A", "a1", &[("X", "B", 1.0)])).unwrap();

    let store_dir = service.repo().dir();
    fs::write(store_dir.join("notes.txt"), "hello").unwrap();
    fs::create_dir(store_dir.join("nested.json")).unwrap();

    let ids = service.list().unwrap();
    let names: Vec<&str> = ids.iter().map(RecordId::as_str).collect();
    assert_eq!(names, vec!["a1", "b2"]);

    // Listing twice yields the same sequence.
    assert_eq!(service.list().unwrap(), ids);
}

#[test]
fn load_missing_record_is_io_not_found() {
    let dir = TempDir::new().unwrap();
    let service = service_in(&dir);

    let err = service.load(&RecordId::new("ghost").unwrap()).unwrap_err();
    assert!(matches!(err, StoreError::Io { .. }));
    assert!(err.is_not_found());
}

#[test]
fn load_malformed_record_is_parse_error() {
    let dir = TempDir::new().unwrap();
    let service = service_in(&dir);
    let store_dir = service.repo().dir();
    fs::create_dir_all(store_dir).unwrap();
    fs::write(store_dir.join("broken.json"), "{ not json").unwrap();
    fs::write(
        store_dir.join("wrong.json"),
        r#"{"name": "X", "reg_no": "wrong", "gpa": 3.0, "subjects": []}"#,
    )
    .unwrap();

    let broken = service.load(&RecordId::new("broken").unwrap()).unwrap_err();
    assert!(matches!(broken, StoreError::Parse { .. }));
    assert!(!broken.is_not_found());

    let wrong = service.load(&RecordId::new("wrong").unwrap()).unwrap_err();
    assert!(matches!(wrong, StoreError::Parse { .. }));
    assert!(wrong.to_string().contains("add at least one subject"));
}

#[test]
fn load_accepts_camel_case_reg_no() {
    let dir = TempDir::new().unwrap();
    let service = service_in(&dir);
    let store_dir = service.repo().dir();
    fs::create_dir_all(store_dir).unwrap();
    fs::write(
        store_dir.join("r9.json"),
        r#"{"name": "Cy", "regNo": "r9", "gpa": 2.0,
            "subjects": [{"subject": "Art", "grade": "C", "credits": 2}]}"#,
    )
    .unwrap();

    let loaded = service.load(&RecordId::new("r9").unwrap()).unwrap();
    assert_eq!(loaded.reg_no, "r9");
    assert_eq!(loaded.subjects[0].credits, 2.0);
}

#[test]
fn export_text_writes_rendered_block() {
    let dir = TempDir::new().unwrap();
    let service = service_in(&dir);
    let saved = record("Ada", "r1", &[("Math", "A", 3.0), ("Physics", "B+", 4.0)]);
    let destination = dir.path().join("ada.txt");

    service.export_text(&saved, &destination).unwrap();

    let text = fs::read_to_string(&destination).unwrap();
    assert_eq!(
        text,
        "Name: Ada\nReg No: r1\nGPA: 3.6\n\nSubjects:\n - Math: A (3.0 cr)\n - Physics: B+ (4.0 cr)\n"
    );
}

#[test]
fn export_text_to_missing_directory_is_io_error() {
    let dir = TempDir::new().unwrap();
    let service = service_in(&dir);
    let saved = record("Ada", "r1", &[("Math", "A", 3.0)]);

    let err = service
        .export_text(&saved, &dir.path().join("missing").join("out.txt"))
        .unwrap_err();
    assert!(matches!(err, StoreError::Io { .. }));
}

#[test]
fn comparison_skips_corrupt_records() {
    let dir = TempDir::new().unwrap();
    let service = service_in(&dir);
    service
        .save(&record("Ada", "a1", &[("Math", "A", 3.0)]))
        .unwrap();
    service
        .save(&record("Cy", "c3", &[("Math", "C", 3.0)]))
        .unwrap();
    fs::write(service.repo().dir().join("b2.json"), "[]").unwrap();

    let set = service.all_for_comparison().unwrap();
    let pairs: Vec<(&str, f64)> = set
        .points
        .iter()
        .map(|point| (point.name.as_str(), point.gpa))
        .collect();
    assert_eq!(pairs, vec![("Ada", 4.0), ("Cy", 2.0)]);
    assert_eq!(set.skipped.len(), 1);
    assert_eq!(set.skipped[0].entry, "b2");
    assert!(!set.skipped[0].reason.is_empty());
}

#[test]
fn comparison_on_empty_store_is_empty() {
    let dir = TempDir::new().unwrap();
    let set = service_in(&dir).all_for_comparison().unwrap();
    assert!(set.is_empty());
    assert!(set.skipped.is_empty());
}

#[test]
fn repository_trait_is_usable_directly() {
    let dir = TempDir::new().unwrap();
    let repo = FileRecordRepository::new(dir.path());
    let saved = record("Ada", "r1", &[("Math", "D", 1.0)]);

    RecordRepository::save(&repo, &saved).unwrap();
    assert_eq!(repo.load(&saved.id().unwrap()).unwrap().gpa, 1.0);
}

#[test]
fn reg_no_with_space_and_unicode_roundtrips() {
    let dir = TempDir::new().unwrap();
    let service = service_in(&dir);
    let spaced = record("Sam", "SE 2021 001", &[("Math", "B", 3.0)]);
    let accented = record("Ünal", "Ünal01", &[("Math", "A", 3.0)]);

    service.save(&spaced).unwrap();
    service.save(&accented).unwrap();

    let spaced_id = RecordId::new("SE 2021 001").unwrap();
    assert!(service.repo().dir().join("SE 2021 001.json").is_file());
    assert_eq!(service.load(&spaced_id).unwrap(), spaced);

    let ids: Vec<String> = service
        .list()
        .unwrap()
        .iter()
        .map(|id| id.as_str().to_string())
        .collect();
    assert_eq!(ids, vec!["SE 2021 001", "Ünal01"]);

    let set = service.all_for_comparison().unwrap();
    assert_eq!(set.points.len(), 2);
    assert!(set.skipped.is_empty());
}

#[test]
fn foreign_stem_json_is_reported_not_dropped() {
    let dir = TempDir::new().unwrap();
    let service = service_in(&dir);
    service
        .save(&record("Ada", "a1", &[("Math", "A", 3.0)]))
        .unwrap();
    let body = fs::read(service.repo().dir().join("a1.json")).unwrap();
    fs::write(service.repo().dir().join(".hidden.json"), body).unwrap();

    let scan = service.repo().scan().unwrap();
    assert_eq!(scan.ids, vec![RecordId::new("a1").unwrap()]);
    assert_eq!(scan.rejected.len(), 1);
    assert_eq!(scan.rejected[0].file_name, ".hidden.json");
    assert_eq!(service.list().unwrap(), scan.ids);

    let set = service.all_for_comparison().unwrap();
    assert_eq!(set.points.len(), 1);
    assert_eq!(set.skipped.len(), 1);
    assert_eq!(set.skipped[0].entry, ".hidden.json");
    assert!(set.skipped[0].reason.contains("invalid registration number"));
}

#[test]
fn save_into_path_occupied_by_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("gpa_records"), "not a directory").unwrap();
    let service = service_in(&dir);

    let err = service
        .save(&record("Ada", "r1", &[("Math", "A", 3.0)]))
        .unwrap_err();
    assert!(matches!(err, StoreError::Io { .. }), "got {err:?}");
    assert!(!err.is_not_found());
}
