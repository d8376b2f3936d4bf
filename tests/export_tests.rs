mod common;
use common::{init_db, setup_test_db, sg, temp_out, toggle_at};
use std::fs;

#[test]
fn test_export_csv_for_date() {
    let db_path = setup_test_db("export_csv_date");
    init_db(&db_path);

    toggle_at(&db_path, "worker-5", "2026-10-19 08:00:00");
    toggle_at(&db_path, "worker-5", "2026-10-19 08:05:00");
    toggle_at(&db_path, "worker-6", "2026-10-20 08:00:00");
    toggle_at(&db_path, "worker-6", "2026-10-20 08:01:00");

    let out = temp_out("export_csv_date", "csv");

    sg().args([
        "--db", &db_path, "export", "--date", "2026-10-19", "--file", &out, "--force",
    ])
    .assert()
    .success();

    let content = fs::read_to_string(&out).expect("read exported csv");
    let lines: Vec<&str> = content.lines().collect();

    assert_eq!(
        lines[0],
        "Date,PC Number,Worker Name,Start Time,End Time,Duration (Sec),Team"
    );
    assert_eq!(lines[1], "2026-10-19,PC-05,Worker 5,08:00:00,08:05:00,300,A");
    assert_eq!(lines.len(), 2);
}

#[test]
fn test_export_json_for_date() {
    let db_path = setup_test_db("export_json_date");
    init_db(&db_path);

    toggle_at(&db_path, "worker-40", "2026-10-19 12:00:00");
    toggle_at(&db_path, "worker-40", "2026-10-19 12:00:45");

    let out = temp_out("export_json_date", "json");

    sg().args([
        "--db", &db_path, "export", "--format", "json", "--date", "2026-10-19", "--file", &out,
    ])
    .assert()
    .success();

    let content = fs::read_to_string(&out).expect("read exported json");
    let json: serde_json::Value = serde_json::from_str(&content).expect("valid json");

    assert_eq!(json["total_absences"], 1);
    assert_eq!(json["total_duration"], 45);
    assert_eq!(json["rows"][0]["pc_number"], "PC-40");
    assert_eq!(json["rows"][0]["team"], "B");
}

#[test]
fn test_export_empty_day_writes_header_only() {
    let db_path = setup_test_db("export_empty_day");
    init_db(&db_path);

    let out = temp_out("export_empty_day", "csv");

    sg().args([
        "--db", &db_path, "export", "--date", "2001-01-01", "--file", &out,
    ])
    .assert()
    .success();

    let content = fs::read_to_string(&out).expect("read exported csv");
    assert_eq!(content.lines().count(), 1);
}

#[test]
fn test_export_rejects_bad_date() {
    let db_path = setup_test_db("export_bad_date");
    init_db(&db_path);

    sg().args(["--db", &db_path, "export", "--date", "19/10/2026"])
        .assert()
        .failure();
}
