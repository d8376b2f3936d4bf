mod common;
use common::{init_db, setup_test_db, sg, toggle_at};
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use rusqlite::Connection;

fn count(db_path: &str, table: &str) -> i64 {
    let conn = Connection::open(db_path).unwrap();
    conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
        row.get(0)
    })
    .unwrap()
}

#[test]
fn test_bad_log_row_does_not_reset_the_roster() {
    let db_path = setup_test_db("storage_bad_row");
    init_db(&db_path);

    sg().args(["--db", &db_path, "register", "--name", "Alice", "--pc", "PC-99"])
        .assert()
        .success();

    Connection::open(&db_path)
        .unwrap()
        .execute(
            "INSERT INTO absence_logs (id, worker_id, start_time, end_time, duration, date)
             VALUES ('log-x', 'worker-1', 0, 1000, 1, 'x')",
            [],
        )
        .unwrap();

    toggle_at(&db_path, "worker-1", "2026-10-19 08:00:00");

    sg().args([
        "--db",
        &db_path,
        "--now",
        "2026-10-19 08:01:00",
        "roster",
        "--away",
    ])
    .assert()
    .success()
    .stdout(contains("Skipped 1 stored row"))
    .stdout(contains("worker-1 "))
    .stdout(contains("starting from the seed roster").not());

    sg().args(["--db", &db_path, "roster", "--search", "alice"])
        .assert()
        .success()
        .stdout(contains("PC-99"));

    assert_eq!(count(&db_path, "workers"), 67);
}

#[test]
fn test_dashboard_does_not_write_the_seed() {
    let db_path = setup_test_db("storage_read_only");

    sg().args(["--db", &db_path, "dashboard"])
        .assert()
        .success()
        .stdout(contains("Total workers:    66"));

    assert_eq!(count(&db_path, "workers"), 0);

    toggle_at(&db_path, "worker-2", "2026-10-19 09:00:00");
    assert_eq!(count(&db_path, "workers"), 66);
}

#[test]
fn test_audit_rows_follow_the_pinned_clock() {
    let db_path = setup_test_db("storage_audit_time");
    init_db(&db_path);

    toggle_at(&db_path, "worker-4", "2026-10-19 08:00:00");

    sg().args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("2026-10-19T08:00:00"))
        .stdout(contains("(worker-4)"));
}

#[test]
fn test_db_check_reports_unreadable_logs() {
    let db_path = setup_test_db("storage_db_check");
    init_db(&db_path);

    sg().args(["--db", &db_path, "db", "--check"])
        .assert()
        .success()
        .stdout(contains("Roster and absence logs are consistent."));

    Connection::open(&db_path)
        .unwrap()
        .execute(
            "INSERT INTO absence_logs (id, worker_id, start_time, end_time, duration, date)
             VALUES ('log-x', 'worker-1', 0, 1000, 1, 'x')",
            [],
        )
        .unwrap();

    sg().args(["--db", &db_path, "db", "--check"])
        .assert()
        .success()
        .stdout(contains("1 absence log(s) cannot be read"))
        .stdout(contains("consistent").not());
}
