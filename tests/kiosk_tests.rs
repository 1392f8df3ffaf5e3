use predicates::str::contains;

mod common;
use common::{init_db_with_employee, kiosk_pin, ppd, setup_test_db};

#[test]
fn punch_in_debounce_punch_out() {
    let db_path = setup_test_db("kiosk_in_debounce_out");
    init_db_with_employee(&db_path);

    kiosk_pin(&db_path, "kioskA", "1234", "2025-06-02T08:00:00Z")
        .success()
        .stdout(contains("clocked IN"));

    // 5s later: blocked as a duplicate tap (default debounce is 30s).
    kiosk_pin(&db_path, "kioskA", "1234", "2025-06-02T08:00:05Z")
        .success()
        .stdout(contains("Duplicate punch blocked"));

    // 31s later: registers as the clock-out.
    kiosk_pin(&db_path, "kioskA", "1234", "2025-06-02T08:00:31Z")
        .success()
        .stdout(contains("clocked OUT"));
}

#[test]
fn wrong_pins_lock_the_source_but_not_others() {
    let db_path = setup_test_db("kiosk_lockout_isolation");
    init_db_with_employee(&db_path);

    ppd()
        .args([
            "--db", &db_path, "employee", "add", "--name", "Bob", "--rate", "17.0", "--pin",
            "4321",
        ])
        .assert()
        .success();

    for i in 0..5 {
        kiosk_pin(
            &db_path,
            "kioskA",
            "9999",
            &format!("2025-06-02T08:00:0{}Z", i),
        )
        .success()
        .stdout(contains("Invalid PIN"));
    }

    // Correct PIN is rejected while kioskA is locked out.
    kiosk_pin(&db_path, "kioskA", "1234", "2025-06-02T08:00:10Z")
        .success()
        .stdout(contains("Locked out"));

    // kioskB is unaffected.
    kiosk_pin(&db_path, "kioskB", "4321", "2025-06-02T08:00:11Z")
        .success()
        .stdout(contains("clocked IN"));

    // After the 10-minute lockout window clears, kioskA works again.
    kiosk_pin(&db_path, "kioskA", "1234", "2025-06-02T08:21:00Z")
        .success()
        .stdout(contains("clocked IN"));
}

#[test]
fn note_flag_lands_on_the_punch_row() {
    let db_path = setup_test_db("kiosk_note");
    init_db_with_employee(&db_path);

    ppd()
        .args([
            "--db", &db_path, "kiosk", "pin", "--source", "kioskA", "--pin", "1234", "--at",
            "2025-06-02T08:00:00Z", "--note", "opening shift",
        ])
        .assert()
        .success()
        .stdout(contains("clocked IN"));

    let conn = punchpad::db::open_db(&db_path).unwrap();
    let open = punchpad::db::punches::open_punch_for(&conn, 1)
        .unwrap()
        .unwrap();
    assert_eq!(open.note.as_deref(), Some("opening shift"));
}

#[test]
fn attempts_command_shows_the_trail() {
    let db_path = setup_test_db("kiosk_attempt_trail");
    init_db_with_employee(&db_path);

    kiosk_pin(&db_path, "kioskA", "9999", "2025-06-02T08:00:00Z").success();
    kiosk_pin(&db_path, "kioskA", "1234", "2025-06-02T08:00:40Z").success();

    ppd()
        .args(["--db", &db_path, "attempts", "--source", "kioskA"])
        .assert()
        .success()
        .stdout(contains("no_match"))
        .stdout(contains("ok"));
}

#[test]
fn settings_override_changes_behavior() {
    let db_path = setup_test_db("kiosk_settings_override");
    init_db_with_employee(&db_path);

    ppd()
        .args([
            "--db",
            &db_path,
            "config",
            "--set",
            "kiosk.debounce_seconds",
            "5",
        ])
        .assert()
        .success();

    kiosk_pin(&db_path, "kioskA", "1234", "2025-06-02T08:00:00Z")
        .success()
        .stdout(contains("clocked IN"));

    // 6s > the shrunk 5s debounce: this is a real clock-out now.
    kiosk_pin(&db_path, "kioskA", "1234", "2025-06-02T08:00:06Z")
        .success()
        .stdout(contains("clocked OUT"));
}

#[test]
fn audit_records_punch_actions() {
    let db_path = setup_test_db("kiosk_audit");
    init_db_with_employee(&db_path);

    kiosk_pin(&db_path, "kioskA", "1234", "2025-06-02T08:00:00Z").success();

    ppd()
        .args(["--db", &db_path, "audit"])
        .assert()
        .success()
        .stdout(contains("punch.clock_in"))
        .stdout(contains("employee.add"));
}
