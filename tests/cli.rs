use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

fn campus(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("campus").unwrap();
    cmd.env_remove("CAMPUS_HOME")
        .env("CAMPUS_LOG", "off")
        .arg("--home")
        .arg(home);
    cmd
}

#[test]
fn list_shows_placeholders_on_first_run() {
    let home = TempDir::new().unwrap();
    campus(home.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("4 students"))
        .stdout(predicate::str::contains("Alice Martin"))
        .stdout(predicate::str::contains("diana@campus.com"));
    assert!(home.path().join("campus.db").exists());
}

#[test]
fn bare_invocation_lists() {
    let home = TempDir::new().unwrap();
    campus(home.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Charlie Lambert"));
}

#[test]
fn add_then_list() {
    let home = TempDir::new().unwrap();
    campus(home.path())
        .args(["add", "Eve Adams", "eve@campus.com"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Student added"))
        .stdout(predicate::str::contains("Role:    Étudiant"));

    campus(home.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("5 students"))
        .stdout(predicate::str::contains("Eve Adams"));
}

#[test]
fn duplicate_email_is_reported() {
    let home = TempDir::new().unwrap();
    campus(home.path())
        .args(["add", "Alice Bis", "alice@campus.com"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error: This email already exists"));

    campus(home.path())
        .arg("list")
        .assert()
        .stdout(predicate::str::contains("4 students"));
}

#[test]
fn invalid_form_never_saves() {
    let home = TempDir::new().unwrap();
    campus(home.path())
        .args(["add", "Ann", "not-an-email"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid email"));

    campus(home.path())
        .args(["add", "   ", "ann@campus.com"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Please fill in all fields"));
}

#[test]
fn search_is_case_insensitive() {
    let home = TempDir::new().unwrap();
    campus(home.path())
        .args(["search", "ALICE"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Alice Martin"))
        .stdout(predicate::str::contains("Bob Dupont").not());

    campus(home.path())
        .args(["list", "--search", "dupont"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Bob Dupont"))
        .stdout(predicate::str::contains("Alice Martin").not());
}

#[test]
fn search_without_matches_says_so() {
    let home = TempDir::new().unwrap();
    campus(home.path())
        .args(["search", "nobody"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No student matches \"nobody\""));
}

#[test]
fn view_unknown_student_fails() {
    let home = TempDir::new().unwrap();
    campus(home.path())
        .args(["view", "99"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Student not found"));
}

#[test]
fn edit_changes_only_given_fields() {
    let home = TempDir::new().unwrap();
    campus(home.path())
        .args(["edit", "2", "--name", "Robert Dupont"])
        .assert()
        .success();

    campus(home.path())
        .args(["view", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Robert Dupont"))
        .stdout(predicate::str::contains("bob@campus.com"));
}

#[test]
fn edit_keeps_custom_role() {
    let home = TempDir::new().unwrap();
    campus(home.path())
        .args(["add", "Eve", "eve@campus.com", "--role", "Alumni"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Role:    Alumni"));

    campus(home.path())
        .args(["edit", "5", "--name", "Eve Adams"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Eve Adams"))
        .stdout(predicate::str::contains("Role:    Alumni"));

    campus(home.path())
        .args(["edit", "5", "--role", "Tuteur"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Role:    Tuteur"))
        .stdout(predicate::str::contains("eve@campus.com"));
}

#[test]
fn edit_to_taken_email_fails() {
    let home = TempDir::new().unwrap();
    campus(home.path())
        .args(["edit", "2", "--email", "alice@campus.com"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("This email already exists"));
}

#[test]
fn delete_is_idempotent() {
    let home = TempDir::new().unwrap();
    campus(home.path())
        .args(["delete", "4", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("3 students"));

    campus(home.path())
        .args(["delete", "4", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No student with id 4"));
}

#[test]
fn delete_asks_for_confirmation() {
    let home = TempDir::new().unwrap();
    campus(home.path())
        .args(["delete", "1"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Alice Martin <alice@campus.com>"))
        .stdout(predicate::str::contains("Aborted."));

    campus(home.path())
        .arg("list")
        .assert()
        .stdout(predicate::str::contains("4 students"));
}

#[test]
fn default_avatar_by_number() {
    let home = TempDir::new().unwrap();
    campus(home.path())
        .args(["add", "Eve", "eve@campus.com", "--avatar", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("👩 (#FF69B4)"));

    campus(home.path())
        .args(["add", "Fay", "fay@campus.com", "--avatar", "9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Avatar must be between 1 and 8"));
}

#[test]
fn camera_is_denied_by_default() {
    let home = TempDir::new().unwrap();
    let photo = home.path().join("me.jpg");
    std::fs::write(&photo, b"jpeg").unwrap();

    campus(home.path())
        .args(["add", "Eve", "eve@campus.com", "--camera"])
        .arg(&photo)
        .assert()
        .failure()
        .stderr(predicate::str::contains("access to your camera"));
}

#[test]
fn gallery_photo_is_imported() {
    let home = TempDir::new().unwrap();
    let photo = home.path().join("me.PNG");
    std::fs::write(&photo, b"png").unwrap();

    campus(home.path())
        .args(["add", "Eve", "eve@campus.com", "--photo"])
        .arg(&photo)
        .assert()
        .success()
        .stdout(predicate::str::contains("Avatar:  image"));

    let imported: Vec<_> = std::fs::read_dir(home.path().join("media"))
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(imported.len(), 1);
    assert!(imported[0].starts_with("avatar-"));
    assert!(imported[0].ends_with(".png"));
}

#[test]
fn clear_avatar_keeps_other_fields() {
    let home = TempDir::new().unwrap();
    campus(home.path())
        .args(["edit", "1", "--avatar", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("👨 (#4CAF50)"));

    campus(home.path())
        .args(["edit", "1", "--clear-avatar"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Avatar:  default"))
        .stdout(predicate::str::contains("alice@campus.com"));
}

#[test]
fn config_default_role_applies_to_new_students() {
    let home = TempDir::new().unwrap();
    campus(home.path())
        .args(["config", "default-role", "Auditeur"])
        .assert()
        .success()
        .stdout(predicate::str::contains("default-role set to Auditeur"));

    campus(home.path())
        .args(["config", "default-role"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Auditeur"));

    campus(home.path())
        .args(["add", "Eve", "eve@campus.com"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Role:    Auditeur"));
}

#[test]
fn config_lists_all_keys() {
    let home = TempDir::new().unwrap();
    campus(home.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("db-file = campus.db"))
        .stdout(predicate::str::contains("allow-camera = false"));
}

#[test]
fn init_reports_home() {
    let home = TempDir::new().unwrap();
    let nested = home.path().join("school");
    campus(&nested)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized campus directory"))
        .stdout(predicate::str::contains("4 students"));
    assert!(nested.join("campus.db").exists());
}

#[test]
fn home_can_come_from_environment() {
    let home = TempDir::new().unwrap();
    Command::cargo_bin("campus")
        .unwrap()
        .env("CAMPUS_HOME", home.path())
        .env("CAMPUS_LOG", "off")
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("4 students"));
    assert!(home.path().join("campus.db").exists());
}

#[test]
fn avatars_lists_default_set() {
    let home = TempDir::new().unwrap();
    campus(home.path())
        .arg("avatars")
        .assert()
        .success()
        .stdout(predicate::str::contains("  1. 👤  #007AFF"))
        .stdout(predicate::str::contains("  8. 👴  #9B59B6"));
}
