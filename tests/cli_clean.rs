//! Removal of packages the manifest no longer requires

mod common;

use common::*;

fn installed_with_c() -> TestEnv {
    let env = TestEnv::new();
    for name in ["a", "b", "c"] {
        env.publish(Package::new(name, "1.0.0"));
    }
    env.write_manifest(&format!(
        "{}\n[[dependencies]]\nname = \"c\"\n",
        SCENARIO_DEPENDENCIES
    ));
    let result = env.run(&["install"]);
    assert!(result.success, "{}", result.combined_output());
    env
}

#[test]
fn clean_removes_only_undeclared_packages() {
    let env = installed_with_c();
    env.write_manifest(SCENARIO_DEPENDENCIES);

    let result = env.run(&["clean"]);

    assert!(result.success, "{}", result.combined_output());
    assert_eq!(result.stdout, "Removed c@1.0.0\n");
    assert!(!env.sandbox_path("cache/c-1.0.0.pkg").exists());
    assert!(!env.sandbox_path("specifications/c-1.0.0.toml").exists());
    assert!(!env.sandbox_path("gems/c-1.0.0").exists());

    // b is only visible in `test` but still required
    assert!(env.sandbox_path("cache/b-1.0.0.pkg").is_file());
    assert!(env.sandbox_path("gems/b-1.0.0").is_dir());
}

#[test]
fn clean_with_nothing_stale() {
    let env = installed_with_c();

    let result = env.run(&["clean"]);

    assert!(result.success);
    assert_eq!(result.stdout, "Nothing to clean\n");
}

#[test]
fn install_drops_environment_no_longer_declared() {
    let env = installed_with_c();
    env.write_manifest("[[dependencies]]\nname = \"a\"\n");

    let result = env.run(&["install"]);

    assert!(result.success, "{}", result.combined_output());
    assert!(result.stdout.contains("2 removed, 1 environments"));
    assert!(!env.sandbox_path("environments/test.toml").exists());
    assert!(env.sandbox_path("environments/default.toml").is_file());
}

#[test]
fn json_clean_reports_removed_ids() {
    let env = installed_with_c();
    env.write_manifest(SCENARIO_DEPENDENCIES);

    let result = env.run(&["--json", "clean"]);

    assert!(result.success);
    let summary = result.json_lines().pop().unwrap();
    assert_eq!(summary["event"], "clean_complete");
    assert_eq!(summary["removed"], serde_json::json!(["c@1.0.0"]));
}
