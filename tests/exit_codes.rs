//! Process-level tests driving the `cks` binary.

use std::process::{Command, Output};

use tempfile::TempDir;

fn cks(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_cks"))
        .args(args)
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

mod success {
    use super::*;

    #[test]
    fn dummy_exits_zero() {
        let output = cks(&["dummy"]);

        assert_eq!(output.status.code(), Some(0));
        let out = stdout(&output);
        assert!(out.contains("start to init log system."));
        assert!(out.contains("start to init error handling."));
        assert!(out.contains("simple information is enabled for exit handling."));
        assert!(out.contains("Flags accessible in dummy"));
        assert!(out.contains("get error in dummy"));
    }

    #[test]
    fn configured_level_ignores_rust_log() {
        let output = Command::new(env!("CARGO_BIN_EXE_cks"))
            .arg("dummy")
            .env("RUST_LOG", "debug")
            .output()
            .unwrap();

        assert_eq!(output.status.code(), Some(0));
        assert!(!stdout(&output).contains("dummy called"));
    }

    #[test]
    fn debug_level_from_flag_shows_debug_records() {
        let output = cks(&["dummy", "--log-level", "debug"]);

        assert_eq!(output.status.code(), Some(0));
        assert!(stdout(&output).contains("dummy called"));
    }

    #[test]
    fn dumy_alias_is_accepted() {
        let output = cks(&["dumy"]);

        assert_eq!(output.status.code(), Some(0));
    }

    #[test]
    fn dummy_writes_log_file_when_enabled() {
        let dir = TempDir::new().unwrap();
        let log = dir.path().join("cks.log");

        let output = cks(&[
            "dummy",
            "--enable-log-file",
            "--log-file",
            log.to_str().unwrap(),
        ]);

        assert_eq!(output.status.code(), Some(0));
        let content = std::fs::read_to_string(log).unwrap();
        assert!(content.contains("Flags accessible in dummy"));
        assert!(content.contains("error occurred in dummy step\n    at "));
    }

    #[test]
    fn log_file_directory_is_created() {
        let dir = TempDir::new().unwrap();
        let log = dir.path().join("logs").join("cks.log");

        let output = cks(&["dummy", "--enable-log-file", "--log-file", log.to_str().unwrap()]);

        assert_eq!(output.status.code(), Some(0));
        assert!(log.exists());
    }
}

mod failure {
    use super::*;

    #[test]
    fn unknown_log_level_exits_one() {
        let output = cks(&["dummy", "--log-level", "verbose"]);

        assert_eq!(output.status.code(), Some(1));
        let err = stderr(&output);
        assert!(err.contains("Configuration error"));
        assert!(err.contains("verbose"));
    }

    #[test]
    fn unknown_err_handling_exits_one_with_detail() {
        let output = cks(&["dummy", "--err-handling", "bogus"]);

        assert_eq!(output.status.code(), Some(1));
        let out = stdout(&output);
        assert!(out.contains(
            r#"exit on fatal error: unknown type of exit handling: bogus, only support "simple", "detail""#
        ));
        assert!(!out.contains("Flags accessible in dummy"));
    }

    #[test]
    fn missing_config_file_exits_one() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.toml");

        let output = cks(&["dummy", "--config", path.to_str().unwrap()]);

        assert_eq!(output.status.code(), Some(1));
        assert!(stderr(&output).contains("Configuration error"));
    }

    #[test]
    fn unopenable_log_file_exits_one() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("not-a-directory");
        std::fs::write(&blocker, "").unwrap();
        let log = blocker.join("cks.log");

        let output = cks(&[
            "dummy",
            "--enable-log-file",
            "--log-file",
            log.to_str().unwrap(),
        ]);

        assert_eq!(output.status.code(), Some(1));
        assert!(stdout(&output).contains("exit on fatal error:"));
    }
}
