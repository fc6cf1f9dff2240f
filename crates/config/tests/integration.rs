//! Integration tests for config

#[cfg(test)]
mod tests {
    use cmk_config::*;
    use cmk_errors::{ConfigError, Error};
    use std::io::Write;
    use std::path::PathBuf;
    use std::sync::Mutex;
    use tempfile::NamedTempFile;

    // Mutex to ensure env var tests don't run concurrently
    static ENV_TEST_MUTEX: Mutex<()> = Mutex::new(());

    const ENV_VARS: &[&str] = &[
        "CMK_OUTPUT",
        "CMK_CONFIG",
        "CMK_RUN_TESTS",
        "CMK_SOURCE_ROOT",
        "CMK_CMAKE",
        "CMK_CTEST",
    ];

    fn clear_env() {
        for var in ENV_VARS {
            std::env::remove_var(var);
        }
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.build.output_dir, "build");
        assert_eq!(config.build.build_type, "Debug");
        assert!(!config.build.run_tests);
        assert_eq!(config.tools.cmake, "cmake");
        assert_eq!(config.tools.ctest, "ctest");
        assert!(config.paths.source_root.is_none());
    }

    #[tokio::test]
    async fn test_load_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r#"
[build]
output_dir = "out"
build_type = "RelWithDebInfo"
run_tests = true

[tools]
cmake = "/opt/cmake/bin/cmake"

[paths]
source_root = "/src/project"
        "#
        )
        .unwrap();

        let config = Config::load_from_file(temp_file.path()).await.unwrap();
        assert_eq!(config.build.output_dir, "out");
        assert_eq!(config.build.build_type, "RelWithDebInfo");
        assert!(config.build.run_tests);
        assert_eq!(config.tools.cmake, "/opt/cmake/bin/cmake");
        // Unspecified fields keep their defaults
        assert_eq!(config.tools.ctest, "ctest");
        assert_eq!(
            config.paths.source_root,
            Some(PathBuf::from("/src/project"))
        );
    }

    #[tokio::test]
    async fn test_partial_file_uses_defaults() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "[build]\nbuild_type = \"Release\"").unwrap();

        let config = Config::load_from_file(temp_file.path()).await.unwrap();
        assert_eq!(config.build.output_dir, "build");
        assert_eq!(config.build.build_type, "Release");
    }

    #[tokio::test]
    async fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");

        let result = Config::load_or_default(Some(&missing)).await;
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::NotFound { .. }))
        ));
    }

    #[tokio::test]
    async fn test_unreadable_file_is_io_error_not_missing() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(&[0xff, 0xfe, 0x00]).unwrap();

        let result = Config::load_from_file(temp_file.path()).await;
        match result {
            Err(Error::Io { path, .. }) => {
                assert_eq!(path.as_deref(), Some(temp_file.path()));
            }
            other => panic!("expected I/O error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_directory_as_settings_is_io_error() {
        let dir = tempfile::tempdir().unwrap();

        let result = Config::load_or_default(Some(dir.path())).await;
        assert!(matches!(result, Err(Error::Io { .. })));
    }

    #[tokio::test]
    async fn test_invalid_toml_is_parse_error() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "[build\noutput_dir = ").unwrap();

        let result = Config::load_from_file(temp_file.path()).await;
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::ParseError { .. }))
        ));
    }

    #[test]
    fn test_merge_env() {
        let _guard = ENV_TEST_MUTEX.lock().unwrap();
        clear_env();

        std::env::set_var("CMK_OUTPUT", "out-env");
        std::env::set_var("CMK_CONFIG", "Release");
        std::env::set_var("CMK_RUN_TESTS", "yes");
        std::env::set_var("CMK_CTEST", "/usr/local/bin/ctest");

        let mut config = Config::default();
        config.merge_env().unwrap();

        assert_eq!(config.build.output_dir, "out-env");
        assert_eq!(config.build.build_type, "Release");
        assert!(config.build.run_tests);
        assert_eq!(config.tools.ctest, "/usr/local/bin/ctest");
        assert_eq!(config.tools.cmake, "cmake");

        clear_env();
    }

    #[test]
    fn test_invalid_env_value() {
        let _guard = ENV_TEST_MUTEX.lock().unwrap();
        clear_env();

        std::env::set_var("CMK_RUN_TESTS", "maybe");

        let mut config = Config::default();
        let result = config.merge_env();
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidValue { .. }))
        ));

        clear_env();
    }

    #[test]
    fn test_cli_overrides_take_precedence() {
        let _guard = ENV_TEST_MUTEX.lock().unwrap();
        clear_env();

        std::env::set_var("CMK_OUTPUT", "out-env");
        std::env::set_var("CMK_CONFIG", "MinSizeRel");

        let mut config = Config::default();
        config.merge_env().unwrap();
        config
            .apply_overrides(Overrides {
                output_dir: Some("foo".to_string()),
                build_type: Some("Release".to_string()),
                run_tests: false,
                source_root: None,
            })
            .unwrap();

        assert_eq!(config.build.output_dir, "foo");
        assert_eq!(config.build.build_type, "Release");
        assert!(!config.build.run_tests);

        clear_env();
    }

    #[test]
    fn test_tests_flag_only_enables() {
        let mut config = Config::default();
        config.build.run_tests = true;
        config.apply_overrides(Overrides::default()).unwrap();
        assert!(config.build.run_tests);

        let mut config = Config::default();
        config
            .apply_overrides(Overrides {
                run_tests: true,
                ..Overrides::default()
            })
            .unwrap();
        assert!(config.build.run_tests);
    }

    #[test]
    fn test_empty_override_rejected() {
        let mut config = Config::default();
        let result = config.apply_overrides(Overrides {
            output_dir: Some("  ".to_string()),
            ..Overrides::default()
        });
        assert!(result.is_err());
        assert_eq!(config.build.output_dir, "build");
    }
}
