//! Integration tests for error types

#[cfg(test)]
mod tests {
    use cmk_errors::*;

    #[test]
    fn test_error_conversion() {
        let build_err = BuildError::ConfigureFailed {
            command: "cmake . -Bbuild -DCMAKE_BUILD_TYPE=Debug".into(),
            exit_code: Some(1),
        };
        let err: Error = build_err.into();
        assert!(matches!(err, Error::Build(BuildError::ConfigureFailed { .. })));

        let cfg_err = ConfigError::NotFound {
            path: "/nope.toml".into(),
        };
        let err: Error = cfg_err.into();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_error_display() {
        let err = BuildError::CompileFailed {
            command: "cmake --build ./build".into(),
            exit_code: Some(2),
        };
        assert_eq!(
            err.to_string(),
            "compile failed: `cmake --build ./build` exited with status 2"
        );

        let err = BuildError::ConfigureFailed {
            command: "cmake".into(),
            exit_code: None,
        };
        assert_eq!(
            err.to_string(),
            "configure failed: `cmake` was terminated by a signal"
        );
    }

    #[test]
    fn test_error_clone() {
        let err = PlatformError::CommandNotFound {
            command: "ctest".into(),
        };
        let cloned = err.clone();
        assert_eq!(err.to_string(), cloned.to_string());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = Error::io_with_path(&io_err, "/etc/cmk.toml");
        assert!(matches!(
            err,
            Error::Io {
                kind: std::io::ErrorKind::PermissionDenied,
                path: Some(_),
                ..
            }
        ));
        assert_eq!(err.user_message(), "/etc/cmk.toml: denied");
        assert_eq!(err.user_code(), Some("error.io"));
    }

    #[test]
    fn test_user_facing_codes_and_hints() {
        let err: Error = BuildError::CompileFailed {
            command: "cmake --build ./build".into(),
            exit_code: Some(1),
        }
        .into();
        assert_eq!(err.user_code(), Some("build.compile_failed"));
        assert!(err.user_hint().is_some());

        let err: Error = ConfigError::InvalidSourceRoot {
            path: "/missing".into(),
            reason: "does not exist".into(),
        }
        .into();
        assert_eq!(err.user_code(), Some("config.invalid_source_root"));
        assert!(err.user_message().contains("/missing"));
    }
}
