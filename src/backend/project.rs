//! Driver files on disk and the shell-backed build and run stages
//!
//! Derived names:
//! - executable: the driver path without its extension (`.exe` appended on Windows)
//! - output: the driver path with its extension replaced by the configured output extension
//!
//! The build command is opaque: it is handed to the platform shell as given, and the build counts
//! as successful only when the executable exists afterwards.

use std::env::consts::EXE_EXTENSION;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, info, warn};

use super::driver::DriverText;
use crate::config::HarnessConfig;
use crate::errors::{HarnessError, HarnessResult};
use crate::harness::interfaces::{DriverBuilder, DriverRunner};
use crate::results::{OutputFile, RawOutput};

/// Result of a build stage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOutcome {
    pub driver_path: PathBuf,
    pub executable_path: PathBuf,
    /// The executable exists after the build command ran.
    pub built: bool,
}

/// Executable path derived from a driver path.
pub fn executable_path(driver: &Path) -> HarnessResult<PathBuf> {
    require_extension(driver)?;
    Ok(driver.with_extension(EXE_EXTENSION))
}

/// Output file path derived from a driver path.
pub fn output_path(driver: &Path, extension: &str) -> HarnessResult<PathBuf> {
    require_extension(driver)?;
    Ok(driver.with_extension(extension))
}

// Without an extension the executable name would equal the driver name, and stale-executable
// removal would delete the driver.
fn require_extension(driver: &Path) -> HarnessResult<()> {
    match driver.extension() {
        Some(ext) if !ext.is_empty() => Ok(()),
        _ => Err(HarnessError::DriverExtension(driver.to_path_buf())),
    }
}

/// Write the driver text, replacing any existing file.
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn write_driver(path: &Path, text: &DriverText) -> HarnessResult<()> {
    fs::write(path, text.as_str()).map_err(|source| HarnessError::WriteDriver {
        path: path.to_path_buf(),
        source,
    })?;
    info!("wrote driver");
    Ok(())
}

/// `Command` running `line` through the platform shell.
#[cfg(windows)]
pub fn shell_command(line: &str) -> Command {
    let mut command = Command::new("cmd");
    command.arg("/C").arg(line);
    command
}

/// `Command` running `line` through the platform shell.
#[cfg(not(windows))]
pub fn shell_command(line: &str) -> Command {
    let mut command = Command::new("sh");
    command.arg("-c").arg(line);
    command
}

/// Shell command line that runs `executable` with combined output redirected to `output`.
pub fn run_command_line(executable: &Path, output: &Path) -> String {
    format!("{} > {} 2>&1", quote_path(&invocation_path(executable)), quote_path(output))
}

fn invocation_path(executable: &Path) -> PathBuf {
    if cfg!(windows) || executable.is_absolute() {
        executable.to_path_buf()
    } else {
        Path::new(".").join(executable)
    }
}

#[cfg(windows)]
fn quote_path(path: &Path) -> String {
    format!("\"{}\"", path.display())
}

#[cfg(not(windows))]
fn quote_path(path: &Path) -> String {
    format!("'{}'", path.display().to_string().replace('\'', r"'\''"))
}

/// Builds the driver by running the build command through the shell.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellBuilder;

impl DriverBuilder for ShellBuilder {
    #[tracing::instrument(skip_all, fields(driver = %driver.display(), command = %command))]
    fn build(&self, driver: &Path, command: &str) -> HarnessResult<BuildOutcome> {
        let executable = executable_path(driver)?;
        if executable.is_file() {
            debug!(path = %executable.display(), "removing stale executable");
            fs::remove_file(&executable).map_err(|source| HarnessError::StaleExecutable {
                path: executable.clone(),
                source,
            })?;
        }

        info!("building driver");
        let status = shell_command(command).status().map_err(|source| HarnessError::Spawn {
            command: command.to_string(),
            source,
        })?;
        debug!(code = ?status.code(), "build command finished");

        let built = executable.is_file();
        if !built {
            warn!(path = %executable.display(), "build did not produce an executable");
        }
        Ok(BuildOutcome {
            driver_path: driver.to_path_buf(),
            executable_path: executable,
            built,
        })
    }
}

/// Runs the built executable through the shell and reads back its captured output.
#[derive(Debug, Clone)]
pub struct ShellRunner {
    output_extension: String,
}

impl ShellRunner {
    pub fn new(config: &HarnessConfig) -> Self {
        Self {
            output_extension: config.output_extension.clone(),
        }
    }
}

impl Default for ShellRunner {
    fn default() -> Self {
        Self::new(&HarnessConfig::default())
    }
}

impl DriverRunner for ShellRunner {
    #[tracing::instrument(skip_all, fields(executable = %outcome.executable_path.display()))]
    fn run(&self, outcome: &BuildOutcome) -> HarnessResult<RawOutput> {
        let output = output_path(&outcome.driver_path, &self.output_extension)?;
        let line = run_command_line(&outcome.executable_path, &output);

        info!("running tests");
        let status = shell_command(&line)
            .status()
            .map_err(|source| HarnessError::Spawn { command: line, source })?;
        debug!(code = ?status.code(), output = %output.display(), "test run finished");

        RawOutput::read(&OutputFile::new(output))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_executable_path_strips_extension() {
        let exe = executable_path(Path::new("build/tests.f90")).unwrap();
        if cfg!(windows) {
            assert_eq!(exe, Path::new("build/tests.exe"));
        } else {
            assert_eq!(exe, Path::new("build/tests"));
        }
    }

    #[test]
    fn test_output_path_replaces_extension() {
        assert_eq!(output_path(Path::new("tests.F90"), "out").unwrap(), Path::new("tests.out"));
    }

    #[test]
    fn test_driver_without_extension_is_rejected() {
        let err = executable_path(Path::new("tests")).unwrap_err();
        assert!(matches!(err, HarnessError::DriverExtension(_)));
        assert!(output_path(Path::new("dir/tests"), "out").is_err());
    }

    #[test]
    fn test_write_driver_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tests.f90");
        fs::write(&path, "old contents that are longer").unwrap();
        write_driver(&path, &DriverText::from("program tests")).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "program tests");
    }

    #[test]
    fn test_write_driver_into_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("tests.f90");
        let err = write_driver(&path, &DriverText::from("")).unwrap_err();
        assert!(matches!(err, HarnessError::WriteDriver { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_run_command_line_prefixes_relative_paths() {
        assert_eq!(
            run_command_line(Path::new("tests"), Path::new("tests.out")),
            "'./tests' > 'tests.out' 2>&1"
        );
        assert_eq!(
            run_command_line(Path::new("/tmp/my dir/tests"), Path::new("/tmp/my dir/tests.out")),
            "'/tmp/my dir/tests' > '/tmp/my dir/tests.out' 2>&1"
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_quote_path_escapes_single_quotes() {
        assert_eq!(quote_path(Path::new("it's")), r"'it'\''s'");
    }

    #[cfg(unix)]
    #[test]
    fn test_build_removes_stale_executable_and_reports_missing() {
        let dir = tempfile::tempdir().unwrap();
        let driver = dir.path().join("tests.f90");
        let exe = dir.path().join("tests");
        fs::write(&exe, "stale").unwrap();

        let outcome = ShellBuilder.build(&driver, "true").unwrap();
        assert!(!outcome.built);
        assert!(!exe.exists());
        assert_eq!(outcome.executable_path, exe);
    }

    #[cfg(unix)]
    #[test]
    fn test_directory_named_like_executable_is_not_built() {
        let dir = tempfile::tempdir().unwrap();
        let driver = dir.path().join("tests.f90");
        let exe_dir = dir.path().join("tests");
        fs::create_dir(&exe_dir).unwrap();

        let outcome = ShellBuilder.build(&driver, "true").unwrap();
        assert!(!outcome.built);
        assert!(exe_dir.is_dir());
    }

    #[cfg(unix)]
    #[test]
    fn test_build_detects_new_executable() {
        let dir = tempfile::tempdir().unwrap();
        let driver = dir.path().join("tests.f90");
        let command = format!("touch '{}'", dir.path().join("tests").display());
        let outcome = ShellBuilder.build(&driver, &command).unwrap();
        assert!(outcome.built);
    }

    #[cfg(unix)]
    #[test]
    fn test_run_captures_combined_output() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let driver = dir.path().join("tests.f90");
        let exe = dir.path().join("tests");
        fs::write(&exe, "#!/bin/sh\necho ' SUCCESSFUL!'\necho 'to stderr' >&2\n").unwrap();
        fs::set_permissions(&exe, fs::Permissions::from_mode(0o755)).unwrap();

        let outcome = BuildOutcome {
            driver_path: driver,
            executable_path: exe,
            built: true,
        };
        let output = ShellRunner::default().run(&outcome).unwrap();
        assert_eq!(output.lines, vec![" SUCCESSFUL!", "to stderr"]);
        assert_eq!(output.path, Some(dir.path().join("tests.out")));
    }
}
