//! Process exit codes.

/// Exit codes for the dupecheck binary.
///
/// - 0: Success (run completed and the log was written, with or without
///   individual hash failures)
/// - 1: General error (missing target path, unreadable directory mid-walk,
///   or a failure writing the run log)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Run completed normally.
    Success = 0,
    /// An unexpected error aborted the run.
    GeneralError = 1,
}

impl ExitCode {
    /// Get the numeric exit code.
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}
