//! Error reporting and exit codes for the CLI.

/// Exit codes of the `vtp` command.
pub mod exit_codes {
    /// Command succeeded.
    pub const SUCCESS: i32 = 0;
    /// The input violated the protocol (bad opcode, buffer length, channel).
    pub const INVALID: i32 = 1;
    /// I/O error or malformed command input.
    pub const IO_ERROR: i32 = 2;
}

/// ANSI color codes for error output.
mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const ERROR: &str = "\x1b[1;31m"; // Bold red
    pub const CAUSE: &str = "\x1b[0;33m"; // Yellow
}

/// Color scheme that can be disabled.
pub struct ColorScheme {
    error: &'static str,
    cause: &'static str,
    reset: &'static str,
}

impl ColorScheme {
    pub fn new(use_color: bool) -> Self {
        if use_color {
            Self {
                error: colors::ERROR,
                cause: colors::CAUSE,
                reset: colors::RESET,
            }
        } else {
            Self {
                error: "",
                cause: "",
                reset: "",
            }
        }
    }

    /// Color only when stderr is a terminal.
    pub fn for_stderr() -> Self {
        Self::new(atty::is(atty::Stream::Stderr))
    }
}

/// Exit code for a failed command.
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    if err.downcast_ref::<vtp::Error>().is_some() {
        exit_codes::INVALID
    } else {
        exit_codes::IO_ERROR
    }
}

/// Print an error and its causes to stderr.
pub fn print_error(err: &anyhow::Error, scheme: &ColorScheme) {
    eprintln!("{}error{}: {}", scheme.error, scheme.reset, err);
    for cause in err.chain().skip(1) {
        eprintln!("  {}caused by{}: {}", scheme.cause, scheme.reset, cause);
    }
}
