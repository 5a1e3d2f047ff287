//! Exit code constants for the playbook CLI.
//!
//! - 0: Success (including help shown for unrecognized input)
//! - 1: Any failure (bad args, unknown agent, missing files, I/O errors)

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, unknown agent, missing files, or I/O failure.
pub const USER_ERROR: i32 = 1;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct() {
        assert_ne!(SUCCESS, USER_ERROR);
    }

    #[test]
    fn exit_codes_match_cli_contract() {
        assert_eq!(SUCCESS, 0);
        assert_eq!(USER_ERROR, 1);
    }
}
