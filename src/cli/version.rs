//! `--version` output.

/// The current version of tuiman, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn version_string() -> String {
    format!("tuiman {}", VERSION)
}

pub fn handle_version_command() {
    println!("{}", version_string());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_format() {
        let parts: Vec<&str> = VERSION.split('.').collect();
        assert!(parts.len() >= 2, "Version should have at least major.minor");
        assert_eq!(version_string(), format!("tuiman {}", VERSION));
    }
}
