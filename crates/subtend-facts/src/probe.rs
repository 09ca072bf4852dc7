//! On-disk and CLI probes for registration signals

use std::path::Path;

use subtend_exec::traits::CommandRunner;
use tracing::debug;

/// Consumer certificate installed at registration
pub const CONSUMER_CERT_PATH: &str = "/etc/pki/consumer/cert.pem";

/// Consumer private key installed at registration
pub const CONSUMER_KEY_PATH: &str = "/etc/pki/consumer/key.pem";

/// Check whether any of the given certificate files exists
///
/// A missing file is not an error, just `false`.
#[must_use]
pub fn cert_files_present(paths: &[&Path]) -> bool {
    paths.iter().any(|p| p.exists())
}

/// Query the server hostname the CLI is configured against
///
/// Runs `config --list` and scans for the first `hostname = <value>` line.
/// A failing command means "no opinion" and yields `None`.
pub async fn configured_hostname(runner: &dyn CommandRunner, program: &str) -> Option<String> {
    match runner.run(program, &["config", "--list"]).await {
        Ok(result) if result.success() => parse_hostname(&result.stdout),
        Ok(result) => {
            debug!(status = result.status, "config --list exited non-zero");
            None
        }
        Err(e) => {
            debug!(error = %e, "config --list did not run");
            None
        }
    }
}

/// Extract the configured hostname from `config --list` output
///
/// Values are lowercase hostnames; bracketed defaults like `[localhost]`
/// do not match.
fn parse_hostname(output: &str) -> Option<String> {
    for line in output.lines() {
        if let Some(rest) = line.trim_start().strip_prefix("hostname = ") {
            let value: String = rest
                .chars()
                .take_while(|c| {
                    c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '.' | '-' | '_')
                })
                .collect();
            if !value.is_empty() {
                return Some(value);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hostname() {
        let output = r"[server]
   hostname = katello.example.com
   insecure = [0]
   port = [443]";

        assert_eq!(
            parse_hostname(output).as_deref(),
            Some("katello.example.com")
        );
    }

    #[test]
    fn test_parse_hostname_trailing_whitespace() {
        let output = "hostname = sat6.example.com   \n";

        assert_eq!(parse_hostname(output).as_deref(), Some("sat6.example.com"));
    }

    #[test]
    fn test_parse_hostname_bracketed_default_skipped() {
        // An unset value is printed as a bracketed default
        let output = "   hostname = [subscription.rhsm.redhat.com]";

        assert_eq!(parse_hostname(output), None);
    }

    #[test]
    fn test_parse_hostname_first_match_wins() {
        let output = "hostname = first.example.com\nhostname = second.example.com";

        assert_eq!(parse_hostname(output).as_deref(), Some("first.example.com"));
    }

    #[test]
    fn test_parse_hostname_no_match() {
        assert_eq!(parse_hostname("port = [443]"), None);
        assert_eq!(parse_hostname(""), None);
    }

    #[test]
    fn test_cert_files_present() {
        assert!(!cert_files_present(&[
            Path::new("/nonexistent/cert.pem"),
            Path::new("/nonexistent/key.pem"),
        ]));
    }
}
