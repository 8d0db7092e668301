//! Logging setup for the Irori binaries.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Build the default filter directive for a binary.
///
/// Both the binary target and every `irori_*` library crate log at
/// `default_log_level`.
fn default_directive(binary_name: &str, default_log_level: &str) -> String {
    let binary_target = binary_name.replace('-', "_");
    format!(
        "irori_server={level},irori_client={level},irori_shared={level},{binary}={level},tower_http=info",
        level = default_log_level,
        binary = binary_target,
    )
}

/// Initialize the tracing subscriber with the specified default log level.
///
/// The level can be overridden using the `RUST_LOG` environment variable.
///
/// # Examples
///
/// ```no_run
/// use irori_shared::logger::setup_logger;
///
/// setup_logger("irori-server", "debug");
/// ```
pub fn setup_logger(binary_name: &str, default_log_level: &str) {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_directive(binary_name, default_log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive_covers_binary_and_crates() {
        // テスト項目: バイナリ名のハイフンがアンダースコアに変換され、各クレートが含まれる
        // given (前提条件):
        let binary = "irori-server";

        // when (操作):
        let directive = default_directive(binary, "debug");

        // then (期待する結果):
        assert!(directive.contains("irori_server=debug"));
        assert!(directive.contains("irori_client=debug"));
        assert!(directive.contains("tower_http=info"));
        assert!(directive.parse::<EnvFilter>().is_ok());
    }
}
