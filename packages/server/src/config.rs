//! Command-line configuration for the relay server.

use clap::Parser;

/// Family chat relay server
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(name = "famchat-server", version, about)]
pub struct ServerConfig {
    /// Address to bind
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Port to bind
    #[arg(short, long, default_value_t = 8080)]
    pub port: u16,

    /// Default log level when RUST_LOG is unset
    #[arg(long, default_value = "debug")]
    pub log_level: String,
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            log_level: "debug".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_parser_defaults() {
        // テスト項目: 引数なしのパース結果は Default と一致する
        let parsed = ServerConfig::try_parse_from(["famchat-server"]).unwrap();
        assert_eq!(parsed, ServerConfig::default());
        assert_eq!(parsed.bind_address(), "127.0.0.1:8080");
    }

    #[test]
    fn test_parse_overrides() {
        // テスト項目: host / port / log-level を上書きできる
        let parsed = ServerConfig::try_parse_from([
            "famchat-server",
            "--host",
            "0.0.0.0",
            "-p",
            "9000",
            "--log-level",
            "info",
        ])
        .unwrap();

        assert_eq!(parsed.bind_address(), "0.0.0.0:9000");
        assert_eq!(parsed.log_level, "info");
    }

    #[test]
    fn test_parse_rejects_invalid_port() {
        // テスト項目: 範囲外のポートはエラー
        let result = ServerConfig::try_parse_from(["famchat-server", "--port", "70000"]);
        assert!(result.is_err());
    }
}
