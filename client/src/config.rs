//! 설정 파일 (config.toml)
//!
//! 접속할 서버 목록, dynamic 데이터 캐시 TTL, 맵 동시 조회 수를 정의합니다.

use serde::Deserialize;
use std::fmt;
use std::time::Duration;

/// live1 API 주소
const LIVE1_URL: &str = "https://war-service-live.foxholeservices.com/api/";
/// live2 API 주소
const LIVE2_URL: &str = "https://war-service-live-2.foxholeservices.com/api/";

/// dynamic 맵 데이터 기본 캐시 유지 시간 (밀리초)
pub const DEFAULT_DYNAMIC_TTL_MS: u64 = 3_000;

/// 알려진 War API 서버
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Server {
    Live1,
    Live2,
}

impl Server {
    pub const ALL: [Server; 2] = [Server::Live1, Server::Live2];

    /// 서버의 API base 주소 (끝이 `/`)
    pub fn base_url(self) -> &'static str {
        match self {
            Server::Live1 => LIVE1_URL,
            Server::Live2 => LIVE2_URL,
        }
    }
}

impl fmt::Display for Server {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Server::Live1 => f.write_str("live1"),
            Server::Live2 => f.write_str("live2"),
        }
    }
}

/// 클라이언트 생성 옵션
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientOptions {
    /// dynamic 맵 데이터 캐시 유지 시간
    pub dynamic_ttl: Duration,
    /// 맵 목록 조회 시 동시에 실행할 최대 태스크 수 (None이면 제한 없음)
    pub max_concurrency: Option<usize>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            dynamic_ttl: Duration::from_millis(DEFAULT_DYNAMIC_TTL_MS),
            max_concurrency: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_servers")]
    pub servers: Vec<Server>,
    #[serde(default)]
    pub cache: Cache,
    #[serde(default)]
    pub fetch: Fetch,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Cache {
    #[serde(default = "default_dynamic_ttl_ms")]
    pub dynamic_ttl_ms: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Fetch {
    #[serde(default)]
    pub max_concurrency: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            servers: default_servers(),
            cache: Cache::default(),
            fetch: Fetch::default(),
        }
    }
}

impl Default for Cache {
    fn default() -> Self {
        Self {
            dynamic_ttl_ms: default_dynamic_ttl_ms(),
        }
    }
}

impl Config {
    pub fn client_options(&self) -> ClientOptions {
        ClientOptions {
            dynamic_ttl: Duration::from_millis(self.cache.dynamic_ttl_ms),
            // 0은 제한 없음으로 취급
            max_concurrency: self.fetch.max_concurrency.filter(|&n| n > 0),
        }
    }
}

fn default_servers() -> Vec<Server> {
    Server::ALL.to_vec()
}

fn default_dynamic_ttl_ms() -> u64 {
    DEFAULT_DYNAMIC_TTL_MS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.servers, vec![Server::Live1, Server::Live2]);
        assert_eq!(config.client_options(), ClientOptions::default());
        assert_eq!(config.client_options().dynamic_ttl, Duration::from_secs(3));
    }

    #[test]
    fn parses_all_sections() {
        let config: Config = toml::from_str(
            r#"
            servers = ["live2"]

            [cache]
            dynamic_ttl_ms = 10000

            [fetch]
            max_concurrency = 4
            "#,
        )
        .unwrap();

        assert_eq!(config.servers, vec![Server::Live2]);
        let options = config.client_options();
        assert_eq!(options.dynamic_ttl, Duration::from_secs(10));
        assert_eq!(options.max_concurrency, Some(4));
    }

    #[test]
    fn zero_concurrency_means_unbounded() {
        let config: Config = toml::from_str("[fetch]\nmax_concurrency = 0").unwrap();
        assert_eq!(config.client_options().max_concurrency, None);
    }

    #[test]
    fn unknown_server_is_rejected() {
        assert!(toml::from_str::<Config>(r#"servers = ["live3"]"#).is_err());
    }

    #[test]
    fn server_addresses() {
        assert_eq!(
            Server::Live2.base_url(),
            "https://war-service-live-2.foxholeservices.com/api/"
        );
        assert_eq!(Server::Live1.to_string(), "live1");
    }
}
