//! War API 클라이언트 에러 타입

use std::fmt;

/// War API 호출 결과
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// 연결 실패, 본문 읽기 실패 등 네트워크 계층 에러
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// 2xx 이외의 HTTP 응답
    #[error("request to {url} returned {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    /// 응답 본문이 기대한 스키마와 맞지 않음
    #[error("could not decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// 맵 목록 조회 중 하나 이상의 맵이 실패 (입력 순서)
    #[error("{} region(s) failed to fetch, first: {}", .0.len(), FirstFailure(.0))]
    Regions(Vec<RegionFailure>),

    /// 워커 태스크가 panic 등으로 종료됨
    #[error("region worker task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl Error {
    /// 네트워크 실패와 비정상 상태 코드는 모두 transport 에러로 취급
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport { .. } | Error::Status { .. })
    }

    pub fn is_decode(&self) -> bool {
        matches!(self, Error::Decode { .. })
    }
}

/// 실패한 맵 하나
#[derive(Debug)]
pub struct RegionFailure {
    /// 입력 목록에서의 위치
    pub index: usize,
    pub region: String,
    pub error: Error,
}

struct FirstFailure<'a>(&'a [RegionFailure]);

impl fmt::Display for FirstFailure<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.first() {
            Some(failure) => write!(f, "{}: {}", failure.region, failure.error),
            None => f.write_str("<none>"),
        }
    }
}
