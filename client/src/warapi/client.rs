//! Foxhole War API 클라이언트
//!
//! 공개 War API(JSON, 인증 없음)에서 전쟁 정보, 맵 목록, 맵 데이터, 전쟁 리포트를 조회합니다.
//! dynamic 맵 데이터는 (맵, 서버)별로 짧게 캐시하고, 맵 목록은 맵마다 태스크를 띄워
//! 동시에 조회합니다.

use serde::de::DeserializeOwned;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use super::cache::{CacheKey, FreshnessCache};
use super::model::{DynamicMapData, Map, Report, StaticMapData, War};
use crate::config::{ClientOptions, Server};
use crate::error::{Error, RegionFailure, Result};

const WAR_ENDPOINT: &str = "worldconquest/war";
const MAPS_ENDPOINT: &str = "worldconquest/maps";

/// War API 클라이언트
///
/// 복제해도 HTTP 연결 풀과 dynamic 캐시는 공유됩니다.
#[derive(Clone)]
pub struct WarApiClient {
    base_url: Arc<str>,
    shared: Arc<Shared>,
}

struct Shared {
    http: reqwest::Client,
    dynamic_cache: FreshnessCache<CacheKey, DynamicMapData>,
    max_concurrency: Option<usize>,
}

impl WarApiClient {
    /// 기본 옵션으로 새 클라이언트 생성
    pub fn new(server: Server) -> Self {
        Self::with_options(server, ClientOptions::default())
    }

    pub fn with_options(server: Server, options: ClientOptions) -> Self {
        Self::with_base_url(server.base_url(), options)
    }

    /// 알려진 서버 외의 주소 (스테이징, 테스트 서버 등)
    pub fn with_base_url(base_url: &str, options: ClientOptions) -> Self {
        Self {
            base_url: normalize_base_url(base_url),
            shared: Arc::new(Shared {
                http: reqwest::Client::new(),
                dynamic_cache: FreshnessCache::new(options.dynamic_ttl),
                max_concurrency: options.max_concurrency,
            }),
        }
    }

    /// 연결 풀과 캐시를 공유하는 다른 서버용 클라이언트
    pub fn for_server(&self, server: Server) -> Self {
        self.for_base_url(server.base_url())
    }

    pub fn for_base_url(&self, base_url: &str) -> Self {
        Self {
            base_url: normalize_base_url(base_url),
            shared: Arc::clone(&self.shared),
        }
    }

    /// 접속 서버 변경 (캐시 항목은 서버별로 따로 유지됨)
    pub fn set_server(&mut self, server: Server) {
        self.base_url = normalize_base_url(server.base_url());
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// 엔드포인트에 GET 요청을 보내고 JSON 본문을 디코딩
    pub async fn fetch_json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, endpoint);
        tracing::debug!(%url, "GET");

        let response = self
            .shared
            .http
            .get(&url)
            .send()
            .await
            .map_err(|source| Error::Transport {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status { url, status });
        }

        let body = response.text().await.map_err(|source| Error::Transport {
            url: url.clone(),
            source,
        })?;

        serde_json::from_str(&body).map_err(|source| Error::Decode { url, source })
    }

    /// 현재 전쟁 정보 (캐시 없음)
    pub async fn fetch_current_war(&self) -> Result<War> {
        self.fetch_json(WAR_ENDPOINT).await
    }

    /// 맵의 전쟁 리포트 (캐시 없음)
    pub async fn fetch_report(&self, raw_name: &str) -> Result<Report> {
        self.fetch_json(&format!("worldconquest/warReport/{}", raw_name))
            .await
    }

    /// 서버가 알려주는 raw 맵 이름 목록
    pub async fn fetch_map_names(&self) -> Result<Vec<String>> {
        self.fetch_json(MAPS_ENDPOINT).await
    }

    /// 맵 하나의 static + dynamic 데이터 조회
    ///
    /// static 데이터를 먼저 받은 뒤 dynamic 데이터를 가져옵니다. static 데이터는 매번 새로 받고,
    /// dynamic 데이터는 TTL 이내면 캐시에서 가져옵니다.
    pub async fn fetch_map(&self, raw_name: &str) -> Result<Map> {
        let static_endpoint = format!("worldconquest/maps/{}/static", raw_name);
        let dynamic_endpoint = format!("worldconquest/maps/{}/dynamic/public", raw_name);
        let key = CacheKey::new(raw_name, Arc::clone(&self.base_url));

        // static 요청이 실패하면 dynamic 갱신을 시작하지 않음.
        // 진행 중인 갱신이 중간에 취소되면 같은 키를 기다리던 호출이 다시 요청하게 됨
        let static_data = self.fetch_json::<StaticMapData>(&static_endpoint).await?;
        let dynamic_data = self
            .shared
            .dynamic_cache
            .get_or_refresh(key, || self.fetch_json::<DynamicMapData>(&dynamic_endpoint))
            .await?;

        Ok(Map::from_parts(raw_name, static_data, &dynamic_data))
    }

    /// 맵 목록 전체 조회
    pub async fn fetch_map_list(&self) -> Result<Vec<Map>> {
        let names = self.fetch_map_names().await?;
        self.fetch_maps(&names).await
    }

    /// 여러 맵을 동시에 조회
    ///
    /// 맵마다 태스크 하나를 띄우고 모두 끝날 때까지 기다립니다. 결과는 입력 순서를 따릅니다.
    /// 하나라도 실패하면 부분 결과 없이 [`Error::Regions`]로 실패한 맵 전부를 돌려줍니다.
    /// 반환된 future를 drop하면 진행 중인 태스크도 중단됩니다.
    pub async fn fetch_maps<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<Map>> {
        let limit = self
            .shared
            .max_concurrency
            .map(|n| Arc::new(Semaphore::new(n.max(1))));

        let mut tasks = JoinSet::new();
        for (index, name) in names.iter().enumerate() {
            let client = self.clone();
            let name = name.as_ref().to_owned();
            let limit = limit.clone();

            tasks.spawn(async move {
                // 세마포어는 닫지 않으므로 acquire는 실패하지 않음
                let _permit = match limit {
                    Some(semaphore) => semaphore.acquire_owned().await.ok(),
                    None => None,
                };
                let result = client.fetch_map(&name).await;
                (index, name, result)
            });
        }

        let mut maps: Vec<Option<Map>> = std::iter::repeat_with(|| None).take(names.len()).collect();
        let mut failures = Vec::new();

        while let Some(joined) = tasks.join_next().await {
            let (index, region, result) = joined?;
            match result {
                Ok(map) => maps[index] = Some(map),
                Err(error) => {
                    tracing::warn!(map = %region, "failed to fetch map: {}", error);
                    failures.push(RegionFailure { index, region, error });
                }
            }
        }

        if !failures.is_empty() {
            failures.sort_by_key(|f| f.index);
            return Err(Error::Regions(failures));
        }

        tracing::info!(server = %self.base_url, "fetched {} maps", maps.len());
        Ok(maps.into_iter().flatten().collect())
    }
}

fn normalize_base_url(base_url: &str) -> Arc<str> {
    if base_url.ends_with('/') {
        Arc::from(base_url)
    } else {
        Arc::from(format!("{}/", base_url))
    }
}
