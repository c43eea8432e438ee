//! dynamic 맵 데이터 캐시
//!
//! (맵, 서버)별로 마지막으로 받아온 데이터와 조회 시각을 보관합니다.
//! 만료 확인은 읽을 때만 하며, 만료된 항목은 반환하기 전에 갱신합니다.
//! 같은 키에 대한 갱신은 한 번에 하나만 실행되고, 동시에 들어온 호출은
//! 진행 중인 갱신 결과를 기다립니다.

use std::collections::HashMap;
use std::fmt::Debug;
use std::future::Future;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// 캐시 키: 같은 이름의 맵이라도 서버가 다르면 다른 키
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    region: String,
    server: Arc<str>,
}

impl CacheKey {
    pub fn new(region: impl Into<String>, server: impl Into<Arc<str>>) -> Self {
        Self {
            region: region.into(),
            server: server.into(),
        }
    }
}

#[derive(Debug)]
struct CacheEntry<V> {
    payload: Arc<V>,
    fetched_at: Instant,
}

type Slot<V> = Arc<Mutex<Option<CacheEntry<V>>>>;

pub struct FreshnessCache<K, V> {
    ttl: Duration,
    slots: Mutex<HashMap<K, Slot<V>>>,
}

impl<K, V> FreshnessCache<K, V>
where
    K: Eq + Hash + Clone + Debug,
{
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slots: Mutex::new(HashMap::new()),
        }
    }

    /// 캐시된 값이 TTL 이내면 그대로 반환하고, 없거나 만료됐으면 `refresh`로 갱신
    ///
    /// 키별 잠금을 쥔 채로 갱신하므로 같은 키로 동시에 들어온 호출은 `refresh`를
    /// 다시 부르지 않고 갱신된 값을 받습니다. `refresh`가 실패하면 기존 항목은
    /// 그대로 남고 에러만 반환됩니다.
    pub async fn get_or_refresh<F, Fut, E>(&self, key: K, refresh: F) -> Result<Arc<V>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        let slot = self.slot(key.clone()).await;
        let mut entry = slot.lock().await;

        if let Some(cached) = entry.as_ref() {
            if cached.fetched_at.elapsed() < self.ttl {
                tracing::debug!(?key, "cache hit");
                return Ok(Arc::clone(&cached.payload));
            }
        }

        tracing::debug!(?key, stale = entry.is_some(), "cache refresh");
        let payload = Arc::new(refresh().await?);
        *entry = Some(CacheEntry {
            payload: Arc::clone(&payload),
            fetched_at: Instant::now(),
        });

        Ok(payload)
    }

    /// 키의 마지막 조회 시각 (진행 중인 갱신이 있으면 끝날 때까지 기다림)
    pub async fn fetched_at(&self, key: &K) -> Option<Instant> {
        let slot = self.slots.lock().await.get(key).cloned()?;
        let entry = slot.lock().await;
        entry.as_ref().map(|e| e.fetched_at)
    }

    /// 슬롯 수 (실패한 키의 빈 슬롯 포함)
    pub async fn len(&self) -> usize {
        self.slots.lock().await.len()
    }

    async fn slot(&self, key: K) -> Slot<V> {
        let mut slots = self.slots.lock().await;
        Arc::clone(slots.entry(key).or_default())
    }
}
