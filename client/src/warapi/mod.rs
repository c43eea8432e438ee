//! Foxhole War API 관련 모듈
//!
//! - `client`: War API 클라이언트 (맵 동시 조회 포함)
//! - `cache`: dynamic 맵 데이터 캐시
//! - `model`: API 응답 타입
//! - `mapping`: raw 맵 이름 ↔ 표시 이름 매핑

pub mod cache;
pub mod client;
pub mod mapping;
pub mod model;

// 편의를 위한 re-export
pub use cache::{CacheKey, FreshnessCache};
pub use client::WarApiClient;
pub use mapping::{is_valid_map_name, pretty_map_name, MAP_NAMES};
pub use model::{
    DynamicMapData, Map, MapItem, MapItemFlags, MapMarkerType, MapTextItem, Report,
    StaticMapData, Team, War,
};
