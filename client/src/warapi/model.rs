//! War API 응답 타입
//!
//! 필드 이름은 API와 정확히 일치해야 합니다 (camelCase). 필드가 빠지면 디코딩이 실패하고,
//! 모르는 필드는 무시합니다.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::mapping::pretty_map_name;

/// 진영
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Team {
    None,
    Colonial,
    Wardens,
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Team::None => "NONE",
            Team::Colonial => "COLONIAL",
            Team::Wardens => "WARDENS",
        })
    }
}

/// 텍스트 마커 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MapMarkerType {
    Major,
    Minor,
}

/// 현재 전쟁 정보 (`worldconquest/war`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct War {
    pub war_id: String,
    pub war_number: u32,
    pub winner: Team,
    /// epoch 밀리초
    pub conquest_start_time: Option<i64>,
    /// 전쟁이 끝나지 않았으면 null
    pub conquest_end_time: Option<i64>,
    pub resistance_start_time: Option<i64>,
    pub required_victory_towns: u32,
}

impl War {
    pub fn conquest_start(&self) -> Option<DateTime<Utc>> {
        self.conquest_start_time.and_then(DateTime::from_timestamp_millis)
    }

    pub fn conquest_end(&self) -> Option<DateTime<Utc>> {
        self.conquest_end_time.and_then(DateTime::from_timestamp_millis)
    }

    pub fn resistance_start(&self) -> Option<DateTime<Utc>> {
        self.resistance_start_time.and_then(DateTime::from_timestamp_millis)
    }

    pub fn is_over(&self) -> bool {
        self.winner != Team::None || self.conquest_end_time.is_some()
    }
}

/// 맵 전쟁 리포트 (`worldconquest/warReport/{map}`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub total_enlistments: u64,
    pub colonial_casualties: u64,
    pub warden_casualties: u64,
    pub day_of_war: u32,
    pub version: u64,
}

/// 맵 위의 텍스트 (지명 등)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapTextItem {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub map_marker_type: MapMarkerType,
}

/// 맵 위의 진영 소유 아이콘
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapItem {
    pub team_id: Team,
    pub icon_type: u32,
    pub x: f64,
    pub y: f64,
    /// API 값 그대로 보관, 해석은 [`MapItem::flags`]
    pub flags: u32,
}

bitflags::bitflags! {
    #[derive(Default)]
    pub struct MapItemFlags: u32 {
        const IS_VICTORY_BASE = 0x01;
        const IS_HOME_BASE = 0x02;
        const IS_BUILD_SITE = 0x04;
        const IS_SCORCHED = 0x10;
        const IS_TOWN_CLAIMED = 0x20;
    }
}

impl MapItem {
    /// 알 수 없는 비트는 버림
    pub fn flags(&self) -> MapItemFlags {
        MapItemFlags::from_bits_truncate(self.flags)
    }
}

/// `worldconquest/maps/{map}/static`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaticMapData {
    pub region_id: u32,
    pub scorched_victory_towns: u32,
    pub map_text_items: Vec<MapTextItem>,
}

/// `worldconquest/maps/{map}/dynamic/public`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DynamicMapData {
    pub map_items: Vec<MapItem>,
}

/// static + dynamic 데이터를 합친 맵
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Map {
    pub raw_name: String,
    pub pretty_name: String,
    pub region_id: u32,
    pub scorched_victory_towns: u32,
    /// dynamic 데이터에서만 옴
    pub map_items: Vec<MapItem>,
    /// static 데이터에서만 옴
    pub map_text_items: Vec<MapTextItem>,
}

impl Map {
    pub fn from_parts(raw_name: &str, static_data: StaticMapData, dynamic_data: &DynamicMapData) -> Self {
        let pretty_name = pretty_map_name(raw_name).unwrap_or(raw_name).to_owned();

        Self {
            raw_name: raw_name.to_owned(),
            pretty_name,
            region_id: static_data.region_id,
            scorched_victory_towns: static_data.scorched_victory_towns,
            map_items: dynamic_data.map_items.clone(),
            map_text_items: static_data.map_text_items,
        }
    }
}
