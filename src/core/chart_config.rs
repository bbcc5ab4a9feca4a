// Authored chart configuration (the JSON a chart is stored as)

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::core::axis::AxisConfig;
use crate::core::error::{ChartUrlError, Result};
use crate::core::time_bounds::{self, TimeBound};

macro_rules! query_enum {
    ($kind:literal, $name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $text)] $variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl FromStr for $name {
            type Err = ChartUrlError;

            fn from_str(s: &str) -> Result<Self> {
                match s {
                    $($text => Ok($name::$variant),)+
                    _ => Err(ChartUrlError::UnknownVariant {
                        kind: $kind,
                        value: s.to_string(),
                    }),
                }
            }
        }
    };
}

query_enum!("tab", Tab {
    Chart => "chart",
    Map => "map",
    Table => "table",
    Sources => "sources",
    Download => "download",
});

query_enum!("stack mode", StackMode {
    Absolute => "absolute",
    Relative => "relative",
});

query_enum!("scale type", ScaleType {
    Linear => "linear",
    Log => "log",
});

query_enum!("map projection", MapProjection {
    World => "World",
    Europe => "Europe",
    Africa => "Africa",
    Asia => "Asia",
    NorthAmerica => "NorthAmerica",
    SouthAmerica => "SouthAmerica",
    Oceania => "Oceania",
});

impl Default for Tab {
    fn default() -> Self {
        Tab::Chart
    }
}

impl Default for StackMode {
    fn default() -> Self {
        StackMode::Absolute
    }
}

impl Default for ScaleType {
    fn default() -> Self {
        ScaleType::Linear
    }
}

impl Default for MapProjection {
    fn default() -> Self {
        MapProjection::World
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MapConfig {
    #[serde(with = "time_bounds::json", skip_serializing_if = "Option::is_none")]
    pub time: Option<TimeBound>,
    pub projection: MapProjection,

    // Older configs stored the map time as `year`
    #[serde(with = "time_bounds::json", skip_serializing)]
    year: Option<TimeBound>,
}

impl MapConfig {
    fn upgrade_legacy(&mut self) {
        if let Some(year) = self.year.take() {
            self.time.get_or_insert(year);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChartConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub is_published: bool,
    pub has_map_tab: bool,
    pub tab: Tab,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overlay: Option<Tab>,
    pub stack_mode: StackMode,
    pub zoom_to_selection: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_population_filter: Option<i64>,
    #[serde(with = "time_bounds::json", skip_serializing_if = "Option::is_none")]
    pub min_time: Option<TimeBound>,
    #[serde(with = "time_bounds::json", skip_serializing_if = "Option::is_none")]
    pub max_time: Option<TimeBound>,
    pub compare_end_points_only: bool,
    pub x_axis: AxisConfig,
    pub y_axis: AxisConfig,
    pub map: MapConfig,
    pub selected_entity_codes: Vec<String>,
}

impl ChartConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let mut config: ChartConfig = serde_json::from_str(json)?;
        config.map.upgrade_legacy();
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
