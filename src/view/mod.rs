//! Typed view model built from a snapshot.
//!
//! `GameView::from_snapshot` is the whole render routine minus drawing: every
//! region is rebuilt from scratch, nothing is carried over from a previous view.

pub mod format;

use crate::action::Action;
use crate::api::{Field, Livestock, NasaData, Quest, RegionInfo, Snapshot};
use format::{group_thousands, humanize, percent, scalar};

pub const DEFAULT_PLAYER_NAME: &str = "Farmer";
pub const DEFAULT_REGION: &str = "Unknown";
pub const DEFAULT_DAY: i64 = 1;
pub const DEFAULT_CURRENCY: &str = "TZS";
pub const DEFAULT_PRECIPITATION: &str = "unknown";
pub const DEFAULT_VEGETATION: &str = "N/A";
pub const UNKNOWN_PRICE: &str = "N/A";

#[derive(Debug, Clone, PartialEq)]
pub struct HeaderStats {
    pub player_name: String,
    pub region: String,
    pub day: i64,
    pub balance: String,
    pub currency: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnvironmentPanel {
    pub soil_moisture: String,
    pub precipitation: String,
    pub vegetation_index: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldCard {
    pub title: String,
    pub crop: String,
    pub status: String,
    pub water_level: String,
    pub growth_stage: Option<i64>,
    pub health: Option<String>,
    /// At most one button per card
    pub action: Option<Action>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuestEntry {
    pub title: String,
    pub description: String,
    pub learning_point: Option<String>,
    pub complete: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InventoryRow {
    pub item: String,
    pub quantity: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarketRow {
    pub item: String,
    pub price: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RegionPanel {
    pub specialty: Option<String>,
    pub crops: Vec<String>,
    pub livestock: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LivestockRow {
    pub kind: String,
    pub count: i64,
    pub health: Option<String>,
    pub feed_level: Option<String>,
}

/// Everything the game screen draws
#[derive(Debug, Clone, PartialEq)]
pub struct GameView {
    pub header: HeaderStats,
    pub environment: EnvironmentPanel,
    pub fields: Vec<FieldCard>,
    pub quests: Vec<QuestEntry>,
    pub inventory: Vec<InventoryRow>,
    pub market: Vec<MarketRow>,
    pub region_info: Option<RegionPanel>,
    pub livestock: Vec<LivestockRow>,
}

impl GameView {
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        let header = HeaderStats::from_snapshot(snapshot);
        let currency = header.currency.clone();

        Self {
            header,
            environment: EnvironmentPanel::from_nasa(snapshot.nasa_data.as_ref()),
            fields: snapshot.fields.iter().map(FieldCard::from_field).collect(),
            quests: snapshot.active_quests.iter().map(QuestEntry::from_quest).collect(),
            inventory: snapshot
                .inventory
                .iter()
                .filter_map(|(item, quantity)| match quantity {
                    Some(q) if *q > 0.0 => Some(InventoryRow {
                        item: item.clone(),
                        quantity: group_thousands(*q),
                    }),
                    _ => None,
                })
                .collect(),
            market: snapshot
                .market_prices
                .iter()
                .map(|(item, price)| MarketRow {
                    item: item.clone(),
                    price: match price {
                        Some(p) => format!("{} {}", group_thousands(*p), currency),
                        None => UNKNOWN_PRICE.to_string(),
                    },
                })
                .collect(),
            region_info: snapshot.region_info.as_ref().map(RegionPanel::from_info),
            livestock: snapshot.livestock.iter().map(LivestockRow::from_livestock).collect(),
        }
    }

    /// Swap in fresh sensor readings without touching the other regions
    pub fn set_environment(&mut self, nasa: &NasaData) {
        self.environment = EnvironmentPanel::from_nasa(Some(nasa));
    }
}

impl HeaderStats {
    fn from_snapshot(snapshot: &Snapshot) -> Self {
        Self {
            player_name: non_empty(snapshot.player_name.as_deref(), DEFAULT_PLAYER_NAME),
            region: non_empty(snapshot.region.as_deref(), DEFAULT_REGION),
            day: snapshot.current_day.unwrap_or(DEFAULT_DAY),
            balance: group_thousands(snapshot.balance.unwrap_or(0.0)),
            currency: non_empty(snapshot.currency.as_deref(), DEFAULT_CURRENCY),
        }
    }
}

impl EnvironmentPanel {
    fn from_nasa(nasa: Option<&NasaData>) -> Self {
        let soil = nasa.and_then(|n| n.soil_moisture).unwrap_or(0.0);
        let precipitation = nasa
            .and_then(|n| n.precipitation_forecast.as_deref())
            .map(humanize)
            .unwrap_or_else(|| DEFAULT_PRECIPITATION.to_string());
        let vegetation = nasa
            .and_then(|n| n.vegetation_index.as_ref())
            .map(|v| scalar(v, DEFAULT_VEGETATION))
            .unwrap_or_else(|| DEFAULT_VEGETATION.to_string());

        Self {
            soil_moisture: percent(soil),
            precipitation,
            vegetation_index: vegetation,
        }
    }
}

impl FieldCard {
    fn from_field(field: &Field) -> Self {
        Self {
            title: match &field.id {
                Some(id) => format!("Field {}", id),
                None => "Field ?".to_string(),
            },
            crop: non_empty(field.crop.as_deref(), "Empty"),
            status: non_empty(field.status.as_deref(), "Unknown"),
            water_level: percent(field.water_level.unwrap_or(0.0)),
            growth_stage: field.growth_stage,
            health: field.health.map(|h| format!("{}%", group_thousands(h))),
            action: Action::for_field(field),
        }
    }
}

impl QuestEntry {
    fn from_quest(quest: &Quest) -> Self {
        Self {
            title: non_empty(quest.title.as_deref(), "Untitled quest"),
            description: quest.description.clone().unwrap_or_default(),
            learning_point: quest.learning_point.clone().filter(|l| !l.is_empty()),
            complete: quest.is_complete,
        }
    }
}

impl RegionPanel {
    fn from_info(info: &RegionInfo) -> Self {
        Self {
            specialty: info.specialty.clone(),
            crops: info.crops.clone(),
            livestock: info.livestock.clone(),
        }
    }
}

impl LivestockRow {
    fn from_livestock(herd: &Livestock) -> Self {
        Self {
            kind: non_empty(herd.kind.as_deref(), "Livestock"),
            count: herd.count.unwrap_or(0),
            health: herd.health.map(|h| format!("{}%", group_thousands(h))),
            feed_level: herd.feed_level.map(percent),
        }
    }
}

fn non_empty(value: Option<&str>, fallback: &str) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => fallback.to_string(),
    }
}
