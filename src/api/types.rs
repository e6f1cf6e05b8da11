use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

#[derive(Debug)]
pub enum ApiError {
    Network(String),
    Timeout,
    InvalidResponse(String),
    InvalidSnapshot(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(e) => write!(f, "Network error: {}", e),
            ApiError::Timeout => write!(f, "Request timed out"),
            ApiError::InvalidResponse(e) => write!(f, "Invalid response: {}", e),
            ApiError::InvalidSnapshot(e) => write!(f, "Invalid game state: {}", e),
        }
    }
}

impl std::error::Error for ApiError {}

// ============================================================================
// Snapshot
// ============================================================================

/// Complete game state as sent by the backend.
///
/// Every field is optional on the wire; the view layer supplies defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    #[serde(rename = "playerName")]
    pub player_name: Option<String>,
    pub region: Option<String>,
    pub current_day: Option<i64>,
    pub balance: Option<f64>,
    pub currency: Option<String>,
    pub nasa_data: Option<NasaData>,
    #[serde(deserialize_with = "nullable")]
    pub fields: Vec<Field>,
    #[serde(deserialize_with = "nullable")]
    pub active_quests: Vec<Quest>,
    /// Item name to quantity, in the order the server listed them.
    /// Non-numeric amounts come through as `None`.
    #[serde(deserialize_with = "ordered_entries")]
    pub inventory: Vec<(String, Option<f64>)>,
    /// Item name to price, in the order the server listed them
    #[serde(deserialize_with = "ordered_entries")]
    pub market_prices: Vec<(String, Option<f64>)>,
    pub region_info: Option<RegionInfo>,
    #[serde(deserialize_with = "nullable")]
    pub livestock: Vec<Livestock>,
}

impl Snapshot {
    /// Parse a state payload. Anything other than a JSON object is rejected.
    pub fn from_value(value: Value) -> Result<Self, ApiError> {
        if !value.is_object() {
            return Err(ApiError::InvalidSnapshot(format!(
                "expected an object, got {}",
                json_kind(&value)
            )));
        }
        serde_json::from_value(value).map_err(|e| ApiError::InvalidSnapshot(e.to_string()))
    }
}

/// Simulated satellite readings for the player's region
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct NasaData {
    pub soil_moisture: Option<f64>,
    pub precipitation_forecast: Option<String>,
    /// Either a number or a preformatted string
    pub vegetation_index: Option<Value>,
}

/// Field identifiers are echoed back to the server exactly as received.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldId {
    Number(i64),
    Text(String),
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldId::Number(n) => write!(f, "{}", n),
            FieldId::Text(s) => write!(f, "{}", s),
        }
    }
}

/// One plot. A malformed value reads as absent so a single bad card never
/// sinks the whole snapshot.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Field {
    #[serde(deserialize_with = "lenient")]
    pub id: Option<FieldId>,
    #[serde(deserialize_with = "lenient")]
    pub crop: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub status: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub water_level: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    pub growth_stage: Option<i64>,
    #[serde(deserialize_with = "lenient")]
    pub health: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Quest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub learning_point: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub is_complete: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RegionInfo {
    pub specialty: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub crops: Vec<String>,
    #[serde(deserialize_with = "nullable")]
    pub livestock: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Livestock {
    #[serde(rename = "type", deserialize_with = "lenient")]
    pub kind: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub count: Option<i64>,
    #[serde(deserialize_with = "lenient")]
    pub health: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    pub feed_level: Option<f64>,
}

// ============================================================================
// Requests / Responses
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerRequest {
    #[serde(rename = "playerName")]
    pub player_name: String,
    pub region: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionRequest {
    pub action: String,
    pub params: Value,
    #[serde(rename = "playerName")]
    pub player_name: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct PlayerResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub state: Option<Value>,
    #[serde(default)]
    pub message: Option<String>,
}

impl PlayerResponse {
    pub fn is_success(&self) -> bool {
        self.status.as_deref() == Some("success")
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ActionResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub new_state: Option<Value>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ActionResponse {
    pub fn is_success(&self) -> bool {
        self.status.as_deref() == Some("success")
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct EnvironmentResponse {
    #[serde(default)]
    pub nasa_data: Option<NasaData>,
}

// ============================================================================
// Serde helpers
// ============================================================================

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Treat an explicit `null` the same as a missing key.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accept any JSON value; keep it only if it has the expected shape.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    Ok(serde_json::from_value(value).ok())
}

/// Read a `{name: number}` object into a list that keeps the wire order.
fn ordered_entries<'de, D>(deserializer: D) -> Result<Vec<(String, Option<f64>)>, D::Error>
where
    D: Deserializer<'de>,
{
    struct EntriesVisitor;

    impl<'de> Visitor<'de> for EntriesVisitor {
        type Value = Vec<(String, Option<f64>)>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map of item names to numbers")
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((name, amount)) = map.next_entry::<String, Value>()? {
                entries.push((name, amount.as_f64()));
            }
            Ok(entries)
        }
    }

    deserializer.deserialize_any(EntriesVisitor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_object_is_valid_snapshot() {
        let snapshot = Snapshot::from_value(json!({})).unwrap();
        assert!(snapshot.player_name.is_none());
        assert!(snapshot.fields.is_empty());
        assert!(snapshot.inventory.is_empty());
    }

    #[test]
    fn test_non_object_snapshot_rejected() {
        for value in [json!(null), json!([1, 2]), json!("state"), json!(3)] {
            let err = Snapshot::from_value(value).unwrap_err();
            assert!(matches!(err, ApiError::InvalidSnapshot(_)));
        }
    }

    #[test]
    fn test_inventory_keeps_server_order() {
        let raw = r#"{"inventory": {"Maize Seed": 10, "Fertilizer": 5, "Goat Feed": 20, "Harvested Maize": 0}}"#;
        let snapshot: Snapshot = serde_json::from_str(raw).unwrap();
        let names: Vec<&str> = snapshot.inventory.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["Maize Seed", "Fertilizer", "Goat Feed", "Harvested Maize"]);
        assert_eq!(snapshot.inventory[3].1, Some(0.0));

        // Responses hold the state as a Value first; order must survive that hop
        let value: Value = serde_json::from_str(raw).unwrap();
        let snapshot = Snapshot::from_value(value).unwrap();
        assert_eq!(snapshot.inventory[0].0, "Maize Seed");
        assert_eq!(snapshot.inventory[1].0, "Fertilizer");
    }

    #[test]
    fn test_null_collections_default() {
        let snapshot = Snapshot::from_value(json!({
            "fields": null,
            "active_quests": null,
            "inventory": null,
            "market_prices": null,
        }))
        .unwrap();
        assert!(snapshot.fields.is_empty());
        assert!(snapshot.active_quests.is_empty());
        assert!(snapshot.inventory.is_empty());
        assert!(snapshot.market_prices.is_empty());
    }

    #[test]
    fn test_full_backend_state_parses() {
        let snapshot = Snapshot::from_value(json!({
            "playerName": "Amina",
            "region": "Morogoro",
            "region_info": {"specialty": "Rice and Maize farming.", "crops": ["Rice", "Maize"], "livestock": ["Cattle"]},
            "currency": "TZS",
            "balance": 50000,
            "current_day": 1,
            "fields": [
                {"id": 1, "crop": null, "status": "Fallow", "water_level": 0.5, "growth_stage": 0, "health": 100},
                {"id": 2, "crop": "Maize", "status": "Growing", "water_level": 0.3, "growth_stage": 2, "health": 100}
            ],
            "livestock": [{"type": "Goats", "count": 5, "health": 90, "feed_level": 0.7}],
            "active_quests": [{
                "id": "main_quest_1", "title": "Your First Farm",
                "description": "Plant some maize.", "learning_point": "Choose the right crop.",
                "is_complete": false
            }],
            "market_prices": {"Harvested Maize": 650},
            "nasa_data": {"soil_moisture": 0.45, "precipitation_forecast": "light_rain", "vegetation_index": 0.61}
        }))
        .unwrap();

        assert_eq!(snapshot.player_name.as_deref(), Some("Amina"));
        assert_eq!(snapshot.fields.len(), 2);
        assert_eq!(snapshot.fields[0].id, Some(FieldId::Number(1)));
        assert!(snapshot.fields[0].crop.is_none());
        assert_eq!(snapshot.livestock[0].kind.as_deref(), Some("Goats"));
        assert_eq!(snapshot.region_info.unwrap().crops, vec!["Rice", "Maize"]);
        assert_eq!(snapshot.market_prices, vec![("Harvested Maize".to_string(), Some(650.0))]);
    }

    #[test]
    fn test_malformed_entries_do_not_sink_snapshot() {
        let snapshot = Snapshot::from_value(json!({
            "current_day": 2,
            "fields": [
                {"status": "Fallow"},
                {"id": true, "status": "Growing", "water_level": "wet"},
                {"id": 3, "status": "Growing"}
            ],
            "inventory": {"Seed": null, "Feed": 3, "Tools": "some"},
            "market_prices": {"Coffee": null},
            "livestock": [{"type": "Goats", "count": "many"}]
        }))
        .unwrap();

        assert_eq!(snapshot.current_day, Some(2));
        assert_eq!(snapshot.fields.len(), 3);
        assert!(snapshot.fields[0].id.is_none());
        assert!(snapshot.fields[1].id.is_none());
        assert!(snapshot.fields[1].water_level.is_none());
        assert_eq!(snapshot.fields[1].status.as_deref(), Some("Growing"));
        assert_eq!(snapshot.fields[2].id, Some(FieldId::Number(3)));
        assert_eq!(
            snapshot.inventory,
            vec![
                ("Seed".to_string(), None),
                ("Feed".to_string(), Some(3.0)),
                ("Tools".to_string(), None)
            ]
        );
        assert_eq!(snapshot.market_prices, vec![("Coffee".to_string(), None)]);
        assert!(snapshot.livestock[0].count.is_none());
    }

    #[test]
    fn test_field_id_round_trips_verbatim() {
        let numeric: FieldId = serde_json::from_value(json!(3)).unwrap();
        let text: FieldId = serde_json::from_value(json!("north-plot")).unwrap();
        assert_eq!(serde_json::to_value(&numeric).unwrap(), json!(3));
        assert_eq!(serde_json::to_value(&text).unwrap(), json!("north-plot"));
        assert_eq!(text.to_string(), "north-plot");
    }

    #[test]
    fn test_request_wire_names() {
        let request = ActionRequest {
            action: "water".to_string(),
            params: json!({"field_id": 2}),
            player_name: "Amina".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"action": "water", "params": {"field_id": 2}, "playerName": "Amina"})
        );
    }

    #[test]
    fn test_response_success_flag() {
        let ok: PlayerResponse = serde_json::from_str(r#"{"status": "success", "state": {}}"#).unwrap();
        let err: PlayerResponse = serde_json::from_str(r#"{"status": "error", "message": "Invalid region selected."}"#).unwrap();
        let bare: ActionResponse = serde_json::from_str("{}").unwrap();
        assert!(ok.is_success());
        assert!(!err.is_success());
        assert!(!bare.is_success());
    }
}
