//! # Projection Records and Normalizer
//!
//! The upstream answers in a JSON:API-style relational document: `data`
//! holds projection entities that point, through `relationships`, at player
//! and stat-type entities listed in `included`. This module flattens that
//! document into one [`ProjectionRecord`] per resolvable projection.
//!
//! Normalization never fails. Entities with a missing or dangling player or
//! stat-type reference are dropped; a document without `data` or `included`
//! yields an empty list.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// `type` tag of player entities in `included`.
pub const PLAYER_TYPE: &str = "new_player";
/// `type` tag of stat-type entities in `included`.
pub const STAT_TYPE: &str = "stat_type";

/// One flattened projection, serialized as `{Player, Stat, Line, id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionRecord {
    /// Player display name.
    #[serde(rename = "Player")]
    pub player: String,
    /// Stat-type name (e.g. "Passing Yards").
    #[serde(rename = "Stat")]
    pub stat: String,
    /// The projected line exactly as the upstream sent it; `null` when absent.
    #[serde(rename = "Line")]
    pub line: Option<Number>,
    /// Upstream id of the projection entity.
    pub id: String,
}

/// Flattens a raw projections payload. Output order follows `data`.
pub fn normalize_projections(payload: &Value) -> Vec<ProjectionRecord> {
    let included = entities(payload, "included");

    let mut players: HashMap<String, &str> = HashMap::new();
    let mut stat_types: HashMap<String, &str> = HashMap::new();

    for entity in included {
        let (Some(id), Some(name)) = (
            entity_id(entity.get("id")),
            entity.pointer("/attributes/name").and_then(Value::as_str),
        ) else {
            continue;
        };

        match entity.get("type").and_then(Value::as_str) {
            Some(PLAYER_TYPE) => {
                players.insert(id, name);
            }
            Some(STAT_TYPE) => {
                stat_types.insert(id, name);
            }
            _ => {}
        }
    }

    entities(payload, "data")
        .iter()
        .filter_map(|entity| {
            let id = entity_id(entity.get("id"))?;
            let player = related_id(entity, PLAYER_TYPE).and_then(|rid| players.get(&rid))?;
            let stat = related_id(entity, STAT_TYPE).and_then(|rid| stat_types.get(&rid))?;
            let line = match entity.pointer("/attributes/line_score") {
                Some(Value::Number(n)) => Some(n.clone()),
                _ => None,
            };

            Some(ProjectionRecord {
                player: player.to_string(),
                stat: stat.to_string(),
                line,
                id,
            })
        })
        .collect()
}

fn entities<'a>(payload: &'a Value, key: &str) -> &'a [Value] {
    payload
        .get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

/// Ids are strings upstream, but numeric ids are accepted as well.
fn entity_id(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn related_id(entity: &Value, relation: &str) -> Option<String> {
    let data = entity.get("relationships")?.get(relation)?.get("data")?;
    entity_id(data.get("id"))
}
