//! Player intents sent to `/api/perform_action`

use serde_json::{json, Value};

use crate::api::{Field, FieldId};

/// A named request for the simulation to do something
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Plant { field_id: FieldId },
    Water { field_id: FieldId },
    Harvest { field_id: FieldId },
    NextDay,
    /// Any other action name the backend understands, forwarded verbatim
    Custom { name: String, params: Value },
}

impl Action {
    /// Wire name of the action
    pub fn name(&self) -> &str {
        match self {
            Action::Plant { .. } => "plant",
            Action::Water { .. } => "water",
            Action::Harvest { .. } => "harvest",
            Action::NextDay => "next_day",
            Action::Custom { name, .. } => name.as_str(),
        }
    }

    pub fn params(&self) -> Value {
        match self {
            Action::Plant { field_id } | Action::Water { field_id } | Action::Harvest { field_id } => {
                json!({ "field_id": field_id })
            }
            Action::NextDay => json!({}),
            Action::Custom { params, .. } => params.clone(),
        }
    }

    /// Button caption
    pub fn label(&self) -> &str {
        match self {
            Action::Plant { .. } => "Plant",
            Action::Water { .. } => "Water",
            Action::Harvest { .. } => "Harvest",
            Action::NextDay => "Next Day",
            Action::Custom { name, .. } => name.as_str(),
        }
    }

    /// The single contextual action a field card offers, keyed on its status.
    /// Statuses outside the fixed table get no button, and neither does a
    /// field without an id.
    pub fn for_field(field: &Field) -> Option<Action> {
        let field_id = field.id.clone()?;
        match field.status.as_deref()? {
            "Fallow" => Some(Action::Plant { field_id }),
            "Growing" => Some(Action::Water { field_id }),
            "Ready to Harvest" => Some(Action::Harvest { field_id }),
            _ => None,
        }
    }
}
