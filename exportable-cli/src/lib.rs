//! Shared model and commands for the `exportable` command-line tool.
//!
//! The binary is a thin clap front end; everything it does is reachable from
//! here so it can be tested without spawning a process.

mod model;

use anyhow::{Context, Result};
use exportable::{create_from, decode, encode, Exportable, ToField};
use serde_json::Value;
use tracing::{debug, info};

pub use model::{feedback_type, Building, Complaint, Furniture, Person, Praise, Room};

/// Outcome of importing a document and exporting it again.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundTrip {
    /// Encoded re-export.
    pub output: String,
    /// True when the re-export matches the decoded input, numbers compared by value.
    pub lossless: bool,
}

/// The building printed by `exportable sample`.
pub fn sample_building() -> Building {
    let mut corner = Room::new(16);
    corner.settler = Some(Person::new("guy"));
    corner
        .furniture
        .insert("table".into(), Some(Furniture::new("table", 120.5)));
    corner.complaints.push(Some(Complaint::new("keke")));
    corner.complaints.push(Some(Complaint::new("no")));

    let mut building = Building::new("Maple Court");
    building.manager = Some(Person::new("ada"));
    building.rooms.insert("1A".into(), Some(corner));
    building.rooms.insert("1B".into(), Some(Room::new(9)));
    building.feedback.push(Complaint::new("lift is slow").to_field());
    building.feedback.push(Praise::new(5).to_field());
    building
        .feedback
        .push(serde_json::json!({"note": "unclassified"}).to_field());
    building
}

/// Encodes the sample building.
pub fn render_sample(indent: Option<usize>) -> Result<String> {
    sample_building()
        .export_json(indent)
        .context("failed to encode sample building")
}

/// Imports `text` as a building and re-exports it.
///
/// A null document yields the default building.
pub fn roundtrip(text: &str, indent: Option<usize>) -> Result<RoundTrip> {
    let input = decode(text).context("input is not valid JSON")?;
    let building: Building = create_from(Some(&input)).unwrap_or_default();
    debug!(
        "Imported building {:?}: {} rooms ({} occupied), {} feedback items",
        building.name,
        building.rooms.len(),
        building.occupied_rooms(),
        building.feedback.len()
    );

    let exported = building.export_data();
    let lossless = same_data(&exported, &input);
    if !lossless {
        info!("Re-export differs from input: ignored, unknown or mistyped fields were dropped");
    }

    let output = encode(&exported, indent).context("failed to encode building")?;
    Ok(RoundTrip { output, lossless })
}

/// Structural equality of two data trees, comparing numbers by value so that
/// `120` and `120.0` match.
pub fn same_data(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => a == b || a.as_f64() == b.as_f64(),
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| same_data(x, y))
        }
        (Value::Object(a), Value::Object(b)) => {
            a.len() == b.len()
                && a.iter()
                    .all(|(key, x)| b.get(key).is_some_and(|y| same_data(x, y)))
        }
        _ => left == right,
    }
}
