//! Shared exportable types for the integration tests.

#![allow(dead_code)]

use exportable::{
    array_of, dict_of, exportable_fields, ignore, instance_of, type_of, ElementKey, Exportable,
    FieldConfig, FieldValue, InstanceType, ToField, TypeResolver,
};
use serde_json::{json, Value};
use std::collections::BTreeMap;

// ── Leaf types ───────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct Person {
    export_config: FieldConfig,
    pub name: String,
}

impl Person {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }
}

impl Exportable for Person {
    fn export_config(&self) -> &FieldConfig {
        &self.export_config
    }

    fn fields(&self) -> Vec<(String, FieldValue)> {
        vec![("name".into(), self.name.to_field())]
    }

    fn assign_field(&mut self, name: &str, value: FieldValue) -> bool {
        match name {
            "name" => value.assign_to(&mut self.name),
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Furniture {
    export_config: FieldConfig,
    pub kind: String,
}

impl Furniture {
    pub fn new(kind: &str) -> Self {
        Self {
            kind: kind.to_string(),
            ..Self::default()
        }
    }
}

impl Exportable for Furniture {
    fn export_config(&self) -> &FieldConfig {
        &self.export_config
    }

    fn fields(&self) -> Vec<(String, FieldValue)> {
        vec![("type".into(), self.kind.to_field())]
    }

    fn assign_field(&mut self, name: &str, value: FieldValue) -> bool {
        match name {
            "type" => value.assign_to(&mut self.kind),
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Complaint {
    export_config: FieldConfig,
    pub message: String,
}

impl Complaint {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
            ..Self::default()
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Exportable for Complaint {
    fn export_config(&self) -> &FieldConfig {
        &self.export_config
    }

    fn fields(&self) -> Vec<(String, FieldValue)> {
        vec![("message".into(), self.message.to_field())]
    }

    fn assign_field(&mut self, name: &str, value: FieldValue) -> bool {
        match name {
            "message" => value.assign_to(&mut self.message),
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Praise {
    export_config: FieldConfig,
    pub stars: u8,
}

impl Exportable for Praise {
    fn export_config(&self) -> &FieldConfig {
        &self.export_config
    }

    fn fields(&self) -> Vec<(String, FieldValue)> {
        vec![("stars".into(), self.stars.to_field())]
    }

    fn assign_field(&mut self, name: &str, value: FieldValue) -> bool {
        match name {
            "stars" => value.assign_to(&mut self.stars),
            _ => false,
        }
    }
}

// ── Room: one field of every role ────────────────────────────────

#[derive(Debug, Clone)]
pub struct Room {
    export_config: FieldConfig,
    pub settler: Option<Person>,
    pub furniture: BTreeMap<String, Furniture>,
    pub complaints: Vec<Complaint>,
    pub tmp_price: i64,
    pub area: i64,
}

impl Default for Room {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Room {
    pub fn new(area: i64) -> Self {
        let mut export_config = FieldConfig::new();
        export_config.declare_field_roles([
            ("settler", instance_of(type_of::<Person>())),
            ("furniture", dict_of(type_of::<Furniture>())),
            ("complaints", array_of(type_of::<Complaint>())),
            ("tmpPrice", ignore()),
        ]);
        Self {
            export_config,
            settler: None,
            furniture: BTreeMap::new(),
            complaints: Vec::new(),
            tmp_price: 0,
            area,
        }
    }

    pub fn is_occupied(&self) -> bool {
        self.settler.is_some()
    }

    pub fn calculate_price(&mut self) -> i64 {
        self.tmp_price = self.area;
        self.tmp_price
    }
}

impl Exportable for Room {
    fn export_config(&self) -> &FieldConfig {
        &self.export_config
    }

    fn fields(&self) -> Vec<(String, FieldValue)> {
        vec![
            ("settler".into(), self.settler.to_field()),
            ("furniture".into(), self.furniture.to_field()),
            ("complaints".into(), self.complaints.to_field()),
            ("tmpPrice".into(), self.tmp_price.to_field()),
            ("area".into(), self.area.to_field()),
        ]
    }

    fn assign_field(&mut self, name: &str, value: FieldValue) -> bool {
        match name {
            "settler" => value.assign_to(&mut self.settler),
            "furniture" => value.assign_to(&mut self.furniture),
            "complaints" => value.assign_to(&mut self.complaints),
            "tmpPrice" => value.assign_to(&mut self.tmp_price),
            "area" => value.assign_to(&mut self.area),
            _ => false,
        }
    }
}

exportable_fields!(Person, Furniture, Complaint, Praise, Room);

/// A room with a settler, one piece of furniture and two complaints.
pub fn furnished_room() -> Room {
    let mut room = Room::new(16);
    room.settler = Some(Person::new("guy"));
    room.furniture.insert("table".into(), Furniture::new("table"));
    room.complaints.push(Complaint::new("keke"));
    room.complaints.push(Complaint::new("no"));
    room
}

/// Export of [`furnished_room`].
pub fn furnished_room_data() -> Value {
    json!({
        "settler": {"name": "guy"},
        "furniture": {"table": {"type": "table"}},
        "complaints": [{"message": "keke"}, {"message": "no"}],
        "area": 16
    })
}

// ── Board: heterogeneous containers ──────────────────────────────

/// Picks a type from the fragment's shape; unknown shapes stay raw.
pub fn feedback_type(fragment: &Value, _key: ElementKey<'_>) -> Option<InstanceType> {
    if fragment.get("message").is_some() {
        Some(type_of::<Complaint>())
    } else if fragment.get("stars").is_some() {
        Some(type_of::<Praise>())
    } else {
        None
    }
}

#[derive(Debug, Clone)]
pub struct Board {
    export_config: FieldConfig,
    pub notes: Vec<FieldValue>,
    pub by_author: BTreeMap<String, FieldValue>,
}

impl Default for Board {
    fn default() -> Self {
        let mut export_config = FieldConfig::new();
        export_config.declare_field_roles([
            ("notes", array_of(TypeResolver::from_fn(feedback_type))),
            ("by_author", dict_of(TypeResolver::from_fn(feedback_type))),
        ]);
        Self {
            export_config,
            notes: Vec::new(),
            by_author: BTreeMap::new(),
        }
    }
}

impl Exportable for Board {
    fn export_config(&self) -> &FieldConfig {
        &self.export_config
    }

    fn fields(&self) -> Vec<(String, FieldValue)> {
        vec![
            ("notes".into(), self.notes.to_field()),
            ("by_author".into(), self.by_author.to_field()),
        ]
    }

    fn assign_field(&mut self, name: &str, value: FieldValue) -> bool {
        match name {
            "notes" => value.assign_to(&mut self.notes),
            "by_author" => value.assign_to(&mut self.by_author),
            _ => false,
        }
    }
}
