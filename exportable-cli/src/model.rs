//! Demo model: a building of rooms, with settlers, furniture and feedback.

use exportable::{
    array_of, dict_of, exportable_fields, ignore, instance_of, type_of, ElementKey, Exportable,
    FieldConfig, FieldValue, InstanceType, ToField, TypeResolver,
};
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default)]
pub struct Person {
    export_config: FieldConfig,
    pub name: String,
}

impl Person {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
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
    pub price: f64,
}

impl Furniture {
    pub fn new(kind: impl Into<String>, price: f64) -> Self {
        Self {
            kind: kind.into(),
            price,
            ..Self::default()
        }
    }
}

impl Exportable for Furniture {
    fn export_config(&self) -> &FieldConfig {
        &self.export_config
    }

    fn fields(&self) -> Vec<(String, FieldValue)> {
        vec![
            ("type".into(), self.kind.to_field()),
            ("price".into(), self.price.to_field()),
        ]
    }

    fn assign_field(&mut self, name: &str, value: FieldValue) -> bool {
        match name {
            "type" => value.assign_to(&mut self.kind),
            "price" => value.assign_to(&mut self.price),
            _ => false,
        }
    }
}

/// Tenant feedback: a complaint carries a message.
#[derive(Debug, Clone, Default)]
pub struct Complaint {
    export_config: FieldConfig,
    pub message: String,
}

impl Complaint {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
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

/// Tenant feedback: praise carries a star rating.
#[derive(Debug, Clone, Default)]
pub struct Praise {
    export_config: FieldConfig,
    pub stars: u8,
}

impl Praise {
    pub fn new(stars: u8) -> Self {
        Self {
            stars,
            ..Self::default()
        }
    }
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

/// Chooses the feedback type from the fragment's keys. Anything else is kept
/// as raw data.
pub fn feedback_type(fragment: &Value, _key: ElementKey<'_>) -> Option<InstanceType> {
    if fragment.get("message").is_some() {
        Some(type_of::<Complaint>())
    } else if fragment.get("stars").is_some() {
        Some(type_of::<Praise>())
    } else {
        None
    }
}

/// A rentable room. Typed containers hold `Option` so null entries in the
/// data survive a round trip instead of failing the whole field.
#[derive(Debug, Clone)]
pub struct Room {
    export_config: FieldConfig,
    pub settler: Option<Person>,
    pub furniture: BTreeMap<String, Option<Furniture>>,
    pub complaints: Vec<Option<Complaint>>,
    pub tmp_price: f64,
    pub area: u32,
}

impl Default for Room {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Room {
    pub fn new(area: u32) -> Self {
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
            tmp_price: 0.0,
            area,
        }
    }

    pub fn is_occupied(&self) -> bool {
        self.settler.is_some()
    }

    /// Area plus furniture value; cached in the ignored `tmpPrice` field.
    pub fn calculate_price(&mut self) -> f64 {
        let furniture: f64 = self.furniture.values().flatten().map(|f| f.price).sum();
        self.tmp_price = f64::from(self.area) + furniture;
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

/// A named building with rooms, a manager and mixed tenant feedback.
#[derive(Debug, Clone)]
pub struct Building {
    export_config: FieldConfig,
    pub name: String,
    pub manager: Option<Person>,
    pub rooms: BTreeMap<String, Option<Room>>,
    pub feedback: Vec<FieldValue>,
    pub lookups: u64,
}

impl Default for Building {
    fn default() -> Self {
        let mut export_config = FieldConfig::new();
        export_config.declare_field_roles([
            ("manager", instance_of(type_of::<Person>())),
            ("rooms", dict_of(type_of::<Room>())),
            ("feedback", array_of(TypeResolver::from_fn(feedback_type))),
        ]);
        export_config.exclude_fields(["lookups"]);
        Self {
            export_config,
            name: String::new(),
            manager: None,
            rooms: BTreeMap::new(),
            feedback: Vec::new(),
            lookups: 0,
        }
    }
}

impl Building {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Looks up a room, counting the lookup in the ignored `lookups` field.
    pub fn room(&mut self, key: &str) -> Option<&Room> {
        self.lookups += 1;
        self.rooms.get(key).and_then(Option::as_ref)
    }

    pub fn occupied_rooms(&self) -> usize {
        self.rooms.values().flatten().filter(|r| r.is_occupied()).count()
    }

    /// Messages of every feedback item that imported as a complaint.
    pub fn complaint_messages(&self) -> Vec<String> {
        self.feedback
            .iter()
            .filter_map(|item| item.clone().into_instance::<Complaint>())
            .map(|complaint| complaint.message)
            .collect()
    }
}

impl Exportable for Building {
    fn export_config(&self) -> &FieldConfig {
        &self.export_config
    }

    fn fields(&self) -> Vec<(String, FieldValue)> {
        vec![
            ("name".into(), self.name.to_field()),
            ("manager".into(), self.manager.to_field()),
            ("rooms".into(), self.rooms.to_field()),
            ("feedback".into(), self.feedback.to_field()),
            ("lookups".into(), self.lookups.to_field()),
        ]
    }

    fn assign_field(&mut self, name: &str, value: FieldValue) -> bool {
        match name {
            "name" => value.assign_to(&mut self.name),
            "manager" => value.assign_to(&mut self.manager),
            "rooms" => value.assign_to(&mut self.rooms),
            "feedback" => value.assign_to(&mut self.feedback),
            "lookups" => value.assign_to(&mut self.lookups),
            _ => false,
        }
    }
}

exportable_fields!(Person, Furniture, Complaint, Praise, Room);
