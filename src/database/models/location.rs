use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// A user-submitted map annotation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationRecord {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub coordinates: Coordinates,
    pub address: String,
    /// Email of the creating account; set by the server only.
    pub created_by: String,
}

/// Client body for `POST /locations`. Unknown fields such as `_id` or
/// `created_by` are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct NewLocation {
    pub name: String,
    #[serde(default)]
    pub category: String,
    pub coordinates: Coordinates,
    #[serde(default)]
    pub address: String,
}

/// Client body for `PUT /locations/:id`. Every editable field is replaced;
/// an omitted field is written as its empty value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LocationUpdate {
    pub name: String,
    pub category: String,
    pub coordinates: Coordinates,
    pub address: String,
}

impl LocationRecord {
    pub fn create(input: NewLocation, created_by: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: input.name,
            category: input.category,
            coordinates: input.coordinates,
            address: input.address,
            created_by: created_by.into(),
        }
    }

    /// Overwrites the editable fields; id and created_by are untouched.
    pub fn apply(&mut self, update: &LocationUpdate) {
        self.name = update.name.clone();
        self.category = update.category.clone();
        self.coordinates = update.coordinates;
        self.address = update.address.clone();
    }
}
