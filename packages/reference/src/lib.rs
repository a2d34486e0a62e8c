#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Static reference data.
//!
//! Enumerations the intake forms and dashboard render but the backend
//! does not serve: ward and zone lists, complaint categories, ID proof
//! types, and the municipal drone roster. Kept behind the
//! [`ReferenceData`] trait so tests and future live providers can
//! substitute their own datasets without touching aggregation or
//! workflow logic.

use serde::{Deserialize, Serialize};

/// One drone in the municipal fleet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DroneUnit {
    /// Fleet identifier (e.g. `DRONE001`).
    pub id: String,
    /// Registration number.
    pub uin: String,
    /// Airframe model.
    pub model: String,
    /// Operational status (`Active` / `Inactive`).
    pub status: String,
    /// Battery level in percent.
    pub battery_percent: u8,
    /// Payload configuration.
    pub payload: String,
}

/// Provider of reference datasets.
pub trait ReferenceData {
    /// Ward labels available for selection.
    fn wards(&self) -> &[String];
    /// Zone labels available for selection.
    fn zones(&self) -> &[String];
    /// Complaint categories.
    fn complaint_categories(&self) -> &[String];
    /// Accepted ID proof types.
    fn id_proof_types(&self) -> &[String];
    /// Property types for building approvals.
    fn property_types(&self) -> &[String];
    /// Building purposes for building approvals.
    fn building_purposes(&self) -> &[String];
    /// The municipal drone fleet.
    fn drone_fleet(&self) -> &[DroneUnit];
}

/// The built-in static datasets.
#[derive(Debug, Clone)]
pub struct StaticReference {
    wards: Vec<String>,
    zones: Vec<String>,
    complaint_categories: Vec<String>,
    id_proof_types: Vec<String>,
    property_types: Vec<String>,
    building_purposes: Vec<String>,
    drone_fleet: Vec<DroneUnit>,
}

impl Default for StaticReference {
    fn default() -> Self {
        Self::new()
    }
}

impl StaticReference {
    /// Builds the standard municipal datasets.
    #[must_use]
    pub fn new() -> Self {
        let strings = |items: &[&str]| items.iter().map(|s| (*s).to_owned()).collect();
        Self {
            wards: (1..=10).map(|n| format!("Ward {n}")).collect(),
            zones: strings(&[
                "North Zone",
                "South Zone",
                "East Zone",
                "West Zone",
                "Central Zone",
            ]),
            complaint_categories: strings(&[
                "Illegal Construction",
                "Encroachment",
                "Sanitation",
                "Water Supply",
                "Road Issues",
                "Street Lighting",
                "Garbage Collection",
                "Drainage Issues",
                "Street Vendors",
                "Traffic Violations",
                "Noise Pollution",
                "Air Pollution",
                "Street Dogs",
                "Other",
            ]),
            id_proof_types: strings(&[
                "Aadhaar Card",
                "PAN Card",
                "Voter ID",
                "Passport",
                "Driving License",
                "Ration Card",
            ]),
            property_types: strings(&[
                "Residential",
                "Commercial",
                "Industrial",
                "Mixed Use",
            ]),
            building_purposes: strings(&[
                "New Construction",
                "Extension",
                "Renovation",
                "Demolition and Rebuild",
            ]),
            drone_fleet: vec![
                DroneUnit {
                    id: "DRONE001".to_owned(),
                    uin: "UIN123456789".to_owned(),
                    model: "Mavic 3 Enterprise".to_owned(),
                    status: "Active".to_owned(),
                    battery_percent: 85,
                    payload: "Camera + Lidar".to_owned(),
                },
                DroneUnit {
                    id: "DRONE002".to_owned(),
                    uin: "UIN987654321".to_owned(),
                    model: "Mavic 3 Enterprise".to_owned(),
                    status: "Inactive".to_owned(),
                    battery_percent: 100,
                    payload: "Camera".to_owned(),
                },
            ],
        }
    }
}

impl ReferenceData for StaticReference {
    fn wards(&self) -> &[String] {
        &self.wards
    }

    fn zones(&self) -> &[String] {
        &self.zones
    }

    fn complaint_categories(&self) -> &[String] {
        &self.complaint_categories
    }

    fn id_proof_types(&self) -> &[String] {
        &self.id_proof_types
    }

    fn property_types(&self) -> &[String] {
        &self.property_types
    }

    fn building_purposes(&self) -> &[String] {
        &self.building_purposes
    }

    fn drone_fleet(&self) -> &[DroneUnit] {
        &self.drone_fleet
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ward_labels_are_numbered() {
        let data = StaticReference::new();
        assert_eq!(data.wards().len(), 10);
        assert_eq!(data.wards()[0], "Ward 1");
        assert_eq!(data.wards()[9], "Ward 10");
    }

    #[test]
    fn datasets_are_non_empty() {
        let data = StaticReference::new();
        assert!(!data.zones().is_empty());
        assert!(!data.complaint_categories().is_empty());
        assert!(!data.id_proof_types().is_empty());
        assert!(!data.property_types().is_empty());
        assert!(!data.building_purposes().is_empty());
        assert!(!data.drone_fleet().is_empty());
    }

    #[test]
    fn category_list_includes_road_issues() {
        let data = StaticReference::new();
        assert!(
            data.complaint_categories()
                .iter()
                .any(|c| c == "Road Issues")
        );
    }
}
