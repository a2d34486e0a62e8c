//! Per-kind intake form schemas.
//!
//! Each [`IntakeSchema`] captures everything unique about one request
//! kind in plain data: the ordered steps, the fields each step renders,
//! the required subset, and the snake_case wire name each field is
//! submitted under. A single generic workflow implementation handles
//! all kinds.

use crate::IntakeKind;

/// The value shape a field accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text input.
    Text,
    /// One option from an enumerated list.
    Choice,
    /// Calendar date.
    Date,
    /// Numeric input.
    Number,
    /// Yes/no flag.
    Flag,
    /// Single-upload binary slot.
    Attachment,
    /// Multi-upload binary slot (insertion-ordered).
    AttachmentList,
    /// Geo-coordinate pair.
    Coordinates,
}

/// One form field: its in-form key, its wire name, and how it validates.
#[derive(Debug, Clone)]
pub struct FieldDef {
    /// Field key as rendered in the form (camelCase).
    pub key: &'static str,
    /// Wire name used by the submission contract (snake_case).
    pub wire: &'static str,
    /// Human-readable label.
    pub label: &'static str,
    /// Value shape.
    pub kind: FieldKind,
    /// Whether the owning step blocks on this field being non-empty.
    pub required: bool,
    /// Inline message shown when required and empty.
    pub requirement: &'static str,
}

impl FieldDef {
    /// Creates an optional field.
    #[must_use]
    pub const fn new(
        key: &'static str,
        wire: &'static str,
        label: &'static str,
        kind: FieldKind,
    ) -> Self {
        Self {
            key,
            wire,
            label,
            kind,
            required: false,
            requirement: "",
        }
    }

    /// Marks the field required, with the inline message to show when
    /// it is left empty.
    #[must_use]
    pub const fn required(self, requirement: &'static str) -> Self {
        Self {
            required: true,
            requirement,
            ..self
        }
    }
}

/// One ordinal step of an intake form.
#[derive(Debug, Clone)]
pub struct StepDef {
    /// Step heading shown to the citizen.
    pub title: &'static str,
    /// Fields rendered on this step, in display order.
    pub fields: Vec<FieldDef>,
}

impl StepDef {
    /// Returns the required subset of this step's fields.
    pub fn required_fields(&self) -> impl Iterator<Item = &FieldDef> {
        self.fields.iter().filter(|f| f.required)
    }

    /// Returns `true` when `key` is rendered on this step.
    #[must_use]
    pub fn renders(&self, key: &str) -> bool {
        self.fields.iter().any(|f| f.key == key)
    }
}

/// The complete form definition for one intake kind.
#[derive(Debug, Clone)]
pub struct IntakeSchema {
    /// Which request kind this schema describes.
    pub kind: IntakeKind,
    /// Ordered steps; the last step's successful validation triggers
    /// submission instead of advancement.
    pub steps: Vec<StepDef>,
}

impl IntakeSchema {
    /// Returns the schema for `kind`.
    #[must_use]
    pub fn for_kind(kind: IntakeKind) -> Self {
        match kind {
            IntakeKind::Complaint => Self::complaint(),
            IntakeKind::PropertyVerification => Self::property_verification(),
            IntakeKind::BuildingApproval => Self::building_approval(),
            IntakeKind::Survey => Self::survey(),
        }
    }

    /// Number of steps.
    #[must_use]
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// Returns the 1-based `step`, if in range.
    #[must_use]
    pub fn step(&self, step: usize) -> Option<&StepDef> {
        step.checked_sub(1).and_then(|i| self.steps.get(i))
    }

    /// Iterates over every field across all steps, in step order.
    pub fn fields(&self) -> impl Iterator<Item = &FieldDef> {
        self.steps.iter().flat_map(|s| s.fields.iter())
    }

    /// Looks up a field definition by form key.
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&FieldDef> {
        self.fields().find(|f| f.key == key)
    }

    /// The four-step citizen complaint form.
    #[must_use]
    pub fn complaint() -> Self {
        use FieldKind::{Attachment, AttachmentList, Choice, Date, Text};
        Self {
            kind: IntakeKind::Complaint,
            steps: vec![
                StepDef {
                    title: "Basic Complaint Details",
                    fields: vec![
                        FieldDef::new("title", "title", "Complaint Title", Text)
                            .required("Complaint title is required"),
                        FieldDef::new("description", "description", "Complaint Description", Text)
                            .required("Complaint description is required"),
                        FieldDef::new("category", "category", "Complaint Category", Choice)
                            .required("Please select a category"),
                        FieldDef::new("incidentDate", "incident_date", "Date of Incident", Date)
                            .required("Incident date is required"),
                        FieldDef::new("incidentTime", "incident_time", "Time of Incident", Text),
                    ],
                },
                StepDef {
                    title: "Location Details",
                    fields: vec![
                        FieldDef::new("address", "address", "Address", Text)
                            .required("Address is required"),
                        FieldDef::new("ward", "ward", "Ward", Choice)
                            .required("Please select a ward"),
                        FieldDef::new("zone", "zone", "Zone", Choice)
                            .required("Please select a zone"),
                        FieldDef::new("latitude", "latitude", "Latitude", Text),
                        FieldDef::new("longitude", "longitude", "Longitude", Text),
                        FieldDef::new("landmark", "landmark", "Landmark", Text),
                    ],
                },
                StepDef {
                    title: "Evidence",
                    fields: vec![
                        FieldDef::new("photos", "photos", "Photos", AttachmentList)
                            .required("At least one photo is required"),
                        FieldDef::new("videos", "videos", "Videos", AttachmentList),
                        FieldDef::new("documents", "documents", "Documents", AttachmentList),
                    ],
                },
                StepDef {
                    title: "Complainant Details",
                    fields: vec![
                        FieldDef::new("fullName", "full_name", "Full Name", Text)
                            .required("Full name is required"),
                        FieldDef::new("fatherName", "father_name", "Father's Name", Text),
                        FieldDef::new("motherName", "mother_name", "Mother's Name", Text),
                        FieldDef::new("dateOfBirth", "date_of_birth", "Date of Birth", Date),
                        FieldDef::new("gender", "gender", "Gender", Choice),
                        FieldDef::new("contactNumber", "contact_number", "Contact Number", Text)
                            .required("Contact number is required"),
                        FieldDef::new(
                            "residentialAddress",
                            "residential_address",
                            "Residential Address",
                            Text,
                        ),
                        FieldDef::new(
                            "permanentAddress",
                            "permanent_address",
                            "Permanent Address",
                            Text,
                        ),
                        FieldDef::new("idProofType", "id_proof_type", "ID Proof Type", Choice)
                            .required("Please select ID proof type"),
                        FieldDef::new("idProofNumber", "id_proof_number", "ID Proof Number", Text)
                            .required("ID proof number is required"),
                        FieldDef::new(
                            "idProofDocument",
                            "id_proof_document",
                            "ID Proof Document",
                            Attachment,
                        ),
                        FieldDef::new("selfie", "selfie", "Selfie", Attachment),
                    ],
                },
            ],
        }
    }

    /// The single-step property document verification form.
    #[must_use]
    pub fn property_verification() -> Self {
        use FieldKind::{Attachment, Text};
        Self {
            kind: IntakeKind::PropertyVerification,
            steps: vec![StepDef {
                title: "Property Verification",
                fields: vec![
                    FieldDef::new("fullName", "full_name", "Full Name", Text)
                        .required("Full name is required"),
                    FieldDef::new("aadhaarNumber", "aadhaar_number", "Aadhaar Number", Text)
                        .required("Aadhaar number is required"),
                    FieldDef::new("contactNumber", "contact_number", "Contact Number", Text)
                        .required("Contact number is required"),
                    FieldDef::new("emailId", "email_id", "Email ID", Text)
                        .required("Email ID is required"),
                    FieldDef::new(
                        "permanentAddress",
                        "permanent_address",
                        "Permanent Address",
                        Text,
                    )
                    .required("Permanent address is required"),
                    FieldDef::new("saleDeed", "sale_deed", "Sale Deed", Attachment)
                        .required("Sale Deed is required"),
                    FieldDef::new(
                        "propertyTaxReceipt",
                        "property_tax_receipt",
                        "Property Tax Receipt",
                        Attachment,
                    )
                    .required("Property Tax Receipt is required"),
                    FieldDef::new(
                        "khataCertificate",
                        "khata_certificate",
                        "Khata Certificate",
                        Attachment,
                    ),
                    FieldDef::new(
                        "encumbranceCertificate",
                        "encumbrance_certificate",
                        "Encumbrance Certificate",
                        Attachment,
                    ),
                    FieldDef::new(
                        "mutationCertificate",
                        "mutation_certificate",
                        "Mutation Certificate",
                        Attachment,
                    ),
                    FieldDef::new("rtcDocument", "rtc_document", "RTC Document", Attachment),
                    FieldDef::new("layoutPlan", "layout_plan", "Layout Plan", Attachment),
                    FieldDef::new(
                        "architecturalDrawings",
                        "architectural_drawings",
                        "Architectural Drawings",
                        Attachment,
                    ),
                    FieldDef::new(
                        "structuralCertificate",
                        "structural_certificate",
                        "Structural Certificate",
                        Attachment,
                    ),
                    FieldDef::new("aadhaarCard", "aadhaar_card", "Aadhaar Card", Attachment),
                    FieldDef::new("panCard", "pan_card", "PAN Card", Attachment),
                    FieldDef::new(
                        "electricityBill",
                        "electricity_bill",
                        "Electricity Bill",
                        Attachment,
                    ),
                ],
            }],
        }
    }

    /// The two-step building approval application.
    #[must_use]
    pub fn building_approval() -> Self {
        use FieldKind::{Attachment, Choice, Text};
        Self {
            kind: IntakeKind::BuildingApproval,
            steps: vec![
                StepDef {
                    title: "Applicant & Property",
                    fields: vec![
                        FieldDef::new("fullName", "full_name", "Full Name", Text)
                            .required("Full name is required"),
                        FieldDef::new("aadhaarNumber", "aadhaar_number", "Aadhaar Number", Text)
                            .required("Aadhaar number is required"),
                        FieldDef::new("contactNumber", "contact_number", "Contact Number", Text)
                            .required("Contact number is required"),
                        FieldDef::new("emailId", "email_id", "Email ID", Text)
                            .required("Email ID is required"),
                        FieldDef::new(
                            "permanentAddress",
                            "permanent_address",
                            "Permanent Address",
                            Text,
                        ),
                        FieldDef::new(
                            "propertyAddress",
                            "property_address",
                            "Property Address",
                            Text,
                        )
                        .required("Property address is required"),
                        FieldDef::new("propertyType", "property_type", "Property Type", Choice)
                            .required("Property type is required"),
                        FieldDef::new("landArea", "land_area", "Land Area", Text)
                            .required("Land area is required"),
                        FieldDef::new(
                            "buildingPurpose",
                            "building_purpose",
                            "Building Purpose",
                            Choice,
                        )
                        .required("Building purpose is required"),
                    ],
                },
                StepDef {
                    title: "Documents",
                    fields: vec![
                        FieldDef::new("saleDeed", "sale_deed", "Sale Deed", Attachment)
                            .required("Sale Deed is required"),
                        FieldDef::new("layoutPlan", "layout_plan", "Layout Plan", Attachment)
                            .required("Layout Plan is required"),
                        FieldDef::new(
                            "architecturalDrawings",
                            "architectural_drawings",
                            "Architectural Drawings",
                            Attachment,
                        )
                        .required("Architectural Drawings are required"),
                        FieldDef::new(
                            "structuralCertificate",
                            "structural_certificate",
                            "Structural Certificate",
                            Attachment,
                        ),
                        FieldDef::new(
                            "soilTestReport",
                            "soil_test_report",
                            "Soil Test Report",
                            Attachment,
                        ),
                        FieldDef::new(
                            "buildingEstimation",
                            "building_estimation",
                            "Building Estimation",
                            Attachment,
                        ),
                        FieldDef::new("aadhaarCard", "aadhaar_card", "Aadhaar Card", Attachment),
                        FieldDef::new("panCard", "pan_card", "PAN Card", Attachment),
                        FieldDef::new(
                            "electricityBill",
                            "electricity_bill",
                            "Electricity Bill",
                            Attachment,
                        ),
                    ],
                },
            ],
        }
    }

    /// The two-step ward field survey form.
    #[must_use]
    pub fn survey() -> Self {
        use FieldKind::{Attachment, Coordinates, Date, Number, Text};
        Self {
            kind: IntakeKind::Survey,
            steps: vec![
                StepDef {
                    title: "Survey Site",
                    fields: vec![
                        FieldDef::new("wardNo", "ward_no", "Ward Number", Number)
                            .required("Ward number is required"),
                        FieldDef::new("surveyDate", "survey_date", "Survey Date", Date)
                            .required("Survey date is required"),
                        FieldDef::new("droneId", "drone_id", "Drone ID", Text)
                            .required("Drone ID is required"),
                        FieldDef::new("localityName", "locality_name", "Locality Name", Text)
                            .required("Locality name is required"),
                        FieldDef::new("areaName", "area_name", "Area Name", Text)
                            .required("Area name is required"),
                        FieldDef::new("coordinates", "coordinates", "Coordinates", Coordinates)
                            .required("Coordinates are required"),
                    ],
                },
                StepDef {
                    title: "Survey Data",
                    fields: vec![
                        FieldDef::new(
                            "surveyPayload",
                            "survey_payload",
                            "Survey Measurements",
                            Text,
                        )
                        .required("Survey measurements are required"),
                        FieldDef::new(
                            "droneDataFile",
                            "drone_data_file",
                            "Drone Data File",
                            Attachment,
                        ),
                    ],
                },
            ],
        }
    }
}
