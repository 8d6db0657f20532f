//! Complaint records and their enumerated fields.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of problem a customer reports.
///
/// Serialized with the Thai labels shown to customers; the English variant
/// names are accepted when reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComplaintCategory {
    #[serde(rename = "ไฟดับ", alias = "PowerOutage")]
    PowerOutage,
    #[serde(rename = "ไฟอันตราย", alias = "HighVoltage")]
    HighVoltage,
    #[serde(rename = "ปัญหาค่าไฟ", alias = "Billing")]
    Billing,
    #[serde(rename = "ขอใช้ไฟใหม่", alias = "NewConnection")]
    NewConnection,
}

impl ComplaintCategory {
    pub const ALL: [ComplaintCategory; 4] = [
        ComplaintCategory::PowerOutage,
        ComplaintCategory::HighVoltage,
        ComplaintCategory::Billing,
        ComplaintCategory::NewConnection,
    ];

    /// Customer-facing label.
    pub fn label(&self) -> &'static str {
        match self {
            ComplaintCategory::PowerOutage => "ไฟดับ",
            ComplaintCategory::HighVoltage => "ไฟอันตราย",
            ComplaintCategory::Billing => "ปัญหาค่าไฟ",
            ComplaintCategory::NewConnection => "ขอใช้ไฟใหม่",
        }
    }

    fn slug(&self) -> &'static str {
        match self {
            ComplaintCategory::PowerOutage => "power-outage",
            ComplaintCategory::HighVoltage => "high-voltage",
            ComplaintCategory::Billing => "billing",
            ComplaintCategory::NewConnection => "new-connection",
        }
    }
}

impl std::fmt::Display for ComplaintCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ComplaintCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| {
                c.label() == wanted
                    || c.slug().eq_ignore_ascii_case(wanted)
                    || format!("{:?}", c).eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| format!("unknown complaint category '{}'", s))
    }
}

/// Lifecycle state of a complaint.
///
/// The core allows any status to be set from any other; only the dashboard
/// affordance stops offering changes once a complaint is resolved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComplaintStatus {
    #[default]
    #[serde(rename = "รับเรื่องแล้ว", alias = "Pending")]
    Pending,
    #[serde(rename = "กำลังดำเนินการ", alias = "InProgress")]
    InProgress,
    #[serde(rename = "แก้ไขเรียบร้อยแล้ว", alias = "Resolved")]
    Resolved,
}

impl ComplaintStatus {
    pub const ALL: [ComplaintStatus; 3] = [
        ComplaintStatus::Pending,
        ComplaintStatus::InProgress,
        ComplaintStatus::Resolved,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ComplaintStatus::Pending => "รับเรื่องแล้ว",
            ComplaintStatus::InProgress => "กำลังดำเนินการ",
            ComplaintStatus::Resolved => "แก้ไขเรียบร้อยแล้ว",
        }
    }

    fn slug(&self) -> &'static str {
        match self {
            ComplaintStatus::Pending => "pending",
            ComplaintStatus::InProgress => "in-progress",
            ComplaintStatus::Resolved => "resolved",
        }
    }
}

impl std::fmt::Display for ComplaintStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ComplaintStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|st| {
                st.label() == wanted
                    || st.slug().eq_ignore_ascii_case(wanted)
                    || format!("{:?}", st).eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| format!("unknown complaint status '{}'", s))
    }
}

/// Fields supplied by the submission form.
///
/// Everything except the generated `id`, `status` and timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewComplaint {
    pub ca_number: String,
    pub full_name: String,
    pub phone: String,
    pub category: ComplaintCategory,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    pub location: String,
}

/// A stored complaint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Complaint {
    /// Unique identifier, assigned at creation.
    pub id: String,
    /// 12-digit customer account number. Opaque to the core.
    pub ca_number: String,
    pub full_name: String,
    pub phone: String,
    pub category: ComplaintCategory,
    pub description: String,
    /// Data-URL encoded photo.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    pub location: String,
    #[serde(default)]
    pub status: ComplaintStatus,
    #[serde(with = "iso_millis")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "iso_millis")]
    pub updated_at: DateTime<Utc>,
}

impl Complaint {
    /// Builds a pending complaint from submitted fields.
    pub fn from_new(id: String, fields: NewComplaint, now: DateTime<Utc>) -> Self {
        Self {
            id,
            ca_number: fields.ca_number,
            full_name: fields.full_name,
            phone: fields.phone,
            category: fields.category,
            description: fields.description,
            photo: fields.photo,
            location: fields.location,
            status: ComplaintStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    /// The submitted, non-generated fields of this record.
    pub fn fields(&self) -> NewComplaint {
        NewComplaint {
            ca_number: self.ca_number.clone(),
            full_name: self.full_name.clone(),
            phone: self.phone.clone(),
            category: self.category,
            description: self.description.clone(),
            photo: self.photo.clone(),
            location: self.location.clone(),
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.status == ComplaintStatus::Resolved
    }
}

/// ISO-8601 timestamps with millisecond precision and a `Z` suffix.
mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&dt.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> Complaint {
        let at = Utc.with_ymd_and_hms(2026, 1, 15, 8, 30, 0).unwrap();
        Complaint::from_new(
            "PEA-1-abcde".to_string(),
            NewComplaint {
                ca_number: "112233445566".to_string(),
                full_name: "สมชาย ใจดี".to_string(),
                phone: "0812345678".to_string(),
                category: ComplaintCategory::PowerOutage,
                description: "ไฟฟ้าดับทั้งซอย".to_string(),
                photo: None,
                location: "123 ถนนสุขุมวิท".to_string(),
            },
            at,
        )
    }

    #[test]
    fn test_serializes_with_camel_case_and_thai_labels() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["caNumber"], "112233445566");
        assert_eq!(json["category"], "ไฟดับ");
        assert_eq!(json["status"], "รับเรื่องแล้ว");
        assert_eq!(json["createdAt"], "2026-01-15T08:30:00.000Z");
        assert!(json.get("photo").is_none());
    }

    #[test]
    fn test_deserializes_english_variant_names() {
        let json = r#"{
            "id": "PEA-2-xyz12", "caNumber": "1", "fullName": "A", "phone": "0",
            "category": "HighVoltage", "description": "d", "location": "l",
            "status": "InProgress",
            "createdAt": "2026-01-15T08:30:00.000Z", "updatedAt": "2026-01-15T09:00:00Z"
        }"#;
        let c: Complaint = serde_json::from_str(json).unwrap();
        assert_eq!(c.category, ComplaintCategory::HighVoltage);
        assert_eq!(c.status, ComplaintStatus::InProgress);
        assert!(c.updated_at > c.created_at);
    }

    #[test]
    fn test_missing_status_defaults_to_pending() {
        let json = r#"{
            "id": "x", "caNumber": "1", "fullName": "A", "phone": "0",
            "category": "ปัญหาค่าไฟ", "description": "d", "location": "l",
            "createdAt": "2026-01-15T08:30:00.000Z", "updatedAt": "2026-01-15T08:30:00.000Z"
        }"#;
        let c: Complaint = serde_json::from_str(json).unwrap();
        assert_eq!(c.status, ComplaintStatus::Pending);
    }

    #[test]
    fn test_status_from_str() {
        assert_eq!("in-progress".parse::<ComplaintStatus>(), Ok(ComplaintStatus::InProgress));
        assert_eq!("Resolved".parse::<ComplaintStatus>(), Ok(ComplaintStatus::Resolved));
        assert_eq!("รับเรื่องแล้ว".parse::<ComplaintStatus>(), Ok(ComplaintStatus::Pending));
        assert!("closed".parse::<ComplaintStatus>().is_err());
    }

    #[test]
    fn test_category_from_str() {
        assert_eq!("billing".parse::<ComplaintCategory>(), Ok(ComplaintCategory::Billing));
        assert_eq!(
            "NewConnection".parse::<ComplaintCategory>(),
            Ok(ComplaintCategory::NewConnection)
        );
        assert!("gas-leak".parse::<ComplaintCategory>().is_err());
    }

    #[test]
    fn test_fields_round_trip() {
        let c = sample();
        let again = Complaint::from_new(c.id.clone(), c.fields(), c.created_at);
        assert_eq!(c, again);
    }
}
