//! Reference data shown by the dashboard.
//!
//! [`SampleData::builtin()`] reproduces the demo roster and inventory. The
//! same structures deserialize from the `[data]` section of a configuration
//! file, so a deployment can swap in its own tables without code changes.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{DashboardError, Result};

/// Categorical patient status driving badge colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatientStatus {
    Normal,
    Warning,
    Alert,
}

impl PatientStatus {
    /// Upper-case badge label.
    pub fn label(&self) -> &'static str {
        match self {
            PatientStatus::Alert => "ALERT",
            PatientStatus::Warning => "WARNING",
            PatientStatus::Normal => "NORMAL",
        }
    }
}

/// A monitored patient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    pub id: u32,
    pub name: String,
    pub age: u8,
    pub conditions: Vec<String>,
    /// Freshness label such as "2 hours ago".
    pub last_reading: String,
    pub status: PatientStatus,
    /// Names of the device types assigned to this patient.
    pub devices: Vec<String>,
    /// Risk score, 0-100.
    pub risk_score: u8,
}

impl Patient {
    /// Conditions joined for display.
    pub fn conditions_label(&self) -> String {
        self.conditions.join(", ")
    }
}

/// Total and online counts for one device category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceTypeInventory {
    pub name: String,
    pub count: u32,
    pub online: u32,
}

/// One segment of the patient status distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusSlice {
    pub name: String,
    /// Percentage weight.
    pub value: u8,
    /// Display color as `#RRGGBB`.
    pub color: String,
}

impl StatusSlice {
    /// Parse the slice color into RGB components.
    pub fn rgb(&self) -> Option<(u8, u8, u8)> {
        parse_hex_color(&self.color)
    }
}

/// Headline figures for the key-metrics row.
///
/// "Active Monitors" is not stored here: it is the online device total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyMetrics {
    pub total_patients: u32,
    pub improved_outcomes_pct: u8,
    pub avg_response_minutes: u32,
    pub active_alerts: u32,
}

/// A clinical decision-support card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insight {
    pub title: String,
    pub body: String,
}

/// All static tables the dashboard renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SampleData {
    pub title: String,
    pub subtitle: String,
    pub patients: Vec<Patient>,
    pub devices: Vec<DeviceTypeInventory>,
    pub status_distribution: Vec<StatusSlice>,
    pub metrics: KeyMetrics,
    pub insights: Vec<Insight>,
}

impl Default for SampleData {
    fn default() -> Self {
        Self::builtin()
    }
}

impl SampleData {
    /// The built-in demo tables.
    pub fn builtin() -> Self {
        Self {
            title: "CareConnect Dashboard".to_string(),
            subtitle: "Remote Patient Monitoring System - Bristol NHS Trust".to_string(),
            patients: builtin_patients(),
            devices: builtin_devices(),
            status_distribution: builtin_distribution(),
            metrics: KeyMetrics {
                total_patients: 342,
                improved_outcomes_pct: 89,
                avg_response_minutes: 12,
                active_alerts: 3,
            },
            insights: builtin_insights(),
        }
    }

    /// Roster position of the patient with `id`.
    pub fn patient_index(&self, id: u32) -> Option<usize> {
        self.patients.iter().position(|p| p.id == id)
    }

    /// Check the tables for values the dashboard cannot display sensibly.
    ///
    /// Slice weights that do not sum to 100 are only logged.
    pub fn validate(&self) -> Result<()> {
        if self.patients.is_empty() {
            return Err(DashboardError::EmptyRoster);
        }

        let mut seen = HashSet::new();
        for patient in &self.patients {
            if !seen.insert(patient.id) {
                return Err(DashboardError::DuplicatePatientId(patient.id));
            }
            if patient.risk_score > 100 {
                return Err(DashboardError::RiskScoreOutOfRange {
                    patient: patient.id,
                    score: patient.risk_score,
                });
            }
        }

        for device in &self.devices {
            if device.online > device.count {
                return Err(DashboardError::OnlineExceedsTotal {
                    device: device.name.clone(),
                    online: device.online,
                    count: device.count,
                });
            }
        }

        for slice in &self.status_distribution {
            if slice.rgb().is_none() {
                return Err(DashboardError::InvalidColor {
                    slice: slice.name.clone(),
                    value: slice.color.clone(),
                });
            }
        }

        let total = super::metrics::distribution_total(&self.status_distribution);
        if !self.status_distribution.is_empty() && total != 100 {
            warn!(total, "status distribution weights do not sum to 100");
        }

        Ok(())
    }
}

/// Parse `#RRGGBB` into components.
pub fn parse_hex_color(s: &str) -> Option<(u8, u8, u8)> {
    let hex = s.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn builtin_patients() -> Vec<Patient> {
    vec![
        Patient {
            id: 1,
            name: "Margaret Thompson".to_string(),
            age: 74,
            conditions: strings(&["Hypertension", "Type 2 Diabetes"]),
            last_reading: "2 hours ago".to_string(),
            status: PatientStatus::Alert,
            devices: strings(&["BP Monitor", "Glucometer", "Weight Scale"]),
            risk_score: 85,
        },
        Patient {
            id: 2,
            name: "James Wilson".to_string(),
            age: 58,
            conditions: strings(&["COPD", "Heart Disease"]),
            last_reading: "30 minutes ago".to_string(),
            status: PatientStatus::Normal,
            devices: strings(&["Pulse Oximeter", "BP Monitor", "Smart Inhaler"]),
            risk_score: 65,
        },
        Patient {
            id: 3,
            name: "Sarah Jenkins".to_string(),
            age: 45,
            conditions: strings(&["Post-surgical recovery"]),
            last_reading: "1 hour ago".to_string(),
            status: PatientStatus::Warning,
            devices: strings(&["Temperature Sensor", "Activity Tracker"]),
            risk_score: 45,
        },
        Patient {
            id: 4,
            name: "Robert Clarke".to_string(),
            age: 82,
            conditions: strings(&["Atrial Fibrillation"]),
            last_reading: "15 minutes ago".to_string(),
            status: PatientStatus::Normal,
            devices: strings(&["ECG Monitor", "BP Monitor"]),
            risk_score: 72,
        },
    ]
}

fn builtin_devices() -> Vec<DeviceTypeInventory> {
    [
        ("Blood Pressure Monitors", 156, 142),
        ("Glucometers", 89, 85),
        ("Pulse Oximeters", 73, 68),
        ("Weight Scales", 67, 63),
        ("Temperature Sensors", 45, 42),
        ("ECG Monitors", 34, 31),
    ]
    .into_iter()
    .map(|(name, count, online)| DeviceTypeInventory {
        name: name.to_string(),
        count,
        online,
    })
    .collect()
}

fn builtin_distribution() -> Vec<StatusSlice> {
    [
        ("Normal", 67, "#10B981"),
        ("Warning", 23, "#F59E0B"),
        ("Alert", 10, "#EF4444"),
    ]
    .into_iter()
    .map(|(name, value, color)| StatusSlice {
        name: name.to_string(),
        value,
        color: color.to_string(),
    })
    .collect()
}

fn builtin_insights() -> Vec<Insight> {
    [
        (
            "Early Warning",
            "Margaret Thompson's BP readings show increasing trend. Consider medication adjustment.",
        ),
        (
            "Medication Adherence",
            "James Wilson's inhaler usage pattern suggests good COPD management compliance.",
        ),
        (
            "Predictive Analytics",
            "Risk models indicate 3 patients may need intervention within 48 hours.",
        ),
    ]
    .into_iter()
    .map(|(title, body)| Insight {
        title: title.to_string(),
        body: body.to_string(),
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_data_is_valid() {
        let data = SampleData::builtin();
        assert!(data.validate().is_ok());
        assert_eq!(data.patients.len(), 4);
        assert_eq!(data.devices.len(), 6);
        assert_eq!(data.insights.len(), 3);
    }

    #[test]
    fn builtin_roster_starts_with_margaret() {
        let data = SampleData::builtin();
        assert_eq!(data.patients[0].name, "Margaret Thompson");
        assert_eq!(data.patients[0].status, PatientStatus::Alert);
    }

    #[test]
    fn patient_lookup_by_id() {
        let data = SampleData::builtin();
        assert_eq!(data.patient_index(3), Some(2));
        assert_eq!(data.patients[2].name, "Sarah Jenkins");
        assert!(data.patient_index(99).is_none());
    }

    #[test]
    fn validate_rejects_empty_roster() {
        let mut data = SampleData::builtin();
        data.patients.clear();
        assert!(matches!(data.validate(), Err(DashboardError::EmptyRoster)));
    }

    #[test]
    fn validate_rejects_duplicate_ids() {
        let mut data = SampleData::builtin();
        data.patients[1].id = 1;
        assert!(matches!(
            data.validate(),
            Err(DashboardError::DuplicatePatientId(1))
        ));
    }

    #[test]
    fn validate_rejects_risk_above_100() {
        let mut data = SampleData::builtin();
        data.patients[2].risk_score = 101;
        assert!(matches!(
            data.validate(),
            Err(DashboardError::RiskScoreOutOfRange { patient: 3, score: 101 })
        ));
    }

    #[test]
    fn validate_rejects_online_above_total() {
        let mut data = SampleData::builtin();
        data.devices[0].online = data.devices[0].count + 1;
        assert!(matches!(
            data.validate(),
            Err(DashboardError::OnlineExceedsTotal { .. })
        ));
    }

    #[test]
    fn validate_rejects_bad_slice_color() {
        let mut data = SampleData::builtin();
        data.status_distribution[0].color = "green".to_string();
        assert!(matches!(
            data.validate(),
            Err(DashboardError::InvalidColor { .. })
        ));
    }

    #[test]
    fn validate_tolerates_weights_not_summing_to_100() {
        let mut data = SampleData::builtin();
        data.status_distribution[0].value = 50;
        assert!(data.validate().is_ok());
    }

    #[test]
    fn parse_hex_color_accepts_mixed_case() {
        assert_eq!(parse_hex_color("#10B981"), Some((0x10, 0xb9, 0x81)));
        assert_eq!(parse_hex_color("#ef4444"), Some((0xef, 0x44, 0x44)));
        assert_eq!(parse_hex_color("10B981"), None);
        assert_eq!(parse_hex_color("#10B98"), None);
        assert_eq!(parse_hex_color("#GGGGGG"), None);
    }

    #[test]
    fn status_deserializes_lowercase() {
        let status: PatientStatus = serde_json::from_str("\"warning\"").unwrap();
        assert_eq!(status, PatientStatus::Warning);
        assert_eq!(status.label(), "WARNING");
    }
}
