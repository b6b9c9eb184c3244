//! Aggregates and display categories derived from the reference tables.

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

use super::sample::{DeviceTypeInventory, PatientStatus, StatusSlice};
use super::vitals::VitalsSample;

/// Device counts summed across all categories.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceTotals {
    pub total: u64,
    pub online: u64,
}

impl DeviceTotals {
    /// Fraction of devices online, 0 when there are none.
    pub fn online_ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.online as f64 / self.total as f64
        }
    }
}

/// Sum total and online counts across the inventory.
pub fn device_totals(inventory: &[DeviceTypeInventory]) -> DeviceTotals {
    inventory.iter().fold(DeviceTotals::default(), |acc, d| DeviceTotals {
        total: acc.total + u64::from(d.count),
        online: acc.online + u64::from(d.online),
    })
}

impl DeviceTypeInventory {
    /// Fraction of this category online, 0 for an empty category.
    pub fn online_ratio(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            f64::from(self.online) / f64::from(self.count)
        }
    }

    /// Whether every device in the category is online.
    pub fn is_fully_online(&self) -> bool {
        self.online == self.count
    }
}

/// Sum of the status distribution weights.
pub fn distribution_total(slices: &[StatusSlice]) -> u32 {
    slices.iter().map(|s| u32::from(s.value)).sum()
}

/// Qualitative bucket for a risk score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

impl RiskTier {
    pub const HIGH_THRESHOLD: u8 = 80;
    pub const MEDIUM_THRESHOLD: u8 = 60;

    /// Thresholds are inclusive on the high side.
    pub fn from_score(score: u8) -> Self {
        if score >= Self::HIGH_THRESHOLD {
            RiskTier::High
        } else if score >= Self::MEDIUM_THRESHOLD {
            RiskTier::Medium
        } else {
            RiskTier::Low
        }
    }

    /// Text color for the tier.
    pub fn color(&self) -> Color {
        match self {
            RiskTier::High => RED_600,
            RiskTier::Medium => YELLOW_600,
            RiskTier::Low => GREEN_600,
        }
    }
}

const RED_600: Color = Color::Rgb(0xdc, 0x26, 0x26);
const RED_100: Color = Color::Rgb(0xfe, 0xe2, 0xe2);
const YELLOW_600: Color = Color::Rgb(0xca, 0x8a, 0x04);
const YELLOW_100: Color = Color::Rgb(0xfe, 0xf9, 0xc3);
const GREEN_600: Color = Color::Rgb(0x16, 0xa3, 0x4a);
const GREEN_100: Color = Color::Rgb(0xdc, 0xfc, 0xe7);

/// Foreground and background for a status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorPair {
    pub fg: Color,
    pub bg: Color,
}

/// Badge colors for a patient status.
pub fn status_color_pair(status: PatientStatus) -> ColorPair {
    match status {
        PatientStatus::Alert => ColorPair {
            fg: RED_600,
            bg: RED_100,
        },
        PatientStatus::Warning => ColorPair {
            fg: YELLOW_600,
            bg: YELLOW_100,
        },
        PatientStatus::Normal => ColorPair {
            fg: GREEN_600,
            bg: GREEN_100,
        },
    }
}

/// Compact device marker for a patient card.
///
/// Up to two devices get one dot each; beyond that two dots and a `+n`
/// overflow count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceIndicator {
    pub dots: usize,
    pub overflow: usize,
}

impl DeviceIndicator {
    const MAX_DOTS: usize = 2;

    pub fn for_count(devices: usize) -> Self {
        if devices > Self::MAX_DOTS {
            Self {
                dots: Self::MAX_DOTS,
                overflow: devices - Self::MAX_DOTS,
            }
        } else {
            Self {
                dots: devices,
                overflow: 0,
            }
        }
    }
}

/// Whether a reading is inside its normal band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadingStatus {
    Normal,
    Warning,
}

/// One tile of the "Latest Readings" panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatestReading {
    pub label: &'static str,
    pub value: String,
    pub unit: &'static str,
    pub status: ReadingStatus,
}

const SYSTOLIC_WARNING: f64 = 140.0;
const DIASTOLIC_WARNING: f64 = 90.0;
const HEART_RATE_NORMAL: (f64, f64) = (60.0, 100.0);
const TEMPERATURE_NORMAL: (f64, f64) = (36.1, 37.2);

fn band_status(value: f64, (lo, hi): (f64, f64)) -> ReadingStatus {
    if value >= lo && value <= hi {
        ReadingStatus::Normal
    } else {
        ReadingStatus::Warning
    }
}

/// Build the latest-readings tiles from the most recent sample.
pub fn latest_readings(sample: &VitalsSample) -> [LatestReading; 4] {
    let bp_status = if sample.systolic >= SYSTOLIC_WARNING || sample.diastolic >= DIASTOLIC_WARNING
    {
        ReadingStatus::Warning
    } else {
        ReadingStatus::Normal
    };

    [
        LatestReading {
            label: "Blood Pressure",
            value: format!("{:.0}/{:.0}", sample.systolic, sample.diastolic),
            unit: "mmHg",
            status: bp_status,
        },
        LatestReading {
            label: "Heart Rate",
            value: format!("{:.0}", sample.heart_rate),
            unit: "bpm",
            status: band_status(sample.heart_rate, HEART_RATE_NORMAL),
        },
        LatestReading {
            label: "Temperature",
            value: format!("{:.1}", sample.temperature),
            unit: "°C",
            status: band_status(sample.temperature, TEMPERATURE_NORMAL),
        },
        LatestReading {
            label: "Weight",
            value: format!("{:.1}", sample.weight),
            unit: "kg",
            status: ReadingStatus::Normal,
        },
    ]
}
