//! Dashboard data: reference tables, synthetic vitals, and derived metrics.
//!
//! ## Submodules
//!
//! - [`sample`]: Patient roster, device inventory, status distribution,
//!   key metrics and insight cards ([`SampleData`])
//! - [`vitals`]: Synthetic daily vital-sign series ([`VitalsGenerator`])
//! - [`metrics`]: Device totals, risk tiers, status colors and the
//!   latest-readings tiles
//!
//! ## Data Flow
//!
//! ```text
//! SampleData ───────────────┐
//!                           ├──▶ App (selected patient, timestamp) ──▶ ui
//! VitalsGenerator::generate ┘        │
//!                                    └──▶ metrics (totals, tiers, readings)
//! ```

pub mod metrics;
pub mod sample;
pub mod vitals;

pub use metrics::{
    device_totals, distribution_total, latest_readings, status_color_pair, ColorPair,
    DeviceIndicator, DeviceTotals, LatestReading, ReadingStatus, RiskTier,
};
pub use sample::{
    DeviceTypeInventory, Insight, KeyMetrics, Patient, PatientStatus, SampleData, StatusSlice,
};
pub use vitals::{
    generate_vitals, Baseline, VitalBaselines, VitalField, VitalsGenerator, VitalsSample,
    VitalsSeries, DEFAULT_WINDOW_DAYS,
};
