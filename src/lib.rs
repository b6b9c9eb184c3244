//! # careconnect
//!
//! A terminal dashboard and library for remote patient vital-sign monitoring.
//!
//! The dashboard shows a patient roster with risk scores, a synthetic
//! vital-signs trend for the selected patient, device connectivity and
//! clinical decision-support insights. All reference data is static; vitals
//! are generated once at startup over a trailing window of days.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Application                          │
//! │  ┌─────────┐    ┌──────────┐    ┌─────────┐    ┌─────────┐ │
//! │  │  data   │───▶│   app    │───▶│   ui    │───▶│ Terminal│ │
//! │  │ (tables)│    │ (state)  │    │(render) │    │         │ │
//! │  └─────────┘    └────▲─────┘    └─────────┘    └─────────┘ │
//! │                      │                                      │
//! │                 ┌────┴────┐                                 │
//! │                 │  clock  │◀── TickerClock | ChannelClock    │
//! │                 │ (ticks) │                                 │
//! │                 └─────────┘                                 │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`data`]**: Patient roster, device inventory and insights
//!   ([`SampleData`]), the synthetic [`VitalsGenerator`], and derived metrics
//! - **[`app`]**: Selected patient, last-refreshed timestamp, view navigation
//!   and JSON export
//! - **[`clock`]**: Refresh tick abstraction ([`Clock`] trait) with a
//!   cancellable periodic ticker and a channel-driven clock
//! - **[`ui`]**: Terminal rendering using ratatui
//! - **[`config`]**: Layered configuration ([`DashboardConfig`])
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Live dashboard, refreshed every second
//! careconnect
//!
//! # Reproducible 14-day series written to JSON
//! careconnect --window-days 14 --seed 7 --export snapshot.json
//! ```
//!
//! ### As a library
//!
//! ```
//! use std::sync::Arc;
//! use chrono::NaiveDate;
//! use careconnect::{App, ChannelClock, SampleData, Theme, VitalsGenerator};
//!
//! let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
//! let generator = VitalsGenerator::default();
//! let vitals = generator.generate(30, today, &mut VitalsGenerator::rng(Some(42)));
//! assert_eq!(vitals.len(), 31);
//!
//! let (tx, clock) = ChannelClock::create("manual");
//! let mut app = App::new(
//!     Arc::new(SampleData::builtin()),
//!     vitals,
//!     Box::new(clock),
//!     Theme::dark(),
//! )
//! .unwrap();
//!
//! app.select_patient(3).unwrap();
//! assert_eq!(app.selected_patient().name, "Sarah Jenkins");
//! ```

pub mod app;
pub mod clock;
pub mod config;
pub mod data;
pub mod error;
pub mod events;
pub mod ui;

// Re-export main types for convenience
pub use app::{App, DashboardSnapshot, View};
pub use clock::{ChannelClock, Clock, TickerClock};
pub use config::{DashboardConfig, DisplayConfig, GeneratorConfig, Overrides, ThemeChoice};
pub use data::{
    Patient, PatientStatus, RiskTier, SampleData, VitalField, VitalsGenerator, VitalsSeries,
};
pub use error::{DashboardError, Result};
pub use ui::Theme;
