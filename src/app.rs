//! Application state and navigation logic.
//!
//! The domain state is deliberately small: which patient is selected and
//! when the display was last refreshed. Everything else here is chrome
//! (active tab, overlays, transient messages).

use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use chrono::{DateTime, Local};
use ratatui::layout::Rect;
use serde::Serialize;
use tracing::{debug, info, trace};

use crate::clock::Clock;
use crate::data::{
    device_totals, DeviceTotals, Patient, RiskTier, SampleData, StatusSlice, VitalsSeries,
};
use crate::error::DashboardError;
use crate::ui::Theme;

/// How long a status message stays visible.
const STATUS_MESSAGE_TTL: Duration = Duration::from_secs(3);

/// The current tab in the TUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Patient list, selected patient detail, vitals and latest readings.
    Patients,
    /// Device connectivity and status distribution.
    Devices,
    /// Clinical decision-support cards.
    Insights,
}

impl View {
    pub const ALL: [View; 3] = [View::Patients, View::Devices, View::Insights];

    /// Cycle to the next view.
    pub fn next(self) -> Self {
        match self {
            View::Patients => View::Devices,
            View::Devices => View::Insights,
            View::Insights => View::Patients,
        }
    }

    /// Cycle to the previous view.
    pub fn prev(self) -> Self {
        match self {
            View::Patients => View::Insights,
            View::Devices => View::Patients,
            View::Insights => View::Devices,
        }
    }

    /// Returns the display label for this view.
    pub fn label(&self) -> &'static str {
        match self {
            View::Patients => "Patients",
            View::Devices => "Devices",
            View::Insights => "Insights",
        }
    }

    /// Position in the tab bar.
    pub fn index(&self) -> usize {
        match self {
            View::Patients => 0,
            View::Devices => 1,
            View::Insights => 2,
        }
    }
}

/// Main application state.
pub struct App {
    pub running: bool,
    pub current_view: View,
    pub show_help: bool,

    data: Arc<SampleData>,
    vitals: VitalsSeries,
    selected: usize,

    clock: Box<dyn Clock>,
    last_refreshed: DateTime<Local>,

    pub theme: Theme,
    pub status_message: Option<(String, Instant)>,

    /// Inner area and scroll offset of the patient list from the last frame,
    /// for mouse hits.
    pub patient_list_area: Option<Rect>,
    pub patient_list_offset: usize,
}

impl App {
    /// Create the app with the first roster entry selected.
    ///
    /// Fails only when the roster is empty.
    pub fn new(
        data: Arc<SampleData>,
        vitals: VitalsSeries,
        clock: Box<dyn Clock>,
        theme: Theme,
    ) -> Result<Self, DashboardError> {
        if data.patients.is_empty() {
            return Err(DashboardError::EmptyRoster);
        }
        info!(
            patients = data.patients.len(),
            samples = vitals.len(),
            clock = clock.description(),
            "dashboard initialised"
        );

        Ok(Self {
            running: true,
            current_view: View::Patients,
            show_help: false,
            data,
            vitals,
            selected: 0,
            clock,
            last_refreshed: Local::now(),
            theme,
            status_message: None,
            patient_list_area: None,
            patient_list_offset: 0,
        })
    }

    pub fn data(&self) -> &SampleData {
        &self.data
    }

    pub fn roster(&self) -> &[Patient] {
        &self.data.patients
    }

    pub fn vitals(&self) -> &VitalsSeries {
        &self.vitals
    }

    /// The selected patient. Always present.
    pub fn selected_patient(&self) -> &Patient {
        &self.data.patients[self.selected]
    }

    /// Roster position of the selected patient.
    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn last_refreshed(&self) -> DateTime<Local> {
        self.last_refreshed
    }

    pub fn clock_description(&self) -> &str {
        self.clock.description()
    }

    pub fn clock_error(&self) -> Option<&str> {
        self.clock.error()
    }

    pub fn device_totals(&self) -> DeviceTotals {
        device_totals(&self.data.devices)
    }

    /// Select a patient by id.
    ///
    /// Returns `Ok(true)` if the selection changed, `Ok(false)` if the patient
    /// was already selected. Ids outside the roster leave the selection as is.
    pub fn select_patient(&mut self, id: u32) -> Result<bool, DashboardError> {
        let index = self
            .data
            .patient_index(id)
            .ok_or(DashboardError::UnknownPatient(id))?;
        Ok(self.select_index(index))
    }

    fn select_index(&mut self, index: usize) -> bool {
        if index == self.selected || index >= self.data.patients.len() {
            return false;
        }
        self.selected = index;
        debug!(patient = self.selected_patient().id, "patient selected");
        true
    }

    /// Select the patient at a position in the list.
    pub fn select_at(&mut self, index: usize) -> bool {
        self.select_index(index)
    }

    /// Move selection down by one patient.
    pub fn select_next(&mut self) {
        let last = self.data.patients.len() - 1;
        self.select_index((self.selected + 1).min(last));
    }

    /// Move selection up by one patient.
    pub fn select_prev(&mut self) {
        self.select_index(self.selected.saturating_sub(1));
    }

    pub fn select_first(&mut self) {
        self.select_index(0);
    }

    pub fn select_last(&mut self) {
        self.select_index(self.data.patients.len() - 1);
    }

    /// Pull the latest clock tick into the displayed timestamp.
    ///
    /// Returns true if the timestamp changed.
    pub fn tick(&mut self) -> bool {
        match self.clock.poll() {
            Some(now) => {
                trace!(%now, "refreshed");
                self.last_refreshed = now;
                true
            }
            None => false,
        }
    }

    /// Stop background work. Safe to call more than once.
    pub fn shutdown(&mut self) {
        self.clock.stop();
        info!("dashboard stopped");
    }

    /// Switch to the next view.
    pub fn next_view(&mut self) {
        self.current_view = self.current_view.next();
    }

    /// Switch to the previous view.
    pub fn prev_view(&mut self) {
        self.current_view = self.current_view.prev();
    }

    /// Switch to a specific view.
    pub fn set_view(&mut self, view: View) {
        self.current_view = view;
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// Get the current status message if it hasn't expired.
    pub fn get_status_message(&self) -> Option<&str> {
        match &self.status_message {
            Some((msg, time)) if time.elapsed() < STATUS_MESSAGE_TTL => Some(msg),
            _ => None,
        }
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Build the export document for the current state.
    pub fn snapshot(&self) -> DashboardSnapshot<'_> {
        DashboardSnapshot::new(&self.data, &self.vitals, self.last_refreshed)
    }

    /// Export current state to a JSON file.
    pub fn export_state(&self, path: &Path) -> Result<()> {
        self.snapshot().write_to(path)
    }
}

/// A patient row in the export, with its derived risk tier.
#[derive(Debug, Serialize)]
pub struct ExportedPatient<'a> {
    #[serde(flatten)]
    pub patient: &'a Patient,
    pub risk_tier: RiskTier,
}

/// JSON export of the dashboard.
#[derive(Debug, Serialize)]
pub struct DashboardSnapshot<'a> {
    pub generated_at: DateTime<Local>,
    pub devices: DeviceTotals,
    pub active_alerts: u32,
    pub patients: Vec<ExportedPatient<'a>>,
    pub status_distribution: &'a [StatusSlice],
    pub vitals: &'a VitalsSeries,
}

impl<'a> DashboardSnapshot<'a> {
    pub fn new(
        data: &'a SampleData,
        vitals: &'a VitalsSeries,
        generated_at: DateTime<Local>,
    ) -> Self {
        Self {
            generated_at,
            devices: device_totals(&data.devices),
            active_alerts: data.metrics.active_alerts,
            patients: data
                .patients
                .iter()
                .map(|patient| ExportedPatient {
                    patient,
                    risk_tier: RiskTier::from_score(patient.risk_score),
                })
                .collect(),
            status_distribution: &data.status_distribution,
            vitals,
        }
    }

    /// Write as pretty-printed JSON.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        debug!(path = %path.display(), "exported dashboard");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ChannelClock;
    use crate::data::VitalsGenerator;
    use chrono::{NaiveDate, TimeZone};
    use tokio::sync::watch;

    fn series() -> VitalsSeries {
        let today = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
        VitalsGenerator::default().generate(30, today, &mut VitalsGenerator::rng(Some(11)))
    }

    fn make_app() -> (watch::Sender<DateTime<Local>>, App) {
        let (tx, clock) = ChannelClock::create("test");
        let app = App::new(
            Arc::new(SampleData::builtin()),
            series(),
            Box::new(clock),
            Theme::dark(),
        )
        .unwrap();
        (tx, app)
    }

    #[test]
    fn first_patient_selected_initially() {
        let (_tx, app) = make_app();
        assert_eq!(app.selected_patient().id, 1);
        assert_eq!(app.selected_index(), 0);
        assert_eq!(app.current_view, View::Patients);
    }

    #[test]
    fn empty_roster_is_rejected() {
        let (_tx, clock) = ChannelClock::create("test");
        let mut data = SampleData::builtin();
        data.patients.clear();
        let result = App::new(Arc::new(data), series(), Box::new(clock), Theme::dark());
        assert!(matches!(result, Err(DashboardError::EmptyRoster)));
    }

    #[test]
    fn selecting_a_new_patient_changes_selection_once() {
        let (_tx, mut app) = make_app();
        let roster_before = app.roster().to_vec();

        assert!(app.select_patient(3).unwrap());
        assert_eq!(app.selected_patient().name, "Sarah Jenkins");

        // Re-selecting is not a change
        assert!(!app.select_patient(3).unwrap());
        assert_eq!(app.selected_patient().id, 3);

        assert_eq!(app.roster(), roster_before.as_slice());
    }

    #[test]
    fn unknown_patient_is_rejected_and_selection_kept() {
        let (_tx, mut app) = make_app();
        app.select_patient(2).unwrap();

        let err = app.select_patient(42).unwrap_err();
        assert!(matches!(err, DashboardError::UnknownPatient(42)));
        assert_eq!(app.selected_patient().id, 2);
    }

    #[test]
    fn navigation_clamps_at_both_ends() {
        let (_tx, mut app) = make_app();

        app.select_prev();
        assert_eq!(app.selected_index(), 0);

        app.select_next();
        app.select_next();
        assert_eq!(app.selected_index(), 2);

        app.select_last();
        assert_eq!(app.selected_index(), 3);
        app.select_next();
        assert_eq!(app.selected_index(), 3);

        app.select_first();
        assert_eq!(app.selected_patient().id, 1);
    }

    #[test]
    fn select_at_ignores_out_of_range() {
        let (_tx, mut app) = make_app();
        assert!(!app.select_at(10));
        assert!(app.select_at(1));
        assert_eq!(app.selected_patient().id, 2);
    }

    #[test]
    fn tick_updates_timestamp_only() {
        let (tx, mut app) = make_app();
        let vitals_before = app.vitals().clone();
        let selected_before = app.selected_index();

        assert!(!app.tick());

        let t = Local.with_ymd_and_hms(2024, 6, 30, 14, 5, 9).unwrap();
        tx.send(t).unwrap();
        assert!(app.tick());
        assert_eq!(app.last_refreshed(), t);

        assert_eq!(app.vitals(), &vitals_before);
        assert_eq!(app.selected_index(), selected_before);
    }

    #[test]
    fn views_cycle_in_both_directions() {
        let (_tx, mut app) = make_app();
        app.next_view();
        assert_eq!(app.current_view, View::Devices);
        app.next_view();
        app.next_view();
        assert_eq!(app.current_view, View::Patients);
        app.prev_view();
        assert_eq!(app.current_view, View::Insights);
    }

    #[test]
    fn status_message_is_visible_immediately() {
        let (_tx, mut app) = make_app();
        assert!(app.get_status_message().is_none());
        app.set_status_message("saved".to_string());
        assert_eq!(app.get_status_message(), Some("saved"));
    }

    #[test]
    fn device_totals_match_inventory() {
        let (_tx, app) = make_app();
        let totals = app.device_totals();
        assert_eq!(totals.total, 464);
        assert_eq!(totals.online, 431);
    }

    #[test]
    fn export_writes_patients_and_vitals() {
        let (_tx, app) = make_app();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.json");

        app.export_state(&path).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["devices"]["total"], 464);
        assert_eq!(json["patients"].as_array().unwrap().len(), 4);
        assert_eq!(json["patients"][0]["name"], "Margaret Thompson");
        assert_eq!(json["patients"][0]["risk_tier"], "high");
        assert_eq!(json["vitals"]["samples"].as_array().unwrap().len(), 31);
    }

    #[test]
    fn shutdown_is_repeatable() {
        let (_tx, mut app) = make_app();
        app.shutdown();
        app.shutdown();
    }
}
