//! Synthetic vital-sign series.
//!
//! Each field of a [`VitalsSample`] is drawn independently from a uniform
//! distribution on `[center - spread, center + spread]`. There is no
//! smoothing and no correlation between days or fields.

use std::ops::RangeInclusive;

use chrono::{Days, Local, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, Result};

/// Default number of days before today covered by a series.
pub const DEFAULT_WINDOW_DAYS: u16 = 30;

/// One day's set of synthetic measurements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VitalsSample {
    pub date: NaiveDate,
    pub systolic: f64,
    pub diastolic: f64,
    pub heart_rate: f64,
    pub temperature: f64,
    pub weight: f64,
    pub oxygen_sat: f64,
    pub glucose: f64,
}

impl VitalsSample {
    /// Value of a single field.
    pub fn get(&self, field: VitalField) -> f64 {
        match field {
            VitalField::Systolic => self.systolic,
            VitalField::Diastolic => self.diastolic,
            VitalField::HeartRate => self.heart_rate,
            VitalField::Temperature => self.temperature,
            VitalField::Weight => self.weight,
            VitalField::OxygenSat => self.oxygen_sat,
            VitalField::Glucose => self.glucose,
        }
    }
}

/// The measured quantities in a [`VitalsSample`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VitalField {
    Systolic,
    Diastolic,
    HeartRate,
    Temperature,
    Weight,
    OxygenSat,
    Glucose,
}

impl VitalField {
    pub const ALL: [VitalField; 7] = [
        VitalField::Systolic,
        VitalField::Diastolic,
        VitalField::HeartRate,
        VitalField::Temperature,
        VitalField::Weight,
        VitalField::OxygenSat,
        VitalField::Glucose,
    ];

    /// Fields drawn on the trend chart.
    pub const CHARTED: [VitalField; 4] = [
        VitalField::Systolic,
        VitalField::Diastolic,
        VitalField::HeartRate,
        VitalField::OxygenSat,
    ];

    /// Legend label.
    pub fn label(&self) -> &'static str {
        match self {
            VitalField::Systolic => "Systolic BP",
            VitalField::Diastolic => "Diastolic BP",
            VitalField::HeartRate => "Heart Rate",
            VitalField::Temperature => "Temperature",
            VitalField::Weight => "Weight",
            VitalField::OxygenSat => "O2 Saturation",
            VitalField::Glucose => "Glucose",
        }
    }

    /// Configuration key.
    pub fn key(&self) -> &'static str {
        match self {
            VitalField::Systolic => "systolic",
            VitalField::Diastolic => "diastolic",
            VitalField::HeartRate => "heart_rate",
            VitalField::Temperature => "temperature",
            VitalField::Weight => "weight",
            VitalField::OxygenSat => "oxygen_sat",
            VitalField::Glucose => "glucose",
        }
    }
}

/// Center and half-width of a uniform draw.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Baseline {
    pub center: f64,
    pub spread: f64,
}

impl Baseline {
    pub const fn new(center: f64, spread: f64) -> Self {
        Self { center, spread }
    }

    /// The closed interval values are drawn from.
    pub fn range(&self) -> RangeInclusive<f64> {
        (self.center - self.spread)..=(self.center + self.spread)
    }

    /// Draw one value.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> f64 {
        rng.gen_range(self.range())
    }
}

/// Baselines for every field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VitalBaselines {
    pub systolic: Baseline,
    pub diastolic: Baseline,
    pub heart_rate: Baseline,
    pub temperature: Baseline,
    pub weight: Baseline,
    pub oxygen_sat: Baseline,
    pub glucose: Baseline,
}

impl Default for VitalBaselines {
    fn default() -> Self {
        Self {
            systolic: Baseline::new(120.0, 20.0),
            diastolic: Baseline::new(80.0, 10.0),
            heart_rate: Baseline::new(70.0, 15.0),
            temperature: Baseline::new(36.5, 1.0),
            weight: Baseline::new(70.0, 5.0),
            oxygen_sat: Baseline::new(97.5, 2.5),
            glucose: Baseline::new(90.0, 20.0),
        }
    }
}

impl VitalBaselines {
    /// Baseline for a single field.
    pub fn get(&self, field: VitalField) -> Baseline {
        match field {
            VitalField::Systolic => self.systolic,
            VitalField::Diastolic => self.diastolic,
            VitalField::HeartRate => self.heart_rate,
            VitalField::Temperature => self.temperature,
            VitalField::Weight => self.weight,
            VitalField::OxygenSat => self.oxygen_sat,
            VitalField::Glucose => self.glucose,
        }
    }

    /// Reject baselines a uniform draw cannot use.
    pub fn validate(&self) -> Result<()> {
        for field in VitalField::ALL {
            let Baseline { center, spread } = self.get(field);
            if !center.is_finite() {
                return Err(DashboardError::InvalidCenter {
                    field: field.key(),
                    center,
                });
            }
            // Both ends must stay finite, and the width needs headroom below
            // f64::MAX because the sampler scales it up slightly
            let valid = spread.is_finite()
                && spread >= 0.0
                && (center - spread).is_finite()
                && (center + spread).is_finite()
                && (4.0 * spread).is_finite();
            if !valid {
                return Err(DashboardError::InvalidSpread {
                    field: field.key(),
                    spread,
                });
            }
        }
        Ok(())
    }
}

/// An ordered run of daily samples ending today.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VitalsSeries {
    pub samples: Vec<VitalsSample>,
}

impl VitalsSeries {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Most recent sample.
    pub fn latest(&self) -> Option<&VitalsSample> {
        self.samples.last()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.samples.first().map(|s| s.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.samples.last().map(|s| s.date)
    }

    /// Chart points for one field, x being the day index.
    pub fn points(&self, field: VitalField) -> Vec<(f64, f64)> {
        self.samples
            .iter()
            .enumerate()
            .map(|(i, s)| (i as f64, s.get(field)))
            .collect()
    }

    /// Min and max across the given fields, or `None` for an empty series.
    pub fn bounds(&self, fields: &[VitalField]) -> Option<(f64, f64)> {
        let mut values = self
            .samples
            .iter()
            .flat_map(|s| fields.iter().map(move |f| s.get(*f)));
        let first = values.next()?;
        Some(values.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
    }
}

/// Produces [`VitalsSeries`] from a set of baselines.
#[derive(Debug, Clone, Default)]
pub struct VitalsGenerator {
    baselines: VitalBaselines,
}

impl VitalsGenerator {
    pub fn new(baselines: VitalBaselines) -> Self {
        Self { baselines }
    }

    pub fn baselines(&self) -> &VitalBaselines {
        &self.baselines
    }

    /// Build a random source: seeded when a seed is given, from entropy otherwise.
    pub fn rng(seed: Option<u64>) -> StdRng {
        match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// Generate `window + 1` daily samples from `today - window` to `today`.
    pub fn generate<R: Rng>(
        &self,
        window: u16,
        today: NaiveDate,
        rng: &mut R,
    ) -> VitalsSeries {
        let start = today - Days::new(u64::from(window));
        let samples = start
            .iter_days()
            .take(usize::from(window) + 1)
            .map(|date| self.sample_day(date, rng))
            .collect();
        VitalsSeries { samples }
    }

    fn sample_day<R: Rng>(&self, date: NaiveDate, rng: &mut R) -> VitalsSample {
        let b = &self.baselines;
        VitalsSample {
            date,
            systolic: b.systolic.sample(rng),
            diastolic: b.diastolic.sample(rng),
            heart_rate: b.heart_rate.sample(rng),
            temperature: b.temperature.sample(rng),
            weight: b.weight.sample(rng),
            oxygen_sat: b.oxygen_sat.sample(rng),
            glucose: b.glucose.sample(rng),
        }
    }
}

/// Generate a series ending on the local date with default baselines and an
/// entropy-seeded source. Two calls return different values.
pub fn generate_vitals(window: u16) -> VitalsSeries {
    let mut rng = VitalsGenerator::rng(None);
    VitalsGenerator::default().generate(window, Local::now().date_naive(), &mut rng)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    #[test]
    fn window_produces_n_plus_one_samples() {
        let generator = VitalsGenerator::default();
        let mut rng = VitalsGenerator::rng(Some(7));
        for window in [0u16, 1, 2, 30, 365] {
            let series = generator.generate(window, today(), &mut rng);
            assert_eq!(series.len(), usize::from(window) + 1);
        }
    }

    #[test]
    fn zero_window_is_just_today() {
        let generator = VitalsGenerator::default();
        let mut rng = VitalsGenerator::rng(Some(1));
        let series = generator.generate(0, today(), &mut rng);
        assert_eq!(series.first_date(), Some(today()));
        assert_eq!(series.last_date(), Some(today()));
    }

    #[test]
    fn dates_are_consecutive_and_end_today() {
        let generator = VitalsGenerator::default();
        let mut rng = VitalsGenerator::rng(Some(3));
        let series = generator.generate(30, today(), &mut rng);

        assert_eq!(series.last_date(), Some(today()));
        // 2024 is a leap year: 30 days before March 1st is January 31st
        assert_eq!(series.first_date(), NaiveDate::from_ymd_opt(2024, 1, 31));

        for pair in series.samples.windows(2) {
            assert_eq!(pair[0].date.succ_opt(), Some(pair[1].date));
        }
    }

    #[test]
    fn every_field_stays_within_its_range() {
        let generator = VitalsGenerator::default();
        let mut rng = VitalsGenerator::rng(Some(42));
        let series = generator.generate(500, today(), &mut rng);

        for sample in &series.samples {
            for field in VitalField::ALL {
                let range = generator.baselines().get(field).range();
                let value = sample.get(field);
                assert!(
                    range.contains(&value),
                    "{} = {} outside {:?}",
                    field.label(),
                    value,
                    range
                );
            }
        }
    }

    #[test]
    fn documented_ranges() {
        let b = VitalBaselines::default();
        assert_eq!(b.systolic.range(), 100.0..=140.0);
        assert_eq!(b.diastolic.range(), 70.0..=90.0);
        assert_eq!(b.heart_rate.range(), 55.0..=85.0);
        assert_eq!(b.oxygen_sat.range(), 95.0..=100.0);
        assert_eq!(b.glucose.range(), 70.0..=110.0);
    }

    #[test]
    fn seeded_generation_is_deterministic() {
        let generator = VitalsGenerator::default();
        let a = generator.generate(30, today(), &mut VitalsGenerator::rng(Some(99)));
        let b = generator.generate(30, today(), &mut VitalsGenerator::rng(Some(99)));
        assert_eq!(a, b);
    }

    #[test]
    fn unseeded_generation_differs_between_calls() {
        let a = generate_vitals(30);
        let b = generate_vitals(30);

        assert_eq!(a.len(), b.len());
        assert_eq!(a.first_date(), b.first_date());
        assert_eq!(a.last_date(), b.last_date());
        assert_ne!(a.samples, b.samples);
    }

    #[test]
    fn zero_spread_yields_the_center() {
        let mut baselines = VitalBaselines::default();
        baselines.weight = Baseline::new(72.5, 0.0);
        let generator = VitalsGenerator::new(baselines);
        let series = generator.generate(5, today(), &mut VitalsGenerator::rng(Some(5)));
        assert!(series.samples.iter().all(|s| s.weight == 72.5));
    }

    #[test]
    fn validate_rejects_negative_spread() {
        let mut baselines = VitalBaselines::default();
        baselines.glucose.spread = -1.0;
        assert!(matches!(
            baselines.validate(),
            Err(DashboardError::InvalidSpread { field: "glucose", .. })
        ));
    }

    #[test]
    fn validate_rejects_nan_spread() {
        let mut baselines = VitalBaselines::default();
        baselines.temperature.spread = f64::NAN;
        assert!(baselines.validate().is_err());
    }

    #[test]
    fn validate_rejects_spread_with_infinite_width() {
        let mut baselines = VitalBaselines::default();
        baselines.glucose = Baseline::new(0.0, 1e308);
        assert!(matches!(
            baselines.validate(),
            Err(DashboardError::InvalidSpread { field: "glucose", .. })
        ));
    }

    #[test]
    fn validate_rejects_range_overflowing_at_the_top() {
        let mut baselines = VitalBaselines::default();
        baselines.weight = Baseline::new(f64::MAX, f64::MAX / 2.0);
        assert!(matches!(
            baselines.validate(),
            Err(DashboardError::InvalidSpread { field: "weight", .. })
        ));
    }

    #[test]
    fn validate_reports_bad_center_separately() {
        let mut baselines = VitalBaselines::default();
        baselines.heart_rate.center = f64::INFINITY;
        assert!(matches!(
            baselines.validate(),
            Err(DashboardError::InvalidCenter { field: "heart_rate", .. })
        ));
    }

    #[test]
    fn validated_extreme_baseline_generates_without_panicking() {
        let mut baselines = VitalBaselines::default();
        baselines.glucose = Baseline::new(0.0, 1e307);
        assert!(baselines.validate().is_ok());

        let series = VitalsGenerator::new(baselines).generate(
            3,
            today(),
            &mut VitalsGenerator::rng(Some(1)),
        );
        assert_eq!(series.len(), 4);
        assert!(series.samples.iter().all(|s| s.glucose.abs() <= 1e307));
    }

    #[test]
    fn points_are_indexed_by_day() {
        let generator = VitalsGenerator::default();
        let series = generator.generate(3, today(), &mut VitalsGenerator::rng(Some(2)));
        let points = series.points(VitalField::HeartRate);
        assert_eq!(points.len(), 4);
        assert_eq!(points[0].0, 0.0);
        assert_eq!(points[3].0, 3.0);
        assert_eq!(points[2].1, series.samples[2].heart_rate);
    }

    #[test]
    fn bounds_cover_all_requested_fields() {
        let generator = VitalsGenerator::default();
        let series = generator.generate(10, today(), &mut VitalsGenerator::rng(Some(8)));
        let (lo, hi) = series.bounds(&VitalField::CHARTED).unwrap();
        for sample in &series.samples {
            for field in VitalField::CHARTED {
                assert!(sample.get(field) >= lo && sample.get(field) <= hi);
            }
        }
        assert!(VitalsSeries::default().bounds(&VitalField::CHARTED).is_none());
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let generator = VitalsGenerator::default();
        let series = generator.generate(0, today(), &mut VitalsGenerator::rng(Some(0)));
        let json = serde_json::to_value(&series.samples[0]).unwrap();
        assert_eq!(json["date"], "2024-03-01");
        assert!(json.get("heartRate").is_some());
        assert!(json.get("oxygenSat").is_some());
    }
}
