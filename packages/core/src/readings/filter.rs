//! Per-vehicle reading selection.
//!
//! `Last30Days` never leaves a vehicle's chart empty just because it has
//! not been driven recently: when every reading is older than the window,
//! the latest reading alone is shown.

use chrono::{DateTime, Duration, Utc};

use crate::models::{OdometerReading, TimeRange, Vehicle};

/// Width of the `Last30Days` window.
pub const RECENT_WINDOW_DAYS: i64 = 30;

/// One vehicle's line on the odometer chart.
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleSeries {
    pub vehicle_id: String,
    pub vehicle_name: String,
    pub readings: Vec<OdometerReading>,
}

/// Readings belonging to `vehicle` that fall in `window`, input order kept.
///
/// When the window is `Last30Days` and even the newest reading predates
/// `now - 30 days`, a singleton holding the newest reading is returned.
/// If several readings share that newest date the first one in input
/// order is used.
pub fn filter_readings(
    all_readings: &[OdometerReading],
    vehicle: &Vehicle,
    window: TimeRange,
    now: DateTime<Utc>,
) -> Vec<OdometerReading> {
    let vehicle_readings = all_readings
        .iter()
        .filter(|r| r.vehicle_id == vehicle.id);

    match window {
        TimeRange::All => vehicle_readings.cloned().collect(),
        TimeRange::Last30Days => {
            let mut latest: Option<&OdometerReading> = None;
            for reading in vehicle_readings.clone() {
                // strict comparison keeps the first of equal dates
                if latest.map_or(true, |l| reading.date > l.date) {
                    latest = Some(reading);
                }
            }

            let Some(latest) = latest else {
                return Vec::new();
            };

            let cutoff = now - Duration::days(RECENT_WINDOW_DAYS);

            if latest.date < cutoff {
                vec![latest.clone()]
            } else {
                vehicle_readings
                    .filter(|r| r.date >= cutoff)
                    .cloned()
                    .collect()
            }
        }
    }
}

/// Chart series for every vehicle, in vehicle order. Vehicles with nothing
/// to plot are left out.
pub fn chart_series(
    all_readings: &[OdometerReading],
    vehicles: &[Vehicle],
    window: TimeRange,
    now: DateTime<Utc>,
) -> Vec<VehicleSeries> {
    vehicles
        .iter()
        .filter_map(|vehicle| {
            let readings = filter_readings(all_readings, vehicle, window, now);
            if readings.is_empty() {
                return None;
            }
            Some(VehicleSeries {
                vehicle_id: vehicle.id.clone(),
                vehicle_name: vehicle.name.clone(),
                readings,
            })
        })
        .collect()
}

/// Name of the vehicle a reading belongs to, if that vehicle is known.
pub fn vehicle_name_for<'a>(reading: &OdometerReading, vehicles: &'a [Vehicle]) -> Option<&'a str> {
    vehicles
        .iter()
        .find(|v| v.id == reading.vehicle_id)
        .map(|v| v.name.as_str())
}
