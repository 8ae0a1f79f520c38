//! Odometer reading selection for the chart and list.

pub mod filter;

pub use filter::{chart_series, filter_readings, vehicle_name_for, VehicleSeries, RECENT_WINDOW_DAYS};
