//! Core record types shared by the selectors, stores and presenters.
//!
//! Field names on the wire match the hosted document store (`isOn`,
//! `userID`, `vehicleID`, ...) so that documents round-trip unchanged.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

/// Document store collection names.
pub mod collection {
    pub const ALERTS: &str = "alerts";
    pub const ODOMETER_READINGS: &str = "odometer_readings";
    pub const VEHICLES: &str = "vehicles";
}

/// Document store field names used as query predicates.
pub mod field {
    pub const ID: &str = "id";
    pub const IS_ON: &str = "isOn";
    pub const CREATED_AT: &str = "createdAt";
    pub const USER_ID: &str = "userID";
    pub const DATE: &str = "date";
}

/// Public repository page, used when a contributor has no usable profile link.
pub const PROJECT_REPOSITORY_URL: &str = "https://github.com/mikaelacaron/Basic-Car-Maintenance";

const KILOMETRES_PER_MILE: f64 = 1.609344;

// ---- Alerts ----

/// An in-app announcement published to every user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertItem {
    pub id: String,
    pub is_on: bool,
    pub created_at: DateTime<Utc>,
    pub title: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alert_icon: Option<String>,
}

// ---- Odometer ----

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OdometerReading {
    pub id: String,
    #[serde(rename = "userID")]
    pub user_id: String,
    pub date: DateTime<Utc>,
    pub distance: i64,
    #[serde(rename = "isMetric")]
    pub is_metric: bool,
    #[serde(rename = "vehicleID")]
    pub vehicle_id: String,
}

impl OdometerReading {
    /// Unit system the distance was recorded in.
    pub fn unit(&self) -> MeasurementSystem {
        if self.is_metric {
            MeasurementSystem::Metric
        } else {
            MeasurementSystem::Imperial
        }
    }

    /// Distance expressed in `system`, rounded to a whole unit.
    pub fn distance_in(&self, system: MeasurementSystem) -> i64 {
        match (self.unit(), system) {
            (MeasurementSystem::Metric, MeasurementSystem::Imperial) => {
                (self.distance as f64 / KILOMETRES_PER_MILE).round() as i64
            }
            (MeasurementSystem::Imperial, MeasurementSystem::Metric) => {
                (self.distance as f64 * KILOMETRES_PER_MILE).round() as i64
            }
            _ => self.distance,
        }
    }
}

// ---- Vehicles ----

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: String,
    #[serde(rename = "userID", default)]
    pub user_id: Option<String>,
    pub name: String,
    pub make: String,
    pub model: String,
    #[serde(default)]
    pub year: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub vin: Option<String>,
    #[serde(default)]
    pub license_plate_number: Option<String>,
}

/// Display strings for the vehicle detail screen. Missing optional
/// fields render as empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VehicleDetails {
    pub name: String,
    pub make: String,
    pub model: String,
    pub year: String,
    pub color: String,
    pub vin: String,
    pub license_plate_number: String,
}

impl From<&Vehicle> for VehicleDetails {
    fn from(vehicle: &Vehicle) -> Self {
        Self {
            name: vehicle.name.clone(),
            make: vehicle.make.clone(),
            model: vehicle.model.clone(),
            year: vehicle.year.clone().unwrap_or_default(),
            color: vehicle.color.clone().unwrap_or_default(),
            vin: vehicle.vin.clone().unwrap_or_default(),
            license_plate_number: vehicle.license_plate_number.clone().unwrap_or_default(),
        }
    }
}

impl VehicleDetails {
    /// `(header, value)` pairs in display order.
    pub fn sections(&self) -> [(&'static str, &str); 7] {
        [
            ("Name", &self.name),
            ("Make", &self.make),
            ("Model", &self.model),
            ("Year", &self.year),
            ("Color", &self.color),
            ("VIN", &self.vin),
            ("License Plate Number", &self.license_plate_number),
        ]
    }
}

// ---- Contributors ----

/// A GitHub contributor as returned by the REST API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contributor {
    pub login: String,
    pub id: u64,
    pub node_id: String,
    pub avatar_url: String,
    pub url: String,
    pub html_url: String,
    pub contributions: u32,
}

impl Contributor {
    /// Profile page, or the project repository when `html_url` is unusable.
    pub fn profile_url(&self) -> &str {
        match Url::parse(&self.html_url) {
            Ok(_) => &self.html_url,
            Err(_) => PROJECT_REPOSITORY_URL,
        }
    }

    pub fn contributions_label(&self) -> String {
        match self.contributions {
            1 => "1 contribution".to_string(),
            n => format!("{} contributions", n),
        }
    }
}

/// Sort contributors by contribution count, most first. Equal counts are
/// ordered by login so the listing is stable between fetches.
pub fn sort_contributors(contributors: &mut [Contributor]) {
    contributors.sort_by(|a, b| {
        b.contributions
            .cmp(&a.contributions)
            .then_with(|| a.login.cmp(&b.login))
    });
}

// ---- Settings ----

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeasurementSystem {
    Imperial,
    Metric,
}

impl MeasurementSystem {
    pub const ALL: [MeasurementSystem; 2] = [MeasurementSystem::Imperial, MeasurementSystem::Metric];

    pub fn id(&self) -> &'static str {
        match self {
            MeasurementSystem::Imperial => "imperial",
            MeasurementSystem::Metric => "metric",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            MeasurementSystem::Imperial => "Imperial",
            MeasurementSystem::Metric => "Metric",
        }
    }

    /// Default for a locale's measurement system (`"us"`, `"uk"`,
    /// `"metric"`). Only the US defaults to imperial.
    pub fn user_default(locale_system: Option<&str>) -> Self {
        match locale_system.map(str::to_ascii_lowercase).as_deref() {
            Some("us") => MeasurementSystem::Imperial,
            _ => MeasurementSystem::Metric,
        }
    }
}

/// Selection horizon for the odometer chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TimeRange {
    #[default]
    All,
    Last30Days,
}

impl TimeRange {
    pub const ALL_CASES: [TimeRange; 2] = [TimeRange::All, TimeRange::Last30Days];

    pub fn label(&self) -> &'static str {
        match self {
            TimeRange::All => "All readings",
            TimeRange::Last30Days => "Latest readings",
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TimeRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(TimeRange::All),
            "last30days" | "last-30-days" => Ok(TimeRange::Last30Days),
            other => Err(format!(
                "Invalid time range '{}'. Must be one of: all, last30days",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn reading(distance: i64, is_metric: bool) -> OdometerReading {
        OdometerReading {
            id: "r1".into(),
            user_id: "u1".into(),
            date: Utc.with_ymd_and_hms(2024, 11, 30, 0, 0, 0).unwrap(),
            distance,
            is_metric,
            vehicle_id: "v1".into(),
        }
    }

    fn contributor(login: &str, contributions: u32) -> Contributor {
        Contributor {
            login: login.into(),
            id: 1,
            node_id: String::new(),
            avatar_url: String::new(),
            url: String::new(),
            html_url: format!("https://github.com/{}", login),
            contributions,
        }
    }

    // ---- wire names ----

    #[test]
    fn alert_item_uses_document_field_names() {
        let value = json!({
            "id": "a1",
            "isOn": true,
            "createdAt": "2024-12-01T10:00:00Z",
            "title": "New feature",
            "message": "Odometer charts are here",
            "actionText": "Try it",
        });

        let alert: AlertItem = serde_json::from_value(value).unwrap();
        assert!(alert.is_on);
        assert_eq!(alert.action_text.as_deref(), Some("Try it"));
        assert_eq!(alert.alert_icon, None);

        let back = serde_json::to_value(&alert).unwrap();
        assert_eq!(back["isOn"], json!(true));
        assert!(back.get("alertIcon").is_none());
    }

    #[test]
    fn reading_uses_document_field_names() {
        let value = serde_json::to_value(reading(1000, false)).unwrap();
        assert_eq!(value["userID"], json!("u1"));
        assert_eq!(value["vehicleID"], json!("v1"));
        assert_eq!(value["isMetric"], json!(false));
    }

    #[test]
    fn vehicle_optional_fields_may_be_absent() {
        let vehicle: Vehicle = serde_json::from_value(json!({
            "id": "v1",
            "name": "My Car",
            "make": "Ford",
            "model": "F-150",
            "licensePlateNumber": "ABC123",
        }))
        .unwrap();

        assert_eq!(vehicle.user_id, None);
        assert_eq!(vehicle.year, None);
        assert_eq!(vehicle.license_plate_number.as_deref(), Some("ABC123"));
    }

    // ---- units ----

    #[test]
    fn distance_is_unchanged_in_its_own_unit() {
        assert_eq!(reading(1000, true).distance_in(MeasurementSystem::Metric), 1000);
        assert_eq!(reading(1000, false).distance_in(MeasurementSystem::Imperial), 1000);
    }

    #[test]
    fn distance_converts_between_units() {
        assert_eq!(reading(100, false).distance_in(MeasurementSystem::Metric), 161);
        assert_eq!(reading(161, true).distance_in(MeasurementSystem::Imperial), 100);
    }

    #[test]
    fn user_default_is_imperial_only_for_us() {
        assert_eq!(MeasurementSystem::user_default(Some("us")), MeasurementSystem::Imperial);
        assert_eq!(MeasurementSystem::user_default(Some("UK")), MeasurementSystem::Metric);
        assert_eq!(MeasurementSystem::user_default(Some("metric")), MeasurementSystem::Metric);
        assert_eq!(MeasurementSystem::user_default(None), MeasurementSystem::Metric);
    }

    // ---- vehicle details ----

    #[test]
    fn vehicle_details_blank_out_missing_fields() {
        let vehicle = Vehicle {
            id: "v1".into(),
            user_id: None,
            name: "My Car".into(),
            make: "Ford".into(),
            model: "F-150".into(),
            year: Some("2020".into()),
            color: None,
            vin: None,
            license_plate_number: Some("ABC123".into()),
        };

        let details = VehicleDetails::from(&vehicle);
        assert_eq!(details.year, "2020");
        assert_eq!(details.color, "");
        assert_eq!(details.vin, "");
        assert_eq!(details.sections()[6], ("License Plate Number", "ABC123"));
    }

    // ---- contributors ----

    #[test]
    fn contributions_label_is_pluralised() {
        assert_eq!(contributor("a", 1).contributions_label(), "1 contribution");
        assert_eq!(contributor("a", 0).contributions_label(), "0 contributions");
        assert_eq!(contributor("a", 42).contributions_label(), "42 contributions");
    }

    #[test]
    fn profile_url_falls_back_to_repository() {
        let mut broken = contributor("a", 1);
        broken.html_url = "not a url".into();
        assert_eq!(broken.profile_url(), PROJECT_REPOSITORY_URL);

        assert_eq!(
            contributor("octocat", 1).profile_url(),
            "https://github.com/octocat"
        );
    }

    #[test]
    fn contributors_sort_by_count_then_login() {
        let mut list = vec![
            contributor("zed", 5),
            contributor("amy", 12),
            contributor("bob", 5),
        ];
        sort_contributors(&mut list);

        let logins: Vec<_> = list.iter().map(|c| c.login.as_str()).collect();
        assert_eq!(logins, ["amy", "bob", "zed"]);
    }

    // ---- time range ----

    #[test]
    fn time_range_parses_cli_values() {
        assert_eq!("all".parse::<TimeRange>().unwrap(), TimeRange::All);
        assert_eq!("Last30Days".parse::<TimeRange>().unwrap(), TimeRange::Last30Days);
        assert_eq!("last-30-days".parse::<TimeRange>().unwrap(), TimeRange::Last30Days);
        assert!("week".parse::<TimeRange>().is_err());
    }

    #[test]
    fn time_range_labels_match_picker() {
        assert_eq!(TimeRange::All.to_string(), "All readings");
        assert_eq!(TimeRange::Last30Days.label(), "Latest readings");
        assert_eq!(TimeRange::default(), TimeRange::All);
    }
}
