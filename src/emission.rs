//! Yearly gas emission data for the volcano map.
//!
//! Map features carry one property per year (`"2018": 1520.0`). Markers are
//! sized on a log scale so that small and very large emitters both stay
//! readable.

use serde_json::{Map, Value};
use std::ops::RangeInclusive;

/// First year with emission data.
pub const FIRST_YEAR: u16 = 2005;
/// Last year with emission data.
pub const LAST_YEAR: u16 = 2023;

/// Reference values drawn in the map legend.
pub const LEGEND_VALUES: [f64; 4] = [10.0, 100.0, 1_000.0, 10_000.0];

/// Marker sizing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RadiusOptions {
    /// Radius of a marker with no emission.
    pub min_radius: f64,
    /// Radius added per decade of emission.
    pub scale: f64,
}

impl Default for RadiusOptions {
    fn default() -> Self {
        Self {
            min_radius: 4.0,
            scale: 3.0,
        }
    }
}

/// Numeric value of a JSON property, or 0 when it has none.
///
/// Numbers and numeric strings count, `true` is 1, everything else is 0.
pub fn property_value(value: Option<&Value>) -> f64 {
    let v = match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => {
            let s = s.trim();
            if s.is_empty() {
                0.0
            } else {
                s.parse::<f64>().unwrap_or(0.0)
            }
        }
        Some(Value::Bool(true)) => 1.0,
        _ => 0.0,
    };
    if v.is_finite() {
        v
    } else {
        0.0
    }
}

/// Emission for `year` from a feature's properties.
pub fn emission_for(props: &Map<String, Value>, year: u16) -> f64 {
    property_value(props.get(&year.to_string()))
}

/// Marker radius: `min_radius + scale * log10(value + 1)`.
///
/// Values that make the logarithm undefined (below -1) fall back to the
/// minimum radius.
pub fn emission_radius(props: &Map<String, Value>, year: u16, opts: &RadiusOptions) -> f64 {
    let value = emission_for(props, year);
    let radius = opts.min_radius + opts.scale * (value + 1.0).log10();
    if radius.is_finite() {
        radius
    } else {
        opts.min_radius
    }
}

/// Short label for an emission value: `950`, `1.5k`, `2M`.
pub fn format_emission(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if value >= 1_000_000.0 {
        return format!("{}M", one_decimal(value / 1_000_000.0));
    }
    if value >= 1_000.0 {
        return format!("{}k", one_decimal(value / 1_000.0));
    }
    format!("{}", value.round())
}

/// One decimal place, with a trailing `.0` dropped.
fn one_decimal(v: f64) -> String {
    let s = format!("{:.1}", v);
    match s.strip_suffix(".0") {
        Some(whole) => whole.to_string(),
        None => s,
    }
}

/// Selected year on the map's time slider.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct YearCursor {
    year: u16,
}

impl YearCursor {
    pub fn new(year: u16) -> Self {
        let mut cursor = Self { year: FIRST_YEAR };
        cursor.set(year);
        cursor
    }

    pub fn year(&self) -> u16 {
        self.year
    }

    pub fn range() -> RangeInclusive<u16> {
        FIRST_YEAR..=LAST_YEAR
    }

    /// Jump to `year`, clamped to the data range.
    pub fn set(&mut self, year: u16) {
        self.year = year.clamp(FIRST_YEAR, LAST_YEAR);
    }

    /// Step forward one year, wrapping from the last year to the first.
    pub fn advance(&mut self) -> u16 {
        self.year = if self.year >= LAST_YEAR {
            FIRST_YEAR
        } else {
            self.year + 1
        };
        self.year
    }
}

impl Default for YearCursor {
    fn default() -> Self {
        Self::new(FIRST_YEAR)
    }
}

/// One volcano's emissions over the whole data range, for its chart.
#[derive(Clone, Debug, PartialEq)]
pub struct EmissionSeries {
    points: Vec<(u16, f64)>,
}

impl EmissionSeries {
    pub fn from_properties(props: &Map<String, Value>) -> Self {
        let points = YearCursor::range()
            .map(|year| (year, emission_for(props, year)))
            .collect();
        Self { points }
    }

    pub fn points(&self) -> &[(u16, f64)] {
        &self.points
    }

    pub fn value(&self, year: u16) -> Option<f64> {
        self.points.iter().find(|(y, _)| *y == year).map(|(_, v)| *v)
    }

    /// Largest value, never below 1 so it can be used as a divisor.
    pub fn max(&self) -> f64 {
        self.points.iter().map(|(_, v)| *v).fold(1.0, f64::max)
    }

    /// Each value divided by [`EmissionSeries::max`].
    pub fn normalized(&self) -> Vec<(u16, f64)> {
        let max = self.max();
        self.points.iter().map(|&(y, v)| (y, v / max)).collect()
    }

    /// Years to label on the chart's x axis, about six of them.
    pub fn tick_years(&self) -> Vec<u16> {
        let step = self.points.len().div_ceil(6).max(1);
        self.points.iter().step_by(step).map(|(y, _)| *y).collect()
    }
}

/// What the map's info panel shows for a selected volcano.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Place {
    /// `"Mayon, Philippines"`, or `"Unknown place"` without a display name.
    pub title: String,
    pub name: Option<String>,
    pub observatory: String,
    /// `"2462 m"`, or `"Unknown altitude"`.
    pub altitude: String,
}

impl Place {
    pub fn from_properties(props: &Map<String, Value>) -> Self {
        let title = match (text(props.get("display_name")), text(props.get("country"))) {
            (Some(name), Some(country)) => format!("{}, {}", name, country),
            (Some(name), None) => name,
            (None, _) => "Unknown place".to_string(),
        };
        let altitude = match props.get("alt_masl") {
            Some(v) if property_value(Some(v)) != 0.0 => text(Some(v)).map(|a| format!("{} m", a)),
            _ => None,
        };
        Self {
            title,
            name: text(props.get("name")),
            observatory: text(props.get("observatory"))
                .unwrap_or_else(|| "Unknown observatory".to_string()),
            altitude: altitude.unwrap_or_else(|| "Unknown altitude".to_string()),
        }
    }
}

/// Trimmed, non-empty text of a string or number property.
fn text(value: Option<&Value>) -> Option<String> {
    let s = match value? {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    (!s.is_empty()).then_some(s)
}

/// Name a feature is listed under in the volcano picker.
pub fn volcano_name(props: &Map<String, Value>) -> Option<String> {
    text(props.get("display_name"))
}

/// Picker entries: every named feature once, sorted case-insensitively.
pub fn volcano_names<'a, I>(features: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a Map<String, Value>>,
{
    let mut names: Vec<String> = features.into_iter().filter_map(volcano_name).collect();
    names.sort_by(|a, b| a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(b)));
    names.dedup();
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn props(value: Value) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("2018".to_string(), value);
        map
    }

    #[test]
    fn test_radius_of_zero_is_minimum() {
        let opts = RadiusOptions::default();
        assert_eq!(emission_radius(&props(json!(0)), 2018, &opts), 4.0);
        assert_eq!(emission_radius(&Map::new(), 2018, &opts), 4.0);
        assert_eq!(emission_radius(&props(Value::Null), 2018, &opts), 4.0);
        assert_eq!(emission_radius(&props(json!("n/a")), 2018, &opts), 4.0);
    }

    #[test]
    fn test_radius_log_scale() {
        let opts = RadiusOptions::default();
        let r = emission_radius(&props(json!(10)), 2018, &opts);
        assert!((r - (4.0 + 3.0 * 11f64.log10())).abs() < 1e-12);
        let r = emission_radius(&props(json!("10")), 2018, &opts);
        assert!((r - (4.0 + 3.0 * 11f64.log10())).abs() < 1e-12);
    }

    #[test]
    fn test_radius_below_log_domain() {
        let opts = RadiusOptions::default();
        assert_eq!(emission_radius(&props(json!(-5)), 2018, &opts), 4.0);
    }

    #[test]
    fn test_format() {
        assert_eq!(format_emission(0.0), "0");
        assert_eq!(format_emission(950.4), "950");
        assert_eq!(format_emission(1_000.0), "1k");
        assert_eq!(format_emission(1_540.0), "1.5k");
        assert_eq!(format_emission(2_000_000.0), "2M");
        assert_eq!(format_emission(12_340_000.0), "12.3M");
    }

    #[test]
    fn test_year_cursor_wraps() {
        let mut cursor = YearCursor::new(2022);
        assert_eq!(cursor.advance(), 2023);
        assert_eq!(cursor.advance(), 2005);
        cursor.set(1990);
        assert_eq!(cursor.year(), FIRST_YEAR);
    }

    #[test]
    fn test_series() {
        let mut map = Map::new();
        map.insert("2005".to_string(), json!(50));
        map.insert("2010".to_string(), json!("200"));
        let series = EmissionSeries::from_properties(&map);
        assert_eq!(series.points().len(), 19);
        assert_eq!(series.value(2010), Some(200.0));
        assert_eq!(series.value(2011), Some(0.0));
        assert_eq!(series.max(), 200.0);
        assert_eq!(series.tick_years()[0], 2005);

        let empty = EmissionSeries::from_properties(&Map::new());
        assert_eq!(empty.max(), 1.0);
    }

    #[test]
    fn test_place_record() {
        let mut map = Map::new();
        map.insert("display_name".to_string(), json!(" Mayon "));
        map.insert("country".to_string(), json!("Philippines"));
        map.insert("name".to_string(), json!("mayon"));
        map.insert("alt_masl".to_string(), json!(2462));
        let place = Place::from_properties(&map);
        assert_eq!(place.title, "Mayon, Philippines");
        assert_eq!(place.name.as_deref(), Some("mayon"));
        assert_eq!(place.observatory, "Unknown observatory");
        assert_eq!(place.altitude, "2462 m");

        let unknown = Place::from_properties(&props(json!(1)));
        assert_eq!(unknown.title, "Unknown place");
        assert_eq!(unknown.name, None);
        assert_eq!(unknown.altitude, "Unknown altitude");
    }

    #[test]
    fn test_volcano_names_sorted_and_unique() {
        let named = |n: &str| {
            let mut map = Map::new();
            map.insert("display_name".to_string(), json!(n));
            map
        };
        let features = vec![named("Taal"), named("mayon"), Map::new(), named("Taal"), named("  ")];
        assert_eq!(volcano_names(&features), vec!["mayon".to_string(), "Taal".to_string()]);
    }
}
