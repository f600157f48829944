use std::fmt;

use crate::advisor::ActivityBucket;

/// Free-form location query, e.g. `"Paris, France"`. Sent to the provider verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location(String);

impl Location {
    /// Join a city and its region/country qualifier.
    pub fn new(city: &str, region: &str) -> Self {
        Self(format!("{city}, {region}"))
    }

    pub fn from_query(query: impl Into<String>) -> Self {
        Self(query.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Place the provider resolved the query to, when it reports one.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Place {
    pub name: Option<String>,
    pub region: Option<String>,
    pub country: Option<String>,
    pub localtime: Option<String>,
}

/// Current conditions for one location, in imperial units.
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionsReport {
    pub temperature_f: f64,
    pub weather_descriptions: Vec<String>,
    pub precip_in: f64,
    pub place: Option<Place>,
}

impl ConditionsReport {
    pub fn primary_condition(&self) -> Option<&str> {
        self.weather_descriptions.first().map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    pub temperature_f: f64,
    pub weather_condition: String,
    pub precip_in: f64,
    pub bucket: ActivityBucket,
    pub activity: &'static str,
}
