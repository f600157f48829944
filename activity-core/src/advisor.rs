//! Temperature bucketing and activity selection.
//!
//! Buckets partition every temperature (°F) into exactly one band:
//!
//! | bucket | range            |
//! |--------|------------------|
//! | hot    | `t > 86`         |
//! | warm   | `68 < t <= 86`   |
//! | mild   | `50 <= t <= 68`  |
//! | cold   | everything else  |

use std::fmt;

use rand::{Rng, seq::IndexedRandom};

use crate::{ConditionsReport, Error, Recommendation};

const HOT: [&str; 3] =
    ["Go for a swim", "Stay indoors and enjoy some cold drinks", "Visit an air-conditioned museum"];

const WARM: [&str; 3] =
    ["Go for a run", "Enjoy a picnic in the park", "Have a refreshing lemonade outdoors"];

const MILD: [&str; 3] =
    ["Grab a warm drink and read a book", "Visit a local cafe", "Take a brisk walk in the fresh air"];

const COLD: [&str; 3] =
    ["Stay inside with hot chocolate", "Build a snowman (if snowy)", "Watch a movie under a blanket"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActivityBucket {
    Hot,
    Warm,
    Mild,
    Cold,
}

impl ActivityBucket {
    /// Classify a Fahrenheit temperature. NaN falls through to `Cold`.
    pub fn classify(temperature_f: f64) -> Self {
        if temperature_f > 86.0 {
            ActivityBucket::Hot
        } else if temperature_f > 68.0 {
            ActivityBucket::Warm
        } else if (50.0..=68.0).contains(&temperature_f) {
            ActivityBucket::Mild
        } else {
            ActivityBucket::Cold
        }
    }

    pub fn candidates(&self) -> &'static [&'static str] {
        match self {
            ActivityBucket::Hot => &HOT,
            ActivityBucket::Warm => &WARM,
            ActivityBucket::Mild => &MILD,
            ActivityBucket::Cold => &COLD,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityBucket::Hot => "hot",
            ActivityBucket::Warm => "warm",
            ActivityBucket::Mild => "mild",
            ActivityBucket::Cold => "cold",
        }
    }

    pub const fn all() -> &'static [ActivityBucket] {
        &[ActivityBucket::Hot, ActivityBucket::Warm, ActivityBucket::Mild, ActivityBucket::Cold]
    }
}

impl fmt::Display for ActivityBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub trait ActivityAdvisor {
    /// Recommend an activity, drawing randomness from `rng`.
    fn recommend_with<R: Rng + ?Sized>(
        &self,
        report: &ConditionsReport,
        rng: &mut R,
    ) -> Result<Recommendation, Error>;

    /// Recommend an activity using the thread-local RNG.
    fn recommend(&self, report: &ConditionsReport) -> Result<Recommendation, Error> {
        self.recommend_with(report, &mut rand::rng())
    }
}

/// Picks uniformly among the fixed candidates of the report's bucket.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleActivityAdvisor;

impl SimpleActivityAdvisor {
    pub fn new() -> Self {
        Self
    }
}

impl ActivityAdvisor for SimpleActivityAdvisor {
    fn recommend_with<R: Rng + ?Sized>(
        &self,
        report: &ConditionsReport,
        rng: &mut R,
    ) -> Result<Recommendation, Error> {
        let weather_condition = report
            .primary_condition()
            .ok_or_else(|| Error::malformed("report has no weather descriptions"))?
            .to_string();

        let bucket = ActivityBucket::classify(report.temperature_f);
        let activity = bucket
            .candidates()
            .choose(rng)
            .copied()
            .ok_or_else(|| Error::malformed(format!("no activities for bucket '{bucket}'")))?;

        tracing::debug!(temperature_f = report.temperature_f, %bucket, activity, "picked activity");

        Ok(Recommendation {
            temperature_f: report.temperature_f,
            weather_condition,
            precip_in: report.precip_in,
            bucket,
            activity,
        })
    }
}
