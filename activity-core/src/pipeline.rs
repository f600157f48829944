use crate::{ActivityAdvisor, Error, Location, Recommendation, WeatherSource};

/// Fetch current conditions for `location` and turn them into a recommendation.
pub async fn recommend_for<A: ActivityAdvisor>(
    source: &dyn WeatherSource,
    advisor: &A,
    location: &Location,
) -> Result<Recommendation, Error> {
    let report = source.fetch_conditions(location).await?;
    advisor.recommend(&report)
}
