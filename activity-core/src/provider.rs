use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
    Config, ConditionsReport, Error, Location, provider::weatherstack::WeatherstackSource,
};

pub mod weatherstack;

#[async_trait]
pub trait WeatherSource: Send + Sync + Debug {
    async fn fetch_conditions(&self, location: &Location) -> Result<ConditionsReport, Error>;
}

/// Construct the Weatherstack source from config.
pub fn source_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherSource>> {
    let access_key = config.access_key()?;

    let source = WeatherstackSource::builder(access_key.to_owned())
        .endpoint(config.endpoint())
        .timeout(config.timeout())
        .build()?;

    Ok(Box::new(source))
}
