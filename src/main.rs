use std::process::ExitCode;
use std::time::Duration;

use anyhow::anyhow;

use stratus_core::{AppError, Config};
use stratus_trends::classify;
use stratus_weather::{
    compass_point, AirQualityClient, Condition, ForecastClient, GeocodeClient, SnapshotStore,
    StoreOutcome,
};

#[tokio::main]
async fn main() -> ExitCode {
    stratus_core::init();

    let query = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    if query.trim().is_empty() {
        eprintln!("usage: stratus <place name>");
        return ExitCode::FAILURE;
    }

    match run(&query).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Lookup failed: {}", e);
            eprintln!("{}", e.user_message());
            ExitCode::FAILURE
        }
    }
}

async fn run(query: &str) -> Result<(), AppError> {
    let config = Config::load_validated()?;
    let timeout = Duration::from_secs(config.sources.timeout_secs);

    let geocoder = GeocodeClient::with_timeout(&config.sources.geocoding_url, timeout)?;
    let forecast_client = ForecastClient::with_timeout(&config.sources.forecast_url, timeout)?;
    let air_quality_client =
        AirQualityClient::with_timeout(&config.sources.air_quality_url, timeout)?;

    let places = geocoder.search(query).await?;
    let place = places
        .first()
        .ok_or_else(|| anyhow!("no places matched {:?}", query))?;
    let coords = place.coordinates()?;
    tracing::info!("Resolved {:?} to {}", query, place.display_name());

    let (forecast, air) = tokio::join!(
        forecast_client.fetch(coords),
        air_quality_client.fetch(coords)
    );
    let forecast = forecast?;
    let air = air?;

    let current = &forecast.current;
    let condition = Condition::for_code(current.weather_code);

    println!("{}", place.display_name());
    println!(
        "  {}, {}°C (feels like {}°C)",
        condition.label, current.temperature_2m, current.apparent_temperature
    );
    println!(
        "  Humidity {}%, cloud cover {}%, pressure {} hPa",
        current.relative_humidity_2m, current.cloud_cover, current.pressure_msl
    );
    println!(
        "  Wind is blowing at {} km/h towards {}",
        current.wind_speed_10m,
        compass_point(current.wind_direction_10m)
    );

    // Next-24h trends for the columns relevant to the current conditions.
    if let Some(chart) = condition.chart {
        println!("  {}:", chart.title);
        for key in chart.keys {
            if let Some(series) = forecast.hourly.series(key) {
                let reference = series.iter().copied().flatten().next().unwrap_or_default();
                println!("    {} is {}", key, classify(series, reference));
            }
        }
    }

    let uv_reference = forecast
        .daily
        .uv_index_max
        .first()
        .copied()
        .flatten()
        .unwrap_or_default();
    println!(
        "  UV index is at {} and is {}",
        uv_reference,
        classify(&forecast.daily.uv_index_max, uv_reference)
    );

    println!(
        "  AQI: {} and is {}",
        air.current.us_aqi.unwrap_or_default(),
        classify(&air.hourly.pm2_5, air.current.pm2_5.unwrap_or_default())
    );
    println!(
        "  Dust: {} ug/m3 and is {}",
        air.current.dust.unwrap_or_default(),
        classify(&air.hourly.dust, air.current.dust.unwrap_or_default())
    );

    if let (Some(sunrise), Some(sunset)) = (
        forecast.daily.sunrise.first(),
        forecast.daily.sunset.first(),
    ) {
        println!("  Sunrise {}, sunset {}", sunrise, sunset);
    }

    if config.store.enabled {
        let store = SnapshotStore::open(config.store_path())?;
        let payload = serde_json::to_string(&forecast).map_err(anyhow::Error::from)?;
        match store.insert_if_absent(coords, &payload)? {
            StoreOutcome::Inserted => {
                tracing::info!("Stored snapshot for {}", coords);
            }
            StoreOutcome::AlreadyExists => {
                tracing::debug!("Snapshot already stored for {}", coords);
            }
        }
    }

    Ok(())
}
