//! OpenWeatherMap 5-day / 3-hour forecast client.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use flightlens_core::weather::{self, ForecastEntry, WeatherReport};

use super::{LookupError, WeatherSource};

pub const KEY_NOT_CONFIGURED: &str =
    "Weather API key not configured. Please set OPENWEATHERMAP_API_KEY in environment variables.";

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    #[serde(default)]
    list: Vec<ForecastItem>,
    #[serde(default)]
    city: Option<CityRecord>,
}

#[derive(Debug, Deserialize)]
struct ForecastItem {
    dt: i64,
    main: MainRecord,
    #[serde(default)]
    weather: Vec<ConditionRecord>,
}

#[derive(Debug, Deserialize)]
struct MainRecord {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct ConditionRecord {
    #[serde(default)]
    description: String,
    #[serde(default)]
    icon: String,
}

#[derive(Debug, Deserialize)]
struct CityRecord {
    /// UTC offset in seconds.
    #[serde(default)]
    timezone: i64,
}

/// Forecast lookups against OpenWeatherMap, imperial units.
pub struct OpenWeatherClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl OpenWeatherClient {
    pub fn new(http: reqwest::Client, base_url: String, api_key: Option<String>) -> Self {
        Self {
            http,
            base_url,
            api_key,
        }
    }
}

/// Turn a forecast body into a report as seen at `now`.
fn build_report(
    body: &[u8],
    location: &str,
    timezone: &str,
    now: DateTime<Utc>,
) -> Result<WeatherReport, LookupError> {
    let response: ForecastResponse =
        serde_json::from_slice(body).map_err(|e| LookupError::Json(e.to_string()))?;
    if response.list.is_empty() {
        return Err(LookupError::NotFound("No weather data available".into()));
    }

    let entries: Vec<ForecastEntry> = response
        .list
        .into_iter()
        .map(|item| {
            let condition = item.weather.into_iter().next();
            let (description, icon) = condition
                .map(|c| (c.description, c.icon))
                .unwrap_or_default();
            ForecastEntry {
                dt: item.dt,
                temp: item.main.temp,
                description,
                icon,
            }
        })
        .collect();

    let offset = response.city.map(|c| c.timezone).unwrap_or(0);

    Ok(WeatherReport {
        location: location.to_string(),
        local_time: weather::local_time(now, offset),
        timezone: timezone.to_string(),
        forecast: weather::select_daily(&entries),
    })
}

#[async_trait::async_trait]
impl WeatherSource for OpenWeatherClient {
    async fn forecast(&self, location: &str, timezone: &str) -> Result<WeatherReport, LookupError> {
        let key = self
            .api_key
            .as_deref()
            .ok_or_else(|| LookupError::NotConfigured(KEY_NOT_CONFIGURED.into()))?;

        let response = self
            .http
            .get(&self.base_url)
            .query(&[("q", location), ("appid", key), ("units", "imperial")])
            .send()
            .await?;

        let status = response.status();
        if status.as_u16() == 401 {
            return Err(LookupError::Upstream("Invalid weather API key".into()));
        }
        if !status.is_success() {
            return Err(LookupError::Upstream(format!(
                "Weather API request failed with status {}",
                status.as_u16()
            )));
        }

        let body = response.bytes().await?;
        let report = build_report(&body, location, timezone, Utc::now())?;
        tracing::debug!(location, days = report.forecast.len(), "forecast fetched");
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn body() -> Vec<u8> {
        let start = Utc.with_ymd_and_hms(2026, 10, 16, 0, 0, 0).unwrap().timestamp();
        let list: Vec<_> = (0..16)
            .map(|i| {
                json!({
                    "dt": start + i * 3 * 3600,
                    "main": {"temp": 60.5 + i as f64, "feels_like": 59.0},
                    "weather": [{"id": 500, "main": "Rain", "description": "light rain", "icon": "10d"}],
                    "dt_txt": ""
                })
            })
            .collect();
        serde_json::to_vec(&json!({"cod": "200", "list": list, "city": {"name": "London", "timezone": 3600}}))
            .unwrap()
    }

    #[test]
    fn test_report_from_feed() {
        let now = Utc.with_ymd_and_hms(2026, 10, 16, 9, 15, 0).unwrap();
        let report = build_report(&body(), "London", "Europe/London", now).unwrap();
        assert_eq!(report.location, "London");
        assert_eq!(report.timezone, "Europe/London");
        assert_eq!(report.local_time, "10:15");
        assert_eq!(report.forecast.len(), 2);
        // 12:00 UTC is step 4: 64.5 rounds up
        assert_eq!(report.forecast[0].temp, 65);
        assert_eq!(report.forecast[0].description, "light rain");
        assert_eq!(report.forecast[0].icon, "10d");
    }

    #[test]
    fn test_empty_list() {
        let now = Utc::now();
        let err = build_report(br#"{"list": []}"#, "London", "UTC", now).unwrap_err();
        assert_eq!(err, LookupError::NotFound("No weather data available".into()));
    }

    #[test]
    fn test_missing_condition_is_blank() {
        let now = Utc.with_ymd_and_hms(2026, 10, 16, 0, 0, 0).unwrap();
        let noon = Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap().timestamp();
        let text = format!(r#"{{"list": [{{"dt": {noon}, "main": {{"temp": 70.0}}, "weather": []}}]}}"#);
        let report = build_report(text.as_bytes(), "Dubai", "Asia/Dubai", now).unwrap();
        assert_eq!(report.local_time, "00:00");
        assert_eq!(report.forecast[0].description, "");
    }

    #[tokio::test]
    async fn test_missing_key_is_not_configured() {
        let client = OpenWeatherClient::new(reqwest::Client::new(), "http://127.0.0.1:9".into(), None);
        assert_eq!(
            client.forecast("London", "Europe/London").await.unwrap_err(),
            LookupError::NotConfigured(KEY_NOT_CONFIGURED.into())
        );
    }
}
