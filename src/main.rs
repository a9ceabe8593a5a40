use anyhow::{Context, Result};
use widget_core::Config;
use widget_weather::{InMemoryWidgets, WeatherService};

#[tokio::main]
async fn main() -> Result<()> {
    let (config, validation) = Config::load_validated()?;
    widget_core::init_with_filter(&config.logging.filter)?;

    for warning in &validation.warnings {
        tracing::warn!("Config warning: {}", warning);
    }

    let locations: Vec<String> = std::env::args().skip(1).collect();
    if locations.is_empty() {
        println!("Usage: widget-weather <location> [<location> ...]");
        return Ok(());
    }

    let service =
        WeatherService::from_config(&config.weather).context("Failed to create weather service")?;
    let widgets = InMemoryWidgets::new();

    let mut failures = 0;
    for location in &locations {
        let widget = match widgets.create(location) {
            Ok(w) => w,
            Err(e) => {
                failures += 1;
                print_error(location, e.status_code(), &e.user_message());
                continue;
            }
        };

        match service.get_weather_for_widget(&widgets, &widget.id).await {
            Ok(weather) => {
                let mut json = serde_json::to_value(&weather)?;
                json["conditions"] = weather.data.describe_conditions().into();
                println!("{}", serde_json::to_string_pretty(&json)?);
            }
            Err(e) => {
                failures += 1;
                tracing::debug!("Lookup for {:?} failed: {}", location, e);
                print_error(location, e.status_code(), &e.user_message());
            }
        }
    }

    tracing::info!(
        "Looked up {} location(s), {} cached",
        locations.len(),
        service.cache().len()
    );

    if failures > 0 {
        anyhow::bail!("{} of {} lookups failed", failures, locations.len());
    }
    Ok(())
}

fn print_error(location: &str, status: u16, message: &str) {
    let json = serde_json::json!({
        "location": location,
        "status": status,
        "error": message,
    });
    eprintln!("{}", json);
}
