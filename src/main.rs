use std::sync::Arc;

use booking_widget::api::HttpBookingApi;
use booking_widget::config::WidgetConfig;
use booking_widget::format::format_price;
use booking_widget::widget::{Widget, WidgetRegistry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let api_key = std::env::var("BOOKING_API_KEY").unwrap_or_else(|_| {
        eprintln!("Error: BOOKING_API_KEY not set");
        eprintln!("  export BOOKING_API_KEY=wk-...");
        std::process::exit(1);
    });

    let api_url = std::env::var("BOOKING_API_URL")
        .unwrap_or_else(|_| "https://api.example.com/api/v1".to_string());

    let list_id = std::env::var("BOOKING_LIST_ID").unwrap_or_else(|_| {
        eprintln!("Error: BOOKING_LIST_ID not set");
        std::process::exit(1);
    });

    let container =
        std::env::var("BOOKING_CONTAINER").unwrap_or_else(|_| "#booking-widget".to_string());

    eprintln!("📅 Booking Widget v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   API: {}", api_url);
    eprintln!("   List: {}", list_id);
    eprintln!("   Container: {}\n", container);

    let config = WidgetConfig::new(api_key, api_url, list_id, container);
    let api = Arc::new(HttpBookingApi::new(&config));
    let registry = Arc::new(WidgetRegistry::new());

    let widget = Widget::mount(config, api, registry).await?;

    if let Some(message) = widget.load_error() {
        eprintln!("{message}");
    } else {
        for experience in widget.experiences() {
            eprintln!(
                "  {} — {} (from {})",
                experience.id,
                experience.name,
                format_price(experience.price, &experience.currency)
            );
        }
    }

    widget.unmount().await;
    Ok(())
}
