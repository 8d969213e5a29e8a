use std::process::ExitCode;

use clap::Parser;
use flood_risk::api::predict_service::Client;
use flood_risk::controller::{Outcome, ResultView, RiskQueryController};
use flood_risk::map::{MapView, RecordingSurface};

#[derive(Parser, Debug)]
#[command(
    name = "risk-query",
    version,
    about = "Query the flood risk service for one coordinate"
)]
struct Args {
    /// Latitude, -90 to 90.
    #[arg(long, allow_hyphen_values = true)]
    lat: String,
    /// Longitude, -180 to 180.
    #[arg(long, allow_hyphen_values = true)]
    lon: String,
    #[arg(long, env = "PREDICT_SERVICE_URL", default_value = "http://127.0.0.1:5000")]
    service_url: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    match run(Args::parse()).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            log::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> anyhow::Result<bool> {
    let client = Client::new(&args.service_url)?;
    let view = MapView::initialize(RecordingSurface::default())?;
    let controller = RiskQueryController::new(view, Option::<ResultView>::None, client);

    let outcome = controller.submit(&args.lat, &args.lon).await?;

    if let Some(result) = controller.with_display(|shown| shown.clone()) {
        println!("{result}");
    }

    let Outcome::Placed { marker, .. } = outcome else {
        return Ok(false);
    };

    controller.with_view(|view| {
        if let Some(marker) = view.surface().markers.get(&marker) {
            log::info!("marker at {}: {}", marker.position, marker.popup);
        }
    });

    Ok(true)
}
