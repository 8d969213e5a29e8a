use flood_risk::api::service::{router, State};
use flood_risk::config::{Config, VARIABLES};
use flood_risk::model::RiskModel;

#[tokio::main]
async fn main() {
    env_logger::init();

    if let Err(e) = run().await {
        log::error!("{e:#}");
    }
}

async fn run() -> anyhow::Result<()> {
    let config = Config::env().inspect_err(|e| {
        log::error!(
            "config: {e}. Check the environment variables ({}).",
            VARIABLES.join(", ")
        );
    })?;

    config.log();

    let model = RiskModel::load_or_train(&config.data_path, &config.model_path)?;
    log::info!("Prediction model ready ({} samples)", model.len());

    let state = State::new(model);

    let listen_addr = format!("0.0.0.0:{}", config.listen_port);
    let listener = tokio::net::TcpListener::bind(&listen_addr).await?;

    let router = router::router(state);

    log::info!("Listening on {listen_addr}");
    axum::serve(listener, router).await?;

    Ok(())
}
