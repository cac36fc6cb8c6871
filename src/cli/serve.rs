use tracing::info;

use crate::api;
use crate::cli::commands::ServeArgs;
use crate::config::parser::load_or_default;
use crate::errors::SpotcheckError;

pub async fn handle_serve(args: ServeArgs) -> Result<(), SpotcheckError> {
    let config = load_or_default(args.config.as_deref()).await?;
    let eff = config.resolve(args.host.as_deref(), args.port, args.reports.as_deref());
    info!(host = %eff.host, port = eff.port, reports = %eff.reports_path, "Starting report API");

    let state = api::create_app_state(&eff.reports_path)?;
    let app = api::build_router(state);

    let addr = format!("{}:{}", eff.host, eff.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| SpotcheckError::Internal(format!("Server error: {}", e)))?;

    Ok(())
}
