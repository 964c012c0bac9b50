use crate::{api::AppState, config::Config, error, info, server::start_api_server};

pub async fn serve(config: Config) {
    let state = match AppState::new(config) {
        Ok(state) => state,
        Err(e) => error!("Invalid configuration: {}", e),
    };

    info!("Listening on http://{}", state.config.server_addr);
    if let Err(e) = start_api_server(state).await {
        error!("Server failed: {}", e);
    }
}
