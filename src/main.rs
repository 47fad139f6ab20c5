use std::{env, net::SocketAddr};
use task_timer::models::AppData;
use task_timer::{
    load_data, load_preferences, resolve_data_path, resolve_prefs_path, router, AppState, Consent,
};
use tokio::fs;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let data_path = resolve_data_path()?;
    let prefs_path = resolve_prefs_path()?;
    for path in [&data_path, &prefs_path] {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
    }

    let consent = Consent::from_saved(load_preferences(&prefs_path).await);

    // Tasks load only with a recorded storage grant; otherwise start empty
    // even if an old file is still on disk.
    let data = if consent.task_storage_enabled() {
        load_data(&data_path).await
    } else {
        AppData::default()
    };

    let state = AppState::new(data_path, prefs_path, data, consent);
    let app = router(state);

    let port = env::var("PORT")
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(8080);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
