use clap::{value_parser, Arg, Command};
use opsguide_server::{router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Command::new("opsguide-server")
        .version(opsguide_core::VERSION)
        .about("OpsGuide operational request service")
        .arg(
            Arg::new("host")
                .long("host")
                .default_value("0.0.0.0")
                .help("Address to bind"),
        )
        .arg(
            Arg::new("port")
                .long("port")
                .default_value("8093")
                .value_parser(value_parser!(u16))
                .help("Port to listen on"),
        );
    let matches = cli.get_matches();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let host = matches
        .get_one::<String>("host")
        .map(String::as_str)
        .unwrap_or("0.0.0.0");
    let port = matches.get_one::<u16>("port").copied().unwrap_or(8093);
    let bind_addr = format!("{host}:{port}");

    let state = AppState::new()?;
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(%bind_addr, "opsguide server listening");
    tracing::info!("health check: GET /health");
    tracing::info!("submit request: POST /v1/request");

    axum::serve(listener, app).await?;
    Ok(())
}
