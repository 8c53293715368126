use clap::Parser;
use storefront::client::{ImagesReqwest, ProductsReqwest};
use storefront::config::Command;
use storefront::{Application, Config, cli, telemetry};

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c().await.expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down gracefully...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down gracefully...");
        },
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = storefront::config::Args::parse();

    let config = Config::load(&args)?;

    if args.validate {
        println!("Configuration is valid.");
        return Ok(());
    }

    match args.command.clone().unwrap_or(Command::Serve) {
        Command::Serve => {
            telemetry::init_telemetry("info")?;
            tracing::debug!("{:?}", args);

            let shutdown = shutdown_signal();
            Application::new(config)?.serve(shutdown).await
        }
        Command::Products => {
            // Keep stdout for the table
            telemetry::init_telemetry("warn")?;

            let products = ProductsReqwest::new(config.products_url.clone(), config.request_timeout)?;
            cli::print_products(&products, &mut std::io::stdout()).await
        }
        Command::Upload { id, file } => {
            telemetry::init_telemetry("warn")?;

            let images = ImagesReqwest::new(config.images_url.clone(), config.request_timeout)?;
            cli::upload_file(&config, &images, &id, &file, &mut std::io::stdout()).await
        }
    }
}
