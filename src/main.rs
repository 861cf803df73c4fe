use std::net::TcpListener;

use dossier::{
    configuration::get_configuration,
    startup::{build_job, run},
};
use env_logger::Env;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let configuration = get_configuration().expect("Failed to read configuration.");
    let job = build_job(&configuration).expect("Failed to set up clients.");

    if configuration.application.run_on_startup {
        log::info!("Running {:?} batch once", configuration.application.variant);
        match job.run().await {
            Ok(report) => log::info!("{} rows written, {} failed", report.written, report.failed),
            Err(e) => log::error!("Batch aborted: {:?}", e),
        }
        return Ok(());
    }

    let address = format!(
        "{}:{}",
        configuration.application.host, configuration.application.port
    );
    let listener = TcpListener::bind(address)?;
    log::info!("Listening on {}", listener.local_addr()?);

    run(listener, job)?.await
}
