use std::{net::TcpListener, sync::Arc};

use actix_web::{
    dev::Server,
    middleware::Logger,
    web::{self, Data},
    App, HttpServer,
};
use reqwest::Client;

use crate::{
    configuration::{PipelineVariant, Settings},
    routes::{default_route, execute_route},
    services::{
        BackoffPolicy, BatchJob, GoogleSheetsClient, LinkedinScraper, OpenaiClient,
        ProfileGenerator, SerpApiClient, SheetsAuth, WebFetcher, ZenrowsClient,
    },
};

pub fn run(listener: TcpListener, job: BatchJob) -> Result<Server, std::io::Error> {
    let job = Data::new(job);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .service(default_route::default)
            .service(web::scope("/api").service(execute_route::execute))
            .app_data(job.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}

/// Wires the real clients from configuration.
pub fn build_job(configuration: &Settings) -> anyhow::Result<BatchJob> {
    let mut builder = Client::builder();
    if let Some(timeout) = configuration.pipeline.request_timeout() {
        builder = builder.timeout(timeout);
    }
    let client = builder.build()?;

    let linkedin = match configuration.application.variant {
        PipelineVariant::Linkedin => Some(LinkedinScraper::new(
            Arc::new(ZenrowsClient::new(
                client.clone(),
                configuration.api_keys.zenrows.clone(),
                &configuration.endpoints.zenrows,
            )),
            BackoffPolicy::from(&configuration.scraper),
        )),
        PipelineVariant::Search => None,
    };

    let generator = ProfileGenerator {
        variant: configuration.application.variant,
        model: configuration.pipeline.model.clone(),
        search: Arc::new(SerpApiClient::new(
            client.clone(),
            configuration.api_keys.serpapi.clone(),
            &configuration.endpoints.serpapi,
        )),
        fetcher: Arc::new(WebFetcher::new(client.clone())),
        completion: Arc::new(OpenaiClient::new(
            configuration.api_keys.openai.clone(),
            &configuration.endpoints.openai,
        )),
        linkedin,
    };

    let auth = SheetsAuth::from_settings(client.clone(), &configuration.spreadsheet)?;
    let sheets = GoogleSheetsClient::new(
        client,
        &configuration.spreadsheet.base_url,
        configuration.spreadsheet.id.clone(),
        auth,
    );

    Ok(BatchJob {
        sheets: Arc::new(sheets),
        generator,
        pipeline: configuration.pipeline.clone(),
        spreadsheet: configuration.spreadsheet.clone(),
    })
}
