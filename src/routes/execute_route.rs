use actix_web::{get, web, HttpResponse};
use serde::Serialize;

use crate::services::BatchJob;

#[derive(Serialize)]
struct ExecuteResponse {
    message: &'static str,
}

/// Runs the whole batch before answering. The answer is the same whether the batch failed or not.
#[get("/execute")]
async fn execute(job: web::Data<BatchJob>) -> HttpResponse {
    match job.run().await {
        Ok(report) => log::info!(
            "Batch finished: {} written, {} failed",
            report.written,
            report.failed
        ),
        Err(e) => log::error!("Batch aborted: {:?}", e),
    }

    HttpResponse::Ok().json(ExecuteResponse {
        message: "GET request to /api/execute was successful",
    })
}
