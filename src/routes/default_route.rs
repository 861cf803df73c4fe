use actix_web::{get, HttpResponse, Responder};

#[get("/")]
async fn default() -> impl Responder {
    HttpResponse::Ok().body("Company profiles are generated at /api/execute")
}

#[cfg(test)]
mod tests {
    use actix_web::{body::to_bytes, test, App};

    use super::*;

    #[actix_web::test]
    async fn root_answers() {
        let app = test::init_service(App::new().service(default)).await;

        let res = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;

        assert!(res.status().is_success());
        let body = to_bytes(res.into_body()).await.unwrap();
        assert!(body.starts_with(b"Company profiles"));
    }
}
