pub mod board;

/// Liveness probe. Touches neither the session nor the store.
pub async fn index() -> impl actix_web::Responder {
    actix_web::HttpResponse::Ok().finish()
}
