use actix_web::{HttpResponse, Responder, get, web};

use crate::repository::ShopifyRepository;
use crate::services::search::{self, SuggestionQuery};

#[get("/api/search")]
/// Return search-as-you-type suggestions for `q` as JSON.
///
/// Terms shorter than two characters yield an empty list.
pub async fn api_search(
    params: web::Query<SuggestionQuery>,
    repo: web::Data<ShopifyRepository>,
) -> impl Responder {
    match search::suggestions(repo.get_ref(), &params.q).await {
        Ok(suggestions) => HttpResponse::Ok().json(suggestions),
        Err(err) => {
            log::error!("Failed to search products: {err}");
            HttpResponse::BadGateway().finish()
        }
    }
}
