use crate::api;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::health::health_check,
        api::products::list_products,
        api::products::get_product,
        api::products::create_product,
        api::products::update_product,
        api::products::delete_product,
        // Add other endpoints here as we document them
    ),
    tags(
        (name = "merx", description = "Merx catalog API")
    )
)]
pub struct ApiDoc;
