pub mod compare_products_request;
pub mod compare_products_route;
pub mod generate_insight_request;
pub mod generate_insight_route;
pub mod list_models_route;
pub mod product_insights_route;
