pub mod health_route;
pub mod insights;
pub mod products;
