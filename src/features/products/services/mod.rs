mod model_code_service;
mod product_service;

pub use model_code_service::ModelCodeService;
pub use product_service::ProductService;
