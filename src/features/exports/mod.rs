//! Document export pipeline: CSV rows and the HTML document handed to the
//! external PDF renderer. The headless-browser rendering itself lives
//! outside this service.

pub mod handlers;
pub mod routes;
pub mod services;

pub use services::ExportService;
