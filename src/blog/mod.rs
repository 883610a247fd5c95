pub mod ranking;
pub mod repository;
pub mod service;
pub mod views;

pub use ranking::PostRanking;
pub use repository::{BlogRepository, RepositoryError, SqliteBlogRepository};
pub use service::ContentQueryService;
pub use views::MediaUrls;
