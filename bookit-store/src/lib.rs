pub mod app_config;
pub mod memory_repo;
pub mod remote_repo;
pub mod session_store;

pub use memory_repo::InMemoryApi;
pub use remote_repo::RemoteApiClient;
pub use session_store::SessionStore;
