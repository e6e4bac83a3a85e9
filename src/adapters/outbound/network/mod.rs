/// Network adapters for the Pyxis REST API
mod lazy_client;
mod pyxis_client;

pub use lazy_client::LazyPyxisClient;
pub use pyxis_client::{
    normalize_base_url, ClientSettings, PyxisClient, API_KEY_ENV, DEFAULT_BASE_URL,
    DEFAULT_TIMEOUT,
};
