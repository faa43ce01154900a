pub mod classify;
pub mod config;
pub mod error;
pub mod parser;
pub mod record;
pub mod surface;
pub mod urlparam;
pub mod widget;

pub use classify::{Disposition, classify, login_comeback_url};
pub use config::{
    DEFAULT_MIN_QUERY_LEN, DEFAULT_SEARCH_PATH, QUERY_PARAM, SearchConfig, SearchConfigBuilder,
};
pub use error::{SearchError, SearchResult};
pub use parser::drain_records;
pub use record::SearchRecord;
pub use surface::{PanelRow, ResultSurface, TablePanel};
pub use urlparam::set_query_param;
pub use widget::{RequestState, SearchWidget};
