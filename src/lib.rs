//! inkwell - a personal blog engine
//!
//! Articles are markdown files with a YAML header. They are loaded once into
//! a read-only [`ArticleStore`], which backs:
//!
//! - case-insensitive substring [`search`](search::search), optionally
//!   debounced through a [`SearchSession`](session::SearchSession)
//! - the first-seen-order [`TagIndex`](tags::TagIndex) used for filter tabs
//! - the HTML [`Views`](render::Views) that [`Site`](site::Site) writes out
//!
//! Views receive everything through an explicit [`SiteContext`].

pub mod article;
pub mod config;
pub mod context;
pub mod debounce;
pub mod error;
pub mod loader;
pub mod render;
pub mod search;
pub mod session;
pub mod share;
pub mod site;
pub mod store;
pub mod tags;
pub mod theme;
pub mod tree;

pub use article::{Article, Author};
pub use config::BlogConfig;
pub use context::SiteContext;
pub use error::{BlogError, BlogResult};
pub use search::{search, SearchResult, SearchResults};
pub use store::ArticleStore;
pub use tags::TagIndex;
