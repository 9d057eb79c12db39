//! GraphMind chat client: sends questions to the MetaKGP QA backend over HTTP
//! and renders answers with their source links in the terminal.

pub mod app;
pub mod chat_box;
pub mod client;
pub mod config;
pub mod messages;
pub mod render;
pub mod session;

pub use app::{App, LoadState, PendingQuery};
pub use chat_box::ChatBox;
pub use client::{Backend, Client, ClientError, DEFAULT_BACKEND_URL};
pub use config::{default_config_path, Config, ConfigError, ConfigSource};
pub use messages::{ChatMessage, QueryResponse, Role, Transcript};
pub use render::RenderOptions;
pub use session::{OneShot, SessionError, SessionOptions};
