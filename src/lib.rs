//! # todo-list
//!
//! A task-list service: a REST API over a document store, a typed HTTP
//! client, and a list view that keeps an in-memory copy of the tasks in
//! sync with the API.
//!
//! Persistence lives in the [`todo_store`] crate. This crate adds:
//!
//! - [`server`] - axum router and server lifecycle
//! - [`client`] - [`TaskClient`](client::TaskClient) and
//!   [`TaskListView`](client::TaskListView)
//! - [`config`] - command-line and environment configuration
//! - [`logging`] - `tracing` subscriber setup
//!
//! ## Quick start
//!
//! ```no_run
//! use todo_list::config::ServerConfig;
//! use todo_list::server::TaskServer;
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! TaskServer::start(ServerConfig::default()).await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod server;

pub use client::{ClientError, TaskApi, TaskClient, TaskListView};
pub use config::{ServerConfig, StoreTarget};
pub use error::StartupError;
pub use server::{router, TaskServer};
pub use todo_store::{TaskPatch, TaskRecord, TaskStore};
