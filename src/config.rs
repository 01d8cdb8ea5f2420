//! Process configuration for the server and the CLI client.
//!
//! Values come from command-line flags with environment-variable fallbacks
//! (`PORT`, `TODO_HOST`, `TODO_STORE_URL`, `TODO_DATABASE`, `TODO_API_URL`).

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use clap::Parser;

/// Default listen port.
pub const DEFAULT_PORT: u16 = 3000;

/// Default store connection target: a local Redis instance.
pub const DEFAULT_STORE_URL: &str = "redis://127.0.0.1:6379";

/// Default database name (used as the Redis key prefix).
pub const DEFAULT_DATABASE: &str = "todo-list";

/// Store URL value that selects the in-memory backend.
pub const MEMORY_STORE: &str = "memory";

/// Default base URL the CLI client talks to.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:3000";

/// Which backend holds the task collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreTarget {
    /// Process-local, lost on exit.
    Memory,
    /// Redis document store.
    Redis {
        /// Connection URL, e.g. `redis://127.0.0.1:6379`.
        url: String,
        /// Database name, used as key prefix.
        database: String,
    },
}

impl StoreTarget {
    /// Interprets a store URL. `memory` selects the in-memory backend,
    /// anything else is treated as a Redis URL.
    ///
    /// # Examples
    ///
    /// ```
    /// use todo_list::config::StoreTarget;
    ///
    /// assert_eq!(StoreTarget::from_url("memory", "todo-list"), StoreTarget::Memory);
    /// assert!(matches!(
    ///     StoreTarget::from_url("redis://db:6379", "todo-list"),
    ///     StoreTarget::Redis { .. }
    /// ));
    /// ```
    pub fn from_url(url: &str, database: &str) -> Self {
        if url.eq_ignore_ascii_case(MEMORY_STORE) {
            Self::Memory
        } else {
            Self::Redis {
                url: url.to_string(),
                database: database.to_string(),
            }
        }
    }
}

impl std::fmt::Display for StoreTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Memory => write!(f, "in-memory store"),
            Self::Redis { url, database } => write!(f, "{url} (database {database})"),
        }
    }
}

/// Configuration for the task server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: IpAddr,
    /// Port to listen on.
    pub port: u16,
    /// Backend holding the tasks.
    pub store: StoreTarget,
}

impl ServerConfig {
    /// The socket address to bind.
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            store: StoreTarget::from_url(DEFAULT_STORE_URL, DEFAULT_DATABASE),
        }
    }
}

/// Command-line arguments of `todo-server`.
#[derive(Debug, Parser)]
#[command(name = "todo-server", version, about = "Task-list REST API server")]
pub struct ServerArgs {
    /// Interface to bind
    #[arg(long, env = "TODO_HOST", default_value = "0.0.0.0")]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Store connection URL, or `memory` for a process-local store
    #[arg(long, env = "TODO_STORE_URL", default_value = DEFAULT_STORE_URL)]
    pub store_url: String,

    /// Database name
    #[arg(long, env = "TODO_DATABASE", default_value = DEFAULT_DATABASE)]
    pub database: String,
}

impl From<ServerArgs> for ServerConfig {
    fn from(args: ServerArgs) -> Self {
        Self {
            host: args.host,
            port: args.port,
            store: StoreTarget::from_url(&args.store_url, &args.database),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_config_targets_local_database() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 3000);
        assert_eq!(config.addr().to_string(), "0.0.0.0:3000");
        assert_eq!(
            config.store,
            StoreTarget::Redis {
                url: "redis://127.0.0.1:6379".to_string(),
                database: "todo-list".to_string(),
            }
        );
    }

    #[test]
    fn args_without_flags_use_default_store() {
        let args = ServerArgs::try_parse_from(["todo-server"]).unwrap();
        let config = ServerConfig::from(args);
        assert_eq!(config.store, ServerConfig::default().store);
    }

    #[test]
    fn args_override_port_and_store() {
        let args = ServerArgs::try_parse_from([
            "todo-server",
            "--port",
            "8080",
            "--store-url",
            "MEMORY",
        ])
        .unwrap();
        let config = ServerConfig::from(args);
        assert_eq!(config.port, 8080);
        assert_eq!(config.store, StoreTarget::Memory);
    }

    #[test]
    fn store_target_display() {
        assert_eq!(StoreTarget::Memory.to_string(), "in-memory store");
        assert_eq!(
            StoreTarget::from_url("redis://h:1", "db").to_string(),
            "redis://h:1 (database db)"
        );
    }
}
