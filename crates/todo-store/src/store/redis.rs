//! Redis storage backend for task persistence.
//!
//! [`RedisBackend`] implements [`StorageBackend`] using Redis as the document
//! store. Single-document reads use `HGET`; listing, writes and merges go
//! through Lua scripts (`redis::Script`), so every operation is one atomic
//! round-trip.
//!
//! # Key Schema
//!
//! | Key Pattern | Type | Purpose |
//! |-------------|------|---------|
//! | `{prefix}:tasks:{task_id}` | Hash | Task document (`data` field, JSON) |
//! | `{prefix}:idx` | Sorted Set | Insertion-ordered task index |
//! | `{prefix}:seq` | String (int) | Monotonic insertion counter used as score |
//!
//! The prefix plays the role of the database name and defaults to
//! [`DEFAULT_DATABASE`].
//!
//! # Usage
//!
//! ```rust,no_run
//! use todo_store::store::redis::RedisBackend;
//! use todo_store::store::generic::GenericTaskStore;
//!
//! # async fn example() {
//! let backend = RedisBackend::new("redis://127.0.0.1:6379").await.unwrap();
//! let store = GenericTaskStore::new(backend);
//! # }
//! ```

use ::redis::aio::MultiplexedConnection;
use ::redis::{AsyncCommands, Script};
use async_trait::async_trait;

use crate::store::backend::{StorageBackend, StorageError};

/// Database name used as key prefix when none is configured.
pub const DEFAULT_DATABASE: &str = "todo-list";

// ---------------------------------------------------------------------------
// Lua script constants
// ---------------------------------------------------------------------------

/// Unconditional put: write the document, index it on first insert.
///
/// KEYS[1] = task hash key, KEYS[2] = index sorted set key,
/// KEYS[3] = sequence counter key.
/// ARGV[1] = data JSON, ARGV[2] = task_id.
/// Returns: 1 if the document was created, 0 if it was overwritten.
const LUA_PUT: &str = r#"
local existed = redis.call('EXISTS', KEYS[1])
redis.call('HSET', KEYS[1], 'data', ARGV[1])
if existed == 0 then
    local seq = redis.call('INCR', KEYS[3])
    redis.call('ZADD', KEYS[2], 'NX', seq, ARGV[2])
    return 1
end
return 0
"#;

/// Merge: set top-level members on an existing document only.
///
/// KEYS[1] = task hash key.
/// ARGV[1] = JSON object of members to set.
/// Returns: the merged document, or nil if the hash does not exist. The
/// index is not touched, so a merge can never resurrect a deleted task.
const LUA_MERGE: &str = r#"
local data = redis.call('HGET', KEYS[1], 'data')
if not data then
    return false
end
local doc = cjson.decode(data)
if type(doc) ~= 'table' then
    return redis.error_reply('document is not a JSON object')
end
for field, value in pairs(cjson.decode(ARGV[1])) do
    doc[field] = value
end
local merged = cjson.encode(doc)
redis.call('HSET', KEYS[1], 'data', merged)
return merged
"#;

/// List: every indexed document in insertion order.
///
/// KEYS[1] = index sorted set key.
/// ARGV[1] = task hash key prefix (`{prefix}:tasks:`).
/// Returns: flat array `[id1, data1, id2, data2, ...]`.
const LUA_LIST: &str = r#"
local out = {}
for _, id in ipairs(redis.call('ZRANGE', KEYS[1], 0, -1)) do
    local data = redis.call('HGET', ARGV[1] .. id, 'data')
    if data then
        table.insert(out, id)
        table.insert(out, data)
    end
end
return out
"#;

/// Delete: remove hash and sorted set entry.
///
/// KEYS[1] = task hash key, KEYS[2] = index sorted set key.
/// ARGV[1] = task_id (sorted set member).
/// Returns: 1 if key existed and was deleted, 0 otherwise.
const LUA_DELETE: &str = r#"
local existed = redis.call('EXISTS', KEYS[1])
redis.call('ZREM', KEYS[2], ARGV[1])
if existed == 1 then
    redis.call('DEL', KEYS[1])
    return 1
end
return 0
"#;

// ---------------------------------------------------------------------------
// RedisBackend struct
// ---------------------------------------------------------------------------

/// Redis storage backend for task persistence.
///
/// This backend is a thin adapter -- it contains **no domain logic**. All
/// intelligence lives in
/// [`GenericTaskStore`](crate::store::generic::GenericTaskStore).
///
/// # Connection Model
///
/// `RedisBackend` holds a [`MultiplexedConnection`] which is designed to be
/// cloned cheaply -- all clones share the same underlying TCP connection.
/// Each method clones the connection for concurrent safety.
#[derive(Clone)]
pub struct RedisBackend {
    conn: MultiplexedConnection,
    key_prefix: String,
}

impl std::fmt::Debug for RedisBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisBackend")
            .field("key_prefix", &self.key_prefix)
            .finish_non_exhaustive()
    }
}

impl RedisBackend {
    /// Creates a backend by connecting to Redis at the given URL.
    ///
    /// The URL format is `redis://[:<password>@]<host>:<port>[/<db>]`.
    /// Uses the key prefix [`DEFAULT_DATABASE`]. Fails fast if the connection
    /// cannot be established.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Backend`] if the Redis client cannot be created
    /// or the connection cannot be established.
    pub async fn new(url: &str) -> Result<Self, StorageError> {
        let client = ::redis::Client::open(url).map_err(|e| StorageError::Backend {
            message: format!("failed to create Redis client: {e}"),
            source: Some(Box::new(e)),
        })?;
        let conn = client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| StorageError::Backend {
                message: format!("failed to connect to Redis: {e}"),
                source: Some(Box::new(e)),
            })?;
        Ok(Self::with_connection(conn))
    }

    /// Creates a backend with a pre-built multiplexed connection.
    pub fn with_connection(conn: MultiplexedConnection) -> Self {
        Self {
            conn,
            key_prefix: DEFAULT_DATABASE.to_string(),
        }
    }

    /// Sets the key prefix (database name).
    ///
    /// Test runs use a unique prefix so they never see each other's keys.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = prefix.into();
        self
    }

    /// Returns the key prefix in use.
    pub fn prefix(&self) -> &str {
        &self.key_prefix
    }
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

impl RedisBackend {
    fn task_key(&self, task_id: &str) -> String {
        task_key(&self.key_prefix, task_id)
    }

    fn index_key(&self) -> String {
        format!("{}:idx", self.key_prefix)
    }

    fn seq_key(&self) -> String {
        format!("{}:seq", self.key_prefix)
    }
}

fn task_key(prefix: &str, task_id: &str) -> String {
    format!("{prefix}:tasks:{task_id}")
}

fn utf8(data: &[u8]) -> Result<&str, StorageError> {
    std::str::from_utf8(data).map_err(|e| StorageError::Backend {
        message: format!("data is not valid UTF-8: {e}"),
        source: Some(Box::new(e)),
    })
}

/// Splits `[id1, data1, id2, data2, ...]` into `(id, data)` pairs.
fn pairs(flat: Vec<String>) -> Vec<(String, Vec<u8>)> {
    let mut out = Vec::with_capacity(flat.len() / 2);
    let mut items = flat.into_iter();
    while let (Some(id), Some(data)) = (items.next(), items.next()) {
        out.push((id, data.into_bytes()));
    }
    out
}

/// Maps a Redis error to a [`StorageError::Backend`].
fn map_redis_error(err: ::redis::RedisError, key: &str) -> StorageError {
    StorageError::Backend {
        message: format!("Redis error for key {key}: {err}"),
        source: Some(Box::new(err)),
    }
}

// ---------------------------------------------------------------------------
// StorageBackend implementation
// ---------------------------------------------------------------------------

#[async_trait]
impl StorageBackend for RedisBackend {
    async fn get(&self, key: &str) -> Result<Vec<u8>, StorageError> {
        let hash_key = self.task_key(key);
        let data: Option<String> = self
            .conn
            .clone()
            .hget(&hash_key, "data")
            .await
            .map_err(|e| map_redis_error(e, key))?;

        data.map(String::into_bytes)
            .ok_or_else(|| StorageError::NotFound {
                key: key.to_string(),
            })
    }

    async fn put(&self, key: &str, data: &[u8]) -> Result<(), StorageError> {
        let data_str = utf8(data)?;

        let script = Script::new(LUA_PUT);
        let created: i64 = script
            .key(self.task_key(key))
            .key(self.index_key())
            .key(self.seq_key())
            .arg(data_str)
            .arg(key)
            .invoke_async(&mut self.conn.clone())
            .await
            .map_err(|e| map_redis_error(e, key))?;

        tracing::trace!(key = key, created = created == 1, "redis put");
        Ok(())
    }

    async fn merge(&self, key: &str, fields: &[u8]) -> Result<Vec<u8>, StorageError> {
        let fields = utf8(fields)?;

        let script = Script::new(LUA_MERGE);
        let merged: Option<String> = script
            .key(self.task_key(key))
            .arg(fields)
            .invoke_async(&mut self.conn.clone())
            .await
            .map_err(|e| map_redis_error(e, key))?;

        merged
            .map(String::into_bytes)
            .ok_or_else(|| StorageError::NotFound {
                key: key.to_string(),
            })
    }

    async fn delete(&self, key: &str) -> Result<bool, StorageError> {
        let script = Script::new(LUA_DELETE);
        let result: i64 = script
            .key(self.task_key(key))
            .key(self.index_key())
            .arg(key)
            .invoke_async(&mut self.conn.clone())
            .await
            .map_err(|e| map_redis_error(e, key))?;

        Ok(result == 1)
    }

    async fn list(&self) -> Result<Vec<(String, Vec<u8>)>, StorageError> {
        let idx_key = self.index_key();
        let script = Script::new(LUA_LIST);
        let flat: Vec<String> = script
            .key(&idx_key)
            .arg(self.task_key(""))
            .invoke_async(&mut self.conn.clone())
            .await
            .map_err(|e| map_redis_error(e, &idx_key))?;

        Ok(pairs(flat))
    }

    async fn ping(&self) -> Result<(), StorageError> {
        let _: String = ::redis::cmd("PING")
            .query_async(&mut self.conn.clone())
            .await
            .map_err(|e| map_redis_error(e, "PING"))?;
        Ok(())
    }
}


// ---------------------------------------------------------------------------
// Integration tests -- Redis backend contract tests
// ---------------------------------------------------------------------------
