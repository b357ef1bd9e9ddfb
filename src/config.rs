use std::path::PathBuf;

use rust_dotenv::dotenv::DotEnv;
use surrealdb::{Surreal, engine::any::Any, opt::auth::Root};
use tracing::info;

use crate::{core::create_surreal_client, error::SeedError};

pub const DEFAULT_DATABASE: &str = "magic-stream-movies";
pub const DEFAULT_FIXTURE_DIR: &str = "/seed-data";

#[derive(Debug, Clone)]
pub struct DbCfg {
	host: String,
	ns: String,
	db: String,
	user: String,
	pass: String,
	fixture_dir: PathBuf,
}

impl DbCfg {
	pub fn from_env(env: &DotEnv) -> Self {
		// .env first, then the process environment
		Self::from_lookup(|key| {
			env.get_var(key.to_string())
				.or_else(|| std::env::var(key).ok())
		})
	}

	pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
		let var = |key: &str, default: &str| {
			lookup(key)
				.filter(|v| !v.trim().is_empty())
				.unwrap_or_else(|| default.to_string())
		};

		Self {
			host: var("PUBLIC_DATABASE_HOST", "http://localhost:8000"),
			ns: var("PUBLIC_DATABASE_NAMESPACE", "db"),
			db: var("PUBLIC_DATABASE_NAME", DEFAULT_DATABASE),
			user: var("DATABASE_USER", "root"),
			pass: var("DATABASE_PASSWORD", "root"),
			fixture_dir: PathBuf::from(var("SEED_DATA_DIR", DEFAULT_FIXTURE_DIR)),
		}
	}

	pub fn with_fixture_dir(mut self, dir: Option<PathBuf>) -> Self {
		if let Some(dir) = dir {
			self.fixture_dir = dir;
		}
		self
	}

	pub fn fixture_dir(&self) -> &PathBuf {
		&self.fixture_dir
	}

	/// `host/ns/db`, used in logs and connection errors.
	pub fn target(&self) -> String {
		format!("{}/{}/{}", self.host, self.ns, self.db)
	}

	fn is_embedded(&self) -> bool {
		self.host.starts_with("mem://")
	}
}

pub async fn connect(cfg: &DbCfg) -> Result<Surreal<Any>, SeedError> {
	let connection_error = |source| SeedError::Connection {
		target: cfg.target(),
		source,
	};

	let db = create_surreal_client(&cfg.host)
		.await
		.map_err(connection_error)?;

	if !cfg.is_embedded() {
		db.signin(Root {
			username: cfg.user.to_string(),
			password: cfg.pass.to_string(),
		})
		.await
		.map_err(connection_error)?;
	}

	db.use_ns(&cfg.ns)
		.use_db(&cfg.db)
		.await
		.map_err(connection_error)?;

	info!(target = %cfg.target(), "connected");
	Ok(db)
}

#[cfg(test)]
mod tests {
	use std::collections::HashMap;

	use super::*;

	#[test]
	fn defaults_target_magic_stream_movies() {
		let cfg = DbCfg::from_lookup(|_| None);
		assert_eq!(cfg.target(), "http://localhost:8000/db/magic-stream-movies");
		assert_eq!(cfg.fixture_dir(), &PathBuf::from("/seed-data"));
	}

	#[test]
	fn lookup_overrides_and_blank_values_fall_back() {
		let vars: HashMap<&str, &str> = HashMap::from([
			("PUBLIC_DATABASE_HOST", "ws://db:8000"),
			("PUBLIC_DATABASE_NAME", "  "),
			("SEED_DATA_DIR", "./fixtures"),
		]);
		let cfg = DbCfg::from_lookup(|k| vars.get(k).map(|v| v.to_string()));
		assert_eq!(cfg.fixture_dir(), &PathBuf::from("./fixtures"));
		assert_eq!(cfg.target(), "ws://db:8000/db/magic-stream-movies");
	}

	#[test]
	fn cli_dir_wins_over_env() {
		let cfg = DbCfg::from_lookup(|_| None).with_fixture_dir(Some(PathBuf::from("data")));
		assert_eq!(cfg.fixture_dir(), &PathBuf::from("data"));

		let cfg = cfg.with_fixture_dir(None);
		assert_eq!(cfg.fixture_dir(), &PathBuf::from("data"));
	}

	#[tokio::test]
	async fn connects_to_embedded_engine_without_signin() {
		let vars: HashMap<&str, &str> = HashMap::from([("PUBLIC_DATABASE_HOST", "mem://")]);
		let cfg = DbCfg::from_lookup(|k| vars.get(k).map(|v| v.to_string()));
		let db = connect(&cfg).await.unwrap();
		crate::core::ping(&db, &cfg.target()).await.unwrap();
	}

	#[tokio::test]
	async fn unreachable_host_is_a_connection_error() {
		let vars: HashMap<&str, &str> = HashMap::from([("PUBLIC_DATABASE_HOST", "http://127.0.0.1:1")]);
		let cfg = DbCfg::from_lookup(|k| vars.get(k).map(|v| v.to_string()));

		match connect(&cfg).await {
			Err(SeedError::Connection { target, .. }) => {
				assert_eq!(target, "http://127.0.0.1:1/db/magic-stream-movies");
			}
			Err(other) => panic!("unexpected error: {other:?}"),
			Ok(_) => panic!("connected to a closed port"),
		}
	}
}
