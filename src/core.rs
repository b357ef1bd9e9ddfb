use std::path::Path;
use surrealdb::{
	Surreal,
	engine::any::{Any, connect},
	opt::{Config, capabilities::Capabilities},
};
use tracing::debug;

use crate::{
	error::{SeedError, WriteOp},
	fixture::Dataset,
};

pub async fn create_surreal_client(address: &str) -> Result<Surreal<Any>, surrealdb::Error> {
	let config =
		Config::new().capabilities(Capabilities::all().with_all_experimental_features_allowed());

	connect((address, config)).await
}

/// Round-trips a trivial statement so an unreachable server fails before
/// anything is read or written.
pub async fn ping(db: &Surreal<Any>, target: &str) -> Result<(), SeedError> {
	let probe = async {
		db.query("RETURN true;").await?.check()?;
		Ok::<_, surrealdb::Error>(())
	};
	probe.await.map_err(|source| SeedError::Connection {
		target: target.to_string(),
		source,
	})
}

/// Defines the target tables if they are missing so counting and deleting
/// work against a fresh database.
pub async fn ensure_collections(db: &Surreal<Any>) -> Result<(), SeedError> {
	for dataset in Dataset::ALL {
		let sql = format!("DEFINE TABLE IF NOT EXISTS {} SCHEMALESS;", dataset.collection());
		let res = async {
			db.query(sql).await?.check()?;
			Ok::<_, surrealdb::Error>(())
		}
		.await;
		res.map_err(|source| SeedError::Write {
			dataset,
			op: WriteOp::Define,
			source,
		})?;
	}
	Ok(())
}

pub async fn count_documents(db: &Surreal<Any>, dataset: Dataset) -> Result<u64, SeedError> {
	let sql = format!("SELECT count() FROM {} GROUP ALL;", dataset.collection());
	let row = async {
		let mut resp = db.query(sql).await?.check()?;
		let row: Option<serde_json::Value> = resp.take(0)?;
		Ok::<_, surrealdb::Error>(row)
	}
	.await
	.map_err(|source| SeedError::Write {
		dataset,
		op: WriteOp::Count,
		source,
	})?;

	let count = row
		.as_ref()
		.and_then(|v| v.get("count"))
		.and_then(|v| v.as_u64())
		.unwrap_or(0);
	debug!(collection = dataset.collection(), count, "counted documents");
	Ok(count)
}

pub fn display(p: &Path) -> String {
	p.to_string_lossy().replace('\\', "/")
}
