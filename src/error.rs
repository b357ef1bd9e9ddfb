use std::{io, path::PathBuf};

use thiserror::Error;

use crate::fixture::Dataset;

/// Every failure is fatal to the run. Variants carry the dataset being
/// processed so the operator can tell which collection/file pair stopped it.
#[derive(Debug, Error)]
pub enum SeedError {
	#[error("{dataset}: fixture not found at {}", path.display())]
	FixtureNotFound { dataset: Dataset, path: PathBuf },

	#[error("{dataset}: reading {}", path.display())]
	FixtureRead {
		dataset: Dataset,
		path: PathBuf,
		#[source]
		source: io::Error,
	},

	#[error("{dataset}: {} is not a JSON array of documents", path.display())]
	FixtureParse {
		dataset: Dataset,
		path: PathBuf,
		#[source]
		source: serde_json::Error,
	},

	#[error("database unreachable at {target}")]
	Connection {
		target: String,
		#[source]
		source: surrealdb::Error,
	},

	#[error("{dataset}: {op} failed on collection {}", dataset.collection())]
	Write {
		dataset: Dataset,
		op: WriteOp,
		#[source]
		source: surrealdb::Error,
	},
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOp {
	Define,
	Count,
	Delete,
	Insert,
}

impl std::fmt::Display for WriteOp {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(match self {
			WriteOp::Define => "define",
			WriteOp::Count => "count",
			WriteOp::Delete => "delete",
			WriteOp::Insert => "insert",
		})
	}
}

impl SeedError {
	pub fn dataset(&self) -> Option<Dataset> {
		match self {
			SeedError::FixtureNotFound { dataset, .. }
			| SeedError::FixtureRead { dataset, .. }
			| SeedError::FixtureParse { dataset, .. }
			| SeedError::Write { dataset, .. } => Some(*dataset),
			SeedError::Connection { .. } => None,
		}
	}
}
