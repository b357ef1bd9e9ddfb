use std::{
	fmt, fs, io,
	path::{Path, PathBuf},
};

use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::error::SeedError;

/// An opaque fixture document. The seeder never looks inside it.
pub type Document = serde_json::Map<String, serde_json::Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Dataset {
	Movies,
	Genres,
	Users,
	Rankings,
}

impl Dataset {
	/// Processing order for a seed run.
	pub const ALL: [Dataset; 4] = [
		Dataset::Movies,
		Dataset::Genres,
		Dataset::Users,
		Dataset::Rankings,
	];

	pub fn collection(self) -> &'static str {
		match self {
			Dataset::Movies => "movies",
			Dataset::Genres => "genres",
			Dataset::Users => "users",
			Dataset::Rankings => "rankings",
		}
	}

	pub fn file_name(self) -> &'static str {
		match self {
			Dataset::Movies => "movies.json",
			Dataset::Genres => "genres.json",
			Dataset::Users => "users.json",
			Dataset::Rankings => "rankings.json",
		}
	}

	pub fn path_in(self, dir: &Path) -> PathBuf {
		dir.join(self.file_name())
	}
}

impl fmt::Display for Dataset {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.collection())
	}
}

#[derive(Debug, Clone)]
pub struct Fixture {
	pub dataset: Dataset,
	pub path: PathBuf,
	pub documents: Vec<Document>,
	/// sha256 of the raw file bytes
	pub digest: String,
}

pub fn load_fixture(dir: &Path, dataset: Dataset) -> Result<Fixture, SeedError> {
	let path = dataset.path_in(dir);

	// raw bytes so that non-UTF-8 content fails as a parse error
	let raw = match fs::read(&path) {
		Ok(raw) => raw,
		Err(e) if e.kind() == io::ErrorKind::NotFound => {
			return Err(SeedError::FixtureNotFound { dataset, path });
		}
		Err(source) => return Err(SeedError::FixtureRead { dataset, path, source }),
	};

	let documents: Vec<Document> = match serde_json::from_slice(&raw) {
		Ok(docs) => docs,
		Err(source) => return Err(SeedError::FixtureParse { dataset, path, source }),
	};

	let digest = sha256_hex(&raw);
	debug!(
		dataset = %dataset,
		path = %path.display(),
		documents = documents.len(),
		%digest,
		"loaded fixture"
	);

	Ok(Fixture {
		dataset,
		path,
		documents,
		digest,
	})
}

pub fn sha256_hex(bytes: &[u8]) -> String {
	let mut hasher = Sha256::new();
	hasher.update(bytes);
	hex::encode(hasher.finalize())
}
