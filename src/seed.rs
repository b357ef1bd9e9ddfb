use std::path::Path;

use serde::Serialize;
use surrealdb::{Surreal, engine::any::Any};
use tracing::{info, warn};

use crate::{
	core::{count_documents, display, ensure_collections, ping},
	error::{SeedError, WriteOp},
	fixture::{Dataset, Document, Fixture, load_fixture},
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SeedMode {
	/// Always clear and repopulate.
	#[default]
	Overwrite,
	/// Leave the database alone if any target collection already holds data.
	SkipIfPopulated,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CollectionReport {
	pub dataset: Dataset,
	pub deleted: u64,
	pub inserted: u64,
	pub digest: String,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct SeedSummary {
	pub collections: Vec<CollectionReport>,
}

impl SeedSummary {
	pub fn total_inserted(&self) -> u64 {
		self.collections.iter().map(|r| r.inserted).sum()
	}
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SeedOutcome {
	Seeded(SeedSummary),
	Skipped { populated: Vec<Dataset> },
}

/// Replaces the contents of every collection in [`Dataset::ALL`] with its
/// fixture file. Pairs run in order and are not rolled back: an error on one
/// leaves earlier collections already replaced.
pub async fn run(
	db: &Surreal<Any>,
	target: &str,
	fixture_dir: &Path,
	mode: SeedMode,
) -> Result<SeedOutcome, SeedError> {
	ping(db, target).await?;
	ensure_collections(db).await?;

	if mode == SeedMode::SkipIfPopulated {
		let populated = populated_collections(db).await?;
		if !populated.is_empty() {
			warn!(?populated, "data already exists, skipping seed");
			return Ok(SeedOutcome::Skipped { populated });
		}
	}

	info!(dir = %crate::core::display(fixture_dir), "seeding from fixtures");

	let mut summary = SeedSummary::default();
	for dataset in Dataset::ALL {
		let fixture = load_fixture(fixture_dir, dataset)?;
		let file = display(&fixture.path);
		let report = replace_collection(db, fixture).await?;
		info!(
			collection = dataset.collection(),
			%file,
			deleted = report.deleted,
			inserted = report.inserted,
			"replaced collection"
		);
		summary.collections.push(report);
	}

	Ok(SeedOutcome::Seeded(summary))
}

async fn populated_collections(db: &Surreal<Any>) -> Result<Vec<Dataset>, SeedError> {
	let mut populated = Vec::new();
	for dataset in Dataset::ALL {
		if count_documents(db, dataset).await? > 0 {
			populated.push(dataset);
		}
	}
	Ok(populated)
}

async fn replace_collection(
	db: &Surreal<Any>,
	fixture: Fixture,
) -> Result<CollectionReport, SeedError> {
	let Fixture {
		dataset,
		documents,
		digest,
		..
	} = fixture;
	let deleted = delete_all(db, dataset).await?;

	let inserted = if documents.is_empty() {
		0
	} else {
		insert_all(db, dataset, documents).await?
	};

	Ok(CollectionReport {
		dataset,
		deleted,
		inserted,
		digest,
	})
}

async fn delete_all(db: &Surreal<Any>, dataset: Dataset) -> Result<u64, SeedError> {
	let existing = count_documents(db, dataset).await?;

	// Collection names come from the closed Dataset set, never from input.
	let sql = format!("DELETE {};", dataset.collection());
	let res = async {
		db.query(sql).await?.check()?;
		Ok::<_, surrealdb::Error>(())
	}
	.await;
	res.map_err(|source| SeedError::Write {
		dataset,
		op: WriteOp::Delete,
		source,
	})?;

	Ok(existing)
}

/// A top-level `id` key becomes the record id (`movies:<id>`) rather than a
/// plain field; every other key is stored as written.
async fn insert_all(
	db: &Surreal<Any>,
	dataset: Dataset,
	documents: Vec<Document>,
) -> Result<u64, SeedError> {
	let count = documents.len() as u64;
	let docs = serde_json::Value::Array(
		documents.into_iter().map(serde_json::Value::Object).collect(),
	);

	let sql = format!("INSERT INTO {} $docs RETURN NONE;", dataset.collection());
	let res = async {
		db.query(sql).bind(("docs", docs)).await?.check()?;
		Ok::<_, surrealdb::Error>(())
	}
	.await;
	res.map_err(|source| SeedError::Write {
		dataset,
		op: WriteOp::Insert,
		source,
	})?;

	Ok(count)
}

pub fn print_summary(outcome: &SeedOutcome) {
	match outcome {
		SeedOutcome::Skipped { populated } => {
			let names: Vec<&str> = populated.iter().map(|d| d.collection()).collect();
			println!("skipped: already seeded ({})", names.join(", "));
		}
		SeedOutcome::Seeded(summary) => {
			for r in &summary.collections {
				println!(
					"{:<9} deleted {:>6}  inserted {:>6}  {}",
					r.dataset.collection(),
					r.deleted,
					r.inserted,
					&r.digest[..12.min(r.digest.len())]
				);
			}
			println!("seed complete: {} document(s) inserted", summary.total_inserted());
		}
	}
}
