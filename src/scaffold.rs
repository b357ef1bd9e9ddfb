use std::{fs, path::Path};

use anyhow::{Context, Result};
use tracing::debug;

use crate::{core::display, fixture::Dataset};

/// Creates `dir` with an empty `[]` fixture per dataset. Existing files are
/// left as they are.
pub fn scaffold(dir: &Path) -> Result<Vec<Dataset>> {
	fs::create_dir_all(dir).with_context(|| format!("creating {}", display(dir)))?;

	let mut created = Vec::new();
	for dataset in Dataset::ALL {
		let path = dataset.path_in(dir);
		if path.exists() {
			debug!(path = %crate::core::display(&path), "fixture exists, leaving it");
			continue;
		}
		fs::write(&path, "[]\n").with_context(|| format!("writing {}", display(&path)))?;
		created.push(dataset);
	}

	println!(
		"Scaffolded {} ({} new fixture file(s))",
		display(dir),
		created.len()
	);
	Ok(created)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::fixture::load_fixture;

	#[test]
	fn writes_loadable_empty_fixtures_without_clobbering() {
		let root = tempfile::tempdir().unwrap();
		let dir = root.path().join("seed-data");
		fs::create_dir_all(&dir).unwrap();
		fs::write(Dataset::Movies.path_in(&dir), r#"[{"title": "Heat"}]"#).unwrap();

		let created = scaffold(&dir).unwrap();
		assert_eq!(created, vec![Dataset::Genres, Dataset::Users, Dataset::Rankings]);

		assert_eq!(load_fixture(&dir, Dataset::Movies).unwrap().documents.len(), 1);
		for dataset in &created {
			assert!(load_fixture(&dir, *dataset).unwrap().documents.is_empty());
		}

		assert!(scaffold(&dir).unwrap().is_empty());
	}
}
