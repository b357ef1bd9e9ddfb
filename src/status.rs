use surrealdb::{Surreal, engine::any::Any};

use crate::{
	core::{count_documents, ensure_collections},
	error::SeedError,
	fixture::Dataset,
};

pub async fn collection_counts(db: &Surreal<Any>) -> Result<Vec<(Dataset, u64)>, SeedError> {
	ensure_collections(db).await?;

	let mut counts = Vec::with_capacity(Dataset::ALL.len());
	for dataset in Dataset::ALL {
		counts.push((dataset, count_documents(db, dataset).await?));
	}
	Ok(counts)
}

pub async fn status(db: &Surreal<Any>) -> Result<(), SeedError> {
	let counts = collection_counts(db).await?;

	if counts.iter().all(|(_, n)| *n == 0) {
		println!("No seeded data found");
	}
	for (dataset, n) in counts {
		println!("{:<9} {n}", dataset.collection());
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use surrealdb::engine::any::connect;

	use super::*;

	#[tokio::test]
	async fn counts_each_collection_in_order() {
		let db = connect("mem://").await.unwrap();
		db.use_ns("test").use_db("status").await.unwrap();
		db.query("CREATE genres CONTENT { genre_name: 'Comedy' }; CREATE genres CONTENT { genre_name: 'Drama' };")
			.await
			.unwrap()
			.check()
			.unwrap();

		let counts = collection_counts(&db).await.unwrap();
		assert_eq!(
			counts,
			vec![
				(Dataset::Movies, 0),
				(Dataset::Genres, 2),
				(Dataset::Users, 0),
				(Dataset::Rankings, 0),
			]
		);
	}
}
