use anyhow::Result;
use ship_classes::ClassStore;
use ship_classes_store::SqliteClassStore;

/// List stored shipping classes, sorted by slug.
pub async fn run(store: &SqliteClassStore) -> Result<()> {
    let classes = store.list().await.map_err(|e| anyhow::anyhow!("{e}"))?;

    if classes.is_empty() {
        println!("No shipping classes stored.");
        return Ok(());
    }

    let mut rows: Vec<_> = classes.into_values().collect();
    rows.sort_by(|a, b| a.slug.cmp(&b.slug));

    for class in rows {
        println!("{}  {}  (id {})", class.slug, class.name, class.id);
    }

    Ok(())
}
