pub mod grid;

use grid_edit::{InMemoryRecordStore, Product, RecordStore, StaticSource};

/// The first page of the catalog the original demo edits.
pub fn northwind() -> Vec<Product> {
    let mut products = vec![
        Product::new("Chai", 18.0, 39),
        Product::new("Chang", 19.0, 17),
        Product::new("Aniseed Syrup", 10.0, 13),
        Product::new("Chef Anton's Cajun Seasoning", 22.0, 53),
        Product::new("Chef Anton's Gumbo Mix", 21.35, 0),
        Product::new("Grandma's Boysenberry Spread", 25.0, 86),
    ];
    for (i, p) in products.iter_mut().enumerate() {
        p.id = (i + 1) as u64;
    }
    products
}

pub fn loaded_store() -> InMemoryRecordStore<Product> {
    let store = InMemoryRecordStore::new();
    store.load(&StaticSource::new(northwind())).unwrap();
    store
}
