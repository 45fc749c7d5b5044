use product_inventory::{
    Confirmation, Inventory, InventoryError, NewProduct, ProductUpdate, StockAdjustment, Store,
    UNCATEGORIZED,
};
use tempfile::TempDir;

fn open(dir: &TempDir) -> Inventory {
    Inventory::open(Store::new(dir.path().join("products.json")))
}

fn reload(inventory: &Inventory) -> product_inventory::Catalog {
    inventory.store().load()
}

#[test]
fn test_bookstore_scenario() {
    let dir = TempDir::new().unwrap();
    let mut inventory = open(&dir);

    inventory
        .register(NewProduct::new("L001", "Cálculo I", 10, 45.50).with_category("Matemáticas"))
        .unwrap();
    let found = inventory.catalog().find_by_code("l001").unwrap();
    assert_eq!(found.name, "Cálculo I");

    let quantity = inventory
        .adjust_stock("L001", StockAdjustment::Decrement(3))
        .unwrap();
    assert_eq!(quantity, 7);

    let err = inventory
        .adjust_stock("L001", StockAdjustment::Decrement(100))
        .unwrap_err();
    assert!(matches!(err, InventoryError::InsufficientStock { .. }));
    assert_eq!(inventory.catalog().find_by_code("L001").unwrap().quantity, 7);
    assert_eq!(reload(&inventory).find_by_code("L001").unwrap().quantity, 7);

    inventory.rename_category("Matemáticas", "Ciencias").unwrap();
    assert_eq!(
        inventory.catalog().find_by_code("L001").unwrap().category,
        "Ciencias"
    );

    inventory.delete_category("Ciencias").unwrap();
    let product = inventory.catalog().find_by_code("L001").unwrap();
    assert_eq!(product.category, UNCATEGORIZED);
    assert!(!inventory.catalog().has_category("Ciencias"));

    // Everything above was persisted
    assert_eq!(&reload(&inventory), inventory.catalog());
}

#[test]
fn test_register_persists_immediately() {
    let dir = TempDir::new().unwrap();
    let mut inventory = open(&dir);
    inventory
        .register(NewProduct::new("A1", "Regla", 5, 1.5))
        .unwrap();

    let reopened = open(&dir);
    assert_eq!(reopened.catalog().len(), 1);
    assert_eq!(reopened.catalog().find_by_code("a1").unwrap().name, "Regla");
}

#[test]
fn test_duplicate_code_leaves_document_unchanged() {
    let dir = TempDir::new().unwrap();
    let mut inventory = open(&dir);
    inventory
        .register(NewProduct::new("A1", "Regla", 5, 1.5))
        .unwrap();
    let before = reload(&inventory);

    let err = inventory
        .register(NewProduct::new("a1", "Compás", 1, 3.0).with_category("Geometría"))
        .unwrap_err();
    assert!(matches!(err, InventoryError::DuplicateCode(_)));
    assert_eq!(inventory.catalog(), &before);
    assert_eq!(reload(&inventory), before);
}

#[test]
fn test_distinct_codes_never_shadow_each_other() {
    let dir = TempDir::new().unwrap();
    let mut inventory = open(&dir);
    inventory.register(NewProduct::new("AB", "First", 1, 1.0)).unwrap();
    inventory.register(NewProduct::new("ab-2", "Second", 2, 2.0)).unwrap();

    assert_eq!(inventory.catalog().find_by_code("ab").unwrap().name, "First");
    assert_eq!(inventory.catalog().find_by_code("AB-2").unwrap().name, "Second");
}

#[test]
fn test_modify_partial_update_persists() {
    let dir = TempDir::new().unwrap();
    let mut inventory = open(&dir);
    inventory
        .register(NewProduct::new("A1", "Regla", 5, 1.5).with_description("30 cm"))
        .unwrap();

    let outcome = inventory
        .modify(
            "a1",
            ProductUpdate::default()
                .price("-2")
                .quantity("8")
                .category("Geometría"),
        )
        .unwrap();
    assert_eq!(outcome.changed, vec!["category", "quantity"]);
    assert_eq!(outcome.rejected.len(), 1);
    assert_eq!(outcome.rejected[0].field, "price");

    let stored = reload(&inventory);
    let product = stored.find_by_code("A1").unwrap();
    assert_eq!(product.quantity, 8);
    assert_eq!(product.price, 1.5);
    assert_eq!(product.description, "30 cm");
    assert!(product.modified_at.is_some());
    assert!(stored.has_category("Geometría"));
}

#[test]
fn test_delete_declined_is_noop() {
    let dir = TempDir::new().unwrap();
    let mut inventory = open(&dir);
    inventory.register(NewProduct::new("A1", "Regla", 5, 1.5)).unwrap();

    let answer = Confirmation::from_answer("n");
    assert!(inventory.delete("A1", answer).unwrap().is_none());
    assert_eq!(reload(&inventory).len(), 1);

    let answer = Confirmation::from_answer(" S ");
    assert!(inventory.delete("a1", answer).unwrap().is_some());
    assert!(reload(&inventory).is_empty());
}

#[test]
fn test_not_found_errors() {
    let dir = TempDir::new().unwrap();
    let mut inventory = open(&dir);

    assert!(matches!(
        inventory.adjust_stock("X", StockAdjustment::Set(1)),
        Err(InventoryError::ProductNotFound(_))
    ));
    assert!(matches!(
        inventory.modify("X", ProductUpdate::default().name("Y")),
        Err(InventoryError::ProductNotFound(_))
    ));
    assert!(matches!(
        inventory.delete("X", Confirmation::Confirmed),
        Err(InventoryError::ProductNotFound(_))
    ));
    assert!(matches!(
        inventory.delete_category("X"),
        Err(InventoryError::CategoryNotFound(_))
    ));
    // Nothing was ever written
    assert!(!inventory.store().exists());
}

#[test]
fn test_quantities_stay_non_negative_after_mixed_operations() {
    let dir = TempDir::new().unwrap();
    let mut inventory = open(&dir);
    inventory.register(NewProduct::new("A1", "Regla", 2, 1.5)).unwrap();

    let steps = [
        StockAdjustment::Decrement(3),
        StockAdjustment::Increment(4),
        StockAdjustment::Decrement(6),
        StockAdjustment::Decrement(6),
        StockAdjustment::Set(0),
        StockAdjustment::Decrement(1),
    ];
    let mut expected = 2u32;
    for step in steps {
        let result = inventory.adjust_stock("A1", step);
        expected = match step {
            StockAdjustment::Set(n) => n,
            StockAdjustment::Increment(n) => expected + n,
            StockAdjustment::Decrement(n) if n <= expected => expected - n,
            StockAdjustment::Decrement(_) => {
                assert!(result.is_err());
                expected
            }
        };
        assert_eq!(inventory.catalog().find_by_code("A1").unwrap().quantity, expected);
    }
    assert_eq!(expected, 0);
}

#[test]
fn test_failed_save_leaves_catalog_unchanged() {
    let dir = TempDir::new().unwrap();
    let doc = dir.path().join("products.json");
    let mut inventory = Inventory::open(Store::new(&doc));
    inventory.register(NewProduct::new("A1", "Regla", 5, 1.5)).unwrap();

    // A directory in place of the document makes every save fail
    std::fs::remove_file(&doc).unwrap();
    std::fs::create_dir(&doc).unwrap();

    let err = inventory
        .register(NewProduct::new("B1", "Compás", 1, 3.0))
        .unwrap_err();
    assert!(matches!(err, InventoryError::Io(_)));
    assert_eq!(inventory.catalog().len(), 1);
    assert!(inventory.catalog().find_by_code("B1").is_none());

    assert!(inventory.adjust_stock("A1", StockAdjustment::Set(9)).is_err());
    assert!(inventory.create_category("Geometría").is_err());
    assert!(inventory
        .modify("A1", ProductUpdate::default().name("Regla 30 cm"))
        .is_err());
    assert!(inventory.delete("A1", Confirmation::Confirmed).is_err());

    let product = inventory.catalog().find_by_code("A1").unwrap();
    assert_eq!(product.quantity, 5);
    assert_eq!(product.name, "Regla");
    assert!(product.modified_at.is_none());
    assert!(!inventory.catalog().has_category("Geometría"));

    // Once the document is writable again the same register goes through
    std::fs::remove_dir(&doc).unwrap();
    inventory
        .register(NewProduct::new("B1", "Compás", 1, 3.0))
        .unwrap();
    assert_eq!(reload(&inventory).len(), 2);
}
