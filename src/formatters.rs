use crate::models::Product;
use crate::utils::{format_optional_timestamp, format_timestamp};

const MAX_NAME_WIDTH: usize = 30;

/// Shortens `name` to `MAX_NAME_WIDTH` characters, marking the cut with "..".
fn truncate_name(name: &str) -> String {
    if name.chars().count() <= MAX_NAME_WIDTH {
        return name.to_string();
    }
    let kept: String = name.chars().take(MAX_NAME_WIDTH - 2).collect();
    format!("{kept}..")
}

/// Multi-line detail view of a single product
pub fn format_product_details(product: &Product) -> String {
    let lines = [
        format!("Code       : {}", product.code),
        format!("Name       : {}", product.name),
        format!("Category   : {}", product.category),
        format!("Quantity   : {}", product.quantity),
        format!("Price      : {:.2}", product.price),
        format!("Description: {}", product.description),
        format!("Created    : {}", format_timestamp(&product.created_at)),
        format!(
            "Modified   : {}",
            format_optional_timestamp(product.modified_at.as_ref())
        ),
    ];
    let mut output = lines.join("\n");
    output.push('\n');
    output
}

/// Table of products with columns sized to their content
pub fn format_products_table(products: &[&Product]) -> String {
    let names: Vec<String> = products.iter().map(|p| truncate_name(&p.name)).collect();

    let width_code = products
        .iter()
        .map(|p| p.code.chars().count())
        .max()
        .unwrap_or(0)
        .max(4);
    let width_name = names
        .iter()
        .map(|n| n.chars().count())
        .max()
        .unwrap_or(0)
        .max(4);
    let width_cat = products
        .iter()
        .map(|p| p.category.chars().count())
        .max()
        .unwrap_or(0)
        .max(8);

    let mut output = format!(
        "{:<width_code$} | {:<width_name$} | {:<width_cat$} | {:>8} | {:>10}\n",
        "Code", "Name", "Category", "Quantity", "Price",
    );
    output.push_str(&format!(
        "{:-<width_code$}-+-{:-<width_name$}-+-{:-<width_cat$}-+-{:-<8}-+-{:-<10}\n",
        "", "", "", "", "",
    ));

    for (product, name) in products.iter().zip(&names) {
        output.push_str(&format!(
            "{:<width_code$} | {:<width_name$} | {:<width_cat$} | {:>8} | {:>10.2}\n",
            product.code, name, product.category, product.quantity, product.price,
        ));
    }
    output
}

/// Comma-separated category list, or "(none)"
pub fn format_categories(categories: &[String]) -> String {
    if categories.is_empty() {
        "(none)".to_string()
    } else {
        categories.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::models::NewProduct;

    #[test]
    fn table_has_header_separator_and_rows() {
        let mut catalog = Catalog::new();
        catalog
            .register(NewProduct::new("L001", "Cálculo I", 10, 45.5).with_category("Matemáticas"))
            .unwrap();
        catalog
            .register(NewProduct::new("P001", "Cuaderno", 3, 2.0))
            .unwrap();
        let products: Vec<&Product> = catalog.products().iter().collect();

        let table = format_products_table(&products);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Code"));
        assert!(lines[1].starts_with("----"));
        assert!(lines[2].contains("Cálculo I"));
        assert!(lines[2].ends_with("45.50"));
        assert!(lines[3].ends_with("2.00"));
    }

    #[test]
    fn long_names_are_truncated() {
        let long = "Introducción a la Programación Orientada a Objetos";
        let short = truncate_name(long);
        assert_eq!(short.chars().count(), MAX_NAME_WIDTH);
        assert!(short.ends_with(".."));
    }

    #[test]
    fn details_show_price_with_two_decimals() {
        let mut catalog = Catalog::new();
        let product = catalog
            .register(NewProduct::new("X1", "Lápiz", 1, 0.5))
            .unwrap();
        let details = format_product_details(product);
        assert!(details.contains("Price      : 0.50"));
        assert!(details.contains("Category   : Uncategorized"));
    }

    #[test]
    fn empty_category_list() {
        assert_eq!(format_categories(&[]), "(none)");
        assert_eq!(
            format_categories(&["A".to_string(), "B".to_string()]),
            "A, B"
        );
    }
}
