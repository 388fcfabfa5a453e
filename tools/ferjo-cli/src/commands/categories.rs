//! Category options.

use anyhow::Result;
use ferjo_catalog::catalog::ProductRecord;

use super::{load_page, CategoriesArgs};
use crate::context::Context;

/// Run the categories command.
pub async fn run(args: CategoriesArgs, ctx: &Context) -> Result<()> {
    let page = load_page(&args.source, None, ctx).await?;
    let categories = page.categories();

    if ctx.output.is_json() {
        ctx.output.json(&categories);
        return Ok(());
    }

    ctx.output.header("Categorías");
    if categories.is_empty() {
        ctx.output.info("No categories found.");
    }
    for category in categories {
        let count = category_count(page.store().products(), category);
        ctx.output.list_item(&format!("{} ({})", category, count));
    }

    Ok(())
}

/// Products a category filter for `category` would keep.
fn category_count(products: &[ProductRecord], category: &str) -> usize {
    products.iter().filter(|p| p.category() == category).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ferjo_catalog::catalog::CatalogStore;
    use ferjo_catalog::search::{CatalogFilterEngine, CategorySelection};

    #[test]
    fn test_count_matches_category_filter() {
        let products = vec![
            ProductRecord::new("Martillo").with_category("Herramientas"),
            ProductRecord::new("Serrucho").with_category(" Herramientas "),
            ProductRecord::new("Clavo").with_category("Ferretería"),
        ];
        let count = category_count(&products, "Herramientas");

        let mut engine = CatalogFilterEngine::new(CatalogStore::new(products));
        engine.set_category(CategorySelection::from_select_value("Herramientas"));
        assert_eq!(count, 1);
        assert_eq!(engine.view().len(), count);
    }
}
