//! Catalog listing.

use anyhow::Result;
use serde::Serialize;

use super::{load_page, CatalogArgs};
use crate::context::Context;
use crate::output::{state_badge, truncate};

#[derive(Serialize)]
struct CatalogListing<'a> {
    total: usize,
    visible: usize,
    query: &'a str,
    category: &'a str,
    products: Vec<ListedProduct<'a>>,
}

#[derive(Serialize)]
struct ListedProduct<'a> {
    name: &'a str,
    code: &'a str,
    category: &'a str,
    price: String,
    stock: String,
    out_of_stock: bool,
    images: usize,
}

/// Run the catalog command.
pub async fn run(args: CatalogArgs, ctx: &Context) -> Result<()> {
    let page = load_page(&args.source, Some(&args.filter), ctx).await?;
    let view = page.engine().view();
    let settings = page.config();

    let products: Vec<ListedProduct<'_>> = view
        .iter()
        .map(|p| ListedProduct {
            name: p.display_name(),
            code: p.display_code(),
            category: p.category(),
            price: ferjo_catalog::format_price(
                p.price,
                Some(p.currency.as_deref().unwrap_or(&settings.default_currency)),
            ),
            stock: p.stock().label(),
            out_of_stock: p.is_out_of_stock(),
            images: p.image_sources().len(),
        })
        .collect();

    if ctx.output.is_json() {
        ctx.output.json(&CatalogListing {
            total: view.total(),
            visible: view.len(),
            query: page.engine().criteria().query(),
            category: page.engine().criteria().category().as_select_value(),
            products,
        });
        return Ok(());
    }

    ctx.output.header(&format!(
        "Catálogo FERJO ({} de {})",
        view.len(),
        view.total()
    ));

    if products.is_empty() {
        ctx.output.info("No products match the current filters.");
        return Ok(());
    }

    let widths = [32, 14, 18, 14, 12, 6];
    ctx.output
        .table_row(&["NAME", "CODE", "CATEGORY", "PRICE", "STOCK", "IMAGES"], &widths);
    for product in &products {
        let name = truncate(product.name, widths[0]);
        let code = truncate(product.code, widths[1]);
        let category = truncate(product.category, widths[2]);
        let stock = if product.out_of_stock {
            state_badge("out of stock")
        } else {
            product.stock.clone()
        };
        let images = product.images.to_string();
        ctx.output.table_row(
            &[
                name.as_str(),
                code.as_str(),
                category.as_str(),
                product.price.as_str(),
                stock.as_str(),
                images.as_str(),
            ],
            &widths,
        );
    }

    if view.out_of_stock_count() > 0 {
        ctx.output.info(&format!(
            "{} product(s) out of stock",
            view.out_of_stock_count()
        ));
    }

    Ok(())
}
