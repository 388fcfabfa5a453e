//! Static HTML rendering.

use anyhow::{Context as _, Result};
use ferjo_storefront::{html_escape, render_grid_html};

use super::{load_page, RenderArgs};
use crate::context::Context;

/// Run the render command.
pub async fn run(args: RenderArgs, ctx: &Context) -> Result<()> {
    let page = load_page(&args.source, Some(&args.filter), ctx).await?;

    let options: String = page
        .categories()
        .iter()
        .map(|c| {
            let selected = if c == &args.filter.category { " selected" } else { "" };
            format!(r#"<option value="{0}"{1}>{0}</option>"#, html_escape(c), selected)
        })
        .collect();

    let document = format!(
        r#"<!DOCTYPE html>
<html lang="es">
<head>
    <meta charset="utf-8">
    <title>Catálogo FERJO</title>
</head>
<body>
    <header>
        <input id="q" type="search" value="{}">
        <select id="cat"><option value="">Todas</option>{}</select>
    </header>
    {}
    <footer>{}</footer>
</body>
</html>
"#,
        html_escape(&args.filter.query),
        options,
        render_grid_html(page.grid()),
        chrono::Local::now().format("%Y-%m-%d %H:%M"),
    );

    match args.output {
        Some(path) => {
            let path = ctx.resolve_path(&path);
            std::fs::write(&path, document)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            ctx.output.success(&format!(
                "Rendered {} card(s) to {}",
                page.cards().len(),
                path.display()
            ));
        }
        None => print!("{}", document),
    }

    Ok(())
}
