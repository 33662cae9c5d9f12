use grocer_view::{CatalogPipeline, Column, OutputFormat, RowSet, TableView};
use std::io::Write;
use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Environment (.env, config, logger)
    let config = grocer_view::setup_environment();

    // 2. Document source
    let source = grocer_view::build_source(&config)?;

    // 3. Pipeline with the configured initial filter
    let mut pipeline =
        CatalogPipeline::spawn(source, config.pipeline_config(), config.initial_filter());

    // Debounce plus one request, at most
    let wait = config.pipeline_config().debounce + Duration::from_secs(config.request_timeout_secs);
    let row_set = match tokio::time::timeout(wait, pipeline.next_rows()).await {
        Ok(Some(row_set)) => row_set,
        Ok(None) => anyhow::bail!("Catalog pipeline stopped before publishing rows"),
        Err(_) => anyhow::bail!("Timed out waiting for catalog rows"),
    };

    pipeline.shutdown().await;

    let mut stdout = std::io::stdout().lock();
    match config.output {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut stdout, &row_set.rows)?;
            writeln!(stdout)?;
        }
        OutputFormat::Table => print_table(&mut stdout, &row_set, &TableView::new(config.page_size))?,
    }

    Ok(())
}

fn print_table(out: &mut impl Write, row_set: &RowSet, view: &TableView) -> std::io::Result<()> {
    let category = row_set
        .filter
        .category
        .map(|c| c.name())
        .unwrap_or("(no category)");
    let supermarket = row_set
        .filter
        .supermarket
        .map(|s| s.name())
        .unwrap_or("All supermarkets");
    writeln!(out, "{category} · {supermarket} · {} products", row_set.len())?;

    let columns: &[Column] = if row_set.filter.supermarket.is_some() {
        &Column::DISPLAYED
    } else {
        &Column::DISPLAYED_ALL_SUPERMARKETS
    };
    // Image URLs are too wide for a terminal table
    let columns: Vec<Column> = columns.iter().copied().filter(|c| *c != Column::Image).collect();

    let page = view.page(&row_set.rows);
    let cells: Vec<Vec<String>> = page
        .data
        .iter()
        .map(|row| columns.iter().map(|c| c.cell(row)).collect())
        .collect();

    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, c)| {
            cells
                .iter()
                .map(|r| r[i].chars().count())
                .chain(std::iter::once(c.header().len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let header: Vec<String> = columns
        .iter()
        .zip(&widths)
        .map(|(c, w)| format!("{:<w$}", c.header(), w = *w))
        .collect();
    writeln!(out, "{}", header.join("  "))?;

    for row in &cells {
        let line: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, w)| format!("{:<w$}", cell, w = *w))
            .collect();
        writeln!(out, "{}", line.join("  ").trim_end())?;
    }

    writeln!(out, "Page {}/{}", page.page, page.total_pages)
}
