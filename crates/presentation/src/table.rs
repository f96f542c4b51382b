use crate::palette::Palette;
use crate::view::{SummaryView, TriangleView};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use core_types::Dataset;

/// Header of the corner cell of the triangle table.
pub const TRIANGLE_CORNER: &str = "Buy ↓ / Sell →";

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

pub fn render_summary_table(summary: &SummaryView) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        Cell::new(&summary.instrument).add_attribute(Attribute::Bold),
        Cell::new(""),
    ]);

    let rows = [
        ("Period", &summary.period),
        ("Average annual return", &summary.average_return),
        ("Total return", &summary.total_return),
        ("Final value", &summary.final_value),
    ];
    for (label, value) in rows {
        table.add_row(vec![
            Cell::new(label),
            Cell::new(value).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

/// Draws the triangle with buy years down the side and sell years across the
/// top. Each populated cell is painted in its band colour.
pub fn render_triangle_table(view: &TriangleView, palette: &Palette) -> Table {
    let mut table = new_table();

    let mut header = vec![Cell::new(TRIANGLE_CORNER).add_attribute(Attribute::Bold)];
    header.extend(
        view.years
            .iter()
            .map(|year| Cell::new(year).set_alignment(CellAlignment::Center)),
    );
    table.set_header(header);

    let foreground: Color = palette.foreground().into();
    for (buy_year, row) in view.years.iter().zip(&view.rows) {
        let mut cells = vec![Cell::new(buy_year).add_attribute(Attribute::Bold)];
        cells.extend(row.iter().map(|cell| match cell {
            Some(cell) => {
                let background: Color = palette.color(cell.band).into();
                Cell::new(&cell.text)
                    .set_alignment(CellAlignment::Right)
                    .bg(background)
                    .fg(foreground)
            }
            None => Cell::new(""),
        }));
        table.add_row(cells);
    }
    table
}

pub fn render_instruments_table(dataset: &Dataset) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Id", "Name", "First year", "Last year"]);
    for series in dataset.iter() {
        table.add_row(vec![
            Cell::new(series.id()),
            Cell::new(series.name()),
            Cell::new(series.first_year()).set_alignment(CellAlignment::Right),
            Cell::new(series.last_year()).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}
