//! Standalone HTML for a [`PrintDocument`].
//!
//! The page is an askama template. Document text is already [`EscapedText`] and is
//! emitted with `|safe`; everything else goes through the template's HTML escaper.

use askama::Template;

use super::document::{
    PrintAgendaDay, PrintBody, PrintCell, PrintDocument, PrintItem, PrintLegendItem,
};
use super::escape::EscapedText;

#[derive(Template)]
#[template(path = "print.html")]
struct PrintPage<'a> {
    title: &'a EscapedText,
    legend: &'a [PrintLegendItem],
    month: bool,
    weekdays: &'a [&'static str],
    rows: Vec<Vec<CellView<'a>>>,
    agenda: &'a [PrintAgendaDay],
}

/// A month cell flattened for the template.
struct CellView<'a> {
    blank: bool,
    class: &'static str,
    day: u32,
    items: &'a [PrintItem],
    more: String,
}

impl<'a> CellView<'a> {
    fn new(cell: &'a PrintCell) -> Self {
        match cell {
            PrintCell::Blank => Self {
                blank: true,
                class: "blank",
                day: 0,
                items: &[],
                more: String::new(),
            },
            PrintCell::Day {
                day,
                is_holiday,
                items,
                ..
            } => Self {
                blank: false,
                class: if *is_holiday { "day-cell holiday" } else { "day-cell" },
                day: *day,
                items,
                more: cell.overflow_label().unwrap_or_default(),
            },
        }
    }
}

/// Renders a print document as a complete HTML page.
pub fn render_html(document: &PrintDocument) -> askama::Result<String> {
    let page = match &document.body {
        PrintBody::Month { weekdays, rows } => PrintPage {
            title: &document.title,
            legend: &document.legend,
            month: true,
            weekdays,
            rows: rows
                .iter()
                .map(|row| row.iter().map(CellView::new).collect())
                .collect(),
            agenda: &[],
        },
        PrintBody::Agenda { days } => PrintPage {
            title: &document.title,
            legend: &document.legend,
            month: false,
            weekdays: &[],
            rows: Vec::new(),
            agenda: days,
        },
    };
    page.render()
}
