mod document;
mod escape;
mod render;

pub use document::{
    build_print_projection, Legend, LegendEntry, PrintAgendaDay, PrintBody, PrintCell,
    PrintDocument, PrintItem, PrintLegendItem, PrintSource, PRINT_ITEM_LIMIT, WEEKDAY_HEADERS,
};
pub use escape::{escape_html, escape_optional, EscapedText};
pub use render::render_html;
