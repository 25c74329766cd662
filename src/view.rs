//! Plain-text cards for the terminal.

use std::fmt::Write;

use wanted_sync_lib::domain::{WantedRecord, DETAIL_FIELDS};
use wanted_sync_lib::text::camel_case;

/// Cards show at most this many images
const MAX_IMAGES: usize = 2;
const NO_DETAILS: &str = "No Details Available";

/// Render one record as a card
pub fn render_card(record: &WantedRecord) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== {} [{}]", record.fields.title, record.id);
    if !record.fields.url.is_empty() {
        let _ = writeln!(out, "   {}", record.fields.url);
    }

    for image in record.fields.images.iter().take(MAX_IMAGES) {
        match image.caption.as_deref().filter(|c| !c.is_empty()) {
            Some(caption) => {
                let _ = writeln!(out, "   image: {} ({})", image.large, caption);
            }
            None => {
                let _ = writeln!(out, "   image: {}", image.large);
            }
        }
    }

    let elaboration = record.elaboration().unwrap_or_else(|| NO_DETAILS.to_string());
    let _ = writeln!(out, "   {}", elaboration.trim());

    for (label, value) in record.detail_rows() {
        let _ = writeln!(out, "   {:<16}{}", format!("{}:", label), value);
    }
    out
}

/// Editable fields of a record, written the way `update` accepts them
pub fn render_edit_form(record: &WantedRecord) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "// Enter new details for {}", record.short_title());
    for key in DETAIL_FIELDS {
        let value = record.detail(key).unwrap_or_default();
        let _ = writeln!(out, "let {} = \"{}\";", camel_case(key), value);
    }
    let _ = writeln!(
        out,
        "// wanted-board update {} {}=<value> ...",
        record.id,
        camel_case(DETAIL_FIELDS[0])
    );
    out
}

/// Question shown before a delete goes through
pub fn render_delete_prompt(record: &WantedRecord) -> String {
    format!("Are you sure you want to delete {} ?", record.short_title())
}
