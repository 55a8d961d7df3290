//! Post-download summary rendering

use crate::engine::{ItemRecord, ResultDescriptor};

/// Render the final report for a run
///
/// Three shapes: nothing downloaded, a single item, or a collection whose
/// absent entries (items skipped under ignore-errors) render nothing.
pub fn render(result: &ResultDescriptor) -> String {
    match result {
        ResultDescriptor::Nothing => "Nothing was downloaded.\n".to_string(),
        ResultDescriptor::Single(item) => format!("\n{}", render_item(item)),
        ResultDescriptor::Collection { title, items } => {
            let mut out = format!("\nPlaylist: {}\n", title.as_deref().unwrap_or("(unknown)"));
            for item in items.iter().flatten() {
                out.push_str(&render_item(item));
            }
            out
        }
    }
}

fn render_item(item: &ItemRecord) -> String {
    let title = item.title.as_deref().unwrap_or("Unknown Title");
    let path = item
        .filepath
        .as_deref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(unknown)".to_string());
    format!("Saved: {title}\n -> {path}\n")
}

/// Print the report to stdout
pub fn print_summary(result: &ResultDescriptor) {
    print!("{}", render(result));
}
