use crate::models::ImportMap;
use colored::Colorize;

/// Render one `<dir> [<import> ...]` line per directory.
///
/// The bracketed list is highlighted when `colorize` is set.
pub fn to_text(import_map: &ImportMap, colorize: bool) -> String {
    let mut output = String::new();

    for (dir, imports) in import_map.iter() {
        let list = format!("[{}]", imports.join(" "));
        if colorize {
            output.push_str(&format!("{} {}\n", dir, list.bright_blue()));
        } else {
            output.push_str(&format!("{} {}\n", dir, list));
        }
    }

    output
}
