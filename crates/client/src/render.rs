use std::fmt::Write;

use crate::state::CatalogState;

pub const EMPTY_PLACEHOLDER: &str = "No products available in the store yet.";

/// Render the product list. Positions shown to the user are 1-based.
pub fn render_list(state: &CatalogState) -> String {
    let mut out = String::from("Product List\n");
    if state.is_empty() {
        out.push_str("[refresh]\n");
        out.push_str(EMPTY_PLACEHOLDER);
        out.push('\n');
        return out;
    }
    out.push_str("[refresh] [clear: delete all products]\n");
    for (i, p) in state.products().iter().enumerate() {
        let n = i + 1;
        let description = match p.description.as_deref() {
            Some(d) if !d.is_empty() => d,
            _ => "**Not provided**",
        };
        let _ = writeln!(out, "{n:>3}. {}", p.name);
        let _ = writeln!(out, "     Description: {description}");
        let _ = writeln!(out, "     Price: ${}", p.price);
        let _ = writeln!(out, "     [delete {n}] [edit {n}]");
    }
    out
}

/// Render the open edit form, if any.
pub fn render_edit_form(state: &CatalogState) -> Option<String> {
    let form = state.edit_form()?;
    let mut out = String::from("Update product\n");
    let _ = writeln!(out, "  Name: {}", form.values.name);
    let _ = writeln!(out, "  Description: {}", form.values.description);
    let _ = writeln!(out, "  Price ($): {}", form.values.price);
    out.push_str("  save <name> | <description> | <price>    or    save (keep values)    or    cancel\n");
    Some(out)
}

/// The whole page: list followed by the edit form when one is open.
pub fn render_page(state: &CatalogState) -> String {
    let mut page = render_list(state);
    if let Some(form) = render_edit_form(state) {
        page.push('\n');
        page.push_str(&form);
    }
    page
}
