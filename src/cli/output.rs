//! Output formatting utilities
//!
//! Stored text is user-supplied, so every field goes through `sanitize`
//! before it reaches the terminal.

use crate::domain::{EntryView, StoreView};

/// Replace control characters so stored text cannot emit terminal escapes
pub fn sanitize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if c.is_control() {
            out.extend(c.escape_default());
        } else {
            out.push(c);
        }
    }
    out
}

/// Format all entries, marking the selected one with `*`
pub fn format_entry_list(view: &StoreView) -> String {
    if view.is_empty() {
        return "No references yet. Add one with 'gptref add <NAME> <REF>'".to_string();
    }

    let mut output = format!("{} reference(s)\n", view.count);
    for item in &view.items {
        output.push('\n');
        let marker = if item.is_selected { '*' } else { ' ' };
        output.push_str(&format!("{} {}\n", marker, sanitize(&item.name)));
        output.push_str(&format_details(item));
    }
    output
}

/// Format the selected entry, or a placeholder when there is none
pub fn format_selected(view: &StoreView) -> String {
    match &view.selected {
        Some(item) => format!("{}\n{}", sanitize(&item.name), format_details(item)),
        None => "No reference selected".to_string(),
    }
}

fn format_details(item: &EntryView) -> String {
    let mut output = String::new();
    output.push_str(&format!("    id:    {}\n", sanitize(&item.id)));
    output.push_str(&format!("    ref:   {}\n", sanitize(&item.reference)));
    if let Some(description) = &item.description {
        output.push_str(&format!("    about: {}\n", sanitize(description)));
    }
    output.push_str(&format!(
        "    added: {}\n",
        item.added_on.format("%-d %B %Y")
    ));
    output
}
