use std::fmt::Write;

use mas_dashboard::{Document, MarkupContract, RegionContent};

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";
const LOADING: &str = "…";

pub fn render_dashboard(doc: &Document, server_url: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n=== MAS Cluster Dashboard ===");
    let _ = writeln!(out, "  Source: {server_url}\n");

    let mut lists = Vec::new();
    for (id, content) in doc.regions() {
        let label = MarkupContract::label(id);
        match content {
            RegionContent::Empty => {
                let _ = writeln!(out, "  {:<16} {}", format!("{label}:"), LOADING);
            }
            RegionContent::Text(text) => {
                let _ = writeln!(out, "  {:<16} {}", format!("{label}:"), text);
            }
            RegionContent::Items(items) => lists.push((label, items)),
        }
    }

    for (label, items) in lists {
        let _ = writeln!(out, "\n[{label}]");
        for item in items {
            let _ = writeln!(out, "  - {}", item.text);
        }
    }
    out.push('\n');
    out
}

pub fn redraw(doc: &Document, server_url: &str) {
    print!("{CLEAR_SCREEN}{}", render_dashboard(doc, server_url));
}
