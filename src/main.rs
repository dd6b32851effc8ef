use std::fs;
use std::io::Read;
use std::process;

use json_grid::config::Theme;
use json_grid::dom;
use json_grid::grid::RenderSession;

// Render a JSON document (file argument, or stdin when absent or "-") as
// a self-contained HTML page on stdout.
fn main() {
    let input = match read_input() {
        Ok(text) => text,
        Err(err) => {
            eprintln!("error reading input: {err}");
            process::exit(1);
        }
    };
    let doc: serde_json::Value = match serde_json::from_str(&input) {
        Ok(doc) => doc,
        Err(err) => {
            eprintln!("invalid JSON data: {err}");
            process::exit(1);
        }
    };
    let mut session = RenderSession::new();
    let Some(node) = session.render_document(&doc) else {
        eprintln!("nothing to render");
        return;
    };
    let root = dom::mount(&node);
    print!(
        "{}",
        dom::to_page("json-grid", Theme::Dark.storage_value(), &root)
    );
}

fn read_input() -> std::io::Result<String> {
    match std::env::args().nth(1) {
        Some(path) if path != "-" => fs::read_to_string(path),
        _ => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}
