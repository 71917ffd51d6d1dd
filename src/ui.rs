use console::style;

pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

pub fn display_warning(message: &str) {
    eprintln!("{} {}", style("→").yellow(), message);
}

/// Plain text form of a missing-value notice, shared by the CLI and tests
pub fn absent_message(what: &str, path: &str) -> String {
    format!("No {} found for {}", what, path)
}
