use quadview_common::KeyBindings;

/// Key-binding help printed at startup, one binding per line.
pub fn help_lines(bindings: &KeyBindings) -> Vec<String> {
    bindings
        .describe()
        .into_iter()
        .map(|(key, what)| format!("{key}\t: {what}"))
        .collect()
}

pub fn help_text(bindings: &KeyBindings) -> String {
    help_lines(bindings).join("\n")
}
