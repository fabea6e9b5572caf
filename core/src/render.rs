//! Plain-text block rendering shared by every documentation section.

use std::fmt;

/// Line closing every rendered block.
pub const SEPARATOR: &str = "-----------";

/// Placeholder written for values that are absent and have no default.
pub const NULL_TEXT: &str = "None";

/// Renders each item as a block and joins the blocks with one newline.
pub fn render_blocks<T: fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Displays an optional value, falling back to [`NULL_TEXT`].
pub(crate) struct OrNull<'a>(pub &'a Option<String>);

impl fmt::Display for OrNull<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_deref().unwrap_or(NULL_TEXT))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blocks_are_newline_joined() {
        let items = ["a\n-----------\n", "b\n-----------\n"];
        assert_eq!(render_blocks(&items), "a\n-----------\n\nb\n-----------\n");
        assert_eq!(render_blocks::<String>(&[]), "");
    }

    #[test]
    fn missing_values_render_placeholder() {
        assert_eq!(OrNull(&None).to_string(), "None");
        assert_eq!(OrNull(&Some("Import".to_string())).to_string(), "Import");
    }
}
