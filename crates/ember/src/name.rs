//! Maps human-readable effect names onto GPU function identifiers.

/// Converts a display name to the function identifier it must match: the
/// first character is lower-cased and all spaces are removed. "Gradient
/// Fill" becomes "gradientFill".
///
/// The transform is deterministic and idempotent on its own output. A name
/// that resolves to a function the runtime does not export is a build-time
/// mistake; `ShaderLibrary::check` surfaces it before any frame is drawn.
pub fn function_name(display: &str) -> String {
    let mut chars = display.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let mut name = String::with_capacity(display.len());
    name.extend(first.to_lowercase().filter(|ch| *ch != ' '));
    name.extend(chars.filter(|ch| *ch != ' '));
    name
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_first_character_and_strips_spaces() {
        assert_eq!(function_name("Gradient Fill"), "gradientFill");
        assert_eq!(function_name("Checkerboard"), "checkerboard");
        assert_eq!(function_name("Invert Alpha"), "invertAlpha");
    }

    #[test]
    fn is_idempotent() {
        let once = function_name("Animated Gradient Fill");
        assert_eq!(function_name(&once), once);
    }

    #[test]
    fn handles_degenerate_inputs() {
        assert_eq!(function_name(""), "");
        assert_eq!(function_name("X"), "x");
        assert_eq!(function_name(" Leading"), "Leading");
    }
}
