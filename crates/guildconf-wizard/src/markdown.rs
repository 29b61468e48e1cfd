//! Chat markdown helpers.

/// `**text**`
pub fn bold(text: &str) -> String {
    format!("**{text}**")
}

/// `__text__`
pub fn underline(text: &str) -> String {
    format!("__{text}__")
}

/// `` `text` ``
pub fn code(text: &str) -> String {
    format!("`{text}`")
}

/// Block-quote a single line.
pub fn quote(line: &str) -> String {
    format!("> {line}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps() {
        assert_eq!(underline(&bold("Server")), "__**Server**__");
        assert_eq!(quote(&bold("Prefix:")), "> **Prefix:**");
        assert_eq!(code("3"), "`3`");
    }
}
