//! Layer merging.

/// Recursively deep-merge `overlay` into `base`.
///
/// - Tables merge recursively per-field.
/// - Scalars and arrays from the overlay **replace** the base value.
pub fn deep_merge(base: &mut toml::Value, overlay: &toml::Value) {
    match (base, overlay) {
        (toml::Value::Table(base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                if let Some(base_val) = base_table.get_mut(key) {
                    deep_merge(base_val, overlay_val);
                } else {
                    base_table.insert(key.clone(), overlay_val.clone());
                }
            }
        },
        (base, overlay) => {
            *base = overlay.clone();
        },
    }
}

/// Set the dotted `path` in `root` to `value`, creating tables as needed.
///
/// Returns `false` if a non-table value sits on the way.
pub(crate) fn set_path(root: &mut toml::Value, path: &str, value: toml::Value) -> bool {
    let mut node = root;
    let mut parts = path.split('.').peekable();
    while let Some(part) = parts.next() {
        let Some(table) = node.as_table_mut() else {
            return false;
        };
        if parts.peek().is_none() {
            table.insert(part.to_owned(), value);
            return true;
        }
        node = table
            .entry(part.to_owned())
            .or_insert(toml::Value::Table(toml::map::Map::new()));
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> toml::Value {
        toml::from_str(s).unwrap()
    }

    #[test]
    fn tables_merge_and_scalars_replace() {
        let mut base = parse("[wizard]\npage_char_limit = 1000\nselection = \"menu\"");
        let overlay = parse("[wizard]\nselection = \"page\"");
        deep_merge(&mut base, &overlay);
        assert_eq!(base["wizard"]["page_char_limit"].as_integer(), Some(1000));
        assert_eq!(base["wizard"]["selection"].as_str(), Some("page"));
    }

    #[test]
    fn arrays_replace() {
        let mut base = parse("[logging]\ndirectives = [\"a=debug\"]");
        let overlay = parse("[logging]\ndirectives = [\"b=trace\"]");
        deep_merge(&mut base, &overlay);
        let dirs = base["logging"]["directives"].as_array().unwrap();
        assert_eq!(dirs.len(), 1);
        assert_eq!(dirs[0].as_str(), Some("b=trace"));
    }

    #[test]
    fn set_path_creates_tables() {
        let mut root = parse("");
        assert!(set_path(
            &mut root,
            "storage.data_dir",
            toml::Value::String("/tmp/x".into())
        ));
        assert_eq!(root["storage"]["data_dir"].as_str(), Some("/tmp/x"));
    }

    #[test]
    fn set_path_refuses_to_descend_into_scalars() {
        let mut root = parse("storage = 3");
        assert!(!set_path(
            &mut root,
            "storage.data_dir",
            toml::Value::String("/tmp/x".into())
        ));
    }
}
