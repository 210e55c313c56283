//! SPA-JSON rendering
//!
//! Siblings are ordered by (priority, declaration index) with a stable sort,
//! so an explicit priority moves an entry while equal priorities keep the
//! order they were declared in. Top-level pairs go on their own lines;
//! nested pairs are separated by single spaces.

use crate::error::FormatError;
use crate::path::KeyPath;
use crate::value::{ConfigTree, ConfigValue, Scalar};

/// Render a document in the daemon's block-configuration syntax.
///
/// Each top-level pair is written on its own line, and the output of a
/// non-empty tree ends with a newline.
pub fn to_spa_json(tree: &ConfigTree) -> Result<String, FormatError> {
    let mut out = String::new();
    for pair in render_pairs(tree, &KeyPath::root())? {
        out.push_str(&pair);
        out.push('\n');
    }
    Ok(out)
}

fn render_pairs(tree: &ConfigTree, path: &KeyPath) -> Result<Vec<String>, FormatError> {
    let mut ordered: Vec<(i64, usize, &String, &ConfigValue)> = tree
        .iter()
        .enumerate()
        .map(|(index, (key, value))| (value.priority(), index, key, value))
        .collect();
    ordered.sort_by_key(|(priority, index, _, _)| (*priority, *index));

    ordered
        .into_iter()
        .map(|(_, _, key, value)| -> Result<String, FormatError> {
            let rendered = render_value(value, &path.child(key.as_str()))?;
            Ok(format!("{} = {}", escape_key(key), rendered))
        })
        .collect()
}

fn render_value(value: &ConfigValue, path: &KeyPath) -> Result<String, FormatError> {
    match value {
        ConfigValue::Scalar(scalar) => render_scalar(scalar, path),
        ConfigValue::List(items) => {
            let rendered = items
                .iter()
                .enumerate()
                .map(|(i, item)| render_value(item, &path.child(format!("[{}]", i))))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(format!("[{}]", rendered.join(" ")))
        }
        ConfigValue::Tree(tree) => Ok(format!("{{{}}}", render_pairs(tree, path)?.join(" "))),
        // Priority only orders siblings; the wrapper itself is invisible.
        ConfigValue::Entry(entry) => render_value(&entry.content, path),
    }
}

fn render_scalar(scalar: &Scalar, path: &KeyPath) -> Result<String, FormatError> {
    match scalar {
        Scalar::Null => Ok("null".to_string()),
        Scalar::Bool(b) => Ok(b.to_string()),
        Scalar::Integer(i) => Ok(i.to_string()),
        Scalar::Float(f) if f.is_finite() => Ok(format!("{:?}", f)),
        Scalar::Float(f) => Err(FormatError::NonFiniteNumber {
            path: path.clone(),
            value: *f,
        }),
        Scalar::String(s) => Ok(quote(s)),
    }
}

fn escape_key(key: &str) -> String {
    key.replace('=', "\\=")
}

fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Entry;

    #[test]
    fn test_scalars() {
        let tree = ConfigTree::new()
            .with("a", true)
            .with("b", 48000)
            .with("c", 0.5)
            .with("d", Scalar::Null)
            .with("e", "text");

        assert_eq!(
            to_spa_json(&tree).unwrap(),
            "a = true\nb = 48000\nc = 0.5\nd = null\ne = \"text\"\n"
        );
    }

    #[test]
    fn test_string_escaping() {
        let tree = ConfigTree::new().with("k", "foo\"bar").with("p", "C:\\dir");
        assert_eq!(to_spa_json(&tree).unwrap(), "k = \"foo\\\"bar\"\np = \"C:\\\\dir\"\n");
    }

    #[test]
    fn test_key_escaping() {
        let tree = ConfigTree::new().with("a=b", 1);
        assert_eq!(to_spa_json(&tree).unwrap(), "a\\=b = 1\n");
    }

    #[test]
    fn test_nested_rendering() {
        let tree = ConfigTree::new().with(
            "context.exec",
            ConfigTree::new().with(
                "/usr/bin/pipewire-media-session",
                ConfigTree::new().with("args", "-p foo"),
            ),
        );
        assert_eq!(
            to_spa_json(&tree).unwrap(),
            "context.exec = {/usr/bin/pipewire-media-session = {args = \"-p foo\"}}\n"
        );
    }

    #[test]
    fn test_lists() {
        let tree = ConfigTree::new()
            .with("flags", vec![ConfigValue::from("ifexists"), ConfigValue::from("nofail")])
            .with("empty", Vec::<ConfigValue>::new())
            .with("nested", vec![ConfigValue::from(ConfigTree::new().with("name", "x"))]);

        assert_eq!(
            to_spa_json(&tree).unwrap(),
            "flags = [\"ifexists\" \"nofail\"]\nempty = []\nnested = [{name = \"x\"}]\n"
        );
    }

    #[test]
    fn test_priority_law() {
        let modules = ConfigTree::new()
            .with("libpipewire-module-profiler", Entry::new(1000, ConfigTree::new()))
            .with("libpipewire-module-protocol-native", Entry::new(-100, ConfigTree::new()));
        let tree = ConfigTree::new().with("context.modules", modules);

        assert_eq!(
            to_spa_json(&tree).unwrap(),
            "context.modules = {libpipewire-module-protocol-native = {} libpipewire-module-profiler = {}}\n"
        );
    }

    #[test]
    fn test_tie_law() {
        let tree = ConfigTree::new()
            .with("zeta", 1)
            .with("alpha", Entry::new(1000, 2))
            .with("mid", 3);
        assert_eq!(to_spa_json(&tree).unwrap(), "zeta = 1\nalpha = 2\nmid = 3\n");
    }

    #[test]
    fn test_top_level_priority() {
        let tree = ConfigTree::new()
            .with("context.modules", ConfigTree::new())
            .with("context.properties", Entry::new(0, ConfigTree::new()));
        assert_eq!(
            to_spa_json(&tree).unwrap(),
            "context.properties = {}\ncontext.modules = {}\n"
        );
    }

    #[test]
    fn test_deterministic() {
        let tree = ConfigTree::new()
            .with("b", Entry::new(3, "x"))
            .with("a", vec![ConfigValue::from(1), ConfigValue::from(2.5)]);
        assert_eq!(to_spa_json(&tree).unwrap(), to_spa_json(&tree).unwrap());
    }

    #[test]
    fn test_empty_tree() {
        assert_eq!(to_spa_json(&ConfigTree::new()).unwrap(), "");
    }

    #[test]
    fn test_non_finite_float_fails() {
        let tree = ConfigTree::new().with("section", ConfigTree::new().with("rate", f64::NAN));
        let err = to_spa_json(&tree).unwrap_err();
        assert!(err.to_string().contains("\"section\".\"rate\""));
    }
}
