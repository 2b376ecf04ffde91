//! Build configuration handed to every descriptor.
//!
//! [`ConfigH`] is the key/value view of a generated `config.h`:
//!
//! ```
//! use dune_pymor::ConfigH;
//!
//! let config = ConfigH::from_header_str(
//!     "#define HAVE_DUNE_ISTL 1\n\
//!      #define HAVE_EIGEN\n\
//!      /* #undef HAVE_ALUGRID */\n",
//! )?;
//! assert_eq!(config.get("HAVE_DUNE_ISTL"), Some("1"));
//! assert_eq!(config.get("HAVE_EIGEN"), Some("1"));
//! assert!(!config.is_defined("HAVE_ALUGRID"));
//! # Ok::<(), dune_pymor::ConfigurationError>(())
//! ```

use dune_pymor_core::ConfigurationError;
use rustc_hash::FxHashMap;

/// Configuration macros and their values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigH {
    defines: FxHashMap<String, String>,
}

impl ConfigH {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the `#define` lines of a `config.h`.
    ///
    /// `#define KEY VALUE` maps `KEY` to `VALUE`, a bare `#define KEY` maps it
    /// to `"1"`. Function-like macros, `#undef` comments and every other line
    /// are skipped. Later definitions of a key replace earlier ones.
    pub fn from_header_str(source: &str) -> Result<Self, ConfigurationError> {
        let mut config = Self::new();
        for (index, line) in source.lines().enumerate() {
            let Some(rest) = directive(line.trim(), "define") else {
                continue;
            };
            let mut parts = rest.splitn(2, char::is_whitespace);
            let key = parts.next().unwrap_or_default();
            if key.is_empty() {
                return Err(ConfigurationError::InvalidConfigLine {
                    line: index + 1,
                    detail: "#define without a name".into(),
                });
            }
            if key.contains('(') {
                continue;
            }
            if !key.chars().all(|c| c == '_' || c.is_ascii_alphanumeric()) {
                return Err(ConfigurationError::InvalidConfigLine {
                    line: index + 1,
                    detail: format!("invalid macro name '{key}'"),
                });
            }
            let value = parts.next().map(str::trim).unwrap_or_default();
            let value = if value.is_empty() { "1" } else { value };
            config.insert(key, value);
        }
        Ok(config)
    }

    /// Set a key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.defines.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.defines.get(key).map(String::as_str)
    }

    pub fn is_defined(&self, key: &str) -> bool {
        self.defines.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.defines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defines.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ConfigH {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut config = Self::new();
        for (key, value) in iter {
            config.insert(key, value);
        }
        config
    }
}

/// Remainder of a `# name ...` preprocessor line, `#` and `name` may be
/// separated by spaces.
fn directive<'a>(line: &'a str, name: &str) -> Option<&'a str> {
    let rest = line.strip_prefix('#')?.trim_start().strip_prefix(name)?;
    if rest.is_empty() {
        return Some(rest);
    }
    rest.starts_with(char::is_whitespace)
        .then(|| rest.trim_start())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_values_and_flags() {
        let config = ConfigH::from_header_str(
            "/* config.h */\n\
             #ifndef CONFIG_H\n\
             #define CONFIG_H\n\
             #define DUNE_PYMOR_VERSION \"0.1\"\n\
             #  define HAVE_MPI ENABLE_MPI\n\
             #endif\n",
        )
        .unwrap();
        assert_eq!(config.len(), 3);
        assert_eq!(config.get("CONFIG_H"), Some("1"));
        assert_eq!(config.get("DUNE_PYMOR_VERSION"), Some("\"0.1\""));
        assert_eq!(config.get("HAVE_MPI"), Some("ENABLE_MPI"));
    }

    #[test]
    fn skips_undef_and_function_macros() {
        let config = ConfigH::from_header_str(
            "/* #undef HAVE_GMP */\n\
             #define DUNE_VERSION_NEWER(a,b) 1\n\
             #defineX 2\n",
        )
        .unwrap();
        assert!(config.is_empty());
    }

    #[test]
    fn rejects_nameless_define() {
        let err = ConfigH::from_header_str("#define HAVE_A 1\n#define\n").unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::InvalidConfigLine {
                line: 2,
                detail: "#define without a name".into()
            }
        );
    }

    #[test]
    fn rejects_bad_macro_name() {
        let err = ConfigH::from_header_str("#define HAVE-A 1").unwrap_err();
        assert!(matches!(err, ConfigurationError::InvalidConfigLine { line: 1, .. }));
    }

    #[test]
    fn from_pairs() {
        let config: ConfigH = [("HAVE_DUNE_STUFF", "1")].into_iter().collect();
        assert!(config.is_defined("HAVE_DUNE_STUFF"));
        assert_eq!(config.get("HAVE_DUNE_FEM"), None);
    }
}
