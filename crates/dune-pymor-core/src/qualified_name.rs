use std::fmt;

/// Qualified name of a registered class or exception.
///
/// # Examples
///
/// ```
/// use dune_pymor_core::QualifiedName;
///
/// let parametric = QualifiedName::new("Parametric", vec!["Dune".into(), "Pymor".into()]);
/// assert_eq!(parametric.to_string(), "Dune::Pymor::Parametric");
///
/// let parsed = QualifiedName::from_qualified_string("::Dune::Exception");
/// assert_eq!(parsed.simple_name(), "Exception");
/// assert_eq!(parsed.namespace_string(), "Dune");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QualifiedName {
    /// Simple name (e.g., "VectorBased<double>")
    pub name: String,
    /// Namespace path (e.g., ["Dune", "Pymor"]), empty for the global namespace
    pub namespace: Vec<String>,
}

impl QualifiedName {
    /// Create a new qualified name with namespace.
    pub fn new(name: impl Into<String>, namespace: Vec<String>) -> Self {
        Self {
            name: name.into(),
            namespace,
        }
    }

    /// Create a qualified name in the global namespace.
    pub fn global(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: Vec::new(),
        }
    }

    /// Create from a qualified string (e.g., "Dune::Pymor::Parameter").
    ///
    /// The last `::` segment is the name. Template argument lists are kept
    /// intact, so `Dune::F<A::B>` splits into namespace `Dune` and name `F<A::B>`.
    pub fn from_qualified_string(s: &str) -> Self {
        let mut parts = split_outside_angles(s);
        match parts.pop() {
            Some(name) => Self {
                name,
                namespace: parts,
            },
            None => Self::global(""),
        }
    }

    /// Get the simple (unqualified) name.
    pub fn simple_name(&self) -> &str {
        &self.name
    }

    /// Get the namespace path.
    pub fn namespace_path(&self) -> &[String] {
        &self.namespace
    }

    /// Get the namespace as a joined string.
    pub fn namespace_string(&self) -> String {
        self.namespace.join("::")
    }

    /// Compute the class hash for this name.
    pub fn to_type_hash(&self) -> crate::TypeHash {
        crate::TypeHash::from_name(&self.to_string())
    }
}

/// Split on `::` at angle-bracket depth zero, dropping empty segments.
fn split_outside_angles(s: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut current = String::new();
    let mut chars = s.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '<' => {
                depth += 1;
                current.push(ch);
            }
            '>' => {
                depth = depth.saturating_sub(1);
                current.push(ch);
            }
            ':' if depth == 0 && chars.peek() == Some(&':') => {
                chars.next();
                if !current.is_empty() {
                    parts.push(std::mem::take(&mut current));
                }
            }
            _ => current.push(ch),
        }
    }
    if !current.is_empty() {
        parts.push(current);
    }
    parts
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}::{}", self.namespace.join("::"), self.name)
        }
    }
}

impl From<&str> for QualifiedName {
    fn from(s: &str) -> Self {
        Self::from_qualified_string(s)
    }
}

impl From<String> for QualifiedName {
    fn from(s: String) -> Self {
        Self::from_qualified_string(&s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_name() {
        let name = QualifiedName::global("Parametric");
        assert!(name.namespace_path().is_empty());
        assert_eq!(name.to_string(), "Parametric");
    }

    #[test]
    fn namespaced_name() {
        let name = QualifiedName::new(
            "VectorBased",
            vec!["Dune".into(), "Pymor".into(), "Functionals".into()],
        );
        assert_eq!(name.to_string(), "Dune::Pymor::Functionals::VectorBased");
        assert_eq!(name.namespace_string(), "Dune::Pymor::Functionals");
    }

    #[test]
    fn from_qualified_string_normalizes_leading_separator() {
        assert_eq!(
            QualifiedName::from_qualified_string("::Dune::Exception"),
            QualifiedName::from_qualified_string("Dune::Exception")
        );
    }

    #[test]
    fn from_qualified_string_keeps_template_arguments() {
        let name = QualifiedName::from_qualified_string(
            "Dune::Pymor::Functionals::VectorBased<Dune::Stuff::LA::IstlDenseVector<double>>",
        );
        assert_eq!(name.name, "VectorBased<Dune::Stuff::LA::IstlDenseVector<double>>");
        assert_eq!(name.namespace, vec!["Dune", "Pymor", "Functionals"]);
    }

    #[test]
    fn empty_string_is_global_empty() {
        let name = QualifiedName::from_qualified_string("::");
        assert_eq!(name, QualifiedName::global(""));
    }

    #[test]
    fn type_hash_matches_display() {
        let name = QualifiedName::from("Dune::Pymor::Parametric");
        assert_eq!(
            name.to_type_hash(),
            crate::TypeHash::from_name("Dune::Pymor::Parametric")
        );
    }
}
