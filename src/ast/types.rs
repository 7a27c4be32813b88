//! Resolved type metadata attached to the tree by the host.

use std::fmt;

/// A resolved Java type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JavaType {
    /// Class or interface type, possibly parameterized (`java.util.List<E>`)
    Class(ClassType),
    /// Type variable (`E`, `K`)
    TypeVar(String),
    /// No type information available
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassType {
    pub fqn: String,
    pub type_params: Vec<JavaType>,
}

impl JavaType {
    /// Raw class type with no type parameters
    pub fn class(fqn: impl Into<String>) -> Self {
        JavaType::Class(ClassType { fqn: fqn.into(), type_params: Vec::new() })
    }

    pub fn parameterized(fqn: impl Into<String>, type_params: Vec<JavaType>) -> Self {
        JavaType::Class(ClassType { fqn: fqn.into(), type_params })
    }

    pub fn as_class(&self) -> Option<&ClassType> {
        match self {
            JavaType::Class(class) => Some(class),
            _ => None,
        }
    }

    /// Fully-qualified name when this is a class type
    pub fn fqn(&self) -> Option<&str> {
        self.as_class().map(|class| class.fqn.as_str())
    }
}

impl fmt::Display for JavaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JavaType::Class(class) => {
                write!(f, "{}", class.fqn)?;
                if !class.type_params.is_empty() {
                    write!(f, "<")?;
                    for (i, param) in class.type_params.iter().enumerate() {
                        if i > 0 {
                            write!(f, ", ")?;
                        }
                        write!(f, "{}", param)?;
                    }
                    write!(f, ">")?;
                }
                Ok(())
            }
            JavaType::TypeVar(name) => write!(f, "{}", name),
            JavaType::Unknown => write!(f, "<unknown>"),
        }
    }
}

/// Resolved method of a call site
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodType {
    pub declaring_type: JavaType,
    pub name: String,
}

impl MethodType {
    pub fn new(declaring_type: JavaType, name: impl Into<String>) -> Self {
        Self { declaring_type, name: name.into() }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_declaring_type(mut self, declaring_type: JavaType) -> Self {
        self.declaring_type = declaring_type;
        self
    }
}

/// Last segment of a dotted name: `java.util.List` → `List`
pub fn simple_name(fqn: &str) -> &str {
    fqn.rsplit('.').next().unwrap_or(fqn)
}

/// Everything before the last segment: `java.util.List` → `java.util`
pub fn package_name(fqn: &str) -> &str {
    match fqn.rfind('.') {
        Some(idx) => &fqn[..idx],
        None => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_helpers() {
        assert_eq!(simple_name("java.util.List"), "List");
        assert_eq!(simple_name("List"), "List");
        assert_eq!(package_name("java.util.List"), "java.util");
        assert_eq!(package_name("List"), "");
    }

    #[test]
    fn test_display_parameterized() {
        let ty = JavaType::parameterized(
            "java.util.Map",
            vec![JavaType::TypeVar("K".into()), JavaType::TypeVar("V".into())],
        );
        assert_eq!(ty.to_string(), "java.util.Map<K, V>");
        assert_eq!(ty.fqn(), Some("java.util.Map"));
        assert_eq!(JavaType::TypeVar("E".into()).fqn(), None);
    }
}
