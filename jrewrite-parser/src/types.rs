// Semantic Types
// Type information attached to tree nodes by the parser and attribution

use std::fmt;

use crate::name::QualifiedName;

/// Primitive types, plus the literal-only `String` and `null` types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    Boolean,
    Byte,
    Char,
    Double,
    Float,
    Int,
    Long,
    Short,
    Void,
    String,
    Null,
}

impl Primitive {
    /// Map a primitive type keyword to its type. `String` and `null` have no
    /// keyword form and are only produced by literals.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        let primitive = match keyword {
            "boolean" => Primitive::Boolean,
            "byte" => Primitive::Byte,
            "char" => Primitive::Char,
            "double" => Primitive::Double,
            "float" => Primitive::Float,
            "int" => Primitive::Int,
            "long" => Primitive::Long,
            "short" => Primitive::Short,
            "void" => Primitive::Void,
            _ => return None,
        };
        Some(primitive)
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            Primitive::Boolean => "boolean",
            Primitive::Byte => "byte",
            Primitive::Char => "char",
            Primitive::Double => "double",
            Primitive::Float => "float",
            Primitive::Int => "int",
            Primitive::Long => "long",
            Primitive::Short => "short",
            Primitive::Void => "void",
            Primitive::String => "String",
            Primitive::Null => "null",
        }
    }
}

/// A class or interface, identified by its fully qualified name.
///
/// The package boundary is stored rather than guessed, so `a.A.B` is known to
/// be nested type `B` of top-level type `A` in package `a`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClassType {
    fully_qualified_name: QualifiedName,
    package_len: usize,
}

impl ClassType {
    /// A type whose first `package_len` segments are its package
    pub fn new(fully_qualified_name: QualifiedName, package_len: usize) -> Self {
        let package_len = package_len.min(fully_qualified_name.segment_count() - 1);
        Self {
            fully_qualified_name,
            package_len,
        }
    }

    /// A top-level type declared in `package` (or the default package)
    pub fn top_level(package: Option<&QualifiedName>, simple_name: &str) -> Self {
        match package {
            Some(package) => Self {
                fully_qualified_name: package.child_unchecked(simple_name),
                package_len: package.segment_count(),
            },
            None => Self {
                fully_qualified_name: QualifiedName::from_trusted(vec![simple_name.to_string()]),
                package_len: 0,
            },
        }
    }

    /// Split a bare name at the lower-case naming convention boundary
    pub fn from_convention(fully_qualified_name: QualifiedName) -> Self {
        let package_len = fully_qualified_name.conventional_package_len();
        Self::new(fully_qualified_name, package_len)
    }

    /// The type nested directly inside this one
    pub fn nested(&self, simple_name: &str) -> Self {
        Self {
            fully_qualified_name: self.fully_qualified_name.child_unchecked(simple_name),
            package_len: self.package_len,
        }
    }

    pub fn fully_qualified_name(&self) -> &QualifiedName {
        &self.fully_qualified_name
    }

    pub fn package_segments(&self) -> &[String] {
        &self.fully_qualified_name.segments()[..self.package_len]
    }

    pub fn package_name(&self) -> Option<QualifiedName> {
        self.fully_qualified_name.prefix(self.package_len)
    }

    /// Class names from outermost to innermost
    pub fn class_segments(&self) -> &[String] {
        &self.fully_qualified_name.segments()[self.package_len..]
    }

    /// Dotted class path without the package, e.g. `Map.Entry`
    pub fn class_name(&self) -> String {
        self.class_segments().join(".")
    }

    pub fn simple_name(&self) -> &str {
        self.fully_qualified_name.simple_name()
    }

    pub fn is_nested(&self) -> bool {
        self.class_segments().len() > 1
    }

    /// The top-level type enclosing this one (itself when not nested)
    pub fn outermost(&self) -> ClassType {
        match self.fully_qualified_name.prefix(self.package_len + 1) {
            Some(name) => Self {
                fully_qualified_name: name,
                package_len: self.package_len,
            },
            None => self.clone(),
        }
    }

    /// The directly enclosing type, `None` for a top-level type
    pub fn owner(&self) -> Option<ClassType> {
        if !self.is_nested() {
            return None;
        }
        self.fully_qualified_name.parent().map(|name| Self {
            fully_qualified_name: name,
            package_len: self.package_len,
        })
    }
}

impl fmt::Display for ClassType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.fully_qualified_name)
    }
}

/// Semantic type of a node
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum JavaType {
    Primitive(Primitive),
    Class(ClassType),
    Array(Box<JavaType>),
    Parameterized {
        class: ClassType,
        arguments: Vec<JavaType>,
    },
}

impl JavaType {
    /// The class behind this type, looking through type arguments
    pub fn as_class(&self) -> Option<&ClassType> {
        match self {
            JavaType::Class(class) => Some(class),
            JavaType::Parameterized { class, .. } => Some(class),
            JavaType::Primitive(_) | JavaType::Array(_) => None,
        }
    }

    pub fn as_primitive(&self) -> Option<Primitive> {
        match self {
            JavaType::Primitive(primitive) => Some(*primitive),
            _ => None,
        }
    }

    pub fn fully_qualified_name(&self) -> Option<&QualifiedName> {
        self.as_class().map(ClassType::fully_qualified_name)
    }

    /// Wrap in `dimensions` levels of array
    pub fn array_of(self, dimensions: usize) -> JavaType {
        (0..dimensions).fold(self, |element, _| JavaType::Array(Box::new(element)))
    }
}

impl fmt::Display for JavaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JavaType::Primitive(primitive) => write!(f, "{}", primitive.keyword()),
            JavaType::Class(class) => write!(f, "{}", class),
            JavaType::Array(element) => write!(f, "{}[]", element),
            JavaType::Parameterized { class, arguments } => {
                write!(f, "{}<", class)?;
                for (i, argument) in arguments.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", argument)?;
                }
                write!(f, ">")
            }
        }
    }
}
