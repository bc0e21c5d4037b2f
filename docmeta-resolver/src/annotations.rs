//! Tagged annotation records
//!
//! These are the already tokenized doc-comment annotations of a class or a
//! property. Type arguments are kept as raw strings; resolving them is the
//! descriptor's job.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One annotation as produced by the annotation parser
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Annotation {
    /// `var <data type>` on a property
    Var { data_type: String },
    /// `method` on a class, declaring a virtual method
    Method(MethodAnnotation),
    /// Any other tag, kept verbatim
    Tag {
        name: String,
        #[serde(default)]
        arguments: String,
    },
}

impl Annotation {
    pub const VAR: &'static str = "var";
    pub const METHOD: &'static str = "method";

    pub fn var(data_type: impl Into<String>) -> Self {
        Annotation::Var {
            data_type: data_type.into(),
        }
    }

    pub fn tag(name: impl Into<String>, arguments: impl Into<String>) -> Self {
        Annotation::Tag {
            name: name.into(),
            arguments: arguments.into(),
        }
    }

    /// The tag this annotation was written with
    pub fn tag_name(&self) -> &str {
        match self {
            Annotation::Var { .. } => Self::VAR,
            Annotation::Method(_) => Self::METHOD,
            Annotation::Tag { name, .. } => name,
        }
    }
}

impl From<MethodAnnotation> for Annotation {
    fn from(method: MethodAnnotation) -> Self {
        Annotation::Method(method)
    }
}

/// A declared (virtual) method: `method <return> <name>(<type> $param, ...)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodAnnotation {
    pub name: String,
    #[serde(default)]
    pub parameters: IndexMap<String, ParameterAnnotation>,
    #[serde(default)]
    pub return_type: Option<String>,
    #[serde(default)]
    pub is_static: bool,
}

impl MethodAnnotation {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameters: IndexMap::new(),
            return_type: None,
            is_static: false,
        }
    }

    pub fn parameter(mut self, name: impl Into<String>, data_type: Option<&str>) -> Self {
        self.parameters.insert(
            name.into(),
            ParameterAnnotation {
                data_type: data_type.map(str::to_string),
                has_default_value: false,
            },
        );
        self
    }

    pub fn parameter_with_default(mut self, name: impl Into<String>, data_type: Option<&str>) -> Self {
        self.parameters.insert(
            name.into(),
            ParameterAnnotation {
                data_type: data_type.map(str::to_string),
                has_default_value: true,
            },
        );
        self
    }

    pub fn returns(mut self, data_type: impl Into<String>) -> Self {
        self.return_type = Some(data_type.into());
        self
    }

    pub fn into_static(mut self) -> Self {
        self.is_static = true;
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterAnnotation {
    #[serde(default)]
    pub data_type: Option<String>,
    #[serde(default)]
    pub has_default_value: bool,
}

/// Ordered annotations of one class or property
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Annotations(Vec<Annotation>);

impl Annotations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, annotation: impl Into<Annotation>) {
        self.0.push(annotation.into());
    }

    pub fn with(mut self, annotation: impl Into<Annotation>) -> Self {
        self.add(annotation);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = &Annotation> {
        self.0.iter()
    }

    pub fn by_tag<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Annotation> {
        self.0.iter().filter(move |annotation| annotation.tag_name() == tag)
    }

    /// Raw data types of all `var` annotations
    pub fn vars(&self) -> impl Iterator<Item = &str> {
        self.0.iter().filter_map(|annotation| match annotation {
            Annotation::Var { data_type } => Some(data_type.as_str()),
            _ => None,
        })
    }

    pub fn methods(&self) -> impl Iterator<Item = &MethodAnnotation> {
        self.0.iter().filter_map(|annotation| match annotation {
            Annotation::Method(method) => Some(method),
            _ => None,
        })
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Annotation> for Annotations {
    fn from_iter<I: IntoIterator<Item = Annotation>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
