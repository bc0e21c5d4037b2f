//! Value validation against resolved declarations
//!
//! A declaration is a union: a value is valid when it matches any of its
//! terms. Before matching, the whole declaration is checked for terms that can
//! never be decided (unsupported keywords, `$this` without a receiver), so the
//! outcome does not depend on the order the union was written in.

use crate::context::ObjectContext;
use crate::error::ValidationError;
use crate::value::Value;
use docmeta_parser::PrimitiveKind;
use docmeta_resolver::{
    ClassDescriptor, TypeDeclaration, TypeRegistry, TypeTerm, VirtualMethodDescriptor,
};
use tracing::trace;

/// Checks values against declarations resolved with `registry`
#[derive(Debug, Clone, Copy)]
pub struct Validator<'r> {
    registry: &'r TypeRegistry,
}

impl<'r> Validator<'r> {
    pub fn new(registry: &'r TypeRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &'r TypeRegistry {
        self.registry
    }

    /// Validate `value`; an absent declaration accepts everything
    pub fn validate(
        &self,
        declaration: Option<&TypeDeclaration>,
        value: &Value,
        context: &ObjectContext,
    ) -> Result<bool, ValidationError> {
        let Some(declaration) = declaration else {
            trace!(kind = %value.kind(), "untyped, accepted");
            return Ok(true);
        };

        for term in declaration.terms() {
            Self::check_decidable(term, context)?;
        }

        let valid = declaration
            .terms()
            .iter()
            .any(|term| self.matches(term, value, context));

        trace!(%declaration, kind = %value.kind(), valid, "validated value");
        Ok(valid)
    }

    /// Resolve `raw` inside `descriptor`'s class, then validate
    pub fn validate_declaration(
        &self,
        descriptor: &ClassDescriptor,
        raw: Option<&str>,
        value: &Value,
        context: &ObjectContext,
    ) -> Result<bool, ValidationError> {
        let declaration = descriptor.resolve(raw, self.registry)?;
        self.validate(declaration.as_ref(), value, context)
    }

    pub fn validate_property(
        &self,
        descriptor: &ClassDescriptor,
        property: &str,
        value: &Value,
        context: &ObjectContext,
    ) -> Result<bool, ValidationError> {
        let property = descriptor
            .property(property)
            .ok_or_else(|| ValidationError::UnknownProperty {
                class: descriptor.name().to_string(),
                property: property.to_string(),
            })?;

        self.validate(property.declaration.as_ref(), value, context)
    }

    pub fn validate_parameter(
        &self,
        descriptor: &ClassDescriptor,
        method: &str,
        parameter: &str,
        value: &Value,
        context: &ObjectContext,
    ) -> Result<bool, ValidationError> {
        let declaration = Self::virtual_method(descriptor, method)?
            .parameter(parameter)
            .ok_or_else(|| ValidationError::UnknownParameter {
                class: descriptor.name().to_string(),
                method: method.to_string(),
                parameter: parameter.to_string(),
            })?;

        self.validate(declaration, value, context)
    }

    pub fn validate_return(
        &self,
        descriptor: &ClassDescriptor,
        method: &str,
        value: &Value,
        context: &ObjectContext,
    ) -> Result<bool, ValidationError> {
        let method = Self::virtual_method(descriptor, method)?;
        self.validate(method.return_type.as_ref(), value, context)
    }

    fn virtual_method<'d>(
        descriptor: &'d ClassDescriptor,
        method: &str,
    ) -> Result<&'d VirtualMethodDescriptor, ValidationError> {
        descriptor
            .virtual_method(method)
            .ok_or_else(|| ValidationError::UnknownMethod {
                class: descriptor.name().to_string(),
                method: method.to_string(),
            })
    }

    fn check_decidable(term: &TypeTerm, context: &ObjectContext) -> Result<(), ValidationError> {
        match term {
            TypeTerm::Unhandled(name) => Err(ValidationError::UnsupportedDeclaration {
                name: name.clone(),
            }),
            TypeTerm::ThisRef if context.receiver().is_none() => {
                Err(ValidationError::InvalidContext {
                    class: context.class_name().to_string(),
                })
            }
            TypeTerm::ArrayOf(inner) => Self::check_decidable(inner, context),
            _ => Ok(()),
        }
    }

    fn matches(&self, term: &TypeTerm, value: &Value, context: &ObjectContext) -> bool {
        let matched = match term {
            TypeTerm::Primitive(kind) => matches_primitive(*kind, value),
            // Unknown types have no instances
            TypeTerm::ClassRef(identifier) => {
                self.registry.contains(identifier) && self.is_instance_of(value, identifier)
            }
            TypeTerm::SelfRef => self.is_instance_of(value, context.class_name()),
            TypeTerm::ThisRef => context.is_receiver(value),
            // A non-array falls through to the next alternative
            TypeTerm::ArrayOf(inner) => value
                .items()
                .is_some_and(|mut items| items.all(|item| self.matches(inner, item, context))),
            TypeTerm::Unhandled(_) => false,
        };

        trace!(%term, kind = %value.kind(), matched, "checked term");
        matched
    }

    fn is_instance_of(&self, value: &Value, class: &str) -> bool {
        value
            .as_object()
            .is_some_and(|instance| self.registry.is_subtype(instance.class(), class))
    }
}

fn matches_primitive(kind: PrimitiveKind, value: &Value) -> bool {
    match kind {
        PrimitiveKind::Bool => matches!(value, Value::Bool(_)),
        PrimitiveKind::Int => matches!(value, Value::Int(_)),
        PrimitiveKind::Float => matches!(value, Value::Float(_) | Value::Int(_)),
        PrimitiveKind::String => matches!(value, Value::String(_)),
        PrimitiveKind::Array => matches!(value, Value::Array(_)),
        PrimitiveKind::Object => matches!(value, Value::Object(_)),
        PrimitiveKind::Null | PrimitiveKind::Void => matches!(value, Value::Null),
        PrimitiveKind::True => matches!(value, Value::Bool(true)),
        PrimitiveKind::False => matches!(value, Value::Bool(false)),
        PrimitiveKind::Mixed => true,
    }
}
