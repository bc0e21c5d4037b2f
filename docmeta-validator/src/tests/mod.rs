mod test_values;

use crate::{Instance, ObjectContext, ObjectRef, ValidationError, Validator, Value};
use docmeta_resolver::{ClassDeclaration, ClassDescriptor, TypeRegistry};

pub(crate) const TEST_CASE: &str = "ScaleUpStack\\Metadata\\Tests\\PhpUnit\\Metadata\\DataTypeMetadataTest";

pub(crate) fn registry() -> TypeRegistry {
    TypeRegistry::builder()
        .class("stdClass", &[])
        .interface("DateTimeInterface", &[])
        .class("DateTime", &["DateTimeInterface"])
        .class("DateTimeImmutable", &["DateTimeInterface"])
        .interface("Throwable", &[])
        .class("Exception", &["Throwable"])
        .class("RuntimeException", &["Exception"])
        .class(TEST_CASE, &[])
        .build()
        .expect("fixture registry is consistent")
}

pub(crate) fn object(class: &str) -> Value {
    Value::object(Instance::new(class))
}

/// Resolves and validates declarations the way a test case class would
pub(crate) struct Fixture {
    pub registry: TypeRegistry,
    pub descriptor: ClassDescriptor,
    pub receiver: ObjectRef,
}

impl Fixture {
    pub fn new() -> Self {
        let registry = registry();
        let descriptor = ClassDescriptor::from_declaration(&ClassDeclaration::new(TEST_CASE), &registry)
            .expect("empty declaration is valid");

        Self {
            registry,
            descriptor,
            receiver: Instance::new(TEST_CASE).into_ref(),
        }
    }

    pub fn context(&self) -> ObjectContext {
        ObjectContext::instance(&self.receiver)
    }

    pub fn validate_in(
        &self,
        raw: Option<&str>,
        value: &Value,
        context: &ObjectContext,
    ) -> Result<bool, ValidationError> {
        Validator::new(&self.registry).validate_declaration(&self.descriptor, raw, value, context)
    }

    pub fn validate(&self, raw: Option<&str>, value: &Value) -> Result<bool, ValidationError> {
        self.validate_in(raw, value, &self.context())
    }
}
