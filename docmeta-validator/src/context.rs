//! Object context of a validation
//!
//! The receiver `self` and `$this` are checked against: a live instance, or
//! only the class when validating in a static context.

use crate::value::{same_instance, Instance, ObjectRef, Value};

#[derive(Debug, Clone, PartialEq)]
pub enum ObjectContext {
    Instance(ObjectRef),
    Class(String),
}

impl ObjectContext {
    pub fn instance(instance: &ObjectRef) -> Self {
        ObjectContext::Instance(ObjectRef::clone(instance))
    }

    pub fn class(name: impl Into<String>) -> Self {
        ObjectContext::Class(name.into())
    }

    /// Class `self` refers to
    pub fn class_name(&self) -> &str {
        match self {
            ObjectContext::Instance(instance) => instance.class(),
            ObjectContext::Class(name) => name,
        }
    }

    pub fn receiver(&self) -> Option<&ObjectRef> {
        match self {
            ObjectContext::Instance(instance) => Some(instance),
            ObjectContext::Class(_) => None,
        }
    }

    /// `value` is the very receiver instance
    pub fn is_receiver(&self, value: &Value) -> bool {
        match (self.receiver(), value.as_object()) {
            (Some(receiver), Some(object)) => same_instance(receiver, object),
            _ => false,
        }
    }
}

impl From<ObjectRef> for ObjectContext {
    fn from(instance: ObjectRef) -> Self {
        ObjectContext::Instance(instance)
    }
}

impl From<Instance> for ObjectContext {
    fn from(instance: Instance) -> Self {
        ObjectContext::Instance(instance.into_ref())
    }
}
