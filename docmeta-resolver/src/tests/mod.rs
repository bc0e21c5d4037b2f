mod test_analyzers;
mod test_resolution;

use crate::registry::TypeRegistry;

pub(crate) const CLASS_FOR_TESTING: &str = "ScaleUpStack\\Metadata\\Tests\\Resources\\ClassForTesting";

/// Types the fixtures refer to, laid out like a small application
pub(crate) fn registry() -> TypeRegistry {
    TypeRegistry::builder()
        .interface("DateTimeInterface", &[])
        .class("DateTime", &["DateTimeInterface"])
        .interface("Throwable", &[])
        .class("Exception", &["Throwable"])
        .class("InvalidArgumentException", &["Exception"])
        .class("Metadata\\ClassMetadata", &[])
        .class("ScaleUpStack\\Metadata\\ClassMetadata", &[])
        .class(
            "ScaleUpStack\\Metadata\\Metadata\\ClassMetadata",
            &["Metadata\\ClassMetadata"],
        )
        .interface("ScaleUpStack\\Metadata\\Generator\\FeatureAnalyzer", &[])
        .class("ScaleUpStack\\Annotations\\Annotation\\MethodAnnotation", &[])
        .class(CLASS_FOR_TESTING, &[])
        .build()
        .expect("fixture registry is consistent")
}
