use std::fmt;

/// The one capability the subject-name strategies need from a payload
/// schema: its namespace-qualified name.
///
/// Deliberately not a schema. Carrying only the name makes it impossible
/// for a naming strategy to reach for a canonical form, compatibility
/// check, or raw schema that was never parsed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SchemaName {
    namespace: Option<String>,
    name: String,
}

impl SchemaName {
    pub fn new(namespace: Option<String>, name: impl Into<String>) -> Self {
        SchemaName {
            namespace,
            name: name.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// `{namespace}.{name}`, or just `{name}` for the null namespace.
    pub fn qualified(&self) -> String {
        match &self.namespace {
            Some(namespace) => format!("{}.{}", namespace, self.name),
            None => self.name.clone(),
        }
    }
}

impl fmt::Display for SchemaName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.qualified())
    }
}

/// Strategy for deriving the registry subject from the destination topic
/// and the payload's schema name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubjectNameStrategy {
    /// `{topic}-value` (or `{topic}-key`). The registry default.
    #[default]
    TopicName,
    /// The qualified record name alone, shared across topics.
    RecordName,
    /// `{topic}-{qualified record name}`.
    TopicRecordName,
}

impl SubjectNameStrategy {
    pub fn subject_name(&self, topic: &str, is_key: bool, schema_name: &SchemaName) -> String {
        let suffix = if is_key { "key" } else { "value" };
        match self {
            SubjectNameStrategy::TopicName => format!("{}-{}", topic, suffix),
            SubjectNameStrategy::RecordName => schema_name.qualified(),
            SubjectNameStrategy::TopicRecordName => {
                format!("{}-{}", topic, schema_name.qualified())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name() -> SchemaName {
        SchemaName::new(Some("org.acme.events".into()), "OrderPlaced")
    }

    #[test]
    fn qualified_name_joins_namespace_and_name() {
        assert_eq!(name().qualified(), "org.acme.events.OrderPlaced");
        assert_eq!(SchemaName::new(None, "Bare").qualified(), "Bare");
    }

    #[test]
    fn topic_name_strategy_appends_value_or_key() {
        let strategy = SubjectNameStrategy::TopicName;
        assert_eq!(strategy.subject_name("orders", false, &name()), "orders-value");
        assert_eq!(strategy.subject_name("orders", true, &name()), "orders-key");
    }

    #[test]
    fn record_name_strategy_uses_qualified_name() {
        let strategy = SubjectNameStrategy::RecordName;
        assert_eq!(
            strategy.subject_name("orders", false, &name()),
            "org.acme.events.OrderPlaced"
        );
    }

    #[test]
    fn topic_record_name_strategy_combines_both() {
        let strategy = SubjectNameStrategy::TopicRecordName;
        assert_eq!(
            strategy.subject_name("orders", false, &name()),
            "orders-org.acme.events.OrderPlaced"
        );
    }
}
