use std::sync::atomic::{AtomicU32, Ordering};

static NEXT: AtomicU32 = AtomicU32::new(0);

/// A database schema private to one test.
///
/// Named `test_{pid}_{n}`, so tests running concurrently in one process or
/// across processes never introspect each other's tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestIsolation {
    schema_name: String,
}

impl TestIsolation {
    pub fn new() -> TestIsolation {
        let n = NEXT.fetch_add(1, Ordering::Relaxed);
        TestIsolation {
            schema_name: format!("test_{}_{n}", std::process::id()),
        }
    }

    pub fn schema_name(&self) -> &str {
        &self.schema_name
    }

    /// Creates the schema and makes it the session's default for unqualified
    /// names.
    pub fn setup_sql(&self) -> String {
        format!(
            "CREATE SCHEMA {0}; SET search_path TO {0};",
            self.schema_name
        )
    }

    pub fn teardown_sql(&self) -> String {
        format!("DROP SCHEMA IF EXISTS {} CASCADE;", self.schema_name)
    }
}

impl Default for TestIsolation {
    fn default() -> Self {
        TestIsolation::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_instance_gets_its_own_schema() {
        let a = TestIsolation::new();
        let b = TestIsolation::new();
        assert_ne!(a.schema_name(), b.schema_name());
    }

    #[test]
    fn schema_name_is_a_plain_identifier() {
        let isolation = TestIsolation::new();
        let name = isolation.schema_name();

        let mut parts = name.split('_');
        assert_eq!(parts.next(), Some("test"));
        assert_eq!(
            parts.next().and_then(|pid| pid.parse::<u32>().ok()),
            Some(std::process::id())
        );
        assert!(parts.next().is_some_and(|n| n.parse::<u32>().is_ok()));
        assert_eq!(parts.next(), None);
    }

    #[test]
    fn sql_names_the_schema() {
        let isolation = TestIsolation::new();
        let name = isolation.schema_name();

        assert!(isolation.setup_sql().starts_with(&format!("CREATE SCHEMA {name};")));
        assert!(isolation.teardown_sql().contains(&format!("{name} CASCADE")));
    }
}
