//! Schema introspection types for models
//!
//! A [`ModelSchema`] describes a persistent entity type: its primary-key
//! field, its declared scalar fields, and its relational fields. The CRUD
//! core is schema-driven; everything it knows about a model comes from here.
//!
//! # Example
//!
//! ```rust
//! use resource_core::store::ModelSchema;
//!
//! let schema = ModelSchema::new("Post")
//!     .with_field("title")
//!     .with_field("status")
//!     .with_foreign_key("author", "Author")
//!     .with_many_to_many("tags", "Tag");
//!
//! assert_eq!(schema.primary_key(), "id");
//! assert_eq!(schema.foreign_keys().len(), 1);
//! ```

/// A field referencing exactly one record of another model by primary key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKeyField {
    /// The field name on the owning model
    pub name: String,
    /// The name of the referenced model
    pub references: String,
}

/// A field representing a set of related records of another model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManyToManyField {
    /// The field name on the owning model
    pub name: String,
    /// The name of the referenced model
    pub references: String,
}

/// Schema description of a persistent entity type
///
/// Built once at startup and shared read-only afterwards. The declared
/// field set is the authority for validated attribute assignment: keys
/// outside it are rejected rather than silently set.
///
/// # Example
///
/// ```rust
/// use resource_core::store::ModelSchema;
///
/// let schema = ModelSchema::new("User").with_field("email");
/// assert!(schema.is_assignable("email"));
/// assert!(schema.is_assignable("id"));
/// assert!(!schema.is_assignable("is_admin"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSchema {
    name: String,
    primary_key: String,
    fields: Vec<String>,
    foreign_keys: Vec<ForeignKeyField>,
    many_to_many: Vec<ManyToManyField>,
}

impl ModelSchema {
    /// Create a schema with the default `id` primary key and no other fields
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            primary_key: "id".to_string(),
            fields: Vec::new(),
            foreign_keys: Vec::new(),
            many_to_many: Vec::new(),
        }
    }

    /// Use a non-default primary-key field name
    #[must_use]
    pub fn with_primary_key(mut self, field: impl Into<String>) -> Self {
        self.primary_key = field.into();
        self
    }

    /// Declare a scalar field
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>) -> Self {
        self.fields.push(name.into());
        self
    }

    /// Declare a foreign-key field referencing another model
    #[must_use]
    pub fn with_foreign_key(
        mut self,
        name: impl Into<String>,
        references: impl Into<String>,
    ) -> Self {
        self.foreign_keys.push(ForeignKeyField {
            name: name.into(),
            references: references.into(),
        });
        self
    }

    /// Declare a many-to-many field referencing another model
    #[must_use]
    pub fn with_many_to_many(
        mut self,
        name: impl Into<String>,
        references: impl Into<String>,
    ) -> Self {
        self.many_to_many.push(ManyToManyField {
            name: name.into(),
            references: references.into(),
        });
        self
    }

    /// The model name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The primary-key field name
    pub fn primary_key(&self) -> &str {
        &self.primary_key
    }

    /// Declared scalar field names (excluding the primary key)
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Declared foreign-key fields
    pub fn foreign_keys(&self) -> &[ForeignKeyField] {
        &self.foreign_keys
    }

    /// Declared many-to-many fields
    pub fn many_to_many(&self) -> &[ManyToManyField] {
        &self.many_to_many
    }

    /// Whether `field` may be assigned through the validated setter
    ///
    /// Covers the primary key, scalar fields, and foreign-key fields.
    /// Many-to-many fields are mutated only through add/remove directives,
    /// never by direct assignment.
    pub fn is_assignable(&self, field: &str) -> bool {
        field == self.primary_key
            || self.fields.iter().any(|f| f == field)
            || self.foreign_keys.iter().any(|fk| fk.name == field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_defaults() {
        let schema = ModelSchema::new("Post");
        assert_eq!(schema.name(), "Post");
        assert_eq!(schema.primary_key(), "id");
        assert!(schema.fields().is_empty());
        assert!(schema.foreign_keys().is_empty());
        assert!(schema.many_to_many().is_empty());
    }

    #[test]
    fn test_schema_custom_primary_key() {
        let schema = ModelSchema::new("Legacy").with_primary_key("legacy_id");
        assert_eq!(schema.primary_key(), "legacy_id");
        assert!(schema.is_assignable("legacy_id"));
        assert!(!schema.is_assignable("id"));
    }

    #[test]
    fn test_schema_relational_fields() {
        let schema = ModelSchema::new("Post")
            .with_field("title")
            .with_foreign_key("author", "Author")
            .with_many_to_many("tags", "Tag");

        assert_eq!(schema.foreign_keys()[0].name, "author");
        assert_eq!(schema.foreign_keys()[0].references, "Author");
        assert_eq!(schema.many_to_many()[0].name, "tags");
        assert_eq!(schema.many_to_many()[0].references, "Tag");
    }

    #[test]
    fn test_is_assignable() {
        let schema = ModelSchema::new("Post")
            .with_field("title")
            .with_foreign_key("author", "Author")
            .with_many_to_many("tags", "Tag");

        assert!(schema.is_assignable("id"));
        assert!(schema.is_assignable("title"));
        assert!(schema.is_assignable("author"));
        assert!(!schema.is_assignable("tags"));
        assert!(!schema.is_assignable("created_at"));
    }
}
