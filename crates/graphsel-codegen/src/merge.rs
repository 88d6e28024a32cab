//! Field merging across the possible types of a union or interface.
//!
//! The merged surface is keyed by field name only: the first possible type
//! (in schema order) to declare a name supplies its definition, and later
//! declarations of the same name add nothing but their type name to
//! [`MergedField::declared_by`].

use crate::schema::{Field, NamedType, Schema, SchemaError};

/// One entry of a merged field set.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedField<'s> {
    /// Definition from the first possible type that declared the name.
    pub field: &'s Field,
    /// Every possible type declaring a field with this name, in schema order.
    pub declared_by: Vec<&'s str>,
}

impl MergedField<'_> {
    pub fn name(&self) -> &str {
        &self.field.name
    }

    /// The type whose definition won.
    pub fn origin(&self) -> &str {
        self.declared_by[0]
    }
}

/// Resolve the possible types of `polymorphic` to their object definitions,
/// in schema order.
pub fn possible_objects<'s>(
    schema: &'s Schema,
    polymorphic: &'s NamedType,
) -> Result<Vec<&'s NamedType>, SchemaError> {
    let names = schema.possible_types(polymorphic);
    for name in &names {
        match schema.get(name) {
            Some(t) if t.is_object() => {}
            Some(_) => {
                return Err(SchemaError::PossibleTypeNotObject {
                    owner: polymorphic.name.clone(),
                    name: name.to_string(),
                })
            }
            None => {
                return Err(SchemaError::UnknownType {
                    owner: polymorphic.name.clone(),
                    name: name.to_string(),
                })
            }
        }
    }
    Ok(schema
        .objects()
        .filter(|o| names.contains(&o.name.as_str()))
        .collect())
}

/// Merge the fields of every possible type of `polymorphic`.
pub fn merge_fields<'s>(
    schema: &'s Schema,
    polymorphic: &'s NamedType,
) -> Result<Vec<MergedField<'s>>, SchemaError> {
    let objects = possible_objects(schema, polymorphic)?;
    if objects.is_empty() {
        tracing::warn!(
            type_name = %polymorphic.name,
            "{} `{}` has no possible types; generating an empty shell",
            polymorphic.kind_name(),
            polymorphic.name
        );
    }

    let mut merged: Vec<MergedField<'s>> = Vec::new();
    for object in objects {
        for field in object.fields() {
            match merged.iter_mut().find(|m| m.field.name == field.name) {
                Some(existing) => existing.declared_by.push(object.name.as_str()),
                None => merged.push(MergedField {
                    field,
                    declared_by: vec![object.name.as_str()],
                }),
            }
        }
    }
    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::fixtures::*;
    use crate::schema::{TypeKind, TypeRef};

    fn a_or_b() -> Schema {
        Schema {
            types: vec![
                object(
                    "A",
                    vec![field("id", non_null("ID")), field("name", non_null("String"))],
                ),
                object(
                    "B",
                    vec![field("id", non_null("ID")), field("age", non_null("Int"))],
                ),
                object("C", vec![field("other", non_null("String"))]),
                union("AorB", &["A", "B"]),
            ],
            ..Default::default()
        }
    }

    #[test]
    fn first_occurrence_wins() {
        let schema = a_or_b();
        let union = schema.get("AorB").unwrap();
        let merged = merge_fields(&schema, union).unwrap();
        let names: Vec<&str> = merged.iter().map(MergedField::name).collect();
        assert_eq!(names, vec!["id", "name", "age"]);
        assert_eq!(merged[0].origin(), "A");
        assert_eq!(merged[0].declared_by, vec!["A", "B"]);
        assert_eq!(merged[1].declared_by, vec!["A"]);
        assert_eq!(merged[2].declared_by, vec!["B"]);
    }

    #[test]
    fn conflicting_types_keep_the_first_definition() {
        let mut schema = a_or_b();
        if let TypeKind::Object { fields, .. } = &mut schema.types[1].kind {
            fields.push(field("name", TypeRef::named("Int")));
        }
        let union = schema.get("AorB").unwrap();
        let merged = merge_fields(&schema, union).unwrap();
        let name = merged.iter().find(|m| m.name() == "name").unwrap();
        assert_eq!(name.field.ty, non_null("String"));
        assert_eq!(name.declared_by, vec!["A", "B"]);
    }

    #[test]
    fn objects_follow_schema_order_not_member_order() {
        let mut schema = a_or_b();
        schema.types[3] = union("BorA", &["B", "A"]);
        let union = schema.get("BorA").unwrap();
        let objects: Vec<&str> = possible_objects(&schema, union)
            .unwrap()
            .iter()
            .map(|o| o.name.as_str())
            .collect();
        assert_eq!(objects, vec!["A", "B"]);
    }

    #[test]
    fn disjoint_type_still_contributes_its_fields() {
        let mut schema = a_or_b();
        schema.types[3] = union("Any", &["A", "C"]);
        let union = schema.get("Any").unwrap();
        let merged = merge_fields(&schema, union).unwrap();
        let names: Vec<&str> = merged.iter().map(MergedField::name).collect();
        assert_eq!(names, vec!["id", "name", "other"]);
    }

    #[test]
    fn missing_possible_type_names_the_type() {
        let mut schema = a_or_b();
        schema.types[3] = union("AorD", &["A", "D"]);
        let union = schema.get("AorD").unwrap();
        assert_eq!(
            merge_fields(&schema, union),
            Err(SchemaError::UnknownType {
                owner: "AorD".into(),
                name: "D".into()
            })
        );
    }

    #[test]
    fn no_possible_types_merges_to_nothing() {
        let mut schema = a_or_b();
        schema.types[3] = union("Nothing", &[]);
        let union = schema.get("Nothing").unwrap();
        assert!(merge_fields(&schema, union).unwrap().is_empty());
    }
}
