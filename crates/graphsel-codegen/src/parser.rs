//! Build a [`Schema`] from SDL text.

use apollo_parser::cst::{self, CstNode};
use apollo_parser::Parser;

use crate::schema::{EnumValue, Field, InputValue, NamedType, Schema, TypeKind, TypeRef};

/// Parse SDL into a schema model.
///
/// apollo-parser is error-resilient: syntax errors are logged and the
/// definitions that did parse are kept. Without a `schema { ... }` block the
/// root operation types default to `Query`, `Mutation` and `Subscription`
/// when those objects exist.
pub fn parse(schema_text: &str) -> Schema {
    let parser = Parser::new(schema_text);
    let tree = parser.parse();

    for err in tree.errors() {
        tracing::warn!(message = err.message(), "schema parse error");
    }

    let doc = tree.document();

    let mut types = Vec::new();
    let mut roots: [Option<String>; 3] = [None, None, None];
    let mut explicit_roots = false;

    for def in doc.definitions() {
        match def {
            cst::Definition::SchemaDefinition(s) => {
                explicit_roots = true;
                for root in s.root_operation_type_definitions() {
                    let Some(op) = root.operation_type() else {
                        continue;
                    };
                    let name = root.named_type().map(|n| extract_name(&n.name()));
                    if op.query_token().is_some() {
                        roots[0] = name;
                    } else if op.mutation_token().is_some() {
                        roots[1] = name;
                    } else if op.subscription_token().is_some() {
                        roots[2] = name;
                    }
                }
            }
            cst::Definition::ScalarTypeDefinition(s) => {
                types.push(NamedType {
                    name: extract_name(&s.name()),
                    description: extract_description(&s.description()),
                    kind: TypeKind::Scalar,
                });
            }
            cst::Definition::EnumTypeDefinition(e) => {
                types.push(extract_enum(&e));
            }
            cst::Definition::ObjectTypeDefinition(o) => {
                types.push(NamedType {
                    name: extract_name(&o.name()),
                    description: extract_description(&o.description()),
                    kind: TypeKind::Object {
                        fields: extract_fields(&o.fields_definition()),
                        interfaces: extract_implements(&o.implements_interfaces()),
                    },
                });
            }
            cst::Definition::InterfaceTypeDefinition(i) => {
                types.push(NamedType {
                    name: extract_name(&i.name()),
                    description: extract_description(&i.description()),
                    kind: TypeKind::Interface {
                        fields: extract_fields(&i.fields_definition()),
                        possible_types: Vec::new(),
                    },
                });
            }
            cst::Definition::UnionTypeDefinition(u) => {
                let possible_types = u
                    .union_member_types()
                    .map(|m| m.named_types().map(|n| extract_name(&n.name())).collect())
                    .unwrap_or_default();
                types.push(NamedType {
                    name: extract_name(&u.name()),
                    description: extract_description(&u.description()),
                    kind: TypeKind::Union { possible_types },
                });
            }
            cst::Definition::InputObjectTypeDefinition(i) => {
                let input_fields = i
                    .input_fields_definition()
                    .map(|ifd| extract_input_values(ifd.input_value_definitions()))
                    .unwrap_or_default();
                types.push(NamedType {
                    name: extract_name(&i.name()),
                    description: extract_description(&i.description()),
                    kind: TypeKind::InputObject { input_fields },
                });
            }
            _ => {}
        }
    }

    let mut schema = Schema {
        types,
        ..Default::default()
    };
    if !explicit_roots {
        for (slot, default) in roots.iter_mut().zip(["Query", "Mutation", "Subscription"]) {
            if schema.get(default).is_some_and(NamedType::is_object) {
                *slot = Some(default.to_string());
            }
        }
    }
    let [query_type, mutation_type, subscription_type] = roots;
    schema.query_type = query_type;
    schema.mutation_type = mutation_type;
    schema.subscription_type = subscription_type;
    schema
}

fn extract_name(name: &Option<cst::Name>) -> String {
    name.as_ref()
        .map(|n| n.text().to_string())
        .unwrap_or_default()
}

fn extract_description(desc: &Option<cst::Description>) -> Option<String> {
    desc.as_ref()
        .and_then(|d| d.string_value())
        .map(String::from)
        .filter(|s| !s.is_empty())
}

fn extract_type(ty: &Option<cst::Type>) -> TypeRef {
    match ty {
        None => TypeRef::named("String"),
        Some(t) => match t {
            cst::Type::NamedType(nt) => TypeRef::Named(extract_name(&nt.name())),
            cst::Type::ListType(lt) => TypeRef::list(extract_type(&lt.ty())),
            cst::Type::NonNullType(nnt) => {
                if let Some(named) = nnt.named_type() {
                    TypeRef::non_null(TypeRef::Named(extract_name(&named.name())))
                } else if let Some(list) = nnt.list_type() {
                    TypeRef::non_null(TypeRef::list(extract_type(&list.ty())))
                } else {
                    TypeRef::non_null(TypeRef::named("String"))
                }
            }
        },
    }
}

fn extract_implements(implements: &Option<cst::ImplementsInterfaces>) -> Vec<String> {
    implements
        .as_ref()
        .map(|i| i.named_types().map(|n| extract_name(&n.name())).collect())
        .unwrap_or_default()
}

fn deprecation(directives: &Option<cst::Directives>) -> (bool, Option<String>) {
    let Some(directives) = directives else {
        return (false, None);
    };
    for directive in directives.directives() {
        if extract_name(&directive.name()) != "deprecated" {
            continue;
        }
        let reason = directive.arguments().and_then(|args| {
            args.arguments()
                .find(|a| extract_name(&a.name()) == "reason")
                .and_then(|a| a.value())
                .and_then(|v| match v {
                    cst::Value::StringValue(s) => Some(String::from(s)),
                    _ => None,
                })
        });
        return (true, reason);
    }
    (false, None)
}

fn extract_fields(fields_def: &Option<cst::FieldsDefinition>) -> Vec<Field> {
    let Some(fd) = fields_def else {
        return Vec::new();
    };
    fd.field_definitions()
        .map(|f| {
            let (is_deprecated, deprecation_reason) = deprecation(&f.directives());
            Field {
                name: extract_name(&f.name()),
                description: extract_description(&f.description()),
                arguments: f
                    .arguments_definition()
                    .map(|ad| extract_input_values(ad.input_value_definitions()))
                    .unwrap_or_default(),
                ty: extract_type(&f.ty()),
                deprecation_reason,
                is_deprecated,
            }
        })
        .collect()
}

fn extract_input_values(
    values: impl Iterator<Item = cst::InputValueDefinition>,
) -> Vec<InputValue> {
    values
        .map(|iv| InputValue {
            name: extract_name(&iv.name()),
            description: extract_description(&iv.description()),
            ty: extract_type(&iv.ty()),
            default_value: iv
                .default_value()
                .and_then(|d| d.value())
                .map(|v| v.syntax().text().to_string()),
        })
        .collect()
}

fn extract_enum(e: &cst::EnumTypeDefinition) -> NamedType {
    let values = e
        .enum_values_definition()
        .map(|evd| {
            evd.enum_value_definitions()
                .map(|ev| {
                    let (is_deprecated, _) = deprecation(&ev.directives());
                    EnumValue {
                        name: ev
                            .enum_value()
                            .map(|v| v.text().to_string())
                            .unwrap_or_default(),
                        description: extract_description(&ev.description()),
                        is_deprecated,
                    }
                })
                .collect()
        })
        .unwrap_or_default();

    NamedType {
        name: extract_name(&e.name()),
        description: extract_description(&e.description()),
        kind: TypeKind::Enum { values },
    }
}
