//! Macros for exposing entity models as records
//!
//! Entity models are plain serde structs mirroring the API payloads. These
//! macros generate the repetitive trait implementations that let the listing
//! engine read their scalar attributes by name.

/// Implement [`Record`](crate::core::record::Record) and
/// [`Entity`](crate::entities::Entity) for a model struct
///
/// Each entry maps an attribute name to a struct field whose type implements
/// [`AsFieldValue`](crate::core::field::AsFieldValue). Attributes are listed
/// in the order they should be scanned by an unrestricted search.
///
/// # Example
///
/// ```rust,ignore
/// impl_record!(Ship, "ship", "ships", id: id, {
///     "id" => id,
///     "name" => name,
///     "type" => ship_type,
///     "active" => active,
/// });
/// ```
#[macro_export]
macro_rules! impl_record {
    (
        $type:ident,
        $singular:expr,
        $plural:expr,
        id: $id_field:ident,
        {
            $( $attr:literal => $field:ident ),* $(,)?
        }
    ) => {
        impl $crate::core::record::Record for $type {
            fn id(&self) -> &str {
                &self.$id_field
            }

            fn attribute_names(&self) -> Vec<&str> {
                vec![ $( $attr ),* ]
            }

            fn field_value(&self, field: &str) -> Option<$crate::core::field::FieldValue> {
                use $crate::core::field::AsFieldValue;
                match field {
                    $( $attr => Some(self.$field.as_field_value()), )*
                    _ => None,
                }
            }
        }

        impl $crate::entities::Entity for $type {
            fn resource_name() -> &'static str {
                $plural
            }

            fn resource_name_singular() -> &'static str {
                $singular
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::core::field::FieldValue;
    use crate::core::record::Record;
    use crate::entities::Entity;

    struct Gadget {
        key: String,
        label: Option<String>,
        count: i64,
        enabled: bool,
    }

    impl_record!(Gadget, "gadget", "gadgets", id: key, {
        "key" => key,
        "label" => label,
        "count" => count,
        "enabled" => enabled,
    });

    #[test]
    fn test_macro_exposes_fields() {
        let gadget = Gadget {
            key: "p-1".to_string(),
            label: None,
            count: 3,
            enabled: true,
        };

        assert_eq!(gadget.id(), "p-1");
        assert_eq!(gadget.attribute_names(), vec!["key", "label", "count", "enabled"]);
        assert_eq!(gadget.field_value("label"), Some(FieldValue::Null));
        assert_eq!(gadget.field_value("count"), Some(FieldValue::Integer(3)));
        assert_eq!(gadget.field_value("enabled"), Some(FieldValue::Boolean(true)));
        assert_eq!(gadget.field_value("nope"), None);
        assert_eq!(Gadget::resource_name(), "gadgets");
        assert_eq!(Gadget::resource_name_singular(), "gadget");
    }
}
