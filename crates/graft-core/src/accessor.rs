//! Accessor-name derivation for bean-style members.
//!
//! Derives the member names accessor-synthesizing strategies would emit:
//! `get`/`is` heads for getters (the `is` form only for the host's primitive
//! `boolean` spelling; the boxed spelling keeps `get`), `set` for setters,
//! and the default instance-variable name for a class.

/// Upper-case the first letter of a property name.
fn capitalize(property: &str) -> String {
    let mut chars = property.chars();
    match chars.next() {
        Some(head) => head.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Getter name for a property: `isActive` for `boolean active`,
/// `getName` for everything else.
pub fn getter_name(type_spelling: &str, property: &str) -> String {
    let prefix = if type_spelling == "boolean" { "is" } else { "get" };
    format!("{prefix}{}", capitalize(property))
}

/// Setter name for a property: `setName` for `name`.
pub fn setter_name(property: &str) -> String {
    format!("set{}", capitalize(property))
}

/// Default instance-variable name for a class simple name: head letter
/// lower-cased, `String` becomes `string`.
pub fn instance_var(class_name: &str) -> String {
    let mut chars = class_name.chars();
    match chars.next() {
        Some(head) => head.to_lowercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_getter_names() {
        assert_eq!(getter_name("String", "name"), "getName");
        assert_eq!(getter_name("boolean", "active"), "isActive");
        assert_eq!(getter_name("Boolean", "active"), "getActive");
        assert_eq!(getter_name("int[]", "counts"), "getCounts");
    }

    #[test]
    fn test_setter_names() {
        assert_eq!(setter_name("email"), "setEmail");
        assert_eq!(setter_name("e"), "setE");
    }

    #[test]
    fn test_instance_var() {
        assert_eq!(instance_var("String"), "string");
        assert_eq!(instance_var("URLBuilder"), "uRLBuilder");
        assert_eq!(instance_var(""), "");
    }
}
