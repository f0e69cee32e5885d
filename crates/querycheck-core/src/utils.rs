/// Last segment of a dotted qualified name.
///
/// # Examples
/// ```
/// use querycheck_core::utils::simple_name;
/// assert_eq!(simple_name("com.example.Person"), "Person");
/// assert_eq!(simple_name("Person"), "Person");
/// ```
pub fn simple_name(qualified: &str) -> &str {
    match qualified.rfind('.') {
        Some(idx) => &qualified[idx + 1..],
        None => qualified,
    }
}

/// Uppercase the first character.
///
/// # Examples
/// ```
/// use querycheck_core::utils::capitalize;
/// assert_eq!(capitalize("name"), "Name");
/// ```
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Lowercase the first character, unless the first two are both uppercase.
///
/// Acronyms keep their case, so an accessor `getURL` maps to `URL`.
///
/// # Examples
/// ```
/// use querycheck_core::utils::decapitalize;
/// assert_eq!(decapitalize("Name"), "name");
/// assert_eq!(decapitalize("URL"), "URL");
/// ```
pub fn decapitalize(s: &str) -> String {
    let mut chars = s.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    if first.is_uppercase() && chars.next().is_some_and(char::is_uppercase) {
        return s.to_string();
    }
    first.to_lowercase().chain(s.chars().skip(1)).collect()
}

/// Property name for an accessor method name, if it is one.
///
/// Only the `get` / `is` prefix is checked; arity and return type are the
/// caller's concern.
///
/// # Examples
/// ```
/// use querycheck_core::utils::accessor_property_name;
/// assert_eq!(accessor_property_name("getName").as_deref(), Some("name"));
/// assert_eq!(accessor_property_name("isActive").as_deref(), Some("active"));
/// assert_eq!(accessor_property_name("get"), None);
/// ```
pub fn accessor_property_name(method: &str) -> Option<String> {
    let rest = method
        .strip_prefix("get")
        .or_else(|| method.strip_prefix("is"))?;
    if !rest.starts_with(char::is_uppercase) {
        return None;
    }
    Some(decapitalize(rest))
}
