// src/core/type_names.rs

//! Simple type names.

/// Returns the unqualified name of `T`: no module path, no generic
/// parameters, no leading reference sigils.
pub fn simple_type_name<T: ?Sized>() -> String {
    simple_name(std::any::type_name::<T>()).to_string()
}

/// Reduces a fully-qualified type path to its simple name.
///
/// `alloc::vec::Vec<alloc::string::String>` becomes `Vec`, `&mut str` becomes `str`.
pub fn simple_name(full: &str) -> &str {
    let mut name = full.trim();
    loop {
        if let Some(rest) = name.strip_prefix('&') {
            name = rest.trim_start();
        } else if let Some(rest) = name.strip_prefix("mut ") {
            name = rest.trim_start();
        } else {
            break;
        }
    }

    // Arrays, slices and tuples have no path of their own.
    if name.starts_with('[') || name.starts_with('(') {
        return name;
    }

    let without_generics = name.split_once('<').map_or(name, |(head, _)| head);
    without_generics
        .rsplit("::")
        .next()
        .unwrap_or(without_generics)
}
