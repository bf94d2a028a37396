//! Naming checks over a finished descriptor set.
//!
//! Sanitizing is lossy, so two distinct source names can end up as the same
//! generated name. Both builders run [`validate_classes`] before handing
//! descriptors out, which turns such a collision into an error instead of
//! generated code that does not compile.
//!
//! ## Validation Checks
//!
//! - **Class names**: unique across the generated set
//! - **Member names**: unique within each class
//! - **Reserved names**: table members may not shadow the table handle field

use std::collections::HashSet;

use crate::descriptor::{ClassDescriptor, ClassKind, TABLE_HANDLE_FIELD};
use crate::errors::GeneratorError;

/// Validates a descriptor set before rendering.
///
/// ## Examples
///
/// ```
/// use declgen::descriptor::{ClassDescriptor, ClassKind};
/// use declgen::validation::validate_classes;
///
/// let classes = vec![
///     ClassDescriptor::new("Root", ClassKind::Directory { path: "/".into() }),
///     ClassDescriptor::new("Root_css", ClassKind::Directory { path: "/css".into() }),
/// ];
/// assert!(validate_classes(&classes).is_ok());
/// ```
///
/// ## Errors
///
/// Returns `GeneratorError::NamingCollision` naming the first duplicate found.
pub fn validate_classes(classes: &[ClassDescriptor]) -> Result<(), GeneratorError> {
    let mut class_names = HashSet::with_capacity(classes.len());

    for class in classes {
        if !class_names.insert(class.name.as_str()) {
            return Err(GeneratorError::NamingCollision {
                name: class.name.clone(),
                scope: "the generated set".to_string(),
            });
        }

        let mut member_names = HashSet::with_capacity(class.members.len());
        for member in &class.members {
            let reserved = matches!(class.kind, ClassKind::Table { .. })
                && member.name == TABLE_HANDLE_FIELD;

            if reserved || !member_names.insert(member.name.as_str()) {
                return Err(GeneratorError::NamingCollision {
                    name: member.name.clone(),
                    scope: format!("class '{}'", class.name),
                });
            }
        }
    }

    Ok(())
}
