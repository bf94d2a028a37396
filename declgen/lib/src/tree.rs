//! Tree descriptor builder for static resource maps.
//!
//! Every directory becomes one class named after its ancestry
//! (`Root`, `Root_son1`, `Root_son1_grandson`), and every exposed file a
//! path constant on that class.

use tracing::{debug, instrument};

use crate::descriptor::{ClassDescriptor, ClassKind, MemberDescriptor};
use crate::errors::GeneratorError;
use crate::resource::ResourceDirInfo;
use crate::sanitize::{quote_literal, sanitize};
use crate::validation::validate_classes;

/// Class name of the root directory, whatever the root is called on disk.
pub const ROOT_CLASS_NAME: &str = "Root";

/// Type of the generated path constants.
pub const PATH_TYPE: &str = "&'static str";

/// A directory class together with the classes of its subdirectories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptorTree {
    pub class: ClassDescriptor,
    pub children: Vec<DescriptorTree>,
}

impl DescriptorTree {
    /// Flattens the tree, parents before children, children in insertion order.
    pub fn into_pre_order(self) -> Vec<ClassDescriptor> {
        let mut classes = Vec::new();
        self.collect_into(&mut classes);
        classes
    }

    fn collect_into(self, classes: &mut Vec<ClassDescriptor>) {
        classes.push(self.class);
        for child in self.children {
            child.collect_into(classes);
        }
    }
}

/// Builds the descriptor tree mirroring `root`.
pub fn build_descriptor_tree(root: &ResourceDirInfo) -> DescriptorTree {
    describe_dir(root, ROOT_CLASS_NAME.to_string(), String::new())
}

fn describe_dir(dir: &ResourceDirInfo, class_name: String, path: String) -> DescriptorTree {
    let members = if dir.has_files {
        dir.files
            .iter()
            .map(|file| {
                MemberDescriptor::new(
                    sanitize(file),
                    PATH_TYPE,
                    quote_literal(&format!("{path}/{file}")),
                )
            })
            .collect()
    } else {
        Vec::new()
    };

    debug!(class = %class_name, members = members.len(), "Describing directory");

    let children = dir
        .children
        .iter()
        .map(|child| {
            describe_dir(
                child,
                format!("{class_name}_{}", sanitize(&child.name)),
                format!("{path}/{}", child.name),
            )
        })
        .collect();

    let dir_path = if path.is_empty() { "/".to_string() } else { path };

    DescriptorTree {
        class: ClassDescriptor::new(class_name, ClassKind::Directory { path: dir_path })
            .with_members(members),
        children,
    }
}

/// Builds and validates the classes for a directory tree, in pre-order.
///
/// ## Errors
///
/// Returns `GeneratorError::NamingCollision` when sanitized directory or
/// file names clash (for example `app.js` next to `app_js`).
#[instrument(skip_all)]
pub fn describe_tree(root: &ResourceDirInfo) -> Result<Vec<ClassDescriptor>, GeneratorError> {
    let classes = build_descriptor_tree(root).into_pre_order();
    validate_classes(&classes)?;
    Ok(classes)
}
