//! Object paths: how to navigate from the hierarchy root to an object.
//!
//! The encoder and the assembler only consume paths as opaque text through
//! [`PathResolver`]. [`HierarchyResolver`] derives them from the ancestry stored in
//! an [`InstanceRef`]; hosts with better knowledge of the live hierarchy can plug in
//! their own resolver, and any `Fn(&InstanceRef) -> String` works as one.

use crate::{
    literal::{LUA_KEYWORDS, quoted},
    value::{InstanceRef, InstanceRole},
};

/// Appended to a path whose ancestry ends before reaching the root.
pub const DETACHED_SUFFIX: &str = " --[[ PARENTED TO NIL OR DESTROYED ]]";

pub trait PathResolver {
    /// Source text that evaluates to `instance`, starting from a known root.
    fn resolve_path(&self, instance: &InstanceRef) -> String;
}

impl<F> PathResolver for F
where
    F: Fn(&InstanceRef) -> String,
{
    fn resolve_path(&self, instance: &InstanceRef) -> String {
        self(instance)
    }
}

/// Resolves paths from the parent chain captured in each [`InstanceRef`].
#[derive(Debug, Clone, Copy, Default)]
pub struct HierarchyResolver;

impl PathResolver for HierarchyResolver {
    fn resolve_path(&self, instance: &InstanceRef) -> String {
        instance_path(instance)
    }
}

/// Path of `instance` built from its parent chain.
///
/// `game` and `workspace` are written as globals, services via `:GetService`, and
/// every other object as a segment appended to its parent's path. An object with no
/// parent that is not the root gets [`DETACHED_SUFFIX`].
#[must_use]
pub fn instance_path(instance: &InstanceRef) -> String {
    let Some(parent) = &instance.parent else {
        if instance.role == InstanceRole::DataModel {
            return "game".to_owned();
        }
        return format!("{}{DETACHED_SUFFIX}", name_segment(&instance.name));
    };
    let segment = match instance.role {
        InstanceRole::DataModel => return "game".to_owned(),
        InstanceRole::Workspace => return "workspace".to_owned(),
        InstanceRole::Service => format!(":GetService({})", quoted(&instance.class_name, '"')),
        InstanceRole::LocalPlayer => ".LocalPlayer".to_owned(),
        InstanceRole::Plain => name_segment(&instance.name),
    };
    instance_path(parent) + &segment
}

/// The segment that selects a child named `name` from its parent.
///
/// - empty names → `['']`
/// - names starting with a digit, keywords, and names whose only non-word
///   characters are spaces or ASCII punctuation → `["name"]`
/// - other names with a non-ASCII or control character → `[utf8.char(...)]`
/// - everything else → `.name`
fn name_segment(name: &str) -> String {
    if name.is_empty() {
        return "['']".to_owned();
    }
    let non_word: Vec<char> = name
        .chars()
        .filter(|c| !(c.is_ascii_alphanumeric() || *c == '_'))
        .collect();
    let exotic = non_word
        .iter()
        .any(|c| !(c.is_ascii_whitespace() || c.is_ascii_punctuation()));
    let starts_with_digit = name.starts_with(|c: char| c.is_ascii_digit());

    if starts_with_digit || (!non_word.is_empty() && !exotic) || LUA_KEYWORDS.contains(&name) {
        format!("[{}]", quoted(name, '"'))
    } else if exotic {
        let codepoints: Vec<String> = name.chars().map(|c| u32::from(c).to_string()).collect();
        format!("[utf8.char({})]", codepoints.join(", "))
    } else {
        format!(".{name}")
    }
}
