use std::collections::HashMap;
use std::collections::hash_map::Entry;

use refmeta_core::MethodModel;
use refmeta_core::names::is_reserved_selector;

use crate::erasure::Erased;

const CONSTRUCTOR_NAME: &str = "init";

/// Selector for a method or constructor given its erased parameter types.
pub fn selector(method: &MethodModel, params: &[Erased]) -> String {
    if method.is_constructor() {
        constructor_selector(params)
    } else {
        method_selector(&method.name, params)
    }
}

/// `test6WithNSString:withNSObjectArray:`. Reserved names get a `__` suffix first.
pub fn method_selector(name: &str, params: &[Erased]) -> String {
    let mut out = name.to_string();
    if is_reserved_selector(name) {
        out.push_str("__");
    }
    push_segments(&mut out, params);
    out
}

/// `init`, `initWithNSString:`.
pub fn constructor_selector(params: &[Erased]) -> String {
    let mut out = CONSTRUCTOR_NAME.to_string();
    push_segments(&mut out, params);
    out
}

fn push_segments(out: &mut String, params: &[Erased]) {
    for (i, param) in params.iter().enumerate() {
        out.push_str(if i == 0 { "With" } else { "with" });
        out.push_str(&param.keyword());
        out.push(':');
    }
}

/// Selectors already taken in one class, with the member that took them.
#[derive(Debug, Default)]
pub struct SelectorTable {
    taken: HashMap<String, String>,
}

impl SelectorTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim a selector for `member`. On collision returns the earlier owner.
    pub fn claim(&mut self, selector: &str, member: &str) -> Result<(), String> {
        match self.taken.entry(selector.to_string()) {
            Entry::Occupied(owner) => Err(owner.get().clone()),
            Entry::Vacant(slot) => {
                slot.insert(member.to_string());
                Ok(())
            }
        }
    }
}
