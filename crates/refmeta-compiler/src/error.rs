//! Errors raised while synthesizing one class.

/// Why a class model could not be described.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Malformed {
    #[error("class has an empty name")]
    EmptyName,
    #[error("method has no return type")]
    MissingReturnType,
    #[error("constructor declares a return type")]
    ConstructorReturnType,
    #[error("enclosing scopes do not start with a class scope")]
    ScopeWithoutClass,
    #[error("unresolved type variable `{0}`")]
    UnknownTypeVar(String),
    #[error("type variable `{0}` is bounded by itself")]
    CyclicTypeVar(String),
    #[error("varargs method does not end with an array parameter")]
    VarargsNotArray,
    #[error("`void` used as a parameter or field type")]
    VoidValue,
}

/// Synthesis failure. Every variant names the class it belongs to.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SynthError {
    #[error("malformed class `{class}`{}: {reason}", member_suffix(.member))]
    Malformed {
        class: String,
        member: Option<String>,
        reason: Malformed,
    },

    #[error("selector `{selector}` in `{class}` is produced by both `{first}` and `{second}`")]
    SelectorCollision {
        class: String,
        first: String,
        second: String,
        selector: String,
    },

    #[error("auxiliary table of `{class}` needs {count} entries (max {max})")]
    PoolOverflow {
        class: String,
        count: usize,
        max: usize,
    },
}

impl SynthError {
    /// Class the error was raised for.
    pub fn class(&self) -> &str {
        match self {
            Self::Malformed { class, .. }
            | Self::SelectorCollision { class, .. }
            | Self::PoolOverflow { class, .. } => class,
        }
    }
}

fn member_suffix(member: &Option<String>) -> String {
    match member {
        Some(name) => format!(" (member `{name}`)"),
        None => String::new(),
    }
}
