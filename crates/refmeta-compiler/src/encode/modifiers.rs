use refmeta_core::{ClassKind, ClassModel, FieldModel, MethodModel, Modifier};
use refmeta_format::Modifiers;

/// Bits for source keywords. `default` has no bit of its own.
pub fn keyword_modifiers(keywords: &[Modifier]) -> Modifiers {
    keywords
        .iter()
        .map(|keyword| match keyword {
            Modifier::Public => Modifiers::PUBLIC,
            Modifier::Private => Modifiers::PRIVATE,
            Modifier::Protected => Modifiers::PROTECTED,
            Modifier::Static => Modifiers::STATIC,
            Modifier::Final => Modifiers::FINAL,
            Modifier::Synchronized => Modifiers::SYNCHRONIZED,
            Modifier::Volatile => Modifiers::VOLATILE,
            Modifier::Transient => Modifiers::TRANSIENT,
            Modifier::Native => Modifiers::NATIVE,
            Modifier::Abstract => Modifiers::ABSTRACT,
            Modifier::Strictfp => Modifiers::STRICT,
            Modifier::Default => Modifiers::empty(),
        })
        .fold(Modifiers::empty(), |acc, bits| acc | bits)
}

pub fn method_modifiers(class: &ClassModel, method: &MethodModel) -> Modifiers {
    let mut bits = keyword_modifiers(&method.modifiers);
    if method.varargs {
        bits |= Modifiers::VARARGS;
    }
    if method.bridge {
        bits |= Modifiers::BRIDGE;
    }
    if method.synthetic {
        bits |= Modifiers::SYNTHETIC;
    }

    if class.kind.is_interface() && !method.has_modifier(Modifier::Private) {
        bits |= Modifiers::PUBLIC;
        if !method.has_modifier(Modifier::Static) && !method.has_modifier(Modifier::Default) {
            bits |= Modifiers::ABSTRACT;
        }
    }
    if class.kind == ClassKind::Annotation && method.annotation_default.is_some() {
        bits |= Modifiers::ANNOTATION_DEFAULT;
    }
    bits
}

pub fn field_modifiers(class: &ClassModel, field: &FieldModel) -> Modifiers {
    let mut bits = keyword_modifiers(&field.modifiers);
    if field.synthetic {
        bits |= Modifiers::SYNTHETIC;
    }
    if field.enum_constant {
        bits |= Modifiers::ENUM;
    }
    if class.kind.is_interface() {
        bits |= Modifiers::PUBLIC | Modifiers::STATIC | Modifiers::FINAL;
    }
    bits
}

pub fn class_modifiers(class: &ClassModel) -> Modifiers {
    let mut bits = keyword_modifiers(&class.modifiers);
    let nested = !class.scopes.is_empty();

    match class.kind {
        ClassKind::Class => {}
        ClassKind::Interface | ClassKind::Annotation => {
            bits |= Modifiers::INTERFACE | Modifiers::ABSTRACT;
            if class.kind == ClassKind::Annotation {
                bits |= Modifiers::ANNOTATION;
            }
            if nested {
                bits |= Modifiers::STATIC;
            }
        }
        ClassKind::Enum => {
            bits |= Modifiers::ENUM;
            if nested {
                bits |= Modifiers::STATIC;
            }
        }
    }
    if class.is_anonymous() {
        bits |= Modifiers::ANONYMOUS;
    }
    if class.synthetic {
        bits |= Modifiers::SYNTHETIC;
    }
    bits
}
