//! JVM-style generic signatures over the unerased model.
//!
//! These are the strings `java.lang.reflect` parses back into generic types:
//! `<T:Ljava/lang/Object;>Ljava/lang/Object;` for a class, `(ITT;)V` for a
//! method, `TT;` for a field.

use refmeta_core::names::primitive_code;
use refmeta_core::{ClassModel, ClassType, MethodModel, TypeArg, TypeParam, TypeRef};

/// Signature of a class that declares type parameters or has a parameterized supertype.
pub fn class_signature(model: &ClassModel) -> Option<String> {
    let generic_super = model.superclass.as_ref().is_some_and(TypeRef::is_generic)
        || model.interfaces.iter().any(TypeRef::is_generic);
    if model.type_params.is_empty() && !generic_super {
        return None;
    }

    let mut out = String::new();
    write_type_params(&model.type_params, &mut out);
    match &model.superclass {
        Some(superclass) => write_type(superclass, &mut out),
        None => out.push_str("Ljava/lang/Object;"),
    }
    for interface in &model.interfaces {
        write_type(interface, &mut out);
    }
    Some(out)
}

/// Signature of a method whose declaration mentions a type variable or type arguments.
pub fn method_signature(method: &MethodModel) -> Option<String> {
    let generic = !method.type_params.is_empty()
        || method.params.iter().any(TypeRef::is_generic)
        || method.return_type.as_ref().is_some_and(TypeRef::is_generic)
        || method.throws.iter().any(TypeRef::is_generic);
    if !generic {
        return None;
    }

    let mut out = String::new();
    write_type_params(&method.type_params, &mut out);
    out.push('(');
    for param in &method.params {
        write_type(param, &mut out);
    }
    out.push(')');
    match &method.return_type {
        Some(ret) => write_type(ret, &mut out),
        None => out.push('V'),
    }
    // Throws are only spelled out when erasure would lose information.
    if method.throws.iter().any(|t| matches!(t, TypeRef::TypeVar(_))) {
        for thrown in &method.throws {
            out.push('^');
            write_type(thrown, &mut out);
        }
    }
    Some(out)
}

/// Signature of a field whose type mentions a type variable or type arguments.
pub fn field_signature(ty: &TypeRef) -> Option<String> {
    ty.is_generic().then(|| type_signature(ty))
}

pub fn type_signature(ty: &TypeRef) -> String {
    let mut out = String::new();
    write_type(ty, &mut out);
    out
}

fn write_type_params(params: &[TypeParam], out: &mut String) {
    if params.is_empty() {
        return;
    }
    out.push('<');
    for param in params {
        out.push_str(&param.name);
        out.push(':');
        match param.bounds.split_first() {
            None => out.push_str("Ljava/lang/Object;"),
            Some((first, rest)) => {
                // An interface first bound leaves the class bound empty: `T::Ljava/lang/Runnable;`.
                if is_interface(first) {
                    out.push(':');
                }
                write_type(first, out);
                for bound in rest {
                    out.push(':');
                    write_type(bound, out);
                }
            }
        }
    }
    out.push('>');
}

fn is_interface(ty: &TypeRef) -> bool {
    matches!(ty, TypeRef::Class(class) if class.interface)
}

fn write_type(ty: &TypeRef, out: &mut String) {
    match ty {
        TypeRef::Primitive(p) => out.push(primitive_code(*p)),
        TypeRef::TypeVar(name) => {
            out.push('T');
            out.push_str(name);
            out.push(';');
        }
        TypeRef::Array(element) => {
            out.push('[');
            write_type(element, out);
        }
        TypeRef::Class(class) => write_class(class, out),
    }
}

fn write_class(class: &ClassType, out: &mut String) {
    out.push('L');
    if let Some(package) = &class.package {
        for segment in package.split('.') {
            out.push_str(segment);
            out.push('/');
        }
    }
    out.push_str(&class.name);
    if !class.args.is_empty() {
        out.push('<');
        for arg in &class.args {
            match arg {
                TypeArg::Type(ty) => write_type(ty, out),
                TypeArg::Wildcard => out.push('*'),
                TypeArg::Extends(ty) => {
                    out.push('+');
                    write_type(ty, out);
                }
                TypeArg::Super(ty) => {
                    out.push('-');
                    write_type(ty, out);
                }
            }
        }
        out.push('>');
    }
    out.push(';');
}
