//! C static-table rendering of class metadata.
//!
//! Output order: annotation functions, method array, field array, `ptrTable`,
//! class record. Absent arrays are not declared and the class record
//! references them as `NULL`. Each annotation list becomes a function
//! `<Class>__Annotations$<n>` returning the instances, and its `ptrTable` slot
//! points at that function.

use std::fmt::Write as _;

use crate::records::{
    AnnotationInfo, AuxConst, AuxValue, ClassMetadata, ConstantValue, FieldInfo, MethodInfo,
};

pub const METHOD_INFO_TYPE: &str = "RefMethodInfo";
pub const FIELD_INFO_TYPE: &str = "RefFieldInfo";
pub const CLASS_INFO_TYPE: &str = "RefClassInfo";

impl ClassMetadata {
    /// Render the metadata as C static declarations.
    pub fn render(&self) -> String {
        let mut out = String::new();

        for (n, list) in self.annotation_lists().enumerate() {
            writeln!(out, "IOSObjectArray *{}() {{", self.annotations_fn(n)).unwrap();
            writeln!(out, "  return {};", render_annotation_list(list)).unwrap();
            out.push_str("}\n");
        }

        if let Some(methods) = &self.methods {
            writeln!(out, "static const {METHOD_INFO_TYPE} methods[] = {{").unwrap();
            for m in methods {
                writeln!(out, "  {},", render_method(m)).unwrap();
            }
            out.push_str("};\n");
        }

        if let Some(fields) = &self.fields {
            writeln!(out, "static const {FIELD_INFO_TYPE} fields[] = {{").unwrap();
            for f in fields {
                writeln!(out, "  {},", render_field(f)).unwrap();
            }
            out.push_str("};\n");
        }

        if let Some(aux) = &self.aux {
            let mut lists = 0;
            let values: Vec<String> = aux
                .iter()
                .map(|value| match value {
                    AuxValue::Str(s) => c_string(s),
                    AuxValue::Const(c) => render_aux_const(c),
                    AuxValue::Annotations(_) => {
                        lists += 1;
                        format!("(void *)&{}", self.annotations_fn(lists - 1))
                    }
                })
                .collect();
            writeln!(
                out,
                "static const void *ptrTable[] = {{ {} }};",
                values.join(", ")
            )
            .unwrap();
        }

        let c = &self.class;
        writeln!(
            out,
            "static const {CLASS_INFO_TYPE} _{} = {{ {}, {}, {}, {}, {}, {}, {}, {}, {}, {}, {}, {} }};",
            self.target_name,
            c_string(&c.name),
            c.package.as_deref().map_or_else(|| "NULL".to_string(), c_string),
            present(self.aux.is_some(), "ptrTable"),
            present(self.methods.is_some(), "methods"),
            present(self.fields.is_some(), "fields"),
            c.version,
            c.modifiers,
            c.inner_classes,
            c.enclosing_class,
            c.enclosing_method,
            c.generic_signature,
            c.annotations,
        )
        .unwrap();

        out
    }

    fn annotation_lists(&self) -> impl Iterator<Item = &[AnnotationInfo]> {
        self.aux
            .iter()
            .flatten()
            .filter_map(AuxValue::as_annotations)
    }

    fn annotations_fn(&self, n: usize) -> String {
        format!("{}__Annotations${n}", self.target_name)
    }
}

fn present(is_present: bool, name: &str) -> &str {
    if is_present { name } else { "NULL" }
}

fn render_method(m: &MethodInfo) -> String {
    format!(
        "{{ {}, {}, {}, {}, {}, {}, {}, {}, {} }}",
        c_string(&m.selector),
        m.return_type.as_deref().map_or_else(|| "NULL".to_string(), c_string),
        m.modifiers,
        m.param_types,
        m.exceptions,
        m.generic_signature,
        m.declared_name,
        m.annotation_default,
        m.annotations,
    )
}

fn render_field(f: &FieldInfo) -> String {
    format!(
        "{{ {}, {}, {}, {}, {}, {}, {} }}",
        c_string(&f.name),
        c_string(&f.type_signature),
        render_constant(&f.constant),
        f.modifiers,
        f.generic_signature,
        f.enclosing_type,
        f.annotations,
    )
}

fn render_constant(value: &ConstantValue) -> String {
    let (member, literal) = match value {
        ConstantValue::None => ("asLong", "0".to_string()),
        ConstantValue::Bool(v) => ("asBOOL", v.to_string()),
        ConstantValue::Byte(v) => ("asChar", v.to_string()),
        ConstantValue::Char(v) => ("asUnichar", v.to_string()),
        ConstantValue::Short(v) => ("asShort", v.to_string()),
        ConstantValue::Int(v) => ("asInt", int_literal(*v)),
        ConstantValue::Long(v) => ("asLong", long_literal(*v)),
        ConstantValue::Float(v) => ("asFloat", float_literal(*v)),
        ConstantValue::Double(v) => ("asDouble", double_literal(*v)),
        ConstantValue::String(s) => ("asString", objc_string(s)),
    };
    format!(".constantValue.{member} = {literal}")
}

fn render_aux_const(value: &AuxConst) -> String {
    match value {
        AuxConst::Bool(v) => format!("&(const jboolean){{{v}}}"),
        AuxConst::Byte(v) => format!("&(const jbyte){{{v}}}"),
        AuxConst::Char(v) => format!("&(const jchar){{{v}}}"),
        AuxConst::Short(v) => format!("&(const jshort){{{v}}}"),
        AuxConst::Int(v) => format!("&(const jint){{{}}}", int_literal(*v)),
        AuxConst::Long(v) => format!("&(const jlong){{{}}}", long_literal(*v)),
        AuxConst::Float(bits) => {
            format!("&(const jfloat){{{}}}", float_literal(f32::from_bits(*bits)))
        }
        AuxConst::Double(bits) => {
            format!("&(const jdouble){{{}}}", double_literal(f64::from_bits(*bits)))
        }
        AuxConst::String(s) => objc_string(s),
        AuxConst::Class(descriptor) => c_string(descriptor),
        AuxConst::Enum { class, name } => format!(
            "&(const RefEnumConstant){{ {}, {} }}",
            c_string(class),
            c_string(name)
        ),
        AuxConst::Array(items) if items.is_empty() => "&(const RefConstArray){ 0, NULL }".to_string(),
        AuxConst::Array(items) => {
            let items: Vec<String> = items.iter().map(render_aux_const).collect();
            format!(
                "&(const RefConstArray){{ {}, (const void *[]){{ {} }} }}",
                items.len(),
                items.join(", ")
            )
        }
    }
}

fn render_annotation_list(list: &[AnnotationInfo]) -> String {
    let items: Vec<String> = list
        .iter()
        .map(|a| {
            let args: Vec<String> = a.elements.iter().map(|e| objc_value(&e.value)).collect();
            format!("create_{}({})", a.type_name, args.join(", "))
        })
        .collect();
    object_array(&items, "JavaLangAnnotationAnnotation")
}

fn object_array(items: &[String], element_class: &str) -> String {
    if items.is_empty() {
        return format!("[IOSObjectArray arrayWithLength:0 type:{element_class}_class_()]");
    }
    format!(
        "[IOSObjectArray arrayWithObjects:(id[]){{ {} }} count:{} type:{element_class}_class_()]",
        items.join(", "),
        items.len()
    )
}

/// Objective-C expression for an annotation element value.
fn objc_value(value: &AuxConst) -> String {
    match value {
        AuxConst::Bool(v) => v.to_string(),
        AuxConst::Byte(v) => v.to_string(),
        AuxConst::Char(v) => format!("0x{v:04x}"),
        AuxConst::Short(v) => v.to_string(),
        AuxConst::Int(v) => int_literal(*v),
        AuxConst::Long(v) => long_literal(*v),
        AuxConst::Float(bits) => float_literal(f32::from_bits(*bits)),
        AuxConst::Double(bits) => double_literal(f64::from_bits(*bits)),
        AuxConst::String(s) => objc_string(s),
        AuxConst::Class(descriptor) => class_literal(descriptor),
        AuxConst::Enum { class, name } => format!("{}_get_{name}()", class_name(class)),
        AuxConst::Array(items) => objc_array(items),
    }
}

fn objc_array(items: &[AuxConst]) -> String {
    let primitive = match items.first() {
        Some(AuxConst::Bool(_)) => Some(("Boolean", "jboolean")),
        Some(AuxConst::Byte(_)) => Some(("Byte", "jbyte")),
        Some(AuxConst::Char(_)) => Some(("Char", "jchar")),
        Some(AuxConst::Short(_)) => Some(("Short", "jshort")),
        Some(AuxConst::Int(_)) => Some(("Int", "jint")),
        Some(AuxConst::Long(_)) => Some(("Long", "jlong")),
        Some(AuxConst::Float(_)) => Some(("Float", "jfloat")),
        Some(AuxConst::Double(_)) => Some(("Double", "jdouble")),
        _ => None,
    };
    let values: Vec<String> = items.iter().map(objc_value).collect();
    if let Some((kind, c_type)) = primitive {
        return format!(
            "[IOS{kind}Array arrayWith{kind}s:({c_type}[]){{ {} }} count:{}]",
            values.join(", "),
            values.len()
        );
    }
    let element_class = match items.first() {
        Some(AuxConst::String(_)) => "NSString".to_string(),
        Some(AuxConst::Class(_)) => "IOSClass".to_string(),
        Some(AuxConst::Enum { class, .. }) => class_name(class).to_string(),
        Some(AuxConst::Array(_)) => "IOSArray".to_string(),
        _ => "NSObject".to_string(),
    };
    object_array(&values, &element_class)
}

/// `LFooBar;` to `FooBar`.
fn class_name(descriptor: &str) -> &str {
    descriptor
        .strip_prefix('L')
        .and_then(|rest| rest.strip_suffix(';'))
        .unwrap_or(descriptor)
}

fn class_literal(descriptor: &str) -> String {
    if let Some(element) = descriptor.strip_prefix('[') {
        return format!("IOSClass_arrayType({}, 1)", class_literal(element));
    }
    let primitive = match descriptor {
        "Z" => "boolean",
        "B" => "byte",
        "C" => "char",
        "S" => "short",
        "I" => "int",
        "J" => "long",
        "F" => "float",
        "D" => "double",
        "V" => "void",
        _ => return format!("{}_class_()", class_name(descriptor)),
    };
    format!("[IOSClass {primitive}Class]")
}

fn int_literal(v: i32) -> String {
    if v == i32::MIN {
        // `-2147483648` is a negated out-of-range literal in C.
        "(-2147483647 - 1)".to_string()
    } else {
        v.to_string()
    }
}

fn long_literal(v: i64) -> String {
    if v == i64::MIN {
        "(-9223372036854775807LL - 1)".to_string()
    } else {
        format!("{v}LL")
    }
}

fn float_literal(v: f32) -> String {
    if v.is_nan() {
        "NAN".to_string()
    } else if v.is_infinite() {
        let literal = if v > 0.0 { "INFINITY" } else { "-INFINITY" };
        literal.to_string()
    } else {
        format!("{v:?}f")
    }
}

fn double_literal(v: f64) -> String {
    if v.is_nan() {
        "NAN".to_string()
    } else if v.is_infinite() {
        let literal = if v > 0.0 { "INFINITY" } else { "-INFINITY" };
        literal.to_string()
    } else {
        format!("{v:?}")
    }
}

fn objc_string(s: &str) -> String {
    format!("@{}", c_string(s))
}

/// Quote a string as a C literal. Non-ASCII bytes are written as octal
/// escapes of their UTF-8 encoding.
pub fn c_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for byte in s.bytes() {
        match byte {
            b'"' => out.push_str("\\\""),
            b'\\' => out.push_str("\\\\"),
            b'\n' => out.push_str("\\n"),
            b'\r' => out.push_str("\\r"),
            b'\t' => out.push_str("\\t"),
            0x20..=0x7e => out.push(byte as char),
            _ => write!(out, "\\{byte:03o}").unwrap(),
        }
    }
    out.push('"');
    out
}
