//! Descriptor extraction: one class model in, records plus a filled pool out.
//!
//! Interning order decides pool indices and is fixed: methods in declaration
//! order (parameter types, declared name, exceptions, generic signature,
//! annotation default, annotations), then fields (generic signature,
//! enclosing type, annotations), then the class itself (enclosing class,
//! inner classes, enclosing method, generic signature, annotations).

use refmeta_core::names::{class_target_name, element_name, target_name};
use refmeta_core::{Annotation, ClassModel, ConstValue, FieldModel, MethodModel, Modifier, Scope};
use refmeta_format::{
    AnnotationInfo, AuxConst, AuxIdx, AuxValue, ClassInfo, ConstantValue, ElementValue, FieldInfo,
    MethodInfo,
};

use crate::aux_pool::AuxPool;
use crate::config::Config;
use crate::encode::{self, SelectorTable};
use crate::erasure::{Erased, TypeEnv, type_list};
use crate::error::{Malformed, SynthError};
use crate::signature;

/// Everything extracted from one class, before table assembly.
#[derive(Debug)]
pub struct Descriptors {
    /// Target-language class name.
    pub target_name: String,
    pub class: ClassInfo,
    pub methods: Vec<MethodInfo>,
    pub fields: Vec<FieldInfo>,
    pub pool: AuxPool,
}

/// Extract descriptors for one class. The model is only read.
pub fn extract(model: &ClassModel, config: &Config) -> Result<Descriptors, SynthError> {
    let target = target_name(model.package.as_deref(), &model.binary_name);
    if model.binary_name.is_empty() {
        return Err(SynthError::Malformed {
            class: target,
            member: None,
            reason: Malformed::EmptyName,
        });
    }

    let mut extractor = Extractor {
        model,
        config,
        env: TypeEnv::for_class(model),
        target,
        pool: AuxPool::new(),
        selectors: SelectorTable::new(),
    };

    let methods = model
        .methods()
        .map(|method| extractor.method(method))
        .collect::<Result<Vec<_>, _>>()?;
    let fields = model
        .fields()
        .map(|field| extractor.field(field))
        .collect::<Result<Vec<_>, _>>()?;
    let class = extractor.class()?;

    Ok(Descriptors {
        target_name: extractor.target,
        class,
        methods,
        fields,
        pool: extractor.pool,
    })
}

struct Extractor<'a> {
    model: &'a ClassModel,
    config: &'a Config,
    env: TypeEnv<'a>,
    target: String,
    pool: AuxPool,
    selectors: SelectorTable,
}

impl<'a> Extractor<'a> {
    fn method(&mut self, method: &'a MethodModel) -> Result<MethodInfo, SynthError> {
        let label = member_label(method);
        let fail = |reason| self.malformed(Some(&label), reason);

        match (&method.return_type, method.is_constructor()) {
            (None, false) => return Err(fail(Malformed::MissingReturnType)),
            (Some(_), true) => return Err(fail(Malformed::ConstructorReturnType)),
            _ => {}
        }

        let env = self.env.with_method(&method.type_params);
        let params = env.erase_all(&method.params).map_err(fail)?;
        if params.iter().any(Erased::is_void) {
            return Err(fail(Malformed::VoidValue));
        }
        if method.varargs && !params.last().is_some_and(Erased::is_array) {
            return Err(fail(Malformed::VarargsNotArray));
        }
        let return_type = match &method.return_type {
            Some(ret) => Some(env.erase(ret).map_err(fail)?.value_signature()),
            None => None,
        };
        let exceptions = env.erase_all(&method.throws).map_err(fail)?;
        let default = match &method.annotation_default {
            Some(value) => Some(aux_const(value, &env).map_err(fail)?),
            None => None,
        };
        let annotations = runtime_annotations(&method.annotations, &env).map_err(fail)?;

        let selector = encode::selector(method, &params);
        if let Err(first) = self.selectors.claim(&selector, &label) {
            tracing::warn!(class = %self.target, %selector, "selector collision");
            return Err(SynthError::SelectorCollision {
                class: self.target.clone(),
                first,
                second: label,
                selector,
            });
        }

        let param_types = self.intern_if(!params.is_empty(), || type_list(&params));
        let declared_name = self.intern_if(
            !method.is_constructor() && selector != method.name,
            || method.name.clone(),
        );
        let exceptions = self.intern_if(!exceptions.is_empty(), || type_list(&exceptions));
        let generic_signature = self.intern_opt(
            self.config
                .generic_signatures
                .then(|| signature::method_signature(method))
                .flatten(),
        );
        let annotation_default = match default {
            Some(value) => self.pool.intern(AuxValue::Const(value)),
            None => AuxIdx::ABSENT,
        };
        let annotations = self.intern_annotations(annotations);

        Ok(MethodInfo {
            selector,
            return_type,
            modifiers: encode::method_modifiers(self.model, method),
            param_types,
            exceptions,
            generic_signature,
            declared_name,
            annotation_default,
            annotations,
        })
    }

    fn field(&mut self, field: &'a FieldModel) -> Result<FieldInfo, SynthError> {
        let fail = |reason| self.malformed(Some(&field.name), reason);

        let ty = self.env.erase(&field.ty).map_err(fail)?;
        if ty.is_void() {
            return Err(fail(Malformed::VoidValue));
        }
        let annotations = runtime_annotations(&field.annotations, &self.env).map_err(fail)?;

        let generic_signature = self.intern_opt(
            self.config
                .generic_signatures
                .then(|| signature::field_signature(&field.ty))
                .flatten(),
        );
        let is_static = field.has_modifier(Modifier::Static) || self.model.kind.is_interface();
        let enclosing_type = if is_static {
            let descriptor = format!("L{};", self.target);
            self.pool.intern(descriptor)
        } else {
            AuxIdx::ABSENT
        };
        let annotations = self.intern_annotations(annotations);

        Ok(FieldInfo {
            name: format!("{}_", field.name),
            type_signature: ty.value_signature(),
            constant: field
                .constant
                .as_ref()
                .map_or(ConstantValue::None, field_constant),
            modifiers: encode::field_modifiers(self.model, field),
            generic_signature,
            enclosing_type,
            annotations,
        })
    }

    fn class(&mut self) -> Result<ClassInfo, SynthError> {
        let model = self.model;
        let scopes = model.scopes.as_slice();
        if !scopes.is_empty() && !matches!(scopes[0], Scope::Class { .. }) {
            return Err(self.malformed(None, Malformed::ScopeWithoutClass));
        }

        let enclosing_class = match scopes.iter().rev().find_map(|scope| match scope {
            Scope::Class { class, .. } => Some(class),
            _ => None,
        }) {
            Some(class) => self.pool.intern(format!("L{}", class_target_name(class))),
            None => AuxIdx::ABSENT,
        };

        let inner_classes = self.intern_if(!model.member_types.is_empty(), || {
            model
                .member_types
                .iter()
                .map(|name| format!("L{};", target_name(model.package.as_deref(), name)))
                .collect::<String>()
        });

        let enclosing_method = match scopes.split_last() {
            Some((
                Scope::Method {
                    name,
                    params,
                    constructor,
                    ..
                },
                _,
            )) => {
                let env = TypeEnv::for_scopes(scopes);
                let erased = env
                    .erase_all(params)
                    .map_err(|reason| self.malformed(None, reason))?;
                let selector = if *constructor {
                    encode::constructor_selector(&erased)
                } else {
                    encode::method_selector(name, &erased)
                };
                self.pool.intern(selector)
            }
            _ => AuxIdx::ABSENT,
        };

        let generic_signature = self.intern_opt(
            self.config
                .generic_signatures
                .then(|| signature::class_signature(model))
                .flatten(),
        );
        let annotations = runtime_annotations(&model.annotations, &self.env)
            .map_err(|reason| self.malformed(None, reason))?;
        let annotations = self.intern_annotations(annotations);

        Ok(ClassInfo {
            name: model.simple_name.clone(),
            package: model.package.clone(),
            version: self.config.version,
            modifiers: encode::class_modifiers(model),
            inner_classes,
            enclosing_class,
            enclosing_method,
            generic_signature,
            annotations,
        })
    }

    fn intern_if(&mut self, cond: bool, value: impl FnOnce() -> String) -> AuxIdx {
        if cond {
            self.pool.intern(value())
        } else {
            AuxIdx::ABSENT
        }
    }

    fn intern_annotations(&mut self, list: Vec<AnnotationInfo>) -> AuxIdx {
        if list.is_empty() {
            AuxIdx::ABSENT
        } else {
            self.pool.intern(AuxValue::Annotations(list))
        }
    }

    fn intern_opt(&mut self, value: Option<String>) -> AuxIdx {
        value.map_or(AuxIdx::ABSENT, |v| self.pool.intern(v))
    }

    fn malformed(&self, member: Option<&str>, reason: Malformed) -> SynthError {
        SynthError::Malformed {
            class: self.target.clone(),
            member: member.map(str::to_string),
            reason,
        }
    }
}

/// Name used for a member in diagnostics.
fn member_label(method: &MethodModel) -> String {
    if method.is_constructor() {
        "<init>".to_string()
    } else {
        method.name.clone()
    }
}

fn field_constant(value: &ConstValue) -> ConstantValue {
    match value {
        ConstValue::Bool(v) => ConstantValue::Bool(*v),
        ConstValue::Byte(v) => ConstantValue::Byte(*v),
        ConstValue::Char(v) => ConstantValue::Char(*v),
        ConstValue::Short(v) => ConstantValue::Short(*v),
        ConstValue::Int(v) => ConstantValue::Int(*v),
        ConstValue::Long(v) => ConstantValue::Long(*v),
        ConstValue::Float(v) => ConstantValue::Float(*v),
        ConstValue::Double(v) => ConstantValue::Double(*v),
        ConstValue::String(s) => ConstantValue::String(s.clone()),
        // Not compile-time constants of a field.
        ConstValue::Class(_) | ConstValue::Enum { .. } | ConstValue::Array(_) => ConstantValue::None,
    }
}

/// Runtime-retained annotations only; source and class retention never
/// reach the tables.
fn runtime_annotations(
    annotations: &[Annotation],
    env: &TypeEnv<'_>,
) -> Result<Vec<AnnotationInfo>, Malformed> {
    annotations
        .iter()
        .filter(|a| a.is_runtime())
        .map(|a| annotation_info(a, env))
        .collect()
}

fn annotation_info(annotation: &Annotation, env: &TypeEnv<'_>) -> Result<AnnotationInfo, Malformed> {
    let mut elements = Vec::with_capacity(annotation.elements.len());
    for element in &annotation.elements {
        elements.push(ElementValue {
            name: element_name(&element.name),
            value: aux_const(&element.value, env)?,
        });
    }
    Ok(AnnotationInfo {
        type_name: class_target_name(&annotation.ty),
        elements,
    })
}

fn aux_const(value: &ConstValue, env: &TypeEnv<'_>) -> Result<AuxConst, Malformed> {
    let value = match value {
        ConstValue::Bool(v) => AuxConst::Bool(*v),
        ConstValue::Byte(v) => AuxConst::Byte(*v),
        ConstValue::Char(v) => AuxConst::Char(*v),
        ConstValue::Short(v) => AuxConst::Short(*v),
        ConstValue::Int(v) => AuxConst::Int(*v),
        ConstValue::Long(v) => AuxConst::Long(*v),
        ConstValue::Float(v) => AuxConst::float(*v),
        ConstValue::Double(v) => AuxConst::double(*v),
        ConstValue::String(s) => AuxConst::String(s.clone()),
        ConstValue::Class(ty) => AuxConst::Class(env.erase(ty)?.descriptor()),
        ConstValue::Enum { class, name } => AuxConst::Enum {
            class: format!("L{};", class_target_name(class)),
            name: name.clone(),
        },
        ConstValue::Array(items) => AuxConst::Array(
            items
                .iter()
                .map(|item| aux_const(item, env))
                .collect::<Result<_, _>>()?,
        ),
    };
    Ok(value)
}
