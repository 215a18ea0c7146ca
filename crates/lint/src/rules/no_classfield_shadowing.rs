//! Disallows class fields that shadow reactive properties.
//!
//! A reactive element declares its reactive properties through a static
//! `properties` map (field form or getter form). Declaring the same name
//! again as an instance field makes the field initializer shadow the
//! framework-generated accessor, silently breaking reactivity. Findings
//! are anchored at the metadata key, not at the field.

use std::collections::HashSet;

use swc_common::Span;
use swc_ecma_ast::{
    Class, ClassMember, Expr, Function, MethodKind, ObjectLit, Prop, PropName, PropOrSpread, Stmt,
};

use crate::context::RuleContext;
use crate::diagnostic::Severity;
use crate::rule::{Message, Rule, RuleMeta, Target};

static META: RuleMeta = RuleMeta {
    name: "no-classfield-shadowing",
    description: "Disallows class fields that shadow reactive properties",
    default_severity: Severity::Error,
    help: "Remove the class field and let the reactive property manage the value.",
    messages: &[Message {
        id: "shadowed-by-classfield",
        template: "class field \"{prop}\" shadows the reactive property declared in the static properties map",
    }],
};

const TARGETS: &[Target] = &[Target::Class];

pub struct NoClassfieldShadowing;

impl Rule for NoClassfieldShadowing {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn targets(&self) -> &'static [Target] {
        TARGETS
    }

    fn check_class(&self, class: &Class, ctx: &mut RuleContext) {
        let settings = ctx.settings().clone();
        if !extends_base(class, &settings.base_class) {
            return;
        }

        let fields = instance_field_names(class);
        if fields.is_empty() {
            return;
        }

        let mut reported: HashSet<String> = HashSet::new();
        for entry in property_entries(class, &settings.properties_member) {
            if fields.contains(&entry.name) && reported.insert(entry.name.clone()) {
                ctx.report(
                    &META,
                    "shadowed-by-classfield",
                    entry.span,
                    &[("prop", &entry.name)],
                );
            }
        }
    }
}

/// One key of the property-metadata object literal
struct PropertyEntry {
    name: String,
    span: Span,
}

/// Walk the superclass expression, peeling one mixin call per step until
/// the base identifier is reached or the chain is exhausted.
///
/// `extends LitElement`, `extends A(LitElement)` and `extends
/// A(B(C(LitElement)))` all match; the mixin callee itself is not
/// inspected.
fn extends_base(class: &Class, base: &str) -> bool {
    let Some(super_class) = class.super_class.as_deref() else {
        return false;
    };

    let mut expr = super_class;
    loop {
        match expr {
            Expr::Ident(ident) => return ident.sym == *base,
            Expr::Paren(paren) => expr = &paren.expr,
            Expr::Call(call) => match call.args.first() {
                Some(arg) if arg.spread.is_none() => expr = &arg.expr,
                _ => return false,
            },
            _ => return false,
        }
    }
}

/// Names declared as non-static instance fields, decorated or not.
///
/// `declare` and `abstract` members are type-only and never produce a
/// runtime field, so they are excluded. Private names cannot collide
/// with metadata keys.
fn instance_field_names(class: &Class) -> HashSet<String> {
    let mut names = HashSet::new();
    for member in &class.body {
        if let ClassMember::ClassProp(prop) = member {
            if prop.is_static || prop.declare || prop.is_abstract {
                continue;
            }
            if let Some((name, _)) = key_name(&prop.key) {
                names.insert(name);
            }
        }
    }
    names
}

/// Metadata keys in declaration order, collected from every static
/// `properties` field initialized with an object literal and every
/// static `properties` getter returning one.
fn property_entries(class: &Class, member_name: &str) -> Vec<PropertyEntry> {
    let mut entries = Vec::new();
    for member in &class.body {
        match member {
            ClassMember::ClassProp(prop) if prop.is_static => {
                if !key_matches(&prop.key, member_name) {
                    continue;
                }
                if let Some(Expr::Object(object)) = prop.value.as_deref() {
                    collect_object_keys(object, &mut entries);
                }
            }
            ClassMember::Method(method)
                if method.is_static && method.kind == MethodKind::Getter =>
            {
                if !key_matches(&method.key, member_name) {
                    continue;
                }
                if let Some(object) = returned_object(&method.function) {
                    collect_object_keys(object, &mut entries);
                }
            }
            _ => {}
        }
    }
    entries
}

/// Object literal returned by the first top-level `return` with an
/// argument, if any
fn returned_object(function: &Function) -> Option<&ObjectLit> {
    let body = function.body.as_ref()?;
    let arg = body.stmts.iter().find_map(|stmt| match stmt {
        Stmt::Return(ret) => ret.arg.as_deref(),
        _ => None,
    })?;
    match arg {
        Expr::Object(object) => Some(object),
        _ => None,
    }
}

/// Top-level keys of the metadata object. Spreads and computed or
/// numeric keys are skipped.
fn collect_object_keys(object: &ObjectLit, entries: &mut Vec<PropertyEntry>) {
    for prop in &object.props {
        let PropOrSpread::Prop(prop) = prop else {
            continue;
        };
        let key = match prop.as_ref() {
            Prop::Shorthand(ident) => Some((ident.sym.to_string(), ident.span)),
            Prop::KeyValue(kv) => key_name(&kv.key),
            Prop::Getter(getter) => key_name(&getter.key),
            Prop::Setter(setter) => key_name(&setter.key),
            Prop::Method(method) => key_name(&method.key),
            Prop::Assign(_) => None,
        };
        if let Some((name, span)) = key {
            entries.push(PropertyEntry { name, span });
        }
    }
}

fn key_matches(key: &PropName, name: &str) -> bool {
    key_name(key).is_some_and(|(key_name, _)| key_name == name)
}

fn key_name(key: &PropName) -> Option<(String, Span)> {
    match key {
        PropName::Ident(ident) => Some((ident.sym.to_string(), ident.span)),
        PropName::Str(s) => Some((s.value.to_string_lossy().into_owned(), s.span)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use crate::diagnostic::Finding;
    use crate::linter::Linter;
    use crate::settings::Settings;

    fn lint(source: &str) -> Vec<Finding> {
        lint_with(Settings::default(), source)
    }

    fn lint_with(settings: Settings, source: &str) -> Vec<Finding> {
        let linter = Linter::new(settings);
        linter.lint_source("element.ts", source).unwrap()
    }

    fn assert_shadowed(finding: &Finding, prop: &str, line: usize, column: usize) {
        assert_eq!(finding.rule, "no-classfield-shadowing");
        assert_eq!(finding.message_id, "shadowed-by-classfield");
        assert_eq!(finding.data.get("prop").map(String::as_str), Some(prop));
        assert_eq!((finding.line, finding.column), (line, column));
    }

    #[test]
    fn metadata_without_fields_is_clean() {
        let source = "class MyElement extends LitElement {\n  static properties = {\n    foo: { type: String }\n  }\n}\n";
        assert!(lint(source).is_empty());
    }

    #[test]
    fn non_static_properties_member_is_ignored() {
        let source = "class MyElement extends LitElement {\n  foo;\n  properties = {\n    foo: { type: String }\n  }\n}\n";
        assert!(lint(source).is_empty());
    }

    #[test]
    fn declare_field_does_not_count() {
        let source = "class Foo extends LitElement {\n  declare foo: string;\n\n  static properties = {foo: {type: String}};\n}\n";
        assert!(lint(source).is_empty());
    }

    #[test]
    fn abstract_field_does_not_count() {
        let source = "abstract class Foo extends LitElement {\n  abstract foo: string;\n\n  static properties = {foo: {}};\n}\n";
        assert!(lint(source).is_empty());
    }

    #[test]
    fn field_without_metadata_is_clean() {
        let source = "class MyElement extends LitElement {\n  foo;\n}\n";
        assert!(lint(source).is_empty());
    }

    #[test]
    fn disjoint_names_are_clean() {
        let source = "class MyElement extends LitElement {\n  bar;\n  static properties = {foo: {}}\n}\n";
        assert!(lint(source).is_empty());
    }

    #[test]
    fn class_not_extending_base_is_ignored() {
        let source = "class MyElement extends HTMLElement {\n  foo;\n  static properties = {foo: {}}\n}\n";
        assert!(lint(source).is_empty());
    }

    #[test]
    fn class_without_superclass_is_ignored() {
        let source = "class MyElement {\n  foo;\n  static properties = {foo: {}}\n}\n";
        assert!(lint(source).is_empty());
    }

    #[test]
    fn mixin_chain_not_ending_in_base_is_ignored() {
        let source = "class MyElement extends A(B(HTMLElement)) {\n  foo;\n  static properties = {foo: {}}\n}\n";
        assert!(lint(source).is_empty());
    }

    #[test]
    fn mixin_call_without_arguments_is_ignored() {
        let source = "class MyElement extends A() {\n  foo;\n  static properties = {foo: {}}\n}\n";
        assert!(lint(source).is_empty());
    }

    #[test]
    fn static_field_does_not_count() {
        let source = "class MyElement extends LitElement {\n  static foo = 1;\n  static properties = {foo: {}}\n}\n";
        assert!(lint(source).is_empty());
    }

    #[test]
    fn private_field_does_not_count() {
        let source = "class MyElement extends LitElement {\n  #foo = 1;\n  static properties = {foo: {}}\n}\n";
        assert!(lint(source).is_empty());
    }

    #[test]
    fn method_does_not_count_as_field() {
        let source = "class MyElement extends LitElement {\n  foo() {}\n  static properties = {foo: {}}\n}\n";
        assert!(lint(source).is_empty());
    }

    #[test]
    fn metadata_value_that_is_not_an_object_is_skipped() {
        let source = "class MyElement extends LitElement {\n  foo;\n  static properties = makeProps();\n}\n";
        assert!(lint(source).is_empty());
    }

    #[test]
    fn getter_without_return_is_skipped() {
        let source = "class MyElement extends LitElement {\n  foo;\n  static get properties() {}\n}\n";
        assert!(lint(source).is_empty());
    }

    #[test]
    fn getter_returning_non_object_is_skipped() {
        let source = "class MyElement extends LitElement {\n  foo;\n  static get properties() { return makeProps(); }\n}\n";
        assert!(lint(source).is_empty());
    }

    #[test]
    fn computed_metadata_key_is_skipped() {
        let source = "class MyElement extends LitElement {\n  foo;\n  static properties = { [name]: {} };\n}\n";
        assert!(lint(source).is_empty());
    }

    #[test]
    fn field_before_metadata_reports_at_key() {
        let source = "class MyElement extends LitElement {\n  foo;\n  static properties = {foo: {}}\n}\n";
        let findings = lint(source);
        assert_eq!(findings.len(), 1);
        assert_shadowed(&findings[0], "foo", 3, 24);
        assert_eq!(findings[0].underline, 3);
        assert!(findings[0].message.contains("\"foo\" shadows"));
    }

    #[test]
    fn field_after_metadata_reports_at_key() {
        let source = "class MyElement extends LitElement {\n  static properties = {foo: {}}\n  foo;\n}\n";
        let findings = lint(source);
        assert_eq!(findings.len(), 1);
        assert_shadowed(&findings[0], "foo", 2, 24);
    }

    #[test]
    fn getter_form_reports_at_returned_key() {
        let source = "class MyElement extends LitElement {\n  foo;\n  static get properties() { return { foo: {}}};\n}\n";
        let findings = lint(source);
        assert_eq!(findings.len(), 1);
        assert_shadowed(&findings[0], "foo", 3, 38);
    }

    #[test]
    fn getter_form_is_order_independent() {
        let source = "class MyElement extends LitElement {\n  static get properties() { return { foo: {}}};\n  foo;\n}\n";
        let findings = lint(source);
        assert_eq!(findings.len(), 1);
        assert_shadowed(&findings[0], "foo", 2, 38);
    }

    #[test]
    fn single_mixin_wrapper_is_in_scope() {
        let source = "class Foo extends A(LitElement) {\n  foo;\n  static properties = { foo: {} };\n}\n";
        let findings = lint(source);
        assert_eq!(findings.len(), 1);
        assert_shadowed(&findings[0], "foo", 3, 25);
    }

    #[test]
    fn nested_mixin_wrappers_are_in_scope() {
        let source = "class Foo extends A(B(LitElement)) {\n  foo;\n  static properties = { foo: {} };\n}\n";
        let findings = lint(source);
        assert_eq!(findings.len(), 1);
        assert_shadowed(&findings[0], "foo", 3, 25);
    }

    #[test]
    fn triply_nested_mixin_wrappers_are_in_scope() {
        let source = "class Foo extends A(B(C(LitElement))) {\n  foo;\n  static properties = { foo: {} };\n}\n";
        let findings = lint(source);
        assert_eq!(findings.len(), 1);
        assert_shadowed(&findings[0], "foo", 3, 25);
    }

    #[test]
    fn member_expression_mixin_callee_is_in_scope() {
        let source = "class Foo extends mixins.A(LitElement) {\n  foo;\n  static properties = { foo: {} };\n}\n";
        let findings = lint(source);
        assert_eq!(findings.len(), 1);
        assert_shadowed(&findings[0], "foo", 3, 25);
    }

    #[test]
    fn decorated_field_still_reports() {
        let source = "class Foo extends LitElement {\n  @property({ type: String })\n  foo = 'test';\n\n  static properties = { foo: {} };\n}\n";
        let findings = lint(source);
        assert_eq!(findings.len(), 1);
        assert_shadowed(&findings[0], "foo", 5, 25);
    }

    #[test]
    fn findings_follow_metadata_key_order() {
        let source = "class Foo extends LitElement {\n  bar;\n  foo;\n  static properties = { foo: {}, bar: {} };\n}\n";
        let findings = lint(source);
        assert_eq!(findings.len(), 2);
        assert_shadowed(&findings[0], "foo", 4, 25);
        assert_shadowed(&findings[1], "bar", 4, 34);
    }

    #[test]
    fn duplicate_metadata_key_reports_once() {
        let source = "class Foo extends LitElement {\n  foo;\n  static properties = { foo: {}, foo: {} };\n}\n";
        let findings = lint(source);
        assert_eq!(findings.len(), 1);
        assert_shadowed(&findings[0], "foo", 3, 25);
    }

    #[test]
    fn both_forms_report_each_name_once() {
        let source = "class Foo extends LitElement {\n  foo;\n  static properties = { foo: {} };\n  static get properties() { return { foo: {}}};\n}\n";
        let findings = lint(source);
        assert_eq!(findings.len(), 1);
        assert_shadowed(&findings[0], "foo", 3, 25);
    }

    #[test]
    fn string_metadata_key_matches_field() {
        let source = "class Foo extends LitElement {\n  foo;\n  static properties = { \"foo\": {} };\n}\n";
        let findings = lint(source);
        assert_eq!(findings.len(), 1);
        assert_shadowed(&findings[0], "foo", 3, 25);
        assert_eq!(findings[0].underline, 5);
    }

    #[test]
    fn string_field_key_matches_metadata() {
        let source = "class Foo extends LitElement {\n  \"foo\" = 1;\n  static properties = { foo: {} };\n}\n";
        let findings = lint(source);
        assert_eq!(findings.len(), 1);
        assert_shadowed(&findings[0], "foo", 3, 25);
    }

    #[test]
    fn shorthand_metadata_key_matches_field() {
        let source = "class Foo extends LitElement {\n  foo;\n  static properties = { foo };\n}\n";
        let findings = lint(source);
        assert_eq!(findings.len(), 1);
        assert_shadowed(&findings[0], "foo", 3, 25);
    }

    #[test]
    fn spread_in_metadata_is_skipped_but_keys_after_it_match() {
        let source = "class Foo extends LitElement {\n  foo;\n  static properties = { ...base, foo: {} };\n}\n";
        let findings = lint(source);
        assert_eq!(findings.len(), 1);
        assert_shadowed(&findings[0], "foo", 3, 34);
    }

    #[test]
    fn field_without_initializer_still_counts() {
        let source = "class Foo extends LitElement {\n  foo: string;\n  static properties = { foo: {} };\n}\n";
        let findings = lint(source);
        assert_eq!(findings.len(), 1);
        assert_shadowed(&findings[0], "foo", 3, 25);
    }

    #[test]
    fn custom_base_class_setting_is_honored() {
        let settings = Settings {
            base_class: "FASTElement".to_string(),
            ..Settings::default()
        };
        let source = "class Foo extends FASTElement {\n  foo;\n  static properties = { foo: {} };\n}\n";
        let findings = lint_with(settings.clone(), source);
        assert_eq!(findings.len(), 1);

        let source = "class Foo extends LitElement {\n  foo;\n  static properties = { foo: {} };\n}\n";
        assert!(lint_with(settings, source).is_empty());
    }

    #[test]
    fn custom_properties_member_setting_is_honored() {
        let settings = Settings {
            properties_member: "props".to_string(),
            ..Settings::default()
        };
        let source = "class Foo extends LitElement {\n  foo;\n  static props = { foo: {} };\n}\n";
        let findings = lint_with(settings.clone(), source);
        assert_eq!(findings.len(), 1);
        assert_shadowed(&findings[0], "foo", 3, 20);

        let source = "class Foo extends LitElement {\n  foo;\n  static properties = { foo: {} };\n}\n";
        assert!(lint_with(settings, source).is_empty());
    }
}
