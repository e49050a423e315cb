use std::collections::{BTreeMap, BTreeSet};
use std::sync::OnceLock;

use tree_sitter::{Language, Node, Query, QueryCursor, StreamingIterator, Tree};

use crate::analyzer::facts::{ComponentUsage, Export, ExportKind, ImportEdge, ImportKind};
use crate::file_id::FileId;
use crate::scanner::FileScanner;

/// Accumulates the pieces of [`crate::analyzer::facts::FileFacts`] that the
/// JS/TS/JSX procedure produces. Vue's script-block analysis reuses this
/// directly; the Vue dispatcher only adds template-derived usages on top.
#[derive(Debug, Default)]
pub struct JsExtraction {
    pub is_component: bool,
    pub exports: Vec<Export>,
    pub imports: BTreeMap<FileId, ImportEdge>,
    pub props_declared: BTreeSet<String>,
    pub props_used: BTreeSet<String>,
    pub uses_rest_spread: bool,
    pub component_usages: BTreeMap<FileId, ComponentUsage>,
    pub cyclomatic_complexity: u32,
    /// Local name (imported/default/namespace binding) -> resolved target. Used
    /// internally to match JSX tags to their import, and exposed so the Vue
    /// dispatcher can match template custom elements the same way.
    pub local_imports: BTreeMap<String, FileId>,
}

fn node_text<'a>(node: Node<'a>, source: &'a [u8]) -> &'a str {
    node.utf8_text(source).unwrap_or("")
}

fn starts_uppercase(name: &str) -> bool {
    name.chars().next().is_some_and(|c| c.is_ascii_uppercase())
}

const IMPORT_QUERY_SRC: &str = r#"
    (import_statement
      source: (string (string_fragment) @module_path)) @import
"#;

const EXPORT_QUERY_SRC: &str = r#"
    (export_statement) @export_stmt
"#;

static IMPORT_QUERY: OnceLock<Query> = OnceLock::new();
static EXPORT_QUERY: OnceLock<Query> = OnceLock::new();

fn import_query(language: &Language) -> &'static Query {
    IMPORT_QUERY.get_or_init(|| Query::new(language, IMPORT_QUERY_SRC).expect("invalid import query"))
}

fn export_query(language: &Language) -> &'static Query {
    EXPORT_QUERY.get_or_init(|| Query::new(language, EXPORT_QUERY_SRC).expect("invalid export query"))
}

/// Run the JS/TS/JSX extraction procedure over an already-parsed tree.
///
/// One pass collects imports, exports, and resolves targets; a second pass
/// (over the same tree) walks declarations to recognize components, extract
/// props, track JSX usage sites, and compute cyclomatic complexity. Two
/// passes rather than one are needed only because a JSX usage site can
/// precede the import statement that names it in source order — import
/// resolution must finish first.
pub fn extract(
    tree: &Tree,
    source: &str,
    language: &Language,
    file_id: &FileId,
    scanner: &FileScanner,
) -> JsExtraction {
    let bytes = source.as_bytes();
    let root = tree.root_node();
    let mut out = JsExtraction::default();

    extract_imports(root, bytes, language, file_id, scanner, &mut out);
    extract_exports(root, bytes, language, file_id, scanner, &mut out);
    walk_declarations(root, bytes, &mut out);

    out
}

// ---------------------------------------------------------------------------
// Imports
// ---------------------------------------------------------------------------

fn extract_imports(
    root: Node,
    source: &[u8],
    language: &Language,
    file_id: &FileId,
    scanner: &FileScanner,
    out: &mut JsExtraction,
) {
    let query = import_query(language);
    let mut cursor = QueryCursor::new();
    let mut matches = cursor.matches(query, root, source);
    while let Some(m) = matches.next() {
        let mut import_node = None;
        let mut module_path = None;
        for cap in m.captures {
            let name = &query.capture_names()[cap.index as usize];
            match *name {
                "import" => import_node = Some(cap.node),
                "module_path" => module_path = Some(node_text(cap.node, source).to_string()),
                _ => {}
            }
        }
        let (Some(import_node), Some(module_path)) = (import_node, module_path) else {
            continue;
        };
        register_import(import_node, source, &module_path, file_id, scanner, out);
    }

    // require('x') calls and import('x') dynamic calls are both call_expression
    // nodes; a single recursive scan distinguishes them by the callee.
    scan_calls(root, source, file_id, scanner, out);
}

fn register_import(
    import_node: Node,
    source: &[u8],
    module_path: &str,
    file_id: &FileId,
    scanner: &FileScanner,
    out: &mut JsExtraction,
) {
    let Some(target) = scanner.resolve_import(module_path, file_id) else {
        return;
    };

    let mut kinds = Vec::new();
    let mut cursor = import_node.walk();
    for child in import_node.children(&mut cursor) {
        if child.kind() == "import_clause" {
            collect_import_clause(child, source, &target, &mut kinds, out);
        }
    }
    if kinds.is_empty() {
        // `import './side-effect'` — no bindings, but still a real edge.
        kinds.push(ImportKind::BareReexport);
    }

    let entry = out.imports.entry(target).or_insert_with(|| ImportEdge {
        source_specifier: module_path.to_string(),
        kinds: Vec::new(),
    });
    entry.kinds.extend(kinds);
}

fn collect_import_clause(
    clause: Node,
    source: &[u8],
    target: &FileId,
    kinds: &mut Vec<ImportKind>,
    out: &mut JsExtraction,
) {
    let mut cursor = clause.walk();
    for child in clause.children(&mut cursor) {
        match child.kind() {
            "identifier" => {
                // Bare default-import identifier directly under the clause.
                let local = node_text(child, source).to_string();
                out.local_imports.insert(local.clone(), target.clone());
                kinds.push(ImportKind::DefaultSpec(local));
            }
            "namespace_import" => {
                if let Some(id) = child.child(2) {
                    let local = node_text(id, source).to_string();
                    out.local_imports.insert(local.clone(), target.clone());
                    kinds.push(ImportKind::NamespaceSpec(local));
                }
            }
            "named_imports" => {
                let mut inner = child.walk();
                for spec in child.children(&mut inner) {
                    if spec.kind() != "import_specifier" {
                        continue;
                    }
                    let mut name_node = None;
                    let mut alias_node = None;
                    let mut spec_cursor = spec.walk();
                    for part in spec.children(&mut spec_cursor) {
                        if part.kind() == "identifier" {
                            if name_node.is_none() {
                                name_node = Some(part);
                            } else {
                                alias_node = Some(part);
                            }
                        }
                    }
                    if let Some(imported) = name_node {
                        let imported_name = node_text(imported, source).to_string();
                        let local_name = alias_node
                            .map(|a| node_text(a, source).to_string())
                            .unwrap_or_else(|| imported_name.clone());
                        out.local_imports.insert(local_name.clone(), target.clone());
                        kinds.push(ImportKind::NamedSpec {
                            imported: imported_name,
                            local: local_name,
                        });
                    }
                }
            }
            _ => {}
        }
    }
}

fn scan_calls(
    node: Node,
    source: &[u8],
    file_id: &FileId,
    scanner: &FileScanner,
    out: &mut JsExtraction,
) {
    if node.kind() == "call_expression" {
        if let Some(func) = node.child_by_field_name("function") {
            let is_require = func.kind() == "identifier" && node_text(func, source) == "require";
            let is_dynamic_import = func.kind() == "import";
            if is_require || is_dynamic_import {
                if let Some(args) = node.child_by_field_name("arguments") {
                    if let Some(spec) = first_string_arg(args, source) {
                        if let Some(target) = scanner.resolve_import(&spec, file_id) {
                            let kind = if is_require {
                                ImportKind::CjsRequire
                            } else {
                                ImportKind::DynamicImport
                            };
                            let entry = out.imports.entry(target).or_insert_with(|| ImportEdge {
                                source_specifier: spec.clone(),
                                kinds: Vec::new(),
                            });
                            entry.kinds.push(kind);
                        }
                    }
                }
            }
        }
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        scan_calls(child, source, file_id, scanner, out);
    }
}

fn first_string_arg(args: Node, source: &[u8]) -> Option<String> {
    let mut cursor = args.walk();
    for child in args.children(&mut cursor) {
        if child.kind() == "string" {
            let mut inner = child.walk();
            for frag in child.children(&mut inner) {
                if frag.kind() == "string_fragment" {
                    return Some(node_text(frag, source).to_string());
                }
            }
        }
    }
    None
}

// ---------------------------------------------------------------------------
// Exports
// ---------------------------------------------------------------------------

fn extract_exports(
    root: Node,
    source: &[u8],
    language: &Language,
    file_id: &FileId,
    scanner: &FileScanner,
    out: &mut JsExtraction,
) {
    let query = export_query(language);
    let mut cursor = QueryCursor::new();
    let mut matches = cursor.matches(query, root, source);
    while let Some(m) = matches.next() {
        for cap in m.captures {
            if query.capture_names()[cap.index as usize] != "export_stmt" {
                continue;
            }
            handle_export_statement(cap.node, source, file_id, scanner, out);
        }
    }
}

fn handle_export_statement(
    stmt: Node,
    source: &[u8],
    file_id: &FileId,
    scanner: &FileScanner,
    out: &mut JsExtraction,
) {
    let text = node_text(stmt, source);
    let is_wildcard = stmt
        .child(1)
        .map(|c| c.kind() == "*")
        .unwrap_or(false);
    let is_default = text.trim_start().starts_with("export default");

    let reexport_source = export_source_specifier(stmt, source);

    if is_wildcard {
        // `export * from './X'` — only contributes when the target resolves;
        // the spec's chosen policy is "drop when unresolved, edge when resolved".
        if let Some(spec) = &reexport_source {
            if let Some(target) = scanner.resolve_import(spec, file_id) {
                let entry = out.imports.entry(target).or_insert_with(|| ImportEdge {
                    source_specifier: spec.clone(),
                    kinds: Vec::new(),
                });
                entry.kinds.push(ImportKind::BareReexport);
                out.exports.push(Export {
                    kind: ExportKind::ReexportWildcard,
                    name: None,
                    reexport_source: Some(spec.clone()),
                });
            }
        }
        return;
    }

    if is_default {
        let name = default_export_name(stmt, source);
        out.exports.push(Export {
            kind: ExportKind::Default,
            name,
            reexport_source: None,
        });
        return;
    }

    // `export { A, B }` or `export { A } from './X'` or `export const Name = ...`
    if let Some(spec) = &reexport_source {
        if let Some(target) = scanner.resolve_import(spec, file_id) {
            let entry = out.imports.entry(target).or_insert_with(|| ImportEdge {
                source_specifier: spec.clone(),
                kinds: Vec::new(),
            });
            entry.kinds.push(ImportKind::BareReexport);
        } else {
            return;
        }
    }

    for name in named_export_names(stmt, source) {
        out.exports.push(Export {
            kind: ExportKind::Named,
            name: Some(name),
            reexport_source: reexport_source.clone(),
        });
    }
}

fn export_source_specifier(stmt: Node, source: &[u8]) -> Option<String> {
    let mut cursor = stmt.walk();
    for child in stmt.children(&mut cursor) {
        if child.kind() == "string" {
            let mut inner = child.walk();
            for frag in child.children(&mut inner) {
                if frag.kind() == "string_fragment" {
                    return Some(node_text(frag, source).to_string());
                }
            }
        }
    }
    None
}

fn default_export_name(stmt: Node, source: &[u8]) -> Option<String> {
    let mut cursor = stmt.walk();
    for child in stmt.children(&mut cursor) {
        match child.kind() {
            "identifier" => return Some(node_text(child, source).to_string()),
            "function_declaration" | "class_declaration" | "generator_function_declaration" => {
                if let Some(name_node) = child.child_by_field_name("name") {
                    return Some(node_text(name_node, source).to_string());
                }
                return None;
            }
            _ => {}
        }
    }
    None
}

fn named_export_names(stmt: Node, source: &[u8]) -> Vec<String> {
    let mut names = Vec::new();
    let mut cursor = stmt.walk();
    for child in stmt.children(&mut cursor) {
        match child.kind() {
            "export_clause" => {
                let mut inner = child.walk();
                for spec in child.children(&mut inner) {
                    if spec.kind() == "export_specifier" {
                        if let Some(name_node) = spec.child(0) {
                            names.push(node_text(name_node, source).to_string());
                        }
                    }
                }
            }
            "lexical_declaration" | "variable_declaration" => {
                let mut inner = child.walk();
                for decl in child.children(&mut inner) {
                    if decl.kind() == "variable_declarator" {
                        if let Some(name_node) = decl.child_by_field_name("name") {
                            names.push(node_text(name_node, source).to_string());
                        }
                    }
                }
            }
            "function_declaration" | "class_declaration" => {
                if let Some(name_node) = child.child_by_field_name("name") {
                    names.push(node_text(name_node, source).to_string());
                }
            }
            _ => {}
        }
    }
    names
}

// ---------------------------------------------------------------------------
// Component recognition, props, JSX usage, complexity
// ---------------------------------------------------------------------------

fn walk_declarations(node: Node, source: &[u8], out: &mut JsExtraction) {
    match node.kind() {
        "function_declaration" => {
            if let Some(name_node) = node.child_by_field_name("name") {
                let name = node_text(name_node, source);
                if let Some(body) = node.child_by_field_name("body") {
                    consider_component(name, node, body, source, out);
                }
            }
        }
        "variable_declarator" => {
            if let Some(name_node) = node.child_by_field_name("name")
                && name_node.kind() == "identifier"
                && let Some(value) = node.child_by_field_name("value")
                && matches!(value.kind(), "arrow_function" | "function_expression")
                && let Some(body) = value.child_by_field_name("body")
            {
                let name = node_text(name_node, source);
                consider_component(name, value, body, source, out);
            }
        }
        "class_declaration" => {
            handle_class_declaration(node, source, out);
        }
        "jsx_opening_element" | "jsx_self_closing_element" => {
            handle_jsx_element(node, source, out);
        }
        _ => {}
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        walk_declarations(child, source, out);
    }
}

fn consider_component(name: &str, func_node: Node, body: Node, source: &[u8], out: &mut JsExtraction) {
    if !starts_uppercase(name) || !body_returns_jsx(body) {
        return;
    }
    out.is_component = true;

    if let Some(params) = func_node.child_by_field_name("parameters") {
        extract_props_from_params(params, body, source, out);
    } else if let Some(param) = func_node.child_by_field_name("parameter") {
        // Arrow function with a single unparenthesized parameter: `props => ...`
        extract_props_from_single_param(param, body, source, out);
    }

    let complexity = compute_complexity(body, source);
    out.cyclomatic_complexity = out.cyclomatic_complexity.max(complexity);
}

fn handle_class_declaration(class_node: Node, source: &[u8], out: &mut JsExtraction) {
    let Some(heritage) = find_child_kind(class_node, "class_heritage") else {
        return;
    };
    let heritage_text = node_text(heritage, source);
    if !(heritage_text.contains("Component")) {
        return;
    }
    out.is_component = true;

    let Some(body) = class_node.child_by_field_name("body") else {
        return;
    };

    let mut cursor = body.walk();
    for member in body.children(&mut cursor) {
        if member.kind() == "public_field_definition" {
            if let Some(prop_name) = member.child_by_field_name("property") {
                if node_text(prop_name, source) == "propTypes" {
                    if let Some(value) = member.child_by_field_name("value") {
                        collect_object_keys(value, source, &mut out.props_declared);
                    }
                }
            }
        }
        if member.kind() == "method_definition" {
            if let Some(name_node) = member.child_by_field_name("name")
                && node_text(name_node, source) == "render"
                && let Some(render_body) = member.child_by_field_name("body")
            {
                let complexity = compute_complexity(render_body, source);
                out.cyclomatic_complexity = out.cyclomatic_complexity.max(complexity);
            }
        }
    }
}

fn find_child_kind<'a>(node: Node<'a>, kind: &str) -> Option<Node<'a>> {
    let mut cursor = node.walk();
    node.children(&mut cursor).find(|c| c.kind() == kind)
}

fn collect_object_keys(value: Node, source: &[u8], into: &mut BTreeSet<String>) {
    if value.kind() != "object" {
        return;
    }
    let mut cursor = value.walk();
    for prop in value.children(&mut cursor) {
        if prop.kind() == "pair" {
            if let Some(key) = prop.child_by_field_name("key") {
                into.insert(node_text(key, source).trim_matches(['"', '\'']).to_string());
            }
        }
    }
}

/// Object-destructured first parameter: `{ label, size, ...rest }`.
fn extract_props_from_params(params: Node, body: Node, source: &[u8], out: &mut JsExtraction) {
    let Some(first) = params.named_child(0) else {
        return;
    };
    if first.kind() == "object_pattern" {
        collect_object_pattern(first, source, out);
    } else if first.kind() == "identifier" {
        extract_props_from_single_param(first, body, source, out);
    }
    mark_used_identifiers(body, source, out);
}

fn extract_props_from_single_param(param: Node, body: Node, source: &[u8], out: &mut JsExtraction) {
    if param.kind() != "identifier" {
        return;
    }
    let props_name = node_text(param, source).to_string();
    scan_props_member_access(body, source, &props_name, out);
}

fn collect_object_pattern(pattern: Node, source: &[u8], out: &mut JsExtraction) {
    let mut cursor = pattern.walk();
    for child in pattern.children(&mut cursor) {
        match child.kind() {
            "shorthand_property_identifier_pattern" => {
                out.props_declared.insert(node_text(child, source).to_string());
            }
            "pair_pattern" => {
                if let Some(key) = child.child_by_field_name("key") {
                    out.props_declared.insert(node_text(key, source).to_string());
                }
            }
            "rest_pattern" => {
                out.uses_rest_spread = true;
            }
            _ => {}
        }
    }
}

/// `props.X` member access and `const {X, Y} = props;` destructuring — both
/// contribute to declared AND used, per the spec's resolved open question.
fn scan_props_member_access(node: Node, source: &[u8], props_name: &str, out: &mut JsExtraction) {
    if node.kind() == "member_expression" {
        if let Some(object) = node.child_by_field_name("object")
            && object.kind() == "identifier"
            && node_text(object, source) == props_name
            && let Some(property) = node.child_by_field_name("property")
        {
            let name = node_text(property, source).to_string();
            out.props_declared.insert(name.clone());
            out.props_used.insert(name);
        }
    }
    if node.kind() == "variable_declarator" {
        if let Some(value) = node.child_by_field_name("value")
            && value.kind() == "identifier"
            && node_text(value, source) == props_name
            && let Some(name_node) = node.child_by_field_name("name")
            && name_node.kind() == "object_pattern"
        {
            let mut cursor = name_node.walk();
            for child in name_node.children(&mut cursor) {
                let key = match child.kind() {
                    "shorthand_property_identifier_pattern" => Some(node_text(child, source).to_string()),
                    "pair_pattern" => child
                        .child_by_field_name("key")
                        .map(|k| node_text(k, source).to_string()),
                    _ => None,
                };
                if let Some(key) = key {
                    out.props_declared.insert(key.clone());
                    out.props_used.insert(key);
                }
            }
        }
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        scan_props_member_access(child, source, props_name, out);
    }
}

fn mark_used_identifiers(node: Node, source: &[u8], out: &mut JsExtraction) {
    if node.kind() == "identifier" || node.kind() == "shorthand_property_identifier" {
        let name = node_text(node, source);
        if out.props_declared.contains(name) {
            out.props_used.insert(name.to_string());
        }
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        mark_used_identifiers(child, source, out);
    }
}

fn body_returns_jsx(node: Node) -> bool {
    if node.kind() == "return_statement" {
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            if contains_jsx(child) {
                return true;
            }
        }
    }
    // An arrow function with an implicit JSX expression body: `() => <div/>`
    if matches!(
        node.kind(),
        "jsx_element" | "jsx_fragment" | "jsx_self_closing_element"
    ) {
        return true;
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        // Don't descend into nested function bodies looking for an outer return.
        if matches!(
            child.kind(),
            "function_declaration" | "function_expression" | "arrow_function" | "class_declaration"
        ) {
            continue;
        }
        if body_returns_jsx(child) {
            return true;
        }
    }
    false
}

fn contains_jsx(node: Node) -> bool {
    if matches!(
        node.kind(),
        "jsx_element" | "jsx_fragment" | "jsx_self_closing_element"
    ) {
        return true;
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if contains_jsx(child) {
            return true;
        }
    }
    false
}

fn handle_jsx_element(el: Node, source: &[u8], out: &mut JsExtraction) {
    let Some(name_node) = el.child_by_field_name("name") else {
        return;
    };
    let name = node_text(name_node, source);
    if !starts_uppercase(name) {
        return;
    }
    let Some(target) = out.local_imports.get(name).cloned() else {
        return;
    };

    let mut attrs = BTreeSet::new();
    let mut cursor = el.walk();
    for child in el.children(&mut cursor) {
        if child.kind() == "jsx_attribute" {
            if let Some(attr_name) = child.child(0) {
                attrs.insert(node_text(attr_name, source).to_string());
            }
        }
    }

    let usage = out.component_usages.entry(target).or_default();
    usage.usage_count += 1;
    usage.passed_props.extend(attrs);
}

/// Cyclomatic complexity: start at 1, add 1 per branch point. Nested function
/// literals are included in the enclosing body's count — a single consistent
/// policy, as the spec permits either as long as it isn't mixed.
fn compute_complexity(node: Node, source: &[u8]) -> u32 {
    let mut count = 1;
    add_branch_points(node, source, &mut count);
    count
}

fn add_branch_points(node: Node, source: &[u8], count: &mut u32) {
    match node.kind() {
        "if_statement" => *count += 1,
        "for_statement" | "for_in_statement" => *count += 1,
        "while_statement" | "do_statement" => *count += 1,
        "ternary_expression" => *count += 1,
        "catch_clause" => *count += 1,
        "switch_case" => {
            // `case x:` has a test; `default:` does not.
            if node.child_by_field_name("value").is_some() {
                *count += 1;
            }
        }
        "binary_expression" => {
            if let Some(op) = node.child(1) {
                let op_text = node_text(op, source);
                if op_text == "&&" || op_text == "||" {
                    *count += 1;
                }
            }
        }
        _ => {}
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        add_branch_points(child, source, count);
    }
}
