use std::fs;
use std::path::Path;

use compgraph::analysis::findings::OrphanReason;
use compgraph::config::CoreConfig;
use compgraph::file_id;
use compgraph::framework::Framework;

fn write(dir: &Path, rel: &str, contents: &str) {
    let full = dir.join(rel);
    if let Some(parent) = full.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(full, contents).unwrap();
}

/// S1 — Orphan + unused prop.
#[test]
fn orphan_and_unused_prop() {
    let tmp = tempfile::tempdir().unwrap();
    write(
        tmp.path(),
        "App.jsx",
        "import Button from './Button'; export default function App(){ return <Button label=\"Go\"/>; }",
    );
    write(
        tmp.path(),
        "Button.jsx",
        "export default function Button({label, size, onClick}){ return <button>{label}</button>; }",
    );
    write(tmp.path(), "Orphan.jsx", "export default function Orphan(){ return <div/>; }");

    let config = CoreConfig::new(tmp.path(), Framework::React);
    let result = compgraph::analyze(config).unwrap();

    assert_eq!(result.graph.edge_count(), 1);

    let orphan_names: Vec<&str> = result
        .findings
        .orphan_components
        .iter()
        .map(|o| o.name.as_str())
        .collect();
    assert!(orphan_names.contains(&"Orphan"));
    assert!(orphan_names.contains(&"App"));

    let orphan = result
        .findings
        .orphan_components
        .iter()
        .find(|o| o.name == "Orphan")
        .unwrap();
    assert_eq!(orphan.reason, OrphanReason::Isolated);

    let app = result.findings.orphan_components.iter().find(|o| o.name == "App").unwrap();
    assert_eq!(app.reason, OrphanReason::EntryPoint);

    let button_unused = result
        .findings
        .unused_props
        .iter()
        .find(|u| u.name == "Button")
        .expect("Button should have unused props");
    assert_eq!(button_unused.unused, vec!["onClick".to_string(), "size".to_string()]);
}

/// S2 — 3-file cycle, normalized to start at the lexicographically smallest file.
#[test]
fn circular_dependency_of_three() {
    let tmp = tempfile::tempdir().unwrap();
    write(tmp.path(), "A.jsx", "import B from './B'; export default function A(){ return <B/>; }");
    write(tmp.path(), "B.jsx", "import C from './C'; export default function B(){ return <C/>; }");
    write(tmp.path(), "C.jsx", "import A from './A'; export default function C(){ return <A/>; }");

    let config = CoreConfig::new(tmp.path(), Framework::React);
    let result = compgraph::analyze(config).unwrap();

    assert_eq!(result.findings.circular_dependencies.len(), 1);
    let cycle = &result.findings.circular_dependencies[0];
    assert_eq!(cycle.files.len(), 4, "cycle must be closed by repeating its start");
    assert_eq!(cycle.files.first(), cycle.files.last());

    let a_path = file_id::canonicalize(&tmp.path().join("A.jsx"));
    assert_eq!(cycle.files[0], a_path, "rotation must start at the lexicographically smallest FileId");
}

/// S3 — rest-spread disables unused-prop reporting.
#[test]
fn rest_spread_disables_unused_props() {
    let tmp = tempfile::tempdir().unwrap();
    write(
        tmp.path(),
        "Card.jsx",
        "export default function Card({title, ...rest}){ return <div {...rest}>{title}</div>; }",
    );

    let config = CoreConfig::new(tmp.path(), Framework::React);
    let result = compgraph::analyze(config).unwrap();

    assert!(result.findings.unused_props.iter().all(|u| u.name != "Card"));

    let node = result
        .graph
        .node(&file_id::canonicalize(&tmp.path().join("Card.jsx")))
        .unwrap();
    assert!(node.uses_rest_spread);
}

/// S4 — Vue SFC edge between script-level imports and template custom elements.
#[test]
fn vue_sfc_edge() {
    let tmp = tempfile::tempdir().unwrap();
    write(
        tmp.path(),
        "App.vue",
        "<template><Child/></template><script>import Child from './Child.vue'; export default {};</script>",
    );
    write(tmp.path(), "Child.vue", "<template><div/></template><script>export default {};</script>");

    let config = CoreConfig::new(tmp.path(), Framework::Vue);
    let result = compgraph::analyze(config).unwrap();

    assert_eq!(result.graph.edge_count(), 1);

    let app_id = file_id::canonicalize(&tmp.path().join("App.vue"));
    let child_id = file_id::canonicalize(&tmp.path().join("Child.vue"));
    let app = result.graph.node(&app_id).unwrap();
    assert!(app.out_edges.contains_key(&child_id));

    let orphans: Vec<&str> = result
        .findings
        .orphan_components
        .iter()
        .map(|o| o.name.as_str())
        .collect();
    assert_eq!(orphans, vec!["App"]);
}

/// S5 — tsconfig path-alias resolution.
#[test]
fn tsconfig_alias_resolution() {
    let tmp = tempfile::tempdir().unwrap();
    write(
        tmp.path(),
        "tsconfig.json",
        r#"{"compilerOptions": {"baseUrl": ".", "paths": {"@/*": ["src/*"]}}}"#,
    );
    write(tmp.path(), "src/a.ts", "import B from '@/b'; export default 1;");
    write(tmp.path(), "src/b.ts", "export default 1;");

    let config = CoreConfig::new(tmp.path(), Framework::React);
    let result = compgraph::analyze(config).unwrap();

    let a_id = file_id::canonicalize(&tmp.path().join("src/a.ts"));
    let b_id = file_id::canonicalize(&tmp.path().join("src/b.ts"));
    assert!(result.graph.node(&a_id).is_some());
    assert!(result.graph.node(&b_id).is_some());
    assert!(result.graph.node(&a_id).unwrap().out_edges.contains_key(&b_id));
}

/// S6 — static import and require() of the same target collapse into one edge.
#[test]
fn deduplicated_edge_on_multiple_imports() {
    let tmp = tempfile::tempdir().unwrap();
    write(
        tmp.path(),
        "a.jsx",
        "import X from './x'; const X2 = require('./x'); export default function A(){ return <X/>; }",
    );
    write(tmp.path(), "x.jsx", "export default function X(){ return <div/>; }");

    let config = CoreConfig::new(tmp.path(), Framework::React);
    let result = compgraph::analyze(config).unwrap();

    assert_eq!(result.graph.edge_count(), 1);

    let a_id = file_id::canonicalize(&tmp.path().join("a.jsx"));
    let x_id = file_id::canonicalize(&tmp.path().join("x.jsx"));
    let edge = &result.graph.node(&a_id).unwrap().out_edges[&x_id];
    assert!(edge.specifiers.len() >= 2, "both the static import and the require() record must survive merging");
}

/// Empty project boundary: no nodes, no edges, no findings, no error.
#[test]
fn empty_project_yields_empty_result() {
    let tmp = tempfile::tempdir().unwrap();
    let config = CoreConfig::new(tmp.path(), Framework::React);
    let result = compgraph::analyze(config).unwrap();

    assert_eq!(result.graph.node_count(), 0);
    assert_eq!(result.graph.edge_count(), 0);
    assert!(result.findings.orphan_components.is_empty());
    assert!(result.findings.circular_dependencies.is_empty());
}
