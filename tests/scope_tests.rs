// Scope construction and resolution through the full parser

use minifront::analyze;
use minifront::semantic::{ScopeKind, SymbolKind};

#[test]
fn test_distinct_names_visible_in_nested_scopes() {
    let source = r#"
        int a = 1;
        int b = 2;
        while (a < b) {
            int c = a;
            if (c > 0) {
                c = b;
            }
        }
    "#;

    let analysis = analyze(source).expect("Parsing failed");
    assert!(analysis.is_clean(), "Unexpected errors: {:?}", analysis.errors);

    let scopes = &analysis.scopes;
    let root = scopes.root();
    assert!(scopes.contains_local(root, "a"));
    assert!(scopes.contains_local(root, "b"));

    let while_scope = scopes.children(root)[0];
    let if_scope = scopes.children(while_scope)[0];
    assert!(scopes.contains_local(while_scope, "c"));
    assert!(!scopes.contains_local(while_scope, "a"));
    for name in ["a", "b", "c"] {
        assert!(scopes.lookup(if_scope, name).is_some(), "'{name}' not visible");
    }
    assert!(scopes.lookup(root, "c").is_none());
}

#[test]
fn test_shadowing_leaves_outer_binding_intact() {
    let source = r#"
        int x = 1;
        while (x < 2) {
            String x = "inner";
        }
        x = 3;
    "#;

    let analysis = analyze(source).expect("Parsing failed");
    assert!(analysis.is_clean(), "Unexpected errors: {:?}", analysis.errors);

    let scopes = &analysis.scopes;
    let root = scopes.root();
    let inner = scopes.children(root)[0];

    assert_eq!(scopes.lookup(root, "x").unwrap().declared_type, "int");
    assert_eq!(scopes.lookup(inner, "x").unwrap().declared_type, "String");

    let visible: Vec<_> = scopes
        .visible_symbols(inner)
        .into_iter()
        .filter(|s| s.name == "x")
        .collect();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].declared_type, "String");
}

#[test]
fn test_inner_declaration_not_visible_after_exit() {
    let analysis = analyze("while (1 < 2) { int t = 0; } t = 1;").expect("Parsing failed");

    assert_eq!(analysis.errors.len(), 1);
    assert!(analysis.errors[0].to_string().contains("'t' is not declared"));
}

#[test]
fn test_scopes_balanced_after_parse() {
    let source = r#"
        class Shape {
            int sides;
            Shape(int n) { sides = n; }
            int count() {
                for (int i = 0; i < sides; i++) {
                    if (i == 0) { continue; } else { break; }
                }
                return sides;
            }
        }
        { int loose = 1; { int deeper = loose; } }
        while (1 < 2) { { } }
    "#;

    let analysis = analyze(source).expect("Parsing failed");

    assert!(analysis.is_clean(), "Unexpected errors: {:?}", analysis.errors);
    assert_eq!(analysis.current_scope, analysis.scopes.root());
}

#[test]
fn test_unclosed_bare_block_leaves_scope_open() {
    let analysis = analyze("{ int a = 1;").expect("Parsing failed");

    assert_ne!(analysis.current_scope, analysis.scopes.root());
    assert_eq!(analysis.scopes.depth(analysis.current_scope), 1);
}

#[test]
fn test_scope_kinds_and_symbol_kinds() {
    let source = r#"
        class Box {
            int width;
            int area(int height) {
                return width * height;
            }
        }
    "#;

    let analysis = analyze(source).expect("Parsing failed");
    let scopes = &analysis.scopes;
    let root = scopes.root();

    assert_eq!(scopes.lookup(root, "Box").unwrap().kind, SymbolKind::Class);

    let class_scope = scopes.children(root)[0];
    assert_eq!(scopes.kind(class_scope), ScopeKind::Class);
    assert_eq!(
        scopes.lookup(class_scope, "width").unwrap().kind,
        SymbolKind::Variable
    );
    let area = scopes.lookup(class_scope, "area").unwrap();
    assert_eq!(area.kind, SymbolKind::Method);
    assert_eq!(area.declared_type, "int");

    let method_scope = scopes.children(class_scope)[0];
    assert_eq!(scopes.kind(method_scope), ScopeKind::Method);
    assert_eq!(
        scopes.lookup(method_scope, "height").unwrap().kind,
        SymbolKind::Parameter
    );

    let order = scopes.walk();
    assert_eq!(order, vec![root, class_scope, method_scope]);
}

#[test]
fn test_for_loop_variable_scoped_to_loop() {
    let source = r#"
        for (int i = 0; i < 3; i++) { }
        for (int i = 0; i < 3; i++) { }
        i = 0;
    "#;

    let analysis = analyze(source).expect("Parsing failed");

    // No redeclaration for the second loop; only the use after both loops fails
    assert_eq!(analysis.errors.len(), 1);
    assert!(analysis.errors[0].to_string().contains("'i' is not declared"));
}
