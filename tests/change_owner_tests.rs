mod common;

use common::*;
use std::collections::HashMap;
use tolc_backport::ast::build::*;
use tolc_backport::ast::*;
use tolc_backport::backport::{ChangeMethodOwner, ExecutionContext, Pass, SimplifyQualifiedOwner};
use tolc_backport::{Config, Error, PassChain};

const TARGET: &str = "com.breskeby.rewrite.List";

fn config() -> Config {
    Config::new("java.util.List", "of", TARGET).unwrap()
}

fn single_method_unit(imports: &[&str], declared: TypeRef, receiver: &str) -> Ast {
    unit(None, imports, |ids| {
        let body = vec![declare(declared, "ourList", call_on(ids, receiver, "of", strings(&["entry1"])))];
        vec![class(ids, vec![], "Test", vec![public_method("someMethod", body)])]
    })
}

#[test]
fn test_origin_import_kept_while_origin_type_is_used() {
    init_logger();
    let mut ast = single_method_unit(&["java.util.List"], generic_type("List", &["String"]), "List");

    let report = PassChain::change_method_owner(&config()).unwrap().run_unit(&mut ast).unwrap();
    assert_eq!(report.passes.len(), 2);
    assert_eq!(report.stats_for("change-method-owner").map(|s| s.calls_rewritten), Some(1));
    assert_eq!(report.stats_for("simplify-qualified-owner").map(|s| s.references_simplified), Some(0));

    let expected = r#"import java.util.List;

class Test {
    public void someMethod() {
        List<String> ourList = com.breskeby.rewrite.List.of("entry1");
    }
}
"#;
    assert_eq!(ast.to_string(), expected);
}

#[test]
fn test_unused_origin_import_replaced_by_target_import() {
    init_logger();
    let mut ast = single_method_unit(
        &["java.util.Collection", "java.util.List"],
        generic_type("Collection", &["String"]),
        "List",
    );

    let stats = PassChain::change_method_owner(&config()).unwrap().run_unit(&mut ast).unwrap().total();
    assert_eq!(stats.calls_rewritten, 1);
    assert_eq!(stats.imports_removed, 1);
    assert_eq!(stats.references_simplified, 1);
    assert_eq!(stats.imports_added, 1);

    let expected = r#"import com.breskeby.rewrite.List;
import java.util.Collection;

class Test {
    public void someMethod() {
        Collection<String> ourList = List.of("entry1");
    }
}
"#;
    assert_eq!(ast.to_string(), expected);
}

#[test]
fn test_origin_import_kept_while_a_type_bound_uses_it() {
    init_logger();
    let mut ast = unit(None, &["java.util.Collection", "java.util.List"], |ids| {
        let body = vec![declare(
            generic_type("Collection", &["String"]),
            "ourList",
            call_on(ids, "List", "of", strings(&["entry1"])),
        )];
        let TypeDecl::Class(mut test) = class(ids, vec![], "Test", vec![public_method("someMethod", body)]) else {
            unreachable!()
        };
        test.type_params = vec![TypeParam { bounds: vec![generic_type("List", &["String"])], ..type_param("T") }];
        vec![TypeDecl::Class(test)]
    });

    let stats = PassChain::change_method_owner(&config()).unwrap().run_unit(&mut ast).unwrap().total();
    assert_eq!(stats.calls_rewritten, 1);
    assert_eq!(stats.imports_removed, 0);
    assert_eq!(stats.references_simplified, 0);

    let expected = r#"import java.util.Collection;
import java.util.List;

class Test<T extends List<String>> {
    public void someMethod() {
        Collection<String> ourList = com.breskeby.rewrite.List.of("entry1");
    }
}
"#;
    assert_eq!(ast.to_string(), expected);
}

#[test]
fn test_second_owner_change_run_is_a_no_op() {
    init_logger();
    let chain = PassChain::change_method_owner(&config()).unwrap();
    let mut units = vec![
        single_method_unit(&["java.util.Collection", "java.util.List"], generic_type("Collection", &["String"]), "List"),
        single_method_unit(&["java.util.List"], generic_type("List", &["String"]), "List"),
    ];

    for ast in &mut units {
        assert!(chain.run_unit(ast).unwrap().changed());
        let once = ast.clone();

        let report = chain.run_unit(ast).unwrap();
        assert!(!report.changed());
        assert_eq!(report.total().calls_rewritten, 0);
        assert_eq!(*ast, once);
    }
}

#[test]
fn test_qualified_calls_not_rewritten_by_the_chain_are_kept() {
    init_logger();
    let mut ast = unit(None, &["java.util.Collection", "java.util.List"], |ids| {
        let body = vec![
            declare(generic_type("Collection", &["String"]), "a", call_on(ids, "List", "of", strings(&["a"]))),
            declare(generic_type("Collection", &["String"]), "b", call_on(ids, TARGET, "of", strings(&["b"]))),
        ];
        vec![class(ids, vec![], "Test", vec![public_method("someMethod", body)])]
    });

    let stats = PassChain::change_method_owner(&config()).unwrap().run_unit(&mut ast).unwrap().total();
    assert_eq!(stats.calls_rewritten, 1);
    assert_eq!(stats.references_simplified, 1);

    let expected = r#"import com.breskeby.rewrite.List;
import java.util.Collection;

class Test {
    public void someMethod() {
        Collection<String> a = List.of("a");
        Collection<String> b = com.breskeby.rewrite.List.of("b");
    }
}
"#;
    assert_eq!(ast.to_string(), expected);
}

#[test]
fn test_untouched_unit_is_unchanged() {
    init_logger();
    let mut ast = single_method_unit(&["java.util.Collection"], generic_type("Collection", &["String"]), TARGET);
    let before = ast.clone();

    let report = PassChain::change_method_owner(&config()).unwrap().run_unit(&mut ast).unwrap();
    assert!(!report.changed());
    assert_eq!(ast, before);
}

#[test]
fn test_simple_name_collision_keeps_qualified_receiver() {
    init_logger();
    let mut ast = single_method_unit(
        &["java.awt.List", "java.util.Collection"],
        generic_type("Collection", &["String"]),
        "java.util.List",
    );

    let stats = PassChain::change_method_owner(&config()).unwrap().run_unit(&mut ast).unwrap().total();
    assert_eq!(stats.calls_rewritten, 1);
    assert_eq!(stats.references_simplified, 0);
    assert_eq!(stats.imports_added, 0);

    let printed = ast.to_string();
    assert!(printed.contains(r#"ourList = com.breskeby.rewrite.List.of("entry1");"#), "{}", printed);
    assert_eq!(import_names(&ast), vec!["import java.awt.List;", "import java.util.Collection;"]);
}

#[test]
fn test_declared_type_with_target_simple_name_blocks_simplification() {
    init_logger();
    let mut ast = unit(None, &["java.util.Collection"], |ids| {
        let body = vec![declare(
            generic_type("Collection", &["String"]),
            "ourList",
            call_on(ids, "java.util.List", "of", strings(&["entry1"])),
        )];
        let own_list = class(ids, vec![Modifier::Static], "List", vec![]);
        vec![class(
            ids,
            vec![],
            "Test",
            vec![public_method("someMethod", body), ClassMember::TypeDecl(own_list)],
        )]
    });

    let stats = PassChain::change_method_owner(&config()).unwrap().run_unit(&mut ast).unwrap().total();
    assert_eq!(stats.calls_rewritten, 1);
    assert_eq!(stats.references_simplified, 0);
    assert!(ast.to_string().contains("com.breskeby.rewrite.List.of(\"entry1\")"));
}

#[test]
fn test_wildcard_origin_import_keeps_qualified_receiver() {
    init_logger();
    let mut ast = single_method_unit(&["java.util.*"], generic_type("Collection", &["String"]), "List");

    let stats = PassChain::change_method_owner(&config()).unwrap().run_unit(&mut ast).unwrap().total();
    assert_eq!(stats.calls_rewritten, 1);
    assert_eq!(stats.imports_removed, 0);
    assert_eq!(stats.references_simplified, 0);
    assert_eq!(import_names(&ast), vec!["import java.util.*;"]);
}

#[test]
fn test_simplifier_only_reads_recorded_calls() {
    init_logger();
    let config = config();
    let mut ast = single_method_unit(&["java.util.Collection"], generic_type("Collection", &["String"]), TARGET);

    // nothing recorded: nothing simplified
    let stats = SimplifyQualifiedOwner::new(&config)
        .process(&mut ast, &mut ExecutionContext::new())
        .unwrap();
    assert!(!stats.changed());

    // recording the call by hand makes it eligible
    let ClassMember::Method(ref m) = ast.type_decls[0].members()[0] else {
        panic!("expected method");
    };
    let Stmt::Declaration(ref decl) = m.body.as_ref().unwrap().statements[0] else {
        panic!("expected declaration");
    };
    let Some(Expr::MethodCall(ref call)) = decl.variables[0].initializer else {
        panic!("expected call");
    };
    let mut ctx = ExecutionContext::new();
    ctx.put_message_in_set(&config.change_key(), call.id);

    let stats = SimplifyQualifiedOwner::new(&config).process(&mut ast, &mut ctx).unwrap();
    assert_eq!(stats.references_simplified, 1);
    assert!(ast.to_string().contains("Collection<String> ourList = List.of(\"entry1\");"));
}

#[test]
fn test_owner_pass_records_under_change_key() {
    init_logger();
    let config = config();
    let pass = ChangeMethodOwner::new(&config).unwrap();
    assert_eq!(pass.change_key(), "Method change to com.breskeby.rewrite.List");

    let mut ast = single_method_unit(&["java.util.List"], generic_type("List", &["String"]), "List");
    let mut ctx = ExecutionContext::new();
    pass.process(&mut ast, &mut ctx).unwrap();
    assert_eq!(ctx.message_set(pass.change_key()).len(), 1);
}

#[test]
fn test_chain_from_environment_lookup() {
    init_logger();
    let vars: HashMap<&str, &str> = [
        ("BACKPORT_ORIGIN", "java.util.List"),
        ("BACKPORT_METHOD", "of"),
        ("BACKPORT_TARGET", TARGET),
    ]
    .into_iter()
    .collect();
    let config = Config::from_lookup(|name| vars.get(name).map(|v| v.to_string())).unwrap();
    let chain = PassChain::change_method_owner(&config).unwrap();
    assert_eq!(chain.pass_names(), vec!["change-method-owner", "simplify-qualified-owner"]);

    let err = Config::from_lookup(|name| (name != "BACKPORT_TARGET").then(|| "java.util.List".to_string()))
        .unwrap_err();
    assert_eq!(err, Error::config_error("missing BACKPORT_TARGET"));
}

#[test]
fn test_run_units_processes_each_unit_independently() {
    init_logger();
    let mut units = vec![
        single_method_unit(&["java.util.Collection", "java.util.List"], generic_type("Collection", &["String"]), "List"),
        single_method_unit(&["java.util.Collection"], generic_type("Collection", &["String"]), TARGET),
    ];
    let untouched = units[1].clone();

    let results = PassChain::change_method_owner(&config()).unwrap().run_units(&mut units);
    assert_eq!(results.len(), 2);
    assert!(results[0].as_ref().unwrap().changed());
    assert!(!results[1].as_ref().unwrap().changed());
    assert!(units[0].to_string().contains("import com.breskeby.rewrite.List;"));
    assert_eq!(units[1], untouched);
}
