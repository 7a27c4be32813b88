mod common;

use common::*;
use tolc_backport::ast::build::*;
use tolc_backport::ast::*;
use tolc_backport::{HelperFamily, PassChain};

fn list_type() -> TypeRef {
    generic_type("List", &["String"])
}

#[test]
fn test_list_of_rewritten_to_helper() {
    init_logger();
    let mut ast = unit(None, &["java.util.List"], |ids| {
        let body = vec![declare(list_type(), "ourList", call_on(ids, "List", "of", strings(&["entry1", "entry2"])))];
        vec![class(ids, vec![], "Test", vec![public_method("someMethod", body)])]
    });

    let report = PassChain::list_of().run_unit(&mut ast).unwrap();
    assert!(report.changed());

    let expected = r#"import java.util.ArrayList;
import java.util.Collections;
import java.util.List;

class Test {
    public void someMethod() {
        List<String> ourList = listOf("entry1", "entry2");
    }

    private static <E> List<E> listOf(E e1, E e2) {
        List<E> list = new ArrayList<E>();
        list.add(e1);
        list.add(e2);
        return Collections.unmodifiableList(list);
    }
}
"#;
    assert_eq!(ast.to_string(), expected);
}

#[test]
fn test_second_run_is_a_no_op() {
    init_logger();
    let mut ast = unit(Some("com.acme"), &["java.util.List"], |ids| {
        let body = vec![
            declare(list_type(), "a", call_on(ids, "List", "of", strings(&["x"]))),
            declare(list_type(), "b", call_on(ids, "List", "of", strings(&["x", "y", "z"]))),
        ];
        vec![class(ids, vec![Modifier::Public], "Test", vec![public_method("run", body)])]
    });

    let chain = PassChain::list_of();
    assert!(chain.run_unit(&mut ast).unwrap().changed());
    let once = ast.to_string();

    let report = chain.run_unit(&mut ast).unwrap();
    assert!(!report.changed());
    assert_eq!(report.total().calls_rewritten, 0);
    assert_eq!(ast.to_string(), once);
    assert_eq!(helper_arities(&ast.type_decls[0], "listOf"), vec![1, 3]);
}

#[test]
fn test_arguments_keep_their_order() {
    init_logger();
    let mut ast = unit(None, &["java.util.List"], |ids| {
        let args = vec![string_lit("x"), int_lit(1), call(ids, None, "next", vec![]), ident("value")];
        let body = vec![expr_stmt(call_on(ids, "List", "of", args))];
        vec![class(ids, vec![], "Test", vec![public_method("run", body)])]
    });

    PassChain::list_of().run_unit(&mut ast).unwrap();

    let ClassMember::Method(ref run) = ast.type_decls[0].members()[0] else {
        panic!("expected method");
    };
    let Stmt::Expression(ref stmt) = run.body.as_ref().unwrap().statements[0] else {
        panic!("expected expression statement");
    };
    assert_eq!(AstPrinter::expr_to_string(&stmt.expr), r#"listOf("x", 1, next(), value)"#);
    assert_eq!(helper_arities(&ast.type_decls[0], "listOf"), vec![4]);
}

#[test]
fn test_one_helper_per_arity() {
    init_logger();
    let mut ast = unit(None, &["java.util.List"], |ids| {
        let body = vec![
            declare(list_type(), "a", call_on(ids, "List", "of", strings(&["1", "2"]))),
            declare(list_type(), "b", call_on(ids, "List", "of", strings(&["3", "4"]))),
            declare(list_type(), "c", call_on(ids, "List", "of", strings(&["5"]))),
            declare(list_type(), "d", call_on(ids, "List", "of", strings(&["6", "7"]))),
        ];
        vec![class(ids, vec![], "Test", vec![public_method("run", body)])]
    });

    let stats = PassChain::list_of().run_unit(&mut ast).unwrap().total();
    assert_eq!(stats.calls_rewritten, 4);
    assert_eq!(stats.helpers_synthesized, 2);
    assert_eq!(helper_arities(&ast.type_decls[0], "listOf"), vec![1, 2]);
}

#[test]
fn test_existing_helper_is_reused() {
    init_logger();
    let mut ast = unit(None, &["java.util.List"], |ids| {
        let existing = HelperFamily::List.synthesize(ids, 2).unwrap();
        let body = vec![declare(list_type(), "a", call_on(ids, "List", "of", strings(&["x", "y"])))];
        vec![class(
            ids,
            vec![],
            "Test",
            vec![public_method("run", body), ClassMember::Method(existing)],
        )]
    });

    let stats = PassChain::list_of().run_unit(&mut ast).unwrap().total();
    assert_eq!(stats.calls_rewritten, 1);
    assert_eq!(stats.helpers_synthesized, 0);
    assert_eq!(stats.helpers_reused, 1);
    assert_eq!(stats.imports_added, 0);
    assert_eq!(helper_arities(&ast.type_decls[0], "listOf"), vec![2]);
    assert_eq!(import_names(&ast), vec!["import java.util.List;"]);
}

#[test]
fn test_non_static_member_with_helper_name_counts_as_present() {
    init_logger();
    let mut ast = unit(None, &["java.util.List"], |ids| {
        let mut instance = HelperFamily::List.synthesize(ids, 1).unwrap();
        instance.modifiers = vec![Modifier::Private];
        let body = vec![declare(list_type(), "a", call_on(ids, "List", "of", strings(&["x"])))];
        vec![class(ids, vec![], "Test", vec![public_method("run", body), ClassMember::Method(instance)])]
    });

    let stats = PassChain::list_of().run_unit(&mut ast).unwrap().total();
    assert_eq!(stats.helpers_synthesized, 0);
    assert_eq!(stats.helpers_reused, 1);
    assert_eq!(helper_arities(&ast.type_decls[0], "listOf"), vec![1]);
}

#[test]
fn test_empty_list_of() {
    init_logger();
    let mut ast = unit(None, &["java.util.List"], |ids| {
        let body = vec![declare(list_type(), "none", call_on(ids, "List", "of", vec![]))];
        vec![class(ids, vec![], "Test", vec![public_method("run", body)])]
    });

    PassChain::list_of().run_unit(&mut ast).unwrap();
    let printed = ast.to_string();
    assert!(printed.contains("List<String> none = listOf();"), "{}", printed);
    assert!(printed.contains("private static <E> List<E> listOf() {"), "{}", printed);
    assert_eq!(helper_arities(&ast.type_decls[0], "listOf"), vec![0]);
}

#[test]
fn test_helper_lands_after_nested_enum() {
    init_logger();
    let mut ast = unit(None, &["java.util.List"], |ids| {
        let body = vec![declare(list_type(), "l", call_on(ids, "List", "of", strings(&["a"])))];
        let nested = enumeration(ids, vec![], "SomeEnum", &["M1", "M2"]);
        vec![class(ids, vec![], "Test", vec![public_method("someMethod", body), ClassMember::TypeDecl(nested)])]
    });

    PassChain::list_of().run_unit(&mut ast).unwrap();

    let expected = r#"import java.util.ArrayList;
import java.util.Collections;
import java.util.List;

class Test {
    public void someMethod() {
        List<String> l = listOf("a");
    }

    enum SomeEnum {
        M1,
        M2
    }

    private static <E> List<E> listOf(E e1) {
        List<E> list = new ArrayList<E>();
        list.add(e1);
        return Collections.unmodifiableList(list);
    }
}
"#;
    assert_eq!(ast.to_string(), expected);
    assert!(helper_arities(member_type(&ast.type_decls[0], "SomeEnum"), "listOf").is_empty());
}

#[test]
fn test_helpers_are_scoped_to_their_host_type() {
    init_logger();
    let mut ast = unit(Some("com.acme"), &["java.util.List"], |ids| {
        let outer_body = vec![declare(list_type(), "a", call_on(ids, "List", "of", strings(&["a"])))];
        let nested_body = vec![declare(list_type(), "b", call_on(ids, "List", "of", strings(&["a", "b"])))];
        let nested = class(ids, vec![Modifier::Static], "Nested", vec![public_method("run", nested_body)]);
        vec![class(
            ids,
            vec![],
            "Outer",
            vec![public_method("run", outer_body), ClassMember::TypeDecl(nested)],
        )]
    });

    let stats = PassChain::list_of().run_unit(&mut ast).unwrap().total();
    assert_eq!(stats.helpers_synthesized, 2);

    let outer = &ast.type_decls[0];
    assert_eq!(helper_arities(outer, "listOf"), vec![1]);
    assert_eq!(helper_arities(member_type(outer, "Nested"), "listOf"), vec![2]);
}

#[test]
fn test_inner_local_and_anonymous_classes_defer_to_outer_type() {
    init_logger();
    let mut ast = unit(None, &["java.util.List"], |ids| {
        let inner_body = vec![declare(list_type(), "a", call_on(ids, "List", "of", strings(&["a"])))];
        let inner = class(ids, vec![], "Inner", vec![public_method("run", inner_body)]);

        let local_body = vec![declare(list_type(), "b", call_on(ids, "List", "of", strings(&["a", "b"])))];
        let local = class(ids, vec![], "Local", vec![public_method("run", local_body)]);

        let anonymous_body = vec![declare(list_type(), "c", call_on(ids, "List", "of", strings(&["a", "b", "c"])))];
        let TypeDecl::Class(anonymous) = class(ids, vec![], "", vec![public_method("run", anonymous_body)]) else {
            unreachable!()
        };
        let runnable = Expr::New(NewExpr {
            target_type: type_ref("Runnable"),
            arguments: vec![],
            anonymous_body: Some(anonymous),
            span: Span::default(),
        });

        let body = vec![Stmt::TypeDecl(local), declare(type_ref("Runnable"), "r", runnable)];
        vec![class(
            ids,
            vec![],
            "Outer",
            vec![ClassMember::TypeDecl(inner), public_method("run", body)],
        )]
    });

    let stats = PassChain::list_of().run_unit(&mut ast).unwrap().total();
    assert_eq!(stats.calls_rewritten, 3);

    let outer = &ast.type_decls[0];
    assert_eq!(helper_arities(outer, "listOf"), vec![1, 2, 3]);
    assert!(helper_arities(member_type(outer, "Inner"), "listOf").is_empty());
}

#[test]
fn test_call_without_host_is_left_alone() {
    init_logger();
    let mut ast = unit(None, &["java.util.List"], |ids| {
        let mut default_method = match public_method("names", vec![]) {
            ClassMember::Method(m) => m,
            _ => unreachable!(),
        };
        default_method.modifiers = vec![Modifier::Default];
        default_method.return_type = Some(list_type());
        default_method.body = Some(block(vec![return_stmt(Some(call_on(ids, "List", "of", strings(&["a"]))))]));
        vec![interface(ids, vec![Modifier::Public], "Named", vec![ClassMember::Method(default_method)])]
    });
    let before = ast.clone();

    let stats = PassChain::list_of().run_unit(&mut ast).unwrap().total();
    assert_eq!(stats.calls_skipped, 1);
    assert_eq!(stats.calls_rewritten, 0);
    assert_eq!(ast, before);
}

#[test]
fn test_unresolved_calls_are_not_rewritten() {
    init_logger();
    // no import of java.util.List, so the receiver cannot be resolved
    let mut ast = unit(None, &[], |ids| {
        let body = vec![declare(list_type(), "a", call_on(ids, "List", "of", strings(&["a"])))];
        vec![class(ids, vec![], "Test", vec![public_method("run", body)])]
    });
    let before = ast.clone();

    let report = PassChain::list_of().run_unit(&mut ast).unwrap();
    assert!(!report.changed());
    assert_eq!(ast, before);
}

#[test]
fn test_helper_spells_out_types_whose_simple_name_is_taken() {
    init_logger();
    let mut ast = unit(None, &["java.awt.List"], |ids| {
        let body = vec![declare(
            generic_type("java.util.List", &["String"]),
            "l",
            call_on(ids, "java.util.List", "of", strings(&["a"])),
        )];
        vec![class(ids, vec![], "Test", vec![public_method("run", body)])]
    });

    let stats = PassChain::list_of().run_unit(&mut ast).unwrap().total();
    assert_eq!(stats.calls_rewritten, 1);
    assert_eq!(stats.imports_added, 2);

    let expected = r#"import java.awt.List;
import java.util.ArrayList;
import java.util.Collections;

class Test {
    public void run() {
        java.util.List<String> l = listOf("a");
    }

    private static <E> java.util.List<E> listOf(E e1) {
        java.util.List<E> list = new ArrayList<E>();
        list.add(e1);
        return Collections.unmodifiableList(list);
    }
}
"#;
    assert_eq!(ast.to_string(), expected);
}
