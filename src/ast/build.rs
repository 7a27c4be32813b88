//! Structured node builders.
//!
//! The synthesizer builds helper methods with these functions instead of text
//! templates; hosts and tests use them to assemble trees. Nodes that carry an
//! identity take the unit's [`IdAllocator`].

use super::*;

pub fn ident(name: impl Into<String>) -> Expr {
    Expr::Identifier(IdentifierExpr { name: name.into(), ty: None, span: Span::default() })
}

/// `a.b.C` as a chain of field accesses rooted at an identifier
pub fn qualified(name: &str) -> Expr {
    let mut segments = name.split('.');
    let mut expr = ident(segments.next().unwrap_or_default());
    for segment in segments {
        expr = field_access(expr, segment);
    }
    expr
}

pub fn field_access(target: Expr, name: impl Into<String>) -> Expr {
    Expr::FieldAccess(FieldAccessExpr {
        target: Box::new(target),
        name: name.into(),
        span: Span::default(),
    })
}

pub fn string_lit(value: impl Into<String>) -> Expr {
    Expr::Literal(LiteralExpr { value: Literal::String(value.into()), span: Span::default() })
}

pub fn int_lit(value: i64) -> Expr {
    Expr::Literal(LiteralExpr { value: Literal::Integer(value), span: Span::default() })
}

pub fn call_node(ids: &mut IdAllocator, target: Option<Expr>, name: impl Into<String>, arguments: Vec<Expr>) -> MethodCallExpr {
    MethodCallExpr {
        id: ids.alloc(),
        target: target.map(Box::new),
        name: name.into(),
        arguments,
        method_type: None,
        span: Span::default(),
    }
}

pub fn call(ids: &mut IdAllocator, target: Option<Expr>, name: impl Into<String>, arguments: Vec<Expr>) -> Expr {
    Expr::MethodCall(call_node(ids, target, name, arguments))
}

pub fn new_object(target_type: TypeRef, arguments: Vec<Expr>) -> Expr {
    Expr::New(NewExpr { target_type, arguments, anonymous_body: None, span: Span::default() })
}

pub fn type_ref(name: impl Into<String>) -> TypeRef {
    TypeRef { name: name.into(), type_args: Vec::new(), array_dims: 0, span: Span::default() }
}

/// `Name<A, B>` where every argument is a plain type name
pub fn generic_type(name: impl Into<String>, args: &[&str]) -> TypeRef {
    TypeRef {
        type_args: args.iter().map(|arg| type_ref(*arg)).collect(),
        ..type_ref(name)
    }
}

pub fn type_param(name: impl Into<String>) -> TypeParam {
    TypeParam { name: name.into(), bounds: Vec::new(), span: Span::default() }
}

pub fn param(type_ref: TypeRef, name: impl Into<String>) -> Parameter {
    Parameter { modifiers: Vec::new(), type_ref, name: name.into(), varargs: false, span: Span::default() }
}

pub fn block(statements: Vec<Stmt>) -> Block {
    Block { statements, span: Span::default() }
}

pub fn expr_stmt(expr: Expr) -> Stmt {
    Stmt::Expression(ExprStmt { expr, span: Span::default() })
}

pub fn local_var(type_ref: TypeRef, name: impl Into<String>, initializer: Option<Expr>) -> Stmt {
    Stmt::Declaration(VarDeclStmt {
        modifiers: Vec::new(),
        type_ref,
        variables: vec![VariableDeclarator { name: name.into(), initializer, span: Span::default() }],
        span: Span::default(),
    })
}

pub fn return_stmt(value: Option<Expr>) -> Stmt {
    Stmt::Return(ReturnStmt { value, span: Span::default() })
}

pub fn method(
    modifiers: Vec<Modifier>,
    return_type: Option<TypeRef>,
    name: impl Into<String>,
    parameters: Vec<Parameter>,
    body: Vec<Stmt>,
) -> MethodDecl {
    MethodDecl {
        modifiers,
        type_params: Vec::new(),
        return_type,
        name: name.into(),
        parameters,
        body: Some(block(body)),
        span: Span::default(),
    }
}

pub fn class(ids: &mut IdAllocator, modifiers: Vec<Modifier>, name: impl Into<String>, body: Vec<ClassMember>) -> TypeDecl {
    TypeDecl::Class(ClassDecl {
        id: ids.alloc(),
        modifiers,
        name: name.into(),
        type_params: Vec::new(),
        extends: None,
        implements: Vec::new(),
        body,
        span: Span::default(),
    })
}

pub fn interface(ids: &mut IdAllocator, modifiers: Vec<Modifier>, name: impl Into<String>, body: Vec<ClassMember>) -> TypeDecl {
    TypeDecl::Interface(InterfaceDecl {
        id: ids.alloc(),
        modifiers,
        name: name.into(),
        type_params: Vec::new(),
        extends: Vec::new(),
        body,
        span: Span::default(),
    })
}

pub fn enumeration(ids: &mut IdAllocator, modifiers: Vec<Modifier>, name: impl Into<String>, constants: &[&str]) -> TypeDecl {
    TypeDecl::Enum(EnumDecl {
        id: ids.alloc(),
        modifiers,
        name: name.into(),
        implements: Vec::new(),
        constants: constants
            .iter()
            .map(|c| EnumConstant { name: c.to_string(), arguments: Vec::new(), span: Span::default() })
            .collect(),
        body: Vec::new(),
        span: Span::default(),
    })
}
