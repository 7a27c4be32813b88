use super::*;

/// Where a type declaration appears; decides which declarations may host static members.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeSite {
    /// Directly in the compilation unit
    TopLevel,
    /// Member of another type
    Member,
    /// Declared inside a block
    Local,
}

/// Read-only AST visitor.
///
/// Every hook defaults to the matching `walk_*` function, so an implementation
/// only overrides the node kinds it cares about and calls `walk_*` to keep
/// descending.
pub trait AstVisitor {
    fn visit_ast(&mut self, ast: &Ast) {
        walk_ast(self, ast)
    }

    fn visit_type_decl(&mut self, decl: &TypeDecl, _site: TypeSite) {
        walk_type_decl(self, decl)
    }

    fn visit_anonymous_class(&mut self, class: &ClassDecl) {
        walk_members(self, &class.body)
    }

    fn visit_member(&mut self, member: &ClassMember) {
        walk_member(self, member)
    }

    fn visit_block(&mut self, block: &Block) {
        walk_block(self, block)
    }

    fn visit_stmt(&mut self, stmt: &Stmt) {
        walk_stmt(self, stmt)
    }

    fn visit_expr(&mut self, expr: &Expr) {
        walk_expr(self, expr)
    }

    fn visit_method_call(&mut self, call: &MethodCallExpr) {
        walk_method_call(self, call)
    }

    fn visit_identifier(&mut self, _ident: &IdentifierExpr) {}

    fn visit_type_ref(&mut self, _type_ref: &TypeRef) {}
}

pub fn walk_ast<V: AstVisitor + ?Sized>(v: &mut V, ast: &Ast) {
    for decl in &ast.type_decls {
        v.visit_type_decl(decl, TypeSite::TopLevel);
    }
}

pub fn walk_type_decl<V: AstVisitor + ?Sized>(v: &mut V, decl: &TypeDecl) {
    match decl {
        TypeDecl::Class(class) => {
            walk_type_params(v, &class.type_params);
            if let Some(ref extends) = class.extends {
                v.visit_type_ref(extends);
            }
            for implements in &class.implements {
                v.visit_type_ref(implements);
            }
        }
        TypeDecl::Interface(interface) => {
            walk_type_params(v, &interface.type_params);
            for extends in &interface.extends {
                v.visit_type_ref(extends);
            }
        }
        TypeDecl::Enum(enum_decl) => {
            for implements in &enum_decl.implements {
                v.visit_type_ref(implements);
            }
            for constant in &enum_decl.constants {
                for arg in &constant.arguments {
                    v.visit_expr(arg);
                }
            }
        }
    }
    walk_members(v, decl.members());
}

pub fn walk_type_params<V: AstVisitor + ?Sized>(v: &mut V, params: &[TypeParam]) {
    for bound in params.iter().flat_map(|param| &param.bounds) {
        v.visit_type_ref(bound);
    }
}

pub fn walk_members<V: AstVisitor + ?Sized>(v: &mut V, members: &[ClassMember]) {
    for member in members {
        v.visit_member(member);
    }
}

pub fn walk_member<V: AstVisitor + ?Sized>(v: &mut V, member: &ClassMember) {
    match member {
        ClassMember::Field(field) => {
            v.visit_type_ref(&field.type_ref);
            if let Some(ref init) = field.initializer {
                v.visit_expr(init);
            }
        }
        ClassMember::Method(method) => {
            walk_type_params(v, &method.type_params);
            if let Some(ref return_type) = method.return_type {
                v.visit_type_ref(return_type);
            }
            for param in &method.parameters {
                v.visit_type_ref(&param.type_ref);
            }
            if let Some(ref body) = method.body {
                v.visit_block(body);
            }
        }
        ClassMember::Constructor(ctor) => {
            for param in &ctor.parameters {
                v.visit_type_ref(&param.type_ref);
            }
            v.visit_block(&ctor.body);
        }
        ClassMember::Initializer(init) => v.visit_block(&init.body),
        ClassMember::TypeDecl(nested) => v.visit_type_decl(nested, TypeSite::Member),
    }
}

pub fn walk_block<V: AstVisitor + ?Sized>(v: &mut V, block: &Block) {
    for stmt in &block.statements {
        v.visit_stmt(stmt);
    }
}

pub fn walk_stmt<V: AstVisitor + ?Sized>(v: &mut V, stmt: &Stmt) {
    match stmt {
        Stmt::Expression(expr_stmt) => v.visit_expr(&expr_stmt.expr),
        Stmt::Declaration(decl) => {
            v.visit_type_ref(&decl.type_ref);
            for var in &decl.variables {
                if let Some(ref init) = var.initializer {
                    v.visit_expr(init);
                }
            }
        }
        Stmt::TypeDecl(decl) => v.visit_type_decl(decl, TypeSite::Local),
        Stmt::If(if_stmt) => {
            v.visit_expr(&if_stmt.condition);
            v.visit_stmt(&if_stmt.then_branch);
            if let Some(ref else_branch) = if_stmt.else_branch {
                v.visit_stmt(else_branch);
            }
        }
        Stmt::While(while_stmt) => {
            v.visit_expr(&while_stmt.condition);
            v.visit_stmt(&while_stmt.body);
        }
        Stmt::ForEach(for_each) => {
            v.visit_type_ref(&for_each.var_type);
            v.visit_expr(&for_each.iterable);
            v.visit_stmt(&for_each.body);
        }
        Stmt::Return(ret) => {
            if let Some(ref value) = ret.value {
                v.visit_expr(value);
            }
        }
        Stmt::Throw(throw) => v.visit_expr(&throw.expr),
        Stmt::Block(block) => v.visit_block(block),
        Stmt::Empty => {}
    }
}

pub fn walk_expr<V: AstVisitor + ?Sized>(v: &mut V, expr: &Expr) {
    match expr {
        Expr::Literal(_) => {}
        Expr::Identifier(ident) => v.visit_identifier(ident),
        Expr::Binary(binary) => {
            v.visit_expr(&binary.left);
            v.visit_expr(&binary.right);
        }
        Expr::Assignment(assign) => {
            v.visit_expr(&assign.target);
            v.visit_expr(&assign.value);
        }
        Expr::MethodCall(call) => v.visit_method_call(call),
        Expr::FieldAccess(access) => v.visit_expr(&access.target),
        Expr::Cast(cast) => {
            v.visit_type_ref(&cast.target_type);
            v.visit_expr(&cast.expr);
        }
        Expr::Conditional(cond) => {
            v.visit_expr(&cond.condition);
            v.visit_expr(&cond.then_expr);
            v.visit_expr(&cond.else_expr);
        }
        Expr::New(new) => {
            v.visit_type_ref(&new.target_type);
            for arg in &new.arguments {
                v.visit_expr(arg);
            }
            if let Some(ref body) = new.anonymous_body {
                v.visit_anonymous_class(body);
            }
        }
        Expr::Parenthesized(inner) => v.visit_expr(inner),
    }
}

pub fn walk_method_call<V: AstVisitor + ?Sized>(v: &mut V, call: &MethodCallExpr) {
    if let Some(ref target) = call.target {
        v.visit_expr(target);
    }
    for arg in &call.arguments {
        v.visit_expr(arg);
    }
}

/// Mutating AST visitor used by the rewrite passes.
///
/// Same shape as [`AstVisitor`]. Calls are reached through
/// `visit_method_call` after `visit_expr`; a pass that needs post-order
/// semantics calls `walk_method_call_mut` before inspecting the call.
pub trait AstVisitorMut {
    fn visit_ast(&mut self, ast: &mut Ast) {
        walk_ast_mut(self, ast)
    }

    fn visit_type_decl(&mut self, decl: &mut TypeDecl, _site: TypeSite) {
        walk_type_decl_mut(self, decl)
    }

    fn visit_anonymous_class(&mut self, class: &mut ClassDecl) {
        walk_members_mut(self, &mut class.body)
    }

    fn visit_member(&mut self, member: &mut ClassMember) {
        walk_member_mut(self, member)
    }

    fn visit_block(&mut self, block: &mut Block) {
        walk_block_mut(self, block)
    }

    fn visit_stmt(&mut self, stmt: &mut Stmt) {
        walk_stmt_mut(self, stmt)
    }

    fn visit_expr(&mut self, expr: &mut Expr) {
        walk_expr_mut(self, expr)
    }

    fn visit_method_call(&mut self, call: &mut MethodCallExpr) {
        walk_method_call_mut(self, call)
    }
}

pub fn walk_ast_mut<V: AstVisitorMut + ?Sized>(v: &mut V, ast: &mut Ast) {
    for decl in &mut ast.type_decls {
        v.visit_type_decl(decl, TypeSite::TopLevel);
    }
}

pub fn walk_type_decl_mut<V: AstVisitorMut + ?Sized>(v: &mut V, decl: &mut TypeDecl) {
    if let TypeDecl::Enum(enum_decl) = decl {
        for constant in &mut enum_decl.constants {
            for arg in &mut constant.arguments {
                v.visit_expr(arg);
            }
        }
    }
    walk_members_mut(v, decl.members_mut());
}

pub fn walk_members_mut<V: AstVisitorMut + ?Sized>(v: &mut V, members: &mut [ClassMember]) {
    for member in members {
        v.visit_member(member);
    }
}

pub fn walk_member_mut<V: AstVisitorMut + ?Sized>(v: &mut V, member: &mut ClassMember) {
    match member {
        ClassMember::Field(field) => {
            if let Some(ref mut init) = field.initializer {
                v.visit_expr(init);
            }
        }
        ClassMember::Method(method) => {
            if let Some(ref mut body) = method.body {
                v.visit_block(body);
            }
        }
        ClassMember::Constructor(ctor) => v.visit_block(&mut ctor.body),
        ClassMember::Initializer(init) => v.visit_block(&mut init.body),
        ClassMember::TypeDecl(nested) => v.visit_type_decl(nested, TypeSite::Member),
    }
}

pub fn walk_block_mut<V: AstVisitorMut + ?Sized>(v: &mut V, block: &mut Block) {
    for stmt in &mut block.statements {
        v.visit_stmt(stmt);
    }
}

pub fn walk_stmt_mut<V: AstVisitorMut + ?Sized>(v: &mut V, stmt: &mut Stmt) {
    match stmt {
        Stmt::Expression(expr_stmt) => v.visit_expr(&mut expr_stmt.expr),
        Stmt::Declaration(decl) => {
            for var in &mut decl.variables {
                if let Some(ref mut init) = var.initializer {
                    v.visit_expr(init);
                }
            }
        }
        Stmt::TypeDecl(decl) => v.visit_type_decl(decl, TypeSite::Local),
        Stmt::If(if_stmt) => {
            v.visit_expr(&mut if_stmt.condition);
            v.visit_stmt(&mut if_stmt.then_branch);
            if let Some(ref mut else_branch) = if_stmt.else_branch {
                v.visit_stmt(else_branch);
            }
        }
        Stmt::While(while_stmt) => {
            v.visit_expr(&mut while_stmt.condition);
            v.visit_stmt(&mut while_stmt.body);
        }
        Stmt::ForEach(for_each) => {
            v.visit_expr(&mut for_each.iterable);
            v.visit_stmt(&mut for_each.body);
        }
        Stmt::Return(ret) => {
            if let Some(ref mut value) = ret.value {
                v.visit_expr(value);
            }
        }
        Stmt::Throw(throw) => v.visit_expr(&mut throw.expr),
        Stmt::Block(block) => v.visit_block(block),
        Stmt::Empty => {}
    }
}

pub fn walk_expr_mut<V: AstVisitorMut + ?Sized>(v: &mut V, expr: &mut Expr) {
    match expr {
        Expr::Literal(_) | Expr::Identifier(_) => {}
        Expr::Binary(binary) => {
            v.visit_expr(&mut binary.left);
            v.visit_expr(&mut binary.right);
        }
        Expr::Assignment(assign) => {
            v.visit_expr(&mut assign.target);
            v.visit_expr(&mut assign.value);
        }
        Expr::MethodCall(call) => v.visit_method_call(call),
        Expr::FieldAccess(access) => v.visit_expr(&mut access.target),
        Expr::Cast(cast) => v.visit_expr(&mut cast.expr),
        Expr::Conditional(cond) => {
            v.visit_expr(&mut cond.condition);
            v.visit_expr(&mut cond.then_expr);
            v.visit_expr(&mut cond.else_expr);
        }
        Expr::New(new) => {
            for arg in &mut new.arguments {
                v.visit_expr(arg);
            }
            if let Some(ref mut body) = new.anonymous_body {
                v.visit_anonymous_class(body);
            }
        }
        Expr::Parenthesized(inner) => v.visit_expr(inner),
    }
}

pub fn walk_method_call_mut<V: AstVisitorMut + ?Sized>(v: &mut V, call: &mut MethodCallExpr) {
    if let Some(ref mut target) = call.target {
        v.visit_expr(target);
    }
    for arg in &mut call.arguments {
        v.visit_expr(arg);
    }
}
