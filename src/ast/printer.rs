use super::nodes::*;
use super::Ast;

const INDENT: &str = "    ";

/// Java source printer.
///
/// Output is a pure function of the tree: members are separated by one blank
/// line, bodies are indented by four spaces, and non-block branches of
/// `if`/`while`/`for` are printed inside braces.
pub struct AstPrinter {
    indent_level: usize,
    output: String,
}

impl Default for AstPrinter {
    fn default() -> Self {
        Self::new()
    }
}

impl AstPrinter {
    pub fn new() -> Self {
        Self {
            indent_level: 0,
            output: String::new(),
        }
    }

    pub fn print(&mut self, ast: &Ast) -> String {
        self.output.clear();
        self.indent_level = 0;

        if let Some(ref package) = ast.package_decl {
            self.output.push_str(&package.to_string());
            self.output.push_str("\n\n");
        }

        for import in &ast.imports {
            self.output.push_str(&import.to_string());
            self.output.push('\n');
        }
        if !ast.imports.is_empty() {
            self.output.push('\n');
        }

        for (i, type_decl) in ast.type_decls.iter().enumerate() {
            if i > 0 {
                self.output.push('\n');
            }
            self.print_type_decl(type_decl);
        }

        std::mem::take(&mut self.output)
    }

    /// Render a single expression
    pub fn expr_to_string(expr: &Expr) -> String {
        let mut printer = Self::new();
        printer.print_expr(expr);
        printer.output
    }

    /// Render a single member at indentation level zero
    pub fn member_to_string(member: &ClassMember) -> String {
        let mut printer = Self::new();
        printer.print_member(member);
        printer.output
    }

    fn indent(&mut self) {
        self.indent_level += 1;
    }

    fn dedent(&mut self) {
        if self.indent_level > 0 {
            self.indent_level -= 1;
        }
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.output.push_str(INDENT);
        }
    }

    fn writeln(&mut self, s: &str) {
        self.write_indent();
        self.output.push_str(s);
        self.output.push('\n');
    }

    fn write_modifiers(&mut self, modifiers: &[Modifier]) {
        for modifier in modifiers {
            self.output.push_str(modifier.keyword());
            self.output.push(' ');
        }
    }

    fn write_comma_separated<T>(&mut self, items: &[T], mut each: impl FnMut(&mut Self, &T)) {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.output.push_str(", ");
            }
            each(self, item);
        }
    }

    fn write_type_params(&mut self, params: &[TypeParam]) {
        if params.is_empty() {
            return;
        }
        self.output.push('<');
        self.write_comma_separated(params, |p, param| {
            p.output.push_str(&param.name);
            if !param.bounds.is_empty() {
                p.output.push_str(" extends ");
                for (i, bound) in param.bounds.iter().enumerate() {
                    if i > 0 {
                        p.output.push_str(" & ");
                    }
                    p.output.push_str(&bound.to_string());
                }
            }
        });
        self.output.push('>');
    }

    fn print_type_decl(&mut self, type_decl: &TypeDecl) {
        self.write_indent();
        self.write_modifiers(type_decl.modifiers());
        match type_decl {
            TypeDecl::Class(class) => {
                self.output.push_str("class ");
                self.output.push_str(&class.name);
                self.write_type_params(&class.type_params);
                if let Some(ref extends) = class.extends {
                    self.output.push_str(" extends ");
                    self.output.push_str(&extends.to_string());
                }
                if !class.implements.is_empty() {
                    self.output.push_str(" implements ");
                    self.write_comma_separated(&class.implements, |p, t| p.output.push_str(&t.to_string()));
                }
            }
            TypeDecl::Interface(interface) => {
                self.output.push_str("interface ");
                self.output.push_str(&interface.name);
                self.write_type_params(&interface.type_params);
                if !interface.extends.is_empty() {
                    self.output.push_str(" extends ");
                    self.write_comma_separated(&interface.extends, |p, t| p.output.push_str(&t.to_string()));
                }
            }
            TypeDecl::Enum(enum_decl) => {
                self.output.push_str("enum ");
                self.output.push_str(&enum_decl.name);
                if !enum_decl.implements.is_empty() {
                    self.output.push_str(" implements ");
                    self.write_comma_separated(&enum_decl.implements, |p, t| p.output.push_str(&t.to_string()));
                }
            }
        }
        self.output.push_str(" {\n");
        self.indent();

        if let TypeDecl::Enum(enum_decl) = type_decl {
            let count = enum_decl.constants.len();
            for (i, constant) in enum_decl.constants.iter().enumerate() {
                self.write_indent();
                self.output.push_str(&constant.name);
                if !constant.arguments.is_empty() {
                    self.output.push('(');
                    self.write_comma_separated(&constant.arguments, |p, arg| p.print_expr(arg));
                    self.output.push(')');
                }
                if i + 1 < count {
                    self.output.push(',');
                } else if !enum_decl.body.is_empty() {
                    self.output.push(';');
                }
                self.output.push('\n');
            }
            if !enum_decl.body.is_empty() {
                if count == 0 {
                    self.writeln(";");
                }
                self.output.push('\n');
            }
        }

        for (i, member) in type_decl.members().iter().enumerate() {
            if i > 0 {
                self.output.push('\n');
            }
            self.print_member(member);
        }

        self.dedent();
        self.writeln("}");
    }

    fn print_member(&mut self, member: &ClassMember) {
        match member {
            ClassMember::Field(field) => {
                self.write_indent();
                self.write_modifiers(&field.modifiers);
                self.output.push_str(&field.type_ref.to_string());
                self.output.push(' ');
                self.output.push_str(&field.name);
                if let Some(ref initializer) = field.initializer {
                    self.output.push_str(" = ");
                    self.print_expr(initializer);
                }
                self.output.push_str(";\n");
            }
            ClassMember::Method(method) => self.print_method_decl(method),
            ClassMember::Constructor(ctor) => {
                self.write_indent();
                self.write_modifiers(&ctor.modifiers);
                self.output.push_str(&ctor.name);
                self.print_parameters(&ctor.parameters);
                self.output.push(' ');
                self.print_body(&ctor.body);
                self.output.push('\n');
            }
            ClassMember::Initializer(init) => {
                self.write_indent();
                if init.is_static {
                    self.output.push_str("static ");
                }
                self.print_body(&init.body);
                self.output.push('\n');
            }
            ClassMember::TypeDecl(nested) => self.print_type_decl(nested),
        }
    }

    fn print_method_decl(&mut self, method: &MethodDecl) {
        self.write_indent();
        self.write_modifiers(&method.modifiers);
        if !method.type_params.is_empty() {
            self.write_type_params(&method.type_params);
            self.output.push(' ');
        }
        match method.return_type {
            Some(ref return_type) => self.output.push_str(&return_type.to_string()),
            None => self.output.push_str("void"),
        }
        self.output.push(' ');
        self.output.push_str(&method.name);
        self.print_parameters(&method.parameters);
        match method.body {
            Some(ref body) => {
                self.output.push(' ');
                self.print_body(body);
                self.output.push('\n');
            }
            None => self.output.push_str(";\n"),
        }
    }

    fn print_parameters(&mut self, parameters: &[Parameter]) {
        self.output.push('(');
        self.write_comma_separated(parameters, |p, param| {
            p.write_modifiers(&param.modifiers);
            p.output.push_str(&param.type_ref.to_string());
            if param.varargs {
                p.output.push_str("...");
            }
            p.output.push(' ');
            p.output.push_str(&param.name);
        });
        self.output.push(')');
    }

    /// `{` + statements + closing brace, without the trailing newline
    fn print_body(&mut self, block: &Block) {
        self.output.push_str("{\n");
        self.indent();
        for stmt in &block.statements {
            self.print_stmt(stmt);
        }
        self.dedent();
        self.write_indent();
        self.output.push('}');
    }

    /// Branch of a compound statement, always braced
    fn print_branch(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Block(block) => {
                self.output.push(' ');
                self.print_body(block);
            }
            other => {
                self.output.push_str(" {\n");
                self.indent();
                self.print_stmt(other);
                self.dedent();
                self.write_indent();
                self.output.push('}');
            }
        }
    }

    fn print_if(&mut self, if_stmt: &IfStmt) {
        self.output.push_str("if (");
        self.print_expr(&if_stmt.condition);
        self.output.push(')');
        self.print_branch(&if_stmt.then_branch);
        if let Some(ref else_branch) = if_stmt.else_branch {
            self.output.push_str(" else");
            match else_branch.as_ref() {
                Stmt::If(nested) => {
                    self.output.push(' ');
                    self.print_if(nested);
                }
                other => self.print_branch(other),
            }
        }
    }

    fn print_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Expression(expr_stmt) => {
                self.write_indent();
                self.print_expr(&expr_stmt.expr);
                self.output.push_str(";\n");
            }
            Stmt::Declaration(var_decl) => {
                self.write_indent();
                self.write_modifiers(&var_decl.modifiers);
                self.output.push_str(&var_decl.type_ref.to_string());
                self.output.push(' ');
                self.write_comma_separated(&var_decl.variables, |p, var| {
                    p.output.push_str(&var.name);
                    if let Some(ref initializer) = var.initializer {
                        p.output.push_str(" = ");
                        p.print_expr(initializer);
                    }
                });
                self.output.push_str(";\n");
            }
            Stmt::TypeDecl(type_decl) => self.print_type_decl(type_decl),
            Stmt::If(if_stmt) => {
                self.write_indent();
                self.print_if(if_stmt);
                self.output.push('\n');
            }
            Stmt::While(while_stmt) => {
                self.write_indent();
                self.output.push_str("while (");
                self.print_expr(&while_stmt.condition);
                self.output.push(')');
                self.print_branch(&while_stmt.body);
                self.output.push('\n');
            }
            Stmt::ForEach(for_each) => {
                self.write_indent();
                self.output.push_str("for (");
                self.output.push_str(&for_each.var_type.to_string());
                self.output.push(' ');
                self.output.push_str(&for_each.var_name);
                self.output.push_str(" : ");
                self.print_expr(&for_each.iterable);
                self.output.push(')');
                self.print_branch(&for_each.body);
                self.output.push('\n');
            }
            Stmt::Return(return_stmt) => {
                self.write_indent();
                self.output.push_str("return");
                if let Some(ref value) = return_stmt.value {
                    self.output.push(' ');
                    self.print_expr(value);
                }
                self.output.push_str(";\n");
            }
            Stmt::Throw(throw_stmt) => {
                self.write_indent();
                self.output.push_str("throw ");
                self.print_expr(&throw_stmt.expr);
                self.output.push_str(";\n");
            }
            Stmt::Block(block) => {
                self.write_indent();
                self.print_body(block);
                self.output.push('\n');
            }
            Stmt::Empty => self.writeln(";"),
        }
    }

    fn print_expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Literal(literal) => self.print_literal(&literal.value),
            Expr::Identifier(ident) => self.output.push_str(&ident.name),
            Expr::Binary(binary) => {
                self.print_expr(&binary.left);
                self.output.push(' ');
                self.output.push_str(binary.operator.symbol());
                self.output.push(' ');
                self.print_expr(&binary.right);
            }
            Expr::Assignment(assign) => {
                self.print_expr(&assign.target);
                self.output.push_str(" = ");
                self.print_expr(&assign.value);
            }
            Expr::MethodCall(call) => {
                if let Some(ref target) = call.target {
                    self.print_expr(target);
                    self.output.push('.');
                }
                self.output.push_str(&call.name);
                self.output.push('(');
                self.write_comma_separated(&call.arguments, |p, arg| p.print_expr(arg));
                self.output.push(')');
            }
            Expr::FieldAccess(access) => {
                self.print_expr(&access.target);
                self.output.push('.');
                self.output.push_str(&access.name);
            }
            Expr::Cast(cast) => {
                self.output.push('(');
                self.output.push_str(&cast.target_type.to_string());
                self.output.push_str(") ");
                self.print_expr(&cast.expr);
            }
            Expr::Conditional(cond) => {
                self.print_expr(&cond.condition);
                self.output.push_str(" ? ");
                self.print_expr(&cond.then_expr);
                self.output.push_str(" : ");
                self.print_expr(&cond.else_expr);
            }
            Expr::New(new) => {
                self.output.push_str("new ");
                self.output.push_str(&new.target_type.to_string());
                self.output.push('(');
                self.write_comma_separated(&new.arguments, |p, arg| p.print_expr(arg));
                self.output.push(')');
                if let Some(ref body) = new.anonymous_body {
                    self.output.push_str(" {\n");
                    self.indent();
                    for (i, member) in body.body.iter().enumerate() {
                        if i > 0 {
                            self.output.push('\n');
                        }
                        self.print_member(member);
                    }
                    self.dedent();
                    self.write_indent();
                    self.output.push('}');
                }
            }
            Expr::Parenthesized(inner) => {
                self.output.push('(');
                self.print_expr(inner);
                self.output.push(')');
            }
        }
    }

    fn print_literal(&mut self, literal: &Literal) {
        match literal {
            Literal::Integer(value) => self.output.push_str(&value.to_string()),
            Literal::Boolean(value) => self.output.push_str(if *value { "true" } else { "false" }),
            Literal::String(value) => {
                self.output.push('"');
                for c in value.chars() {
                    self.push_escaped(c, '"');
                }
                self.output.push('"');
            }
            Literal::Char(value) => {
                self.output.push('\'');
                self.push_escaped(*value, '\'');
                self.output.push('\'');
            }
            Literal::Null => self.output.push_str("null"),
        }
    }

    fn push_escaped(&mut self, c: char, quote: char) {
        match c {
            '\\' => self.output.push_str("\\\\"),
            '\n' => self.output.push_str("\\n"),
            '\t' => self.output.push_str("\\t"),
            '\r' => self.output.push_str("\\r"),
            c if c == quote => {
                self.output.push('\\');
                self.output.push(c);
            }
            c => self.output.push(c),
        }
    }
}
