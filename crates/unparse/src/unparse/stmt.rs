// Copyright (C) 2025 Ryan Daum <ryan.daum@gmail.com> This program is free
// software: you can redistribute it and/or modify it under the terms of the GNU
// General Public License as published by the Free Software Foundation, version
// 3.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with
// this program. If not, see <https://www.gnu.org/licenses/>.
//

use super::Unparser;
use crate::ast::{Alias, Arguments, ExceptHandler, Expr, Stmt};
use crate::errors::UnparseError;
use crate::op::BinaryOp;
use itertools::Itertools;

// Values in `test` positions go through `Unparser::test`, which groups a `yield` when
// parenthesization is on. Only assignment values and expression statements may hold a bare one.
impl Unparser<'_> {
    pub(crate) fn unparse_stmt(&self, stmt: &Stmt) -> Result<Vec<String>, UnparseError> {
        match stmt {
            Stmt::FunctionDef {
                name,
                args,
                body,
                decorator_list,
            } => self.unparse_functiondef(name, args, body, decorator_list),
            Stmt::ClassDef {
                name,
                bases,
                body,
                decorator_list,
            } => self.unparse_classdef(name, bases, body, decorator_list),
            Stmt::Return { value } => self.unparse_return(value.as_ref()).map(line),
            Stmt::Delete { targets } => {
                let targets = self.non_empty_list("Delete", "targets", targets)?;
                Ok(line(format!("del {targets}")))
            }
            Stmt::Assign { targets, value } => self.unparse_assign(targets, value).map(line),
            Stmt::AugAssign { target, op, value } => {
                self.unparse_augassign(target, *op, value).map(line)
            }
            Stmt::Print { dest, values, nl } => {
                self.unparse_print(dest.as_ref(), values, *nl).map(line)
            }
            Stmt::For {
                target,
                iter,
                body,
                orelse,
            } => self.unparse_for(target, iter, body, orelse),
            Stmt::While { test, body, orelse } => {
                let header = format!("while {}:", self.test(test)?);
                self.unparse_block(header, "While", body, orelse)
            }
            Stmt::If { test, body, orelse } => {
                let header = format!("if {}:", self.test(test)?);
                self.unparse_block(header, "If", body, orelse)
            }
            Stmt::With {
                context_expr,
                optional_vars,
                body,
            } => self.unparse_with(context_expr, optional_vars.as_ref(), body),
            Stmt::Raise {
                exc_type,
                inst,
                tback,
            } => self
                .unparse_raise(exc_type.as_ref(), inst.as_ref(), tback.as_ref())
                .map(line),
            Stmt::TryExcept {
                body,
                handlers,
                orelse,
            } => self.unparse_tryexcept(body, handlers, orelse),
            Stmt::TryFinally { body, finalbody } => self.unparse_tryfinally(body, finalbody),
            Stmt::Assert { test, msg } => self.unparse_assert(test, msg.as_ref()).map(line),
            Stmt::Import { names } => {
                let names = self.unparse_aliases("Import", names)?;
                Ok(line(format!("import {names}")))
            }
            Stmt::ImportFrom {
                module,
                names,
                level,
            } => self
                .unparse_importfrom(module.as_deref(), names, *level)
                .map(line),
            Stmt::Exec {
                body,
                globals,
                locals,
            } => self
                .unparse_exec(body, globals.as_ref(), locals.as_ref())
                .map(line),
            Stmt::Global { names } => {
                if names.is_empty() {
                    return Err(UnparseError::malformed("Global", "no names"));
                }
                Ok(line(format!("global {}", names.join(", "))))
            }
            Stmt::Expr { value } => self.render(value).map(line),
            Stmt::Pass => Ok(line("pass".to_string())),
            Stmt::Break => Ok(line("break".to_string())),
            Stmt::Continue => Ok(line("continue".to_string())),
        }
    }

    fn unparse_functiondef(
        &self,
        name: &str,
        args: &Arguments,
        body: &[Stmt],
        decorators: &[Expr],
    ) -> Result<Vec<String>, UnparseError> {
        let mut lines = self.unparse_decorators(decorators)?;
        lines.push(format!("def {name}({}):", self.unparse_arguments(args)?));
        lines.extend(self.unparse_body("FunctionDef", body)?);
        Ok(lines)
    }

    fn unparse_classdef(
        &self,
        name: &str,
        bases: &[Expr],
        body: &[Stmt],
        decorators: &[Expr],
    ) -> Result<Vec<String>, UnparseError> {
        let mut lines = self.unparse_decorators(decorators)?;
        if bases.is_empty() {
            lines.push(format!("class {name}:"));
        } else {
            lines.push(format!("class {name}({}):", self.comma_list(bases)?));
        }
        lines.extend(self.unparse_body("ClassDef", body)?);
        Ok(lines)
    }

    fn unparse_return(&self, value: Option<&Expr>) -> Result<String, UnparseError> {
        match value {
            None => Ok("return".to_string()),
            Some(value) => Ok(format!("return {}", self.test(value)?)),
        }
    }

    fn unparse_assign(&self, targets: &[Expr], value: &Expr) -> Result<String, UnparseError> {
        if targets.is_empty() {
            return Err(UnparseError::malformed("Assign", "no targets"));
        }
        let separator = self.options.assign_targets.separator();
        let targets = itertools::process_results(
            targets.iter().map(|t| self.test(t)),
            |mut targets| targets.join(separator),
        )?;
        Ok(format!("{targets} = {}", self.render(value)?))
    }

    fn unparse_augassign(
        &self,
        target: &Expr,
        op: BinaryOp,
        value: &Expr,
    ) -> Result<String, UnparseError> {
        Ok(format!(
            "{} {op}= {}",
            self.render(target)?,
            self.render(value)?
        ))
    }

    fn unparse_print(
        &self,
        dest: Option<&Expr>,
        values: &[Expr],
        nl: bool,
    ) -> Result<String, UnparseError> {
        // A trailing comma needs something in front of it.
        if !nl && values.is_empty() {
            return Err(UnparseError::malformed(
                "Print",
                "no values to suppress the newline after",
            ));
        }
        let mut parts = Vec::with_capacity(values.len() + 1);
        if let Some(dest) = dest {
            parts.push(format!(">>{}", self.test(dest)?));
        }
        for value in values {
            parts.push(self.test(value)?);
        }
        let mut text = if parts.is_empty() {
            "print".to_string()
        } else {
            format!("print {}", parts.join(", "))
        };
        if !nl {
            text.push(',');
        }
        Ok(text)
    }

    fn unparse_for(
        &self,
        target: &Expr,
        iter: &Expr,
        body: &[Stmt],
        orelse: &[Stmt],
    ) -> Result<Vec<String>, UnparseError> {
        let header = format!("for {} in {}:", self.render(target)?, self.test(iter)?);
        self.unparse_block(header, "For", body, orelse)
    }

    /// A header line, its body, and the `else:` clause if there is anything in it.
    fn unparse_block(
        &self,
        header: String,
        kind: &'static str,
        body: &[Stmt],
        orelse: &[Stmt],
    ) -> Result<Vec<String>, UnparseError> {
        let mut lines = vec![header];
        lines.extend(self.unparse_body(kind, body)?);
        self.push_orelse(&mut lines, kind, orelse)?;
        Ok(lines)
    }

    fn unparse_with(
        &self,
        context_expr: &Expr,
        optional_vars: Option<&Expr>,
        body: &[Stmt],
    ) -> Result<Vec<String>, UnparseError> {
        let context = self.test(context_expr)?;
        let header = match optional_vars {
            None => format!("with {context}:"),
            Some(vars) => format!("with {context} as {}:", self.render(vars)?),
        };
        let mut lines = vec![header];
        lines.extend(self.unparse_body("With", body)?);
        Ok(lines)
    }

    fn unparse_raise(
        &self,
        exc_type: Option<&Expr>,
        inst: Option<&Expr>,
        tback: Option<&Expr>,
    ) -> Result<String, UnparseError> {
        match (exc_type, inst, tback) {
            (None, None, None) => Ok("raise".to_string()),
            (Some(t), None, None) => Ok(format!("raise {}", self.test(t)?)),
            (Some(t), Some(i), None) => Ok(format!("raise {}, {}", self.test(t)?, self.test(i)?)),
            (Some(t), Some(i), Some(tb)) => Ok(format!(
                "raise {}, {}, {}",
                self.test(t)?,
                self.test(i)?,
                self.test(tb)?
            )),
            (None, _, _) => Err(UnparseError::malformed(
                "Raise",
                "instance or traceback without an exception type",
            )),
            (Some(_), None, Some(_)) => Err(UnparseError::malformed(
                "Raise",
                "traceback without an instance",
            )),
        }
    }

    fn unparse_tryexcept(
        &self,
        body: &[Stmt],
        handlers: &[ExceptHandler],
        orelse: &[Stmt],
    ) -> Result<Vec<String>, UnparseError> {
        if handlers.is_empty() {
            return Err(UnparseError::malformed("TryExcept", "no handlers"));
        }
        let mut lines = vec!["try:".to_string()];
        lines.extend(self.unparse_body("TryExcept", body)?);
        for handler in handlers {
            lines.extend(self.unparse_handler(handler)?);
        }
        self.push_orelse(&mut lines, "TryExcept", orelse)?;
        Ok(lines)
    }

    fn unparse_tryfinally(
        &self,
        body: &[Stmt],
        finalbody: &[Stmt],
    ) -> Result<Vec<String>, UnparseError> {
        // `try/except/finally` arrives as a TryExcept wrapped in a TryFinally.
        let mut lines = if let [inner @ Stmt::TryExcept { .. }] = body {
            self.render(inner)?
        } else {
            let mut lines = vec!["try:".to_string()];
            lines.extend(self.unparse_body("TryFinally", body)?);
            lines
        };
        lines.push("finally:".to_string());
        lines.extend(self.unparse_body("TryFinally", finalbody)?);
        Ok(lines)
    }

    fn unparse_assert(&self, test: &Expr, msg: Option<&Expr>) -> Result<String, UnparseError> {
        match msg {
            None => Ok(format!("assert {}", self.test(test)?)),
            Some(msg) => Ok(format!("assert {}, {}", self.test(test)?, self.test(msg)?)),
        }
    }

    fn unparse_importfrom(
        &self,
        module: Option<&str>,
        names: &[Alias],
        level: u32,
    ) -> Result<String, UnparseError> {
        let dots = ".".repeat(level as usize);
        let module = match module {
            Some(module) => module,
            None if level > 0 => "",
            None => {
                return Err(UnparseError::malformed(
                    "ImportFrom",
                    "no module and no relative level",
                ));
            }
        };
        let names = self.unparse_aliases("ImportFrom", names)?;
        Ok(format!("from {dots}{module} import {names}"))
    }

    fn unparse_exec(
        &self,
        body: &Expr,
        globals: Option<&Expr>,
        locals: Option<&Expr>,
    ) -> Result<String, UnparseError> {
        let body = self.test(body)?;
        match (globals, locals) {
            (None, None) => Ok(format!("exec {body}")),
            (Some(g), None) => Ok(format!("exec {body} in {}", self.test(g)?)),
            (Some(g), Some(l)) => Ok(format!(
                "exec {body} in {}, {}",
                self.test(g)?,
                self.test(l)?
            )),
            (None, Some(_)) => Err(UnparseError::malformed("Exec", "locals without globals")),
        }
    }

    /// Render a parameter list without its surrounding parentheses. Defaults line up with the
    /// trailing parameters.
    pub(super) fn unparse_arguments(&self, arguments: &Arguments) -> Result<String, UnparseError> {
        let Arguments {
            args,
            vararg,
            kwarg,
            defaults,
        } = arguments;
        let Some(first_default) = args.len().checked_sub(defaults.len()) else {
            return Err(UnparseError::malformed(
                "arguments",
                format!(
                    "{} defaults for {} parameters",
                    defaults.len(),
                    args.len()
                ),
            ));
        };

        let mut params = Vec::with_capacity(args.len() + 2);
        for (i, arg) in args.iter().enumerate() {
            let param = self.render(arg)?;
            match i.checked_sub(first_default) {
                Some(d) => params.push(format!("{param}={}", self.test(&defaults[d])?)),
                None => params.push(param),
            }
        }
        if let Some(vararg) = vararg {
            params.push(format!("*{vararg}"));
        }
        if let Some(kwarg) = kwarg {
            params.push(format!("**{kwarg}"));
        }
        Ok(params.join(", "))
    }

    fn unparse_handler(&self, handler: &ExceptHandler) -> Result<Vec<String>, UnparseError> {
        let header = match (&handler.exc_type, &handler.name) {
            (None, None) => "except:".to_string(),
            (Some(t), None) => format!("except {}:", self.test(t)?),
            (Some(t), Some(n)) => format!("except {}, {}:", self.test(t)?, self.test(n)?),
            (None, Some(_)) => {
                return Err(UnparseError::malformed(
                    "ExceptHandler",
                    "bound name without an exception type",
                ));
            }
        };
        let mut lines = vec![header];
        lines.extend(self.unparse_body("ExceptHandler", &handler.body)?);
        Ok(lines)
    }

    fn unparse_aliases(&self, kind: &'static str, names: &[Alias]) -> Result<String, UnparseError> {
        if names.is_empty() {
            return Err(UnparseError::malformed(kind, "no names"));
        }
        itertools::process_results(names.iter().map(|a| self.render(a)), |mut names| {
            names.join(", ")
        })
    }

    fn unparse_decorators(&self, decorators: &[Expr]) -> Result<Vec<String>, UnparseError> {
        decorators
            .iter()
            .map(|decorator| Ok(format!("@{}", self.render(decorator)?)))
            .collect()
    }

    /// Append the `else:` clause, if there is anything in it.
    fn push_orelse(
        &self,
        lines: &mut Vec<String>,
        kind: &'static str,
        orelse: &[Stmt],
    ) -> Result<(), UnparseError> {
        if !orelse.is_empty() {
            lines.push("else:".to_string());
            lines.extend(self.unparse_body(kind, orelse)?);
        }
        Ok(())
    }

    fn non_empty_list(
        &self,
        kind: &'static str,
        field: &str,
        exprs: &[Expr],
    ) -> Result<String, UnparseError> {
        if exprs.is_empty() {
            return Err(UnparseError::malformed(kind, format!("no {field}")));
        }
        self.comma_list(exprs)
    }
}

fn line(text: String) -> Vec<String> {
    vec![text]
}

#[cfg(test)]
mod tests {
    use crate::ast::{Alias, Arguments, ExceptHandler, Expr, Stmt};
    use crate::errors::UnparseError;
    use crate::op::BinaryOp;
    use crate::unparse::unparse_stmt;
    use pretty_assertions::assert_eq;
    use py2py_common::{AssignTargets, UnparseOptions};
    use test_case::test_case;
    use unindent::unindent;

    fn render(stmt: &Stmt) -> String {
        unparse_stmt(stmt, &UnparseOptions::default())
            .unwrap()
            .join("\n")
    }

    fn render_err(stmt: &Stmt) -> UnparseError {
        unparse_stmt(stmt, &UnparseOptions::default()).unwrap_err()
    }

    fn call(name: &str) -> Stmt {
        Stmt::expr(Expr::call(Expr::name(name), vec![]))
    }

    fn def(name: &str, args: Arguments, body: Vec<Stmt>) -> Stmt {
        Stmt::FunctionDef {
            name: name.to_string(),
            args,
            body,
            decorator_list: vec![],
        }
    }

    fn handler(exc_type: Option<&str>, name: Option<&str>, body: Vec<Stmt>) -> ExceptHandler {
        ExceptHandler {
            exc_type: exc_type.map(Expr::name),
            name: name.map(Expr::name),
            body,
        }
    }

    #[test]
    fn test_function_with_decorators() {
        let stmt = Stmt::FunctionDef {
            name: "handler".to_string(),
            args: Arguments {
                args: vec![Expr::name("a"), Expr::name("b"), Expr::name("c")],
                vararg: Some("args".to_string()),
                kwarg: Some("kwargs".to_string()),
                defaults: vec![Expr::int(5)],
            },
            body: vec![Stmt::Pass],
            decorator_list: vec![
                Expr::name("staticmethod"),
                Expr::call(Expr::attr(Expr::name("app"), "route"), vec![Expr::bytes("/")]),
            ],
        };
        let expected = unindent(
            "
            @staticmethod
            @app.route('/')
            def handler(a, b, c=5, *args, **kwargs):
              pass",
        );
        assert_eq!(render(&stmt), expected);
    }

    #[test]
    fn test_default_alignment() {
        let all_defaults = def(
            "f",
            Arguments {
                args: vec![Expr::name("a"), Expr::name("b")],
                defaults: vec![Expr::int(1), Expr::bytes("x")],
                ..Default::default()
            },
            vec![Stmt::Pass],
        );
        assert_eq!(render(&all_defaults), "def f(a=1, b='x'):\n  pass");

        let unpacking = def(
            "g",
            Arguments {
                args: vec![Expr::tuple(vec![Expr::name("x"), Expr::name("y")])],
                ..Default::default()
            },
            vec![Stmt::Pass],
        );
        assert_eq!(render(&unpacking), "def g((x, y)):\n  pass");

        let too_many = def(
            "h",
            Arguments {
                args: vec![Expr::name("a")],
                defaults: vec![Expr::int(1), Expr::int(2)],
                ..Default::default()
            },
            vec![Stmt::Pass],
        );
        assert!(matches!(
            render_err(&too_many),
            UnparseError::MalformedNode {
                kind: "arguments",
                ..
            }
        ));
    }

    #[test]
    fn test_class() {
        let bare = Stmt::ClassDef {
            name: "Empty".to_string(),
            bases: vec![],
            body: vec![Stmt::Pass],
            decorator_list: vec![],
        };
        assert_eq!(render(&bare), "class Empty:\n  pass");
        let derived = Stmt::ClassDef {
            name: "Child".to_string(),
            bases: vec![Expr::name("Base"), Expr::attr(Expr::name("mixins"), "Mixin")],
            body: vec![def("method", Arguments::positional(&["self"]), vec![Stmt::Pass])],
            decorator_list: vec![],
        };
        let expected = unindent(
            "
            class Child(Base, mixins.Mixin):
              def method(self):
                pass",
        );
        assert_eq!(render(&derived), expected);
    }

    #[test]
    fn test_loop_else_clause() {
        let with_else = Stmt::For {
            target: Expr::name("x"),
            iter: Expr::name("items"),
            body: vec![call("work")],
            orelse: vec![call("done")],
        };
        let expected = unindent(
            "
            for x in items:
              work()
            else:
              done()",
        );
        assert_eq!(render(&with_else), expected);

        let without_else = Stmt::While {
            test: Expr::name("running"),
            body: vec![Stmt::Break],
            orelse: vec![],
        };
        assert_eq!(render(&without_else), "while running:\n  break");
    }

    #[test]
    fn test_nested_if_else() {
        let stmt = Stmt::If {
            test: Expr::name("a"),
            body: vec![Stmt::If {
                test: Expr::name("b"),
                body: vec![Stmt::Continue],
                orelse: vec![Stmt::Pass],
            }],
            orelse: vec![Stmt::If {
                test: Expr::name("c"),
                body: vec![Stmt::Return { value: None }],
                orelse: vec![],
            }],
        };
        let expected = unindent(
            "
            if a:
              if b:
                continue
              else:
                pass
            else:
              if c:
                return",
        );
        assert_eq!(render(&stmt), expected);
    }

    #[test]
    fn test_empty_body_is_malformed() {
        let stmt = Stmt::If {
            test: Expr::name("a"),
            body: vec![],
            orelse: vec![],
        };
        assert_eq!(
            render_err(&stmt),
            UnparseError::MalformedNode {
                kind: "If",
                reason: "empty body".to_string()
            }
        );
    }

    #[test]
    fn test_with() {
        let bound = Stmt::With {
            context_expr: Expr::call(Expr::name("open"), vec![Expr::name("path")]),
            optional_vars: Some(Expr::name("f")),
            body: vec![call("read")],
        };
        assert_eq!(render(&bound), "with open(path) as f:\n  read()");
        let unbound = Stmt::With {
            context_expr: Expr::name("lock"),
            optional_vars: None,
            body: vec![Stmt::Pass],
        };
        assert_eq!(render(&unbound), "with lock:\n  pass");
    }

    #[test]
    fn test_try_except() {
        let stmt = Stmt::TryExcept {
            body: vec![call("risky")],
            handlers: vec![
                handler(Some("KeyError"), None, vec![Stmt::Pass]),
                handler(Some("ValueError"), Some("e"), vec![call("log")]),
                handler(None, None, vec![Stmt::Raise {
                    exc_type: None,
                    inst: None,
                    tback: None,
                }]),
            ],
            orelse: vec![call("commit")],
        };
        let expected = unindent(
            "
            try:
              risky()
            except KeyError:
              pass
            except ValueError, e:
              log()
            except:
              raise
            else:
              commit()",
        );
        assert_eq!(render(&stmt), expected);

        let no_handlers = Stmt::TryExcept {
            body: vec![Stmt::Pass],
            handlers: vec![],
            orelse: vec![],
        };
        assert!(render_err(&no_handlers).to_string().contains("no handlers"));

        let nameless_type = Stmt::TryExcept {
            body: vec![Stmt::Pass],
            handlers: vec![handler(None, Some("e"), vec![Stmt::Pass])],
            orelse: vec![],
        };
        assert!(matches!(
            render_err(&nameless_type),
            UnparseError::MalformedNode {
                kind: "ExceptHandler",
                ..
            }
        ));
    }

    #[test]
    fn test_try_finally() {
        let plain = Stmt::TryFinally {
            body: vec![call("work")],
            finalbody: vec![call("cleanup")],
        };
        assert_eq!(render(&plain), "try:\n  work()\nfinally:\n  cleanup()");

        let combined = Stmt::TryFinally {
            body: vec![Stmt::TryExcept {
                body: vec![call("work")],
                handlers: vec![handler(Some("Exception"), None, vec![call("recover")])],
                orelse: vec![],
            }],
            finalbody: vec![call("cleanup")],
        };
        let expected = unindent(
            "
            try:
              work()
            except Exception:
              recover()
            finally:
              cleanup()",
        );
        assert_eq!(render(&combined), expected);
    }

    #[test]
    fn test_assignments() {
        let multi = Stmt::Assign {
            targets: vec![Expr::name("a"), Expr::name("b")],
            value: Expr::int(0),
        };
        assert_eq!(render(&multi), "a, b = 0");
        let chained = UnparseOptions {
            assign_targets: AssignTargets::Chain,
            ..Default::default()
        };
        assert_eq!(unparse_stmt(&multi, &chained).unwrap(), vec!["a = b = 0"]);

        let subscripted = Stmt::assign(Expr::index(Expr::name("d"), Expr::bytes("k")), Expr::name("v"));
        assert_eq!(render(&subscripted), "d['k'] = v");

        let aug = Stmt::AugAssign {
            target: Expr::name("total"),
            op: BinaryOp::FloorDiv,
            value: Expr::int(2),
        };
        assert_eq!(render(&aug), "total //= 2");

        let no_targets = Stmt::Assign {
            targets: vec![],
            value: Expr::int(0),
        };
        assert!(render_err(&no_targets).to_string().contains("no targets"));
    }

    #[test_case(None, None, None, "raise"; "bare")]
    #[test_case(Some("E"), None, None, "raise E"; "type only")]
    #[test_case(Some("E"), Some("msg"), None, "raise E, msg"; "type and instance")]
    #[test_case(Some("E"), Some("msg"), Some("tb"), "raise E, msg, tb"; "all three")]
    fn test_raise(t: Option<&str>, i: Option<&str>, tb: Option<&str>, expected: &str) {
        let stmt = Stmt::Raise {
            exc_type: t.map(Expr::name),
            inst: i.map(Expr::name),
            tback: tb.map(Expr::name),
        };
        assert_eq!(render(&stmt), expected);
    }

    #[test]
    fn test_raise_gaps_are_malformed() {
        let no_type = Stmt::Raise {
            exc_type: None,
            inst: Some(Expr::name("msg")),
            tback: None,
        };
        assert!(render_err(&no_type).to_string().contains("Raise"));
        let no_inst = Stmt::Raise {
            exc_type: Some(Expr::name("E")),
            inst: None,
            tback: Some(Expr::name("tb")),
        };
        assert!(render_err(&no_inst).to_string().contains("traceback"));
    }

    #[test]
    fn test_simple_statements() {
        assert_eq!(render(&Stmt::Return { value: None }), "return");
        assert_eq!(
            render(&Stmt::Return {
                value: Some(Expr::tuple(vec![Expr::int(1), Expr::int(2)]))
            }),
            "return (1, 2)"
        );
        assert_eq!(
            render(&Stmt::Delete {
                targets: vec![Expr::name("a"), Expr::index(Expr::name("b"), Expr::int(0))]
            }),
            "del a, b[0]"
        );
        assert_eq!(
            render(&Stmt::Assert {
                test: Expr::name("ok"),
                msg: None
            }),
            "assert ok"
        );
        assert_eq!(
            render(&Stmt::Assert {
                test: Expr::name("ok"),
                msg: Some(Expr::bytes("failed"))
            }),
            "assert ok, 'failed'"
        );
        assert_eq!(
            render(&Stmt::Global {
                names: vec!["a".to_string(), "b".to_string()]
            }),
            "global a, b"
        );
        assert_eq!(render(&Stmt::Pass), "pass");
        assert_eq!(render(&Stmt::Break), "break");
        assert_eq!(render(&Stmt::Continue), "continue");
        assert_eq!(render(&call("main")), "main()");
    }

    #[test]
    fn test_imports() {
        let import = Stmt::Import {
            names: vec![Alias::new("os", None), Alias::new("numpy", Some("np"))],
        };
        assert_eq!(render(&import), "import os, numpy as np");

        let absolute = Stmt::ImportFrom {
            module: Some("os.path".to_string()),
            names: vec![Alias::new("join", Some("j"))],
            level: 0,
        };
        assert_eq!(render(&absolute), "from os.path import join as j");

        let relative = Stmt::ImportFrom {
            module: Some("pkg".to_string()),
            names: vec![Alias::new("*", None)],
            level: 2,
        };
        assert_eq!(render(&relative), "from ..pkg import *");

        let sibling = Stmt::ImportFrom {
            module: None,
            names: vec![Alias::new("util", None)],
            level: 1,
        };
        assert_eq!(render(&sibling), "from . import util");

        let nowhere = Stmt::ImportFrom {
            module: None,
            names: vec![Alias::new("util", None)],
            level: 0,
        };
        assert!(render_err(&nowhere).to_string().contains("ImportFrom"));
        assert!(render_err(&Stmt::Import { names: vec![] }).to_string().contains("no names"));
    }

    #[test]
    fn test_print() {
        let plain = Stmt::Print {
            dest: None,
            values: vec![Expr::bytes("a"), Expr::name("b")],
            nl: true,
        };
        assert_eq!(render(&plain), "print 'a', b");
        let redirected = Stmt::Print {
            dest: Some(Expr::attr(Expr::name("sys"), "stderr")),
            values: vec![Expr::name("msg")],
            nl: false,
        };
        assert_eq!(render(&redirected), "print >>sys.stderr, msg,");
        let newline = Stmt::Print {
            dest: None,
            values: vec![],
            nl: true,
        };
        assert_eq!(render(&newline), "print");
        let dangling = Stmt::Print {
            dest: None,
            values: vec![],
            nl: false,
        };
        assert!(render_err(&dangling).to_string().contains("Print"));
    }

    #[test]
    fn test_exec() {
        let bare = Stmt::Exec {
            body: Expr::name("code"),
            globals: None,
            locals: None,
        };
        assert_eq!(render(&bare), "exec code");
        let scoped = Stmt::Exec {
            body: Expr::name("code"),
            globals: Some(Expr::name("g")),
            locals: Some(Expr::name("l")),
        };
        assert_eq!(render(&scoped), "exec code in g, l");
        let only_locals = Stmt::Exec {
            body: Expr::name("code"),
            globals: None,
            locals: Some(Expr::name("l")),
        };
        assert!(render_err(&only_locals).to_string().contains("locals without globals"));
    }

    #[test]
    fn test_parenthesize_yield_in_headers() {
        let parenthesized = UnparseOptions {
            parenthesize: true,
            ..Default::default()
        };
        let render_parenthesized =
            |stmt: &Stmt| unparse_stmt(stmt, &parenthesized).unwrap().join("\n");
        let yield_x = || Expr::Yield {
            value: Some(Box::new(Expr::name("x"))),
        };
        let bare_yield = || Expr::Yield { value: None };

        let ret = Stmt::Return {
            value: Some(yield_x()),
        };
        assert_eq!(render(&ret), "return yield x");
        assert_eq!(render_parenthesized(&ret), "return (yield x)");

        let for_loop = Stmt::For {
            target: Expr::name("i"),
            iter: bare_yield(),
            body: vec![Stmt::Pass],
            orelse: vec![],
        };
        assert_eq!(render_parenthesized(&for_loop), "for i in (yield):\n  pass");

        let branch = Stmt::If {
            test: yield_x(),
            body: vec![Stmt::Pass],
            orelse: vec![],
        };
        assert_eq!(render_parenthesized(&branch), "if (yield x):\n  pass");

        let spin = Stmt::While {
            test: bare_yield(),
            body: vec![Stmt::Break],
            orelse: vec![],
        };
        assert_eq!(render_parenthesized(&spin), "while (yield):\n  break");

        let with = Stmt::With {
            context_expr: bare_yield(),
            optional_vars: None,
            body: vec![Stmt::Pass],
        };
        assert_eq!(render_parenthesized(&with), "with (yield):\n  pass");

        let exec = Stmt::Exec {
            body: bare_yield(),
            globals: None,
            locals: None,
        };
        assert_eq!(render_parenthesized(&exec), "exec (yield)");

        // Assignment values and expression statements may hold a bare yield.
        let assign = Stmt::assign(Expr::name("v"), yield_x());
        assert_eq!(render_parenthesized(&assign), "v = yield x");
        assert_eq!(render_parenthesized(&Stmt::expr(bare_yield())), "yield");
    }
}
