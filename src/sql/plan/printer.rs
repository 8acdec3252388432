//! Human-readable, indented rendering of query plans

use std::fmt::{Display, Write};

use super::{Node, OutputColumn, Plan};

const INDENT: &str = "    ";

/// Accumulates lines, prefixing each new line with the current indentation
#[derive(Default)]
struct Printer {
    out: String,
    indentation: usize,
    in_line: bool,
}

impl Printer {
    fn print(&mut self, text: impl Display) {
        if !self.in_line {
            for _ in 0..self.indentation {
                self.out.push_str(INDENT);
            }
        }
        // writing to a String cannot fail
        let _ = write!(self.out, "{}", text);
        self.in_line = true;
    }

    fn println(&mut self, text: impl Display) {
        self.print(text);
        self.out.push('\n');
        self.in_line = false;
    }

    fn indent(&mut self) {
        self.indentation += 1;
    }

    fn unindent(&mut self) {
        self.indentation = self.indentation.saturating_sub(1);
    }
}

impl Node {
    fn print(&self, p: &mut Printer) {
        match self {
            Node::Load { table_name, schema } => {
                p.println("Load {");
                p.indent();
                p.println(format_args!("Table: {:?}", table_name));
                p.println(format_args!("Schema: {}", schema));
                p.unindent();
            }
            Node::Select { source, condition } => {
                p.println("Select {");
                p.indent();
                p.print("From: ");
                source.print(p);
                p.println(format_args!("Condition: {}", condition));
                p.unindent();
            }
            Node::Project { source, columns, .. } => {
                p.println("Project {");
                p.indent();
                p.print("From: ");
                source.print(p);
                p.println("Columns:");
                p.indent();
                for (i, column) in columns.iter().enumerate() {
                    p.println(format_args!("({}) {}", i, column));
                }
                p.unindent();
                p.unindent();
            }
            Node::Join {
                join_type,
                left,
                right,
                condition,
                ..
            } => {
                p.println("Join {");
                p.indent();
                p.println(format_args!("Type: {}", join_type));
                p.print("Left: ");
                left.print(p);
                p.print("Right: ");
                right.print(p);
                p.println(format_args!("Condition: {}", condition));
                p.unindent();
            }
        }
        p.println("}");
    }
}

impl Display for OutputColumn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.name, self.expr)
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut printer = Printer::default();
        self.print(&mut printer);
        f.write_str(&printer.out)
    }
}

impl Display for Plan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::Printer;
    use crate::{
        error::Result,
        sql::{parser::parse, plan::Plan},
        storage::sample::sample_database,
    };

    #[test]
    fn test_printer() -> Result<()> {
        let mut p = Printer::default();
        p.println("foo");
        p.indent();
        p.print("bar: ");
        p.println("baz");
        p.unindent();
        p.unindent();
        p.println("qux");
        assert_eq!(p.out, "foo\n    bar: baz\nqux\n");
        Ok(())
    }

    #[test]
    fn test_print_plan() -> Result<()> {
        let db = sample_database()?;
        let plan = Plan::build(parse("select name from people where id = 2")?, &db)?;
        let want = "\
Project {
    From: Select {
        From: Load {
            Table: \"people\"
            Schema: TableSchema(people.id decimal not null, people.name text not null)
        }
        Condition: BinaryOperation(ColumnReference(0, decimal) eq Constant(2))
    }
    Columns:
        (0) people.name: ColumnReference(1, text)
}
";
        assert_eq!(plan.to_string(), want);
        Ok(())
    }
}
