use super::filter::{classify, Decision};
use crate::output::ReportLine;
use crate::parse::{SyntaxNode, TreeVisitor};
use std::io::{self, Write};

/// Walk the tree below `root` in depth-first pre-order and hand every
/// reportable node to `emit`. Returns how many lines were emitted.
///
/// The root itself is never classified. Children are always visited,
/// whether or not their parent was reported or lies in the primary file.
/// Only a failing `emit` stops the walk early.
pub fn walk<N, F>(root: &N, mut emit: F) -> io::Result<usize>
where
    N: SyntaxNode,
    F: FnMut(ReportLine) -> io::Result<()>,
{
    let mut stack = root.children();
    stack.reverse();
    let mut reported = 0;

    while let Some(node) = stack.pop() {
        if classify(&node) == Decision::Report {
            if let Some(extent) = node.extent() {
                emit(ReportLine::new(node.kind(), extent))?;
                reported += 1;
            }
        }

        let mut children = node.children();
        children.reverse();
        stack.append(&mut children);
    }

    Ok(reported)
}

/// Writes report lines to `out` as the walk produces them
pub struct Reporter<'w, W: Write> {
    out: &'w mut W,
}

impl<'w, W: Write> Reporter<'w, W> {
    pub fn new(out: &'w mut W) -> Self {
        Self { out }
    }
}

impl<W: Write> TreeVisitor for Reporter<'_, W> {
    type Output = io::Result<usize>;

    fn visit<N: SyntaxNode>(self, root: &N) -> Self::Output {
        let out = self.out;
        walk(root, |line| writeln!(out, "{}", line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::NodeKind;
    use crate::walk::testing::TestNode;

    fn collect(root: &TestNode) -> Vec<String> {
        let mut lines = Vec::new();
        walk(root, |line| {
            lines.push(line.to_string());
            Ok(())
        })
        .unwrap();
        lines
    }

    #[test]
    fn test_kind_filtering() {
        // int f(int n) { for (...) { if (...) ... } }  class W { void m() {} };
        let root = TestNode::unit(vec![
            TestNode::primary(NodeKind::FunctionDecl, 1).with(vec![TestNode::primary(
                NodeKind::CompoundStmt,
                1,
            )
            .with(vec![TestNode::primary(NodeKind::ForStmt, 3).with(vec![
                TestNode::primary(NodeKind::CompoundStmt, 3)
                    .with(vec![TestNode::primary(NodeKind::IfStmt, 4)]),
            ])])]),
            TestNode::primary(NodeKind::ClassDecl, 8)
                .with(vec![TestNode::primary(NodeKind::CxxMethod, 10)]),
        ]);

        assert_eq!(
            collect(&root),
            vec![
                "FunctionDecl;<main.cpp:1:1, line:2:2>",
                "ForStmt;<main.cpp:3:1, line:4:2>",
                "CXXMethod;<main.cpp:10:1, line:11:2>",
            ]
        );
    }

    #[test]
    fn test_root_is_not_reported() {
        let root = TestNode::primary(NodeKind::FunctionDecl, 1)
            .with(vec![TestNode::primary(NodeKind::LambdaExpr, 2)]);
        assert_eq!(collect(&root), vec!["LambdaExpr;<main.cpp:2:1, line:3:2>"]);
    }

    #[test]
    fn test_header_nodes_not_reported_but_descended() {
        // struct S {
        // #include "header.h"   <- declares a method, and a lambda inside it
        // };
        let root = TestNode::unit(vec![TestNode::primary(NodeKind::StructDecl, 1).with(vec![
            TestNode::header(NodeKind::CxxMethod, 1)
                .with(vec![TestNode::primary(NodeKind::WhileStmt, 5)]),
        ])]);

        assert_eq!(collect(&root), vec!["WhileStmt;<main.cpp:5:1, line:6:2>"]);
    }

    #[test]
    fn test_nested_reports_in_pre_order() {
        let root = TestNode::unit(vec![
            TestNode::primary(NodeKind::Namespace, 1).with(vec![
                TestNode::primary(NodeKind::FunctionTemplate, 2).with(vec![
                    TestNode::primary(NodeKind::DoStmt, 3)
                        .with(vec![TestNode::primary(NodeKind::LambdaExpr, 4)]),
                    TestNode::primary(NodeKind::CxxForRangeStmt, 6),
                ]),
                TestNode::primary(NodeKind::Constructor, 9),
            ]),
            TestNode::primary(NodeKind::Destructor, 12),
        ]);

        let kinds: Vec<String> = collect(&root)
            .into_iter()
            .map(|line| line.split(';').next().unwrap_or_default().to_string())
            .collect();
        assert_eq!(
            kinds,
            vec![
                "FunctionTemplate",
                "DoStmt",
                "LambdaExpr",
                "CXXForRangeStmt",
                "CXXConstructor",
                "CXXDestructor",
            ]
        );
    }

    #[test]
    fn test_node_without_extent_is_skipped_but_descended() {
        let root = TestNode::unit(vec![TestNode::primary(NodeKind::FunctionDecl, 1)
            .without_extent()
            .with(vec![TestNode::primary(NodeKind::ForStmt, 2)])]);

        assert_eq!(collect(&root), vec!["ForStmt;<main.cpp:2:1, line:3:2>"]);
    }

    #[test]
    fn test_deeply_nested_loop_found() {
        let mut node = TestNode::primary(NodeKind::ForStmt, 1);
        for line in 2..500 {
            node = TestNode::primary(NodeKind::CompoundStmt, line).with(vec![node]);
        }
        let root = TestNode::unit(vec![node]);

        let count = walk(&root, |_| Ok(())).unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_emit_error_stops_walk() {
        let root = TestNode::unit(vec![
            TestNode::primary(NodeKind::FunctionDecl, 1),
            TestNode::primary(NodeKind::FunctionDecl, 5),
        ]);

        let mut seen = 0;
        let result = walk(&root, |_| {
            seen += 1;
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        });
        assert!(result.is_err());
        assert_eq!(seen, 1);
    }

    #[test]
    fn test_reporter_writes_lines() {
        let root = TestNode::unit(vec![TestNode::primary(NodeKind::WhileStmt, 7)]);
        let mut out = Vec::new();

        let count = Reporter::new(&mut out).visit(&root).unwrap();
        assert_eq!(count, 1);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "WhileStmt;<main.cpp:7:1, line:8:2>\n"
        );
    }
}
