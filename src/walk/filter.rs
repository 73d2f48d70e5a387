use crate::parse::{NodeKind, SyntaxNode};

/// What the walk does with a node. Children are visited either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Report,
    RecurseOnly,
}

/// Kinds that produce a report line: function-like declarations, lambdas
/// and the four loop statements
pub fn is_reportable(kind: NodeKind) -> bool {
    matches!(
        kind,
        NodeKind::FunctionDecl
            | NodeKind::FunctionTemplate
            | NodeKind::ObjCInstanceMethodDecl
            | NodeKind::CxxMethod
            | NodeKind::Constructor
            | NodeKind::Destructor
            | NodeKind::ConversionFunction
            | NodeKind::LambdaExpr
            | NodeKind::WhileStmt
            | NodeKind::DoStmt
            | NodeKind::ForStmt
            | NodeKind::CxxForRangeStmt
    )
}

/// Location gate first (headers and synthetic nodes are never reported),
/// then the kind gate.
pub fn classify<N: SyntaxNode>(node: &N) -> Decision {
    if !node.starts_in_primary_file() {
        return Decision::RecurseOnly;
    }

    if is_reportable(node.kind()) {
        Decision::Report
    } else {
        Decision::RecurseOnly
    }
}
