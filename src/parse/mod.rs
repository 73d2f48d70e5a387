//! Parser Seam
//!
//! The syntax tree comes from an external compiler front end. This module
//! defines what the rest of the crate needs from it:
//! - [`Frontend`] parses one file with a given argument list
//! - [`SyntaxNode`] exposes kind, extent, origin and children of a node
//! - [`TreeVisitor`] receives the root while the parse result is alive
//!
//! @module parse

pub mod args;
pub mod libclang;

pub use libclang::ClangFrontend;

use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

// =============================================================================
// NODE MODEL
// =============================================================================

/// Node kinds the crate cares to name. Labels are the front end's own
/// cursor-kind spellings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    FunctionDecl,
    FunctionTemplate,
    ObjCInstanceMethodDecl,
    CxxMethod,
    Constructor,
    Destructor,
    ConversionFunction,
    LambdaExpr,
    WhileStmt,
    DoStmt,
    ForStmt,
    CxxForRangeStmt,
    Namespace,
    ClassDecl,
    StructDecl,
    ClassTemplate,
    CompoundStmt,
    IfStmt,
    SwitchStmt,
    Other,
}

impl NodeKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::FunctionDecl => "FunctionDecl",
            Self::FunctionTemplate => "FunctionTemplate",
            Self::ObjCInstanceMethodDecl => "ObjCInstanceMethodDecl",
            Self::CxxMethod => "CXXMethod",
            Self::Constructor => "CXXConstructor",
            Self::Destructor => "CXXDestructor",
            Self::ConversionFunction => "CXXConversion",
            Self::LambdaExpr => "LambdaExpr",
            Self::WhileStmt => "WhileStmt",
            Self::DoStmt => "DoStmt",
            Self::ForStmt => "ForStmt",
            Self::CxxForRangeStmt => "CXXForRangeStmt",
            Self::Namespace => "Namespace",
            Self::ClassDecl => "ClassDecl",
            Self::StructDecl => "StructDecl",
            Self::ClassTemplate => "ClassTemplate",
            Self::CompoundStmt => "CompoundStmt",
            Self::IfStmt => "IfStmt",
            Self::SwitchStmt => "SwitchStmt",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A position in source, 1-based
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcePosition {
    /// File name as the front end reports it; `None` for synthetic locations
    pub file: Option<PathBuf>,
    pub line: u32,
    pub column: u32,
}

impl SourcePosition {
    pub fn new(file: Option<PathBuf>, line: u32, column: u32) -> Self {
        Self { file, line, column }
    }
}

/// Start and end of a node's source range
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extent {
    pub start: SourcePosition,
    pub end: SourcePosition,
}

/// Read-only view of a syntax tree node.
///
/// Implementations borrow from a live parse result, so a node can never
/// outlive the tree it came from.
pub trait SyntaxNode: Sized {
    fn kind(&self) -> NodeKind;

    /// Source range, if the node has one
    fn extent(&self) -> Option<Extent>;

    /// Whether the node's range begins in the file being analyzed, as
    /// opposed to an included header or a synthetic location
    fn starts_in_primary_file(&self) -> bool;

    /// Direct children in source order
    fn children(&self) -> Vec<Self>;
}

// =============================================================================
// FRONT END
// =============================================================================

/// Failure categories a front end can report for a parse
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseFailure {
    #[error("error: unable to parse translation unit")]
    Failure,

    #[error("error: libclang crashed during parsing")]
    Crashed,

    #[error("error: invalid arguments passed to libclang")]
    InvalidArguments,

    #[error("error: AST deserialization failed")]
    AstRead,

    #[error("error: unknown error occurred during parsing")]
    Unknown,
}

/// Receives the root of a freshly parsed tree.
///
/// The visitor runs inside the parse scope; whatever it returns must not
/// borrow from the tree.
pub trait TreeVisitor {
    type Output;

    fn visit<N: SyntaxNode>(self, root: &N) -> Self::Output;
}

/// A compiler front end able to parse one file
pub trait Frontend {
    /// Parse `file` with `args` and hand the tree root to `visitor`.
    /// The parse result is released before this returns.
    fn parse<V: TreeVisitor>(
        &self,
        file: &Path,
        args: &[String],
        visitor: V,
    ) -> Result<V::Output, ParseFailure>;
}
