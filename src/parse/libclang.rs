//! libclang Front End
//!
//! The `clang` crate loads the library and guards the one-instance rule.
//! Parsing and cursor walking go through `clang-sys` directly, so every
//! `CXErrorCode` is inspected before a translation unit handle exists.
//! The index and translation unit are RAII handles whose lifetimes nest,
//! so every exit path releases them in order.
//!
//! @module parse/libclang

use super::{Extent, Frontend, NodeKind, ParseFailure, SourcePosition, SyntaxNode, TreeVisitor};
use crate::error::{Error, Result};
use clang::Clang;
use clang_sys::{
    clang_Location_isFromMainFile, clang_Range_isNull, clang_createIndex, clang_disposeDiagnostic,
    clang_disposeIndex, clang_disposeString, clang_disposeTranslationUnit, clang_getCString,
    clang_getCursorExtent, clang_getCursorKind, clang_getDiagnostic, clang_getDiagnosticSpelling,
    clang_getExpansionLocation, clang_getFileName, clang_getNumDiagnostics, clang_getRangeEnd,
    clang_getRangeStart, clang_getTranslationUnitCursor, clang_parseTranslationUnit2,
    clang_visitChildren, CXChildVisitResult, CXChildVisit_Continue, CXClientData, CXCursor,
    CXCursorKind, CXCursor_CXXForRangeStmt, CXCursor_CXXMethod, CXCursor_ClassDecl,
    CXCursor_ClassTemplate, CXCursor_CompoundStmt, CXCursor_Constructor,
    CXCursor_ConversionFunction, CXCursor_Destructor, CXCursor_DoStmt, CXCursor_ForStmt,
    CXCursor_FunctionDecl, CXCursor_FunctionTemplate, CXCursor_IfStmt, CXCursor_LambdaExpr,
    CXCursor_Namespace, CXCursor_ObjCInstanceMethodDecl, CXCursor_StructDecl,
    CXCursor_SwitchStmt, CXCursor_WhileStmt, CXErrorCode, CXError_ASTReadError,
    CXError_Crashed, CXError_Failure, CXError_InvalidArguments, CXError_Success, CXFile,
    CXIndex, CXSourceLocation, CXString, CXTranslationUnit, CXTranslationUnit_None,
};
use std::ffi::{CStr, CString};
use std::marker::PhantomData;
use std::os::raw::{c_char, c_int, c_uint};
use std::path::{Path, PathBuf};
use std::ptr;
use tracing::debug;

/// Front end backed by a dynamically loaded libclang
pub struct ClangFrontend {
    _clang: Clang,
    display_diagnostics: bool,
}

impl ClangFrontend {
    /// Load libclang. Only one instance may exist per process.
    pub fn new(display_diagnostics: bool) -> Result<Self> {
        let clang = Clang::new().map_err(|message| Error::FrontendUnavailable { message })?;
        debug!("Loaded libclang");

        Ok(Self {
            _clang: clang,
            display_diagnostics,
        })
    }
}

impl Frontend for ClangFrontend {
    fn parse<V: TreeVisitor>(
        &self,
        file: &Path,
        args: &[String],
        visitor: V,
    ) -> std::result::Result<V::Output, ParseFailure> {
        // Interior NUL bytes cannot be handed to libclang at all
        let c_file = CString::new(file.to_string_lossy().as_bytes())
            .map_err(|_| ParseFailure::InvalidArguments)?;
        let c_args = args
            .iter()
            .map(|arg| CString::new(arg.as_bytes()))
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|_| ParseFailure::InvalidArguments)?;
        let argv: Vec<*const c_char> = c_args.iter().map(|arg| arg.as_ptr()).collect();

        let index = IndexHandle::new(self.display_diagnostics)?;

        debug!(file = %file.display(), ?args, "Parsing translation unit");
        let mut raw: CXTranslationUnit = ptr::null_mut();
        // SAFETY: the library is loaded while `self` lives; every pointer
        // passed here outlives the call.
        let code = unsafe {
            clang_parseTranslationUnit2(
                index.ptr,
                c_file.as_ptr(),
                argv.as_ptr(),
                argv.len() as c_int,
                ptr::null_mut(),
                0,
                CXTranslationUnit_None,
                &mut raw,
            )
        };
        let unit = UnitHandle {
            ptr: checked_unit(code, raw)?,
            _index: PhantomData,
        };

        log_diagnostics(&unit);

        let root = Cursor {
            // SAFETY: `unit` is a live translation unit.
            raw: unsafe { clang_getTranslationUnitCursor(unit.ptr) },
            _unit: PhantomData,
        };
        Ok(visitor.visit(&root))
    }
}

struct IndexHandle {
    ptr: CXIndex,
}

impl IndexHandle {
    fn new(display_diagnostics: bool) -> std::result::Result<Self, ParseFailure> {
        // SAFETY: only called while the library is loaded.
        let ptr = unsafe { clang_createIndex(0, display_diagnostics as c_int) };
        if ptr.is_null() {
            return Err(ParseFailure::Failure);
        }
        Ok(Self { ptr })
    }
}

impl Drop for IndexHandle {
    fn drop(&mut self) {
        unsafe { clang_disposeIndex(self.ptr) }
    }
}

struct UnitHandle<'i> {
    ptr: CXTranslationUnit,
    _index: PhantomData<&'i IndexHandle>,
}

impl Drop for UnitHandle<'_> {
    fn drop(&mut self) {
        unsafe { clang_disposeTranslationUnit(self.ptr) }
    }
}

/// Accept a parse result only when libclang reports success and handed back
/// a unit. Every other combination is a failure category.
fn checked_unit(
    code: CXErrorCode,
    unit: CXTranslationUnit,
) -> std::result::Result<CXTranslationUnit, ParseFailure> {
    match failure_category(code) {
        Some(failure) => Err(failure),
        None if unit.is_null() => Err(ParseFailure::Failure),
        None => Ok(unit),
    }
}

fn failure_category(code: CXErrorCode) -> Option<ParseFailure> {
    match code {
        CXError_Success => None,
        CXError_Failure => Some(ParseFailure::Failure),
        CXError_Crashed => Some(ParseFailure::Crashed),
        CXError_InvalidArguments => Some(ParseFailure::InvalidArguments),
        CXError_ASTReadError => Some(ParseFailure::AstRead),
        _ => Some(ParseFailure::Unknown),
    }
}

fn log_diagnostics(unit: &UnitHandle<'_>) {
    // SAFETY: `unit` is live; each diagnostic is disposed after use.
    let count = unsafe { clang_getNumDiagnostics(unit.ptr) };
    if count == 0 {
        return;
    }

    debug!(count, "Parse produced diagnostics");
    for i in 0..count.min(3) {
        let text = unsafe {
            let diagnostic = clang_getDiagnostic(unit.ptr, i);
            let text = take_string(clang_getDiagnosticSpelling(diagnostic));
            clang_disposeDiagnostic(diagnostic);
            text
        };
        debug!("  {}", text);
    }
}

/// Copy a libclang string and release it
unsafe fn take_string(string: CXString) -> String {
    let chars = clang_getCString(string);
    let text = if chars.is_null() {
        String::new()
    } else {
        CStr::from_ptr(chars).to_string_lossy().into_owned()
    };
    clang_disposeString(string);
    text
}

fn node_kind(kind: CXCursorKind) -> NodeKind {
    match kind {
        CXCursor_FunctionDecl => NodeKind::FunctionDecl,
        CXCursor_FunctionTemplate => NodeKind::FunctionTemplate,
        CXCursor_ObjCInstanceMethodDecl => NodeKind::ObjCInstanceMethodDecl,
        CXCursor_CXXMethod => NodeKind::CxxMethod,
        CXCursor_Constructor => NodeKind::Constructor,
        CXCursor_Destructor => NodeKind::Destructor,
        CXCursor_ConversionFunction => NodeKind::ConversionFunction,
        CXCursor_LambdaExpr => NodeKind::LambdaExpr,
        CXCursor_WhileStmt => NodeKind::WhileStmt,
        CXCursor_DoStmt => NodeKind::DoStmt,
        CXCursor_ForStmt => NodeKind::ForStmt,
        CXCursor_CXXForRangeStmt => NodeKind::CxxForRangeStmt,
        CXCursor_Namespace => NodeKind::Namespace,
        CXCursor_ClassDecl => NodeKind::ClassDecl,
        CXCursor_StructDecl => NodeKind::StructDecl,
        CXCursor_ClassTemplate => NodeKind::ClassTemplate,
        CXCursor_CompoundStmt => NodeKind::CompoundStmt,
        CXCursor_IfStmt => NodeKind::IfStmt,
        CXCursor_SwitchStmt => NodeKind::SwitchStmt,
        _ => NodeKind::Other,
    }
}

/// Positions are reported where macros expand, not where they are spelled
fn position(location: CXSourceLocation) -> SourcePosition {
    let mut file: CXFile = ptr::null_mut();
    let (mut line, mut column, mut offset): (c_uint, c_uint, c_uint) = (0, 0, 0);

    // SAFETY: `location` comes from a live translation unit.
    let path = unsafe {
        clang_getExpansionLocation(location, &mut file, &mut line, &mut column, &mut offset);
        if file.is_null() {
            None
        } else {
            Some(PathBuf::from(take_string(clang_getFileName(file))))
        }
    };

    SourcePosition::new(path, line, column)
}

/// A cursor borrowed from a live translation unit
#[derive(Clone, Copy)]
pub struct Cursor<'tu> {
    raw: CXCursor,
    _unit: PhantomData<&'tu ()>,
}

extern "C" fn collect_child(
    cursor: CXCursor,
    _parent: CXCursor,
    data: CXClientData,
) -> CXChildVisitResult {
    // SAFETY: `data` is the `Vec` handed over by `Cursor::children`.
    let children = unsafe { &mut *(data as *mut Vec<CXCursor>) };
    children.push(cursor);
    CXChildVisit_Continue
}

impl<'tu> SyntaxNode for Cursor<'tu> {
    fn kind(&self) -> NodeKind {
        node_kind(unsafe { clang_getCursorKind(self.raw) })
    }

    fn extent(&self) -> Option<Extent> {
        unsafe {
            let range = clang_getCursorExtent(self.raw);
            if clang_Range_isNull(range) != 0 {
                return None;
            }
            Some(Extent {
                start: position(clang_getRangeStart(range)),
                end: position(clang_getRangeEnd(range)),
            })
        }
    }

    fn starts_in_primary_file(&self) -> bool {
        unsafe {
            let range = clang_getCursorExtent(self.raw);
            clang_Range_isNull(range) == 0
                && clang_Location_isFromMainFile(clang_getRangeStart(range)) != 0
        }
    }

    fn children(&self) -> Vec<Self> {
        let mut raw: Vec<CXCursor> = Vec::new();
        unsafe {
            clang_visitChildren(
                self.raw,
                collect_child,
                &mut raw as *mut Vec<CXCursor> as CXClientData,
            );
        }

        raw.into_iter()
            .map(|raw| Cursor {
                raw,
                _unit: PhantomData,
            })
            .collect()
    }
}
