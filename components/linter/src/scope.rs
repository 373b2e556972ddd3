//! Scope analysis for the linter
//!
//! The parser drives a [`ScopeTracker`] as it goes: it enters and exits
//! scopes, declares bindings and records references. Frames live in an
//! arena and refer to their parent by index. A frame moves through
//! Open -> Closing -> Closed; references are only resolved while it is
//! Closing, once every declaration in it (hoisted or not) is known. What a
//! frame cannot resolve moves to its parent, so a reference that reaches
//! the global frame unresolved is an implied global.

use core_types::SourcePosition;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, trace};

use crate::config::{EsVersion, LintConfig, ShadowMode, UnusedMode};
use crate::diagnostics::DiagnosticSink;
use crate::error::ParseResult;
use crate::globals::{self, KnownGlobals};
use crate::report::{BindingsSummary, ImpliedGlobal, UnusedBinding};

/// Index of a frame in the tracker's arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameId(usize);

/// Index of a reference in the tracker's arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RefId(usize);

/// What introduced a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameKind {
    /// Script top level
    Global,
    /// Module top level
    Module,
    /// Function body and parameters
    Function,
    /// Block statement, loop head, switch body
    Block,
    /// Catch clause (parameter and body)
    Catch,
    /// Class body
    Class,
}

impl FrameKind {
    /// Frames that receive hoisted `var` declarations.
    pub fn is_function_like(self) -> bool {
        matches!(self, FrameKind::Global | FrameKind::Module | FrameKind::Function)
    }
}

/// Lifecycle of a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameState {
    /// Declarations and references are still being added
    Open,
    /// Pending references are being resolved
    Closing,
    /// Fully resolved
    Closed,
}

/// Declaration kind of a binding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclKind {
    /// `var`
    Var,
    /// `let`
    Let,
    /// `const`
    Const,
    /// Function declaration
    Function,
    /// Function parameter
    Param,
    /// Class declaration
    Class,
    /// Catch clause parameter
    CatchParam,
    /// Import binding
    Import,
}

impl DeclKind {
    /// Block-scoped declarations with a temporal dead zone.
    pub fn is_lexical(self) -> bool {
        matches!(self, DeclKind::Let | DeclKind::Const | DeclKind::Class)
    }

    /// Word used for the kind in messages.
    pub fn word(self) -> &'static str {
        match self {
            DeclKind::Var => "var",
            DeclKind::Let => "let",
            DeclKind::Const => "const",
            DeclKind::Function => "function",
            DeclKind::Param => "param",
            DeclKind::Class => "class",
            DeclKind::CatchParam => "exception",
            DeclKind::Import => "import",
        }
    }
}

/// How a reference uses its variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Plain read
    Read,
    /// Plain assignment
    Write,
    /// Compound assignment or update
    ReadWrite,
    /// Operand of `typeof`, which tolerates undeclared names
    Typeof,
}

impl Access {
    fn writes(self) -> bool {
        matches!(self, Access::Write | Access::ReadWrite)
    }
}

/// A declared name
#[derive(Debug, Clone)]
pub struct Binding {
    /// Declared name
    pub name: String,
    /// Declaration kind
    pub kind: DeclKind,
    /// Position of the declaring identifier
    pub declared_at: SourcePosition,
    /// Offset where the temporal dead zone ends
    pub initialized_at: usize,
    /// First reference that hit the dead zone
    pub first_use_before_decl: Option<SourcePosition>,
    /// Read at least once
    pub used: bool,
    /// Marked exported
    pub exported: bool,
    /// Block a `var` was declared in, when not at function level
    pub block: Option<FrameId>,
    /// Name of a function expression inside its own body
    pub implicit: bool,
}

impl Binding {
    /// Bindings that can never be reassigned.
    pub fn is_constant(&self) -> bool {
        matches!(self.kind, DeclKind::Const | DeclKind::Import)
    }
}

#[derive(Debug, Clone)]
struct Reference {
    name: String,
    pos: SourcePosition,
    access: Access,
    origin: FrameId,
    crossed_function: bool,
}

/// A statement label
#[derive(Debug, Clone)]
pub struct Label {
    /// Label name
    pub name: String,
    /// Labels an iteration statement
    pub iteration: bool,
    /// Position of the label
    pub pos: SourcePosition,
}

/// Facts about a function being entered
#[derive(Debug, Clone, Default)]
pub struct FunctionInfo {
    /// Name used in diagnostics
    pub name: String,
    /// `function*`
    pub generator: bool,
    /// `async`
    pub is_async: bool,
    /// Arrow function
    pub arrow: bool,
    /// Object or class method, so `super` property access is allowed
    pub method: bool,
    /// Class constructor, so `super()` may be allowed
    pub constructor: bool,
}

/// A single scope
#[derive(Debug, Clone)]
pub struct Frame {
    /// Frame kind
    pub kind: FrameKind,
    /// Enclosing frame
    pub parent: Option<FrameId>,
    /// Lifecycle state
    pub state: FrameState,
    /// Function name, or `(main)` at top level
    pub name: String,
    /// Where the frame begins
    pub start: SourcePosition,
    /// Strict mode code
    pub strict: bool,
    /// Function facts (meaningful on function frames)
    pub info: FunctionInfo,
    /// `yield` expressions seen directly in this function
    pub yields: u32,
    /// Enclosing loops within this function
    pub loop_depth: u32,
    /// Enclosing loops and switches within this function
    pub breakable_depth: u32,
    /// Active labels within this function
    pub labels: Vec<Label>,
    bindings: Vec<Binding>,
    index: FxHashMap<String, usize>,
    hoisted: FxHashSet<String>,
    pending: Vec<RefId>,
}

impl Frame {
    fn new(kind: FrameKind, parent: Option<FrameId>, name: String, start: SourcePosition, strict: bool) -> Self {
        Self {
            kind,
            parent,
            state: FrameState::Open,
            name,
            start,
            strict,
            info: FunctionInfo::default(),
            yields: 0,
            loop_depth: 0,
            breakable_depth: 0,
            labels: Vec::new(),
            bindings: Vec::new(),
            index: FxHashMap::default(),
            hoisted: FxHashSet::default(),
            pending: Vec::new(),
        }
    }

    /// Binding declared directly in this frame.
    pub fn lookup(&self, name: &str) -> Option<&Binding> {
        self.index.get(name).map(|&i| &self.bindings[i])
    }

    fn lookup_mut(&mut self, name: &str) -> Option<&mut Binding> {
        match self.index.get(name) {
            Some(&i) => Some(&mut self.bindings[i]),
            None => None,
        }
    }

    /// Bindings in declaration order.
    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    fn insert(&mut self, binding: Binding) {
        self.index.insert(binding.name.clone(), self.bindings.len());
        self.bindings.push(binding);
    }
}

/// Options the tracker consults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScopeOptions {
    /// Edition for standard globals
    pub esversion: EsVersion,
    /// Report implied globals (W117)
    pub undef: bool,
    /// Unused binding policy
    pub unused: UnusedMode,
    /// Report uses before `var`/function declarations (W003)
    pub latedef: bool,
    /// Redeclaration policy
    pub shadow: ShadowMode,
    /// Accept block `var`s used outside the block
    pub funcscope: bool,
}

impl From<&LintConfig> for ScopeOptions {
    fn from(config: &LintConfig) -> Self {
        Self {
            esversion: config.esversion,
            undef: config.undef,
            unused: config.unused,
            latedef: config.latedef,
            shadow: config.shadow,
            funcscope: config.funcscope,
        }
    }
}

/// Scope tracker for one analysis
pub struct ScopeTracker {
    frames: Vec<Frame>,
    stack: Vec<FrameId>,
    refs: Vec<Reference>,
    known: KnownGlobals,
    options: ScopeOptions,
    implied: Vec<ImpliedGlobal>,
    implied_index: FxHashMap<String, usize>,
    exported: Vec<String>,
    exported_set: FxHashSet<String>,
    unused: Vec<UnusedBinding>,
}

/// Scope name used for top-level code.
pub const MAIN: &str = "(main)";

impl ScopeTracker {
    /// Create a tracker with the global frame open, plus a module frame for
    /// module code.
    pub fn new(known: KnownGlobals, options: ScopeOptions, module: bool, strict: bool) -> Self {
        let mut tracker = Self {
            frames: Vec::new(),
            stack: Vec::new(),
            refs: Vec::new(),
            known,
            options,
            implied: Vec::new(),
            implied_index: FxHashMap::default(),
            exported: Vec::new(),
            exported_set: FxHashSet::default(),
            unused: Vec::new(),
        };
        tracker.push_frame(Frame::new(FrameKind::Global, None, MAIN.to_string(), SourcePosition::START, strict));
        if module {
            tracker.push_frame(Frame::new(
                FrameKind::Module,
                Some(FrameId(0)),
                MAIN.to_string(),
                SourcePosition::START,
                true,
            ));
        }
        tracker
    }

    /// Replace the options (after an inline configuration change).
    pub fn set_options(&mut self, options: ScopeOptions) {
        self.options = options;
    }

    /// Add a known global (from a `/* global */` directive).
    pub fn add_known_global(&mut self, name: &str, writable: bool) {
        self.known.insert(name.to_string(), writable);
    }

    /// Forget a known global (`/* global -name */`).
    pub fn remove_known_global(&mut self, name: &str) {
        self.known.remove(name);
    }

    fn push_frame(&mut self, frame: Frame) -> FrameId {
        let id = FrameId(self.frames.len());
        debug!(frame = id.0, kind = ?frame.kind, name = %frame.name, "enter scope");
        self.frames.push(frame);
        self.stack.push(id);
        id
    }

    fn current_id(&self) -> FrameId {
        self.stack.last().copied().unwrap_or(FrameId(0))
    }

    /// Innermost open frame.
    pub fn current(&self) -> &Frame {
        &self.frames[self.current_id().0]
    }

    /// Frame by id.
    pub fn frame(&self, id: FrameId) -> &Frame {
        &self.frames[id.0]
    }

    /// Index in `stack` of the nearest function-like frame.
    fn function_level(&self) -> usize {
        self.stack
            .iter()
            .rposition(|id| self.frames[id.0].kind.is_function_like())
            .unwrap_or(0)
    }

    fn function_id(&self) -> FrameId {
        self.stack.get(self.function_level()).copied().unwrap_or(FrameId(0))
    }

    /// Nearest enclosing function, module or global frame.
    pub fn function_frame(&self) -> &Frame {
        &self.frames[self.function_id().0]
    }

    fn function_frame_mut(&mut self) -> &mut Frame {
        let id = self.function_id();
        &mut self.frames[id.0]
    }

    /// Nearest enclosing non-arrow function frame, for `super`, `new.target`
    /// and `function.sent`.
    pub fn non_arrow_function(&self) -> Option<&Frame> {
        self.stack
            .iter()
            .rev()
            .map(|id| &self.frames[id.0])
            .filter(|frame| frame.kind == FrameKind::Function)
            .find(|frame| !frame.info.arrow)
    }

    /// True inside a function body (as opposed to top level).
    pub fn in_function(&self) -> bool {
        self.function_frame().kind == FrameKind::Function
    }

    /// True directly in the script or module body, outside any block.
    pub fn at_top_level(&self) -> bool {
        matches!(self.current().kind, FrameKind::Global | FrameKind::Module)
    }

    /// Strict mode applies at the current position.
    pub fn is_strict(&self) -> bool {
        let level = self.function_level();
        self.stack[level..].iter().any(|id| self.frames[id.0].strict)
    }

    /// Switch the current function to strict mode.
    pub fn set_strict(&mut self) {
        self.function_frame_mut().strict = true;
    }

    /// Name of the current function for diagnostics.
    pub fn function_name(&self) -> &str {
        &self.function_frame().name
    }

    fn function_name_of(&self, mut id: FrameId) -> String {
        loop {
            let frame = &self.frames[id.0];
            if frame.kind.is_function_like() {
                return frame.name.clone();
            }
            match frame.parent {
                Some(parent) => id = parent,
                None => return MAIN.to_string(),
            }
        }
    }

    /// Enter a block, catch clause or class body.
    pub fn enter_scope(&mut self, kind: FrameKind, pos: SourcePosition) -> FrameId {
        let strict = kind == FrameKind::Class;
        let name = self.function_name().to_string();
        let parent = self.current_id();
        self.push_frame(Frame::new(kind, Some(parent), name, pos, strict))
    }

    /// Enter a function. Strictness is inherited from the enclosing code.
    pub fn enter_function(&mut self, info: FunctionInfo, pos: SourcePosition) -> FrameId {
        let strict = self.is_strict();
        let parent = self.current_id();
        let name = if info.name.is_empty() {
            "(anonymous)".to_string()
        } else {
            info.name.clone()
        };
        let mut frame = Frame::new(FrameKind::Function, Some(parent), name, pos, strict);
        frame.info = info;
        self.push_frame(frame)
    }

    /// Close the innermost frame: resolve its references, then report its
    /// unused bindings.
    pub fn exit_scope(&mut self, sink: &mut DiagnosticSink) -> ParseResult<()> {
        let Some(id) = self.stack.pop() else {
            return Ok(());
        };
        debug!(frame = id.0, kind = ?self.frames[id.0].kind, "exit scope");
        self.frames[id.0].state = FrameState::Closing;
        self.resolve_references(id, sink)?;
        self.frames[id.0].state = FrameState::Closed;
        self.report_unused(id, sink)
    }

    /// Close every remaining frame, the global one last.
    pub fn finish(&mut self, sink: &mut DiagnosticSink) -> ParseResult<()> {
        while !self.stack.is_empty() {
            self.exit_scope(sink)?;
        }
        Ok(())
    }

    /// Declare a `var`, function, lexical, catch or import binding.
    pub fn declare_variable(
        &mut self,
        name: &str,
        kind: DeclKind,
        pos: SourcePosition,
        sink: &mut DiagnosticSink,
    ) -> ParseResult<()> {
        trace!(name, kind = kind.word(), "declare");
        match kind {
            DeclKind::Var | DeclKind::Function => self.declare_hoisted(name, kind, pos, sink),
            DeclKind::Param => self.declare_param(name, pos, false, sink),
            _ => self.declare_lexical(name, kind, pos, sink),
        }
    }

    fn declare_hoisted(
        &mut self,
        name: &str,
        kind: DeclKind,
        pos: SourcePosition,
        sink: &mut DiagnosticSink,
    ) -> ParseResult<()> {
        let level = self.function_level();
        let target = self.stack[level];
        let scope = self.function_name().to_string();

        for &id in self.stack[level + 1..].iter().rev() {
            let conflict = self.frames[id.0]
                .lookup(name)
                .is_some_and(|b| b.kind.is_lexical() || b.kind == DeclKind::Function);
            if conflict {
                return sink.report("E011", pos, vec![name.to_string()], &scope);
            }
        }
        for &id in &self.stack[level + 1..] {
            self.frames[id.0].hoisted.insert(name.to_string());
        }
        let block = (self.current_id() != target).then(|| self.current_id());

        let shadow = self.options.shadow;
        if let Some(existing) = self.frames[target.0].lookup_mut(name) {
            match existing.kind {
                DeclKind::Let | DeclKind::Const | DeclKind::Class | DeclKind::Import => {
                    return sink.report("E011", pos, vec![name.to_string()], &scope);
                }
                DeclKind::Param if existing.implicit => {
                    existing.kind = kind;
                    existing.implicit = false;
                }
                _ => {
                    if kind == DeclKind::Function {
                        existing.kind = DeclKind::Function;
                    }
                    if block.is_none() {
                        existing.block = None;
                    }
                    let redeclared = !existing.implicit && matches!(existing.kind, DeclKind::Var | DeclKind::Function);
                    existing.implicit = false;
                    if redeclared && shadow != ShadowMode::Allow {
                        return sink.report("W004", pos, vec![name.to_string()], &scope);
                    }
                }
            }
            return Ok(());
        }

        self.check_new_binding(name, target, pos, &scope, sink)?;
        self.frames[target.0].insert(Binding {
            name: name.to_string(),
            kind,
            declared_at: pos,
            initialized_at: 0,
            first_use_before_decl: None,
            used: false,
            exported: false,
            block,
            implicit: false,
        });
        Ok(())
    }

    fn declare_lexical(
        &mut self,
        name: &str,
        kind: DeclKind,
        pos: SourcePosition,
        sink: &mut DiagnosticSink,
    ) -> ParseResult<()> {
        let target = self.current_id();
        let scope = self.function_name().to_string();
        let frame = &self.frames[target.0];
        let conflict = match frame.lookup(name) {
            Some(existing) => !existing.implicit,
            None => frame.hoisted.contains(name),
        };
        if conflict {
            return sink.report("E011", pos, vec![name.to_string()], &scope);
        }
        if let Some(index) = self.frames[target.0].index.get(name).copied() {
            // The implicit self-name of a function expression is shadowed
            let binding = &mut self.frames[target.0].bindings[index];
            binding.kind = kind;
            binding.implicit = false;
            binding.declared_at = pos;
            binding.initialized_at = pos.offset + name.len();
            return Ok(());
        }

        self.check_new_binding(name, target, pos, &scope, sink)?;
        let initialized_at = match kind {
            DeclKind::Let | DeclKind::Const | DeclKind::Class => pos.offset + name.len(),
            _ => 0,
        };
        self.frames[target.0].insert(Binding {
            name: name.to_string(),
            kind,
            declared_at: pos,
            initialized_at,
            first_use_before_decl: None,
            used: false,
            exported: false,
            block: None,
            implicit: false,
        });
        Ok(())
    }

    /// Declare a function declaration that is scoped to its block.
    pub fn declare_block_function(&mut self, name: &str, pos: SourcePosition, sink: &mut DiagnosticSink) -> ParseResult<()> {
        let target = self.current_id();
        let scope = self.function_name().to_string();
        let frame = &self.frames[target.0];
        let conflict = match frame.lookup(name) {
            Some(existing) => existing.kind != DeclKind::Function || self.is_strict(),
            None => frame.hoisted.contains(name),
        };
        if conflict {
            return sink.report("E011", pos, vec![name.to_string()], &scope);
        }
        if frame.lookup(name).is_some() {
            return Ok(());
        }
        self.check_new_binding(name, target, pos, &scope, sink)?;
        self.frames[target.0].insert(Binding {
            name: name.to_string(),
            kind: DeclKind::Function,
            declared_at: pos,
            initialized_at: 0,
            first_use_before_decl: None,
            used: false,
            exported: false,
            block: None,
            implicit: false,
        });
        Ok(())
    }

    /// Declare a parameter of the current function.
    ///
    /// Duplicates are errors when `strict_list` is set (strict code, arrow
    /// functions, non-simple parameter lists) and warnings otherwise.
    pub fn declare_param(
        &mut self,
        name: &str,
        pos: SourcePosition,
        strict_list: bool,
        sink: &mut DiagnosticSink,
    ) -> ParseResult<()> {
        let target = self.function_id();
        let scope = self.function_name().to_string();
        if let Some(existing) = self.frames[target.0].lookup_mut(name) {
            if existing.implicit {
                existing.kind = DeclKind::Param;
                existing.implicit = false;
                existing.declared_at = pos;
                existing.initialized_at = pos.offset + name.len();
                return Ok(());
            }
            let code = if strict_list { "E011" } else { "W004" };
            return sink.report(code, pos, vec![name.to_string()], &scope);
        }
        self.check_new_binding(name, target, pos, &scope, sink)?;
        self.frames[target.0].insert(Binding {
            name: name.to_string(),
            kind: DeclKind::Param,
            declared_at: pos,
            initialized_at: pos.offset + name.len(),
            first_use_before_decl: None,
            used: false,
            exported: false,
            block: None,
            implicit: false,
        });
        Ok(())
    }

    /// Bind a function expression's own name inside its body.
    pub fn declare_function_name(&mut self, name: &str, pos: SourcePosition) {
        let target = self.function_id();
        if self.frames[target.0].lookup(name).is_some() {
            return;
        }
        self.frames[target.0].insert(Binding {
            name: name.to_string(),
            kind: DeclKind::Function,
            declared_at: pos,
            initialized_at: 0,
            first_use_before_decl: None,
            used: false,
            exported: false,
            block: None,
            implicit: true,
        });
    }

    /// Checks shared by every new binding: predefined global redefinition
    /// and outer-scope shadowing.
    fn check_new_binding(
        &self,
        name: &str,
        target: FrameId,
        pos: SourcePosition,
        scope: &str,
        sink: &mut DiagnosticSink,
    ) -> ParseResult<()> {
        if self.frames[target.0].kind == FrameKind::Global
            && (self.known.contains_key(name) || globals::standard_global(name, self.options.esversion).is_some())
        {
            sink.report("W079", pos, vec![name.to_string()], scope)?;
        }
        if self.options.shadow == ShadowMode::Outer {
            let mut parent = self.frames[target.0].parent;
            while let Some(id) = parent {
                let frame = &self.frames[id.0];
                if frame.lookup(name).is_some_and(|b| !b.implicit) {
                    return sink.report("W123", pos, vec![name.to_string()], scope);
                }
                parent = frame.parent;
            }
        }
        Ok(())
    }

    /// End the dead zone of `name` at `offset`.
    pub fn mark_initialized(&mut self, name: &str, offset: usize) {
        for i in (0..self.stack.len()).rev() {
            let frame = &mut self.frames[self.stack[i].0];
            if let Some(binding) = frame.lookup_mut(name) {
                if binding.kind.is_lexical() || binding.kind == DeclKind::Param {
                    binding.initialized_at = offset;
                }
                return;
            }
            if frame.kind.is_function_like() {
                return;
            }
        }
    }

    /// True if `name` is declared in any open frame.
    pub fn is_declared(&self, name: &str) -> bool {
        self.stack.iter().any(|id| self.frames[id.0].lookup(name).is_some())
    }

    /// Record a use of `name` at `pos`.
    pub fn reference_variable(&mut self, name: &str, pos: SourcePosition, access: Access) -> RefId {
        let id = RefId(self.refs.len());
        let origin = self.current_id();
        self.refs.push(Reference {
            name: name.to_string(),
            pos,
            access,
            origin,
            crossed_function: false,
        });
        self.frames[origin.0].pending.push(id);
        id
    }

    /// Change how a recorded reference uses its variable.
    pub fn set_access(&mut self, id: RefId, access: Access) {
        if let Some(reference) = self.refs.get_mut(id.0) {
            reference.access = access;
        }
    }

    /// Mark a name exported. Applies to the binding found when the
    /// top-level frame closes.
    pub fn mark_exported(&mut self, name: &str) {
        if self.exported_set.insert(name.to_string()) {
            self.exported.push(name.to_string());
        }
    }

    fn resolve_references(&mut self, id: FrameId, sink: &mut DiagnosticSink) -> ParseResult<()> {
        let mut pending = std::mem::take(&mut self.frames[id.0].pending);
        pending.sort_unstable();
        let kind = self.frames[id.0].kind;
        let parent = self.frames[id.0].parent;

        for rid in pending {
            let index = self.frames[id.0].index.get(&self.refs[rid.0].name).copied();
            match (index, parent) {
                (Some(index), _) => self.resolve_to(id, index, rid, sink)?,
                (None, Some(parent)) => {
                    if kind == FrameKind::Function {
                        self.refs[rid.0].crossed_function = true;
                    }
                    self.frames[parent.0].pending.push(rid);
                }
                (None, None) => self.resolve_global(rid, sink)?,
            }
        }
        Ok(())
    }

    fn resolve_to(&mut self, id: FrameId, index: usize, rid: RefId, sink: &mut DiagnosticSink) -> ParseResult<()> {
        let reference = self.refs[rid.0].clone();
        let scope = self.function_name_of(reference.origin);
        let binding = &mut self.frames[id.0].bindings[index];
        if reference.access != Access::Write {
            binding.used = true;
        }
        let kind = binding.kind;
        let name = binding.name.clone();
        let declared_at = binding.declared_at;
        let block = binding.block;
        let args = vec![name.clone()];

        let in_dead_zone = (kind.is_lexical() || kind == DeclKind::Param)
            && !reference.crossed_function
            && reference.pos.offset < binding.initialized_at;
        if in_dead_zone {
            binding.first_use_before_decl.get_or_insert(reference.pos);
            sink.report("E056", reference.pos, vec![name.clone(), kind.word().to_string()], &scope)?;
        } else if self.options.latedef
            && matches!(kind, DeclKind::Var | DeclKind::Function)
            && !reference.crossed_function
            && reference.pos.offset < declared_at.offset
        {
            sink.report("W003", reference.pos, args.clone(), &scope)?;
        }

        if reference.access.writes() {
            match kind {
                DeclKind::Const | DeclKind::Import => sink.report("E013", reference.pos, args.clone(), &scope)?,
                DeclKind::Function | DeclKind::Class => {
                    sink.report("W021", reference.pos, vec![name.clone(), kind.word().to_string()], &scope)?
                }
                DeclKind::CatchParam => sink.report("W022", reference.pos, Vec::new(), &scope)?,
                _ => {}
            }
        }

        if kind == DeclKind::Var && !self.options.funcscope && !reference.crossed_function {
            if let Some(block) = block {
                if !self.is_within(reference.origin, block) {
                    sink.report("W038", reference.pos, args, &scope)?;
                }
            }
        }
        Ok(())
    }

    fn is_within(&self, mut id: FrameId, ancestor: FrameId) -> bool {
        loop {
            if id == ancestor {
                return true;
            }
            match self.frames[id.0].parent {
                Some(parent) => id = parent,
                None => return false,
            }
        }
    }

    fn resolve_global(&mut self, rid: RefId, sink: &mut DiagnosticSink) -> ParseResult<()> {
        let reference = self.refs[rid.0].clone();
        let scope = self.function_name_of(reference.origin);
        let writable = self
            .known
            .get(&reference.name)
            .copied()
            .or_else(|| globals::standard_global(&reference.name, self.options.esversion));

        if let Some(writable) = writable {
            if reference.access.writes() && !writable {
                sink.report("W020", reference.pos, Vec::new(), &scope)?;
            }
            return Ok(());
        }
        if reference.access == Access::Typeof {
            return Ok(());
        }

        match self.implied_index.get(&reference.name) {
            Some(&i) => {
                let lines = &mut self.implied[i].lines;
                if !lines.contains(&reference.pos.line) {
                    lines.push(reference.pos.line);
                }
            }
            None => {
                self.implied_index.insert(reference.name.clone(), self.implied.len());
                self.implied.push(ImpliedGlobal {
                    name: reference.name.clone(),
                    lines: vec![reference.pos.line],
                });
            }
        }
        if self.options.undef {
            sink.report("W117", reference.pos, vec![reference.name], &scope)?;
        }
        Ok(())
    }

    fn report_unused(&mut self, id: FrameId, sink: &mut DiagnosticSink) -> ParseResult<()> {
        let mode = self.options.unused;
        let frame = &self.frames[id.0];
        let last_used_param = frame
            .bindings
            .iter()
            .filter(|b| b.kind == DeclKind::Param)
            .enumerate()
            .filter(|(_, b)| b.used)
            .map(|(i, _)| i)
            .last();

        let mut findings = Vec::new();
        let mut param_index = 0;
        for binding in &frame.bindings {
            let is_param = binding.kind == DeclKind::Param;
            let this_param = param_index;
            if is_param {
                param_index += 1;
            }
            if binding.used
                || binding.implicit
                || binding.exported
                || binding.kind == DeclKind::CatchParam
                || self.exported_set.contains(&binding.name)
            {
                continue;
            }
            // the summary follows the W098 policy; with the option off it
            // lists what `last-param` would report
            let listed = !is_param
                || match mode {
                    UnusedMode::Vars => false,
                    UnusedMode::Strict => true,
                    UnusedMode::Off | UnusedMode::LastParam => {
                        last_used_param.map_or(true, |last| this_param > last)
                    }
                };
            if listed {
                findings.push((binding.name.clone(), binding.kind, binding.declared_at));
            }
        }

        let scope = self.function_name_of(id);
        let reported = mode != UnusedMode::Off;
        for (name, kind, pos) in findings {
            self.unused.push(UnusedBinding {
                name: name.clone(),
                kind: kind.word(),
                line: pos.line,
                column: pos.column,
                scope: scope.clone(),
            });
            if reported {
                sink.report("W098", pos, vec![name], &scope)?;
            }
        }
        Ok(())
    }

    /// Push a label for the statement about to be parsed.
    pub fn push_label(&mut self, name: &str, iteration: bool, pos: SourcePosition) {
        self.function_frame_mut().labels.push(Label {
            name: name.to_string(),
            iteration,
            pos,
        });
    }

    /// Pop the innermost label.
    pub fn pop_label(&mut self) {
        self.function_frame_mut().labels.pop();
    }

    /// Find an active label of the current function.
    pub fn find_label(&self, name: &str) -> Option<&Label> {
        self.function_frame().labels.iter().rev().find(|label| label.name == name)
    }

    /// Enter a loop body.
    pub fn enter_loop(&mut self) {
        let frame = self.function_frame_mut();
        frame.loop_depth += 1;
        frame.breakable_depth += 1;
    }

    /// Leave a loop body.
    pub fn exit_loop(&mut self) {
        let frame = self.function_frame_mut();
        frame.loop_depth = frame.loop_depth.saturating_sub(1);
        frame.breakable_depth = frame.breakable_depth.saturating_sub(1);
    }

    /// Enter a switch body.
    pub fn enter_switch(&mut self) {
        self.function_frame_mut().breakable_depth += 1;
    }

    /// Leave a switch body.
    pub fn exit_switch(&mut self) {
        let frame = self.function_frame_mut();
        frame.breakable_depth = frame.breakable_depth.saturating_sub(1);
    }

    /// Count a `yield` in the current function.
    pub fn record_yield(&mut self) {
        self.function_frame_mut().yields += 1;
    }

    /// Binding summary. Complete only after [`finish`](Self::finish).
    pub fn summary(&self) -> BindingsSummary {
        let declared_globals = self
            .frames
            .first()
            .map(|global| global.bindings.iter().map(|b| b.name.clone()).collect())
            .unwrap_or_default();
        BindingsSummary {
            implied_globals: self.implied.clone(),
            declared_globals,
            unused: self.unused.clone(),
            exported: self.exported.clone(),
        }
    }
}
