//! Code fix registry.
//!
//! Fixes are registered for the rule codes they declare. For a diagnostic
//! the registry collects every action the matching fixes offer, in
//! registration order.

use rustc_hash::FxHashMap;
use tsg_diagnostic::RuleCode;
use tsg_ir::WorkspaceEdit;

use crate::{AttributeFix, CodeAction, CodeFix, FixContext, FixError, FixRun, RenameFix, SelfArgumentFix};

pub struct FixRegistry {
    fixes: Vec<Box<dyn CodeFix>>,
    /// Index from rule code to fix indices.
    by_code: FxHashMap<RuleCode, Vec<usize>>,
}

impl Default for FixRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl FixRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        FixRegistry {
            fixes: Vec::new(),
            by_code: FxHashMap::default(),
        }
    }

    /// The registry with every built-in fix: rename and attribute for
    /// `TSG2`, self argument for `TSG1`.
    pub fn with_builtin_fixes() -> Self {
        let mut registry = Self::new();
        registry.register(RenameFix);
        registry.register(AttributeFix);
        registry.register(SelfArgumentFix);
        registry
    }

    pub fn register<F: CodeFix + 'static>(&mut self, fix: F) {
        let idx = self.fixes.len();
        for &code in fix.fixable_codes() {
            self.by_code.entry(code).or_default().push(idx);
        }
        self.fixes.push(Box::new(fix));
    }

    /// All code actions for the context's diagnostic.
    pub fn actions(&self, ctx: &FixContext<'_>) -> Vec<CodeAction> {
        self.fixes_for(ctx.diagnostic.code)
            .flat_map(|fix| fix.register_fixes(ctx))
            .collect()
    }

    pub fn fixes_for(&self, code: RuleCode) -> impl Iterator<Item = &dyn CodeFix> + '_ {
        self.by_code
            .get(&code)
            .into_iter()
            .flatten()
            .filter_map(|&idx| self.fixes.get(idx))
            .map(Box::as_ref)
    }

    /// The fix registered under `equivalence_key`.
    pub fn find(&self, equivalence_key: &str) -> Option<&dyn CodeFix> {
        self.fixes
            .iter()
            .find(|fix| fix.equivalence_key() == equivalence_key)
            .map(Box::as_ref)
    }

    pub fn has_fixes_for(&self, code: RuleCode) -> bool {
        self.by_code.contains_key(&code)
    }

    pub fn fix_count(&self) -> usize {
        self.fixes.len()
    }

    /// Run `action` to completion.
    pub fn apply(&self, ctx: &FixContext<'_>, action: &CodeAction) -> Result<WorkspaceEdit, FixError> {
        let fix = self
            .fixes_for(action.diagnostic.code)
            .find(|fix| fix.equivalence_key() == action.equivalence_key)
            .ok_or_else(|| FixError::NotApplicable {
                key: action.equivalence_key.to_string(),
                code: action.diagnostic.code,
            })?;
        FixRun::new().execute(fix, ctx, action)
    }
}

impl std::fmt::Debug for FixRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FixRegistry")
            .field("fix_count", &self.fix_count())
            .field("codes", &self.by_code.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}
