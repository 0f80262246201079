pub mod builders;

use pplc::schedule::{ResolvedModel, Strictness};

/// Compile a document under reference (lenient) semantics.
pub fn compile_lenient(source: &str) -> anyhow::Result<ResolvedModel> {
    Ok(pplc::compile(source, Strictness::Lenient)?)
}

/// Compile a document under strict semantics.
pub fn compile_strict(source: &str) -> anyhow::Result<ResolvedModel> {
    Ok(pplc::compile(source, Strictness::Strict)?)
}
