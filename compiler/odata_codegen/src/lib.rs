//! Typed OData rule parsers generated by `build.rs` from
//! `grammars/odata-literals.abnf`.
//!
//! Building this crate compiles the code generator's output. The tests
//! hold it to the hand-written rules in `odata_rules`.

/// Every rule of the grammar, as `abnfc gen` would write it.
#[allow(clippy::all, clippy::pedantic, unused_imports)]
pub mod odata {
    include!(concat!(env!("OUT_DIR"), "/odata_literals.rs"));
}
