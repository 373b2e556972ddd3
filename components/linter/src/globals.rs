//! Predefined global identifiers.

use std::collections::BTreeMap;

use crate::config::EsVersion;

/// Names the analyzed code may use without declaring them, mapped to
/// whether assigning to them is allowed.
pub type KnownGlobals = BTreeMap<String, bool>;

/// Standard identifiers, each with the edition that introduced it.
const STANDARD: &[(&str, EsVersion)] = &[
    ("Array", EsVersion::Es3),
    ("Boolean", EsVersion::Es3),
    ("Date", EsVersion::Es3),
    ("decodeURI", EsVersion::Es3),
    ("decodeURIComponent", EsVersion::Es3),
    ("encodeURI", EsVersion::Es3),
    ("encodeURIComponent", EsVersion::Es3),
    ("Error", EsVersion::Es3),
    ("eval", EsVersion::Es3),
    ("EvalError", EsVersion::Es3),
    ("Function", EsVersion::Es3),
    ("hasOwnProperty", EsVersion::Es3),
    ("isFinite", EsVersion::Es3),
    ("isNaN", EsVersion::Es3),
    ("Math", EsVersion::Es3),
    ("Number", EsVersion::Es3),
    ("Object", EsVersion::Es3),
    ("parseInt", EsVersion::Es3),
    ("parseFloat", EsVersion::Es3),
    ("RangeError", EsVersion::Es3),
    ("ReferenceError", EsVersion::Es3),
    ("RegExp", EsVersion::Es3),
    ("String", EsVersion::Es3),
    ("SyntaxError", EsVersion::Es3),
    ("TypeError", EsVersion::Es3),
    ("URIError", EsVersion::Es3),
    ("JSON", EsVersion::Es5),
    ("ArrayBuffer", EsVersion::Es2015),
    ("DataView", EsVersion::Es2015),
    ("Float32Array", EsVersion::Es2015),
    ("Float64Array", EsVersion::Es2015),
    ("Int8Array", EsVersion::Es2015),
    ("Int16Array", EsVersion::Es2015),
    ("Int32Array", EsVersion::Es2015),
    ("Map", EsVersion::Es2015),
    ("Promise", EsVersion::Es2015),
    ("Proxy", EsVersion::Es2015),
    ("Reflect", EsVersion::Es2015),
    ("Set", EsVersion::Es2015),
    ("Symbol", EsVersion::Es2015),
    ("Uint8Array", EsVersion::Es2015),
    ("Uint16Array", EsVersion::Es2015),
    ("Uint32Array", EsVersion::Es2015),
    ("Uint8ClampedArray", EsVersion::Es2015),
    ("WeakMap", EsVersion::Es2015),
    ("WeakSet", EsVersion::Es2015),
    ("Atomics", EsVersion::Es2017),
    ("SharedArrayBuffer", EsVersion::Es2017),
    ("BigInt", EsVersion::Es2020),
    ("BigInt64Array", EsVersion::Es2020),
    ("BigUint64Array", EsVersion::Es2020),
    ("globalThis", EsVersion::Es2020),
    ("FinalizationRegistry", EsVersion::Es2021),
    ("WeakRef", EsVersion::Es2021),
];

/// Value properties of the global object that cannot be reassigned.
const READ_ONLY: &[&str] = &["NaN", "Infinity", "undefined"];

/// Look up a standard identifier for `edition`.
///
/// Returns `Some(writable)` when the name is predefined.
pub fn standard_global(name: &str, edition: EsVersion) -> Option<bool> {
    if READ_ONLY.contains(&name) {
        return Some(false);
    }
    if name == "arguments" {
        return Some(true);
    }
    STANDARD
        .iter()
        .find(|(standard, _)| *standard == name)
        .filter(|(_, since)| *since <= edition)
        .map(|_| true)
}
