//! Generates the Swift and Kotlin bindings of `AccountKit`.
//!
//! `cargo run -p uniffi-bindgen -- generate --library target/release/libaccountkit.a --language swift --out-dir swift`

fn main() {
    uniffi::uniffi_bindgen_main();
}
