use std::env;
use std::path::PathBuf;

/// The digest surface we generate bindings for, everything else in `evp.h` is ignored.
const FUNCTIONS: &[&str] = &[
    "EVP_get_digestbyname",
    "EVP_MD_CTX_new",
    "EVP_MD_CTX_free",
    "EVP_DigestInit_ex",
    "EVP_DigestUpdate",
    "EVP_DigestFinal_ex",
    "EVP_DigestFinalXOF",
];

/// Header directories exported by `openssl-sys` (`cargo:include=...`), if any.
fn openssl_include_dirs() -> Vec<PathBuf> {
    env::var_os("DEP_OPENSSL_INCLUDE")
        .map(|dirs| env::split_paths(&dirs).collect())
        .unwrap_or_default()
}

fn main() {
    println!("cargo:rerun-if-changed=wrapper.h");
    println!("cargo:rerun-if-env-changed=DEP_OPENSSL_INCLUDE");

    let mut bindings = bindgen::Builder::default()
        .use_core()
        .ctypes_prefix("::core::ffi")
        .header("wrapper.h")
        .allowlist_var("EVP_MAX_MD_SIZE")
        .opaque_type("EVP_MD")
        .opaque_type("EVP_MD_CTX")
        .opaque_type("ENGINE")
        .layout_tests(false);

    for function in FUNCTIONS {
        bindings = bindings.allowlist_function(function);
    }

    for dir in openssl_include_dirs() {
        bindings = bindings.clang_arg(format!("-I{}", dir.display()));
    }

    let bindings = bindings
        .parse_callbacks(Box::new(bindgen::CargoCallbacks::new()))
        .generate()
        .expect("Unable to generate bindings");

    let out_path = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR is set by cargo"));
    bindings
        .write_to_file(out_path.join("bindings.rs"))
        .expect("Couldn't write bindings");
}
