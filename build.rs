use std::env;
use std::fs;
use std::path::Path;

fn main() {
    println!("cargo:rerun-if-env-changed=SENTRY_DSN");

    // Crash reports stay disabled unless a DSN is provided at build time
    let sentry_dsn = env::var("SENTRY_DSN").unwrap_or_else(|_| String::from("undefined"));
    let out_dir = env::var("OUT_DIR").expect("OUT_DIR is always set by cargo");
    let dest_path = Path::new(&out_dir).join("sentry_dsn.rs");
    fs::write(
        &dest_path,
        format!(r#"pub const SENTRY_DSN: &str = {:?};"#, sentry_dsn),
    )
    .expect("failed to write sentry_dsn.rs");
}
