// Copies static assets to dist/ so the site can be served or deployed
// as-is. The wasm bundle itself is produced by wasm-pack into static/pkg
// (see src/main.rs) and travels along with the copy.
use std::path::Path;

fn main() {
    println!("cargo:rerun-if-changed=static");

    let out = Path::new("dist");
    if out.exists() {
        std::fs::remove_dir_all(out).ok();
    }
    std::fs::create_dir_all(out).ok();

    let static_dir = Path::new("static");
    if static_dir.exists() {
        let mut opts = fs_extra::dir::CopyOptions::new();
        opts.content_only = true;
        opts.overwrite = true;
        if let Err(e) = fs_extra::dir::copy(static_dir, out, &opts) {
            println!("cargo:warning=failed to copy static assets: {e}");
        }
    }
}
