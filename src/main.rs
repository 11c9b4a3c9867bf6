//! Host-side helper: `cargo run` compiles the WASM bundle into `static/pkg`
//! and serves the assembled `dist/` site locally for a quick look at the
//! page.

use std::process::{Command, Stdio};
use std::{env, thread, time::Duration};

fn main() {
    // Only meaningful on non-wasm targets.
    if env::var("TARGET").unwrap_or_default() == "wasm32-unknown-unknown" {
        return;
    }

    println!("Building WASM pkg …");
    match Command::new("wasm-pack")
        .args([
            "build",
            "--release",
            "--target",
            "web",
            "--out-dir",
            "static/pkg",
        ])
        .status()
    {
        Ok(st) if st.success() => {}
        Ok(_) => {
            eprintln!("wasm-pack finished with errors. Ensure wasm-pack is installed (https://rustwasm.github.io/wasm-pack/).");
            std::process::exit(1);
        }
        Err(_) => {
            eprintln!("wasm-pack not found in PATH. Serving whatever dist/ holds from the last build.");
        }
    }

    println!("Serving the page at http://127.0.0.1:8080 …");
    let _server = Command::new("python3")
        .args(["-m", "http.server", "8080", "--directory", "static"])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .expect("failed to start http server");

    // Keep process alive while the server runs.
    loop {
        thread::sleep(Duration::from_secs(60));
    }
}
