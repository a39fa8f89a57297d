use std::process::Command;

fn main() {
    // --dirty marks uncommitted-tree builds
    let describe = Command::new("git")
        .args(["describe", "--always", "--dirty"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .map(|o| String::from_utf8_lossy(&o.stdout).trim().to_string());

    println!(
        "cargo:rustc-env=BUILD_GIT_HASH={}",
        describe.unwrap_or_else(|| "unknown".to_string())
    );
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/heads");
}
