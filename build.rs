use std::env;

fn main() {
    // 获取目标平台信息
    let target = env::var("TARGET").unwrap_or_else(|_| "unknown".to_string());

    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=TARGET");

    // 供 `--version` 输出构建目标
    println!("cargo:rustc-env=DEEPMAIL_BUILD_TARGET={}", target);
}
